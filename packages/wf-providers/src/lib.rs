pub mod wikipedia;

mod error;

pub use error::{Error, Result};
