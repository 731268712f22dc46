pub mod io;
pub mod models;

mod error;

pub use error::{Error, Result};
