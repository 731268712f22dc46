pub mod ids;
pub mod interval;
pub mod normalize;
pub mod similarity;

pub use ids::{format_id, parse_id};
pub use interval::Interval;
pub use normalize::normalize;
