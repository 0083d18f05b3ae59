mod misc;

pub mod error;
pub mod prob_distributions;

pub use error::{Error, Result};
