mod base_distribution;
mod one_hot_categorical;
mod options;
mod torch_wrapper;

pub mod torch;

pub use base_distribution::BaseDistribution;
pub use one_hot_categorical::{CategoricalParams, OneHotCategorical};
pub use options::DistributionOptions;
pub use torch_wrapper::TorchDistribution;
