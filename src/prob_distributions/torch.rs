//! Distribution primitives expressed directly in libtorch tensor ops.
//!
//! These play the part of a tensor library's own distribution objects: they
//! know nothing about event dims, masks, or the framework interface in
//! [`BaseDistribution`](super::BaseDistribution). [`TorchDistribution`](super::TorchDistribution)
//! adapts them to it.

mod one_hot_categorical;

use crate::error::{Error, Result};
use tch::Tensor;

pub use one_hot_categorical::OneHotCategorical;

pub trait TorchDist {
    /// The tensor every value is broadcast against.
    fn params(&self) -> &Tensor;
    fn sample(&self) -> Result<Tensor>;
    fn log_prob(&self, value: &Tensor) -> Result<Tensor>;
    fn enumerate_support(&self) -> Result<Tensor>;
    fn mean(&self) -> Result<Tensor>;
    fn variance(&self) -> Result<Tensor>;
    fn batch_shape(&self) -> &[i64];
    fn event_shape(&self) -> &[i64];

    fn has_enumerate_support(&self) -> bool {
        false
    }

    fn has_rsample(&self) -> bool {
        false
    }
}

/// Number of categories encoded by a parameter tensor of shape `size`.
pub(crate) fn num_events(size: &[i64]) -> Result<i64> {
    match size.last() {
        Some(&k) if k > 0 => Ok(k),
        _ => Err(Error::Shape {
            reason: "parameters need a non-empty trailing category axis",
            lhs: size.to_vec(),
            rhs: vec![],
        }),
    }
}

/// Broadcasts `lhs` against `rhs` as libtorch does, returning expanded views of both.
pub(crate) fn broadcast_tensors(lhs: &Tensor, rhs: &Tensor) -> Result<Vec<Tensor>> {
    Tensor::f_broadcast_tensors(&[lhs, rhs]).map_err(|_| Error::Shape {
        reason: "shapes are not broadcastable",
        lhs: lhs.size(),
        rhs: rhs.size(),
    })
}
