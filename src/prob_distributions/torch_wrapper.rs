use super::torch::{broadcast_tensors, TorchDist};
use crate::error::Result;
use crate::misc::shape::split_event;
use tch::Tensor;

/// Shape bookkeeping and masking shared by distributions backed by a [`TorchDist`].
#[derive(Debug)]
pub struct TorchDistribution<D: TorchDist> {
    torch_dist: D,
    x_shape: Vec<i64>,
    event_dim: usize,
    log_pdf_mask: Option<Tensor>,
}

impl<D: TorchDist + Clone> Clone for TorchDistribution<D> {
    fn clone(&self) -> Self {
        Self {
            torch_dist: self.torch_dist.clone(),
            x_shape: self.x_shape.clone(),
            event_dim: self.event_dim,
            log_pdf_mask: self.log_pdf_mask.as_ref().map(Tensor::shallow_clone),
        }
    }
}

impl<D: TorchDist> TorchDistribution<D> {
    pub fn new(torch_dist: D, x_shape: Vec<i64>, event_dim: usize) -> Self {
        TorchDistribution {
            torch_dist,
            x_shape,
            event_dim,
            log_pdf_mask: None,
        }
    }

    pub fn with_log_pdf_mask(mut self, log_pdf_mask: Tensor) -> Self {
        self.log_pdf_mask = Some(log_pdf_mask);
        self
    }

    pub fn torch_dist(&self) -> &D {
        &self.torch_dist
    }

    pub fn x_shape(&self) -> &[i64] {
        &self.x_shape
    }

    pub fn log_pdf_mask(&self) -> Option<&Tensor> {
        self.log_pdf_mask.as_ref()
    }

    /// Batch shape of `x` broadcast against the parameters, or of the parameters alone.
    pub fn batch_shape(&self, x: Option<&Tensor>) -> Result<Vec<i64>> {
        match x {
            Some(x) => {
                let broadcast = broadcast_tensors(x, self.torch_dist.params())?;
                Ok(split_event(&broadcast[0].size(), self.event_dim).0.to_vec())
            }
            None => Ok(self.torch_dist.batch_shape().to_vec()),
        }
    }

    pub fn event_shape(&self) -> Vec<i64> {
        self.torch_dist.event_shape().to_vec()
    }

    pub fn sample(&self) -> Result<Tensor> {
        self.torch_dist.sample()
    }

    // The mask is a 0/1 selector multiplied into log densities, not added in log space.
    pub fn apply_log_pdf_mask(&self, batch_log_pdf: Tensor) -> Result<Tensor> {
        match &self.log_pdf_mask {
            Some(mask) => Ok(batch_log_pdf.f_mul(mask)?),
            None => Ok(batch_log_pdf),
        }
    }
}
