use super::base_distribution::BaseDistribution;
use super::options::DistributionOptions;
use super::torch::{self, TorchDist};
use super::torch_wrapper::TorchDistribution;
use crate::error::{Error, Result};
use log::{debug, trace, warn};
use tch::Tensor;

const EVENT_DIM: usize = 1;

/// Parameters of a categorical distribution over the last axis of a tensor.
#[derive(Debug)]
pub enum CategoricalParams {
    /// Non-negative, normalized along the last axis.
    Probs(Tensor),
    /// Log probabilities; their exponentials sum to 1 along the last axis.
    Logits(Tensor),
}

impl CategoricalParams {
    /// Builds parameters from an optional pair, exactly one of which must be set.
    pub fn from_optional(probs: Option<Tensor>, logits: Option<Tensor>) -> Result<Self> {
        match (probs, logits) {
            (Some(probs), None) => Ok(CategoricalParams::Probs(probs)),
            (None, Some(logits)) => Ok(CategoricalParams::Logits(logits)),
            (Some(_), Some(_)) => Err(Error::InvalidParameters(
                "either probs or logits must be given, not both",
            )),
            (None, None) => Err(Error::InvalidParameters(
                "one of probs or logits must be given",
            )),
        }
    }

    pub fn tensor(&self) -> &Tensor {
        match self {
            CategoricalParams::Probs(t) | CategoricalParams::Logits(t) => t,
        }
    }

    fn map(self, f: impl FnOnce(Tensor) -> Result<Tensor>) -> Result<Self> {
        Ok(match self {
            CategoricalParams::Probs(t) => CategoricalParams::Probs(f(t)?),
            CategoricalParams::Logits(t) => CategoricalParams::Logits(f(t)?),
        })
    }

    fn validate(&self) -> Result<()> {
        match self {
            CategoricalParams::Probs(probs) => torch::OneHotCategorical::validate_probs(probs),
            CategoricalParams::Logits(logits) => torch::OneHotCategorical::validate_logits(logits),
        }
    }
}

/// Discrete distribution over one-hot vectors.
///
/// The last axis of the parameters holds the `K` category weights and every
/// other axis is a batch axis. Samples and enumerated support values have the
/// shape of the parameters, one-hot along the last axis.
#[derive(Debug, Clone)]
pub struct OneHotCategorical {
    inner: TorchDistribution<torch::OneHotCategorical>,
}

impl OneHotCategorical {
    pub fn new(params: CategoricalParams, options: DistributionOptions) -> Result<Self> {
        torch::num_events(&params.tensor().size())?;

        let params = match options.batch_size {
            Some(batch_size) if batch_size > 1 => {
                let size = params.tensor().size();
                if size.len() == 1 {
                    params.map(|t| Ok(t.f_expand([batch_size, size[0]], false)?))?
                } else {
                    warn!(
                        "batch_size {} ignored for parameters of shape {:?}",
                        batch_size, size
                    );
                    params
                }
            }
            _ => params,
        };

        if options.validate_args {
            params.validate()?;
        }

        let x_shape = params.tensor().size();
        let torch_dist = match params {
            CategoricalParams::Probs(probs) => torch::OneHotCategorical::from_probs(probs)?,
            CategoricalParams::Logits(logits) => torch::OneHotCategorical::from_logits(logits)?,
        };
        debug!(
            "OneHotCategorical: x_shape={:?}, num_categories={}",
            x_shape,
            torch_dist.num_events()
        );

        Ok(OneHotCategorical {
            inner: TorchDistribution::new(torch_dist, x_shape, EVENT_DIM),
        })
    }

    pub fn from_probs(probs: Tensor) -> Result<Self> {
        Self::new(CategoricalParams::Probs(probs), DistributionOptions::default())
    }

    pub fn from_logits(logits: Tensor) -> Result<Self> {
        Self::new(CategoricalParams::Logits(logits), DistributionOptions::default())
    }

    pub fn from_optional(
        probs: Option<Tensor>,
        logits: Option<Tensor>,
        options: DistributionOptions,
    ) -> Result<Self> {
        Self::new(CategoricalParams::from_optional(probs, logits)?, options)
    }

    /// Zeroes out the log density of batch entries where `log_pdf_mask` is 0.
    pub fn with_log_pdf_mask(self, log_pdf_mask: Tensor) -> Self {
        OneHotCategorical {
            inner: self.inner.with_log_pdf_mask(log_pdf_mask),
        }
    }

    pub fn probs(&self) -> &Tensor {
        self.inner.torch_dist().probs()
    }

    pub fn logits(&self) -> &Tensor {
        self.inner.torch_dist().logits()
    }

    pub fn num_categories(&self) -> i64 {
        self.inner.torch_dist().num_events()
    }

    pub fn x_shape(&self) -> &[i64] {
        self.inner.x_shape()
    }

    pub fn log_pdf_mask(&self) -> Option<&Tensor> {
        self.inner.log_pdf_mask()
    }
}

impl BaseDistribution for OneHotCategorical {
    /// A sample shaped like the parameters, one-hot along the last axis.
    fn sample(&self) -> Result<Tensor> {
        self.inner.sample()
    }

    /// `x` is one-hot along its last axis and broadcast against the parameters.
    /// The category it selects gives the log probability of each batch entry.
    fn batch_log_pdf(&self, x: &Tensor) -> Result<Tensor> {
        let mut batch_log_pdf_shape = self.inner.batch_shape(Some(x))?;
        batch_log_pdf_shape.push(1);
        let log_pxs = self.inner.torch_dist().log_prob(x)?;
        let batch_log_pdf = log_pxs.f_view(batch_log_pdf_shape.as_slice())?;
        trace!("batch_log_pdf: shape={:?}", batch_log_pdf_shape);
        self.inner.apply_log_pdf_mask(batch_log_pdf)
    }

    /// Support values of all batched variables in lock-step, not their
    /// cartesian product. The result has shape `[K] + x_shape`.
    fn enumerate_support(&self) -> Result<Tensor> {
        let values = self.inner.torch_dist().enumerate_support()?;
        let mut shape = self.inner.event_shape();
        shape.extend_from_slice(self.inner.x_shape());
        Ok(values.f_reshape(shape.as_slice())?)
    }

    fn enumerable(&self) -> bool {
        self.inner.torch_dist().has_enumerate_support()
    }

    fn reparameterized(&self) -> bool {
        self.inner.torch_dist().has_rsample()
    }

    fn batch_shape(&self, x: Option<&Tensor>) -> Result<Vec<i64>> {
        self.inner.batch_shape(x)
    }

    fn event_shape(&self) -> Vec<i64> {
        self.inner.event_shape()
    }

    fn analytic_mean(&self) -> Result<Tensor> {
        self.inner.torch_dist().mean()
    }

    fn analytic_var(&self) -> Result<Tensor> {
        self.inner.torch_dist().variance()
    }

    fn copy(&self) -> Box<dyn BaseDistribution> {
        Box::new(self.clone())
    }
}
