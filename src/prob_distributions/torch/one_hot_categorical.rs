use super::{broadcast_tensors, num_events, TorchDist};
use crate::error::{Error, Result};
use crate::misc::shape::split_event;
use tch::{Kind, Tensor};

const NORMALIZATION_TOL: f64 = 1e-6;

/// Categorical distribution over one-hot vectors, parameterized over the last axis.
#[derive(Debug)]
pub struct OneHotCategorical {
    probs: Tensor,
    logits: Tensor,
    batch_shape: Vec<i64>,
    event_shape: Vec<i64>,
    num_events: i64,
}

impl Clone for OneHotCategorical {
    fn clone(&self) -> Self {
        Self {
            probs: self.probs.shallow_clone(),
            logits: self.logits.shallow_clone(),
            batch_shape: self.batch_shape.clone(),
            event_shape: self.event_shape.clone(),
            num_events: self.num_events,
        }
    }
}

fn clamp_eps(kind: Kind) -> f64 {
    match kind {
        Kind::Double => f64::EPSILON,
        Kind::Half => 9.765625e-4,
        Kind::BFloat16 => 7.8125e-3,
        _ => f64::from(f32::EPSILON),
    }
}

impl OneHotCategorical {
    /// Probabilities are renormalized along the last axis.
    pub fn from_probs(probs: Tensor) -> Result<Self> {
        let size = probs.size();
        let num_events = num_events(&size)?;
        let prob_sum = probs.f_sum_dim_intlist([-1].as_ref(), true, probs.kind())?;
        let probs = probs.f_div(&prob_sum)?;
        let eps = clamp_eps(probs.kind());
        let logits = probs.f_clamp(eps, 1.0 - eps)?.f_log()?;
        Ok(Self::from_parts(probs, logits, &size, num_events))
    }

    /// Logits are shifted so that their exponentials sum to 1 along the last axis.
    pub fn from_logits(logits: Tensor) -> Result<Self> {
        let size = logits.size();
        let num_events = num_events(&size)?;
        let logits = logits.f_log_softmax(-1, logits.kind())?;
        let probs = logits.f_exp()?;
        Ok(Self::from_parts(probs, logits, &size, num_events))
    }

    fn from_parts(probs: Tensor, logits: Tensor, size: &[i64], num_events: i64) -> Self {
        let (batch_shape, event_shape) = split_event(size, 1);
        Self {
            probs,
            logits,
            batch_shape: batch_shape.to_vec(),
            event_shape: event_shape.to_vec(),
            num_events,
        }
    }

    pub fn probs(&self) -> &Tensor {
        &self.probs
    }

    pub fn logits(&self) -> &Tensor {
        &self.logits
    }

    pub fn num_events(&self) -> i64 {
        self.num_events
    }

    pub fn validate_probs(probs: &Tensor) -> Result<()> {
        num_events(&probs.size())?;
        let min = probs.f_min()?.f_double_value(&[])?;
        if min.is_nan() || min < 0.0 {
            return Err(Error::MalformedParameter(format!(
                "probabilities must be non-negative, found {min}"
            )));
        }
        let sums = probs.f_sum_dim_intlist([-1].as_ref(), false, Kind::Double)?;
        let err = sums.f_sub_scalar(1.0)?.f_abs()?.f_max()?.f_double_value(&[])?;
        if err.is_nan() || err > NORMALIZATION_TOL {
            return Err(Error::MalformedParameter(format!(
                "probabilities must sum to 1 along the last axis, off by {err}"
            )));
        }
        Ok(())
    }

    pub fn validate_logits(logits: &Tensor) -> Result<()> {
        num_events(&logits.size())?;
        let max = logits.f_max()?.f_double_value(&[])?;
        if max.is_nan() || max == f64::INFINITY {
            return Err(Error::MalformedParameter(format!(
                "logits must be finite or -inf, found {max}"
            )));
        }
        Ok(())
    }
}

impl TorchDist for OneHotCategorical {
    fn params(&self) -> &Tensor {
        &self.logits
    }

    fn sample(&self) -> Result<Tensor> {
        let probs_2d = self.probs.f_reshape([-1, self.num_events])?;
        let indices = probs_2d.f_multinomial(1, true)?.f_squeeze_dim(-1)?;
        let one_hot = indices
            .f_one_hot(self.num_events)?
            .f_to_kind(self.probs.kind())?;
        let shape = [self.batch_shape.as_slice(), self.event_shape.as_slice()].concat();
        Ok(one_hot.f_reshape(shape.as_slice())?)
    }

    fn log_prob(&self, value: &Tensor) -> Result<Tensor> {
        let value_size = value.size();
        let value_event = split_event(&value_size, 1).1;
        if value_event != self.event_shape.as_slice() {
            return Err(Error::Shape {
                reason: "value must be one-hot over the category axis",
                lhs: value_size.clone(),
                rhs: self.event_shape.clone(),
            });
        }
        let index = value.f_argmax(-1, true)?;
        let broadcast = broadcast_tensors(&index, &self.logits)?;
        let index = broadcast[0].f_narrow(-1, 0, 1)?;
        Ok(broadcast[1].f_gather(-1, &index, false)?.f_squeeze_dim(-1)?)
    }

    fn enumerate_support(&self) -> Result<Tensor> {
        let n = self.num_events;
        let values = Tensor::f_eye(n, (self.probs.kind(), self.probs.device()))?;
        let ones = vec![1; self.batch_shape.len()];
        let view_shape = [&[n][..], ones.as_slice(), &[n][..]].concat();
        let expanded_shape = [&[n][..], self.batch_shape.as_slice(), &[n][..]].concat();
        Ok(values
            .f_view(view_shape.as_slice())?
            .f_expand(expanded_shape.as_slice(), false)?)
    }

    fn mean(&self) -> Result<Tensor> {
        Ok(self.probs.shallow_clone())
    }

    fn variance(&self) -> Result<Tensor> {
        let complement = self.probs.f_neg()?.f_add_scalar(1.0)?;
        Ok(self.probs.f_mul(&complement)?)
    }

    fn batch_shape(&self) -> &[i64] {
        &self.batch_shape
    }

    fn event_shape(&self) -> &[i64] {
        &self.event_shape
    }

    fn has_enumerate_support(&self) -> bool {
        true
    }
}
