use crate::error::Result;
use tch::Tensor;

/// Interface every distribution family exposes to the inference layer.
///
/// The last `event_shape().len()` axes of a value are its event; every other
/// axis is a batch axis of independent draws.
pub trait BaseDistribution {
    fn sample(&self) -> Result<Tensor>;

    /// Log density of each batch entry of `x`, with a trailing singleton axis.
    fn batch_log_pdf(&self, x: &Tensor) -> Result<Tensor>;

    /// Total log density of `x` over all batch entries.
    fn log_pdf(&self, x: &Tensor) -> Result<Tensor> {
        let batch_log_pdf = self.batch_log_pdf(x)?;
        Ok(batch_log_pdf.f_sum(batch_log_pdf.kind())?)
    }

    /// Every value of the support, stacked along a new leading axis.
    fn enumerate_support(&self) -> Result<Tensor>;

    fn enumerable(&self) -> bool {
        false
    }

    fn reparameterized(&self) -> bool {
        false
    }

    fn batch_shape(&self, x: Option<&Tensor>) -> Result<Vec<i64>>;
    fn event_shape(&self) -> Vec<i64>;

    fn shape(&self, x: Option<&Tensor>) -> Result<Vec<i64>> {
        let mut shape = self.batch_shape(x)?;
        shape.extend(self.event_shape());
        Ok(shape)
    }

    fn analytic_mean(&self) -> Result<Tensor>;
    fn analytic_var(&self) -> Result<Tensor>;
    fn copy(&self) -> Box<dyn BaseDistribution>;
}
