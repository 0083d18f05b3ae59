use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Construction options shared by distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionOptions {
    /// Leading batch size for 1-D parameters; the batch axis becomes the leftmost axis of samples.
    pub batch_size: Option<i64>,
    /// Check parameter ranges before building the distribution.
    pub validate_args: bool,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        DistributionOptions {
            batch_size: None,
            validate_args: true,
        }
    }
}

impl DistributionOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_validate_args(mut self, validate_args: bool) -> Self {
        self.validate_args = validate_args;
        self
    }
}
