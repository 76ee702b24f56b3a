use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for sliding-window chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum chunk length in characters
    pub window: usize,

    /// Window advance per chunk in characters (stride <= window)
    pub stride: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        // Reference values: 500-char windows overlapping by 50 characters.
        Self {
            window: 500,
            stride: 450,
        }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(ChunkerError::invalid_config("window must be > 0"));
        }

        if self.stride == 0 {
            return Err(ChunkerError::invalid_config("stride must be > 0"));
        }

        if self.stride > self.window {
            return Err(ChunkerError::invalid_config(format!(
                "stride ({}) cannot exceed window ({})",
                self.stride, self.window
            )));
        }

        Ok(())
    }

    /// Overlap between consecutive chunks, in characters
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.window - self.stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ChunkerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.overlap(), 50);
    }

    #[test]
    fn test_config_validation() {
        let zero_window = ChunkerConfig {
            window: 0,
            stride: 1,
        };
        assert!(zero_window.validate().is_err());

        let zero_stride = ChunkerConfig {
            window: 10,
            stride: 0,
        };
        assert!(zero_stride.validate().is_err());

        let stride_exceeds_window = ChunkerConfig {
            window: 10,
            stride: 11,
        };
        assert!(stride_exceeds_window.validate().is_err());

        let stride_equals_window = ChunkerConfig {
            window: 10,
            stride: 10,
        };
        assert!(stride_equals_window.validate().is_ok());
    }
}
