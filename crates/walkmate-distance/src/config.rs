use serde::{Deserialize, Serialize};

use crate::{error::DistanceError, reference::ReferencePolicy};

/// Side length in centimeters of a standard tactile paving block.
pub const DEFAULT_BLOCK_SIDE_CM: f64 = 30.0;

/// Configuration of the distance estimation for a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// Real-world side length in centimeters of the reference block.
    pub block_side_cm: f64,
    /// Viewer position in pixels. Defaults to the bottom-center of the image.
    pub viewer_position: Option<[f64; 2]>,
    /// Policy used to choose the reference block.
    pub reference_policy: ReferencePolicy,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            block_side_cm: DEFAULT_BLOCK_SIDE_CM,
            viewer_position: None,
            reference_policy: ReferencePolicy::default(),
        }
    }
}

impl DistanceConfig {
    /// Set the real-world side length of the reference block.
    pub fn with_block_side_cm(mut self, block_side_cm: f64) -> Self {
        self.block_side_cm = block_side_cm;
        self
    }

    /// Override the viewer position in pixels.
    pub fn with_viewer_position(mut self, viewer_position: [f64; 2]) -> Self {
        self.viewer_position = Some(viewer_position);
        self
    }

    /// Check that the configuration values are usable.
    pub fn validate(&self) -> Result<(), DistanceError> {
        if !self.block_side_cm.is_finite() || self.block_side_cm <= 0.0 {
            return Err(DistanceError::InvalidConfig(format!(
                "block_side_cm must be finite and positive, got {}",
                self.block_side_cm
            )));
        }

        if let Some([x, y]) = self.viewer_position {
            if !x.is_finite() || !y.is_finite() {
                return Err(DistanceError::InvalidConfig(format!(
                    "viewer_position must be finite, got [{x}, {y}]"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DistanceConfig::default();
        assert_eq!(config.block_side_cm, 30.0);
        assert_eq!(config.viewer_position, None);
        assert_eq!(config.reference_policy, ReferencePolicy::NearestToViewer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() -> Result<(), serde_json::Error> {
        let config: DistanceConfig = serde_json::from_str(r#"{ "viewer_position": [320.0, 640.0] }"#)?;
        assert_eq!(config.block_side_cm, DEFAULT_BLOCK_SIDE_CM);
        assert_eq!(config.viewer_position, Some([320.0, 640.0]));

        let config: DistanceConfig = serde_json::from_str(
            r#"{ "block_side_cm": 50.0, "reference_policy": "nearest_to_viewer" }"#,
        )?;
        assert_eq!(config.block_side_cm, 50.0);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        let config = DistanceConfig::default().with_block_side_cm(0.0);
        assert!(matches!(
            config.validate(),
            Err(DistanceError::InvalidConfig(_))
        ));

        let config = DistanceConfig::default().with_viewer_position([f64::NAN, 10.0]);
        assert!(config.validate().is_err());
    }
}
