// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Visualizer configuration, loaded from a `Quatlab.toml` file.

use std::fs;
use std::path::{Path, PathBuf};

use quatlab_anim::{AnimationKind, PhaseTables, TimelineError};
use quatlab_core::Parameters;
use quatlab_engine::AlgebraMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The conventional name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "Quatlab.toml";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`VisualizerConfig`].
    #[error("failed to parse TOML from '{path}': {source}")]
    Parse {
        /// The file that failed.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
    /// A phase table does not fit its animation.
    #[error("invalid phase table for the {kind} animation: {source}")]
    PhaseTable {
        /// The animation whose table is invalid.
        kind: AnimationKind,
        /// What is wrong with it.
        #[source]
        source: TimelineError,
    },
    /// The refresh rate is zero, negative, or not finite.
    #[error("refresh rate must be positive, got {0} Hz")]
    RefreshRate(f64),
}

/// Represents the structure of the `Quatlab.toml` file.
///
/// Every field is optional in the file; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Parameters shown at startup.
    pub parameters: Parameters,
    /// The algebra displayed at startup.
    pub mode: AlgebraMode,
    /// Whether the intermediate projection, final result and angle readouts are shown.
    pub show_final_result: bool,
    /// Frame rate of the headless runner, in Hz.
    pub refresh_hz: f64,
    /// Durations and phase boundaries of both animations.
    pub animations: PhaseTables,
}

impl Default for VisualizerConfig {
    /// Provides the configuration used when `Quatlab.toml` is not found.
    ///
    /// Angle 0°, axis (1, 0), target (2, 1), pseudo algebra, final result
    /// hidden, 60 Hz, and the stock phase tables.
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            mode: AlgebraMode::default(),
            show_final_result: false,
            refresh_hz: 60.0,
            animations: PhaseTables::default(),
        }
    }
}

impl VisualizerConfig {
    /// Loads the configuration at `path`.
    /// If the file does not exist, it returns the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!(
                "No '{}' found. Using default configuration.",
                path.display()
            );
            return Ok(Self::default());
        }

        log::info!("Found '{}'. Loading configuration.", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot: positive refresh rate and well-formed phase tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.refresh_hz.is_finite() || self.refresh_hz <= 0.0 {
            return Err(ConfigError::RefreshRate(self.refresh_hz));
        }
        for kind in [AnimationKind::Qv, AnimationKind::Qvq] {
            self.animations
                .get(kind)
                .validate(kind)
                .map_err(|source| ConfigError::PhaseTable { kind, source })?;
        }
        Ok(())
    }

    /// Duration of one frame of the headless runner, in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.refresh_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quatlab_anim::PhaseTable;
    use quatlab_core::math::Vec2;

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = VisualizerConfig::load("definitely/not/here/Quatlab.toml")
            .expect("missing file is not an error");
        assert_eq!(config, VisualizerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let config: VisualizerConfig = toml::from_str(
            r#"
            mode = "real"

            [parameters]
            angle_degrees = 90.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.mode, AlgebraMode::Real);
        assert_eq!(config.parameters.angle_degrees, 90.0);
        assert_eq!(config.parameters.axis, Vec2::new(1.0, 0.0));
        assert_eq!(config.animations, PhaseTables::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_phase_table_is_read() {
        let config: VisualizerConfig = toml::from_str(
            r#"
            [animations.qv]
            duration_ms = 1500.0
            boundaries = [0.2, 0.8]
            "#,
        )
        .expect("valid toml");
        assert_eq!(
            config.animations.qv,
            PhaseTable::new(1500.0, vec![0.2, 0.8])
        );
        assert_eq!(config.animations.qvq, AnimationKind::Qvq.default_table());
    }

    #[test]
    fn test_invalid_tables_are_rejected() {
        let mut config = VisualizerConfig::default();
        config.animations.qvq = PhaseTable::new(6000.0, vec![0.25, 0.5]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PhaseTable {
                kind: AnimationKind::Qvq,
                source: TimelineError::PhaseCountMismatch { .. },
            })
        ));

        config.animations.qvq = PhaseTable::new(6000.0, vec![0.5, 0.25, 0.75]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PhaseTable { .. })
        ));
    }

    #[test]
    fn test_non_positive_refresh_rate_is_rejected() {
        let config = VisualizerConfig {
            refresh_hz: 0.0,
            ..VisualizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::RefreshRate(_))));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config: VisualizerConfig =
            toml::from_str(include_str!("../../../Quatlab.toml")).expect("valid toml");
        assert_eq!(config, VisualizerConfig::default());
    }

    #[test]
    fn test_default_frame_interval() {
        let config = VisualizerConfig::default();
        assert!((config.frame_interval_ms() - 16.666_666).abs() < 1e-3);
    }
}
