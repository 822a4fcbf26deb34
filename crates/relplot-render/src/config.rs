//! Sampler and plot configuration.
//!
//! A plot file is YAML:
//!
//! ```yaml
//! width: 1200
//! height: 800
//! view: { x_min: -15, x_max: 15, y_min: -10, y_max: 10 }
//! sampler: { fine_step: 5, refinement: 2 }
//! constants:
//!   r: 5
//! relations:
//!   - x^2 + y^2 = r^2
//!   - y < sin(x)
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;

use indexmap::IndexMap;
use relplot_expr::{Environment, SymbolError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::view::{ViewRange, Viewport};

/// Sampling resolution.
///
/// The fine grid has a point every `fine_step` pixels. The coarse pass
/// samples every `refinement`-th fine point in each direction, so a coarse
/// cell spans `refinement × fine_step` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub fine_step: u32,
    pub refinement: u32,
}

impl SamplerConfig {
    /// Pixel size of a coarse cell.
    pub fn coarse_step(&self) -> u32 {
        self.fine_step * self.refinement
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fine_step == 0 {
            return Err(ConfigError::Invalid("fine_step must be > 0".to_string()));
        }
        if self.refinement == 0 {
            return Err(ConfigError::Invalid("refinement must be > 0".to_string()));
        }
        if self.fine_step.checked_mul(self.refinement).is_none() {
            return Err(ConfigError::Invalid(
                "fine_step * refinement overflows".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            fine_step: 5,
            refinement: 2,
        }
    }
}

/// Everything a headless host needs to render one plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub view: ViewRange,
    pub sampler: SamplerConfig,
    /// Extra constants, registered in file order before any relation
    /// compiles.
    pub constants: IndexMap<String, f64>,
    pub relations: Vec<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            view: ViewRange::default(),
            sampler: SamplerConfig::default(),
            constants: IndexMap::new(),
            relations: Vec::new(),
        }
    }
}

impl PlotConfig {
    /// Load and validate a plot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a plot from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: PlotConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "plot size {}x{} is empty",
                self.width, self.height
            )));
        }
        self.view.validate()?;
        self.sampler.validate()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.view, self.width, self.height)
    }

    /// Register [`constants`](Self::constants) in `env`.
    pub fn register_constants(&self, env: &mut Environment) -> Result<(), SymbolError> {
        for (name, value) in &self.constants {
            env.register_constant(name, *value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlotConfig::default().validate().is_ok());
        assert_eq!(SamplerConfig::default().coarse_step(), 10);
    }

    #[test]
    fn test_zero_steps_are_rejected() {
        let config = SamplerConfig {
            fine_step: 0,
            refinement: 2,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        let config = SamplerConfig {
            fine_step: 5,
            refinement: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = PlotConfig::from_yaml(
            "width: 600\nsampler:\n  refinement: 4\nrelations:\n  - y = x\n",
        )
        .unwrap();
        assert_eq!(config.width, 600);
        assert_eq!(config.height, 800);
        assert_eq!(config.sampler.fine_step, 5);
        assert_eq!(config.sampler.refinement, 4);
        assert_eq!(config.view, ViewRange::default());
        assert_eq!(config.relations, vec!["y = x"]);
    }

    #[test]
    fn test_invalid_yaml_view_is_rejected() {
        let err = PlotConfig::from_yaml("view: { x_min: 3, x_max: 3 }").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got: {:?}", err);
    }

    #[test]
    fn test_constants_keep_file_order() {
        let config = PlotConfig::from_yaml("constants:\n  b: 2\n  a: 1\n").unwrap();
        let names: Vec<_> = config.constants.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);

        let mut env = Environment::standard();
        config.register_constants(&mut env).unwrap();
        assert_eq!(env.variable("b").map(|v| v.get()), Some(2.0));

        // Redefining a builtin fails.
        let clash = PlotConfig::from_yaml("constants:\n  pi: 3\n").unwrap();
        assert!(clash.register_constants(&mut env).is_err());
    }
}
