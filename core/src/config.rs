//! Settings with defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::nutrients::{LEGACY_RESUPPLY_FRACTION, NutrientLedger};
use crate::plant::TallPlantConfig;
use crate::preview::PreviewConfig;
use crate::surface::SurfaceConfig;

pub const CONFIG_FILE: &str = "strata.ron";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrataConfig {
    pub surface: SurfaceConfig,
    pub farmland: FarmlandConfig,
    pub tall_plants: Vec<TallPlantConfig>,
    pub preview: PreviewConfig,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            farmland: FarmlandConfig::default(),
            tall_plants: Vec::new(),
            preview: PreviewConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Defaults for newly created farmland.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FarmlandConfig {
    pub initial_level: f32,
    pub resupply_modifier: f32,
    /// Share of a consumed nutrient returned to each other channel.
    pub resupply_fraction: f32,
}

impl Default for FarmlandConfig {
    fn default() -> Self {
        Self {
            initial_level: 0.0,
            resupply_modifier: 1.0,
            resupply_fraction: LEGACY_RESUPPLY_FRACTION,
        }
    }
}

impl FarmlandConfig {
    pub fn new_ledger(&self) -> NutrientLedger {
        NutrientLedger::new(self.initial_level).with_resupply_modifier(self.resupply_modifier)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl StrataConfig {
    /// Read `strata.ron` from `config_dir`. A missing file is replaced by the
    /// defaults, which are written back so there is something to edit.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(config_dir)?;
                tracing::info!(path = %path.display(), "wrote default config");
                return Ok(config);
            }
            Err(err) => return Err(io_error(&path)(err)),
        };
        let config = ron::from_str(&text).map_err(|source| ConfigError::Syntax {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(io_error(config_dir))?;
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty)?;
        let path = config_dir.join(CONFIG_FILE);
        std::fs::write(&path, text).map_err(io_error(&path))
    }
}
