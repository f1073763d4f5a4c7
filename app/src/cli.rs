//! Command-line arguments for the `strata` tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strata_core::{NutrientType, StrataConfig};

/// CLI values override settings loaded from `strata.ron`.
#[derive(Parser, Debug)]
#[command(name = "strata", about = "Surface material and soil nutrient toolkit")]
pub struct CliArgs {
    /// Directory holding `strata.ron` (created with defaults if missing).
    #[arg(long, default_value = ".")]
    pub config: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the configured surface state to a PNG.
    Preview(PreviewArgs),
    /// Grow a crop on a fresh plot and print nutrient levels per tick.
    Simulate(SimulateArgs),
    /// List tall plant placement attempts around a position.
    Decorate(DecorateArgs),
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[arg(long, default_value = "surface.png")]
    pub out: PathBuf,

    /// Cells per side.
    #[arg(long)]
    pub size: Option<usize>,

    #[arg(long)]
    pub origin_x: Option<i32>,

    #[arg(long)]
    pub origin_z: Option<i32>,

    /// Variant noise seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NutrientArg {
    N,
    P,
    K,
}

impl From<NutrientArg> for NutrientType {
    fn from(arg: NutrientArg) -> Self {
        match arg {
            NutrientArg::N => NutrientType::Nitrogen,
            NutrientArg::P => NutrientType::Phosphorous,
            NutrientArg::K => NutrientType::Potassium,
        }
    }
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[arg(long, default_value_t = 10)]
    pub ticks: u32,

    /// Nutrient the crop feeds on.
    #[arg(long, value_enum, default_value = "n")]
    pub nutrient: NutrientArg,

    /// Amount requested per tick.
    #[arg(long, default_value_t = 0.05)]
    pub demand: f32,

    /// Fertilizer applied before the first tick, as N,P,K.
    #[arg(long, value_delimiter = ',')]
    pub fertilizer: Option<Vec<f32>>,

    /// Persist the final ledger to this MongoDB server.
    #[arg(long)]
    pub mongo_uri: Option<String>,

    #[arg(long, default_value_t = 0)]
    pub x: i32,

    #[arg(long, default_value_t = 64)]
    pub y: i32,

    #[arg(long, default_value_t = 0)]
    pub z: i32,
}

#[derive(Args, Debug)]
pub struct DecorateArgs {
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long, default_value_t = 0)]
    pub x: i32,

    #[arg(long, default_value_t = 64)]
    pub y: i32,

    #[arg(long, default_value_t = 0)]
    pub z: i32,
}

impl CliArgs {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_overrides(&self, config: &mut StrataConfig) {
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
        if let Command::Preview(ref preview) = self.command {
            if let Some(size) = preview.size {
                config.preview.size = size;
            }
            if let Some(x) = preview.origin_x {
                config.preview.origin_x = x;
            }
            if let Some(z) = preview.origin_z {
                config.preview.origin_z = z;
            }
            if let Some(seed) = preview.seed {
                config.surface.underwater_noise.seed = seed;
            }
        }
    }
}
