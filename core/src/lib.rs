// core holds the noise, surface resolution and soil nutrient logic
pub mod climate;
pub mod config;
pub mod error;
pub mod nutrients;
pub mod plant;
pub mod preview;
pub mod rock;
pub mod simplex2;
pub mod surface;

pub use climate::Climate;
pub use config::StrataConfig;
pub use error::{ConfigError, PlantConfigError, PreviewError};
pub use nutrients::{Fertilizer, NutrientLedger, NutrientRecord, NutrientType};
pub use plant::{PlantAttempt, TallPlantConfig};
pub use rock::{LayeredRockData, MaterialId, Rock, RockData};
pub use simplex2::Simplex2D;
pub use surface::{SurfaceResolver, SurfaceState};

// Deterministic 2D noise field.
// Implementations hold no mutable state once built, so they can be shared
// across threads and sampled concurrently.
pub trait Noise2D: Send + Sync {
    // Sample the field at (x, z).
    fn noise(&self, x: f64, z: f64) -> f64;

    // Sample at an integer block column.
    fn noise_at(&self, x: i32, z: i32) -> f64 {
        self.noise(x as f64, z as f64)
    }
}
