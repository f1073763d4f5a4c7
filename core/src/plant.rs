use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::PlantConfigError;
use crate::rock::MaterialId;

const TRIES: (u32, u32) = (1, 128);
const RADIUS: (u32, u32) = (1, 16);
const HEIGHT: (u32, u32) = (1, 100);

// Unchecked shape read from config files
#[derive(Deserialize)]
struct TallPlantConfigDef {
    body: MaterialId,
    head: MaterialId,
    tries: u32,
    radius: u32,
    min_height: u32,
    max_height: u32,
}

/// Decoration settings for plants taller than one block: a stack of `body`
/// materials capped with `head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TallPlantConfigDef")]
pub struct TallPlantConfig {
    body: MaterialId,
    head: MaterialId,
    tries: u32,
    radius: u32,
    min_height: u32,
    max_height: u32,
}

/// One candidate placement. The host decides whether the spot is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantAttempt {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub height: u32,
}

fn check(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<u32, PlantConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(PlantConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl TallPlantConfig {
    pub fn new(
        body: MaterialId,
        head: MaterialId,
        tries: u32,
        radius: u32,
        min_height: u32,
        max_height: u32,
    ) -> Result<Self, PlantConfigError> {
        let tries = check("tries", tries, TRIES)?;
        let radius = check("radius", radius, RADIUS)?;
        let min_height = check("min_height", min_height, HEIGHT)?;
        let max_height = check("max_height", max_height, HEIGHT)?;
        if min_height > max_height {
            return Err(PlantConfigError::InvertedHeights {
                min_height,
                max_height,
            });
        }
        Ok(Self {
            body,
            head,
            tries,
            radius,
            min_height,
            max_height,
        })
    }

    pub fn body(&self) -> MaterialId {
        self.body
    }

    pub fn head(&self) -> MaterialId {
        self.head
    }

    pub fn tries(&self) -> u32 {
        self.tries
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    // `tries` candidates scattered on x/z around origin, same seed same list
    pub fn attempts(&self, seed: u64, origin: [i32; 3]) -> Vec<PlantAttempt> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let r = self.radius as i32;
        (0..self.tries)
            .map(|_| PlantAttempt {
                x: origin[0].saturating_add(rng.random_range(-r..=r)),
                y: origin[1],
                z: origin[2].saturating_add(rng.random_range(-r..=r)),
                height: rng.random_range(self.min_height..=self.max_height),
            })
            .collect()
    }

    // Materials from the ground up
    pub fn column(&self, height: u32) -> Vec<MaterialId> {
        let height = height.clamp(self.min_height, self.max_height) as usize;
        let mut stack = vec![self.body; height - 1];
        stack.push(self.head);
        stack
    }
}

impl TryFrom<TallPlantConfigDef> for TallPlantConfig {
    type Error = PlantConfigError;

    fn try_from(def: TallPlantConfigDef) -> Result<Self, Self::Error> {
        Self::new(
            def.body,
            def.head,
            def.tries,
            def.radius,
            def.min_height,
            def.max_height,
        )
    }
}
