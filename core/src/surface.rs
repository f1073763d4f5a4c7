//! Surface material selection.
//!
//! A [`SurfaceState`] names a rule; [`SurfaceResolver`] evaluates it for one
//! voxel. Resolution is a pure function of the state, the rock data, the
//! position and the climate, so a resolver can be shared across threads and
//! queried for any number of independent positions in parallel.

use serde::{Deserialize, Serialize};

use crate::climate::Climate;
use crate::rock::{MaterialId, Rock, RockData};
use crate::simplex2::{NoiseConfig, Simplex2D};
use crate::Noise2D;

/// Which rock of the classification a constant state reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RockLayer {
    /// Rock at the exact voxel.
    Local,
    /// Upper layer of the column.
    Top,
    /// Lower layer of the column.
    Bottom,
}

/// Derived form of a rock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RockForm {
    Raw,
    Cobble,
    Gravel,
    Sand,
    Sandstone,
}

impl RockForm {
    fn pick(self, rock: &Rock) -> MaterialId {
        match self {
            RockForm::Raw => rock.raw(),
            RockForm::Cobble => rock.cobble(),
            RockForm::Gravel => rock.gravel(),
            RockForm::Sand => rock.sand(),
            RockForm::Sandstone => rock.sandstone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShoreForm {
    Sand,
    Sandstone,
}

/// Rule mapping a position and its climate to a terrain material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceState {
    /// Fixed rock-derived material, climate is ignored.
    Constant { layer: RockLayer, form: RockForm },
    /// Gravel, or sand (sandstone when `deep`) where the variant noise is positive.
    /// Reads the column's top rock and never depends on y.
    Underwater { deep: bool },
    /// Pink or black shore material in wet climates, bottom rock default otherwise.
    RareShore(ShoreForm),
    /// Salt or fresh water by the column's salinity.
    Water,
}

impl SurfaceState {
    pub const RAW: Self = Self::Constant {
        layer: RockLayer::Local,
        form: RockForm::Raw,
    };
    pub const COBBLE: Self = Self::Constant {
        layer: RockLayer::Local,
        form: RockForm::Cobble,
    };
    pub const GRAVEL: Self = Self::Constant {
        layer: RockLayer::Local,
        form: RockForm::Gravel,
    };
    pub const SHORE_SAND: Self = Self::Constant {
        layer: RockLayer::Bottom,
        form: RockForm::Sand,
    };
    pub const SHORE_SANDSTONE: Self = Self::Constant {
        layer: RockLayer::Bottom,
        form: RockForm::Sandstone,
    };
    pub const TOP_UNDERWATER: Self = Self::Underwater { deep: false };
    pub const LOW_UNDERWATER: Self = Self::Underwater { deep: true };
    pub const RARE_SHORE_SAND: Self = Self::RareShore(ShoreForm::Sand);
    pub const RARE_SHORE_SANDSTONE: Self = Self::RareShore(ShoreForm::Sandstone);
    pub const WATER: Self = Self::Water;

    pub const ALL: [Self; 10] = [
        Self::RAW,
        Self::COBBLE,
        Self::GRAVEL,
        Self::SHORE_SAND,
        Self::SHORE_SANDSTONE,
        Self::TOP_UNDERWATER,
        Self::LOW_UNDERWATER,
        Self::RARE_SHORE_SAND,
        Self::RARE_SHORE_SANDSTONE,
        Self::WATER,
    ];

    pub fn name(&self) -> &'static str {
        match *self {
            Self::RAW => "raw",
            Self::COBBLE => "cobble",
            Self::GRAVEL => "gravel",
            Self::SHORE_SAND => "shore_sand",
            Self::SHORE_SANDSTONE => "shore_sandstone",
            Self::TOP_UNDERWATER => "top_underwater",
            Self::LOW_UNDERWATER => "low_underwater",
            Self::RARE_SHORE_SAND => "rare_shore_sand",
            Self::RARE_SHORE_SANDSTONE => "rare_shore_sandstone",
            Self::WATER => "water",
            Self::Constant { .. } => "constant",
        }
    }
}

/// Climate thresholds of the rare shore states. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoreThresholds {
    pub rainfall: f32,
    pub temperature: f32,
}

impl Default for ShoreThresholds {
    fn default() -> Self {
        Self {
            rainfall: 300.0,
            temperature: 15.0,
        }
    }
}

/// Materials that do not come from rock classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedMaterials {
    pub fresh_water: MaterialId,
    pub salt_water: MaterialId,
    pub pink_sand: MaterialId,
    pub black_sand: MaterialId,
    pub pink_sandstone: MaterialId,
    pub black_sandstone: MaterialId,
}

impl Default for FixedMaterials {
    fn default() -> Self {
        Self {
            fresh_water: MaterialId(1),
            salt_water: MaterialId(2),
            pink_sand: MaterialId(10),
            black_sand: MaterialId(11),
            pink_sandstone: MaterialId(12),
            black_sandstone: MaterialId(13),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub underwater_noise: NoiseConfig,
    pub rare_shore: ShoreThresholds,
    pub materials: FixedMaterials,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            underwater_noise: NoiseConfig {
                seed: 9_128_639_581_632,
                octaves: 2,
                spread: 0.015,
                persistence: 0.5,
            },
            rare_shore: ShoreThresholds::default(),
            materials: FixedMaterials::default(),
        }
    }
}

pub struct SurfaceResolver<N = Simplex2D> {
    variant_noise: N,
    thresholds: ShoreThresholds,
    materials: FixedMaterials,
}

impl SurfaceResolver<Simplex2D> {
    pub fn new(config: &SurfaceConfig) -> Self {
        tracing::debug!(
            seed = config.underwater_noise.seed,
            octaves = config.underwater_noise.octaves,
            spread = config.underwater_noise.spread,
            "building surface resolver"
        );
        Self::with_noise(config, Simplex2D::from_config(&config.underwater_noise))
    }
}

impl Default for SurfaceResolver<Simplex2D> {
    fn default() -> Self {
        Self::new(&SurfaceConfig::default())
    }
}

impl<N: Noise2D> SurfaceResolver<N> {
    // Use an arbitrary noise field for the underwater variant choice.
    pub fn with_noise(config: &SurfaceConfig, variant_noise: N) -> Self {
        Self {
            variant_noise,
            thresholds: config.rare_shore,
            materials: config.materials,
        }
    }

    pub fn variant_noise(&self) -> &N {
        &self.variant_noise
    }

    /// Material occupying (x, y, z) under `state`.
    ///
    /// Total over every climate input, NaN included: a value that fails a
    /// threshold simply selects the default branch.
    pub fn resolve<R: RockData + ?Sized>(
        &self,
        state: SurfaceState,
        rocks: &R,
        x: i32,
        y: i32,
        z: i32,
        climate: Climate,
    ) -> MaterialId {
        match state {
            SurfaceState::Constant { layer, form } => {
                let rock = match layer {
                    RockLayer::Local => rocks.rock(x, y, z),
                    RockLayer::Top => rocks.top_rock(x, z),
                    RockLayer::Bottom => rocks.bottom_rock(x, z),
                };
                form.pick(rock)
            }
            SurfaceState::Underwater { deep } => {
                let rock = rocks.top_rock(x, z);
                if self.variant_noise.noise_at(x, z) > 0.0 {
                    if deep { rock.sandstone() } else { rock.sand() }
                } else {
                    rock.gravel()
                }
            }
            SurfaceState::RareShore(form) => {
                let wet = climate.rainfall > self.thresholds.rainfall;
                // Combined condition must win over rainfall alone
                if wet && climate.temperature > self.thresholds.temperature {
                    match form {
                        ShoreForm::Sand => self.materials.pink_sand,
                        ShoreForm::Sandstone => self.materials.pink_sandstone,
                    }
                } else if wet {
                    match form {
                        ShoreForm::Sand => self.materials.black_sand,
                        ShoreForm::Sandstone => self.materials.black_sandstone,
                    }
                } else {
                    let rock = rocks.bottom_rock(x, z);
                    match form {
                        ShoreForm::Sand => rock.sand(),
                        ShoreForm::Sandstone => rock.sandstone(),
                    }
                }
            }
            SurfaceState::Water => {
                if climate.salty {
                    self.materials.salt_water
                } else {
                    self.materials.fresh_water
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rock::LayeredRockData;

    struct ConstantNoise(f64);

    impl Noise2D for ConstantNoise {
        fn noise(&self, _x: f64, _z: f64) -> f64 {
            self.0
        }
    }

    fn climate(temperature: f32, rainfall: f32) -> Climate {
        Climate::new(temperature, rainfall, false)
    }

    #[test]
    fn rare_shore_sand_branches() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let materials = FixedMaterials::default();
        let state = SurfaceState::RARE_SHORE_SAND;

        assert_eq!(
            resolver.resolve(state, &rocks, 0, 64, 0, climate(20.0, 350.0)),
            materials.pink_sand
        );
        assert_eq!(
            resolver.resolve(state, &rocks, 0, 64, 0, climate(10.0, 310.0)),
            materials.black_sand
        );
        assert_eq!(
            resolver.resolve(state, &rocks, 0, 64, 0, climate(20.0, 100.0)),
            rocks.bottom.sand
        );
    }

    #[test]
    fn rare_shore_sandstone_branches() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let materials = FixedMaterials::default();
        let state = SurfaceState::RARE_SHORE_SANDSTONE;

        assert_eq!(
            resolver.resolve(state, &rocks, 3, 70, -2, climate(25.0, 400.0)),
            materials.pink_sandstone
        );
        assert_eq!(
            resolver.resolve(state, &rocks, 3, 70, -2, climate(-5.0, 400.0)),
            materials.black_sandstone
        );
        assert_eq!(
            resolver.resolve(state, &rocks, 3, 70, -2, climate(25.0, 0.0)),
            rocks.bottom.sandstone
        );
    }

    #[test]
    fn rare_shore_thresholds_are_strict() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let state = SurfaceState::RARE_SHORE_SAND;

        assert_eq!(
            resolver.resolve(state, &rocks, 0, 64, 0, climate(30.0, 300.0)),
            rocks.bottom.sand
        );
        assert_eq!(
            resolver.resolve(state, &rocks, 0, 64, 0, climate(15.0, 301.0)),
            FixedMaterials::default().black_sand
        );
    }

    #[test]
    fn out_of_range_climate_falls_through() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        for c in [
            climate(-40.0, -100.0),
            climate(f32::NAN, f32::NAN),
            climate(f32::INFINITY, f32::NAN),
        ] {
            assert_eq!(
                resolver.resolve(SurfaceState::RARE_SHORE_SAND, &rocks, 0, 64, 0, c),
                rocks.bottom.sand
            );
        }
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let config = SurfaceConfig {
            rare_shore: ShoreThresholds {
                rainfall: 100.0,
                temperature: 0.0,
            },
            ..SurfaceConfig::default()
        };
        let resolver = SurfaceResolver::new(&config);
        let rocks = LayeredRockData::default();
        assert_eq!(
            resolver.resolve(SurfaceState::RARE_SHORE_SAND, &rocks, 0, 0, 0, climate(1.0, 150.0)),
            config.materials.pink_sand
        );
    }

    #[test]
    fn constant_states_read_their_layer() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let c = climate(20.0, 500.0);

        assert_eq!(resolver.resolve(SurfaceState::RAW, &rocks, 0, 80, 0, c), rocks.top.raw);
        assert_eq!(resolver.resolve(SurfaceState::RAW, &rocks, 0, 10, 0, c), rocks.bottom.raw);
        assert_eq!(resolver.resolve(SurfaceState::COBBLE, &rocks, 0, 80, 0, c), rocks.top.cobble);
        assert_eq!(resolver.resolve(SurfaceState::GRAVEL, &rocks, 0, 10, 0, c), rocks.bottom.gravel);
        assert_eq!(
            resolver.resolve(SurfaceState::SHORE_SAND, &rocks, 0, 80, 0, c),
            rocks.bottom.sand
        );
        assert_eq!(
            resolver.resolve(SurfaceState::SHORE_SANDSTONE, &rocks, 0, 80, 0, c),
            rocks.bottom.sandstone
        );
    }

    #[test]
    fn water_follows_salinity() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let materials = FixedMaterials::default();
        assert_eq!(
            resolver.resolve(SurfaceState::WATER, &rocks, 0, 60, 0, Climate::new(10.0, 200.0, true)),
            materials.salt_water
        );
        assert_eq!(
            resolver.resolve(SurfaceState::WATER, &rocks, 0, 60, 0, Climate::new(10.0, 200.0, false)),
            materials.fresh_water
        );
    }

    #[test]
    fn underwater_sign_selects_branch() {
        let rocks = LayeredRockData::default();
        let config = SurfaceConfig::default();
        let c = climate(10.0, 10.0);

        let positive = SurfaceResolver::with_noise(&config, ConstantNoise(0.3));
        assert_eq!(positive.resolve(SurfaceState::TOP_UNDERWATER, &rocks, 0, 0, 0, c), rocks.top.sand);
        assert_eq!(
            positive.resolve(SurfaceState::LOW_UNDERWATER, &rocks, 0, 0, 0, c),
            rocks.top.sandstone
        );

        // zero is not positive
        for value in [0.0, -0.3] {
            let resolver = SurfaceResolver::with_noise(&config, ConstantNoise(value));
            assert_eq!(resolver.resolve(SurfaceState::TOP_UNDERWATER, &rocks, 0, 0, 0, c), rocks.top.gravel);
            assert_eq!(resolver.resolve(SurfaceState::LOW_UNDERWATER, &rocks, 0, 0, 0, c), rocks.top.gravel);
        }
    }

    #[test]
    fn underwater_deep_never_returns_sand() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let c = climate(10.0, 10.0);
        let (mut sand, mut sandstone) = (0, 0);
        for z in (-512..512).step_by(16) {
            for x in (-512..512).step_by(16) {
                let shallow = resolver.resolve(SurfaceState::TOP_UNDERWATER, &rocks, x, 50, z, c);
                let deep = resolver.resolve(SurfaceState::LOW_UNDERWATER, &rocks, x, 50, z, c);
                assert_ne!(shallow, rocks.top.sandstone);
                assert_ne!(deep, rocks.top.sand);
                if shallow == rocks.top.sand {
                    sand += 1;
                    assert_eq!(deep, rocks.top.sandstone);
                } else {
                    assert_eq!(shallow, rocks.top.gravel);
                    assert_eq!(deep, rocks.top.gravel);
                }
                if deep == rocks.top.sandstone {
                    sandstone += 1;
                }
            }
        }
        assert_eq!(sand, sandstone);
    }

    #[test]
    fn underwater_ignores_height() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let c = climate(10.0, 10.0);
        for (x, z) in [(0, 0), (37, -91), (-400, 250)] {
            let at_top = resolver.resolve(SurfaceState::TOP_UNDERWATER, &rocks, x, 62, z, c);
            for y in [-64, 0, 30, 61] {
                assert_eq!(
                    resolver.resolve(SurfaceState::TOP_UNDERWATER, &rocks, x, y, z, c),
                    at_top
                );
            }
        }
    }

    #[test]
    fn resolvers_with_same_seed_agree() {
        let a = SurfaceResolver::default();
        let b = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let c = climate(10.0, 10.0);
        for x in -50..50 {
            let z = x * 3 - 7;
            assert_eq!(
                a.resolve(SurfaceState::LOW_UNDERWATER, &rocks, x, 40, z, c),
                b.resolve(SurfaceState::LOW_UNDERWATER, &rocks, x, 40, z, c)
            );
        }
    }

    #[test]
    fn resolve_through_trait_object() {
        let resolver = SurfaceResolver::default();
        let rocks = LayeredRockData::default();
        let dyn_rocks: &dyn RockData = &rocks;
        assert_eq!(
            resolver.resolve(SurfaceState::RAW, dyn_rocks, 0, 100, 0, Climate::default()),
            rocks.top.raw
        );
    }

    #[test]
    fn state_names_are_distinct() {
        let mut names: Vec<_> = SurfaceState::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SurfaceState::ALL.len());
    }
}
