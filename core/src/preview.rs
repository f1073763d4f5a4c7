use std::path::Path;

use palette::{Gradient, LinSrgb};
use serde::{Deserialize, Serialize};

use crate::climate::Climate;
use crate::error::PreviewError;
use crate::rock::{MaterialId, RockData};
use crate::surface::{SurfaceResolver, SurfaceState};
use crate::Noise2D;

// Golden ratio conjugate, spreads consecutive ids around the gradient
const ID_SPREAD: f32 = 0.618_034;

// 2D material map: row-major, access as `map[z][x]`
pub type MaterialMap2D = Vec<Vec<MaterialId>>;

// Area and climate ramp for a surface preview.
// Temperature runs along x, rainfall along z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub size: usize,
    pub origin_x: i32,
    pub origin_z: i32,
    pub y: i32,
    pub state: SurfaceState,
    pub temperature: (f32, f32),
    pub rainfall: (f32, f32),
    pub salty: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            size: 256,
            origin_x: 0,
            origin_z: 0,
            y: 62,
            state: SurfaceState::TOP_UNDERWATER,
            temperature: (-10.0, 30.0),
            rainfall: (0.0, 500.0),
            salty: false,
        }
    }
}

impl PreviewConfig {
    // Climate of the cell `dx`, `dz` cells away from the origin
    pub fn climate_at(&self, dx: usize, dz: usize) -> Climate {
        let span = (self.size.max(2) - 1) as f32;
        let lerp = |(a, b): (f32, f32), t: f32| a + (b - a) * t;
        Climate::new(
            lerp(self.temperature, dx as f32 / span),
            lerp(self.rainfall, dz as f32 / span),
            self.salty,
        )
    }
}

// Resolve every cell of the preview area
pub fn material_map<N: Noise2D, R: RockData + ?Sized>(
    resolver: &SurfaceResolver<N>,
    rocks: &R,
    config: &PreviewConfig,
) -> MaterialMap2D {
    (0..config.size)
        .map(|dz| {
            (0..config.size)
                .map(|dx| {
                    resolver.resolve(
                        config.state,
                        rocks,
                        config.origin_x.saturating_add(dx as i32),
                        config.y,
                        config.origin_z.saturating_add(dz as i32),
                        config.climate_at(dx, dz),
                    )
                })
                .collect()
        })
        .collect()
}

fn id_gradient() -> Gradient<LinSrgb> {
    Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.8, 0.2, 0.2)),
        (0.25, LinSrgb::new(0.9, 0.8, 0.3)),
        (0.50, LinSrgb::new(0.2, 0.7, 0.3)),
        (0.75, LinSrgb::new(0.2, 0.4, 0.9)),
        (1.00, LinSrgb::new(0.6, 0.2, 0.8)),
    ])
}

// Stable colour for a material id
pub fn material_color(id: MaterialId) -> [u8; 3] {
    material_color_with(&id_gradient(), id)
}

fn material_color_with(gradient: &Gradient<LinSrgb>, id: MaterialId) -> [u8; 3] {
    let t = (id.0 as f32 * ID_SPREAD).fract();
    let col: LinSrgb = gradient.get(t);
    let rgb = col.into_format::<u8>();
    [rgb.red, rgb.green, rgb.blue]
}

// Convert a material map into a flat RGB byte buffer
pub fn to_rgb_buffer(map: &MaterialMap2D) -> Vec<u8> {
    let gradient = id_gradient();
    let cells: usize = map.iter().map(Vec::len).sum();
    let mut buf = Vec::with_capacity(cells * 3);
    for &id in map.iter().flatten() {
        buf.extend_from_slice(&material_color_with(&gradient, id));
    }
    buf
}

pub fn save_png(map: &MaterialMap2D, path: &Path) -> Result<(), PreviewError> {
    let height = map.len();
    let width = map.first().map_or(0, Vec::len);
    if width == 0 || height == 0 {
        return Err(PreviewError::EmptyGrid);
    }
    if let Some((row, cells)) = map.iter().map(Vec::len).enumerate().find(|&(_, len)| len != width) {
        return Err(PreviewError::RaggedGrid { row, len: cells, width });
    }
    image::save_buffer(
        path,
        &to_rgb_buffer(map),
        width as u32,
        height as u32,
        image::ColorType::Rgb8,
    )?;
    tracing::info!("Saved {}x{} preview to {}", width, height, path.display());
    Ok(())
}
