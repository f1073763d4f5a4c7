use std::path::Path;

use strata_core::preview::{PreviewConfig, material_map, save_png};
use strata_core::{LayeredRockData, PreviewError, SurfaceResolver, SurfaceState};

fn main() -> Result<(), PreviewError> {
    let resolver = SurfaceResolver::default();
    let rocks = LayeredRockData::default();

    // One image per state, same area and climate ramp
    for state in SurfaceState::ALL {
        let config = PreviewConfig {
            size: 128,
            state,
            ..PreviewConfig::default()
        };
        let map = material_map(&resolver, &rocks, &config);
        save_png(&map, Path::new(&format!("surface_{}.png", state.name())))?;
    }
    Ok(())
}
