use image::{GrayImage, Luma};
use std::path::Path;
use strata_core::surface::SurfaceConfig;
use strata_core::{Noise2D, Simplex2D};

// Grayscale dump of the underwater variant noise; white cells come out as sand
fn save_noise2d<N: Noise2D>(generator: &N, size: u32, filename: &str) -> image::ImageResult<()> {
    let mut img = GrayImage::new(size, size);
    for z in 0..size {
        for x in 0..size {
            let v = generator.noise_at(x as i32, z as i32);
            let gray = if v > 0.0 { 255 } else { (128.0 * (1.0 + v)).clamp(0.0, 127.0) as u8 };
            img.put_pixel(x, z, Luma([gray]));
        }
    }
    img.save(Path::new(filename))?;
    println!("Saved {}", filename);
    Ok(())
}

fn main() -> image::ImageResult<()> {
    let config = SurfaceConfig::default();
    let variant = Simplex2D::from_config(&config.underwater_noise);
    save_noise2d(&variant, 512, "underwater_variant.png")?;

    // Same field with a single octave for comparison
    let smooth = Simplex2D::new(config.underwater_noise.seed, config.underwater_noise.spread, 0.5, 1);
    save_noise2d(&smooth, 512, "underwater_variant_1oct.png")
}
