//! Per-material scattering statistics.
//!
//! Fires many rays at a single surface point for each material and reports
//! how often they are absorbed, the mean cosine of the scattered direction,
//! and the mean reported pdf. Then estimates the radiance of a sphere of each
//! material under a white sky.
//!
//! Run with: cargo run --example material_stats -- [render_config.json]

use std::env;
use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use lux_renderer::{
    estimate_radiance, Color, Dielectric, DiffuseLight, HitRecord, HittableList, Isotropic,
    Lambertian, Material, Metal, Ray, RenderConfig, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TRIALS: u32 = 100_000;

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RenderConfig::default().with_background(Color::ONE),
    };
    log::info!("Using {:?}", config);

    let materials: Vec<(&str, Arc<dyn Material>)> = vec![
        ("lambertian", Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.3))) as Arc<dyn Material>),
        ("metal", Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8), 0.3)) as Arc<dyn Material>),
        ("fuzzy metal", Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0)) as Arc<dyn Material>),
        ("glass", Arc::new(Dielectric::new(1.5)) as Arc<dyn Material>),
        ("light", Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0))) as Arc<dyn Material>),
        ("isotropic", Arc::new(Isotropic::new(Color::splat(0.5))) as Arc<dyn Material>),
    ];

    println!("{:<12} {:>9} {:>9} {:>9}", "material", "absorbed", "mean cos", "mean pdf");
    for (name, material) in &materials {
        let (absorbed, mean_cos, mean_pdf) = surface_stats(material.as_ref());
        let pdf = mean_pdf.map_or_else(|| "-".to_string(), |pdf| format!("{pdf:.4}"));
        println!("{name:<12} {absorbed:>9.4} {mean_cos:>9.4} {pdf:>9}");
    }

    println!();
    println!("{:<12} {:>24}", "material", "radiance");
    let camera_ray = Ray::new(Vec3::ZERO, -Vec3::Z, 0.0);
    for (seed, (name, material)) in materials.into_iter().enumerate() {
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, material));

        let radiance = estimate_radiance(&camera_ray, &world, &config, seed as u64);
        println!(
            "{name:<12} ({:.3}, {:.3}, {:.3})",
            radiance.x, radiance.y, radiance.z
        );
    }

    Ok(())
}

/// Scatter many 45-degree rays off a surface facing +Y.
///
/// Returns the absorption rate, mean cosine with the normal over scattered
/// rays, and mean pdf (`None` when the material reports no density).
fn surface_stats(material: &dyn Material) -> (f32, f32, Option<f32>) {
    let rec = HitRecord {
        p: Vec3::ZERO,
        normal: Vec3::Y,
        material,
        u: 0.5,
        v: 0.5,
        t: 1.0,
        front_face: true,
    };
    let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);
    let mut rng = StdRng::seed_from_u64(0);

    let mut absorbed = 0;
    let mut sum_cos = 0.0;
    let mut sum_pdf = 0.0;
    let mut densities = 0;

    for _ in 0..TRIALS {
        match material.scatter(&ray_in, &rec, &mut rng) {
            Some(result) => {
                sum_cos += result.scattered.direction().normalize().dot(rec.normal);
                if let Some(pdf) = result.pdf.density() {
                    sum_pdf += pdf;
                    densities += 1;
                }
            }
            None => absorbed += 1,
        }
    }

    let scattered = TRIALS - absorbed;
    let mean_cos = if scattered > 0 { sum_cos / scattered as f32 } else { 0.0 };
    let mean_pdf = (densities > 0).then(|| sum_pdf / densities as f32);

    (absorbed as f32 / TRIALS as f32, mean_cos, mean_pdf)
}
