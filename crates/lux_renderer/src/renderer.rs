//! Core path tracing bounce loop.
//!
//! Implements Monte Carlo radiance estimation with:
//! - Recursive ray tracing with configurable depth
//! - Importance-sampled bounces weighted by `scattering_pdf / pdf`
//! - Unweighted specular bounces
//! - Parallel multi-sample estimates with reproducible seeding

use crate::{Color, HitRecord, Hittable, Ray, ScatterPdf};
use lux_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Paths evaluated per rayon task in [`estimate_radiance`].
const PATHS_PER_TASK: u32 = 64;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Paths averaged per estimate
    pub samples: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Radiance returned when a ray escapes the scene
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            max_depth: 50,
            background: Color::ZERO,
        }
    }
}

impl RenderConfig {
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Compute the radiance carried back along a ray.
///
/// Emission is added at every hit. Absorbed rays stop there; scattered rays
/// recurse, weighted by the attenuation and, for importance-sampled
/// materials, by `scattering_pdf / pdf`.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
        return config.background;
    }

    let emission = rec.material.emitted(ray, &rec, rec.u, rec.v, rec.p);

    let Some(result) = rec.material.scatter(ray, &rec, rng) else {
        return emission;
    };

    match result.pdf {
        ScatterPdf::Specular => {
            let incoming = ray_color(&result.scattered, world, depth - 1, config, rng);
            emission + result.attenuation * incoming
        }
        ScatterPdf::Density(pdf) => {
            // A zero-density sample carries no information
            if pdf <= 0.0 {
                return emission;
            }
            let scattering_pdf = rec.material.scattering_pdf(ray, &rec, &result.scattered);
            let incoming = ray_color(&result.scattered, world, depth - 1, config, rng);
            emission + result.attenuation * scattering_pdf * incoming / pdf
        }
    }
}

/// Average `config.samples` independent paths along one primary ray.
///
/// Paths are split into tasks evaluated in parallel; each task seeds its own
/// generator from `seed`, so the estimate is deterministic for a given seed.
pub fn estimate_radiance(ray: &Ray, world: &dyn Hittable, config: &RenderConfig, seed: u64) -> Color {
    if config.samples == 0 {
        return Color::ZERO;
    }

    let tasks = config.samples.div_ceil(PATHS_PER_TASK);
    let partial_sums: Vec<Color> = (0..tasks)
        .into_par_iter()
        .map(|task| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(task as u64));
            let start = task * PATHS_PER_TASK;
            let end = (start + PATHS_PER_TASK).min(config.samples);

            (start..end).fold(Color::ZERO, |acc, _| {
                acc + ray_color(ray, world, config.max_depth, config, &mut rng)
            })
        })
        .collect();

    // Summed in task order so the result doesn't depend on scheduling
    let sum = partial_sums.iter().fold(Color::ZERO, |acc, partial| acc + *partial);
    sum / config.samples as f32
}
