//! Random direction sampling.
//!
//! Every function takes the random source explicitly so callers control
//! seeding and can keep one generator per thread.

use std::f32::consts::PI;

use lux_math::Vec3;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, UnitSphere};

/// Uniform value in `[0, 1)`.
#[inline]
pub fn random_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Direction uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let [x, y, z]: [f32; 3] = UnitSphere.sample(rng);
    Vec3::new(x, y, z)
}

/// Cosine-weighted direction on the local +z hemisphere.
///
/// The density is `cos(theta) / PI` where theta is measured from +z. Map the
/// result into world space with [`lux_math::Onb::local`].
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> Vec3 {
    let r1 = random_f32(rng);
    let r2 = random_f32(rng);

    let phi = 2.0 * PI * r1;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let sin_theta = r2.sqrt();
    let cos_theta = (1.0 - r2).sqrt();

    Vec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 20_000;

    #[test]
    fn test_random_f32_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = random_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_unit_vector_is_unit_and_centered() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sum = Vec3::ZERO;
        for _ in 0..SAMPLES {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4);
            sum += v;
        }
        let mean = sum / SAMPLES as f32;
        assert!(mean.length() < 0.03, "mean {mean} should be near zero");
    }

    #[test]
    fn test_cosine_direction_hemisphere_and_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sum_cos = 0.0;
        for _ in 0..SAMPLES {
            let d = random_cosine_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(d.z >= 0.0);
            sum_cos += d.z;
        }
        // E[cos] under a cos/pi density is 2/3.
        let mean = sum_cos / SAMPLES as f32;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean cos {mean}");
    }
}
