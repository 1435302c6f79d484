//! Material trait for surface scattering.
//!
//! A material answers three questions for the bounce loop: how much light a
//! surface emits, whether (and where) an incoming ray continues, and the
//! solid-angle density of a given outgoing direction. Materials are
//! immutable and shared across threads; all randomness comes from the
//! caller's random source.

use std::f32::consts::PI;
use std::sync::Arc;

use lux_core::{SolidColor, Texture};
use lux_math::{reflect, refract, Interval, Onb, Vec3};
use rand::RngCore;

use crate::sampling::{random_cosine_direction, random_f32, random_unit_vector};
use crate::{HitRecord, Ray};

pub use lux_core::Color;

/// Density of a uniformly sampled direction over the full sphere.
pub const UNIFORM_SPHERE_PDF: f32 = 1.0 / (4.0 * PI);

/// How the direction of a scattered ray was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterPdf {
    /// Drawn from a continuous distribution with this solid-angle density.
    Density(f32),
    /// A deterministic (or discretely chosen) mirror/refraction direction.
    /// There is no continuous density; the caller must not divide by one.
    Specular,
}

impl ScatterPdf {
    /// The continuous density, if there is one.
    pub fn density(self) -> Option<f32> {
        match self {
            ScatterPdf::Density(pdf) => Some(pdf),
            ScatterPdf::Specular => None,
        }
    }

    pub fn is_specular(self) -> bool {
        matches!(self, ScatterPdf::Specular)
    }
}

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel multiplier applied to the light carried by `scattered`
    pub attenuation: Color,
    /// Continuation ray, starting at the hit point with the incoming time
    pub scattered: Ray,
    /// How `scattered`'s direction was sampled
    pub pdf: ScatterPdf,
}

impl ScatterResult {
    /// A ray sampled from a continuous distribution with density `pdf`.
    pub fn sampled(attenuation: Color, scattered: Ray, pdf: f32) -> Self {
        Self {
            attenuation,
            scattered,
            pdf: ScatterPdf::Density(pdf),
        }
    }

    /// A ray along a specular direction.
    pub fn specular(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
            pdf: ScatterPdf::Specular,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Light emitted at the hit. Most materials return black (no emission).
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed; the path ends and only
    /// emitted light contributes.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;

    /// Density of `scattered`'s direction under this material's sampling
    /// distribution. Zero for materials without a continuous density.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        0.0
    }
}

/// Lambertian (diffuse) material with cosine-weighted importance sampling.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let uvw = Onb::from_w(rec.normal);
        let scatter_direction = uvw.local(random_cosine_direction(rng));

        let scattered = Ray::new(rec.p, scatter_direction, ray_in.time());
        let attenuation = self.albedo.value(rec.u, rec.v, rec.p);
        let pdf = uvw.w().dot(scatter_direction) / PI;

        Some(ScatterResult::sampled(attenuation, scattered, pdf))
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f32 {
        let cosine = rec
            .normal
            .normalize_or_zero()
            .dot(scattered.direction().normalize_or_zero());
        cosine.max(0.0) / PI
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough.
    ///   Clamped to `[0, 1]`; NaN is treated as fully rough.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        let clamped = if fuzz.is_nan() { 1.0 } else { Interval::UNIT.clamp(fuzz) };
        if clamped != fuzz {
            log::debug!("Metal fuzz {} clamped to {}", fuzz, clamped);
        }
        Self {
            albedo,
            fuzz: clamped,
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz can push the reflection below the surface; those rays are absorbed.
        if scattered_dir.dot(rec.normal) > 0.0 {
            let scattered = Ray::new(rec.p, scattered_dir, ray_in.time());
            Some(ScatterResult::specular(self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction relative to the surrounding medium
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    pub(crate) fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Past the critical angle refraction is impossible
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > random_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        let scattered = Ray::new(rec.p, direction, ray_in.time());
        Some(ScatterResult::specular(Color::ONE, scattered))
    }
}

/// Diffuse light emitter. Shines from its front face only.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, _ray_in: &Ray, rec: &HitRecord, u: f32, v: f32, p: Vec3) -> Color {
        if !rec.front_face {
            return Color::ZERO;
        }
        self.emit.value(u, v, p)
    }
}

/// Isotropic phase function for participating media.
///
/// Scatters uniformly over the whole sphere, not just the hemisphere
/// around the normal.
#[derive(Clone)]
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let scattered = Ray::new(rec.p, random_unit_vector(rng), ray_in.time());
        let attenuation = self.albedo.value(rec.u, rec.v, rec.p);
        Some(ScatterResult::sampled(attenuation, scattered, UNIFORM_SPHERE_PDF))
    }

    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        UNIFORM_SPHERE_PDF
    }
}
