//! LUX Renderer - surface scattering for a Monte Carlo path tracer.
//!
//! Given an incoming ray and a surface hit, a [`Material`] decides whether
//! light continues, in which direction, how much it is attenuated or
//! emitted, and the density used to importance-sample that direction.
//! [`ray_color`] is the bounce loop that consumes this contract.

mod hittable;
mod material;
mod renderer;
mod sampling;
mod sphere;

pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterPdf,
    ScatterResult, UNIFORM_SPHERE_PDF,
};
pub use renderer::{estimate_radiance, ray_color, RenderConfig};
pub use sampling::{random_cosine_direction, random_f32, random_unit_vector};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Interval, Onb, Ray, Vec3};
