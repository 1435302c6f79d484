//! LUX Math - vectors, rays and the small geometric helpers shared by the
//! texture and scattering crates.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod onb;
mod ray;
mod vector;

pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
pub use vector::{reflect, refract};
