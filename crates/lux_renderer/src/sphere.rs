//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lux_math::{Interval, Vec3};

/// A sphere, optionally moving linearly over the shutter interval.
pub struct Sphere {
    /// Center at time 0 as origin, displacement to time 1 as direction
    center: Ray,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a stationary sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// Create a sphere that moves from `center1` at time 0 to `center2` at time 1.
    pub fn moving(center1: Vec3, center2: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center: Ray::at_time_zero(center1, center2 - center1),
            radius: radius.max(0.0),
            material,
        }
    }

    /// Center of the sphere at the given time.
    pub fn center(&self, time: f32) -> Vec3 {
        self.center.at(time)
    }

    /// Get the UV coordinates for a point on the unit sphere.
    ///
    /// `u` is the angle around +Y starting from -X, `v` the angle from -Y
    /// to +Y, both normalized to `[0, 1]`.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let center = self.center(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        let ray = Ray::at_time_zero(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 0.001);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::at_time_zero(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_hit_from_inside_is_back_face() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, grey());
        let ray = Ray::at_time_zero(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_moving_sphere_follows_ray_time() {
        let sphere = Sphere::moving(Vec3::new(0.0, 0.0, -2.0), Vec3::new(4.0, 0.0, -2.0), 0.5, grey());
        assert_eq!(sphere.center(0.5), Vec3::new(2.0, 0.0, -2.0));

        let at_start = Ray::new(Vec3::ZERO, -Vec3::Z, 0.0);
        let at_end = Ray::new(Vec3::ZERO, -Vec3::Z, 1.0);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&at_start, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!sphere.hit(&at_end, Interval::new(0.001, f32::INFINITY), &mut rec));

        let shifted = Ray::new(Vec3::new(4.0, 0.0, 0.0), -Vec3::Z, 1.0);
        assert!(sphere.hit(&shifted, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_sphere_uv() {
        let cases = [
            (Vec3::X, (0.5, 0.5)),
            (Vec3::NEG_X, (0.0, 0.5)),
            (Vec3::Y, (0.5, 1.0)),
            (Vec3::NEG_Y, (0.5, 0.0)),
            (Vec3::Z, (0.25, 0.5)),
            (Vec3::NEG_Z, (0.75, 0.5)),
        ];
        for (p, (u, v)) in cases {
            let (got_u, got_v) = Sphere::get_sphere_uv(p);
            assert!((got_u - u).abs() < 1e-5, "u for {p}: {got_u} != {u}");
            assert!((got_v - v).abs() < 1e-5, "v for {p}: {got_v} != {v}");
        }
    }
}
