use crate::Vec3;

/// Orthonormal basis `(u, v, w)` with `w` as the "up" axis.
///
/// Sampling routines generate directions in a local frame where +z is the
/// surface normal; [`Onb::local`] maps them into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    axis: [Vec3; 3],
}

impl Onb {
    /// Build a basis whose `w` axis is `w` (normalized).
    ///
    /// Branchless construction from Duff et al., "Building an Orthonormal
    /// Basis, Revisited" (2017). The result is right-handed: `u x v = w`.
    pub fn from_w(w: Vec3) -> Self {
        let w = w.normalize();
        let sign = if w.z >= 0.0 { 1.0 } else { -1.0 };
        let a = -1.0 / (sign + w.z);
        let b = w.x * w.y * a;

        let u = Vec3::new(1.0 + sign * w.x * w.x * a, sign * b, -sign * w.x);
        let v = Vec3::new(b, sign + w.y * w.y * a, -w.y);

        Self { axis: [u, v, w] }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.axis[0]
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.axis[1]
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.axis[2]
    }

    /// Map local coordinates `(a.x, a.y, a.z)` to world space.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u() + a.y * self.v() + a.z * self.w()
    }
}
