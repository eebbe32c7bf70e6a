use foundation::math::{Vec3, WGS84_A, WGS84_B};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GroundHit {
    pub point: Vec3,
    /// Distance from the ray origin along the normalized ray.
    pub distance: f64,
}

/// Intersects `ray` with the WGS84 ellipsoid inflated by `height_m`.
///
/// Returns the nearest hit in front of the origin. A ray starting inside the
/// surface reports its exit point. Rays that miss, or have a zero direction,
/// return `None`.
pub fn pick_ellipsoid(ray: Ray, height_m: f64) -> Option<GroundHit> {
    let dir = ray.dir.normalized()?;
    let a = WGS84_A + height_m;
    let b = WGS84_B + height_m;
    if a <= 0.0 || b <= 0.0 {
        return None;
    }

    // Scale into unit-sphere space; the ray parameter is preserved.
    let o = Vec3::new(ray.origin.x / a, ray.origin.y / a, ray.origin.z / b);
    let d = Vec3::new(dir.x / a, dir.y / a, dir.z / b);

    let qa = d.dot(d);
    let qb = 2.0 * o.dot(d);
    let qc = o.dot(o) - 1.0;
    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return None;
    }

    let sq = disc.sqrt();
    let t0 = (-qb - sq) / (2.0 * qa);
    let t1 = (-qb + sq) / (2.0 * qa);
    let t = if t0 >= 0.0 {
        t0
    } else if t1 >= 0.0 {
        t1
    } else {
        return None;
    };

    Some(GroundHit {
        point: Ray::new(ray.origin, dir).at(t),
        distance: t,
    })
}
