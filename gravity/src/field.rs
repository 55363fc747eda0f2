use crate::disk::{Disk, DEFAULT_SAMPLES};
use common::{Circle, Vec2};

/// Pairwise gravitational attraction between two circular masses.
///
/// Far apart, both bodies act as point masses under the inverse-square law.
/// When the circles overlap, the field is averaged over quasi-random sample
/// points spread across the observer's disk, with samples interior to the
/// source contributing nothing: a radially symmetric body exerts no net
/// force at points inside itself.
///
/// Carries no gravitational constant; callers fold G into the mass argument.
#[derive(Debug, Clone)]
pub struct Gravity {
    disk: Disk,
}

impl Gravity {
    pub fn new(samples: usize) -> Self {
        Self {
            disk: Disk::new(samples),
        }
    }

    /// Advance the sample set. Call between steps so a fixed set of samples
    /// cannot bias the integration over time.
    pub fn refresh_disk(&mut self) {
        self.disk.refresh();
    }

    pub fn samples(&self) -> usize {
        self.disk.len()
    }

    /// Acceleration of a test particle `observer` due to a body `source` of
    /// mass `source_mass`. A positive `distance` skips recomputing the
    /// center separation.
    pub fn field(
        &self,
        observer: Circle,
        source: Circle,
        source_mass: f32,
        distance: Option<f32>,
    ) -> Vec2 {
        let delta = source.center - observer.center;
        let r = match distance {
            Some(d) if d > 0.0 => d,
            _ => delta.norm(),
        };
        if r == 0.0 {
            return Vec2::zeros();
        }
        if source.radius + observer.radius <= r {
            // Disjoint.
            let t = 1.0 / r;
            return t * t * t * source_mass * delta;
        }
        if (source.radius - observer.radius).abs() <= r {
            // Intersecting.
            return self.when_intersecting(observer.radius, delta, source.radius, source_mass);
        }
        // One circle fully contains the other. An observer inside the source
        // feels nothing (shell theorem); an observer that swallows a point
        // source would otherwise put samples arbitrarily close to it and the
        // average would be all noise.
        Vec2::zeros()
    }

    fn when_intersecting(&self, r0: f32, delta: Vec2, source_radius: f32, source_mass: f32) -> Vec2 {
        let mut sum = Vec2::zeros();
        for &p in self.disk.points() {
            let q = delta - r0 * p;
            let rq = q.norm();
            if rq > source_radius {
                let s = 1.0 / rq;
                sum += s * s * s * q;
            }
        }
        source_mass / self.disk.len() as f32 * sum
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}
