use common::{DVec2, Particle, Vec2};
use std::ops::AddAssign;

/// Summary of a contiguous run of particles: total mass, mass-weighted
/// center, and a radius bounding every particle in the run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aggregate {
    pub center: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Aggregate {
    /// Summarize a non-empty run. The centroid is accumulated in f64 so that
    /// heavy clusters do not lose the light particles' contributions.
    pub fn from_particles(particles: &[Particle]) -> Self {
        let mut mass = 0.0f32;
        let mut weighted = DVec2::zeros();
        for p in particles {
            mass += p.mass;
            weighted += p.mass as f64 * DVec2::new(p.xy.x as f64, p.xy.y as f64);
        }
        let c = weighted / mass as f64;
        let center = Vec2::new(c.x as f32, c.y as f32);
        let mut radius = 0.0f32;
        for p in particles {
            radius = radius.max((p.xy - center).norm());
        }
        Self {
            center,
            radius,
            mass,
        }
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self {
            center: Vec2::zeros(),
            radius: 0.0,
            mass: 0.0,
        }
    }
}

impl AddAssign for Aggregate {
    /// Merge `rhs` into `self`. The merged center moves, so each side's
    /// radius is widened by its center's shift before taking the max;
    /// dropping either shift term (or taking a bare max of the radii) lets
    /// particles on the lighter side escape the bound, and the traversal's
    /// inside-the-group test relies on the bound holding.
    fn add_assign(&mut self, rhs: Aggregate) {
        if self.mass == 0.0 {
            *self = rhs;
            return;
        }
        let sum = self.mass + rhs.mass;
        let share0 = self.mass / sum;
        let share1 = rhs.mass / sum;
        let center = share0 * self.center + share1 * rhs.center;
        self.radius = (self.radius + (self.center - center).norm())
            .max(rhs.radius + (rhs.center - center).norm());
        self.center = center;
        self.mass = sum;
    }
}
