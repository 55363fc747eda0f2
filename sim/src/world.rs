use crate::config::{IntegratorKind, SimConfig};
use crate::error::ConfigResult;
use crate::integrator::{Integrator, Verlet, Yoshida4};
use common::{Circle, Kahan, Particle, Vec2};
use gravity::Gravity;
use log::{debug, warn};
use ztree::{build, morton, walk, Aggregate, Tree, Visit};

/// Outcome of one step, polled by the caller. Instability is the only
/// externally visible failure; the usual response is to reset the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Ok,
    /// A particle's position or velocity became NaN or infinite.
    Unstable,
}

impl StepStatus {
    pub fn is_unstable(self) -> bool {
        self == StepStatus::Unstable
    }
}

/// The simulation driver: owns the particle array across steps and rebuilds
/// the Barnes-Hut tree from scratch inside each one. Within a step the
/// sorted array and the tree are frozen; new states accumulate in a side
/// buffer and are committed at the end, so every particle integrates against
/// the same snapshot.
pub struct World {
    particles: Vec<Particle>,
    next: Vec<(Vec2, Vec2)>,
    gravity: Gravity,
    tan_sq: f32,
    config: SimConfig,
}

impl World {
    pub fn new(config: SimConfig) -> ConfigResult<Self> {
        config.validate()?;
        let tan = config.angle_threshold.tan();
        Ok(Self {
            particles: Vec::new(),
            next: Vec::new(),
            gravity: Gravity::new(config.monte_carlo_samples),
            tan_sq: tan * tan,
            config,
        })
    }

    pub fn with_particles(config: SimConfig, particles: Vec<Particle>) -> ConfigResult<Self> {
        let mut world = Self::new(config)?;
        world.particles = particles;
        let cap = world.config.particle_cap;
        if world.particles.len() > cap {
            let excess = world.particles.len() - cap;
            world.particles.drain(..excess);
        }
        Ok(world)
    }

    /// Add a particle, evicting the oldest when the cap is reached.
    pub fn push(&mut self, particle: Particle) {
        if self.particles.len() == self.config.particle_cap {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Whether every particle's state is finite.
    pub fn finite(&self) -> bool {
        self.particles.iter().all(Particle::is_finite)
    }

    /// Advance the whole system by `dt`.
    pub fn step(&mut self, dt: f32) -> StepStatus {
        if self.particles.is_empty() {
            return StepStatus::Ok;
        }
        self.sort_by_code();
        let tree = build(&self.particles, masked_code);

        self.next.clear();
        match self.config.integrator {
            IntegratorKind::VelocityVerlet => Self::advance::<Verlet>(
                &self.particles,
                &mut self.next,
                tree.as_ref(),
                &self.gravity,
                self.config.g,
                self.tan_sq,
                dt,
            ),
            IntegratorKind::Yoshida4 => Self::advance::<Yoshida4>(
                &self.particles,
                &mut self.next,
                tree.as_ref(),
                &self.gravity,
                self.config.g,
                self.tan_sq,
                dt,
            ),
        }
        for (p, (xy, v)) in self.particles.iter_mut().zip(self.next.drain(..)) {
            p.xy = xy;
            p.v = v;
        }

        self.gravity.refresh_disk();

        let unstable = !self.finite();
        if unstable {
            warn!("non-finite particle state detected; simulation unstable");
        }
        self.retire_far();
        if unstable {
            StepStatus::Unstable
        } else {
            StepStatus::Ok
        }
    }

    /// Acceleration felt by a probe circle at `xy` from the current particle
    /// set, evaluated through a freshly built tree.
    pub fn field_at(&mut self, xy: Vec2, radius: f32) -> Vec2 {
        self.sort_by_code();
        let tree = build(&self.particles, masked_code);
        accel(
            tree.as_ref(),
            &self.gravity,
            self.config.g,
            self.tan_sq,
            xy,
            radius,
        )
    }

    /// Cache Morton codes and stable-sort by them. Stable so that particles
    /// sharing a code (or lacking one) keep their relative order between
    /// steps; absent codes collect at the front.
    fn sort_by_code(&mut self) {
        let precision = self.config.precision;
        for p in self.particles.iter_mut() {
            p.code = morton::encode_with(p.xy, precision);
        }
        self.particles.sort_by_key(|p| p.code);
    }

    #[allow(clippy::too_many_arguments)]
    fn advance<I: Integrator>(
        particles: &[Particle],
        next: &mut Vec<(Vec2, Vec2)>,
        tree: Option<&Tree>,
        gravity: &Gravity,
        g: f32,
        tan_sq: f32,
        dt: f32,
    ) {
        for p in particles {
            let mut stepper = I::new(p.xy, p.v);
            let radius = p.radius;
            stepper.step(dt, |xy| accel(tree, gravity, g, tan_sq, xy, radius));
            next.push((stepper.y0(), stepper.y1()));
        }
    }

    /// Drop particles beyond the far-field cutoff. Non-finite positions fail
    /// the comparison and are dropped too; the caller still sees the
    /// unstable status for the step that produced them.
    fn retire_far(&mut self) {
        let cutoff = self.config.far_field_cutoff;
        let before = self.particles.len();
        self.particles.retain(|p| p.xy.norm_squared() <= cutoff);
        let dropped = before - self.particles.len();
        if dropped > 0 {
            debug!("discarded {dropped} far-field particles");
        }
    }
}

fn masked_code(p: &Particle, mask: u64) -> Option<u64> {
    p.code.map(|z| z & mask)
}

/// One probe of the Barnes-Hut traversal: walk the tree, descend into
/// groups the probe sits inside of or sees under a wide angle, and fold
/// everything else into the pairwise kernel as a point mass.
fn accel(
    tree: Option<&Tree>,
    gravity: &Gravity,
    g: f32,
    tan_sq: f32,
    xy: Vec2,
    radius: f32,
) -> Vec2 {
    let Some(tree) = tree else {
        return Vec2::zeros();
    };
    let mut acc = Kahan::<Vec2>::new();
    walk(tree, |agg: &Aggregate, len: u32| {
        if agg.center == xy && len == 1 {
            // The probe's own particle, or one perfectly coincident.
            return Visit::Ignore;
        }
        let d_sq = (agg.center - xy).norm_squared();
        let r_sq = agg.radius * agg.radius;
        // Inside the group's bounding circle; boundary ties descend.
        if d_sq <= r_sq {
            return Visit::Deeper;
        }
        // Viewing half-angle by its tangent.
        if r_sq > tan_sq * d_sq {
            return Visit::Deeper;
        }
        acc += gravity.field(
            Circle::new(xy, radius),
            Circle::new(agg.center, agg.radius),
            g * agg.mass,
            Some(d_sq.sqrt()),
        );
        Visit::Ignore
    });
    acc.total()
}
