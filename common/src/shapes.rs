pub type Vec2 = nalgebra::Vector2<f32>;
pub type DVec2 = nalgebra::Vector2<f64>;

/// A circle given by its center and radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            center: Vec2::zeros(),
            radius: 1.0,
        }
    }
}

/// A body in the simulation. Position and velocity change across steps;
/// mass and radius are fixed at creation.
#[derive(Debug, Copy, Clone)]
pub struct Particle {
    pub xy: Vec2,
    pub v: Vec2,
    pub mass: f32,
    pub radius: f32,
    /// Cached Morton key of `xy`, or `None` when the position falls outside
    /// the representable grid. Recomputed by the driver before each sort.
    pub code: Option<u64>,
}

impl Particle {
    pub fn new(xy: Vec2, v: Vec2, mass: f32, radius: f32) -> Self {
        Self {
            xy,
            v,
            mass,
            radius,
            code: None,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.xy, self.radius)
    }

    pub fn is_finite(&self) -> bool {
        self.xy.x.is_finite()
            && self.xy.y.is_finite()
            && self.v.x.is_finite()
            && self.v.y.is_finite()
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            xy: Vec2::zeros(),
            v: Vec2::zeros(),
            mass: 1.0,
            radius: 1.0,
            code: None,
        }
    }
}
