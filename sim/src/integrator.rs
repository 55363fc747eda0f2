use common::Vec2;

/// A fixed-step integrator advancing a (position, velocity) pair given the
/// acceleration as a function of position. The acceleration must be a pure
/// function of position for the duration of one step; the driver guarantees
/// this by freezing the tree while it integrates.
pub trait Integrator {
    fn new(y0: Vec2, y1: Vec2) -> Self;
    fn step(&mut self, h: f32, accel: impl FnMut(Vec2) -> Vec2);
    fn y0(&self) -> Vec2;
    fn y1(&self) -> Vec2;
}

/// Velocity Verlet: symplectic, second order, two force evaluations.
#[derive(Debug, Copy, Clone)]
pub struct Verlet {
    pub y0: Vec2,
    pub y1: Vec2,
}

impl Integrator for Verlet {
    fn new(y0: Vec2, y1: Vec2) -> Self {
        Self { y0, y1 }
    }

    fn step(&mut self, h: f32, mut accel: impl FnMut(Vec2) -> Vec2) {
        let a = accel(self.y0);
        self.y0 += h * self.y1 + 0.5 * h * h * a;
        let b = accel(self.y0);
        self.y1 += 0.5 * h * (a + b);
    }

    fn y0(&self) -> Vec2 {
        self.y0
    }

    fn y1(&self) -> Vec2 {
        self.y1
    }
}

const CBRT2: f32 = 1.259_921_1;
const W0: f32 = -CBRT2 / (2.0 - CBRT2);
const W1: f32 = 1.0 / (2.0 - CBRT2);
const C1: f32 = W1 / 2.0;
const C2: f32 = (W0 + W1) / 2.0;
const C3: f32 = C2;
const C4: f32 = C1;
const D1: f32 = W1;
const D2: f32 = W0;
const D3: f32 = W1;

/// Yoshida's fourth-order symplectic composition: three force evaluations,
/// one order-two kernel run forward, backward, forward.
#[derive(Debug, Copy, Clone)]
pub struct Yoshida4 {
    pub y0: Vec2,
    pub y1: Vec2,
}

impl Integrator for Yoshida4 {
    fn new(y0: Vec2, y1: Vec2) -> Self {
        Self { y0, y1 }
    }

    fn step(&mut self, h: f32, mut accel: impl FnMut(Vec2) -> Vec2) {
        self.y0 += C1 * h * self.y1;
        self.y1 += D1 * h * accel(self.y0);
        self.y0 += C2 * h * self.y1;
        self.y1 += D2 * h * accel(self.y0);
        self.y0 += C3 * h * self.y1;
        self.y1 += D3 * h * accel(self.y0);
        self.y0 += C4 * h * self.y1;
    }

    fn y0(&self) -> Vec2 {
        self.y0
    }

    fn y1(&self) -> Vec2 {
        self.y1
    }
}
