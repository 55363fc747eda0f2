use common::Vec2;

/// Number of quasi-random samples kept on the disk.
pub const DEFAULT_SAMPLES: usize = 30;

/// Draws skipped when a fresh stream pair is created; the leading terms of a
/// Halton sequence are too regular.
const WARMUP: u32 = 1234;

/// Index wrap limit; draws cycle through indices 1..=WRAP.
const WRAP: u32 = 0x1000;

/// A Halton low-discrepancy stream: the radical-inverse sequence in a fixed
/// base, with the index wrapping at [`WRAP`].
#[derive(Debug, Copy, Clone)]
pub struct Halton {
    base: u32,
    index: u32,
}

impl Halton {
    pub fn new(base: u32) -> Self {
        Self { base, index: 0 }
    }

    /// Radical inverse of `i`: fold the base-`b` digits into [0, 1) as
    /// sum of d_j * b^(-j-1).
    pub fn x01(base: u32, mut i: u32) -> f32 {
        let mut r = 0.0f32;
        let mut f = 1.0f32;
        while i != 0 {
            f /= base as f32;
            r += f * (i % base) as f32;
            i /= base;
        }
        r
    }

    pub fn next(&mut self) -> f32 {
        self.index = self.index % WRAP + 1;
        Self::x01(self.base, self.index)
    }
}

/// A cached buffer of quasi-random points on the open unit disk, fed by a
/// base-2/base-3 Halton stream pair.
#[derive(Debug, Clone)]
pub struct Disk {
    h2: Halton,
    h3: Halton,
    points: Vec<Vec2>,
}

impl Disk {
    pub fn new(samples: usize) -> Self {
        let mut h2 = Halton::new(2);
        let mut h3 = Halton::new(3);
        for _ in 0..WARMUP {
            h2.next();
            h3.next();
        }
        let mut disk = Self {
            h2,
            h3,
            points: vec![Vec2::zeros(); samples.max(1)],
        };
        disk.refresh();
        disk
    }

    /// Refill the buffer by rejection-sampling [-1, 1]^2 against the open
    /// unit disk, continuing the streams where the last refresh left off.
    /// The accepted points are sorted along the x axis; downstream loops
    /// branch on a function of x and the sort keeps those branches
    /// predictable.
    pub fn refresh(&mut self) {
        for p in self.points.iter_mut() {
            *p = loop {
                let q = Vec2::new(
                    2.0 * self.h2.next() - 1.0,
                    2.0 * self.h3.next() - 1.0,
                );
                if q.norm_squared() < 1.0 {
                    break q;
                }
            };
        }
        self.points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Disk {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}
