use num_traits::Zero;
use std::ops::{AddAssign, Sub};

/// Kahan's compensated summation. Each `add` folds the rounding error of the
/// previous addition back into the next one, so long runs of small terms do
/// not drown in a large running total.
///
/// Works for any additive group whose subtraction is exact enough to recover
/// the rounding error; for floats this requires subnormals to be enabled.
#[derive(Debug, Copy, Clone)]
pub struct Kahan<T> {
    sum: T,
    err: T,
}

impl<T> Kahan<T>
where
    T: Zero + Copy + Sub<Output = T>,
{
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            err: T::zero(),
        }
    }

    /// Start from a non-zero running total.
    pub fn with(sum: T) -> Self {
        Self {
            sum,
            err: T::zero(),
        }
    }

    pub fn add(&mut self, v: T) {
        let y = v - self.err;
        let t = self.sum + y;
        self.err = (t - self.sum) - y;
        self.sum = t;
    }

    pub fn total(&self) -> T {
        self.sum
    }
}

impl<T> Default for Kahan<T>
where
    T: Zero + Copy + Sub<Output = T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AddAssign<T> for Kahan<T>
where
    T: Zero + Copy + Sub<Output = T>,
{
    fn add_assign(&mut self, v: T) {
        self.add(v);
    }
}
