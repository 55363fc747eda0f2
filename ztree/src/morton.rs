use common::Vec2;

/// Fixed-point scale applied to each component before encoding. Larger
/// values resolve finer spatial detail but shrink the representable region
/// to `|c| < 2^31 / precision`.
pub const DEFAULT_PRECISION: f32 = 512.0;

// "Interleave by Binary Magic Numbers"
// (http://graphics.stanford.edu/~seander/bithacks.html#InterleaveBMN),
// widened to 32-bit inputs. Hence five rounds.
const SPREAD: [(u64, u32); 5] = [
    (0x0000_ffff_0000_ffff, 16),
    (0x00ff_00ff_00ff_00ff, 8),
    (0x0f0f_0f0f_0f0f_0f0f, 4),
    (0x3333_3333_3333_3333, 2),
    (0x5555_5555_5555_5555, 1),
];

#[inline]
fn spread32(word: u32) -> u64 {
    let mut w = word as u64;
    for &(mask, shift) in SPREAD.iter() {
        w = (w | (w << shift)) & mask;
    }
    w
}

/// Interleave two 32-bit words: `y` lands on the odd bits (MSB included),
/// `x` on the even bits (LSB included).
#[inline]
pub fn interleave32(x: u32, y: u32) -> u64 {
    spread32(x) | (spread32(y) << 1)
}

/// Map a finite f32 to a u32 whose unsigned order equals the float order,
/// with -inf mapping near zero. Due to Tropf (2021).
#[inline]
pub fn order32(f: f32) -> u32 {
    let sgn = 1u32 << 31;
    let i = f.to_bits();
    if i & sgn != 0 {
        !i
    } else {
        i | sgn
    }
}

/// Z-order key over the raw float lattice. Unlike [`encode`], never rejects
/// a finite input, but the key order follows float spacing rather than a
/// uniform grid.
pub fn encode_float_order(p: Vec2) -> u64 {
    interleave32(order32(p.x), order32(p.y))
}

/// Z-order key of `p` on the fixed-point grid scaled by `precision`.
///
/// Returns `None` when either scaled component is NaN or not strictly below
/// 2^31 in magnitude. For any two representable points the key order equals
/// Z-order: the y component occupies the odd bits, x the even bits, and the
/// sign bit of each scaled integer is flipped so that unsigned key order
/// matches signed coordinate order.
pub fn encode_with(p: Vec2, precision: f32) -> Option<u64> {
    let x = p.x * precision;
    let y = p.y * precision;
    // Strict inequality: i32::MAX rounds up when converted to f32.
    if x.abs() < i32::MAX as f32 && y.abs() < i32::MAX as f32 {
        let sgn = 0x8000_0000u32;
        let xk = (x as i32) as u32 ^ sgn;
        let yk = (y as i32) as u32 ^ sgn;
        Some(interleave32(xk, yk))
    } else {
        None
    }
}

/// [`encode_with`] at [`DEFAULT_PRECISION`].
pub fn encode(p: Vec2) -> Option<u64> {
    encode_with(p, DEFAULT_PRECISION)
}
