//! Wide integer helpers for interest arithmetic.
//!
//! The interest formula multiplies two `PRECISION`-scaled `u128` quantities
//! before dividing, and at 18 decimals that product outgrows `u128` at a few
//! hundred whole tokens of principal. Products are therefore carried as four
//! 64-bit limbs and divided limb-wise, keeping `u128` storage.

/// 256-bit product of two `u128` values, as little-endian 64-bit limbs.
fn mul_u128_to_u256(a: u128, b: u128) -> [u64; 4] {
    let a_lo = a as u64;
    let a_hi = (a >> 64) as u64;
    let b_lo = b as u64;
    let b_hi = (b >> 64) as u64;

    let p0 = (a_lo as u128) * (b_lo as u128);
    let p1 = (a_lo as u128) * (b_hi as u128);
    let p2 = (a_hi as u128) * (b_lo as u128);
    let p3 = (a_hi as u128) * (b_hi as u128);

    // Partial products can carry past u128 when summed; track the carries
    // explicitly. The full result always fits 256 bits.
    let (mid, carry_a) = p1.overflowing_add(p2);
    let (mid, carry_b) = mid.overflowing_add(p0 >> 64);
    let carries = ((carry_a as u128) + (carry_b as u128)) << 64;

    let lo = (mid << 64) | (p0 as u64 as u128);
    let hi = p3 + (mid >> 64) + carries;

    [lo as u64, (lo >> 64) as u64, hi as u64, (hi >> 64) as u64]
}

/// Divide a 256-bit value by a divisor below 2^64, limb-wise long division.
/// Returns the quotient limbs; the remainder is discarded (floor semantics).
fn div_u256_by_small(limbs: [u64; 4], divisor: u64) -> [u64; 4] {
    let d = divisor as u128;
    let mut rem: u128 = 0;
    let mut quot = [0u64; 4];
    for i in (0..4).rev() {
        let cur = (rem << 64) | limbs[i] as u128;
        quot[i] = (cur / d) as u64;
        rem = cur % d;
    }
    quot
}

/// Floor of `a × b / divisor` with a 256-bit intermediate product.
///
/// `divisor` must be non-zero and below 2^64 (`PRECISION` qualifies).
/// Returns `None` when the divisor is out of range or the quotient itself
/// exceeds `u128::MAX` — never for an oversized intermediate product.
pub fn mul_div(a: u128, b: u128, divisor: u128) -> Option<u128> {
    if divisor == 0 || divisor >> 64 != 0 {
        return None;
    }
    let product = mul_u128_to_u256(a, b);
    let quot = div_u256_by_small(product, divisor as u64);
    if quot[2] != 0 || quot[3] != 0 {
        return None;
    }
    Some(((quot[1] as u128) << 64) | quot[0] as u128)
}
