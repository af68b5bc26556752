/// Floor division (rounds towards negative infinity).
///
/// Panics if `d` is zero.
#[inline]
pub fn div_floor(n: i64, d: i64) -> i64 {
    let q = n / d;
    if (n % d != 0) && ((n < 0) != (d < 0)) {
        q - 1
    } else {
        q
    }
}

/// Ceiling division (rounds towards positive infinity).
#[inline]
pub fn div_ceil(n: i64, d: i64) -> i64 {
    -div_floor(-n, d)
}
