//! Assorted utilities and helpers.
//!
//! These are intentionally minimal; you can extend or replace them as needed.

/// Number of cells in the length-`len` tier of an `n`-item table.
///
/// Returns 0 when `len` is 0 or longer than the sequence.
#[inline]
pub fn tier_width(n: usize, len: usize) -> usize {
    if len == 0 || len > n {
        0
    } else {
        n - len + 1
    }
}

/// Minimum tier width before the engine fans a tier out across threads.
///
/// A tier of width `w` at length `len` costs about `w * len` combines. Narrow
/// tiers are cheaper to run inline than to schedule, so the threshold grows
/// with `√n` and never drops below 8.
#[inline]
pub fn default_parallel_threshold(num_items: usize) -> usize {
    if num_items <= 64 {
        8
    } else {
        ((num_items as f64).sqrt().ceil() as usize).max(8)
    }
}

/// Number of distinct full parenthesizations of `n` items (Catalan(n - 1)).
///
/// Returns `None` on overflow. `catalan(0)` is 0 since there is nothing to fuse.
pub fn catalan(n: usize) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    // C(m) = C(m - 1) * 2(2m - 1) / (m + 1), exact at every step.
    let m = (n - 1) as u128;
    let mut c: u128 = 1;
    for k in 1..=m {
        c = c.checked_mul(2 * (2 * k - 1))? / (k + 1);
    }
    Some(c)
}
