//! Random draw primitives used by the generator.
//!
//! Every function takes the random source explicitly, so a seeded
//! [`rand::rngs::StdRng`] reproduces a whole run.

use rand::{seq::SliceRandom, Rng};

use crate::error::TbError;
use crate::types::{Axis, Sign, SlotMask, SLOT_COUNT};

/// Number of distinct values on one grid axis.
pub const GRID_SIZE: i64 = 256;

/// Uniform integer in the half-open range `[lo, hi)`.
///
/// # Panics
/// Panics if `lo >= hi`.
#[inline]
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    assert!(lo < hi, "random_in: empty range [{lo}, {hi})");
    rng.random_range(lo..hi)
}

/// Fair coin.
#[inline]
pub fn random_bit<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

/// Fair choice between X and Y.
#[inline]
pub fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Axis {
    if random_bit(rng) {
        Axis::X
    } else {
        Axis::Y
    }
}

/// Fair choice between `+` and `-`.
#[inline]
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> Sign {
    if random_bit(rng) {
        Sign::Plus
    } else {
        Sign::Minus
    }
}

/// Uniform grid value outside the band `(lo, hi]`, i.e. not in `[lo + 1, hi]`.
///
/// Band bounds may lie outside `[0, 255]`; the part that falls off the grid
/// excludes nothing. An inverted band (`lo >= hi`) is empty and every grid
/// value is eligible. The draw is a single uniform index into the complement,
/// so there is no rejection loop and no bias.
pub fn random_out_of<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> Result<u8, TbError> {
    let band_lo = lo.saturating_add(1).max(0);
    let band_hi = hi.min(GRID_SIZE - 1);
    let excluded = if band_lo > band_hi {
        0
    } else {
        band_hi - band_lo + 1
    };

    let available = GRID_SIZE - excluded;
    if available <= 0 {
        return Err(TbError::EmptyComplement { lo, hi });
    }

    let k = rng.random_range(0..available);
    let value = if excluded > 0 && k >= band_lo {
        k + excluded
    } else {
        k
    };

    u8::try_from(value).map_err(|_| TbError::EmptyComplement { lo, hi })
}

/// Uniformly random permutation of the slot indices `0..8`.
#[must_use]
pub fn permutation<R: Rng + ?Sized>(rng: &mut R) -> [u8; SLOT_COUNT] {
    let mut slots = [0, 1, 2, 3, 4, 5, 6, 7];
    slots.shuffle(rng);
    slots
}

/// Mask with exactly `ones` slots set, chosen uniformly.
///
/// `ones` above 8 saturates to a full mask.
#[must_use]
pub fn random_subset<R: Rng + ?Sized>(rng: &mut R, ones: usize) -> SlotMask {
    permutation(rng)
        .into_iter()
        .take(ones)
        .map(usize::from)
        .collect()
}

/// Mask whose popcount is uniform in `0..=8`, then a uniform subset of that size.
#[must_use]
pub fn random_mask<R: Rng + ?Sized>(rng: &mut R) -> SlotMask {
    let ones = rng.random_range(0..=SLOT_COUNT);
    random_subset(rng, ones)
}
