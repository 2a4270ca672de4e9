//! Error types for the `tbgen-core` crate.
//!
//! Nothing here is recoverable: a generation call either returns a fully
//! valid [`Configuration`](crate::Configuration) or one of these.

use crate::types::Axis;

/// Errors raised while generating a configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TbError {
    /// The requested number of near slots is outside `1..=8`.
    ///
    /// Checked before any random draw is consumed.
    #[error("near count must be in 1..=8, got {got}")]
    NearCount {
        /// Requested count.
        got: usize,
    },

    /// A near-point split asked for an X offset larger than the distance.
    #[error("near offset {offset} exceeds minimum distance {distance}")]
    NearOffset {
        /// Requested X offset.
        offset: u32,
        /// Minimum distance `d` being split.
        distance: u32,
    },

    /// Offset arithmetic produced a coordinate outside `[0, 255]`.
    #[error("{axis} coordinate {value} falls outside the grid [0, 255]")]
    CoordinateOutOfRange {
        /// Axis the coordinate lives on.
        axis: Axis,
        /// Offending value before narrowing.
        value: i64,
    },

    /// An exclusion band `(lo, hi]` left no grid value to draw from.
    #[error("exclusion band ({lo}, {hi}] leaves no value in [0, 255]")]
    EmptyComplement {
        /// Exclusive lower bound of the band.
        lo: i64,
        /// Inclusive upper bound of the band.
        hi: i64,
    },
}
