//! tbgen-core: constrained random generation and reference solving for
//! nearest-point test benches.
//!
//! The circuit under test receives a main point and up to eight candidate
//! points on a 256×256 grid, plus an input mask selecting which candidates are
//! present, and must report every active candidate at minimum taxicab distance.
//! This crate provides:
//! - the canonical data types (`Point`, `SlotMask`, `Configuration`, `StoredConfiguration`),
//! - the **Resolver** ([`solve`]), a brute-force "find all argmins" oracle,
//! - the **Generator** ([`Generator`], [`generate_case`]), which places near
//!   points at an exact distance `d` and far points strictly beyond it, and
//! - manifest I/O (JSON/JSONL/CBOR) plus a manifest re-check.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tbgen_core::{solve, Generator};
//!
//! let mut tb = Generator::new(StdRng::seed_from_u64(7));
//! let cfg = tb.generate(3)?;
//! assert_eq!(solve(&cfg), cfg.output_mask());
//! # Ok::<(), tbgen_core::TbError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Random draw primitives: ranges, band exclusion, permutations, subsets.
pub mod draw;
/// Typed error taxonomy for the core.
pub mod error;
/// Constrained random placement of near/far points.
pub mod generator;
/// Manifest entries and JSON/JSONL/CBOR I/O.
pub mod manifest;
/// The reference solver.
pub mod resolver;
/// Points, slot masks and configurations.
pub mod types;

pub use error::TbError;
pub use generator::{generate, generate_case, Generator, Placement, SlotPlan, MIN_DISTANCE_BOUND};
pub use resolver::{min_active_distance, solve, taxicab_distance};
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use tbgen_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        error::TbError,
        generator::{Generator, Placement, SlotPlan},
        resolver::{solve, taxicab_distance},
        types::*,
    };
}
