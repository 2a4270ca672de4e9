//! Constrained random generation of test bench configurations.
//!
//! One case is built in a single pass:
//! 1. a slot permutation splits the eight slots into `near_count` near slots
//!    and `8 - near_count` far slots,
//! 2. the input mask is drawn on its own, independent of that split,
//! 3. a minimum distance `d ∈ [0, 50)` and a main point in `[d, 255 - d)²`,
//! 4. near points at taxicab distance exactly `d`,
//! 5. far points at taxicab distance strictly greater than `d`,
//! 6. the Resolver fills in the output mask.
//!
//! Because the mask and the near/far split are independent, a near point can
//! be inactive and the expected output can then come from far points only.
//! That exercises masking in the circuit and is kept on purpose.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::draw::{permutation, random_axis, random_in, random_mask, random_out_of, random_sign};
use crate::error::TbError;
use crate::resolver::taxicab_distance;
use crate::types::{Axis, Configuration, Point, Sign, SlotMask, GRID_MAX, SLOT_COUNT};

const D_BOUND: i32 = 50;

/// Exclusive upper bound for the minimum distance `d`.
pub const MIN_DISTANCE_BOUND: u32 = D_BOUND.unsigned_abs();

/// How a slot was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPlan {
    /// Exactly `d` away: `offset_x` on X, `d - offset_x` on Y.
    Near {
        /// Magnitude of the X offset.
        offset_x: u32,
        /// Direction on X.
        sign_x: Sign,
        /// Direction on Y.
        sign_y: Sign,
    },
    /// Strictly farther than `d`, pushed away first along `axis`.
    Far {
        /// Primary axis of the exclusion draw.
        axis: Axis,
    },
}

impl SlotPlan {
    /// Whether the slot was placed at exactly `d`.
    #[inline]
    #[must_use]
    pub const fn is_near(&self) -> bool {
        matches!(self, Self::Near { .. })
    }
}

/// A generated configuration together with the geometry that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The finished, resolved configuration.
    pub configuration: Configuration,
    /// Chosen minimum distance `d`.
    pub min_distance: u32,
    /// Slots placed at exactly `d`, regardless of the input mask.
    pub near_slots: SlotMask,
    /// Per-slot placement record.
    pub plans: [SlotPlan; SLOT_COUNT],
}

impl Placement {
    /// Slots placed strictly beyond `d`.
    #[inline]
    #[must_use]
    pub const fn far_slots(&self) -> SlotMask {
        SlotMask::from_bits(!self.near_slots.bits())
    }
}

/// Narrow a coordinate onto the grid.
fn to_coord(axis: Axis, value: i64) -> Result<u8, TbError> {
    u8::try_from(value).map_err(|_| TbError::CoordinateOutOfRange { axis, value })
}

/// Move `value` by `sign * magnitude`, failing if it leaves the grid.
fn shift(axis: Axis, value: u8, magnitude: u32, sign: Sign) -> Result<u8, TbError> {
    to_coord(axis, i64::from(value) + sign.apply(i64::from(magnitude)))
}

/// Place a point at taxicab distance exactly `distance` from `main`.
///
/// The distance is split as `offset_x` on X and `distance - offset_x` on Y.
pub fn place_near(
    main: Point,
    distance: u32,
    offset_x: u32,
    sign_x: Sign,
    sign_y: Sign,
) -> Result<Point, TbError> {
    let offset_y = distance
        .checked_sub(offset_x)
        .ok_or(TbError::NearOffset { offset: offset_x, distance })?;

    Ok(Point::new(
        shift(Axis::X, main.x, offset_x, sign_x)?,
        shift(Axis::Y, main.y, offset_y, sign_y)?,
    ))
}

/// Place a point at taxicab distance strictly greater than `distance`.
///
/// The `axis` coordinate is drawn anywhere except the main point's own value.
/// The remaining budget `offset = distance - |primary gap|` then excludes
/// `[m - offset, m + offset]` on the other axis, which pushes the total past
/// `distance`. A negative budget excludes nothing.
pub fn place_far<R: Rng + ?Sized>(
    rng: &mut R,
    main: Point,
    distance: u32,
    axis: Axis,
) -> Result<Point, TbError> {
    let d = i64::from(distance);

    let m = i64::from(main.coord(axis));
    let primary = random_out_of(rng, m - 1, m)?;

    let offset = d - (i64::from(primary) - m).abs();
    let other = axis.other();
    let m_other = i64::from(main.coord(other));
    let secondary = random_out_of(rng, m_other - 1 - offset, m_other + offset)?;

    Ok(main.with_coord(axis, primary).with_coord(other, secondary))
}

/// Generate one configuration with `near_count` slots at the minimum distance.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, near_count: usize) -> Result<Configuration, TbError> {
    generate_case(rng, near_count).map(|p| p.configuration)
}

/// Generate one configuration and keep the placement record.
pub fn generate_case<R: Rng + ?Sized>(
    rng: &mut R,
    near_count: usize,
) -> Result<Placement, TbError> {
    if !(1..=SLOT_COUNT).contains(&near_count) {
        return Err(TbError::NearCount { got: near_count });
    }

    let order = permutation(rng);
    let input_mask = random_mask(rng);

    let d = random_in(rng, 0, D_BOUND);
    let span_hi = i32::from(GRID_MAX) - d;
    let main = Point::new(
        to_coord(Axis::X, i64::from(random_in(rng, d, span_hi)))?,
        to_coord(Axis::Y, i64::from(random_in(rng, d, span_hi)))?,
    );
    let distance = d.unsigned_abs();

    let mut points = [main; SLOT_COUNT];
    let mut plans = [SlotPlan::Far { axis: Axis::X }; SLOT_COUNT];
    let mut near_slots = SlotMask::EMPTY;

    for (rank, slot) in order.into_iter().map(usize::from).enumerate() {
        if rank < near_count {
            let offset_x = random_in(rng, 0, d + 1).unsigned_abs();
            let sign_x = random_sign(rng);
            let sign_y = random_sign(rng);
            let p = place_near(main, distance, offset_x, sign_x, sign_y)?;
            debug_assert_eq!(taxicab_distance(p, main), distance, "near point off distance");

            points[slot] = p;
            plans[slot] = SlotPlan::Near { offset_x, sign_x, sign_y };
            near_slots.insert(slot);
            trace!(slot, point = %p, offset_x, ?sign_x, ?sign_y, "near point");
        } else {
            let axis = random_axis(rng);
            let p = place_far(rng, main, distance, axis)?;
            debug_assert!(taxicab_distance(p, main) > distance, "far point within distance");

            points[slot] = p;
            plans[slot] = SlotPlan::Far { axis };
            trace!(slot, point = %p, %axis, "far point");
        }
    }

    let configuration = Configuration::new(points, main, input_mask);
    debug!(
        near_count,
        d = distance,
        main = %main,
        input_mask = input_mask.bits(),
        output_mask = configuration.output_mask().bits(),
        "generated configuration"
    );

    Ok(Placement {
        configuration,
        min_distance: distance,
        near_slots,
        plans,
    })
}

/// Generator that owns its random source.
///
/// ```
/// use tbgen_core::Generator;
///
/// let mut tb = Generator::seeded(42);
/// let placement = tb.generate_case(8)?;
/// assert_eq!(placement.near_slots.len(), 8);
/// # Ok::<(), tbgen_core::TbError>(())
/// ```
#[derive(Debug)]
pub struct Generator<R> {
    rng: R,
}

impl Generator<StdRng> {
    /// Generator over a `StdRng` seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Wrap an existing random source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a near count uniformly from `1..=8`.
    pub fn random_near_count(&mut self) -> usize {
        self.rng.random_range(1..=SLOT_COUNT)
    }

    /// See [`generate`].
    pub fn generate(&mut self, near_count: usize) -> Result<Configuration, TbError> {
        generate(&mut self.rng, near_count)
    }

    /// See [`generate_case`].
    pub fn generate_case(&mut self, near_count: usize) -> Result<Placement, TbError> {
        generate_case(&mut self.rng, near_count)
    }

    /// Give back the random source.
    pub fn into_inner(self) -> R {
        self.rng
    }
}
