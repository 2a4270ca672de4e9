//! Canonical core types: grid points, 8-slot masks and configurations.
//!
//! These are re-exported at the crate root so other crates can import
//! `tbgen_core::Point`, `tbgen_core::SlotMask`, etc.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of candidate slots in every configuration.
pub const SLOT_COUNT: usize = 8;

/// Largest coordinate value on either axis.
pub const GRID_MAX: u8 = u8::MAX;

/// Grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal coordinate.
    X,
    /// Vertical coordinate.
    Y,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "X",
            Self::Y => "Y",
        })
    }
}

/// Direction of an offset along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// Add the offset.
    Plus,
    /// Subtract the offset.
    Minus,
}

impl Sign {
    /// Apply the sign to a magnitude.
    #[inline]
    #[must_use]
    pub const fn apply(self, magnitude: i64) -> i64 {
        match self {
            Self::Plus => magnitude,
            Self::Minus => -magnitude,
        }
    }
}

/// A point on the 8-bit grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in `[0, 255]`.
    pub x: u8,
    /// Y coordinate in `[0, 255]`.
    pub y: u8,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Coordinate on `axis`.
    #[inline]
    #[must_use]
    pub const fn coord(self, axis: Axis) -> u8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Copy of `self` with the `axis` coordinate replaced.
    #[inline]
    #[must_use]
    pub const fn with_coord(self, axis: Axis, value: u8) -> Self {
        match axis {
            Axis::X => Self { x: value, y: self.y },
            Axis::Y => Self { x: self.x, y: value },
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Set of candidate slots; bit `i` stands for slot `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotMask(u8);

impl SlotMask {
    /// No slot selected.
    pub const EMPTY: Self = Self(0);
    /// All eight slots selected.
    pub const ALL: Self = Self(u8::MAX);

    /// Wrap raw mask bits.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw mask bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `slot` is selected. Slots past 7 are never selected.
    #[inline]
    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        slot < SLOT_COUNT && self.0 & (1 << slot) != 0
    }

    /// Select `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= 8`.
    #[inline]
    pub fn insert(&mut self, slot: usize) {
        assert!(slot < SLOT_COUNT, "slot {slot} out of range");
        self.0 |= 1 << slot;
    }

    /// Number of selected slots.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no slot is selected.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every slot of `self` is also in `other`.
    #[inline]
    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Selected slots in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..SLOT_COUNT).filter(move |&slot| self.contains(slot))
    }
}

impl fmt::Binary for SlotMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl FromIterator<usize> for SlotMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for slot in iter {
            mask.insert(slot);
        }
        mask
    }
}

/// One test bench case: eight candidates, the main point, the input mask and
/// the resolved output mask.
///
/// The only constructor is [`Configuration::new`], which runs the Resolver, so
/// `output_mask` never comes from anywhere else. Serialized configurations
/// come back as [`StoredConfiguration`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Configuration {
    points: [Point; SLOT_COUNT],
    main_point: Point,
    input_mask: SlotMask,
    output_mask: SlotMask,
}

impl Configuration {
    /// Build a configuration and resolve its output mask.
    #[must_use]
    pub fn new(points: [Point; SLOT_COUNT], main_point: Point, input_mask: SlotMask) -> Self {
        let output_mask = crate::resolver::resolve(&points, main_point, input_mask);
        Self {
            points,
            main_point,
            input_mask,
            output_mask,
        }
    }

    /// Candidate points, indexed by slot.
    #[inline]
    #[must_use]
    pub const fn points(&self) -> &[Point; SLOT_COUNT] {
        &self.points
    }

    /// Reference point.
    #[inline]
    #[must_use]
    pub const fn main_point(&self) -> Point {
        self.main_point
    }

    /// Active candidate slots.
    #[inline]
    #[must_use]
    pub const fn input_mask(&self) -> SlotMask {
        self.input_mask
    }

    /// Active slots at minimum distance from the main point.
    #[inline]
    #[must_use]
    pub const fn output_mask(&self) -> SlotMask {
        self.output_mask
    }

}

/// A configuration as read back from disk.
///
/// Same field layout as a serialized [`Configuration`], but `output_mask` is
/// whatever the file said. Nothing here has been through the Resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfiguration {
    /// Candidate points, indexed by slot.
    pub points: [Point; SLOT_COUNT],
    /// Reference point.
    pub main_point: Point,
    /// Active candidate slots.
    pub input_mask: SlotMask,
    /// Output mask as stored.
    pub output_mask: SlotMask,
}

impl StoredConfiguration {
    /// Re-run the Resolver on the stored inputs.
    #[must_use]
    pub fn resolve(&self) -> Configuration {
        Configuration::new(self.points, self.main_point, self.input_mask)
    }

    /// Whether the stored output mask matches a fresh Resolver pass.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.resolve().output_mask == self.output_mask
    }
}

impl From<&Configuration> for StoredConfiguration {
    fn from(cfg: &Configuration) -> Self {
        Self {
            points: cfg.points,
            main_point: cfg.main_point,
            input_mask: cfg.input_mask,
            output_mask: cfg.output_mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_mask_iterates_in_slot_order() {
        let m = SlotMask::from_bits(0b1010_0101);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![0, 2, 5, 7]);
        assert_eq!(m.len(), 4);
        assert!(!m.contains(8));
    }

    #[test]
    fn slot_mask_collects_and_formats() {
        let m: SlotMask = [1usize, 3].into_iter().collect();
        assert_eq!(m.bits(), 0b0000_1010);
        assert_eq!(format!("{m:08b}"), "00001010");
        assert!(m.is_subset_of(SlotMask::ALL));
        assert!(!SlotMask::ALL.is_subset_of(m));
    }

    #[test]
    #[should_panic(expected = "slot 8 out of range")]
    fn slot_mask_rejects_ninth_slot() {
        let mut m = SlotMask::EMPTY;
        m.insert(8);
    }

    #[test]
    fn point_coord_helpers() {
        let p = Point::new(3, 9);
        assert_eq!(p.coord(Axis::X), 3);
        assert_eq!(p.coord(Axis::Y), 9);
        assert_eq!(p.with_coord(Axis::Y, 200), Point::new(3, 200));
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Sign::Minus.apply(4), -4);
    }

    #[test]
    fn configuration_reads_back_as_stored() {
        let cfg = Configuration::new([Point::new(1, 1); SLOT_COUNT], Point::new(0, 0), SlotMask::ALL);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: StoredConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StoredConfiguration::from(&cfg));
        assert!(back.is_consistent());
        assert_eq!(back.resolve(), cfg);
    }

    #[test]
    fn stored_mask_is_not_trusted() {
        let mut points = [Point::new(9, 9); SLOT_COUNT];
        points[3] = Point::new(1, 0);
        let cfg = Configuration::new(points, Point::new(0, 0), SlotMask::ALL);
        assert_eq!(cfg.output_mask(), SlotMask::from_bits(0b0000_1000));

        let mut json = serde_json::to_value(&cfg).unwrap();
        json["output_mask"] = serde_json::json!(0b1111_0000);
        let stored: StoredConfiguration = serde_json::from_value(json).unwrap();
        assert_eq!(stored.output_mask, SlotMask::from_bits(0b1111_0000));
        assert!(!stored.is_consistent());
        assert_eq!(stored.resolve().output_mask(), cfg.output_mask());
    }
}
