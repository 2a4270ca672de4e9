//! Reference solver: every active candidate at minimum taxicab distance.
//!
//! This is the correctness oracle for the generator and for manifest checks,
//! so it stays a plain linear scan with no shortcuts.

use crate::types::{Configuration, Point, SlotMask, SLOT_COUNT};

/// Taxicab (Manhattan) distance between two grid points.
///
/// Differences are taken in `i32` before the absolute value, so nothing wraps.
#[inline]
#[must_use]
pub fn taxicab_distance(a: Point, b: Point) -> u32 {
    let dx = (i32::from(a.x) - i32::from(b.x)).unsigned_abs();
    let dy = (i32::from(a.y) - i32::from(b.y)).unsigned_abs();
    dx + dy
}

/// Output mask for `cfg`, recomputed from its points, main point and input mask.
#[must_use]
pub fn solve(cfg: &Configuration) -> SlotMask {
    resolve(cfg.points(), cfg.main_point(), cfg.input_mask())
}

/// Find-all-argmins over the active slots.
///
/// A distance equal to the running minimum adds the slot; a strictly smaller
/// one restarts the result at that slot. Empty input gives an empty result.
pub(crate) fn resolve(points: &[Point; SLOT_COUNT], main: Point, input: SlotMask) -> SlotMask {
    let mut min = u32::MAX;
    let mut out = SlotMask::EMPTY;

    for slot in input.iter() {
        let distance = taxicab_distance(main, points[slot]);
        if distance < min {
            min = distance;
            out = SlotMask::EMPTY;
        }
        if distance == min {
            out.insert(slot);
        }
    }

    out
}

/// Minimum distance among active slots, or `None` when no slot is active.
#[must_use]
pub fn min_active_distance(cfg: &Configuration) -> Option<u32> {
    let main = cfg.main_point();
    cfg.input_mask()
        .iter()
        .map(|slot| taxicab_distance(main, cfg.points()[slot]))
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_distances(main: Point, dx: &[(usize, u8)]) -> [Point; SLOT_COUNT] {
        // Far filler so unset slots never win.
        let mut points = [Point::new(255, 255); SLOT_COUNT];
        for &(slot, d) in dx {
            points[slot] = Point::new(main.x + d, main.y);
        }
        points
    }

    #[test]
    fn distance_is_symmetric_and_unsigned() {
        let a = Point::new(0, 255);
        let b = Point::new(255, 0);
        assert_eq!(taxicab_distance(a, b), 510);
        assert_eq!(taxicab_distance(b, a), 510);
        assert_eq!(taxicab_distance(a, a), 0);
    }

    #[test]
    fn strict_minimum_wins() {
        let main = Point::new(100, 100);
        let points = with_distances(main, &[(0, 5), (2, 3)]);
        let cfg = Configuration::new(points, main, SlotMask::from_bits(0b0000_0101));
        assert_eq!(cfg.output_mask(), SlotMask::from_bits(0b0000_0100));
        assert_eq!(min_active_distance(&cfg), Some(3));
    }

    #[test]
    fn ties_are_all_reported() {
        let main = Point::new(10, 10);
        let mut points = [Point::new(255, 255); SLOT_COUNT];
        points[0] = Point::new(17, 10);
        points[1] = Point::new(7, 6);
        let cfg = Configuration::new(points, main, SlotMask::from_bits(0b0000_0011));
        assert_eq!(cfg.output_mask(), SlotMask::from_bits(0b0000_0011));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let main = Point::new(42, 42);
        let cfg = Configuration::new([main; SLOT_COUNT], main, SlotMask::EMPTY);
        assert!(cfg.output_mask().is_empty());
        assert_eq!(min_active_distance(&cfg), None);
    }

    #[test]
    fn inactive_closer_point_is_ignored() {
        let main = Point::new(50, 50);
        let points = with_distances(main, &[(0, 0), (4, 9)]);
        let cfg = Configuration::new(points, main, SlotMask::from_bits(0b0001_0000));
        assert_eq!(cfg.output_mask(), SlotMask::from_bits(0b0001_0000));
    }
}
