//! Dual-handle price range state.
//!
//! Both bounds stay inside `[floor, ceiling]` and at least [`MIN_PRICE_GAP`]
//! apart. When an edit would break the gap, the bound being edited gives way
//! and the other one stays where the user left it.

use crate::config::MIN_PRICE_GAP;
use crate::filter::PricePair;
use crate::utils::{parse_int_prefix, percent_along};
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRange {
    min_price: i64,
    max_price: i64,
    floor: i64,
    ceiling: i64,
}

impl PriceRange {
    /// Seed the range from the filter's price pair. Missing or zero bounds
    /// fall back to `floor` / `ceiling`.
    pub fn new(initial: PricePair, floor: i64, ceiling: i64) -> Self {
        let ceiling = ceiling.max(floor + MIN_PRICE_GAP);
        let mut range = Self {
            min_price: floor,
            max_price: ceiling,
            floor,
            ceiling,
        };
        range.set_max_price(initial[1].filter(|v| *v != 0).unwrap_or(ceiling));
        range.set_min_price(initial[0].filter(|v| *v != 0).unwrap_or(floor));
        range
    }

    pub fn min_price(&self) -> i64 {
        self.min_price
    }

    pub fn max_price(&self) -> i64 {
        self.max_price
    }

    pub fn floor(&self) -> i64 {
        self.floor
    }

    pub fn ceiling(&self) -> i64 {
        self.ceiling
    }

    /// Current bounds in the filter's representation.
    pub fn price_pair(&self) -> PricePair {
        [Some(self.min_price), Some(self.max_price)]
    }

    /// Lower bound, stopped at `floor` and at `max_price - MIN_PRICE_GAP`.
    pub fn set_min_price(&mut self, value: i64) {
        self.min_price = value.max(self.floor).min(self.max_price - MIN_PRICE_GAP);
        debug!("Price range now {}..{}", self.min_price, self.max_price);
    }

    /// Upper bound, stopped at `ceiling` and at `min_price + MIN_PRICE_GAP`.
    pub fn set_max_price(&mut self, value: i64) {
        self.max_price = value.min(self.ceiling).max(self.min_price + MIN_PRICE_GAP);
        debug!("Price range now {}..{}", self.min_price, self.max_price);
    }

    /// Apply the raw text of the lower input. Unparseable text means `floor`.
    pub fn min_trigger(&mut self, text: &str) -> PricePair {
        self.set_min_price(parse_int_prefix(text).unwrap_or(self.floor));
        self.price_pair()
    }

    /// Apply the raw text of the upper input. Unparseable text means `ceiling`.
    pub fn max_trigger(&mut self, text: &str) -> PricePair {
        self.set_max_price(parse_int_prefix(text).unwrap_or(self.ceiling));
        self.price_pair()
    }

    /// Move the ceiling, pulling `max_price` down if it no longer fits.
    pub fn set_ceiling(&mut self, ceiling: i64) {
        self.ceiling = ceiling.max(self.floor + MIN_PRICE_GAP);
        if self.max_price > self.ceiling {
            self.max_price = self.ceiling;
            if self.min_price > self.max_price - MIN_PRICE_GAP {
                self.min_price = self.max_price - MIN_PRICE_GAP;
            }
        }
        debug!("Price ceiling set to {}", self.ceiling);
    }

    /// Left offset of the lower thumb, percent of the track.
    pub fn min_thumb(&self) -> f64 {
        percent_along(self.min_price, self.floor, self.ceiling)
    }

    /// Right offset of the upper thumb, percent of the track.
    pub fn max_thumb(&self) -> f64 {
        100.0 - percent_along(self.max_price, self.floor, self.ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PRICE_CEILING, PRICE_FLOOR};

    fn full_range() -> PriceRange {
        PriceRange::new([None, None], PRICE_FLOOR, PRICE_CEILING)
    }

    fn assert_invariant(range: &PriceRange) {
        assert!(range.min_price() >= range.floor());
        assert!(range.max_price() <= range.ceiling());
        assert!(range.min_price() <= range.max_price() - MIN_PRICE_GAP);
    }

    #[test_log::test]
    fn unset_bounds_use_floor_and_ceiling() {
        let range = full_range();
        assert_eq!(range.price_pair(), [Some(1), Some(10_000)]);
        assert_eq!(range.min_thumb(), 0.0);
        assert_eq!(range.max_thumb(), 0.0);
    }

    #[test_log::test]
    fn zero_bound_counts_as_unset() {
        let range = PriceRange::new([Some(0), Some(500)], 1, 10_000);
        assert_eq!(range.price_pair(), [Some(1), Some(500)]);
    }

    #[test_log::test]
    fn bounds_near_the_ceiling_keep_their_gap() {
        let mut range = full_range();
        assert_eq!(range.min_trigger("9996"), [Some(9990), Some(10_000)]);
        assert_eq!(range.max_trigger("9999"), [Some(9990), Some(10_000)]);
        assert_invariant(&range);
    }

    #[test_log::test]
    fn min_gives_way_to_max() {
        let mut range = PriceRange::new([Some(100), Some(400)], 1, 10_000);
        assert_eq!(range.min_trigger("500"), [Some(390), Some(400)]);
        range.set_min_price(200);
        assert_eq!(range.price_pair(), [Some(200), Some(400)]);
    }

    #[test_log::test]
    fn max_gives_way_to_min() {
        let mut range = PriceRange::new([Some(300), Some(400)], 1, 10_000);
        assert_eq!(range.max_trigger("305"), [Some(300), Some(310)]);
        range.set_max_price(-50);
        assert_eq!(range.price_pair(), [Some(300), Some(310)]);
        range.set_max_price(20_000);
        assert_eq!(range.price_pair(), [Some(300), Some(10_000)]);
    }

    #[test_log::test]
    fn seeded_bounds_closer_than_the_gap_lower_min() {
        let range = PriceRange::new([Some(100), Some(105)], 1, 10_000);
        assert_eq!(range.price_pair(), [Some(95), Some(105)]);
        assert_invariant(&range);
    }

    #[test_log::test]
    fn garbage_text_falls_back_to_limits() {
        let mut range = PriceRange::new([Some(300), Some(400)], 1, 10_000);
        assert_eq!(range.min_trigger("abc"), [Some(1), Some(400)]);
        assert_eq!(range.max_trigger(""), [Some(1), Some(10_000)]);
        assert_eq!(range.min_trigger("-20"), [Some(1), Some(10_000)]);
    }

    #[test_log::test]
    fn tightening_the_ceiling_pulls_max_down() {
        let mut range = full_range();
        range.set_min_price(495);
        range.set_ceiling(499);
        assert_eq!(range.price_pair(), [Some(489), Some(499)]);
        assert_invariant(&range);

        range.set_ceiling(5000);
        assert_eq!(range.max_price(), 499);
    }

    #[test_log::test]
    fn ceiling_never_collapses_the_range() {
        let mut range = full_range();
        range.set_ceiling(0);
        assert_eq!(range.ceiling(), 11);
        assert_invariant(&range);
    }

    #[test_log::test]
    fn thumbs_track_the_bounds() {
        let range = PriceRange::new([Some(26), Some(76)], 1, 101);
        assert_eq!(range.min_thumb(), 25.0);
        assert_eq!(range.max_thumb(), 25.0);
    }
}
