//! Property tests for the salary cycle laws.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::cycle::{CYCLE_LENGTH_DAYS, current_window};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Cycle monotonicity: every window starts an exact multiple of 31
    /// days after the joining date and is exactly 31 days long.
    #[test]
    fn prop_window_anchored_to_joining_date(
        join_offset in 0i64..2000,
        as_of_offset in 0i64..4000,
    ) {
        let joining = base_date() + Duration::days(join_offset);
        let as_of = base_date() + Duration::days(as_of_offset);

        let w = current_window(joining, as_of);
        let days_from_join = (w.start - joining).num_days();

        prop_assert!(days_from_join >= 0);
        prop_assert_eq!(days_from_join % CYCLE_LENGTH_DAYS, 0);
        prop_assert_eq!((w.end - w.start).num_days(), CYCLE_LENGTH_DAYS);
    }

    /// `as_of` falls in exactly one cycle: inside the returned window
    /// whenever it is at/after the joining date.
    #[test]
    fn prop_as_of_inside_window(
        join_offset in 0i64..2000,
        days_after_join in 0i64..4000,
    ) {
        let joining = base_date() + Duration::days(join_offset);
        let as_of = joining + Duration::days(days_after_join);

        let w = current_window(joining, as_of);
        prop_assert!(w.contains(as_of));
    }

    /// Consecutive windows tile the timeline with no gap or overlap.
    #[test]
    fn prop_windows_tile(
        join_offset in 0i64..2000,
        days_after_join in 0i64..4000,
    ) {
        let joining = base_date() + Duration::days(join_offset);
        let as_of = joining + Duration::days(days_after_join);

        let w = current_window(joining, as_of);
        let next = current_window(joining, w.end);
        prop_assert_eq!(next.start, w.end);
    }
}
