//! Property tests for the leveling function and the back-cast generator.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use timetable_core::backcast::plan;
use timetable_core::gamification::level_for_xp;
use timetable_core::projector::weekday_index;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #[test]
    fn prop_level_is_at_least_one_for_nonnegative_xp(xp in 0i64..10_000_000) {
        prop_assert!(level_for_xp(xp) >= 1);
    }

    #[test]
    fn prop_level_is_monotone(a in 0i64..1_000_000, b in 0i64..1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for_xp(lo) <= level_for_xp(hi));
    }

    #[test]
    fn prop_level_boundary_is_exact(k in 1i64..1000) {
        // the last xp of level k and the first xp of level k+1
        prop_assert_eq!(level_for_xp(k * 1000 - 1), k);
        prop_assert_eq!(level_for_xp(k * 1000), k + 1);
    }

    #[test]
    fn prop_plan_has_one_step_per_remaining_day(
        today in arb_date(),
        days_out in 1i64..120,
        base in 1u8..=10,
    ) {
        let deadline = today + Duration::days(days_out);
        let steps = plan("Goal", deadline, base, today);
        prop_assert_eq!(steps.len() as i64, days_out);
    }

    #[test]
    fn prop_plan_past_or_today_is_empty(
        today in arb_date(),
        days_back in 0i64..120,
    ) {
        let deadline = today - Duration::days(days_back);
        prop_assert!(plan("Goal", deadline, 2, today).is_empty());
    }

    #[test]
    fn prop_plan_ramp_laws(
        today in arb_date(),
        days_out in 1i64..90,
        base in 1u8..=10,
    ) {
        let deadline = today + Duration::days(days_out);
        let steps = plan("Goal", deadline, base, today);

        for (i, step) in steps.iter().enumerate() {
            let i = i as i64;
            // duration grows linearly from 60 by 15
            prop_assert_eq!(i64::from(step.duration_minutes), 60 + i * 15);
            // intensity ramps one point every two days, capped at 10
            let expected = (i64::from(base) + i / 2).min(10);
            prop_assert_eq!(i64::from(step.intensity), expected);
            // each step recurs only on its own day's weekday
            let day = today + Duration::days(i);
            prop_assert_eq!(&step.frequency_days, &vec![weekday_index(day)]);
            prop_assert_eq!(step.scheduled_date, Some(day));
            prop_assert_eq!(step.deadline, Some(deadline));
        }

        // intensity never decreases along the ramp
        for pair in steps.windows(2) {
            prop_assert!(pair[0].intensity <= pair[1].intensity);
        }
    }

    #[test]
    fn prop_every_generated_step_is_registrable(
        today in arb_date(),
        days_out in 1i64..60,
        base in 1u8..=10,
    ) {
        let deadline = today + Duration::days(days_out);
        for step in plan("Goal", deadline, base, today) {
            prop_assert!(step.validate().is_ok());
        }
    }
}
