use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use tidings::domain::models::{MilestonePhase, Phase};
use tidings::services::{base_year, days_until_christmas, phase_for};

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~60 years
    (0i64..22_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    /// Property: the base year is the calendar year from September on and
    /// the following year before that.
    #[test]
    fn prop_base_year_by_month(today in any_date()) {
        let expected = if today.month() >= 9 { today.year() } else { today.year() + 1 };
        prop_assert_eq!(base_year(today), expected);
    }

    /// Property: planning the base year shows the month's phase in autumn
    /// and Pre-planning otherwise.
    #[test]
    fn prop_phase_matches_month(today in any_date()) {
        let phase = phase_for(today, base_year(today));
        match MilestonePhase::from_month(today.month()) {
            Some(month_phase) => prop_assert_eq!(phase, Phase::from(month_phase)),
            None => prop_assert_eq!(phase, Phase::PrePlanning),
        }
    }

    /// Property: any year after today's is always in Pre-planning.
    #[test]
    fn prop_future_year_is_pre_planning(today in any_date(), ahead in 1i32..5) {
        prop_assert_eq!(phase_for(today, today.year() + ahead), Phase::PrePlanning);
    }

    /// Property: the countdown shrinks by exactly one per day and hits zero on Christmas.
    #[test]
    fn prop_countdown_steps_by_one(today in any_date()) {
        let year = base_year(today);
        let tomorrow = today + Duration::days(1);
        prop_assert_eq!(
            days_until_christmas(today, year) - 1,
            days_until_christmas(tomorrow, year)
        );
        let christmas = NaiveDate::from_ymd_opt(year, 12, 25).unwrap();
        prop_assert_eq!(days_until_christmas(christmas, year), 0);
    }

    /// Property: while planning the base year Christmas is never more than a year and a half away.
    #[test]
    fn prop_countdown_bounded(today in any_date()) {
        let days = days_until_christmas(today, base_year(today));
        prop_assert!(days <= 365 + 366);
        if today.month() >= 9 && !(today.month() == 12 && today.day() > 25) {
            prop_assert!(days >= 0);
        }
    }
}
