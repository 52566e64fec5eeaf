use chrono::{NaiveDate, NaiveTime, Utc};
use kourt_core::{
    models::schedule::ArenaSchedule,
    slots::{
        available_slots, day_of_week, occupied_hours, schedule_for_date, slots_for, OpeningHours,
        OperatingWindow, TimeRange,
    },
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn range(start: &str, end: &str) -> TimeRange {
    TimeRange {
        start: time(start),
        end: time(end),
    }
}

fn labels(hours: impl IntoIterator<Item = u32>) -> Vec<String> {
    hours.into_iter().map(|h| format!("{:02}:00", h)).collect()
}

fn schedule(open: &str, close: &str, is_closed: bool) -> ArenaSchedule {
    ArenaSchedule {
        id: Uuid::new_v4(),
        arena_id: Uuid::new_v4(),
        day_of_week: Some(1),
        specific_date: None,
        open_time: time(open),
        close_time: time(close),
        is_closed,
        created_at: Utc::now(),
    }
}

#[test]
fn test_no_bookings_yields_full_default_grid() {
    let slots = available_slots(&OperatingWindow::default(), &[]);

    assert_eq!(slots.len(), 17);
    assert_eq!(slots.first().map(String::as_str), Some("06:00"));
    assert_eq!(slots.last().map(String::as_str), Some("22:00"));
    assert_eq!(slots, labels(6..23));
}

#[rstest]
#[case::two_hour_booking(vec![range("09:00", "11:00")], labels((6..9).chain(11..23)))]
#[case::reaches_past_closing(vec![range("22:30", "23:30")], labels(6..22))]
#[case::same_hour_booking_blocks_nothing(vec![range("09:15", "09:45")], labels(6..23))]
#[case::half_hour_bounds_use_start_hour_only(vec![range("09:30", "10:30")], labels((6..9).chain(10..23)))]
#[case::starts_before_opening(vec![range("05:00", "07:00")], labels(7..23))]
#[case::overlapping_bookings_union(
    vec![range("06:00", "09:00"), range("08:00", "12:00")],
    labels(12..23)
)]
fn test_bookings_exclude_occupied_hours(
    #[case] bookings: Vec<TimeRange>,
    #[case] expected: Vec<String>,
) {
    assert_eq!(available_slots(&OperatingWindow::default(), &bookings), expected);
}

#[test]
fn test_two_hour_booking_keeps_neighbouring_slots() {
    let slots = available_slots(&OperatingWindow::default(), &[range("09:00", "11:00")]);

    assert!(!slots.contains(&"09:00".to_string()));
    assert!(!slots.contains(&"10:00".to_string()));
    assert!(slots.contains(&"08:00".to_string()));
    assert!(slots.contains(&"11:00".to_string()));
}

#[test]
fn test_fully_booked_day_is_empty() {
    let slots = available_slots(&OperatingWindow::default(), &[range("06:00", "23:00")]);
    assert!(slots.is_empty());
}

#[test]
fn test_result_is_stable_across_calls() {
    let bookings = vec![range("14:00", "16:00"), range("07:00", "08:00")];
    let window = OperatingWindow::default();

    let first = available_slots(&window, &bookings);
    let second = available_slots(&window, &bookings);

    assert_eq!(first, second);
    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted);
}

#[test]
fn test_occupied_hours_is_union() {
    let bookings = [range("06:00", "09:00"), range("08:00", "12:00")];
    let hours: Vec<u32> = occupied_hours(&bookings).into_iter().collect();
    assert_eq!(hours, (6..12).collect::<Vec<_>>());
}

#[test]
fn test_closed_schedule_yields_no_slots() {
    let hours = OpeningHours::from_schedule(Some(&schedule("08:00", "22:00", true)));

    assert_eq!(hours, OpeningHours::Closed);
    assert!(slots_for(&hours, &[]).is_empty());
}

#[test]
fn test_configured_schedule_narrows_grid() {
    let hours = OpeningHours::from_schedule(Some(&schedule("10:00", "14:00", false)));

    assert_eq!(
        slots_for(&hours, &[range("11:00", "12:00")]),
        vec!["10:00", "12:00", "13:00"]
    );
}

#[test]
fn test_missing_schedule_uses_default_window() {
    assert_eq!(
        OpeningHours::from_schedule(None),
        OpeningHours::Open(OperatingWindow::default())
    );
}

#[rstest]
#[case("06:00", "07:00", true)]
#[case("21:00", "23:00", true)]
#[case("05:30", "07:00", false)]
#[case("22:00", "23:30", false)]
fn test_default_window_admits(#[case] start: &str, #[case] end: &str, #[case] admitted: bool) {
    assert_eq!(
        OperatingWindow::default().admits(&range(start, end)),
        admitted
    );
}

#[test]
fn test_time_range_rejects_inverted_bounds() {
    assert!(TimeRange::new(time("10:00"), time("09:00")).is_err());
    assert!(TimeRange::new(time("10:00"), time("10:00")).is_err());
    assert!(TimeRange::new(time("09:00"), time("10:30")).is_ok());
}

#[test]
fn test_duration_hours() {
    assert_eq!(range("09:00", "10:30").duration_hours(), 1.5);
    assert_eq!(range("18:00", "20:00").duration_hours(), 2.0);
}

#[rstest]
#[case(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 0)]
#[case(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), 1)]
#[case(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(), 6)]
fn test_day_of_week_starts_on_sunday(#[case] date: NaiveDate, #[case] expected: i16) {
    assert_eq!(day_of_week(date), expected);
}

/// Monday, 19 October 2026
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn weekly(day: i16, open: &str, close: &str, is_closed: bool) -> ArenaSchedule {
    ArenaSchedule {
        day_of_week: Some(day),
        ..schedule(open, close, is_closed)
    }
}

fn dated(date: NaiveDate, open: &str, close: &str, is_closed: bool) -> ArenaSchedule {
    ArenaSchedule {
        day_of_week: None,
        specific_date: Some(date),
        ..schedule(open, close, is_closed)
    }
}

fn open_between(open: &str, close: &str) -> OpeningHours {
    OpeningHours::Open(OperatingWindow {
        open: time(open),
        close: time(close),
    })
}

#[rstest]
#[case::no_schedules(vec![], OpeningHours::Open(OperatingWindow::default()))]
#[case::weekly_only(vec![weekly(1, "08:00", "20:00", false)], open_between("08:00", "20:00"))]
#[case::date_only(vec![dated(monday(), "10:00", "14:00", false)], open_between("10:00", "14:00"))]
#[case::date_beats_weekly(
    vec![weekly(1, "08:00", "20:00", false), dated(monday(), "10:00", "14:00", false)],
    open_between("10:00", "14:00")
)]
#[case::date_beats_weekly_in_any_order(
    vec![dated(monday(), "10:00", "14:00", false), weekly(1, "08:00", "20:00", false)],
    open_between("10:00", "14:00")
)]
#[case::closed_date_overrides_open_weekday(
    vec![weekly(1, "08:00", "20:00", false), dated(monday(), "08:00", "20:00", true)],
    OpeningHours::Closed
)]
#[case::other_weekday_is_ignored(
    vec![weekly(2, "08:00", "20:00", false)],
    OpeningHours::Open(OperatingWindow::default())
)]
#[case::other_date_is_ignored(
    vec![dated(monday().succ_opt().unwrap(), "08:00", "20:00", true)],
    OpeningHours::Open(OperatingWindow::default())
)]
fn test_schedule_for_date_prefers_specific_date(
    #[case] schedules: Vec<ArenaSchedule>,
    #[case] expected: OpeningHours,
) {
    let hours = OpeningHours::from_schedule(schedule_for_date(&schedules, monday()));
    assert_eq!(hours, expected);
}

#[test]
fn test_half_past_opening_lists_the_hour_but_rejects_it() {
    let window = OperatingWindow {
        open: time("06:30"),
        close: time("22:00"),
    };

    assert_eq!(available_slots(&window, &[]).first().map(String::as_str), Some("06:00"));
    assert!(!window.admits(&range("06:00", "07:00")));
    assert!(window.admits(&range("06:30", "07:30")));
}
