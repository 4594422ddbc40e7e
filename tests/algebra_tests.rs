use std::cmp::Ordering;

use approx::assert_relative_eq;
use time_interval_engine::core::{
    compare, difference_in_seconds, difference_in_unit, is_after, is_before, is_in_range,
    is_same, parse_default, quantity_from_seconds, slot_position,
};
use time_interval_engine::{TimeInterval, TimeSpan, Unit};

fn chain(parts: &[(Unit, i64)]) -> TimeInterval {
    TimeInterval::from_parts(parts).expect("non-empty chain")
}

fn hours(start: i64, end: i64) -> TimeSpan {
    TimeSpan::new(TimeInterval::new(Unit::Hour, start), TimeInterval::new(Unit::Hour, end))
}

#[test]
fn february_length_follows_leap_years() {
    for (year, days) in [(2020, 29.0), (2021, 28.0)] {
        let feb = chain(&[(Unit::Year, year), (Unit::Month, 2), (Unit::Day, 1)]);
        let mar = chain(&[(Unit::Year, year), (Unit::Month, 3), (Unit::Day, 1)]);
        assert_eq!(difference_in_unit(&feb, &mar, Unit::Day).expect("days"), days);
    }
}

#[test]
fn leap_year_spans_366_days() {
    let a = TimeInterval::new(Unit::Year, 2020);
    let b = TimeInterval::new(Unit::Year, 2021);
    assert_eq!(difference_in_seconds(&a, &b).expect("seconds"), 366 * 86_400);
    assert_eq!(difference_in_seconds(&b, &a).expect("seconds"), -366 * 86_400);
}

#[test]
fn quarter_differences_are_exact() {
    let q1 = parse_default("Q1/2021").expect("q1");
    let q2 = parse_default("Q2/2021").expect("q2");
    let q3 = parse_default("Q3/2021").expect("q3");
    assert_eq!(difference_in_unit(&q1, &q2, Unit::Year).expect("years"), 0.25);
    assert_eq!(difference_in_unit(&q1, &q3, Unit::Quarter).expect("quarters"), 2.0);
}

#[test]
fn minute_differences_keep_second_resolution() {
    let a = TimeInterval::new(Unit::Second, 0);
    let b = TimeInterval::new(Unit::Second, 90);
    assert_eq!(difference_in_unit(&a, &b, Unit::Minute).expect("minutes"), 1.5);
    assert_eq!(difference_in_unit(&a, &b, Unit::Second).expect("seconds"), 90.0);
}

#[test]
fn quantity_from_seconds_uses_unit_rounding() {
    let q = quantity_from_seconds(90.0, Unit::Minute);
    assert_eq!(q.unit, Unit::Minute);
    assert_eq!(q.value, 1.5);

    let day = quantity_from_seconds(40_000.0, Unit::Day);
    assert_eq!(day.value, 0.5);
}

#[test]
fn comparisons_follow_the_timeline() {
    let early = chain(&[(Unit::Year, 2024), (Unit::Month, 3)]);
    let late = chain(&[(Unit::Year, 2024), (Unit::Month, 4)]);
    let same = chain(&[(Unit::Year, 2024), (Unit::Month, 3), (Unit::Day, 1)]);

    assert_eq!(compare(&early, &late), Ok(Ordering::Less));
    assert_eq!(compare(&late, &early), Ok(Ordering::Greater));
    assert!(is_before(&early, &late).expect("before"));
    assert!(is_after(&late, &early).expect("after"));
    // the first day adds nothing to the month start
    assert!(is_same(&early, &same).expect("same"));
}

#[test]
fn range_membership_is_inclusive() {
    let span = hours(2, 6);
    for (hour, inside) in [(1, false), (2, true), (4, true), (6, true), (7, false)] {
        let point = TimeInterval::new(Unit::Hour, hour);
        assert_eq!(is_in_range(&point, &span), Ok(inside), "hour {hour}");
    }
}

#[test]
fn reversed_range_only_holds_a_point_on_both_bounds() {
    let reversed = hours(6, 2);
    assert_eq!(is_in_range(&TimeInterval::new(Unit::Hour, 4), &reversed), Ok(false));

    let degenerate = hours(3, 3);
    assert_eq!(is_in_range(&TimeInterval::new(Unit::Hour, 3), &degenerate), Ok(true));
}

#[test]
fn slot_positions_across_an_hour_span() {
    let span = hours(0, 10);
    let at = |point: TimeInterval| slot_position(&span, &point).expect("position");

    assert_relative_eq!(at(TimeInterval::new(Unit::Hour, 0)), 0.0);
    assert_relative_eq!(at(TimeInterval::new(Unit::Hour, 5)), 0.5);
    assert_relative_eq!(at(TimeInterval::new(Unit::Hour, 10)), 1.0);
    // two and a half hours
    assert_relative_eq!(at(TimeInterval::new(Unit::Minute, 150)), 0.25);
}

#[test]
fn slot_positions_are_not_clamped() {
    let span = hours(0, 10);
    let before = slot_position(&span, &TimeInterval::new(Unit::Hour, 20)).expect("after end");
    assert_relative_eq!(before, 2.0);
    let later = hours(10, 20);
    let earlier = slot_position(&later, &TimeInterval::new(Unit::Hour, 5)).expect("before start");
    assert_relative_eq!(earlier, -0.5);
}

#[test]
fn degenerate_span_yields_negative_one() {
    let span = hours(4, 4);
    for hour in [0, 4, 9] {
        let position = slot_position(&span, &TimeInterval::new(Unit::Hour, hour)).expect("position");
        assert_eq!(position, -1.0);
    }
}

#[test]
fn span_helpers_delegate_to_the_algebra() {
    let span = TimeSpan::parse("2024-01-01", "2024-01-11", &time_interval_engine::ParserKernel::default())
        .expect("span");
    assert_eq!(span.duration_in_seconds().expect("seconds"), 10 * 86_400);
    assert_eq!(span.duration_in_unit(Unit::Day).expect("days"), 10.0);

    let middle = parse_default("2024-01-06").expect("middle");
    assert_relative_eq!(span.position_of(&middle).expect("position"), 0.5);
    assert!(span.contains(&middle).expect("contains"));

    let moved = span.with_end(parse_default("2024-01-21").expect("end"));
    assert_eq!(moved.start, span.start);
    assert_eq!(moved.duration_in_seconds().expect("seconds"), 20 * 86_400);
    assert_eq!(span.to_string(), "2024-01-01 - 2024-01-11");
}
