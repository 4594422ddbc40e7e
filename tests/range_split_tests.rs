use time_interval_engine::core::{
    SplitConfig, flatten, parse_default, split_range, split_range_with,
};
use time_interval_engine::{TimeError, TimeInterval, TimeSpan, Unit};

fn chain(parts: &[(Unit, i64)]) -> TimeInterval {
    TimeInterval::from_parts(parts).expect("non-empty chain")
}

fn span(start: &str, end: &str) -> TimeSpan {
    TimeSpan::new(
        parse_default(start).expect("start"),
        parse_default(end).expect("end"),
    )
}

#[test]
fn months_across_two_years() {
    let months = split_range(&span("2024/01", "2025/12"), Unit::Month).expect("split");
    assert_eq!(months.len(), 24);
    assert_eq!(months.first(), Some(&chain(&[(Unit::Year, 2024), (Unit::Month, 1)])));
    assert_eq!(months.last(), Some(&chain(&[(Unit::Year, 2025), (Unit::Month, 12)])));
}

#[test]
fn days_across_month_boundary() {
    let days = split_range(&span("2024-03-01", "2024-04-30"), Unit::Day).expect("split");
    assert_eq!(days.len(), 61);
    assert_eq!(
        days[31],
        chain(&[(Unit::Year, 2024), (Unit::Month, 4), (Unit::Day, 1)])
    );
    assert_eq!(
        days.last(),
        Some(&chain(&[(Unit::Year, 2024), (Unit::Month, 4), (Unit::Day, 30)]))
    );
}

#[test]
fn bare_years_split_into_whole_years_of_days() {
    let days = split_range(&span("2020", "2021"), Unit::Day).expect("split");
    assert_eq!(days.len(), 366 + 365);
}

#[test]
fn bare_years_default_to_full_calendars() {
    let bounds = span("2023", "2024");
    assert_eq!(split_range(&bounds, Unit::Quarter).expect("quarters").len(), 8);
    assert_eq!(split_range(&bounds, Unit::Month).expect("months").len(), 24);
    assert_eq!(split_range(&bounds, Unit::Week).expect("weeks").len(), 104);
}

#[test]
fn week_splits_cover_the_whole_end_month() {
    let year = split_range(&span("2024-01", "2024-12"), Unit::Week).expect("split");
    assert_eq!(year.len(), 52);
    assert_eq!(year.last().and_then(TimeInterval::week_number), Some(52));

    // March 1st is day 61 (week 9), June 30th is day 182 (week 26).
    let spring = split_range(&span("2024-03", "2024-06"), Unit::Week).expect("split");
    let weeks: Vec<i64> = spring.iter().filter_map(TimeInterval::week_number).collect();
    assert_eq!(weeks, (9..=26).collect::<Vec<_>>());
}

#[test]
fn quarter_bounds_limit_the_first_and_last_year() {
    let quarters = split_range(&span("2021/Q3", "2022/Q2"), Unit::Quarter).expect("split");
    let values: Vec<(i64, i64)> = quarters
        .iter()
        .map(|q| (q.value(), q.increment().map_or(0, TimeInterval::value)))
        .collect();
    assert_eq!(values, vec![(2021, 3), (2021, 4), (2022, 1), (2022, 2)]);
}

#[test]
fn same_unit_bounds_enumerate_values() {
    let bounds = TimeSpan::new(TimeInterval::new(Unit::Minute, 10), TimeInterval::new(Unit::Minute, 15));
    let minutes = split_range(&bounds, Unit::Minute).expect("split");
    assert_eq!(minutes.len(), 6);
    assert!(minutes.iter().all(|m| m.unit() == Unit::Minute && m.increment().is_none()));
    assert_eq!(minutes[5].value(), 15);
}

#[test]
fn general_path_steps_across_midnight() {
    let bounds = span("2024-03-01 22", "2024-03-02 02");
    let hours = split_range(&bounds, Unit::Hour).expect("split");
    let labels: Vec<(i64, i64)> = hours
        .iter()
        .map(|h| {
            (
                h.find(Unit::Day).map_or(0, TimeInterval::value),
                h.find(Unit::Hour).map_or(-1, TimeInterval::value),
            )
        })
        .collect();
    assert_eq!(labels, vec![(1, 22), (1, 23), (2, 0), (2, 1), (2, 2)]);
}

#[test]
fn span_shorter_than_one_step_yields_its_start() {
    let bounds = span("2024-03-01 08:00", "2024-03-01 08:40");
    let hours = split_range(&bounds, Unit::Hour).expect("split");
    assert_eq!(hours, vec![bounds.start.clone()]);
}

#[test]
fn reversed_span_yields_its_start() {
    let bounds = span("2024-03-05 10:00", "2024-03-01 10:00");
    let hours = split_range(&bounds, Unit::Hour).expect("split");
    assert_eq!(hours, vec![bounds.start.clone()]);
}

#[test]
fn split_into_matches_split_range() {
    let bounds = span("2024/01", "2024/06");
    assert_eq!(
        bounds.split_into(Unit::Month).expect("split_into"),
        split_range(&bounds, Unit::Month).expect("split_range")
    );
}

#[test]
fn limit_stops_runaway_splits() {
    let config = SplitConfig { max_intervals: 10 };
    let result = split_range_with(&span("2024-01-01", "2024-12-31"), Unit::Day, &config);
    assert_eq!(result, Err(TimeError::SplitLimitExceeded { limit: 10 }));

    let general = split_range_with(&span("2024-01-01 00", "2024-01-03 00"), Unit::Hour, &config);
    assert_eq!(general, Err(TimeError::SplitLimitExceeded { limit: 10 }));
}

#[test]
fn zero_limit_is_rejected() {
    let config = SplitConfig { max_intervals: 0 };
    assert!(matches!(
        split_range_with(&span("2024", "2025"), Unit::Month, &config),
        Err(TimeError::InvalidData(_))
    ));
    assert_eq!(SplitConfig::default().max_intervals, 100_000);
}

#[test]
fn flatten_extracts_the_requested_precision() {
    let months = split_range(&span("2024/11", "2025/02"), Unit::Month).expect("split");
    let flat = flatten(&months, Unit::Month);
    let values: Vec<i64> = flat.iter().map(TimeInterval::value).collect();
    assert_eq!(values, vec![11, 12, 1, 2]);
    assert!(flat.iter().all(|m| m.unit() == Unit::Month));

    // no day in the chain: elements come back unchanged
    assert_eq!(flatten(&months, Unit::Day), months);
}
