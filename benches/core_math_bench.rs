use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use time_interval_engine::api::{TimelineBar, TimelineRange, parse_all, process_timeline};
use time_interval_engine::core::{default_kernel, parse_default, slot_position, split_range};
use time_interval_engine::{TimeInterval, TimeSpan, Unit};

fn bench_default_kernel_parse(c: &mut Criterion) {
    let inputs = ["2024-03-05 08:30:15", "Q3/2021", "15.03.2024", "36 hours", "2024"];

    c.bench_function("default_kernel_parse_mixed", |b| {
        b.iter(|| {
            for input in inputs {
                let _ = parse_default(black_box(input)).expect("parse should succeed");
            }
        })
    });
}

fn bench_parse_all_10k(c: &mut Criterion) {
    let inputs: Vec<String> = (0..10_000)
        .map(|i| format!("{:04}-{:02}-{:02}", 1900 + i % 200, i % 12 + 1, i % 28 + 1))
        .collect();
    let kernel = default_kernel();

    c.bench_function("parse_all_10k", |b| {
        b.iter(|| {
            let _ = parse_all(black_box(&inputs), kernel);
        })
    });
}

fn bench_split_decade_into_days(c: &mut Criterion) {
    let span = TimeSpan::new(
        TimeInterval::new(Unit::Year, 2015),
        TimeInterval::new(Unit::Year, 2024),
    );

    c.bench_function("split_decade_into_days", |b| {
        b.iter(|| {
            let _ = split_range(black_box(&span), Unit::Day).expect("split should succeed");
        })
    });
}

fn bench_split_week_into_hours(c: &mut Criterion) {
    let start = parse_default("2024-03-01 00").expect("valid start");
    let end = parse_default("2024-03-08 00").expect("valid end");
    let span = TimeSpan::new(start, end);

    c.bench_function("split_week_into_hours", |b| {
        b.iter(|| {
            let _ = split_range(black_box(&span), Unit::Hour).expect("split should succeed");
        })
    });
}

fn bench_slot_positions_1k(c: &mut Criterion) {
    let span = TimeSpan::new(
        TimeInterval::new(Unit::Year, 2000),
        TimeInterval::new(Unit::Year, 2030),
    );
    let points: Vec<TimeInterval> = (0..1_000)
        .map(|i| {
            TimeInterval::new(Unit::Year, 2000 + i % 30).with_increment(TimeInterval::new(Unit::Month, i % 12 + 1))
        })
        .collect();

    c.bench_function("slot_positions_1k", |b| {
        b.iter(|| {
            for point in &points {
                let _ = slot_position(black_box(&span), point).expect("position should succeed");
            }
        })
    });
}

fn bench_timeline_500_bars(c: &mut Criterion) {
    let bars: Vec<TimelineBar> = (0..500)
        .map(|i| {
            let month = i % 12 + 1;
            TimelineBar::new(
                format!("row-{}", i % 25),
                format!("{month:02}/01/2020"),
                format!("{month:02}/15/2020"),
                format!("bar {i}"),
            )
        })
        .collect();
    let range = TimelineRange::new("01/01/2020", "12/31/2020");

    c.bench_function("timeline_500_bars", |b| {
        b.iter(|| {
            let _ = process_timeline(black_box(&bars), &range).expect("timeline should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_default_kernel_parse,
    bench_parse_all_10k,
    bench_split_decade_into_days,
    bench_split_week_into_hours,
    bench_slot_positions_1k,
    bench_timeline_500_bars
);
criterion_main!(benches);
