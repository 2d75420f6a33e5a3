use chrono::NaiveDateTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sked_core::date::CalendarDate;
use sked_core::recurrence::{next_date, next_occurrence};
use sked_core::rule::RecurrenceRule;
use sked_core::validation::normalize_task_date;

fn now() -> NaiveDateTime {
    CalendarDate::from_ymd(2024, 3, 10).unwrap().at_midnight()
}

fn bench_next_occurrence_by_distance(c: &mut Criterion) {
    let now = now();
    let mut group = c.benchmark_group("next_occurrence");

    for (label, start) in [("recent", (2024, 3, 1)), ("decade", (2014, 3, 1)), ("century", (1924, 3, 1))] {
        let date = CalendarDate::from_ymd(start.0, start.1, start.2).unwrap();

        group.bench_with_input(BenchmarkId::new("every_7_days", label), &date, |b, date| {
            b.iter(|| next_occurrence(black_box(now), black_box(*date), RecurrenceRule::EveryNDays(7)))
        });
        group.bench_with_input(BenchmarkId::new("yearly", label), &date, |b, date| {
            b.iter(|| next_occurrence(black_box(now), black_box(*date), RecurrenceRule::Yearly))
        });
    }

    group.finish();
}

fn bench_text_entry_points(c: &mut Criterion) {
    let now = now();

    c.bench_function("next_date_text", |b| {
        b.iter(|| next_date(black_box(now), black_box("20240113"), black_box("d 400")))
    });

    c.bench_function("normalize_task_date", |b| {
        b.iter(|| normalize_task_date(black_box(now), black_box("20200229"), RecurrenceRule::Yearly))
    });
}

criterion_group!(benches, bench_next_occurrence_by_distance, bench_text_entry_points);
criterion_main!(benches);
