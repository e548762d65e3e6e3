//! Throughput of the two conversion stages on a synthetic 500-event document.

use criterion::{criterion_group, criterion_main, Criterion};
use json2ical_core::{parse_events, CalendarBuilder, NormalizeOptions, SequenceUid};
use std::hint::black_box;

fn sample_document(count: usize) -> String {
    let events: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"summary":"Event {i}, part {i}","description":"Notes; line one\nline two","location":"Room {i}","start_datetime":"2024-01-15T10:00:00","end_datetime":"2024-01-15T11:00:00","timezone":"America/New_York","organizer_name":"Ada","organizer_email":"ada@example.com","attendees":["a@example.com","b@example.com"]}}"#
            )
        })
        .collect();
    format!("[{}]", events.join(","))
}

fn bench_conversion(c: &mut Criterion) {
    let json = sample_document(500);
    let options = NormalizeOptions::default();

    c.bench_function("normalize_500", |b| {
        b.iter(|| {
            let uids = SequenceUid::new("bench");
            parse_events(black_box(&json), &options, &uids).unwrap()
        })
    });

    let uids = SequenceUid::new("bench");
    let events = parse_events(&json, &options, &uids).unwrap();
    let builder = CalendarBuilder::new();
    c.bench_function("render_500", |b| b.iter(|| builder.render(black_box(&events))));
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
