//! UID source tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use json2ical_core::uid::DEFAULT_UID_DOMAIN;
use json2ical_core::{CalTimestamp, CalendarEvent, ClockRandomUid, SequenceUid, UidSource};

fn assert_generated_shape(uid: &str, domain: &str) {
    let (head, tail) = uid.split_once('@').expect("uid must contain '@'");
    assert_eq!(tail, domain);
    let (millis, random) = head.split_once('-').expect("uid must contain '-'");
    assert!(millis.bytes().all(|b| b.is_ascii_digit()) && !millis.is_empty(), "{uid}");
    assert!(random.bytes().all(|b| b.is_ascii_digit()) && !random.is_empty(), "{uid}");
    assert!(random.parse::<u32>().unwrap() <= 999_999);
}

#[test]
fn clock_random_uid_shape() {
    let source = ClockRandomUid::default();
    assert_eq!(source.domain(), DEFAULT_UID_DOMAIN);
    for _ in 0..100 {
        assert_generated_shape(&source.next_uid(), "json-to-ical");
    }
}

#[test]
fn custom_domain() {
    let source = ClockRandomUid::new("calendar.example.com");
    assert_generated_shape(&source.next_uid(), "calendar.example.com");
}

#[test]
fn large_sample_has_no_collisions() {
    let source = ClockRandomUid::default();
    let uids: HashSet<String> = (0..10_000).map(|_| source.next_uid()).collect();
    assert_eq!(uids.len(), 10_000);
}

#[test]
fn millis_component_tracks_the_clock() {
    let before = chrono::Utc::now().timestamp_millis();
    let uid = ClockRandomUid::default().next_uid();
    let after = chrono::Utc::now().timestamp_millis();
    let millis: i64 = uid.split('-').next().unwrap().parse().unwrap();
    assert!(before <= millis && millis <= after);
}

#[test]
fn sequence_uid_counts_up() {
    let source = SequenceUid::new("evt").with_domain("test.local");
    assert_eq!(source.next_uid(), "evt-1@test.local");
    assert_eq!(source.next_uid(), "evt-2@test.local");
    assert_eq!(source.next_uid(), "evt-3@test.local");
}

#[test]
fn shared_source_across_threads_never_repeats() {
    let source = Arc::new(SequenceUid::new("t"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            thread::spawn(move || (0..250).map(|_| source.next_uid()).collect::<Vec<_>>())
        })
        .collect();

    let mut all: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 1000);
}

#[test]
fn clock_random_uid_is_usable_from_many_threads() {
    let source = Arc::new(ClockRandomUid::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            thread::spawn(move || source.next_uid())
        })
        .collect();
    for h in handles {
        assert_generated_shape(&h.join().unwrap(), "json-to-ical");
    }
}

#[test]
fn ensure_uid_only_fills_empty() {
    let source = SequenceUid::new("fill");
    let mut event = CalendarEvent::new(
        "x",
        CalTimestamp::date(2024, 1, 1),
        CalTimestamp::date(2024, 1, 2),
    );
    event.ensure_uid(&source);
    assert_eq!(event.uid, "fill-1@json-to-ical");
    event.ensure_uid(&source);
    assert_eq!(event.uid, "fill-1@json-to-ical");
}
