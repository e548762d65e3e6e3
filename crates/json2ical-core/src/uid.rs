//! Unique identifier generation for events that arrive without a `uid`.
//!
//! Generation is behind the [`UidSource`] trait so conversions can be made
//! reproducible by swapping in a [`SequenceUid`] (or any `Fn() -> String`).

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use rand::Rng as _;

/// Domain tag appended to generated identifiers.
pub const DEFAULT_UID_DOMAIN: &str = "json-to-ical";

/// Upper bound (inclusive) of the random component.
const RANDOM_MAX: u32 = 999_999;

thread_local! {
    /// Random components already handed out by this thread in the current
    /// millisecond.
    static ISSUED: RefCell<(i64, HashSet<u32>)> = RefCell::new((i64::MIN, HashSet::new()));
}

/// A supplier of fresh UID tokens.
///
/// Sources take `&self` and must be shareable across threads; independent
/// conversions may draw from the same source without coordinating.
pub trait UidSource: Send + Sync {
    fn next_uid(&self) -> String;
}

impl<F> UidSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_uid(&self) -> String {
        self()
    }
}

/// Wall clock plus randomness: `"<unix millis>-<0..=999999>@<domain>"`.
///
/// Best-effort unique. Within one thread the random component is never
/// repeated inside the same millisecond. Calls on different threads in the
/// same millisecond can still collide, with probability 1 in 10^6.
#[derive(Debug, Clone)]
pub struct ClockRandomUid {
    domain: String,
}

impl ClockRandomUid {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Default for ClockRandomUid {
    fn default() -> Self {
        Self::new(DEFAULT_UID_DOMAIN)
    }
}

impl UidSource for ClockRandomUid {
    fn next_uid(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let random = ISSUED.with(|issued| {
            let (current, seen) = &mut *issued.borrow_mut();
            if *current != millis {
                *current = millis;
                seen.clear();
            }
            let mut rng = rand::rng();
            loop {
                let candidate: u32 = rng.random_range(0..=RANDOM_MAX);
                if seen.insert(candidate) || seen.len() > RANDOM_MAX as usize {
                    break candidate;
                }
            }
        });
        format!("{}-{}@{}", millis, random, self.domain)
    }
}

/// Deterministic source: `"<prefix>-1@<domain>"`, `"<prefix>-2@<domain>"`, ...
#[derive(Debug)]
pub struct SequenceUid {
    prefix: String,
    domain: String,
    next: AtomicU64,
}

impl SequenceUid {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            domain: DEFAULT_UID_DOMAIN.to_string(),
            next: AtomicU64::new(1),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }
}

impl UidSource for SequenceUid {
    fn next_uid(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}@{}", self.prefix, n, self.domain)
    }
}
