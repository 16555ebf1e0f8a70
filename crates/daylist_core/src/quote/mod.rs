//! Daily motivational banner.
//!
//! # Responsibility
//! - Pick one message per calendar day from a fixed rotation.
//! - Track the once-per-day dismissal marker in the key-value store.
//!
//! # Invariants
//! - The same day-of-month always yields the same message.
//! - The banner starts dismissed only when the marker equals today.

use crate::store::{KeyValueStore, StoreResult, QUOTE_DISMISSED_KEY};
use chrono::{Datelike, Local, NaiveDate};
use log::{info, warn};

pub const QUOTES: &[&str] = &[
    "Small progress every day leads to big results.",
    "Do it for the future you will thank today.",
    "One step is better than no step.",
    "Consistency beats intensity.",
    "Start small. Think big. Act now.",
    "Make it happen — one task at a time.",
    "Progress, not perfection.",
];

const MARKER_FORMAT: &str = "%Y-%m-%d";

/// Returns today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Message for `date`, indexed by day-of-month modulo the rotation length.
pub fn daily_quote(date: NaiveDate) -> &'static str {
    QUOTES[date.day() as usize % QUOTES.len()]
}

/// Observable banner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteBanner {
    Shown { message: &'static str },
    DismissedForToday,
}

impl QuoteBanner {
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Shown { message } => Some(*message),
            Self::DismissedForToday => None,
        }
    }
}

/// Reads and writes the dismissal marker under a configurable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSelector {
    key: String,
}

impl Default for QuoteSelector {
    fn default() -> Self {
        Self::new(QUOTE_DISMISSED_KEY)
    }
}

impl QuoteSelector {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Computes the banner state at startup.
    ///
    /// A store read failure is treated as "no marker".
    pub fn startup<S: KeyValueStore>(&self, store: &S, today: NaiveDate) -> QuoteBanner {
        let marker = store.get(&self.key).unwrap_or_else(|err| {
            warn!("event=quote_load module=quote status=recovered reason=read_failed error={err}");
            None
        });

        let today_marker = today.format(MARKER_FORMAT).to_string();
        if marker.as_deref() == Some(today_marker.as_str()) {
            info!("event=quote_load module=quote status=ok state=dismissed");
            QuoteBanner::DismissedForToday
        } else {
            info!("event=quote_load module=quote status=ok state=shown");
            QuoteBanner::Shown {
                message: daily_quote(today),
            }
        }
    }

    /// Records `today` as the dismissal marker.
    pub fn dismiss<S: KeyValueStore>(
        &self,
        store: &mut S,
        today: NaiveDate,
    ) -> StoreResult<QuoteBanner> {
        store.set(&self.key, &today.format(MARKER_FORMAT).to_string())?;
        info!("event=quote_dismiss module=quote status=ok");
        Ok(QuoteBanner::DismissedForToday)
    }
}

#[cfg(test)]
mod tests {
    use super::{daily_quote, QuoteBanner, QuoteSelector, QUOTES};
    use crate::store::{KeyValueStore, MemoryStore, QUOTE_DISMISSED_KEY};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn quote_depends_only_on_day_of_month() {
        assert_eq!(daily_quote(date(2026, 1, 9)), daily_quote(date(2026, 5, 9)));
        assert_eq!(daily_quote(date(2026, 1, 7)), QUOTES[0]);
        assert_eq!(daily_quote(date(2026, 1, 1)), QUOTES[1]);
        assert_eq!(daily_quote(date(2026, 1, 8)), daily_quote(date(2026, 1, 1)));
    }

    #[test]
    fn rotation_text_is_verbatim() {
        assert_eq!(
            daily_quote(date(2026, 3, 5)),
            "Make it happen \u{2014} one task at a time."
        );
        assert_eq!(daily_quote(date(2026, 3, 6)), "Progress, not perfection.");
    }

    #[test]
    fn startup_without_marker_shows_banner() {
        let store = MemoryStore::new();
        let banner = QuoteSelector::default().startup(&store, date(2026, 10, 18));
        assert_eq!(
            banner,
            QuoteBanner::Shown {
                message: daily_quote(date(2026, 10, 18))
            }
        );
    }

    #[test]
    fn dismissal_holds_for_same_day_only() {
        let mut store = MemoryStore::new();
        let selector = QuoteSelector::default();
        let day = date(2026, 10, 18);

        let banner = selector.dismiss(&mut store, day).unwrap();
        assert_eq!(banner, QuoteBanner::DismissedForToday);
        assert_eq!(
            store.get(QUOTE_DISMISSED_KEY).unwrap().as_deref(),
            Some("2026-10-18")
        );

        assert!(!selector.startup(&store, day).is_shown());
        assert!(selector.startup(&store, date(2026, 10, 19)).is_shown());
        assert!(selector.startup(&store, date(2025, 10, 18)).is_shown());
    }
}
