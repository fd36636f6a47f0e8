// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps stored on documents.
//!
//! Stored timestamps are fixed-width RFC3339 strings with millisecond
//! precision and a `Z` suffix, so lexicographic order in Firestore queries
//! is chronological.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in the stored format.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}
