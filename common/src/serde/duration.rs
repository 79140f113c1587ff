// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! (De)serializes an optional `chrono::TimeDelta` as `"HH:MM:SS.mmm"` or `null`.
//!
//! Hours are not wrapped at 24, negative durations are not supported.

use chrono::TimeDelta;
use serde::{self, Deserialize, Deserializer, Serializer};

// chrono's `NaiveTime` formatting wraps at 24 h, a course can take longer.
pub fn duration_to_string(duration: &TimeDelta) -> Option<String> {
    let total_millis = duration.num_milliseconds();
    if total_millis < 0 {
        return None;
    }
    let millis = total_millis % 1000;
    let total_seconds = total_millis / 1000;
    Some(format!(
        "{:02}:{:02}:{:02}.{:03}",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60,
        millis
    ))
}

pub fn string_to_duration(s: &str) -> Option<TimeDelta> {
    let (hms, millis) = s.split_once('.')?;
    let mut parts = hms.splitn(3, ':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next()?.parse().ok()?;
    let millis: i64 = millis.parse().ok()?;
    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return None;
    }
    Some(TimeDelta::milliseconds(
        ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis,
    ))
}

pub fn serialize<S>(duration: &Option<TimeDelta>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match duration {
        Some(duration) => {
            let formatted = duration_to_string(duration)
                .ok_or_else(|| serde::ser::Error::custom("negative durations are not supported"))?;
            serializer.serialize_str(&formatted)
        }
        None => serializer.serialize_none(),
    }
}

/// Deserialize a time string like "00:12:25.144" into a `chrono::TimeDelta`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<TimeDelta>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(s) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    string_to_duration(&s)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid duration '{s}'")))
}
