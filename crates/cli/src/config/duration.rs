// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout strings for formatter invocations.
//!
//! Accepted forms: `"500ms"`, `"30s"`, `"1.5s"`, `"2m"`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Parse a timeout string such as `"30s"` into a [`Duration`].
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let split = s
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| format!("invalid duration format: {s} (use 30s, 500ms, or 2m)"))?;
    let (number, unit) = s.split_at(split);
    let number = number.trim();

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration: {s}"))?;
    if value < 0.0 || !value.is_finite() {
        return Err(format!("negative duration: {s}"));
    }

    let seconds = match unit {
        "ms" => value / 1000.0,
        "s" => value,
        "m" => value * 60.0,
        _ => return Err(format!("invalid duration format: {s} (use 30s, 500ms, or 2m)")),
    };
    Ok(Duration::from_secs_f64(seconds))
}

/// Deserialize an optional timeout string.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
