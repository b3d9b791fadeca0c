// Human-readable durations and byte counts.
//
// Fine scheme: largest fitting unit (seconds/minutes/hours, B..PB).
// Coarse scheme: always hours and TB; statistics are taken on the rounded values.

use std::fmt;

use serde::Deserialize;

use crate::models::nonzero;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const BYTES_PER_TB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;
const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Which unit set report cells and statistics use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitScheme {
    #[default]
    Fine,
    Coarse,
}

impl fmt::Display for UnitScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitScheme::Fine => "fine",
            UnitScheme::Coarse => "coarse",
        })
    }
}

/// A rounded value with its unit label, e.g. `2.0 GB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: &'static str,
}

impl Quantity {
    pub fn new(value: f64, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_number(self.value), self.unit)
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Integral values keep one decimal ("2.0"); others use the shortest exact form ("35.5", "1.25").
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Seconds in the largest unit where the value is at least 1, rounded to 1 decimal.
pub fn human_duration(seconds: f64) -> Quantity {
    if seconds < SECONDS_PER_MINUTE {
        Quantity::new(round_to(seconds, 1), "seconds")
    } else if seconds < SECONDS_PER_HOUR {
        Quantity::new(round_to(seconds / SECONDS_PER_MINUTE, 1), "minutes")
    } else {
        Quantity::new(round_to(seconds / SECONDS_PER_HOUR, 1), "hours")
    }
}

/// Bytes divided by 1024 until below 1024 (or PB), rounded to 2 decimals.
pub fn human_bytes(bytes: f64) -> Quantity {
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    Quantity::new(round_to(value, 2), BYTE_UNITS[unit])
}

pub fn to_hours(seconds: f64) -> f64 {
    round_to(seconds / SECONDS_PER_HOUR, 1)
}

pub fn to_terabytes(bytes: f64) -> f64 {
    round_to(bytes / BYTES_PER_TB, 2)
}

impl UnitScheme {
    /// Display form of a raw duration; `None` when absent or zero.
    pub fn duration(self, seconds: Option<f64>) -> Option<Quantity> {
        nonzero(seconds).map(|s| self.duration_from_basis(self.duration_basis(s)))
    }

    /// Display form of a raw byte count; `None` when absent or zero.
    pub fn bytes(self, bytes: Option<f64>) -> Option<Quantity> {
        nonzero(bytes).map(|b| self.bytes_from_basis(self.bytes_basis(b)))
    }

    /// The value duration statistics are computed on.
    pub fn duration_basis(self, seconds: f64) -> f64 {
        match self {
            UnitScheme::Fine => seconds,
            UnitScheme::Coarse => to_hours(seconds),
        }
    }

    pub fn bytes_basis(self, bytes: f64) -> f64 {
        match self {
            UnitScheme::Fine => bytes,
            UnitScheme::Coarse => to_terabytes(bytes),
        }
    }

    /// Present a basis value (raw, or a statistic over raw values).
    pub fn duration_from_basis(self, basis: f64) -> Quantity {
        match self {
            UnitScheme::Fine => human_duration(basis),
            UnitScheme::Coarse => Quantity::new(round_to(basis, 1), "hours"),
        }
    }

    pub fn bytes_from_basis(self, basis: f64) -> Quantity {
        match self {
            UnitScheme::Fine => human_bytes(basis),
            UnitScheme::Coarse => Quantity::new(round_to(basis, 2), "TB"),
        }
    }
}
