//! Metric to imperial conversions.
//!
//! Derived units are rounded to two decimal places, matching what the
//! weather screen displays.

/// Kilometres per hour to miles per hour.
pub const KMH_TO_MPH: f64 = 0.621371;

/// Millimetres to inches.
pub const MM_TO_INCHES: f64 = 0.0393701;

/// Converts Celsius to Fahrenheit (`F = C × 9/5 + 32`).
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round2(celsius * 9.0 / 5.0 + 32.0)
}

/// Converts km/h to mph.
pub fn kmh_to_mph(kmh: f64) -> f64 {
    round2(kmh * KMH_TO_MPH)
}

/// Converts millimetres to inches.
pub fn mm_to_inches(mm: f64) -> f64 {
    round2(mm * MM_TO_INCHES)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
