//! Temperature and duration extraction from condition measurements.
//!
//! Each extractor takes the first measurement whose unit it recognises and
//! converts it to the canonical unit (degrees Celsius, hours), rounded to two
//! decimals. Nothing recognised, or a non-finite value, yields `None`; a
//! missing measurement is never reported as zero.

use rxn_model::ConditionMeasurement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    fn parse(unit: &str) -> Option<Self> {
        let normalized = unit.trim().trim_start_matches('°').to_lowercase();
        match normalized.as_str() {
            "c" | "celsius" | "degc" => Some(Self::Celsius),
            "f" | "fahrenheit" | "degf" => Some(Self::Fahrenheit),
            "k" | "kelvin" => Some(Self::Kelvin),
            _ => None,
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    fn parse(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(Self::Second),
            "min" | "mins" | "minute" | "minutes" => Some(Self::Minute),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hour),
            "d" | "day" | "days" => Some(Self::Day),
            "week" | "weeks" | "wk" => Some(Self::Week),
            _ => None,
        }
    }

    fn hours(self) -> f64 {
        match self {
            Self::Second => 1.0 / 3600.0,
            Self::Minute => 1.0 / 60.0,
            Self::Hour => 1.0,
            Self::Day => 24.0,
            Self::Week => 168.0,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Reaction temperature in degrees Celsius.
pub fn temperature_celsius(conditions: &[ConditionMeasurement]) -> Option<f64> {
    let (unit, value) = conditions.iter().find_map(|measurement| {
        TemperatureUnit::parse(&measurement.unit).map(|unit| (unit, measurement.value))
    })?;
    finite(unit.to_celsius(value)).map(round2)
}

/// Reaction duration in hours.
pub fn duration_hours(conditions: &[ConditionMeasurement]) -> Option<f64> {
    let (unit, value) = conditions.iter().find_map(|measurement| {
        TimeUnit::parse(&measurement.unit).map(|unit| (unit, measurement.value))
    })?;
    finite(value * unit.hours()).map(round2)
}
