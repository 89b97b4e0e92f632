//! Text formatting of coordinates and distances
//!
//! The formatting preference is an explicit [`CoordinateFormat`] value handed
//! to [`format_coordinate`]; nothing here reads shared state.

use crate::constants::MILE_TO_METERS;

/// How a latitude/longitude pair is rendered as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateFormat {
    /// Unsigned decimal degrees with hemisphere letters, e.g. `48.856600N,2.352200E`
    #[default]
    Decimal,
    /// Signed decimal degrees, 5 decimals when `short`, otherwise 6
    DecimalSigned { short: bool },
    /// Degrees, minutes and seconds to a tenth of a second, e.g. `48°51'23.8"N`
    DegreesMinutesSeconds,
}

/// Unit used by [`distance_string`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

/// Renders `value` with six decimals, then cuts (not rounds) to `precision`
pub fn decimal_string(value: f64, precision: usize) -> String {
    let mut s = format!("{:.6}", value);

    if let Some(dot) = s.find('.') {
        let keep = dot + 1 + precision;
        if s.len() > keep {
            s.truncate(keep);
        }
    }

    s
}

/// Formats a latitude/longitude pair (degrees) according to `format`
pub fn format_coordinate(latitude: f64, longitude: f64, format: CoordinateFormat) -> String {
    match format {
        CoordinateFormat::Decimal => {
            let lat = hemisphere(decimal_string(latitude.abs(), 6), latitude, 'N', 'S');
            let lon = hemisphere(decimal_string(longitude.abs(), 6), longitude, 'E', 'W');
            format!("{},{}", lat, lon)
        }
        CoordinateFormat::DecimalSigned { short } => {
            let precision = if short { 5 } else { 6 };
            format!(
                "{},{}",
                decimal_string(latitude, precision),
                decimal_string(longitude, precision)
            )
        }
        CoordinateFormat::DegreesMinutesSeconds => {
            let lat = hemisphere(dms_string(latitude), latitude, 'N', 'S');
            let lon = hemisphere(dms_string(longitude), longitude, 'E', 'W');
            format!("{},{}", lat, lon)
        }
    }
}

/// Short distance label: two decimals below 0.1, one decimal otherwise
pub fn distance_string(miles: f64, unit: DistanceUnit) -> String {
    let dist = match unit {
        DistanceUnit::Miles => miles,
        DistanceUnit::Kilometers => miles * MILE_TO_METERS * 0.001,
    };

    if dist < 0.1 {
        format!("{:.2}", dist)
    } else {
        format!("{:.1}", dist)
    }
}

fn hemisphere(mut text: String, value: f64, positive: char, negative: char) -> String {
    text.push(if value < 0.0 { negative } else { positive });
    text
}

fn dms_string(value: f64) -> String {
    // Work in tenths of an arcsecond so rounding never produces 60 seconds
    let tenths = (value.abs() * 36_000.0).round() as u64;
    let degrees = tenths / 36_000;
    let minutes = (tenths % 36_000) / 600;
    let seconds = tenths % 600;

    format!("{}°{:02}'{:02}.{}\"", degrees, minutes, seconds / 10, seconds % 10)
}
