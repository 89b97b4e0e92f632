//! File adapters: coordinate lists in, GeoJSON polygons out
//!
//! Input files hold one `longitude,latitude` pair per line. Lines starting
//! with `#` are comments and blank lines are ignored. A `0,0` pair is treated
//! as an unset position and skipped.
//!
//! Output is a single GeoJSON `Polygon` geometry. By default the ring is left
//! open (the first vertex is not repeated); [`WriterOptions::close_ring`]
//! produces a ring that satisfies strict GeoJSON consumers.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{GeoError, Result};
use crate::LonLat;

/// Options for [`write_polygon`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Repeat the first vertex at the end of the ring
    pub close_ring: bool,
    /// Decimal places kept in each coordinate
    pub precision: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            close_ring: false,
            precision: 5,
        }
    }
}

impl WriterOptions {
    pub fn with_close_ring(mut self, close_ring: bool) -> Self {
        self.close_ring = close_ring;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

#[derive(Debug, Serialize)]
struct PolygonGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<Vec<[f64; 2]>>,
}

/// Parses `longitude,latitude` lines
///
/// # Errors
///
/// `Parse` with the 1-based line number for a line that is not two numbers
/// separated by a comma; `Io` if reading fails.
pub fn parse_coordinates<R: BufRead>(reader: R) -> Result<Vec<LonLat>> {
    let mut points = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();

        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let (lon, lat) = text.split_once(',').ok_or_else(|| GeoError::Parse {
            line: index + 1,
            message: format!("expected longitude,latitude but found {:?}", text),
        })?;

        let longitude = parse_value(lon, index + 1, "longitude")?;
        let latitude = parse_value(lat, index + 1, "latitude")?;

        if longitude == 0.0 && latitude == 0.0 {
            continue;
        }

        points.push((longitude, latitude));
    }

    Ok(points)
}

/// Reads a coordinate file, see [`parse_coordinates`]
pub fn read_coordinates<P: AsRef<Path>>(path: P) -> Result<Vec<LonLat>> {
    let file = File::open(path)?;
    parse_coordinates(BufReader::new(file))
}

/// GeoJSON `Polygon` text for `ring`
pub fn polygon_geojson(ring: &[LonLat], options: &WriterOptions) -> Result<String> {
    let geometry = polygon_geometry(ring, options);
    Ok(serde_json::to_string_pretty(&geometry)?)
}

/// Writes `ring` as a GeoJSON `Polygon` to `path`
pub fn write_polygon<P: AsRef<Path>>(
    path: P,
    ring: &[LonLat],
    options: &WriterOptions,
) -> Result<()> {
    let geometry = polygon_geometry(ring, options);

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &geometry)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

fn polygon_geometry(ring: &[LonLat], options: &WriterOptions) -> PolygonGeometry {
    let scale = 10f64.powi(options.precision as i32);
    let round = |v: f64| (v * scale).round() / scale;

    let mut coordinates: Vec<[f64; 2]> = ring
        .iter()
        .map(|&(lon, lat)| [round(lon), round(lat)])
        .collect();

    if options.close_ring {
        if let (Some(&first), Some(&last)) = (coordinates.first(), coordinates.last()) {
            if first != last {
                coordinates.push(first);
            }
        }
    }

    PolygonGeometry {
        kind: "Polygon",
        coordinates: vec![coordinates],
    }
}

fn parse_value(text: &str, line: usize, what: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|e| GeoError::Parse {
        line,
        message: format!("invalid {} {:?}: {}", what, text.trim(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_skips_comments_blanks_and_zero() {
        let input = "# header\n-73.98,40.75\n\n0,0\n  -74.0 , 40.7  \n#2,3\n";
        let points = parse_coordinates(Cursor::new(input)).unwrap();
        assert_eq!(points, vec![(-73.98, 40.75), (-74.0, 40.7)]);
    }

    #[test]
    fn test_parse_keeps_zero_on_one_axis() {
        let points = parse_coordinates(Cursor::new("0,51.5\n-0.1,0\n")).unwrap();
        assert_eq!(points, vec![(0.0, 51.5), (-0.1, 0.0)]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let input = "# comment\n1,2\nnot a pair\n";
        match parse_coordinates(Cursor::new(input)) {
            Err(GeoError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }

        match parse_coordinates(Cursor::new("1,abc\n")) {
            Err(GeoError::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("latitude"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_geojson_open_ring() {
        let ring = [(1.0, 2.0), (3.123456789, 4.0), (5.0, 6.0)];
        let text = polygon_geojson(&ring, &WriterOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["type"], "Polygon");
        let coords = value["coordinates"][0].as_array().unwrap();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[1][0].as_f64().unwrap(), 3.12346);
    }

    #[test]
    fn test_geojson_closed_ring() {
        let ring = [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)];
        let options = WriterOptions::default().with_close_ring(true).with_precision(2);
        let text = polygon_geojson(&ring, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let coords = value["coordinates"][0].as_array().unwrap();
        assert_eq!(coords.len(), 4);
        assert_eq!(coords[0], coords[3]);
    }
}
