//! File adapter tests: coordinate files in, GeoJSON files out

use std::fs;
use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use spheregeo::geojson::{read_coordinates, write_polygon, WriterOptions};
use spheregeo::{buffer_polygon, GeoError};

fn coordinate_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reads_points_from_file() {
    let file = coordinate_file("# lon,lat\n-122.42,37.77\n-122.27,37.80\n\n0,0\n-122.45,37.73\n");
    let points = read_coordinates(file.path()).unwrap();
    assert_eq!(points, vec![(-122.42, 37.77), (-122.27, 37.80), (-122.45, 37.73)]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = read_coordinates(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(GeoError::Io(_))));
}

#[test]
fn malformed_file_names_the_line() {
    let file = coordinate_file("-122.42,37.77\n-122.27;37.80\n");
    match read_coordinates(file.path()) {
        Err(GeoError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn writes_polygon_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ring.geojson");
    let ring = [(-122.423456, 37.771234), (-122.27, 37.8), (-122.45, 37.73)];

    write_polygon(&path, &ring, &WriterOptions::default()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["type"], "Polygon");

    let coords = value["coordinates"][0].as_array().unwrap();
    assert_eq!(coords.len(), 3);
    assert_eq!(coords[0][0].as_f64().unwrap(), -122.42346);
    assert_eq!(coords[0][1].as_f64().unwrap(), 37.77123);
}

#[test]
fn buffer_pipeline_round_trip() {
    let input = coordinate_file("-73.99,40.73\n-73.95,40.78\n-73.97,40.76\n-73.93,40.70\n");
    let dir = tempdir().unwrap();
    let output = dir.path().join("area.geojson");

    let points = read_coordinates(input.path()).unwrap();
    let ring = buffer_polygon(&points, 3.0, 12).unwrap();

    let options = WriterOptions::default().with_close_ring(true);
    write_polygon(&output, &ring, &options).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let coords = value["coordinates"][0].as_array().unwrap();

    assert_eq!(coords.len(), ring.len() + 1);
    assert_eq!(coords.first(), coords.last());
}
