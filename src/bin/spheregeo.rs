//! Spheregeo command line tool
//!
//! Reads `longitude,latitude` points from a file and writes a GeoJSON polygon
//! that can be dropped into any GeoJSON viewer.
//!
//! Usage:
//!   spheregeo area input.csv 12 50       # buffer polygon, 12 vertices per point, 50 km
//!   spheregeo mincircle input.csv 12     # minimum enclosing circle as a 12-gon
//!   spheregeo eqdist input.csv 12        # circle through the first three points
//!
//! Logging goes through `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::info;

use spheregeo::constants::kilometers_to_miles;
use spheregeo::geojson::{read_coordinates, write_polygon, WriterOptions};
use spheregeo::{
    buffer_polygon, equidistant_point, minimum_enclosing_circle, polygon_around_coordinate,
    GeoCoordinate, GeoError, LonLat,
};

/// Type alias for the error type used throughout this binary
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Buffer polygons and enclosing circles for longitude/latitude point sets",
    long_about = None
)]
struct Cli {
    /// Output GeoJSON file (defaults to a name per command)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Repeat the first vertex at the end of the ring
    #[arg(long, global = true)]
    close_ring: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Polygon covering all points and the area within a radius around them
    Area {
        /// CSV file with longitude,latitude on each line
        input: PathBuf,
        /// Vertices generated around each point (at least 3)
        vertices: usize,
        /// Buffer distance in kilometers
        radius_km: f64,
    },
    /// Smallest circle containing every point
    Mincircle {
        /// CSV file with longitude,latitude on each line
        input: PathBuf,
        /// Vertices of the output polygon (at least 3)
        vertices: usize,
    },
    /// Circle centred on the point equidistant from the first three points
    Eqdist {
        /// CSV file with longitude,latitude on each line
        input: PathBuf,
        /// Vertices of the output polygon (at least 3)
        vertices: usize,
    },
}

fn check_vertices(vertices: usize) -> Result<()> {
    if vertices < 3 {
        return Err(Box::new(GeoError::InvalidArgument(format!(
            "invalid vertex count {}, must be an integer greater than 2",
            vertices
        ))));
    }
    Ok(())
}

fn load(input: &Path) -> Result<Vec<LonLat>> {
    let points = read_coordinates(input)?;
    println!("Input: {} coordinates", points.len());

    if points.is_empty() {
        return Err(Box::new(GeoError::InsufficientPoints {
            required: 1,
            found: 0,
        }));
    }
    Ok(points)
}

fn run_area(input: &Path, vertices: usize, radius_km: f64) -> Result<Vec<LonLat>> {
    check_vertices(vertices)?;
    if radius_km <= 0.0 {
        return Err(Box::new(GeoError::InvalidArgument(format!(
            "invalid radius {} km",
            radius_km
        ))));
    }

    let points = load(input)?;
    let radius_miles = kilometers_to_miles(radius_km);

    let start = Instant::now();
    let ring = if points.len() == 1 {
        polygon_around_coordinate(points[0], radius_miles, vertices)?
    } else {
        buffer_polygon(&points, radius_miles, vertices)?
    };
    info!("area completed in {} ms", start.elapsed().as_millis());

    Ok(ring)
}

fn run_mincircle(input: &Path, vertices: usize) -> Result<Vec<LonLat>> {
    check_vertices(vertices)?;
    let points = load(input)?;

    let start = Instant::now();
    let circle = minimum_enclosing_circle(&points)?;
    println!(
        "MinCircle ({}) Radius: {:.6} miles",
        circle.center.to_decimal_signed(false),
        circle.radius_miles
    );

    let ring =
        polygon_around_coordinate(circle.center.to_lon_lat(), circle.radius_miles, vertices)?;
    info!("mincircle completed in {} ms", start.elapsed().as_millis());

    Ok(ring)
}

fn run_eqdist(input: &Path, vertices: usize) -> Result<Vec<LonLat>> {
    check_vertices(vertices)?;
    let points = read_coordinates(input)?;

    if points.len() < 3 {
        return Err(Box::new(GeoError::InsufficientPoints {
            required: 3,
            found: points.len(),
        }));
    }

    let start = Instant::now();
    let center = equidistant_point(points[0], points[1], points[2])?;
    info!("eqdist completed in {} ms", start.elapsed().as_millis());

    let center_coord = GeoCoordinate::from_lon_lat(center);
    let distances: Vec<f64> = points[..3]
        .iter()
        .map(|&p| center_coord.air_distance(&GeoCoordinate::from_lon_lat(p)))
        .collect();

    println!("EQD {}", center_coord.to_decimal_signed(false));
    println!("{:.6} {:.6} {:.6}", distances[0], distances[1], distances[2]);

    Ok(polygon_around_coordinate(center, distances[0], vertices)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (ring, default_output) = match &cli.command {
        Command::Area {
            input,
            vertices,
            radius_km,
        } => (run_area(input, *vertices, *radius_km)?, "area.geojson"),
        Command::Mincircle { input, vertices } => {
            (run_mincircle(input, *vertices)?, "mincircle.geojson")
        }
        Command::Eqdist { input, vertices } => (run_eqdist(input, *vertices)?, "circle.geojson"),
    };

    let output = cli.output.clone().unwrap_or_else(|| PathBuf::from(default_output));
    let options = WriterOptions::default().with_close_ring(cli.close_ring);

    write_polygon(&output, &ring, &options)?;
    println!(
        "Successfully created {} with {} coordinates",
        output.display(),
        ring.len()
    );

    Ok(())
}
