//! Query point batches from CSV.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use geo::Point;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load query points from a CSV file with `lon` and `lat` header columns
pub fn load_points(path: &Path) -> Result<Vec<Point<f64>>> {
    info!("Loading points from {}", path.display());

    let file = File::open(path).context("Failed to open points file")?;
    let points = read_points(file)?;

    info!("Loaded {} points", points.len());
    Ok(points)
}

/// Read query points from CSV. Columns are located by header name, in any order.
pub fn read_points<R: Read>(reader: R) -> Result<Vec<Point<f64>>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();

    // Find column indices
    let lon_idx = headers
        .iter()
        .position(|h| h == "lon")
        .context("Column 'lon' not found")?;
    let lat_idx = headers
        .iter()
        .position(|h| h == "lat")
        .context("Column 'lat' not found")?;

    let mut points = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("Invalid CSV on row {}", row + 1))?;
        let lon: f64 = record
            .get(lon_idx)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("Invalid lon on row {}", row + 1))?;
        let lat: f64 = record
            .get(lat_idx)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("Invalid lat on row {}", row + 1))?;
        points.push(Point::new(lon, lat));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;
    use std::io::Write;

    #[test]
    fn test_load_points_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "lon,lat\n-46.57421,-21.785741\n 1.5 , 2\n").unwrap();

        let points = load_points(file.path()).unwrap();
        assert_eq!(
            points,
            vec![
                point! { x: -46.57421, y: -21.785741 },
                point! { x: 1.5, y: 2.0 },
            ]
        );
    }

    #[test]
    fn test_columns_found_by_header_name() {
        let csv = "name,lat,lon\nshop,10,20\nbar,-1,-2\n";
        let points = read_points(csv.as_bytes()).unwrap();
        assert_eq!(
            points,
            vec![point! { x: 20.0, y: 10.0 }, point! { x: -2.0, y: -1.0 }]
        );
    }

    #[test]
    fn test_header_only_yields_no_points() {
        assert!(read_points("lon,lat\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_column() {
        let err = read_points("lon,latitude\n1,2\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Column 'lat' not found"));

        let err = read_points("x,lat\n1,2\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Column 'lon' not found"));
    }

    #[test]
    fn test_unparsable_row_names_the_row() {
        let err = read_points("lon,lat\n1,2\nabc,3\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid lon on row 2");

        let err = read_points("lon,lat\n1,\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid lat on row 1");
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        assert!(read_points("lon,lat\n1,2,3\n".as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_points(Path::new("/definitely/not/here/points.csv")).is_err());
    }
}
