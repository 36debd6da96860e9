//! Offline coverage checks against a seed file.
//!
//! Loads partners from `pdvs.json` and reports whether points fall in a
//! partner's coverage area, either for a single point or for a CSV batch.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use geo::Point;
use rayon::prelude::*;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pdvs::coverage::{contains, normalize};
use pdvs::points::load_points;
use pdvs::seed::load_partners;

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Check points against a partner's coverage area")]
struct Args {
    /// Seed file with partner documents
    #[arg(short, long)]
    seed: PathBuf,

    /// Partner id
    #[arg(short, long)]
    partner: String,

    /// Point longitude
    #[arg(long, requires = "lat", conflicts_with = "points", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Point latitude
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// CSV file with `lon` and `lat` columns
    #[arg(long)]
    points: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let points = match (&args.points, args.lon, args.lat) {
        (Some(path), _, _) => load_points(path)?,
        (None, Some(lon), Some(lat)) => vec![Point::new(lon, lat)],
        _ => bail!("Either --lon/--lat or --points is required"),
    };

    let (partners, _) = load_partners(&args.seed)?;
    let partner = partners
        .into_iter()
        .find(|p| p.id == args.partner)
        .with_context(|| format!("Partner {} not found in seed file", args.partner))?;

    let geometry = normalize(&partner.coverage_area)
        .with_context(|| format!("Partner {} has unusable coverage", partner.id))?;

    info!(
        "Checking {} point(s) against '{}' ({}, {} polygon(s))",
        points.len(),
        partner.trading_name,
        geometry.type_name(),
        geometry.polygon_count()
    );

    let results: Vec<bool> = points.par_iter().map(|p| contains(&geometry, *p)).collect();

    for (point, inside) in points.iter().zip(&results) {
        println!("{},{},{}", point.x(), point.y(), inside);
    }

    info!(
        "{} of {} point(s) covered",
        results.iter().filter(|inside| **inside).count(),
        results.len()
    );

    Ok(())
}
