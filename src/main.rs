#![warn(non_snake_case)]
//! # Random Walking Splines
//!
//! Headless front end for the random-walk curve generator. It builds the
//! walk parameters from an optional JSON file plus command-line overrides,
//! runs the generate operator against an in-memory scene and prints a short
//! summary. The batch can also be written out as JSON or as a binary point
//! dump.
//!
//! Set `RUST_LOG=debug` to see every curve as it is created.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use random_walking_splines::config::WalkParameters;
use random_walking_splines::document::{export, SceneDocument};
use random_walking_splines::editor::operator::{RandomWalkOperator, DEFAULT_CONTAINER};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON parameter file. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the random stream (0..=999999).
    #[arg(long)]
    seed: Option<u32>,

    /// Number of curves (1..=1024).
    #[arg(long)]
    curves: Option<u32>,

    /// Points per curve (1..=1024).
    #[arg(long)]
    length: Option<u32>,

    /// Minimum per-axis rotation per step, in radians.
    #[arg(long, allow_negative_numbers = true)]
    min_wander: Option<f64>,

    /// Maximum per-axis rotation per step, in radians.
    #[arg(long, allow_negative_numbers = true)]
    max_wander: Option<f64>,

    /// Name of the grouping object.
    #[arg(long, default_value = DEFAULT_CONTAINER)]
    name: String,

    /// Write the batch as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the batch as a binary point dump.
    #[arg(long)]
    points: Option<PathBuf>,
}

impl Args {
    fn walk_parameters(&self) -> Result<WalkParameters, Box<dyn Error>> {
        let mut params = match &self.config {
            Some(path) => WalkParameters::load(path)?,
            None => WalkParameters::default(),
        };
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(curves) = self.curves {
            params.curve_count = curves;
        }
        if let Some(length) = self.length {
            params.path_length = length;
        }
        if let Some(min) = self.min_wander {
            params.min_wander = min;
        }
        if let Some(max) = self.max_wander {
            params.max_wander = max;
        }
        Ok(params)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("Random Walking Splines starting...");

    let args = Args::parse();
    let params = args.walk_parameters()?;

    let mut scene = SceneDocument::new();
    let operator = RandomWalkOperator::new(params).with_container_name(args.name.as_str());
    let (_, result) = operator.execute(&mut scene)?;
    let batch = &result.batch;

    println!(
        "'{}': {} curves, {} points, seed {}",
        args.name,
        batch.len(),
        batch.point_count(),
        batch.seed
    );
    if let Some(bounds) = batch.bounds() {
        let size = bounds.size();
        println!("bounds: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }
    let longest = batch.paths.iter().map(|p| p.length()).fold(0.0, f64::max);
    println!("longest curve: {:.3}", longest);
    println!("checksum: {:016x}", scene.checksum());

    if let Some(path) = &args.json {
        export::save_json(batch, path)?;
        info!("Wrote {}", path.display());
    }
    if let Some(path) = &args.points {
        export::save_points(batch, path)?;
        info!("Wrote {}", path.display());
    }

    info!("Random Walking Splines exiting.");
    Ok(())
}
