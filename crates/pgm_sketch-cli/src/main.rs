//! converter - Convert PGM images to sketch files and back
//!
//! `converter image.pgm` writes `image.sk`, `converter image.sk` writes
//! `image.pgm`. Without an argument the built-in self-test runs.

mod selftest;

use clap::Parser;
use log::{info, warn};
use pgm_sketch::{convert, sketch_decode, Direction, Geometry, Raster};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "converter")]
#[command(version)]
#[command(about = "Convert 200x200 PGM images to sketch files and back", long_about = None)]
struct Cli {
    /// Input file: .pgm is encoded, .sk is decoded (runs the self-test when omitted)
    input: Option<PathBuf>,

    /// Output file (default: input with the extension swapped)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also save the decoded image as PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// After encoding, decode the sketch again and check it reproduces the input
    #[arg(long)]
    verify: bool,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(input) = cli.input.as_deref() else {
        return if selftest::run() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    };

    match run(&cli, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, input: &Path) -> Result<(), Box<dyn Error>> {
    let direction = Direction::from_path(input)?;
    let geometry = Geometry::default();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| direction.output_path(input));

    let data =
        fs::read(input).map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;
    info!("{:?} '{}' ({} bytes)", direction, input.display(), data.len());

    let bytes = convert(direction, &data, geometry)?;

    if cli.verify {
        match direction {
            Direction::Encode => verify(&data, &bytes, geometry)?,
            Direction::Decode => warn!("--verify only applies when encoding"),
        }
    }

    fs::write(&output, &bytes)
        .map_err(|e| format!("Failed to write '{}': {}", output.display(), e))?;
    println!("File {} has been written.", output.display());

    if let Some(png) = &cli.png {
        let sketch = match direction {
            Direction::Encode => &bytes,
            Direction::Decode => &data,
        };
        save_png(sketch_decode(sketch, geometry)?, png)?;
        println!("File {} has been written.", png.display());
    }

    Ok(())
}

/// Decodes the freshly written sketch and checks it against the input raster.
fn verify(pgm: &[u8], sketch: &[u8], geometry: Geometry) -> Result<(), Box<dyn Error>> {
    let expected = Raster::from_pgm(pgm, geometry)?;
    let decoded = sketch_decode(sketch, geometry)?;
    if decoded != expected {
        return Err("verification failed: decoded sketch differs from input".into());
    }
    info!("verified {} samples", decoded.pixels().len());
    Ok(())
}

fn save_png(raster: Raster, path: &Path) -> Result<(), Box<dyn Error>> {
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    let img = image::GrayImage::from_raw(width, height, raster.into_pixels())
        .ok_or("Failed to create image from decoded data")?;
    img.save(path)?;
    Ok(())
}
