//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser};
use geostretch_core::{ChannelLayout, DegeneratePolicy};

use crate::parsers::{parse_band_indices, parse_gamma, parse_percent};

#[derive(Parser, Debug)]
#[command(name = "geostretch")]
#[command(version, about = "Convert 16-bit GeoTIFF to 8-bit RGB TIFF", long_about = None)]
pub struct Cli {
    /// Input 16-bit GeoTIFF
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output filename for 8-bit TIFF (.tif, .tiff or .png)
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub stretch: StretchArgs,

    /// Config file (default: search geostretch.yml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the conversion report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Stretch overrides. Anything left unset falls back to the config file,
/// then to the built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct StretchArgs {
    /// Lower percentile mapped to black (default: 2)
    #[arg(long, value_name = "PERCENT", value_parser = parse_percent)]
    pub lower_percent: Option<f64>,

    /// Upper percentile mapped to white (default: 98)
    #[arg(long, value_name = "PERCENT", value_parser = parse_percent)]
    pub upper_percent: Option<f64>,

    /// Gamma; values above 1 brighten midtones (default: 1.2)
    #[arg(long, value_name = "FLOAT", value_parser = parse_gamma)]
    pub gamma: Option<f64>,

    /// One-based source bands for channels 0,1,2 (default: 1,2,3)
    #[arg(long, value_name = "I,J,K", value_parser = parse_band_indices)]
    pub bands: Option<[usize; 3]>,

    /// Output for bands without contrast: threshold, black or mid-gray
    #[arg(long, value_name = "POLICY")]
    pub degenerate: Option<DegeneratePolicy>,

    /// Channel order of the composite: bgr (band 1 is blue) or rgb
    #[arg(long, value_name = "LAYOUT")]
    pub channel_layout: Option<ChannelLayout>,
}
