//! Conversion pipeline: decode, extract bands, stretch, merge, export.


use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::composite::{merge_channels, CompositeImage};
use crate::decoders::decode_raster;
use crate::error::Result;
use crate::exporters::{export_composite, OutputFormat};
use crate::options::ConvertOptions;
use crate::raster::{Raster, SampleFormat};
use crate::stretch::{stretch_band, StretchedBand};

/// Per-band outcome of the stretch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandReport {
    /// One-based source band
    pub band: usize,
    pub low: f64,
    pub high: f64,
    pub degenerate: bool,
}

impl From<&StretchedBand> for BandReport {
    fn from(band: &StretchedBand) -> Self {
        Self {
            band: band.index,
            low: band.low,
            high: band.high,
            degenerate: band.degenerate,
        }
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    /// Element type of the written image
    pub dtype: String,
    /// Bands in the source, informational only
    pub source_band_count: usize,
    pub source_dtype: String,
    pub bands: Vec<BandReport>,
}

impl ConversionReport {
    /// `(rows, columns, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, self.channels)
    }
}

/// Stretch three bands of an already decoded raster into a composite.
pub fn build_composite(
    raster: &Raster,
    options: &ConvertOptions,
) -> Result<(CompositeImage, [StretchedBand; 3])> {
    options.stretch.validate()?;

    let [first, second, third] = raster.bands(options.bands)?;
    let stretched = [
        stretch_band(&first, &options.stretch, options.degenerate)?,
        stretch_band(&second, &options.stretch, options.degenerate)?,
        stretch_band(&third, &options.stretch, options.degenerate)?,
    ];

    let composite = merge_channels(&stretched, options.channel_layout)?;
    Ok((composite, stretched))
}

/// Convert `input` to an 8-bit three-channel image at `output`.
///
/// The output format and stretch parameters are checked before the input is
/// read, so a bad request never decodes anything or creates a file.
pub fn convert<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<ConversionReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    OutputFormat::from_path(output)?;
    options.stretch.validate()?;

    info!("Reading {}", input.display());
    let raster = decode_raster(input)?;
    info!(
        "Source: {}x{}, {} band(s) of {}; using bands {:?}",
        raster.width,
        raster.height,
        raster.band_count,
        raster.sample_format.dtype_name(),
        options.bands
    );

    let (composite, stretched) = build_composite(&raster, options)?;

    let format = export_composite(&composite, output)?;

    Ok(report(
        output,
        format,
        &composite,
        &stretched,
        raster.band_count,
        raster.sample_format,
    ))
}

fn report(
    output: &Path,
    format: OutputFormat,
    composite: &CompositeImage,
    stretched: &[StretchedBand; 3],
    source_band_count: usize,
    source_format: SampleFormat,
) -> ConversionReport {
    ConversionReport {
        output: output.to_path_buf(),
        format,
        width: composite.width,
        height: composite.height,
        channels: composite.channels(),
        dtype: composite.dtype().to_string(),
        source_band_count,
        source_dtype: source_format.dtype_name().to_string(),
        bands: stretched.iter().map(BandReport::from).collect(),
    }
}
