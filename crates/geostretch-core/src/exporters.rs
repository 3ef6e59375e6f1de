//! Image exporters for the 8-bit composite.
//!
//! The container is chosen from the output extension. Samples are written in
//! RGB order; a BGR composite is swapped on the way out. No georeferencing or
//! other source metadata is written.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::composite::CompositeImage;
use crate::error::{Result, StretchError};

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Uncompressed 8-bit RGB TIFF
    Tiff,

    /// 8-bit RGB PNG
    Png,
}

impl OutputFormat {
    /// Resolve the format from a path's extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                StretchError::UnsupportedOutput(format!(
                    "{} has no file extension (expected .tif, .tiff or .png)",
                    path.display()
                ))
            })?;

        match extension.as_str() {
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            "png" => Ok(OutputFormat::Png),
            other => Err(StretchError::UnsupportedOutput(format!(
                ".{} (expected .tif, .tiff or .png)",
                other
            ))),
        }
    }
}

/// Write a composite to `path` in the format implied by its extension.
pub fn export_composite<P: AsRef<Path>>(image: &CompositeImage, path: P) -> Result<OutputFormat> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;

    match format {
        OutputFormat::Tiff => export_tiff8(image, path)?,
        OutputFormat::Png => export_png8(image, path)?,
    }

    info!(
        "Wrote {}x{} {:?} composite to {}",
        image.width,
        image.height,
        format,
        path.display()
    );
    Ok(format)
}

/// Export as 8-bit RGB TIFF
pub fn export_tiff8<P: AsRef<Path>>(image: &CompositeImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| StretchError::write(path, format!("Failed to create TIFF file: {}", e)))?;

    let mut encoder = tiff::encoder::TiffEncoder::new(BufWriter::new(file))
        .map_err(|e| StretchError::write(path, format!("Failed to create TIFF encoder: {}", e)))?;

    encoder
        .write_image::<tiff::encoder::colortype::RGB8>(image.width, image.height, &image.to_rgb())
        .map_err(|e| StretchError::write(path, format!("Failed to write TIFF image: {}", e)))
}

/// Export as 8-bit RGB PNG
pub fn export_png8<P: AsRef<Path>>(image: &CompositeImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| StretchError::write(path, format!("Failed to create PNG file: {}", e)))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| StretchError::write(path, format!("Failed to write PNG header: {}", e)))?;
    writer
        .write_image_data(&image.to_rgb())
        .map_err(|e| StretchError::write(path, format!("Failed to write PNG image: {}", e)))?;
    writer
        .finish()
        .map_err(|e| StretchError::write(path, format!("Failed to finish PNG: {}", e)))
}
