//! Raster decoders.
//!
//! TIFF (including GeoTIFF) and PNG sources are decoded into a [`Raster`]
//! holding every band in its native sample type. The container is picked
//! from the file signature, then from the extension when the signature is not
//! recognised.

mod png;
mod tiff;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{Result, StretchError};
use crate::raster::Raster;

/// Bytes read from the start of a file to identify its container
const SIGNATURE_LEN: u64 = 32;

/// Containers the decoders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Tiff,
    Png,
}

impl InputFormat {
    /// Identify a container from its leading bytes.
    pub fn from_signature(header: &[u8]) -> Option<Self> {
        match infer::get(header)?.mime_type() {
            "image/tiff" => Some(InputFormat::Tiff),
            "image/png" => Some(InputFormat::Png),
            _ => None,
        }
    }

    /// Identify a container from a path's extension (case-insensitive).
    pub fn from_extension(path: &Path) -> std::result::Result<Self, String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| "Unrecognised file signature and no file extension".to_string())?;

        match extension.as_str() {
            "tif" | "tiff" | "gtif" | "gtiff" => Ok(InputFormat::Tiff),
            "png" => Ok(InputFormat::Png),
            _ => Err(format!("Unsupported file format: {}", extension)),
        }
    }
}

/// Decode a raster from a file path.
///
/// Fails with [`StretchError::InputNotFound`] when the path does not exist
/// and [`StretchError::InputUnreadable`] when it cannot be decoded.
pub fn decode_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(StretchError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = detect_format(path).map_err(|reason| StretchError::unreadable(path, reason))?;

    let raster = match format {
        InputFormat::Tiff => tiff::decode_tiff(path),
        InputFormat::Png => png::decode_png(path),
    }
    .map_err(|reason| StretchError::unreadable(path, reason))?;

    debug!(
        "Decoded {} as {:?}: {}x{}, {} band(s) of {}",
        path.display(),
        format,
        raster.width,
        raster.height,
        raster.band_count,
        raster.sample_format.dtype_name()
    );

    Ok(raster)
}

fn detect_format(path: &Path) -> std::result::Result<InputFormat, String> {
    let mut header = Vec::with_capacity(SIGNATURE_LEN as usize);
    File::open(path)
        .and_then(|file| file.take(SIGNATURE_LEN).read_to_end(&mut header))
        .map_err(|e| format!("Failed to read file header: {}", e))?;

    match InputFormat::from_signature(&header) {
        Some(format) => Ok(format),
        None => InputFormat::from_extension(path),
    }
}
