//! Geostretch Core Library
//!
//! Percentile contrast stretch of multi-band rasters (typically 16-bit
//! GeoTIFFs) into 8-bit three-channel images for quick-look viewing.

pub mod composite;
pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod options;
pub mod pipeline;
pub mod raster;
pub mod stretch;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use composite::{merge_channels, ChannelLayout, CompositeImage};
pub use error::{Result, StretchError};
pub use exporters::OutputFormat;
pub use options::{ConvertOptions, DEFAULT_BANDS, DEFAULT_GAMMA};
pub use pipeline::{convert, ConversionReport};
pub use raster::{Band, Raster, SampleBuffer, SampleFormat, SampleLayout};
pub use stretch::{
    stretch_band, stretch_uint16_to_uint8, DegeneratePolicy, StretchParams, StretchedBand,
};
