//! Three-channel composite built from stretched bands.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StretchError};
use crate::stretch::StretchedBand;

/// Number of channels in every composite
pub const COMPOSITE_CHANNELS: usize = 3;

/// How the writer interprets the composite's channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelLayout {
    /// channel0 is blue, channel2 is red
    #[default]
    Bgr,

    /// channel0 is red, channel2 is blue
    Rgb,
}

impl std::str::FromStr for ChannelLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bgr" => Ok(ChannelLayout::Bgr),
            "rgb" => Ok(ChannelLayout::Rgb),
            _ => Err(format!(
                "Unknown channel layout '{}' (expected bgr or rgb)",
                s
            )),
        }
    }
}

/// Interleaved 8-bit image, channels in band read order.
#[derive(Debug, Clone)]
pub struct CompositeImage {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub data: Vec<u8>,
}

impl CompositeImage {
    pub fn channels(&self) -> usize {
        COMPOSITE_CHANNELS
    }

    /// `(rows, columns, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, COMPOSITE_CHANNELS)
    }

    pub fn dtype(&self) -> &'static str {
        "uint8"
    }

    /// Samples in red, green, blue order regardless of layout.
    pub fn to_rgb(&self) -> Vec<u8> {
        match self.layout {
            ChannelLayout::Rgb => self.data.clone(),
            ChannelLayout::Bgr => self
                .data
                .chunks_exact(COMPOSITE_CHANNELS)
                .flat_map(|bgr| [bgr[2], bgr[1], bgr[0]])
                .collect(),
        }
    }
}

/// Interleave three stretched bands. Channel `i` is `bands[i]`; no reordering
/// happens here.
pub fn merge_channels(bands: &[StretchedBand; 3], layout: ChannelLayout) -> Result<CompositeImage> {
    let (width, height) = (bands[0].width, bands[0].height);
    for band in &bands[1..] {
        if band.width != width || band.height != height {
            return Err(StretchError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                width: band.width,
                height: band.height,
            });
        }
    }

    let pixels = width as usize * height as usize;
    let mut data = Vec::with_capacity(pixels * COMPOSITE_CHANNELS);
    for ((a, b), c) in bands[0]
        .data
        .iter()
        .zip(&bands[1].data)
        .zip(&bands[2].data)
    {
        data.extend_from_slice(&[*a, *b, *c]);
    }

    Ok(CompositeImage {
        width,
        height,
        layout,
        data,
    })
}
