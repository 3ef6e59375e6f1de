//! In-memory raster and band types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StretchError};

/// Sample type of the source raster, kept for diagnostics and to pick the
/// percentile strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F16,
    F32,
    F64,
}

impl SampleFormat {
    /// numpy-style dtype name (`uint16`, `float32`, ...)
    pub fn dtype_name(self) -> &'static str {
        match self {
            SampleFormat::U8 => "uint8",
            SampleFormat::U16 => "uint16",
            SampleFormat::U32 => "uint32",
            SampleFormat::U64 => "uint64",
            SampleFormat::I8 => "int8",
            SampleFormat::I16 => "int16",
            SampleFormat::I32 => "int32",
            SampleFormat::I64 => "int64",
            SampleFormat::F16 => "float16",
            SampleFormat::F32 => "float32",
            SampleFormat::F64 => "float64",
        }
    }

    /// True for unsigned integer formats of at most 16 bits, whose values can
    /// index a 65536-bucket histogram directly.
    pub fn fits_u16_histogram(self) -> bool {
        matches!(self, SampleFormat::U8 | SampleFormat::U16)
    }
}

/// Decoded samples in the source's own numeric type.
///
/// `float16` sources are stored as `F32`; [`SampleFormat`] still reports the
/// original type.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Run `$body` with `$samples` bound to the inner `Vec` of any variant.
macro_rules! with_samples {
    ($buffer:expr, $samples:ident => $body:expr) => {
        match $buffer {
            SampleBuffer::U8($samples) => $body,
            SampleBuffer::U16($samples) => $body,
            SampleBuffer::U32($samples) => $body,
            SampleBuffer::U64($samples) => $body,
            SampleBuffer::I8($samples) => $body,
            SampleBuffer::I16($samples) => $body,
            SampleBuffer::I32($samples) => $body,
            SampleBuffer::I64($samples) => $body,
            SampleBuffer::F32($samples) => $body,
            SampleBuffer::F64($samples) => $body,
        }
    };
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        with_samples!(self, samples => samples.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen `count` samples to `f64`, starting at `start` and taking every
    /// `step`-th one.
    fn widen(&self, start: usize, step: usize, count: usize) -> Vec<f64> {
        with_samples!(self, samples => samples
            .iter()
            .skip(start)
            .step_by(step)
            .take(count)
            .map(|&v| v as f64)
            .collect())
    }
}

/// How bands are arranged in a [`SampleBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleLayout {
    /// Band varies fastest: `p0b0 p0b1 p0b2 p1b0 ...`
    #[default]
    Interleaved,

    /// One full plane per band: `b0p0 b0p1 ... b1p0 ...`
    Planar,
}

/// A decoded multi-band raster.
///
/// Samples stay in their native type; only the bands asked for are widened
/// to `f64`, one at a time.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub band_count: usize,
    pub sample_format: SampleFormat,
    pub layout: SampleLayout,
    pub samples: SampleBuffer,
}

impl Raster {
    /// Checks that `samples` holds exactly `width * height * band_count` values.
    pub fn new(
        width: u32,
        height: u32,
        band_count: usize,
        sample_format: SampleFormat,
        layout: SampleLayout,
        samples: SampleBuffer,
    ) -> std::result::Result<Self, String> {
        if band_count == 0 {
            return Err("Raster has no bands".to_string());
        }

        let expected_len = width as usize * height as usize * band_count;
        if samples.len() != expected_len {
            return Err(format!(
                "Sample buffer size mismatch: expected {}, got {}",
                expected_len,
                samples.len()
            ));
        }

        Ok(Self {
            width,
            height,
            band_count,
            sample_format,
            layout,
            samples,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Copy one band out of the raster as `f64`. `index` is one-based.
    pub fn band(&self, index: usize) -> Result<Band> {
        if index == 0 || index > self.band_count {
            return Err(StretchError::BandOutOfRange {
                band: index,
                available: self.band_count,
            });
        }

        let pixels = self.pixel_count();
        let offset = index - 1;
        let data = match self.layout {
            SampleLayout::Interleaved => self.samples.widen(offset, self.band_count, pixels),
            SampleLayout::Planar => self.samples.widen(offset * pixels, 1, pixels),
        };

        Ok(Band {
            index,
            width: self.width,
            height: self.height,
            sample_format: self.sample_format,
            data,
        })
    }

    /// Extract three bands in the given order.
    pub fn bands(&self, indices: [usize; 3]) -> Result<[Band; 3]> {
        Ok([
            self.band(indices[0])?,
            self.band(indices[1])?,
            self.band(indices[2])?,
        ])
    }
}

/// One band of a raster, row-major.
#[derive(Debug, Clone)]
pub struct Band {
    /// One-based index in the source raster
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub sample_format: SampleFormat,
    pub data: Vec<f64>,
}

impl Band {
    pub fn new(width: u32, height: u32, sample_format: SampleFormat, data: Vec<f64>) -> Self {
        Self {
            index: 1,
            width,
            height,
            sample_format,
            data,
        }
    }

    /// Build a band from 16-bit samples.
    pub fn from_u16(width: u32, height: u32, samples: &[u16]) -> Self {
        Self::new(
            width,
            height,
            SampleFormat::U16,
            samples.iter().map(|&v| v as f64).collect(),
        )
    }
}
