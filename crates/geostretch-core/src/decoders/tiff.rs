//! TIFF / GeoTIFF decoder
//!
//! Chunky images are read in one call. Planar images (`PlanarConfiguration
//! = 2`) store every band as its own run of strips or tiles; those are read
//! chunk by chunk and assembled plane by plane.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;

use crate::raster::{Raster, SampleBuffer, SampleFormat, SampleLayout};

/// `PlanarConfiguration` value for band-sequential storage
const PLANAR_SEPARATE: u16 = 2;

type TiffDecoder = Decoder<BufReader<File>>;

/// Decode the first image directory of a TIFF file, keeping every sample of
/// every pixel as a band.
pub(crate) fn decode_tiff<P: AsRef<Path>>(path: P) -> Result<Raster, String> {
    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open TIFF file: {}", e))?;

    // Multispectral scenes are large; allow up to 1GB per buffer
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| format!("Failed to create TIFF decoder: {}", e))?
        .with_limits(limits);

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| format!("Failed to get TIFF dimensions: {}", e))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| format!("Failed to get TIFF color type: {}", e))?;
    if matches!(
        color_type,
        tiff::ColorType::Palette(_) | tiff::ColorType::YCbCr(_)
    ) {
        return Err(format!("Unsupported TIFF color type: {:?}", color_type));
    }

    let band_count = decoder
        .find_tag_unsigned::<u16>(Tag::SamplesPerPixel)
        .map_err(|e| format!("Failed to read SamplesPerPixel: {}", e))?
        .unwrap_or(1) as usize;

    let planar = decoder
        .find_tag_unsigned::<u16>(Tag::PlanarConfiguration)
        .map_err(|e| format!("Failed to read PlanarConfiguration: {}", e))?
        .unwrap_or(1)
        == PLANAR_SEPARATE;

    let (samples, sample_format, layout) = if planar && band_count > 1 {
        let grid = chunk_grid(&mut decoder, width, height)?;
        let (samples, sample_format) = read_planar(&mut decoder, &grid, band_count)?;
        (samples, sample_format, SampleLayout::Planar)
    } else {
        let image_data = decoder
            .read_image()
            .map_err(|e| format!("Failed to read TIFF image data: {}", e))?;
        let (samples, sample_format) = into_samples(image_data);
        (samples, sample_format, SampleLayout::Interleaved)
    };

    Raster::new(width, height, band_count, sample_format, layout, samples)
}

fn into_samples(result: DecodingResult) -> (SampleBuffer, SampleFormat) {
    match result {
        DecodingResult::U8(buf) => (SampleBuffer::U8(buf), SampleFormat::U8),
        DecodingResult::U16(buf) => (SampleBuffer::U16(buf), SampleFormat::U16),
        DecodingResult::U32(buf) => (SampleBuffer::U32(buf), SampleFormat::U32),
        DecodingResult::U64(buf) => (SampleBuffer::U64(buf), SampleFormat::U64),
        DecodingResult::I8(buf) => (SampleBuffer::I8(buf), SampleFormat::I8),
        DecodingResult::I16(buf) => (SampleBuffer::I16(buf), SampleFormat::I16),
        DecodingResult::I32(buf) => (SampleBuffer::I32(buf), SampleFormat::I32),
        DecodingResult::I64(buf) => (SampleBuffer::I64(buf), SampleFormat::I64),
        DecodingResult::F16(buf) => (
            SampleBuffer::F32(buf.iter().map(|v| v.to_f32()).collect()),
            SampleFormat::F16,
        ),
        DecodingResult::F32(buf) => (SampleBuffer::F32(buf), SampleFormat::F32),
        DecodingResult::F64(buf) => (SampleBuffer::F64(buf), SampleFormat::F64),
    }
}

/// Strip or tile geometry of one plane, from the image's tags.
fn chunk_grid(decoder: &mut TiffDecoder, width: u32, height: u32) -> Result<ChunkGrid, String> {
    let tile_width = decoder
        .find_tag_unsigned::<u32>(Tag::TileWidth)
        .map_err(|e| format!("Failed to read TileWidth: {}", e))?;

    match tile_width {
        Some(tile_width) => {
            let tile_length = decoder
                .find_tag_unsigned::<u32>(Tag::TileLength)
                .map_err(|e| format!("Failed to read TileLength: {}", e))?
                .ok_or_else(|| "Tiled TIFF without TileLength".to_string())?;
            ChunkGrid::new(width, height, tile_width, tile_length)
        }
        None => {
            let rows_per_strip = decoder
                .find_tag_unsigned::<u32>(Tag::RowsPerStrip)
                .map_err(|e| format!("Failed to read RowsPerStrip: {}", e))?
                .unwrap_or(height)
                .min(height);
            ChunkGrid::new(width, height, width, rows_per_strip)
        }
    }
}

/// Read every plane of a planar image. The first chunk fixes the sample type;
/// every later chunk must match it.
fn read_planar(
    decoder: &mut TiffDecoder,
    grid: &ChunkGrid,
    band_count: usize,
) -> Result<(SampleBuffer, SampleFormat), String> {
    if grid.width == 0 || grid.height == 0 {
        return Err("TIFF image has zero size".to_string());
    }

    let first = decoder
        .read_chunk(0)
        .map_err(|e| format!("Failed to read TIFF chunk 0: {}", e))?;

    macro_rules! planes {
        ($variant:ident, $first:expr) => {
            read_planes(decoder, grid, band_count, $first, |chunk| match chunk {
                DecodingResult::$variant(buf) => Some(buf),
                _ => None,
            })?
        };
    }

    Ok(match first {
        DecodingResult::U8(buf) => (SampleBuffer::U8(planes!(U8, buf)), SampleFormat::U8),
        DecodingResult::U16(buf) => (SampleBuffer::U16(planes!(U16, buf)), SampleFormat::U16),
        DecodingResult::U32(buf) => (SampleBuffer::U32(planes!(U32, buf)), SampleFormat::U32),
        DecodingResult::U64(buf) => (SampleBuffer::U64(planes!(U64, buf)), SampleFormat::U64),
        DecodingResult::I8(buf) => (SampleBuffer::I8(planes!(I8, buf)), SampleFormat::I8),
        DecodingResult::I16(buf) => (SampleBuffer::I16(planes!(I16, buf)), SampleFormat::I16),
        DecodingResult::I32(buf) => (SampleBuffer::I32(planes!(I32, buf)), SampleFormat::I32),
        DecodingResult::I64(buf) => (SampleBuffer::I64(planes!(I64, buf)), SampleFormat::I64),
        DecodingResult::F16(buf) => {
            let samples = planes!(F16, buf);
            (
                SampleBuffer::F32(samples.iter().map(|v| v.to_f32()).collect()),
                SampleFormat::F16,
            )
        }
        DecodingResult::F32(buf) => (SampleBuffer::F32(planes!(F32, buf)), SampleFormat::F32),
        DecodingResult::F64(buf) => (SampleBuffer::F64(planes!(F64, buf)), SampleFormat::F64),
    })
}

/// Chunks are numbered plane by plane: chunk `i` of band `b` is
/// `b * chunks_per_plane + i`. `first` is chunk 0, already read.
fn read_planes<T, F>(
    decoder: &mut TiffDecoder,
    grid: &ChunkGrid,
    band_count: usize,
    first: Vec<T>,
    unwrap: F,
) -> Result<Vec<T>, String>
where
    T: Copy + Default,
    F: Fn(DecodingResult) -> Option<Vec<T>>,
{
    let pixels = grid.width * grid.height;
    let per_plane = grid.chunks_per_plane();
    let mut samples = vec![T::default(); pixels * band_count];
    let mut first = Some(first);

    for (band, plane) in samples.chunks_exact_mut(pixels).enumerate() {
        for index in 0..per_plane {
            let chunk_index = band * per_plane + index;
            let chunk = match first.take() {
                Some(chunk) => chunk,
                None => {
                    let result = decoder
                        .read_chunk(chunk_index as u32)
                        .map_err(|e| format!("Failed to read TIFF chunk {}: {}", chunk_index, e))?;
                    unwrap(result).ok_or_else(|| {
                        format!("TIFF chunk {} has a different sample type", chunk_index)
                    })?
                }
            };
            grid.place(index, &chunk, plane)?;
        }
    }

    Ok(samples)
}

/// Layout of the strips or tiles covering one plane. Strips are chunks as
/// wide as the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ChunkGrid {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) chunk_width: usize,
    pub(super) chunk_height: usize,
}

impl ChunkGrid {
    pub(super) fn new(
        width: u32,
        height: u32,
        chunk_width: u32,
        chunk_height: u32,
    ) -> Result<Self, String> {
        if chunk_width == 0 || chunk_height == 0 {
            return Err(format!(
                "Invalid TIFF chunk size {}x{}",
                chunk_width, chunk_height
            ));
        }
        Ok(Self {
            width: width as usize,
            height: height as usize,
            chunk_width: chunk_width as usize,
            chunk_height: chunk_height as usize,
        })
    }

    fn chunks_across(&self) -> usize {
        self.width.div_ceil(self.chunk_width)
    }

    pub(super) fn chunks_per_plane(&self) -> usize {
        self.chunks_across() * self.height.div_ceil(self.chunk_height)
    }

    /// Copy chunk `index` of a plane into `plane` (`width * height` samples).
    ///
    /// Chunks on the right or bottom edge may arrive cropped to the image or
    /// padded to the full chunk size; both are accepted.
    pub(super) fn place<T: Copy>(
        &self,
        index: usize,
        chunk: &[T],
        plane: &mut [T],
    ) -> Result<(), String> {
        let across = self.chunks_across();
        let x0 = (index % across) * self.chunk_width;
        let y0 = (index / across) * self.chunk_height;
        if y0 >= self.height {
            return Err(format!("TIFF chunk {} lies outside the image", index));
        }

        let columns = self.chunk_width.min(self.width - x0);
        let rows = self.chunk_height.min(self.height - y0);
        let stride = if chunk.len() == columns * rows {
            columns
        } else if chunk.len() >= self.chunk_width * (rows - 1) + columns {
            self.chunk_width
        } else {
            return Err(format!(
                "TIFF chunk {} holds {} samples, expected {}",
                index,
                chunk.len(),
                columns * rows
            ));
        };

        for row in 0..rows {
            let src = row * stride;
            let dst = (y0 + row) * self.width + x0;
            plane[dst..dst + columns].copy_from_slice(&chunk[src..src + columns]);
        }

        Ok(())
    }
}
