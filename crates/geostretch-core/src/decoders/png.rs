//! PNG decoder
//!
//! Each PNG channel becomes one band; alpha is kept as an ordinary band.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::raster::{Raster, SampleBuffer, SampleFormat, SampleLayout};

pub(crate) fn decode_png<P: AsRef<Path>>(path: P) -> Result<Raster, String> {
    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let band_count = match color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => return Err("Indexed PNG not supported".to_string()),
    };

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;
    buf.truncate(frame_info.buffer_size());

    let (samples, sample_format) = match bit_depth {
        png::BitDepth::Eight => (SampleBuffer::U8(buf), SampleFormat::U8),
        png::BitDepth::Sixteen => {
            // 16-bit PNG samples are big-endian
            let samples: Vec<u16> = buf
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            (SampleBuffer::U16(samples), SampleFormat::U16)
        }
        other => {
            return Err(format!(
                "Unsupported PNG bit depth: {:?} (only 8 and 16 bits)",
                other
            ))
        }
    };

    Raster::new(
        width,
        height,
        band_count,
        sample_format,
        SampleLayout::Interleaved,
        samples,
    )
}
