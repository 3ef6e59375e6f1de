//! Small rasters written to disk for decoder and pipeline tests.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::colortype;
use tiff::encoder::TiffEncoder;

/// 4x4, three bands of `i * 4369` (0..=65535 in 16 steps), each band permuted
/// differently: band 1 ascending, band 2 descending, band 3 `(i * 7) % 16`.
pub(crate) fn ramp_bands() -> [Vec<u16>; 3] {
    [
        (0..16).map(|i| i * 4369).collect(),
        (0..16).map(|i| (15 - i) * 4369).collect(),
        (0..16).map(|i| ((i * 7) % 16) * 4369).collect(),
    ]
}

/// Expected 8-bit output of [`ramp_bands`] with p2/p98 and gamma 1.2.
pub(crate) fn ramp_bands_expected() -> [Vec<u8>; 3] {
    [
        vec![0, 20, 42, 63, 82, 100, 117, 134, 151, 167, 183, 199, 214, 229, 244, 255],
        vec![255, 244, 229, 214, 199, 183, 167, 151, 134, 117, 100, 82, 63, 42, 20, 0],
        vec![0, 134, 244, 100, 214, 63, 183, 20, 151, 255, 117, 229, 82, 199, 42, 167],
    ]
}

/// Interleave equally sized bands pixel by pixel.
pub(crate) fn interleave<T: Copy>(bands: &[Vec<T>]) -> Vec<T> {
    let pixels = bands[0].len();
    let mut out = Vec::with_capacity(pixels * bands.len());
    for pixel in 0..pixels {
        for band in bands {
            out.push(band[pixel]);
        }
    }
    out
}

pub(crate) fn write_rgb16_tiff(path: &Path, width: u32, height: u32, bands: &[Vec<u16>; 3]) {
    let data = interleave(bands);
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path).unwrap())).unwrap();
    encoder
        .write_image::<colortype::RGB16>(width, height, &data)
        .unwrap();
}

pub(crate) fn write_rgba16_tiff(path: &Path, width: u32, height: u32, bands: &[Vec<u16>; 4]) {
    let data = interleave(bands);
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path).unwrap())).unwrap();
    encoder
        .write_image::<colortype::RGBA16>(width, height, &data)
        .unwrap();
}

pub(crate) fn write_gray16_tiff(path: &Path, width: u32, height: u32, samples: &[u16]) {
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path).unwrap())).unwrap();
    encoder
        .write_image::<colortype::Gray16>(width, height, samples)
        .unwrap();
}

pub(crate) fn write_gray32f_tiff(path: &Path, width: u32, height: u32, samples: &[f32]) {
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path).unwrap())).unwrap();
    encoder
        .write_image::<colortype::Gray32Float>(width, height, samples)
        .unwrap();
}

pub(crate) fn write_rgb16_png(path: &Path, width: u32, height: u32, bands: &[Vec<u16>; 3]) {
    let bytes: Vec<u8> = interleave(bands)
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    let mut encoder = png::Encoder::new(BufWriter::new(File::create(path).unwrap()), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Sixteen);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&bytes).unwrap();
}

/// Baseline little-endian TIFF with `PlanarConfiguration = 2`: every band is
/// its own run of strips of `rows_per_strip` rows. `TiffEncoder` only writes
/// chunky images, so the IFD is laid out by hand.
pub(crate) fn write_planar_rgb16_tiff(
    path: &Path,
    width: u32,
    height: u32,
    rows_per_strip: u32,
    bands: &[Vec<u16>; 3],
) {
    const SHORT: u16 = 3;
    const LONG: u16 = 4;
    const ENTRY_COUNT: u32 = 10;

    let strips_per_plane = height.div_ceil(rows_per_strip) as usize;
    let strip_count = (strips_per_plane * bands.len()) as u32;
    assert!(strip_count > 1, "offsets must not fit inline");

    let ifd_offset = 8u32;
    let bits_offset = ifd_offset + 2 + 12 * ENTRY_COUNT + 4;
    let strip_offsets_offset = bits_offset + 6;
    let byte_counts_offset = strip_offsets_offset + 4 * strip_count;
    let data_offset = byte_counts_offset + 4 * strip_count;

    let mut strip_offsets = Vec::new();
    let mut byte_counts = Vec::new();
    let mut pixel_bytes = Vec::new();
    for band in bands {
        for strip in 0..strips_per_plane {
            let first_row = strip * rows_per_strip as usize;
            let rows = (rows_per_strip as usize).min(height as usize - first_row);
            let start = first_row * width as usize;
            let samples = &band[start..start + rows * width as usize];
            strip_offsets.push(data_offset + pixel_bytes.len() as u32);
            byte_counts.push(samples.len() as u32 * 2);
            pixel_bytes.extend(samples.iter().flat_map(|v| v.to_le_bytes()));
        }
    }

    // (tag, type, count, value or offset); SHORT values sit in the low bytes
    let entries: [(u16, u16, u32, u32); ENTRY_COUNT as usize] = [
        (256, LONG, 1, width),
        (257, LONG, 1, height),
        (258, SHORT, 3, bits_offset),
        (259, SHORT, 1, 1),
        (262, SHORT, 1, 2),
        (273, LONG, strip_count, strip_offsets_offset),
        (277, SHORT, 1, 3),
        (278, LONG, 1, rows_per_strip),
        (279, LONG, strip_count, byte_counts_offset),
        (284, SHORT, 1, 2),
    ];

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"II");
    bytes.extend_from_slice(&42u16.to_le_bytes());
    bytes.extend_from_slice(&ifd_offset.to_le_bytes());
    bytes.extend_from_slice(&(ENTRY_COUNT as u16).to_le_bytes());
    for (tag, field_type, count, value) in entries {
        bytes.extend_from_slice(&tag.to_le_bytes());
        bytes.extend_from_slice(&field_type.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(bytes.len() as u32, bits_offset);

    for _ in 0..3 {
        bytes.extend_from_slice(&16u16.to_le_bytes());
    }
    for offset in strip_offsets {
        bytes.extend_from_slice(&offset.to_le_bytes());
    }
    for count in byte_counts {
        bytes.extend_from_slice(&count.to_le_bytes());
    }
    assert_eq!(bytes.len() as u32, data_offset);
    bytes.extend_from_slice(&pixel_bytes);

    std::fs::write(path, bytes).unwrap();
}
