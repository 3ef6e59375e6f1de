//! Tests for raster decoders

use super::*;
use super::tiff::ChunkGrid;
use crate::raster::{SampleBuffer, SampleFormat, SampleLayout};
use crate::test_fixtures::*;
use tempfile::tempdir;

#[test]
fn test_decode_rgb16_tiff() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.tif");
    let bands = ramp_bands();
    write_rgb16_tiff(&path, 4, 4, &bands);

    let raster = decode_raster(&path).unwrap();

    assert_eq!((raster.width, raster.height), (4, 4));
    assert_eq!(raster.band_count, 3);
    assert_eq!(raster.sample_format, SampleFormat::U16);
    assert_eq!(raster.layout, SampleLayout::Interleaved);
    assert!(matches!(raster.samples, SampleBuffer::U16(_)));
    assert_eq!(raster.samples.len(), 48);

    for (i, samples) in bands.iter().enumerate() {
        let band = raster.band(i + 1).unwrap();
        let expected: Vec<f64> = samples.iter().map(|&v| v as f64).collect();
        assert_eq!(band.data, expected, "band {}", i + 1);
    }
}

#[test]
fn test_decode_four_band_tiff_keeps_every_band() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("four.TIFF");
    let [b1, b2, b3] = ramp_bands();
    let nir: Vec<u16> = (0..16).map(|i| 1000 + i).collect();
    write_rgba16_tiff(&path, 4, 4, &[b1, b2, b3, nir.clone()]);

    let raster = decode_raster(&path).unwrap();

    assert_eq!(raster.band_count, 4);
    let expected: Vec<f64> = nir.iter().map(|&v| v as f64).collect();
    assert_eq!(raster.band(4).unwrap().data, expected);
}

#[test]
fn test_decode_single_band_tiff() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pan.tif");
    let samples: Vec<u16> = (0..6).collect();
    write_gray16_tiff(&path, 3, 2, &samples);

    let raster = decode_raster(&path).unwrap();

    assert_eq!(raster.band_count, 1);
    assert_eq!((raster.width, raster.height), (3, 2));
    assert!(matches!(
        raster.band(2),
        Err(StretchError::BandOutOfRange {
            band: 2,
            available: 1
        })
    ));
}

#[test]
fn test_decode_float_tiff() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reflectance.tif");
    write_gray32f_tiff(&path, 2, 2, &[0.0, 0.25, 0.5, 1.0]);

    let raster = decode_raster(&path).unwrap();

    assert_eq!(raster.sample_format, SampleFormat::F32);
    assert_eq!(raster.samples, SampleBuffer::F32(vec![0.0, 0.25, 0.5, 1.0]));
    assert_eq!(raster.band(1).unwrap().data, vec![0.0, 0.25, 0.5, 1.0]);
}

#[test]
fn test_decode_rgb16_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.png");
    let bands = ramp_bands();
    write_rgb16_png(&path, 4, 4, &bands);

    let raster = decode_raster(&path).unwrap();

    assert_eq!(raster.band_count, 3);
    assert_eq!(raster.sample_format, SampleFormat::U16);
    let expected: Vec<f64> = bands[2].iter().map(|&v| v as f64).collect();
    assert_eq!(raster.band(3).unwrap().data, expected);
}

#[test]
fn test_decode_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.tif");

    let err = decode_raster(&path).unwrap_err();

    assert!(matches!(err, StretchError::InputNotFound { .. }));
    assert!(err.to_string().contains("missing.tif"));
}

#[test]
fn test_decode_corrupt_tiff() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.tif");
    std::fs::write(&path, b"definitely not a tiff").unwrap();

    let err = decode_raster(&path).unwrap_err();

    assert!(matches!(err, StretchError::InputUnreadable { .. }));
}

#[test]
fn test_decode_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.jp2");
    std::fs::write(&path, b"jp2").unwrap();

    let err = decode_raster(&path).unwrap_err();

    assert!(err.to_string().contains("Unsupported file format: jp2"));
}

#[test]
fn test_decode_directory_is_not_found() {
    let dir = tempdir().unwrap();

    let err = decode_raster(dir.path()).unwrap_err();

    assert!(matches!(err, StretchError::InputNotFound { .. }));
}

#[test]
fn test_decode_planar_tiff_reads_every_plane() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planar.tif");
    let bands = [vec![1, 2], vec![10, 20], vec![100, 200]];
    write_planar_rgb16_tiff(&path, 2, 1, 1, &bands);

    let raster = decode_raster(&path).unwrap();

    assert_eq!(raster.band_count, 3);
    assert_eq!(raster.layout, SampleLayout::Planar);
    assert_eq!(raster.sample_format, SampleFormat::U16);
    let [first, second, third] = raster.bands([1, 2, 3]).unwrap();
    assert_eq!(first.data, vec![1.0, 2.0]);
    assert_eq!(second.data, vec![10.0, 20.0]);
    assert_eq!(third.data, vec![100.0, 200.0]);
}

#[test]
fn test_decode_planar_tiff_with_short_last_strip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planar_strips.tif");
    let bands = ramp_bands();
    // 4 rows in strips of 3: the second strip of each plane holds one row
    write_planar_rgb16_tiff(&path, 4, 4, 3, &bands);

    let raster = decode_raster(&path).unwrap();

    for (i, samples) in bands.iter().enumerate() {
        let expected: Vec<f64> = samples.iter().map(|&v| v as f64).collect();
        assert_eq!(raster.band(i + 1).unwrap().data, expected, "band {}", i + 1);
    }
}

#[test]
fn test_decode_tiff_by_signature() {
    let dir = tempdir().unwrap();
    let bands = ramp_bands();
    let gtiff = dir.path().join("scene.gtiff");
    let bare = dir.path().join("scene");
    let misnamed = dir.path().join("scene.dat");
    write_rgb16_tiff(&gtiff, 4, 4, &bands);
    write_rgb16_tiff(&bare, 4, 4, &bands);
    write_rgb16_tiff(&misnamed, 4, 4, &bands);

    for path in [&gtiff, &bare, &misnamed] {
        let raster = decode_raster(path).unwrap();
        assert_eq!(raster.band_count, 3, "{}", path.display());
    }
}

#[test]
fn test_decode_png_by_signature() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.tif");
    write_rgb16_png(&path, 4, 4, &ramp_bands());

    let raster = decode_raster(&path).unwrap();

    assert_eq!(raster.band_count, 3);
    assert_eq!(raster.sample_format, SampleFormat::U16);
}

#[test]
fn test_unknown_signature_without_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene");
    std::fs::write(&path, b"plain text, not an image").unwrap();

    let err = decode_raster(&path).unwrap_err();

    assert!(matches!(err, StretchError::InputUnreadable { .. }));
    assert!(err.to_string().contains("no file extension"));
}

#[test]
fn test_input_format_from_signature() {
    assert_eq!(
        InputFormat::from_signature(b"II*\0\x08\0\0\0\0\0\0\0"),
        Some(InputFormat::Tiff)
    );
    assert_eq!(
        InputFormat::from_signature(b"MM\0*\0\0\0\x08\0\0\0\0"),
        Some(InputFormat::Tiff)
    );
    assert_eq!(
        InputFormat::from_signature(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
        Some(InputFormat::Png)
    );
    assert_eq!(InputFormat::from_signature(b"GIF89a"), None);
    assert_eq!(InputFormat::from_signature(b""), None);
}

#[test]
fn test_chunk_grid_counts_strips_and_tiles() {
    let strips = ChunkGrid::new(5, 7, 5, 3).unwrap();
    let tiles = ChunkGrid::new(5, 7, 4, 4).unwrap();

    assert_eq!(strips.chunks_per_plane(), 3);
    assert_eq!(tiles.chunks_per_plane(), 4);
    assert!(ChunkGrid::new(5, 7, 5, 0).is_err());
}

#[test]
fn test_chunk_grid_places_cropped_and_padded_tiles() {
    // 3x3 plane covered by 2x2 tiles
    let grid = ChunkGrid::new(3, 3, 2, 2).unwrap();
    let mut plane = [0u16; 9];

    grid.place(0, &[1, 2, 4, 5], &mut plane).unwrap();
    // Right edge tile padded to 2x2
    grid.place(1, &[3, 0, 6, 0], &mut plane).unwrap();
    // Bottom edge tile cropped to 2x1
    grid.place(2, &[7, 8], &mut plane).unwrap();
    // Corner tile cropped to 1x1
    grid.place(3, &[9], &mut plane).unwrap();

    assert_eq!(plane, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_chunk_grid_rejects_short_chunk() {
    let grid = ChunkGrid::new(4, 2, 4, 2).unwrap();
    let mut plane = [0u8; 8];

    let err = grid.place(0, &[1, 2, 3], &mut plane).unwrap_err();

    assert!(err.contains("holds 3 samples, expected 8"));
}
