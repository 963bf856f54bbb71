//! Tests for the lossless GeoTIFF artifact.
//!
//! Files are decoded back with the `tiff` crate to check samples and
//! georeferencing tags.

use std::io::Cursor;

use renderer::geotiff::{GEO_KEY_DIRECTORY_TAG, MODEL_PIXEL_SCALE_TAG, MODEL_TIEPOINT_TAG};
use renderer::{encode_geotiff, write_geotiff};
use route_common::{BoundingBox, CrsCode, DensityGrid, GeoTransform};
use test_utils::temp_dir;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

// ============================================================================
// Helper functions
// ============================================================================

fn sample() -> (DensityGrid, GeoTransform) {
    let cells: Vec<u32> = (0..40u32).map(|i| i * 1_000_003 % 97).collect();
    let grid = DensityGrid::from_cells(8, 5, cells).unwrap();
    let bbox = BoundingBox::new(-74.02, 40.70, -73.94, 40.75);
    let transform = GeoTransform::from_bounds(&bbox, 8, 5).unwrap();
    (grid, transform)
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_samples_round_trip() {
    let (grid, transform) = sample();
    let bytes = encode_geotiff(&grid, &transform, CrsCode::Epsg4326).unwrap();

    let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (8, 5));
    match decoder.read_image().unwrap() {
        DecodingResult::U32(samples) => assert_eq!(samples, grid.cells()),
        _ => panic!("expected u32 samples"),
    }
}

#[test]
fn test_georeferencing_tags() {
    let (grid, transform) = sample();
    let bytes = encode_geotiff(&grid, &transform, CrsCode::Epsg4326).unwrap();
    let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();

    let scale = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE_TAG))
        .unwrap();
    assert_eq!(scale, vec![transform.pixel_width, transform.pixel_height, 0.0]);

    let tiepoint = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_TIEPOINT_TAG))
        .unwrap();
    assert_eq!(tiepoint, vec![0.0, 0.0, 0.0, -74.02, 40.75, 0.0]);

    let keys = decoder
        .get_tag_u16_vec(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY_TAG))
        .unwrap();
    assert_eq!(&keys[12..], &[2048, 0, 1, 4326]);
}

#[test]
fn test_projected_crs_key() {
    let (grid, transform) = sample();
    let bytes = encode_geotiff(&grid, &transform, CrsCode::Epsg3857).unwrap();
    let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
    let keys = decoder
        .get_tag_u16_vec(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY_TAG))
        .unwrap();
    assert_eq!(&keys[12..], &[3072, 0, 1, 3857]);
}

#[test]
fn test_large_counts_are_lossless() {
    let grid = DensityGrid::from_cells(2, 1, vec![u32::MAX, 70_000]).unwrap();
    let transform =
        GeoTransform::from_bounds(&BoundingBox::new(0.0, 0.0, 2.0, 1.0), 2, 1).unwrap();
    let bytes = encode_geotiff(&grid, &transform, CrsCode::Epsg4326).unwrap();

    let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
    match decoder.read_image().unwrap() {
        DecodingResult::U32(samples) => assert_eq!(samples, vec![u32::MAX, 70_000]),
        _ => panic!("expected u32 samples"),
    }
}

// ============================================================================
// File output
// ============================================================================

#[test]
fn test_write_geotiff_file() {
    let dir = temp_dir();
    let path = dir.path().join("density.tif");
    let (grid, transform) = sample();
    write_geotiff(&path, &grid, &transform, CrsCode::Epsg4326).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let mut decoder = Decoder::new(file).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (8, 5));
}

#[test]
fn test_encoding_is_deterministic() {
    let (grid, transform) = sample();
    let a = encode_geotiff(&grid, &transform, CrsCode::Epsg4326).unwrap();
    let b = encode_geotiff(&grid, &transform, CrsCode::Epsg4326).unwrap();
    assert_eq!(a, b);
}
