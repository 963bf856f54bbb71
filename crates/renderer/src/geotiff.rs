//! Lossless GeoTIFF export of a density grid.
//!
//! The grid is written as a single-band, LZW-compressed `u32` image with
//! three GeoTIFF tags:
//! - `ModelPixelScale` (33550): pixel size in map units
//! - `ModelTiepoint` (33922): raster (0, 0) ↔ north-west corner
//! - `GeoKeyDirectory` (34735): model type, raster type and EPSG code
//!
//! See: <https://docs.ogc.org/is/19-008r4/19-008r4.html>

use std::fs;
use std::io::Cursor;
use std::path::Path;

use route_common::{CrsCode, DensityGrid, GeoTransform};
use tiff::encoder::{colortype, compression::Lzw, TiffEncoder};
use tiff::tags::Tag;
use tracing::info;

use crate::{RenderError, Result};

pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
pub const MODEL_TIEPOINT_TAG: u16 = 33922;
pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;

// GeoKey ids and values
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;
const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// GeoKeyDirectory contents for a CRS: a header (version 1.1.0, three
/// keys) followed by one `(id, location, count, value)` entry per key,
/// sorted by id.
#[rustfmt::skip]
pub fn geo_key_directory(crs: CrsCode) -> [u16; 16] {
    let (model_type, crs_key) = if crs.is_geographic() {
        (MODEL_TYPE_GEOGRAPHIC, GEOGRAPHIC_TYPE_GEO_KEY)
    } else {
        (MODEL_TYPE_PROJECTED, PROJECTED_CS_TYPE_GEO_KEY)
    };
    [
        1, 1, 0, 3,
        GT_MODEL_TYPE_GEO_KEY, 0, 1, model_type,
        GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA,
        crs_key, 0, 1, crs.epsg(),
    ]
}

/// Encode the grid as GeoTIFF bytes.
pub fn encode_geotiff(grid: &DensityGrid, transform: &GeoTransform, crs: CrsCode) -> Result<Vec<u8>> {
    let (width, height) = match (u32::try_from(grid.width()), u32::try_from(grid.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(RenderError::Dimensions {
                width: grid.width(),
                height: grid.height(),
            })
        }
    };

    let pixel_scale = [transform.pixel_width, transform.pixel_height, 0.0];
    let tiepoint = [0.0, 0.0, 0.0, transform.origin_x, transform.origin_y, 0.0];
    let geo_keys = geo_key_directory(crs);

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buffer)?;
        let mut image = encoder.new_image_with_compression::<colortype::Gray32, _>(
            width,
            height,
            Lzw::default(),
        )?;

        let dir = image.encoder();
        dir.write_tag(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE_TAG), &pixel_scale[..])?;
        dir.write_tag(Tag::from_u16_exhaustive(MODEL_TIEPOINT_TAG), &tiepoint[..])?;
        dir.write_tag(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY_TAG), &geo_keys[..])?;

        image.write_data(grid.cells())?;
    }

    Ok(buffer.into_inner())
}

/// Encode the grid and write it to `path`.
///
/// Encoding completes in memory first, so a failed encode leaves no file.
pub fn write_geotiff(
    path: impl AsRef<Path>,
    grid: &DensityGrid,
    transform: &GeoTransform,
    crs: CrsCode,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_geotiff(grid, transform, crs)?;
    fs::write(path, &bytes).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        crs = %crs,
        bytes = bytes.len(),
        "Wrote density GeoTIFF"
    );
    Ok(())
}
