//! GeoJSON geometry parsing for route features.
//!
//! Only `LineString` and `MultiLineString` are meaningful routes. Positions
//! are `[longitude, latitude]`; extra ordinates (altitude) are ignored.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc7946#section-3.1>

use route_common::{Coord, RouteError, RouteGeometry};
use serde_json::Value;

/// GeoJSON geometry type names accepted as routes.
pub const LINE_STRING: &str = "LineString";
pub const MULTI_LINE_STRING: &str = "MultiLineString";

/// Result of inspecting one geometry object.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryParse {
    /// A usable route.
    Route(RouteGeometry),
    /// Geometry object is structurally broken (missing type, bad coordinates).
    Malformed(String),
    /// Geometry is well formed but has nothing to draw.
    Empty(String),
    /// Declared type is not a line type.
    Unsupported(String),
}

/// Inspect a GeoJSON geometry object.
pub fn parse_geometry(geometry: &Value) -> GeometryParse {
    let Some(object) = geometry.as_object() else {
        return GeometryParse::Malformed("geometry is not an object".to_string());
    };

    let Some(geometry_type) = object.get("type").and_then(Value::as_str) else {
        return GeometryParse::Malformed("geometry has no 'type'".to_string());
    };

    let coordinates = object.get("coordinates").unwrap_or(&Value::Null);

    match geometry_type {
        LINE_STRING => parse_line_string(coordinates),
        MULTI_LINE_STRING => parse_multi_line_string(coordinates),
        other => GeometryParse::Unsupported(other.to_string()),
    }
}

fn parse_line_string(coordinates: &Value) -> GeometryParse {
    let coords = match parse_positions(coordinates) {
        Ok(coords) => coords,
        Err(msg) => return GeometryParse::Malformed(msg),
    };

    match RouteGeometry::line(coords) {
        Ok(route) => GeometryParse::Route(route),
        Err(RouteError::TooFewVertices(0)) => {
            GeometryParse::Empty("LineString has no vertices".to_string())
        }
        Err(e) => GeometryParse::Malformed(e.to_string()),
    }
}

fn parse_multi_line_string(coordinates: &Value) -> GeometryParse {
    let Some(parts) = coordinates.as_array() else {
        return GeometryParse::Malformed("MultiLineString coordinates are not an array".to_string());
    };

    let mut kept = Vec::with_capacity(parts.len());
    for part in parts {
        match parse_positions(part) {
            // Parts too short to form a segment are dropped
            Ok(coords) if coords.len() >= 2 => kept.push(coords),
            Ok(_) => {}
            Err(msg) => return GeometryParse::Malformed(msg),
        }
    }

    if kept.is_empty() {
        return GeometryParse::Empty("MultiLineString has no part with 2+ vertices".to_string());
    }

    match RouteGeometry::multi_line(kept) {
        Ok(route) => GeometryParse::Route(route),
        Err(e) => GeometryParse::Malformed(e.to_string()),
    }
}

/// Parse an array of positions into lon/lat pairs.
fn parse_positions(value: &Value) -> Result<Vec<Coord>, String> {
    let positions = value
        .as_array()
        .ok_or_else(|| "coordinates are not an array".to_string())?;

    positions
        .iter()
        .map(|position| {
            let ordinates = position
                .as_array()
                .ok_or_else(|| format!("position {} is not an array", position))?;
            if ordinates.len() < 2 {
                return Err(format!("position {} has fewer than 2 ordinates", position));
            }
            let lon = ordinates[0]
                .as_f64()
                .ok_or_else(|| format!("longitude {} is not a number", ordinates[0]))?;
            let lat = ordinates[1]
                .as_f64()
                .ok_or_else(|| format!("latitude {} is not a number", ordinates[1]))?;
            if !lon.is_finite() || !lat.is_finite() {
                return Err(format!("position ({}, {}) is not finite", lon, lat));
            }
            Ok((lon, lat))
        })
        .collect()
}
