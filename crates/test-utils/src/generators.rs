//! Test data generators for synthetic routes and GeoJSON documents.
//!
//! Generators are seeded so that test data is reproducible between runs.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use route_common::{BoundingBox, RouteGeometry};
use serde_json::{json, Value};

/// Creates `count` random polylines inside `bbox`.
///
/// Each route has between 2 and `max_vertices` vertices (inclusive).
///
/// # Example
///
/// ```
/// use route_common::BoundingBox;
/// use test_utils::random_routes;
///
/// let routes = random_routes(5, &BoundingBox::new(0.0, 0.0, 1.0, 1.0), 6, 7);
/// assert_eq!(routes.len(), 5);
/// ```
pub fn random_routes(
    count: usize,
    bbox: &BoundingBox,
    max_vertices: usize,
    seed: u64,
) -> Vec<RouteGeometry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_vertices = max_vertices.max(2);

    (0..count)
        .map(|_| {
            let n = rng.gen_range(2..=max_vertices);
            let coords = (0..n)
                .map(|_| {
                    (
                        rng.gen_range(bbox.min_x..=bbox.max_x),
                        rng.gen_range(bbox.min_y..=bbox.max_y),
                    )
                })
                .collect();
            RouteGeometry::line(coords).expect("generated coordinates are finite")
        })
        .collect()
}

/// GeoJSON geometry object for a route.
pub fn geometry_json(geometry: &RouteGeometry) -> Value {
    let positions = |part: &[(f64, f64)]| -> Vec<[f64; 2]> {
        part.iter().map(|&(x, y)| [x, y]).collect()
    };
    match geometry {
        RouteGeometry::Line(coords) => json!({
            "type": "LineString",
            "coordinates": positions(coords),
        }),
        RouteGeometry::MultiLine(parts) => json!({
            "type": "MultiLineString",
            "coordinates": parts.iter().map(|p| positions(p)).collect::<Vec<_>>(),
        }),
    }
}

/// A GeoJSON Feature wrapping a route, with a small property bag.
pub fn route_feature(geometry: &RouteGeometry) -> Value {
    json!({
        "type": "Feature",
        "geometry": geometry_json(geometry),
        "properties": { "source": "test-utils" },
    })
}

/// A FeatureCollection around arbitrary feature values.
pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// A FeatureCollection holding one feature per route.
pub fn routes_collection(routes: &[RouteGeometry]) -> Value {
    feature_collection(routes.iter().map(route_feature).collect())
}

/// Write a GeoJSON value to `dir/name` and return the path.
pub fn write_geojson(dir: &Path, name: &str, document: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, document.to_string()).expect("failed to write test GeoJSON");
    path
}

/// Create a temporary directory for test outputs.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}
