//! Feature collection loading.

use std::fs;
use std::path::Path;

use route_common::{RouteGeometry, SkipTally};
use serde_json::Value;
use tracing::{debug, info};

use crate::geojson::{parse_geometry, GeometryParse};
use crate::{IngestionError, Result};

/// Why a feature was left out of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No `geometry` member, or `null`.
    MissingGeometry,
    /// Geometry could not be parsed.
    MalformedGeometry,
    /// Geometry parsed but has no drawable segment.
    EmptyGeometry,
}

impl SkipReason {
    /// Short label used in run summaries.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::MissingGeometry => "missing_geometry",
            SkipReason::MalformedGeometry => "malformed_geometry",
            SkipReason::EmptyGeometry => "empty_geometry",
        }
    }
}

/// Outcome of parsing a single feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    Loaded(RouteGeometry),
    Skipped { reason: SkipReason, detail: String },
}

impl FeatureOutcome {
    fn skipped(reason: SkipReason, detail: impl Into<String>) -> Self {
        FeatureOutcome::Skipped {
            reason,
            detail: detail.into(),
        }
    }
}

/// Geometries that survived loading, in input order.
#[derive(Debug, Clone, Default)]
pub struct LoadedRoutes {
    pub geometries: Vec<RouteGeometry>,
    /// Number of features in the input collection
    pub feature_count: usize,
    /// Features skipped, by reason
    pub skipped: SkipTally,
}

/// Parse one feature.
///
/// Returns `Err` only for an unsupported geometry type, which is fatal
/// for the whole run.
pub fn parse_feature(feature_index: usize, feature: &Value) -> Result<FeatureOutcome> {
    let Some(object) = feature.as_object() else {
        return Ok(FeatureOutcome::skipped(
            SkipReason::MalformedGeometry,
            format!("feature {} is not an object", feature_index),
        ));
    };

    let geometry = match object.get("geometry") {
        None | Some(Value::Null) => {
            return Ok(FeatureOutcome::skipped(
                SkipReason::MissingGeometry,
                format!("feature {} has no geometry", feature_index),
            ))
        }
        Some(geometry) => geometry,
    };

    Ok(match parse_geometry(geometry) {
        GeometryParse::Route(route) => FeatureOutcome::Loaded(route),
        GeometryParse::Malformed(msg) => FeatureOutcome::skipped(
            SkipReason::MalformedGeometry,
            format!("feature {}: {}", feature_index, msg),
        ),
        GeometryParse::Empty(msg) => FeatureOutcome::skipped(
            SkipReason::EmptyGeometry,
            format!("feature {}: {}", feature_index, msg),
        ),
        GeometryParse::Unsupported(geometry_type) => {
            return Err(IngestionError::UnsupportedGeometry {
                feature_index,
                geometry_type,
            })
        }
    })
}

/// Load routes from a GeoJSON FeatureCollection held in memory.
///
/// A document without a `features` member is an empty collection.
pub fn load_from_str(document: &str) -> Result<LoadedRoutes> {
    let root: Value = serde_json::from_str(document)?;
    let Some(object) = root.as_object() else {
        return Err(IngestionError::InvalidDocument(
            "top-level value is not an object".to_string(),
        ));
    };

    let features: &[Value] = match object.get("features") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(features)) => features.as_slice(),
        Some(_) => {
            return Err(IngestionError::InvalidDocument(
                "'features' is not an array".to_string(),
            ))
        }
    };

    let mut loaded = LoadedRoutes {
        geometries: Vec::with_capacity(features.len()),
        feature_count: features.len(),
        skipped: SkipTally::new(),
    };

    for (index, feature) in features.iter().enumerate() {
        match parse_feature(index, feature)? {
            FeatureOutcome::Loaded(route) => loaded.geometries.push(route),
            FeatureOutcome::Skipped { reason, detail } => {
                loaded.skipped.record(reason.label(), detail);
            }
        }
    }

    debug!(
        features = loaded.feature_count,
        loaded = loaded.geometries.len(),
        skipped = loaded.skipped.total(),
        "Parsed feature collection"
    );

    Ok(loaded)
}

/// Load routes from a GeoJSON file.
pub fn load_geometries(path: impl AsRef<Path>) -> Result<LoadedRoutes> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestionError::InputNotFound(path.to_path_buf()));
    }

    let document = fs::read_to_string(path)?;
    let loaded = load_from_str(&document)?;

    info!(
        path = %path.display(),
        features = loaded.feature_count,
        geometries = loaded.geometries.len(),
        skipped = loaded.skipped.total(),
        "Loaded route geometries"
    );

    Ok(loaded)
}
