//! Positional jitter for route vertices.
//!
//! Every vertex is moved independently to a uniformly random point inside a
//! disk of the configured radius, measured in a planar (meter) projection.
//! The radius is drawn as `R * sqrt(u1)` so that points are uniform over the
//! disk area rather than clustered at the center. Neighbouring vertices are
//! not correlated: this hides exact positions, it does not preserve shape.

use std::f64::consts::PI;

use projection::{PlanarProjection, ProjectionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use route_common::{RouteGeometry, SkipTally};
use tracing::{debug, info};

/// Result of jittering one geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum JitterOutcome<'a> {
    /// Radius was zero; the input is returned as is.
    Unchanged(&'a RouteGeometry),
    /// Every vertex was displaced.
    Jittered(RouteGeometry),
    /// The projection failed for some vertex; the original is kept.
    Fallback {
        original: &'a RouteGeometry,
        reason: ProjectionError,
    },
}

impl JitterOutcome<'_> {
    /// The geometry to use downstream.
    pub fn geometry(&self) -> &RouteGeometry {
        match self {
            JitterOutcome::Unchanged(geometry) => geometry,
            JitterOutcome::Jittered(geometry) => geometry,
            JitterOutcome::Fallback { original, .. } => original,
        }
    }
}

/// Displace every vertex of `geometry` by at most `radius_m` planar meters.
///
/// A radius of zero (or less) is the identity and allocates nothing.
pub fn jitter_geometry<'a, R, P>(
    geometry: &'a RouteGeometry,
    radius_m: f64,
    rng: &mut R,
    projection: &P,
) -> JitterOutcome<'a>
where
    R: Rng,
    P: PlanarProjection + ?Sized,
{
    if !(radius_m > 0.0) {
        return JitterOutcome::Unchanged(geometry);
    }

    let displaced = geometry.try_map_coords(|(lon, lat)| {
        let (x, y) = projection.to_planar(lon, lat)?;
        let r = radius_m * rng.gen::<f64>().sqrt();
        let theta = rng.gen::<f64>() * 2.0 * PI;
        projection.to_geographic(x + r * theta.cos(), y + r * theta.sin())
    });

    match displaced {
        Ok(jittered) => JitterOutcome::Jittered(jittered),
        Err(reason) => JitterOutcome::Fallback {
            original: geometry,
            reason,
        },
    }
}

/// Counts from a batch jitter pass.
#[derive(Debug, Clone, Default)]
pub struct JitterStats {
    /// Geometries whose vertices were displaced
    pub jittered: usize,
    /// Geometries kept unmodified because the projection failed
    pub fallbacks: SkipTally,
}

/// Jitter a whole route set in input order.
///
/// Geometries whose projection fails are kept unmodified and counted in
/// [`JitterStats::fallbacks`]; none are dropped.
pub fn jitter_routes<R, P>(
    geometries: Vec<RouteGeometry>,
    radius_m: f64,
    rng: &mut R,
    projection: &P,
) -> (Vec<RouteGeometry>, JitterStats)
where
    R: Rng,
    P: PlanarProjection + ?Sized,
{
    let mut stats = JitterStats::default();
    if !(radius_m > 0.0) {
        return (geometries, stats);
    }

    let mut out = Vec::with_capacity(geometries.len());
    for geometry in geometries {
        let replacement = match jitter_geometry(&geometry, radius_m, rng, projection) {
            JitterOutcome::Jittered(jittered) => Some(jittered),
            JitterOutcome::Fallback { reason, .. } => {
                stats.fallbacks.record("projection_failed", reason);
                None
            }
            JitterOutcome::Unchanged(_) => None,
        };
        match replacement {
            Some(jittered) => {
                stats.jittered += 1;
                out.push(jittered);
            }
            None => out.push(geometry),
        }
    }

    if !stats.fallbacks.is_empty() {
        debug!(samples = ?stats.fallbacks.samples(), "Jitter fell back to original geometry");
    }
    info!(
        radius_m,
        jittered = stats.jittered,
        fallbacks = stats.fallbacks.total(),
        "Applied vertex jitter"
    );

    (out, stats)
}

/// Random source for jitter: reproducible when a seed is given, otherwise
/// seeded from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
