//! Route geometries: single or multi-part polylines in lon/lat.

use crate::{BoundingBox, RouteError, RouteResult};

/// A vertex as (longitude, latitude) in degrees.
pub type Coord = (f64, f64);

/// One trip's path.
///
/// Constructed through [`RouteGeometry::line`] and
/// [`RouteGeometry::multi_line`], which reject parts with fewer than two
/// vertices and non-finite coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteGeometry {
    /// A single ordered vertex sequence.
    Line(Vec<Coord>),
    /// An ordered sequence of vertex sequences.
    MultiLine(Vec<Vec<Coord>>),
}

impl RouteGeometry {
    /// Build a single-part route.
    pub fn line(coords: Vec<Coord>) -> RouteResult<Self> {
        validate_part(&coords)?;
        Ok(RouteGeometry::Line(coords))
    }

    /// Build a multi-part route. Every part must be a valid line.
    pub fn multi_line(parts: Vec<Vec<Coord>>) -> RouteResult<Self> {
        if parts.is_empty() {
            return Err(RouteError::NoParts);
        }
        for part in &parts {
            validate_part(part)?;
        }
        Ok(RouteGeometry::MultiLine(parts))
    }

    /// GeoJSON type name of this geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            RouteGeometry::Line(_) => "LineString",
            RouteGeometry::MultiLine(_) => "MultiLineString",
        }
    }

    /// Iterate over the parts as vertex slices. A single line yields one part.
    pub fn parts(&self) -> impl Iterator<Item = &[Coord]> + '_ {
        let parts: Box<dyn Iterator<Item = &[Coord]> + '_> = match self {
            RouteGeometry::Line(coords) => Box::new(std::iter::once(coords.as_slice())),
            RouteGeometry::MultiLine(parts) => Box::new(parts.iter().map(Vec::as_slice)),
        };
        parts
    }

    /// Iterate over every vertex of every part.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.parts().flat_map(|part| part.iter().copied())
    }

    pub fn part_count(&self) -> usize {
        match self {
            RouteGeometry::Line(_) => 1,
            RouteGeometry::MultiLine(parts) => parts.len(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.parts().map(<[Coord]>::len).sum()
    }

    /// Bounding box over all vertices, `None` when there are no vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.coords())
    }

    /// Apply a fallible function to every vertex, keeping the variant,
    /// part count and vertex counts exactly as they are.
    pub fn try_map_coords<E, F>(&self, mut f: F) -> Result<RouteGeometry, E>
    where
        F: FnMut(Coord) -> Result<Coord, E>,
    {
        let mut map_part = |part: &[Coord]| part.iter().map(|&c| f(c)).collect::<Result<Vec<_>, E>>();

        Ok(match self {
            RouteGeometry::Line(coords) => RouteGeometry::Line(map_part(coords)?),
            RouteGeometry::MultiLine(parts) => RouteGeometry::MultiLine(
                parts
                    .iter()
                    .map(|part| map_part(part))
                    .collect::<Result<Vec<_>, E>>()?,
            ),
        })
    }
}

fn validate_part(coords: &[Coord]) -> RouteResult<()> {
    if coords.len() < 2 {
        return Err(RouteError::TooFewVertices(coords.len()));
    }
    if let Some(&(x, y)) = coords.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(RouteError::NonFiniteCoordinate { x, y });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_requires_two_vertices() {
        assert_eq!(
            RouteGeometry::line(vec![(0.0, 0.0)]),
            Err(RouteError::TooFewVertices(1))
        );
        assert!(RouteGeometry::line(vec![(0.0, 0.0), (1.0, 1.0)]).is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = RouteGeometry::line(vec![(0.0, 0.0), (f64::NAN, 1.0)]);
        assert!(matches!(result, Err(RouteError::NonFiniteCoordinate { .. })));
    }

    #[test]
    fn test_multi_line_bounds_and_counts() {
        let geom = RouteGeometry::multi_line(vec![
            vec![(0.0, 0.0), (1.0, 2.0)],
            vec![(-3.0, 1.0), (0.5, 0.5), (2.0, -1.0)],
        ])
        .unwrap();

        assert_eq!(geom.part_count(), 2);
        assert_eq!(geom.vertex_count(), 5);
        assert_eq!(geom.bounds().unwrap(), BoundingBox::new(-3.0, -1.0, 2.0, 2.0));
        assert_eq!(geom.type_name(), "MultiLineString");
    }

    #[test]
    fn test_try_map_coords_preserves_topology() {
        let geom = RouteGeometry::multi_line(vec![
            vec![(0.0, 0.0), (1.0, 1.0)],
            vec![(2.0, 2.0), (3.0, 3.0), (4.0, 4.0)],
        ])
        .unwrap();

        let shifted = geom
            .try_map_coords(|(x, y)| Ok::<_, ()>((x + 10.0, y)))
            .unwrap();
        assert_eq!(shifted.part_count(), 2);
        assert_eq!(shifted.vertex_count(), 5);
        assert_eq!(shifted.coords().next(), Some((10.0, 0.0)));

        let failed = geom.try_map_coords(|(x, y)| if x > 2.5 { Err("boom") } else { Ok((x, y)) });
        assert_eq!(failed, Err("boom"));
    }
}
