//! Normalise raw GeoJSON-style geometry into uniform coordinates.
//!
//! Upstream payloads encode positions as `[longitude, latitude]` arrays,
//! optionally followed by an elevation. This module converts them into
//! [`Coordinate`] values with `x = longitude` and `y = latitude`, and maps raw
//! `[minX, minY, maxX, maxY]` arrays into a [`Bbox`].
//!
//! Every function here is pure. Malformed input (wrong arity, unexpected
//! geometry kind) fails with [`MalformedGeometryError`] carrying the offending
//! raw value.
//!
//! # Examples
//! ```
//! use rando_core::geometry::{Geometry, RawGeometry};
//!
//! let raw = RawGeometry::LineString {
//!     coordinates: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
//! };
//! let Geometry::LineString(line) = raw.normalize()? else {
//!     unreachable!("a line string normalises to a line string");
//! };
//! assert_eq!(line[0].x, 1.0);
//! assert_eq!(line[1].y, 4.0);
//! # Ok::<(), rando_core::geometry::MalformedGeometryError>(())
//! ```

use std::fmt;

use geo::{Coord, Rect};
use thiserror::Error;

/// A WGS84 position with `x = longitude` and `y = latitude`.
pub type Coordinate = Coord<f64>;

/// Discriminant of a raw geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// A single position.
    Point,
    /// An ordered run of positions.
    LineString,
    /// A set of unrelated positions.
    MultiPoint,
}

impl GeometryKind {
    /// Return the GeoJSON type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::MultiPoint => "MultiPoint",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while normalising raw geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedGeometryError {
    /// A position did not carry two (or three, with elevation) ordinates.
    #[error("position {raw:?} must have 2 or 3 ordinates")]
    Position {
        /// The offending raw position.
        raw: Vec<f64>,
    },
    /// A bounding box did not carry exactly four values.
    #[error("bounding box {raw:?} must have exactly 4 values")]
    Bbox {
        /// The offending raw bounding box.
        raw: Vec<f64>,
    },
    /// The geometry was of a different kind than the field requires.
    #[error("expected {expected} geometry, found {found}")]
    UnexpectedKind {
        /// Kind required by the caller.
        expected: GeometryKind,
        /// Kind found in the payload.
        found: GeometryKind,
    },
}

/// Raw geometry as emitted by the upstream API, tagged by `type`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum RawGeometry {
    /// `{"type": "Point", "coordinates": [lon, lat]}`
    Point {
        /// Raw position.
        coordinates: Vec<f64>,
    },
    /// `{"type": "LineString", "coordinates": [[lon, lat], ...]}`
    LineString {
        /// Raw positions in path order.
        coordinates: Vec<Vec<f64>>,
    },
    /// `{"type": "MultiPoint", "coordinates": [[lon, lat], ...]}`
    MultiPoint {
        /// Raw positions.
        coordinates: Vec<Vec<f64>>,
    },
}

impl RawGeometry {
    /// Return the kind of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point { .. } => GeometryKind::Point,
            Self::LineString { .. } => GeometryKind::LineString,
            Self::MultiPoint { .. } => GeometryKind::MultiPoint,
        }
    }

    /// Normalise into a [`Geometry`].
    ///
    /// Line strings keep their vertex order and count. Multi-points keep
    /// insertion order so repeated runs produce identical output.
    pub fn normalize(&self) -> Result<Geometry, MalformedGeometryError> {
        match self {
            Self::Point { coordinates } => normalize_position(coordinates).map(Geometry::Point),
            Self::LineString { coordinates } => {
                normalize_positions(coordinates).map(Geometry::LineString)
            }
            Self::MultiPoint { coordinates } => {
                normalize_positions(coordinates).map(Geometry::MultiPoint)
            }
        }
    }

    /// Normalise a geometry that must be a `Point`.
    pub fn normalize_point(&self) -> Result<Coordinate, MalformedGeometryError> {
        match self {
            Self::Point { coordinates } => normalize_position(coordinates),
            other => Err(unexpected(GeometryKind::Point, other)),
        }
    }

    /// Normalise a geometry that must be a `LineString`.
    pub fn normalize_line_string(&self) -> Result<Vec<Coordinate>, MalformedGeometryError> {
        match self {
            Self::LineString { coordinates } => normalize_positions(coordinates),
            other => Err(unexpected(GeometryKind::LineString, other)),
        }
    }
}

fn unexpected(expected: GeometryKind, found: &RawGeometry) -> MalformedGeometryError {
    MalformedGeometryError::UnexpectedKind {
        expected,
        found: found.kind(),
    }
}

/// Normalised geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "coordinates")
)]
pub enum Geometry {
    /// A single coordinate.
    Point(Coordinate),
    /// Coordinates in path order.
    LineString(Vec<Coordinate>),
    /// Coordinates in insertion order.
    MultiPoint(Vec<Coordinate>),
}

impl Geometry {
    /// Borrow every coordinate of the geometry in order.
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Self::Point(point) => std::slice::from_ref(point),
            Self::LineString(line) | Self::MultiPoint(line) => line,
        }
    }

    /// First coordinate, if any.
    pub fn first(&self) -> Option<Coordinate> {
        self.coordinates().first().copied()
    }
}

/// Normalise a single `[lon, lat]` or `[lon, lat, elevation]` position.
///
/// # Examples
/// ```
/// use rando_core::geometry::normalize_position;
///
/// let coordinate = normalize_position(&[6.1, 44.9, 1200.0])?;
/// assert_eq!((coordinate.x, coordinate.y), (6.1, 44.9));
/// assert!(normalize_position(&[6.1]).is_err());
/// # Ok::<(), rando_core::geometry::MalformedGeometryError>(())
/// ```
pub fn normalize_position(raw: &[f64]) -> Result<Coordinate, MalformedGeometryError> {
    match raw {
        [x, y] | [x, y, _] => Ok(Coord { x: *x, y: *y }),
        _ => Err(MalformedGeometryError::Position { raw: raw.to_vec() }),
    }
}

/// Normalise an ordered run of positions, preserving order and length.
pub fn normalize_positions(raw: &[Vec<f64>]) -> Result<Vec<Coordinate>, MalformedGeometryError> {
    raw.iter()
        .map(Vec::as_slice)
        .map(normalize_position)
        .collect()
}

/// Normalise an optional multi-point, passing `None` through.
pub fn normalize_multi_point(
    raw: Option<&RawGeometry>,
) -> Result<Option<Vec<Coordinate>>, MalformedGeometryError> {
    match raw {
        None => Ok(None),
        Some(RawGeometry::MultiPoint { coordinates }) => normalize_positions(coordinates).map(Some),
        Some(other) => Err(unexpected(GeometryKind::MultiPoint, other)),
    }
}

/// Axis-aligned bounding box described by two opposite corners.
///
/// `corner1` holds the minimum longitude and latitude, `corner2` the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bbox {
    /// South-west corner.
    pub corner1: Coordinate,
    /// North-east corner.
    pub corner2: Coordinate,
}

impl Bbox {
    /// Build a bounding box from a raw `[minX, minY, maxX, maxY]` array.
    ///
    /// # Examples
    /// ```
    /// use rando_core::geometry::Bbox;
    ///
    /// let bbox = Bbox::from_raw(&[5.0, 44.0, 6.5, 45.2])?;
    /// assert_eq!(bbox.corner1.x, 5.0);
    /// assert_eq!(bbox.corner2.y, 45.2);
    /// # Ok::<(), rando_core::geometry::MalformedGeometryError>(())
    /// ```
    pub fn from_raw(raw: &[f64]) -> Result<Self, MalformedGeometryError> {
        match raw {
            [min_x, min_y, max_x, max_y] => Ok(Self {
                corner1: Coord {
                    x: *min_x,
                    y: *min_y,
                },
                corner2: Coord {
                    x: *max_x,
                    y: *max_y,
                },
            }),
            _ => Err(MalformedGeometryError::Bbox { raw: raw.to_vec() }),
        }
    }

    /// Smallest bounding box enclosing `coordinates`, or `None` when empty.
    pub fn enclosing(coordinates: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coordinates.split_first()?;
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Some(Self {
            corner1: min,
            corner2: max,
        })
    }

    /// Convert into a [`geo::Rect`].
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(self.corner1, self.corner2)
    }
}
