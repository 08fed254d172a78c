//! Append-only attribute arrays backing face index resolution

use std::fmt;

use serde::Serialize;

use super::error::{LineRef, ObjError};
use crate::foundation::math::{Vec2, Vec3};

/// Which attribute array an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeKind {
    /// `v` records
    Position,
    /// `vt` records
    TexCoord,
    /// `vn` records
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Position => "position",
            Self::TexCoord => "texture coordinate",
            Self::Normal => "normal",
        })
    }
}

/// Positions, normals and texture coordinates in file order.
///
/// Indices are resolved against the arrays as they stand when a face is read,
/// so a face can only reference data declared above it.
#[derive(Debug, Default, Clone)]
pub struct AttributeArrays {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
}

impl AttributeArrays {
    /// Empty arrays
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `v` record
    pub fn push_position(&mut self, position: Vec3) {
        self.positions.push(position);
    }

    /// Append a `vn` record
    pub fn push_normal(&mut self, normal: Vec3) {
        self.normals.push(normal);
    }

    /// Append a `vt` record
    pub fn push_tex_coord(&mut self, tex_coord: Vec2) {
        self.tex_coords.push(tex_coord);
    }

    /// Number of positions read so far
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of normals read so far
    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    /// Number of texture coordinates read so far
    pub fn tex_coord_count(&self) -> usize {
        self.tex_coords.len()
    }

    pub(crate) fn position(&self, index: i64, at: LineRef<'_>) -> Result<Vec3, ObjError> {
        resolve(&self.positions, AttributeKind::Position, index, at)
    }

    pub(crate) fn normal(&self, index: i64, at: LineRef<'_>) -> Result<Vec3, ObjError> {
        resolve(&self.normals, AttributeKind::Normal, index, at)
    }

    pub(crate) fn tex_coord(&self, index: i64, at: LineRef<'_>) -> Result<Vec2, ObjError> {
        resolve(&self.tex_coords, AttributeKind::TexCoord, index, at)
    }
}

/// 1-based lookup
fn resolve<T: Copy>(
    items: &[T],
    attribute: AttributeKind,
    index: i64,
    at: LineRef<'_>,
) -> Result<T, ObjError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| items.get(i))
        .copied()
        .ok_or_else(|| ObjError::IndexOutOfRange {
            at: at.locate(),
            attribute,
            index,
            len: items.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: LineRef<'static> = LineRef { file: "attr.obj", line: 3 };

    fn arrays() -> AttributeArrays {
        let mut arrays = AttributeArrays::new();
        arrays.push_position(Vec3::new(0.0, 0.0, 0.0));
        arrays.push_position(Vec3::new(1.0, 2.0, 3.0));
        arrays.push_normal(Vec3::new(0.0, 1.0, 0.0));
        arrays.push_tex_coord(Vec2::new(0.25, 0.75));
        arrays
    }

    #[test]
    fn test_one_based_resolution() {
        let arrays = arrays();
        assert_eq!(arrays.position(1, AT).unwrap(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(arrays.position(2, AT).unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(arrays.normal(1, AT).unwrap(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(arrays.tex_coord(1, AT).unwrap(), Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_zero_index_out_of_range() {
        let err = arrays().position(0, AT).unwrap_err();
        assert!(matches!(
            err,
            ObjError::IndexOutOfRange { attribute: AttributeKind::Position, index: 0, len: 2, .. }
        ));
    }

    #[test]
    fn test_past_end_names_attribute() {
        let arrays = arrays();
        assert!(matches!(
            arrays.normal(2, AT),
            Err(ObjError::IndexOutOfRange { attribute: AttributeKind::Normal, len: 1, .. })
        ));
        assert!(matches!(
            arrays.tex_coord(5, AT),
            Err(ObjError::IndexOutOfRange { attribute: AttributeKind::TexCoord, .. })
        ));
    }

    #[test]
    fn test_negative_index_is_rejected() {
        assert!(matches!(
            arrays().position(-1, AT),
            Err(ObjError::IndexOutOfRange { index: -1, .. })
        ));
    }

    #[test]
    fn test_reference_grows_with_array() {
        let mut arrays = AttributeArrays::new();
        assert!(arrays.position(1, AT).is_err());
        arrays.push_position(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(arrays.position(1, AT).unwrap(), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(arrays.position_count(), 1);
    }
}
