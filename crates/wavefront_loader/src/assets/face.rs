//! Face-vertex token classification and decoding
//!
//! A face token such as `3/1/2` names 1-based positions, texture coordinates
//! and normals. Four slash layouts are recognized:
//!
//! | token    | format             |
//! |----------|--------------------|
//! | `v`      | `PositionOnly`     |
//! | `v/vt`   | `PositionUV`       |
//! | `v/vt/vn`| `PositionUVNormal` |
//! | `v//vn`  | `PositionNormal`   |

use std::fmt;

use serde::Serialize;

use super::error::{LineRef, ObjError};
use super::numeric::parse_field;

/// Which index references a face token carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FaceFormat {
    /// `v`
    PositionOnly,
    /// `v/vt`
    PositionUV,
    /// `v/vt/vn`
    PositionUVNormal,
    /// `v//vn`
    PositionNormal,
}

/// Byte layout of one interleaved vertex, measured in `f32` elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VertexLayout {
    /// Floats per vertex
    pub stride: usize,
    /// Offset of the uv pair, if present
    pub uv_offset: Option<usize>,
    /// Offset of the normal, if present
    pub normal_offset: Option<usize>,
}

/// Index references decoded from one face token, still 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    /// Position reference
    pub position: i64,
    /// Texture coordinate reference
    pub uv: Option<i64>,
    /// Normal reference
    pub normal: Option<i64>,
}

/// Strip leading and trailing `/` from a face token
pub fn trim_token(token: &str) -> &str {
    token.trim_matches('/')
}

impl FaceFormat {
    /// Classify an already-trimmed token by its slash layout.
    ///
    /// Returns `None` for an empty token or one with more than three segments.
    pub fn classify(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        let segments: Vec<&str> = token.split('/').collect();
        match segments.as_slice() {
            [_] => Some(Self::PositionOnly),
            [_, _] => Some(Self::PositionUV),
            [_, "", _] => Some(Self::PositionNormal),
            [_, _, _] => Some(Self::PositionUVNormal),
            _ => None,
        }
    }

    /// Extract index references from `token`, which must already classify as `self`
    pub(crate) fn decode(self, token: &str, at: LineRef<'_>) -> Result<FaceVertex, ObjError> {
        let segments: Vec<&str> = token.split('/').collect();
        let index = |position: usize| -> Result<i64, ObjError> {
            let segment = segments.get(position).copied().unwrap_or_default();
            parse_field::<i64>(segment, position, at)
        };

        let vertex = match self {
            Self::PositionOnly => FaceVertex {
                position: index(0)?,
                uv: None,
                normal: None,
            },
            Self::PositionUV => FaceVertex {
                position: index(0)?,
                uv: Some(index(1)?),
                normal: None,
            },
            Self::PositionUVNormal => FaceVertex {
                position: index(0)?,
                uv: Some(index(1)?),
                normal: Some(index(2)?),
            },
            Self::PositionNormal => FaceVertex {
                position: index(0)?,
                uv: None,
                normal: Some(index(2)?),
            },
        };
        Ok(vertex)
    }

    /// Numeric code used in mesh bucket ids
    pub const fn code(self) -> u8 {
        match self {
            Self::PositionOnly => 0,
            Self::PositionUV => 1,
            Self::PositionUVNormal => 2,
            Self::PositionNormal => 3,
        }
    }

    /// Whether tokens reference texture coordinates
    pub const fn has_uv(self) -> bool {
        match self {
            Self::PositionUV | Self::PositionUVNormal => true,
            Self::PositionOnly | Self::PositionNormal => false,
        }
    }

    /// Whether tokens reference normals
    pub const fn has_normal(self) -> bool {
        match self {
            Self::PositionUVNormal | Self::PositionNormal => true,
            Self::PositionOnly | Self::PositionUV => false,
        }
    }

    /// Interleaved vertex layout: position, then uv, then normal.
    ///
    /// Normals are part of the vertex only when `emit_normals` is set, whether
    /// they come from the source or are synthesized.
    pub const fn layout(self, emit_normals: bool) -> VertexLayout {
        let uv_offset = if self.has_uv() { Some(3) } else { None };
        let after_uv = if self.has_uv() { 5 } else { 3 };
        if emit_normals {
            VertexLayout {
                stride: after_uv + 3,
                uv_offset,
                normal_offset: Some(after_uv),
            }
        } else {
            VertexLayout {
                stride: after_uv,
                uv_offset,
                normal_offset: None,
            }
        }
    }
}

impl fmt::Display for FaceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            Self::PositionOnly => "v",
            Self::PositionUV => "v/vt",
            Self::PositionUVNormal => "v/vt/vn",
            Self::PositionNormal => "v//vn",
        };
        f.write_str(shape)
    }
}
