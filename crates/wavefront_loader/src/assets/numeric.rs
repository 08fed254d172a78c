//! Numeric field parsing for whitespace-separated records

use std::str::FromStr;

use super::error::{LineRef, ObjError};
use crate::foundation::math::{Vec2, Vec3};

/// Parse every field as `T`, keeping input order.
///
/// Field count is not checked here; callers enforce arity first.
pub(crate) fn parse_fields<T: FromStr>(fields: &[&str], at: LineRef<'_>) -> Result<Vec<T>, ObjError> {
    fields
        .iter()
        .enumerate()
        .map(|(position, field)| parse_field(field, position, at))
        .collect()
}

/// Parse a single field, reporting `position` on failure
pub(crate) fn parse_field<T: FromStr>(field: &str, position: usize, at: LineRef<'_>) -> Result<T, ObjError> {
    field.parse::<T>().map_err(|_| ObjError::MalformedNumber {
        at: at.locate(),
        field: field.to_string(),
        position,
    })
}

/// Fail with `MalformedRecord` unless exactly `expected` fields follow `keyword`
pub(crate) fn expect_arity(
    keyword: &str,
    fields: &[&str],
    expected: usize,
    at: LineRef<'_>,
) -> Result<(), ObjError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ObjError::MalformedRecord {
            at: at.locate(),
            keyword: keyword.to_string(),
            expected,
            found: fields.len(),
        })
    }
}

/// `keyword x y z` as a vector
pub(crate) fn parse_vec3(keyword: &str, fields: &[&str], at: LineRef<'_>) -> Result<Vec3, ObjError> {
    expect_arity(keyword, fields, 3, at)?;
    let v: Vec<f32> = parse_fields(fields, at)?;
    Ok(Vec3::new(v[0], v[1], v[2]))
}

/// `keyword u v` as a vector
pub(crate) fn parse_vec2(keyword: &str, fields: &[&str], at: LineRef<'_>) -> Result<Vec2, ObjError> {
    expect_arity(keyword, fields, 2, at)?;
    let v: Vec<f32> = parse_fields(fields, at)?;
    Ok(Vec2::new(v[0], v[1]))
}

/// `keyword value` as a single scalar
pub(crate) fn parse_scalar<T: FromStr>(keyword: &str, fields: &[&str], at: LineRef<'_>) -> Result<T, ObjError> {
    expect_arity(keyword, fields, 1, at)?;
    parse_field(fields[0], 0, at)
}
