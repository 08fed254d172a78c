//! Math utilities and types
//!
//! Attribute arrays, materials and normal synthesis all share these aliases.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (positions, normals, colors)
pub type Vec3 = Vector3<f32>;

/// Flat normal of the triangle `(a, b, c)`.
///
/// Computed as `(b - a) × (c - a)` with `a` as pivot. The result is **not**
/// normalized: its length is twice the triangle area.
pub fn flat_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    let u = b - a;
    let v = c - a;
    u.cross(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_normal_unit_triangle() {
        let n = flat_normal(
            &Vec3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_flat_normal_is_unnormalized() {
        let n = flat_normal(
            &Vec3::new(1.0, 1.0, 1.0),
            &Vec3::new(3.0, 1.0, 1.0),
            &Vec3::new(1.0, 1.0, 4.0),
        );
        // (2,0,0) x (0,0,3) = (0,-6,0)
        assert_relative_eq!(n, Vec3::new(0.0, -6.0, 0.0));
    }

    #[test]
    fn test_flat_normal_winding_flips_sign() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(flat_normal(&a, &b, &c), -flat_normal(&a, &c, &b));
    }
}
