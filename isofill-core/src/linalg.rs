/// Small 3×3 linear algebra helpers used by the transform and visibility code
use nalgebra::{Matrix3, Vector3};

/// Multiply two 3×3 matrices (`a · b`)
pub fn multiply_matrix(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix3<f64> {
    a * b
}

/// Transpose a 3×3 matrix
pub fn transpose(m: &Matrix3<f64>) -> Matrix3<f64> {
    m.transpose()
}

/// Multiply a row vector by a matrix (`v · m`)
pub fn row_times_matrix(v: &Vector3<f64>, m: &Matrix3<f64>) -> Vector3<f64> {
    (v.transpose() * m).transpose()
}

/// Cosine of the angle between two vectors.
///
/// Only meaningful for non-zero vectors; a zero vector yields NaN.
pub fn cosine_similarity(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    v1.dot(v2) / (v1.norm() * v2.norm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_multiply_by_identity() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(multiply_matrix(&m, &Matrix3::identity()), m);
        assert_eq!(multiply_matrix(&Matrix3::identity(), &m), m);
    }

    #[test]
    fn test_multiply_matrix() {
        let a = Matrix3::new(1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0);
        let b = Matrix3::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let expected = Matrix3::new(2.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0);
        assert_eq!(multiply_matrix(&a, &b), expected);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let t = transpose(&m);
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(t[(2, 0)], 3.0);
        assert_eq!(transpose(&t), m);
    }

    #[test]
    fn test_row_times_matrix() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let m = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0);
        assert_eq!(row_times_matrix(&v, &m), Vector3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_cosine_similarity() {
        let x = Vector3::new(2.0, 0.0, 0.0);
        assert_relative_eq!(cosine_similarity(&x, &Vector3::new(0.5, 0.0, 0.0)), 1.0);
        assert_relative_eq!(cosine_similarity(&x, &Vector3::new(-3.0, 0.0, 0.0)), -1.0);
        assert_relative_eq!(cosine_similarity(&x, &Vector3::new(0.0, 1.0, 0.0)), 0.0);
        assert_relative_eq!(
            cosine_similarity(&x, &Vector3::new(1.0, 1.0, 0.0)),
            std::f64::consts::FRAC_1_SQRT_2,
            epsilon = 1e-12
        );
    }
}
