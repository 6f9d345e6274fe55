/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation about the vertical axis
pub fn yaw_matrix(angle: f64) -> [[f64; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    [[cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]]
}

/// Rotation about the horizontal axis
pub fn pitch_matrix(angle: f64) -> [[f64; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]]
}

/// Sine oscillation around `base`, driven by the frame counter
pub fn pulse(base: f64, amplitude: f64, frame: u64, frequency: f64) -> f64 {
    base + amplitude * (frame as f64 * frequency).sin()
}

/// Arithmetic mean, zero for an empty slice
pub fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn combined_rotation_matches_sequential() {
        let p = [12.0, -30.0, 45.0];
        let yaw = yaw_matrix(0.7);
        let pitch = pitch_matrix(-0.2);
        let sequential = multiply_matrix_vector(&pitch, &multiply_matrix_vector(&yaw, &p));
        let combined = multiply_matrix_vector(&multiply_matrices(&pitch, &yaw), &p);
        for i in 0..3 {
            assert_relative_eq!(sequential[i], combined[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn yaw_quarter_turn_moves_x_into_z() {
        let rotated = multiply_matrix_vector(&yaw_matrix(std::f64::consts::FRAC_PI_2), &[1.0, 0.0, 0.0]);
        assert_relative_eq!(rotated[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn pulse_stays_within_amplitude() {
        for frame in 0..500 {
            let v = pulse(0.65, 0.35, frame, 0.07);
            assert!((0.3..=1.0).contains(&v));
        }
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(Vec::<f64>::new().into_iter()), 0.0);
        assert_relative_eq!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
    }
}
