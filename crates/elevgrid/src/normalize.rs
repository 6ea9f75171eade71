//! Conversion from absolute samples to grid-relative samples.

use crate::matrix::{AbsoluteMatrix, AbsoluteSample, ElevationMatrix, RelativeMatrix, RelativeSample};

impl From<&AbsoluteSample> for RelativeSample {
    fn from(sample: &AbsoluteSample) -> Self {
        RelativeSample {
            x_index: sample.x_index,
            y_index: sample.y_index,
            elevation: sample.elevation,
        }
    }
}

/// Strip geographic coordinates, keeping grid indices and elevation.
///
/// Row-major order and matrix shape are preserved exactly.
pub fn to_relative(matrix: &AbsoluteMatrix) -> RelativeMatrix {
    let rows = matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(RelativeSample::from).collect())
        .collect();
    ElevationMatrix::from_rows_unchecked(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute(width: usize) -> AbsoluteMatrix {
        let rows = (0..width)
            .map(|y| {
                (0..width)
                    .map(|x| AbsoluteSample {
                        x_index: x,
                        y_index: y,
                        latitude: 40.0 + x as f64,
                        longitude: -100.0 + y as f64,
                        elevation: (y * 10 + x) as f64,
                    })
                    .collect()
            })
            .collect();
        ElevationMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_shape_preserved() {
        let matrix = absolute(5);
        let relative = to_relative(&matrix);
        assert_eq!(relative.width(), matrix.width());
        for (a, b) in relative.rows().iter().zip(matrix.rows()) {
            assert_eq!(a.len(), b.len());
        }
    }

    #[test]
    fn test_elevations_and_indices_preserved() {
        let matrix = absolute(3);
        let relative = to_relative(&matrix);
        for (r, a) in relative.iter().zip(matrix.iter()) {
            assert_eq!(r.x_index, a.x_index);
            assert_eq!(r.y_index, a.y_index);
            assert_eq!(r.elevation, a.elevation);
        }
        assert_eq!(relative.get(2, 1).unwrap().elevation, 12.0);
        assert!(relative.validate().is_ok());
    }
}
