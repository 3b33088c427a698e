use crate::orientation::{Direction, OrientationCode};

use ndarray::Array3;

pub const IDENTITY_DIRECTION: Direction = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Voxel type volumes are loaded as
pub type Voxel = i16;

/// A 3D scalar image placed in NIfTI world space (RAS+, millimetres).
///
/// `data` is indexed `[i, j, k]`. A voxel index maps to the world point
/// `origin + direction * (spacing * index)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub data: Array3<Voxel>,
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    pub direction: Direction,
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(Array3::zeros((0, 0, 0)))
    }
}

impl Volume {
    /// Volume with unit spacing, zero origin and identity direction
    pub fn new(data: Array3<Voxel>) -> Self {
        Self::with_geometry(data, [1.0; 3], [0.0; 3], IDENTITY_DIRECTION)
    }

    pub fn with_geometry(
        data: Array3<Voxel>,
        spacing: [f64; 3],
        origin: [f64; 3],
        direction: Direction,
    ) -> Self {
        Self {
            data,
            spacing,
            origin,
            direction,
        }
    }

    /// Get the dimensions of the volume (i, j, k)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<Voxel> {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Orientation stored in the direction metadata, if it has one
    pub fn orientation(&self) -> Option<OrientationCode> {
        OrientationCode::from_direction(&self.direction)
    }

    /// World position of a voxel index
    pub fn index_to_physical(&self, index: [usize; 3]) -> [f64; 3] {
        let mut point = self.origin;
        for (row, coordinate) in point.iter_mut().enumerate() {
            for col in 0..3 {
                *coordinate += self.direction[row][col] * self.spacing[col] * index[col] as f64;
            }
        }
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volume_is_empty() {
        let volume = Volume::default();
        assert!(volume.is_empty());
        assert_eq!(volume.orientation().map(|code| code.to_string()), Some("RAS".into()));
    }

    #[test]
    fn test_index_to_physical_applies_geometry() {
        let direction = [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]];
        let volume = Volume::with_geometry(
            Array3::zeros((4, 4, 4)),
            [0.5, 2.0, 3.0],
            [10.0, 20.0, 30.0],
            direction,
        );

        assert_eq!(volume.index_to_physical([0, 0, 0]), [10.0, 20.0, 30.0]);
        assert_eq!(volume.index_to_physical([2, 1, 1]), [9.0, 18.0, 33.0]);
        assert_eq!(volume.orientation().map(|code| code.to_string()), Some("LPS".into()));
    }
}
