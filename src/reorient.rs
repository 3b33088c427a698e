use crate::orientation::{OrientationCode, RAS};
use crate::volume::Volume;

use ndarray::Axis;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorientError {
    #[error("Cannot reorient an empty volume of dimensions {0:?}")]
    EmptyVolume((usize, usize, usize)),

    #[error("Direction metadata does not resolve to an orientation")]
    UndeterminedOrientation,
}

/// Permutes and flips voxel axes so the data layout matches a desired
/// orientation, keeping every voxel at its physical position.
///
/// The source orientation is either read from the volume's direction
/// metadata (`use_image_direction(true)`) or taken from
/// `given_orientation`, which defaults to `RAS`.
#[derive(Debug, Clone)]
pub struct ReorientFilter {
    desired: OrientationCode,
    given: OrientationCode,
    use_image_direction: bool,
}

impl ReorientFilter {
    pub fn new(desired: OrientationCode) -> Self {
        Self {
            desired,
            given: RAS,
            use_image_direction: false,
        }
    }

    pub fn use_image_direction(mut self, enabled: bool) -> Self {
        self.use_image_direction = enabled;
        self
    }

    pub fn given_orientation(mut self, given: OrientationCode) -> Self {
        self.given = given;
        self
    }

    pub fn desired(&self) -> OrientationCode {
        self.desired
    }

    /// Orientation the filter treats `volume` as having
    pub fn source_orientation(&self, volume: &Volume) -> Result<OrientationCode, ReorientError> {
        if self.use_image_direction {
            volume
                .orientation()
                .ok_or(ReorientError::UndeterminedOrientation)
        } else {
            Ok(self.given)
        }
    }

    pub fn execute(&self, volume: &Volume) -> Result<Volume, ReorientError> {
        if volume.is_empty() {
            return Err(ReorientError::EmptyVolume(volume.dim()));
        }
        let source = self.source_orientation(volume)?;
        let (permutation, flips) = source.mapping_to(&self.desired);

        let mut view = volume.data.view().permuted_axes(permutation);
        for (axis, flip) in flips.iter().enumerate() {
            if *flip {
                view.invert_axis(Axis(axis));
            }
        }
        let data = view.as_standard_layout().into_owned();

        // Source voxel that lands on output index (0, 0, 0)
        let shape = volume.data.shape();
        let mut corner = [0; 3];
        for (t, &s) in permutation.iter().enumerate() {
            if flips[t] {
                corner[s] = shape[s] - 1;
            }
        }

        let mut spacing = [0.0; 3];
        let mut direction = [[0.0; 3]; 3];
        for (t, &s) in permutation.iter().enumerate() {
            let sign = if flips[t] { -1.0 } else { 1.0 };
            spacing[t] = volume.spacing[s];
            for (row, cosines) in direction.iter_mut().enumerate() {
                cosines[t] = sign * volume.direction[row][s];
            }
        }

        Ok(Volume::with_geometry(
            data,
            spacing,
            volume.index_to_physical(corner),
            direction,
        ))
    }
}
