use crate::{
    enums::VolumeFormat,
    geometry::Geometry,
    volume::{Volume, Voxel},
};

use log::{debug, warn};
use ndarray::{ArrayD, Axis, Ix3};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("Unsupported volume file {}, expected .nii or .nii.gz", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Expected a 3D volume, got {0} dimensions")]
    NotAVolume(usize),

    #[error("Volume geometry has a zero-length axis")]
    DegenerateGeometry,

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::error::NiftiError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a volume from a NIfTI-1 file
    ///
    /// # Arguments
    ///
    /// * `path` - `.nii` or `.nii.gz` file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be decoded, holds fewer than three
    /// dimensions or its affine is degenerate
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Volume, VolumeLoaderError> {
        let path = path.as_ref();
        if VolumeFormat::from_path(path).is_none() {
            return Err(VolumeLoaderError::UnsupportedFormat(path.to_path_buf()));
        }

        let object = ReaderOptions::new().read_file(path)?;
        let header = object.header().clone();
        let ndim = header.dim[0] as usize;
        if ndim < 3 {
            return Err(VolumeLoaderError::NotAVolume(ndim));
        }

        let geometry = Geometry::from_header(&header).ok_or(VolumeLoaderError::DegenerateGeometry)?;
        let data: ArrayD<Voxel> = object.into_volume().into_ndarray::<Voxel>()?;
        let data = Self::first_frame(data)?;

        debug!(
            "Loaded {} with dimensions {:?}, spacing {:?}",
            path.display(),
            data.dim(),
            geometry.spacing
        );

        Ok(Volume::with_geometry(
            data,
            geometry.spacing,
            geometry.origin,
            geometry.direction,
        ))
    }

    /// Drop every dimension beyond the third by keeping its first index
    fn first_frame(mut data: ArrayD<Voxel>) -> Result<ndarray::Array3<Voxel>, VolumeLoaderError> {
        if data.ndim() < 3 {
            return Err(VolumeLoaderError::NotAVolume(data.ndim()));
        }
        if data.shape()[3..].iter().any(|&extent| extent > 1) {
            warn!(
                "Volume has shape {:?}, only the first frame is used",
                data.shape()
            );
        }
        while data.ndim() > 3 {
            data = data.index_axis_move(Axis(3), 0);
        }
        Ok(data.into_dimensionality::<Ix3>()?)
    }
}
