use crate::{enums::VolumeFormat, geometry::Geometry, volume::Volume};

use nifti::{NiftiHeader, writer::WriterOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeWriterError {
    #[error("Unsupported output file {}, expected .nii or .nii.gz", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::error::NiftiError),
}

pub struct VolumeWriter;

impl VolumeWriter {
    /// Write a volume as a NIfTI-1 file, gzip compressed for `.nii.gz`.
    /// An existing file at `path` is overwritten.
    pub fn write_to_file(volume: &Volume, path: impl AsRef<Path>) -> Result<(), VolumeWriterError> {
        let path = path.as_ref();
        if VolumeFormat::from_path(path).is_none() {
            return Err(VolumeWriterError::UnsupportedFormat(path.to_path_buf()));
        }

        let header = Self::header_for(volume);
        WriterOptions::new(path)
            .reference_header(&header)
            .write_nifti(volume.data())?;
        Ok(())
    }

    fn header_for(volume: &Volume) -> NiftiHeader {
        let mut header = NiftiHeader::default();
        Geometry::of(volume).apply_to_header(&mut header);
        // Voxels are stored already scaled
        header.scl_slope = 1.0;
        header.scl_inter = 0.0;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume_loader::VolumeLoader;
    use ndarray::Array3;
    use rstest::rstest;
    use tempfile::TempDir;

    fn lps_volume() -> Volume {
        let data = Array3::from_shape_fn((3, 4, 5), |(i, j, k)| (i * 100 + j * 10 + k) as i16);
        Volume::with_geometry(
            data,
            [0.5, 1.0, 2.0],
            [12.0, -7.5, 3.0],
            [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]],
        )
    }

    #[rstest]
    #[case("volume.nii")]
    #[case("volume.nii.gz")]
    fn test_write_then_load(#[case] file_name: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(file_name);
        let volume = lps_volume();

        VolumeWriter::write_to_file(&volume, &path).unwrap();
        let loaded = VolumeLoader::load_from_file(&path).unwrap();

        assert_eq!(loaded, volume);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("volume.nii");
        std::fs::write(&path, b"stale").unwrap();

        let volume = lps_volume();
        VolumeWriter::write_to_file(&volume, &path).unwrap();
        assert_eq!(VolumeLoader::load_from_file(&path).unwrap(), volume);
    }

    #[test]
    fn test_gz_output_is_compressed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("volume.nii.gz");
        VolumeWriter::write_to_file(&lps_volume(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("volume.nrrd");
        let result = VolumeWriter::write_to_file(&lps_volume(), &path);
        assert!(matches!(result, Err(VolumeWriterError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }
}
