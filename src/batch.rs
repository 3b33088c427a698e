use crate::{
    enums::VolumeFormat,
    orientation::{ORIENTATION_TABLE, OrientationCode},
    reorient::{ReorientError, ReorientFilter},
    volume::Volume,
    volume_writer::{VolumeWriter, VolumeWriterError},
};

use log::{debug, error, info};
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single orientation case
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("reorientation failed: {0}")]
    Reorient(#[from] ReorientError),

    #[error("writing {} failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: VolumeWriterError,
    },
}

/// Outcome of a batch run, in table order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<(OrientationCode, PathBuf)>,
    pub failures: Vec<(OrientationCode, CaseError)>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }
}

/// Writes one reoriented copy of a volume per orientation code into
/// `<output_dir>/<CODE>.<ext>`.
pub struct BatchRunner {
    output_dir: PathBuf,
    format: VolumeFormat,
}

impl BatchRunner {
    pub fn new(output_dir: impl Into<PathBuf>, format: VolumeFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_path(&self, code: &str) -> PathBuf {
        self.output_dir
            .join(format!("{code}.{}", self.format.extension()))
    }

    /// Run every entry of the orientation table against `volume`.
    ///
    /// A failing entry is logged and recorded, the remaining entries still
    /// run.
    pub fn run(&self, volume: &Volume) -> BatchReport {
        let mut report = BatchReport::default();
        for (name, code) in ORIENTATION_TABLE.iter() {
            info!("Case {}: {}", name, code.id());
            match self.run_case(volume, name, *code) {
                Ok(path) => {
                    debug!("Wrote {}", path.display());
                    report.written.push((*code, path));
                }
                Err(e) => {
                    error!("Case {} failed: {}", name, e);
                    report.failures.push((*code, e));
                }
            }
        }
        report
    }

    fn run_case(
        &self,
        volume: &Volume,
        name: &str,
        code: OrientationCode,
    ) -> Result<PathBuf, CaseError> {
        let reoriented = ReorientFilter::new(code)
            .use_image_direction(true)
            .execute(volume)?;

        let path = self.output_path(name);
        VolumeWriter::write_to_file(&reoriented, &path).map_err(|source| CaseError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_uses_code_and_extension() {
        let runner = BatchRunner::new("/tmp/out", VolumeFormat::NiftiGz);
        assert_eq!(runner.output_path("RAS"), PathBuf::from("/tmp/out/RAS.nii.gz"));

        let runner = BatchRunner::new("/tmp/out", VolumeFormat::Nifti);
        assert_eq!(runner.output_path("LPS"), PathBuf::from("/tmp/out/LPS.nii"));
    }

    #[test]
    fn test_empty_volume_fails_every_case_without_aborting() {
        let temp_dir = TempDir::new().unwrap();
        let runner = BatchRunner::new(temp_dir.path(), VolumeFormat::Nifti);

        let report = runner.run(&Volume::new(Array3::zeros((0, 2, 2))));

        assert_eq!(report.attempted(), 48);
        assert!(report.written.is_empty());
        assert!(
            report
                .failures
                .iter()
                .all(|(_, e)| matches!(e, CaseError::Reorient(ReorientError::EmptyVolume(_))))
        );
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_output_dir_is_reported_per_case() {
        let temp_dir = TempDir::new().unwrap();
        let runner = BatchRunner::new(temp_dir.path().join("missing"), VolumeFormat::Nifti);

        let report = runner.run(&Volume::new(Array3::zeros((2, 2, 2))));

        assert_eq!(report.failures.len(), 48);
        assert!(
            report
                .failures
                .iter()
                .all(|(_, e)| matches!(e, CaseError::Write { .. }))
        );
    }

    #[test]
    fn test_report_follows_table_order() {
        let temp_dir = TempDir::new().unwrap();
        let runner = BatchRunner::new(temp_dir.path(), VolumeFormat::Nifti);

        let report = runner.run(&Volume::new(Array3::zeros((2, 3, 4))));

        let written: Vec<_> = report.written.iter().map(|(code, _)| *code).collect();
        let table: Vec<_> = ORIENTATION_TABLE.iter().map(|(_, code)| *code).collect();
        assert_eq!(written, table);
        for (code, path) in &report.written {
            assert_eq!(path, &runner.output_path(&code.to_string()));
            assert!(path.is_file());
        }
    }
}
