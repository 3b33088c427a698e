//! Log output of a batch run. Kept in its own test binary because the
//! logger is process-global.

use log::{Level, LevelFilter, Log, Metadata, Record};
use ndarray::Array3;
use std::sync::Mutex;
use tempfile::TempDir;
use volume_reorient::{BatchRunner, ORIENTATION_TABLE, Volume, VolumeFormat};

struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

#[test]
fn test_cases_are_logged_in_table_order_with_one_failure() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let output_dir = TempDir::new().unwrap();
    std::fs::create_dir(output_dir.path().join("RAS.nii")).unwrap();
    let volume = Volume::with_geometry(
        Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 100 + j * 10 + k) as i16),
        [1.0, 1.0, 1.0],
        [0.0; 3],
        [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]],
    );

    let report = BatchRunner::new(output_dir.path(), VolumeFormat::Nifti).run(&volume);
    assert_eq!(report.failures.len(), 1);

    let records = CAPTURE.records.lock().unwrap();
    let cases: Vec<&str> = records
        .iter()
        .filter(|(level, message)| *level == Level::Info && message.starts_with("Case "))
        .map(|(_, message)| message.as_str())
        .collect();
    let expected: Vec<String> = ORIENTATION_TABLE
        .iter()
        .map(|(name, code)| format!("Case {name}: {}", code.id()))
        .collect();
    assert_eq!(cases, expected);

    let errors: Vec<&str> = records
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message.as_str())
        .collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].starts_with("Case RAS failed: "), "{}", errors[0]);
}
