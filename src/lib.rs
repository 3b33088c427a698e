//! # volume-reorient library
//!
//! This crate reorients a 3D NIfTI volume into every one of the 48 valid
//! anatomical coordinate orientations and writes one file per orientation,
//! so each result can be inspected by eye in a viewer.
//!
//! An orientation is written as a three letter code such as `RAS` or `LPS`.
//! Letter `i` names the anatomical direction in which voxel index `i`
//! increases:
//!  - Right / Left
//!  - Anterior / Posterior
//!  - Superior / Inferior
//!
//! The source orientation of a volume is derived from the direction
//! cosines stored in its sform (or qform) affine. Reorientation permutes
//! and flips voxel axes and rewrites spacing, origin and direction, so every
//! voxel keeps its physical position. Volumes are assumed to have the
//! following attributes:
//!   - NIfTI-1, either `.nii` or gzip compressed `.nii.gz`
//!   - Three spatial dimensions (only the first frame of 4D data is used)
//!   - Integer voxels that fit into `i16`
//!
//! # Examples
//!
//! ## Writing all orientations of a volume
//!
//! ```no_run
//! # use volume_reorient::{BatchRunner, VolumeFormat, VolumeLoader};
//! let volume = VolumeLoader::load_from_file("InputLPS.nii.gz")
//!     .expect("should have loaded the input volume");
//! let report = BatchRunner::new("out", VolumeFormat::NiftiGz).run(&volume);
//! for (code, error) in &report.failures {
//!     eprintln!("{code}: {error}");
//! }
//! ```
//!
//! ## Reorienting a single volume
//!
//! ```no_run
//! # use volume_reorient::{ReorientFilter, VolumeLoader, orientation};
//! let volume = VolumeLoader::load_from_file("InputLPS.nii")
//!     .expect("should have loaded the input volume");
//! let ras = orientation::lookup("RAS").expect("RAS is a valid code");
//! let reoriented = ReorientFilter::new(ras)
//!     .use_image_direction(true)
//!     .execute(&volume)
//!     .expect("should have reoriented the volume");
//! assert_eq!(reoriented.orientation(), Some(ras));
//! ```

pub mod batch;
pub mod enums;
mod geometry;
pub mod orientation;
pub mod reorient;
pub mod volume;
pub mod volume_loader;
pub mod volume_writer;

pub use batch::{BatchReport, BatchRunner, CaseError};
pub use enums::{AnatomicalAxis, AxisDirection, VolumeFormat};
pub use orientation::{ORIENTATION_TABLE, OrientationCode, ParseOrientationError};
pub use reorient::{ReorientError, ReorientFilter};
pub use volume::Volume;
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
pub use volume_writer::{VolumeWriter, VolumeWriterError};
