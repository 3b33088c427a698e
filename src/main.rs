use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

use volume_reorient::{BatchRunner, VolumeFormat, VolumeLoader};

/// Reorient a NIfTI volume into all 48 anatomical orientations
#[derive(Parser, Debug)]
#[command(name = "volume-reorient")]
#[command(about = "Write one reoriented copy of a NIfTI volume per orientation code")]
#[command(version)]
struct Cli {
    /// Input volume (.nii or .nii.gz)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory receiving <CODE>.nii[.gz] files
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let volume = match VolumeLoader::load_from_file(&cli.input) {
        Ok(volume) => volume,
        Err(e) => {
            error!("Failed to load {}: {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    // The loader already rejected any other extension
    let format = VolumeFormat::from_path(&cli.input).unwrap_or_default();

    match volume.orientation() {
        Some(code) => info!("Loaded {} ({})", cli.input.display(), code),
        None => info!("Loaded {}", cli.input.display()),
    }

    if let Err(e) = std::fs::create_dir_all(&cli.output_dir) {
        error!(
            "Failed to create output directory {}: {}",
            cli.output_dir.display(),
            e
        );
        process::exit(1);
    }

    // Per-case failures are already logged and do not change the exit status
    BatchRunner::new(&cli.output_dir, format).run(&volume);
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
