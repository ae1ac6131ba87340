pub mod cli;
pub mod config;
pub mod error;
pub mod exif;
pub mod import;
pub mod media;
pub mod photo;
pub mod resolve;
pub mod transfer;

pub use cli::Cli;
pub use config::{FileConfig, Settings};
pub use error::DigipicsError;
pub use exif::{DateTimeSource, ExifToolSource, NoExif};
pub use import::{EntryReport, ImportOptions, ImportStats, Importer, Outcome};
pub use photo::{DestinationPath, ImageFile};
pub use resolve::{DateSource, Notice, Resolution, resolve};
