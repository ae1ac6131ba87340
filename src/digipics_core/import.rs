use crate::digipics_core::error::{DigipicsError, Result};
use crate::digipics_core::exif::DateTimeSource;
use crate::digipics_core::photo::{DestinationPath, ImageFile};
use crate::digipics_core::resolve::{DateSource, Notice, resolve};
use crate::digipics_core::transfer::{TransferMode, ensure_dir, is_same_file, transfer};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Root of the collection; must exist.
    pub collection: PathBuf,
    /// Optional event folder below year/month.
    pub subdir: Option<String>,
    /// Report only, never touch the filesystem.
    pub dry_run: bool,
    /// Copy instead of move.
    pub keep: bool,
}

/// What happened to one entry of the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoPicture,
    Unprocessed,
    /// Dry run: where the picture would go.
    Planned {
        destination: PathBuf,
        source: DateSource,
    },
    Transferred {
        destination: PathBuf,
        source: DateSource,
        created_dir: Option<PathBuf>,
    },
}

/// One line of progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub path: PathBuf,
    pub notices: Vec<Notice>,
    pub outcome: Outcome,
}

impl EntryReport {
    pub fn destination(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Planned { destination, .. } | Outcome::Transferred { destination, .. } => {
                Some(destination.as_path())
            }
            Outcome::NoPicture | Outcome::Unprocessed => None,
        }
    }

    /// Everything after the path: notices, then what happened.
    pub fn status_line(&self) -> String {
        let mut line = String::new();
        for notice in &self.notices {
            line.push_str(&format!("{} ", notice));
        }
        match &self.outcome {
            Outcome::NoPicture => line.push_str("no picture"),
            Outcome::Unprocessed => {
                line.push_str("-> unprocessed (rename to YYYYMMDD_hhmmss or set exif data)")
            }
            Outcome::Planned { destination, .. } => {
                line.push_str(&format!("-> {}", destination.display()))
            }
            Outcome::Transferred {
                destination,
                created_dir,
                ..
            } => {
                if let Some(dir) = created_dir {
                    line.push_str(&format!("Dir '{}' created. ", dir.display()));
                }
                line.push_str(&format!("-> {}", destination.display()));
            }
        }
        line
    }
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path.display(), self.status_line())
    }
}

/// Statistics from an import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub transferred: usize,
    pub planned: usize,
    pub skipped: usize,
    pub unprocessed: usize,
    pub dirs_created: usize,
}

impl ImportStats {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::NoPicture => self.skipped += 1,
            Outcome::Unprocessed => self.unprocessed += 1,
            Outcome::Planned { .. } => self.planned += 1,
            Outcome::Transferred { created_dir, .. } => {
                self.transferred += 1;
                if created_dir.is_some() {
                    self.dirs_created += 1;
                }
            }
        }
    }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} transferred, {} planned, {} unprocessed, {} skipped ({} directories created)",
            self.transferred, self.planned, self.unprocessed, self.skipped, self.dirs_created
        )
    }
}

/// Sorts the pictures of a directory into the collection.
pub struct Importer {
    options: ImportOptions,
    exif: Box<dyn DateTimeSource>,
}

impl Importer {
    pub fn new(options: ImportOptions, exif: Box<dyn DateTimeSource>) -> Self {
        Importer { options, exif }
    }

    /// Process every entry directly under `source_dir`, printing one line per
    /// entry to stdout. The path is printed before the entry is handled, so a
    /// fatal error is shown next to the file that caused it.
    pub fn process(&mut self, source_dir: &Path) -> Result<ImportStats> {
        if self.options.dry_run {
            println!("[DRY RUN] Nothing will be changed");
        }
        self.process_entries(
            source_dir,
            |path| {
                print!("{} ", path.display());
                let _ = io::stdout().flush();
            },
            |report| println!("{}", report.status_line()),
        )
    }

    /// Like [`Importer::process`], handing each report to `on_entry` instead
    /// of printing it.
    pub fn process_with<F>(&mut self, source_dir: &Path, on_entry: F) -> Result<ImportStats>
    where
        F: FnMut(&EntryReport),
    {
        self.process_entries(source_dir, |_| {}, on_entry)
    }

    fn process_entries<S, F>(
        &mut self,
        source_dir: &Path,
        mut on_start: S,
        mut on_entry: F,
    ) -> Result<ImportStats>
    where
        S: FnMut(&Path),
        F: FnMut(&EntryReport),
    {
        if !source_dir.is_dir() {
            return Err(DigipicsError::NotADirectory(source_dir.to_path_buf()));
        }
        if !self.options.collection.is_dir() {
            return Err(DigipicsError::CollectionNotFound(
                self.options.collection.clone(),
            ));
        }

        log::info!(
            "Importing {} into {} ({}{})",
            source_dir.display(),
            self.options.collection.display(),
            if self.options.keep { "copy" } else { "move" },
            if self.options.dry_run { ", dry run" } else { "" }
        );

        // Listed up front so directories created during the run are not visited.
        let entries = WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| entry.map(|e| e.into_path()))
            .collect::<std::result::Result<Vec<PathBuf>, walkdir::Error>>()?;

        let mut stats = ImportStats::default();
        for path in entries {
            on_start(&path);
            let report = self.process_entry(&path)?;
            log::debug!("{:?}", report);
            stats.record(&report.outcome);
            on_entry(&report);
        }

        log::info!("Import complete: {}", stats);
        Ok(stats)
    }

    fn process_entry(&mut self, path: &Path) -> Result<EntryReport> {
        let Some(mut image) = ImageFile::from_path(path) else {
            return Ok(EntryReport {
                path: path.to_path_buf(),
                notices: Vec::new(),
                outcome: Outcome::NoPicture,
            });
        };

        image.exif_timestamp = match self.exif.date_time_original(&image.path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to read EXIF from {}: {}", image.path.display(), e);
                None
            }
        };

        let resolution = resolve(&image.filename, image.exif_timestamp.as_deref());
        let Some(resolved) = resolution.resolved else {
            return Ok(EntryReport {
                path: image.path,
                notices: resolution.notices,
                outcome: Outcome::Unprocessed,
            });
        };
        log::debug!(
            "{}: taken {} (from {})",
            image.filename,
            resolved.timestamp,
            resolved.source
        );

        let dest = DestinationPath::new(
            &self.options.collection,
            self.options.subdir.as_deref(),
            resolved.timestamp,
            &image.extension,
        )?;
        let destination = dest.path();

        let outcome = if self.options.dry_run {
            Outcome::Planned {
                destination,
                source: resolved.source,
            }
        } else {
            let created_dir = ensure_dir(&dest.dir)?.then(|| dest.dir.clone());
            if is_same_file(&image.path, &destination) {
                log::info!("{} is already in place", destination.display());
            } else {
                transfer(
                    &image.path,
                    &destination,
                    TransferMode::from_keep(self.options.keep),
                )?;
            }
            Outcome::Transferred {
                destination,
                source: resolved.source,
                created_dir,
            }
        };

        Ok(EntryReport {
            path: image.path,
            notices: resolution.notices,
            outcome,
        })
    }
}
