use crate::digipics_core::error::Result;
use crate::digipics_core::media::{normalize_extension, picture_extension};
use crate::digipics_core::resolve::PICTURE_NAME_FORMAT;
use std::path::{Path, PathBuf};
use time::PrimitiveDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

const YEAR_DIR_FORMAT: &[FormatItem] = format_description!("[year]");
const MONTH_DIR_FORMAT: &[FormatItem] = format_description!("[month]");

/// A picture found directly under the source directory.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub filename: String,
    /// Lowercased, as found on disk (`jpeg` is not normalized here).
    pub extension: String,
    pub exif_timestamp: Option<String>,
}

impl ImageFile {
    /// Returns `None` unless `path` is a regular file with a picture extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        let extension = picture_extension(path)?;
        let filename = path.file_name()?.to_string_lossy().to_string();

        Some(ImageFile {
            path: path.to_path_buf(),
            filename,
            extension,
            exif_timestamp: None,
        })
    }
}

/// Location of a picture inside the collection:
/// `<collection>/YYYY/MM[/subdir]/YYYYMMDD_HHMMSS.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPath {
    pub dir: PathBuf,
    pub file_name: String,
}

impl DestinationPath {
    pub fn new(
        collection: &Path,
        subdir: Option<&str>,
        taken_at: PrimitiveDateTime,
        extension: &str,
    ) -> Result<Self> {
        let mut dir = collection
            .join(taken_at.format(YEAR_DIR_FORMAT)?)
            .join(taken_at.format(MONTH_DIR_FORMAT)?);
        if let Some(subdir) = subdir.filter(|s| !s.is_empty()) {
            dir.push(subdir);
        }

        let file_name = format!(
            "{}.{}",
            taken_at.format(PICTURE_NAME_FORMAT)?,
            normalize_extension(&extension.to_lowercase())
        );

        Ok(DestinationPath { dir, file_name })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use time::macros::datetime;

    #[test]
    fn test_destination_without_subdir() {
        let dest = DestinationPath::new(
            Path::new("/pics"),
            None,
            datetime!(2022-01-05 15:30:00),
            "jpg",
        )
        .unwrap();
        assert_eq!(dest.dir, Path::new("/pics/2022/01"));
        assert_eq!(dest.file_name, "20220105_153000.jpg");
        assert_eq!(dest.path(), Path::new("/pics/2022/01/20220105_153000.jpg"));
    }

    #[test]
    fn test_destination_with_subdir() {
        let dest = DestinationPath::new(
            Path::new("/pics"),
            Some("Sommerfest"),
            datetime!(2020-07-04 08:15:00),
            "png",
        )
        .unwrap();
        assert_eq!(
            dest.path(),
            Path::new("/pics/2020/07/Sommerfest/20200704_081500.png")
        );
    }

    #[test]
    fn test_empty_subdir_is_ignored() {
        let dest = DestinationPath::new(
            Path::new("/pics"),
            Some(""),
            datetime!(2020-07-04 08:15:00),
            "png",
        )
        .unwrap();
        assert_eq!(dest.dir, Path::new("/pics/2020/07"));
    }

    #[test]
    fn test_extension_is_normalized() {
        let dest = DestinationPath::new(
            Path::new("/pics"),
            None,
            datetime!(2021-12-31 23:59:59),
            "JPEG",
        )
        .unwrap();
        assert_eq!(dest.file_name, "20211231_235959.jpg");
    }

    #[test]
    fn test_image_file_from_path() {
        let temp = assert_fs::TempDir::new().unwrap();
        let photo = temp.child("Holiday.JPG");
        photo.write_binary(b"jpeg").unwrap();
        temp.child("notes.txt").touch().unwrap();
        temp.child("album.jpg").create_dir_all().unwrap();

        let image = ImageFile::from_path(photo.path()).unwrap();
        assert_eq!(image.filename, "Holiday.JPG");
        assert_eq!(image.extension, "jpg");
        assert_eq!(image.exif_timestamp, None);

        assert!(ImageFile::from_path(&temp.path().join("notes.txt")).is_none());
        assert!(ImageFile::from_path(&temp.path().join("album.jpg")).is_none());
        assert!(ImageFile::from_path(&temp.path().join("missing.jpg")).is_none());
    }
}
