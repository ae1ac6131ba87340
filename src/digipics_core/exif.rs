use crate::digipics_core::error::{DigipicsError, Result};
use exiftool::ExifTool;
use serde::Deserialize;
use std::path::Path;

/// Capability to read the raw EXIF capture date of a picture.
pub trait DateTimeSource {
    /// Raw `DateTimeOriginal` value (`YYYY:MM:DD HH:MM:SS`), `Ok(None)` when
    /// the picture carries none.
    fn date_time_original(&mut self, path: &Path) -> Result<Option<String>>;
}

/// Raw EXIF data from exiftool. Only the capture date is of interest.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct RawExifInfo {
    #[serde(default)]
    date_time_original: Option<String>,
}

impl RawExifInfo {
    fn into_date_time_original(self) -> Option<String> {
        self.date_time_original
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Reads EXIF through a single long-running exiftool process.
///
/// The process is spawned on first use. If exiftool is missing, a warning is
/// logged once and every picture is reported as having no EXIF date.
#[derive(Default)]
pub struct ExifToolSource {
    exiftool: Option<ExifTool>,
    unavailable: bool,
}

impl ExifToolSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Option<&mut ExifTool> {
        if self.exiftool.is_none() && !self.unavailable {
            match ExifTool::new() {
                Ok(exiftool) => self.exiftool = Some(exiftool),
                Err(e) => {
                    log::warn!("ExifTool not available, EXIF dates are ignored: {}", e);
                    self.unavailable = true;
                }
            }
        }
        self.exiftool.as_mut()
    }
}

impl DateTimeSource for ExifToolSource {
    fn date_time_original(&mut self, path: &Path) -> Result<Option<String>> {
        let Some(exiftool) = self.handle() else {
            return Ok(None);
        };
        let raw: RawExifInfo = exiftool
            .read_metadata(path, &[])
            .map_err(|e| DigipicsError::Exiftool(e.to_string()))?;
        Ok(raw.into_date_time_original())
    }
}

/// Ignores EXIF entirely; dates come from file names only.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExif;

impl DateTimeSource for NoExif {
    fn date_time_original(&mut self, _path: &Path) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_exif_date() {
        let raw: RawExifInfo = serde_json::from_str(
            r#"{"SourceFile": "a.jpg", "DateTimeOriginal": "2024:05:21 12:30:00 ", "ISO": 200}"#,
        )
        .unwrap();
        assert_eq!(
            raw.into_date_time_original().as_deref(),
            Some("2024:05:21 12:30:00")
        );
    }

    #[test]
    fn test_raw_exif_without_date() {
        let raw: RawExifInfo =
            serde_json::from_str(r#"{"SourceFile": "a.png", "MIMEType": "image/png"}"#).unwrap();
        assert_eq!(raw.into_date_time_original(), None);

        let raw: RawExifInfo =
            serde_json::from_str(r#"{"SourceFile": "a.png", "DateTimeOriginal": ""}"#).unwrap();
        assert_eq!(raw.into_date_time_original(), None);
    }

    #[test]
    fn test_no_exif_source() {
        let mut source = NoExif;
        assert_eq!(source.date_time_original(Path::new("a.jpg")).unwrap(), None);
    }
}
