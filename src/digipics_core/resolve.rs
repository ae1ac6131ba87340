use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use time::PrimitiveDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Date format used in EXIF data.
pub const EXIF_DATE_FORMAT: &[FormatItem] =
    format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

/// Date format embedded in Signal exports (`signal-2022-01-05-153000.jpg`).
pub const SIGNAL_DATE_FORMAT: &[FormatItem] = format_description!(
    "[year]-[month padding:none]-[day padding:none]-[hour][minute][second]"
);

/// Date format embedded in WhatsApp exports
/// (`WhatsApp Image 2021-12-31 at 23.59.59.jpeg`).
pub const WHATSAPP_DATE_FORMAT: &[FormatItem] =
    format_description!("[year]-[month]-[day] at [hour].[minute].[second]");

/// Canonical picture name in the collection (`20200704_081500`).
pub const PICTURE_NAME_FORMAT: &[FormatItem] =
    format_description!("[year][month][day]_[hour][minute][second]");

const SIGNAL_PREFIX: &str = "signal";
const WHATSAPP_PREFIX: &str = "WhatsApp Image";

static SIGNAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^signal-(\d+-\d+-\d+-\d+)\.jp.*g").expect("signal pattern compiles")
});

static WHATSAPP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^WhatsApp Image (\d{4}-\d{2}-\d{2} at \d{2}\.\d{2}\.\d{2})\.jp.*g")
        .expect("whatsapp pattern compiles")
});

/// Where a capture timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    Exif,
    Signal,
    WhatsApp,
    CanonicalName,
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateSource::Exif => "exif",
            DateSource::Signal => "signal",
            DateSource::WhatsApp => "whatsapp",
            DateSource::CanonicalName => "filename",
        };
        f.write_str(name)
    }
}

/// Messaging app naming conventions that are recognized by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    Signal,
    WhatsApp,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Signal => write!(f, "Signal"),
            Convention::WhatsApp => write!(f, "WhatsApp"),
        }
    }
}

/// Something worth telling the user that did not stop resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// EXIF date was present but unreadable.
    InvalidExif(String),
    /// Name carries a known prefix but not the full pattern.
    NamingViolation {
        convention: Convention,
        filename: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidExif(_) => write!(f, "wrong exif data"),
            Notice::NamingViolation {
                convention,
                filename,
            } => write!(f, "{convention} image '{filename}' has not the right convention"),
        }
    }
}

/// Inputs available to every strategy.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInput<'a> {
    pub filename: &'a str,
    pub exif: Option<&'a str>,
}

/// Outcome of a single strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Found(PrimitiveDateTime),
    Rejected(Notice),
    NotApplicable,
}

pub type Strategy = fn(&ResolveInput<'_>) -> Attempt;

/// Strategies in order of authority. The first `Found` wins.
pub const STRATEGIES: &[(DateSource, Strategy)] = &[
    (DateSource::Exif, from_exif as Strategy),
    (DateSource::Signal, from_signal_name as Strategy),
    (DateSource::WhatsApp, from_whatsapp_name as Strategy),
    (DateSource::CanonicalName, from_canonical_name as Strategy),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub timestamp: PrimitiveDateTime,
    pub source: DateSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub resolved: Option<ResolvedDate>,
    pub notices: Vec<Notice>,
}

/// Resolve the capture time of a picture from its EXIF date and file name.
///
/// Never fails: unparseable inputs only add notices and move on to the next
/// strategy. `resolved` is `None` when no strategy produced a timestamp.
pub fn resolve(filename: &str, exif: Option<&str>) -> Resolution {
    let input = ResolveInput { filename, exif };
    let mut notices = Vec::new();

    for (source, strategy) in STRATEGIES {
        match strategy(&input) {
            Attempt::Found(timestamp) => {
                return Resolution {
                    resolved: Some(ResolvedDate {
                        timestamp,
                        source: *source,
                    }),
                    notices,
                };
            }
            Attempt::Rejected(notice) => notices.push(notice),
            Attempt::NotApplicable => {}
        }
    }

    Resolution {
        resolved: None,
        notices,
    }
}

pub fn from_exif(input: &ResolveInput<'_>) -> Attempt {
    let Some(raw) = input.exif.map(str::trim).filter(|s| !s.is_empty()) else {
        return Attempt::NotApplicable;
    };
    match PrimitiveDateTime::parse(raw, EXIF_DATE_FORMAT) {
        Ok(dt) => Attempt::Found(dt),
        Err(e) => {
            log::debug!("Unreadable EXIF date '{}': {}", raw, e);
            Attempt::Rejected(Notice::InvalidExif(raw.to_string()))
        }
    }
}

pub fn from_signal_name(input: &ResolveInput<'_>) -> Attempt {
    if !input.filename.starts_with(SIGNAL_PREFIX) {
        return Attempt::NotApplicable;
    }
    match_convention(input.filename, &SIGNAL_PATTERN, SIGNAL_DATE_FORMAT, Convention::Signal)
}

pub fn from_whatsapp_name(input: &ResolveInput<'_>) -> Attempt {
    if !input.filename.starts_with(WHATSAPP_PREFIX) {
        return Attempt::NotApplicable;
    }
    match_convention(
        input.filename,
        &WHATSAPP_PATTERN,
        WHATSAPP_DATE_FORMAT,
        Convention::WhatsApp,
    )
}

pub fn from_canonical_name(input: &ResolveInput<'_>) -> Attempt {
    let stem = Path::new(input.filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(input.filename);
    match PrimitiveDateTime::parse(stem, PICTURE_NAME_FORMAT) {
        Ok(dt) => Attempt::Found(dt),
        Err(_) => Attempt::NotApplicable,
    }
}

fn match_convention(
    filename: &str,
    pattern: &Regex,
    format: &[FormatItem],
    convention: Convention,
) -> Attempt {
    let violation = || {
        Attempt::Rejected(Notice::NamingViolation {
            convention,
            filename: filename.to_string(),
        })
    };

    let Some(captured) = pattern.captures(filename).and_then(|c| c.get(1)) else {
        return violation();
    };
    match PrimitiveDateTime::parse(captured.as_str(), format) {
        Ok(dt) => Attempt::Found(dt),
        Err(e) => {
            log::debug!("'{}' matches {} naming but not a date: {}", filename, convention, e);
            violation()
        }
    }
}
