use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "digiimport",
    author,
    version,
    about = "Import your pictures into your collection, sorted by year and month"
)]
pub struct Cli {
    /// The collection path (default taken from the config file)
    #[arg(long)]
    pub collection: Option<PathBuf>,

    /// Do nothing (just show what would be done)
    #[arg(short = 'n', long)]
    pub nothing: bool,

    /// Keep files in place, copying instead of moving
    #[arg(short = 'k', long)]
    pub keep: bool,

    /// Ignore EXIF data and take dates from file names only
    #[arg(long)]
    pub no_exif: bool,

    /// Config file to read instead of ~/.digipics.cfg
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write a log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level for the log file (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,

    /// Subdir below year/month, e.g. the event name
    pub subdir: Option<String>,
}
