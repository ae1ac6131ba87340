use anyhow::{Context, Result};
use clap::Parser;
use digipics::digipics_core::{Cli, DateTimeSource, ExifToolSource, Importer, NoExif, Settings};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];

    if let Some(log_file) = &cli.log_file {
        let file = File::create(log_file)
            .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
        loggers.push(WriteLogger::new(cli.log_level, Config::default(), file));
    }

    CombinedLogger::init(loggers)?;

    let settings = Settings::from_cli(&cli)?;
    log::info!("{:?}", settings);

    let source_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let exif: Box<dyn DateTimeSource> = if settings.use_exif {
        Box::new(ExifToolSource::new())
    } else {
        Box::new(NoExif)
    };

    let dry_run = settings.import.dry_run;
    let mut importer = Importer::new(settings.import, exif);
    let stats = importer.process(&source_dir)?;

    println!("Total pictures processed: {}", stats.transferred);
    if dry_run {
        println!("Pictures that would be processed: {}", stats.planned);
    }

    Ok(())
}
