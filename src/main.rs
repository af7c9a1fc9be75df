// calendar-pdf: Generate a yearly PDF calendar

use calendar_pdf::{generate_calendar, CalendarConfig, CalendarError, FontManifest, PageSize};
use chrono::{Datelike, Local};
use clap::Parser;
use std::path::{Path, PathBuf};

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a twelve-page PDF calendar")]
struct Args {
    /// Calendar year (defaults to the current year)
    year: Option<i32>,

    /// Output filename (defaults to Calendar_{year}.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// Page size
    #[arg(short, long, value_enum, default_value_t = PageSize::A4)]
    page_size: PageSize,

    /// Directory holding the font files
    #[arg(long, default_value = ".")]
    font_dir: PathBuf,

    /// JSON file overriding individual font files (keys: display, body, thin, label, sans)
    #[arg(long)]
    fonts: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stdout)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CalendarError> {
    let args = Args::parse();

    let fonts = match &args.fonts {
        Some(path) => FontManifest::load(path)?,
        None => FontManifest::default(),
    };

    let config = CalendarConfig {
        year: args.year.unwrap_or_else(|| Local::now().year()),
        page_size: args.page_size,
        font_dir: args.font_dir,
        fonts,
    };

    let output_file = args.output.unwrap_or_else(|| config.default_output());

    let summary = generate_calendar(&config, Path::new(&output_file))?;

    println!("✓ Generated: {}", output_file);
    println!("  Year: {}", config.year);
    println!("  Pages: {} ({})", summary.pages, config.page_size.label());
    println!(
        "  Fonts: {}/5 embedded from files",
        summary.fonts.loaded.len()
    );

    Ok(())
}
