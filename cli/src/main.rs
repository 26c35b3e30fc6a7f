//! beeline CLI - bionic emphasis and line-gradient coloring for XHTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use beeline::render::{save_html, to_html};
use beeline::segment::{is_processed, word_units, DEFAULT_REGION_TAGS, MARKER_VALUE, RUN_ATTR};
use beeline::{
    parse_file_with_options, Colorizer, ColorizeOptions, Document, GeometrySnapshot,
    HtmlOptions, LayoutHost, ParseOptions, Pipeline, SegmentOptions, Segmenter, Settings,
    StyleRule,
};

#[derive(Parser)]
#[command(name = "beeline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Bionic emphasis and line-gradient coloring for XHTML pages", long_about = None)]
struct Cli {
    /// Accept malformed markup
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap every word of every text region in a word unit
    Segment {
        /// Input XHTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Do not bold the first half of each word
        #[arg(long)]
        no_bold: bool,

        /// Region tags to process (default: p, li, h1-h6)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Color segmented word units using measured geometry
    Colorize {
        /// Segmented XHTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Geometry snapshot JSON
        #[arg(short, long, value_name = "FILE")]
        geometry: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Vertical tolerance for words sharing a line
        #[arg(long, default_value = "10")]
        tolerance: f64,
    },

    /// Run the full apply command
    Apply {
        /// Input XHTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Geometry snapshot JSON (required when coloring)
        #[arg(short, long, value_name = "FILE")]
        geometry: Option<PathBuf>,

        /// Settings JSON file
        #[arg(short, long, value_name = "FILE", env = "BEELINE_SETTINGS")]
        settings: Option<PathBuf>,

        /// Override bionic emphasis
        #[arg(long)]
        bionic: Option<bool>,

        /// Override gradient coloring
        #[arg(long)]
        beeline: Option<bool>,

        /// Override the font rule
        #[arg(long)]
        font: Option<bool>,

        /// Write the effective settings back to the settings file
        #[arg(long, requires = "settings")]
        save_settings: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the apply report as JSON on stderr
        #[arg(long)]
        report: bool,
    },

    /// Toggle the serif font rule
    Font {
        /// Input XHTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Remove the rule instead of adding it
        #[arg(long)]
        off: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Undo segmentation, coloring and the font rule
    Reset {
        /// Processed XHTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input XHTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse_options = if cli.lenient {
        ParseOptions::new().lenient()
    } else {
        ParseOptions::new()
    };

    let result = match cli.command {
        Commands::Segment {
            input,
            output,
            no_bold,
            tags,
        } => cmd_segment(&input, output.as_deref(), parse_options, !no_bold, tags),
        Commands::Colorize {
            input,
            geometry,
            output,
            tolerance,
        } => cmd_colorize(&input, &geometry, output.as_deref(), parse_options, tolerance),
        Commands::Apply {
            input,
            geometry,
            settings,
            bionic,
            beeline,
            font,
            save_settings,
            output,
            report,
        } => {
            let overrides = Overrides {
                bionic,
                beeline,
                font,
            };
            cmd_apply(
                &input,
                geometry.as_deref(),
                settings.as_deref(),
                overrides,
                save_settings,
                output.as_deref(),
                parse_options,
                report,
            )
        }
        Commands::Font { input, off, output } => {
            cmd_font(&input, !off, output.as_deref(), parse_options)
        }
        Commands::Reset { input, output } => cmd_reset(&input, output.as_deref(), parse_options),
        Commands::Info { input } => cmd_info(&input, parse_options),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Per-key settings given on the command line.
#[derive(Debug, Default, Clone, Copy)]
struct Overrides {
    bionic: Option<bool>,
    beeline: Option<bool>,
    font: Option<bool>,
}

/// Load settings (defaults when no file is given) and apply overrides.
fn resolve_settings(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match path {
        Some(p) if p.exists() => Settings::load(p)?,
        Some(p) => {
            log::info!("Settings file {} not found, using defaults", p.display());
            Settings::default()
        }
        None => Settings::default(),
    };

    if let Some(v) = overrides.bionic {
        settings.bionic = v;
    }
    if let Some(v) = overrides.beeline {
        settings.beeline = v;
    }
    if let Some(v) = overrides.font {
        settings.font = v;
    }
    Ok(settings)
}

fn write_output(doc: &Document, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        save_html(doc, &HtmlOptions::default(), path)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", to_html(doc));
    }
    Ok(())
}

fn cmd_segment(
    input: &Path,
    output: Option<&Path>,
    parse_options: ParseOptions,
    bold: bool,
    tags: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = parse_file_with_options(input, parse_options)?;

    let mut options = SegmentOptions::new().with_emphasis(bold);
    if !tags.is_empty() {
        options = options.with_region_tags(tags);
    }
    let stats = Segmenter::new(options).segment(&mut doc);

    write_output(&doc, output)?;
    eprintln!(
        "{} {} regions, {} words ({} already processed)",
        "Segmented".green().bold(),
        stats.regions_processed,
        stats.words_wrapped,
        stats.regions_skipped
    );
    Ok(())
}

fn cmd_colorize(
    input: &Path,
    geometry: &Path,
    output: Option<&Path>,
    parse_options: ParseOptions,
    tolerance: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = parse_file_with_options(input, parse_options)?;
    let mut host = GeometrySnapshot::load(geometry)?;

    let view = host.flush(&doc);
    let colorizer = Colorizer::new(ColorizeOptions::new().with_tolerance(tolerance));
    let stats = colorizer.colorize(&mut doc, &view);

    write_output(&doc, output)?;
    eprintln!(
        "{} {} of {} words on {} lines",
        "Colored".green().bold(),
        stats.words_measured,
        stats.words_found,
        stats.lines
    );
    if stats.words_hidden > 0 {
        eprintln!("  {} {} words had no box", "└─".dimmed(), stats.words_hidden);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_apply(
    input: &Path,
    geometry: Option<&Path>,
    settings_path: Option<&Path>,
    overrides: Overrides,
    save_settings: bool,
    output: Option<&Path>,
    parse_options: ParseOptions,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = resolve_settings(settings_path, overrides)?;

    let mut host = match geometry {
        Some(path) => GeometrySnapshot::load(path)?,
        None if settings.beeline => {
            return Err("--geometry is required when coloring is enabled (use --beeline false to skip)".into());
        }
        None => GeometrySnapshot::new(),
    };

    let mut doc = parse_file_with_options(input, parse_options)?;
    let summary = Pipeline::new().apply(&mut doc, &settings, &mut host);

    write_output(&doc, output)?;

    if save_settings {
        if let Some(path) = settings_path {
            settings.save(path)?;
            eprintln!("{} {}", "Settings saved to".green(), path.display());
        }
    }

    if report {
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        eprintln!(
            "{} {} words in {} regions",
            "Applied".green().bold(),
            summary.segment.words_wrapped,
            summary.segment.regions_processed
        );
        if let Some(stats) = &summary.colorize {
            eprintln!("  {} {} lines colored", "├─".dimmed(), stats.lines);
        }
        eprintln!(
            "  {} font override {}",
            "└─".dimmed(),
            if summary.font { "on" } else { "off" }
        );
    }
    Ok(())
}

fn cmd_font(
    input: &Path,
    enabled: bool,
    output: Option<&Path>,
    parse_options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = parse_file_with_options(input, parse_options)?;
    beeline::set_font_override(&mut doc, enabled);
    write_output(&doc, output)
}

fn cmd_reset(
    input: &Path,
    output: Option<&Path>,
    parse_options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = parse_file_with_options(input, parse_options)?;
    let stats = beeline::reset(&mut doc);

    write_output(&doc, output)?;
    eprintln!(
        "{} {} runs in {} regions",
        "Restored".green().bold(),
        stats.runs_restored,
        stats.regions_cleared
    );
    Ok(())
}

fn cmd_info(input: &Path, parse_options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let size = fs::metadata(input)?.len();
    let doc = parse_file_with_options(input, parse_options)?;

    let regions = doc.query_tags(DEFAULT_REGION_TAGS);
    let processed = regions.iter().filter(|&&r| is_processed(&doc, r)).count();
    let runs = doc.query_attr(RUN_ATTR, MARKER_VALUE).len();
    let units = word_units(&doc);
    let colored = units
        .iter()
        .filter(|&&u| doc.style_property(u, "color").is_some())
        .count();
    let words: usize = regions
        .iter()
        .map(|&r| doc.text_content(r).split_whitespace().count())
        .sum();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), size);
    if let Some(doctype) = doc.doctype() {
        println!("{}: {}", "Doctype".bold(), doctype);
    }
    if let Some(root) = doc.tag(doc.root()) {
        println!("{}: <{}>", "Root".bold(), root);
    }

    println!();
    println!("{}", "Reading Aids".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Regions".bold(), regions.len());
    println!("{}: {}", "Processed".bold(), processed);
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Word units".bold(), units.len());
    println!("{}: {}", "Runs".bold(), runs);
    println!("{}: {}", "Colored".bold(), colored);
    println!(
        "{}: {}",
        "Font override".bold(),
        if StyleRule::font_override().is_present(&doc) {
            "Yes"
        } else {
            "No"
        }
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "beeline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Bionic emphasis and line-gradient coloring for XHTML");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/beeline".dimmed());
    println!("License: MIT");
}
