//! unslide CLI - PowerPoint slide layout reconstruction tool
//!
//! A command-line tool for previewing PPTX files as positioned HTML, plain
//! text, or JSON.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use unslide::render::{JsonFormat, RenderOptions};
use unslide::{Preview, SourceDocument, Viewer, ViewerOptions};

/// PowerPoint slide layout reconstruction to HTML, text, and JSON
#[derive(Parser)]
#[command(
    name = "unslide",
    author = "iyulab",
    version,
    about = "Reconstruct slide layouts from PowerPoint files",
    long_about = "unslide - PowerPoint slide layout reconstruction tool.\n\n\
                  Rebuilds positioned text and images of every slide in a PPTX file,\n\
                  degrading to an image gallery, a text outline, or an info card\n\
                  when the package is damaged."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a preview of a presentation
    Render {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        /// Link images from this directory prefix instead of inlining them
        #[arg(long)]
        media_prefix: Option<String>,

        /// Canvas zoom in percent (50-200)
        #[arg(long, default_value = "100")]
        zoom: u32,

        /// Render only this slide (1-based)
        #[arg(long)]
        slide: Option<usize>,
    },

    /// Show which stage a presentation settles on and what it contains
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Extract images from a presentation
    Extract {
        /// Input file path
        input: PathBuf,

        /// Output directory for images
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Print the text outline of a presentation
    Outline {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Output format
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Standalone HTML page with positioned slides
    Html,
    /// Plain text
    Text,
    /// Pipeline outcome as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if let Some(level) = verbosity_filter(verbose, std::env::var_os("RUST_LOG").is_some()) {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).init();
}

/// Level forced by `-v` flags. Without flags `RUST_LOG` decides, and warnings
/// are the default when it is unset.
fn verbosity_filter(verbose: u8, rust_log_set: bool) -> Option<log::LevelFilter> {
    match verbose {
        0 if rust_log_set => None,
        0 => Some(log::LevelFilter::Warn),
        1 => Some(log::LevelFilter::Info),
        _ => Some(log::LevelFilter::Debug),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            compact,
            media_prefix,
            zoom,
            slide,
        } => {
            let pb = create_spinner("Reconstructing slides...");

            let document = SourceDocument::from_path(&input)?;
            let outcome = Viewer::new().preview(&document);
            pb.set_message("Rendering...");

            let mut options = RenderOptions::new().with_zoom(zoom.clamp(50, 200));
            if let Some(prefix) = media_prefix {
                options = options.with_linked_media(prefix);
            }
            if let Some(number) = slide {
                options = options.with_single_slide(number.saturating_sub(1));
            }

            let rendered = match format {
                OutputFormat::Html => {
                    unslide::render::to_html_document(document.name(), &outcome.preview, &options)?
                }
                OutputFormat::Text => unslide::render::to_text(&outcome.preview)?,
                OutputFormat::Json => {
                    let format = if compact {
                        JsonFormat::Compact
                    } else {
                        JsonFormat::Pretty
                    };
                    unslide::render::to_json(&outcome, format)?
                }
            };

            pb.finish_and_clear();
            report_attempts(&outcome);
            write_output(output.as_ref(), &rendered)?;

            if let Some(path) = output {
                println!(
                    "{} Rendered {} preview: {}",
                    "✓".green().bold(),
                    outcome.stage,
                    path.display()
                );
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing presentation...");

            let document = SourceDocument::from_path(&input)?;
            let outcome = Viewer::new().preview(&document);

            pb.finish_and_clear();

            println!("{}", "Presentation Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "File".bold(), document.name());
            println!(
                "{}: {}",
                "Size".bold(),
                unslide::model::format_file_size(document.size())
            );
            match document.format() {
                Some(format) => println!("{}: {}", "Format".bold(), format),
                None => println!("{}: {}", "Format".bold(), "not an Office package".yellow()),
            }
            println!("{}: {}", "Stage".bold(), outcome.stage);

            match &outcome.preview {
                Preview::Slides(deck) => {
                    println!("{}: {}", "Slides".bold(), deck.slides.len());
                    println!("{}: {}", "Placeholders".bold(), deck.placeholder_count());
                    println!("{}: {}", "Media".bold(), deck.media.len());

                    println!("\n{}", "Slides".cyan().bold());
                    println!("{}", "─".repeat(40));
                    for slide in &deck.slides {
                        println!(
                            "{:>3}. {} ({} text, {} images)",
                            slide.index,
                            slide.title,
                            slide.texts().count(),
                            slide.images().count()
                        );
                    }
                }
                Preview::Gallery(entries) => {
                    println!("{}: {}", "Media".bold(), entries.len());
                }
                Preview::TextOutline(slides) => {
                    println!("{}: {}", "Slides".bold(), slides.len());
                }
                Preview::Fallback(_) => {}
            }

            if !outcome.attempts.is_empty() {
                println!("\n{}", "Failed Stages".cyan().bold());
                println!("{}", "─".repeat(40));
                for attempt in &outcome.attempts {
                    println!("{}: {}", attempt.stage.to_string().bold(), attempt.message);
                }
            }
        }

        Commands::Extract { input, output } => {
            let pb = create_spinner("Extracting images...");

            let container = unslide::OoxmlContainer::open(&input)?;
            let media = unslide::pptx::MediaTable::extract(&container);

            fs::create_dir_all(&output)?;

            let mut count = 0;
            for asset in media.assets() {
                asset.save_to(output.join(asset.file_name()))?;
                count += 1;
            }

            pb.finish_and_clear();

            if count > 0 {
                println!(
                    "{} Extracted {} images to {}",
                    "✓".green().bold(),
                    count,
                    output.display()
                );
            } else {
                println!("{} No images found in presentation", "!".yellow().bold());
            }
        }

        Commands::Outline { input, output } => {
            let pb = create_spinner("Extracting text...");

            let viewer = Viewer::with_options(ViewerOptions::default().text_only());
            let outcome = viewer.preview_file(&input)?;
            let text = unslide::render::to_text(&outcome.preview)?;

            pb.finish_and_clear();
            report_attempts(&outcome);
            write_output(output.as_ref(), &text)?;

            if let Some(path) = output {
                println!("{} Wrote outline: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn report_attempts(outcome: &unslide::PipelineOutcome) {
    for attempt in &outcome.attempts {
        eprintln!(
            "{} {} stage skipped: {}",
            "!".yellow().bold(),
            attempt.stage,
            attempt.message
        );
    }
}

fn print_version() {
    println!("{} {}", "unslide".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("PowerPoint slide layout reconstruction");
    println!();
    println!("Supported formats: PPTX");
    println!("Repository: https://github.com/iyulab/unslide");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
