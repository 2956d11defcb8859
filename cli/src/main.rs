//! undita CLI - DITA to Markdown site conversion
//!
//! Converts a DITA source tree into a Markdown documentation tree, or
//! single topics and maps on demand.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use undita::{dita, render, BuildOptions, FileKind, OutputStrategy, RenderOptions};

/// DITA to Markdown conversion
#[derive(Parser)]
#[command(
    name = "undita",
    author = "iyulab",
    version,
    about = "Convert DITA content trees to Markdown",
    long_about = "undita - DITA to Markdown converter.\n\n\
                  Walks a DITA source tree and writes a mirrored Markdown tree.\n\
                  Folders with a .ditamap are assembled from the map; other\n\
                  folders have their topics converted and Markdown copied.\n\n\
                  Usage:\n  \
                  undita build                      Convert ./source into ./docs\n  \
                  undita build --then mkdocs build  Convert, then run a site generator\n  \
                  undita topic <file>               Convert one topic to stdout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a whole source tree (replaces the output directory content)
    Build {
        /// Source directory
        #[arg(short, long, default_value = "source")]
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "docs")]
        docs: PathBuf,

        /// Build into a staging directory and replace the output only on success
        #[arg(long)]
        atomic: bool,

        /// Command to run after a successful conversion (e.g. `mkdocs build`)
        #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "CMD")]
        then: Vec<String>,
    },

    /// Convert a single topic to Markdown
    Topic {
        /// Topic file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render the title as a heading instead of frontmatter
        #[arg(long)]
        no_frontmatter: bool,

        /// Heading level of the title and top-level body titles
        #[arg(long, default_value_t = render::DEFAULT_BASE_LEVEL)]
        base_level: u8,
    },

    /// Assemble a single map into the output tree
    Map {
        /// Map file path (must be inside the source directory)
        input: PathBuf,

        /// Source directory
        #[arg(short, long, default_value = "source")]
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "docs")]
        docs: PathBuf,
    },

    /// Dump a parsed topic or map as JSON
    Json {
        /// Topic or map file path
        input: PathBuf,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show topic or map information
    Info {
        /// Topic or map file path
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "undita=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Build {
            source,
            docs,
            atomic,
            then,
        } => {
            let strategy = if atomic {
                OutputStrategy::AtomicSwap
            } else {
                OutputStrategy::WipeInPlace
            };
            let options = BuildOptions::new(source, docs).with_output_strategy(strategy);

            let report = undita::build_site(&options)?;

            println!("{}", "Conversion Complete".green().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Output".bold(), options.output_root.display());
            println!("{}: {}", "Maps".bold(), report.maps.len());
            println!("{}: {}", "Assembled".bold(), report.assembled.len());
            println!("{}: {}", "Converted".bold(), report.converted.len());
            println!("{}: {}", "Copied".bold(), report.copied.len());

            if !then.is_empty() {
                run_post_build(&then)?;
            }
        }

        Commands::Topic {
            input,
            output,
            no_frontmatter,
            base_level,
        } => {
            let pb = create_spinner("Converting topic...");

            let mut options = RenderOptions::new().with_base_level(base_level);
            if no_frontmatter {
                options = options.without_frontmatter();
            }
            let markdown = undita::to_markdown_with_options(&input, &options)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &markdown)?;

            if let Some(output) = output {
                println!(
                    "{} Converted to Markdown: {}",
                    "✓".green().bold(),
                    output.display()
                );
            }
        }

        Commands::Map {
            input,
            source,
            docs,
        } => {
            let pb = create_spinner("Assembling map...");

            let options = BuildOptions::new(std::path::absolute(source)?, std::path::absolute(docs)?);
            let written = undita::assemble_map(std::path::absolute(&input)?, &options)?;

            pb.finish_and_clear();
            for path in &written {
                println!("  {} {}", "✓".green(), path.display());
            }
        }

        Commands::Json { input, compact } => {
            let pb = create_spinner("Parsing...");

            let json = match undita::detect_file_kind(&input) {
                FileKind::Map => to_json(&dita::read_map(&input)?, compact)?,
                _ => to_json(&dita::read_topic(&input)?, compact)?,
            };

            pb.finish_and_clear();
            write_output(None, &json)?;
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing...");
            let kind = undita::detect_file_kind(&input);

            match kind {
                FileKind::Map => {
                    let map = dita::read_map(&input)?;
                    pb.finish_and_clear();

                    print_header("Map Information", &input, kind);
                    if let Some(ref title) = map.title {
                        println!("{}: {}", "Title".bold(), title);
                    }
                    println!("{}: {}", "Top-level references".bold(), map.topicrefs.len());
                    println!("{}: {}", "All references".bold(), map.reference_count());
                    for topicref in &map.topicrefs {
                        println!(
                            "  {} {} ({} nested, chunk: {:?})",
                            "•".cyan(),
                            topicref.href.as_deref().unwrap_or("<no href>"),
                            topicref.children.len(),
                            topicref.chunk
                        );
                    }
                }
                _ => {
                    let topic = dita::read_topic(&input)?;
                    pb.finish_and_clear();

                    print_header("Topic Information", &input, kind);
                    println!("{}: {}", "Title".bold(), topic.title_or(undita::model::UNTITLED));
                    println!("{}: {}", "Root".bold(), topic.root.tag);
                    for (key, value) in topic.metadata.iter() {
                        println!("{}: {}", key.bold(), value);
                    }

                    let text = topic.plain_text();
                    println!("\n{}", "Content Statistics".cyan().bold());
                    println!("{}", "─".repeat(40));
                    println!("{}: {}", "Blocks".bold(), topic.block_count());
                    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
                    println!("{}: {}", "Characters".bold(), text.chars().count());
                }
            }
        }
    }

    Ok(())
}

/// Runs the post-build command, failing if it does not exit successfully.
fn run_post_build(command: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let (program, args) = command
        .split_first()
        .ok_or("post-build command is empty")?;
    let line = command.join(" ");

    println!("\n{} {}", "Running".cyan().bold(), line);
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| format!("could not run `{}`: {}", line, e))?;

    if !status.success() {
        return Err(format!("`{}` failed with {}", line, status).into());
    }
    Ok(())
}

fn print_header(heading: &str, input: &Path, kind: FileKind) {
    println!("{}", heading.cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Kind".bold(), kind);
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["undita", "build"]).unwrap();
        match cli.command {
            Commands::Build {
                source,
                docs,
                atomic,
                then,
            } => {
                assert_eq!(source, PathBuf::from("source"));
                assert_eq!(docs, PathBuf::from("docs"));
                assert!(!atomic);
                assert!(then.is_empty());
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_build_then_collects_command() {
        let cli = Cli::try_parse_from(["undita", "build", "--atomic", "--then", "mkdocs", "build", "--strict"])
            .unwrap();
        match cli.command {
            Commands::Build { atomic, then, .. } => {
                assert!(atomic);
                assert_eq!(then, vec!["mkdocs", "build", "--strict"]);
            }
            _ => panic!("expected build"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_post_build_failure_is_error() {
        assert!(run_post_build(&["false".to_string()]).is_err());
        assert!(run_post_build(&["true".to_string()]).is_ok());
        assert!(run_post_build(&[]).is_err());
    }
}
