use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sectionmeta_analyzer::{mark_archive, Analyzer, EnhanceStats, Metadata};
use sectionmeta_validator::Validator;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod pack;

pub use config::PipelineConfig;
pub use pack::{collect_sources, pack_directory};

#[derive(Parser)]
#[command(name = "sectionmeta")]
#[command(about = "Annotate and validate concatenated source archives", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML file with [analyzer] and [validator] tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Concatenate a source tree into one archive
    Pack(PackArgs),

    /// Insert structural MARK comments into every section
    Mark(MarkArgs),

    /// Annotate every section with flow, metadata and dependency tree
    Enhance(EnhanceArgs),

    /// Check an annotated archive against its own code
    Validate(ValidateArgs),

    /// Enhance then validate, writing both outputs to a directory
    Run(RunArgs),
}

#[derive(Args)]
struct PackArgs {
    /// Project directory
    dir: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct MarkArgs {
    /// Archive to mark
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct EnhanceArgs {
    /// Archive to annotate
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print statistics and per-section metadata as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Annotated archive
    annotated: PathBuf,

    /// Archive before annotation, for missing/extra section detection
    #[arg(long)]
    original: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit findings, counts and score as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Archive to annotate and validate
    input: PathBuf,

    /// Directory for the enhanced archive and the report
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Serialize)]
struct SectionSummary<'a> {
    path: &'a str,
    metadata: &'a Metadata,
}

#[derive(Serialize)]
struct EnhanceOutput<'a> {
    stats: &'a EnhanceStats,
    sections: Vec<SectionSummary<'a>>,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Enhance(args) => args.json,
        Commands::Validate(args) => args.json,
        _ => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Mark(args) => run_mark(args),
        Commands::Enhance(args) => run_enhance(args, config),
        Commands::Validate(args) => run_validate(args, config),
        Commands::Run(args) => run_pipeline(args, config),
    }
}

fn run_pack(args: PackArgs) -> Result<()> {
    let archive = pack_directory(&args.dir)?;
    emit(args.output.as_deref(), &archive)
}

fn run_mark(args: MarkArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    emit(args.output.as_deref(), &mark_archive(&text))
}

fn run_enhance(args: EnhanceArgs, config: PipelineConfig) -> Result<()> {
    let text = read_input(&args.input)?;
    let analyzer = Analyzer::new(config.analyzer).context("Invalid analyzer config")?;
    let enhanced = analyzer.enhance(&text);

    if args.json {
        if let Some(output) = &args.output {
            write_output(output, &enhanced.render())?;
        }
        let payload = EnhanceOutput {
            stats: &enhanced.stats,
            sections: enhanced
                .sections
                .iter()
                .map(|s| SectionSummary {
                    path: &s.section.path,
                    metadata: &s.metadata,
                })
                .collect(),
        };
        return print_stdout(&serde_json::to_string_pretty(&payload)?);
    }

    match &args.output {
        Some(output) => {
            write_output(output, &enhanced.render())?;
            print_stdout(&enhanced.stats.render())
        }
        None => emit(None, &enhanced.render()),
    }
}

fn run_validate(args: ValidateArgs, config: PipelineConfig) -> Result<()> {
    let annotated = read_input(&args.annotated)?;
    let original = args.original.as_deref().map(read_input).transpose()?;
    let validator = Validator::new(config.validator).context("Invalid validator config")?;

    let report = validator.validate(&annotated, original.as_deref(), &title_of(&args.annotated));
    let rendered = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.render()
    };
    emit(args.output.as_deref(), &rendered)
}

fn run_pipeline(args: RunArgs, config: PipelineConfig) -> Result<()> {
    let text = read_input(&args.input)?;
    let analyzer = Analyzer::new(config.analyzer).context("Invalid analyzer config")?;
    let validator = Validator::new(config.validator).context("Invalid validator config")?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
    let stem = args
        .input
        .file_stem()
        .map_or_else(|| "archive".to_string(), |s| s.to_string_lossy().into_owned());
    let enhanced_path = args.out_dir.join(format!("{stem}_enhanced.txt"));
    let report_path = args.out_dir.join(format!("{stem}_validation_report.txt"));

    let enhanced = analyzer.enhance(&text).render();
    write_output(&enhanced_path, &enhanced)?;

    let report = validator.validate(&enhanced, Some(&text), &title_of(&enhanced_path));
    write_output(&report_path, &report.render())?;

    print_stdout(&format!(
        "Enhanced archive: {}\nValidation report: {}\nAccuracy: {:.1}% ({})",
        enhanced_path.display(),
        report_path.display(),
        report.accuracy,
        report.verdict
    ))
}

fn title_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => write_output(path, text),
        None => print_stdout(text.trim_end_matches('\n')),
    }
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
