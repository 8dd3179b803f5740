use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use docx_fill::config::{load_values, parse_assignment, resolve_config, suggested_output_path};
use docx_fill::{PlaceholderEngine, ValueMap, DOCX_MEDIA_TYPE};

#[derive(Parser, Debug)]
#[command(name = "docx-fill")]
#[command(about = "Detect and fill [PLACEHOLDER] tokens in .docx documents", long_about = None)]
struct Args {
    /// Config file path (default: search for docx-fill.toml upwards)
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the placeholders found in a document
    Detect {
        /// Input .docx
        #[arg(value_name = "DOCX")]
        input: PathBuf,

        /// Print a JSON report with per-part findings
        #[arg(long)]
        json: bool,
    },
    /// Write a copy of a document with placeholders replaced
    Fill {
        /// Input .docx
        #[arg(value_name = "DOCX")]
        input: PathBuf,

        /// Output .docx (default: <dir>/GENERATED_<input_stem>.docx)
        #[arg(short, long, value_name = "DOCX")]
        output: Option<PathBuf>,

        /// Values file (.toml or .json, flat KEY = "value" map)
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,

        /// Single value, repeatable (e.g. --set "full name=Ola Nordmann")
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Fill even when some detected placeholders have no value
        #[arg(long)]
        allow_missing: bool,

        /// Print the fill report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let (cfg, cfg_path) = resolve_config(args.config.as_deref()).context("load config")?;
    if let Some(p) = cfg_path.as_ref() {
        info!(config = %p.display(), "using config");
    }
    let engine = PlaceholderEngine::new(cfg.part_selector());

    match args.command {
        Command::Detect { input, json } => {
            let bytes = read_docx(&input)?;
            let report = engine.scan(&bytes).context("detect placeholders")?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("serialize report")?
                );
            } else {
                for p in &report.placeholders {
                    println!("{p}");
                }
            }
            info!(count = report.placeholders.len(), "placeholders detected");
            Ok(())
        }
        Command::Fill {
            input,
            output,
            values,
            set,
            allow_missing,
            json,
        } => {
            let mut value_map: ValueMap = cfg.values.clone();
            if let Some(path) = values.as_ref() {
                value_map.merge(load_values(path)?);
            }
            for pair in &set {
                let (key, value) = parse_assignment(pair)?;
                value_map.insert_normalized(&key, value);
            }

            let output =
                output.unwrap_or_else(|| suggested_output_path(&input, cfg.output_prefix()));
            if same_file(&input, &output) {
                return Err(anyhow!(
                    "output would overwrite the input: {}",
                    output.display()
                ));
            }

            let bytes = read_docx(&input)?;
            if cfg.require_all() && !allow_missing {
                let detected = engine.detect(&bytes).context("detect placeholders")?;
                let missing = value_map.missing(&detected);
                if !missing.is_empty() {
                    return Err(anyhow!(
                        "fill in all placeholders (or pass --allow-missing): {}",
                        missing.join(", ")
                    ));
                }
            }

            let outcome = engine
                .process(&bytes, &value_map)
                .context("fill placeholders")?;
            for w in &outcome.report.warnings {
                warn!("{w}");
            }
            std::fs::write(&output, &outcome.bytes)
                .with_context(|| format!("write output docx: {}", output.display()))?;
            info!(
                output = %output.display(),
                media_type = DOCX_MEDIA_TYPE,
                replacements = outcome.report.total_replacements,
                "wrote filled document"
            );
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&outcome.report).context("serialize report")?
                );
            }
            Ok(())
        }
    }
}

/// Reads an input document, accepting only `.docx` files.
fn read_docx(path: &Path) -> anyhow::Result<Vec<u8>> {
    let is_docx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
    if !is_docx {
        return Err(anyhow!("not a .docx file: {}", path.display()));
    }
    std::fs::read(path).with_context(|| format!("read docx: {}", path.display()))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
