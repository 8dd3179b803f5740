use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::docx::parts::{PartSelector, DEFAULT_MAX_NUMBERED};
use crate::placeholder::values::ValueMap;

pub const DEFAULT_CONFIG_FILE: &str = "docx-fill.toml";
pub const DEFAULT_OUTPUT_PREFIX: &str = "GENERATED_";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub parts: PartsSection,
    #[serde(default)]
    pub fill: FillSection,
    /// Default replacement values; keys are normalized on load.
    #[serde(default)]
    pub values: ValueMap,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct OutputSection {
    /// File name prefix for filled documents (default: `GENERATED_`).
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PartsSection {
    /// Highest N probed for `word/headerN.xml` / `word/footerN.xml`.
    #[serde(default)]
    pub max_numbered: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct FillSection {
    /// Refuse to fill while a detected placeholder has no value (default: true).
    #[serde(default)]
    pub require_all: Option<bool>,
}

impl AppConfig {
    pub fn output_prefix(&self) -> &str {
        self.output
            .prefix
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_PREFIX)
    }

    pub fn part_selector(&self) -> PartSelector {
        PartSelector::new(self.parts.max_numbered.unwrap_or(DEFAULT_MAX_NUMBERED))
    }

    pub fn require_all(&self) -> bool {
        self.fill.require_all.unwrap_or(true)
    }
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

/// Looks for `filename` above the current directory, then above the executable.
pub fn find_default_config(filename: &str) -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_file_upwards(&cwd, filename, 8) {
            return Some(p);
        }
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_file_upwards(dir, filename, 10) {
                return Some(p);
            }
        }
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let mut cfg: AppConfig = toml::from_str(&text).context("parse config toml")?;
    cfg.values = std::mem::take(&mut cfg.values).normalized();
    Ok(cfg)
}

/// Explicit path if given, else the first `docx-fill.toml` found, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<(AppConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_default_config(DEFAULT_CONFIG_FILE),
    };
    match path {
        Some(p) => Ok((load_config(&p)?, Some(p))),
        None => Ok((AppConfig::default(), None)),
    }
}

/// Reads a flat key/value file (`.toml` or `.json`) and normalizes its keys.
pub fn load_values(path: &Path) -> anyhow::Result<ValueMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read values: {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let values: ValueMap = match ext.as_str() {
        "json" => serde_json::from_str(&text).context("parse values json")?,
        "toml" => toml::from_str(&text).context("parse values toml")?,
        other => {
            return Err(anyhow!(
                "unsupported values file extension {:?} (expected .toml or .json): {}",
                other,
                path.display()
            ))
        }
    };
    Ok(values.normalized())
}

/// Parses a `KEY=VALUE` command-line pair. The value may itself contain `=`.
pub fn parse_assignment(s: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got {s:?}"))?;
    if key.trim().is_empty() {
        return Err(anyhow!("empty key in {s:?}"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Default output path: `<dir>/<prefix><stem>.docx` next to the input.
pub fn suggested_output_path(input: &Path, prefix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    input.with_file_name(format!("{prefix}{stem}.docx"))
}
