use anyhow::Context;
use anyhow::Result;
use libgqlaudit::issue::Severity;
use libgqlaudit::surface::SurfaceRules;
use serde::Deserialize;
use std::path::Path;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "gqlaudit.toml";

const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".tox",
    ".venv",
    "__pycache__",
    "build",
    "dist",
    "node_modules",
    "venv",
];

const DEFAULT_EXTENSIONS: &[&str] = &["gql", "graphql", "graphqls", "py"];

/// Contents of a `gqlaudit.toml` file. Every section and key is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct AuditToml {
    pub scan: ScanConfig,
    pub surface: SurfaceRules,
    pub report: ReportConfig,
}
impl AuditToml {
    /// Loads the config at `explicit_path`, or `gqlaudit.toml` in the
    /// working directory when no path is given and that file exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found; using defaults.");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::debug!("Loaded config from {}.", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct ScanConfig {
    /// Directory or file names skipped during discovery. A leading `*`
    /// matches by suffix (`*.min.py`).
    pub exclude: Vec<String>,

    /// File extensions to scan, with or without the leading dot.
    pub extensions: Vec<String>,

    pub max_files: Option<usize>,
}
impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            max_files: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct ReportConfig {
    pub fail_on: FailOn,
}

/// The least severe finding that makes a run exit with status 1.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FailOn {
    Advisory,
    Info,
    Warning,
    #[default]
    Error,
    Never,
}
impl FailOn {
    pub fn threshold(&self) -> Option<Severity> {
        match self {
            Self::Advisory => Some(Severity::Advisory),
            Self::Info => Some(Severity::Info),
            Self::Warning => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
            Self::Never => None,
        }
    }

    pub fn is_failure(&self, max_found: Option<Severity>) -> bool {
        match (self.threshold(), max_found) {
            (Some(threshold), Some(found)) => found >= threshold,
            _ => false,
        }
    }
}
