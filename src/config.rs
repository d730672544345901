use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Every section has defaults reproducing the hard-wired sweep this tool
/// replaced, so a bare working directory with a `Sample.param` file runs
/// without any config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Base parameter overrides applied once, before the sweep starts.
    #[serde(default = "default_overrides")]
    pub overrides: BTreeMap<String, String>,
}

/// Sweep variants and file locations
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Base parameter file read once at startup.
    #[serde(default = "default_param_file")]
    pub param_file: PathBuf,
    /// Derived parameter file rewritten every iteration; handed to the
    /// evaluator as its sole argument.
    #[serde(default = "default_temp_param_file")]
    pub temp_param_file: PathBuf,
    /// Consolidated result table, one tab-separated row per (variant, metric).
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    /// Re-ranking weights swept over (`fbOrigWeight` values, kept as strings).
    #[serde(default = "default_weights")]
    pub weights: Vec<String>,
    /// Initial ranking sources swept over (`fbInitialRankingFile` values).
    #[serde(default = "default_rank_sources")]
    pub rank_sources: Vec<String>,
}

/// External command lines
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorConfig {
    /// Evaluator command; the temp param file path is appended as the final
    /// argument.
    #[serde(default = "default_command")]
    pub command: String,
    /// Post-processing command run with no arguments; its stdout carries the
    /// effectiveness report.
    #[serde(default = "default_post_command")]
    pub post_command: String,
}

/// Metric and query selection
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Effectiveness metrics kept from the report.
    #[serde(default = "default_interest_set")]
    pub interest_set: Vec<String>,
    /// Query ids, in output-column order, including the "all" aggregate.
    #[serde(default = "default_query_set")]
    pub query_set: Vec<String>,
}

fn default_param_file() -> PathBuf {
    PathBuf::from("Sample.param")
}

fn default_temp_param_file() -> PathBuf {
    PathBuf::from("temp_param.txt")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("result.txt")
}

fn default_weights() -> Vec<String> {
    vec!["0.0".to_string()]
}

fn default_rank_sources() -> Vec<String> {
    vec!["my-sdm".to_string(), "Indri-Sdm.teIn".to_string()]
}

fn default_command() -> String {
    "java -Xmx5g -jar QryEval.jar".to_string()
}

fn default_post_command() -> String {
    "test.pl".to_string()
}

fn default_interest_set() -> Vec<String> {
    ["P10", "P20", "P30", "map"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_query_set() -> Vec<String> {
    ["10", "12", "26", "29", "33", "52", "71", "102", "149", "190", "all"]
        .iter()
        .map(|q| q.to_string())
        .collect()
}

fn default_overrides() -> BTreeMap<String, String> {
    [
        ("fb", "false"),
        ("fbMu", "0"),
        ("fbDocs", "10"),
        ("fbTerms", "50"),
        ("retrievalAlgorithm", "Indri"),
        ("fbOrigWeight", "0.0"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            param_file: default_param_file(),
            temp_param_file: default_temp_param_file(),
            output_file: default_output_file(),
            weights: default_weights(),
            rank_sources: default_rank_sources(),
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            post_command: default_post_command(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            interest_set: default_interest_set(),
            query_set: default_query_set(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep: SweepConfig::default(),
            evaluator: EvaluatorConfig::default(),
            metrics: MetricsConfig::default(),
            overrides: default_overrides(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in RANKSWEEP_CONFIG environment variable
    /// 2. ./ranksweep.toml in current directory
    /// 3. Built-in defaults when neither exists
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        if let Ok(path) = std::env::var("RANKSWEEP_CONFIG") {
            return Self::load_path(Path::new(&path));
        }

        let default_path = Path::new("ranksweep.toml");
        if default_path.exists() {
            return Self::load_path(default_path);
        }

        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.sweep.param_file.exists() {
            anyhow::bail!(
                "param_file does not exist: {}. Set sweep.param_file in ranksweep.toml to your base parameter file.",
                self.sweep.param_file.display()
            );
        }

        if self.sweep.weights.is_empty() {
            anyhow::bail!("sweep.weights must not be empty");
        }

        if self.sweep.rank_sources.is_empty() {
            anyhow::bail!("sweep.rank_sources must not be empty");
        }

        if self.metrics.interest_set.is_empty() {
            anyhow::bail!("metrics.interest_set must not be empty");
        }

        if self.metrics.query_set.is_empty() {
            anyhow::bail!("metrics.query_set must not be empty");
        }

        if self.evaluator.command.trim().is_empty() {
            anyhow::bail!("evaluator.command must not be empty");
        }

        if self.evaluator.post_command.trim().is_empty() {
            anyhow::bail!("evaluator.post_command must not be empty");
        }

        Ok(())
    }

    /// Get base parameter file path
    pub fn param_file(&self) -> &Path {
        &self.sweep.param_file
    }

    /// Get per-iteration parameter file path
    pub fn temp_param_file(&self) -> &Path {
        &self.sweep.temp_param_file
    }

    /// Get output table path
    pub fn output_file(&self) -> &Path {
        &self.sweep.output_file
    }
}
