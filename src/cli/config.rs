use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generator::backend::{
    BackendKind, DEFAULT_CHAT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_OLLAMA_ENDPOINT,
    GenerationOptions,
};
use crate::projection::view::ProjectionView;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "grounded-bug-report",
    version,
    about = "Bug reports grounded in recorded GUI exploration graphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Generation service endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Model name passed to the generation service
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Bearer key for the chat backend
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Path to config file (default: grounding.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical projection of a graph
    Project {
        /// Graph file to project
        #[arg(long)]
        graph: PathBuf,

        /// Transition listing variant
        #[arg(long, value_enum, default_value_t = ProjectionView::Full)]
        view: ProjectionView,

        /// Also print the screen listing
        #[arg(long)]
        screens: bool,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Rewrite <T<n>> markers in text back to transition hashes
    Reverse {
        /// Graph file the ids were assigned from
        #[arg(long)]
        graph: PathBuf,

        /// Text file to rewrite (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Generate a grounded bug report
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// App the bug was seen in, as shown to users
    #[arg(long)]
    pub app: String,

    /// Natural-language bug description
    #[arg(long)]
    pub description: String,

    /// Graph file to ground on (default: located under the data directory)
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Directory holding per-app graph captures
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Generation backend
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Maximum completion length in tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Transition listing variant used in the prompt
    #[arg(long, value_enum)]
    pub view: Option<ProjectionView>,

    /// Include the screen listing in the prompt
    #[arg(long)]
    pub screens: bool,

    /// Output format: console or json
    #[arg(long, default_value = "console")]
    pub format: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `grounding.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub backend: BackendKind,

    pub endpoint: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            endpoint: None,
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub view: ProjectionView,

    #[serde(default)]
    pub include_screens: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_trace_path")]
    pub path: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_trace_path(),
        }
    }
}

// Serde default helpers
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_max_tokens() -> u32 { DEFAULT_MAX_TOKENS }
fn default_timeout_secs() -> u64 { 300 }
fn default_data_dir() -> PathBuf { PathBuf::from("graph_data") }
fn default_true() -> bool { true }
fn default_trace_path() -> String { "grounding_trace.jsonl".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("grounding.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings resolution (CLI > config > defaults)
// ============================================================================

/// Everything `generate` needs, with CLI flags merged over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub app: String,
    pub description: String,
    pub graph: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub options: GenerationOptions,
    pub view: ProjectionView,
    pub include_screens: bool,
    pub format: String,
    pub output: Option<PathBuf>,
    /// `None` when tracing is disabled
    pub trace_path: Option<String>,
}

impl GenerateSettings {
    pub fn resolve(cli: &Cli, args: &GenerateArgs, config: &AppConfig) -> Self {
        let backend = args.backend.unwrap_or(config.generator.backend);

        let endpoint = cli
            .endpoint
            .clone()
            .or_else(|| config.generator.endpoint.clone())
            .unwrap_or_else(|| default_endpoint(backend).to_string());

        Self {
            app: args.app.clone(),
            description: args.description.clone(),
            graph: args.graph.clone(),
            data_dir: args.data_dir.clone().unwrap_or_else(|| config.data.dir.clone()),
            backend,
            endpoint,
            api_key: cli.api_key.clone().or_else(|| config.generator.api_key.clone()),
            timeout: Duration::from_secs(config.generator.timeout_secs),
            options: GenerationOptions {
                model: cli.model.clone().unwrap_or_else(|| config.generator.model.clone()),
                max_tokens: args.max_tokens.unwrap_or(config.generator.max_tokens),
            },
            view: args.view.unwrap_or(config.prompt.view),
            include_screens: args.screens || config.prompt.include_screens,
            format: args.format.clone(),
            output: args.output.clone(),
            trace_path: config.trace.enabled.then(|| config.trace.path.clone()),
        }
    }
}

fn default_endpoint(backend: BackendKind) -> &'static str {
    match backend {
        BackendKind::Ollama => DEFAULT_OLLAMA_ENDPOINT,
        BackendKind::Chat | BackendKind::Mock => DEFAULT_CHAT_ENDPOINT,
    }
}
