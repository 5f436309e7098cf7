//! CLI Tooling
//!
//! Command-line access to the file tree model: load a flat file list, replay a
//! batch of edits through an editor session, and print the result.

use crate::config::{ConfigLoader, InsightConfig};
use crate::error::{ApiError, TreeError};
use crate::session::EditorSession;
use crate::tooling::format::{format_node_text, format_records_text, format_tree_text};
use crate::tree::{FileRecord, TreeEdit};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Insight Files CLI - inspect and edit content file trees
#[derive(Parser)]
#[command(name = "insight-files")]
#[command(about = "Build, edit, and flatten the file tree of a content item")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML, JSON, or YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the tree built from a file list
    Show {
        /// JSON array of file records
        files: PathBuf,
        /// JSON array of edits to replay before printing
        #[arg(long)]
        edits: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the flattened file records ready for saving
    Flatten {
        /// JSON array of file records
        files: PathBuf,
        /// JSON array of edits to replay before flattening
        #[arg(long)]
        edits: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve a single node by id or path
    Lookup {
        /// JSON array of file records
        files: PathBuf,
        /// JSON array of edits to replay before the lookup
        #[arg(long)]
        edits: Option<PathBuf>,
        /// Node id
        #[arg(long, conflicts_with = "path", required_unless_present = "path")]
        id: Option<String>,
        /// Node path; also matches original paths
        #[arg(long)]
        path: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Execution context shared by all commands
pub struct CliContext {
    config: InsightConfig,
}

impl CliContext {
    /// Load configuration from `config_path`, or defaults plus environment
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    pub fn with_config(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Show {
                files,
                edits,
                format,
            } => {
                let session = self.open_session(files, edits.as_deref())?;
                let tree = session.snapshot();
                match parse_format(format)? {
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&tree)?),
                    OutputFormat::Text => Ok(format_tree_text(&tree)),
                }
            }
            Commands::Flatten {
                files,
                edits,
                format,
            } => {
                let session = self.open_session(files, edits.as_deref())?;
                let records = session.snapshot().flatten();
                match parse_format(format)? {
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
                    OutputFormat::Text => Ok(format_records_text(&records)),
                }
            }
            Commands::Lookup {
                files,
                edits,
                id,
                path,
                format,
            } => {
                let output_format = parse_format(format)?;
                let session = self.open_session(files, edits.as_deref())?;
                let tree = session.snapshot();
                let (node, key) = match (id, path) {
                    (Some(id), _) => (tree.get_file_by_id(id), id.as_str()),
                    (None, Some(path)) => (tree.get_file_by_path(path), path.as_str()),
                    (None, None) => {
                        return Err(ApiError::ConfigError(
                            "Either --id or --path is required".to_string(),
                        ))
                    }
                };
                let node = node.ok_or_else(|| TreeError::NotFound(key.to_string()))?;
                match output_format {
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(node)?),
                    OutputFormat::Text => Ok(format_node_text(node)),
                }
            }
        }
    }

    fn open_session(&self, files: &Path, edits: Option<&Path>) -> Result<EditorSession, ApiError> {
        let records = load_records(files)?;
        let session = EditorSession::open(records, &self.config.tree, self.config.session.clone())?;
        if let Some(edits) = edits {
            for edit in load_edits(edits)? {
                session.apply(&edit)?;
            }
        }
        Ok(session)
    }
}

enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Show { .. } => "show",
        Commands::Flatten { .. } => "flatten",
        Commands::Lookup { .. } => "lookup",
    }
}

/// Read a JSON array of file records
pub fn load_records(path: &Path) -> Result<Vec<FileRecord>, ApiError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read a JSON array of edits
pub fn load_edits(path: &Path) -> Result<Vec<TreeEdit>, ApiError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
