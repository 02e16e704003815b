//! Configuration management for quill.
//!
//! Configuration is loaded from multiple sources and merged:
//! 1. Global config: `~/.config/quill/config.json`
//! 2. Environment variable: `QUILL_CONFIG_CONTENT`
//! 3. Project config: `quill.jsonc` or `quill.json` in the working directory
//! 4. Environment overrides: `QUILL_ROOT`, `QUILL_LOG_LEVEL`
//!
//! Supports JSONC (JSON with comments) and variable substitution:
//! - `{env:VAR_NAME}` - Substitute environment variable
//! - `{file:path}` - Substitute file contents

use crate::error::{ConfigError, CoreResult};
use quill_history::HistoryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default suffix selecting text files during search and indexing.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Static regex for variable substitution, compiled once.
static VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

/// Get the variable substitution regex, compiling it once on first use.
fn var_regex() -> &'static regex::Regex {
    VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\{(env|file):([^}]+)\}")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON Schema reference.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Directory searched and indexed by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// File-name suffix selecting text files (case-sensitive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Whether the directory walk follows symlinks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_links: Option<bool>,

    /// Log level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Undo history settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryConfig>,
}

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for quill_util::LogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => quill_util::LogLevel::Trace,
            LogLevel::Debug => quill_util::LogLevel::Debug,
            LogLevel::Info => quill_util::LogLevel::Info,
            LogLevel::Warn => quill_util::LogLevel::Warn,
            LogLevel::Error => quill_util::LogLevel::Error,
        }
    }
}

impl From<quill_util::LogLevel> for LogLevel {
    fn from(level: quill_util::LogLevel) -> Self {
        match level {
            quill_util::LogLevel::Trace => LogLevel::Trace,
            quill_util::LogLevel::Debug => LogLevel::Debug,
            quill_util::LogLevel::Info => LogLevel::Info,
            quill_util::LogLevel::Warn => LogLevel::Warn,
            quill_util::LogLevel::Error => LogLevel::Error,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Returns the merged config and the files it was read from.
    pub fn load(project_dir: Option<&Path>) -> CoreResult<(Self, Vec<PathBuf>)> {
        let mut config = Config::default();
        let mut sources = Vec::new();

        // 1. Load global config
        if let Some(global_dir) = Self::global_config_dir() {
            for name in &["config.json", "quill.json", "quill.jsonc"] {
                let path = global_dir.join(name);
                if path.exists() {
                    let loaded = Self::load_file(&path)?;
                    config = config.merge(loaded);
                    sources.push(path);
                    break;
                }
            }
        }

        // 2. Load from environment variable
        if let Ok(content) = std::env::var("QUILL_CONFIG_CONTENT") {
            let loaded = Self::parse_jsonc(&content, "<env>")?;
            config = config.merge(loaded);
        }

        // 3. Load project config
        if let Some(dir) = project_dir {
            for name in &["quill.jsonc", "quill.json"] {
                let path = dir.join(name);
                if path.exists() {
                    let loaded = Self::load_file(&path)?;
                    config = config.merge(loaded);
                    sources.push(path);
                    break;
                }
            }
        }

        // 4. Environment overrides
        config.apply_env_overrides()?;

        config.validate()?;

        tracing::debug!(sources = sources.len(), "Loaded configuration");
        Ok((config, sources))
    }

    /// Get the global config directory.
    pub fn global_config_dir() -> Option<PathBuf> {
        quill_util::path::config_dir()
    }

    /// Load configuration from a file.
    pub fn load_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = Self::substitute_variables(&content, path)?;
        Self::parse_jsonc(&content, &path.display().to_string())
    }

    /// Save configuration.
    ///
    /// If `project_dir` is Some, saves to `{project_dir}/quill.json`.
    /// Otherwise saves to the global config directory. Returns the path written.
    pub fn save(&self, project_dir: Option<&Path>) -> CoreResult<PathBuf> {
        let path = if let Some(dir) = project_dir {
            dir.join("quill.json")
        } else {
            let global_dir = Self::global_config_dir().ok_or_else(|| {
                ConfigError::InvalidPath("Could not determine config directory".to_string())
            })?;

            // Ensure directory exists
            std::fs::create_dir_all(&global_dir)?;
            global_dir.join("config.json")
        };

        // Serialize to pretty JSON
        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        std::fs::write(&path, content)?;
        tracing::info!("Saved configuration to {}", path.display());
        Ok(path)
    }

    /// Reject settings the session cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(history) = &self.history {
            history.validate().map_err(|e| ConfigError::Validation {
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Root directory for search and indexing, if configured.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// File suffix for search and indexing, with the default applied.
    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    /// History settings, with the default applied.
    pub fn history(&self) -> HistoryConfig {
        self.history.clone().unwrap_or_default()
    }

    /// Apply `QUILL_*` environment overrides.
    fn apply_env_overrides(&mut self) -> CoreResult<()> {
        if let Ok(root) = std::env::var("QUILL_ROOT") {
            if !root.is_empty() {
                self.root = Some(PathBuf::from(root));
            }
        }

        if let Ok(level) = std::env::var("QUILL_LOG_LEVEL") {
            let parsed =
                quill_util::LogLevel::parse(&level).ok_or_else(|| ConfigError::Validation {
                    message: format!("invalid QUILL_LOG_LEVEL: {level}"),
                })?;
            self.log_level = Some(parsed.into());
        }

        Ok(())
    }

    /// Parse JSONC (JSON with comments).
    fn parse_jsonc(content: &str, source: &str) -> CoreResult<Self> {
        // Strip comments (// and /* */)
        let stripped = Self::strip_comments(content);

        serde_json::from_str(&stripped).map_err(|e| {
            ConfigError::InvalidJson {
                path: source.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Strip JSON comments.
    fn strip_comments(input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        let mut in_string = false;
        let mut escape_next = false;

        while let Some(c) = chars.next() {
            if escape_next {
                result.push(c);
                escape_next = false;
                continue;
            }

            if c == '\\' && in_string {
                result.push(c);
                escape_next = true;
                continue;
            }

            if c == '"' {
                in_string = !in_string;
                result.push(c);
                continue;
            }

            if in_string {
                result.push(c);
                continue;
            }

            if c == '/' {
                match chars.peek() {
                    Some('/') => {
                        chars.next();
                        for c in chars.by_ref() {
                            if c == '\n' {
                                result.push('\n');
                                break;
                            }
                        }
                        continue;
                    }
                    Some('*') => {
                        chars.next();
                        let mut prev = ' ';
                        for c in chars.by_ref() {
                            if prev == '*' && c == '/' {
                                break;
                            }
                            // Preserve newlines for error reporting
                            if c == '\n' {
                                result.push('\n');
                            }
                            prev = c;
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            result.push(c);
        }

        result
    }

    /// Substitute variables in config content.
    ///
    /// Supports:
    /// - `{env:VAR_NAME}` - Environment variable
    /// - `{file:path}` - File contents (relative to config file)
    fn substitute_variables(content: &str, config_path: &Path) -> CoreResult<String> {
        let re = var_regex();
        let config_dir = config_path.parent().unwrap_or(Path::new("."));

        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let (Some(full_match), Some(kind), Some(value)) = (cap.get(0), cap.get(1), cap.get(2))
            else {
                continue;
            };
            let value = value.as_str();

            let replacement = match kind.as_str() {
                "env" => std::env::var(value).map_err(|_| ConfigError::EnvVarNotFound {
                    name: value.to_string(),
                })?,
                "file" => {
                    let file_path = config_dir.join(value);
                    std::fs::read_to_string(&file_path)
                        .map(|v| v.trim().to_string())
                        .map_err(|_| ConfigError::FileRefNotFound {
                            path: file_path.display().to_string(),
                        })?
                }
                _ => continue,
            };

            result = result.replace(full_match.as_str(), &replacement);
        }

        Ok(result)
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(mut self, other: Self) -> Self {
        if other.schema.is_some() {
            self.schema = other.schema;
        }
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.extension.is_some() {
            self.extension = other.extension;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self.history = match (self.history, other.history) {
            (Some(base), Some(o)) => Some(HistoryConfig {
                max_depth: o.max_depth.or(base.max_depth),
            }),
            (b, None) => b,
            (None, o) => o,
        };
        self
    }
}
