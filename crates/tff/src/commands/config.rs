//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/tff/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Minimum token length to apply masking (show first and last N characters).
const TOKEN_MASK_MIN_LENGTH: usize = 8;

/// Number of characters to show at start/end of a masked token.
const TOKEN_MASK_VISIBLE_CHARS: usize = 4;

/// Directory name under the user config directory.
const APP_DIR: &str = "tff";

/// Directory name used by earlier releases for the `.env` file.
const LEGACY_APP_DIR: &str = "tff-cli";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# tff - FeedFactory CLI Configuration
# https://github.com/TheFeedFactory/tff-rs

# Config schema version (do not modify)
version = 1

# API token (can also use FF_ACCESS_TOKEN env var or a .env file)
# token = "your-api-token-here"

# Token storage method: "config", "keyring", or "env"
# token_storage = "config"

# API base URL (can also use FF_API_URL env var)
# api_url = "https://app.thefeedfactory.nl/api"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// API token (optional, can use env var instead).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Token storage method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_storage: Option<String>,

    /// API base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            token: None,
            token_storage: None,
            api_url: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Returns `~/.config/<name>`, honouring `XDG_CONFIG_HOME`.
fn user_config_dir(name: &str) -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join(name));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join(name))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("TFF_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    Ok(user_config_dir(APP_DIR)?.join("config.toml"))
}

/// Candidate `.env` files, in the order they are tried.
///
/// An explicit path wins outright; otherwise the working directory comes
/// first, then the user config directory, then the legacy location.
pub fn env_file_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut candidates = vec![PathBuf::from(".env")];
    for dir in [APP_DIR, LEGACY_APP_DIR] {
        if let Ok(dir) = user_config_dir(dir) {
            candidates.push(dir.join(".env"));
        }
    }
    candidates
}

/// Loads the first `.env` file found into the process environment.
///
/// Variables already set in the environment are not overridden. Returns the
/// path that was loaded, if any.
///
/// # Errors
///
/// Fails when an explicitly given file cannot be read or parsed.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    for path in env_file_candidates(explicit) {
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "loaded environment file");
                return Ok(Some(path));
            }
            Err(e) if explicit.is_some() => {
                return Err(CommandError::Config(format!(
                    "Failed to load {}: {}",
                    path.display(),
                    e
                )));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable environment file");
            }
        }
    }

    if let Some(path) = explicit {
        return Err(CommandError::Config(format!(
            "Environment file not found: {}",
            path.display()
        )));
    }
    Ok(None)
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
pub fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    // The file may hold a token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            CommandError::Config(format!("Failed to set config permissions: {}", e))
        })?;
    }

    Ok(())
}

/// Help text describing every way to provide the API token.
pub fn config_help() -> String {
    let config_path = get_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "~/.config/tff/config.toml".to_string());

    format!(
        "The FeedFactory API token can be provided in several ways (highest priority first):

  1. The --token flag or the FF_ACCESS_TOKEN environment variable:
       export FF_ACCESS_TOKEN=\"your-token\"

  2. A .env file containing FF_ACCESS_TOKEN=your-token, in one of:
       - the path given with --config
       - .env in the current directory
       - ~/.config/tff/.env

  3. The OS keyring or the config file, set up interactively:
       tff configure

     or directly:
       tff config set token your-token
       ({config_path})

Tokens are issued in the FeedFactory web application under your account settings."
    )
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let masked = Config {
            token: config.token.as_deref().map(mask_token),
            ..config
        };
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": masked,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref storage) = config.token_storage {
                println!("  token_storage: {}", storage);
            }
            if let Some(ref token) = config.token {
                println!("  token: {}", mask_token(token));
            }
            if let Some(ref url) = config.api_url {
                println!("  api_url: {}", url);
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
        } else {
            println!("(No config file exists. Run 'tff configure' or 'tff config edit' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub async fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    tracing::debug!(path = %path.display(), %editor, "opening config");

    // Async to avoid blocking the tokio runtime
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .await
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies a `key = value` assignment to a config.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "token" => {
            config.token = Some(value.to_string());
        }
        "token_storage" => {
            let valid = ["config", "keyring", "env"];
            if !valid.contains(&value) {
                return Err(CommandError::Config(format!(
                    "Invalid token_storage value '{}'. Valid values: {}",
                    value,
                    valid.join(", ")
                )));
            }
            config.token_storage = Some(value.to_string());
        }
        "api_url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(CommandError::Config(format!(
                    "Invalid api_url '{}'. Expected an http:// or https:// URL",
                    value
                )));
            }
            config.api_url = Some(value.trim_end_matches('/').to_string());
        }
        "output.color" => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: token, token_storage, api_url, output.color",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    let shown = if opts.key == "token" {
        mask_token(&opts.value)
    } else {
        opts.value.clone()
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": shown,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, shown);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Masks a token for display, showing only the first and last N characters.
///
/// Uses character-based (not byte-based) indexing to safely handle
/// multi-byte UTF-8 characters.
pub fn mask_token(token: &str) -> String {
    let char_count = token.chars().count();
    if char_count > TOKEN_MASK_MIN_LENGTH {
        let prefix: String = token.chars().take(TOKEN_MASK_VISIBLE_CHARS).collect();
        let suffix: String = token
            .chars()
            .skip(char_count - TOKEN_MASK_VISIBLE_CHARS)
            .collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
