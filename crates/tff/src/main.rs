use clap::Parser;
use std::env;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{AuthCommand, AuthDispatch, NoAuthCommand, NoAuthDispatch};
use feedfactory_api::error::{ApiError, Error as ClientError};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the API token.
const TOKEN_ENV: &str = "FF_ACCESS_TOKEN";

/// Environment variable overriding the API base URL.
const API_URL_ENV: &str = "FF_API_URL";

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "TFF_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(out) => eprintln!("{out}"),
                    Err(_) => eprintln!("{error_json}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(error_exit_code(&e))
        }
    }
}

/// Logs go to stderr. `TFF_LOG` takes precedence over `--verbose`.
fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "warn,tff=debug,feedfactory_api=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    commands::config::load_env_file(cli.config.as_deref())?;
    let ctx = context(cli);

    // Interactive commands that wait on a prompt or an editor
    match &cli.command {
        Some(Commands::Configure) => {
            let api_url = resolve_api_url(cli);
            return commands::setup::execute(&ctx, api_url.as_deref()).await;
        }
        Some(Commands::Config {
            command: Some(ConfigCommands::Edit),
        }) => return commands::config::execute_edit(&ctx).await,
        _ => {}
    }

    // Try no-auth commands first (config, completions, help)
    if let Some(dispatch) = NoAuthDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let Some(dispatch) = AuthDispatch::from_cli(cli) else {
        return Ok(());
    };

    let api_url = resolve_api_url(cli);
    let token = resolve_token(cli, api_url.as_deref()).await?;
    let client = commands::build_client(&token, api_url.as_deref())?;
    tracing::debug!(base_url = client.base_url(), "client ready");

    dispatch.execute(&ctx, &client).await
}

/// Builds the command context, applying `output.color` from the config file.
fn context(cli: &Cli) -> CommandContext {
    let mut ctx = CommandContext::from_cli(cli);
    if let Ok(config) = load_config() {
        if config.output.color == Some(false) {
            ctx.use_colors = false;
        }
    }
    ctx
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Api(api) => match api {
            ClientError::Api(ApiError::Auth { .. }) => "AUTH_ERROR",
            ClientError::Api(ApiError::NotFound { .. }) => "NOT_FOUND",
            ClientError::Api(ApiError::Validation { .. }) => "VALIDATION_ERROR",
            ClientError::Api(ApiError::Http { .. }) => "API_ERROR",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Query(q) => q.code(),
            ClientError::InvalidUrl(_) => "CONFIG_ERROR",
            ClientError::Json(_)
            | ClientError::UnexpectedShape(_)
            | ClientError::MissingField(_) => "RESPONSE_ERROR",
        },
        CommandError::Query(q) | CommandError::Flag { source: q, .. } => q.code(),
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
///
/// Local failures (validation, file I/O, JSON) exit with 1; 3 is left to
/// network errors.
fn error_exit_code(e: &CommandError) -> u8 {
    match e {
        CommandError::Api(api) => u8::try_from(api.exit_code()).unwrap_or(1),
        CommandError::Query(_) | CommandError::Flag { .. } => 1,
        CommandError::Config(_) => 5,
        CommandError::Io(_) | CommandError::Json(_) => 1,
    }
}

/// Reads a non-empty environment variable.
fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolves the API base URL: flag > env (including `.env`) > config.
///
/// Returns `None` to use the client's default.
fn resolve_api_url(cli: &Cli) -> Option<String> {
    if let Some(url) = &cli.api_url {
        return Some(url.clone());
    }
    if let Some(url) = env_value(API_URL_ENV) {
        return Some(url);
    }
    load_config().ok().and_then(|config| config.api_url)
}

/// Resolves the API token with priority: flag > env > keyring > config.
///
/// The resolution order is:
/// 1. `--token` command line flag (highest priority)
/// 2. `FF_ACCESS_TOKEN`, from the environment or a loaded `.env` file
/// 3. OS keyring (if `token_storage == "keyring"` in config)
/// 4. Token from config file (`~/.config/tff/config.toml`)
///
/// Returns `None` if no token is found (allowing caller to trigger setup).
fn resolve_token_optional(cli: &Cli) -> commands::Result<Option<String>> {
    if let Some(token) = &cli.token {
        return Ok(Some(token.clone()));
    }

    // The .env file is loaded after argument parsing, so clap never sees it.
    if let Some(token) = env_value(TOKEN_ENV) {
        return Ok(Some(token));
    }

    if let Ok(config) = load_config() {
        if config.token_storage.as_deref() == Some("keyring") {
            if let Some(token) = commands::keyring::get_token()? {
                return Ok(Some(token));
            }
        }

        if let Some(token) = config.token {
            return Ok(Some(token));
        }
    }

    Ok(None)
}

/// Resolves the API token, running first-run setup if needed.
///
/// Without a terminal the setup fails with the configuration help.
async fn resolve_token(cli: &Cli, api_url: Option<&str>) -> commands::Result<String> {
    if let Some(token) = resolve_token_optional(cli)? {
        return Ok(token);
    }

    let ctx = CommandContext::from_cli(cli);
    commands::setup::run_setup(&ctx, api_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedfactory_api::prelude::QueryError;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    /// Saves and restores the variables token resolution reads.
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let keys = [TOKEN_ENV, API_URL_ENV, "TFF_CONFIG"];
            let saved = keys.iter().map(|k| (*k, env::var(k).ok())).collect();
            for key in keys {
                env::remove_var(key);
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    fn write_config(dir: &TempDir, content: &str) {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        env::set_var("TFF_CONFIG", path.to_str().unwrap());
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["tff"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["accounts", "me"]);
        Cli::parse_from(argv)
    }

    #[test]
    #[serial]
    fn test_resolve_token_optional_from_flag() {
        let _guard = EnvGuard::new();
        let cli = cli(&["--token", "flag-token"]);
        assert_eq!(
            resolve_token_optional(&cli).unwrap(),
            Some("flag-token".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_resolve_token_optional_no_token() {
        let _guard = EnvGuard::new();
        env::set_var("TFF_CONFIG", "/tmp/tff-test-nonexistent/config.toml");

        let cli = cli(&[]);
        assert!(resolve_token_optional(&cli).unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_resolve_token_optional_from_config() {
        let _guard = EnvGuard::new();
        let temp_dir = TempDir::new().unwrap();
        write_config(&temp_dir, "token = \"config-token\"\n");

        let cli = cli(&[]);
        assert_eq!(
            resolve_token_optional(&cli).unwrap(),
            Some("config-token".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_resolve_token_optional_flag_overrides_config() {
        let _guard = EnvGuard::new();
        let temp_dir = TempDir::new().unwrap();
        write_config(&temp_dir, "token = \"config-token\"\n");

        let cli = cli(&["--token", "flag-token"]);
        assert_eq!(
            resolve_token_optional(&cli).unwrap(),
            Some("flag-token".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_resolve_token_from_env_file() {
        let _guard = EnvGuard::new();
        let temp_dir = TempDir::new().unwrap();
        write_config(&temp_dir, "token = \"config-token\"\n");
        let env_path = temp_dir.path().join("ff.env");
        fs::write(&env_path, "FF_ACCESS_TOKEN=dotenv-token\n").unwrap();

        let cli = cli(&[]);
        commands::config::load_env_file(Some(&env_path)).unwrap();

        assert_eq!(
            resolve_token_optional(&cli).unwrap(),
            Some("dotenv-token".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_resolve_api_url_precedence() {
        let _guard = EnvGuard::new();
        let temp_dir = TempDir::new().unwrap();
        write_config(&temp_dir, "api_url = \"http://config.invalid/api\"\n");

        assert_eq!(
            resolve_api_url(&cli(&[])),
            Some("http://config.invalid/api".to_string())
        );

        env::set_var(API_URL_ENV, "http://env.invalid/api");
        assert_eq!(
            resolve_api_url(&cli(&[])),
            Some("http://env.invalid/api".to_string())
        );

        let flagged = cli(&["--api-url", "http://flag.invalid/api"]);
        assert_eq!(
            resolve_api_url(&flagged),
            Some("http://flag.invalid/api".to_string())
        );
    }

    #[test]
    fn test_validation_errors_exit_with_one() {
        let err = CommandError::flag("--date-from")(QueryError::invalid_time_expression("x"));
        assert_eq!(error_code(&err), "DATE_FORMAT_ERROR");
        assert_eq!(error_exit_code(&err), 1);

        let err = CommandError::Query(QueryError::ExportFormatRequiresRange);
        assert_eq!(error_code(&err), "EXPORT_FORMAT_REQUIRES_RANGE");
    }

    #[test]
    fn test_api_errors_map_to_codes() {
        let err = CommandError::Api(ClientError::Api(ApiError::Auth {
            message: "bad token".to_string(),
        }));
        assert_eq!(error_code(&err), "AUTH_ERROR");
        assert_eq!(error_exit_code(&err), 2);

        let err = CommandError::Config("missing".to_string());
        assert_eq!(error_code(&err), "CONFIG_ERROR");
        assert_eq!(error_exit_code(&err), 5);
    }

    #[test]
    fn test_local_io_error_is_not_a_network_exit() {
        let err = CommandError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        ));
        assert_eq!(error_code(&err), "IO_ERROR");
        assert_eq!(error_exit_code(&err), 1);
    }
}
