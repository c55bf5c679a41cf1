//! Interactive token setup (`tff configure`).
//!
//! Prompts for the API token, validates it against `/accounts/me`, and stores
//! it in the OS keyring or the config file. Without a terminal it prints the
//! configuration help instead.

use std::io::{self, IsTerminal};

use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::config::{config_help, get_config_path, load_config, save_config, Config};
use super::{build_client, keyring, CommandContext, CommandError, Result};

/// Token storage options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStorage {
    /// Store in OS keyring (most secure).
    Keyring,
    /// Store in config file.
    Config,
    /// Expect from environment variable (don't store).
    Env,
}

impl TokenStorage {
    fn as_str(&self) -> &'static str {
        match self {
            TokenStorage::Keyring => "keyring",
            TokenStorage::Config => "config",
            TokenStorage::Env => "env",
        }
    }
}

/// Executes `tff configure`.
pub async fn execute(ctx: &CommandContext, api_url: Option<&str>) -> Result<()> {
    if !io::stdin().is_terminal() {
        println!("{}", config_help());
        return Ok(());
    }
    run_setup(ctx, api_url).await.map(|_| ())
}

/// Runs the setup wizard. Returns the token on success.
pub async fn run_setup(ctx: &CommandContext, api_url: Option<&str>) -> Result<String> {
    if !io::stdin().is_terminal() {
        return Err(CommandError::Config(format!(
            "No API token configured.\n\n{}",
            config_help()
        )));
    }

    if !ctx.quiet {
        println!();
        if ctx.use_colors {
            println!("{}", "Welcome to tff - FeedFactory CLI!".green().bold());
        } else {
            println!("Welcome to tff - FeedFactory CLI!");
        }
        println!();
        println!("Let's set up your API access token.");
        println!("Tokens are issued in the FeedFactory web application under your account settings.");
        println!();
    }

    let token: String = Input::new()
        .with_prompt("Enter your FeedFactory API token")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Token cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    let token = token.trim().to_string();

    if !ctx.quiet {
        println!();
        println!("Validating token...");
    }

    let client = build_client(&token, api_url)?;
    if let Err(e) = client.account_me().await {
        return Err(CommandError::Config(format!(
            "Token validation failed: {}. Please check your token and try again.",
            e
        )));
    }

    if !ctx.quiet {
        if ctx.use_colors {
            println!("{}", "Token validated successfully!".green());
        } else {
            println!("Token validated successfully!");
        }
        println!();
    }

    let storage = choose_storage()?;
    save_setup_config(&token, storage)?;

    if !ctx.quiet {
        println!();
        let config_path = get_config_path()?;
        if ctx.use_colors {
            println!("{}", "Setup complete!".green().bold());
        } else {
            println!("Setup complete!");
        }
        match storage {
            TokenStorage::Keyring => {
                println!("Token stored securely in OS keychain.");
                println!("Config saved to: {}", config_path.display());
            }
            TokenStorage::Config => {
                println!("Token saved to: {}", config_path.display());
            }
            TokenStorage::Env => {
                println!("Config saved to: {}", config_path.display());
                println!();
                println!("Remember to set FF_ACCESS_TOKEN in your shell or a .env file:");
                println!("  export FF_ACCESS_TOKEN=\"<your token>\"");
            }
        }
        println!();
        println!("Run 'tff events list' to see your events, or 'tff --help' for more commands.");
    }

    Ok(token)
}

fn choose_storage() -> Result<TokenStorage> {
    let interact_err = |e: dialoguer::Error| CommandError::Io(io::Error::other(e.to_string()));

    if keyring::is_available() {
        let options = &[
            "OS Keychain (recommended - most secure)",
            "Config file",
            "Environment variable only",
        ];
        let selection = Select::new()
            .with_prompt("Where should we store your token?")
            .items(options)
            .default(0)
            .interact()
            .map_err(interact_err)?;

        Ok(match selection {
            0 => TokenStorage::Keyring,
            1 => TokenStorage::Config,
            _ => TokenStorage::Env,
        })
    } else {
        let options = &["Config file (recommended)", "Environment variable only"];
        let selection = Select::new()
            .with_prompt("Where should we store your token?")
            .items(options)
            .default(0)
            .interact()
            .map_err(interact_err)?;

        Ok(if selection == 0 {
            TokenStorage::Config
        } else {
            TokenStorage::Env
        })
    }
}

/// Saves the configuration after setup, keeping unrelated settings.
fn save_setup_config(token: &str, storage: TokenStorage) -> Result<()> {
    if storage == TokenStorage::Keyring {
        keyring::store_token(token)?;
    }

    let existing = load_config().unwrap_or_default();
    let config = Config {
        token: match storage {
            TokenStorage::Config => Some(token.to_string()),
            TokenStorage::Keyring | TokenStorage::Env => None,
        },
        token_storage: Some(storage.as_str().to_string()),
        ..existing
    };

    save_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn with_config_path<F: FnOnce(&std::path::Path)>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let original = env::var("TFF_CONFIG").ok();
        env::set_var("TFF_CONFIG", config_path.to_str().unwrap());

        f(&config_path);

        match original {
            Some(val) => env::set_var("TFF_CONFIG", val),
            None => env::remove_var("TFF_CONFIG"),
        }
    }

    #[test]
    fn test_token_storage_as_str() {
        assert_eq!(TokenStorage::Keyring.as_str(), "keyring");
        assert_eq!(TokenStorage::Config.as_str(), "config");
        assert_eq!(TokenStorage::Env.as_str(), "env");
    }

    #[test]
    #[serial]
    fn test_save_setup_config_with_token() {
        with_config_path(|path| {
            save_setup_config("test-token-12345", TokenStorage::Config).unwrap();

            let content = fs::read_to_string(path).unwrap();
            assert!(content.contains("token = \"test-token-12345\""));
            assert!(content.contains("token_storage = \"config\""));
        });
    }

    #[test]
    #[serial]
    fn test_save_setup_config_env_only() {
        with_config_path(|path| {
            save_setup_config("test-token-12345", TokenStorage::Env).unwrap();

            let content = fs::read_to_string(path).unwrap();
            assert!(!content.contains("test-token-12345"));
            assert!(content.contains("token_storage = \"env\""));
        });
    }

    #[test]
    #[serial]
    fn test_save_setup_config_keeps_api_url() {
        with_config_path(|path| {
            fs::write(path, "api_url = \"http://localhost:9999/api\"\n").unwrap();

            save_setup_config("test-token-12345", TokenStorage::Config).unwrap();

            let content = fs::read_to_string(path).unwrap();
            assert!(content.contains("api_url = \"http://localhost:9999/api\""));
            assert!(content.contains("token = \"test-token-12345\""));
        });
    }
}
