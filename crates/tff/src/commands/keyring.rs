//! Keyring operations for secure token storage.
//!
//! Stores the FeedFactory API token in the OS-native credential manager
//! (Keychain on macOS, Credential Manager on Windows, Secret Service on Linux).

use keyring::Entry;

use super::{CommandError, Result};

/// Service name for keyring entries.
const SERVICE: &str = "tff-feedfactory-cli";

/// Username for the token entry.
const USERNAME: &str = "access_token";

/// Appended to every hint: the ways around a broken keyring.
const ALTERNATIVE: &str =
    "Alternative: Set FF_ACCESS_TOKEN (environment or .env file) or use 'tff config set token <TOKEN>'";

/// Adds a platform-specific hint to keyring errors that users can fix.
fn platform_hint(error: &keyring::Error) -> String {
    let hint = match error {
        keyring::Error::NoStorageAccess(_) => platform_access_hint(),
        keyring::Error::PlatformFailure(_) => platform_failure_hint(),
        _ => return error.to_string(),
    };

    format!("{}\n\nHint: {}\n\n{}", error, hint, ALTERNATIVE)
}

#[cfg(target_os = "linux")]
fn platform_access_hint() -> &'static str {
    "On Linux, tff uses the Secret Service API (libsecret).\n\
     Install a provider such as gnome-keyring or kwallet and make sure the daemon is running:\n\
       systemctl --user status gnome-keyring-daemon"
}

#[cfg(target_os = "macos")]
fn platform_access_hint() -> &'static str {
    "On macOS, tff uses the Keychain. Unlock your login keychain and allow 'tff' access:\n\
       security unlock-keychain ~/Library/Keychains/login.keychain-db"
}

#[cfg(target_os = "windows")]
fn platform_access_hint() -> &'static str {
    "On Windows, tff uses Credential Manager. Open it from the Start menu and check Windows Credentials."
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_access_hint() -> &'static str {
    "Your platform's credential storage is not accessible."
}

#[cfg(target_os = "linux")]
fn platform_failure_hint() -> &'static str {
    "The Secret Service API encountered an error. Over SSH or in containers the D-Bus session bus\n\
     is often missing; try 'eval $(dbus-launch --sh-syntax)'."
}

#[cfg(target_os = "macos")]
fn platform_failure_hint() -> &'static str {
    "The Keychain encountered an error. Try 'Keychain First Aid' in Keychain Access."
}

#[cfg(target_os = "windows")]
fn platform_failure_hint() -> &'static str {
    "Windows Credential Manager encountered an error. Check that the Credential Manager service is running."
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_failure_hint() -> &'static str {
    "Your platform's credential storage encountered an error."
}

fn entry() -> Result<Entry> {
    Entry::new(SERVICE, USERNAME)
        .map_err(|e| CommandError::Config(format!("Keyring error: {}", platform_hint(&e))))
}

/// Stores token in OS keyring.
///
/// # Errors
///
/// Returns an error if the keyring is not available or the operation fails.
pub fn store_token(token: &str) -> Result<()> {
    entry()?
        .set_password(token)
        .map_err(|e| CommandError::Config(format!("Failed to store token: {}", platform_hint(&e))))
}

/// Retrieves token from OS keyring.
///
/// Returns `Ok(None)` if no token is stored.
///
/// # Errors
///
/// Returns an error if the keyring is not available or an unexpected error occurs.
pub fn get_token() -> Result<Option<String>> {
    match entry()?.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        // Multiple entries, treat as not found
        Err(keyring::Error::Ambiguous(_)) => Ok(None),
        Err(e) => Err(CommandError::Config(format!(
            "Failed to read token: {}",
            platform_hint(&e)
        ))),
    }
}

/// Checks if keyring is available on this system.
///
/// Only creates an entry; a locked keyring is detected on first read or write.
pub fn is_available() -> bool {
    Entry::new(SERVICE, "probe").is_ok()
}
