//! Shell completions command implementation.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};

use crate::cli::{Cli, Shell};

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::Powershell => ClapShell::PowerShell,
        }
    }
}

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(ClapShell::from(shell), &mut cmd, "tff", out);
}

/// Generate shell completions for the given shell and write to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn execute(shell: &Shell) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(*shell, &mut stdout);
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_shell_mapping() {
        assert!(matches!(ClapShell::from(Shell::Bash), ClapShell::Bash));
        assert!(matches!(ClapShell::from(Shell::Zsh), ClapShell::Zsh));
        assert!(matches!(ClapShell::from(Shell::Fish), ClapShell::Fish));
        assert!(matches!(
            ClapShell::from(Shell::Powershell),
            ClapShell::PowerShell
        ));
    }

    #[test]
    fn test_bash_script_names_binary_and_commands() {
        let out = script(Shell::Bash);
        assert!(out.contains("tff"));
        assert!(out.contains("eventgroups"));
    }

    #[test]
    fn test_fish_script_lists_resource_flags() {
        let out = script(Shell::Fish);
        assert!(out.contains("updated-since"));
    }
}
