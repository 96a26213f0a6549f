//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, PowerShell and
//! elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::QuickDevError;

const BIN_NAME: &str = "quickdev";

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, QuickDevError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| QuickDevError::InvalidArgument(format!("Completion script is not UTF-8: {e}")))
}

/// How to install the completion script for `shell`.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(quickdev completions bash)

# Or save to a file:
quickdev completions bash > /usr/local/etc/bash_completion.d/quickdev
"
        .to_string(),

        Shell::Zsh => r"# Add to ~/.zshrc (before compinit):
source <(quickdev completions zsh)

# Or save to your fpath:
quickdev completions zsh > ~/.zsh/completions/_quickdev
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
quickdev completions fish > ~/.config/fish/completions/quickdev.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
quickdev completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
quickdev completions elvish > ~/.elvish/lib/quickdev.elv

# Then add to ~/.elvish/rc.elv:
use quickdev
"
        .to_string(),

        _ => format!("# No install instructions for {shell}\n"),
    }
}
