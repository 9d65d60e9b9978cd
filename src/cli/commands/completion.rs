//! completion command - Print a completion script for `pl`

use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::args::{Cli, Shell};

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
        }
    }
}

/// Print the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let stdout = io::stdout();
    write_script(shell, &mut stdout.lock())
}

fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(clap_complete::Shell::from(shell), &mut cmd, bin, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_script(shell, &mut buf).expect("generate");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn bash_script_completes_subcommands() {
        let text = script(Shell::Bash);
        assert!(text.contains("_pl()"), "{text}");
        assert!(text.contains("restore"));
    }

    #[test]
    fn every_shell_produces_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            assert!(!script(shell).is_empty(), "{shell:?}");
        }
    }
}
