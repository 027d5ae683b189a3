//! `confluence-rest completions`: shell completion scripts.

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell as CompletionShell, generate};

use crate::cli::{Cli, Shell};

impl From<Shell> for CompletionShell {
  fn from(shell: Shell) -> Self {
    match shell {
      Shell::Bash => CompletionShell::Bash,
      Shell::Zsh => CompletionShell::Zsh,
      Shell::Fish => CompletionShell::Fish,
      Shell::Powershell => CompletionShell::PowerShell,
      Shell::Elvish => CompletionShell::Elvish,
    }
  }
}

pub(crate) fn handle_completions_command(shell: Shell) {
  write_completions(shell, &mut io::stdout());
}

fn write_completions(shell: Shell, out: &mut dyn io::Write) {
  let mut cmd = Cli::command();
  let bin_name = cmd.get_name().to_string();
  generate(CompletionShell::from(shell), &mut cmd, bin_name, out);
}
