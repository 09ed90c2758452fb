use crate::{command::Command, Cli};
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use owo_colors::OwoColorize;

use anyhow::Result;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ShellWrapper {
    Bash,
    Fish,
    Zsh,
}

impl From<ShellWrapper> for Shell {
    fn from(s: ShellWrapper) -> Self {
        match s {
            ShellWrapper::Bash => Shell::Bash,
            ShellWrapper::Fish => Shell::Fish,
            ShellWrapper::Zsh => Shell::Zsh,
        }
    }
}

#[derive(Args)]
pub(crate) struct GenCompletionsArgs {
    shell: Option<ShellWrapper>,
}

pub(crate) struct GenCompletionsCommand;

impl Command for GenCompletionsCommand {
    type Args = GenCompletionsArgs;
    fn execute(args: &GenCompletionsArgs, quiet: bool) -> Result<()> {
        match args.shell {
            Some(shell) => {
                generate(
                    Shell::from(shell),
                    &mut Cli::command(),
                    "leval",
                    &mut std::io::stdout(),
                );

                if !quiet {
                    eprintln!();
                    match shell {
                        ShellWrapper::Bash => eprintln!("{}: To install these completions, run: leval gen-completions bash > /usr/share/bash-completion/completions/leval", "Hint".blue()),
                        ShellWrapper::Fish => eprintln!("{}: To install these completions, run: leval gen-completions fish > ~/.config/fish/completions/leval.fish", "Hint".blue()),
                        ShellWrapper::Zsh => eprintln!("{}: To install these completions, run: leval gen-completions zsh > \"${{fpath[1]}}/_leval\"", "Hint".blue()),
                    }
                }
            }
            None => {
                eprintln!("Generate shell completions. To install them for your shell, run:");
                eprintln!();
                eprintln!("{}", "Bash:".blue());
                eprintln!(
                    "  leval gen-completions bash > /usr/share/bash-completion/completions/leval"
                );
                eprintln!();
                eprintln!("{}", "Fish:".blue());
                eprintln!("  leval gen-completions fish > ~/.config/fish/completions/leval.fish");
                eprintln!();
                eprintln!("{}", "Zsh:".blue());
                eprintln!("  leval gen-completions zsh > \"${{fpath[1]}}/_leval\"");
                eprintln!();
            }
        }
        Ok(())
    }
}
