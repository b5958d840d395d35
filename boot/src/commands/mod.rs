mod check;
mod completions;
mod create;
mod register;

use std::{path::PathBuf, process::ExitCode};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use create::{CreateGroupCommand, CreateResourceCommand, CreateVersionCommand};
use eyre::Result;
use register::RegisterCommand;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for kubeboot_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for kubeboot_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "kubeboot")]
#[command(version)]
#[command(about = "Scaffold Kubernetes-style aggregated API resources")]
pub(crate) struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<ExitCode> {
        match &self.command {
            Commands::CreateResource(cmd) => cmd.run(),
            Commands::CreateGroup(cmd) => cmd.run(),
            Commands::CreateVersion(cmd) => cmd.run(),
            Commands::Register(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a resource with its types, controller and test scaffolds
    CreateResource(CreateResourceCommand),

    /// Create the package for an API group
    CreateGroup(CreateGroupCommand),

    /// Create the package for an API version
    CreateVersion(CreateVersionCommand),

    /// Generate scheme registration for every version in kubeboot.toml
    Register(RegisterCommand),

    /// Validate kubeboot.toml without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Flags shared by every generating command.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Domain of the API groups (e.g. example.com)
    #[arg(long)]
    pub domain: Option<String>,

    /// Go module path (defaults to kubeboot.toml, then go.mod)
    #[arg(long)]
    pub repo: Option<String>,

    /// Boilerplate header file (defaults to boilerplate.go.txt)
    #[arg(long)]
    pub copyright: Option<PathBuf>,
}
