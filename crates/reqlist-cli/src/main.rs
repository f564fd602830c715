mod commands;
mod config;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_MANIFEST_ERROR};
use config::CliConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "reqlist",
    version,
    about = "Parse, check, and format pip-style requirements manifests"
)]
struct Cli {
    /// Path to a config file (default: ./.reqlist.toml, then ~/.config/reqlist/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a manifest and report grammar errors or duplicate requirements.
    Check {
        /// Path to the manifest (default: requirements.txt).
        manifest: Option<PathBuf>,
    },
    /// List active requirements with their constraints.
    List {
        /// Path to the manifest (default: requirements.txt).
        manifest: Option<PathBuf>,
    },
    /// Rewrite a manifest with normalized whitespace.
    Fmt {
        /// Path to the manifest (default: requirements.txt).
        manifest: Option<PathBuf>,
        /// Exit non-zero if the file is not already formatted; do not write.
        #[arg(long, default_value_t = false, conflicts_with = "stdout")]
        check: bool,
        /// Print the formatted manifest instead of writing it.
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
    /// Show counts, identity, and commented-out pins of a manifest.
    Inspect {
        /// Path to the manifest (default: requirements.txt).
        manifest: Option<PathBuf>,
    },
    /// Compare the active requirements of two manifests.
    Diff {
        /// Baseline manifest.
        old: PathBuf,
        /// Manifest to compare against the baseline.
        new: PathBuf,
    },
    /// Report requirements that lack an exact '==' pin.
    Pin {
        /// Path to the manifest (default: requirements.txt).
        manifest: Option<PathBuf>,
        /// Exit non-zero if any requirement is not pinned.
        #[arg(long, default_value_t = false)]
        check: bool,
    },
    /// Write a new manifest from a built-in template.
    New {
        /// Template name (prompted for on a TTY when omitted).
        #[arg(long)]
        template: Option<String>,
        /// Destination file.
        #[arg(long, short, default_value = "requirements.txt")]
        output: PathBuf,
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("REQLIST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::load_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let json_output = cli.json;

    let result = match cli.command {
        Commands::Check { manifest } => {
            commands::check::run(&config.manifest_path(manifest), json_output)
        }
        Commands::List { manifest } => {
            commands::list::run(&config.manifest_path(manifest), json_output)
        }
        Commands::Fmt {
            manifest,
            check,
            stdout,
        } => commands::fmt::run(
            &config.manifest_path(manifest),
            &config.emit,
            check,
            stdout,
            json_output,
        ),
        Commands::Inspect { manifest } => {
            commands::inspect::run(&config.manifest_path(manifest), json_output)
        }
        Commands::Diff { old, new } => commands::diff::run(&old, &new, json_output),
        Commands::Pin { manifest, check } => {
            commands::pin::run(&config.manifest_path(manifest), check, json_output)
        }
        Commands::New {
            template,
            output,
            force,
        } => commands::new::run(
            &output,
            template.as_deref(),
            force,
            &config.emit,
            json_output,
        ),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("manifest error:")
                || msg.starts_with("failed to parse manifest")
                || msg.starts_with("failed to read manifest")
            {
                EXIT_MANIFEST_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
