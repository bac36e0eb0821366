//! Keil to VS Code CLI
//!
//! Entry point for the `keil2vscode` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use keil_to_vscode::logging::{init_tracing, level_from_flags};
use keil_to_vscode::{run, PipelineError, RunOptions, ToolchainOverrides, ToolchainSettings};
use tracing::error;

#[derive(Parser)]
#[command(name = "keil2vscode")]
#[command(
    about = "Generate or update VS Code c_cpp_properties.json from a Keil .uvprojx project",
    version
)]
struct Cli {
    /// Directory searched recursively for a .uvprojx file
    #[arg(long, short = 's', default_value = ".")]
    src_dir: PathBuf,

    /// Target .vscode directory (default: <src-dir>/.vscode)
    #[arg(long, short = 'd')]
    vscode_dir: Option<PathBuf>,

    /// Configuration entry name (default: project file name without extension)
    #[arg(long)]
    config_name: Option<String>,

    /// Create .editorconfig in the source directory if it does not exist
    #[arg(long)]
    create_editorconfig: bool,

    /// Seed a "Default" entry when c_cpp_properties.json is created
    #[arg(long)]
    create_default_config: bool,

    /// Toolchain settings file (default: <src-dir>/keil2vscode.toml if present)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// compilerPath for entries this tool creates
    #[arg(long)]
    compiler_path: Option<String>,

    /// intelliSenseMode for entries this tool creates
    #[arg(long)]
    intellisense_mode: Option<String>,

    /// cStandard for entries this tool creates
    #[arg(long)]
    c_standard: Option<String>,

    /// cppStandard for entries this tool creates
    #[arg(long)]
    cpp_standard: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(level_from_flags(cli.verbose, cli.quiet));

    let overrides = ToolchainOverrides {
        compiler_path: cli.compiler_path,
        intellisense_mode: cli.intellisense_mode,
        c_standard: cli.c_standard,
        cpp_standard: cli.cpp_standard,
    };
    let toolchain =
        match ToolchainSettings::resolve(&cli.src_dir, cli.settings.as_deref(), &overrides) {
            Ok(settings) => settings,
            Err(e) => {
                let e = PipelineError::from(e);
                error!("{}", e);
                process::exit(e.exit_code());
            }
        };

    let vscode_dir = cli
        .vscode_dir
        .unwrap_or_else(|| cli.src_dir.join(".vscode"));
    let mut options = RunOptions::new(cli.src_dir)
        .with_vscode_dir(vscode_dir)
        .with_editorconfig(cli.create_editorconfig)
        .with_default_config(cli.create_default_config)
        .with_toolchain(toolchain);
    if let Some(name) = cli.config_name {
        options = options.with_config_name(name);
    }

    // Failures are logged where they happen
    if let Err(e) = run(&options) {
        process::exit(e.exit_code());
    }
}
