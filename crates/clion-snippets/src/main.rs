//! clion-snippets - Convert CLion live templates into VS Code C++ snippets

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use snippet_core::tui::ConvertArgs;
use snippet_core::{platform_config_dir, LogConfig, ProductConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLion → VS Code product configuration
#[derive(Clone)]
pub struct ClionConfig;

impl ProductConfig for ClionConfig {
    fn name(&self) -> &'static str {
        "clion-snippets"
    }

    fn display_name(&self) -> &'static str {
        "CLion → VS Code snippets"
    }

    fn cli_description(&self) -> &'static str {
        "Convert CLion C/C++ live templates into VS Code snippets"
    }

    fn directory_prefix(&self) -> &'static str {
        "CLion"
    }

    fn template_file(&self) -> &'static str {
        "templates/C_C__.xml"
    }

    fn installations_dir_env(&self) -> &'static str {
        "CLION_SNIPPETS_JETBRAINS_DIR"
    }

    fn default_installations_dir(&self) -> PathBuf {
        platform_config_dir().join("JetBrains")
    }

    fn default_output_path(&self) -> PathBuf {
        platform_config_dir()
            .join("Code")
            .join("User")
            .join("snippets")
            .join("cpp.json")
    }

    fn settings_key(&self) -> &'static str {
        "clion_version"
    }
}

#[derive(Parser, Debug)]
#[command(name = "clion-snippets")]
#[command(about = "Convert CLion C/C++ live templates into VS Code snippets")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert the templates of a CLion installation (default)
    Convert(CliConvertArgs),
    /// List the CLion installations that were found
    List(ListArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct CliConvertArgs {
    /// Directory holding the CLion<YYYY>.<minor> installations
    #[arg(long = "jetbrains-dir")]
    pub jetbrains_dir: Option<PathBuf>,

    /// Snippets file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file remembering the chosen version
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Keep $NAME$ variables instead of numbering them
    #[arg(long = "keep-variables")]
    pub keep_variables: bool,

    /// Do not offer the "latest" answer when confirming the version
    #[arg(long = "no-latest")]
    pub no_latest: bool,

    /// Do not remember versions picked after the first confirmation
    #[arg(long = "no-remember")]
    pub no_remember: bool,
}

impl CliConvertArgs {
    fn into_convert_args(self, config: &ClionConfig) -> ConvertArgs {
        let defaults = ConvertArgs::from_config(config);
        ConvertArgs {
            installations_dir: self.jetbrains_dir.unwrap_or(defaults.installations_dir),
            output: self.output.unwrap_or(defaults.output),
            settings_path: self.settings.unwrap_or(defaults.settings_path),
            keep_variables: self.keep_variables,
            allow_latest: !self.no_latest,
            remember_choice: !self.no_remember,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Directory holding the CLion<YYYY>.<minor> installations
    #[arg(long = "jetbrains-dir")]
    pub jetbrains_dir: Option<PathBuf>,

    /// Settings file remembering the chosen version
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

fn convert(config: &ClionConfig, args: CliConvertArgs) -> ExitCode {
    let result = snippet_core::run(config, args.into_convert_args(config));

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "conversion ended with an error");
            ExitCode::from(e.exit_code())
        }
    }
}

fn list(config: &ClionConfig, args: ListArgs) -> Result<()> {
    let installations_dir = args
        .jetbrains_dir
        .unwrap_or_else(|| config.installations_dir());
    let settings_path = args.settings.unwrap_or_else(|| config.settings_path());

    snippet_core::tui::list(config, installations_dir, settings_path)?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    snippet_core::init_logging(&LogConfig::from_verbosity(args.verbose))?;

    let config = ClionConfig;

    match args.command {
        Some(Command::Convert(convert_args)) => Ok(convert(&config, convert_args)),
        Some(Command::List(list_args)) => {
            list(&config, list_args)?;
            Ok(ExitCode::SUCCESS)
        }
        // No subcommand provided, default to convert behavior (interactive mode)
        None => Ok(convert(&config, CliConvertArgs::default())),
    }
}
