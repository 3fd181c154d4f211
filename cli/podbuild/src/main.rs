//! podbuild: translate podspecs into Bazel `apple_framework` targets.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "podbuild", version, about = "Generate Bazel BUILD files from podspecs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the apple_framework target for a podspec
    Generate {
        /// Podspec in JSON form (`pod ipc spec` output)
        podspec: PathBuf,
        /// Subspec to include (repeatable; default: default_subspecs or all)
        #[arg(long = "subspec")]
        subspecs: Vec<String>,
        /// Extra local target to depend on (repeatable)
        #[arg(long = "dep")]
        deps: Vec<String>,
        /// Local Info.plist target to attach (repeatable)
        #[arg(long = "info-plist")]
        info_plists: Vec<String>,
        /// Build options file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Starlark)]
        format: OutputFormat,
        /// Link the framework dynamically when it has sources
        #[arg(long)]
        link_dynamic: bool,
        /// Label prefix for other pods
        #[arg(long)]
        deps_prefix: Option<String>,
        /// iOS deployment target used when the podspec declares none
        #[arg(long)]
        ios_platform: Option<String>,
    },
    /// Print the default build options as TOML
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// BUILD file text
    Starlark,
    /// The assembled target record
    Json,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            podspec,
            subspecs,
            deps,
            info_plists,
            config,
            output,
            format,
            link_dynamic,
            deps_prefix,
            ios_platform,
        } => {
            let mut options = commands::config::load(config.as_deref())?;
            options.link_dynamic |= link_dynamic;
            if let Some(prefix) = deps_prefix {
                options.deps_prefix = prefix;
            }
            if let Some(version) = ios_platform {
                options.ios_platform = version;
            }

            let request = commands::generate::Request {
                podspec: &podspec,
                subspecs: &subspecs,
                deps: &deps,
                info_plists: &info_plists,
                format,
            };
            let text = commands::generate::run(&request, &options)?;
            commands::generate::write_output(&text, output.as_deref())
        }

        Commands::Config => {
            print!("{}", commands::config::default_toml()?);
            Ok(())
        }
    }
}
