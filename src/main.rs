use clap::Parser;
use grounded_bug_report::cli::commands::{cmd_generate, cmd_project, cmd_reverse, emit};
use grounded_bug_report::cli::config::{Cli, Commands, GenerateSettings, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match &cli.command {
        Commands::Project {
            graph,
            view,
            screens,
            format,
        } => {
            let output = cmd_project(graph, *view, *screens, format)?;
            emit(&output, None)?;
        }
        Commands::Reverse { graph, input } => {
            let output = cmd_reverse(graph, input.as_deref())?;
            // reversed text keeps its own trailing newline
            print!("{}", output);
        }
        Commands::Generate(args) => {
            let settings = GenerateSettings::resolve(&cli, args, &config);
            let output = cmd_generate(&settings)?;
            emit(&output, settings.output.as_deref())?;
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
