//! CLI application for generating cuentas de cobro from receivables reports.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, generate, words};

/// Cuentas de cobro - billing documents from accounts receivable reports
#[derive(Parser)]
#[command(name = "cobro")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one document per person plus a consolidated PDF
    Generate(generate::GenerateArgs),

    /// Print the billing records found in a report
    Extract(extract::ExtractArgs),

    /// Spell out an amount in Spanish
    Words(words::WordsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Generate(args) => generate::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Words(args) => words::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
