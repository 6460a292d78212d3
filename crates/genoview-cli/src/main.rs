//! Genoview CLI - Main entry point

use clap::Parser;
use genoview_cli::commands::{self, CommandContext};
use genoview_cli::{Cli, Commands, Config, ConfigCommand, GenomeClient};
use genoview_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = cli.command.as_ref() else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    // Verbose: debug to console. Otherwise warnings only. LOG_* variables win.
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("genoview")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging, so a failed init is not fatal
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli, command).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, command: &Commands) -> genoview_cli::Result<()> {
    let config = Config::from_env()?;

    if let Commands::Config { command } = command {
        return match command {
            ConfigCommand::Show => commands::config::show(&config, cli.format),
        };
    }

    let client = GenomeClient::new(config)?;
    let ctx = CommandContext::new(client, cli.genome.clone(), cli.format);

    match command {
        Commands::Genomes { organism } => commands::genomes::run(&ctx, organism.clone()).await,

        Commands::Chromosomes => commands::chromosomes::run(&ctx).await,

        Commands::Search { query, chromosome } => {
            commands::search::run(&ctx, query.clone(), chromosome.clone()).await
        }

        Commands::Gene {
            gene_id,
            symbol,
            chrom,
        } => commands::gene::run(&ctx, gene_id.clone(), symbol.clone(), chrom.clone()).await,

        Commands::Sequence { chrom, start, end } => {
            commands::sequence::run(&ctx, chrom.clone(), start.clone(), end.clone()).await
        }

        Commands::Variants {
            gene_id,
            chrom,
            analyze,
        } => commands::variants::run(&ctx, gene_id.clone(), chrom.clone(), analyze.clone()).await,

        Commands::Analyze {
            position,
            alternative,
            chrom,
        } => commands::analyze::run(&ctx, position.clone(), alternative.clone(), chrom.clone()).await,

        Commands::Browse => commands::browse::run(&ctx).await,

        Commands::Config { .. } => Ok(()),
    }
}
