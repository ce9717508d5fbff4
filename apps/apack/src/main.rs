//! apack - agent package builder
//!
//! The CLI application: parses arguments, loads configuration, wires the
//! pipeline context and renders events. This is also the only place where
//! typed errors become process exit codes.

mod cli;
mod display;
mod error;
mod events;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use apack_config::{ColorChoice, Config, OutputFormat, PackageSpec};
use apack_events::EventReceiver;
use apack_net::{NetClient, NetConfig};
use apack_ops::{OpsCtxBuilder, PackageReport};
use clap::Parser;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.verbose);

    // Run the application and map failures to the exit-code contract
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting apack v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }
    if cli.global.json {
        config.general.default_output = OutputFormat::Json;
    }

    let json = config.general.default_output == OutputFormat::Json;
    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };

    let renderer = OutputRenderer::new(json, colors_enabled);
    // In JSON mode nothing but the report may reach the streams
    let mut event_handler = if json {
        None
    } else {
        Some(EventHandler::new(colors_enabled, cli.global.verbose))
    };

    let report = match cli.command {
        Commands::Create { spec, force } => {
            let spec = PackageSpec::load(&spec).await?;

            let (tx, rx) = apack_events::channel();
            let net = NetClient::new(NetConfig::from(&config.network))?;

            let ctx = OpsCtxBuilder::new()
                .with_spec(spec)
                .with_config(config.clone())
                .with_net(net)
                .with_event_sender(tx)
                .with_force(force)
                .build()?;

            execute_create_with_events(ctx, rx, event_handler.as_mut()).await?
        }
    };

    renderer.render_report(&report)?;

    info!("Command completed successfully");
    Ok(())
}

/// Run the create pipeline with concurrent event handling
async fn execute_create_with_events(
    ctx: apack_ops::OpsCtx,
    mut event_receiver: EventReceiver,
    mut event_handler: Option<&mut EventHandler>,
) -> Result<PackageReport, CliError> {
    let mut command_future = Box::pin(async { apack_ops::create(&ctx).await });

    loop {
        select! {
            // Pipeline completed
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    if let Some(handler) = event_handler.as_deref_mut() {
                        handler.handle_event(event);
                    }
                }
                return result.map_err(CliError::from);
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => {
                        if let Some(handler) = event_handler.as_deref_mut() {
                            handler.handle_event(event);
                        }
                    }
                    None => { /* Channel closed: keep waiting for the pipeline to finish */ }
                }
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, verbose: bool) {
    if json_mode {
        // JSON mode: suppress console logging to avoid contaminating output
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
        return;
    }

    let default_filter = if verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
