mod commands;
mod config;
mod render;

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpBackend, SessionController, UploadFile};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::{ConsoleCommand, HELP},
    config::{load_settings, Cli, Settings},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // All session state lives on this one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(run(settings))
}

async fn run(settings: Settings) -> Result<()> {
    let backend = HttpBackend::new(&settings.server_url, settings.request_timeout())?;
    info!(server_url = %backend.server_url(), "starting case console");

    let mut controller = SessionController::new(Arc::new(backend), settings.session_options());
    controller.start();

    for message in controller.state().conversation().messages() {
        println!("{}", render::message(message));
    }
    println!("{}", render::status_line(controller.state()));
    println!("type /help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if !handle_line(&mut controller, &line).await {
                    break;
                }
            }
            Some(event) = controller.next_event() => {
                let applied = controller.apply(event);
                for line in render::announcement(&applied, controller.state()) {
                    println!("{}", line.trim_end());
                }
            }
        }
    }

    controller.shutdown();
    info!("case console closed");
    Ok(())
}

/// Returns `false` when the session should end.
async fn handle_line(controller: &mut SessionController, line: &str) -> bool {
    let command = match commands::parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(message) => {
            println!("{message}");
            return true;
        }
    };

    match command {
        ConsoleCommand::Query(text) => match controller.send(&text) {
            Ok(()) => println!("{}", render::SEARCHING),
            Err(err) => println!("{err}"),
        },
        ConsoleCommand::ListCases => {
            controller.refresh_cases();
            println!("refreshing case list...");
        }
        ConsoleCommand::SelectCase(name) => match controller.select_case(&name) {
            Ok(()) => println!("active case: {}", controller.state().cases().selected()),
            Err(err) => println!("{err}"),
        },
        ConsoleCommand::SwitchView(view) => {
            controller.set_view(view);
            print!("{}", render::active_view(controller.state()));
        }
        ConsoleCommand::Ingest => match controller.ingest() {
            Ok(()) => println!("re-indexing evidence..."),
            Err(err) => println!("{err}"),
        },
        ConsoleCommand::Upload(path) => match read_upload(&path).await {
            Ok(file) => {
                let filename = file.filename.clone();
                match controller.upload(file) {
                    Ok(()) => println!("uploading {filename}..."),
                    Err(err) => println!("{err}"),
                }
            }
            Err(err) => {
                warn!("upload aborted: {err:#}");
                println!("{err:#}");
            }
        },
        ConsoleCommand::Status => println!("{}", render::status_line(controller.state())),
        ConsoleCommand::Show => print!("{}", render::active_view(controller.state())),
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => return false,
    }
    true
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("'{}' has no usable file name", path.display()))?;
    let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);
    if mime_type.is_none() {
        warn!(%filename, "could not determine file type");
    }
    Ok(UploadFile {
        filename,
        mime_type,
        bytes,
    })
}
