//! Command-line entry point

use crate::render::{JsonRenderer, SummaryRenderer};
use crate::terminal::{forward_lines, ChannelWriter, Tee};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mudmap_session::{Renderer, SessionCoordinator, SessionLoop, StreamEnd};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::{ExitCode, Stdio};
use tokio::io::AsyncRead;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    /// One status line per change
    Summary,
    /// One JSON document per change
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Mudmap - room mapper for MUD sessions")]
pub struct Args {
    /// MUD client to run, e.g. `--command telnet mud.example.org 4000`
    #[arg(
        long,
        num_args = 1..,
        allow_hyphen_values = true,
        required_unless_present = "replay",
        conflicts_with = "replay"
    )]
    pub command: Vec<String>,

    /// Replay a captured session instead of running a client
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Bytes per read when replaying
    #[arg(long, default_value = "4096")]
    pub chunk_size: usize,

    /// Start with mapping enabled
    #[arg(long)]
    pub mapping: bool,

    /// How snapshots are rendered
    #[arg(long, value_enum, default_value = "summary")]
    pub snapshot_format: SnapshotFormat,

    /// Write snapshots to this file instead of stderr
    #[arg(long)]
    pub snapshot_file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

pub async fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let log_level = match args.log_level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    };

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(log_level).into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    run_with(args, tokio::io::stdin()).await
}

/// Run a session; lines read from `input` are sent to the client.
pub async fn run_with<I>(args: Args, input: I) -> Result<ExitCode>
where
    I: AsyncRead + Unpin + Send + 'static,
{
    let mut coordinator = SessionCoordinator::new(build_renderer(&args)?);
    info!(session = %coordinator.id(), "Starting session");

    if args.mapping {
        coordinator.toggle_mapping();
    }

    let shutdown = coordinator.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            shutdown.shutdown();
        }
    });

    let end = match &args.replay {
        Some(path) => replay(path, args.chunk_size, &mut coordinator).await?,
        None => run_client(&args.command, input, &mut coordinator).await?,
    };

    coordinator.dispose();
    Ok(ExitCode::from(exit_status(&end)))
}

/// Process exit status for how the stream ended
pub fn exit_status(end: &StreamEnd) -> u8 {
    match end {
        StreamEnd::Closed | StreamEnd::Cancelled => 0,
        StreamEnd::Failed(_) => 1,
    }
}

fn build_renderer(args: &Args) -> Result<Box<dyn Renderer>> {
    let (out, color): (Box<dyn Write + Send>, bool) = match &args.snapshot_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            (Box::new(file), false)
        }
        None => (Box::new(io::stderr()), io::stderr().is_terminal()),
    };

    Ok(match args.snapshot_format {
        SnapshotFormat::Summary => Box::new(SummaryRenderer::new(out, color)),
        SnapshotFormat::Json => Box::new(JsonRenderer::new(out)),
    })
}

async fn replay(
    path: &Path,
    chunk_size: usize,
    coordinator: &mut SessionCoordinator,
) -> Result<StreamEnd> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    debug!(path = %path.display(), chunk_size, "Replaying capture");
    Ok(SessionLoop::new(file)
        .buffer_size(chunk_size)
        .run(coordinator)
        .await)
}

async fn run_client<I>(
    command: &[String],
    input: I,
    coordinator: &mut SessionCoordinator,
) -> Result<StreamEnd>
where
    I: AsyncRead + Unpin + Send + 'static,
{
    let (program, program_args) = command
        .split_first()
        .context("No client command given")?;

    let mut child = Command::new(program)
        .args(program_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to start {program}"))?;

    let stdout = child.stdout.take().context("Client stdout not captured")?;
    let stdin = child.stdin.take().context("Client stdin not captured")?;

    let (writer, writer_task) = ChannelWriter::spawn(stdin);
    coordinator.attach_terminal(Box::new(writer));

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let input_task = tokio::spawn(forward_lines(input, action_tx));

    let end = SessionLoop::new(Tee::new(stdout, io::stdout()))
        .with_actions(action_rx)
        .run(coordinator)
        .await;

    coordinator.detach_terminal();
    input_task.abort();

    if end != StreamEnd::Closed {
        if let Err(e) = child.start_kill() {
            debug!("Client already gone: {}", e);
        }
    }

    let status = child.wait().await.context("Failed to wait for client")?;
    debug!(%status, "Client exited");

    match writer_task.await {
        Ok(Err(e)) => warn!("Client input failed: {}", e),
        Err(e) if !e.is_cancelled() => warn!("Client input task failed: {}", e),
        _ => {}
    }

    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_flags() {
        let args = Args::try_parse_from([
            "mudmap",
            "--mapping",
            "--command",
            "telnet",
            "-E",
            "mud.example.org",
            "4000",
        ])
        .unwrap();

        assert_eq!(args.command, vec!["telnet", "-E", "mud.example.org", "4000"]);
        assert!(args.mapping);
        assert_eq!(args.snapshot_format, SnapshotFormat::Summary);
        assert_eq!(args.chunk_size, 4096);
    }

    #[test]
    fn test_parse_replay() {
        let args = Args::try_parse_from([
            "mudmap",
            "--replay",
            "session.log",
            "--chunk-size",
            "512",
            "--snapshot-format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.replay, Some(PathBuf::from("session.log")));
        assert_eq!(args.chunk_size, 512);
        assert_eq!(args.snapshot_format, SnapshotFormat::Json);
        assert!(args.command.is_empty());
    }

    #[test]
    fn test_source_is_required_and_exclusive() {
        assert!(Args::try_parse_from(["mudmap"]).is_err());
        assert!(Args::try_parse_from(["mudmap", "--replay", "a.log", "--command", "cat"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_status(&StreamEnd::Closed), 0);
        assert_eq!(exit_status(&StreamEnd::Cancelled), 0);
        assert_eq!(exit_status(&StreamEnd::Failed("lost".to_string())), 1);
    }
}
