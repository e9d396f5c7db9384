//! pinchpan CLI - replay and check pointer traces.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::ptr_arg,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]

use clap::{Parser, Subcommand, ValueEnum};
use pinchpan_core::GestureConfig;
use pinchpan_replay::{ReplayReport, Replayer, Trace, TraceError};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pinchpan")]
#[command(about = "Pan and pinch-to-zoom gesture recognition over pointer traces")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a trace and print the recognized gestures
    Replay {
        /// Path to trace file
        trace: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Contacts required to start a pan (overrides the trace config)
        #[arg(long)]
        required_pointers: Option<usize>,

        /// Disable pinch-to-zoom events
        #[arg(long)]
        no_zoom: bool,
    },

    /// Check trace validity
    Check {
        /// Path to trace file
        trace: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Trace {
        path: PathBuf,
        #[source]
        source: TraceError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Replay {
            trace,
            format,
            required_pointers,
            no_zoom,
        } => {
            let loaded = load(&trace)?;
            let config = apply_overrides(loaded.config, required_pointers, no_zoom);
            info!(path = %trace.display(), "replaying");
            let report = Replayer::new(config)
                .replay(&loaded)
                .map_err(|source| CliError::Trace {
                    path: trace.clone(),
                    source,
                })?;
            match format {
                Format::Text => print!("{}", render_text(&report)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            Ok(())
        }
        Commands::Check { trace } => check_trace(&trace),
    }
}

fn load(path: &PathBuf) -> Result<Trace, CliError> {
    Trace::from_path(path).map_err(|source| CliError::Trace {
        path: path.clone(),
        source,
    })
}

/// Apply command-line overrides on top of the trace's configuration.
///
/// A multi-contact requirement implies counting non-primary contacts.
fn apply_overrides(
    mut config: GestureConfig,
    required_pointers: Option<usize>,
    no_zoom: bool,
) -> GestureConfig {
    if let Some(n) = required_pointers {
        config.pan.required_pointers = n;
        if n > 1 {
            config.pan.primary_only = false;
        }
    }
    if no_zoom {
        config.pinch.zoomable = false;
    }
    config
}

fn render_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    for event in &report.events {
        let _ = writeln!(out, "{}", event);
    }
    let _ = writeln!(out, "Transform: {}", report.transform);
    let _ = writeln!(
        out,
        "Gestures: {} pan, {} pinch ({} events)",
        report.pan_gestures,
        report.pinch_gestures,
        report.events.len()
    );
    out
}

fn check_trace(path: &PathBuf) -> Result<(), CliError> {
    println!("Checking trace: {}", path.display());

    let trace = load(path)?;
    let wrap = |source: TraceError| CliError::Trace {
        path: path.clone(),
        source,
    };
    let summary = trace.validate().map_err(wrap)?;
    let pan = trace
        .config
        .pan
        .validate()
        .map_err(|e| wrap(TraceError::Config(e)))?;

    println!("Trace valid!");
    if !trace.description.is_empty() {
        println!("  Description: {}", trace.description);
    }
    println!("  Events: {}", summary.events);
    println!("  Pointers: {}", summary.pointers);
    println!("  Duration: {} ticks", summary.duration);
    println!(
        "  Pan: {} pointer(s){}",
        pan.required_pointers,
        if pan.primary_only { ", primary only" } else { "" }
    );
    println!("  Pinch zoomable: {}", trace.config.pinch.zoomable);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinchpan_core::{GestureEvent, GestureId, PanGestureEvent, Transform2D, Vector};

    #[test]
    fn test_parse_replay_args() {
        let cli = Cli::try_parse_from([
            "pinchpan",
            "-vv",
            "replay",
            "trace.yaml",
            "--format",
            "json",
            "--required-pointers",
            "2",
            "--no-zoom",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Replay {
                trace,
                format,
                required_pointers,
                no_zoom,
            } => {
                assert_eq!(trace, PathBuf::from("trace.yaml"));
                assert_eq!(format, Format::Json);
                assert_eq!(required_pointers, Some(2));
                assert!(no_zoom);
            }
            Commands::Check { .. } => panic!("expected replay"),
        }
    }

    #[test]
    fn test_parse_check_args() {
        let cli = Cli::try_parse_from(["pinchpan", "check", "t.yaml"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Check { .. }));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["pinchpan", "replay", "t.yaml", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = apply_overrides(GestureConfig::default(), Some(3), true);
        assert_eq!(config.pan.required_pointers, 3);
        assert!(!config.pan.primary_only);
        assert!(!config.pinch.zoomable);
        assert!(config.pan.validate().is_ok());

        let untouched = apply_overrides(GestureConfig::default(), None, false);
        assert_eq!(untouched, GestureConfig::default());

        let single = apply_overrides(GestureConfig::default(), Some(1), false);
        assert!(single.pan.primary_only);
    }

    #[test]
    fn test_render_text() {
        let report = ReplayReport {
            events: vec![GestureEvent::Pan(PanGestureEvent {
                gesture_id: GestureId(1),
                delta: Vector::new(10.0, 0.0),
                velocity: Vector::new(0.1, 0.0),
            })],
            transform: Transform2D::translate(10.0, 0.0),
            pan_gestures: 1,
            pinch_gestures: 0,
        };
        let text = render_text(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "[Pan] GestureId='1', Delta='10, 0', Velocity='0.1, 0'"
        );
        assert_eq!(lines[1], "Transform: [1, 0, 0, 1, 10, 0]");
        assert_eq!(lines[2], "Gestures: 1 pan, 0 pinch (1 events)");
    }

    #[test]
    fn test_missing_trace_reports_path() {
        let err = load(&PathBuf::from("no/such/trace.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("no/such/trace.yaml: I/O error"));
    }
}
