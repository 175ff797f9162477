mod cli;
mod error;
mod settings;

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mandelzoom_render::{export_png, render_frame, ExportMetadata, RenderProgress};

use cli::Args;
use error::CliError;
use settings::Settings;

/// How often the progress reporter wakes up while a frame renders.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

fn init_tracing(level: Option<LevelFilter>) {
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Log row progress until `finished` disconnects.
fn report_progress(progress: &RenderProgress, finished: mpsc::Receiver<()>) {
    while let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(PROGRESS_INTERVAL) {
        let (done, total) = progress.progress();
        if total > 0 && done < total {
            debug!(rows_done = done, rows_total = total, "Rendering");
        }
    }
}

/// Render the configured frame and write it out.
fn run(settings: &Settings) -> Result<(), CliError> {
    let start = Instant::now();
    let render = &settings.render;
    info!(
        level = render.zoom_level,
        factor = render.zoom_factor,
        center = %render.zoom_center,
        "Zooming"
    );

    let progress = RenderProgress::new();
    let result = thread::scope(|s| {
        // Dropping the sender, on return or unwind, stops the reporter.
        let (_finished_tx, finished_rx) = mpsc::channel::<()>();
        s.spawn(|| report_progress(&progress, finished_rx));
        render_frame(render, &progress)
    })?;

    info!(path = %settings.output_path.display(), "Writing image data");
    let metadata = ExportMetadata::new(render, &result.viewport);
    export_png(&result.buffer, &settings.output_path, &metadata)?;

    info!(
        elapsed_ms = start.elapsed().as_millis(),
        "Frame rendering complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging depends on the settings, so resolve them first and report
    // any failure once a subscriber is installed.
    let settings = Settings::from_args(&args);
    let level = match &settings {
        Ok(s) => s.level_filter(),
        Err(_) => Ok(None),
    };
    init_tracing(level.as_ref().ok().copied().flatten());

    info!("Initializing Mandelzoom");

    let outcome = level
        .and(settings)
        .and_then(|settings| run(&settings));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_stops_as_soon_as_render_side_finishes() {
        let progress = RenderProgress::new();
        progress.reset(10);
        let start = Instant::now();
        thread::scope(|s| {
            let (finished_tx, finished_rx) = mpsc::channel::<()>();
            let reporter = s.spawn(|| report_progress(&progress, finished_rx));
            drop(finished_tx);
            reporter.join().unwrap();
        });
        assert!(start.elapsed() < PROGRESS_INTERVAL);
    }

    #[test]
    fn reporter_stops_when_render_side_panics() {
        let progress = RenderProgress::new();
        let outcome = std::panic::catch_unwind(|| {
            thread::scope(|s| {
                let (_finished_tx, finished_rx) = mpsc::channel::<()>();
                s.spawn(|| report_progress(&progress, finished_rx));
                panic!("render failed");
            })
        });
        assert!(outcome.is_err());
    }
}
