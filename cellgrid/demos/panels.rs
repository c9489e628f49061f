//! Two bordered panels sharing an edge, a status line and a few keys.
//!
//! Keys: `Tab` toggles the right panel, `c` cycles the background color,
//! `q` or `Esc` quits. Logs go to `cellgrid-demo.log`; set `RUST_LOG` to
//! change the level. Set `CELLGRID_CONFIG` to a TOML file to override the
//! engine configuration.

use std::fs::File;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use cellgrid::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn setup_file_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = File::create("cellgrid-demo.log")
        .map_err(|e| anyhow::anyhow!("Failed to create cellgrid-demo.log: {e}"))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config() -> Result<EngineConfig> {
    match std::env::var_os("CELLGRID_CONFIG") {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    let _guard = setup_file_logging()?;
    let config = load_config()?;
    let mut app = Application::terminal(config)?;

    let tree = app.tree_mut();
    let root = tree.root();
    let left = tree.add_child_at(
        root,
        Rect::new(1, 1, 24, 8),
        Panel::new(BorderStyle::Line).with_open(OpenSides::RIGHT),
    )?;
    let right = tree.add_child_at(
        root,
        Rect::new(24, 1, 24, 8),
        Panel::new(BorderStyle::Line).with_open(OpenSides::LEFT),
    )?;
    tree.add_child_at(
        left,
        Rect::new(0, 0, 22, 6),
        TextBlock::new(["Tab: toggle right", "c: cycle background", "q: quit"]),
    )?;
    let greeting = tree.add_child_at(right, Rect::new(0, 0, 22, 6), Label::new("cellgrid"))?;
    tree.set_alignment(greeting, TextAlignment::Center)?;
    if let Some(colors) = tree.colors_mut(greeting) {
        colors.set(ColorChannel::Foreground, Color::Yellow);
    }
    let status = tree.add_child_at(
        root,
        Rect::new(1, 9, 47, 1),
        Label::new("").with_hint("waiting for first frame"),
    )?;

    let toggle = Arc::new(AtomicBool::new(false));
    let cycle = Arc::new(AtomicUsize::new(0));
    let quit = app.quit_handle();
    {
        let (toggle, cycle) = (Arc::clone(&toggle), Arc::clone(&cycle));
        app.tree_mut().on_key(root, move |key| match key.code {
            KeyCode::Tab => toggle.store(true, Ordering::Relaxed),
            KeyCode::Char('c') => {
                cycle.fetch_add(1, Ordering::Relaxed);
            }
            KeyCode::Char('q') | KeyCode::Esc => quit.store(true, Ordering::Relaxed),
            _ => {}
        })?;
    }

    let mut frames: u64 = 0;
    app.run(|tree, stats| {
        frames += 1;
        if toggle.swap(false, Ordering::Relaxed) {
            let visible = tree.visible(right);
            let _ = tree.set_visible(right, !visible);
        }
        let background = Color::ALL[cycle.load(Ordering::Relaxed) % Color::ALL.len()];
        let root = tree.root();
        if let Some(colors) = tree.colors_mut(root) {
            colors.set(ColorChannel::Background, background);
        }
        if let Some(label) = tree.widget_mut::<Label>(status) {
            label.text = format!(
                "frame {frames}: {} cells, {} runs, {} failed",
                stats.changed_cells, stats.runs, stats.failed_runs
            );
        }
        tracing::trace!(frames, ?background, "demo tick");
        true
    })?;
    Ok(())
}
