use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use std::io::stdout;

mod cli;
mod config;
mod logging;
mod panels;
mod resolution;
mod screen;
mod settings;
mod status;
mod toast;
mod ui;

use cli::Cli;
use config::{log_file, SettingsStore};
use screen::{FixedScreen, ScreenMetrics, TerminalScreen};
use settings::{run_settings_view, SettingsView};
use toast::{ToastKind, ToastQueue};
use ui::Term;

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(ratatui::Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir();

    // Logging is best effort; a read-only data dir should not block editing.
    if let Err(err) = logging::init_tracing(&log_file(&data_dir)) {
        eprintln!("logging disabled: {err:#}");
    }
    tracing::info!(bundle = %cli.bundle_id, data_dir = %data_dir.display(), "starting");

    let store = SettingsStore::new(&data_dir, &cli.bundle_id);

    if cli.print {
        let settings = store.load_settings();
        let json = serde_json::to_string_pretty(&settings).context("encoding settings")?;
        println!("{json}");
        return Ok(());
    }

    let screen: Box<dyn ScreenMetrics> = match cli.screen_width {
        Some(width) => Box::new(FixedScreen(width)),
        None => Box::new(TerminalScreen),
    };
    let mut view = SettingsView::new(store, screen.as_ref());
    let mut toasts = ToastQueue::new();

    let mut terminal = init_terminal()?;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        run_settings_view(&mut terminal, &mut view, &mut toasts)
    }));

    // Always restore terminal
    restore_terminal(&mut terminal).ok();

    // Toasts raised on the way out (reset) would otherwise never be seen.
    toasts.prune(chrono::Local::now());
    if !toasts.is_empty() {
        for toast in toasts.iter() {
            match toast.kind {
                ToastKind::Notice => println!("{}", toast.message),
                ToastKind::Error => eprintln!("error: {}", toast.message),
            }
        }
    }

    match result {
        Ok(res) => res,
        Err(_) => {
            tracing::error!("settings view panicked");
            eprintln!("playcover-settings crashed. Check {}", log_file(&data_dir).display());
            Ok(())
        }
    }
}
