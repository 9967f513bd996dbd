#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::Instant;

use anyhow::{Context, Result};
use blockfall::Time;
use blockfall::app::App;
use blockfall::config::{self, Config};
use blockfall::ui::TerminalSink;
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{error, info, warn};
use ratatui::{Terminal, prelude::*};

fn main() -> Result<()> {
    // Create log file and redirect stderr to it
    let log_path = "blockfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to create log file {log_path}"))?;

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting blockfall");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    // Real key releases make held keys exact; otherwise they time out
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
    if !keyboard_enhanced {
        warn!("Terminal does not report key releases, using hold timeout");
    }

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let mut sink = TerminalSink::new(terminal, config.terminal.flash());

    let mut app = App::new(config);
    app.keyboard_enhanced = keyboard_enhanced;
    let res = run_app(&mut app, &mut sink);

    // Restore terminal
    if keyboard_enhanced {
        let _ = execute!(sink.terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(sink.terminal.backend_mut(), LeaveAlternateScreen)?;
    sink.terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    res
}

fn run_app<B: Backend>(app: &mut App, sink: &mut TerminalSink<B>) -> Result<()> {
    let frame_interval = app.config.terminal.frame_interval();

    // Explicitly flush any pending input events that might be in the buffer
    while event::poll(std::time::Duration::ZERO)? {
        let _ = event::read()?;
    }

    loop {
        let frame_start = Instant::now();

        // Gather input until the frame is due
        while let Some(remaining) = frame_interval.checked_sub(frame_start.elapsed()) {
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, Instant::now());
            }
            if app.should_quit {
                info!(
                    "Quitting after {:.1}s",
                    app.world.resource::<Time>().total_seconds()
                );
                return Ok(());
            }
        }

        app.tick(Instant::now());
        app.present(sink).context("Failed to draw frame")?;
    }
}
