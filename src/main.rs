//! Terminal runner (default binary).
//!
//! Polls crossterm for keys with a frame-length timeout, feeds the session monotonic time
//! deltas, and redraws through the framebuffer renderer every frame.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::prelude::*;

use puzzletris::config::Cli;
use puzzletris::core::{Session, SessionConfig, SessionSnapshot, StepOutcome};
use puzzletris::input::{handle_key_event, is_restart, should_quit};
use puzzletris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use puzzletris::types::FRAME_MS;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.session_config()?;
    init_logging(&cli)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let view = GameView::default().with_key_help(!cli.no_key_help);
    let result = run(&mut term, config, view);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file since the terminal is in raw mode. No file, no subscriber.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(cli.log_level()))
        .init();

    info!(path = %path.display(), "logging initialized");
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: SessionConfig, view: GameView) -> Result<()> {
    info!(
        width = config.board.width(),
        height = config.board.height(),
        gravity_ms = config.gravity.as_millis() as u64,
        scripted = config.sequence.use_sequence,
        "starting session"
    );

    let mut session = Session::new(config);
    session.subscribe_score(|score| info!(score, "score changed"));
    session.start();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if is_restart(key) {
                        session.reset();
                    } else if let Some(command) = handle_key_event(key) {
                        let outcome = session.submit_command(command);
                        report(&session, outcome);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last);
        last = now;
        let outcome = session.advance_time(dt);
        report(&session, outcome);
    }
}

fn report(session: &Session, outcome: StepOutcome) {
    if let Some(event) = outcome.lock_event() {
        if event.spawn.is_blocked() {
            info!(score = session.score(), lines = session.lines(), "game over, press R to restart");
        }
    }
}
