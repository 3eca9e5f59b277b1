//! Session - one game from first spawn to game over
//!
//! The session owns the grid, the active piece, the sequencer, the score and its observers,
//! and the gravity timer. It has two mutating entry points besides [`Session::start`] and
//! [`Session::reset`]:
//!
//! - [`Session::submit_command`] for player input
//! - [`Session::advance_time`] for gravity
//!
//! Both run to completion and report what happened as a [`StepOutcome`].

use std::time::Duration;

use crate::config::SessionConfig;
use crate::grid::Grid;
use crate::observer::{ScoreObservers, SubscriptionId};
use crate::piece::{ActivePiece, MoveDirection, MoveOutcome, RotateDirection};
use crate::scoring::line_clear_points;
use crate::sequencer::Sequencer;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{Command, ShapeKind};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Waiting for the next piece (before `start`, or mid-lock).
    Spawning,
    /// A piece is under control.
    Falling,
    /// A spawn was blocked. Only `reset` leaves this state.
    GameOver,
}

/// Result of asking the sequencer for a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnOutcome {
    Spawned(ShapeKind),
    /// The shape did not fit; the session is over.
    Blocked(ShapeKind),
}

impl SpawnOutcome {
    pub fn kind(&self) -> ShapeKind {
        match *self {
            SpawnOutcome::Spawned(kind) | SpawnOutcome::Blocked(kind) => kind,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, SpawnOutcome::Blocked(_))
    }
}

/// Everything that happened when a piece came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub locked: ShapeKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// The follow-up spawn. `Blocked` here is the one and only game-over report.
    pub spawn: SpawnOutcome,
}

/// Result of one call to [`Session::submit_command`] or [`Session::advance_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Not started, or game over. Nothing changed.
    Inactive,
    /// Time accumulated without reaching the gravity interval.
    Waiting,
    Moved,
    Rotated,
    /// The move or rotation did not fit.
    Rejected,
    Locked(LockEvent),
}

impl StepOutcome {
    pub fn lock_event(&self) -> Option<&LockEvent> {
        match self {
            StepOutcome::Locked(event) => Some(event),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    sequencer: Sequencer,
    observers: ScoreObservers,
    score: u32,
    lines: u32,
    gravity_elapsed: Duration,
    state: SessionState,
    started: bool,
}

impl Session {
    /// Build a session ready to [`start`](Session::start). The preset, if any, is already loaded.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            grid: build_grid(&config),
            sequencer: Sequencer::new(&config.sequence),
            config,
            active: None,
            observers: ScoreObservers::new(),
            score: 0,
            lines: 0,
            gravity_elapsed: Duration::ZERO,
            state: SessionState::Spawning,
            started: false,
        }
    }

    /// Spawn the first piece. Returns `None` if the session was already started.
    ///
    /// Observers subscribed before this call receive the current score once, so a display can
    /// show it before the first clear.
    pub fn start(&mut self) -> Option<SpawnOutcome> {
        if self.started {
            return None;
        }
        self.started = true;
        self.observers.notify(self.score);
        Some(self.spawn_next())
    }

    /// Back to a fresh grid, sequence and score, then start again.
    ///
    /// Observers stay subscribed and hear about the score dropping to zero.
    pub fn reset(&mut self) -> SpawnOutcome {
        self.grid = build_grid(&self.config);
        self.sequencer = Sequencer::new(&self.config.sequence);
        self.active = None;
        self.lines = 0;
        self.gravity_elapsed = Duration::ZERO;
        self.state = SessionState::Spawning;

        if self.score != 0 {
            self.score = 0;
            self.observers.notify(0);
        }

        tracing::debug!("session reset");
        self.started = true;
        self.spawn_next()
    }

    /// Apply one player command.
    pub fn submit_command(&mut self, command: Command) -> StepOutcome {
        if self.state != SessionState::Falling {
            return StepOutcome::Inactive;
        }

        match command {
            Command::MoveLeft => self.shift(MoveDirection::Left),
            Command::MoveRight => self.shift(MoveDirection::Right),
            Command::SoftDrop => {
                let outcome = self.step_down();
                if outcome == StepOutcome::Moved {
                    self.gravity_elapsed = Duration::ZERO;
                }
                outcome
            }
            Command::RotateCw => self.rotate(RotateDirection::Clockwise),
            Command::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
        }
    }

    /// Feed elapsed time to the gravity timer.
    ///
    /// Once the accumulated time reaches the interval the timer restarts from zero and the
    /// piece tries one step down. Any surplus is dropped.
    pub fn advance_time(&mut self, dt: Duration) -> StepOutcome {
        if self.state != SessionState::Falling {
            return StepOutcome::Inactive;
        }

        self.gravity_elapsed = self.gravity_elapsed.saturating_add(dt);
        if self.gravity_elapsed < self.config.gravity {
            return StepOutcome::Waiting;
        }

        self.gravity_elapsed = Duration::ZERO;
        self.step_down()
    }

    pub fn subscribe_score(&mut self, callback: impl FnMut(u32) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe_score(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rows cleared since the last reset.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Time accumulated towards the next gravity step.
    pub fn gravity_elapsed(&self) -> Duration {
        self.gravity_elapsed
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.width = self.grid.size().width();
        out.height = self.grid.size().height();
        out.tiles.clear();
        out.tiles.extend_from_slice(self.grid.tiles());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.started = self.started;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    fn shift(&mut self, direction: MoveDirection) -> StepOutcome {
        let Some(piece) = self.active.as_mut() else {
            return StepOutcome::Inactive;
        };
        match piece.attempt_move(direction, &self.grid) {
            MoveOutcome::Moved => StepOutcome::Moved,
            MoveOutcome::Rejected | MoveOutcome::Landed => StepOutcome::Rejected,
        }
    }

    fn rotate(&mut self, direction: RotateDirection) -> StepOutcome {
        let Some(piece) = self.active.as_mut() else {
            return StepOutcome::Inactive;
        };
        if piece.attempt_rotate(direction, &self.grid) {
            StepOutcome::Rotated
        } else {
            StepOutcome::Rejected
        }
    }

    fn step_down(&mut self) -> StepOutcome {
        let Some(piece) = self.active.as_mut() else {
            return StepOutcome::Inactive;
        };
        match piece.attempt_move(MoveDirection::Down, &self.grid) {
            MoveOutcome::Moved => StepOutcome::Moved,
            MoveOutcome::Landed | MoveOutcome::Rejected => self.lock(),
        }
    }

    /// Commit the active piece, clear rows, score, and spawn the next piece.
    fn lock(&mut self) -> StepOutcome {
        let Some(piece) = self.active.take() else {
            return StepOutcome::Inactive;
        };
        self.state = SessionState::Spawning;

        self.grid.commit(piece.cells(), piece.position(), piece.tile());
        let lines_cleared = self.grid.sweep_and_compact();
        let points = line_clear_points(lines_cleared);

        tracing::debug!(
            shape = piece.kind().as_str(),
            position = ?piece.position(),
            lines_cleared,
            points,
            "piece locked"
        );

        if lines_cleared > 0 {
            self.lines = self.lines.saturating_add(lines_cleared);
        }
        if points > 0 {
            self.score = self.score.saturating_add(points);
            self.observers.notify(self.score);
        }

        let spawn = self.spawn_next();
        StepOutcome::Locked(LockEvent {
            locked: piece.kind(),
            lines_cleared,
            points,
            spawn,
        })
    }

    fn spawn_next(&mut self) -> SpawnOutcome {
        let kind = self.sequencer.draw();
        self.gravity_elapsed = Duration::ZERO;

        match ActivePiece::spawn(kind, &self.grid) {
            Some(piece) => {
                tracing::debug!(shape = kind.as_str(), position = ?piece.position(), "spawned");
                self.active = Some(piece);
                self.state = SessionState::Falling;
                SpawnOutcome::Spawned(kind)
            }
            None => {
                tracing::info!(
                    shape = kind.as_str(),
                    score = self.score,
                    lines = self.lines,
                    "spawn blocked, game over"
                );
                self.active = None;
                self.state = SessionState::GameOver;
                SpawnOutcome::Blocked(kind)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

fn build_grid(config: &SessionConfig) -> Grid {
    let mut grid = Grid::new(config.board);
    if let Some(rows) = &config.preset {
        grid.load_preset(rows, config.board.width(), config.board.height());
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SequenceConfig;
    use crate::types::TileId;

    fn session_with(shapes: &[ShapeKind]) -> Session {
        let mut config = SessionConfig::without_preset();
        config.sequence = SequenceConfig {
            shapes: shapes.to_vec(),
            use_sequence: true,
            loop_sequence: true,
            seed: 1,
        };
        Session::new(config)
    }

    #[test]
    fn new_session_waits_for_start() {
        let mut session = session_with(&[ShapeKind::T]);
        assert_eq!(session.state(), SessionState::Spawning);
        assert!(session.active().is_none());
        assert_eq!(session.submit_command(Command::MoveLeft), StepOutcome::Inactive);
        assert_eq!(session.advance_time(Duration::from_secs(5)), StepOutcome::Inactive);
    }

    #[test]
    fn start_is_idempotent() {
        let mut session = session_with(&[ShapeKind::T, ShapeKind::O]);
        assert_eq!(session.start(), Some(SpawnOutcome::Spawned(ShapeKind::T)));
        assert_eq!(session.start(), None);
        assert_eq!(session.active().map(|p| p.kind()), Some(ShapeKind::T));
        assert_eq!(session.state(), SessionState::Falling);
    }

    #[test]
    fn start_pushes_initial_score_once() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut session = session_with(&[ShapeKind::T]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe_score(move |score| sink.borrow_mut().push(score));

        session.start();
        session.start();
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn default_session_loads_preset() {
        let session = Session::default();
        assert!(session.grid().occupied_count() > 0);
        assert!(session.grid().is_occupied(-5, -10));
    }

    #[test]
    fn sideways_rejection_is_silent() {
        let mut session = session_with(&[ShapeKind::O]);
        session.start();
        while session.submit_command(Command::MoveLeft) == StepOutcome::Moved {}
        assert_eq!(session.submit_command(Command::MoveLeft), StepOutcome::Rejected);
        assert_eq!(session.state(), SessionState::Falling);
    }

    #[test]
    fn gravity_steps_once_per_interval() {
        let mut session = session_with(&[ShapeKind::T]);
        session.start();
        let y0 = session.active().unwrap().position().1;

        assert_eq!(session.advance_time(Duration::from_millis(600)), StepOutcome::Waiting);
        assert_eq!(session.advance_time(Duration::from_millis(600)), StepOutcome::Moved);
        assert_eq!(session.active().unwrap().position().1, y0 - 1);
        assert_eq!(session.gravity_elapsed(), Duration::ZERO);

        // No catch-up for a long frame.
        assert_eq!(session.advance_time(Duration::from_secs(10)), StepOutcome::Moved);
        assert_eq!(session.active().unwrap().position().1, y0 - 2);
    }

    #[test]
    fn soft_drop_resets_gravity_but_sideways_does_not() {
        let mut session = session_with(&[ShapeKind::T]);
        session.start();

        session.advance_time(Duration::from_millis(500));
        session.submit_command(Command::MoveLeft);
        session.submit_command(Command::RotateCw);
        assert_eq!(session.gravity_elapsed(), Duration::from_millis(500));

        assert_eq!(session.submit_command(Command::SoftDrop), StepOutcome::Moved);
        assert_eq!(session.gravity_elapsed(), Duration::ZERO);
    }

    #[test]
    fn landing_locks_and_spawns_next() {
        let mut session = session_with(&[ShapeKind::O, ShapeKind::T]);
        session.start();

        let outcome = loop {
            match session.submit_command(Command::SoftDrop) {
                StepOutcome::Moved => continue,
                other => break other,
            }
        };

        let event = outcome.lock_event().copied().expect("soft drop ends in a lock");
        assert_eq!(event.locked, ShapeKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(event.points, 0);
        assert_eq!(event.spawn, SpawnOutcome::Spawned(ShapeKind::T));
        assert_eq!(session.grid().occupied_count(), 4);
        assert_eq!(session.active().map(|p| p.kind()), Some(ShapeKind::T));
    }

    #[test]
    fn line_clear_scores_and_notifies() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut session = session_with(&[ShapeKind::I]);
        for x in -5..1 {
            session.grid.set(x, -10, Some(TileId::OBSTACLE));
        }
        session.start();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe_score(move |score| sink.borrow_mut().push(score));

        // Bar spans x = -1..=2 at spawn; two steps right cover 1..=4.
        assert_eq!(session.submit_command(Command::MoveRight), StepOutcome::Moved);
        assert_eq!(session.submit_command(Command::MoveRight), StepOutcome::Moved);
        let event = loop {
            if let StepOutcome::Locked(event) = session.submit_command(Command::SoftDrop) {
                break event;
            }
        };

        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.points, 100);
        assert_eq!(session.score(), 100);
        assert_eq!(session.lines(), 1);
        assert_eq!(*seen.borrow(), vec![100]);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn blocked_spawn_ends_the_session_once() {
        let mut session = session_with(&[ShapeKind::O]);
        session.start();
        for y in -10..8 {
            for x in -5..5 {
                if x != -5 {
                    session.grid.set(x, y, Some(TileId::OBSTACLE));
                }
            }
        }

        // O lands on the filled stack at once and the next O has no room.
        let outcome = session.submit_command(Command::SoftDrop);
        let event = outcome.lock_event().copied().expect("landing");
        assert_eq!(event.spawn, SpawnOutcome::Blocked(ShapeKind::O));
        assert!(session.is_game_over());
        assert!(session.active().is_none());

        assert_eq!(session.submit_command(Command::SoftDrop), StepOutcome::Inactive);
        assert_eq!(session.advance_time(Duration::from_secs(2)), StepOutcome::Inactive);
    }

    #[test]
    fn reset_clears_score_and_restarts() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut session = session_with(&[ShapeKind::T, ShapeKind::O]);
        session.start();
        session.score = 300;
        session.grid.set(0, -10, Some(TileId(3)));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe_score(move |score| sink.borrow_mut().push(score));

        assert_eq!(session.reset(), SpawnOutcome::Spawned(ShapeKind::T));
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid().occupied_count(), 0);
        assert_eq!(*seen.borrow(), vec![0]);

        // Already zero: no second notification.
        session.reset();
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn snapshot_mirrors_session() {
        let mut session = session_with(&[ShapeKind::L]);
        session.start();
        let snap = session.snapshot();

        assert_eq!((snap.width, snap.height), (10, 20));
        assert_eq!(snap.tiles.len(), 200);
        let active = snap.active.expect("active piece");
        assert_eq!(active.kind, ShapeKind::L);
        assert_eq!(active.position, session.active().unwrap().position());
        assert!(snap.playable());

        let mut reused = snap.clone();
        session.submit_command(Command::MoveLeft);
        session.snapshot_into(&mut reused);
        assert_eq!(reused.tiles.len(), 200);
        assert_eq!(reused.active.unwrap().position.0, -1);
    }
}
