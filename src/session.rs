//! Game session state machine
//!
//! Owns the board, turn, history and result for the lifetime of one game
//! and sequences every externally triggered event (local click, AI
//! completion, incoming peer message) into one consistent state
//! transition. Events fully resolve before the next is accepted; the only
//! concurrent piece is the deferred AI worker, which talks back through a
//! channel polled by the host loop.

use crate::board::{Board, Coord, Stone};
use crate::config::{GameConfig, GameMode};
use crate::engine::AiEngine;
use crate::net::{RemoteEvent, Transport};
use crate::rules::winning_line;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause before the AI reply is computed, so the move feels deliberate.
pub const AI_MOVE_DELAY: Duration = Duration::from_millis(600);

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Setup,
    Playing,
    Finished,
}

/// AI computation state. This is the single-flight guard: at most one
/// worker is outstanding, and dropping the receiver cancels it (a stale
/// completion has nowhere to land).
enum AiState {
    Idle,
    Pending { receiver: Receiver<Coord> },
}

/// One game instance.
pub struct GameSession {
    config: GameConfig,
    status: SessionStatus,
    board: Board,
    current_turn: Stone,
    history: Vec<Coord>,
    winner: Option<Stone>,
    winning_line: Option<Vec<Coord>>,
    draw: bool,
    last_move: Option<Coord>,
    ai_state: AiState,
    ai_delay: Duration,
    transport: Option<Box<dyn Transport>>,
}

impl GameSession {
    /// Create a session in `Setup` with the given configuration.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            status: SessionStatus::Setup,
            board: Board::new(config.grid_size),
            current_turn: Stone::Black,
            history: Vec::new(),
            winner: None,
            winning_line: None,
            draw: false,
            last_move: None,
            ai_state: AiState::Idle,
            ai_delay: AI_MOVE_DELAY,
            transport: None,
        }
    }

    /// Attach the outbound peer sink (online mode).
    pub fn set_transport(&mut self, transport: Box<dyn Transport>) {
        self.transport = Some(transport);
    }

    /// Replace the configuration. Only honored in `Setup`; a running
    /// game's configuration is immutable, changing it requires a new game.
    pub fn configure(&mut self, config: GameConfig) {
        if self.status != SessionStatus::Setup {
            debug!("configure ignored outside setup");
            return;
        }
        self.config = config;
        self.board = Board::new(config.grid_size);
    }

    // Read-only snapshot surface for the UI collaborator

    #[inline]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    #[inline]
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    #[inline]
    pub fn winning_line(&self) -> Option<&[Coord]> {
        self.winning_line.as_deref()
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.draw
    }

    #[inline]
    pub fn history(&self) -> &[Coord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Check if an AI computation is outstanding
    #[inline]
    pub fn is_ai_pending(&self) -> bool {
        matches!(self.ai_state, AiState::Pending { .. })
    }

    /// Start a new game: validate and defensively clamp the configuration,
    /// build the empty board, hand the first move to Black.
    pub fn start(&mut self) {
        if self.config.grid_size < 3 {
            warn!(
                grid_size = self.config.grid_size,
                "grid_size below minimum, clamping to 3"
            );
            self.config.grid_size = 3;
        }
        let clamped = self.config.win_length.clamp(3, self.config.grid_size);
        if clamped != self.config.win_length {
            warn!(
                win_length = self.config.win_length,
                grid_size = self.config.grid_size,
                clamped,
                "win_length outside playable range, clamping"
            );
            self.config.win_length = clamped;
        }
        info!(
            grid_size = self.config.grid_size,
            win_length = self.config.win_length,
            mode = ?self.config.mode,
            "starting game"
        );
        self.fresh_game();
    }

    /// Submit a move. `remote_or_ai` marks moves that were already
    /// validated elsewhere (the peer's own turn check, or the AI trigger)
    /// and must therefore skip local turn ownership checks and must not be
    /// re-emitted to the peer.
    ///
    /// Every failure path is a silent no-op: the board, turn and history
    /// are left untouched.
    pub fn submit_move(&mut self, input: Coord, remote_or_ai: bool) {
        if self.status != SessionStatus::Playing {
            return;
        }
        if !remote_or_ai && !self.accepts_local_move() {
            debug!(x = input.x, y = input.y, "move out of turn, ignored");
            return;
        }
        let Some(coord) = self.config.placement.resolve(&self.board, input) else {
            debug!(x = input.x, y = input.y, z = input.z, "unplayable move, ignored");
            return;
        };

        let color = self.current_turn;
        self.board.place_stone(coord, color);
        self.history.push(coord);
        self.last_move = Some(coord);

        if let Some(line) = winning_line(&self.board, coord, self.config.win_length) {
            self.winner = Some(color);
            self.winning_line = Some(line);
            self.status = SessionStatus::Finished;
            info!(winner = ?color, plies = self.history.len(), "game won");
        } else if self.board.is_full() {
            self.draw = true;
            self.status = SessionStatus::Finished;
            info!(plies = self.history.len(), "game drawn");
        } else {
            self.current_turn = color.opponent();
        }

        if !remote_or_ai {
            self.emit(RemoteEvent::Move {
                x: coord.x,
                y: coord.y,
                z: coord.z,
            });
        }
        self.maybe_start_ai();
    }

    /// Undo the most recent move(s).
    ///
    /// Removes one ply in two-player and online modes. In vs-AI mode, when
    /// it is the human's turn and at least two plies exist, both the AI's
    /// reply and the human's prior move are removed so the human replays;
    /// with fewer plies it falls back to removing one, which can hand the
    /// turn back to the AI.
    pub fn undo(&mut self, remote: bool) {
        if self.history.is_empty() || self.is_ai_pending() {
            return;
        }
        let plies = match self.config.mode {
            GameMode::VsAi { human }
                if self.current_turn == human && self.history.len() >= 2 =>
            {
                2
            }
            _ => 1,
        };

        for _ in 0..plies {
            if let Some(coord) = self.history.pop() {
                self.board.remove_stone(coord);
            }
        }
        self.winner = None;
        self.winning_line = None;
        self.draw = false;
        self.last_move = self.history.last().copied();
        // Black always opens, so parity of the remaining history determines
        // the turn in every mode
        self.current_turn = if self.history.len() % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        };
        self.status = SessionStatus::Playing;
        debug!(plies, remaining = self.history.len(), "undo applied");

        if !remote {
            self.emit(RemoteEvent::Undo);
        }
        self.maybe_start_ai();
    }

    /// Start over with the same configuration. The peer link, if any,
    /// stays up.
    pub fn reset_to_playing(&mut self) {
        self.fresh_game();
        self.emit(RemoteEvent::Reset);
    }

    /// Abandon the session: tear down the peer link and go back to setup.
    pub fn return_to_setup(&mut self) {
        self.cancel_ai();
        // Dropping the transport closes the peer link
        self.transport = None;
        self.status = SessionStatus::Setup;
        info!("returned to setup");
    }

    /// Feed one raw peer message into the session. Unrecognized or
    /// malformed messages are dropped; the connection stays open.
    pub fn handle_message(&mut self, raw: &str) {
        let Some(event) = RemoteEvent::decode(raw) else {
            warn!(raw, "ignoring unrecognized peer message");
            return;
        };
        self.apply_remote(event);
    }

    /// Replay an already-decoded peer event.
    pub fn apply_remote(&mut self, event: RemoteEvent) {
        match event {
            RemoteEvent::Move { x, y, z } => self.submit_move(Coord::new(x, y, z), true),
            RemoteEvent::Undo => self.undo(true),
            RemoteEvent::Reset => self.fresh_game(),
        }
    }

    /// Check whether the AI finished thinking and apply its move if so.
    ///
    /// Call from the host loop. Non-blocking.
    pub fn poll_ai(&mut self) {
        let coord = match &self.ai_state {
            AiState::Pending { receiver } => match receiver.try_recv() {
                Ok(coord) => Some(coord),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    warn!("AI worker dropped without producing a move");
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some(coord) = coord {
            self.ai_state = AiState::Idle;
            self.submit_move(coord, true);
        }
    }

    /// Reset board, history and result; shared by start, reset and the
    /// remote reset replay (which must not re-emit).
    fn fresh_game(&mut self) {
        self.cancel_ai();
        self.board = Board::new(self.config.grid_size);
        self.current_turn = Stone::Black;
        self.history.clear();
        self.winner = None;
        self.winning_line = None;
        self.draw = false;
        self.last_move = None;
        self.status = SessionStatus::Playing;
        self.maybe_start_ai();
    }

    /// Turn-ownership gate for genuine local input.
    fn accepts_local_move(&self) -> bool {
        match self.config.mode {
            GameMode::LocalTwoPlayer => true,
            GameMode::VsAi { human } => {
                self.current_turn == human && !self.is_ai_pending()
            }
            GameMode::Online { local } => self.current_turn == local,
        }
    }

    /// Schedule exactly one AI computation when it is the AI's move.
    ///
    /// Re-entrant state updates within the same turn cannot schedule a
    /// second worker: the `Pending` guard is set before the thread spawns
    /// and cleared only on completion or cancellation.
    fn maybe_start_ai(&mut self) {
        if self.status != SessionStatus::Playing || self.is_ai_pending() {
            return;
        }
        let GameMode::VsAi { human } = self.config.mode else {
            return;
        };
        if self.current_turn == human {
            return;
        }

        let board = self.board.clone();
        let me = self.current_turn;
        let win_len = self.config.win_length;
        let delay = self.ai_delay;
        let (tx, rx) = channel();

        thread::spawn(move || {
            thread::sleep(delay);
            let mut engine = AiEngine::new();
            let result = engine.choose_move(&board, me, win_len);
            // The session may have moved on; a failed send is the
            // cancellation path, not an error
            let _ = tx.send(result.coord);
        });

        self.ai_state = AiState::Pending { receiver: rx };
        debug!(color = ?me, "AI move scheduled");
    }

    /// Discard any outstanding AI computation.
    fn cancel_ai(&mut self) {
        self.ai_state = AiState::Idle;
    }

    fn emit(&mut self, event: RemoteEvent) {
        if let Some(transport) = self.transport.as_mut() {
            transport.send(&event);
        }
    }
}
