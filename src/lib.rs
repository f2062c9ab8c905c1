//! 3D Gomoku rules and AI engine
//!
//! Engine for N-in-a-row played inside an N×N×N cube:
//! - Configurable cube side (3–6 in the shipped UI) and win length (3–5)
//! - Gravity placement (stones fall toward z = 0) or free placement
//! - Win detection over all 13 spatial line directions
//! - Single-ply heuristic opponent: immediate win, immediate block, then
//!   positional scoring
//! - Local two-player, vs-AI and peer-linked online sessions
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: cube representation with per-color bitboards
//! - [`rules`]: placement policies and win detection
//! - [`eval`]: positional scoring for the AI
//! - [`engine`]: the ranked-policy AI decision engine
//! - [`config`]: game configuration supplied by the setup shell
//! - [`net`]: typed peer events and the transport seam
//! - [`session`]: the game state machine tying everything together
//!
//! Rendering, input collection and the concrete peer link are external
//! collaborators: they read the session's snapshot surface and feed it
//! coordinates and raw peer messages.
//!
//! # Quick Start
//!
//! ```
//! use gomoku3d::{Coord, GameConfig, GameSession, SessionStatus, Stone};
//!
//! // Default: 4×4×4 cube, 4 to win, gravity, local two-player
//! let mut session = GameSession::new(GameConfig::default());
//! session.start();
//! assert_eq!(session.status(), SessionStatus::Playing);
//!
//! // Black drops into column (1, 1); the z of the input is ignored
//! session.submit_move(Coord::new(1, 1, 0), false);
//! assert_eq!(session.board().get(Coord::new(1, 1, 0)), Stone::Black);
//! assert_eq!(session.current_turn(), Stone::White);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod net;
pub mod rules;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{Board, Coord, Stone};
pub use config::{ConfigError, GameConfig, GameMode};
pub use engine::{AiEngine, Decision, MoveResult};
pub use net::{ChannelTransport, RemoteEvent, Transport};
pub use rules::{winning_line, PlacementRule, DIRECTIONS};
pub use session::{GameSession, SessionStatus, AI_MOVE_DELAY};
