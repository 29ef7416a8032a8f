//! Draw Session
//!
//! Explicit state machine around the engine and the history:
//!
//! ```text
//!   Idle ──begin_draw──▶ Rolling ──reveal──▶ ShowingResult
//!    ▲                                         │    │
//!    └──────────────dismiss────────────────────┘    │
//!                 Rolling ◀──────begin_draw─────────┘
//! ```
//!
//! At most one draw is in flight. A `begin_draw` while rolling is rejected,
//! never queued.

use chrono::{DateTime, TimeZone};
use thiserror::Error;
use tracing::{debug, error};

use crate::draw::engine::{DrawEngine, DrawError};
use crate::draw::result::DrawResult;
use crate::history::{HistoryItem, HistoryStore};

/// Presentation-facing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawPhase {
    /// Waiting for the user to draw.
    Idle,
    /// A draw is resolved but not yet revealed.
    Rolling,
    /// The last result is on screen.
    ShowingResult,
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Another draw is still rolling.
    #[error("a draw is already in progress")]
    DrawInProgress,

    /// Operation not allowed in the current phase.
    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        /// Attempted operation.
        action: &'static str,
        /// Phase at the time.
        phase: DrawPhase,
    },

    /// The engine failed; nothing was recorded.
    #[error("draw aborted: {0}")]
    Draw(#[from] DrawError),
}

#[derive(Debug)]
enum SessionState {
    Idle,
    Rolling(DrawResult),
    ShowingResult(HistoryItem),
}

/// Engine, history and phase for one user.
#[derive(Debug)]
pub struct DrawSession<'t> {
    engine: DrawEngine<'t>,
    history: HistoryStore,
    state: SessionState,
}

impl<'t> DrawSession<'t> {
    /// Create an idle session.
    pub fn new(engine: DrawEngine<'t>, history: HistoryStore) -> Self {
        Self {
            engine,
            history,
            state: SessionState::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DrawPhase {
        match self.state {
            SessionState::Idle => DrawPhase::Idle,
            SessionState::Rolling(_) => DrawPhase::Rolling,
            SessionState::ShowingResult(_) => DrawPhase::ShowingResult,
        }
    }

    /// Result currently on screen, if any.
    pub fn shown(&self) -> Option<&HistoryItem> {
        match &self.state {
            SessionState::ShowingResult(item) => Some(item),
            _ => None,
        }
    }

    /// Start a draw at `now`.
    ///
    /// Allowed from `Idle` and `ShowingResult`. The result is resolved
    /// immediately but stays hidden until [`DrawSession::reveal`]. If the
    /// engine fails the session returns to `Idle` and history is untouched.
    pub fn begin_draw<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<(), SessionError> {
        if matches!(self.state, SessionState::Rolling(_)) {
            debug!("Rejected draw: already rolling");
            return Err(SessionError::DrawInProgress);
        }

        match self.engine.draw(now) {
            Ok(result) => {
                self.state = SessionState::Rolling(result);
                Ok(())
            }
            Err(e) => {
                error!("Draw aborted: {}", e);
                self.state = SessionState::Idle;
                Err(e.into())
            }
        }
    }

    /// Reveal the rolling draw and record it to history.
    pub fn reveal(&mut self) -> Result<HistoryItem, SessionError> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Rolling(result) => {
                let item = self.history.record(result);
                self.state = SessionState::ShowingResult(item.clone());
                Ok(item)
            }
            other => {
                self.state = other;
                Err(self.invalid("reveal"))
            }
        }
    }

    /// Leave the result screen.
    pub fn dismiss(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::ShowingResult(_) => {
                self.state = SessionState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("dismiss")),
        }
    }

    /// Draw history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Mutable draw history (delete, clear).
    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::TierTable;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    fn session() -> DrawSession<'static> {
        DrawSession::new(
            DrawEngine::seeded(TierTable::standard(), 77),
            HistoryStore::new(MemoryStore::new()),
        )
    }

    #[test]
    fn test_full_cycle() {
        let mut session = session();
        let now = Utc::now();
        assert_eq!(session.phase(), DrawPhase::Idle);

        session.begin_draw(&now).unwrap();
        assert_eq!(session.phase(), DrawPhase::Rolling);
        assert!(session.history().is_empty(), "nothing recorded before reveal");

        let item = session.reveal().unwrap();
        assert_eq!(session.phase(), DrawPhase::ShowingResult);
        assert_eq!(session.shown(), Some(&item));
        assert_eq!(session.history().items()[0], item);

        session.dismiss().unwrap();
        assert_eq!(session.phase(), DrawPhase::Idle);
        assert!(session.shown().is_none());
    }

    #[test]
    fn test_second_draw_rejected_while_rolling() {
        let mut session = session();
        let now = Utc::now();

        session.begin_draw(&now).unwrap();
        assert_eq!(session.begin_draw(&now), Err(SessionError::DrawInProgress));
        assert_eq!(session.phase(), DrawPhase::Rolling);

        session.reveal().unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_draw_again_from_result_screen() {
        let mut session = session();
        let now = Utc::now();

        session.begin_draw(&now).unwrap();
        session.reveal().unwrap();
        session.begin_draw(&now).unwrap();
        assert_eq!(session.phase(), DrawPhase::Rolling);
        session.reveal().unwrap();
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_illegal_transitions() {
        let mut session = session();

        assert_eq!(
            session.reveal(),
            Err(SessionError::InvalidTransition { action: "reveal", phase: DrawPhase::Idle })
        );
        assert_eq!(
            session.dismiss(),
            Err(SessionError::InvalidTransition { action: "dismiss", phase: DrawPhase::Idle })
        );

        session.begin_draw(&Utc::now()).unwrap();
        assert_eq!(
            session.dismiss(),
            Err(SessionError::InvalidTransition { action: "dismiss", phase: DrawPhase::Rolling })
        );

        session.reveal().unwrap();
        assert_eq!(
            session.reveal(),
            Err(SessionError::InvalidTransition { action: "reveal", phase: DrawPhase::ShowingResult })
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_history_edits_through_session() {
        let mut session = session();
        let now = Utc::now();
        session.begin_draw(&now).unwrap();
        let item = session.reveal().unwrap();

        assert!(session.history_mut().delete(&item.id));
        assert!(session.history().is_empty());
        // The result screen keeps showing the deleted entry.
        assert_eq!(session.shown(), Some(&item));
    }
}
