//! Endgame database probe interface.

use shakmaty::Chess;

use crate::rules::GameResult;

/// Win/draw/loss from the point of view of the side to move.
///
/// `CursedWin` and `BlessedLoss` are wins and losses that the 50-move rule
/// turns into draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WdlScore {
    Loss,
    BlessedLoss,
    Draw,
    CursedWin,
    Win,
}

/// Status of a probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeState {
    /// The classification is exact.
    Exact,
    /// The classification is usable but may be off near the 50-move limit.
    Approximate,
    /// No information; the score must be ignored.
    Failed,
}

/// Outcome of a single probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    pub state: ProbeState,
    pub wdl: WdlScore,
}

impl Probe {
    #[must_use]
    pub const fn exact(wdl: WdlScore) -> Self {
        Self {
            state: ProbeState::Exact,
            wdl,
        }
    }

    #[must_use]
    pub const fn approximate(wdl: WdlScore) -> Self {
        Self {
            state: ProbeState::Approximate,
            wdl,
        }
    }

    #[must_use]
    pub const fn failed() -> Self {
        Self {
            state: ProbeState::Failed,
            wdl: WdlScore::Draw,
        }
    }

    /// The score, unless the probe failed.
    #[must_use]
    pub fn wdl(&self) -> Option<WdlScore> {
        match self.state {
            ProbeState::Failed => None,
            ProbeState::Exact | ProbeState::Approximate => Some(self.wdl),
        }
    }
}

/// An endgame database that classifies low-material positions.
///
/// Implementations are shared read-only between games.
pub trait EndgameTablebase: Send + Sync {
    /// Largest piece count (kings included) the database covers.
    fn max_cardinality(&self) -> u32;

    /// Classify `pos` from the side to move's point of view.
    fn probe_wdl(&self, pos: &Chess) -> Probe;
}

/// Absolute result for a mover-relative score.
///
/// Cursed wins and blessed losses count as draws.
#[must_use]
pub fn resolve_wdl(wdl: WdlScore, black_to_move: bool) -> GameResult {
    match (wdl, black_to_move) {
        (WdlScore::Win, false) | (WdlScore::Loss, true) => GameResult::WhiteWon,
        (WdlScore::Win, true) | (WdlScore::Loss, false) => GameResult::BlackWon,
        (WdlScore::CursedWin | WdlScore::Draw | WdlScore::BlessedLoss, _) => GameResult::Draw,
    }
}
