//! Syzygy tablebases through `shakmaty-syzygy`.

use std::path::Path;

use shakmaty::{Chess, Position};
use shakmaty_syzygy::{Tablebase, Wdl};

use crate::error::Result;

use super::probe::{EndgameTablebase, Probe, WdlScore};

pub struct SyzygyTablebase {
    tables: Tablebase<Chess>,
    max_pieces: u32,
}

impl SyzygyTablebase {
    /// Wrap already loaded tables covering up to `max_pieces` pieces.
    pub fn new(tables: Tablebase<Chess>, max_pieces: u32) -> Self {
        Self { tables, max_pieces }
    }

    /// Load every table found in `dir`.
    pub fn open(dir: impl AsRef<Path>, max_pieces: u32) -> Result<Self> {
        let mut tables = Tablebase::new();
        let count = tables.add_directory(dir.as_ref())?;
        tracing::info!(dir = %dir.as_ref().display(), count, max_pieces, "loaded syzygy tables");
        Ok(Self::new(tables, max_pieces))
    }
}

impl std::fmt::Debug for SyzygyTablebase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyzygyTablebase")
            .field("max_pieces", &self.max_pieces)
            .finish_non_exhaustive()
    }
}

impl EndgameTablebase for SyzygyTablebase {
    fn max_cardinality(&self) -> u32 {
        self.max_pieces
    }

    // The WDL tables assume a freshly reset halfmove clock, so the score is
    // only exact right after a capture or pawn move.
    fn probe_wdl(&self, pos: &Chess) -> Probe {
        match self.tables.probe_wdl_after_zeroing(pos) {
            Ok(wdl) => {
                let wdl = match wdl {
                    Wdl::Loss => WdlScore::Loss,
                    Wdl::BlessedLoss => WdlScore::BlessedLoss,
                    Wdl::Draw => WdlScore::Draw,
                    Wdl::CursedWin => WdlScore::CursedWin,
                    Wdl::Win => WdlScore::Win,
                };
                if pos.halfmoves() == 0 {
                    Probe::exact(wdl)
                } else {
                    Probe::approximate(wdl)
                }
            }
            Err(err) => {
                tracing::trace!(%err, "syzygy probe failed");
                Probe::failed()
            }
        }
    }
}
