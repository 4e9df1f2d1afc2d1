//! Move notation and the move-to-policy-index mapping.
//!
//! Moves are written in coordinate notation (`e2e4`, `e7e8q`), with castling
//! written as the king's two-square step (`e1g1`).
//!
//! Policy indices are computed from the mover's point of view: when black is
//! to move the board is flipped vertically first, then the input
//! [`Transform`] chosen by the encoder is applied to both squares.

use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Move, Role};

/// Number of from/to square pairs.
const SQUARE_PAIRS: usize = 64 * 64;

/// Size of the policy vector a network must produce.
///
/// One plane of from/to pairs for ordinary moves and queen promotions, plus
/// one plane each for knight, bishop and rook underpromotions.
pub const POLICY_SIZE: usize = 4 * SQUARE_PAIRS;

/// Board symmetry applied by the input encoder.
///
/// A combination of three independent bits, applied in the order
/// flip, mirror, transpose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transform(u8);

impl Transform {
    pub const NONE: Transform = Transform(0);
    /// Mirror files (a <-> h).
    pub const FLIP: Transform = Transform(1);
    /// Mirror ranks (1 <-> 8).
    pub const MIRROR: Transform = Transform(2);
    /// Swap files and ranks (reflect in the a1-h8 diagonal).
    pub const TRANSPOSE: Transform = Transform(4);

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 7)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Transform) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn contains(self, other: Transform) -> bool {
        self.0 & other.0 == other.0
    }

    /// Map a square index (0 = a1, 63 = h8) through this transform.
    #[inline]
    #[must_use]
    pub fn apply(self, square: usize) -> usize {
        let mut sq = square;
        if self.contains(Self::FLIP) {
            sq ^= 7;
        }
        if self.contains(Self::MIRROR) {
            sq ^= 56;
        }
        if self.contains(Self::TRANSPOSE) {
            sq = (sq % 8) * 8 + sq / 8;
        }
        sq
    }
}

/// Origin and destination square indices, with castling as a king move.
fn move_squares(mv: &Move) -> (usize, usize) {
    match *mv {
        Move::Castle { king, rook } => {
            let king = king as usize;
            let rank_base = king & !7;
            let to = if rook as usize > king { rank_base + 6 } else { rank_base + 2 };
            (king, to)
        }
        _ => {
            let to = mv.to() as usize;
            let from = mv.from().map_or(to, |sq| sq as usize);
            (from, to)
        }
    }
}

fn underpromotion_plane(mv: &Move) -> usize {
    match mv.promotion() {
        Some(Role::Knight) => 1,
        Some(Role::Bishop) => 2,
        Some(Role::Rook) => 3,
        _ => 0,
    }
}

/// Index of `mv` in a policy vector of size [`POLICY_SIZE`].
#[must_use]
pub fn nn_index(mv: &Move, black_to_move: bool, transform: Transform) -> usize {
    let (from, to) = move_squares(mv);
    let orient = |sq: usize| transform.apply(if black_to_move { sq ^ 56 } else { sq });
    underpromotion_plane(mv) * SQUARE_PAIRS + orient(from) * 64 + orient(to)
}

/// Coordinate notation for `mv`, castling written as the king's step.
#[must_use]
pub fn format_move(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// The legal move in `pos` written as `text`.
#[must_use]
pub fn parse_move(pos: &Chess, text: &str) -> Option<Move> {
    let uci: UciMove = text.trim().parse().ok()?;
    uci.to_move(pos).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap()
    }

    #[test]
    fn test_parse_and_format_roundtrip_on_start() {
        let pos = Chess::default();
        let mv = parse_move(&pos, "e2e4").unwrap();
        assert_eq!(format_move(&mv), "e2e4");
        assert!(parse_move(&pos, "e2e5").is_none());
    }

    #[test]
    fn test_castling_is_king_step() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let short = parse_move(&pos, "e1g1").unwrap();
        let long = parse_move(&pos, "e1c1").unwrap();
        assert!(short.is_castle());
        assert!(long.is_castle());
    }

    #[test]
    fn test_castling_notation_both_colors() {
        let white = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let long = parse_move(&white, "e1c1").unwrap();
        assert_eq!(format_move(&long), "e1c1");

        let black = position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        let short = parse_move(&black, "e8g8").unwrap();
        assert!(short.is_castle());
        assert_eq!(format_move(&short), "e8g8");
    }

    #[test]
    fn test_every_legal_move_reads_back() {
        use shakmaty::Position;

        let pos = position("r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1");
        for mv in pos.legal_moves() {
            assert_eq!(parse_move(&pos, &format_move(&mv)), Some(mv));
        }
    }

    #[test]
    fn test_malformed_notation_is_rejected() {
        let pos = Chess::default();
        assert!(parse_move(&pos, "").is_none());
        assert!(parse_move(&pos, "e2").is_none());
        assert!(parse_move(&pos, "0000").is_none());
        assert!(parse_move(&pos, " e2e4 ").is_some());
    }

    #[test]
    fn test_promotion_suffix() {
        let pos = position("8/4P3/8/8/8/8/k7/7K w - - 0 1");
        assert!(parse_move(&pos, "e7e8q").is_some());
        assert!(parse_move(&pos, "e7e8n").is_some());
        assert!(parse_move(&pos, "e7e8").is_none());
    }

    #[test]
    fn test_transform_apply() {
        // b1 = 1
        assert_eq!(Transform::NONE.apply(1), 1);
        assert_eq!(Transform::FLIP.apply(1), 6); // g1
        assert_eq!(Transform::MIRROR.apply(1), 57); // b8
        assert_eq!(Transform::TRANSPOSE.apply(1), 8); // a2
        let all = Transform::FLIP.union(Transform::MIRROR).union(Transform::TRANSPOSE);
        assert_eq!(all.bits(), 7);
        // b1 -> g1 -> g8 -> h7
        assert_eq!(all.apply(1), 55);
    }

    #[test]
    fn test_nn_index_is_mover_relative() {
        let white = Chess::default();
        let e2e4 = parse_move(&white, "e2e4").unwrap();
        let black = position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        let e7e5 = parse_move(&black, "e7e5").unwrap();

        assert_eq!(
            nn_index(&e2e4, false, Transform::NONE),
            nn_index(&e7e5, true, Transform::NONE)
        );
        assert_eq!(nn_index(&e2e4, false, Transform::NONE), 12 * 64 + 28);
    }

    #[test]
    fn test_underpromotions_use_separate_planes() {
        let pos = position("8/4P3/8/8/8/8/k7/7K w - - 0 1");
        let queen = nn_index(&parse_move(&pos, "e7e8q").unwrap(), false, Transform::NONE);
        let knight = nn_index(&parse_move(&pos, "e7e8n").unwrap(), false, Transform::NONE);
        assert_eq!(knight, queen + SQUARE_PAIRS);
        assert!(knight < POLICY_SIZE);
    }
}
