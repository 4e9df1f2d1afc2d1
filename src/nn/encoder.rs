//! Position encoding for neural network input.
//!
//! A position is encoded as a stack of 8x8 planes from the point of view of
//! the side to move: the board is flipped vertically when black moves, so
//! "our" pawns always advance up the board.
//!
//! Layout for a history depth of `d`:
//! - `d` history slots of [`PLANES_PER_POSITION`] planes each, newest first:
//!   six planes for our pieces, six for theirs, one repetition flag plane
//! - [`AUX_PLANES`] auxiliary planes: our/their castling rights (four planes),
//!   black to move, rule-50 counter, all zeros, all ones

use shakmaty::{Board, CastlingSide, Chess, Color, Position, Role};

use crate::rules::{PositionHistory, Transform};

use super::traits::{EncodedState, InputFormat};

pub const PLANES_PER_POSITION: usize = 13;
pub const AUX_PLANES: usize = 8;
pub const SQUARES: usize = 64;

const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// How history slots older than the game itself are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillEmptyHistory {
    /// Leave them zero.
    No,
    /// Repeat the starting position, unless the game began from the standard
    /// initial position.
    #[default]
    FenOnly,
    /// Always repeat the starting position.
    Always,
}

/// Total plane count for a history depth.
#[must_use]
pub const fn plane_count(history_depth: usize) -> usize {
    history_depth * PLANES_PER_POSITION + AUX_PLANES
}

/// Pick the board symmetry to apply for `format`.
///
/// `Canonical` only transforms positions without castling rights: the board
/// is flipped so our king stands on files a-d and, when no pawns are left,
/// further mirrored and transposed so the king lands on ranks 1-4 on or
/// below the a1-h8 diagonal.
#[must_use]
pub fn choose_transform(format: InputFormat, pos: &Chess) -> Transform {
    if format == InputFormat::Classical || !pos.castles().castling_rights().is_empty() {
        return Transform::NONE;
    }
    let Some(king) = pos.board().king_of(pos.turn()) else {
        return Transform::NONE;
    };

    let mut sq = king as usize;
    if pos.turn() == Color::Black {
        sq ^= 56;
    }

    let mut transform = Transform::NONE;
    if sq % 8 > 3 {
        transform = transform.union(Transform::FLIP);
        sq ^= 7;
    }
    if !pos.board().by_role(Role::Pawn).is_empty() {
        return transform;
    }
    if sq / 8 > 3 {
        transform = transform.union(Transform::MIRROR);
        sq ^= 56;
    }
    if sq / 8 > sq % 8 {
        transform = transform.union(Transform::TRANSPOSE);
    }
    transform
}

fn is_standard_start(pos: &Chess) -> bool {
    let start = Chess::default();
    pos.board() == start.board()
        && pos.castles().castling_rights() == start.castles().castling_rights()
        && pos.turn() == Color::White
        && pos.fullmoves().get() == 1
}

struct PlaneWriter<'a> {
    tensor: &'a mut [f32],
    black_to_move: bool,
    transform: Transform,
}

impl PlaneWriter<'_> {
    fn orient(&self, sq: usize) -> usize {
        self.transform
            .apply(if self.black_to_move { sq ^ 56 } else { sq })
    }

    fn fill(&mut self, plane: usize, value: f32) {
        self.tensor[plane * SQUARES..(plane + 1) * SQUARES].fill(value);
    }

    fn write_board(&mut self, base: usize, board: &Board, us: Color) {
        for (i, &role) in ROLES.iter().enumerate() {
            for (offset, color) in [(0, us), (ROLES.len(), !us)] {
                let plane = base + offset + i;
                for sq in board.by_color(color) & board.by_role(role) {
                    let idx = self.orient(sq as usize);
                    self.tensor[plane * SQUARES + idx] = 1.0;
                }
            }
        }
    }
}

/// Encode the last `history_depth` positions of `history`.
///
/// Returns the planes, shaped `[plane_count(depth), 8, 8]`, and the transform
/// that maps mover-relative move squares into this input's orientation.
#[must_use]
pub fn encode_position_for_nn(
    format: InputFormat,
    history: &PositionHistory,
    history_depth: usize,
    fill: FillEmptyHistory,
) -> (EncodedState, Transform) {
    let current = history.last();
    let us = current.turn();
    let transform = choose_transform(format, current);

    let planes = plane_count(history_depth);
    let mut tensor = vec![0.0f32; planes * SQUARES];
    let mut writer = PlaneWriter {
        tensor: &mut tensor,
        black_to_move: us == Color::Black,
        transform,
    };

    let mut slot = 0;
    for (pos, repetitions) in history.recent(history_depth) {
        let base = slot * PLANES_PER_POSITION;
        writer.write_board(base, pos.board(), us);
        if repetitions > 0 {
            writer.fill(base + PLANES_PER_POSITION - 1, 1.0);
        }
        slot += 1;
    }

    let fill_slots = match fill {
        FillEmptyHistory::No => false,
        FillEmptyHistory::FenOnly => !is_standard_start(history.starting()),
        FillEmptyHistory::Always => true,
    };
    if fill_slots {
        let start = history.starting().board();
        for slot in slot..history_depth {
            writer.write_board(slot * PLANES_PER_POSITION, start, us);
        }
    }

    let aux = history_depth * PLANES_PER_POSITION;
    let castles = current.castles();
    let rights = [
        (us, CastlingSide::KingSide),
        (us, CastlingSide::QueenSide),
        (!us, CastlingSide::KingSide),
        (!us, CastlingSide::QueenSide),
    ];
    for (i, (color, side)) in rights.into_iter().enumerate() {
        if castles.has(color, side) {
            writer.fill(aux + i, 1.0);
        }
    }
    if us == Color::Black {
        writer.fill(aux + 4, 1.0);
    }
    writer.fill(aux + 5, current.halfmoves() as f32);
    writer.fill(aux + 7, 1.0);

    (EncodedState::new(tensor, vec![planes, 8, 8]), transform)
}
