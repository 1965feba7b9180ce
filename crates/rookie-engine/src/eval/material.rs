//! Default material values.

use rookie_core::PieceKind;

/// Base material values indexed by [`PieceKind::index()`].
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   |   100 |
/// | Knight |   320 |
/// | Bishop |   330 |
/// | Rook   |   500 |
/// | Queen  |   900 |
/// | King   | 20000 |
///
/// Both sides always have exactly one king, so the king value cancels out
/// of the balance; it only anchors the scale of the table.
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [
    100,    // Pawn
    320,    // Knight
    330,    // Bishop
    500,    // Rook
    900,    // Queen
    20_000, // King
];
