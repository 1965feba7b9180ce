//! Tunable evaluation parameters: material values and piece-square tables.

use std::collections::BTreeMap;

use rand::Rng;
use rookie_core::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};

use crate::eval::SCORE_SCALE;
use crate::eval::material::MATERIAL_VALUE;
use crate::eval::pst::PST;

/// Score units per piece-square table step (tables are written in tenths of a point).
const TABLE_STEP: i32 = SCORE_SCALE / 10;

/// Errors from rebuilding an [`EvaluationConfig`] out of saved tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A table names a piece kind that does not exist.
    #[error("unknown piece kind \"{name}\"")]
    UnknownPiece {
        /// The unrecognised name.
        name: String,
    },

    /// A piece kind has no material value or no square table.
    #[error("missing {table} entry for {kind}")]
    MissingPiece {
        /// Which table lacks the entry ("material" or "positional").
        table: &'static str,
        kind: PieceKind,
    },

    /// A square table does not have exactly 64 entries.
    #[error("{kind} square table has {len} entries, expected 64")]
    BadTableLength { kind: PieceKind, len: usize },
}

/// Material values and piece-square tables used by [`evaluate`](crate::evaluate).
///
/// Every parameter is an integer in score units ([`SCORE_SCALE`] per material
/// point), fine enough that a few percent of jitter moves even the smallest
/// table entry. The tables are plain arrays, so cloning yields a fully
/// independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedTables", into = "SavedTables")]
pub struct EvaluationConfig {
    material: [i32; PieceKind::COUNT],
    pst: [[i32; 64]; PieceKind::COUNT],
}

impl EvaluationConfig {
    /// Build a config from explicit tables, in score units.
    pub fn new(material: [i32; PieceKind::COUNT], pst: [[i32; 64]; PieceKind::COUNT]) -> Self {
        Self { material, pst }
    }

    /// Material value of a piece kind, in score units.
    #[inline]
    pub fn material(&self, kind: PieceKind) -> i32 {
        self.material[kind.index()]
    }

    /// Square table of a piece kind, White's perspective.
    #[inline]
    pub fn table(&self, kind: PieceKind) -> &[i32; 64] {
        &self.pst[kind.index()]
    }

    pub fn set_material(&mut self, kind: PieceKind, value: i32) {
        self.material[kind.index()] = value;
    }

    pub fn set_square(&mut self, kind: PieceKind, sq: Square, value: i32) {
        self.pst[kind.index()][sq.index()] = value;
    }

    /// Square-table entry for `piece` on `sq`, in score units.
    ///
    /// White reads the table at `sq`; Black reads it at the mirrored square.
    #[inline]
    pub fn square_value(&self, piece: Piece, sq: Square) -> i32 {
        let sq = match piece.color {
            Color::White => sq,
            Color::Black => sq.mirror(),
        };
        self.pst[piece.kind.index()][sq.index()]
    }

    /// Unsigned contribution of `piece` on `sq`: material plus square entry.
    #[inline]
    pub fn piece_value(&self, piece: Piece, sq: Square) -> i32 {
        self.material(piece.kind) + self.square_value(piece, sq)
    }

    /// A copy with every parameter scaled by its own random factor in
    /// `[1 - jitter, 1 + jitter]`, rounded to the nearest score unit.
    pub fn mutated<R: Rng>(&self, rng: &mut R, jitter: f64) -> Self {
        let jitter = jitter.abs();
        let mut scale = |value: i32| -> i32 {
            let factor = rng.random_range(1.0 - jitter..=1.0 + jitter);
            (f64::from(value) * factor).round() as i32
        };

        let mut next = self.clone();
        for value in next.material.iter_mut() {
            *value = scale(*value);
        }
        for table in next.pst.iter_mut() {
            for value in table.iter_mut() {
                *value = scale(*value);
            }
        }
        next
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        let material = MATERIAL_VALUE.map(|value| value * SCORE_SCALE);
        let pst = PST.map(|table| table.map(|entry| entry * TABLE_STEP));
        Self::new(material, pst)
    }
}

/// Name-keyed form of [`EvaluationConfig`] used for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedTables {
    material: BTreeMap<String, i32>,
    positional: BTreeMap<String, Vec<i32>>,
}

impl From<EvaluationConfig> for SavedTables {
    fn from(config: EvaluationConfig) -> Self {
        let material = PieceKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_string(), config.material(kind)))
            .collect();
        let positional = PieceKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_string(), config.table(kind).to_vec()))
            .collect();
        SavedTables { material, positional }
    }
}

impl TryFrom<SavedTables> for EvaluationConfig {
    type Error = ConfigError;

    fn try_from(saved: SavedTables) -> Result<Self, ConfigError> {
        for name in saved.material.keys().chain(saved.positional.keys()) {
            if PieceKind::from_name(name).is_none() {
                return Err(ConfigError::UnknownPiece { name: name.clone() });
            }
        }

        let mut material = [0; PieceKind::COUNT];
        let mut pst = [[0; 64]; PieceKind::COUNT];
        for kind in PieceKind::ALL {
            material[kind.index()] = *saved
                .material
                .get(kind.name())
                .ok_or(ConfigError::MissingPiece { table: "material", kind })?;

            let table = saved
                .positional
                .get(kind.name())
                .ok_or(ConfigError::MissingPiece { table: "positional", kind })?;
            pst[kind.index()] = table
                .as_slice()
                .try_into()
                .map_err(|_| ConfigError::BadTableLength { kind, len: table.len() })?;
        }

        Ok(EvaluationConfig::new(material, pst))
    }
}
