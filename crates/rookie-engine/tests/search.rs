//! Integration tests for alpha-beta search and the evaluator.
//!
//! Alpha-beta results are checked against a plain minimax that never prunes
//! and never caches.

use rookie_core::{ChessMove, ChessPosition, Position};
use rookie_engine::{EvaluationConfig, MATE_SCORE, SCORE_SCALE, SearchConfig, Searcher, evaluate};

const CENTER_CAPTURE_FEN: &str =
    "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";

const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const ITALIAN_FEN: &str =
    "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

const ROOK_ENDGAME_FEN: &str = "8/5k2/8/3r4/8/2K5/4R3/8 w - - 0 1";

/// Unpruned, uncached negamax.
fn minimax(pos: &mut ChessPosition, depth: u8, config: &EvaluationConfig) -> i32 {
    if depth == 0 || pos.status().is_over() {
        return evaluate(pos, config);
    }
    let mut best = i32::MIN + 1;
    for mv in pos.legal_moves() {
        let mut child = pos.play(&mv);
        best = best.max(-minimax(&mut child, depth - 1, config));
    }
    best
}

/// Root choice of the unpruned search: first move with the highest score.
fn minimax_root(pos: &mut ChessPosition, depth: u8, config: &EvaluationConfig) -> (ChessMove, i32) {
    let mut best: Option<(ChessMove, i32)> = None;
    for mv in pos.legal_moves() {
        let score = {
            let mut child = pos.play(&mv);
            -minimax(&mut child, depth - 1, config)
        };
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best.expect("position has legal moves")
}

fn search(fen: &str, depth: u8) -> (Searcher, ChessPosition, Option<ChessMove>, i32) {
    let mut pos = ChessPosition::from_fen(fen).unwrap();
    let mut searcher = Searcher::new(&SearchConfig { depth, tt_entries: 1 << 18 });
    let moves = pos.legal_moves();
    let result = searcher.search(&mut pos, &moves, &EvaluationConfig::default());
    (searcher, pos, result.best_move, result.score)
}

/// Rotate the board 180 degrees and swap piece colors.
fn color_mirror(placement: &str) -> String {
    placement
        .chars()
        .rev()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

// ── End-to-end ────────────────────────────────────────────────────────────────

#[test]
fn depth_one_takes_the_free_pawn() {
    let (_, _, best, score) = search(CENTER_CAPTURE_FEN, 1);
    assert_eq!(ChessPosition::uci(&best.unwrap()), "e4d5");
    assert!(score >= 90 * SCORE_SCALE, "capture should be worth about a pawn, got {score}");
}

#[test]
fn half_point_square_bonus_decides_the_root_move() {
    let config = EvaluationConfig::default();
    let fen = "4k3/8/8/8/8/8/8/R5K1 w - - 0 1";
    let mut pos = ChessPosition::from_fen(fen).unwrap();
    let score_after = |pos: &mut ChessPosition, uci: &str| {
        let mv = pos.parse_uci(uci).unwrap();
        let child = pos.play(&mv);
        -evaluate(&*child, &config)
    };
    let to_d1 = score_after(&mut pos, "a1d1");
    let to_b1 = score_after(&mut pos, "a1b1");
    assert_eq!(to_d1 - to_b1, SCORE_SCALE / 2);

    // d1, e1 and a7 are the only +0.5 rook squares; b1 must lose to them.
    let (_, _, best, score) = search(fen, 1);
    let best = ChessPosition::uci(&best.unwrap());
    assert_eq!(score, to_d1);
    assert!(["a1d1", "a1e1", "a1a7"].contains(&best.as_str()), "chose {best}");
}

// ── Alpha-beta equivalence ────────────────────────────────────────────────────

#[test]
fn alpha_beta_matches_minimax() {
    let config = EvaluationConfig::default();
    let cases = [
        (rookie_core::STARTING_FEN, 3),
        (CENTER_CAPTURE_FEN, 3),
        (KIWIPETE_FEN, 2),
        (ITALIAN_FEN, 2),
        (ROOK_ENDGAME_FEN, 3),
    ];

    for (fen, depth) in cases {
        let mut reference = ChessPosition::from_fen(fen).unwrap();
        let (expected_move, expected_score) = minimax_root(&mut reference, depth, &config);

        let (_, _, best, score) = search(fen, depth);
        assert_eq!(best, Some(expected_move), "move differs for {fen} at depth {depth}");
        assert_eq!(score, expected_score, "score differs for {fen} at depth {depth}");
    }
}

#[test]
fn search_leaves_position_untouched() {
    let (_, pos, _, _) = search(KIWIPETE_FEN, 2);
    assert_eq!(pos, ChessPosition::from_fen(KIWIPETE_FEN).unwrap());
}

// ── Transposition soundness ───────────────────────────────────────────────────

#[test]
fn cached_values_match_plain_minimax() {
    let config = EvaluationConfig::default();
    let depth = 3;
    let (searcher, mut pos, _, _) = search(rookie_core::STARTING_FEN, depth);

    let mut hits = 0;
    for mv in pos.legal_moves() {
        let mut child = pos.play(&mv);
        if let Some(cached) = searcher.tt().lookup(&child.key(), depth - 1) {
            hits += 1;
            assert_eq!(cached, minimax(&mut child, depth - 1, &config), "after {mv:?}");
        }
        for reply in child.legal_moves() {
            let mut grandchild = child.play(&reply);
            if let Some(cached) = searcher.tt().lookup(&grandchild.key(), depth - 2) {
                hits += 1;
                assert_eq!(cached, minimax(&mut grandchild, depth - 2, &config));
            }
        }
    }
    assert!(hits > 0, "expected exact entries in the table");
}

// ── Evaluation ────────────────────────────────────────────────────────────────

#[test]
fn evaluation_is_antisymmetric_under_color_mirror() {
    let config = EvaluationConfig::default();
    let placements = [
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
        "8/5k2/8/3r4/8/2K5/4R3/8",
        "4k3/8/8/8/8/8/4PPPP/4K2R",
    ];

    for placement in placements {
        let mirrored = color_mirror(placement);
        for side in ["w", "b"] {
            let original = ChessPosition::from_fen(&format!("{placement} {side} - - 0 1")).unwrap();
            let same_side = ChessPosition::from_fen(&format!("{mirrored} {side} - - 0 1")).unwrap();
            assert_eq!(
                evaluate(&original, &config),
                -evaluate(&same_side, &config),
                "{placement} vs {mirrored} ({side} to move)"
            );
        }

        // Swapping the mover as well restores the mover-relative score.
        let white = ChessPosition::from_fen(&format!("{placement} w - - 0 1")).unwrap();
        let black = ChessPosition::from_fen(&format!("{mirrored} b - - 0 1")).unwrap();
        assert_eq!(evaluate(&white, &config), evaluate(&black, &config));
    }
}

#[test]
fn checkmate_dominates_any_material() {
    let config = EvaluationConfig::default();

    // Black is up two knights for a rook but is mated on the back rank.
    let mated = ChessPosition::from_fen("R5k1/5ppp/8/8/8/8/7K/nn6 b - - 0 1").unwrap();
    assert_eq!(evaluate(&mated, &config), -MATE_SCORE);

    // Eight promoted queens on top of a full back rank still stay below mate.
    let army = ChessPosition::from_fen("k7/pp6/8/8/8/8/QQQQQQQQ/RNBQKBNR w - - 0 1").unwrap();
    assert_eq!(evaluate(&army, &config), MATE_SCORE - 1);
}

#[test]
fn search_prefers_mate_over_material() {
    // Back-rank mate in one.
    let (_, _, best, score) = search("6k1/5ppp/8/8/8/8/r4PPP/3R2K1 w - - 0 1", 2);
    assert_eq!(ChessPosition::uci(&best.unwrap()), "d1d8");
    assert_eq!(score, MATE_SCORE);
}
