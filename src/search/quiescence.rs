//! Quiescence search.
//!
//! Three cooperating entry points resolve tactical noise at the horizon:
//!
//! - [`quiesce`] searches captures and promotions, standing pat on the
//!   static evaluation when no capture improves it.
//! - [`quiesce_checks`] additionally tries quiet checking moves, extending
//!   the horizon one round of checks deeper.
//! - [`quiesce_flee`] runs when the side to move is in check and must try
//!   every evasion; there is no stand-pat while in check.
//!
//! All three share the transposition cache protocol, count nodes through an
//! explicit [`SearchContext`], and report aborts by returning `Ok(None)` so
//! a partially searched subtree never leaks a score upward.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenResult;
use crate::move_generation::pseudo_legal::{
    generate_capture_moves, generate_pseudo_legal_moves, generate_quiet_check_moves,
};
use crate::moves::move_descriptions::{move_from, move_kind, move_to, MoveKind, NO_MOVE};
use crate::search::board_scoring::{
    exchange_value, BoardScorer, DRAW_SCORE, INF, MATE_SCORE,
};
use crate::search::history::{HistoryTable, MAX_PLY};
use crate::search::static_exchange::{is_bad_capture, static_exchange_eval};
use crate::search::transposition_table::{
    score_from_tt, score_to_tt, Bound, TTEntry, TranspositionTable,
};

/// Margin added to a victim's value before a capture may be futility-pruned.
const DELTA_MARGIN: i32 = 150;

/// Everything a quiescence call tree shares: the cache, ordering state, node
/// accounting, and the abort conditions. Borrowed mutably for the duration
/// of one search so nothing hides in globals.
pub struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub history: &'a mut HistoryTable,
    pub scorer: &'a dyn BoardScorer,
    pub nodes: u64,
    pub stop_flag: Option<Arc<AtomicBool>>,
    pub deadline: Option<Instant>,
    pub node_cap: Option<u64>,
    /// Depth from which evaluation skewing activates; zero disables it.
    pub risky_depth: i32,
    /// The side whose evaluations get skewed when risky play is on.
    pub program_side: Option<Color>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tt: &'a mut TranspositionTable,
        history: &'a mut HistoryTable,
        scorer: &'a dyn BoardScorer,
    ) -> Self {
        Self {
            tt,
            history,
            scorer,
            nodes: 0,
            stop_flag: None,
            deadline: None,
            node_cap: None,
            risky_depth: 0,
            program_side: None,
        }
    }

    fn should_abort(&self) -> bool {
        if let Some(cap) = self.node_cap {
            if self.nodes >= cap {
                return true;
            }
        }
        if let Some(flag) = &self.stop_flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        // The clock is polled sparingly; node and flag checks are cheap.
        if self.nodes & 1023 == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return true;
                }
            }
        }
        false
    }

    /// Skew an evaluation toward volatility for the playing side: shrink
    /// deficits early and inflate advantages late, within one-pawn to
    /// one-queen bounds. Off unless `risky_depth` is set.
    fn adjust_risky_eval(&self, side: Color, ply: i32, score: i32) -> i32 {
        if self.risky_depth <= 0 || ply < self.risky_depth {
            return score;
        }
        if self.program_side != Some(side) {
            return score;
        }
        if score.abs() <= 100 || score.abs() >= 1000 {
            return score;
        }

        let adjusted = if score < 0 {
            let factor = if self.nodes > 100 { 0.5 } else { 1.0 };
            (f64::from(score) * factor * f64::from(self.risky_depth) / f64::from(ply)).round()
        } else {
            let factor = if self.nodes > 100 { 2.0 } else { 1.0 };
            (f64::from(score) * factor * f64::from(ply) / f64::from(self.risky_depth)).round()
        } as i32;

        adjusted.clamp(-1000, 1000)
    }
}

/// Capture-only quiescence. Dispatches to [`quiesce_flee`] when the side to
/// move is in check.
pub fn quiesce(
    game_state: &mut GameState,
    ctx: &mut SearchContext,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    pv: &mut Vec<Move>,
) -> MoveGenResult<Option<i32>> {
    let side = game_state.side_to_move;

    if is_king_in_check(game_state, side) {
        return quiesce_flee(game_state, ctx, ply, alpha, beta, pv);
    }

    ctx.nodes += 1;
    pv.clear();
    if ctx.should_abort() {
        return Ok(None);
    }

    if game_state.is_draw_state() {
        return Ok(Some(DRAW_SCORE));
    }

    // PV status depends on the window as given by the caller, before any
    // stand-pat adjustment.
    let is_pv = alpha != beta - 1;

    let mut best = ctx.adjust_risky_eval(side, ply, ctx.scorer.score(game_state));
    if ply >= MAX_PLY as i32 - 1 {
        return Ok(Some(best));
    }

    // Futility references the stand-pat floor and the unraised window, not
    // the running values the move loop updates.
    let floor = best;
    let alpha_floor = alpha;

    if best >= beta {
        return Ok(Some(best));
    }
    if best > alpha {
        alpha = best;
    }
    let original_alpha = alpha;

    let mut tt_move = NO_MOVE;
    if let Some(entry) = ctx.tt.probe(game_state.zobrist_key) {
        let tt_score = score_from_tt(entry.score, ply);
        if let Some(mv) = entry.best_move {
            tt_move = mv;
        }
        let cutoff = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => tt_score >= beta,
            Bound::Upper => tt_score <= alpha,
        };
        if cutoff {
            if tt_score >= beta {
                if let Some(mv) = entry.best_move {
                    if !is_capture(game_state, mv) {
                        ctx.history.bump_cutoff(side, mv, 1, ply as usize);
                    }
                }
            }
            if !is_pv {
                return Ok(Some(tt_score));
            }
        }
    }

    let mut moves = Vec::with_capacity(16);
    generate_capture_moves(game_state, &mut moves);
    order_moves(game_state, ctx, &mut moves, tt_move, ply as usize);

    // Futility applies only against opponents with real recapture potential.
    let prune_allowed = non_pawn_piece_count(game_state, side.opposite()) > 1;

    let mut best_move = NO_MOVE;
    let mut child_pv = Vec::new();

    for mv in moves {
        if prune_allowed {
            if let Some(victim) = capture_victim(game_state, mv) {
                if floor + exchange_value(victim) + DELTA_MARGIN < alpha_floor {
                    continue;
                }
            }
            if is_bad_capture(game_state, mv) {
                continue;
            }
        }

        make_move_in_place(game_state, mv)?;
        if is_king_in_check(game_state, side) {
            unmake_move_in_place(game_state)?;
            continue;
        }

        let score = quiesce(game_state, ctx, ply + 1, -beta, -alpha, &mut child_pv)?;
        unmake_move_in_place(game_state)?;

        let Some(score) = score else {
            return Ok(None);
        };
        let score = -score;

        if score >= beta {
            store_entry(ctx, game_state.zobrist_key, score, Bound::Lower, mv, ply);
            return Ok(Some(score));
        }
        if score > best {
            best = score;
            if score > alpha {
                alpha = score;
                best_move = mv;
                pv.clear();
                pv.push(mv);
                pv.extend_from_slice(&child_pv);
            }
        }
    }

    finish_node(ctx, game_state, best, original_alpha, best_move, ply);
    Ok(Some(best))
}

/// Check-extension quiescence: captures plus quiet checking moves. A child
/// that lands in check continues through [`quiesce_flee`] so the forcing
/// sequence is resolved.
pub fn quiesce_checks(
    game_state: &mut GameState,
    ctx: &mut SearchContext,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    pv: &mut Vec<Move>,
) -> MoveGenResult<Option<i32>> {
    let side = game_state.side_to_move;

    if is_king_in_check(game_state, side) {
        return quiesce_flee(game_state, ctx, ply, alpha, beta, pv);
    }

    ctx.nodes += 1;
    pv.clear();
    if ctx.should_abort() {
        return Ok(None);
    }

    // The root of a search may sit on a repetition; only interior nodes
    // claim the draw.
    if ply > 0 && game_state.is_draw_state() {
        return Ok(Some(DRAW_SCORE));
    }

    let is_pv = alpha != beta - 1;

    let mut best = ctx.scorer.score(game_state);
    if ply >= MAX_PLY as i32 - 1 {
        return Ok(Some(best));
    }

    if best >= beta {
        return Ok(Some(best));
    }
    if best > alpha {
        alpha = best;
    }
    let original_alpha = alpha;

    let mut tt_move = NO_MOVE;
    if let Some(entry) = ctx.tt.probe(game_state.zobrist_key) {
        let tt_score = score_from_tt(entry.score, ply);
        if let Some(mv) = entry.best_move {
            tt_move = mv;
        }
        let cutoff = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => tt_score >= beta,
            Bound::Upper => tt_score <= alpha,
        };
        if cutoff {
            if tt_score >= beta {
                if let Some(mv) = entry.best_move {
                    if !is_capture(game_state, mv) {
                        ctx.history.bump_cutoff(side, mv, 1, ply as usize);
                    }
                }
            }
            if !is_pv {
                return Ok(Some(tt_score));
            }
        }
    }

    let mut moves = Vec::with_capacity(32);
    generate_capture_moves(game_state, &mut moves);
    let capture_count = moves.len();
    generate_quiet_check_moves(game_state, &mut moves)?;

    // Quiet checks that hang the moving piece are not worth extending on.
    let mut filtered = Vec::with_capacity(moves.len());
    for (i, mv) in moves.iter().enumerate() {
        if i >= capture_count && static_exchange_eval(game_state, move_from(*mv), move_to(*mv)) < 0
        {
            continue;
        }
        filtered.push(*mv);
    }
    let mut moves = filtered;
    order_moves(game_state, ctx, &mut moves, tt_move, ply as usize);

    let mut best_move = NO_MOVE;
    let mut child_pv = Vec::new();

    // Every surviving move is searched; the extension exists to resolve
    // forcing lines, so nothing here is futility-pruned.
    for mv in moves {
        make_move_in_place(game_state, mv)?;
        if is_king_in_check(game_state, side) {
            unmake_move_in_place(game_state)?;
            continue;
        }

        let gives_check = is_king_in_check(game_state, side.opposite());
        let score = if gives_check {
            quiesce_flee(game_state, ctx, ply + 1, -beta, -alpha, &mut child_pv)?
        } else {
            quiesce(game_state, ctx, ply + 1, -beta, -alpha, &mut child_pv)?
        };
        unmake_move_in_place(game_state)?;

        let Some(score) = score else {
            return Ok(None);
        };
        let score = -score;

        if score >= beta {
            if !is_capture(game_state, mv) {
                ctx.history.bump_cutoff(side, mv, 1, ply as usize);
            }
            store_entry(ctx, game_state.zobrist_key, score, Bound::Lower, mv, ply);
            return Ok(Some(score));
        }
        if score > best {
            best = score;
            if score > alpha {
                alpha = score;
                best_move = mv;
                pv.clear();
                pv.push(mv);
                pv.extend_from_slice(&child_pv);
            }
        }
    }

    finish_node(ctx, game_state, best, original_alpha, best_move, ply);
    Ok(Some(best))
}

/// Check-evasion quiescence: every legal reply is searched, with no
/// stand-pat. No legal reply in check is mate, scored by distance from the
/// root so nearer mates win.
pub fn quiesce_flee(
    game_state: &mut GameState,
    ctx: &mut SearchContext,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    pv: &mut Vec<Move>,
) -> MoveGenResult<Option<i32>> {
    ctx.nodes += 1;
    pv.clear();
    if ctx.should_abort() {
        return Ok(None);
    }

    let side = game_state.side_to_move;

    if ply > 0 && game_state.is_draw_state() {
        return Ok(Some(DRAW_SCORE));
    }
    if ply >= MAX_PLY as i32 - 1 {
        return Ok(Some(ctx.scorer.score(game_state)));
    }

    let original_alpha = alpha;
    let is_pv = alpha != beta - 1;

    let mut tt_move = NO_MOVE;
    if let Some(entry) = ctx.tt.probe(game_state.zobrist_key) {
        let tt_score = score_from_tt(entry.score, ply);
        if let Some(mv) = entry.best_move {
            tt_move = mv;
        }
        let cutoff = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => tt_score >= beta,
            Bound::Upper => tt_score <= alpha,
        };
        if cutoff {
            if tt_score >= beta {
                if let Some(mv) = entry.best_move {
                    if !is_capture(game_state, mv) {
                        ctx.history.bump_cutoff(side, mv, 1, ply as usize);
                    }
                }
            }
            if !is_pv {
                return Ok(Some(tt_score));
            }
        }
    }

    let mut moves = Vec::with_capacity(16);
    generate_pseudo_legal_moves(game_state, &mut moves);
    order_moves(game_state, ctx, &mut moves, tt_move, ply as usize);

    let mut best = -INF;
    let mut best_move = NO_MOVE;
    let mut legal_replies = 0u32;
    let mut child_pv = Vec::new();

    for mv in moves {
        make_move_in_place(game_state, mv)?;
        if is_king_in_check(game_state, side) {
            unmake_move_in_place(game_state)?;
            continue;
        }
        legal_replies += 1;

        let score = quiesce(game_state, ctx, ply + 1, -beta, -alpha, &mut child_pv)?;
        unmake_move_in_place(game_state)?;

        let Some(score) = score else {
            return Ok(None);
        };
        let score = -score;

        if score >= beta {
            if !is_capture(game_state, mv) {
                ctx.history.bump_cutoff(side, mv, 1, ply as usize);
            }
            store_entry(ctx, game_state.zobrist_key, score, Bound::Lower, mv, ply);
            return Ok(Some(score));
        }
        if score > best {
            best = score;
            if score > alpha {
                alpha = score;
                best_move = mv;
                pv.clear();
                pv.push(mv);
                pv.extend_from_slice(&child_pv);
            }
        }
    }

    if legal_replies == 0 {
        return Ok(Some(if is_king_in_check(game_state, side) {
            -MATE_SCORE + ply
        } else {
            DRAW_SCORE
        }));
    }

    finish_node(ctx, game_state, best, original_alpha, best_move, ply);
    Ok(Some(best))
}

fn finish_node(
    ctx: &mut SearchContext,
    game_state: &GameState,
    best: i32,
    original_alpha: i32,
    best_move: Move,
    ply: i32,
) {
    let (bound, stored_move) = if best > original_alpha && best_move != NO_MOVE {
        (Bound::Exact, Some(best_move))
    } else {
        (Bound::Upper, None)
    };
    ctx.tt.store(TTEntry {
        key: game_state.zobrist_key,
        depth: 0,
        score: score_to_tt(best, ply),
        bound,
        best_move: stored_move,
    });
}

fn store_entry(
    ctx: &mut SearchContext,
    key: u64,
    score: i32,
    bound: Bound,
    best_move: Move,
    ply: i32,
) {
    ctx.tt.store(TTEntry {
        key,
        depth: 0,
        score: score_to_tt(score, ply),
        bound,
        best_move: Some(best_move),
    });
}

#[inline]
fn is_capture(game_state: &GameState, mv: Move) -> bool {
    move_kind(mv) == MoveKind::EnPassantCapture
        || game_state.piece_on_square(move_to(mv)).is_some()
}

#[inline]
fn capture_victim(game_state: &GameState, mv: Move) -> Option<PieceKind> {
    if move_kind(mv) == MoveKind::EnPassantCapture {
        return Some(PieceKind::Pawn);
    }
    game_state.piece_on_square(move_to(mv)).map(|(_, piece)| piece)
}

/// Sort descending: cache move, then captures by most-valuable-victim with
/// the cheapest attacker breaking ties, then killers, then history.
fn order_moves(
    game_state: &GameState,
    ctx: &SearchContext,
    moves: &mut [Move],
    tt_move: Move,
    ply: usize,
) {
    let side = game_state.side_to_move;
    let killers = ctx.history.killers(ply);

    let mut keyed: Vec<(i32, Move)> = moves
        .iter()
        .map(|&mv| {
            let score = if mv == tt_move && mv != NO_MOVE {
                1 << 30
            } else if let Some(victim) = capture_victim(game_state, mv) {
                let attacker = game_state
                    .piece_on_square(move_from(mv))
                    .map(|(_, piece)| piece)
                    .unwrap_or(PieceKind::Pawn);
                (1 << 24) + exchange_value(victim) * 32 - exchange_value(attacker) / 32
            } else if mv == killers[0] {
                (1 << 23) + 1
            } else if mv == killers[1] {
                1 << 23
            } else {
                ctx.history.score(side, mv)
            };
            (score, mv)
        })
        .collect();

    keyed.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
    for (slot, (_, mv)) in moves.iter_mut().zip(keyed) {
        *slot = mv;
    }
}

#[inline]
fn non_pawn_piece_count(game_state: &GameState, color: Color) -> u32 {
    let counts = &game_state.piece_counts[color.index()];
    u32::from(counts[PieceKind::Knight.index()])
        + u32::from(counts[PieceKind::Bishop.index()])
        + u32::from(counts[PieceKind::Rook.index()])
        + u32::from(counts[PieceKind::Queen.index()])
}
