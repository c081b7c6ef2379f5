//! Quiet-move ordering state: butterfly history counters and per-ply killer
//! slots. The quiescence check stage consults killers when assembling its
//! special-move set, and beta cutoffs feed back into both tables.

use crate::game_state::chess_types::{Color, Move};
use crate::moves::move_descriptions::{move_from, move_to, NO_MOVE};

pub const MAX_PLY: usize = 64;

const HISTORY_CAP: i32 = 1 << 20;

#[derive(Debug, Clone)]
pub struct HistoryTable {
    counters: Vec<i32>,
    killers: [[Move; 2]; MAX_PLY],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            counters: vec![0; 2 * 64 * 64],
            killers: [[NO_MOVE; 2]; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.counters.fill(0);
        self.killers = [[NO_MOVE; 2]; MAX_PLY];
    }

    #[inline]
    fn counter_index(color: Color, mv: Move) -> usize {
        color.index() * 64 * 64 + move_from(mv) as usize * 64 + move_to(mv) as usize
    }

    #[inline]
    pub fn score(&self, color: Color, mv: Move) -> i32 {
        self.counters[Self::counter_index(color, mv)]
    }

    /// Record a beta cutoff: bump the butterfly counter and rotate the move
    /// into the killer slots for this ply. Counters halve globally when one
    /// saturates so relative order survives.
    pub fn bump_cutoff(&mut self, color: Color, mv: Move, depth: i32, ply: usize) {
        let idx = Self::counter_index(color, mv);
        self.counters[idx] += depth.max(1) * depth.max(1);
        if self.counters[idx] >= HISTORY_CAP {
            for counter in &mut self.counters {
                *counter /= 2;
            }
        }

        if ply < MAX_PLY {
            let slots = &mut self.killers[ply];
            if slots[0] != mv {
                slots[1] = slots[0];
                slots[0] = mv;
            }
        }
    }

    #[inline]
    pub fn killers(&self, ply: usize) -> [Move; 2] {
        if ply < MAX_PLY {
            self.killers[ply]
        } else {
            [NO_MOVE; 2]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{pack_move, MoveKind};

    #[test]
    fn cutoffs_raise_history_score() {
        let mut history = HistoryTable::new();
        let mv = pack_move(12, 28, MoveKind::Normal);
        assert_eq!(history.score(Color::Light, mv), 0);

        history.bump_cutoff(Color::Light, mv, 3, 0);
        assert_eq!(history.score(Color::Light, mv), 9);
        // Same squares for the other color stay independent.
        assert_eq!(history.score(Color::Dark, mv), 0);
    }

    #[test]
    fn killers_rotate_and_deduplicate() {
        let mut history = HistoryTable::new();
        let first = pack_move(1, 18, MoveKind::Normal);
        let second = pack_move(6, 21, MoveKind::Normal);

        history.bump_cutoff(Color::Light, first, 1, 4);
        assert_eq!(history.killers(4), [first, NO_MOVE]);

        history.bump_cutoff(Color::Light, first, 1, 4);
        assert_eq!(history.killers(4), [first, NO_MOVE]);

        history.bump_cutoff(Color::Light, second, 1, 4);
        assert_eq!(history.killers(4), [second, first]);
    }

    #[test]
    fn saturation_halves_all_counters() {
        let mut history = HistoryTable::new();
        let hot = pack_move(0, 8, MoveKind::Normal);
        let warm = pack_move(1, 9, MoveKind::Normal);
        history.bump_cutoff(Color::Light, warm, 10, 0);

        for _ in 0..20000 {
            history.bump_cutoff(Color::Light, hot, 10, 0);
        }
        assert!(history.score(Color::Light, hot) < HISTORY_CAP);
        assert!(history.score(Color::Light, hot) > history.score(Color::Light, warm));
    }
}
