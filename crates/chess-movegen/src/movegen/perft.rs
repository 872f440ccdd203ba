//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::{generate_legal, generate_legal_with, LegalityFilter};
use crate::board::Board;
use chess_types::Move;

/// Counts the number of leaf nodes at the given depth.
///
/// The last ply is counted in bulk from the legal move list instead of
/// being made and unmade. The board is left as it was found.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        board.make_move(m);
        nodes += perft(board, depth - 1);
        board.unmake_move();
    }
    nodes
}

/// Like [`perft`], with the legality filter chosen by the caller.
pub fn perft_with(board: &mut Board, depth: u32, filter: LegalityFilter) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_with(board, filter);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        board.make_move(m);
        nodes += perft_with(board, depth - 1, filter);
        board.unmake_move();
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
///
/// Results are sorted by the move's UCI text.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_legal(board);
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        board.make_move(m);
        let nodes = perft(board, depth - 1);
        board.unmake_move();
        results.push((m, nodes));
    }

    results.sort_by_key(|(m, _)| m.to_uci());
    for (m, nodes) in &results {
        tracing::debug!(mv = %m.to_uci(), nodes, "perft divide");
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_node() {
        let mut board = Board::startpos();
        assert_eq!(perft(&mut board, 0), 1);
        assert!(perft_divide(&mut board, 0).is_empty());
    }

    #[test]
    fn perft_startpos_shallow() {
        let mut board = Board::startpos();
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(perft(&mut board, 3), 8902);
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn perft_with_naive_filter() {
        let mut board = Board::startpos();
        assert_eq!(perft_with(&mut board, 3, LegalityFilter::Naive), 8902);
        assert_eq!(perft_with(&mut board, 3, LegalityFilter::PinAware), 8902);
    }

    #[test]
    fn perft_divide_works() {
        let mut board = Board::startpos();
        let results = perft_divide(&mut board, 1);
        assert_eq!(results.len(), 20);
        // Total should equal perft(1)
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
        assert_eq!(results[0].0.to_uci(), "a2a3");
    }

    #[test]
    fn perft_divide_depth_two() {
        let mut board = Board::startpos();
        let results = perft_divide(&mut board, 2);
        assert!(results.iter().all(|&(_, n)| n == 20));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }
}
