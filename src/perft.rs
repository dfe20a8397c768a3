use crate::board::Board;

// Legal-move tree walk using make/unmake (no cloning)
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let legal = board.legal_moves(board.to_move());
    if depth == 1 { return legal.move_count() as u64; }
    let mut nodes = 0u64;
    for mv in legal.moves() {
        let undo = board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move(undo);
    }
    nodes
}

/// Per-root-move counts, in legal-move order.
pub fn divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 { return Vec::new(); }
    let legal = board.legal_moves(board.to_move());
    legal.moves().map(|mv| {
        let undo = board.make_move(mv);
        let n = perft(board, depth - 1);
        board.unmake_move(undo);
        (mv.to_string(), n)
    }).collect()
}
