//! 路径阻挡规则

use crate::board::Board;
use crate::piece::{Piece, PieceKind, Position};

/// 直线上起点与终点之间（不含两端）的格子
///
/// 两点不在同一行或同一列时返回 None。
pub fn between(from: Position, to: Position) -> Option<Vec<Position>> {
    let (dc, dr) = from.delta(to);
    if dc != 0 && dr != 0 {
        return None;
    }

    let step = (dc.signum(), dr.signum());
    let mut squares = Vec::new();
    let mut current = from;
    while let Some(next) = current.offset(step.0, step.1) {
        if next == to {
            break;
        }
        squares.push(next);
        current = next;
    }
    Some(squares)
}

/// 马腿/象的第一步：沿位移较大的轴走一格
pub fn orthogonal_leg(from: Position, to: Position) -> Option<Position> {
    let (dc, dr) = from.delta(to);
    if dc.abs() > dr.abs() {
        from.offset(dc.signum(), 0)
    } else {
        from.offset(0, dr.signum())
    }
}

/// 象的第二步：从马腿再朝终点斜走一格
pub fn diagonal_leg(from: Position, to: Position) -> Option<Position> {
    let (dc, dr) = from.delta(to);
    orthogonal_leg(from, to)?.offset(dc.signum(), dr.signum())
}

/// 车：中间必须全空
pub fn is_line_clear(board: &Board, from: Position, to: Position) -> bool {
    match between(from, to) {
        Some(squares) => squares.into_iter().all(|pos| !board.is_occupied(pos)),
        None => false,
    }
}

/// 包：中间恰好一个棋子，且为己方非包棋子（炮架）
pub fn has_single_screen(board: &Board, cannon: Piece, from: Position, to: Position) -> bool {
    let Some(squares) = between(from, to) else {
        return false;
    };

    let mut screens = squares.into_iter().filter_map(|pos| board.piece_at(pos));
    match (screens.next(), screens.next()) {
        (Some(screen), None) => screen.is_ally(&cannon) && screen.kind != PieceKind::Cannon,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Player;

    fn pos(col: u8, row: u8) -> Position {
        Position::new_unchecked(col, row)
    }

    #[test]
    fn test_between() {
        assert_eq!(between(pos(0, 0), pos(0, 3)), Some(vec![pos(0, 1), pos(0, 2)]));
        assert_eq!(between(pos(5, 4), pos(2, 4)), Some(vec![pos(4, 4), pos(3, 4)]));
        assert_eq!(between(pos(0, 0), pos(1, 0)), Some(vec![]));
        assert_eq!(between(pos(0, 0), pos(1, 1)), None);
    }

    #[test]
    fn test_legs() {
        // 纵向为主
        assert_eq!(orthogonal_leg(pos(0, 0), pos(1, 2)), Some(pos(0, 1)));
        // 横向为主
        assert_eq!(orthogonal_leg(pos(0, 0), pos(2, 1)), Some(pos(1, 0)));
        assert_eq!(diagonal_leg(pos(2, 0), pos(4, 3)), Some(pos(3, 2)));
        assert_eq!(diagonal_leg(pos(4, 4), pos(1, 2)), Some(pos(2, 3)));
    }

    #[test]
    fn test_screen_rules() {
        let mut board = Board::empty();
        let cannon = Piece::new(PieceKind::Cannon, Player::Red);
        board.place(pos(0, 0), cannon);

        // 没有炮架
        assert!(!has_single_screen(&board, cannon, pos(0, 0), pos(0, 5)));

        board.place(pos(0, 2), Piece::new(PieceKind::Soldier, Player::Red));
        assert!(has_single_screen(&board, cannon, pos(0, 0), pos(0, 5)));

        // 两个棋子
        board.place(pos(0, 3), Piece::new(PieceKind::Soldier, Player::Red));
        assert!(!has_single_screen(&board, cannon, pos(0, 0), pos(0, 5)));
    }

    #[test]
    fn test_screen_must_be_allied_non_cannon() {
        let mut board = Board::empty();
        let cannon = Piece::new(PieceKind::Cannon, Player::Red);
        board.place(pos(0, 0), cannon);

        board.place(pos(0, 2), Piece::new(PieceKind::Horse, Player::Blue));
        assert!(!has_single_screen(&board, cannon, pos(0, 0), pos(0, 5)));

        board.place(pos(0, 2), Piece::new(PieceKind::Cannon, Player::Red));
        assert!(!has_single_screen(&board, cannon, pos(0, 0), pos(0, 5)));
    }
}
