//! 走法生成和验证

use crate::board::Board;
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::palace::{is_palace_step, palace_of};
use crate::path::{diagonal_leg, has_single_screen, is_line_clear, orthogonal_leg};
use crate::piece::{Piece, PieceKind, Player, Position};

/// 八个相邻方向
const NEIGHBORS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 马：一直一斜
const HORSE_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// 象：一直两斜
const ELEPHANT_OFFSETS: [(i8, i8); 8] = [
    (2, 3),
    (3, 2),
    (3, -2),
    (2, -3),
    (-2, -3),
    (-3, -2),
    (-3, 2),
    (-2, 3),
];

/// 棋子走法能力
///
/// `candidate_moves` 只看几何形状，`path_valid` 负责各棋子的阻挡规则，
/// `legal_moves` 将两者与"目标为空或为敌子"合并。
pub trait MoveRule {
    /// 几何上可达的候选位置（已过滤出界位置）
    fn candidate_moves(&self, from: Position) -> Vec<Position>;

    /// 起点到终点的路径是否满足该棋子的规则，两端必须在棋盘内
    fn path_valid(&self, from: Position, to: Position, board: &Board) -> bool;

    /// 棋子归属，用于判断目标是否为己方
    fn owner(&self) -> Player;

    /// 合法目标：候选 ∩ 路径合法 ∩ 目标非己方
    fn legal_moves(&self, from: Position, board: &Board) -> Vec<Position> {
        let owner = self.owner();
        self.candidate_moves(from)
            .into_iter()
            .filter(|&to| self.path_valid(from, to, board))
            .filter(|&to| board.piece_at(to).map_or(true, |target| target.player != owner))
            .collect()
    }
}

impl MoveRule for Piece {
    fn candidate_moves(&self, from: Position) -> Vec<Position> {
        match self.kind {
            PieceKind::Soldier => {
                // 含原地，由路径规则排除
                let mut moves = offsets(from, &NEIGHBORS);
                moves.push(from);
                moves
            }
            PieceKind::General | PieceKind::Guard => offsets(from, &NEIGHBORS),
            PieceKind::Horse => offsets(from, &HORSE_OFFSETS),
            PieceKind::Elephant => offsets(from, &ELEPHANT_OFFSETS),
            PieceKind::Cannon | PieceKind::Chariot => lines(from),
        }
    }

    fn path_valid(&self, from: Position, to: Position, board: &Board) -> bool {
        match self.kind {
            PieceKind::Soldier => self.soldier_path_valid(from, to),
            PieceKind::General | PieceKind::Guard => {
                palace_of(from) == Some(self.player) && is_palace_step(from, to)
            }
            PieceKind::Horse => {
                is_shape(from, to, &HORSE_OFFSETS)
                    && orthogonal_leg(from, to).map_or(false, |leg| !board.is_occupied(leg))
            }
            PieceKind::Elephant => {
                is_shape(from, to, &ELEPHANT_OFFSETS)
                    && [orthogonal_leg(from, to), diagonal_leg(from, to)]
                        .into_iter()
                        .all(|leg| leg.map_or(false, |leg| !board.is_occupied(leg)))
            }
            PieceKind::Cannon => from != to && has_single_screen(board, *self, from, to),
            PieceKind::Chariot => from != to && is_line_clear(board, from, to),
        }
    }

    fn owner(&self) -> Player {
        self.player
    }
}

impl Piece {
    /// 兵/卒：不能后退；直走一格，或在九宫内沿斜线向前一格
    fn soldier_path_valid(&self, from: Position, to: Position) -> bool {
        let (dc, dr) = from.delta(to);
        if dr != 0 && dr.signum() != self.player.forward() {
            return false;
        }
        match (dc.abs(), dr.abs()) {
            (1, 0) | (0, 1) => true,
            (1, 1) => is_palace_step(from, to),
            _ => false,
        }
    }
}

fn offsets(from: Position, deltas: &[(i8, i8)]) -> Vec<Position> {
    deltas
        .iter()
        .filter_map(|&(dc, dr)| from.offset(dc, dr))
        .collect()
}

fn is_shape(from: Position, to: Position, deltas: &[(i8, i8)]) -> bool {
    deltas.contains(&from.delta(to))
}

/// 同行或同列的所有其它格子
fn lines(from: Position) -> Vec<Position> {
    let row = (0..BOARD_WIDTH as u8)
        .filter(|&col| col != from.col)
        .map(|col| Position::new_unchecked(col, from.row));
    let column = (0..BOARD_HEIGHT as u8)
        .filter(|&row| row != from.row)
        .map(|row| Position::new_unchecked(from.col, row));
    row.chain(column).collect()
}
