//! 棋盘存储

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::piece::{Piece, PieceKind, Player, Position};

/// 棋盘
///
/// 纯存储，不做任何规则校验。坐标由调用方保证在棋盘内。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 9x10 棋盘，索引为 row * 9 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        // 底线：车马象士 _ 士象马车
        let back_rank = [
            (0, PieceKind::Chariot),
            (1, PieceKind::Horse),
            (2, PieceKind::Elephant),
            (3, PieceKind::Guard),
            (5, PieceKind::Guard),
            (6, PieceKind::Elephant),
            (7, PieceKind::Horse),
            (8, PieceKind::Chariot),
        ];

        for (player, back, palace_center, cannons, soldiers) in
            [(Player::Red, 0, 1, 2, 3), (Player::Blue, 9, 8, 7, 6)]
        {
            for (col, kind) in back_rank {
                board.place(Position::new_unchecked(col, back), Piece::new(kind, player));
            }

            // 将在九宫中心
            board.place(
                Position::new_unchecked(4, palace_center),
                Piece::new(PieceKind::General, player),
            );

            for col in [1, 7] {
                board.place(Position::new_unchecked(col, cannons), Piece::new(PieceKind::Cannon, player));
            }

            for col in (0..9).step_by(2) {
                board.place(Position::new_unchecked(col, soldiers), Piece::new(PieceKind::Soldier, player));
            }
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.to_index()]
    }

    /// 指定位置是否有棋子
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.piece_at(pos).is_some()
    }

    /// 放置棋子（覆盖原有棋子）
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.squares[pos.to_index()] = Some(piece);
    }

    /// 清空指定位置
    pub fn clear(&mut self, pos: Position) {
        self.squares[pos.to_index()] = None;
    }

    /// 直接写入格子内容，用于撤销模拟走法
    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.to_index()] = piece;
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.piece_at(from);
        let captured = self.piece_at(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 查找指定玩家的将
    pub fn find_general(&self, player: Player) -> Option<Position> {
        self.pieces(player)
            .into_iter()
            .find(|(_, piece)| piece.kind == PieceKind::General)
            .map(|(pos, _)| pos)
    }

    /// 获取指定玩家的所有棋子位置
    pub fn pieces(&self, player: Player) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.player == player)
            .collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        Position::all()
            .filter_map(|pos| self.piece_at(pos).map(|piece| (pos, piece)))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
