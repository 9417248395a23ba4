//! 将军与将死判定
//!
//! 判定依赖实时走法缓存：模拟走法后重算缓存，检查完毕后无条件还原局面并再次重算。

use tracing::{debug, info};

use crate::game::{Game, GameState};
use crate::piece::{Piece, PieceKind, Player, Position};

/// 模拟中的走法，离开作用域时还原棋盘、将位置和走法缓存
struct Speculation<'a> {
    game: &'a mut Game,
    from: Position,
    to: Position,
    moved: Piece,
    captured: Option<Piece>,
}

impl<'a> Speculation<'a> {
    /// 在棋盘上临时执行走法，起点无子返回 None
    fn apply(game: &'a mut Game, from: Position, to: Position) -> Option<Self> {
        let moved = game.board.piece_at(from)?;
        let captured = game.board.move_piece(from, to);

        if moved.kind == PieceKind::General {
            game.generals[moved.player.index()] = Some(to);
        }
        if let Some(piece) = captured.filter(|p| p.kind == PieceKind::General) {
            game.generals[piece.player.index()] = None;
        }
        game.refresh_moves();

        Some(Self {
            game,
            from,
            to,
            moved,
            captured,
        })
    }

    /// 走子方的将是否处于被攻击状态
    fn leaves_mover_in_check(&self) -> bool {
        self.game.is_in_check(self.moved.player)
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.game.board.set(self.from, Some(self.moved));
        self.game.board.set(self.to, self.captured);

        if self.moved.kind == PieceKind::General {
            self.game.generals[self.moved.player.index()] = Some(self.from);
        }
        if let Some(piece) = self.captured.filter(|p| p.kind == PieceKind::General) {
            self.game.generals[piece.player.index()] = Some(self.to);
        }
        self.game.refresh_moves();
    }
}

impl Game {
    /// 指定玩家的将是否在对方的可达格子中
    pub fn is_in_check(&self, player: Player) -> bool {
        self.generals[player.index()]
            .map_or(false, |general| {
                self.moves.by_player[player.opponent().index()].contains(&general)
            })
    }

    /// 模拟走法并返回走子方是否会被将军，结束后局面保持不变
    pub fn simulate_and_test_check(&mut self, from: Position, to: Position) -> bool {
        Speculation::apply(self, from, to).map_or(false, |speculation| speculation.leaves_mover_in_check())
    }

    /// 穷举被将军方的所有走法，没有任何一步能解除将军即判负
    ///
    /// 当前未被将军时直接返回 false。
    pub fn determine_checkmate(&mut self, player: Player) -> bool {
        if !self.is_in_check(player) {
            return false;
        }

        let candidates: Vec<(Position, Position)> = self
            .board
            .pieces(player)
            .into_iter()
            .flat_map(|(from, _)| {
                self.moves.by_square[from.to_index()]
                    .iter()
                    .map(move |&to| (from, to))
            })
            .collect();

        for (from, to) in candidates {
            if !self.simulate_and_test_check(from, to) {
                debug!("{} 可以 {} -> {} 解除将军", player, from, to);
                return false;
            }
        }

        self.state = GameState::won_by(player.opponent());
        info!("{} 被将死，{} 获胜", player, player.opponent());
        true
    }
}
