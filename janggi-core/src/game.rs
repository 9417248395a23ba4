//! 对局控制
//!
//! 负责回合轮换、终局状态和走法缓存。将军/将死判定见 `check` 模块。

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::{JanggiError, Result};
use crate::layout::Layout;
use crate::moves::MoveRule;
use crate::palace::palace_of;
use crate::piece::{Piece, PieceKind, Player, Position};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Unfinished,
    RedWon,
    BlueWon,
}

impl GameState {
    /// 指定玩家获胜的状态
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::Red => GameState::RedWon,
            Player::Blue => GameState::BlueWon,
        }
    }

    /// 获胜方，未结束返回 None
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::Unfinished => None,
            GameState::RedWon => Some(Player::Red),
            GameState::BlueWon => Some(Player::Blue),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Unfinished => write!(f, "UNFINISHED"),
            GameState::RedWon => write!(f, "RED_WON"),
            GameState::BlueWon => write!(f, "BLUE_WON"),
        }
    }
}

/// 已执行的走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 起点终点相同即为停着
    pub fn is_pass(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法缓存，每次提交走法或撤销模拟后整体重算
#[derive(Debug, Clone)]
pub(crate) struct MoveCache {
    /// 按格子索引的棋子合法目标
    pub(crate) by_square: Vec<Vec<Position>>,
    /// 按玩家汇总的可达格子
    pub(crate) by_player: [HashSet<Position>; 2],
}

impl MoveCache {
    fn empty() -> Self {
        Self {
            by_square: vec![Vec::new(); BOARD_SIZE],
            by_player: [HashSet::new(), HashSet::new()],
        }
    }
}

/// 韩国象棋对局
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) turn: Player,
    pub(crate) state: GameState,
    /// 双方将的位置，按 `Player::index` 索引
    pub(crate) generals: [Option<Position>; 2],
    pub(crate) moves: MoveCache,
}

impl Game {
    /// 标准开局，蓝方先走
    pub fn new() -> Self {
        let board = Board::initial();
        let generals = [
            board.find_general(Player::Red),
            board.find_general(Player::Blue),
        ];
        let mut game = Self {
            board,
            turn: Player::Blue,
            state: GameState::Unfinished,
            generals,
            moves: MoveCache::empty(),
        };
        game.refresh_moves();
        game
    }

    /// 从任意棋盘创建对局
    ///
    /// 每方必须恰好有一个将且位于己方九宫，非走子方不能处于被将军状态。
    pub fn from_board(board: Board, turn: Player) -> Result<Self> {
        let mut generals = [None, None];
        for player in [Player::Red, Player::Blue] {
            let positions: Vec<Position> = board
                .pieces(player)
                .into_iter()
                .filter(|(_, piece)| piece.kind == PieceKind::General)
                .map(|(pos, _)| pos)
                .collect();

            let general = match positions.as_slice() {
                [pos] => *pos,
                _ => {
                    return Err(JanggiError::InvalidLayout {
                        reason: format!("{} must have exactly one general, found {}", player, positions.len()),
                    })
                }
            };
            if palace_of(general) != Some(player) {
                return Err(JanggiError::InvalidLayout {
                    reason: format!("{} general at {} is outside its palace", player, general),
                });
            }
            generals[player.index()] = Some(general);
        }

        let mut game = Self {
            board,
            turn,
            state: GameState::Unfinished,
            generals,
            moves: MoveCache::empty(),
        };
        game.refresh_moves();

        if game.is_in_check(turn.opponent()) {
            return Err(JanggiError::InvalidLayout {
                reason: format!("{} is in check but it is {}'s turn", turn.opponent(), turn),
            });
        }
        Ok(game)
    }

    /// 从局面字符串创建对局
    pub fn from_layout(layout: &str) -> Result<Self> {
        let (board, turn) = Layout::parse(layout)?;
        Self::from_board(board, turn)
    }

    /// 当前局面字符串
    pub fn layout(&self) -> String {
        Layout::to_string(&self.board, self.turn)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Player {
        self.turn
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.piece_at(pos)
    }

    /// 指定格子上棋子的合法目标（空格返回空）
    pub fn legal_moves(&self, pos: Position) -> &[Position] {
        &self.moves.by_square[pos.to_index()]
    }

    pub fn general_position(&self, player: Player) -> Option<Position> {
        self.generals[player.index()]
    }

    /// 走子，坐标为代数记法（如 "e7" -> "e6"）
    ///
    /// 起点终点相同表示停着。任何原因被拒绝都返回 false 且不改变局面。
    pub fn make_move(&mut self, from: &str, to: &str) -> bool {
        match (from.parse::<Position>(), to.parse::<Position>()) {
            (Ok(from), Ok(to)) => self.attempt_move(from, to),
            (Err(e), _) | (_, Err(e)) => {
                debug!("拒绝走法 {} -> {}: {}", from, to, e);
                false
            }
        }
    }

    /// 走子，返回是否成功
    pub fn attempt_move(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// 走子，失败时返回原因
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Move> {
        let result = self.apply_move(from, to);
        match &result {
            Ok(mv) if mv.is_pass() => debug!("{} 停着", self.turn.opponent()),
            Ok(mv) => debug!("{} 走子 {}", self.turn.opponent(), mv),
            Err(e) => debug!("拒绝走法 {} -> {}: {}", from, to, e),
        }
        result
    }

    fn apply_move(&mut self, from: Position, to: Position) -> Result<Move> {
        if self.state != GameState::Unfinished {
            return Err(JanggiError::GameOver);
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or_else(|| JanggiError::NoPiece(from.to_string()))?;
        if piece.player != self.turn {
            return Err(JanggiError::NotYourTurn);
        }

        if from == to {
            self.end_turn();
            return Ok(Move { from, to, captured: None });
        }

        let legal = piece.legal_moves(from, &self.board);
        let is_legal = legal.contains(&to);
        self.moves.by_square[from.to_index()] = legal;
        if !is_legal {
            return Err(JanggiError::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        if self.simulate_and_test_check(from, to) {
            return Err(JanggiError::LeavesGeneralInCheck);
        }

        let captured = self.board.move_piece(from, to);
        if piece.kind == PieceKind::General {
            self.generals[piece.player.index()] = Some(to);
        }
        if let Some(victim) = captured.filter(|p| p.kind == PieceKind::General) {
            // 吃将直接获胜
            self.generals[victim.player.index()] = None;
            self.state = GameState::won_by(piece.player);
            info!("{} 的将被吃，{} 获胜", victim.player, piece.player);
        }
        self.end_turn();

        Ok(Move { from, to, captured })
    }

    /// 交换走子方；新走子方被将军时检查是否将死
    fn end_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.refresh_moves();
        if self.state == GameState::Unfinished && self.is_in_check(self.turn) {
            info!("{} 被将军", self.turn);
            self.determine_checkmate(self.turn);
        }
        self.refresh_moves();
    }

    /// 重算所有棋子的合法目标
    pub(crate) fn refresh_moves(&mut self) {
        let mut cache = MoveCache::empty();
        for (pos, piece) in self.board.all_pieces() {
            let targets = piece.legal_moves(pos, &self.board);
            cache.by_player[piece.player.index()].extend(targets.iter().copied());
            cache.by_square[pos.to_index()] = targets;
        }
        self.moves = cache;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(col: u8, row: u8) -> Position {
        Position::new_unchecked(col, row)
    }

    /// 记录全部格子内容，用于比较拒绝前后的局面
    fn snapshot(game: &Game) -> Vec<Option<Piece>> {
        Position::all().map(|p| game.piece_at(p)).collect()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.game_state(), GameState::Unfinished);
        assert_eq!(game.current_turn(), Player::Blue);
        assert_eq!(game.general_position(Player::Red), Some(pos(4, 1)));
        assert_eq!(game.general_position(Player::Blue), Some(pos(4, 8)));
        assert!(!game.is_in_check(Player::Red));
        assert!(!game.is_in_check(Player::Blue));
    }

    #[test]
    fn test_blue_soldier_advances() {
        let mut game = Game::new();
        let soldier = game.piece_at(pos(4, 6));

        assert!(game.make_move("e7", "e6"));
        assert_eq!(game.piece_at(pos(4, 5)), soldier);
        assert!(game.piece_at(pos(4, 6)).is_none());
        assert_eq!(game.current_turn(), Player::Red);
        assert_eq!(game.game_state(), GameState::Unfinished);
    }

    #[test]
    fn test_initial_legal_moves() {
        let game = Game::new();

        let mut soldier = game.legal_moves(pos(4, 6)).to_vec();
        soldier.sort();
        assert_eq!(soldier, vec![pos(3, 6), pos(4, 5), pos(5, 6)]);

        let mut horse = game.legal_moves(pos(1, 0)).to_vec();
        horse.sort();
        assert_eq!(horse, vec![pos(0, 2), pos(2, 2)]);

        // 象被士、兵、包围住
        assert!(game.legal_moves(pos(2, 0)).is_empty());
        // 开局包没有炮架
        assert!(game.legal_moves(pos(1, 2)).is_empty());
        assert!(game.legal_moves(pos(4, 4)).is_empty());
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let mut game = Game::new();
        let before = snapshot(&game);

        // 蓝方先走，红兵不能动
        assert_eq!(
            game.try_move(pos(4, 3), pos(4, 4)),
            Err(JanggiError::NotYourTurn)
        );
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.current_turn(), Player::Blue);
    }

    #[test]
    fn test_empty_square_rejected() {
        let mut game = Game::new();
        assert!(matches!(
            game.try_move(pos(4, 4), pos(4, 5)),
            Err(JanggiError::NoPiece(_))
        ));
        assert!(!game.make_move("e5", "e5"));
        assert_eq!(game.current_turn(), Player::Blue);
    }

    #[test]
    fn test_bad_notation_rejected() {
        let mut game = Game::new();
        assert!(!game.make_move("z7", "e6"));
        assert!(!game.make_move("e7", "e11"));
        assert_eq!(game.current_turn(), Player::Blue);
    }

    #[test]
    fn test_general_cannot_move_two_squares() {
        let mut game = Game::new();
        assert!(game.make_move("e9", "e9"));
        assert_eq!(game.current_turn(), Player::Red);

        let before = snapshot(&game);
        assert!(matches!(
            game.try_move(pos(4, 1), pos(6, 1)),
            Err(JanggiError::IllegalMove { .. })
        ));
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.current_turn(), Player::Red);
    }

    #[test]
    fn test_pass_flips_turn_only() {
        let mut game = Game::new();
        let before = snapshot(&game);

        let mv = game.try_move(pos(0, 6), pos(0, 6)).unwrap();
        assert!(mv.is_pass());
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.current_turn(), Player::Red);

        assert!(game.make_move("a4", "a4"));
        assert_eq!(game.current_turn(), Player::Blue);
    }

    #[test]
    fn test_capture() {
        // 红车沿 a 列吃蓝兵
        let mut game = Game::from_layout("3k5/9/9/p8/9/9/9/9/4K4/R8 r").unwrap();
        let mv = game.try_move(pos(0, 0), pos(0, 6)).unwrap();

        assert_eq!(mv.captured, Some(Piece::new(PieceKind::Soldier, Player::Blue)));
        assert_eq!(game.board().pieces(Player::Blue).len(), 1);
        assert_eq!(game.current_turn(), Player::Blue);
    }

    #[test]
    fn test_move_into_check_rejected() {
        // 蓝士被红车牵制在 e 列
        let mut game = Game::from_layout("9/4k4/4a4/9/9/4R4/9/9/9/3K5 b").unwrap();
        let before = snapshot(&game);

        assert_eq!(
            game.try_move(pos(4, 7), pos(3, 7)),
            Err(JanggiError::LeavesGeneralInCheck)
        );
        assert!(!game.make_move("e8", "f8"));
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.current_turn(), Player::Blue);

        // 将离开 e 列可以
        assert!(game.make_move("e9", "d9"));
        assert_eq!(game.general_position(Player::Blue), Some(pos(3, 8)));
    }

    #[test]
    fn test_chariot_checkmate() {
        // 红车 a9 封住第 9 行，另一车上到第 10 行将军
        let mut game = Game::from_layout("3k5/R8/9/9/8R/9/9/9/4K4/9 r").unwrap();

        assert!(game.make_move("i6", "i10"));
        assert!(game.is_in_check(Player::Blue));
        assert_eq!(game.game_state(), GameState::RedWon);
        assert_eq!(game.game_state().winner(), Some(Player::Red));

        // 终局后不再接受任何走法
        assert_eq!(game.try_move(pos(3, 9), pos(3, 9)), Err(JanggiError::GameOver));
        assert!(!game.make_move("d10", "e10"));
        assert_eq!(game.game_state(), GameState::RedWon);
    }

    #[test]
    fn test_check_with_escape_is_not_mate() {
        let mut game = Game::from_layout("3k5/9/9/9/8R/9/9/9/4K4/9 r").unwrap();

        assert!(game.make_move("i6", "i10"));
        assert!(game.is_in_check(Player::Blue));
        assert_eq!(game.game_state(), GameState::Unfinished);

        // 逃到 d9
        assert!(game.make_move("d10", "d9"));
        assert!(!game.is_in_check(Player::Blue));
    }

    #[test]
    fn test_pass_while_in_check() {
        let mut game = Game::from_layout("3k5/9/9/9/8R/9/9/9/4K4/9 r").unwrap();
        assert!(game.make_move("i6", "i10"));
        assert!(game.is_in_check(Player::Blue));

        // 被将军时停着同样只交换走子方
        let before = snapshot(&game);
        let mv = game.try_move(pos(3, 9), pos(3, 9)).unwrap();
        assert!(mv.is_pass());
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.current_turn(), Player::Red);
        assert_eq!(game.game_state(), GameState::Unfinished);
    }

    #[test]
    fn test_capturing_general_ends_game() {
        let mut game = Game::from_layout("3k5/9/9/9/8R/9/9/9/4K4/9 r").unwrap();
        assert!(game.make_move("i6", "i10"));
        assert!(game.make_move("d10", "d10"));

        let mv = game.try_move(pos(8, 9), pos(3, 9)).unwrap();
        assert_eq!(mv.captured, Some(Piece::new(PieceKind::General, Player::Blue)));
        assert_eq!(game.general_position(Player::Blue), None);
        assert!(!game.is_in_check(Player::Blue));
        assert_eq!(game.game_state(), GameState::RedWon);
        assert_eq!(game.try_move(pos(4, 1), pos(4, 1)), Err(JanggiError::GameOver));
    }

    #[test]
    fn test_check_blocked_by_interposition() {
        // 蓝车可以挡在将前面
        let mut game = Game::from_layout("3k5/R8/9/9/8R/9/9/9/4K4/5r3 r").unwrap();

        assert!(game.make_move("i6", "i10"));
        assert!(game.is_in_check(Player::Blue));
        assert_eq!(game.game_state(), GameState::Unfinished);

        assert!(game.make_move("f1", "f10"));
        assert!(!game.is_in_check(Player::Blue));
    }

    #[test]
    fn test_caches_match_board_after_moves() {
        let mut game = Game::new();
        assert!(game.make_move("e7", "e6"));
        assert!(game.make_move("c4", "c5"));
        assert!(game.make_move("b10", "c8"));

        for p in Position::all() {
            let expected = match game.piece_at(p) {
                Some(piece) => piece.legal_moves(p, game.board()),
                None => Vec::new(),
            };
            assert_eq!(game.legal_moves(p), expected.as_slice(), "cache at {p}");
        }
    }

    #[test]
    fn test_from_board_validation() {
        // 缺少蓝将
        assert!(Game::from_layout("9/9/9/9/9/9/9/9/4K4/9 b").is_err());
        // 两个红将
        assert!(Game::from_layout("9/4k4/9/9/9/9/9/9/4K4/3K5 b").is_err());
        // 将不在九宫
        assert!(Game::from_layout("9/4k4/9/9/9/4K4/9/9/9/9 b").is_err());
        // 轮到红方时蓝方已被将军
        assert!(Game::from_layout("9/4k4/9/9/9/4R4/9/9/4K4/9 r").is_err());
    }

    #[test]
    fn test_layout_of_new_game() {
        let game = Game::new();
        assert_eq!(game.layout(), crate::layout::INITIAL_LAYOUT);
    }
}
