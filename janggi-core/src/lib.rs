//! 韩国象棋（Janggi）规则核心
//!
//! 包含:
//! - 棋子、棋盘、坐标等核心数据结构
//! - 九宫几何与路径阻挡规则
//! - 走法生成、将军与将死判定
//! - 对局控制（回合、终局状态）
//! - 局面文本格式（用于构造测试局面）

mod board;
mod check;
mod constants;
mod error;
mod game;
mod layout;
mod moves;
mod palace;
mod path;
mod piece;

pub use board::Board;
pub use constants::*;
pub use error::{JanggiError, Result};
pub use game::{Game, GameState, Move};
pub use layout::{Layout, INITIAL_LAYOUT};
pub use moves::MoveRule;
pub use palace::{is_palace_step, palace_of};
pub use piece::{Piece, PieceKind, Player, Position};
