//! 错误类型定义

use thiserror::Error;

/// 规则错误
///
/// `Game::attempt_move` 只返回布尔值，需要拒绝原因时使用 `Game::try_move`。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JanggiError {
    /// 无法解析的坐标记法
    #[error("Invalid notation: {0:?}")]
    InvalidNotation(String),

    /// 起点没有棋子
    #[error("No piece at {0}")]
    NoPiece(String),

    /// 不是该方的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 目标不在棋子的合法走法中
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    /// 走法会让己方将被将军
    #[error("Move would leave the general in check")]
    LeavesGeneralInCheck,

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的局面字符串
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, JanggiError>;
