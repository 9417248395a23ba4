//! 局面字符串解析和生成
//!
//! 格式：`<棋盘> <走子方>`
//!
//! 棋盘从第 10 行写到第 1 行，以 `/` 分隔，数字表示连续空格，
//! 红方大写、蓝方小写（k 将、a 士、b 象、n 马、r 车、c 包、p 兵）。
//! 走子方为 `r` 或 `b`，省略时为蓝方。
//!
//! 示例：
//! `rnba1abnr/4k4/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/4K4/RNBA1ABNR b`

use crate::board::Board;
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::JanggiError;
use crate::piece::{Piece, Player, Position};

/// 标准开局
pub const INITIAL_LAYOUT: &str = "rnba1abnr/4k4/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/4K4/RNBA1ABNR b";

/// 局面字符串处理
pub struct Layout;

impl Layout {
    /// 解析局面字符串为棋盘和走子方
    pub fn parse(layout: &str) -> Result<(Board, Player), JanggiError> {
        let parts: Vec<&str> = layout.split_whitespace().collect();
        let Some(board_str) = parts.first() else {
            return Err(invalid("Empty layout string"));
        };

        let board = Self::parse_board(board_str)?;

        let turn = match parts.get(1) {
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Player::from_layout_char), chars.next()) {
                    (Some(player), None) => player,
                    _ => return Err(invalid(format!("Invalid side to move: {}", side))),
                }
            }
            None => Player::Blue,
        };

        Ok((board, turn))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, JanggiError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_HEIGHT {
            return Err(invalid(format!("Expected {} rows, got {}", BOARD_HEIGHT, rows.len())));
        }

        // 从上到下是 row=9 到 row=0
        for (row_idx, row) in rows.iter().enumerate() {
            let y = (BOARD_HEIGHT - 1 - row_idx) as u8;
            let mut x = 0usize;

            for c in row.chars() {
                if x >= BOARD_WIDTH {
                    return Err(invalid(format!("Row {} has too many columns", row_idx)));
                }

                if let Some(empty_count) = c.to_digit(10) {
                    x += empty_count as usize;
                } else if let Some(piece) = Piece::from_layout_char(c) {
                    board.place(Position::new_unchecked(x as u8, y), piece);
                    x += 1;
                } else {
                    return Err(invalid(format!("Invalid piece character: {}", c)));
                }
            }

            if x != BOARD_WIDTH {
                return Err(invalid(format!(
                    "Row {} has {} columns, expected {}",
                    row_idx, x, BOARD_WIDTH
                )));
            }
        }

        Ok(board)
    }

    /// 将棋盘和走子方转换为局面字符串
    pub fn to_string(board: &Board, turn: Player) -> String {
        format!("{} {}", Self::board_to_string(board), turn.to_layout_char())
    }

    /// 将棋盘转换为局面字符串的棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_HEIGHT);

        for y in (0..BOARD_HEIGHT as u8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for x in 0..BOARD_WIDTH as u8 {
                if let Some(piece) = board.piece_at(Position::new_unchecked(x, y)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_layout_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }
}

fn invalid(reason: impl Into<String>) -> JanggiError {
    JanggiError::InvalidLayout {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    #[test]
    fn test_parse_initial_layout() {
        let (board, turn) = Layout::parse(INITIAL_LAYOUT).unwrap();

        assert_eq!(turn, Player::Blue);
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_layout_roundtrip() {
        let layout = "3k4R/R8/9/9/9/9/9/9/4K4/9 b";
        let (board, turn) = Layout::parse(layout).unwrap();
        assert_eq!(Layout::to_string(&board, turn), layout);
    }

    #[test]
    fn test_parse_custom_layout() {
        let (board, turn) = Layout::parse("4k4/9/9/9/9/9/9/9/9/4K4 r").unwrap();

        assert_eq!(turn, Player::Red);
        assert_eq!(board.find_general(Player::Red), Some(Position::new_unchecked(4, 0)));
        assert_eq!(board.find_general(Player::Blue), Some(Position::new_unchecked(4, 9)));
        assert_eq!(board.all_pieces().len(), 2);
    }

    #[test]
    fn test_default_side_is_blue() {
        let (board, turn) = Layout::parse("9/4k4/9/9/9/9/9/9/4K4/9").unwrap();
        assert_eq!(turn, Player::Blue);
        assert_eq!(
            board.piece_at(Position::new_unchecked(4, 8)),
            Some(Piece::new(PieceKind::General, Player::Blue))
        );
    }

    #[test]
    fn test_invalid_layout() {
        // 行数不对
        assert!(Layout::parse("4k4/9/9").is_err());
        // 列数不对
        assert!(Layout::parse("4k44/9/9/9/9/9/9/9/9/4K4 r").is_err());
        assert!(Layout::parse("4k3/9/9/9/9/9/9/9/9/4K4 r").is_err());
        // 无效字符
        assert!(Layout::parse("4x4/9/9/9/9/9/9/9/9/4K4 r").is_err());
        // 无效走子方
        assert!(Layout::parse("4k4/9/9/9/9/9/9/9/9/4K4 w").is_err());
        assert!(Layout::parse("").is_err());
    }
}
