//! 棋盘常量定义

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 10;

/// 格子总数
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 列字母（a-i 对应 0-8）
pub const COLUMN_LETTERS: [char; BOARD_WIDTH] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

/// 九宫列范围（d-f）
pub const PALACE_COLUMNS: std::ops::RangeInclusive<u8> = 3..=5;

/// 红方九宫行范围（第 1-3 行）
pub const RED_PALACE_ROWS: std::ops::RangeInclusive<u8> = 0..=2;

/// 蓝方九宫行范围（第 8-10 行）
pub const BLUE_PALACE_ROWS: std::ops::RangeInclusive<u8> = 7..=9;
