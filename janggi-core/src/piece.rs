//! 棋子与坐标定义

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH, COLUMN_LETTERS};
use crate::error::JanggiError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 兵/卒
    Soldier,
    /// 将（漢/楚）
    General,
    /// 士
    Guard,
    /// 马
    Horse,
    /// 象
    Elephant,
    /// 包
    Cannon,
    /// 车
    Chariot,
}

impl PieceKind {
    /// 获取局面字符（红方大写，蓝方小写）
    pub fn to_layout_char(&self, player: Player) -> char {
        let c = match self {
            PieceKind::Soldier => 'p',
            PieceKind::General => 'k',
            PieceKind::Guard => 'a',
            PieceKind::Horse => 'n',
            PieceKind::Elephant => 'b',
            PieceKind::Cannon => 'c',
            PieceKind::Chariot => 'r',
        };
        match player {
            Player::Red => c.to_ascii_uppercase(),
            Player::Blue => c,
        }
    }

    /// 从局面字符解析
    pub fn from_layout_char(c: char) -> Option<(PieceKind, Player)> {
        let player = if c.is_ascii_uppercase() {
            Player::Red
        } else {
            Player::Blue
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Soldier,
            'k' => PieceKind::General,
            'a' => PieceKind::Guard,
            'n' => PieceKind::Horse,
            'b' => PieceKind::Elephant,
            'c' => PieceKind::Cannon,
            'r' => PieceKind::Chariot,
            _ => return None,
        };
        Some((kind, player))
    }
}

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 红方（漢，在下方，行号小）
    Red,
    /// 蓝方（楚，在上方，先手）
    Blue,
}

impl Player {
    /// 获取对方
    pub fn opponent(&self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// 前进方向的行增量
    pub fn forward(&self) -> i8 {
        match self {
            Player::Red => 1,
            Player::Blue => -1,
        }
    }

    /// 按玩家索引的表下标
    pub fn index(&self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }

    /// 获取局面字符
    pub fn to_layout_char(&self) -> char {
        match self {
            Player::Red => 'r',
            Player::Blue => 'b',
        }
    }

    /// 从局面字符解析
    pub fn from_layout_char(c: char) -> Option<Player> {
        match c {
            'r' | 'R' => Some(Player::Red),
            'b' | 'B' => Some(Player::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "RED"),
            Player::Blue => write!(f, "BLUE"),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
}

impl Piece {
    /// 创建新棋子
    pub fn new(kind: PieceKind, player: Player) -> Self {
        Self { kind, player }
    }

    /// 三字符 ASCII 标记
    pub fn marker(&self) -> &'static str {
        match self.kind {
            PieceKind::Soldier => " S ",
            PieceKind::General => " G ",
            PieceKind::Guard => "GRD",
            PieceKind::Horse => " H ",
            PieceKind::Elephant => " E ",
            PieceKind::Cannon => " C ",
            PieceKind::Chariot => "CHT",
        }
    }

    /// 获取棋子显示的汉字
    pub fn display_char(&self) -> char {
        match (self.kind, self.player) {
            (PieceKind::General, Player::Red) => '漢',
            (PieceKind::General, Player::Blue) => '楚',
            (PieceKind::Soldier, Player::Red) => '兵',
            (PieceKind::Soldier, Player::Blue) => '卒',
            (PieceKind::Guard, _) => '士',
            (PieceKind::Elephant, _) => '象',
            (PieceKind::Horse, _) => '馬',
            (PieceKind::Chariot, _) => '車',
            (PieceKind::Cannon, _) => '包',
        }
    }

    /// 获取局面字符
    pub fn to_layout_char(&self) -> char {
        self.kind.to_layout_char(self.player)
    }

    /// 从局面字符解析
    pub fn from_layout_char(c: char) -> Option<Piece> {
        PieceKind::from_layout_char(c).map(|(kind, player)| Piece { kind, player })
    }

    pub fn is_ally(&self, other: &Piece) -> bool {
        self.player == other.player
    }
}

/// 棋盘坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 列 (0-8，对应 a-i)
    pub col: u8,
    /// 行 (0-9，对应 1-10)
    pub row: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(col: u8, row: u8) -> Option<Self> {
        if (col as usize) < BOARD_WIDTH && (row as usize) < BOARD_HEIGHT {
            Some(Self { col, row })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.col as usize) < BOARD_WIDTH && (self.row as usize) < BOARD_HEIGHT
    }

    /// 获取偏移后的位置，出界返回 None
    pub fn offset(&self, dc: i8, dr: i8) -> Option<Position> {
        let col = self.col as i8 + dc;
        let row = self.row as i8 + dr;
        if col >= 0 && (col as usize) < BOARD_WIDTH && row >= 0 && (row as usize) < BOARD_HEIGHT {
            Some(Position {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// 到目标的 (列差, 行差)
    pub fn delta(&self, to: Position) -> (i8, i8) {
        (to.col as i8 - self.col as i8, to.row as i8 - self.row as i8)
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE {
            Some(Position {
                col: (index % BOARD_WIDTH) as u8,
                row: (index / BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }

    /// 遍历棋盘上所有位置
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).filter_map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COLUMN_LETTERS[self.col as usize], self.row + 1)
    }
}

impl FromStr for Position {
    type Err = JanggiError;

    /// 解析代数记法，如 "a1"、"e9"、"i10"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || JanggiError::InvalidNotation(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let col = COLUMN_LETTERS
            .iter()
            .position(|&c| c == letter)
            .ok_or_else(invalid)?;
        // 行号只允许不带前导零的数字
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let rank: u8 = digits.parse().map_err(|_| invalid())?;
        Position::new(col as u8, rank - 1).ok_or_else(invalid)
    }
}
