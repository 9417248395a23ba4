//! 交互命令解析

use std::str::FromStr;

use anyhow::{anyhow, bail, Error};
use janggi_core::Position;

/// 用户输入的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 走子，起点终点相同为停着
    Move { from: Position, to: Position },
    /// 查看某格棋子的合法目标
    Moves(Position),
    /// 重新显示棋盘
    Board,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            ["board"] => Ok(Command::Board),
            ["help"] | ["?"] => Ok(Command::Help),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            ["moves", square] => Ok(Command::Moves(parse_square(square)?)),
            [from, to] => Ok(Command::Move {
                from: parse_square(from)?,
                to: parse_square(to)?,
            }),
            [] => bail!("empty command"),
            _ => bail!("unknown command: {}", line.trim()),
        }
    }
}

fn parse_square(s: &str) -> anyhow::Result<Position> {
    s.parse::<Position>().map_err(|e| anyhow!(e))
}

/// 帮助文本
pub const HELP: &str = "\
commands:
  <from> <to>   move a piece, e.g. `e7 e6` (same square twice passes)
  moves <sq>    list legal destinations of the piece on <sq>
  board         print the board
  help          show this message
  quit          leave the game";

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(col: u8, row: u8) -> Position {
        Position::new_unchecked(col, row)
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            "e7 e6".parse::<Command>().unwrap(),
            Command::Move { from: pos(4, 6), to: pos(4, 5) }
        );
        assert_eq!(
            "  a10   a10 ".parse::<Command>().unwrap(),
            Command::Move { from: pos(0, 9), to: pos(0, 9) }
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("board".parse::<Command>().unwrap(), Command::Board);
        assert_eq!("help".parse::<Command>().unwrap(), Command::Help);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("moves b1".parse::<Command>().unwrap(), Command::Moves(pos(1, 0)));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("e7".parse::<Command>().is_err());
        assert!("e7 e11".parse::<Command>().is_err());
        assert!("moves".parse::<Command>().is_err());
        assert!("fly e7 e6".parse::<Command>().is_err());
    }
}
