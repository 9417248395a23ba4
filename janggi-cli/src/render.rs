//! 棋盘文本渲染
//!
//! 渲染只依赖传入的对局和选项，不修改任何全局终端状态。

use janggi_core::{Game, Piece, Player, Position, BOARD_HEIGHT, BOARD_WIDTH, COLUMN_LETTERS};

use crate::config::MarkerStyle;

const RED_STYLE: &str = "\x1b[1;33;41m";
const BLUE_STYLE: &str = "\x1b[1;33;44m";
const RESET: &str = "\x1b[m";

/// 渲染选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// 使用 ANSI 颜色区分双方
    pub color: bool,
    pub markers: MarkerStyle,
}

/// 将棋盘渲染为多行文本，第 10 行在上
///
/// 不使用颜色时蓝方的 ASCII 标记为小写，汉字标记前加 `r`/`b` 区分双方。
pub fn render_board(game: &Game, options: &RenderOptions) -> String {
    let mut lines = Vec::with_capacity(BOARD_HEIGHT * 2);

    for row in (0..BOARD_HEIGHT as u8).rev() {
        let mut line = format!("{:>2}", row + 1);
        for col in 0..BOARD_WIDTH as u8 {
            let cell = game.piece_at(Position::new_unchecked(col, row));
            line.push_str(&render_cell(cell, options));
            if (col as usize) < BOARD_WIDTH - 1 {
                line.push_str("--");
            }
        }
        lines.push(line.trim_end().to_string());

        if row > 0 {
            lines.push(connector_line(row));
        }
    }

    let footer: Vec<String> = COLUMN_LETTERS.iter().map(|c| c.to_string()).collect();
    lines.push(format!("   {}", footer.join("    ")));

    lines.join("\n")
}

/// 单个格子，固定占三列
fn render_cell(cell: Option<Piece>, options: &RenderOptions) -> String {
    let Some(piece) = cell else {
        return "   ".to_string();
    };

    let text = match options.markers {
        MarkerStyle::Ascii if !options.color && piece.player == Player::Blue => {
            piece.marker().to_lowercase()
        }
        MarkerStyle::Ascii => piece.marker().to_string(),
        MarkerStyle::Hanja if !options.color => {
            format!("{}{}", piece.player.to_layout_char(), piece.display_char())
        }
        MarkerStyle::Hanja => format!(" {}", piece.display_char()),
    };

    if options.color {
        let style = match piece.player {
            Player::Red => RED_STYLE,
            Player::Blue => BLUE_STYLE,
        };
        format!("{}{}{}", style, text, RESET)
    } else {
        text
    }
}

/// `row` 与 `row - 1` 之间的连线，九宫内画出斜线
fn connector_line(row: u8) -> String {
    // 斜线从九宫中心向外张开："\ /" 在中心上方，"/ \" 在中心下方
    let (left, right) = match row {
        2 | 9 => (" \\  ", "  / "),
        1 | 8 => (" /  ", "  \\ "),
        _ => ("    ", "    "),
    };

    let mut line = String::from("   |");
    for col in 1..BOARD_WIDTH {
        line.push_str(match col {
            4 => left,
            5 => right,
            _ => "    ",
        });
        line.push('|');
    }
    line
}
