//! 九宫几何
//!
//! 每方九宫为 d-f 列的三行。宫内斜线只有两条，交于中心点：
//! 斜走一步必须以中心为一端，四个角之间或边中点之间不能斜走。

use crate::constants::{BLUE_PALACE_ROWS, PALACE_COLUMNS, RED_PALACE_ROWS};
use crate::piece::{Player, Position};

/// 位置所属的九宫，不在九宫内返回 None
pub fn palace_of(pos: Position) -> Option<Player> {
    if !PALACE_COLUMNS.contains(&pos.col) {
        return None;
    }
    if RED_PALACE_ROWS.contains(&pos.row) {
        Some(Player::Red)
    } else if BLUE_PALACE_ROWS.contains(&pos.row) {
        Some(Player::Blue)
    } else {
        None
    }
}

/// 九宫中心
pub fn palace_center(player: Player) -> Position {
    match player {
        Player::Red => Position::new_unchecked(4, 1),
        Player::Blue => Position::new_unchecked(4, 8),
    }
}

/// 是否为同一九宫内沿宫线走一步
///
/// 直走一步只需两端在同一九宫；斜走一步还必须落在斜线上。
pub fn is_palace_step(from: Position, to: Position) -> bool {
    let palace = match (palace_of(from), palace_of(to)) {
        (Some(a), Some(b)) if a == b => a,
        _ => return false,
    };

    let (dc, dr) = from.delta(to);
    match (dc.abs(), dr.abs()) {
        (1, 0) | (0, 1) => true,
        (1, 1) => {
            let center = palace_center(palace);
            from == center || to == center
        }
        _ => false,
    }
}
