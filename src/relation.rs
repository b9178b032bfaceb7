//! 局面によらない補助的な関係。

use crate::chess::*;

/// `s2` が `s1` の敵陣営かどうかを返す。
pub fn other_side(s1: Side, s2: Side) -> bool {
    s1.inv() == s2
}

/// 2 つのマスが異なる(筋と段の少なくとも一方が異なる)かどうかを返す。
pub fn different_pos(s1: Square, s2: Square) -> bool {
    s1.numbers() != s2.numbers()
}

/// `sq` と異なるマスを全て昇順に列挙する。
pub fn different_from(sq: Square) -> impl Iterator<Item = Square> {
    Square::iter().filter(move |&other| different_pos(sq, other))
}

/// 異なるマスの順序対を全て列挙する。64 * 63 組。
pub fn different_pos_pairs() -> impl Iterator<Item = (Square, Square)> {
    Square::iter().flat_map(|s1| different_from(s1).map(move |s2| (s1, s2)))
}
