//! 戦術パターン(フォーク、ピン)の検出。
//!
//! いずれも「指し手 `src` → `dst` で局面を進めた後、`dst` にある駒について条件が成り立つか」を見る。
//! 指し手適用の結果ごとに、利きや背後関係の束縛を入れ子で列挙する。

use crate::attack;
use crate::chess::*;
use crate::position::Position;
use crate::relation::different_pos;

/// フォークの束縛。指し手適用後の局面と、利いている 2 マス。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ForkBinding {
    pub position: Position,
    pub first: Square,
    pub second: Square,
}

/// ピンの束縛。指し手適用後の局面と、`dst` から見た手前のマスと奥のマス。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PinBinding {
    pub position: Position,
    pub middle: Square,
    pub back: Square,
}

/// 指し手の後、動いた駒が異なる 2 マスの敵駒に利いているかどうかを返す。
pub fn fork(pos: &Position, src: Square, dst: Square) -> bool {
    pos.make_move(src, dst).iter().any(|after| {
        let targets = attack::attacked_from(dst, after);
        targets
            .iter()
            .any(|&s1| targets.iter().any(|&s2| different_pos(s1, s2)))
    })
}

/// フォークの束縛を全て列挙する。(s1, s2) と (s2, s1) は別の束縛として得られる。
pub fn fork_bindings(pos: &Position, src: Square, dst: Square) -> Vec<ForkBinding> {
    let mut res = Vec::new();

    for after in pos.make_move(src, dst) {
        let targets = attack::attacked_from(dst, &after);
        for &first in &targets {
            for &second in &targets {
                if different_pos(first, second) {
                    res.push(ForkBinding {
                        position: after.clone(),
                        first,
                        second,
                    });
                }
            }
        }
    }

    res
}

/// 指し手の後、動いた駒が敵陣営の 2 駒と背後関係にあるかどうかを返す。
///
/// 背後関係は同一直線上であることを要求しないので、ピンとしては緩い判定になっている。
pub fn pin(pos: &Position, src: Square, dst: Square) -> bool {
    pos.make_move(src, dst).iter().any(|after| {
        attack::behind_pairs(dst, after)
            .into_iter()
            .any(|(middle, back)| is_pin_triple(after, dst, middle, back))
    })
}

/// ピンの束縛を全て列挙する。
pub fn pin_bindings(pos: &Position, src: Square, dst: Square) -> Vec<PinBinding> {
    let mut res = Vec::new();

    for after in pos.make_move(src, dst) {
        for (middle, back) in attack::behind_pairs(dst, &after) {
            if is_pin_triple(&after, dst, middle, back) {
                res.push(PinBinding {
                    position: after.clone(),
                    middle,
                    back,
                });
            }
        }
    }

    res
}

/// `front` の駒の陣営を S として、`middle` と `back` が異なり、かつ両方に S の敵陣営の駒があるか。
fn is_pin_triple(pos: &Position, front: Square, middle: Square, back: Square) -> bool {
    if !different_pos(middle, back) {
        return false;
    }

    pos.placements_at(front).any(|pl| {
        let them = pl.side().inv();
        pos.placements_at(middle).any(|m| m.side() == them)
            && pos.placements_at(back).any(|b| b.side() == them)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(side: Side, pk: PieceKind, sq: Square) -> Placement {
        Placement::new(side, pk, sq)
    }

    #[test]
    fn test_knight_fork() {
        let pos = Position::new([
            pl(WHITE, KNIGHT, SQ_B5),
            pl(BLACK, KING, SQ_E8),
            pl(BLACK, ROOK, SQ_A8),
        ]);

        assert!(fork(&pos, SQ_B5, SQ_C7));

        let bindings = fork_bindings(&pos, SQ_B5, SQ_C7);
        let pairs: Vec<_> = bindings.iter().map(|b| (b.first, b.second)).collect();
        assert_eq!(pairs, [(SQ_A8, SQ_E8), (SQ_E8, SQ_A8)]);

        // ナイトは遠隔駒ではない。
        assert!(!pin(&pos, SQ_B5, SQ_C7));
    }

    #[test]
    fn test_capture_then_no_fork() {
        let pos = Position::new([
            pl(WHITE, KNIGHT, SQ_G5),
            pl(BLACK, KING, SQ_F7),
            pl(BLACK, ROOK, SQ_H7),
        ]);

        assert!(!fork(&pos, SQ_G5, SQ_F7));
        assert!(fork_bindings(&pos, SQ_G5, SQ_F7).is_empty());
    }

    #[test]
    fn test_bishop_pin() {
        let pos = Position::new([
            pl(WHITE, BISHOP, SQ_C1),
            pl(BLACK, KNIGHT, SQ_F6),
            pl(BLACK, QUEEN, SQ_D8),
        ]);

        assert!(pin(&pos, SQ_C1, SQ_G5));

        let mut pairs: Vec<_> = pin_bindings(&pos, SQ_C1, SQ_G5)
            .into_iter()
            .map(|b| (b.middle, b.back))
            .collect();
        pairs.sort();
        assert_eq!(pairs, [(SQ_D8, SQ_F6), (SQ_F6, SQ_D8)]);

        // 不正な変位では何も起こらない。
        assert!(!pin(&pos, SQ_C1, SQ_C5));
        assert!(!fork(&pos, SQ_C1, SQ_C5));
    }
}
