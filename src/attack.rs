//! 利き関係、および遠隔駒による「背後」関係。
//!
//! ここでの利きは変位テーブルのみで判定する。攻撃側のマスと攻撃される側のマスの間に
//! 駒があっても利きは遮られない。
//!
//! 各関係は自由な引数について全ての束縛を列挙する。局面が同じマスに複数の配置を含む場合、
//! 同じ束縛が配置の組ごとに重複して得られることがある(重複は除かない)。

use crate::chess::*;
use crate::geometry;
use crate::position::Position;

/// `src` にある駒が `dst` にある敵駒に利いているかどうかを返す。
pub fn attacks(src: Square, dst: Square, pos: &Position) -> bool {
    pos.placements_at(src).any(|attacker| {
        pos.placements_at(dst)
            .any(|target| is_attack(attacker, target))
    })
}

/// `src` にある駒が利いている敵駒のマスを全て列挙する。
pub fn attacked_from(src: Square, pos: &Position) -> Vec<Square> {
    let mut res = Vec::new();

    for attacker in pos.placements_at(src) {
        res.extend(
            pos.placements()
                .iter()
                .filter(|&&target| is_attack(attacker, target))
                .map(|target| target.square()),
        );
    }

    res
}

/// 局面内の (攻撃側のマス, 攻撃される側のマス) の組を全て列挙する。
pub fn attack_pairs(pos: &Position) -> Vec<(Square, Square)> {
    let mut res = Vec::new();

    for &attacker in pos.placements() {
        res.extend(
            pos.placements()
                .iter()
                .filter(|&&target| is_attack(attacker, target))
                .map(|target| (attacker.square(), target.square())),
        );
    }

    res
}

/// `front` にある遠隔駒が `middle`, `back` の両方に利いているかどうかを返す。
///
/// 名前に反して `middle` と `back` が `front` から見て同一直線上にあることは要求しない。
/// たとえば斜めと縦の両方に利いているクイーンも条件を満たす。
/// また `middle == back` も許される。
pub fn behind(front: Square, middle: Square, back: Square, pos: &Position) -> bool {
    is_sliding_at(front, pos) && attacks(front, middle, pos) && attacks(front, back, pos)
}

/// `front` について `behind()` を満たす (middle, back) の組を全て列挙する。
pub fn behind_pairs(front: Square, pos: &Position) -> Vec<(Square, Square)> {
    if !is_sliding_at(front, pos) {
        return Vec::new();
    }

    let targets = attacked_from(front, pos);

    let mut res = Vec::with_capacity(targets.len() * targets.len());
    for &middle in &targets {
        for &back in &targets {
            res.push((middle, back));
        }
    }

    res
}

/// `attacker` が `target` に利いているかどうかを返す。
fn is_attack(attacker: Placement, target: Placement) -> bool {
    target.side() == attacker.side().inv()
        && geometry::can_move(attacker.kind(), attacker.square(), target.square())
}

/// 指定したマスに遠隔駒があるかどうかを返す。
fn is_sliding_at(sq: Square, pos: &Position) -> bool {
    pos.placements_at(sq).any(|pl| pl.kind().is_sliding())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(side: Side, pk: PieceKind, sq: Square) -> Placement {
        Placement::new(side, pk, sq)
    }

    #[test]
    fn test_attacks_requires_enemy() {
        let pos = Position::new([
            pl(WHITE, ROOK, SQ_A1),
            pl(WHITE, KNIGHT, SQ_A5),
            pl(BLACK, KNIGHT, SQ_H1),
        ]);

        assert!(attacks(SQ_A1, SQ_H1, &pos));
        assert!(!attacks(SQ_A1, SQ_A5, &pos));
        // 空きマスには利きの関係は成立しない。
        assert!(!attacks(SQ_A1, SQ_A8, &pos));
        // 駒のないマスからは利かない。
        assert!(!attacks(SQ_B2, SQ_H1, &pos));
    }

    #[test]
    fn test_attacked_from() {
        let pos = Position::new([
            pl(WHITE, QUEEN, SQ_D4),
            pl(BLACK, PAWN, SQ_D7),
            pl(BLACK, PAWN, SQ_G7),
            pl(BLACK, PAWN, SQ_E6),
        ]);

        let mut sqs = attacked_from(SQ_D4, &pos);
        sqs.sort();
        assert_eq!(sqs, [SQ_D7, SQ_G7]);

        // ポーンは何にも利かない。
        assert!(attacked_from(SQ_E6, &pos).is_empty());
    }

    #[test]
    fn test_attack_pairs() {
        let pos = Position::new([pl(WHITE, KING, SQ_E4), pl(BLACK, KING, SQ_E5)]);

        let mut pairs = attack_pairs(&pos);
        pairs.sort();
        assert_eq!(pairs, [(SQ_E4, SQ_E5), (SQ_E5, SQ_E4)]);
    }

    #[test]
    fn test_behind_requires_sliding() {
        let pos = Position::new([
            pl(WHITE, KNIGHT, SQ_D4),
            pl(BLACK, ROOK, SQ_E6),
            pl(BLACK, QUEEN, SQ_C6),
        ]);

        assert!(attacks(SQ_D4, SQ_E6, &pos));
        assert!(attacks(SQ_D4, SQ_C6, &pos));
        assert!(!behind(SQ_D4, SQ_E6, SQ_C6, &pos));
        assert!(behind_pairs(SQ_D4, &pos).is_empty());
    }

    #[test]
    fn test_behind_pairs() {
        let pos = Position::new([
            pl(WHITE, BISHOP, SQ_G5),
            pl(BLACK, KNIGHT, SQ_F6),
            pl(BLACK, QUEEN, SQ_D8),
        ]);

        let mut pairs = behind_pairs(SQ_G5, &pos);
        pairs.sort();
        assert_eq!(
            pairs,
            [
                (SQ_D8, SQ_D8),
                (SQ_D8, SQ_F6),
                (SQ_F6, SQ_D8),
                (SQ_F6, SQ_F6),
            ]
        );
        assert!(behind(SQ_G5, SQ_F6, SQ_D8, &pos));
    }
}
