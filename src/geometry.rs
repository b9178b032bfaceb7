//! 駒種ごとの変位テーブル。**プログラム起動直後に `init()` で初期化しておくとよい**。
//!
//! 初期化前にアクセスしても自動で初期化されるので、`init()` を呼ばなくても正しく動作する。
//!
//! テーブルは「空の盤面において、その駒が `(筋の差, 段の差)` だけ動けるか」のみを表す。
//! 途中のマスに駒があるかどうかは一切考慮しない。遠隔駒の利きも盤端までの半直線を計算するのではなく、
//! 距離 1..=7 の変位を全て列挙したものとして持つ。
//! したがって、テーブルに含まれることは経路が空いていることを意味しない。
//!
//! ポーンの変位は定義しない。ポーンは動けず、何も攻撃しない。

use arrayvec::ArrayVec;
use once_cell::sync::OnceCell;

use crate::chess::*;

/// ある駒種の変位の個数の上限。クイーンの 8 方向 * 7 マスが最多。
pub const MAX_DISPLACEMENTS: usize = 56;

/// 変位 (筋の差, 段の差)。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Delta {
    pub file: i32,
    pub rank: i32,
}

impl Delta {
    pub const fn new(file: i32, rank: i32) -> Self {
        Self { file, rank }
    }

    /// 2 マス間の変位を返す。
    pub fn between(src: Square, dst: Square) -> Self {
        let (file, rank) = src.delta_to(dst);
        Self { file, rank }
    }
}

/// 変位の配列。
pub type DeltaArray = ArrayVec<Delta, MAX_DISPLACEMENTS>;

// 変位の各成分は -7..=7 の範囲に収まるので、7 を足して添字にする。
const DELTA_WIDTH: usize = 15;

type DisplacementTable = [DeltaArray; PieceKind::NUM];
type MembershipTable = [[[bool; DELTA_WIDTH]; DELTA_WIDTH]; PieceKind::NUM];

static DISPLACEMENTS: OnceCell<DisplacementTable> = OnceCell::new();
static MEMBERSHIP: OnceCell<MembershipTable> = OnceCell::new();

const KNIGHT_DELTAS: [Delta; 8] = [
    Delta::new(1, 2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(1, -2),
    Delta::new(-1, -2),
    Delta::new(-2, -1),
    Delta::new(-2, 1),
    Delta::new(-1, 2),
];

const DIAGONAL_DIRS: [Delta; 4] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, -1),
    Delta::new(-1, 1),
];

const ORTHOGONAL_DIRS: [Delta; 4] = [
    Delta::new(0, 1),
    Delta::new(1, 0),
    Delta::new(0, -1),
    Delta::new(-1, 0),
];

/// 変位テーブルたちを初期化する。
pub fn init() {
    // MEMBERSHIP は DISPLACEMENTS から作られる。
    DISPLACEMENTS.get_or_init(init_displacements);
    MEMBERSHIP.get_or_init(init_membership);
}

/// 指定した駒種の変位を全て返す。ポーンなら空。
pub fn displacements(pk: PieceKind) -> &'static [Delta] {
    let table = DISPLACEMENTS.get_or_init(init_displacements);
    &table[usize::from(pk)]
}

/// 指定した駒種が変位 `(df, dr)` を持つかどうかを返す。
pub fn is_displacement(pk: PieceKind, df: i32, dr: i32) -> bool {
    const LIM: i32 = (DELTA_WIDTH / 2) as i32;

    if !(-LIM..=LIM).contains(&df) || !(-LIM..=LIM).contains(&dr) {
        return false;
    }

    let table = MEMBERSHIP.get_or_init(init_membership);
    table[usize::from(pk)][(df + LIM) as usize][(dr + LIM) as usize]
}

/// 空の盤面において、指定した駒種が `src` から `dst` へ動けるかどうかを返す。
pub fn can_move(pk: PieceKind, src: Square, dst: Square) -> bool {
    let delta = Delta::between(src, dst);
    is_displacement(pk, delta.file, delta.rank)
}

/// 空の盤面において、指定した駒種が `src` から動けるマスを全て返す。盤面外の変位は除かれる。
pub fn destinations(pk: PieceKind, src: Square) -> impl Iterator<Item = Square> {
    displacements(pk)
        .iter()
        .filter_map(move |delta| src.offset(delta.file, delta.rank))
}

fn init_displacements() -> DisplacementTable {
    std::array::from_fn(|i| deltas_of(PieceKind::from_inner(i as u32)))
}

fn deltas_of(pk: PieceKind) -> DeltaArray {
    let mut res = DeltaArray::new();

    match pk {
        KNIGHT => res.extend(KNIGHT_DELTAS),
        KING => res.extend(ORTHOGONAL_DIRS.into_iter().chain(DIAGONAL_DIRS)),
        BISHOP => push_rays(&mut res, &DIAGONAL_DIRS),
        ROOK => push_rays(&mut res, &ORTHOGONAL_DIRS),
        QUEEN => {
            push_rays(&mut res, &DIAGONAL_DIRS);
            push_rays(&mut res, &ORTHOGONAL_DIRS);
        }
        // ポーンは変位を持たない。
        _ => {}
    }

    res
}

fn push_rays(res: &mut DeltaArray, dirs: &[Delta]) {
    for dir in dirs {
        for k in 1..=7 {
            res.push(Delta::new(dir.file * k, dir.rank * k));
        }
    }
}

fn init_membership() -> MembershipTable {
    const LIM: i32 = (DELTA_WIDTH / 2) as i32;

    let mut res = [[[false; DELTA_WIDTH]; DELTA_WIDTH]; PieceKind::NUM];

    for pk in PieceKind::iter() {
        for delta in displacements(pk) {
            res[usize::from(pk)][(delta.file + LIM) as usize][(delta.rank + LIM) as usize] = true;
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement_counts() {
        assert_eq!(displacements(PAWN).len(), 0);
        assert_eq!(displacements(KNIGHT).len(), 8);
        assert_eq!(displacements(BISHOP).len(), 28);
        assert_eq!(displacements(ROOK).len(), 28);
        assert_eq!(displacements(QUEEN).len(), 56);
        assert_eq!(displacements(KING).len(), 8);
    }

    #[test]
    fn test_is_displacement() {
        assert!(is_displacement(KNIGHT, -1, 2));
        assert!(!is_displacement(KNIGHT, 1, 1));

        assert!(is_displacement(KING, 1, 1));
        assert!(!is_displacement(KING, 2, 0));

        assert!(is_displacement(BISHOP, -7, 7));
        assert!(!is_displacement(BISHOP, 0, 3));

        assert!(is_displacement(ROOK, 0, -5));
        assert!(!is_displacement(ROOK, 2, 2));

        assert!(is_displacement(QUEEN, 3, 3));
        assert!(is_displacement(QUEEN, 0, 7));
        assert!(!is_displacement(QUEEN, 1, 2));

        // 静止は変位ではない。
        for pk in PieceKind::iter() {
            assert!(!is_displacement(pk, 0, 0));
        }

        // テーブル外。
        assert!(!is_displacement(ROOK, 8, 0));
        assert!(!is_displacement(QUEEN, -9, -9));
    }

    #[test]
    fn test_pawn_is_inert() {
        for src in Square::iter() {
            assert_eq!(destinations(PAWN, src).count(), 0);
            for dst in Square::iter() {
                assert!(!can_move(PAWN, src, dst));
            }
        }
    }

    #[test]
    fn test_queen_is_union() {
        for df in -7..=7 {
            for dr in -7..=7 {
                assert_eq!(
                    is_displacement(QUEEN, df, dr),
                    is_displacement(BISHOP, df, dr) || is_displacement(ROOK, df, dr)
                );
            }
        }
    }

    #[test]
    fn test_destinations() {
        let mut knight: Vec<_> = destinations(KNIGHT, SQ_A1).collect();
        knight.sort();
        assert_eq!(knight, [SQ_B3, SQ_C2]);

        assert_eq!(destinations(ROOK, SQ_D4).count(), 14);
        assert_eq!(destinations(BISHOP, SQ_D4).count(), 13);
        assert_eq!(destinations(KING, SQ_H8).count(), 3);
    }
}
