use crate::chess::*;
use crate::geometry;

/// 局面。配置の集まり。
///
/// 局面は不変な値であり、常に正規形 (配置を `Placement` の順序で安定ソートしたもの) で保持される。
/// よって 2 つの局面の等価性は、配置の並び順によらず内部の配列の比較で判定できる。
///
/// 配置の一意性は一切検査しない。同じマスに複数の駒がある局面もそのまま表現される。
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position(Vec<Placement>);

impl Position {
    /// 配置の列から局面を作る。配置は正規化される。
    pub fn new<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = Placement>,
    {
        let mut inner: Vec<_> = placements.into_iter().collect();
        canonicalize(&mut inner);

        Self(inner)
    }

    /// 配置が 1 つもない局面を返す。
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// 正規形の配置たちへの参照を返す。
    pub fn placements(&self) -> &[Placement] {
        &self.0
    }

    /// 配置の個数を返す。
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 指定したマスにある配置を全て列挙する。
    pub fn placements_at(&self, sq: Square) -> impl Iterator<Item = Placement> + '_ {
        self.0.iter().copied().filter(move |pl| pl.square() == sq)
    }

    /// 指定したマスにある、指定した陣営の駒種を全て列挙する。
    pub fn piece_at(&self, sq: Square, side: Side) -> Vec<PieceKind> {
        self.placements_at(sq)
            .filter(|pl| pl.side() == side)
            .map(Placement::kind)
            .collect()
    }

    /// `src` にある駒を `dst` へ動かした局面を全て返す。
    ///
    /// `src` にある配置ごとに、その駒種が `src` から `dst` への変位を持てば結果が 1 つ得られる。
    /// 通常は高々 1 つだが、`src` に複数の配置がある局面では複数になりうる。
    /// `src` に配置がないか、変位が駒種に合わなければ空。
    ///
    /// `dst` にある駒は取り除かれない(自駒であっても)。手番、王手、経路上の駒は一切考慮しない。
    pub fn make_move(&self, src: Square, dst: Square) -> Vec<Position> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, pl)| pl.square() == src && geometry::can_move(pl.kind(), src, dst))
            .map(|(i, pl)| {
                let mut inner = self.0.clone();
                inner.remove(i);
                inner.push(pl.moved_to(dst));
                canonicalize(&mut inner);
                Self(inner)
            })
            .collect()
    }

    /// 指定した陣営の駒を、変位テーブル上で動かせる指し手を全て返す。昇順で重複はない。
    ///
    /// 合法手ではなく幾何的な候補でしかない(経路上の駒、自駒のあるマス、王手は考慮しない)。
    pub fn candidate_moves(&self, side: Side) -> Vec<Move> {
        let mut res: Vec<_> = self
            .0
            .iter()
            .filter(|pl| pl.side() == side)
            .flat_map(|pl| {
                let src = pl.square();
                geometry::destinations(pl.kind(), src).map(move |dst| Move::new(src, dst))
            })
            .collect();

        res.sort();
        res.dedup();
        res
    }

    /// `src` から `dst` へ動かした結果がちょうど `after` になりうるかどうかを返す。
    ///
    /// `make_move()` の結果側の引数が束縛されている場合の問い合わせに使う。
    /// `after` は構築時に正規化済みなので、そのまま比較すればよい。
    pub fn verify_move(&self, src: Square, dst: Square, after: &Position) -> bool {
        self.make_move(src, dst).iter().any(|pos| pos == after)
    }
}

impl FromIterator<Placement> for Position {
    fn from_iter<I: IntoIterator<Item = Placement>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for Position {
    /// 盤面図を表示する。1 マスに複数の配置がある場合は先頭の配置のみを表示する。
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use std::fmt::Write as _;

        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let sq = Square::from_file_rank(file, rank);
                let c = self.placements_at(sq).next().map_or('.', Placement::to_fen_char);
                f.write_char(c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// 配置の列を正規化する(安定ソート)。
pub fn canonicalize(placements: &mut [Placement]) {
    placements.sort();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(side: Side, pk: PieceKind, sq: Square) -> Placement {
        Placement::new(side, pk, sq)
    }

    #[test]
    fn test_canonical_order() {
        let pos = Position::new([
            pl(BLACK, ROOK, SQ_H7),
            pl(WHITE, KNIGHT, SQ_G5),
            pl(BLACK, KING, SQ_F7),
        ]);

        assert_eq!(
            pos.placements(),
            [
                pl(WHITE, KNIGHT, SQ_G5),
                pl(BLACK, ROOK, SQ_H7),
                pl(BLACK, KING, SQ_F7),
            ]
        );
    }

    #[test]
    fn test_make_move_keeps_captured() {
        let pos = Position::new([pl(WHITE, KNIGHT, SQ_G5), pl(BLACK, KING, SQ_F7)]);

        let after = pos.make_move(SQ_G5, SQ_F7);

        assert_eq!(
            after,
            [Position::new([pl(WHITE, KNIGHT, SQ_F7), pl(BLACK, KING, SQ_F7)])]
        );
        // 元の局面は変更されない。
        assert_eq!(pos.placements()[0], pl(WHITE, KNIGHT, SQ_G5));
    }

    #[test]
    fn test_make_move_fails() {
        let pos = Position::new([pl(WHITE, KNIGHT, SQ_G5), pl(WHITE, PAWN, SQ_E2)]);

        // 変位が合わない。
        assert!(pos.make_move(SQ_G5, SQ_G6).is_empty());
        // 移動元に駒がない。
        assert!(pos.make_move(SQ_A1, SQ_B3).is_empty());
        // ポーンは動けない。
        assert!(pos.make_move(SQ_E2, SQ_E4).is_empty());
        assert!(pos.make_move(SQ_E2, SQ_E3).is_empty());
    }

    #[test]
    fn test_make_move_contradictory_source() {
        // 同じマスにナイトとルークがいる局面。
        let pos = Position::new([pl(WHITE, KNIGHT, SQ_D4), pl(BLACK, ROOK, SQ_D4)]);

        assert_eq!(pos.make_move(SQ_D4, SQ_E6).len(), 1);
        assert_eq!(pos.make_move(SQ_D4, SQ_D8).len(), 1);
        assert!(pos.make_move(SQ_D4, SQ_E5).is_empty());

        let both = Position::new([pl(WHITE, QUEEN, SQ_D4), pl(BLACK, ROOK, SQ_D4)]);
        let after = both.make_move(SQ_D4, SQ_D8);
        assert_eq!(
            after,
            [
                Position::new([pl(WHITE, QUEEN, SQ_D8), pl(BLACK, ROOK, SQ_D4)]),
                Position::new([pl(WHITE, QUEEN, SQ_D4), pl(BLACK, ROOK, SQ_D8)]),
            ]
        );
    }

    #[test]
    fn test_verify_move() {
        let pos = Position::new([pl(WHITE, BISHOP, SQ_C1), pl(BLACK, PAWN, SQ_A3)]);
        let expected = Position::new([pl(BLACK, PAWN, SQ_A3), pl(WHITE, BISHOP, SQ_G5)]);
        let wrong = Position::new([pl(WHITE, BISHOP, SQ_G5)]);

        assert!(pos.verify_move(SQ_C1, SQ_G5, &expected));
        assert!(!pos.verify_move(SQ_C1, SQ_G5, &wrong));
        assert!(!pos.verify_move(SQ_C1, SQ_C5, &expected));
    }

    #[test]
    fn test_candidate_moves() {
        let pos = Position::new([
            pl(WHITE, KNIGHT, SQ_A1),
            pl(WHITE, PAWN, SQ_E2),
            pl(WHITE, KNIGHT, SQ_A1),
            pl(BLACK, KING, SQ_H8),
        ]);

        // 同じ配置が重複していても指し手は 1 回だけ。ポーンは動かない。
        assert_eq!(
            pos.candidate_moves(WHITE),
            [Move::new(SQ_A1, SQ_B3), Move::new(SQ_A1, SQ_C2)]
        );
        assert_eq!(
            pos.candidate_moves(BLACK),
            [
                Move::new(SQ_H8, SQ_G7),
                Move::new(SQ_H8, SQ_G8),
                Move::new(SQ_H8, SQ_H7),
            ]
        );
        assert!(Position::empty().candidate_moves(WHITE).is_empty());
    }

    #[test]
    fn test_piece_at() {
        let pos = Position::new([
            pl(WHITE, KNIGHT, SQ_D4),
            pl(WHITE, PAWN, SQ_D4),
            pl(BLACK, ROOK, SQ_D4),
        ]);

        assert_eq!(pos.piece_at(SQ_D4, WHITE), [PAWN, KNIGHT]);
        assert_eq!(pos.piece_at(SQ_D4, BLACK), [ROOK]);
        assert!(pos.piece_at(SQ_E4, WHITE).is_empty());
    }

    #[test]
    fn test_display() {
        let pos = Position::new([pl(WHITE, KING, SQ_E1), pl(BLACK, QUEEN, SQ_D8)]);

        assert_eq!(
            pos.to_string(),
            "...q....\n........\n........\n........\n........\n........\n........\n....K...\n"
        );
    }
}
