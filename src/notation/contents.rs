use anyhow::{bail, ensure, Context as _};
use log::debug;

use crate::chess::*;
use crate::position::Position;
use crate::syntax::{Arg, Parser};

/// 局面を `contents` 事実のリストとしてエンコードする。
///
/// 例: `[contents(white, knight, 7, 5), contents(black, king, 6, 7)]`
///
/// 筋と段は番号 (1..=8) で表す。配置は正規形の順に並ぶ。
pub fn contents_encode(pos: &Position) -> String {
    let items: Vec<_> = pos
        .placements()
        .iter()
        .map(|pl| {
            let (file, rank) = pl.square().numbers();
            format!("contents({}, {}, {}, {})", pl.side(), pl.kind(), file, rank)
        })
        .collect();

    format!("[{}]", items.join(", "))
}

/// `contents` 事実のリストをデコードし、局面を返す。
///
/// 手番 (`turn/1`) とキャスリング権 (`kingside_castle/1`, `queenside_castle/1`) の事実は
/// 構文のみチェックして無視する。それ以外の事実はエラーとなる。
pub fn contents_decode(s: impl AsRef<str>) -> anyhow::Result<Position> {
    let mut parser = Parser::new(s.as_ref());

    let facts = parser.fact_list()?;
    ensure!(parser.is_eof(), "contents list has trailing characters");

    let mut placements = Vec::with_capacity(facts.len());

    for fact in facts {
        match fact.name.as_str() {
            "contents" => {
                let atoms = atoms(&fact.args).with_context(|| format!("invalid fact: {}", fact))?;
                ensure!(atoms.len() == 4, "contents/4 expected: {}", fact);

                let side: Side = atoms[0].parse()?;
                let pk: PieceKind = atoms[1].parse()?;
                let file: i32 = atoms[2]
                    .parse()
                    .with_context(|| format!("invalid file number: {}", atoms[2]))?;
                let rank: i32 = atoms[3]
                    .parse()
                    .with_context(|| format!("invalid rank number: {}", atoms[3]))?;
                let sq = Square::from_numbers(file, rank)
                    .with_context(|| format!("square out of board: ({}, {})", file, rank))?;

                placements.push(Placement::new(side, pk, sq));
            }
            "turn" | "kingside_castle" | "queenside_castle" => {
                let atoms = atoms(&fact.args).with_context(|| format!("invalid fact: {}", fact))?;
                ensure!(atoms.len() == 1, "{}/1 expected: {}", fact.name, fact);
                let _: Side = atoms[0].parse()?;
                debug!("ignored fact: {}", fact);
            }
            _ => bail!("unknown fact in contents list: {}", fact),
        }
    }

    Ok(Position::new(placements))
}

fn atoms(args: &[Arg]) -> Option<Vec<&str>> {
    args.iter().map(Arg::as_atom).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_encode() {
        let pos = Position::new([
            Placement::new(BLACK, KING, SQ_F7),
            Placement::new(WHITE, KNIGHT, SQ_G5),
        ]);

        assert_eq!(
            contents_encode(&pos),
            "[contents(white, knight, 7, 5), contents(black, king, 6, 7)]"
        );
        assert_eq!(contents_encode(&Position::empty()), "[]");
    }

    #[test]
    fn test_contents_decode() {
        let pos = contents_decode(
            "[contents(black, king, 6, 7), contents(white, knight, 7, 5), turn(white), kingside_castle(black)]",
        )
        .unwrap();

        assert_eq!(
            pos,
            Position::new([
                Placement::new(WHITE, KNIGHT, SQ_G5),
                Placement::new(BLACK, KING, SQ_F7),
            ])
        );

        for s in [
            "[contents(white, knight, 9, 5)]",
            "[contents(white, knight, 0, 5)]",
            "[contents(white, lance, 1, 1)]",
            "[contents(red, knight, 1, 1)]",
            "[contents(white, knight, 1)]",
            "[legal_move(e2, e4)]",
            "[contents(white, knight, 1, 1)] x",
        ] {
            assert!(contents_decode(s).is_err(), "{:?} must be rejected", s);
        }
    }
}
