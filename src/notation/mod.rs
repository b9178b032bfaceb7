//! 局面と指し手の文字列表現。

mod contents;
mod fen;

pub use self::contents::*;
pub use self::fen::*;

use anyhow::{ensure, Context as _};

use crate::chess::{Move, Square};

/// "e2e4" の形の指し手文字列をデコードする。
/// 成りの指定 ("e7e8q" など) は扱わない。
///
/// 文字列の先頭と末尾の空白は無視される。
pub fn move_decode(s: impl AsRef<str>) -> anyhow::Result<Move> {
    let s = s.as_ref().trim();

    ensure!(s.is_ascii(), "invalid move string: {}", s);
    ensure!(s.len() == 4, "move string must have exactly 4 chars: {}", s);

    let src: Square = s[..2]
        .parse()
        .with_context(|| format!("invalid move source: {}", s))?;
    let dst: Square = s[2..]
        .parse()
        .with_context(|| format!("invalid move destination: {}", s))?;

    Ok(Move::new(src, dst))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::*;

    #[test]
    fn test_move_decode() {
        assert_eq!(move_decode(" g5f7 ").unwrap(), Move::new(SQ_G5, SQ_F7));
        assert_eq!(Move::new(SQ_C1, SQ_G5).to_string(), "c1g5");

        for s in ["", "g5", "g5f", "e7e8q", "i1a1", "a1a9"] {
            assert!(move_decode(s).is_err(), "{:?} must be rejected", s);
        }
    }
}
