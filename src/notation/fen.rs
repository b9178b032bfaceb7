use anyhow::{bail, ensure, Context as _};

use crate::chess::*;
use crate::position::Position;

/// 初期局面の FEN 文字列。
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 初期局面を返す。
pub fn startpos() -> Position {
    // STARTPOS_FEN は正しい FEN 文字列なので失敗しない。
    fen_decode_position(STARTPOS_FEN).unwrap_or_default()
}

/// FEN 文字列をデコードし、その駒配置を局面として返す。手番は捨てる。
///
/// 書式は `fen_decode()` と同じ。
pub fn fen_decode_position(s: impl AsRef<str>) -> anyhow::Result<Position> {
    let (_, pos) = fen_decode(s)?;

    Ok(pos)
}

/// FEN 文字列をデコードし、(手番, 局面) を返す。
///
/// 解釈するのは駒配置フィールドと手番フィールドのみ。手番フィールドがなければ白番とみなす。
/// キャスリング権、アンパッサン、手数などのフィールドは無視される。
/// 合法性チェックは一切行わない。
///
/// 文字列の先頭と末尾の空白は無視される。
pub fn fen_decode(s: impl AsRef<str>) -> anyhow::Result<(Side, Position)> {
    let s = s.as_ref().trim();

    let mut tokens = s.split_ascii_whitespace();

    let board_s = tokens.next().context("FEN string is empty")?;
    let placements = fen_decode_board(board_s)?;

    let side = match tokens.next() {
        Some(side_s) => fen_decode_side(side_s)?,
        None => WHITE,
    };

    Ok((side, Position::new(placements)))
}

/// 1 行 1 局面の FEN リストをデコードする。空行と `%` で始まる行は無視する。
pub fn fen_list_decode(s: impl AsRef<str>) -> anyhow::Result<Vec<(Side, Position)>> {
    let mut res = Vec::new();

    for (i, line) in s.as_ref().lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let entry = fen_decode(line).with_context(|| format!("line {}: invalid FEN: {}", i + 1, line))?;
        res.push(entry);
    }

    Ok(res)
}

fn fen_decode_side(s: &str) -> anyhow::Result<Side> {
    match s {
        "w" => Ok(WHITE),
        "b" => Ok(BLACK),
        _ => bail!("invalid side string: {}", s),
    }
}

/// FEN 盤面文字列をデコードし、配置の列を返す。
fn fen_decode_board(s: &str) -> anyhow::Result<Vec<Placement>> {
    let mut placements = Vec::new();

    let mut it = s.split('/');

    for rank in Rank::iter().rev() {
        let rank_s = it.next().context("board string must have exactly 8 ranks")?;
        fen_decode_board_rank(rank_s, rank, &mut placements)?;
    }

    if let Some(s) = it.next() {
        bail!("board string has redundant rank: {}", s);
    }

    Ok(placements)
}

fn fen_decode_board_rank(
    s: &str,
    rank: Rank,
    placements: &mut Vec<Placement>,
) -> anyhow::Result<()> {
    #[derive(Debug)]
    struct State<'a> {
        placements: &'a mut Vec<Placement>,
        file: i32, // 次に埋めるべき筋の内部値
        rank: Rank,
    }
    impl<'a> State<'a> {
        fn new(placements: &'a mut Vec<Placement>, rank: Rank) -> Self {
            Self {
                placements,
                file: FILE_A.inner(),
                rank,
            }
        }
        fn update(&mut self, c: char) -> anyhow::Result<()> {
            match c {
                '1'..='8' => {
                    let n = i32::from(c as u8 - b'0');
                    self.check_overflow(n)?;
                    self.file += n;
                }
                _ => {
                    let (side, pk) = fen_decode_board_piece(c)?;
                    self.check_overflow(1)?;
                    let sq = Square::from_file_rank(File::from_inner(self.file), self.rank);
                    self.placements.push(Placement::new(side, pk, sq));
                    self.file += 1;
                }
            }
            Ok(())
        }
        fn finalize(&self) -> anyhow::Result<()> {
            ensure!(
                self.file == FILE_H.inner() + 1,
                "board rank must have exactly 8 files"
            );
            Ok(())
        }
        fn check_overflow(&self, n: i32) -> anyhow::Result<()> {
            ensure!(self.file + n <= FILE_H.inner() + 1, "rank overflow");
            Ok(())
        }
    }

    let mut state = State::new(placements, rank);
    for c in s.chars() {
        state.update(c)?;
    }
    state.finalize()?;

    Ok(())
}

fn fen_decode_board_piece(c: char) -> anyhow::Result<(Side, PieceKind)> {
    let side = if c.is_ascii_uppercase() { WHITE } else { BLACK };

    let pk = match c.to_ascii_lowercase() {
        'p' => PAWN,
        'n' => KNIGHT,
        'b' => BISHOP,
        'r' => ROOK,
        'q' => QUEEN,
        'k' => KING,
        _ => bail!("invalid board piece char: {}", c),
    };

    Ok((side, pk))
}

/// 局面を FEN 盤面文字列にエンコードする。
/// 1 マスに複数の配置がある場合は先頭の配置のみを出力する。
pub fn fen_encode_board(pos: &Position) -> String {
    let mut s = String::new();

    for rank in Rank::iter().rev() {
        if rank != RANK_8 {
            s.push('/');
        }

        let mut run_blank = 0;
        for file in File::iter() {
            let sq = Square::from_file_rank(file, rank);
            match pos.placements_at(sq).next() {
                Some(pl) => {
                    if run_blank > 0 {
                        s.push_str(&run_blank.to_string());
                        run_blank = 0;
                    }
                    s.push(pl.to_fen_char());
                }
                None => run_blank += 1,
            }
        }
        if run_blank > 0 {
            s.push_str(&run_blank.to_string());
        }
    }

    s
}
