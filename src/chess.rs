//! チェスの基本要素たち。
//!
//! 陣営、筋、段、マス、駒種は enum ではなく newtype で表現する。
//! 外部(ルール学習器など)から渡された値を検査するため、無効値も表現できるようにしておき、
//! `is_valid()` などで判定する。
//!
//! 筋、段、マスの内部値は以下のように割り当てている:
//!
//! * 筋は a, b, ..., h の順。
//! * 段は 1, 2, ..., 8 の順。
//! * マスは a1, a2, ..., h8 の順。
//!
//! 背景知識としてのマスは (筋番号, 段番号) の組 (いずれも 1..=8) でもあり、
//! `Square::from_numbers()` と `Square::numbers()` がマス名との全単射を与える。

use std::iter::FusedIterator;

use anyhow::{bail, Context as _};

/// 陣営。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Side(u32);

pub const WHITE: Side = Side(0);
pub const BLACK: Side = Side(1);

impl Side {
    /// 内部値を指定して陣営を作る。無効な値を渡してはならない。
    pub const fn from_inner(inner: u32) -> Self {
        let this = Self(inner);
        debug_assert!(this.is_valid());

        this
    }

    /// 有効値かどうかを返す。
    pub const fn is_valid(self) -> bool {
        self.0 == WHITE.0 || self.0 == BLACK.0
    }

    /// 敵陣営を返す。
    pub const fn inv(self) -> Side {
        Self(self.0 ^ 1)
    }

    /// 背景知識における陣営名を返す。
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "white",
            1 => "black",
            _ => "invalid",
        }
    }

    /// 陣営を昇順に列挙する。(`WHITE`、`BLACK` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator + Clone
    {
        [WHITE, BLACK].into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl From<Side> for usize {
    fn from(side: Side) -> Self {
        debug_assert!(side.is_valid());

        side.0 as Self
    }
}

impl std::str::FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "white" => Ok(WHITE),
            "black" => Ok(BLACK),
            _ => bail!("invalid side: {}", s),
        }
    }
}

impl std::fmt::Debug for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            WHITE => write!(f, "WHITE"),
            BLACK => write!(f, "BLACK"),
            _ => write!(f, "Side({})", self.0),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_valid() {
            f.write_str(self.name())
        } else {
            write!(f, "invalid side({})", self.0)
        }
    }
}

/// 盤面の筋。たとえば `FILE_C` は c 筋。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct File(i32);

pub const FILE_A: File = File(0);
pub const FILE_B: File = File(1);
pub const FILE_C: File = File(2);
pub const FILE_D: File = File(3);
pub const FILE_E: File = File(4);
pub const FILE_F: File = File(5);
pub const FILE_G: File = File(6);
pub const FILE_H: File = File(7);

impl File {
    /// 内部値を指定して筋を作る。盤面外の値を渡してはならない。
    pub const fn from_inner(inner: i32) -> Self {
        let this = Self(inner);
        debug_assert!(this.is_on_board());

        this
    }

    /// 筋番号 (a 筋が 1, h 筋が 8) から筋を作る。範囲外なら `None` を返す。
    pub const fn from_number(n: i32) -> Option<Self> {
        let this = Self(n - 1);
        if this.is_on_board() {
            Some(this)
        } else {
            None
        }
    }

    /// 筋が盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        FILE_A.0 <= self.0 && self.0 <= FILE_H.0
    }

    /// 筋番号 (1..=8) を返す。
    pub const fn number(self) -> i32 {
        self.0 + 1
    }

    /// 全ての筋を昇順に列挙する。(`FILE_A`, `FILE_B`, ..., `FILE_H` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator + Clone
    {
        // ExactSizeIterator にするため、配列をベタ書きする。
        [
            FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
        ]
        .into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl std::ops::Sub<Self> for File {
    type Output = i32;

    fn sub(self, rhs: Self) -> i32 {
        self.0 - rhs.0
    }
}

impl From<File> for usize {
    fn from(file: File) -> Self {
        debug_assert!(file.is_on_board());

        file.0 as Self
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "FILE_{}", (b'A' + self.0 as u8) as char)
        } else {
            write!(f, "File({})", self.0)
        }
    }
}

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", (b'a' + self.0 as u8) as char)
        } else {
            write!(f, "invalid file({})", self.0)
        }
    }
}

/// 盤面の段。たとえば `RANK_3` は 3 段目。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Rank(i32);

pub const RANK_1: Rank = Rank(0);
pub const RANK_2: Rank = Rank(1);
pub const RANK_3: Rank = Rank(2);
pub const RANK_4: Rank = Rank(3);
pub const RANK_5: Rank = Rank(4);
pub const RANK_6: Rank = Rank(5);
pub const RANK_7: Rank = Rank(6);
pub const RANK_8: Rank = Rank(7);

impl Rank {
    /// 内部値を指定して段を作る。盤面外の値を渡してはならない。
    pub const fn from_inner(inner: i32) -> Self {
        let this = Self(inner);
        debug_assert!(this.is_on_board());

        this
    }

    /// 段番号 (1..=8) から段を作る。範囲外なら `None` を返す。
    pub const fn from_number(n: i32) -> Option<Self> {
        let this = Self(n - 1);
        if this.is_on_board() {
            Some(this)
        } else {
            None
        }
    }

    /// 段が盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        RANK_1.0 <= self.0 && self.0 <= RANK_8.0
    }

    /// 段番号 (1..=8) を返す。
    pub const fn number(self) -> i32 {
        self.0 + 1
    }

    /// 全ての段を昇順に列挙する。(`RANK_1`, `RANK_2`, ..., `RANK_8` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator + Clone
    {
        // ExactSizeIterator にするため、配列をベタ書きする。
        [
            RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
        ]
        .into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl std::ops::Sub<Self> for Rank {
    type Output = i32;

    fn sub(self, rhs: Self) -> i32 {
        self.0 - rhs.0
    }
}

impl From<Rank> for usize {
    fn from(rank: Rank) -> Self {
        debug_assert!(rank.is_on_board());

        rank.0 as Self
    }
}

impl std::fmt::Debug for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "RANK_{}", self.number())
        } else {
            write!(f, "Rank({})", self.0)
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", self.number())
        } else {
            write!(f, "invalid rank({})", self.0)
        }
    }
}

/// 盤面のマス。たとえば `SQ_E4` は e4。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Square(i32);

pub const SQ_A1: Square = Square::from_file_rank(FILE_A, RANK_1);
pub const SQ_A2: Square = Square::from_file_rank(FILE_A, RANK_2);
pub const SQ_A3: Square = Square::from_file_rank(FILE_A, RANK_3);
pub const SQ_A4: Square = Square::from_file_rank(FILE_A, RANK_4);
pub const SQ_A5: Square = Square::from_file_rank(FILE_A, RANK_5);
pub const SQ_A6: Square = Square::from_file_rank(FILE_A, RANK_6);
pub const SQ_A7: Square = Square::from_file_rank(FILE_A, RANK_7);
pub const SQ_A8: Square = Square::from_file_rank(FILE_A, RANK_8);
pub const SQ_B1: Square = Square::from_file_rank(FILE_B, RANK_1);
pub const SQ_B2: Square = Square::from_file_rank(FILE_B, RANK_2);
pub const SQ_B3: Square = Square::from_file_rank(FILE_B, RANK_3);
pub const SQ_B4: Square = Square::from_file_rank(FILE_B, RANK_4);
pub const SQ_B5: Square = Square::from_file_rank(FILE_B, RANK_5);
pub const SQ_B6: Square = Square::from_file_rank(FILE_B, RANK_6);
pub const SQ_B7: Square = Square::from_file_rank(FILE_B, RANK_7);
pub const SQ_B8: Square = Square::from_file_rank(FILE_B, RANK_8);
pub const SQ_C1: Square = Square::from_file_rank(FILE_C, RANK_1);
pub const SQ_C2: Square = Square::from_file_rank(FILE_C, RANK_2);
pub const SQ_C3: Square = Square::from_file_rank(FILE_C, RANK_3);
pub const SQ_C4: Square = Square::from_file_rank(FILE_C, RANK_4);
pub const SQ_C5: Square = Square::from_file_rank(FILE_C, RANK_5);
pub const SQ_C6: Square = Square::from_file_rank(FILE_C, RANK_6);
pub const SQ_C7: Square = Square::from_file_rank(FILE_C, RANK_7);
pub const SQ_C8: Square = Square::from_file_rank(FILE_C, RANK_8);
pub const SQ_D1: Square = Square::from_file_rank(FILE_D, RANK_1);
pub const SQ_D2: Square = Square::from_file_rank(FILE_D, RANK_2);
pub const SQ_D3: Square = Square::from_file_rank(FILE_D, RANK_3);
pub const SQ_D4: Square = Square::from_file_rank(FILE_D, RANK_4);
pub const SQ_D5: Square = Square::from_file_rank(FILE_D, RANK_5);
pub const SQ_D6: Square = Square::from_file_rank(FILE_D, RANK_6);
pub const SQ_D7: Square = Square::from_file_rank(FILE_D, RANK_7);
pub const SQ_D8: Square = Square::from_file_rank(FILE_D, RANK_8);
pub const SQ_E1: Square = Square::from_file_rank(FILE_E, RANK_1);
pub const SQ_E2: Square = Square::from_file_rank(FILE_E, RANK_2);
pub const SQ_E3: Square = Square::from_file_rank(FILE_E, RANK_3);
pub const SQ_E4: Square = Square::from_file_rank(FILE_E, RANK_4);
pub const SQ_E5: Square = Square::from_file_rank(FILE_E, RANK_5);
pub const SQ_E6: Square = Square::from_file_rank(FILE_E, RANK_6);
pub const SQ_E7: Square = Square::from_file_rank(FILE_E, RANK_7);
pub const SQ_E8: Square = Square::from_file_rank(FILE_E, RANK_8);
pub const SQ_F1: Square = Square::from_file_rank(FILE_F, RANK_1);
pub const SQ_F2: Square = Square::from_file_rank(FILE_F, RANK_2);
pub const SQ_F3: Square = Square::from_file_rank(FILE_F, RANK_3);
pub const SQ_F4: Square = Square::from_file_rank(FILE_F, RANK_4);
pub const SQ_F5: Square = Square::from_file_rank(FILE_F, RANK_5);
pub const SQ_F6: Square = Square::from_file_rank(FILE_F, RANK_6);
pub const SQ_F7: Square = Square::from_file_rank(FILE_F, RANK_7);
pub const SQ_F8: Square = Square::from_file_rank(FILE_F, RANK_8);
pub const SQ_G1: Square = Square::from_file_rank(FILE_G, RANK_1);
pub const SQ_G2: Square = Square::from_file_rank(FILE_G, RANK_2);
pub const SQ_G3: Square = Square::from_file_rank(FILE_G, RANK_3);
pub const SQ_G4: Square = Square::from_file_rank(FILE_G, RANK_4);
pub const SQ_G5: Square = Square::from_file_rank(FILE_G, RANK_5);
pub const SQ_G6: Square = Square::from_file_rank(FILE_G, RANK_6);
pub const SQ_G7: Square = Square::from_file_rank(FILE_G, RANK_7);
pub const SQ_G8: Square = Square::from_file_rank(FILE_G, RANK_8);
pub const SQ_H1: Square = Square::from_file_rank(FILE_H, RANK_1);
pub const SQ_H2: Square = Square::from_file_rank(FILE_H, RANK_2);
pub const SQ_H3: Square = Square::from_file_rank(FILE_H, RANK_3);
pub const SQ_H4: Square = Square::from_file_rank(FILE_H, RANK_4);
pub const SQ_H5: Square = Square::from_file_rank(FILE_H, RANK_5);
pub const SQ_H6: Square = Square::from_file_rank(FILE_H, RANK_6);
pub const SQ_H7: Square = Square::from_file_rank(FILE_H, RANK_7);
pub const SQ_H8: Square = Square::from_file_rank(FILE_H, RANK_8);

impl Square {
    /// 内部値を指定してマスを作る。盤面外の値を渡してはならない。
    pub const fn from_inner(inner: i32) -> Self {
        let this = Self(inner);
        debug_assert!(this.is_on_board());

        this
    }

    /// 筋と段からマスを作る。
    pub const fn from_file_rank(file: File, rank: Rank) -> Self {
        Self(8 * file.0 + rank.0)
    }

    /// 筋番号と段番号 (いずれも 1..=8) からマスを作る。範囲外なら `None` を返す。
    pub const fn from_numbers(file: i32, rank: i32) -> Option<Self> {
        match (File::from_number(file), Rank::from_number(rank)) {
            (Some(file), Some(rank)) => Some(Self::from_file_rank(file, rank)),
            _ => None,
        }
    }

    /// マスが盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        SQ_A1.0 <= self.0 && self.0 <= SQ_H8.0
    }

    /// マスの属する筋を返す。
    pub const fn file(self) -> File {
        debug_assert!(self.is_on_board());

        File(self.0 / 8)
    }

    /// マスの属する段を返す。
    pub const fn rank(self) -> Rank {
        debug_assert!(self.is_on_board());

        Rank(self.0 % 8)
    }

    /// (筋番号, 段番号) を返す。
    pub const fn numbers(self) -> (i32, i32) {
        (self.file().number(), self.rank().number())
    }

    /// `self` から `dst` への変位 (筋の差, 段の差) を返す。
    pub fn delta_to(self, dst: Self) -> (i32, i32) {
        (dst.file() - self.file(), dst.rank() - self.rank())
    }

    /// 変位 `(df, dr)` だけずらしたマスを返す。盤面外にはみ出すなら `None` を返す。
    pub const fn offset(self, df: i32, dr: i32) -> Option<Self> {
        let (file, rank) = self.numbers();
        Self::from_numbers(file + df, rank + dr)
    }

    /// 全マスを昇順に列挙する。(`SQ_A1`, `SQ_A2`, ..., `SQ_H8` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator + Clone
    {
        // ExactSizeIterator にするため、配列をベタ書きする。
        #[rustfmt::skip]
        const SQS: [Square; 64] = [
            SQ_A1, SQ_A2, SQ_A3, SQ_A4, SQ_A5, SQ_A6, SQ_A7, SQ_A8,
            SQ_B1, SQ_B2, SQ_B3, SQ_B4, SQ_B5, SQ_B6, SQ_B7, SQ_B8,
            SQ_C1, SQ_C2, SQ_C3, SQ_C4, SQ_C5, SQ_C6, SQ_C7, SQ_C8,
            SQ_D1, SQ_D2, SQ_D3, SQ_D4, SQ_D5, SQ_D6, SQ_D7, SQ_D8,
            SQ_E1, SQ_E2, SQ_E3, SQ_E4, SQ_E5, SQ_E6, SQ_E7, SQ_E8,
            SQ_F1, SQ_F2, SQ_F3, SQ_F4, SQ_F5, SQ_F6, SQ_F7, SQ_F8,
            SQ_G1, SQ_G2, SQ_G3, SQ_G4, SQ_G5, SQ_G6, SQ_G7, SQ_G8,
            SQ_H1, SQ_H2, SQ_H3, SQ_H4, SQ_H5, SQ_H6, SQ_H7, SQ_H8,
        ];

        SQS.into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl From<Square> for usize {
    fn from(sq: Square) -> Self {
        debug_assert!(sq.is_on_board());

        sq.0 as Self
    }
}

impl std::str::FromStr for Square {
    type Err = anyhow::Error;

    /// "e4" のようなマス名をパースする。
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut it = s.chars();

        let c_file = it.next().context("square string is empty")?;
        let c_rank = it
            .next()
            .with_context(|| format!("square string is too short: {}", s))?;
        if it.next().is_some() {
            bail!("square string is too long: {}", s);
        }

        let file = match c_file {
            'a'..='h' => File(i32::from(c_file as u8 - b'a')),
            _ => bail!("invalid file char: {}", c_file),
        };
        let rank = match c_rank {
            '1'..='8' => Rank(i32::from(c_rank as u8 - b'1')),
            _ => bail!("invalid rank char: {}", c_rank),
        };

        Ok(Self::from_file_rank(file, rank))
    }
}

impl std::fmt::Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            let c_file = (b'A' + self.file().inner() as u8) as char;
            write!(f, "SQ_{}{}", c_file, self.rank())
        } else {
            write!(f, "Square({})", self.0)
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", self.file(), self.rank())
        } else {
            write!(f, "invalid square({})", self.0)
        }
    }
}

/// 駒種(陣営の区別なし)。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct PieceKind(u32);

pub const PAWN: PieceKind = PieceKind(0);
pub const KNIGHT: PieceKind = PieceKind(1);
pub const BISHOP: PieceKind = PieceKind(2);
pub const ROOK: PieceKind = PieceKind(3);
pub const QUEEN: PieceKind = PieceKind(4);
pub const KING: PieceKind = PieceKind(5);

impl PieceKind {
    /// 駒種の個数。
    pub const NUM: usize = 6;

    /// 内部値を指定して駒種を作る。無効な値を渡してはならない。
    pub const fn from_inner(inner: u32) -> Self {
        let this = Self(inner);
        debug_assert!(this.is_valid());

        this
    }

    /// 有効値かどうかを返す。
    pub const fn is_valid(self) -> bool {
        self.0 <= KING.0
    }

    /// 遠隔駒 (角行型、飛車型の利きを持つ駒) かどうかを返す。ビショップ、ルーク、クイーンが該当する。
    pub const fn is_sliding(self) -> bool {
        BISHOP.0 <= self.0 && self.0 <= QUEEN.0
    }

    /// 背景知識における駒種名を返す。
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "pawn",
            1 => "knight",
            2 => "bishop",
            3 => "rook",
            4 => "queen",
            5 => "king",
            _ => "invalid",
        }
    }

    /// FEN における駒文字 (小文字) を返す。
    pub const fn to_char(self) -> char {
        match self.0 {
            0 => 'p',
            1 => 'n',
            2 => 'b',
            3 => 'r',
            4 => 'q',
            5 => 'k',
            _ => '?',
        }
    }

    /// 全ての駒種を昇順に列挙する。
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator + Clone
    {
        [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING].into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl From<PieceKind> for usize {
    fn from(pk: PieceKind) -> Self {
        debug_assert!(pk.is_valid());

        pk.0 as Self
    }
}

impl std::str::FromStr for PieceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pawn" => Ok(PAWN),
            "knight" => Ok(KNIGHT),
            "bishop" => Ok(BISHOP),
            "rook" => Ok(ROOK),
            "queen" => Ok(QUEEN),
            "king" => Ok(KING),
            _ => bail!("invalid piece kind: {}", s),
        }
    }
}

impl std::fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PAWN => write!(f, "PAWN"),
            KNIGHT => write!(f, "KNIGHT"),
            BISHOP => write!(f, "BISHOP"),
            ROOK => write!(f, "ROOK"),
            QUEEN => write!(f, "QUEEN"),
            KING => write!(f, "KING"),
            _ => write!(f, "PieceKind({})", self.0),
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_valid() {
            f.write_str(self.name())
        } else {
            write!(f, "invalid piece kind({})", self.0)
        }
    }
}

/// 配置。あるマスにある陣営のある駒種が置かれているという事実。
///
/// 導出される `Ord` (陣営, 駒種, マスの順の辞書式順序) が局面の正規化に使われる。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Placement {
    side: Side,
    kind: PieceKind,
    sq: Square,
}

impl Placement {
    pub const fn new(side: Side, kind: PieceKind, sq: Square) -> Self {
        Self { side, kind, sq }
    }

    pub const fn side(self) -> Side {
        self.side
    }

    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    pub const fn square(self) -> Square {
        self.sq
    }

    /// 同じ陣営、駒種のままマスだけを差し替えた配置を返す。
    pub const fn moved_to(self, dst: Square) -> Self {
        Self::new(self.side, self.kind, dst)
    }

    /// 陣営、駒種、マスが全て有効値かどうかを返す。
    pub const fn is_valid(self) -> bool {
        self.side.is_valid() && self.kind.is_valid() && self.sq.is_on_board()
    }

    /// FEN における駒文字を返す。白は大文字、黒は小文字。
    pub fn to_fen_char(self) -> char {
        let c = self.kind.to_char();
        if self.side == WHITE {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.side, self.kind, self.sq)
    }
}

/// 指し手。移動元と移動先の組でしかなく、手番や合法性とは無関係。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Move {
    src: Square,
    dst: Square,
}

impl Move {
    pub const fn new(src: Square, dst: Square) -> Self {
        Self { src, dst }
    }

    /// 移動元を返す。
    pub const fn src(self) -> Square {
        self.src
    }

    /// 移動先を返す。
    pub const fn dst(self) -> Square {
        self.dst
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.src, self.dst)
    }
}
