//! 名前による関係の問い合わせ。ルール学習器との境界。
//!
//! 引数は 1 つごとに `Option<Value>` で渡す(`None` は自由変数)。
//! 結果は、自由な引数を埋めた引数列(束縛)の全体。
//!
//! 束縛が 1 つもないことはエラーではない(パターンが成立しないことを表す)。
//! 一方、未知の関係、引数の個数や型の誤り、`in` モードの引数が自由であること、
//! 無効な値(盤面外のマスなど)はエラーとして区別される。

use anyhow::{bail, ensure, Context as _};

use crate::attack;
use crate::chess::*;
use crate::mode::{self, ArgType, Mode, Signature};
use crate::mylog;
use crate::notation::fen_encode_board;
use crate::position::Position;
use crate::relation;

/// 関係の引数の値。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Position(Position),
    Square(Square),
    Side(Side),
    PieceKind(PieceKind),
}

impl Value {
    /// 値の型を返す。
    pub fn arg_type(&self) -> ArgType {
        match self {
            Self::Position(_) => ArgType::Position,
            Self::Square(_) => ArgType::Square,
            Self::Side(_) => ArgType::Side,
            Self::PieceKind(_) => ArgType::PieceKind,
        }
    }

    /// 有効値かどうかを返す。局面は全ての配置が有効値であれば有効。
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Position(pos) => pos.placements().iter().all(|pl| pl.is_valid()),
            Self::Square(sq) => sq.is_on_board(),
            Self::Side(side) => side.is_valid(),
            Self::PieceKind(pk) => pk.is_valid(),
        }
    }

    /// 定数アトム(マス名、陣営名、駒種名)をパースする。
    pub fn parse_atom(s: &str) -> anyhow::Result<Self> {
        if let Ok(sq) = s.parse::<Square>() {
            return Ok(Self::Square(sq));
        }
        if let Ok(side) = s.parse::<Side>() {
            return Ok(Self::Side(side));
        }
        if let Ok(pk) = s.parse::<PieceKind>() {
            return Ok(Self::PieceKind(pk));
        }
        bail!("invalid constant: {}", s)
    }

    pub fn as_position(&self) -> Option<&Position> {
        match self {
            Self::Position(pos) => Some(pos),
            _ => None,
        }
    }

    pub fn as_square(&self) -> Option<Square> {
        match *self {
            Self::Square(sq) => Some(sq),
            _ => None,
        }
    }

    pub fn as_side(&self) -> Option<Side> {
        match *self {
            Self::Side(side) => Some(side),
            _ => None,
        }
    }

    pub fn as_piece_kind(&self) -> Option<PieceKind> {
        match *self {
            Self::PieceKind(pk) => Some(pk),
            _ => None,
        }
    }
}

impl From<Position> for Value {
    fn from(pos: Position) -> Self {
        Self::Position(pos)
    }
}

impl From<Square> for Value {
    fn from(sq: Square) -> Self {
        Self::Square(sq)
    }
}

impl From<Side> for Value {
    fn from(side: Side) -> Self {
        Self::Side(side)
    }
}

impl From<PieceKind> for Value {
    fn from(pk: PieceKind) -> Self {
        Self::PieceKind(pk)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Position(pos) => write!(f, "<{}>", fen_encode_board(pos)),
            Self::Square(sq) => write!(f, "{}", sq),
            Self::Side(side) => write!(f, "{}", side),
            Self::PieceKind(pk) => write!(f, "{}", pk),
        }
    }
}

/// 束縛。関係の全引数の値。
pub type Binding = Vec<Value>;

/// 宣言上は `in` だが、自由でも受け付ける引数 (関係名, 引数位置)。
/// `attacks` は局面内の全ての利きの組の列挙にも使われる。
const RELAXED_IN: &[(&str, usize)] = &[("attacks", 0)];

/// 関係 `name` を引数 `args` で問い合わせ、全ての束縛を返す。
pub fn call(name: &str, args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let sig = mode::lookup(name).with_context(|| format!("unknown relation: {}", name))?;

    check_args(sig, args)?;

    mylog::log_query(sig, args);

    let res = match sig.name {
        "make_move" => call_make_move(args)?,
        "attacks" => call_attacks(args)?,
        "different_pos" => call_different_pos(args)?,
        "behind" => call_behind(args)?,
        "piece_at" => call_piece_at(args)?,
        "other_side" => call_other_side(args)?,
        _ => bail!("relation has no implementation: {}", sig),
    };

    mylog::log_bindings(sig, res.len());

    Ok(res)
}

/// 引数の個数、型、モード、値の有効性をチェックする。
fn check_args(sig: &Signature, args: &[Option<Value>]) -> anyhow::Result<()> {
    ensure!(
        args.len() == sig.arity(),
        "{} takes {} argument(s), but {} given",
        sig,
        sig.arity(),
        args.len()
    );

    for (i, arg) in args.iter().enumerate() {
        let ty = sig.types[i];
        match arg {
            Some(value) => {
                ensure!(
                    value.arg_type() == ty,
                    "argument {} of {} must be {}, but got {}",
                    i,
                    sig,
                    ty,
                    value.arg_type()
                );
                ensure!(value.is_valid(), "argument {} of {} is invalid: {}", i, sig, value);
            }
            None => {
                let relaxed = RELAXED_IN.contains(&(sig.name, i));
                ensure!(
                    sig.modes[i] == Mode::Out || relaxed,
                    "argument {} of {} has mode in, but is free",
                    i,
                    sig
                );
                // 局面は列挙できない。ただし指し手適用の結果は除く。
                ensure!(
                    ty != ArgType::Position || (sig.name == "make_move" && i == 3),
                    "position argument {} of {} must be bound",
                    i,
                    sig
                );
            }
        }
    }

    Ok(())
}

fn square_arg(args: &[Option<Value>], i: usize) -> Option<Square> {
    args[i].as_ref().and_then(Value::as_square)
}

fn required<T>(value: Option<T>, i: usize) -> anyhow::Result<T> {
    value.with_context(|| format!("argument {} must be bound", i))
}

fn position_arg(args: &[Option<Value>], i: usize) -> anyhow::Result<&Position> {
    required(args[i].as_ref().and_then(Value::as_position), i)
}

fn call_make_move(args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let src = required(square_arg(args, 0), 0)?;
    let dst = required(square_arg(args, 1), 1)?;
    let pos = position_arg(args, 2)?;

    let binding = |after: Position| -> Binding {
        vec![src.into(), dst.into(), pos.clone().into(), after.into()]
    };

    let res = match args[3].as_ref().and_then(Value::as_position) {
        Some(after) => {
            if pos.verify_move(src, dst, after) {
                vec![binding(after.clone())]
            } else {
                vec![]
            }
        }
        None => pos.make_move(src, dst).into_iter().map(binding).collect(),
    };

    Ok(res)
}

fn call_attacks(args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let pos = position_arg(args, 2)?;

    let binding =
        |src: Square, dst: Square| -> Binding { vec![src.into(), dst.into(), pos.clone().into()] };

    let res = match (square_arg(args, 0), square_arg(args, 1)) {
        (Some(src), Some(dst)) => {
            if attack::attacks(src, dst, pos) {
                vec![binding(src, dst)]
            } else {
                vec![]
            }
        }
        (Some(src), None) => attack::attacked_from(src, pos)
            .into_iter()
            .map(|dst| binding(src, dst))
            .collect(),
        (None, dst) => attack::attack_pairs(pos)
            .into_iter()
            .filter(|&(_, d)| dst.map_or(true, |dst| d == dst))
            .map(|(s, d)| binding(s, d))
            .collect(),
    };

    Ok(res)
}

fn call_different_pos(args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let binding = |s1: Square, s2: Square| -> Binding { vec![s1.into(), s2.into()] };

    let res = match (square_arg(args, 0), square_arg(args, 1)) {
        (Some(s1), Some(s2)) => {
            if relation::different_pos(s1, s2) {
                vec![binding(s1, s2)]
            } else {
                vec![]
            }
        }
        (Some(s1), None) => relation::different_from(s1)
            .map(|s2| binding(s1, s2))
            .collect(),
        (None, Some(s2)) => relation::different_from(s2)
            .map(|s1| binding(s1, s2))
            .collect(),
        (None, None) => relation::different_pos_pairs()
            .map(|(s1, s2)| binding(s1, s2))
            .collect(),
    };

    Ok(res)
}

fn call_behind(args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let front = required(square_arg(args, 0), 0)?;
    let middle = square_arg(args, 1);
    let back = square_arg(args, 2);
    let pos = position_arg(args, 3)?;

    let res = attack::behind_pairs(front, pos)
        .into_iter()
        .filter(|&(m, b)| middle.map_or(true, |sq| sq == m) && back.map_or(true, |sq| sq == b))
        .map(|(m, b)| -> Binding { vec![front.into(), m.into(), b.into(), pos.clone().into()] })
        .collect();

    Ok(res)
}

fn call_piece_at(args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let sq = required(square_arg(args, 0), 0)?;
    let pos = position_arg(args, 1)?;
    let side = required(args[2].as_ref().and_then(Value::as_side), 2)?;
    let kind = args[3].as_ref().and_then(Value::as_piece_kind);

    let res = pos
        .piece_at(sq, side)
        .into_iter()
        .filter(|&pk| kind.map_or(true, |kind| kind == pk))
        .map(|pk| -> Binding { vec![sq.into(), pos.clone().into(), side.into(), pk.into()] })
        .collect();

    Ok(res)
}

fn call_other_side(args: &[Option<Value>]) -> anyhow::Result<Vec<Binding>> {
    let s1 = required(args[0].as_ref().and_then(Value::as_side), 0)?;
    let s2 = required(args[1].as_ref().and_then(Value::as_side), 1)?;

    let res = if relation::other_side(s1, s2) {
        vec![vec![s1.into(), s2.into()]]
    } else {
        vec![]
    };

    Ok(res)
}
