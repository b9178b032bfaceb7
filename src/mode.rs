//! 関係の型と引数モードの宣言。ルール学習器はこれを背景知識の宣言として読む。

use anyhow::bail;

/// 引数モード。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// 呼び出し側が束縛していなければならない。
    In,
    /// 自由でもよく、その場合は関係が値を列挙する。
    Out,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => bail!("invalid mode: {}", s),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 引数の型。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArgType {
    Position,
    Square,
    Side,
    PieceKind,
}

impl ArgType {
    /// 宣言における型名を返す。
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "pos",
            Self::Square => "square",
            Self::Side => "side",
            Self::PieceKind => "piece",
        }
    }
}

impl std::str::FromStr for ArgType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pos" => Ok(Self::Position),
            "square" => Ok(Self::Square),
            "side" => Ok(Self::Side),
            "piece" => Ok(Self::PieceKind),
            _ => bail!("invalid argument type: {}", s),
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 関係のシグネチャ(名前、各引数の型とモード)。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Signature {
    pub name: &'static str,
    pub types: &'static [ArgType],
    pub modes: &'static [Mode],
}

impl Signature {
    /// 引数の個数を返す。
    pub fn arity(&self) -> usize {
        debug_assert_eq!(self.types.len(), self.modes.len());

        self.types.len()
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity())
    }
}

use ArgType::{PieceKind as P, Position as Pos, Side as S, Square as Sq};
use Mode::{In, Out};

/// 学習対象の関係 `f(Pos, From, To)`。その定義は学習器が与える。
pub static HEAD: Signature = Signature {
    name: "f",
    types: &[Pos, Sq, Sq],
    modes: &[In, In, In],
};

/// 背景知識として公開する関係たち。
pub static RELATIONS: [Signature; 6] = [
    Signature {
        name: "make_move",
        types: &[Sq, Sq, Pos, Pos],
        modes: &[In, In, In, Out],
    },
    Signature {
        name: "attacks",
        types: &[Sq, Sq, Pos],
        modes: &[In, Out, Out],
    },
    Signature {
        name: "different_pos",
        types: &[Sq, Sq],
        modes: &[Out, Out],
    },
    Signature {
        name: "behind",
        types: &[Sq, Sq, Sq, Pos],
        modes: &[In, Out, Out, In],
    },
    Signature {
        name: "piece_at",
        types: &[Sq, Pos, S, P],
        modes: &[In, In, In, Out],
    },
    Signature {
        name: "other_side",
        types: &[S, S],
        modes: &[In, In],
    },
];

/// 名前から背景知識の関係のシグネチャを引く。
pub fn lookup(name: &str) -> Option<&'static Signature> {
    RELATIONS.iter().find(|sig| sig.name == name)
}

/// ルール本体のリテラルを並べる際の優先度を返す。小さいほど先に置く。
///
/// 局面を作る関係、局面から束縛を生む関係、駒を調べる関係、検査のみの関係の順。
pub fn rank(name: &str) -> u32 {
    match name {
        "make_move" => 0,
        "attacks" | "behind" => 1,
        "piece_at" => 2,
        _ => 3,
    }
}
