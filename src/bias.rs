//! ルール学習器の探索空間の宣言 (bias) の入出力。
//!
//! 宣言は関係のシグネチャ (`mode::HEAD`, `mode::RELATIONS`) と、ルールの大きさの上限からなる。
//! テキスト形式では 1 行に 1 つの事実を `.` で終えて書く:
//!
//! ```text
//! head_pred(f,3).
//! body_pred(make_move,4).
//! type(make_move,(square,square,pos,pos)).
//! direction(make_move,(in,in,in,out)).
//! max_body(4).
//! max_vars(6).
//! ```

use anyhow::{bail, ensure, Context as _};

use crate::mode::{self, ArgType, Mode, Signature};
use crate::syntax::{Fact, Parser};

/// ルールの大きさの上限。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Bias {
    /// 本体のリテラル数の上限。
    pub max_body: usize,
    /// ルールに現れる異なる変数の個数の上限(頭部の変数も含む)。
    pub max_vars: usize,
}

impl Bias {
    pub const DEFAULT_MAX_BODY: usize = 4;
    pub const DEFAULT_MAX_VARS: usize = 6;

    pub fn new(max_body: usize, max_vars: usize) -> Self {
        Self { max_body, max_vars }
    }

    /// 有効値かどうかを返す。
    ///
    /// 頭部だけで 3 変数を使うので、`max_vars` はそれ以上でなければならない。
    pub fn is_valid(self) -> bool {
        self.max_body > 0 && self.max_vars >= mode::HEAD.arity()
    }
}

impl Default for Bias {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_BODY, Self::DEFAULT_MAX_VARS)
    }
}

/// bias をテキスト形式にエンコードする。
pub fn bias_encode(bias: &Bias) -> String {
    let mut lines = Vec::new();

    lines.push(format!("head_pred({},{}).", mode::HEAD.name, mode::HEAD.arity()));
    for sig in &mode::RELATIONS {
        lines.push(format!("body_pred({},{}).", sig.name, sig.arity()));
    }

    for sig in std::iter::once(&mode::HEAD).chain(&mode::RELATIONS) {
        lines.push(format!("type({},({})).", sig.name, join(sig.types)));
        lines.push(format!("direction({},({})).", sig.name, join(sig.modes)));
    }

    lines.push(format!("max_body({}).", bias.max_body));
    lines.push(format!("max_vars({}).", bias.max_vars));

    let mut res = lines.join("\n");
    res.push('\n');
    res
}

fn join<T: std::fmt::Display>(xs: &[T]) -> String {
    xs.iter().map(T::to_string).collect::<Vec<_>>().join(",")
}

/// テキスト形式の bias をデコードする。
///
/// 関係の宣言は既知のシグネチャと一致しなければならない。上限の指定がなければ既定値を使う。
pub fn bias_decode(s: &str) -> anyhow::Result<Bias> {
    let mut parser = Parser::new(s);
    let mut bias = Bias::default();

    while !parser.is_eof() {
        let fact = parser.fact()?;
        parser
            .expect('.')
            .with_context(|| format!("fact must end with '.': {}", fact))?;

        bias_decode_fact(&fact, &mut bias).with_context(|| format!("invalid bias fact: {}", fact))?;
    }

    ensure!(bias.is_valid(), "invalid bias: {:?}", bias);

    Ok(bias)
}

fn bias_decode_fact(fact: &Fact, bias: &mut Bias) -> anyhow::Result<()> {
    match fact.name.as_str() {
        "head_pred" => {
            let (name, arity) = decode_pred(fact)?;
            ensure!(name == mode::HEAD.name, "unknown head predicate: {}", name);
            ensure!(arity == mode::HEAD.arity(), "arity mismatch");
        }
        "body_pred" => {
            let (name, arity) = decode_pred(fact)?;
            let sig = mode::lookup(name).with_context(|| format!("unknown relation: {}", name))?;
            ensure!(arity == sig.arity(), "arity mismatch");
        }
        "type" => {
            let (sig, atoms) = decode_decl(fact)?;
            let types = atoms
                .iter()
                .map(|atom| atom.parse::<ArgType>())
                .collect::<anyhow::Result<Vec<_>>>()?;
            ensure!(types == sig.types, "types mismatch");
        }
        "direction" => {
            let (sig, atoms) = decode_decl(fact)?;
            let modes = atoms
                .iter()
                .map(|atom| atom.parse::<Mode>())
                .collect::<anyhow::Result<Vec<_>>>()?;
            ensure!(modes == sig.modes, "modes mismatch");
        }
        "max_body" => bias.max_body = decode_number(fact)?,
        "max_vars" => bias.max_vars = decode_number(fact)?,
        _ => bail!("unknown fact"),
    }

    Ok(())
}

/// `name(pred, arity)` をデコードする。
fn decode_pred(fact: &Fact) -> anyhow::Result<(&str, usize)> {
    ensure!(fact.args.len() == 2, "2 arguments expected");

    let name = fact.args[0].as_atom().context("predicate name expected")?;
    let arity: usize = fact.args[1]
        .as_atom()
        .context("arity expected")?
        .parse()
        .context("arity must be a number")?;

    Ok((name, arity))
}

/// `name(pred, (atom, ...))` をデコードする。
fn decode_decl(fact: &Fact) -> anyhow::Result<(&'static Signature, Vec<&str>)> {
    ensure!(fact.args.len() == 2, "2 arguments expected");

    let name = fact.args[0].as_atom().context("predicate name expected")?;
    let sig = if name == mode::HEAD.name {
        &mode::HEAD
    } else {
        mode::lookup(name).with_context(|| format!("unknown relation: {}", name))?
    };

    let atoms = fact.args[1].as_atom_tuple().context("tuple expected")?;
    ensure!(atoms.len() == sig.arity(), "arity mismatch");

    Ok((sig, atoms))
}

fn decode_number(fact: &Fact) -> anyhow::Result<usize> {
    ensure!(fact.args.len() == 1, "1 argument expected");

    let n: usize = fact.args[0]
        .as_atom()
        .context("number expected")?
        .parse()
        .context("number expected")?;

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let s = bias_encode(&Bias::default());

        assert!(s.starts_with("head_pred(f,3).\nbody_pred(make_move,4).\n"));
        assert!(s.contains("type(piece_at,(square,pos,side,piece)).\n"));
        assert!(s.contains("direction(attacks,(in,out,out)).\n"));
        assert!(s.ends_with("max_body(4).\nmax_vars(6).\n"));
    }

    #[test]
    fn test_decode() {
        let s = bias_encode(&Bias::new(3, 8));
        assert_eq!(bias_decode(&s).unwrap(), Bias::new(3, 8));

        let s = "% only limits\nmax_body(2).\n\nbody_pred(behind,4).\n";
        assert_eq!(bias_decode(s).unwrap(), Bias::new(2, Bias::DEFAULT_MAX_VARS));

        assert_eq!(bias_decode("").unwrap(), Bias::default());
    }

    #[test]
    fn test_decode_errors() {
        // 未知の事実。
        assert!(bias_decode("max_depth(3).").is_err());
        // 未知の関係。
        assert!(bias_decode("body_pred(legal_move,3).").is_err());
        // 宣言が一致しない。
        assert!(bias_decode("body_pred(attacks,2).").is_err());
        assert!(bias_decode("direction(attacks,(in,in,out)).").is_err());
        assert!(bias_decode("type(other_side,(side,square)).").is_err());
        // 書式。
        assert!(bias_decode("max_body(4)").is_err());
        assert!(bias_decode("max_body(four).").is_err());
        // 上限が小さすぎる。
        assert!(bias_decode("max_body(0).").is_err());
        assert!(bias_decode("max_vars(2).").is_err());
    }
}
