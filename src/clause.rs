//! 戦術パターンのルール `f(Pos,From,To):-lit1(...),lit2(...).` とその評価。
//!
//! 本体の各リテラルは背景知識の関係の呼び出しで、`query::call()` により評価する。
//! 変数は英大文字または `_` で始まる識別子で、`_` 単独は無名変数(毎回新しい変数)。
//! それ以外の識別子はマス名、陣営名、駒種名の定数。

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, ensure, Context as _};

use crate::bias::Bias;
use crate::chess::*;
use crate::mode;
use crate::mylog;
use crate::position::Position;
use crate::query::{self, Value};
use crate::syntax::{Arg, Fact, Parser};

/// 無名変数。
pub const ANONYMOUS: &str = "_";

/// リテラルの引数。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Term {
    Var(String),
    Const(Value),
}

impl Term {
    fn from_arg(arg: &Arg) -> anyhow::Result<Self> {
        let atom = arg
            .as_atom()
            .with_context(|| format!("tuple is not a term: {}", arg))?;

        if is_var_name(atom) {
            Ok(Self::Var(atom.to_owned()))
        } else {
            Ok(Self::Const(Value::parse_atom(atom)?))
        }
    }

    /// 名前のある変数なら、その名前を返す。
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Self::Var(name) if name != ANONYMOUS => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Var(name) => f.write_str(name),
            Self::Const(value) => write!(f, "{}", value),
        }
    }
}

fn is_var_name(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_uppercase() || c == '_')
}

/// リテラル `name(term, ...)`。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Literal {
    pub name: String,
    pub args: Vec<Term>,
}

impl Literal {
    fn from_fact(fact: &Fact) -> anyhow::Result<Self> {
        let args = fact
            .args
            .iter()
            .map(Term::from_arg)
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("invalid literal: {}", fact))?;

        Ok(Self {
            name: fact.name.clone(),
            args,
        })
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.name)?;
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

/// 変数の束縛。
pub type Subst = BTreeMap<String, Value>;

/// ルール。
///
/// パース時に本体のリテラルは `mode::rank()` の順に安定ソートされる。
/// 局面を作る関係が先に評価されるので、後続のリテラルの `in` 引数が束縛されやすくなる。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Clause {
    pub head: Literal,
    pub body: Vec<Literal>,
}

impl Clause {
    pub fn new(head: Literal, mut body: Vec<Literal>) -> Self {
        sort_body(&mut body);
        Self { head, body }
    }

    /// ルールに現れる名前のある変数を、初出順に全て返す。
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut res = Vec::new();

        for lit in std::iter::once(&self.head).chain(&self.body) {
            for name in lit.args.iter().filter_map(Term::var_name) {
                if seen.insert(name) {
                    res.push(name);
                }
            }
        }

        res
    }

    /// 全てのリテラルが関係のシグネチャ(名前、引数の個数、定数の型)に合うかチェックする。
    /// 頭部の引数は全て名前のある変数でなければならない。
    pub fn check_signatures(&self) -> anyhow::Result<()> {
        ensure!(
            self.head.name == mode::HEAD.name && self.head.args.len() == mode::HEAD.arity(),
            "head must be {}: {}",
            mode::HEAD,
            self.head
        );
        ensure!(
            self.head.args.iter().all(|term| term.var_name().is_some()),
            "head arguments must be named variables: {}",
            self.head
        );

        for lit in &self.body {
            let sig = mode::lookup(&lit.name)
                .with_context(|| format!("unknown relation: {}", lit.name))?;
            ensure!(
                lit.args.len() == sig.arity(),
                "{} takes {} argument(s): {}",
                sig,
                sig.arity(),
                lit
            );
            for (term, &ty) in lit.args.iter().zip(sig.types) {
                if let Term::Const(value) = term {
                    ensure!(
                        value.arg_type() == ty,
                        "constant {} must be {}: {}",
                        value,
                        ty,
                        lit
                    );
                }
            }
        }

        Ok(())
    }

    /// ルールが探索空間の上限に収まっているかチェックする。
    pub fn check_bias(&self, bias: &Bias) -> anyhow::Result<()> {
        ensure!(
            self.body.len() <= bias.max_body,
            "body has {} literal(s), but max_body is {}",
            self.body.len(),
            bias.max_body
        );

        let n_vars = self.variables().len();
        ensure!(
            n_vars <= bias.max_vars,
            "clause has {} variable(s), but max_vars is {}",
            n_vars,
            bias.max_vars
        );

        Ok(())
    }

    /// 頭部を (局面, 移動元, 移動先) で束縛し、本体を満たす変数の束縛を全て返す。
    ///
    /// 束縛がないことはエラーではない。`in` 引数が自由なリテラルに達した場合などはエラー。
    pub fn evaluate(&self, pos: &Position, src: Square, dst: Square) -> anyhow::Result<Vec<Subst>> {
        self.check_signatures()?;

        mylog::log_clause(self);

        let head_values: [Value; 3] = [pos.clone().into(), src.into(), dst.into()];
        let mut subst = Subst::new();
        if !unify(&self.head.args, &head_values, &mut subst) {
            return Ok(vec![]);
        }

        let mut res = Vec::new();
        solve(&self.body, subst, &mut res)?;

        Ok(res)
    }

    /// 指し手 `mv` について、ルールが成り立つかどうかを返す。
    pub fn matches(&self, pos: &Position, mv: Move) -> anyhow::Result<bool> {
        let substs = self.evaluate(pos, mv.src(), mv.dst())?;

        mylog::log_match(self, mv, substs.len());

        Ok(!substs.is_empty())
    }

    /// 局面の `side` 側の候補手のうち、ルールが成り立つものを昇順に最大 `limit` 個返す。
    ///
    /// 候補手は `Position::candidate_moves()` による幾何的なもので、合法性は考慮しない。
    pub fn suggest(&self, pos: &Position, side: Side, limit: usize) -> anyhow::Result<Vec<Move>> {
        let mut res = Vec::new();

        for mv in pos.candidate_moves(side) {
            if res.len() >= limit {
                break;
            }
            if !self.evaluate(pos, mv.src(), mv.dst())?.is_empty() {
                res.push(mv);
            }
        }

        mylog::log_suggestions(self, &res);

        Ok(res)
    }
}

impl std::str::FromStr for Clause {
    type Err = anyhow::Error;

    /// `head:-lit,...,lit.` または `head.` をパースする。
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut parser = Parser::new(s);

        let head = Literal::from_fact(&parser.fact()?)?;

        let body = if parser.eat('.') {
            vec![]
        } else {
            parser.expect_str(":-")?;
            let facts = parser.facts()?;
            parser.expect('.')?;
            facts
                .iter()
                .map(Literal::from_fact)
                .collect::<anyhow::Result<Vec<_>>>()?
        };

        ensure!(parser.is_eof(), "trailing characters after clause");

        let clause = Self::new(head, body);
        clause.check_signatures()?;

        Ok(clause)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.body.is_empty() {
            f.write_str(":-")?;
            for (i, lit) in self.body.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", lit)?;
            }
        }
        f.write_str(".")
    }
}

/// 本体のリテラルを関係の優先度順に安定ソートする。
pub fn sort_body(body: &mut [Literal]) {
    body.sort_by_key(|lit| mode::rank(&lit.name));
}

/// 本体の先頭から順に評価し、全てを満たす束縛を `res` に追加する。
fn solve(body: &[Literal], subst: Subst, res: &mut Vec<Subst>) -> anyhow::Result<()> {
    let (lit, rest) = match body.split_first() {
        Some(x) => x,
        None => {
            res.push(subst);
            return Ok(());
        }
    };

    let args: Vec<Option<Value>> = lit
        .args
        .iter()
        .map(|term| match term {
            Term::Const(value) => Some(value.clone()),
            Term::Var(_) => term.var_name().and_then(|name| subst.get(name).cloned()),
        })
        .collect();

    let bindings = query::call(&lit.name, &args).with_context(|| format!("in literal {}", lit))?;

    for binding in bindings {
        let mut next = subst.clone();
        if unify(&lit.args, &binding, &mut next) {
            solve(rest, next, res)?;
        }
    }

    Ok(())
}

/// 引数の列と値の列を単一化する。矛盾があれば `false` を返す。
///
/// 同じリテラル内に同じ自由変数が複数回現れる場合も、ここで一致が保証される。
fn unify(terms: &[Term], values: &[Value], subst: &mut Subst) -> bool {
    for (term, value) in terms.iter().zip(values) {
        match term {
            Term::Const(c) => {
                if c != value {
                    return false;
                }
            }
            Term::Var(_) => {
                let name = match term.var_name() {
                    Some(name) => name,
                    None => continue,
                };
                match subst.get(name) {
                    Some(old) if old != value => return false,
                    Some(_) => {}
                    None => {
                        subst.insert(name.to_owned(), value.clone());
                    }
                }
            }
        }
    }

    true
}

/// 1 行 1 ルールのテキストから、ルールを全て読む。空行と `%` で始まる行は無視する。
pub fn clauses_decode(s: &str) -> anyhow::Result<Vec<Clause>> {
    let mut res = Vec::new();

    for (i, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let clause = line
            .parse::<Clause>()
            .with_context(|| format!("line {}: invalid clause: {}", i + 1, line))?;
        res.push(clause);
    }

    if res.is_empty() {
        bail!("no clause found");
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORK: &str = "f(Pos,From,To):-attacks(To,S1,Pos1),different_pos(S1,S2),\
                        make_move(From,To,Pos,Pos1),attacks(To,S2,Pos1).";

    #[test]
    fn test_parse_sorts_body() {
        let clause: Clause = FORK.parse().unwrap();

        let names: Vec<_> = clause.body.iter().map(|lit| lit.name.as_str()).collect();
        assert_eq!(names, ["make_move", "attacks", "attacks", "different_pos"]);
        assert_eq!(
            clause.to_string(),
            "f(Pos,From,To):-make_move(From,To,Pos,Pos1),attacks(To,S1,Pos1),\
             attacks(To,S2,Pos1),different_pos(S1,S2)."
        );
        assert_eq!(clause.variables(), ["Pos", "From", "To", "Pos1", "S1", "S2"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!("g(Pos,From,To):-other_side(white,black).".parse::<Clause>().is_err());
        assert!("f(Pos,From,e4):-other_side(white,black).".parse::<Clause>().is_err());
        assert!("f(Pos,From,To):-legal_move(From,To,Pos).".parse::<Clause>().is_err());
        assert!("f(Pos,From,To):-other_side(white).".parse::<Clause>().is_err());
        assert!("f(Pos,From,To):-other_side(white,e4).".parse::<Clause>().is_err());
        assert!("f(Pos,From,To):-other_side(white,black)".parse::<Clause>().is_err());
        assert!("f(Pos,From,To):-piece_at(From,Pos,white,dragon).".parse::<Clause>().is_err());
    }

    #[test]
    fn test_check_bias() {
        let clause: Clause = FORK.parse().unwrap();

        assert!(clause.check_bias(&Bias::default()).is_ok());
        assert!(clause.check_bias(&Bias::new(3, 6)).is_err());
        assert!(clause.check_bias(&Bias::new(4, 5)).is_err());
    }

    #[test]
    fn test_evaluate() {
        let pos = Position::new([
            Placement::new(WHITE, KNIGHT, SQ_B5),
            Placement::new(BLACK, KING, SQ_E8),
            Placement::new(BLACK, ROOK, SQ_A8),
        ]);
        let clause: Clause = FORK.parse().unwrap();

        let substs = clause.evaluate(&pos, SQ_B5, SQ_C7).unwrap();
        assert_eq!(substs.len(), 2);
        assert_eq!(substs[0]["S1"], Value::Square(SQ_A8));
        assert_eq!(substs[0]["S2"], Value::Square(SQ_E8));

        assert!(clause.matches(&pos, Move::new(SQ_B5, SQ_C7)).unwrap());
        assert!(!clause.matches(&pos, Move::new(SQ_B5, SQ_D6)).unwrap());
    }

    #[test]
    fn test_suggest() {
        let pos = Position::new([
            Placement::new(WHITE, KNIGHT, SQ_B5),
            Placement::new(BLACK, KING, SQ_E8),
            Placement::new(BLACK, ROOK, SQ_A8),
        ]);
        let clause: Clause = FORK.parse().unwrap();

        assert_eq!(
            clause.suggest(&pos, WHITE, 3).unwrap(),
            [Move::new(SQ_B5, SQ_C7)]
        );
        assert!(clause.suggest(&pos, WHITE, 0).unwrap().is_empty());
        // 黒の駒が利く白の駒はナイト 1 つしかない。
        assert!(clause.suggest(&pos, BLACK, 3).unwrap().is_empty());
    }

    #[test]
    fn test_evaluate_unbound_in_argument() {
        let pos = Position::new([Placement::new(WHITE, KNIGHT, SQ_B5)]);

        // piece_at の陣営は in モード。
        let clause: Clause = "f(Pos,From,To):-piece_at(From,Pos,S,knight).".parse().unwrap();
        assert!(clause.evaluate(&pos, SQ_B5, SQ_C7).is_err());

        let clause: Clause = "f(Pos,From,To):-piece_at(From,Pos,white,K).".parse().unwrap();
        let substs = clause.evaluate(&pos, SQ_B5, SQ_C7).unwrap();
        assert_eq!(substs.len(), 1);
        assert_eq!(substs[0]["K"], Value::PieceKind(KNIGHT));
    }

    #[test]
    fn test_clauses_decode() {
        let s = format!("% fork\n\n{}\nf(Pos,From,To).\n", FORK);
        let clauses = clauses_decode(&s).unwrap();

        assert_eq!(clauses.len(), 2);
        assert!(clauses[1].body.is_empty());
        assert!(clauses_decode("% nothing\n").is_err());
    }
}
