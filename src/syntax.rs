//! 事実・ルールの簡易構文のパーサ。
//!
//! 以下の形のみを扱う:
//!
//! * 事実: `name` または `name(arg, ...)`
//! * 引数: 識別子 (英数字と `_`)、または括弧で囲んだ引数の組 `(arg, ...)`
//! * `%` から行末まではコメント
//!
//! 文字列は ASCII を想定している。

use anyhow::{bail, ensure, Context as _};

/// 事実の引数。
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Arg {
    Atom(String),
    Tuple(Vec<Arg>),
}

impl Arg {
    /// アトムならその文字列を返す。
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(s) => Some(s),
            Self::Tuple(_) => None,
        }
    }

    /// アトムのみからなる組なら、その文字列たちを返す。
    pub fn as_atom_tuple(&self) -> Option<Vec<&str>> {
        match self {
            Self::Atom(_) => None,
            Self::Tuple(args) => args.iter().map(Arg::as_atom).collect(),
        }
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Atom(s) => f.write_str(s),
            Self::Tuple(args) => {
                f.write_str("(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
        }
    }
}

/// 事実 `name(arg, ...)`。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fact {
    pub name: String,
    pub args: Vec<Arg>,
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            write_args(f, &self.args)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn write_args(f: &mut std::fmt::Formatter, args: &[Arg]) -> std::fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

/// 文字列上のカーソル。
#[derive(Debug)]
pub struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// 空白とコメントを読み飛ばした上で、末尾に達したかどうかを返す。
    pub fn is_eof(&mut self) -> bool {
        self.skip_ws();
        self.i >= self.s.len()
    }

    /// 空白とコメントを読み飛ばした上で、次の文字を返す(消費しない)。
    pub fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.s[self.i..].chars().next()
    }

    /// 次の文字が `c` なら消費して `true` を返す。
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// 次の文字が `c` であることを要求し、消費する。
    pub fn expect(&mut self, c: char) -> anyhow::Result<()> {
        match self.peek() {
            Some(got) if got == c => {
                self.i += c.len_utf8();
                Ok(())
            }
            Some(got) => bail!("'{}' expected, but got '{}' at {}", c, got, self.i),
            None => bail!("'{}' expected, but reached end of input", c),
        }
    }

    /// 次の文字列が `tok` であることを要求し、消費する。
    pub fn expect_str(&mut self, tok: &str) -> anyhow::Result<()> {
        self.skip_ws();
        ensure!(
            self.s[self.i..].starts_with(tok),
            "\"{}\" expected at {}",
            tok,
            self.i
        );
        self.i += tok.len();
        Ok(())
    }

    /// 識別子を読む。
    pub fn ident(&mut self) -> anyhow::Result<&'a str> {
        self.skip_ws();

        let s: &'a str = self.s;
        let rest = &s[self.i..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        ensure!(len > 0, "identifier expected at {}", self.i);

        self.i += len;
        Ok(&rest[..len])
    }

    /// 引数を読む。
    pub fn arg(&mut self) -> anyhow::Result<Arg> {
        if self.eat('(') {
            let args = self.args_until(')')?;
            Ok(Arg::Tuple(args))
        } else {
            Ok(Arg::Atom(self.ident()?.to_owned()))
        }
    }

    /// 事実を読む。
    pub fn fact(&mut self) -> anyhow::Result<Fact> {
        let name = self.ident().context("predicate name expected")?.to_owned();

        let args = if self.eat('(') {
            self.args_until(')')?
        } else {
            vec![]
        };

        Ok(Fact { name, args })
    }

    /// `,` 区切りの事実の列を読む。少なくとも 1 つは必要。
    pub fn facts(&mut self) -> anyhow::Result<Vec<Fact>> {
        let mut res = vec![self.fact()?];
        while self.eat(',') {
            res.push(self.fact()?);
        }
        Ok(res)
    }

    /// `[fact, ...]` の形のリストを読む。空リストも許す。
    pub fn fact_list(&mut self) -> anyhow::Result<Vec<Fact>> {
        self.expect('[')?;
        if self.eat(']') {
            return Ok(vec![]);
        }
        let res = self.facts()?;
        self.expect(']')?;
        Ok(res)
    }

    fn args_until(&mut self, close: char) -> anyhow::Result<Vec<Arg>> {
        let mut args = vec![self.arg()?];
        while self.eat(',') {
            args.push(self.arg()?);
        }
        self.expect(close)?;
        Ok(args)
    }

    fn skip_ws(&mut self) {
        loop {
            let rest = &self.s[self.i..];
            let trimmed = rest.trim_start();
            self.i += rest.len() - trimmed.len();

            if trimmed.starts_with('%') {
                self.i += trimmed.find('\n').unwrap_or(trimmed.len());
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact() {
        let mut p = Parser::new("type(make_move, (square,square,pos , pos)).");

        let fact = p.fact().unwrap();
        assert_eq!(fact.name, "type");
        assert_eq!(fact.args[0].as_atom(), Some("make_move"));
        assert_eq!(
            fact.args[1].as_atom_tuple(),
            Some(vec!["square", "square", "pos", "pos"])
        );
        assert_eq!(fact.to_string(), "type(make_move,(square,square,pos,pos))");

        p.expect('.').unwrap();
        assert!(p.is_eof());
    }

    #[test]
    fn test_comment_and_list() {
        let mut p = Parser::new("% a comment\n[contents(white, rook, 1, 1), turn(black)] % tail");

        let facts = p.fact_list().unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[1].name, "turn");
        assert!(p.is_eof());

        assert!(Parser::new("[]").fact_list().unwrap().is_empty());
    }

    #[test]
    fn test_errors() {
        assert!(Parser::new("f(").fact().is_err());
        assert!(Parser::new("(a)").fact().is_err());
        assert!(Parser::new("f(a b)").fact().is_err());
        assert!(Parser::new("[f(a)").fact_list().is_err());
    }
}
