//! 戦術パターンのルールを局面に当てはめる。
//!
//! * 指し手を与えた場合: その指し手についてルールが成り立つかを出力する。
//! * 指し手を省略した場合: 手番側の候補手からルールが成り立つ指し手を最大 `--limit` 個提案する。
//! * `--positions` を与えた場合: FEN リストの各局面で提案させ、ルールごとに集計する。
//!
//! ルールファイルは 1 行 1 ルール。空行と `%` で始まる行は無視する。

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context as _};
use log::LevelFilter;
use structopt::StructOpt;

use tactic_relations::*;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    /// bias ファイル。指定するとルールが探索空間に収まっているかもチェックする。
    #[structopt(long, parse(from_os_str))]
    bias: Option<PathBuf>,

    /// 束縛も全て出力する(指し手を与えた場合のみ)。
    #[structopt(long)]
    bindings: bool,

    /// 1 局面あたりの提案数の上限。
    #[structopt(long, default_value = "3")]
    limit: usize,

    /// FEN リストファイル (1 行 1 局面)。
    #[structopt(long, parse(from_os_str))]
    positions: Option<PathBuf>,

    #[structopt(parse(from_os_str))]
    tactics: PathBuf,

    /// 局面の FEN。`--positions` を与えない場合は必須。
    fen: Option<String>,

    /// 指し手 (例: "c1g5")。
    mv: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(opt.log_level)
        .chain(std::io::stderr())
        .apply()?;

    geometry::init();

    let clauses = clauses_decode(&read_file(&opt.tactics)?)?;

    if let Some(path) = &opt.bias {
        let bias = bias_decode(&read_file(path)?)?;
        for clause in &clauses {
            clause.check_bias(&bias)?;
        }
    }

    if let Some(path) = &opt.positions {
        let positions = fen_list_decode(read_file(path)?)?;
        ensure!(!positions.is_empty(), "no position found: {}", path.display());
        return run_coverage(&clauses, &positions, opt.limit);
    }

    let fen = opt.fen.as_ref().context("FEN or --positions is required")?;
    let (side, pos) = fen_decode(fen)?;
    mylog::log_position(&pos);

    match &opt.mv {
        Some(mv) => run_move(&clauses, &pos, move_decode(mv)?, opt.bindings),
        None => run_suggest(&clauses, &pos, side, opt.limit),
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read file: {}", path.display()))
}

fn run_move(clauses: &[Clause], pos: &Position, mv: Move, bindings: bool) -> anyhow::Result<()> {
    for clause in clauses {
        let substs = clause.evaluate(pos, mv.src(), mv.dst())?;
        mylog::log_match(clause, mv, substs.len());

        let mark = if substs.is_empty() { "-" } else { "match" };
        println!("{}\t{}", mark, clause);

        if bindings {
            for subst in &substs {
                let vars: Vec<_> = subst
                    .iter()
                    .filter(|(_, value)| value.as_position().is_none())
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect();
                println!("\t{}", vars.join(" "));
            }
        }
    }

    Ok(())
}

fn run_suggest(clauses: &[Clause], pos: &Position, side: Side, limit: usize) -> anyhow::Result<()> {
    for clause in clauses {
        let mvs: Vec<_> = clause
            .suggest(pos, side, limit)?
            .iter()
            .map(Move::to_string)
            .collect();

        let mark = if mvs.is_empty() { "-" } else { "match" };
        println!("{}\t{}\t{}", mark, clause, mvs.join(" "));
    }

    Ok(())
}

fn run_coverage(
    clauses: &[Clause],
    positions: &[(Side, Position)],
    limit: usize,
) -> anyhow::Result<()> {
    for clause in clauses {
        let cov = coverage(clause, positions, limit)?;
        println!("{}\t{}", clause, cov);
    }

    Ok(())
}
