//! 局面を与えて背景知識の関係を問い合わせ、全ての束縛を出力する。
//!
//! 引数 `_` は自由変数、`pos` は与えた局面を表す。それ以外はマス名、陣営名、駒種名。
//!
//! 例: `query '8/5k1r/8/6N1/8/8/8/8' attacks g5 _ pos`

use log::LevelFilter;
use structopt::StructOpt;

use tactic_relations::*;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    /// 局面の FEN (盤面部分のみでもよい)。
    fen: String,

    relation: String,

    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(opt.log_level)
        .chain(std::io::stderr())
        .apply()?;

    geometry::init();

    let pos = fen_decode_position(&opt.fen)?;
    mylog::log_position(&pos);

    let args = opt
        .args
        .iter()
        .map(|s| parse_arg(s, &pos))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let bindings = query::call(&opt.relation, &args)?;

    for binding in &bindings {
        let values: Vec<_> = binding.iter().map(Value::to_string).collect();
        println!("{}({})", opt.relation, values.join(", "));
    }
    println!("{} binding(s)", bindings.len());

    Ok(())
}

fn parse_arg(s: &str, pos: &Position) -> anyhow::Result<Option<Value>> {
    match s {
        "_" => Ok(None),
        "pos" => Ok(Some(Value::Position(pos.clone()))),
        _ => Value::parse_atom(s).map(Some),
    }
}
