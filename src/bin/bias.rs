//! ルール学習器に渡す bias を出力する。

use log::LevelFilter;
use structopt::StructOpt;

use tactic_relations::*;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(long, default_value = "4")]
    max_body: usize,

    #[structopt(long, default_value = "6")]
    max_vars: usize,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(opt.log_level)
        .chain(std::io::stderr())
        .apply()?;

    let bias = Bias::new(opt.max_body, opt.max_vars);
    anyhow::ensure!(bias.is_valid(), "invalid bias: {:?}", bias);

    print!("{}", bias_encode(&bias));

    Ok(())
}
