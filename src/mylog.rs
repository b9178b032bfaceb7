//! 問い合わせ、ルール評価のログ出力。

use log::{debug, info, trace};

use crate::chess::Move;
use crate::clause::Clause;
use crate::coverage::Coverage;
use crate::mode::Signature;
use crate::position::Position;
use crate::query::Value;

/// 関係の問い合わせ開始ログを出力する。自由な引数は `_` で表す。
pub fn log_query(sig: &Signature, args: &[Option<Value>]) {
    let args: Vec<_> = args
        .iter()
        .map(|arg| arg.as_ref().map_or_else(|| "_".to_owned(), Value::to_string))
        .collect();
    trace!("query: {}({})", sig.name, args.join(", "));
}

/// 関係の問い合わせで得られた束縛数のログを出力する。
pub fn log_bindings(sig: &Signature, count: usize) {
    trace!("{}: {} binding(s)", sig, count);
}

/// 評価するルールのログを出力する。
pub fn log_clause(clause: &Clause) {
    debug!("clause: {}", clause);
}

/// 与えられた局面をログ出力する。
pub fn log_position(pos: &Position) {
    debug!("position:");
    for line in pos.to_string().lines() {
        debug!("{}", line);
    }
}

/// ルールの照合結果のログを出力する。
pub fn log_match(clause: &Clause, mv: Move, count: usize) {
    if count > 0 {
        info!("{}: matched {} ({} binding(s))", mv, clause, count);
    } else {
        info!("{}: not matched {}", mv, clause);
    }
}

/// ルールが提案した指し手のログを出力する。
pub fn log_suggestions(clause: &Clause, mvs: &[Move]) {
    let mvs: Vec<_> = mvs.iter().map(Move::to_string).collect();
    debug!("{}: suggested [{}]", clause, mvs.join(", "));
}

/// 局面リストに対するルールの集計結果のログを出力する。
pub fn log_coverage(clause: &Clause, coverage: &Coverage) {
    info!("tactic: {}", clause);
    info!("{}", coverage);
}
