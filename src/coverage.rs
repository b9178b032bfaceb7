//! 局面リストに対する戦術パターンのルールの集計。
//!
//! 各局面について、手番側の候補手からルールが成り立つ指し手を提案させ、
//! ルールが成り立った局面の割合(カバー率)と提案数を数える。

use crate::chess::*;
use crate::clause::Clause;
use crate::mylog;
use crate::position::Position;

/// 1 局面あたりの提案数の既定の上限。
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// 集計結果。
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Coverage {
    /// 局面の総数。
    pub total_positions: usize,
    /// ルールが成り立つ指し手が 1 つでもあった局面の数。
    pub total_matches: usize,
    /// 提案された指し手の総数。
    pub num_suggestions: usize,
    /// 何も提案されなかった局面の数。
    pub empty_suggestions: usize,
}

impl Coverage {
    /// 1 局面分の提案を集計に加える。
    pub fn add(&mut self, suggestions: &[Move]) {
        self.total_positions += 1;
        if suggestions.is_empty() {
            self.empty_suggestions += 1;
        } else {
            self.total_matches += 1;
            self.num_suggestions += suggestions.len();
        }
    }

    /// カバー率 (0.0..=1.0) を返す。局面がなければ 0.0。
    pub fn ratio(&self) -> f64 {
        if self.total_positions == 0 {
            return 0.0;
        }
        self.total_matches as f64 / self.total_positions as f64
    }

    /// ルールが成り立った局面あたりの平均提案数を返す。
    pub fn avg_suggestions(&self) -> Option<f64> {
        (self.total_matches > 0).then(|| self.num_suggestions as f64 / self.total_matches as f64)
    }
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "positions: {}, coverage: {:.2}%",
            self.total_positions,
            100.0 * self.ratio()
        )?;
        if let Some(avg) = self.avg_suggestions() {
            write!(f, ", avg suggestions: {:.2}", avg)?;
        }
        write!(f, ", empty: {}/{}", self.empty_suggestions, self.total_positions)
    }
}

/// (手番, 局面) のリストについてルールを集計する。
pub fn coverage(
    clause: &Clause,
    positions: &[(Side, Position)],
    limit: usize,
) -> anyhow::Result<Coverage> {
    let mut res = Coverage::default();

    for (side, pos) in positions {
        let suggestions = clause.suggest(pos, *side, limit)?;
        res.add(&suggestions);
    }

    mylog::log_coverage(clause, &res);

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let mut cov = Coverage::default();
        assert_eq!(cov.ratio(), 0.0);
        assert_eq!(cov.avg_suggestions(), None);

        cov.add(&[Move::new(SQ_B5, SQ_C7), Move::new(SQ_B5, SQ_D6)]);
        cov.add(&[]);
        cov.add(&[Move::new(SQ_C1, SQ_G5)]);
        cov.add(&[]);

        assert_eq!(
            cov,
            Coverage {
                total_positions: 4,
                total_matches: 2,
                num_suggestions: 3,
                empty_suggestions: 2,
            }
        );
        assert_eq!(cov.ratio(), 0.5);
        assert_eq!(cov.avg_suggestions(), Some(1.5));
        assert_eq!(
            cov.to_string(),
            "positions: 4, coverage: 50.00%, avg suggestions: 1.50, empty: 2/4"
        );
    }
}
