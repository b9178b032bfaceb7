#[allow(unused_imports)]
use pretty_assertions::{assert_eq, assert_ne};

use tactic_relations::*;

const FORK: &str = "f(Pos,From,To):-make_move(From,To,Pos,Pos1),attacks(To,S1,Pos1),\
                    attacks(To,S2,Pos1),different_pos(S1,S2).";

const PIN_WHITE: &str = "f(Pos,From,To):-make_move(From,To,Pos,Pos1),behind(To,M,B,Pos1),\
                         piece_at(To,Pos1,white,_),piece_at(M,Pos1,black,_),\
                         piece_at(B,Pos1,black,_),different_pos(M,B).";

const FENS: &[&str] = &[
    "r3k3/8/8/1N6/8/8/8/8",
    "3q4/8/5n2/8/8/8/8/2B5",
    "7k/3r4/8/8/8/8/8/3Q4",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
];

#[test]
fn test_fork_clause_equals_detector() {
    let clause: Clause = FORK.parse().unwrap();

    for fen in FENS {
        let pos = fen_decode_position(fen).unwrap();

        for (src, dst) in different_pos_pairs() {
            let expected: Vec<_> = fork_bindings(&pos, src, dst)
                .into_iter()
                .map(|b| (Value::Square(b.first), Value::Square(b.second)))
                .collect();
            let actual: Vec<_> = clause
                .evaluate(&pos, src, dst)
                .unwrap()
                .into_iter()
                .map(|subst| (subst["S1"].clone(), subst["S2"].clone()))
                .collect();

            assert_eq!(actual, expected, "{} {}{}", fen, src, dst);
        }
    }
}

#[test]
fn test_pin_clause_equals_detector() {
    let clause: Clause = PIN_WHITE.parse().unwrap();

    for fen in FENS {
        let pos = fen_decode_position(fen).unwrap();

        // 白の駒を空きマスへ動かす手に限れば、白に固定したルールと一致する。
        let moves = different_pos_pairs().filter(|&(src, dst)| {
            pos.placements_at(src).count() == 1
                && !pos.piece_at(src, WHITE).is_empty()
                && pos.placements_at(dst).next().is_none()
        });

        for (src, dst) in moves {
            let matched = !clause.evaluate(&pos, src, dst).unwrap().is_empty();
            assert_eq!(matched, pin(&pos, src, dst), "{} {}{}", fen, src, dst);
        }
    }
}

#[test]
fn test_roundtrip_display() {
    for s in [FORK, PIN_WHITE] {
        let clause: Clause = s.parse().unwrap();
        let again: Clause = clause.to_string().parse().unwrap();
        assert_eq!(again, clause);
    }
}

#[test]
fn test_anonymous_variables_are_independent() {
    let pos = fen_decode_position("8/8/8/8/8/8/8/Nb6").unwrap();

    // 2 つの `_` は同じ値である必要はない。
    let clause: Clause =
        "f(Pos,From,To):-piece_at(From,Pos,white,_),piece_at(To,Pos,black,_).".parse().unwrap();
    assert_eq!(clause.evaluate(&pos, SQ_A1, SQ_B1).unwrap().len(), 1);

    // 名前のある変数は一致しなければならない。
    let clause: Clause =
        "f(Pos,From,To):-piece_at(From,Pos,white,K),piece_at(To,Pos,black,K).".parse().unwrap();
    assert!(clause.evaluate(&pos, SQ_A1, SQ_B1).unwrap().is_empty());
}
