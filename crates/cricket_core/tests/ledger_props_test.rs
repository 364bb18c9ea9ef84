//! Property tests for the scoring ledger.

use cricket_core::{
    ApplyDecision, EventSymbol, Innings, MatchState, MatchWinner, ScoringConfig, ScoringEngine, Timestamp,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Apply { symbol: EventSymbol, gap_ms: u64, withdraw: bool },
    Undo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (prop::sample::select(EventSymbol::ALL.to_vec()), 0u64..6_000, any::<bool>())
            .prop_map(|(symbol, gap_ms, withdraw)| Op::Apply { symbol, gap_ms, withdraw }),
        1 => Just(Op::Undo),
    ]
}

fn counters(state: &MatchState) -> [u32; 8] {
    [
        state.runs,
        state.wickets,
        state.legal_balls,
        state.extras,
        state.wides,
        state.no_balls,
        state.byes,
        state.leg_byes,
    ]
}

proptest! {
    /// Property: every reachable state satisfies the ledger invariants
    #[test]
    fn prop_ledger_invariants_hold(overs in 1u32..4, ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut engine = ScoringEngine::new(ScoringConfig::default().with_overs(overs)).unwrap();
        let mut now_ms = 0u64;
        let mut first_innings: Option<(u32, u32, u32)> = None;

        for op in ops {
            match op {
                Op::Apply { symbol, gap_ms, withdraw } => {
                    now_ms += gap_ms;
                    if withdraw {
                        engine.clear_last_event();
                    }
                    let before = engine.state().clone();
                    let decision = engine.apply(symbol, Timestamp::from_millis(now_ms));
                    if decision != ApplyDecision::Applied {
                        prop_assert_eq!(engine.state(), &before);
                    }
                }
                Op::Undo => {
                    engine.undo_last();
                }
            }

            let state = engine.state();
            prop_assert!(state.check_invariants().is_ok(), "{:?}", state.check_invariants());
            prop_assert_eq!(state.extras, state.wides + state.no_balls + state.byes + state.leg_byes);
            prop_assert!(state.wickets <= 10);
            prop_assert!(state.legal_balls <= overs * 6);
            if state.match_complete {
                prop_assert!(state.winner != MatchWinner::None);
            }

            if state.innings == Innings::Second {
                let snapshot = (state.first_innings_runs, state.first_innings_wickets, state.first_innings_balls);
                match first_innings {
                    None => first_innings = Some(snapshot),
                    Some(recorded) => prop_assert_eq!(recorded, snapshot),
                }
            }
        }
    }

    /// Property: apply then undo restores the counters unless the ball ended an innings
    #[test]
    fn prop_undo_is_inverse(
        prefix in prop::collection::vec(prop::sample::select(EventSymbol::ALL.to_vec()), 0..30),
        symbol in prop::sample::select(EventSymbol::ALL.to_vec()),
    ) {
        let mut engine = ScoringEngine::new(ScoringConfig::instant().with_overs(20)).unwrap();
        let mut now_ms = 0u64;
        for s in prefix {
            engine.clear_last_event();
            engine.apply(s, Timestamp::from_millis(now_ms));
            now_ms += 10;
        }

        let before = engine.state().clone();
        engine.clear_last_event();
        let decision = engine.apply(symbol, Timestamp::from_millis(now_ms));
        prop_assume!(decision == ApplyDecision::Applied);
        prop_assume!(engine.state().innings == before.innings && !engine.state().match_complete);

        engine.undo_last();
        prop_assert_eq!(counters(engine.state()), counters(&before));
        prop_assert_eq!(&engine.state().ball_history, &before.ball_history);
        if symbol != EventSymbol::NoBall {
            prop_assert_eq!(engine.state().free_hit, before.free_hit && !symbol.is_legal_delivery());
        }
    }
}
