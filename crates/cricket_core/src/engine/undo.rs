use crate::models::{DeliveryKind, DeliveryRecord, MatchState};

/// Pop the newest delivery and reverse its counter changes.
///
/// Known gaps, kept on purpose so undo stays a pure inverse of the record:
/// undoing a no-ball clears the free hit rather than restoring whatever
/// preceded it, and an innings split or match result is never reversed.
pub(super) fn undo_last(state: &mut MatchState) -> Option<DeliveryRecord> {
    let record = state.ball_history.pop()?;
    let kind = record.kind;

    state.runs = state.runs.saturating_sub(kind.runs());
    if kind.is_extra() {
        state.extras = state.extras.saturating_sub(1);
    }
    if kind.is_legal() {
        state.legal_balls = state.legal_balls.saturating_sub(1);
    }

    match kind {
        DeliveryKind::Wicket => state.wickets = state.wickets.saturating_sub(1),
        DeliveryKind::NoBall => {
            state.no_balls = state.no_balls.saturating_sub(1);
            state.free_hit = false;
        }
        DeliveryKind::Wide => state.wides = state.wides.saturating_sub(1),
        DeliveryKind::Bye => state.byes = state.byes.saturating_sub(1),
        DeliveryKind::LegBye => state.leg_byes = state.leg_byes.saturating_sub(1),
        DeliveryKind::Runs(_) | DeliveryKind::DotBall => {}
    }

    state.last_action = format!("Undid: {}", record.notation());
    state.last_event_symbol = None;
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventSymbol, Timestamp};

    fn push(state: &mut MatchState, kind: DeliveryKind) {
        state.ball_history.push(DeliveryRecord {
            kind,
            symbol: EventSymbol::DotBall,
            free_hit: false,
            at: Timestamp::ZERO,
        });
    }

    #[test]
    fn test_empty_history() {
        let mut state = MatchState::new(20);
        assert!(undo_last(&mut state).is_none());
        assert_eq!(state.last_action, "Match Started");
    }

    #[test]
    fn test_undo_runs() {
        let mut state = MatchState::new(20);
        state.runs = 10;
        state.legal_balls = 2;
        push(&mut state, DeliveryKind::Runs(4));
        push(&mut state, DeliveryKind::Runs(6));

        let record = undo_last(&mut state).unwrap();
        assert_eq!(record.kind, DeliveryKind::Runs(6));
        assert_eq!(state.runs, 4);
        assert_eq!(state.legal_balls, 1);
        assert_eq!(state.last_action, "Undid: 6");
    }

    #[test]
    fn test_undo_no_ball_drops_free_hit() {
        let mut state = MatchState::new(20);
        state.runs = 1;
        state.extras = 1;
        state.no_balls = 1;
        state.free_hit = true;
        push(&mut state, DeliveryKind::NoBall);

        undo_last(&mut state);
        assert_eq!((state.runs, state.extras, state.no_balls, state.legal_balls), (0, 0, 0, 0));
        assert!(!state.free_hit);
    }

    #[test]
    fn test_undo_bye_reverses_extra_and_ball() {
        let mut state = MatchState::new(20);
        state.runs = 5;
        state.extras = 2;
        state.wides = 1;
        state.byes = 1;
        state.legal_balls = 3;
        push(&mut state, DeliveryKind::Bye);

        undo_last(&mut state);
        assert_eq!((state.runs, state.extras, state.byes, state.wides), (4, 1, 0, 1));
        assert_eq!(state.legal_balls, 2);
    }

    #[test]
    fn test_decrements_floor_at_zero() {
        let mut state = MatchState::new(20);
        push(&mut state, DeliveryKind::LegBye);
        undo_last(&mut state);
        assert_eq!((state.runs, state.extras, state.leg_byes, state.legal_balls), (0, 0, 0, 0));
    }

    #[test]
    fn test_undo_clears_last_symbol() {
        let mut state = MatchState::new(20);
        state.wickets = 1;
        state.legal_balls = 1;
        state.last_event_symbol = Some(EventSymbol::Wicket);
        push(&mut state, DeliveryKind::Wicket);

        undo_last(&mut state);
        assert_eq!(state.wickets, 0);
        assert_eq!(state.last_event_symbol, None);
        assert_eq!(state.last_action, "Undid: W");
    }
}
