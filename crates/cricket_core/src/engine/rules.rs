use crate::models::{DeliveryKind, DeliveryRecord, EventSymbol, MatchState, Timestamp, MAX_WICKETS};

/// Apply one accepted symbol to the counters and append its record.
///
/// Gating (cooldown, duplicate, match over) has already happened.
pub(super) fn apply_delivery(state: &mut MatchState, event: EventSymbol, now: Timestamp) -> DeliveryRecord {
    let on_free_hit = state.free_hit && event.is_legal_delivery();

    let (kind, action) = match event {
        EventSymbol::NoBall => {
            add_extra(state, DeliveryKind::NoBall);
            state.free_hit = true;
            (DeliveryKind::NoBall, "NO BALL! (+1 run, Free Hit next)".to_string())
        }
        EventSymbol::Wide => {
            add_extra(state, DeliveryKind::Wide);
            (DeliveryKind::Wide, "WIDE! (+1 run)".to_string())
        }
        EventSymbol::Bye => {
            add_extra(state, DeliveryKind::Bye);
            (DeliveryKind::Bye, with_free_hit("BYE! (+1 run)", on_free_hit))
        }
        EventSymbol::LegBye => {
            add_extra(state, DeliveryKind::LegBye);
            (DeliveryKind::LegBye, with_free_hit("LEG BYE! (+1 run)", on_free_hit))
        }
        EventSymbol::DotBall => (DeliveryKind::DotBall, with_free_hit("Dot Ball", on_free_hit)),
        EventSymbol::Wicket if on_free_hit => {
            (DeliveryKind::DotBall, "Free Hit - No Wicket (Dot Ball)".to_string())
        }
        EventSymbol::Wicket => {
            state.wickets = (state.wickets + 1).min(MAX_WICKETS);
            (DeliveryKind::Wicket, "WICKET!".to_string())
        }
        EventSymbol::One | EventSymbol::Two | EventSymbol::Three | EventSymbol::Four | EventSymbol::Six => {
            let runs = event.bat_runs().unwrap_or(0);
            state.runs += runs;
            (DeliveryKind::Runs(runs), runs_action(runs, on_free_hit))
        }
    };

    if kind.is_legal() {
        state.legal_balls += 1;
        state.free_hit = false;
    }

    let record = DeliveryRecord { kind, symbol: event, free_hit: on_free_hit, at: now };
    state.ball_history.push(record.clone());

    state.last_action = action;
    if state.is_over_boundary() {
        state.last_action.push_str(" - Over Complete!");
    }

    record
}

/// One-run penalty or bye; all four extras are worth a single run here.
fn add_extra(state: &mut MatchState, kind: DeliveryKind) {
    state.runs += 1;
    state.extras += 1;
    match kind {
        DeliveryKind::Wide => state.wides += 1,
        DeliveryKind::NoBall => state.no_balls += 1,
        DeliveryKind::Bye => state.byes += 1,
        DeliveryKind::LegBye => state.leg_byes += 1,
        DeliveryKind::Wicket | DeliveryKind::Runs(_) | DeliveryKind::DotBall => {}
    }
}

fn with_free_hit(action: &str, on_free_hit: bool) -> String {
    if on_free_hit {
        format!("{action} (Free Hit)")
    } else {
        action.to_string()
    }
}

fn runs_action(runs: u32, on_free_hit: bool) -> String {
    match (runs, on_free_hit) {
        (1, false) => "1 Run".to_string(),
        (1, true) => "1 Run (Free Hit)".to_string(),
        (4, false) => "4 Runs (Boundary)".to_string(),
        (4, true) => "4 Runs - Boundary (Free Hit)".to_string(),
        (6, false) => "6 Runs (Six!)".to_string(),
        (6, true) => "6 Runs - Six! (Free Hit)".to_string(),
        (n, false) => format!("{n} Runs"),
        (n, true) => format!("{n} Runs (Free Hit)"),
    }
}
