use cricket_core::{ApplyDecision, Scoreboard, UndoDecision};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::script::Command;

/// Run one command against the scoreboard and describe the outcome.
pub fn execute(board: &Scoreboard, command: Command) -> String {
    match command {
        Command::Apply(symbol) => match board.apply_with_snapshot(symbol) {
            (ApplyDecision::Applied, view) => view.last_action,
            (ApplyDecision::RejectedCooldown, view) => {
                format!("ignored {symbol}: cooldown {:.1}s", view.cooldown_remaining_secs)
            }
            (ApplyDecision::RejectedDuplicate, _) => format!("ignored {symbol}: same as last gesture"),
            (ApplyDecision::RejectedMatchComplete, _) => "ignored: match complete".to_string(),
        },
        Command::Undo => match board.update(|engine, _| engine.undo_last()) {
            (UndoDecision::Applied, view) => view.last_action,
            (UndoDecision::EmptyHistory, _) => "nothing to undo".to_string(),
        },
        Command::Withdraw => {
            board.clear_last_event();
            "hand withdrawn".to_string()
        }
        Command::Reset => {
            board.reset();
            "Match Reset".to_string()
        }
    }
}

/// Read-only display loop: prints the scoreboard whenever it changes.
pub struct DisplayPoller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DisplayPoller {
    pub fn spawn(board: Scoreboard, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut last_line = String::new();
            while !flag.load(Ordering::Relaxed) {
                let line = board.snapshot().summary_line();
                if line != last_line {
                    println!("[scoreboard] {line}");
                    last_line = line;
                }
                thread::sleep(interval);
            }
        });

        Self { stop, handle: Some(handle) }
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("display poller panicked");
            }
        }
    }
}

impl Drop for DisplayPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_core::{EventSymbol, ManualClock, ScoringConfig, ScoringEngine};

    #[test]
    fn test_execute_describes_outcomes() {
        let clock = ManualClock::new();
        let board = Scoreboard::with_clock(ScoringEngine::new(ScoringConfig::default()).unwrap(), clock.clone());

        assert_eq!(execute(&board, Command::Apply(EventSymbol::Four)), "4 Runs (Boundary)");
        clock.advance(Duration::from_secs(1));
        assert_eq!(execute(&board, Command::Apply(EventSymbol::One)), "ignored 1: cooldown 2.0s");
        clock.advance(Duration::from_secs(3));
        assert_eq!(execute(&board, Command::Apply(EventSymbol::Four)), "ignored 4: same as last gesture");
        assert_eq!(execute(&board, Command::Withdraw), "hand withdrawn");
        assert_eq!(execute(&board, Command::Undo), "Undid: 4");
        assert_eq!(execute(&board, Command::Undo), "nothing to undo");
        assert_eq!(execute(&board, Command::Reset), "Match Reset");
    }

    #[test]
    fn test_poller_stops() {
        let board = Scoreboard::new(ScoringConfig::default()).unwrap();
        let poller = DisplayPoller::spawn(board, Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        poller.stop();
    }
}
