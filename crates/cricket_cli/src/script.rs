//! Scripted scoring sessions.
//!
//! One command per line, prefixed by the time in seconds it was issued:
//!
//! ```text
//! # first over
//! 0.0   4
//! 3.5   wide
//! 7.0   undo
//! 9.0   withdraw
//! 12.0  no_ball
//! ```

use anyhow::{bail, Context, Result};
use cricket_core::{EventSymbol, Timestamp};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Apply(EventSymbol),
    Undo,
    /// Hand left the frame.
    Withdraw,
    Reset,
}

impl Command {
    pub fn parse(word: &str) -> Result<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "undo" => Ok(Command::Undo),
            "withdraw" => Ok(Command::Withdraw),
            "reset" => Ok(Command::Reset),
            other => {
                let symbol = other
                    .parse::<EventSymbol>()
                    .with_context(|| format!("unknown command {:?}", word.trim()))?;
                Ok(Command::Apply(symbol))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub at: Timestamp,
    pub command: Command,
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    let mut last_at = Timestamp::ZERO;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(time), Some(word), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("line {line_no}: expected `<seconds> <command>`, got {line:?}");
        };

        let secs: f64 = time
            .parse()
            .with_context(|| format!("line {line_no}: invalid time {time:?}"))?;
        if !secs.is_finite() || secs < 0.0 {
            bail!("line {line_no}: time must be a non-negative number, got {time}");
        }
        let at = Timestamp::from_secs_f64(secs);
        if at < last_at {
            bail!("line {line_no}: time {secs} goes backwards");
        }
        last_at = at;

        let command = Command::parse(word).with_context(|| format!("line {line_no}"))?;
        lines.push(ScriptLine { at, command });
    }

    Ok(lines)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_script() {
        let script = "# opening over\n0 4\n\n3.5 wide   # extra\n7 undo\n9 Withdraw\n12 no-ball\n";
        let lines = parse_script(script).unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].command, Command::Apply(EventSymbol::Four));
        assert_eq!(lines[1].at, Timestamp::from_secs_f64(3.5));
        assert_eq!(lines[2].command, Command::Undo);
        assert_eq!(lines[3].command, Command::Withdraw);
        assert_eq!(lines[4].command, Command::Apply(EventSymbol::NoBall));
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("0 4\n1 googly\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));

        assert!(parse_script("abc 4").is_err());
        assert!(parse_script("1 4 extra").is_err());
        assert!(parse_script("5 4\n2 1").is_err());
        assert!(parse_script("-1 4").is_err());
    }

    #[test]
    fn test_load_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 5").unwrap();
        writeln!(file, "4 reset").unwrap();
        let lines = load_script(file.path()).unwrap();
        assert_eq!(lines[0].command, Command::Apply(EventSymbol::Six));
        assert_eq!(lines[1].command, Command::Reset);

        assert!(load_script(Path::new("/nonexistent/script.txt")).is_err());
    }
}
