//! Terminal confirmations for the CLI host.

use std::io::{self, BufRead, Write};

use super::{Confirm, Confirmation};

/// Interpret a typed answer. Anything unrecognised is a "no".
pub fn parse_answer(line: &str) -> Confirmation {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Yes,
        "a" | "all" => Confirmation::YesToAll,
        _ => Confirmation::No,
    }
}

/// Prompts on stderr and reads one line from stdin. EOF or a read error is a "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> Confirmation {
        let mut err = io::stderr().lock();
        let _ = write!(err, "{message} [y]es / [n]o / [a]ll: ");
        let _ = err.flush();
        drop(err);

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Confirmation::No,
            Ok(_) => parse_answer(&line),
        }
    }
}

/// Always proceeds; used for `--yes` and when there is no UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> Confirmation {
        Confirmation::YesToAll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers() {
        assert_eq!(parse_answer("y\n"), Confirmation::Yes);
        assert_eq!(parse_answer(" YES "), Confirmation::Yes);
        assert_eq!(parse_answer("a"), Confirmation::YesToAll);
        assert_eq!(parse_answer("All\r\n"), Confirmation::YesToAll);
        assert_eq!(parse_answer(""), Confirmation::No);
        assert_eq!(parse_answer("nope"), Confirmation::No);
    }
}
