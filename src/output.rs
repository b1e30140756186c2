//! User-facing messages.
//!
//! Prefixed lines, coloured only when stdout is a TTY. Logs go through
//! `tracing`; these are for the person at the terminal.

use owo_colors::OwoColorize;

use crate::zap::{FolderResult, ZapReport};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// Plain line with no prefix, for output users may script against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// One summary line per selected path. Dry-run entries list every planned move.
pub fn print_report(report: &ZapReport) {
    for (path, result) in report.entries() {
        match result {
            FolderResult::Zapped(o) if o.dry_run => {
                print_info(&format!("Dry-run: '{}' would move {} item(s)", path.display(), o.batch.len()));
                for (from, to) in o.batch.pairs() {
                    print_user(&format!("{} -> {}", from.display(), to.display()));
                }
            }
            FolderResult::Zapped(o) => {
                print_success(&format!("Zapped '{}' ({} item(s) moved)", path.display(), o.batch.len()));
                if let Some(e) = &o.delete_error {
                    print_warn(&e.to_string());
                }
            }
            FolderResult::Skipped(why) => print_info(&format!("Skipped '{}': {why}", path.display())),
            FolderResult::Failed(e) if e.is_abort() => print_warn(&e.to_string()),
            FolderResult::Failed(e) => print_error(&e.to_string()),
        }
    }
}
