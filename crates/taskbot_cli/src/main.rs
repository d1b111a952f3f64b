//! Interactive console for the taskbot task tracker.
//!
//! Reads one command per line from stdin and prints each reply prefixed with
//! the bot name. The task list is saved on `bye` and when input ends.

mod config;

use anyhow::Result;
use clap::Parser;
use config::{Cli, Config};
use log::info;
use std::io::{self, BufRead, Write};
use taskbot_core::{core_version, init_logging, Session, SqliteTaskStore, TaskStore};

fn main() -> Result<()> {
    let config = Config::resolve(Cli::parse())?;

    if let Some(log) = &config.log {
        if let Err(err) = init_logging(&log.level, &log.dir.to_string_lossy()) {
            eprintln!("taskbot: file logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    let mut session = Session::open(SqliteTaskStore::new(&config.data_file));
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, stdin.lock(), stdout.lock())
}

fn run<S: TaskStore>(
    session: &mut Session<S>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    writeln!(out, "{}", session.ui().speak(&session.greet()))?;
    if let Some(message) = session.loading_error() {
        writeln!(out, "{}", session.ui().speak(message))?;
    }
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = session.respond(&line);
        writeln!(out, "{}", session.ui().speak(&reply.message))?;
        out.flush()?;
        if reply.is_exit() {
            info!("event=cli_exit module=cli status=ok reason=bye");
            return Ok(());
        }
    }

    // Input ended without `bye`.
    if let Some(message) = session.shutdown() {
        writeln!(out, "{}", session.ui().speak(&message))?;
    }
    info!("event=cli_exit module=cli status=ok reason=eof");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use std::io::Cursor;
    use taskbot_core::{Session, SqliteTaskStore};

    fn transcript(store_path: &std::path::Path, input: &str) -> String {
        let mut session = Session::open(SqliteTaskStore::new(store_path));
        let mut out = Vec::new();
        run(&mut session, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn replies_are_prefixed_and_bye_stops_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.sqlite3");

        let output = transcript(&path, "todo read book\n\nbye\ntodo ignored\n");
        assert!(output.starts_with("Xzzzbot: Hello! I'm Xzzzbot"));
        assert!(output.contains("Xzzzbot: Got it. I've added this task:"));
        assert!(output.contains("Xzzzbot: Bye."));
        assert!(!output.contains("ignored"));
    }

    #[test]
    fn end_of_input_still_persists_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.sqlite3");

        transcript(&path, "todo survive eof\n");
        let output = transcript(&path, "list\nbye\n");
        assert!(output.contains("1.[T][ ] survive eof"));
    }
}
