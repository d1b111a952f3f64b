//! Text rendering for every session outcome.
//!
//! # Responsibility
//! - Produce the user-facing text for greetings, listings, confirmations and
//!   every error kind.
//!
//! # Invariants
//! - Rendering never writes to an output device; callers decide where the
//!   text goes.
//! - Task positions shown to users are 1-based.

use crate::model::task::Task;
use crate::service::session::CommandError;
use std::fmt::Display;
use std::fmt::Write as _;

/// Default name the bot introduces itself with.
pub const DEFAULT_BOT_NAME: &str = "Xzzzbot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ui {
    bot_name: String,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_NAME)
    }
}

impl Ui {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
        }
    }

    /// Prefixes a reply with the bot name, e.g. `Xzzzbot: Bye...`.
    pub fn speak(&self, message: &str) -> String {
        format!("{}: {message}", self.bot_name)
    }

    pub fn greet(&self) -> String {
        format!("Hello! I'm {}\nWhat can I do for you?", self.bot_name)
    }

    pub fn goodbye(&self) -> String {
        "Bye. Hope to see you again soon!".to_string()
    }

    pub fn loading_error(&self, err: &dyn Display) -> String {
        format!("I could not load your saved tasks ({err}). Starting with an empty list.")
    }

    pub fn save_error(&self, err: &dyn Display) -> String {
        format!("I could not save your tasks ({err}).")
    }

    pub fn task_list(&self, tasks: &[Task]) -> String {
        if tasks.is_empty() {
            return "Your task list is empty.".to_string();
        }
        let mut out = String::from("Here are the tasks in your list:");
        push_numbered(&mut out, tasks.iter());
        out
    }

    pub fn task_added(&self, task: &Task, count: usize) -> String {
        format!(
            "Got it. I've added this task:\n  {task}\n{}",
            count_line(count)
        )
    }

    pub fn task_marked(&self, task: &Task) -> String {
        if task.is_done() {
            format!("Nice! I've marked this task as done:\n  {task}")
        } else {
            format!("OK, I've marked this task as not done yet:\n  {task}")
        }
    }

    pub fn task_removed(&self, task: &Task, count: usize) -> String {
        format!(
            "Noted. I've removed this task:\n  {task}\n{}",
            count_line(count)
        )
    }

    pub fn find_results(&self, matches: &[&Task]) -> String {
        if matches.is_empty() {
            return "No matching tasks found.".to_string();
        }
        let mut out = String::from("Here are the matching tasks in your list:");
        push_numbered(&mut out, matches.iter().copied());
        out
    }

    pub fn command_error(&self, err: &CommandError) -> String {
        match err {
            CommandError::IllegalArgument(_) => {
                "OOPS!!! The description of a todo cannot be empty.".to_string()
            }
            CommandError::IncompleteArgument { usage, .. } => {
                format!("OOPS!!! That command is incomplete. Usage: {usage}")
            }
            CommandError::DateTimeParse { value } => format!(
                "OOPS!!! I could not read the date-time `{value}`. \
                 Please use yyyy-mm-dd HHmm, e.g. 2024-12-01 1800."
            ),
            CommandError::DateClash { existing } => format!(
                "OOPS!!! This event clashes with task {} in your list, so I did not add it.",
                existing + 1
            ),
            CommandError::OutOfBounds { index, len } => format!(
                "OOPS!!! There is no task number {index}. {}",
                count_line(*len)
            ),
            CommandError::InvalidIndex { value } => {
                format!("OOPS!!! `{value}` is not a task number.")
            }
            CommandError::Unrecognized { command } => {
                format!("OOPS!!! I'm sorry, but I do not understand `{command}`.")
            }
        }
    }
}

fn push_numbered<'a>(out: &mut String, tasks: impl Iterator<Item = &'a Task>) {
    for (i, task) in tasks.enumerate() {
        let _ = write!(out, "\n{}.{task}", i + 1);
    }
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

#[cfg(test)]
mod tests {
    use super::Ui;
    use crate::model::task::Task;

    #[test]
    fn task_list_numbers_from_one() {
        let tasks = vec![Task::todo("a").unwrap(), Task::todo("b").unwrap()];
        let text = Ui::default().task_list(&tasks);
        assert!(text.contains("\n1.[T][ ] a"));
        assert!(text.contains("\n2.[T][ ] b"));
    }

    #[test]
    fn empty_views_have_dedicated_messages() {
        let ui = Ui::default();
        assert_eq!(ui.task_list(&[]), "Your task list is empty.");
        assert_eq!(ui.find_results(&[]), "No matching tasks found.");
    }

    #[test]
    fn speak_prefixes_bot_name() {
        assert_eq!(Ui::new("Bot").speak("hi"), "Bot: hi");
    }
}
