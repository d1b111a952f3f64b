//! Command text interpretation.
//!
//! # Responsibility
//! - Turn one raw input line into a typed `Command`.
//! - Keep separator keywords and the date-time input format in one place.
//!
//! # Invariants
//! - Parsing is a pure function of the input text; no task state is read.

pub mod parser;
