// terrapin/command/src/lib.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Command-line parsing and dispatch for the turtle language.
//!
//! A [`Command`] is one parsed input line: an optional lower-cased verb plus
//! its ordered, verbatim arguments. Targets that can execute commands
//! implement [`Dispatch`] with a closed `lookup` table per capability tier;
//! [`run_command`] wraps every table with the shared no-op and arity rules.

pub mod error;

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub use crate::error::CommandError;

// Mirrors `line.split("\"")[1]`: the text after the first double quote, up
// to the next quote or the end of the line.
static QUOTED_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)"#).unwrap());

/// One parsed command line. Immutable once constructed.
///
/// A command with no verb is the "nothing was entered" sentinel; a command
/// whose verb is the empty string came from an all-whitespace line. Both are
/// skipped by dispatch, as are verbs starting with `#` (comments).
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    verb: Option<String>,
    args: Vec<String>,
}

impl Command {
    /// The sentinel for absent input.
    pub fn none() -> Command {
        Command {
            verb: None,
            args: Vec::new(),
        }
    }

    /// Builds a command from a destructively-read input line, mapping
    /// "nothing pending" to the no-verb sentinel.
    pub fn from_pending(line: Option<&str>) -> Command {
        match line {
            None => Command::none(),
            Some(line) => Command::from_line(line),
        }
    }

    /// Parses one raw command line.
    ///
    /// The line is split on single spaces; the first token, lower-cased, is
    /// the verb and the rest are arguments, verbatim. One special case: when
    /// the third token opens with a double quote, the arguments are exactly
    /// the second token and the text between the first quote pair (an
    /// unterminated quote runs to the end of the line). Quotes and spaces
    /// are not escapable anywhere else; parsing never fails.
    pub fn from_line(line: &str) -> Command {
        if line.trim().is_empty() {
            return Command {
                verb: Some(String::new()),
                args: Vec::new(),
            };
        }

        let mut tokens: Vec<&str> = line.split(' ').collect();
        while tokens.last().map_or(false, |token| token.is_empty()) {
            tokens.pop();
        }

        let verb = tokens[0].to_lowercase();

        if tokens.len() > 2 && tokens[2].starts_with('"') {
            let quoted = QUOTED_ARG
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            return Command {
                verb: Some(verb),
                args: vec![tokens[1].to_string(), quoted],
            };
        }

        Command {
            verb: Some(verb),
            args: tokens[1..].iter().map(|token| token.to_string()).collect(),
        }
    }

    /// Builds a command from an explicit verb and argument list, verbatim.
    pub fn new(verb: impl Into<String>, args: Vec<String>) -> Command {
        Command {
            verb: Some(verb.into()),
            args,
        }
    }

    /// Builds a command from an explicit verb and a single argument.
    pub fn with_arg(verb: impl Into<String>, arg: impl Into<String>) -> Command {
        Command {
            verb: Some(verb.into()),
            args: vec![arg.into()],
        }
    }

    /// Builds an argument-less command.
    pub fn bare(verb: impl Into<String>) -> Command {
        Command {
            verb: Some(verb.into()),
            args: Vec::new(),
        }
    }

    pub fn verb(&self) -> Option<&str> {
        self.verb.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref verb) = self.verb {
            f.write_str(verb)?;
        }
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Flips the textual sign of a numeric-looking argument, so that `bk` can
/// delegate to `fd` without duplicating the movement math. Empty input is
/// returned unchanged; non-numeric text round-trips through the eventual
/// parse failure instead.
pub fn negate(argument: &str) -> String {
    if argument.is_empty() {
        return String::new();
    }
    match argument.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{}", argument),
    }
}

/// Expands a flat token list into single- and zero-argument commands.
///
/// Walks the tokens left to right: a token whose *successor* names a known
/// verb becomes a command of its own, otherwise the pair becomes a
/// one-argument command. This is the splitting rule behind both Logo-style
/// `fd 50 rt 90 fd 50` lines and L-system `set` sequences.
pub fn expand_args(out: &mut Vec<Command>, remaining: &[String], valid: &[&str]) {
    match remaining {
        [] => {}
        [only] => out.push(Command::from_line(only)),
        [first, second, ..] => {
            if valid.contains(&second.as_str()) {
                out.push(Command::from_line(first));
                expand_args(out, &remaining[1..], valid);
            } else {
                out.push(Command::with_arg(first.clone(), second.clone()));
                expand_args(out, &remaining[2..], valid);
            }
        }
    }
}

/// A dispatch tier: one closed table from (verb, arity) to an operation.
///
/// `lookup` sees only commands that survived the shared guards in
/// [`run_command`]; it returns `InvalidCommand` for any (verb, arity) pair
/// it has no entry for, and `InvalidArgument` when an entry fails on its
/// argument values.
pub trait Dispatch {
    type Output;

    fn lookup(&mut self, command: &Command) -> Result<Self::Output, CommandError>;

    /// Executes one command through the shared guards. `Ok(None)` means the
    /// command was a no-op (absent, blank, or a comment).
    fn dispatch(&mut self, command: &Command) -> Result<Option<Self::Output>, CommandError>
    where
        Self: Sized,
    {
        run_command(self, command)
    }

    /// Executes an ordered command list, aborting at the first failure.
    /// Side effects of earlier commands stand.
    fn dispatch_all(&mut self, commands: &[Command]) -> Result<Vec<Self::Output>, CommandError>
    where
        Self: Sized,
    {
        let mut results = Vec::new();
        for command in commands {
            if let Some(output) = self.dispatch(command)? {
                results.push(output);
            }
        }
        Ok(results)
    }
}

/// The guards every tier shares: no-op commands short-circuit, three or more
/// arguments are rejected, everything else reaches the tier's table.
pub fn run_command<T: Dispatch>(
    target: &mut T,
    command: &Command,
) -> Result<Option<T::Output>, CommandError> {
    let verb = match command.verb() {
        None => return Ok(None),
        Some(verb) => verb,
    };
    if verb.is_empty() || verb.starts_with('#') {
        return Ok(None);
    }
    if command.args().len() > 2 {
        return Err(CommandError::invalid_argument(command));
    }
    target.lookup(command).map(Some)
}

#[cfg(test)]
struct Recorder {
    calls: Vec<String>,
}

#[cfg(test)]
impl Dispatch for Recorder {
    type Output = String;

    fn lookup(&mut self, command: &Command) -> Result<String, CommandError> {
        let verb = command.verb().unwrap_or("");
        match (verb, command.args()) {
            ("ping", []) => {
                self.calls.push("ping".to_string());
                Ok("pong".to_string())
            }
            ("echo", [text]) => {
                self.calls.push(format!("echo {}", text));
                Ok(text.clone())
            }
            ("sum", [a, b]) => {
                let a: i32 = a
                    .parse()
                    .map_err(|_| CommandError::invalid_argument(command))?;
                let b: i32 = b
                    .parse()
                    .map_err(|_| CommandError::invalid_argument(command))?;
                Ok((a + b).to_string())
            }
            _ => Err(CommandError::invalid_command(command)),
        }
    }
}

#[test]
fn command_line_parser() {
    let command = Command::from_line("fd 50");
    assert_eq!(command.verb(), Some("fd"));
    assert_eq!(command.args(), ["50"]);

    // Verbs lower-case; arguments stay verbatim.
    let command = Command::from_line("FD 50 RT 90");
    assert_eq!(command.verb(), Some("fd"));
    assert_eq!(command.args(), ["50", "RT", "90"]);

    // Blank-ish lines parse to the empty verb, absent input to no verb.
    assert_eq!(Command::from_line("").verb(), Some(""));
    assert_eq!(Command::from_line("   ").verb(), Some(""));
    assert!(Command::from_line("   ").args().is_empty());
    assert_eq!(Command::from_pending(None).verb(), None);
    assert_eq!(Command::none(), Command::from_pending(None));

    // Comments keep their verb; dispatch skips them later.
    assert_eq!(Command::from_line("# a comment").verb(), Some("#"));

    // Trailing spaces do not produce phantom arguments.
    assert_eq!(Command::from_line("fd 50 ").args(), ["50"]);
}

#[test]
fn quoted_argument_parsing() {
    // The quoted form triggers only when the third token opens a quote.
    let command = Command::from_line("set F \"pd fd rt\"");
    assert_eq!(command.verb(), Some("set"));
    assert_eq!(command.args(), ["F", "pd fd rt"]);

    // An unterminated quote runs to the end of the line.
    let command = Command::from_line("set F \"pd fd");
    assert_eq!(command.args(), ["F", "pd fd"]);

    // Quotes elsewhere do not trigger the special case.
    let command = Command::from_line("set \"F\" x");
    assert_eq!(command.args(), ["\"F\"", "x"]);

    let command = Command::from_line("rule X F+F-F");
    assert_eq!(command.args(), ["X", "F+F-F"]);
}

#[test]
fn negate_flips_textual_sign() {
    assert_eq!(negate("50"), "-50");
    assert_eq!(negate("-50"), "50");
    assert_eq!(negate(""), "");
    assert_eq!(negate("abc"), "-abc");
}

#[test]
fn expand_args_splits_on_known_verbs() {
    let valid = ["fd", "rt"];
    let tokens: Vec<String> = vec!["fd".into(), "50".into(), "rt".into(), "90".into()];
    let mut out = Vec::new();
    expand_args(&mut out, &tokens, &valid);
    assert_eq!(
        out,
        vec![
            Command::with_arg("fd", "50"),
            Command::with_arg("rt", "90"),
        ]
    );

    // A token followed by a known verb becomes a zero-argument command.
    let tokens: Vec<String> = vec!["pd".into(), "fd".into()];
    let mut out = Vec::new();
    expand_args(&mut out, &tokens, &valid);
    assert_eq!(out, vec![Command::bare("pd"), Command::bare("fd")]);
}

#[test]
fn dispatch_skips_noop_commands() {
    let mut target = Recorder { calls: Vec::new() };
    assert!(target.dispatch(&Command::none()).unwrap().is_none());
    assert!(target.dispatch(&Command::from_line("")).unwrap().is_none());
    assert!(target
        .dispatch(&Command::from_line("# ping"))
        .unwrap()
        .is_none());
    assert!(target.calls.is_empty());
}

#[test]
fn dispatch_error_taxonomy() {
    let mut target = Recorder { calls: Vec::new() };

    // Unknown verb, with and without arguments.
    match target.dispatch(&Command::from_line("warp 10")) {
        Err(CommandError::InvalidCommand(_)) => {}
        other => panic!("expected InvalidCommand, got {:?}", other),
    }

    // Known verb at the wrong arity is also an unknown table entry.
    match target.dispatch(&Command::from_line("ping 1")) {
        Err(CommandError::InvalidCommand(_)) => {}
        other => panic!("expected InvalidCommand, got {:?}", other),
    }

    // Three or more arguments never reach the table.
    match target.dispatch(&Command::from_line("sum 1 2 3")) {
        Err(CommandError::InvalidArgument(_)) => {}
        other => panic!("expected InvalidArgument, got {:?}", other),
    }

    // A known entry failing on its values reports InvalidArgument.
    match target.dispatch(&Command::from_line("sum 1 x")) {
        Err(CommandError::InvalidArgument(_)) => {}
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn dispatch_all_preserves_order_and_aborts_on_failure() {
    let mut target = Recorder { calls: Vec::new() };
    let commands = vec![
        Command::from_line("ping"),
        Command::from_line("echo one"),
        Command::from_line("warp"),
        Command::from_line("echo never"),
    ];
    assert!(target.dispatch_all(&commands).is_err());
    // The first two ran before the failure; the last never did.
    assert_eq!(target.calls, vec!["ping".to_string(), "echo one".to_string()]);

    let ok: Vec<String> = target
        .dispatch_all(&[Command::from_line("ping"), Command::from_line("echo two")])
        .unwrap();
    assert_eq!(ok, vec!["pong".to_string(), "two".to_string()]);
}
