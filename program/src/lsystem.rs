// terrapin/program/src/lsystem.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! L-system grammar state: symbol and rule libraries plus the generational
//! pattern rewrite.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FormatResult};
use terrapin_command::{expand_args, Command};
use terrapin_turtle::DRAWING_VERBS;

/// How many generations a fresh visualizer expands before drawing.
pub const DEFAULT_DEPTH: i32 = 1;

/// The built-in symbol tier. Each new visualizer program clones this table
/// into its own mutable library, so no program can corrupt another's
/// defaults; user `set` entries shadow these per instance.
pub static BUILT_IN_LIBRARY: Lazy<HashMap<char, Vec<Command>>> = Lazy::new(|| {
    let mut library = HashMap::new();
    library.insert('F', vec![Command::bare("pd"), Command::bare("fd")]);
    library.insert('G', vec![Command::bare("pu"), Command::bare("fd")]);
    library.insert('A', vec![Command::bare("pu"), Command::bare("bk")]);
    library.insert('B', vec![Command::bare("pd"), Command::bare("bk")]);
    library.insert('+', vec![Command::bare("rt")]);
    library.insert('-', vec![Command::bare("lt")]);
    library.insert('X', vec![Command::bare("stamp")]);
    library
});

bitflags! {
    // NB: If you change this, make sure to update the `Display`
    // implementation as well.
    pub struct DrawResultFlags: u16 {
        const ERR_UNKNOWN_SYMBOL = 0x0001;
        const ERR_EMPTY_PATTERN  = 0x0002;
    }
}

impl Display for DrawResultFlags {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        if self.is_empty() {
            return Ok(());
        }

        let mut first = true;
        for (bit, name) in NAMES.iter().enumerate() {
            if (self.bits() >> bit) & 1 == 0 {
                continue;
            }
            if !first {
                formatter.write_str(", ")?;
            } else {
                first = false;
            }
            formatter.write_str(name)?;
        }

        return Ok(());

        // Must match the order in `DrawResultFlags`.
        static NAMES: &'static [&'static str] = &["unknown symbol", "empty pattern"];
    }
}

// Symbols are single characters; anything longer can never match a pattern
// character, so it is dropped instead of stored.
fn single_char(symbol: &str) -> Option<char> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

/// Grammar state for one visualizer program: the symbol library, the
/// production rules, the current pattern, and the expansion depth.
#[derive(Clone, Debug)]
pub struct LsystemState {
    symbols: HashMap<char, Vec<Command>>,
    rules: HashMap<char, String>,
    pattern: Option<String>,
    depth: i32,
    ready_to_execute: bool,
    flags: DrawResultFlags,
}

impl LsystemState {
    pub fn new() -> LsystemState {
        LsystemState {
            symbols: BUILT_IN_LIBRARY.clone(),
            rules: HashMap::new(),
            pattern: None,
            depth: DEFAULT_DEPTH,
            ready_to_execute: false,
            flags: DrawResultFlags::empty(),
        }
    }

    /// Reverts the symbol library to the built-in tier and clears the rules.
    pub fn reset_libraries(&mut self) {
        self.symbols = BUILT_IN_LIBRARY.clone();
        self.rules.clear();
    }

    /// Maps a symbol to a turtle command sequence, split the same way a
    /// multi-argument command line is.
    pub fn set_symbol(&mut self, symbol: &str, sequence: &str) {
        let key = match single_char(symbol) {
            Some(key) => key,
            None => return,
        };
        let tokens: Vec<String> = sequence.split(' ').map(str::to_string).collect();
        let mut commands = Vec::new();
        expand_args(&mut commands, &tokens, &DRAWING_VERBS);
        self.symbols.insert(key, commands);
    }

    /// Adds a production rule for a symbol.
    pub fn add_rule(&mut self, symbol: &str, replacement: &str) {
        if let Some(key) = single_char(symbol) {
            self.rules.insert(key, replacement.to_string());
        }
    }

    /// Sets the axiom the next expansion starts from.
    pub fn start(&mut self, axiom: &str) {
        self.pattern = Some(axiom.to_string());
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn symbol_sequence(&self, symbol: char) -> Option<&[Command]> {
        self.symbols.get(&symbol).map(|commands| &commands[..])
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn ready_to_execute(&self) -> bool {
        self.ready_to_execute
    }

    pub fn set_ready_to_execute(&mut self, ready: bool) {
        self.ready_to_execute = ready;
    }

    pub fn flags(&self) -> DrawResultFlags {
        self.flags
    }

    pub fn note_unknown_symbol(&mut self) {
        self.flags |= DrawResultFlags::ERR_UNKNOWN_SYMBOL;
    }

    pub fn note_empty_pattern(&mut self) {
        self.flags |= DrawResultFlags::ERR_EMPTY_PATTERN;
    }

    /// One generation: every character of the pattern rewrites
    /// simultaneously, left to right. A character with no rule copies
    /// through unchanged.
    pub fn update_pattern(&mut self) {
        let pattern = match &self.pattern {
            Some(pattern) => pattern,
            None => return,
        };
        let mut next = String::new();
        for symbol in pattern.chars() {
            match self.rules.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        self.pattern = Some(next);
    }

    /// Applies `depth` generations to the current pattern.
    pub fn expand(&mut self) {
        for _ in 0..self.depth {
            self.update_pattern();
        }
    }
}

impl Default for LsystemState {
    fn default() -> LsystemState {
        LsystemState::new()
    }
}
