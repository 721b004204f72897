// terrapin/program/src/lib.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The program state machine: a running program owns a turtle, an
//! instruction queue read from a script, and a display package, and advances
//! one logical step per engine tick.

#[macro_use]
extern crate bitflags;

pub mod lsystem;
pub mod package;
pub mod script;

use tracing::debug;

use terrapin_command::{Command, CommandError, Dispatch};
use terrapin_turtle::scene::{DisplayElement, SliderSpec, TurtleMarker};
use terrapin_turtle::{LogoTurtle, LsystemTurtle};

use crate::lsystem::{DrawResultFlags, LsystemState};
use crate::package::DisplayPackage;
use crate::script::ScriptReader;

/// The two program kinds a user can start.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgramKind {
    Logo,
    LsystemVisualizer,
}

// Mode-specific state, selected at construction.
enum Mode {
    Logo {
        turtle: LogoTurtle,
    },
    Lsystem {
        turtle: LsystemTurtle,
        state: LsystemState,
    },
}

/// One running program. Commands route either to the program tier
/// (`run`, and the grammar verbs in the visualizer) or to the mode's
/// turtle, whose output lands in the display package.
pub struct Program {
    name: &'static str,
    mode: Mode,
    instructions: Option<Vec<Command>>,
    instruction_index: usize,
    package: DisplayPackage,
    scripts: ScriptReader,
}

impl Program {
    pub fn new(kind: ProgramKind, scripts: ScriptReader) -> Program {
        let (name, mode) = match kind {
            ProgramKind::Logo => (
                "LogoVisualizer",
                Mode::Logo {
                    turtle: LogoTurtle::new(),
                },
            ),
            ProgramKind::LsystemVisualizer => (
                "LSystemVisualizer",
                Mode::Lsystem {
                    turtle: LsystemTurtle::new(),
                    state: LsystemState::new(),
                },
            ),
        };
        Program {
            name,
            mode,
            instructions: None,
            instruction_index: 0,
            package: DisplayPackage::new(),
            scripts,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn kind(&self) -> ProgramKind {
        match self.mode {
            Mode::Logo { .. } => ProgramKind::Logo,
            Mode::Lsystem { .. } => ProgramKind::LsystemVisualizer,
        }
    }

    // The verbs handled at this tier rather than by the turtle.
    fn program_verbs(&self) -> &'static [&'static str] {
        match self.mode {
            Mode::Logo { .. } => &["run"],
            Mode::Lsystem { .. } => &["run", "start", "rule", "set"],
        }
    }

    /// The IO controls this program wants shown alongside the canvas.
    pub fn io_elements(&self) -> Vec<DisplayElement> {
        match self.mode {
            Mode::Logo { .. } => Vec::new(),
            Mode::Lsystem { .. } => vec![
                DisplayElement::Label("length".to_string()),
                DisplayElement::Slider(SliderSpec {
                    name: "length".to_string(),
                    min: 5,
                    max: 50,
                    value: 5,
                    major_tick: 10,
                    block_increment: 10,
                }),
                DisplayElement::Label("angle".to_string()),
                DisplayElement::Slider(SliderSpec {
                    name: "angle".to_string(),
                    min: -90,
                    max: 90,
                    value: 10,
                    major_tick: 20,
                    block_increment: 40,
                }),
                DisplayElement::Label("level".to_string()),
                DisplayElement::Slider(SliderSpec {
                    name: "level".to_string(),
                    min: 0,
                    max: 10,
                    value: 1,
                    major_tick: 1,
                    block_increment: 1,
                }),
            ],
        }
    }

    /// Loads a script as the new instruction list. The read index resets
    /// before the lookup, so a failed load leaves any previous list in
    /// place but rewound.
    pub fn load_file_as_instructions(&mut self, filename: &str) -> Result<(), CommandError> {
        self.instruction_index = 0;
        let instructions = self.scripts.read(filename)?;
        debug!(
            "loaded {} instructions from {}",
            instructions.len(),
            filename
        );
        self.instructions = Some(instructions);
        Ok(())
    }

    // The next queued instruction, if any. Reading past the end drops the
    // exhausted list.
    fn read_next_instruction(&mut self) -> Option<Command> {
        let exhausted = match &self.instructions {
            None => return None,
            Some(list) => self.instruction_index >= list.len(),
        };
        if exhausted {
            self.instructions = None;
            return None;
        }
        let next = match &self.instructions {
            Some(list) => list[self.instruction_index].clone(),
            None => return None,
        };
        self.instruction_index += 1;
        Some(next)
    }

    pub fn has_pending_instructions(&self) -> bool {
        match &self.instructions {
            Some(list) => self.instruction_index < list.len(),
            None => false,
        }
    }

    /// Whether the next ticks still have queued work: pending instructions,
    /// or a visualizer pattern armed but not yet drawn.
    pub fn has_pending_work(&self) -> bool {
        self.has_pending_instructions()
            || match &self.mode {
                Mode::Lsystem { state, .. } => state.ready_to_execute(),
                Mode::Logo { .. } => false,
            }
    }

    /// Routes one command: program verbs run at this tier, everything else
    /// goes to the turtle and its output joins the display package.
    pub fn execute_command(&mut self, command: &Command) -> Result<(), CommandError> {
        let verb = match command.verb() {
            None => return Ok(()),
            Some(verb) => verb,
        };
        if self.program_verbs().contains(&verb) {
            self.dispatch(command)?;
            return Ok(());
        }
        let emitted = match &mut self.mode {
            Mode::Logo { turtle } => turtle.dispatch(command)?,
            Mode::Lsystem { turtle, .. } => turtle.dispatch(command)?,
        };
        if let Some(elements) = emitted {
            self.package.extend_front(elements);
        }
        Ok(())
    }

    /// One tick of program logic. A failure forcibly exhausts the remaining
    /// instruction queue (script abort) before propagating; the program
    /// itself stays usable.
    pub fn update(&mut self) -> Result<(), CommandError> {
        let result = self.step();
        if result.is_err() {
            self.abort_script();
        }
        result
    }

    fn step(&mut self) -> Result<(), CommandError> {
        if matches!(self.mode, Mode::Logo { .. }) {
            match self.read_next_instruction() {
                Some(command) => self.execute_command(&command),
                None => Ok(()),
            }
        } else {
            self.run_visualization()
        }
    }

    fn abort_script(&mut self) {
        if let Some(list) = &self.instructions {
            self.instruction_index = list.len();
        }
    }

    // The visualizer's coarse two-phase toggle: one tick burst-reads the
    // whole remaining queue, the next expands and draws the pattern.
    fn run_visualization(&mut self) -> Result<(), CommandError> {
        if self.instructions.is_none() {
            return Ok(());
        }
        let ready = match &self.mode {
            Mode::Lsystem { state, .. } => state.ready_to_execute(),
            Mode::Logo { .. } => return Ok(()),
        };

        if ready {
            self.expand_and_draw()?;
            if let Mode::Lsystem { state, .. } = &mut self.mode {
                state.set_ready_to_execute(false);
            }
        } else if self.has_pending_instructions() {
            // The bound is re-read every iteration: a `run` instruction
            // swaps the queue mid-loop and the burst continues into it.
            let mut consumed = 0;
            while consumed < self.instructions.as_ref().map_or(0, |list| list.len()) {
                if let Some(command) = self.read_next_instruction() {
                    self.execute_command(&command)?;
                }
                consumed += 1;
            }
            if let Mode::Lsystem { state, .. } = &mut self.mode {
                state.set_ready_to_execute(true);
            }
        }
        Ok(())
    }

    fn expand_and_draw(&mut self) -> Result<(), CommandError> {
        let package = &mut self.package;
        let (turtle, state) = match &mut self.mode {
            Mode::Lsystem { turtle, state } => (turtle, state),
            Mode::Logo { .. } => return Ok(()),
        };

        state.expand();
        let pattern = match state.pattern() {
            Some(pattern) => pattern.to_string(),
            None => {
                state.note_empty_pattern();
                return Ok(());
            }
        };

        let mut emitted = Vec::new();
        for symbol in pattern.chars() {
            if let Some(sequence) = state.symbol_sequence(symbol) {
                for elements in turtle.dispatch_all(sequence)? {
                    emitted.extend(elements);
                }
            } else {
                state.note_unknown_symbol();
            }
        }
        if !state.flags().is_empty() {
            debug!("draw pass finished with: {}", state.flags());
        }
        package.extend_front(emitted);
        Ok(())
    }

    /// Draw-phase warnings accumulated by the visualizer.
    pub fn draw_flags(&self) -> DrawResultFlags {
        match &self.mode {
            Mode::Lsystem { state, .. } => state.flags(),
            Mode::Logo { .. } => DrawResultFlags::empty(),
        }
    }

    /// The slider-driven control path; there is no typed equivalent.
    /// `length` and `angle` re-issue the corresponding turtle command,
    /// `level` sets the expansion depth.
    pub fn apply_control(&mut self, name: &str, value: i32) -> Result<(), CommandError> {
        match name {
            "length" => self.execute_command(&Command::from_line(&format!("setlength {}", value))),
            "angle" => self.execute_command(&Command::from_line(&format!("setangle {}", value))),
            "level" => {
                if let Mode::Lsystem { state, .. } = &mut self.mode {
                    state.set_depth(value);
                }
                Ok(())
            }
            _ => {
                debug!("ignoring unknown control {}", name);
                Ok(())
            }
        }
    }

    fn marker(&self) -> TurtleMarker {
        match &self.mode {
            Mode::Logo { turtle } => turtle.body().marker(),
            Mode::Lsystem { turtle, .. } => turtle.body().marker(),
        }
    }

    /// The program's display delta, if its visual state changed since the
    /// last pull.
    pub fn take_display_delta(&mut self) -> Option<Vec<DisplayElement>> {
        let marker = self.marker();
        self.package.take(marker)
    }
}

impl Dispatch for Program {
    type Output = ();

    fn lookup(&mut self, command: &Command) -> Result<(), CommandError> {
        let verb = command.verb().unwrap_or("");
        match (verb, command.args()) {
            ("run", [filename]) => {
                let filename = filename.clone();
                self.load_file_as_instructions(&filename)
            }
            ("start", [axiom]) => match &mut self.mode {
                Mode::Lsystem { state, .. } => {
                    state.start(axiom);
                    Ok(())
                }
                Mode::Logo { .. } => Err(CommandError::invalid_command(command)),
            },
            ("rule", [symbol, replacement]) => match &mut self.mode {
                Mode::Lsystem { state, .. } => {
                    state.add_rule(symbol, replacement);
                    Ok(())
                }
                Mode::Logo { .. } => Err(CommandError::invalid_command(command)),
            },
            ("set", [symbol, sequence]) => match &mut self.mode {
                Mode::Lsystem { state, .. } => {
                    state.set_symbol(symbol, sequence);
                    Ok(())
                }
                Mode::Logo { .. } => Err(CommandError::invalid_command(command)),
            },
            _ => Err(CommandError::invalid_command(command)),
        }
    }
}
