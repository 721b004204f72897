// terrapin/engine/src/lib.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The per-tick driver: reads one command line from the input surface,
//! routes it to program lifecycle handling or the active program, advances
//! the program one step, and reconciles its display delta with the display
//! surface.

use std::time::Duration;

use tracing::{info, warn};

use terrapin_command::{Command, CommandError};
use terrapin_program::script::ScriptReader;
use terrapin_program::{Program, ProgramKind};
use terrapin_turtle::scene::DisplayElement;

/// Reserved lifecycle verbs.
pub const EXIT: &str = "exit";
pub const LOGO: &str = "logo";
pub const VISUALIZER: &str = "visualizer";
pub const VISUALIZER_ALTERNATE: &str = "lsv";
pub const AVAILABLE_PROGRAMS: [&str; 3] = [LOGO, VISUALIZER, VISUALIZER_ALTERNATE];

/// The fixed tick period: sixty ticks per second, independent of how long
/// any one command takes.
pub const FRAME_DURATION: Duration = Duration::from_micros(16_667);

/// Where renderable primitives go. The core derives every coordinate it
/// needs; the surface only has to show, hide, and complain.
pub trait DisplaySurface {
    fn add_primitive(&mut self, element: &DisplayElement);
    fn remove_primitive(&mut self, element: &DisplayElement);
    fn show_error(&mut self, error: &CommandError);
}

/// Where typed command lines come from.
pub trait InputSurface {
    /// Destructive read: the next line typed since the last call, if any.
    fn pending_line(&mut self) -> Option<String>;
}

/// Ties the input surface, the display surface, and the active program
/// together, one tick at a time. The loop itself belongs to the caller.
pub struct Engine<D: DisplaySurface, I: InputSurface> {
    display: D,
    input: I,
    scripts: ScriptReader,
    active_program: Option<Program>,
    shown: Vec<DisplayElement>,
    io_shown: Vec<DisplayElement>,
}

impl<D: DisplaySurface, I: InputSurface> Engine<D, I> {
    pub fn new(display: D, input: I, scripts: ScriptReader) -> Engine<D, I> {
        Engine {
            display,
            input,
            scripts,
            active_program: None,
            shown: Vec::new(),
            io_shown: Vec::new(),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn active_program_name(&self) -> Option<&str> {
        self.active_program.as_ref().map(|program| program.name())
    }

    /// Whether the active program still has queued work: use this to keep
    /// ticking after the input surface runs dry.
    pub fn has_pending_work(&self) -> bool {
        self.active_program
            .as_ref()
            .map_or(false, |program| program.has_pending_work())
    }

    /// One tick: try exactly one pending command line, then advance the
    /// active program by one step.
    pub fn tick(&mut self) {
        self.try_command_line();
        self.update_program();
    }

    /// Programmatic slider input; there is no typed path for these.
    pub fn apply_control(&mut self, name: &str, value: i32) {
        if let Some(program) = self.active_program.as_mut() {
            if let Err(error) = program.apply_control(name, value) {
                warn!("control {} failed: {}", name, error);
                self.display.show_error(&error);
            }
        }
    }

    // Reads and routes one command line, if one arrived this tick.
    fn try_command_line(&mut self) {
        let line = self.input.pending_line();
        let command = Command::from_pending(line.as_deref());
        let is_lifecycle = match command.verb() {
            None => return,
            Some(verb) => self.active_program.is_none() || verb == EXIT,
        };

        if is_lifecycle {
            self.call_command(&command);
        } else if let Some(program) = self.active_program.as_mut() {
            if let Err(error) = program.execute_command(&command) {
                warn!("command failed: {}", error);
                self.display.show_error(&error);
            }
        }
    }

    // Lifecycle handling: start a named program, tear the current one down,
    // or report the verb as unknown.
    fn call_command(&mut self, command: &Command) {
        let verb = command.verb().unwrap_or("");
        if AVAILABLE_PROGRAMS.contains(&verb) {
            self.start_new_program(command);
        } else if verb == EXIT {
            match &self.active_program {
                None => info!("no program running"),
                Some(program) => info!("exiting {}", program.name()),
            }
            self.reset();
        } else if !verb.is_empty() && !verb.starts_with('#') {
            let error = CommandError::invalid_command(command);
            warn!("{}", error);
            self.display.show_error(&error);
        }
    }

    fn start_new_program(&mut self, command: &Command) {
        self.reset();

        let kind = match command.verb().unwrap_or("") {
            LOGO => ProgramKind::Logo,
            _ => ProgramKind::LsystemVisualizer,
        };
        let program = Program::new(kind, self.scripts.clone());
        info!("starting {}", program.name());

        for element in program.io_elements() {
            self.display.add_primitive(&element);
            self.io_shown.push(element);
        }
        self.active_program = Some(program);

        // A single extra argument is a script to load right away. Failure
        // is reported but the program stays up, just with no instructions.
        if command.args().len() == 1 {
            let filename = command.args()[0].clone();
            if let Some(program) = self.active_program.as_mut() {
                if let Err(error) = program.load_file_as_instructions(&filename) {
                    warn!("script load failed: {}", error);
                    self.display.show_error(&error);
                }
            }
        }
    }

    // Clears everything the program owns on screen and drops the program.
    fn reset(&mut self) {
        for element in self.io_shown.drain(..) {
            self.display.remove_primitive(&element);
        }
        for element in self.shown.drain(..) {
            self.display.remove_primitive(&element);
        }
        self.active_program = None;
    }

    // Advances the active program one step and reconciles its display
    // delta. Step failures are reported, never propagated out of the tick.
    fn update_program(&mut self) {
        let program = match self.active_program.as_mut() {
            None => return,
            Some(program) => program,
        };

        if let Err(error) = program.update() {
            warn!("program step failed: {}", error);
            self.display.show_error(&error);
        }

        if let Some(elements) = program.take_display_delta() {
            for element in self.shown.drain(..) {
                self.display.remove_primitive(&element);
            }
            for element in &elements {
                self.display.add_primitive(element);
            }
            self.shown = elements;
        }
    }
}
