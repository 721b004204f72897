// terrapin/engine/tests/interactive.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end engine ticks against recording input and display surfaces.

use std::collections::VecDeque;
use std::fs;
use std::io::Write;

use terrapin_command::CommandError;
use terrapin_engine::{DisplaySurface, Engine, InputSurface};
use terrapin_geometry::basic::point::Point2DF32;
use terrapin_program::script::ScriptReader;
use terrapin_turtle::scene::DisplayElement;

#[derive(Default)]
struct RecordingDisplay {
    current: Vec<DisplayElement>,
    errors: Vec<String>,
}

impl DisplaySurface for RecordingDisplay {
    fn add_primitive(&mut self, element: &DisplayElement) {
        self.current.push(element.clone());
    }

    fn remove_primitive(&mut self, element: &DisplayElement) {
        if let Some(index) = self.current.iter().position(|shown| shown == element) {
            self.current.remove(index);
        }
    }

    fn show_error(&mut self, error: &CommandError) {
        self.errors.push(error.to_string());
    }
}

#[derive(Default)]
struct QueuedInput {
    lines: VecDeque<String>,
}

impl QueuedInput {
    fn push(&mut self, line: &str) {
        self.lines.push_back(line.to_string());
    }

    fn queued(&self) -> usize {
        self.lines.len()
    }
}

impl InputSurface for QueuedInput {
    fn pending_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

fn new_engine() -> Engine<RecordingDisplay, QueuedInput> {
    Engine::new(
        RecordingDisplay::default(),
        QueuedInput::default(),
        ScriptReader::new(),
    )
}

fn engine_with_scripts(
    scripts: &[(&str, &str)],
) -> (Engine<RecordingDisplay, QueuedInput>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in scripts {
        let mut file = fs::File::create(dir.path().join(name)).unwrap();
        write!(file, "{}", body).unwrap();
    }
    let engine = Engine::new(
        RecordingDisplay::default(),
        QueuedInput::default(),
        ScriptReader::with_root(dir.path()),
    );
    (engine, dir)
}

fn lines_shown(display: &RecordingDisplay) -> Vec<&terrapin_geometry::basic::line_segment::LineSegmentF32> {
    display
        .current
        .iter()
        .filter_map(|element| match element {
            DisplayElement::Line(segment) => Some(segment),
            _ => None,
        })
        .collect()
}

fn assert_close(actual: Point2DF32, expected: Point2DF32) {
    assert!(
        (actual.x() - expected.x()).abs() < 0.05 && (actual.y() - expected.y()).abs() < 0.05,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn logo_draws_a_line_and_exit_clears_the_display() {
    let mut engine = new_engine();
    engine.input_mut().push("logo");
    engine.input_mut().push("fd 50");

    engine.tick();
    assert_eq!(engine.active_program_name(), Some("LogoVisualizer"));

    engine.tick();
    let lines = lines_shown(engine.display());
    assert_eq!(lines.len(), 1);
    // Home is (320, 270) and the start heading is -90: straight up.
    assert_close(lines[0].from(), Point2DF32::new(320.0, 270.0));
    assert_close(lines[0].to(), Point2DF32::new(320.0, 220.0));

    engine.input_mut().push("exit");
    engine.tick();
    assert_eq!(engine.active_program_name(), None);
    assert!(engine.display().current.is_empty());
}

#[test]
fn one_command_line_per_tick() {
    let mut engine = new_engine();
    engine.input_mut().push("logo");
    engine.input_mut().push("fd 10");

    engine.tick();
    // The second line is still buffered by the surface.
    assert_eq!(engine.input_mut().queued(), 1);
    assert!(lines_shown(engine.display()).is_empty());

    engine.tick();
    assert_eq!(engine.input_mut().queued(), 0);
    assert_eq!(lines_shown(engine.display()).len(), 1);
}

#[test]
fn unknown_verbs_are_reported_not_fatal() {
    let mut engine = new_engine();

    // At idle, a non-lifecycle verb is an invalid command.
    engine.input_mut().push("fd 50");
    engine.tick();
    assert_eq!(engine.display().errors.len(), 1);
    assert!(engine.display().errors[0].contains("invalid command"));

    // Inside a program, unknown verbs are reported too, and ticks go on.
    engine.input_mut().push("logo");
    engine.input_mut().push("teleport 7");
    engine.tick();
    engine.tick();
    assert_eq!(engine.display().errors.len(), 2);
    assert_eq!(engine.active_program_name(), Some("LogoVisualizer"));
}

#[test]
fn exit_without_a_program_is_harmless() {
    let mut engine = new_engine();
    engine.input_mut().push("exit");
    engine.tick();
    assert!(engine.display().errors.is_empty());
    assert_eq!(engine.active_program_name(), None);
}

#[test]
fn starting_a_program_with_a_missing_script_reports_and_survives() {
    let (mut engine, _dir) = engine_with_scripts(&[]);
    engine.input_mut().push("logo ghost.logo");
    engine.tick();

    assert_eq!(engine.active_program_name(), Some("LogoVisualizer"));
    assert_eq!(engine.display().errors.len(), 1);
    assert!(engine.display().errors[0].contains("ghost.logo"));
    assert!(!engine.has_pending_work());

    // The program still answers interactive commands.
    engine.input_mut().push("fd 25");
    engine.tick();
    assert_eq!(lines_shown(engine.display()).len(), 1);
}

#[test]
fn logo_script_runs_one_instruction_per_tick() {
    let (mut engine, _dir) = engine_with_scripts(&[("walk.logo", "fd 10\nfd 10\n# done\n")]);
    engine.input_mut().push("logo walk.logo");

    engine.tick();
    // The start tick already advances the program once.
    assert_eq!(lines_shown(engine.display()).len(), 1);
    engine.tick();
    assert_eq!(lines_shown(engine.display()).len(), 2);
    assert!(!engine.has_pending_work());
}

#[test]
fn visualizer_end_to_end() {
    let (mut engine, _dir) =
        engine_with_scripts(&[("koch.lsv", "start F\nrule F F+F-F\n")]);
    engine.input_mut().push("lsv koch.lsv");

    // Start tick: IO sliders show up and the whole script is burst-read.
    engine.tick();
    assert_eq!(engine.active_program_name(), Some("LSystemVisualizer"));
    let sliders = engine
        .display()
        .current
        .iter()
        .filter(|element| matches!(element, DisplayElement::Slider(_)))
        .count();
    assert_eq!(sliders, 3);
    assert!(engine.has_pending_work());

    // Draw tick: F expands to F+F-F at depth 1, giving three strokes.
    engine.tick();
    assert_eq!(lines_shown(engine.display()).len(), 3);
    assert!(!engine.has_pending_work());

    // The sliders survive reconciliation; exit removes everything.
    engine.input_mut().push("exit");
    engine.tick();
    assert!(engine.display().current.is_empty());
}

#[test]
fn slider_controls_reach_the_visualizer() {
    let (mut engine, _dir) = engine_with_scripts(&[("tree.lsv", "start A\nrule A AB\n")]);
    engine.input_mut().push("visualizer tree.lsv");
    engine.tick();

    engine.apply_control("level", 3);
    engine.apply_control("length", 10);

    engine.tick();
    // A -> ABBB: three pen-down B strokes of the configured length.
    let lines = lines_shown(engine.display());
    assert_eq!(lines.len(), 3);
    let first = lines[0];
    let length = ((first.to().x() - first.from().x()).powi(2)
        + (first.to().y() - first.from().y()).powi(2))
    .sqrt();
    assert!((length - 10.0).abs() < 0.05);
}
