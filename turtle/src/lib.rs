// terrapin/turtle/src/lib.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The turtle drawing agents: shared pose state plus the Logo and L-system
//! dispatch fronts that turn commands into display elements.

pub mod scene;

use terrapin_command::{expand_args, negate, run_command, Command, CommandError, Dispatch};
use terrapin_geometry::basic::line_segment::LineSegmentF32;
use terrapin_geometry::basic::point::Point2DF32;

use crate::scene::{DisplayElement, TurtleMarker};

/// Where `home` puts a turtle, and where new turtles start.
pub const HOME_X: f32 = 320.0;
pub const HOME_Y: f32 = 270.0;

/// The heading new turtles start with: straight up in screen coordinates.
pub const START_HEADING: i32 = -90;

/// Every verb the drawing tier answers to. Also the lookahead set for
/// multi-argument splitting.
pub const DRAWING_VERBS: [&str; 10] = [
    "fd", "bk", "pu", "pd", "home", "lt", "rt", "ht", "st", "stamp",
];

pub fn home() -> Point2DF32 {
    Point2DF32::new(HOME_X, HOME_Y)
}

fn parse_units(text: &str, command: &Command) -> Result<i32, CommandError> {
    text.parse()
        .map_err(|_| CommandError::invalid_argument(command))
}

/// The state every turtle owns: position, an unbounded accumulating heading
/// in degrees, the pen, and stroke visibility. Movement math converts the
/// heading to radians on the fly; rotations stay exact integers.
#[derive(Clone, Debug)]
pub struct TurtleBody {
    position: Point2DF32,
    heading: i32,
    pen_down: bool,
    visible: bool,
}

impl TurtleBody {
    pub fn new() -> TurtleBody {
        TurtleBody {
            position: home(),
            heading: START_HEADING,
            pen_down: true,
            visible: true,
        }
    }

    pub fn position(&self) -> Point2DF32 {
        self.position
    }

    pub fn heading(&self) -> i32 {
        self.heading
    }

    pub fn pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// An independent snapshot of the current pose and stroke state.
    pub fn marker(&self) -> TurtleMarker {
        TurtleMarker {
            position: self.position,
            heading: self.heading,
            visible: self.visible,
        }
    }

    /// Returns to the home position. The heading is left alone.
    pub fn home(&mut self) {
        self.position = home();
    }

    pub fn rotate(&mut self, degrees: i32) {
        self.heading += degrees;
    }

    /// Moves along the current heading, emitting a line when the pen is
    /// down. Negative distances move backward.
    pub fn forward(&mut self, distance: i32) -> Option<DisplayElement> {
        let (sin, cos) = (self.heading as f32).to_radians().sin_cos();
        let from = self.position;
        let to = Point2DF32::new(
            from.x() + distance as f32 * cos,
            from.y() + distance as f32 * sin,
        );
        self.position = to;
        if self.pen_down {
            Some(DisplayElement::Line(LineSegmentF32::new(&from, &to)))
        } else {
            None
        }
    }

    /// A non-moving copy of the turtle's shape at the current pose.
    pub fn stamp(&self) -> DisplayElement {
        DisplayElement::Marker(self.marker())
    }

    /// The tier-1 dispatch table: the ten drawing verbs.
    pub fn apply(&mut self, command: &Command) -> Result<Option<DisplayElement>, CommandError> {
        let verb = command.verb().unwrap_or("");
        match (verb, command.args()) {
            ("fd", [distance]) => Ok(self.forward(parse_units(distance, command)?)),
            ("bk", [distance]) => Ok(self.forward(parse_units(&negate(distance), command)?)),
            ("lt", [angle]) => {
                let angle = parse_units(angle, command)?;
                self.rotate(-angle);
                Ok(None)
            }
            ("rt", [angle]) => {
                let angle = parse_units(angle, command)?;
                self.rotate(angle);
                Ok(None)
            }
            ("pu", []) => {
                self.pen_down = false;
                Ok(None)
            }
            ("pd", []) => {
                self.pen_down = true;
                Ok(None)
            }
            ("home", []) => {
                self.home();
                Ok(None)
            }
            ("ht", []) => {
                self.visible = false;
                Ok(None)
            }
            ("st", []) => {
                self.visible = true;
                Ok(None)
            }
            ("stamp", []) => Ok(Some(self.stamp())),
            _ => Err(CommandError::invalid_command(command)),
        }
    }
}

impl Default for TurtleBody {
    fn default() -> TurtleBody {
        TurtleBody::new()
    }
}

/// The Logo-style turtle: the drawing tier plus multi-argument splitting,
/// so `fd 50 rt 90 fd 50` on one line runs as three commands.
#[derive(Debug, Default)]
pub struct LogoTurtle {
    body: TurtleBody,
}

impl LogoTurtle {
    pub fn new() -> LogoTurtle {
        LogoTurtle {
            body: TurtleBody::new(),
        }
    }

    pub fn body(&self) -> &TurtleBody {
        &self.body
    }

    // Turns a command with several arguments into single- and zero-argument
    // commands. The first argument sticks to the original verb unless it
    // names a drawing verb itself; the rest split on the known-verb
    // lookahead. Splitting resumes after the first argument either way.
    fn split_multi(&self, command: &Command) -> Vec<Command> {
        let verb = command.verb().unwrap_or("");
        let args = command.args();
        let mut pieces = Vec::new();
        if DRAWING_VERBS.contains(&args[0].as_str()) {
            pieces.push(Command::bare(verb));
        } else {
            pieces.push(Command::with_arg(verb, args[0].clone()));
        }
        expand_args(&mut pieces, &args[1..], &DRAWING_VERBS);
        pieces
    }
}

impl Dispatch for LogoTurtle {
    type Output = Vec<DisplayElement>;

    fn lookup(&mut self, command: &Command) -> Result<Vec<DisplayElement>, CommandError> {
        Ok(self.body.apply(command)?.into_iter().collect())
    }

    fn dispatch(&mut self, command: &Command) -> Result<Option<Vec<DisplayElement>>, CommandError> {
        if command.verb().is_some() && command.args().len() > 1 {
            let mut emitted = Vec::new();
            for piece in self.split_multi(command) {
                if let Some(elements) = run_command(self, &piece)? {
                    emitted.extend(elements);
                }
            }
            return Ok(Some(emitted));
        }
        run_command(self, command)
    }
}

/// Default movement parameters for the L-system turtle.
pub const DEFAULT_LENGTH: &str = "30";
pub const DEFAULT_TURN_ANGLE: &str = "60";

/// The L-system turtle: stored length and turn-angle parameters feed the
/// zero-argument movement forms that symbol libraries expand to.
///
/// The parameters are kept as raw text and parsed only when used, so a
/// `setlength` with a bad value succeeds and the next `fd` reports the
/// argument failure.
#[derive(Debug)]
pub struct LsystemTurtle {
    body: TurtleBody,
    length: String,
    turn_angle: String,
}

impl LsystemTurtle {
    pub fn new() -> LsystemTurtle {
        LsystemTurtle {
            body: TurtleBody::new(),
            length: DEFAULT_LENGTH.to_string(),
            turn_angle: DEFAULT_TURN_ANGLE.to_string(),
        }
    }

    pub fn body(&self) -> &TurtleBody {
        &self.body
    }

    pub fn length(&self) -> &str {
        &self.length
    }

    pub fn turn_angle(&self) -> &str {
        &self.turn_angle
    }
}

impl Default for LsystemTurtle {
    fn default() -> LsystemTurtle {
        LsystemTurtle::new()
    }
}

impl Dispatch for LsystemTurtle {
    type Output = Vec<DisplayElement>;

    fn lookup(&mut self, command: &Command) -> Result<Vec<DisplayElement>, CommandError> {
        let verb = command.verb().unwrap_or("");
        let emitted = match (verb, command.args()) {
            ("fd", []) => self.body.apply(&Command::with_arg("fd", self.length.clone()))?,
            ("bk", []) => self.body.apply(&Command::with_arg("bk", self.length.clone()))?,
            ("lt", []) => self
                .body
                .apply(&Command::with_arg("lt", self.turn_angle.clone()))?,
            ("rt", []) => self
                .body
                .apply(&Command::with_arg("rt", self.turn_angle.clone()))?,
            ("setlength", [length]) => {
                self.length = length.clone();
                None
            }
            ("setangle", [angle]) => {
                self.turn_angle = angle.clone();
                None
            }
            _ => self.body.apply(command)?,
        };
        Ok(emitted.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: Point2DF32, expected: Point2DF32) {
        assert!(
            (actual.x() - expected.x()).abs() < 0.05
                && (actual.y() - expected.y()).abs() < 0.05,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn new_turtle_pose() {
        let body = TurtleBody::new();
        assert_eq!(body.position(), home());
        assert_eq!(body.heading(), START_HEADING);
        assert!(body.pen_down());
        assert!(body.visible());
    }

    #[test]
    fn forward_draws_straight_up_from_home() {
        let mut body = TurtleBody::new();
        let element = body.forward(50);
        match element {
            Some(DisplayElement::Line(segment)) => {
                assert_close(segment.from(), Point2DF32::new(320.0, 270.0));
                assert_close(segment.to(), Point2DF32::new(320.0, 220.0));
            }
            other => panic!("expected a line, got {:?}", other),
        }
        assert_close(body.position(), Point2DF32::new(320.0, 220.0));
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let mut body = TurtleBody::new();
        body.apply(&Command::from_line("pu")).unwrap();
        assert!(body.apply(&Command::from_line("fd 50")).unwrap().is_none());
        assert_close(body.position(), Point2DF32::new(320.0, 220.0));
    }

    #[test]
    fn home_resets_position_but_not_heading() {
        let mut body = TurtleBody::new();
        body.apply(&Command::from_line("rt 45")).unwrap();
        body.forward(10);
        body.apply(&Command::from_line("home")).unwrap();
        assert_eq!(body.position(), home());
        assert_eq!(body.heading(), START_HEADING + 45);
    }

    #[test]
    fn stamp_is_an_independent_copy() {
        let mut body = TurtleBody::new();
        body.apply(&Command::from_line("ht")).unwrap();
        let stamp = body.stamp();
        body.forward(25);
        body.rotate(90);
        match stamp {
            DisplayElement::Marker(marker) => {
                assert_eq!(marker.position, home());
                assert_eq!(marker.heading, START_HEADING);
                assert!(!marker.visible);
            }
            other => panic!("expected a marker, got {:?}", other),
        }
    }

    #[test]
    fn logo_turtle_splits_multi_argument_lines() {
        let mut turtle = LogoTurtle::new();
        let emitted = turtle
            .dispatch(&Command::from_line("fd 50 rt 90 fd 50"))
            .unwrap()
            .unwrap();
        assert_eq!(emitted.len(), 2);
        assert_close(turtle.body().position(), Point2DF32::new(370.0, 220.0));
        assert_eq!(turtle.body().heading(), 0);
    }

    #[test]
    fn logo_turtle_split_stops_at_first_bad_piece() {
        // `fd` immediately followed by a verb loses its argument slot; the
        // zero-argument `fd` has no table entry and everything after the
        // failure is abandoned.
        let mut turtle = LogoTurtle::new();
        let before = turtle.body().position();
        match turtle.dispatch(&Command::from_line("fd rt 90")) {
            Err(CommandError::InvalidCommand(_)) => {}
            other => panic!("expected InvalidCommand, got {:?}", other),
        }
        assert_eq!(turtle.body().position(), before);
        assert_eq!(turtle.body().heading(), START_HEADING);
    }

    #[test]
    fn logo_turtle_error_taxonomy() {
        let mut turtle = LogoTurtle::new();
        match turtle.dispatch(&Command::from_line("warp 10")) {
            Err(CommandError::InvalidCommand(_)) => {}
            other => panic!("expected InvalidCommand, got {:?}", other),
        }
        match turtle.dispatch(&Command::from_line("fd")) {
            Err(CommandError::InvalidCommand(_)) => {}
            other => panic!("expected InvalidCommand, got {:?}", other),
        }
        match turtle.dispatch(&Command::from_line("fd abc")) {
            Err(CommandError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        // `bk` negates before parsing, so garbage still fails as an argument.
        match turtle.dispatch(&Command::from_line("bk abc")) {
            Err(CommandError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn lsystem_turtle_uses_stored_parameters() {
        let mut turtle = LsystemTurtle::new();
        let emitted = turtle.dispatch(&Command::from_line("fd")).unwrap().unwrap();
        assert_eq!(emitted.len(), 1);
        assert_close(turtle.body().position(), Point2DF32::new(320.0, 240.0));

        turtle
            .dispatch(&Command::from_line("setlength 10"))
            .unwrap();
        turtle.dispatch(&Command::from_line("setangle 90")).unwrap();
        turtle.dispatch(&Command::from_line("rt")).unwrap();
        turtle.dispatch(&Command::from_line("fd")).unwrap();
        assert_close(turtle.body().position(), Point2DF32::new(330.0, 240.0));
    }

    #[test]
    fn lsystem_turtle_parses_parameters_lazily() {
        let mut turtle = LsystemTurtle::new();
        // Storing garbage succeeds; using it is the failure.
        turtle
            .dispatch(&Command::from_line("setlength abc"))
            .unwrap();
        match turtle.dispatch(&Command::from_line("fd")) {
            Err(CommandError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn lsystem_turtle_does_not_split() {
        let mut turtle = LsystemTurtle::new();
        match turtle.dispatch(&Command::from_line("fd 10 rt 90")) {
            Err(CommandError::InvalidCommand(_)) => {}
            other => panic!("expected InvalidCommand, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn forward_backward_round_trip(heading in -720i32..720, distance in 0i32..1000) {
            let mut body = TurtleBody::new();
            body.rotate(heading);
            let start = body.position();
            body.apply(&Command::with_arg("fd", distance.to_string())).unwrap();
            body.apply(&Command::with_arg("bk", distance.to_string())).unwrap();
            prop_assert!((body.position().x() - start.x()).abs() < 0.05);
            prop_assert!((body.position().y() - start.y()).abs() < 0.05);
        }

        #[test]
        fn rotation_composition_is_exact(turn in -100_000i32..100_000) {
            let mut body = TurtleBody::new();
            let start = body.heading();
            body.apply(&Command::with_arg("rt", turn.to_string())).unwrap();
            body.apply(&Command::with_arg("lt", turn.to_string())).unwrap();
            prop_assert_eq!(body.heading(), start);
        }
    }
}
