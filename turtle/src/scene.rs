// terrapin/turtle/src/scene.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renderable primitives the turtles emit toward the display surface.

use terrapin_geometry::basic::line_segment::LineSegmentF32;
use terrapin_geometry::basic::point::Point2DF32;
use terrapin_geometry::basic::rect::RectF32;

/// The turtle's on-screen triangle, in shape-local coordinates.
pub const TURTLE_POLYGON: [(f32, f32); 3] = [(2.0, 2.0), (7.0, -10.0), (12.0, 2.0)];

/// A snapshot of a turtle's pose and stroke visibility. Stamps are markers
/// too; a marker never shares state with the turtle it was copied from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurtleMarker {
    pub position: Point2DF32,
    pub heading: i32,
    pub visible: bool,
}

/// An IO slider a program asks the display to show. The core only carries
/// the numbers; widget construction is the collaborator's problem.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderSpec {
    pub name: String,
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub major_tick: i32,
    pub block_increment: i32,
}

/// One element of a program's display delta set.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayElement {
    Line(LineSegmentF32),
    Marker(TurtleMarker),
    Label(String),
    Slider(SliderSpec),
}

/// Union bounds of everything drawable in the element set. Labels and
/// sliders have no canvas position and are ignored.
pub fn bounds(elements: &[DisplayElement]) -> Option<RectF32> {
    let mut rect: Option<RectF32> = None;
    for element in elements {
        let points: [Option<Point2DF32>; 2] = match element {
            DisplayElement::Line(segment) => [Some(segment.from()), Some(segment.to())],
            DisplayElement::Marker(marker) => [Some(marker.position), None],
            _ => [None, None],
        };
        for point in points.iter().flatten() {
            rect = Some(match rect {
                None => RectF32::from_point(*point),
                Some(rect) => rect.union_point(*point),
            });
        }
    }
    rect
}
