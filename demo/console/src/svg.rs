// terrapin/demo/console/src/svg.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writes the final canvas as a small hand-rolled SVG document.

use std::fs::File;
use std::io::{self, Write};

use terrapin_geometry::basic::point::Point2DF32;
use terrapin_turtle::scene::{self, DisplayElement, TURTLE_POLYGON};

const MARGIN: f32 = 10.0;

pub fn write_scene(path: &str, elements: &[DisplayElement]) -> io::Result<()> {
    let mut out = File::create(path)?;

    let (origin, width, height) = match scene::bounds(elements) {
        Some(rect) => (rect.origin(), rect.width(), rect.height()),
        None => (Point2DF32::new(0.0, 0.0), 0.0, 0.0),
    };

    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"{} {} {} {}\">",
        origin.x() - MARGIN,
        origin.y() - MARGIN,
        width + 2.0 * MARGIN,
        height + 2.0 * MARGIN
    )?;
    writeln!(out, "<g stroke=\"black\" stroke-width=\"1\" fill=\"none\">")?;

    for element in elements {
        match element {
            DisplayElement::Line(segment) => {
                writeln!(
                    out,
                    "<path d=\"M{} {} L{} {}\" />",
                    segment.from().x(),
                    segment.from().y(),
                    segment.to().x(),
                    segment.to().y()
                )?;
            }
            DisplayElement::Marker(marker) if marker.visible => {
                let points: Vec<String> = TURTLE_POLYGON
                    .iter()
                    .map(|(x, y)| format!("{},{}", x, y))
                    .collect();
                // The polygon points up at the start heading of -90.
                writeln!(
                    out,
                    "<polygon points=\"{}\" transform=\"translate({} {}) rotate({})\" />",
                    points.join(" "),
                    marker.position.x(),
                    marker.position.y(),
                    marker.heading + 90
                )?;
            }
            _ => {}
        }
    }

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(())
}
