// terrapin/program/src/package.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A program's pending display elements.

use terrapin_turtle::scene::{DisplayElement, TurtleMarker};

/// Drawables a program has produced, newest first. The engine pulls the
/// whole package whenever it changed and reconciles it against the display
/// with remove-all-then-add-all semantics; the live turtle marker is
/// appended at pull time so it always shows the current pose.
#[derive(Debug)]
pub struct DisplayPackage {
    elements: Vec<DisplayElement>,
    updated: bool,
}

impl DisplayPackage {
    /// A new package starts marked updated so the program's turtle shows up
    /// on the first pull.
    pub fn new() -> DisplayPackage {
        DisplayPackage {
            elements: Vec::new(),
            updated: true,
        }
    }

    pub fn elements(&self) -> &[DisplayElement] {
        &self.elements
    }

    pub fn add_front(&mut self, element: DisplayElement) {
        self.elements.insert(0, element);
        self.updated = true;
    }

    /// Adds a batch of drawables. An empty batch does not flag an update.
    pub fn extend_front(&mut self, elements: Vec<DisplayElement>) {
        if elements.is_empty() {
            return;
        }
        for element in elements {
            self.elements.insert(0, element);
        }
        self.updated = true;
    }

    /// The full element set plus the turtle marker, if anything changed
    /// since the last pull.
    pub fn take(&mut self, marker: TurtleMarker) -> Option<Vec<DisplayElement>> {
        if !self.updated {
            return None;
        }
        self.updated = false;
        let mut snapshot = self.elements.clone();
        snapshot.push(DisplayElement::Marker(marker));
        Some(snapshot)
    }
}

impl Default for DisplayPackage {
    fn default() -> DisplayPackage {
        DisplayPackage::new()
    }
}
