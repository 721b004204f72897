// terrapin/geometry/src/basic/point.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D points.

use serde_derive::{Deserialize, Serialize};
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2DF32 {
    x: f32,
    y: f32,
}

impl Point2DF32 {
    #[inline]
    pub fn new(x: f32, y: f32) -> Point2DF32 {
        Point2DF32 { x, y }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn min(&self, other: &Point2DF32) -> Point2DF32 {
        Point2DF32::new(f32::min(self.x, other.x), f32::min(self.y, other.y))
    }

    #[inline]
    pub fn max(&self, other: &Point2DF32) -> Point2DF32 {
        Point2DF32::new(f32::max(self.x, other.x), f32::max(self.y, other.y))
    }
}

impl Add for Point2DF32 {
    type Output = Point2DF32;

    #[inline]
    fn add(self, other: Point2DF32) -> Point2DF32 {
        Point2DF32::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2DF32 {
    type Output = Point2DF32;

    #[inline]
    fn sub(self, other: Point2DF32) -> Point2DF32 {
        Point2DF32::new(self.x - other.x, self.y - other.y)
    }
}
