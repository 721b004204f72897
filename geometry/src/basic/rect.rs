// terrapin/geometry/src/basic/rect.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Axis-aligned rectangles, stored as origin and lower-right corner.

use crate::basic::point::Point2DF32;
use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF32 {
    origin: Point2DF32,
    lower_right: Point2DF32,
}

impl RectF32 {
    #[inline]
    pub fn new(origin: Point2DF32, lower_right: Point2DF32) -> RectF32 {
        RectF32 {
            origin,
            lower_right,
        }
    }

    #[inline]
    pub fn from_point(point: Point2DF32) -> RectF32 {
        RectF32::new(point, point)
    }

    #[inline]
    pub fn origin(&self) -> Point2DF32 {
        self.origin
    }

    #[inline]
    pub fn lower_right(&self) -> Point2DF32 {
        self.lower_right
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.lower_right.x() - self.origin.x()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.lower_right.y() - self.origin.y()
    }

    #[inline]
    pub fn union_point(&self, point: Point2DF32) -> RectF32 {
        RectF32::new(self.origin.min(&point), self.lower_right.max(&point))
    }

    #[inline]
    pub fn union_rect(&self, other: RectF32) -> RectF32 {
        self.union_point(other.origin).union_point(other.lower_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_point_grows_in_all_directions() {
        let rect = RectF32::from_point(Point2DF32::new(10.0, 10.0));
        let rect = rect.union_point(Point2DF32::new(-5.0, 20.0));
        assert_eq!(rect.origin(), Point2DF32::new(-5.0, 10.0));
        assert_eq!(rect.lower_right(), Point2DF32::new(10.0, 20.0));
    }

    #[test]
    fn union_rect_covers_both() {
        let a = RectF32::new(Point2DF32::new(0.0, 0.0), Point2DF32::new(1.0, 1.0));
        let b = RectF32::new(Point2DF32::new(-2.0, 0.5), Point2DF32::new(0.5, 3.0));
        let u = a.union_rect(b);
        assert_eq!(u.origin(), Point2DF32::new(-2.0, 0.0));
        assert_eq!(u.lower_right(), Point2DF32::new(1.0, 3.0));
    }
}
