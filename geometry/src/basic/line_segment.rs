// terrapin/geometry/src/basic/line_segment.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line segments.

use crate::basic::point::Point2DF32;
use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSegmentF32 {
    from: Point2DF32,
    to: Point2DF32,
}

impl LineSegmentF32 {
    #[inline]
    pub fn new(from: &Point2DF32, to: &Point2DF32) -> LineSegmentF32 {
        LineSegmentF32 {
            from: *from,
            to: *to,
        }
    }

    #[inline]
    pub fn from(&self) -> Point2DF32 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point2DF32 {
        self.to
    }
}
