// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geocanvas_geometry::UNLATCHED;
use kurbo::Point;

/// A remembered device pixel, such as the last click or hover position.
///
/// An empty latch holds [`UNLATCHED`], which never hits any geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelLatch {
    position: Point,
}

impl Default for PixelLatch {
    fn default() -> Self {
        Self {
            position: UNLATCHED,
        }
    }
}

impl PixelLatch {
    /// Latches `position`. Returns `true` if the latched pixel changed.
    pub fn set(&mut self, position: Point) -> bool {
        let changed = self.position != position;
        self.position = position;
        changed
    }

    /// Empties the latch. Returns `true` if it held a position.
    pub fn clear(&mut self) -> bool {
        self.set(UNLATCHED)
    }

    /// Returns the latched pixel, if any.
    #[must_use]
    pub fn get(&self) -> Option<Point> {
        (self.position != UNLATCHED).then_some(self.position)
    }

    /// Returns the raw latched pixel, [`UNLATCHED`] when empty.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }
}
