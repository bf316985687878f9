// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only access to the hosting viewport.
//!
//! The zoom calculators never read global window state directly. Hosts hand
//! the engine a [`ViewportQuery`] and the engine asks it for the current
//! viewport size and scroll offset every time it recomputes a frame. Nothing
//! returned here is cached between recomputes.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Size, Vec2};

/// Query interface for the viewport hosting a zoomable element.
pub trait ViewportQuery {
    /// Returns the current inner size of the viewport in device-independent pixels.
    fn viewport_size(&self) -> Size;

    /// Returns the current document scroll offset.
    ///
    /// Element rectangles are measured in viewport coordinates; this offset
    /// converts them into document coordinates for absolutely positioned overlays.
    fn scroll_offset(&self) -> Vec2;

    /// Returns the viewport center in viewport coordinates.
    fn viewport_center(&self) -> Point {
        let size = self.viewport_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }
}

impl<T: ViewportQuery + ?Sized> ViewportQuery for &T {
    fn viewport_size(&self) -> Size {
        (**self).viewport_size()
    }

    fn scroll_offset(&self) -> Vec2 {
        (**self).scroll_offset()
    }
}

impl<T: ViewportQuery + ?Sized> ViewportQuery for Rc<T> {
    fn viewport_size(&self) -> Size {
        (**self).viewport_size()
    }

    fn scroll_offset(&self) -> Vec2 {
        (**self).scroll_offset()
    }
}

impl<T: ViewportQuery + Copy> ViewportQuery for Cell<T> {
    fn viewport_size(&self) -> Size {
        self.get().viewport_size()
    }

    fn scroll_offset(&self) -> Vec2 {
        self.get().scroll_offset()
    }
}

/// A fixed viewport description.
///
/// Useful for tests and for hosts that push viewport changes explicitly
/// (for example by storing it in a `Cell` and updating it on resize/scroll).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticViewport {
    /// Inner viewport size.
    pub size: Size,
    /// Document scroll offset.
    pub scroll: Vec2,
}

impl StaticViewport {
    /// Creates an unscrolled viewport of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            scroll: Vec2::ZERO,
        }
    }

    /// Returns a copy of this viewport with the given scroll offset.
    #[must_use]
    pub fn with_scroll(mut self, scroll: Vec2) -> Self {
        self.scroll = scroll;
        self
    }
}

impl ViewportQuery for StaticViewport {
    fn viewport_size(&self) -> Size {
        self.size
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }
}
