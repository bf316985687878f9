// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry resolver: how far an element can be scaled inside the viewport.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_zoom::{resolve, ObjectFit, SourceSnapshot, StaticViewport};
//!
//! let snapshot = SourceSnapshot {
//!     rect: Rect::new(0.0, 0.0, 100.0, 80.0),
//!     natural_size: Size::new(100.0, 80.0),
//!     object_fit: ObjectFit::Fill,
//!     resource: None,
//! };
//! let fit = resolve(&snapshot, 20.0, &StaticViewport::new(800.0, 600.0));
//!
//! // (800 - 40) / 100 = 7.6 and (600 - 40) / 80 = 7.0: height binds.
//! assert_eq!(fit.scale, 7.0);
//! assert_eq!(fit.effective_height, 560.0);
//! ```

use kurbo::Size;

use crate::source::SourceSnapshot;
use crate::viewport::ViewportQuery;

/// Scale and effective size an element would occupy when zoomed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    /// Multiplier applied to the rendered size.
    pub scale: f64,
    /// `rendered_width * scale`.
    pub effective_width: f64,
    /// `rendered_height * scale`.
    pub effective_height: f64,
}

impl FitResult {
    /// Builds a fit result for `rendered` at `scale`.
    #[must_use]
    pub fn new(rendered: Size, scale: f64) -> Self {
        Self {
            scale,
            effective_width: rendered.width * scale,
            effective_height: rendered.height * scale,
        }
    }

    /// Effective size as a [`Size`].
    #[must_use]
    pub fn effective_size(&self) -> Size {
        Size::new(self.effective_width, self.effective_height)
    }
}

/// Viewport space left after reserving `margin` on every edge.
///
/// Negative margins reserve nothing, and the result never goes below zero.
#[must_use]
pub fn available_space(viewport: Size, margin: f64) -> Size {
    let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
    Size::new(
        (viewport.width - 2.0 * margin).max(0.0),
        (viewport.height - 2.0 * margin).max(0.0),
    )
}

/// Largest scale at which `rendered` fits inside `available`.
///
/// This may be below `1.0` when the viewport is smaller than the element.
#[must_use]
pub fn scale_to_viewport(rendered: Size, available: Size) -> f64 {
    let sx = available.width / rendered.width;
    let sy = available.height / rendered.height;
    sx.min(sy)
}

/// Scale for a raster element whose intrinsic size is known.
///
/// The natural image is fitted into `available`, and the result is expressed
/// relative to the rendered box through the natural-to-rendered ratio of the
/// dominant natural axis. The viewport-only scale still caps the result, so a
/// cropped or stretched element never overflows the available space.
#[must_use]
pub fn scale_to_viewport_max(rendered: Size, natural: Size, available: Size) -> f64 {
    let natural_fit = scale_to_viewport(natural, available);
    let ratio = if natural.width > natural.height {
        natural.width / rendered.width
    } else {
        natural.height / rendered.height
    };
    (natural_fit * ratio).min(scale_to_viewport(rendered, available))
}

/// Resolves the zoom scale for `snapshot` inside the viewport.
///
/// Vector resources and resources with unknown natural size use
/// [`scale_to_viewport`]; raster resources with a known size use
/// [`scale_to_viewport_max`]. Degenerate inputs (no rendered area, no
/// available space) resolve to the identity scale, which presents the element
/// at its rendered size.
#[must_use]
pub fn resolve<V: ViewportQuery + ?Sized>(
    snapshot: &SourceSnapshot,
    margin: f64,
    viewport: &V,
) -> FitResult {
    let rendered = snapshot.rendered_size();
    let available = available_space(viewport.viewport_size(), margin);

    let scale = if snapshot.is_vector() || !snapshot.has_natural_size() {
        scale_to_viewport(rendered, available)
    } else {
        scale_to_viewport_max(rendered, snapshot.natural_size, available)
    };

    if scale.is_finite() && scale > 0.0 {
        FitResult::new(rendered, scale)
    } else {
        log::debug!("no usable zoom scale for {rendered:?} in {available:?}; using identity");
        FitResult::new(rendered, 1.0)
    }
}
