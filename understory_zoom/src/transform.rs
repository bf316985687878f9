// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform calculator: overlay placement for the rest and zoomed states.
//!
//! The overlay image is laid out once at its *effective* (zoomed) size,
//! anchored at the original element's document position with a top-left
//! transform origin. Only the transform changes between states:
//!
//! - Rest: `scale(1/s) translate(0,0)`. The box paints exactly over the
//!   original element.
//! - Zoomed: `scale(1) translate(tx, ty)`. The box paints at full effective
//!   size, centered in the viewport.
//!
//! Animating between the two is a pure transform transition, so the browser
//! (or any compositor) never has to re-run layout mid-animation.

use alloc::string::String;
use core::fmt::Write as _;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::fit::FitResult;
use crate::phase::ZoomPhase;
use crate::source::{LoadedImage, ObjectFit, SourceSnapshot};
use crate::viewport::ViewportQuery;

/// Geometry of a placed overlay image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Document-space top of the layout box.
    pub top: f64,
    /// Document-space left of the layout box.
    pub left: f64,
    /// Layout width.
    pub width: f64,
    /// Layout height.
    pub height: f64,
    /// Transform scale (`1/s` at rest, `1` when zoomed).
    pub scale: f64,
    /// Transform translation, applied before the scale.
    pub translate: Vec2,
}

impl Placement {
    /// Layout box in document coordinates, before the transform.
    #[must_use]
    pub fn layout_rect(&self) -> Rect {
        Rect::from_origin_size((self.left, self.top), (self.width, self.height))
    }

    /// Transform from layout-box-local coordinates to document coordinates.
    ///
    /// Matches CSS `transform: scale(s) translate(t)` with a top-left origin.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.left, self.top))
            * Affine::scale(self.scale)
            * Affine::translate(self.translate)
    }

    /// Painted rectangle in document coordinates.
    #[must_use]
    pub fn visual_rect(&self) -> Rect {
        self.to_affine()
            .transform_rect_bbox(Size::new(self.width, self.height).to_rect())
    }

    /// CSS `transform` value for this placement.
    #[must_use]
    pub fn css_transform(&self) -> String {
        let mut out = String::new();
        if self.translate == Vec2::ZERO {
            let _ = write!(out, "scale({}) translate(0,0)", self.scale);
        } else {
            let _ = write!(
                out,
                "scale({}) translate({}px,{}px)",
                self.scale, self.translate.x, self.translate.y
            );
        }
        out
    }
}

/// Style of the overlay image for one frame.
///
/// `placement` is `None` until the full-resolution image has loaded; the
/// presenter then only positions the image absolutely, with no geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformStyle {
    /// Placed geometry, or `None` for the placeholder state.
    pub placement: Option<Placement>,
    /// Duration applied to every animated property.
    pub transition_duration_ms: f64,
}

impl TransformStyle {
    /// Placeholder style: absolutely positioned, no geometry yet.
    #[must_use]
    pub fn placeholder(transition_duration_ms: f64) -> Self {
        Self {
            placement: None,
            transition_duration_ms,
        }
    }

    /// Returns `true` for the placeholder state.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placement.is_none()
    }

    /// CSS `position` value. Always `absolute`.
    #[must_use]
    pub fn css_position(&self) -> &'static str {
        "absolute"
    }

    /// CSS `transform-origin` value.
    #[must_use]
    pub fn css_transform_origin(&self) -> &'static str {
        "top left"
    }

    /// CSS `transition-property` value.
    #[must_use]
    pub fn css_transition_property(&self) -> &'static str {
        "transform"
    }
}

/// Layout size of the overlay box for `snapshot`.
///
/// For `object-fit: cover` the loaded image's own aspect ratio is kept while
/// covering the rendered rectangle, then `fit.scale` is reapplied. Every other
/// mode uses the effective size from `fit`.
#[must_use]
pub fn overlay_size(snapshot: &SourceSnapshot, fit: &FitResult, loaded: &LoadedImage) -> Size {
    let image = loaded.size();
    if snapshot.object_fit != ObjectFit::Cover || image.width <= 0.0 || image.height <= 0.0 {
        return fit.effective_size();
    }
    let rendered = snapshot.rendered_size();
    let cover = if image.width / image.height > rendered.width / rendered.height {
        Size::new(rendered.height / image.height * image.width, rendered.height)
    } else {
        Size::new(rendered.width, rendered.width / image.width * image.height)
    };
    cover * fit.scale
}

/// Computes the overlay image style for one frame.
///
/// Without a loaded image the result is the placeholder. `Zoomed` produces
/// the centered transform; every other phase produces the rest transform.
/// The viewport is read fresh on every call.
#[must_use]
pub fn compute<V: ViewportQuery + ?Sized>(
    snapshot: &SourceSnapshot,
    fit: &FitResult,
    loaded: Option<&LoadedImage>,
    phase: ZoomPhase,
    viewport: &V,
    transition_duration_ms: f64,
) -> TransformStyle {
    let Some(loaded) = loaded else {
        return TransformStyle::placeholder(transition_duration_ms);
    };

    let rect = snapshot.rect;
    let scroll = viewport.scroll_offset();
    let size = overlay_size(snapshot, fit, loaded);

    let (scale, translate) = if phase == ZoomPhase::Zoomed {
        let center = viewport.viewport_center();
        let scaled_center = Point::new(
            rect.x0 + rect.width() * fit.scale / 2.0,
            rect.y0 + rect.height() * fit.scale / 2.0,
        );
        (1.0, center - scaled_center)
    } else {
        (1.0 / fit.scale, Vec2::ZERO)
    };

    TransformStyle {
        placement: Some(Placement {
            top: rect.y0 + scroll.y,
            left: rect.x0 + scroll.x,
            width: size.width,
            height: size.height,
            scale,
            translate,
        }),
        transition_duration_ms,
    }
}
