// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Default transition duration in milliseconds.
pub const DEFAULT_TRANSITION_DURATION_MS: f64 = 300.0;

/// Options pushed by the host wrapper.
///
/// Hosts typically keep one of these per zoomable element and hand a fresh
/// copy to [`ZoomEngine::update`](crate::ZoomEngine::update) whenever any
/// field changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomOptions {
    /// Minimum gap between the zoomed image and the viewport edges, in pixels.
    pub margin: f64,
    /// Duration of every overlay transition, in milliseconds.
    pub transition_duration_ms: f64,
    /// Backdrop color at rest (usually fully transparent).
    pub overlay_color_start: Color,
    /// Backdrop color while zoomed.
    pub overlay_color_end: Color,
    /// Externally controlled zoom state.
    pub is_zoomed: bool,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            margin: 0.0,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            overlay_color_start: Color::from_rgba8(255, 255, 255, 0),
            overlay_color_end: Color::WHITE.with_alpha(0.95),
            is_zoomed: false,
        }
    }
}

impl ZoomOptions {
    /// Sets the zoom margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the transition duration.
    #[must_use]
    pub fn with_transition_duration(mut self, ms: f64) -> Self {
        self.transition_duration_ms = ms;
        self
    }

    /// Sets the backdrop colors at rest and while zoomed.
    #[must_use]
    pub fn with_overlay_colors(mut self, start: Color, end: Color) -> Self {
        self.overlay_color_start = start;
        self.overlay_color_end = end;
        self
    }

    /// Sets the externally controlled zoom state.
    #[must_use]
    pub fn with_zoomed(mut self, is_zoomed: bool) -> Self {
        self.is_zoomed = is_zoomed;
        self
    }

    /// Returns a copy with negative or non-finite lengths floored to zero.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            log::warn!("zoom margin {} is invalid; using 0", self.margin);
            self.margin = 0.0;
        }
        if !(self.transition_duration_ms.is_finite() && self.transition_duration_ms >= 0.0) {
            log::warn!(
                "zoom transition duration {} is invalid; using 0",
                self.transition_duration_ms
            );
            self.transition_duration_ms = 0.0;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ZoomOptions::default();
        assert_eq!(opts.margin, 0.0);
        assert_eq!(opts.transition_duration_ms, 300.0);
        assert!(!opts.is_zoomed);
        assert_eq!(opts.overlay_color_start.components[3], 0.0);
    }

    #[test]
    fn sanitize_floors_invalid_lengths() {
        let opts = ZoomOptions::default()
            .with_margin(-4.0)
            .with_transition_duration(f64::NAN)
            .sanitized();
        assert_eq!(opts.margin, 0.0);
        assert_eq!(opts.transition_duration_ms, 0.0);

        let opts = ZoomOptions::default().with_margin(24.0).sanitized();
        assert_eq!(opts.margin, 24.0);
    }
}
