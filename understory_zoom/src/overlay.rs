// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::options::ZoomOptions;
use crate::phase::ZoomPhase;

/// Style of the overlay wrapper and backdrop for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Whether the overlay wrapper is visible at all.
    pub visible: bool,
    /// Backdrop color; transitions between the start and end colors.
    pub backdrop_color: Color,
    /// Whether the backdrop receives pointer events.
    pub backdrop_pointer_events: bool,
    /// Duration applied to the backdrop color and visibility transitions.
    pub transition_duration_ms: f64,
}

impl OverlayStyle {
    /// Derives the overlay style for `phase`.
    ///
    /// The wrapper is visible from `Zooming` through `Unzooming`. The
    /// backdrop only takes its end color, and only catches pointers, while
    /// `Zoomed`.
    #[must_use]
    pub fn for_phase(phase: ZoomPhase, options: &ZoomOptions) -> Self {
        let zoomed = phase == ZoomPhase::Zoomed;
        Self {
            visible: phase.is_presenting(),
            backdrop_color: if zoomed {
                options.overlay_color_end
            } else {
                options.overlay_color_start
            },
            backdrop_pointer_events: zoomed,
            transition_duration_ms: options.transition_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_fades_in_only_when_zoomed() {
        let opts = ZoomOptions::default();
        let idle = OverlayStyle::for_phase(ZoomPhase::Idle, &opts);
        assert!(!idle.visible);
        assert!(!idle.backdrop_pointer_events);

        let zooming = OverlayStyle::for_phase(ZoomPhase::Zooming, &opts);
        assert!(zooming.visible);
        assert_eq!(zooming.backdrop_color, opts.overlay_color_start);

        let zoomed = OverlayStyle::for_phase(ZoomPhase::Zoomed, &opts);
        assert_eq!(zoomed.backdrop_color, opts.overlay_color_end);
        assert!(zoomed.backdrop_pointer_events);

        let unzooming = OverlayStyle::for_phase(ZoomPhase::Unzooming, &opts);
        assert!(unzooming.visible);
        assert_eq!(unzooming.backdrop_color, opts.overlay_color_start);
        assert_eq!(unzooming.transition_duration_ms, 300.0);
    }
}
