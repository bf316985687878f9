// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side effects requested by the zoom state machine.
//!
//! The state machine never touches the host directly. Every input returns a
//! batch of [`ZoomEffect`]s, in the order the host should apply them.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::phase::ZoomPhase;

bitflags! {
    /// Dismissal listeners the host should keep attached.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Listeners: u8 {
        /// Document `keydown`, for Escape.
        const KEYDOWN = 1 << 0;
        /// Hosting surface `scroll` (passive).
        const SCROLL = 1 << 1;
        /// Pointer-down outside the overlay.
        const POINTER_OUTSIDE = 1 << 2;
        /// Click on the zoomed overlay image.
        const IMAGE_CLICK = 1 << 3;
    }
}

/// Identifier of a timer scheduled through [`ZoomEffect::ScheduleTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

impl TimerId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What a scheduled timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Make the original element visible again.
    RestoreVisibility,
    /// The unzoom transition finished; return to `Idle`.
    Settle,
}

/// Why a zoom was dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DismissSource {
    /// Explicit close call (close control, host API).
    Close,
    /// Escape key.
    Escape,
    /// Pointer interaction outside the overlay.
    PointerOutside,
    /// Scroll of the hosting surface.
    Scroll,
    /// Repeat trigger on the original element or click on the zoomed image.
    Toggle,
    /// The host cleared the `is_zoomed` option.
    External,
}

/// A side effect for the host to apply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEffect {
    /// The phase changed.
    Phase {
        /// Phase before the transition.
        from: ZoomPhase,
        /// Phase after the transition.
        to: ZoomPhase,
    },
    /// Hide the original element.
    HideOriginal,
    /// Show the original element.
    ShowOriginal,
    /// Paint the rest frame, measure it, then report back with `layout_measured`.
    MeasureLayout,
    /// Move focus to the dismissal control without scrolling.
    FocusCloseControl,
    /// Attach these listeners.
    Listen(Listeners),
    /// Detach these listeners.
    Unlisten(Listeners),
    /// Start a one-shot timer.
    ScheduleTimer {
        /// Identifier to report back when it fires.
        id: TimerId,
        /// Purpose of the timer.
        kind: TimerKind,
        /// Delay in milliseconds from now.
        delay_ms: f64,
    },
    /// Cancel a previously scheduled timer.
    CancelTimer(TimerId),
    /// The zoom was dismissed.
    Dismissed(DismissSource),
    /// Derived styles changed; repaint from a fresh frame.
    Repaint,
}

/// A batch of effects.
pub type Effects = SmallVec<[ZoomEffect; 8]>;
