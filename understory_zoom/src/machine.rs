// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom interaction state machine.
//!
//! [`ZoomMachine`] owns the [`ZoomPhase`], the visibility of the original
//! element, the set of attached dismissal listeners, and the two timers of an
//! unzoom (visibility hand-off and settle). It does no I/O: each input returns
//! the [`Effects`] the host must apply, in order.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --trigger--> Zooming --layout_measured--> Zoomed
//! Zoomed --dismiss--> Unzooming --Settle timer--> Idle
//! ```
//!
//! Inputs that arrive in a transient phase are deferred rather than skipping a
//! phase: a dismissal during `Zooming` is replayed right after `Zoomed` is
//! reached, and a trigger during `Unzooming` starts a new zoom right after
//! `Idle` is reached.
//!
//! ## Minimal example
//!
//! ```
//! use understory_zoom::{Key, Propagation, ZoomEffect, ZoomMachine, ZoomPhase};
//!
//! let mut zoom = ZoomMachine::new(300.0);
//!
//! let effects = zoom.trigger();
//! assert!(effects.contains(&ZoomEffect::HideOriginal));
//! assert_eq!(zoom.phase(), ZoomPhase::Zooming);
//!
//! zoom.layout_measured();
//! assert_eq!(zoom.phase(), ZoomPhase::Zoomed);
//!
//! let (propagation, _effects) = zoom.key_down(Key::Escape);
//! assert_eq!(propagation, Propagation::Stop);
//! assert_eq!(zoom.phase(), ZoomPhase::Unzooming);
//! ```

use smallvec::smallvec;

use crate::effect::{DismissSource, Effects, Listeners, TimerId, TimerKind, ZoomEffect};
use crate::focus::FocusTarget;
use crate::phase::{OriginalVisibility, ZoomPhase};

/// How long before the end of the unzoom the original element reappears.
pub const VISIBILITY_HANDOFF_MS: f64 = 50.0;

/// Legacy DOM key code for Escape.
const ESCAPE_KEY_CODE: u32 = 27;

/// Keys the zoom overlay cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Classifies a DOM-style key event from its `key` name and legacy `keyCode`.
    #[must_use]
    pub fn from_dom(key: &str, key_code: u32) -> Self {
        if key == "Escape" || key == "Esc" || key_code == ESCAPE_KEY_CODE {
            Self::Escape
        } else {
            Self::Other
        }
    }
}

/// Whether an input event should keep propagating after the zoom saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Propagation {
    /// Not handled; let it propagate.
    Continue,
    /// Handled; stop propagation so nested zooms do not react too.
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    Dismiss(DismissSource),
    Zoom,
}

/// The zoom interaction state machine.
#[derive(Clone, Debug)]
pub struct ZoomMachine {
    phase: ZoomPhase,
    original: OriginalVisibility,
    listeners: Listeners,
    transition_duration_ms: f64,
    restore_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    next_timer: u64,
    deferred: Option<Deferred>,
    detached: bool,
}

impl ZoomMachine {
    /// Creates an idle machine with the given transition duration.
    #[must_use]
    pub fn new(transition_duration_ms: f64) -> Self {
        Self {
            phase: ZoomPhase::Idle,
            original: OriginalVisibility::Visible,
            listeners: Listeners::empty(),
            transition_duration_ms: sanitize_duration(transition_duration_ms),
            restore_timer: None,
            settle_timer: None,
            next_timer: 0,
            deferred: None,
            detached: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    /// Current visibility of the original element.
    #[must_use]
    pub fn original_visibility(&self) -> OriginalVisibility {
        self.original
    }

    /// Listeners the host should currently have attached.
    #[must_use]
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Transition duration in milliseconds.
    #[must_use]
    pub fn transition_duration_ms(&self) -> f64 {
        self.transition_duration_ms
    }

    /// Sets the transition duration used by future unzooms.
    ///
    /// Timers already scheduled keep their original delay.
    pub fn set_transition_duration(&mut self, ms: f64) {
        self.transition_duration_ms = sanitize_duration(ms);
    }

    /// Returns `true` until [`detach`](Self::detach) is called.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.detached
    }

    /// Activation of the original element.
    ///
    /// Starts a zoom from `Idle`, closes from `Zoomed`, and queues a re-zoom
    /// during `Unzooming`.
    pub fn trigger(&mut self) -> Effects {
        if self.detached {
            return Effects::new();
        }
        match self.phase {
            ZoomPhase::Idle => self.begin_zoom(),
            ZoomPhase::Zoomed => self.begin_unzoom(DismissSource::Toggle),
            ZoomPhase::Zooming => Effects::new(),
            ZoomPhase::Unzooming => {
                log::trace!("zoom requested while unzooming; deferring");
                self.deferred = Some(Deferred::Zoom);
                Effects::new()
            }
        }
    }

    /// The rest frame has been laid out; move on to `Zoomed`.
    pub fn layout_measured(&mut self) -> Effects {
        if self.detached || self.phase != ZoomPhase::Zooming {
            return Effects::new();
        }
        let added = Listeners::SCROLL | Listeners::POINTER_OUTSIDE | Listeners::IMAGE_CLICK;
        self.listeners |= added;
        let mut effects: Effects = smallvec![
            self.transition(ZoomPhase::Zoomed),
            ZoomEffect::FocusCloseControl,
            ZoomEffect::Listen(added),
        ];
        if let Some(Deferred::Dismiss(source)) = self.deferred.take() {
            effects.extend(self.begin_unzoom(source));
        }
        effects
    }

    /// Explicit dismissal.
    ///
    /// Unzooms from `Zoomed`. During `Zooming` the dismissal is replayed once
    /// `Zoomed` is reached. During `Unzooming` it cancels a queued re-zoom.
    pub fn dismiss(&mut self, source: DismissSource) -> Effects {
        if self.detached {
            return Effects::new();
        }
        match self.phase {
            ZoomPhase::Zoomed => self.begin_unzoom(source),
            ZoomPhase::Zooming => {
                self.deferred = Some(Deferred::Dismiss(source));
                Effects::new()
            }
            ZoomPhase::Unzooming => {
                if self.deferred == Some(Deferred::Zoom) {
                    self.deferred = None;
                }
                Effects::new()
            }
            ZoomPhase::Idle => Effects::new(),
        }
    }

    /// A key went down on the document.
    ///
    /// Escape dismisses while the keydown listener is attached, and reports
    /// [`Propagation::Stop`].
    pub fn key_down(&mut self, key: Key) -> (Propagation, Effects) {
        if key != Key::Escape || !self.listeners.contains(Listeners::KEYDOWN) {
            return (Propagation::Continue, Effects::new());
        }
        (Propagation::Stop, self.dismiss(DismissSource::Escape))
    }

    /// The hosting surface scrolled.
    pub fn scrolled(&mut self) -> Effects {
        if !self.listeners.contains(Listeners::SCROLL) {
            return Effects::new();
        }
        self.dismiss(DismissSource::Scroll)
    }

    /// A pointer went down outside the overlay.
    pub fn pointer_outside(&mut self) -> Effects {
        if !self.listeners.contains(Listeners::POINTER_OUTSIDE) {
            return Effects::new();
        }
        self.dismiss(DismissSource::PointerOutside)
    }

    /// The zoomed overlay image was clicked.
    pub fn image_clicked(&mut self) -> Effects {
        if !self.listeners.contains(Listeners::IMAGE_CLICK) {
            return Effects::new();
        }
        self.dismiss(DismissSource::Toggle)
    }

    /// Focus landed on `target`.
    pub fn focused(&mut self, target: FocusTarget) -> Effects {
        if self.detached {
            return Effects::new();
        }
        match target.redirect(self.phase) {
            Some(FocusTarget::CloseControl) => smallvec![ZoomEffect::FocusCloseControl],
            _ => Effects::new(),
        }
    }

    /// A timer scheduled by this machine fired.
    ///
    /// Unknown or cancelled identifiers are ignored.
    pub fn timer_fired(&mut self, id: TimerId) -> Effects {
        if self.detached {
            return Effects::new();
        }
        let mut effects = Effects::new();
        if self.restore_timer == Some(id) {
            self.restore_timer = None;
            // A queued re-zoom keeps the original hidden.
            if self.deferred != Some(Deferred::Zoom) {
                effects.extend(self.show_original());
            }
        } else if self.settle_timer == Some(id) {
            self.settle_timer = None;
            let rezoom = self.deferred.take() == Some(Deferred::Zoom);
            if let Some(pending) = self.restore_timer.take() {
                effects.push(ZoomEffect::CancelTimer(pending));
            }
            if !rezoom {
                effects.extend(self.show_original());
            }
            effects.push(self.transition(ZoomPhase::Idle));
            if rezoom {
                effects.extend(self.begin_zoom());
            }
        }
        effects
    }

    /// Tears everything down; the machine ignores all later input.
    ///
    /// Cancels pending timers, detaches listeners, and makes the original
    /// element visible again. Calling it twice is a no-op.
    pub fn detach(&mut self) -> Effects {
        if self.detached {
            return Effects::new();
        }
        if self.phase != ZoomPhase::Idle {
            log::debug!("detached while {:?}", self.phase);
        }
        self.detached = true;
        self.deferred = None;
        let mut effects = Effects::new();
        for id in [self.restore_timer.take(), self.settle_timer.take()]
            .into_iter()
            .flatten()
        {
            effects.push(ZoomEffect::CancelTimer(id));
        }
        if !self.listeners.is_empty() {
            effects.push(ZoomEffect::Unlisten(self.listeners));
            self.listeners = Listeners::empty();
        }
        effects.extend(self.show_original());
        effects
    }

    fn begin_zoom(&mut self) -> Effects {
        debug_assert!(self.restore_timer.is_none(), "restore timer outlived Unzooming");
        let mut effects: Effects = smallvec![self.transition(ZoomPhase::Zooming)];
        if self.original == OriginalVisibility::Visible {
            self.original = OriginalVisibility::Hidden;
            effects.push(ZoomEffect::HideOriginal);
        }
        self.listeners |= Listeners::KEYDOWN;
        effects.push(ZoomEffect::Listen(Listeners::KEYDOWN));
        effects.push(ZoomEffect::MeasureLayout);
        effects
    }

    fn begin_unzoom(&mut self, source: DismissSource) -> Effects {
        let mut effects: Effects = smallvec![self.transition(ZoomPhase::Unzooming)];
        if !self.listeners.is_empty() {
            effects.push(ZoomEffect::Unlisten(self.listeners));
            self.listeners = Listeners::empty();
        }
        effects.push(ZoomEffect::Dismissed(source));

        let duration = self.transition_duration_ms;
        let restore = self.allocate_timer();
        self.restore_timer = Some(restore);
        effects.push(ZoomEffect::ScheduleTimer {
            id: restore,
            kind: TimerKind::RestoreVisibility,
            delay_ms: (duration - VISIBILITY_HANDOFF_MS).max(0.0),
        });
        let settle = self.allocate_timer();
        self.settle_timer = Some(settle);
        effects.push(ZoomEffect::ScheduleTimer {
            id: settle,
            kind: TimerKind::Settle,
            delay_ms: duration,
        });
        effects
    }

    fn show_original(&mut self) -> Option<ZoomEffect> {
        if self.original == OriginalVisibility::Hidden {
            self.original = OriginalVisibility::Visible;
            Some(ZoomEffect::ShowOriginal)
        } else {
            None
        }
    }

    fn transition(&mut self, to: ZoomPhase) -> ZoomEffect {
        let from = self.phase;
        debug_assert_eq!(from.next(), to, "zoom phases must advance in order");
        log::trace!("zoom phase {from:?} -> {to:?}");
        self.phase = to;
        ZoomEffect::Phase { from, to }
    }

    fn allocate_timer(&mut self) -> TimerId {
        self.next_timer += 1;
        TimerId(self.next_timer)
    }
}

impl Default for ZoomMachine {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn sanitize_duration(ms: f64) -> f64 {
    if ms.is_finite() { ms.max(0.0) } else { 0.0 }
}
