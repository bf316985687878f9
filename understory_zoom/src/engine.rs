// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attached zoom engine: one per zoomable element.
//!
//! [`ZoomEngine`] ties the pieces together. It owns the host-supplied
//! [`SourceElement`] and [`ViewportQuery`], the current [`ZoomOptions`], the
//! [`ZoomMachine`], and the state of the deferred full-resolution load.
//!
//! ## Host loop
//!
//! 1) [`ZoomEngine::attach`] once the element is mounted.
//! 2) Forward input: [`trigger`](ZoomEngine::trigger),
//!    [`key_down`](ZoomEngine::key_down), [`scrolled`](ZoomEngine::scrolled),
//!    [`pointer_down`](ZoomEngine::pointer_down), focus, timers.
//! 3) After each input, apply [`take_effects`](ZoomEngine::take_effects) and
//!    repaint from [`frame`](ZoomEngine::frame).
//! 4) Run any [`take_load_request`](ZoomEngine::take_load_request) through a
//!    loader and report the outcome with
//!    [`complete_load`](ZoomEngine::complete_load).
//! 5) [`cleanup`](ZoomEngine::cleanup) exactly once on unmount.

use core::mem;

use kurbo::Point;

use crate::cancel::{CancelToken, LoadRequest};
use crate::effect::{DismissSource, Effects, Listeners, TimerId, ZoomEffect};
use crate::error::ZoomError;
use crate::fit::resolve;
use crate::focus::FocusTarget;
use crate::machine::{Key, Propagation, ZoomMachine};
use crate::options::ZoomOptions;
use crate::overlay::OverlayStyle;
use crate::phase::{OriginalVisibility, ZoomPhase};
use crate::source::{LoadedImage, ResourceLocator, SourceElement, SourceSnapshot};
use crate::transform::{TransformStyle, compute};
use crate::viewport::ViewportQuery;

/// Everything the presenter needs to paint one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomFrame {
    /// Current phase.
    pub phase: ZoomPhase,
    /// Visibility of the original element.
    pub original: OriginalVisibility,
    /// Overlay image style.
    pub image: TransformStyle,
    /// Overlay wrapper and backdrop style.
    pub overlay: OverlayStyle,
}

impl ZoomFrame {
    /// Tab index for a focusable part of the overlay.
    #[must_use]
    pub fn tab_index(&self, target: FocusTarget) -> Option<i32> {
        target.tab_index(self.phase)
    }
}

/// Zoom engine attached to one source element.
#[derive(Debug)]
pub struct ZoomEngine<E, V> {
    element: E,
    viewport: V,
    options: ZoomOptions,
    machine: ZoomMachine,
    resource: Option<ResourceLocator>,
    loaded: Option<LoadedImage>,
    load_token: Option<CancelToken>,
    pending_load: Option<LoadRequest>,
    effects: Effects,
    revision: u64,
}

impl<E: SourceElement, V: ViewportQuery> ZoomEngine<E, V> {
    /// Attaches an engine to a mounted element.
    ///
    /// Requests a load for the element's resource, and starts zooming right
    /// away if `options.is_zoomed` is set.
    pub fn attach(element: E, viewport: V, options: ZoomOptions) -> Self {
        let options = options.sanitized();
        let mut engine = Self {
            element,
            viewport,
            options,
            machine: ZoomMachine::new(options.transition_duration_ms),
            resource: None,
            loaded: None,
            load_token: None,
            pending_load: None,
            effects: Effects::new(),
            revision: 0,
        };
        engine.refresh_source();
        if options.is_zoomed {
            engine.trigger();
        }
        engine
    }

    /// Applies new options.
    ///
    /// A change of `is_zoomed` drives a trigger or an external dismissal;
    /// any other change requests a repaint.
    pub fn update(&mut self, options: ZoomOptions) {
        let options = options.sanitized();
        let previous = mem::replace(&mut self.options, options);
        if previous == options {
            return;
        }
        self.machine
            .set_transition_duration(options.transition_duration_ms);

        if options.is_zoomed != previous.is_zoomed {
            let phase = self.machine.phase();
            if options.is_zoomed && !phase.is_zoomed() {
                self.trigger();
            } else if !options.is_zoomed && phase.is_zoomed() {
                self.dismiss(DismissSource::External);
            }
        }
        self.repaint();
    }

    /// Tears the engine down.
    ///
    /// Cancels the pending load, detaches every listener, cancels every timer,
    /// and restores the original element. Returns all effects not yet taken.
    pub fn cleanup(mut self) -> Effects {
        if let Some(token) = self.load_token.take() {
            token.cancel();
        }
        self.pending_load = None;
        let detach = self.machine.detach();
        let mut effects = mem::take(&mut self.effects);
        effects.extend(detach);
        effects
    }

    /// Activation of the original element (click/tap/keyboard).
    pub fn trigger(&mut self) {
        if self.machine.phase() == ZoomPhase::Idle {
            self.refresh_source();
            if let Err(err) = self.measure() {
                log::debug!("zooming unmeasurable element: {err}");
            }
        }
        let effects = self.machine.trigger();
        self.push(effects);
    }

    /// The rest frame has been painted and measured.
    pub fn layout_measured(&mut self) {
        let effects = self.machine.layout_measured();
        self.push(effects);
    }

    /// Explicit close call.
    pub fn close(&mut self) {
        self.dismiss(DismissSource::Close);
    }

    /// Dismisses the zoom for `source`.
    pub fn dismiss(&mut self, source: DismissSource) {
        let effects = self.machine.dismiss(source);
        self.push(effects);
    }

    /// A key went down on the document.
    pub fn key_down(&mut self, key: Key) -> Propagation {
        let (propagation, effects) = self.machine.key_down(key);
        self.push(effects);
        propagation
    }

    /// The hosting surface scrolled.
    pub fn scrolled(&mut self) {
        let effects = self.machine.scrolled();
        self.push(effects);
    }

    /// A pointer went down at `point`, in viewport coordinates.
    ///
    /// Dismisses when the point is outside the painted overlay image. Before
    /// the image has any geometry, every pointer-down counts as outside.
    pub fn pointer_down(&mut self, point: Point) {
        if !self.machine.listeners().contains(Listeners::POINTER_OUTSIDE) {
            return;
        }
        let scroll = self.viewport.scroll_offset();
        let inside = self
            .frame()
            .image
            .placement
            .is_some_and(|p| (p.visual_rect() - scroll).contains(point));
        if !inside {
            let effects = self.machine.pointer_outside();
            self.push(effects);
        }
    }

    /// The zoomed overlay image was clicked.
    pub fn image_clicked(&mut self) {
        let effects = self.machine.image_clicked();
        self.push(effects);
    }

    /// Focus landed on a part of the overlay.
    pub fn focused(&mut self, target: FocusTarget) {
        let effects = self.machine.focused(target);
        self.push(effects);
    }

    /// A timer requested through [`ZoomEffect::ScheduleTimer`] fired.
    pub fn timer_fired(&mut self, id: TimerId) {
        let effects = self.machine.timer_fired(id);
        self.push(effects);
    }

    /// Re-reads the element's resource and requests a load if it changed.
    ///
    /// Any load in flight for the previous resource is cancelled, and the
    /// engine falls back to placeholder geometry until the new one lands.
    pub fn refresh_source(&mut self) {
        let resource = self.element.resource();
        if resource == self.resource {
            return;
        }
        if let Some(token) = self.load_token.take() {
            token.cancel();
        }
        self.pending_load = None;
        if self.loaded.take().is_some() {
            self.repaint();
        }
        if let Some(locator) = &resource {
            let token = CancelToken::new();
            self.pending_load = Some(LoadRequest::new(locator.clone(), token.clone()));
            self.load_token = Some(token);
        } else {
            log::debug!("element has no resolvable image resource");
        }
        self.resource = resource;
    }

    /// Takes the outstanding load request, if any.
    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        self.pending_load.take()
    }

    /// Applies a finished load.
    ///
    /// Returns `false`, and changes nothing, when `request` was cancelled,
    /// superseded, or already completed. A successful completion requests
    /// exactly one repaint.
    pub fn complete_load(&mut self, request: &LoadRequest, image: LoadedImage) -> bool {
        if let Err(err) = self.check_current(request) {
            log::debug!("dropping load of {}: {err}", request.url());
            return false;
        }
        self.load_token = None;
        self.loaded = Some(image);
        self.repaint();
        true
    }

    /// Records that a load failed. The engine stays in placeholder geometry.
    pub fn fail_load(&mut self, request: &LoadRequest) {
        if self.check_current(request).is_ok() {
            log::debug!(
                "{} ({}); staying at placeholder geometry",
                ZoomError::ResourceLoadFailure,
                request.url()
            );
            self.load_token = None;
        }
    }

    /// Captures a fresh snapshot of the element.
    pub fn measure(&self) -> Result<SourceSnapshot, ZoomError> {
        SourceSnapshot::capture(&self.element)
    }

    /// Computes the frame to paint now.
    ///
    /// The element and viewport are measured fresh. An unmeasurable element,
    /// or one whose resource no longer matches the loaded image, yields the
    /// placeholder image style.
    #[must_use]
    pub fn frame(&self) -> ZoomFrame {
        let phase = self.machine.phase();
        let duration = self.options.transition_duration_ms;
        let image = match self.measure() {
            Ok(snapshot) => {
                let loaded = self
                    .loaded
                    .as_ref()
                    .filter(|_| snapshot.resource == self.resource);
                let fit = resolve(&snapshot, self.options.margin, &self.viewport);
                compute(&snapshot, &fit, loaded, phase, &self.viewport, duration)
            }
            Err(err) => {
                log::debug!("{err}; presenting placeholder");
                TransformStyle::placeholder(duration)
            }
        };
        ZoomFrame {
            phase,
            original: self.machine.original_visibility(),
            image,
            overlay: OverlayStyle::for_phase(phase, &self.options),
        }
    }

    /// Takes the effects produced since the last call, in order.
    pub fn take_effects(&mut self) -> Effects {
        mem::take(&mut self.effects)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ZoomPhase {
        self.machine.phase()
    }

    /// Current visibility of the original element.
    #[must_use]
    pub fn original_visibility(&self) -> OriginalVisibility {
        self.machine.original_visibility()
    }

    /// Listeners the host should currently have attached.
    #[must_use]
    pub fn listeners(&self) -> Listeners {
        self.machine.listeners()
    }

    /// Current (sanitized) options.
    #[must_use]
    pub fn options(&self) -> &ZoomOptions {
        &self.options
    }

    /// The loaded full-resolution image, if any.
    #[must_use]
    pub fn loaded_image(&self) -> Option<&LoadedImage> {
        self.loaded.as_ref()
    }

    /// Counter bumped whenever something that affects [`frame`](Self::frame) changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The attached element.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Mutable access to the attached element.
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// The viewport query.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the viewport query.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    fn check_current(&self, request: &LoadRequest) -> Result<(), ZoomError> {
        if !self.machine.is_attached() {
            return Err(ZoomError::DetachedDuringTransition);
        }
        let current = self
            .load_token
            .as_ref()
            .is_some_and(|token| token.same_as(request.token()));
        if request.is_cancelled() || !current {
            return Err(ZoomError::StaleLoad);
        }
        Ok(())
    }

    fn push(&mut self, effects: Effects) {
        if effects.is_empty() {
            return;
        }
        self.revision += 1;
        self.effects.extend(effects);
    }

    fn repaint(&mut self) {
        self.revision += 1;
        self.effects.push(ZoomEffect::Repaint);
    }
}

impl<E, V> Drop for ZoomEngine<E, V> {
    fn drop(&mut self) {
        if let Some(token) = self.load_token.take() {
            token.cancel();
        }
    }
}
