// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_zoom::{LoadRequest, LoadedImage, SourceElement, ViewportQuery, ZoomEngine};

use crate::error::LoadError;
use crate::fetch::Fetch;
use crate::probe::probe_dimensions;

/// Loads full-resolution images for [`LoadRequest`]s.
///
/// The request's cancellation token is checked before fetching and again
/// after the fetch resolves, so a cancelled request never yields an image.
#[derive(Clone, Debug)]
pub struct DeferredLoader<F> {
    fetcher: F,
}

impl<F: Fetch> DeferredLoader<F> {
    /// Creates a loader over `fetcher`.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches `url` and measures its intrinsic size.
    pub async fn load_url(&self, url: &str) -> Result<LoadedImage, LoadError> {
        let bytes = self.fetcher.fetch(url).await?;
        let (width, height) = probe_dimensions(&bytes, url)?;
        log::trace!("loaded {url}: {width}x{height}");
        Ok(LoadedImage::new(width, height, url))
    }

    /// Loads `request`, failing with [`LoadError::Cancelled`] if it was
    /// cancelled at any point.
    pub async fn try_load(&self, request: &LoadRequest) -> Result<LoadedImage, LoadError> {
        if request.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        let image = self.load_url(request.url()).await?;
        if request.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        Ok(image)
    }

    /// Loads `request`, absorbing failures.
    ///
    /// Failures are logged and yield `None`; the engine then simply stays at
    /// placeholder geometry.
    pub async fn load(&self, request: &LoadRequest) -> Option<LoadedImage> {
        match self.try_load(request).await {
            Ok(image) => Some(image),
            Err(LoadError::Cancelled) => {
                log::trace!("load of {} cancelled", request.url());
                None
            }
            Err(err) => {
                log::debug!("load of {} failed: {err}", request.url());
                None
            }
        }
    }

    /// Services the engine's outstanding load request, if any.
    ///
    /// Returns `true` if a loaded image was applied.
    pub async fn load_pending<E, V>(&self, engine: &mut ZoomEngine<E, V>) -> bool
    where
        E: SourceElement,
        V: ViewportQuery,
    {
        let Some(request) = engine.take_load_request() else {
            return false;
        };
        match self.try_load(&request).await {
            Ok(image) => engine.complete_load(&request, image),
            Err(LoadError::Cancelled) => false,
            Err(err) => {
                log::debug!("load of {} failed: {err}", request.url());
                engine.fail_load(&request);
                false
            }
        }
    }
}
