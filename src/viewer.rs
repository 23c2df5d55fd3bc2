//! Page-by-page PDF viewing on top of an external rendering capability.
//!
//! Decoding and drawing are left to a [`PdfRenderer`]. The viewer owns page
//! navigation and makes sure only one page renders at a time: requests made
//! while a render is in flight collapse into the most recent page number.
//!
//! The detail page drives pdf.js from an inline script that follows the same
//! state machine as [`PdfViewer`]: one page in flight, one pending slot, and a
//! failed render drops the pending page and frees the viewer.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;

/// Zoom factor every page is rendered at.
pub const RENDER_SCALE: f32 = 1.5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("failed to load document {url}: {reason}")]
    Load { url: String, reason: String },

    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },
}

/// An opened document.
pub trait PdfDocument {
    fn page_count(&self) -> u32;
}

/// External PDF rendering library.
pub trait PdfRenderer {
    type Document: PdfDocument;

    fn open(&self, url: &str) -> impl Future<Output = Result<Self::Document, ViewerError>>;

    fn render_page(
        &self,
        document: &Self::Document,
        page: u32,
        scale: f32,
    ) -> impl Future<Output = Result<(), ViewerError>>;
}

/// Single-flight render queue with one coalescing slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderQueue {
    in_flight: Option<u32>,
    pending: Option<u32>,
}

impl RenderQueue {
    /// Returns `true` when `page` starts rendering now. Otherwise it replaces
    /// whatever was waiting.
    pub fn request(&mut self, page: u32) -> bool {
        if self.in_flight.is_some() {
            self.pending = Some(page);
            false
        } else {
            self.in_flight = Some(page);
            true
        }
    }

    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Finishes the in-flight render and promotes the waiting page, if any.
    pub fn complete(&mut self) -> Option<u32> {
        self.in_flight = self.pending.take();
        self.in_flight
    }

    pub fn clear(&mut self) {
        self.in_flight = None;
        self.pending = None;
    }
}

/// Outcome of loading a document, as shown by the detail view.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DocumentStatus {
    Ready { page_count: u32 },
    /// The render surface is replaced by a direct download link.
    Unavailable { download_url: String },
}

pub struct PdfViewer<R: PdfRenderer> {
    renderer: R,
    document: Option<R::Document>,
    current: u32,
    queue: RenderQueue,
}

impl<R: PdfRenderer> PdfViewer<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            document: None,
            current: 0,
            queue: RenderQueue::default(),
        }
    }

    /// Opens `url` and renders its first page.
    pub async fn load(&mut self, url: &str) -> DocumentStatus {
        self.queue.clear();
        self.document = None;
        self.current = 0;

        match self.renderer.open(url).await {
            Ok(document) => {
                let page_count = document.page_count();
                self.document = Some(document);
                if self.go_to(1)
                    && let Err(err) = self.render_queued().await
                {
                    log::warn!("Failed to render first page of {url}: {err}");
                }
                DocumentStatus::Ready { page_count }
            }
            Err(err) => {
                log::warn!("PDF load failed, offering download instead: {err}");
                DocumentStatus::Unavailable {
                    download_url: url.to_string(),
                }
            }
        }
    }

    pub fn page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, PdfDocument::page_count)
    }

    pub fn current_page(&self) -> u32 {
        self.current
    }

    /// `Page n / count` indicator.
    pub fn indicator(&self) -> String {
        format!("Page {} / {}", self.current, self.page_count())
    }

    /// Moves to `page` clamped to the document. Returns `true` when the caller
    /// must drive [`Self::render_queued`].
    pub fn go_to(&mut self, page: u32) -> bool {
        let count = self.page_count();
        if count == 0 {
            return false;
        }
        self.current = page.clamp(1, count);
        self.queue.request(self.current)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.current.saturating_sub(1))
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current.saturating_add(1))
    }

    /// Jump-to-page input. Unparseable input is ignored.
    pub fn jump(&mut self, input: &str) -> bool {
        match input.trim().parse::<u32>() {
            Ok(page) => self.go_to(page),
            Err(_) => false,
        }
    }

    /// Renders the in-flight page and then whatever was requested meanwhile.
    pub async fn render_queued(&mut self) -> Result<(), ViewerError> {
        let Some(document) = self.document.as_ref() else {
            self.queue.clear();
            return Ok(());
        };

        let mut next = self.queue.in_flight();
        while let Some(page) = next {
            if let Err(err) = self.renderer.render_page(document, page, RENDER_SCALE).await {
                self.queue.clear();
                return Err(err);
            }
            next = self.queue.complete();
        }
        Ok(())
    }

    pub fn queue_mut(&mut self) -> &mut RenderQueue {
        &mut self.queue
    }
}
