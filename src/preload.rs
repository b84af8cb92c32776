//! Preloader: fire-and-forget image warm-up on a worker thread.
//!
//! Each deck gets its own generation number. Reports from a generation that
//! has since been replaced (the session was reset) are dropped on drain, so a
//! slow batch can never touch the new deck. Failed loads count as loaded.

use crate::deck::CardId;
use crate::error::{Result, SwipeError};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};
use std::sync::Arc;
use std::thread;

/// Fetches image bytes for warm-up.
pub trait ImageFetcher: Send + Sync + 'static {
    /// Fetch `image_ref`, reporting failure as a message.
    fn fetch(&self, image_ref: &str) -> std::result::Result<(), String>;
}

/// Outcome of one preload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadReport {
    /// Batch the report belongs to.
    pub generation: u64,
    /// Card whose image was fetched.
    pub card_id: CardId,
    /// Fetch result.
    pub result: std::result::Result<(), String>,
}

/// Warms up image references in the background.
pub struct Preloader {
    fetcher: Arc<dyn ImageFetcher>,
    report_tx: Sender<PreloadReport>,
    report_rx: Receiver<PreloadReport>,
    generation: u64,
    loaded: usize,
}

impl Preloader {
    /// Create a preloader using `fetcher`.
    pub fn new(fetcher: impl ImageFetcher) -> Self {
        let (report_tx, report_rx) = unbounded();
        Self {
            fetcher: Arc::new(fetcher),
            report_tx,
            report_rx,
            generation: 0,
            loaded: 0,
        }
    }

    /// Receiver of raw reports, for `select!` loops.
    ///
    /// Reports taken from here bypass the generation filter; pass them to
    /// [`accept`](Self::accept).
    pub const fn receiver(&self) -> &Receiver<PreloadReport> {
        &self.report_rx
    }

    /// Current batch generation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Images of the current batch that finished, successfully or not.
    pub const fn loaded(&self) -> usize {
        self.loaded
    }

    /// Start warming up a batch, superseding any previous one.
    pub fn preload(&mut self, refs: Vec<(CardId, String)>) -> Result<()> {
        self.generation += 1;
        self.loaded = 0;
        let generation = self.generation;
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.report_tx.clone();
        debug!("preloading {} images (generation {generation})", refs.len());

        thread::Builder::new()
            .name("swipedeck-preload".to_string())
            .spawn(move || {
                for (card_id, image_ref) in refs {
                    let result = fetcher.fetch(&image_ref);
                    let report = PreloadReport {
                        generation,
                        card_id,
                        result,
                    };
                    if tx.send(report).is_err() {
                        // Preloader dropped
                        break;
                    }
                }
            })
            .map_err(|_| SwipeError::Spawn("preload"))?;
        Ok(())
    }

    /// Count a report if it belongs to the current batch.
    ///
    /// Returns the report back only when it is current.
    pub fn accept(&mut self, report: PreloadReport) -> Option<PreloadReport> {
        if report.generation != self.generation {
            return None;
        }
        self.loaded += 1;
        if let Err(reason) = &report.result {
            warn!("preload of {} failed: {reason}", report.card_id);
        }
        Some(report)
    }

    /// Drain pending reports of the current batch without blocking.
    pub fn drain(&mut self) -> Vec<PreloadReport> {
        let pending: Vec<_> = self.report_rx.try_iter().collect();
        pending
            .into_iter()
            .filter_map(|report| self.accept(report))
            .collect()
    }
}

impl std::fmt::Debug for Preloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preloader")
            .field("generation", &self.generation)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

/// Fetcher that only checks references are well-formed URLs.
///
/// Used when no network client is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFetcher;

impl ImageFetcher for NoopFetcher {
    fn fetch(&self, image_ref: &str) -> std::result::Result<(), String> {
        if image_ref.contains("://") {
            Ok(())
        } else {
            Err(format!("not a URL: {image_ref}"))
        }
    }
}
