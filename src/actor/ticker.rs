//! Ticker Actor: Dedicated thread for generating timing events.
//!
//! Ticks drive the commit and snap-back timers. Completion signals are
//! delivered on the runtime thread when it handles a tick, so they never
//! preempt other events already in flight.

use super::messages::Tick;
use crate::error::{Result, SwipeError};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Ticker actor that generates regular timing events.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a new ticker actor with the given interval.
    ///
    /// # Arguments
    ///
    /// * `interval` - Time between ticks (e.g., 16ms for ~60 FPS).
    pub fn spawn(interval: Duration) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Bounded channel with small buffer - we don't want ticks to queue up
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("swipedeck-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, interval);
            })
            .map_err(|_| SwipeError::Spawn("ticker"))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        })
    }

    /// Get a reference to the tick receiver.
    ///
    /// Use this with `select!` alongside the input channel.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    frame,
                    elapsed: now - start,
                    at: now,
                };

                // Non-blocking send - if buffer is full, skip this tick
                let _ = tick_tx.try_send(tick);

                frame += 1;
                next_tick += interval;

                // Handle case where we're behind (catch up without queuing)
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
