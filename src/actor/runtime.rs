//! Runtime: event loop that ties the actors to a [`Session`].
//!
//! The runtime owns the session and is its single thread of control. Input
//! events, ticks and preload reports arrive over channels and are handled
//! one at a time; every batch of [`SessionOutput`]s is handed to the
//! [`Presenter`].

use super::messages::{InputEvent, KeyCode, KeyModifiers, PointerScale, Tick};
use super::{InputActor, TickerActor};
use crate::deck::{CardId, CataasSource, ImageSource};
use crate::error::Result;
use crate::gesture::{Decision, Point};
use crate::preload::{PreloadReport, Preloader};
use crate::session::{Changes, PointerEvent, PointerKind, Session, SessionOutput};
use crate::terminal::{TerminalGuard, TerminalOptions};
use crossbeam_channel::{bounded, never, select, Receiver};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Paints session state. Everything visual lives behind this trait.
pub trait Presenter<S: ImageSource = CataasSource> {
    /// Apply a batch of outputs. `changes` summarises the dirty areas.
    fn present(&mut self, session: &Session<S>, outputs: &[SessionOutput], changes: Changes);
}

/// Configuration for the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Terminal options.
    pub terminal: TerminalOptions,
    /// Cell to pointer unit conversion.
    pub pointer_scale: PointerScale,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            terminal: TerminalOptions::default(),
            pointer_scale: PointerScale::default(),
        }
    }
}

/// The swipe event loop.
pub struct Runtime<P, S: ImageSource = CataasSource> {
    session: Session<S>,
    presenter: P,
    pointer_scale: PointerScale,
    input_rx: Receiver<InputEvent>,
    input_actor: Option<InputActor>,
    ticker: Option<TickerActor>,
    preloader: Option<Preloader>,
    /// Held for its drop; restores the terminal after the actors stop.
    terminal: Option<TerminalGuard>,
    running: bool,
}

impl<P: Presenter<S>, S: ImageSource> Runtime<P, S> {
    /// Take over the terminal and spawn the input actor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or thread creation fails.
    pub fn new(mut session: Session<S>, presenter: P, config: RuntimeConfig) -> Result<Self> {
        let terminal = TerminalGuard::enter(config.terminal)?;
        let (width, _) = terminal.size();
        session.resize(config.pointer_scale.apply(width, 0).0);

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout, config.pointer_scale)?;

        let mut runtime = Self::headless(session, presenter, input_rx);
        runtime.pointer_scale = config.pointer_scale;
        runtime.input_actor = Some(input_actor);
        runtime.terminal = Some(terminal);
        Ok(runtime)
    }

    /// A runtime fed from an arbitrary input channel, without a terminal.
    pub fn headless(session: Session<S>, presenter: P, input_rx: Receiver<InputEvent>) -> Self {
        Self {
            session,
            presenter,
            pointer_scale: PointerScale::default(),
            input_rx,
            input_actor: None,
            ticker: None,
            preloader: None,
            terminal: None,
            running: true,
        }
    }

    /// Warm up deck images with `preloader`, now and after every reset.
    #[must_use]
    pub fn with_preloader(mut self, preloader: Preloader) -> Self {
        self.preloader = Some(preloader);
        self
    }

    /// The session being driven.
    pub const fn session(&self) -> &Session<S> {
        &self.session
    }

    /// The presenter.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Check if the loop is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Paint the initial state and start preloading.
    pub fn start(&mut self) {
        self.preload_deck();
        self.presenter.present(&self.session, &[], Changes::all());
    }

    /// Run until quit or the input channel closes.
    pub fn run(&mut self) -> Result<()> {
        self.start();
        if self.ticker.is_none() {
            self.ticker = Some(TickerActor::spawn(self.session.config().tick_interval())?);
        }
        let tick_rx = self.ticker.as_ref().map_or_else(never, |t| t.receiver().clone());
        let input_rx = self.input_rx.clone();

        while self.running {
            let preload_rx = self
                .preloader
                .as_ref()
                .map_or_else(never, |p| p.receiver().clone());

            select! {
                recv(input_rx) -> event => match event {
                    Ok(event) => {
                        self.dispatch(event, Instant::now());
                    }
                    Err(_) => {
                        debug!("input channel closed");
                        self.running = false;
                    }
                },
                recv(tick_rx) -> tick => {
                    if let Ok(tick) = tick {
                        self.on_tick(tick);
                    }
                },
                recv(preload_rx) -> report => {
                    if let Ok(report) = report {
                        self.on_preload(report);
                    }
                },
            }
        }
        info!("runtime stopped");
        Ok(())
    }

    /// Handle one input event. Returns whether the loop should keep running.
    pub fn dispatch(&mut self, event: InputEvent, now: Instant) -> bool {
        let outputs = match event {
            InputEvent::Key { code, modifiers } => self.on_key(code, modifiers, now),
            InputEvent::PointerDown { x, y } => self.on_pointer(PointerKind::Down, x, y, now),
            InputEvent::PointerMove { x, y } => self.on_pointer(PointerKind::Move, x, y, now),
            InputEvent::PointerUp { x, y } => self.on_pointer(PointerKind::Up, x, y, now),
            InputEvent::Resize { width, height } => {
                self.session.resize(self.pointer_scale.apply(width, height).0);
                self.presenter.present(&self.session, &[], Changes::all());
                Vec::new()
            }
            InputEvent::Error(message) => {
                warn!("input error: {message}");
                Vec::new()
            }
            InputEvent::Shutdown => {
                self.running = false;
                Vec::new()
            }
        };
        self.emit(&outputs);
        self.running
    }

    /// Advance animation timers.
    pub fn on_tick(&mut self, tick: Tick) {
        let outputs = self.session.tick(tick.at);
        self.emit(&outputs);
    }

    /// Handle a preload report; failures become caption fallbacks.
    pub fn on_preload(&mut self, report: PreloadReport) {
        let Some(preloader) = self.preloader.as_mut() else {
            return;
        };
        let Some(report) = preloader.accept(report) else {
            return;
        };
        if let Err(reason) = &report.result {
            let outputs = self.session.image_failed(&report.card_id, reason);
            self.emit(&outputs);
        }
    }

    fn emit(&mut self, outputs: &[SessionOutput]) {
        if outputs.is_empty() {
            return;
        }
        let changes = Changes::from_outputs(outputs);
        self.presenter.present(&self.session, outputs, changes);
    }

    fn preload_deck(&mut self) {
        if let Some(preloader) = self.preloader.as_mut() {
            if let Err(err) = preloader.preload(self.session.stack().deck().image_refs()) {
                // Preloading is an optimisation only.
                warn!("preload skipped: {err}");
            }
        }
    }

    fn on_pointer(&mut self, kind: PointerKind, x: f32, y: f32, now: Instant) -> Vec<SessionOutput> {
        // The terminal surface is the top card.
        let Some(target) = self.session.top_id() else {
            return Vec::new();
        };
        self.session
            .pointer(&PointerEvent::new(kind, Point::new(x, y), target), now)
    }

    fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> Vec<SessionOutput> {
        if modifiers.control && code == KeyCode::Char('c') {
            self.running = false;
            return Vec::new();
        }
        if code == KeyCode::Char('t') {
            return self.session.toggle_theme();
        }
        if code == KeyCode::Char('q') {
            self.running = false;
            return Vec::new();
        }

        if !self.session.is_exhausted() {
            return match code {
                KeyCode::Right | KeyCode::Char('l') => self.session.decide_top(Decision::Like, now),
                KeyCode::Left | KeyCode::Char('h') => self.session.decide_top(Decision::Dislike, now),
                KeyCode::Esc => {
                    self.running = false;
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        let detail_open = self.session.gallery().selected().is_some();
        match code {
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('a') | KeyCode::Tab => self.session.toggle_gallery(),
            KeyCode::Enter if !detail_open => self.session.select_first(),
            KeyCode::Right | KeyCode::Char('l') => self.session.select_next(),
            KeyCode::Left | KeyCode::Char('h') => self.session.select_previous(),
            KeyCode::Esc if detail_open => self.session.close_detail(),
            KeyCode::Esc => {
                self.running = false;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn reset(&mut self) -> Vec<SessionOutput> {
        match self.session.reset() {
            Ok(outputs) => {
                self.preload_deck();
                outputs
            }
            Err(err) => {
                warn!("reset failed: {err}");
                Vec::new()
            }
        }
    }

    /// Open the detail view on a liked card (pointer click in the gallery).
    pub fn select(&mut self, card_id: &CardId) {
        let outputs = self.session.select(card_id);
        self.emit(&outputs);
    }
}

impl<P, S: ImageSource> Drop for Runtime<P, S> {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }
        // Terminal restored last, after the input thread stopped reading.
        self.terminal.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwipeConfig;
    use crate::deck::{CardItem, Deck, DeckGenerator};
    use crate::preload::ImageFetcher;
    use crossbeam_channel::unbounded;

    #[derive(Default)]
    struct Recorder {
        batches: Vec<(Vec<SessionOutput>, Changes)>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, _session: &Session, outputs: &[SessionOutput], changes: Changes) {
            self.batches.push((outputs.to_vec(), changes));
        }
    }

    impl Recorder {
        fn all(&self) -> Vec<SessionOutput> {
            self.batches.iter().flat_map(|(o, _)| o.clone()).collect()
        }
    }

    fn runtime(n: usize) -> Runtime<Recorder> {
        let deck = Deck::new(
            (0..n)
                .map(|i| CardItem::new(format!("c{i}").as_str(), format!("img://{i}"), format!("cat {i}")))
                .collect(),
        );
        let session = Session::with_deck(SwipeConfig::default(), DeckGenerator::default(), deck).unwrap();
        let (_tx, rx) = unbounded();
        Runtime::headless(session, Recorder::default(), rx)
    }

    fn tick_at(at: Instant) -> Tick {
        Tick {
            frame: 0,
            elapsed: Duration::ZERO,
            at,
        }
    }

    #[test]
    fn test_pointer_drag_commits_top_card() {
        let mut rt = runtime(2);
        let now = Instant::now();
        rt.dispatch(InputEvent::PointerDown { x: 80.0, y: 80.0 }, now);
        rt.dispatch(InputEvent::PointerMove { x: 240.0, y: 80.0 }, now);
        rt.dispatch(InputEvent::PointerUp { x: 240.0, y: 80.0 }, now);
        rt.on_tick(tick_at(now + Duration::from_millis(250)));

        assert_eq!(rt.session().stack().cursor(), 1);
        assert!(rt.presenter().all().iter().any(|o| matches!(
            o,
            SessionOutput::Decided {
                decision: Decision::Like,
                ..
            }
        )));
    }

    #[test]
    fn test_keymap_and_summary_navigation() {
        let mut rt = runtime(2);
        let start = Instant::now();
        rt.dispatch(InputEvent::key(KeyCode::Right), start);
        rt.on_tick(tick_at(start + Duration::from_millis(300)));
        rt.dispatch(InputEvent::key(KeyCode::Char('l')), start + Duration::from_millis(400));
        rt.on_tick(tick_at(start + Duration::from_millis(700)));
        assert!(rt.session().is_exhausted());

        let later = start + Duration::from_secs(1);
        rt.dispatch(InputEvent::key(KeyCode::Enter), later);
        rt.dispatch(InputEvent::key(KeyCode::Right), later);
        assert_eq!(rt.session().gallery().selected(), Some(&CardId::new("c1")));

        assert!(rt.dispatch(InputEvent::key(KeyCode::Esc), later));
        assert!(rt.session().gallery().selected().is_none());
        assert!(!rt.dispatch(InputEvent::key(KeyCode::Esc), later));
    }

    #[test]
    fn test_reset_only_when_exhausted() {
        let mut rt = runtime(1);
        let start = Instant::now();
        rt.dispatch(InputEvent::key(KeyCode::Char('r')), start);
        assert_eq!(rt.session().stack().deck().len(), 1);

        rt.dispatch(InputEvent::key(KeyCode::Left), start);
        rt.on_tick(tick_at(start + Duration::from_millis(300)));
        rt.dispatch(InputEvent::key(KeyCode::Char('r')), start + Duration::from_secs(1));
        assert_eq!(rt.session().stack().deck().len(), 16);
        assert_eq!(rt.session().stack().cursor(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut rt = runtime(1);
        assert!(rt.dispatch(InputEvent::key(KeyCode::Char('t')), Instant::now()));
        let ctrl_c = InputEvent::Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert!(!rt.dispatch(ctrl_c, Instant::now()));
        assert!(!rt.is_running());
    }

    #[test]
    fn test_resize_updates_exit_width() {
        let mut rt = runtime(1);
        rt.dispatch(InputEvent::Resize { width: 100, height: 40 }, Instant::now());
        assert!((rt.session().viewport_width() - 800.0).abs() < f32::EPSILON);
        rt.dispatch(InputEvent::Resize { width: 50, height: 40 }, Instant::now());
        assert!((rt.session().viewport_width() - 400.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_preload_failure_becomes_fallback() {
        struct AlwaysFail;
        impl ImageFetcher for AlwaysFail {
            fn fetch(&self, _image_ref: &str) -> std::result::Result<(), String> {
                Err("offline".to_string())
            }
        }

        let mut rt = runtime(1).with_preloader(Preloader::new(AlwaysFail));
        rt.start();
        let generation = 1;
        rt.on_preload(PreloadReport {
            generation,
            card_id: CardId::new("c0"),
            result: Err("offline".to_string()),
        });
        // Stale generation is ignored.
        rt.on_preload(PreloadReport {
            generation: 0,
            card_id: CardId::new("c0"),
            result: Err("offline".to_string()),
        });

        let fallbacks = rt
            .presenter()
            .all()
            .into_iter()
            .filter(|o| matches!(o, SessionOutput::ImageFallback { .. }))
            .count();
        assert_eq!(fallbacks, 1);
        // Image failures never block decisions.
        let now = Instant::now();
        rt.dispatch(InputEvent::key(KeyCode::Right), now);
        rt.on_tick(tick_at(now + Duration::from_millis(300)));
        assert!(rt.session().is_exhausted());
    }
}
