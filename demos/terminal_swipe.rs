//! Terminal Swipe: drag the card with the mouse or use the arrow keys.
//!
//! Demonstrates:
//! - Runtime with input, ticker and preload actors
//! - A minimal `Presenter` drawing the top card, badges and the summary
//!
//! Keys: ←/h dislike, →/l like, t theme, q quit.
//! Summary: Enter open, ←/→ browse, Esc close, a show all, r new deck.
//!
//! Set `RUST_LOG=swipedeck=debug` and redirect stderr to watch transitions.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use swipedeck::{
    CardTransform, Changes, NoopFetcher, Preloader, Presenter, Runtime, RuntimeConfig, Session,
    SessionOutput, SessionSummary, SwipeConfig, Theme,
};

#[derive(Default)]
struct TextPresenter {
    transform: CardTransform,
    caption: Option<String>,
}

impl TextPresenter {
    fn draw(&self, session: &Session) -> io::Result<()> {
        let mut out = io::stdout();
        let (fg, bg) = match session.theme() {
            Theme::Dark => (Color::White, Color::Black),
            Theme::Light => (Color::Black, Color::White),
        };
        queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg), Clear(ClearType::All))?;
        queue!(out, MoveTo(0, 0), Print("Paws & Preferences   [t] theme  [q] quit"))?;

        let stack = session.stack();
        if let Some(top) = stack.current_top() {
            let (position, total) = stack.progress();
            queue!(out, MoveTo(0, 2), Print(format!("{position} / {total}")))?;

            let shift = (self.transform.translate_x / 8.0).clamp(-30.0, 30.0);
            #[allow(clippy::cast_possible_truncation)]
            let column = (32.0 + shift).max(0.0) as u16;
            queue!(out, MoveTo(column, 4), Print(format!("┌ {} ┐", top.alt_text)))?;
            queue!(
                out,
                MoveTo(column, 5),
                Print(format!(
                    "  rot {:+.1}°  LIKE {:.0}%  NOPE {:.0}%",
                    self.transform.rotation_deg,
                    self.transform.like_opacity * 100.0,
                    self.transform.dislike_opacity * 100.0
                ))
            )?;
            if let Some(caption) = &self.caption {
                queue!(out, MoveTo(column, 6), Print(format!("  (image unavailable: {caption})")))?;
            }
            queue!(
                out,
                MoveTo(0, 9),
                Print(format!("{} more below", stack.visible().count().saturating_sub(1)))
            )?;
        } else {
            let summary = SessionSummary::new(stack);
            let gallery = session.gallery();
            queue!(
                out,
                MoveTo(0, 2),
                Print(format!("You liked {} out of {}", summary.liked_count(), summary.total()))
            )?;
            let mut row = 4;
            for item in gallery.visible_items(&summary) {
                let marker = if gallery.selected() == Some(&item.id) { '>' } else { ' ' };
                queue!(out, MoveTo(0, row), Print(format!("{marker} {}", item.alt_text)))?;
                row += 1;
            }
            if gallery.shows_toggle(&summary) {
                let label = if gallery.is_expanded() { "[a] show less" } else { "[a] show all" };
                queue!(out, MoveTo(0, row + 1), Print(label))?;
            }
            queue!(out, MoveTo(0, row + 2), Print("[r] new deck"))?;
        }

        queue!(out, ResetColor)?;
        out.flush()
    }
}

impl Presenter for TextPresenter {
    fn present(&mut self, session: &Session, outputs: &[SessionOutput], changes: Changes) {
        for output in outputs {
            match output {
                SessionOutput::Transform { transform, .. } => self.transform = *transform,
                SessionOutput::CommitStarted { animation, .. } => self.transform = animation.transform,
                SessionOutput::Decided { .. } | SessionOutput::SessionReset { .. } => {
                    self.transform = CardTransform::NEUTRAL;
                    self.caption = None;
                }
                SessionOutput::ImageFallback { card_id, caption } => {
                    if session.top_id().as_ref() == Some(card_id) {
                        self.caption = Some(caption.clone());
                    }
                }
                _ => {}
            }
        }
        if !changes.is_empty() {
            let _ = self.draw(session);
        }
    }
}

fn main() -> swipedeck::Result<()> {
    env_logger::init();

    let session = Session::with_defaults(SwipeConfig::default())?;
    let mut runtime = Runtime::new(session, TextPresenter::default(), RuntimeConfig::default())?
        .with_preloader(Preloader::new(NoopFetcher));
    runtime.run()
}
