//! TUI module using ratatui.
//!
//! The event loop feeds key presses and request completions through
//! [`crate::form::update`] and redraws the resulting view.

pub mod components;

use crate::client::SummaryService;
use crate::form::{FormState, Msg};
use crate::runner::{dispatch, EffectRunner};
use crate::validate::TextLimits;
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use log::info;
use ratatui::DefaultTerminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const TICK: Duration = Duration::from_millis(50);
/// Rows moved per PageUp/PageDown in the summary panel.
const SCROLL_STEP: u16 = 5;

/// What a key press asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Send(Msg),
    ScrollUp,
    ScrollDown,
    Ignore,
}

/// Run the terminal form until the user quits.
pub async fn run(service: Arc<dyn SummaryService>, limits: TextLimits) -> Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = execute!(io::stdout(), EnableBracketedPaste) {
        info!("bracketed paste unavailable: {}", e);
    }

    let result = event_loop(&mut terminal, service, limits).await;

    let _ = execute!(io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    service: Arc<dyn SummaryService>,
    limits: TextLimits,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runner = EffectRunner::new(service, tx);
    let mut state = FormState::new(limits);
    let mut summary_scroll: u16 = 0;
    let mut shown = state.view().outcome;

    loop {
        while let Ok(msg) = rx.try_recv() {
            state = dispatch(state, msg, &mut runner);
        }

        let view = state.view();
        if view.outcome != shown {
            summary_scroll = 0;
            shown = view.outcome.clone();
        }
        terminal
            .draw(|frame| summary_scroll = components::render(frame, &view, summary_scroll))
            .context("draw frame")?;

        // Let spawned requests make progress between polls.
        let has_event = tokio::task::block_in_place(|| event::poll(TICK)).context("poll event")?;
        if !has_event {
            continue;
        }

        let action = match event::read().context("read event")? {
            Event::Key(key) => handle_key(&state, key),
            Event::Paste(text) => insert(&state, &text),
            _ => KeyAction::Ignore,
        };

        match action {
            KeyAction::Quit => break,
            KeyAction::Send(msg) => state = dispatch(state, msg, &mut runner),
            KeyAction::ScrollUp => summary_scroll = summary_scroll.saturating_sub(SCROLL_STEP),
            // clamped to the summary length on the next draw
            KeyAction::ScrollDown => summary_scroll = summary_scroll.saturating_add(SCROLL_STEP),
            KeyAction::Ignore => {}
        }
    }

    info!("form closed");
    Ok(())
}

/// Translate a key press into a form message.
pub fn handle_key(state: &FormState, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c' | 'q'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => KeyAction::Send(Msg::Submit),
        (KeyCode::Esc, _) if state.is_loading() => KeyAction::Send(Msg::Cancel),
        (KeyCode::Char(c), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            insert(state, c.encode_utf8(&mut [0; 4]))
        }
        (KeyCode::PageUp, _) => KeyAction::ScrollUp,
        (KeyCode::PageDown, _) => KeyAction::ScrollDown,
        (KeyCode::Enter, _) => insert(state, "\n"),
        (KeyCode::Tab, _) => insert(state, "\t"),
        (KeyCode::Backspace, _) => {
            let mut text = state.input().to_string();
            if text.pop().is_none() {
                return KeyAction::Ignore;
            }
            KeyAction::Send(Msg::InputChanged(text))
        }
        _ => KeyAction::Ignore,
    }
}

fn insert(state: &FormState, fragment: &str) -> KeyAction {
    let mut text = state.input().to_string();
    // Terminals deliver pasted newlines as \r
    text.push_str(&fragment.replace("\r\n", "\n").replace('\r', "\n"));
    KeyAction::Send(Msg::InputChanged(text))
}
