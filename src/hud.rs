//! DOM heads-up display
//!
//! Text sinks for the score line and the start/restart buttons. Every element
//! is optional; a page without them still runs.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::sim::GamePhase;

pub const SCORE_ID: &str = "score";
pub const STATS_ID: &str = "stats";
pub const START_BUTTON_ID: &str = "start-button";
pub const RESTART_BUTTON_ID: &str = "restart-button";

/// Score line text
pub fn score_text(score: i64) -> String {
    format!("Score: {}", score)
}

/// Secondary line: snake length and food eaten
pub fn stats_text(length: usize, eaten: u32) -> String {
    format!("Length: {}  Food: {}", length, eaten)
}

/// Cached HUD element handles
pub struct Hud {
    score: Option<Element>,
    stats: Option<Element>,
    start_button: Option<Element>,
    restart_button: Option<Element>,
    /// Last phase shown, to skip redundant style writes
    shown_phase: Option<GamePhase>,
}

impl Hud {
    pub fn new(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::debug!("HUD element #{} not found", id);
            }
            el
        };
        Self {
            score: find(SCORE_ID),
            stats: find(STATS_ID),
            start_button: find(START_BUTTON_ID),
            restart_button: find(RESTART_BUTTON_ID),
            shown_phase: None,
        }
    }

    pub fn set_score(&self, score: i64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&score_text(score)));
        }
    }

    pub fn set_stats(&self, length: usize, eaten: u32) {
        if let Some(el) = &self.stats {
            el.set_text_content(Some(&stats_text(length, eaten)));
        }
    }

    /// Start button in Ready, restart button on game over, neither while playing
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.shown_phase == Some(phase) {
            return;
        }
        self.shown_phase = Some(phase);
        set_visible(self.start_button.as_ref(), phase == GamePhase::Ready);
        set_visible(self.restart_button.as_ref(), phase == GamePhase::GameOver);
    }

    /// Attach click handlers to the start and restart buttons
    pub fn bind_buttons<S, R>(&self, on_start: S, on_restart: R)
    where
        S: FnMut() + 'static,
        R: FnMut() + 'static,
    {
        bind_click(self.start_button.as_ref(), on_start);
        bind_click(self.restart_button.as_ref(), on_restart);
    }
}

fn set_visible(el: Option<&Element>, visible: bool) {
    let Some(el) = el.and_then(|e| e.dyn_ref::<HtmlElement>()) else {
        return;
    };
    let display = if visible { "" } else { "none" };
    if el.style().set_property("display", display).is_err() {
        log::warn!("Failed to set display on #{}", el.id());
    }
}

fn bind_click<F>(el: Option<&Element>, mut handler: F)
where
    F: FnMut() + 'static,
{
    let Some(el) = el else { return };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
