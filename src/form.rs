//! The summariser form as a pure state machine.
//!
//! [`update`] applies a [`Msg`] and returns the next state plus at most one
//! [`Effect`] for the caller to execute. Only the most recent accepted submit
//! may change the visible outcome: completions carrying any other
//! [`RequestId`] are dropped.

use crate::client::SummarizeError;
use crate::validate::{validate, TextLimits};
use crate::view_model::{FormView, Outcome};
use log::{debug, info};

/// Identifies one accepted submission.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the text area.
    InputChanged(String),
    /// User pressed submit.
    Submit,
    /// User abandoned the in-flight request.
    Cancel,
    /// A request finished.
    Completed {
        request: RequestId,
        outcome: Result<String, SummarizeError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `text` to the service.
    Summarize { request: RequestId, text: String },
    /// Stop waiting for `request`.
    Abort { request: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    input: String,
    summary: Option<String>,
    error: Option<String>,
    in_flight: Option<RequestId>,
    last_request: RequestId,
    limits: TextLimits,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(TextLimits::default())
    }
}

impl FormState {
    pub fn new(limits: TextLimits) -> Self {
        Self {
            input: String::new(),
            summary: None,
            error: None,
            in_flight: None,
            last_request: 0,
            limits,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn limits(&self) -> TextLimits {
        self.limits
    }

    pub fn view(&self) -> FormView {
        let outcome = if self.is_loading() {
            Outcome::Loading
        } else if let Some(error) = &self.error {
            Outcome::Failed(error.clone())
        } else if let Some(summary) = &self.summary {
            Outcome::Summary(summary.clone())
        } else {
            Outcome::Idle
        };
        FormView::new(&self.input, self.limits, outcome)
    }

    fn fail(&mut self, message: String) {
        self.summary = None;
        self.error = Some(message);
    }
}

/// Pure update function: applies a message to state and returns any effect.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Option<Effect>) {
    let effect = match msg {
        Msg::InputChanged(text) => {
            state.input = text;
            None
        }
        Msg::Submit => {
            if let Some(request) = state.in_flight {
                debug!("submit ignored, request {} still in flight", request);
                return (state, None);
            }
            match validate(&state.input, &state.limits) {
                Err(e) => {
                    info!("submit rejected: {}", e);
                    state.fail(e.to_string());
                    None
                }
                Ok(text) => {
                    let text = text.to_string();
                    state.last_request += 1;
                    let request = state.last_request;
                    state.in_flight = Some(request);
                    state.error = None;
                    state.summary = None;
                    info!("submit {} accepted ({} characters)", request, text.chars().count());
                    Some(Effect::Summarize { request, text })
                }
            }
        }
        Msg::Cancel => match state.in_flight.take() {
            Some(request) => {
                info!("request {} cancelled", request);
                Some(Effect::Abort { request })
            }
            None => None,
        },
        Msg::Completed { request, outcome } => {
            if state.in_flight != Some(request) {
                debug!("discarding stale result of request {}", request);
                return (state, None);
            }
            state.in_flight = None;
            match outcome {
                Ok(summary) => {
                    state.error = None;
                    state.summary = Some(summary);
                }
                Err(e) => state.fail(e.to_string()),
            }
            None
        }
    };

    (state, effect)
}
