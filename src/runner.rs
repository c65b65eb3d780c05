//! Executes form effects against a [`SummaryService`].

use crate::client::SummaryService;
use crate::form::{update, Effect, FormState, Msg, RequestId};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Spawns one task per request and posts its result back as
/// [`Msg::Completed`]. At most one task is alive at a time.
pub struct EffectRunner {
    service: Arc<dyn SummaryService>,
    outbox: UnboundedSender<Msg>,
    pending: Option<(RequestId, JoinHandle<()>)>,
}

impl EffectRunner {
    pub fn new(service: Arc<dyn SummaryService>, outbox: UnboundedSender<Msg>) -> Self {
        Self {
            service,
            outbox,
            pending: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Summarize { request, text } => {
                let service = Arc::clone(&self.service);
                let outbox = self.outbox.clone();
                let handle = tokio::spawn(async move {
                    let outcome = service.summarize(&text).await;
                    // The receiver is gone only when the form has shut down.
                    let _ = outbox.send(Msg::Completed { request, outcome });
                });
                if let Some((superseded, old)) = self.pending.replace((request, handle)) {
                    debug!("aborting superseded request {}", superseded);
                    old.abort();
                }
            }
            Effect::Abort { request } => {
                if let Some((pending, handle)) = self.pending.take() {
                    if pending == request {
                        handle.abort();
                    } else {
                        self.pending = Some((pending, handle));
                    }
                }
            }
        }
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(request, _)| *request)
    }
}

/// Apply `msg` and run whatever effect it produces.
pub fn dispatch(state: FormState, msg: Msg, runner: &mut EffectRunner) -> FormState {
    let (state, effect) = update(state, msg);
    if let Some(effect) = effect {
        runner.run(effect);
    }
    state
}

/// Enter `text`, submit it, and wait for the result in place.
pub async fn summarize_once(
    service: &dyn SummaryService,
    state: FormState,
    text: String,
) -> FormState {
    let (state, _) = update(state, Msg::InputChanged(text));
    let (state, effect) = update(state, Msg::Submit);
    match effect {
        Some(Effect::Summarize { request, text }) => {
            let outcome = service.summarize(&text).await;
            update(state, Msg::Completed { request, outcome }).0
        }
        _ => state,
    }
}
