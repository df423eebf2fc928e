//! Executes controller effects.
//!
//! Network effects are spawned on the tokio runtime and report back as
//! [`Action`]s over an unbounded channel that the event loop drains each
//! tick. Effects that belong to the UI thread (sign-out, notifications) are
//! handed back to the caller.

use crate::api::LeagueApi;
use crate::router::{Action, Effect};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs [`Effect`]s and collects the resulting [`Action`]s.
pub struct EffectRunner {
    api: Arc<dyn LeagueApi>,
    handle: Handle,
    sender: mpsc::UnboundedSender<Action>,
    receiver: mpsc::UnboundedReceiver<Action>,
    in_flight: Vec<JoinHandle<()>>,
    resolve_timeout: Duration,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn LeagueApi>, handle: Handle, resolve_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            handle,
            sender,
            receiver,
            in_flight: Vec::new(),
            resolve_timeout,
        }
    }

    /// Start the effects this runner owns.
    ///
    /// Returns the effects the caller has to apply itself
    /// ([`Effect::SignOut`] and [`Effect::Notify`]), in order.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        self.in_flight.retain(|task| !task.is_finished());

        let mut local = Vec::new();
        for effect in effects {
            match effect {
                Effect::SyncUser {
                    generation,
                    request,
                } => {
                    debug!("Spawning sync-user (generation {})", generation);
                    let api = Arc::clone(&self.api);
                    self.spawn(async move {
                        let result = api.sync_user(&request).await;
                        Action::UserSynced { generation, result }
                    });
                }
                Effect::FetchOnboardingStatus {
                    generation,
                    user_id,
                } => {
                    debug!("Spawning me (generation {})", generation);
                    let api = Arc::clone(&self.api);
                    self.spawn(async move {
                        let result = api.me(&user_id).await;
                        Action::OnboardingStatusLoaded { generation, result }
                    });
                }
                Effect::CompleteOnboarding {
                    generation,
                    user_id,
                } => {
                    debug!("Spawning complete-onboarding (generation {})", generation);
                    let api = Arc::clone(&self.api);
                    self.spawn(async move {
                        let result = api.complete_onboarding(&user_id).await;
                        Action::OnboardingCompleted { generation, result }
                    });
                }
                Effect::ArmResolveTimeout { generation } => {
                    let timeout = self.resolve_timeout;
                    self.spawn(async move {
                        tokio::time::sleep(timeout).await;
                        Action::ResolveTimedOut { generation }
                    });
                }
                Effect::CancelInFlight => self.cancel_all(),
                Effect::SignOut | Effect::Notify(_) => local.push(effect),
            }
        }
        local
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = Action> + Send + 'static,
    {
        let sender = self.sender.clone();
        let join = self.handle.spawn(async move {
            let action = task.await;
            // Receiver gone means the app is shutting down
            let _ = sender.send(action);
        });
        self.in_flight.push(join);
    }

    /// Abort every task still running.
    pub fn cancel_all(&mut self) {
        let count = self.in_flight.len();
        for task in self.in_flight.drain(..) {
            task.abort();
        }
        if count > 0 {
            debug!("Cancelled {} in-flight task(s)", count);
        }
    }

    /// Number of tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        self.in_flight.iter().filter(|task| !task.is_finished()).count()
    }

    /// Actions that are ready, without blocking.
    pub fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.receiver.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Wait for the next action.
    pub async fn next_action(&mut self) -> Option<Action> {
        self.receiver.recv().await
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
