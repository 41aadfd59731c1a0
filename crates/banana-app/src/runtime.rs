//! Event loop glue between the reducer and the API client.
//!
//! The runtime owns the state, the session store, and an event inbox.
//! `dispatch` feeds one event in and then drains the inbox: every event
//! runs through the reducer, and every returned effect is executed with
//! its settled result pushed back into the inbox as a `*Result` event.

use banana_core::api::ApiClient;
use banana_core::session::{FileStorage, SessionStore, Storage};
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::update::update;

/// Sender for the runtime's event inbox.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver for the runtime's event inbox.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Drives the view state machine against the backend.
pub struct Runtime<S> {
    api: ApiClient,
    store: SessionStore<S>,
    state: AppState,
    tx: UiEventSender,
    rx: UiEventReceiver,
}

impl Runtime<FileStorage> {
    /// Builds a runtime over the default on-disk session store.
    pub fn open_default(api: ApiClient) -> Self {
        Self::new(api, SessionStore::open_default())
    }
}

impl<S: Storage> Runtime<S> {
    /// Builds the runtime, routing the startup view from the persisted
    /// session.
    pub fn new(api: ApiClient, store: SessionStore<S>) -> Self {
        let state = AppState::at_startup(&store.session());
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            store,
            state,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Feeds one event in and drains the inbox to quiescence.
    ///
    /// Effects run to completion before the next event is reduced, so
    /// by the time this returns every triggered call has settled and
    /// its result has been applied to the state.
    pub async fn dispatch(&mut self, event: UiEvent) {
        self.send(event);
        while let Ok(event) = self.rx.try_recv() {
            let effects = update(&mut self.state, event);
            for effect in effects {
                self.execute(effect).await;
            }
        }
    }

    fn send(&self, event: UiEvent) {
        // The receiver lives as long as the sender; this cannot fail.
        let _ = self.tx.send(event);
    }

    async fn execute(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Login { username, password } => {
                let result = self.api.login(&mut self.store, &username, &password).await;
                self.send(UiEvent::AuthResult(result));
            }
            UiEffect::Register {
                username,
                email,
                password,
                confirm_password,
            } => {
                let result = self
                    .api
                    .register(&mut self.store, &username, &email, &password, &confirm_password)
                    .await;
                self.send(UiEvent::AuthResult(result));
            }
            UiEffect::Logout { mode } => {
                let result = self.api.logout(&mut self.store, mode).await;
                self.send(UiEvent::LogoutResult(result));
            }
            UiEffect::FetchLeaderboard => {
                let result = self.api.leaderboard(&self.store).await;
                self.send(UiEvent::LeaderboardResult(result));
            }
            UiEffect::ClearSession => {
                if let Err(err) = self.store.clear() {
                    tracing::warn!("failed to clear session: {err:#}");
                }
            }
        }
    }
}
