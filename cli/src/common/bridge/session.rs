//! # Echo Session
//!
//! Owns the input form and the cycle state and runs one cycle per submit:
//! validate → `Loading` → transport → `Success` / `Failure`.
//!
//! `submit_with` takes `&mut self` for the whole cycle, so a second
//! submission cannot begin until the first one has settled.

use super::client::EchoTransport;
use super::cycle::CycleState;
use super::form::InputForm;
use super::validation::ValidationError;
use tracing::{debug, info};

pub struct EchoSession<T> {
    transport: T,
    form: InputForm,
    state: CycleState,
}

impl<T: EchoTransport> EchoSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            form: InputForm::new(),
            state: CycleState::Idle,
        }
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn edit(&mut self, value: impl Into<String>) {
        self.form.edit(value);
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(self.state.is_loading())
    }

    /// Runs one cycle. See [`EchoSession::submit_with`].
    pub async fn submit(&mut self) -> Result<&CycleState, ValidationError> {
        self.submit_with(|_| {}).await
    }

    /// Runs one cycle, calling `on_loading` once the request is in flight.
    ///
    /// A validation failure leaves the cycle state untouched and never
    /// reaches the transport. The field is cleared only when the cycle
    /// ends in `Success`.
    pub async fn submit_with<F>(&mut self, on_loading: F) -> Result<&CycleState, ValidationError>
    where
        F: FnOnce(&Self),
    {
        let message = self.form.submit()?;

        self.state = CycleState::Loading;
        on_loading(&*self);
        debug!("Cycle started for message of {} characters", self.form.char_count());

        let result = self.transport.send(&message).await;
        self.state = CycleState::settled(result);

        match &self.state {
            CycleState::Success(_) => {
                info!("Echo cycle succeeded");
                self.form.reset();
            }
            CycleState::Failure(err) => info!("Echo cycle failed: {} (status {})", err.error, err.status),
            CycleState::Idle | CycleState::Loading => {}
        }
        Ok(&self.state)
    }
}
