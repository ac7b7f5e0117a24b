//! Meeting session controller.
//!
//! Sequences one live video session tied to a reservation: join, render,
//! leave, and the single finalization write that reports the outcome. A
//! phase machine drives the whole thing — there are no loading flags, the
//! view renders from `phase()`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use super::sdk::{RenderGeometry, SdkError, SessionClient, SessionConnector, SurfaceHandle};
use crate::backend::ReservationBackend;
use crate::booking::store::{ReservationStore, WriteOutcome};
use crate::error::BackendError;
use crate::events::{EventBus, LifecycleEvent};
use crate::model::status::{FinalizeEndpoint, SessionRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Idle,
    Joining,
    InSession,
    Leaving,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is {phase:?}; a new join requires IDLE")]
    Busy { phase: SessionPhase },

    #[error("meeting credentials are not available until the slot is marked as started")]
    NotJoinable,

    #[error("join rejected: {0}")]
    JoinRejected(#[source] SdkError),

    #[error("no active session")]
    NotInSession,

    #[error("leaving requires a confirmed end-session action")]
    NotConfirmed,

    #[error("leave failed: {0}")]
    LeaveFailed(#[source] SdkError),

    #[error("session left, but finalization was not accepted: {0}")]
    Finalization(#[source] BackendError),
}

pub struct SessionController {
    connector: Arc<dyn SessionConnector>,
    backend: Arc<dyn ReservationBackend>,
    store: Arc<ReservationStore>,
    bus: Arc<EventBus>,
    role: SessionRole,
    phase: SessionPhase,
    client: Option<Box<dyn SessionClient>>,
    leave_requested: bool,
}

impl SessionController {
    pub fn new(
        connector: Arc<dyn SessionConnector>,
        backend: Arc<dyn ReservationBackend>,
        store: Arc<ReservationStore>,
        bus: Arc<EventBus>,
        role: SessionRole,
    ) -> Self {
        Self {
            connector,
            backend,
            store,
            bus,
            role,
            phase: SessionPhase::Idle,
            client: None,
            leave_requested: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True while an end-session confirmation is being waited on.
    pub fn leave_pending(&self) -> bool {
        self.leave_requested
    }

    async fn transition(&mut self, phase: SessionPhase) {
        self.phase = phase;
        let reservation_id = self.store.snapshot().await.reservation.id;
        self.bus.publish(LifecycleEvent::SessionPhaseChanged { reservation_id, phase });
    }

    /// Join the meeting using the store's current credentials.
    ///
    /// Fails fast when a session is already underway or the reservation is
    /// not yet joinable. A rejected join logs, returns to `Idle` and is not
    /// retried — the user may re-invoke manually.
    pub async fn join(&mut self, display_name: &str) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            debug!("join ignored: session is {:?}", self.phase);
            return Err(SessionError::Busy { phase: self.phase });
        }
        let credentials = self
            .store
            .meeting_credentials()
            .await
            .ok_or(SessionError::NotJoinable)?;

        self.transition(SessionPhase::Joining).await;
        match self.connector.join(&credentials, display_name).await {
            Ok(client) => {
                self.client = Some(client);
                self.transition(SessionPhase::InSession).await;
                Ok(())
            }
            Err(e) => {
                error!("failed to join session: {e}");
                self.transition(SessionPhase::Idle).await;
                Err(SessionError::JoinRejected(e))
            }
        }
    }

    /// Start local capture and render it onto `surface`. A no-op when
    /// capture is already running; SDK errors are logged, never propagated.
    pub async fn start_video(&mut self, surface: &SurfaceHandle, geometry: RenderGeometry) {
        let Some(client) = self.client.as_ref() else {
            debug!("start_video ignored: no active session");
            return;
        };
        let stream = client.media_stream();
        if stream.is_capturing_video() {
            return;
        }
        if let Err(e) = stream.start_video().await {
            warn!("could not start video capture: {e}");
            return;
        }
        let info = client.session_info();
        if let Err(e) = stream.render_video(surface, info.user_id, geometry).await {
            warn!("could not render local video: {e}");
        }
    }

    /// Stop local capture and tear down its tile. A no-op when capture is
    /// not running.
    pub async fn stop_video(&mut self, surface: &SurfaceHandle) {
        let Some(client) = self.client.as_ref() else {
            debug!("stop_video ignored: no active session");
            return;
        };
        let stream = client.media_stream();
        if !stream.is_capturing_video() {
            return;
        }
        if let Err(e) = stream.stop_video().await {
            warn!("could not stop video capture: {e}");
            return;
        }
        let info = client.session_info();
        if let Err(e) = stream.stop_render_video(surface, info.user_id).await {
            warn!("could not tear down local video tile: {e}");
        }
    }

    /// Ask for the end-session confirmation step.
    pub fn request_leave(&mut self) {
        if self.phase == SessionPhase::InSession {
            self.leave_requested = true;
        }
    }

    /// The user dismissed the confirmation; stay in the session.
    pub fn dismiss_leave(&mut self) {
        self.leave_requested = false;
    }

    /// Leave the session after a confirmed end-session action, then issue
    /// exactly one finalization request for this role.
    ///
    /// If the SDK leave itself fails, the finalization request is NOT
    /// issued and the controller stays in the session.
    pub async fn confirm_leave(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::InSession {
            return Err(SessionError::NotInSession);
        }
        if !self.leave_requested {
            return Err(SessionError::NotConfirmed);
        }
        self.leave_requested = false;

        let Some(mut client) = self.client.take() else {
            return Err(SessionError::NotInSession);
        };
        self.transition(SessionPhase::Leaving).await;

        if let Err(e) = client.leave().await {
            error!("error leaving session: {e}");
            self.client = Some(client);
            self.transition(SessionPhase::InSession).await;
            return Err(SessionError::LeaveFailed(e));
        }
        // The client and stream handles are released for good here.
        drop(client);

        let result = self.finalize().await;
        self.transition(SessionPhase::Idle).await;
        result
    }

    async fn finalize(&self) -> Result<(), SessionError> {
        let snapshot = self.store.snapshot().await;
        let finalization = self.role.finalization();

        let sent = match finalization.endpoint {
            FinalizeEndpoint::Reservation => {
                self.backend
                    .update_reservation_status(&snapshot.reservation.id, finalization.change)
                    .await
            }
            FinalizeEndpoint::TimeTable => {
                self.backend
                    .update_time_table_status(snapshot.reservation.time_table_ref(), finalization.change)
                    .await
            }
        };
        if let Err(e) = sent {
            error!("session finalization failed: {e}");
            return Err(SessionError::Finalization(e));
        }

        let write = self
            .store
            .apply_status(snapshot.version, finalization.resulting_status)
            .await;
        if write != WriteOutcome::Applied {
            debug!("local finalization write discarded ({write:?}); the backend stays authoritative");
        }
        Ok(())
    }
}
