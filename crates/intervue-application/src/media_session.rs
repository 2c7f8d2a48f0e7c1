//! Capture-permission handshake for a live interview.
//!
//! `MediaSession` walks the interview from IDLE through READY to ACTIVE:
//! camera and microphone first, screen share second, each behind its own
//! platform prompt. Denials are absorbed here: the user gets a blocking
//! notice and the caller gets an [`AcquireOutcome`], never an error.
//!
//! Every track acquired by the session is stopped exactly once, either by an
//! explicit [`MediaSession::teardown`] or when the session is dropped.

use intervue_core::media::{
    CaptureConstraints, InterviewStatus, MediaDevices, MediaError, MediaStream, PermissionState,
    PreviewSurface, SessionView,
};
use std::sync::Arc;
use tokio::sync::watch;

pub const CAMERA_REQUIRED_NOTICE: &str = "We need camera and microphone permissions to proceed.";
pub const SCREEN_REQUIRED_NOTICE: &str = "Screen sharing is required for the technical assessment.";

/// Result of one permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    Granted,
    /// The prompt was denied or no device was available. The user has
    /// already been notified.
    Denied(MediaError),
    /// The request does not apply in the current state.
    Skipped(InterviewStatus),
}

pub struct MediaSession {
    devices: Arc<dyn MediaDevices>,
    view: Arc<dyn SessionView>,
    permissions: PermissionState,
    status: watch::Sender<InterviewStatus>,
    local_stream: Option<MediaStream>,
    screen_stream: Option<MediaStream>,
}

impl MediaSession {
    pub fn new(devices: Arc<dyn MediaDevices>, view: Arc<dyn SessionView>) -> Self {
        let (status, _) = watch::channel(InterviewStatus::Idle);
        Self {
            devices,
            view,
            permissions: PermissionState::default(),
            status,
            local_stream: None,
            screen_stream: None,
        }
    }

    pub fn status(&self) -> InterviewStatus {
        *self.status.borrow()
    }

    /// Observes status changes, including the transient CHECKING state.
    pub fn subscribe(&self) -> watch::Receiver<InterviewStatus> {
        self.status.subscribe()
    }

    pub fn permissions(&self) -> PermissionState {
        self.permissions
    }

    /// Requests camera and microphone.
    ///
    /// Granted: both flags set together, camera preview bound, READY.
    /// Denied: notice shown, flags untouched, back to IDLE.
    /// Dropped before the prompt settles: back to IDLE.
    pub async fn request_permissions(&mut self) -> AcquireOutcome {
        let current = self.status();
        if current != InterviewStatus::Idle {
            return AcquireOutcome::Skipped(current);
        }

        self.set_status(InterviewStatus::Checking);
        let _checking = CheckingGuard(&self.status);
        let constraints = CaptureConstraints {
            audio: true,
            video: true,
        };

        match self.devices.get_user_media(constraints).await {
            Ok(stream) => {
                self.permissions = PermissionState {
                    audio: true,
                    video: true,
                    ..self.permissions
                };
                self.view.bind_preview(PreviewSurface::Camera, &stream);
                tracing::info!(tracks = stream.tracks().len(), "Camera and microphone acquired");
                self.local_stream = Some(stream);
                self.set_status(InterviewStatus::Ready);
                AcquireOutcome::Granted
            }
            Err(err) => {
                tracing::warn!("Error accessing media devices: {}", err);
                self.view.alert(CAMERA_REQUIRED_NOTICE);
                self.set_status(InterviewStatus::Idle);
                AcquireOutcome::Denied(err)
            }
        }
    }

    /// Requests screen share once camera and microphone are in place.
    ///
    /// Granted: screen flag set, screen preview bound, ACTIVE.
    /// Denied: notice shown, state left exactly as it was (still READY).
    pub async fn start_screen_share(&mut self) -> AcquireOutcome {
        let current = self.status();
        if current != InterviewStatus::Ready {
            return AcquireOutcome::Skipped(current);
        }

        match self.devices.get_display_media().await {
            Ok(stream) => {
                self.permissions.screen = true;
                self.view.bind_preview(PreviewSurface::Screen, &stream);
                tracing::info!("Screen share acquired");
                self.screen_stream = Some(stream);
                self.set_status(InterviewStatus::Active);
                AcquireOutcome::Granted
            }
            Err(err) => {
                tracing::warn!("Error getting display media: {}", err);
                self.view.alert(SCREEN_REQUIRED_NOTICE);
                AcquireOutcome::Denied(err)
            }
        }
    }

    /// Stops every acquired track. Safe to call more than once; tracks are
    /// only ever stopped on the first call.
    pub fn teardown(&mut self) {
        let streams = [self.local_stream.take(), self.screen_stream.take()];
        let mut stopped = 0;
        for stream in streams.into_iter().flatten() {
            stopped += stream.tracks().len();
            stream.stop_all();
        }
        if stopped > 0 {
            tracing::info!(tracks = stopped, "Media tracks released");
        }
    }

    fn set_status(&self, status: InterviewStatus) {
        self.status.send_replace(status);
    }
}

/// Returns a session still in CHECKING to IDLE when the request is abandoned.
struct CheckingGuard<'a>(&'a watch::Sender<InterviewStatus>);

impl Drop for CheckingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|status| {
            if *status == InterviewStatus::Checking {
                tracing::debug!("Permission request abandoned");
                *status = InterviewStatus::Idle;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for MediaSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
