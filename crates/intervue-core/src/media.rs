//! Capture device model.
//!
//! Platform code implements [`MediaDevices`] (the permission prompts) and
//! [`SessionView`] (preview surfaces and blocking notices); the application
//! layer drives them through the interview state machine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Which capture permissions have been granted in this session.
///
/// Flags only ever go from `false` to `true`; a new session starts clean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionState {
    pub audio: bool,
    pub video: bool,
    pub screen: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewStatus {
    #[default]
    Idle,
    /// Camera/microphone prompt is open.
    Checking,
    Ready,
    Active,
    /// Declared for the interview lifecycle; nothing transitions here yet.
    Completed,
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewStatus::Idle => "IDLE",
            InterviewStatus::Checking => "CHECKING",
            InterviewStatus::Ready => "READY",
            InterviewStatus::Active => "ACTIVE",
            InterviewStatus::Completed => "COMPLETED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// A live hardware track. `stop` releases the device.
pub trait MediaTrack: Send + Sync {
    fn kind(&self) -> TrackKind;
    fn stop(&self);
}

/// A set of tracks obtained from one permission prompt.
#[derive(Clone, Default)]
pub struct MediaStream {
    tracks: Vec<Arc<dyn MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Arc<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Arc<dyn MediaTrack>] {
        &self.tracks
    }

    pub fn has_kind(&self, kind: TrackKind) -> bool {
        self.tracks.iter().any(|track| track.kind() == kind)
    }

    /// Stops every track in the stream.
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

impl fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<TrackKind> = self.tracks.iter().map(|t| t.kind()).collect();
        f.debug_struct("MediaStream").field("tracks", &kinds).finish()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Permission denied by user")]
    PermissionDenied,
    #[error("No capture device available")]
    DeviceNotFound,
    #[error("Media error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub audio: bool,
    pub video: bool,
}

/// Platform capture prompts. Each call is a separate user-gesture-gated
/// prompt; granting one says nothing about the other.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn get_user_media(
        &self,
        constraints: CaptureConstraints,
    ) -> Result<MediaStream, MediaError>;

    async fn get_display_media(&self) -> Result<MediaStream, MediaError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSurface {
    Camera,
    Screen,
}

/// Where acquired streams are shown and blocking notices are raised.
pub trait SessionView: Send + Sync {
    fn bind_preview(&self, surface: PreviewSurface, stream: &MediaStream);
    fn alert(&self, message: &str);
}
