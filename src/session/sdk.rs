//! Vendor video-SDK boundary.
//!
//! The real conferencing SDK lives outside this crate and its internals are
//! opaque. These traits are the only surface the controller sequences
//! against, and the seam the test doubles implement.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::model::reservation::MeetingCredentials;

/// Opaque vendor error.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SdkError(pub String);

/// Handle to the rendering surface a video tile draws on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHandle(pub String);

/// Identity of the joined session as reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: u32,
}

/// Placement and quality of a rendered video tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderGeometry {
    pub width: u32,
    pub height: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub quality: u8,
}

impl Default for RenderGeometry {
    fn default() -> Self {
        Self { width: 640, height: 360, x_offset: 0, y_offset: 0, quality: 2 }
    }
}

/// Live media surface of a joined session.
#[async_trait]
pub trait MediaStream: Send + Sync {
    fn is_capturing_video(&self) -> bool;
    async fn start_video(&self) -> Result<(), SdkError>;
    async fn stop_video(&self) -> Result<(), SdkError>;
    async fn render_video(
        &self,
        surface: &SurfaceHandle,
        user_id: u32,
        geometry: RenderGeometry,
    ) -> Result<(), SdkError>;
    async fn stop_render_video(&self, surface: &SurfaceHandle, user_id: u32)
        -> Result<(), SdkError>;
    async fn start_share(&self, surface: &SurfaceHandle) -> Result<(), SdkError>;
    async fn stop_share(&self) -> Result<(), SdkError>;
}

/// A joined session. Exclusively owned by the controller until leave.
#[async_trait]
pub trait SessionClient: Send + Sync {
    fn session_info(&self) -> SessionInfo;
    fn media_stream(&self) -> Arc<dyn MediaStream>;
    async fn leave(&mut self) -> Result<(), SdkError>;
}

/// Builds a client and requests entry into a meeting.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn join(
        &self,
        credentials: &MeetingCredentials,
        display_name: &str,
    ) -> Result<Box<dyn SessionClient>, SdkError>;
}
