//! Live meeting sessions: the vendor SDK seam, the phase-machine
//! controller that sequences it, and screen-share geometry.

pub mod controller;
pub mod sdk;
pub mod share;

pub use controller::{SessionController, SessionError, SessionPhase};
pub use sdk::{
    MediaStream, RenderGeometry, SdkError, SessionClient, SessionConnector, SessionInfo,
    SurfaceHandle,
};
pub use share::{fit_within, Dimensions, ShareTracker};
