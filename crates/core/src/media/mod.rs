//! Camera acquisition and still-frame capture.
//!
//! A [`Camera`] is the shared handle to one physical device. Each view that
//! needs the camera owns a [`MediaController`] built from it; the controllers
//! coordinate through the handle so that at most one of them is armed at a
//! time.

mod controller;
mod device;
pub mod fake;

pub use controller::{CapturedFrame, MediaController, MediaState, ReleaseGuard};
pub use device::{CAPTURE_CONSTRAINTS, Camera, CameraDevice, CameraStream, Purpose, VideoConstraints};
