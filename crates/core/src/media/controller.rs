//! Per-view camera controller: `Idle -> Armed -> Idle`.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use attend_protocol::{JPEG_MIME, to_data_url};
use attend_runtime::FormPart;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::device::{Camera, CameraStream, Purpose, VideoConstraints};
use crate::error::{CaptureError, MediaError};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "purpose", rename_all = "snake_case")]
pub enum MediaState {
	Idle,
	Armed(Purpose),
}

/// An encoded still produced by one [`MediaController::capture_frame`] call.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedFrame {
	bytes: Arc<[u8]>,
	size: VideoConstraints,
}

impl CapturedFrame {
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn size(&self) -> VideoConstraints {
		self.size
	}

	pub fn mime(&self) -> &'static str {
		JPEG_MIME
	}

	/// `data:image/jpeg;base64,...` form.
	pub fn to_data_url(&self) -> String {
		to_data_url(JPEG_MIME, &self.bytes)
	}

	/// Multipart file part carrying this frame.
	pub fn to_form_part(&self, field: &str, filename: &str) -> FormPart {
		FormPart::file(field, filename, JPEG_MIME, self.bytes.to_vec())
	}
}

impl fmt::Debug for CapturedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CapturedFrame")
			.field("len", &self.bytes.len())
			.field("size", &self.size)
			.finish()
	}
}

struct Binding {
	stream: Box<dyn CameraStream>,
	purpose: Purpose,
}

/// Owns at most one armed stream on behalf of a single view.
///
/// Dropping the controller releases the camera, so leaving a view can never
/// leave the device running.
pub struct MediaController {
	camera: Camera,
	owner: u64,
	binding: Option<Binding>,
}

impl MediaController {
	pub fn new(camera: Camera) -> Self {
		Self {
			camera,
			owner: Camera::next_owner_id(),
			binding: None,
		}
	}

	pub fn state(&self) -> MediaState {
		match &self.binding {
			Some(binding) => MediaState::Armed(binding.purpose),
			None => MediaState::Idle,
		}
	}

	pub fn is_armed(&self) -> bool {
		self.binding.is_some()
	}

	/// Opens the device for `purpose` and binds the stream.
	///
	/// An already armed controller is torn down first. On failure nothing is
	/// bound and the device is not held.
	///
	/// # Errors
	///
	/// - [`MediaError::Busy`] if another controller holds the device
	/// - [`MediaError::Unavailable`] on denial or missing hardware
	pub async fn acquire(&mut self, purpose: Purpose) -> Result<(), MediaError> {
		if self.binding.is_some() {
			debug!(target = "attend.media", %purpose, "re-arming; releasing previous stream");
			self.release();
		}

		let claim = self.camera.claim(self.owner, purpose)?;
		let constraints = self.camera.constraints();

		let stream = match self.camera.device().open(constraints).await {
			Ok(stream) => stream,
			Err(err) => {
				warn!(target = "attend.media", %purpose, error = %err, "camera acquisition failed");
				return Err(err);
			}
		};

		self.binding = Some(Binding { stream, purpose });
		claim.commit();
		info!(target = "attend.media", %purpose, width = constraints.width, height = constraints.height, "camera armed");
		Ok(())
	}

	/// Stops every track and unbinds the stream. No-op when idle.
	pub fn release(&mut self) {
		let Some(mut binding) = self.binding.take() else {
			return;
		};
		binding.stream.stop();
		self.camera.unclaim(self.owner);
		debug!(target = "attend.media", purpose = %binding.purpose, "camera released");
	}

	/// Verifies the armed stream is still live.
	///
	/// A dead stream forces the controller back to `Idle`.
	pub fn check_device(&mut self) -> Result<(), MediaError> {
		let lost = self.binding.as_ref().filter(|b| !b.stream.is_live()).map(|b| b.purpose);
		let Some(purpose) = lost else {
			return Ok(());
		};
		warn!(target = "attend.media", %purpose, "camera lost while armed");
		self.release();
		Err(MediaError::Unavailable("camera disconnected".to_string()))
	}

	/// Copies the current frame and JPEG-encodes it.
	///
	/// # Errors
	///
	/// - [`CaptureError::NotArmed`] when idle
	/// - [`CaptureError::DeviceLost`] when the stream died; the controller is idle afterwards
	/// - [`CaptureError::EncodingFailed`] when encoding yields no bytes
	pub async fn capture_frame(&mut self) -> Result<CapturedFrame, CaptureError> {
		if self.binding.is_none() {
			return Err(CaptureError::NotArmed);
		}
		if let Err(err) = self.check_device() {
			return Err(CaptureError::DeviceLost(err.to_string()));
		}

		let size = self.camera.constraints();
		let Some(binding) = self.binding.as_mut() else {
			return Err(CaptureError::NotArmed);
		};

		let bytes = match binding.stream.grab_jpeg(size).await {
			Ok(bytes) => bytes,
			Err(err) => {
				self.release();
				return Err(CaptureError::DeviceLost(err.to_string()));
			}
		};

		if bytes.is_empty() {
			return Err(CaptureError::EncodingFailed);
		}

		debug!(target = "attend.media", len = bytes.len(), "frame captured");
		Ok(CapturedFrame {
			bytes: bytes.into(),
			size,
		})
	}

	/// Borrows the controller so that it is released when the guard drops,
	/// whichever way the enclosing scope exits.
	pub fn release_on_drop(&mut self) -> ReleaseGuard<'_> {
		ReleaseGuard { controller: self }
	}
}

impl Drop for MediaController {
	fn drop(&mut self) {
		self.release();
	}
}

impl fmt::Debug for MediaController {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MediaController")
			.field("owner", &self.owner)
			.field("state", &self.state())
			.finish()
	}
}

/// Scoped access to a controller that releases it on drop.
pub struct ReleaseGuard<'a> {
	controller: &'a mut MediaController,
}

impl Deref for ReleaseGuard<'_> {
	type Target = MediaController;

	fn deref(&self) -> &MediaController {
		self.controller
	}
}

impl DerefMut for ReleaseGuard<'_> {
	fn deref_mut(&mut self) -> &mut MediaController {
		self.controller
	}
}

impl Drop for ReleaseGuard<'_> {
	fn drop(&mut self) {
		self.controller.release();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::media::fake::FakeCamera;

	fn controller(fake: &FakeCamera) -> MediaController {
		MediaController::new(Camera::new(Arc::new(fake.clone())))
	}

	#[tokio::test]
	async fn acquire_then_release_stops_tracks() {
		let fake = FakeCamera::new();
		let mut media = controller(&fake);

		media.acquire(Purpose::BiometricLogin).await.unwrap();
		assert_eq!(media.state(), MediaState::Armed(Purpose::BiometricLogin));
		assert_eq!(fake.live_streams(), 1);

		media.release();
		media.release();
		assert_eq!(media.state(), MediaState::Idle);
		assert_eq!(fake.live_streams(), 0);
		assert_eq!(fake.stop_calls(), 1);
	}

	#[tokio::test]
	async fn denied_acquire_leaves_nothing_bound() {
		let fake = FakeCamera::new();
		fake.deny("Permission denied");
		let mut media = controller(&fake);

		let err = media.acquire(Purpose::Enrollment).await.unwrap_err();
		assert_eq!(err, MediaError::Unavailable("Permission denied".into()));
		assert_eq!(media.state(), MediaState::Idle);
		assert_eq!(fake.live_streams(), 0);
	}

	#[tokio::test]
	async fn capture_while_idle_is_not_armed() {
		let fake = FakeCamera::new();
		let mut media = controller(&fake);
		assert_eq!(media.capture_frame().await.unwrap_err(), CaptureError::NotArmed);
	}

	#[tokio::test]
	async fn capture_keeps_controller_armed() {
		let fake = FakeCamera::with_frame(vec![0xFF, 0xD8, 0x01]);
		let mut media = controller(&fake);
		media.acquire(Purpose::Enrollment).await.unwrap();

		let frame = media.capture_frame().await.unwrap();
		assert_eq!(frame.bytes(), &[0xFF, 0xD8, 0x01]);
		assert_eq!(frame.size(), VideoConstraints { width: 320, height: 240 });
		assert!(frame.to_data_url().starts_with("data:image/jpeg;base64,"));
		assert!(media.is_armed());
		assert_eq!(fake.last_constraints(), Some(VideoConstraints { width: 320, height: 240 }));
	}

	#[tokio::test]
	async fn empty_encoding_fails() {
		let fake = FakeCamera::with_frame(Vec::new());
		let mut media = controller(&fake);
		media.acquire(Purpose::Enrollment).await.unwrap();
		assert_eq!(media.capture_frame().await.unwrap_err(), CaptureError::EncodingFailed);
		assert!(media.is_armed());
	}

	#[tokio::test]
	async fn unplug_forces_idle() {
		let fake = FakeCamera::new();
		let mut media = controller(&fake);
		media.acquire(Purpose::BiometricLogin).await.unwrap();

		fake.unplug();
		let err = media.capture_frame().await.unwrap_err();
		assert!(matches!(err, CaptureError::DeviceLost(_)));
		assert_eq!(media.state(), MediaState::Idle);
		assert_eq!(fake.live_streams(), 0);
	}

	#[tokio::test]
	async fn rearming_releases_previous_stream() {
		let fake = FakeCamera::new();
		let mut media = controller(&fake);
		media.acquire(Purpose::BiometricLogin).await.unwrap();
		media.acquire(Purpose::Enrollment).await.unwrap();

		assert_eq!(media.state(), MediaState::Armed(Purpose::Enrollment));
		assert_eq!(fake.opened(), 2);
		assert_eq!(fake.live_streams(), 1);
	}

	#[tokio::test]
	async fn second_controller_cannot_share_device() {
		let fake = FakeCamera::new();
		let camera = Camera::new(Arc::new(fake.clone()));
		let mut login = MediaController::new(camera.clone());
		let mut enroll = MediaController::new(camera.clone());

		login.acquire(Purpose::BiometricLogin).await.unwrap();
		assert_eq!(
			enroll.acquire(Purpose::Enrollment).await.unwrap_err(),
			MediaError::Busy(Purpose::BiometricLogin)
		);

		drop(login);
		enroll.acquire(Purpose::Enrollment).await.unwrap();
		assert_eq!(camera.held_for(), Some(Purpose::Enrollment));
		assert_eq!(fake.live_streams(), 1);
	}

	#[tokio::test]
	async fn guard_releases_on_scope_exit() {
		let fake = FakeCamera::new();
		let mut media = controller(&fake);
		media.acquire(Purpose::BiometricLogin).await.unwrap();
		{
			let mut guarded = media.release_on_drop();
			guarded.capture_frame().await.unwrap();
		}
		assert_eq!(media.state(), MediaState::Idle);
		assert_eq!(fake.live_streams(), 0);
	}

	#[tokio::test]
	async fn cancelled_acquire_hands_device_back() {
		let fake = FakeCamera::new();
		let gate = fake.gate_open();
		let camera = Camera::new(Arc::new(fake.clone()));
		let mut media = MediaController::new(camera.clone());

		tokio::select! {
			biased;
			_ = media.acquire(Purpose::Enrollment) => panic!("open should be gated"),
			_ = tokio::task::yield_now() => {}
		}

		assert_eq!(media.state(), MediaState::Idle);
		assert_eq!(camera.held_for(), None);

		gate.notify_one();
		media.acquire(Purpose::Enrollment).await.unwrap();
		assert!(media.is_armed());
	}
}
