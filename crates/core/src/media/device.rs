//! Device seam and the shared, exclusively-held camera handle.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::MediaError;

/// Requested capture size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoConstraints {
	pub width: u32,
	pub height: u32,
}

/// Fixed resolution for both login scans and enrollment photos.
pub const CAPTURE_CONSTRAINTS: VideoConstraints = VideoConstraints { width: 320, height: 240 };

/// Why the camera is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
	BiometricLogin,
	Enrollment,
}

impl fmt::Display for Purpose {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Purpose::BiometricLogin => "face login",
			Purpose::Enrollment => "employee enrollment",
		})
	}
}

/// A video-capable device (browser `getUserMedia`, a V4L2 node, a file...).
#[async_trait]
pub trait CameraDevice: Send + Sync {
	/// Opens a live stream at `constraints`.
	///
	/// Fails with [`MediaError::Unavailable`] on denial or missing hardware.
	async fn open(&self, constraints: VideoConstraints) -> Result<Box<dyn CameraStream>, MediaError>;
}

/// A live stream returned by [`CameraDevice::open`].
#[async_trait]
pub trait CameraStream: Send + Sync {
	/// False once the device has been unplugged or revoked.
	fn is_live(&self) -> bool;

	/// Draws the current frame into an offscreen buffer of `size` and
	/// JPEG-encodes it. An empty buffer means encoding produced nothing.
	async fn grab_jpeg(&mut self, size: VideoConstraints) -> Result<Vec<u8>, MediaError>;

	/// Stops every track of the stream. Must tolerate repeated calls.
	fn stop(&mut self);
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy)]
struct Holder {
	owner: u64,
	purpose: Purpose,
}

/// Shared handle to one physical camera.
#[derive(Clone)]
pub struct Camera {
	device: Arc<dyn CameraDevice>,
	holder: Arc<Mutex<Option<Holder>>>,
	constraints: VideoConstraints,
}

impl Camera {
	pub fn new(device: Arc<dyn CameraDevice>) -> Self {
		Self {
			device,
			holder: Arc::new(Mutex::new(None)),
			constraints: CAPTURE_CONSTRAINTS,
		}
	}

	pub fn constraints(&self) -> VideoConstraints {
		self.constraints
	}

	/// Purpose of whichever controller currently holds the device.
	pub fn held_for(&self) -> Option<Purpose> {
		let holder = *self.holder.lock();
		holder.map(|h| h.purpose)
	}

	pub(crate) fn device(&self) -> &Arc<dyn CameraDevice> {
		&self.device
	}

	pub(crate) fn next_owner_id() -> u64 {
		NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
	}

	/// Claims the device for `owner`; released when the claim drops unless
	/// [`DeviceClaim::commit`] was called.
	pub(crate) fn claim(&self, owner: u64, purpose: Purpose) -> Result<DeviceClaim<'_>, MediaError> {
		let mut holder = self.holder.lock();
		match *holder {
			Some(current) if current.owner != owner => Err(MediaError::Busy(current.purpose)),
			_ => {
				*holder = Some(Holder { owner, purpose });
				Ok(DeviceClaim {
					camera: self,
					owner,
					committed: false,
				})
			}
		}
	}

	/// Releases the device if `owner` holds it.
	pub(crate) fn unclaim(&self, owner: u64) {
		let mut holder = self.holder.lock();
		if (*holder).is_some_and(|h| h.owner == owner) {
			*holder = None;
		}
	}
}

impl fmt::Debug for Camera {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Camera")
			.field("constraints", &self.constraints)
			.field("held_for", &self.held_for())
			.finish_non_exhaustive()
	}
}

/// Pending claim on the device while a stream is being opened.
///
/// Dropping it uncommitted (open failed, or the acquiring future was
/// cancelled) hands the device back.
pub(crate) struct DeviceClaim<'a> {
	camera: &'a Camera,
	owner: u64,
	committed: bool,
}

impl DeviceClaim<'_> {
	pub(crate) fn commit(mut self) {
		self.committed = true;
	}
}

impl Drop for DeviceClaim<'_> {
	fn drop(&mut self) {
		if !self.committed {
			self.camera.unclaim(self.owner);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::media::fake::FakeCamera;

	#[test]
	fn second_owner_is_refused_while_claimed() {
		let camera = Camera::new(Arc::new(FakeCamera::new()));
		let claim = camera.claim(1, Purpose::Enrollment).unwrap();
		claim.commit();
		assert_eq!(camera.claim(2, Purpose::BiometricLogin).err(), Some(MediaError::Busy(Purpose::Enrollment)));
		camera.unclaim(1);
		assert!(camera.claim(2, Purpose::BiometricLogin).is_ok());
	}

	#[test]
	fn uncommitted_claim_releases_on_drop() {
		let camera = Camera::new(Arc::new(FakeCamera::new()));
		drop(camera.claim(1, Purpose::Enrollment).unwrap());
		assert_eq!(camera.held_for(), None);
	}

	#[test]
	fn unclaim_by_stranger_is_ignored() {
		let camera = Camera::new(Arc::new(FakeCamera::new()));
		camera.claim(1, Purpose::Enrollment).unwrap().commit();
		camera.unclaim(7);
		assert_eq!(camera.held_for(), Some(Purpose::Enrollment));
	}
}
