//! Camera device backed by a JPEG file on disk.
//!
//! A terminal has no live video, so `--frame FILE` stands in for the device:
//! opening the camera reads the file and every capture returns its bytes.

use std::path::PathBuf;

use async_trait::async_trait;
use attend::{CameraDevice, CameraStream, MediaError, VideoConstraints};
use tracing::debug;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

#[derive(Debug, Clone, Default)]
pub struct FileCamera {
	path: Option<PathBuf>,
}

impl FileCamera {
	pub fn new(path: Option<PathBuf>) -> Self {
		Self { path }
	}
}

#[async_trait]
impl CameraDevice for FileCamera {
	async fn open(&self, constraints: VideoConstraints) -> Result<Box<dyn CameraStream>, MediaError> {
		let Some(path) = &self.path else {
			return Err(MediaError::Unavailable("no frame file given; pass --frame".to_string()));
		};

		let bytes = tokio::fs::read(path)
			.await
			.map_err(|err| MediaError::Unavailable(format!("cannot read {}: {err}", path.display())))?;
		if !bytes.starts_with(&JPEG_SOI) {
			return Err(MediaError::Unavailable(format!("{} is not a JPEG image", path.display())));
		}

		debug!(
			target = "attend.camera",
			path = %path.display(),
			len = bytes.len(),
			width = constraints.width,
			height = constraints.height,
			"frame file opened"
		);
		Ok(Box::new(FileStream { bytes, stopped: false }))
	}
}

struct FileStream {
	bytes: Vec<u8>,
	stopped: bool,
}

#[async_trait]
impl CameraStream for FileStream {
	fn is_live(&self) -> bool {
		!self.stopped
	}

	async fn grab_jpeg(&mut self, _size: VideoConstraints) -> Result<Vec<u8>, MediaError> {
		if self.stopped {
			return Err(MediaError::Unavailable("stream ended".to_string()));
		}
		Ok(self.bytes.clone())
	}

	fn stop(&mut self) {
		self.stopped = true;
	}
}
