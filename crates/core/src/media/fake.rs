//! Scriptable camera for tests and headless runs.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::device::{CameraDevice, CameraStream, VideoConstraints};
use crate::error::MediaError;

/// JPEG SOI/APP0 prefix used as the default frame.
const DEFAULT_FRAME: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

#[derive(Default)]
struct FakeState {
	frame: Vec<u8>,
	denial: Option<String>,
	gate: Option<Arc<Notify>>,
	generation: u64,
	opened: usize,
	live: usize,
	stop_calls: usize,
	last_constraints: Option<VideoConstraints>,
}

/// In-memory [`CameraDevice`] that counts every stream it hands out.
#[derive(Clone)]
pub struct FakeCamera {
	state: Arc<Mutex<FakeState>>,
}

impl Default for FakeCamera {
	fn default() -> Self {
		Self::new()
	}
}

impl FakeCamera {
	pub fn new() -> Self {
		Self::with_frame(DEFAULT_FRAME.to_vec())
	}

	/// Camera whose every capture yields `frame`.
	pub fn with_frame(frame: Vec<u8>) -> Self {
		Self {
			state: Arc::new(Mutex::new(FakeState {
				frame,
				..FakeState::default()
			})),
		}
	}

	/// Makes subsequent opens fail as if permission were denied.
	pub fn deny(&self, reason: &str) {
		self.state.lock().denial = Some(reason.to_string());
	}

	/// Lets subsequent opens succeed again.
	pub fn allow(&self) {
		self.state.lock().denial = None;
	}

	/// Kills every stream handed out so far.
	pub fn unplug(&self) {
		self.state.lock().generation += 1;
	}

	/// Makes opens wait until the returned handle is notified.
	pub fn gate_open(&self) -> Arc<Notify> {
		let gate = Arc::new(Notify::new());
		self.state.lock().gate = Some(Arc::clone(&gate));
		gate
	}

	/// Streams opened and not yet stopped.
	pub fn live_streams(&self) -> usize {
		self.state.lock().live
	}

	pub fn opened(&self) -> usize {
		self.state.lock().opened
	}

	pub fn stop_calls(&self) -> usize {
		self.state.lock().stop_calls
	}

	pub fn last_constraints(&self) -> Option<VideoConstraints> {
		self.state.lock().last_constraints
	}
}

#[async_trait]
impl CameraDevice for FakeCamera {
	async fn open(&self, constraints: VideoConstraints) -> Result<Box<dyn CameraStream>, MediaError> {
		let gate = self.state.lock().gate.clone();
		if let Some(gate) = gate {
			gate.notified().await;
		}

		let mut state = self.state.lock();
		if let Some(reason) = &state.denial {
			return Err(MediaError::Unavailable(reason.clone()));
		}
		state.opened += 1;
		state.live += 1;
		state.last_constraints = Some(constraints);

		Ok(Box::new(FakeStream {
			state: Arc::clone(&self.state),
			generation: state.generation,
			stopped: false,
		}))
	}
}

struct FakeStream {
	state: Arc<Mutex<FakeState>>,
	generation: u64,
	stopped: bool,
}

#[async_trait]
impl CameraStream for FakeStream {
	fn is_live(&self) -> bool {
		!self.stopped && self.state.lock().generation == self.generation
	}

	async fn grab_jpeg(&mut self, _size: VideoConstraints) -> Result<Vec<u8>, MediaError> {
		if !self.is_live() {
			return Err(MediaError::Unavailable("stream ended".to_string()));
		}
		Ok(self.state.lock().frame.clone())
	}

	fn stop(&mut self) {
		if self.stopped {
			return;
		}
		self.stopped = true;
		let mut state = self.state.lock();
		state.stop_calls += 1;
		state.live -= 1;
	}
}
