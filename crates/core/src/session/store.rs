//! The single source of truth for "is the user signed in".

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::storage::{KeyValueStore, MemoryStorage};

/// Fixed storage key of the persisted token.
pub const TOKEN_KEY: &str = "token";

/// Opaque bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Arc<str>);

impl SessionToken {
	/// Wraps `raw`; blank strings are not tokens.
	pub fn new(raw: impl AsRef<str>) -> Option<Self> {
		let raw = raw.as_ref().trim();
		(!raw.is_empty()).then(|| Self(Arc::from(raw)))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SessionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SessionToken(<{} chars>)", self.0.len())
	}
}

struct Inner {
	tx: watch::Sender<Option<SessionToken>>,
	storage: Arc<dyn KeyValueStore>,
}

/// Process-wide session holder.
///
/// Clones share state: a `set` or `clear` through any clone is visible to
/// every other clone and subscriber before the call returns. Persistence is
/// best-effort and never leaves the in-memory value half-updated.
#[derive(Clone)]
pub struct SessionStore {
	inner: Arc<Inner>,
}

impl SessionStore {
	/// Empty store backed by `storage`; does not read it.
	pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
		let (tx, _rx) = watch::channel(None);
		Self {
			inner: Arc::new(Inner { tx, storage }),
		}
	}

	/// Store with no persistence beyond the process.
	pub fn in_memory() -> Self {
		Self::new(Arc::new(MemoryStorage::new()))
	}

	/// Startup path: adopts a persisted token, or clears an absent/invalid one.
	pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
		let store = Self::new(storage);
		let persisted = match store.inner.storage.get(TOKEN_KEY) {
			Ok(value) => value.and_then(SessionToken::new),
			Err(err) => {
				warn!(target = "attend.session", error = %err, "failed to read persisted session");
				None
			}
		};

		match persisted {
			Some(token) => {
				debug!(target = "attend.session", "restored persisted session");
				store.inner.tx.send_replace(Some(token));
			}
			None => {
				store.clear();
			}
		}
		store
	}

	/// Makes `token` the current session and persists it.
	pub fn set(&self, token: SessionToken) {
		if let Err(err) = self.inner.storage.set(TOKEN_KEY, token.as_str()) {
			warn!(target = "attend.session", error = %err, "failed to persist session token");
		}
		self.inner.tx.send_replace(Some(token));
		info!(target = "attend.session", "session established");
	}

	/// Drops the current session. Returns whether one was present.
	pub fn clear(&self) -> bool {
		let previous = self.inner.tx.send_replace(None);
		if let Err(err) = self.inner.storage.remove(TOKEN_KEY) {
			warn!(target = "attend.session", error = %err, "failed to remove persisted session token");
		}
		if previous.is_some() {
			info!(target = "attend.session", "session cleared");
		}
		previous.is_some()
	}

	pub fn current(&self) -> Option<SessionToken> {
		self.inner.tx.borrow().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.inner.tx.borrow().is_some()
	}

	/// Change feed for consumers that react to sign-in/sign-out.
	pub fn subscribe(&self) -> watch::Receiver<Option<SessionToken>> {
		self.inner.tx.subscribe()
	}
}

impl fmt::Debug for SessionStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionStore")
			.field("authenticated", &self.is_authenticated())
			.finish()
	}
}
