//! Browser history boundary
//!
//! The navigation state never depends on the platform's history: writes are
//! best-effort and back/forward arrives through pop listeners. [`History`]
//! is the narrow seam; [`MemoryHistory`], [`DisallowedHistory`] and
//! [`NoopHistory`] are the in-process implementations.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

/// Callback fired with the new location after a back/forward move
pub type PopListener = Box<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`History::add_pop_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Lets other [`History`] implementations mint their own handles
impl From<u64> for ListenerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    /// The embedding context forbids history manipulation
    #[error("history manipulation disallowed: {0}")]
    Disallowed(String),
    /// No platform history exists
    #[error("history unavailable")]
    Unavailable,
}

/// Platform address-bar and back/forward integration
pub trait History: Send + Sync {
    /// Current platform path; may be empty
    fn location(&self) -> Result<String, HistoryError>;

    /// Records `path` as a new history entry
    fn push_state(&self, path: &str) -> Result<(), HistoryError>;

    fn add_pop_listener(&self, listener: PopListener) -> Result<ListenerId, HistoryError>;

    fn remove_pop_listener(&self, id: ListenerId);
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Arc<dyn Fn(&str) + Send + Sync>)>,
}

impl Listeners {
    fn add(&mut self, listener: PopListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Arc::from(listener)));
        id
    }

    fn remove(&mut self, id: ListenerId) {
        self.entries.retain(|(existing, _)| *existing != id);
    }

    fn snapshot(&self) -> Vec<Arc<dyn Fn(&str) + Send + Sync>> {
        self.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

struct Stack {
    entries: Vec<String>,
    cursor: usize,
    listeners: Listeners,
}

/// In-process back/forward stack
///
/// `back()` and `forward()` play the role of the browser buttons: they move
/// the cursor and notify pop listeners. Listeners run after the internal
/// lock is released, so they may read [`History::location`].
///
/// ```
/// use planscope::history::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push_state("/pricing").unwrap();
/// assert!(history.back());
/// assert_eq!(history.location().unwrap(), "/");
/// ```
pub struct MemoryHistory {
    stack: Mutex<Stack>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial.to_string()],
                cursor: 0,
                listeners: Listeners::default(),
            }),
        }
    }

    /// Moves one entry back; false when already at the oldest entry
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Moves one entry forward; false when already at the newest entry
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    /// Number of entries in the stack
    pub fn len(&self) -> usize {
        self.stack.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.lock().entries.is_empty()
    }

    /// Currently installed pop listeners
    pub fn listener_count(&self) -> usize {
        self.stack.lock().listeners.entries.len()
    }

    fn traverse(&self, delta: isize) -> bool {
        let (location, listeners) = {
            let mut stack = self.stack.lock();
            let Some(target) = stack.cursor.checked_add_signed(delta) else {
                return false;
            };
            if target >= stack.entries.len() {
                return false;
            }
            stack.cursor = target;
            (stack.entries[target].clone(), stack.listeners.snapshot())
        };

        debug!(%location, listeners = listeners.len(), "history traversal");
        for listener in listeners {
            listener(&location);
        }
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Result<String, HistoryError> {
        let stack = self.stack.lock();
        Ok(stack.entries[stack.cursor].clone())
    }

    fn push_state(&self, path: &str) -> Result<(), HistoryError> {
        let mut stack = self.stack.lock();
        let keep = stack.cursor + 1;
        stack.entries.truncate(keep);
        stack.entries.push(path.to_string());
        stack.cursor = keep;
        Ok(())
    }

    fn add_pop_listener(&self, listener: PopListener) -> Result<ListenerId, HistoryError> {
        Ok(self.stack.lock().listeners.add(listener))
    }

    fn remove_pop_listener(&self, id: ListenerId) {
        self.stack.lock().listeners.remove(id);
    }
}

/// History for a sandboxed embedding: every write is rejected
///
/// Listener registration succeeds but no event is ever delivered.
#[derive(Default)]
pub struct DisallowedHistory {
    listeners: Mutex<Listeners>,
}

impl DisallowedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }
}

impl History for DisallowedHistory {
    fn location(&self) -> Result<String, HistoryError> {
        Err(HistoryError::Unavailable)
    }

    fn push_state(&self, _path: &str) -> Result<(), HistoryError> {
        Err(HistoryError::Disallowed(
            "pushState is not permitted in this frame".to_string(),
        ))
    }

    fn add_pop_listener(&self, listener: PopListener) -> Result<ListenerId, HistoryError> {
        Ok(self.listeners.lock().add(listener))
    }

    fn remove_pop_listener(&self, id: ListenerId) {
        self.listeners.lock().remove(id);
    }
}

/// Accepts every call and remembers nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHistory;

impl History for NoopHistory {
    fn location(&self) -> Result<String, HistoryError> {
        Ok("/".to_string())
    }

    fn push_state(&self, _path: &str) -> Result<(), HistoryError> {
        Ok(())
    }

    fn add_pop_listener(&self, _listener: PopListener) -> Result<ListenerId, HistoryError> {
        Ok(ListenerId(0))
    }

    fn remove_pop_listener(&self, _id: ListenerId) {}
}
