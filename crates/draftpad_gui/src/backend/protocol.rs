//! Protocol types for the GUI backend worker.

use draftpad_core::models::post::{Post, UpdatePostRequest};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Abort handle for an in-flight capability fetch.
///
/// The issuing panel keeps one clone and the worker receives another.
/// Aborting is cooperative: the worker drops replies for cancelled tickets,
/// and the panel ignores events whose request id no longer matches.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl FetchTicket {
    /// Allocate a ticket with a process-unique request id.
    pub fn new() -> Self {
        Self {
            id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The request id carried back by the matching completion event.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Mark the request as aborted. Idempotent.
    pub fn abort(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether the request has been aborted.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for FetchTicket {
    fn default() -> Self {
        Self::new()
    }
}

/// Commands issued by the UI thread for the backend worker to execute.
#[derive(Debug)]
pub enum CoreCmd {
    /// Probe a post type's capability map in the `edit` context.
    FetchTypeSupports { slug: String, request: FetchTicket },
    /// Load a single post by id for editing.
    LoadPost { id: String },
    /// Persist a partial update for an existing post.
    SavePost { id: String, update: UpdatePostRequest },
}

/// Events produced by the backend worker and polled by the UI thread.
#[derive(Debug)]
pub enum CoreEvent {
    /// Capability probe result for a post type.
    ///
    /// Only sent for completed, non-aborted probes; failed probes produce no
    /// event at all and the requesting panel stays hidden.
    TypeSupportsLoaded {
        slug: String,
        request_id: u64,
        supports_page_attributes: bool,
    },
    /// Response containing the requested post payload.
    PostLoaded { post: Post },
    /// Response confirming a post was updated.
    PostSaved { post: Post },
    /// The requested post id does not exist on the server.
    PostMissing { id: String },
    /// A backend failure occurred (HTTP error, decode error).
    Error { message: String },
}
