pub mod backend;
pub mod board;
pub mod cases;
pub mod connectivity;
mod controller;
pub mod conversation;
pub mod error;
pub mod events;
pub mod state;
pub mod timeline;
pub mod trace;

pub use backend::{CaseBackend, HttpBackend, UploadFile};
pub use board::{EvidenceBoard, EvidenceSnippet, BOARD_CAPACITY};
pub use cases::{ActiveView, CaseRegistry, StalePolicy};
pub use connectivity::ConnectivityStatus;
pub use controller::{
    SessionController, SessionOptions, DEFAULT_GREETING, INGEST_CONFIRMATION,
};
pub use conversation::{ConversationSession, Delivery, Message, FALLBACK_REPLY};
pub use error::{ClientError, Operation};
pub use events::{Applied, SessionEvent};
pub use state::SessionState;
pub use timeline::{TimelineEntry, TimelineView};
pub use trace::{GraphNode, NodePlacement, TraceGraph};
