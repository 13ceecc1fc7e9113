//! Domain layer: the event record entity, its identifier, and the
//! change-notification system.
//!
//! This module contains the canonical data model. Persistence backends
//! and the REST layer translate to their own formats at their own
//! boundaries; nothing outside this module redefines the field set.

pub mod change_feed;
pub mod event_id;
pub mod event_record;
pub mod store_change;

pub use change_feed::ChangeFeed;
pub use event_id::EventId;
pub use event_record::{EventDraft, EventKind, EventRecord, partition_upcoming};
pub use store_change::StoreChange;
