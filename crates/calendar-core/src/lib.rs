//! Calendar engine shared by the backend, the CLI and the browser client.
//!
//! - [`grid`]: which days each view shows
//! - [`index`]: which events fall on each day
//! - [`collection`]: optimistic local mutations with rollback
//! - [`state`]: the UI state store
//! - [`api`]: wire types for the HTTP API

pub mod api;
pub mod collection;
pub mod dates;
pub mod event;
pub mod grid;
pub mod index;
pub mod state;

pub use collection::{CollectionError, EventCollection, MutationId, StoreAck, StoreCommand};
pub use event::{CalendarEvent, EventDraft, DEFAULT_COLOR, PALETTE};
pub use grid::{CalendarCell, Direction, ViewMode};
pub use index::{DayBucket, MONTH_CELL_LIMIT};
pub use state::{Action, CalendarState, Modal};
