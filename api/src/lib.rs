//! Backend contract for Mood Tracker plus an in-process implementation.
//!
//! The UI only talks to [`Backend`]; storage, sessions and ids are the
//! backend's business. [`MemoryBackend`] keeps everything in memory and
//! backs the apps during development and the test suites.

mod backend;
mod error;
mod memory;
pub mod record;

pub use backend::{AuthCallback, Backend, ListenerId};
pub use error::BackendError;
pub use memory::MemoryBackend;
pub use record::{DailyRecord, EntryFilter, Medication, Metric, Slice, User};
