//! Student records, the record store façade, statistics and
//! text interchange.
//!
//! This crate defines the data model and the persistence contract that the
//! backends in `roster-backends` implement, plus the pure functions the CLI
//! uses to summarize and exchange a roster.

pub mod backend;
pub mod error;
pub mod interchange;
pub mod model;
pub mod report;
pub mod statistics;
pub mod store;

pub use backend::{IdUniqueness, PersistenceBackend};
pub use error::{InterchangeError, StoreError};
pub use model::Student;
pub use store::RecordStore;
