//! Domain model for persisted timeline records.
//!
//! # Responsibility
//! - Define the canonical timeline event shape shared by import and storage.
//! - Keep serialization aligned with the persisted JSON schema.
//!
//! # Invariants
//! - Every persisted event carries a non-empty `date`, `dateParsed.date` and
//!   a closed `type` value.
//! - Events are identified by integer ids derived from source timestamps.

pub mod event;
