//! charmask: reversible character masking
//!
//! Builds a pool of randomized substitution tables ("mapping objects") over
//! a configurable character pool and transforms text symbol by symbol
//! through a selected table. The pool is exportable and loadable, so two
//! instances sharing key material read each other's output.
//!
//! ## How it works
//!
//! 1. **Resolve**: merge options with defaults and resolve the character
//!    pool (explicit symbols, or named registry sets concatenated in order)
//! 2. **Build**: shuffle a fresh copy of the pool per mapping object and
//!    derive forward/inverse tables by mirror pairing
//! 3. **Transform**: map each symbol through the selected table; unmapped
//!    symbols pass through unchanged
//! 4. **Export/load**: the mapping-object sequence is the key material and
//!    the wire format
//!
//! This is lightweight, reversible scrambling, not security-grade
//! confidentiality. A single known plaintext/ciphertext pair reveals the
//! table.

pub mod charsets;
pub mod cipher;
pub mod config;
pub mod error;
pub mod keyfile;
pub mod mapping;
pub mod masker;

pub use cipher::Direction;
pub use config::{Options, RawOptions};
pub use error::{ConfigDiagnostic, OperationError};
pub use keyfile::KeyFile;
pub use mapping::{build_pool, build_pool_with_rng, MappingObject};
pub use masker::{CharMask, Outcome};
