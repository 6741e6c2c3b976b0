//! # Named Singleton
//!
//! A thread-safe container that stores shared values under string names and hands
//! them back later.
//!
//! There are two ways to get a [`Registry`]:
//!
//! - [`shared`] returns the one process-wide registry, created lazily on first use.
//! - [`scoped`] returns a brand-new, isolated registry owned by the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use named_singleton::{scoped, RegistryError};
//!
//! struct Database {
//!     url: String,
//! }
//!
//! let registry = scoped();
//! registry.remember(|| Database { url: "postgres://localhost".into() }, "db", false)?;
//!
//! // By name
//! let db = registry.make_as::<Database>("db")?.unwrap();
//! assert_eq!(db.url, "postgres://localhost");
//!
//! // Unknown names are absent, not an error
//! assert!(registry.make("cache")?.is_none());
//! # Ok::<(), RegistryError>(())
//! ```
//!
//! ## Names
//!
//! - An empty name passed to `remember` means "use the type name of the value".
//! - An empty name passed to `make` means "use the name that was remembered last".
//!   That fallback is consumed by the next successful lookup.
//! - Names are stored as SHA-256 digests ([`Key`]); the registry never keeps the
//!   original strings as map keys.
//!
//! ## Main Functions
//!
//! - [`Registry::remember`] / [`Registry::remember_arc`] - store a value
//! - [`Registry::make`] / [`Registry::make_as`] - retrieve a value
//! - [`Registry::contains`] - check a name without touching the fallback
//! - [`Registry::set_trace_callback`] - observe registry operations
//! - [`define_registry!`] - declare additional process-wide registries

mod key;
mod macros;
mod registry;
mod registry_error;
mod registry_event;

pub use key::Key;
pub use registry::{Instance, Registry};
pub use registry_error::RegistryError;
pub use registry_event::{RegistryEvent, TraceCallback};

/// The process-wide registry. Shorthand for [`Registry::shared`].
pub fn shared() -> &'static Registry {
    Registry::shared()
}

/// A fresh, isolated registry. Shorthand for [`Registry::scoped`].
pub fn scoped() -> Registry {
    Registry::scoped()
}
