//! # Core Module
//!
//! Shared-ownership primitives used by the session, the pending batch tasks and
//! the player wrappers.
//!
//! The add-on runs on a single, tick-driven thread, so everything here is built on
//! `Rc` rather than `Arc`. The only type exposed is [`StResource`], a cloneable
//! handle to a value guarded by a `RwLock`.
//!
//! ## Usage
//! ```rust
//! use mass_break::core::StResource;
//!
//! let counter = StResource::new(0);
//! let handle = counter.clone();
//! *handle.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod st_resource;

pub use st_resource::StResource;
