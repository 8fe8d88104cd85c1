//! # Shyposts Architecture
//!
//! Shyposts is a **UI-agnostic content-flagging library**. It lets editors mark
//! individual posts as "shy" — excluded from the homepage listing while staying
//! reachable on permalinks, archives, and search. It is not a plugin file that
//! happens to have some library code: it's a library the host CMS drives
//! through a small set of typed lifecycle hooks.
//!
//! ## The Layered Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Layer (hooks.rs)                                      │
//! │  - HookRegistry: explicit registration of typed callbacks   │
//! │  - The ONLY place that knows about lifecycle event names    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (plugin.rs)                                  │
//! │  - ShyPosts<S, T>: one explicitly-constructed service       │
//! │  - Implements HostHooks by dispatching to ops               │
//! │  - Owns config, capability checker, and nonce registry      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Operation Layer (ops/*.rs)                                 │
//! │  - Pure business logic per lifecycle event                  │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, transient/)                         │
//! │  - MetaStore: the host's per-record key/value metadata      │
//! │  - TransientStore: the host's TTL-bounded cache             │
//! │  - File-backed (production) and in-memory (testing) each    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Shy-ID Index
//!
//! Rendering the homepage must not scan every post's metadata, so the set of
//! shy post IDs is kept denormalized in a long-TTL transient and updated
//! incrementally on each save. See `index.rs` for the consistency rules and
//! their limits.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `plugin.rs` inward (service, ops, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<...>`)
//! - **Never** writes to stdout/stderr
//! - **Never** assumes a web server or terminal environment
//!
//! The same core serves an embedded CMS runtime, a migration script, or a
//! test harness unchanged.
//!
//! ## Testing Strategy
//!
//! 1. **Ops** (`ops/*.rs`): thorough unit tests of the save/exclude/rebuild
//!    logic against in-memory backends. The lion's share of testing.
//! 2. **Index/query** (`index.rs`, `query.rs`): property-level tests of the
//!    cache bookkeeping and listing evaluation.
//! 3. **Hooks** (`tests/homepage_flow.rs`): end-to-end scenarios through the
//!    registry, the way a host would drive the plugin.
//!
//! ## Module Overview
//!
//! - [`plugin`]: The service object — entry point for all operations
//! - [`ops`]: Business logic for each lifecycle event
//! - [`hooks`]: Typed lifecycle events and the registration layer
//! - [`store`]: Metadata storage abstraction and implementations
//! - [`transient`]: TTL-cache abstraction and implementations
//! - [`index`]: The cached shy-ID set (load / rebuild / incremental apply)
//! - [`query`]: Listing-query model and exclusion predicates
//! - [`flag`]: The per-post flag read/write operations
//! - [`auth`]: Capability checks and single-use nonces
//! - [`ui`]: Edit-screen checkbox and nonce-field rendering
//! - [`config`]: Configuration management
//! - [`model`]: Core value types (`PostId`, `UserId`, `PostKind`)
//! - [`error`]: Error types

pub mod auth;
pub mod config;
pub mod error;
pub mod flag;
pub mod hooks;
pub mod index;
pub mod model;
pub mod ops;
pub mod plugin;
pub mod query;
pub mod store;
pub mod transient;
pub mod ui;
