//! # Postbook Architecture
//!
//! Postbook edits one JSON document of **sections → posts → parameters / code
//! blocks**, taking a timestamped backup of the file before every write. The
//! library owns the document and its persistence; the `postbook` binary is one
//! console client on top of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, drives the menus, handles terminal I/O │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - PostbookApi: owns the in-memory Document                 │
//! │  - Runs commands on a draft, then backup → write → reload   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validated mutations and listings on a Document           │
//! │  - No I/O whatsoever                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait                                     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Shape
//!
//! ```json
//! {
//!     "basics": {
//!         "name": "Basics",
//!         "id": "basics",
//!         "content": {
//!             "intro": {
//!                 "title": "Intro",
//!                 "id": "intro",
//!                 "explanation": "What this post covers",
//!                 "parameters": [{ "name": "x", "description": "an integer" }],
//!                 "code": [{ "language": "rust", "content": "let x = 1;" }]
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! Section and post ids always equal the key they are stored under; renaming an
//! id moves the entry to the new key in the same write.
//!
//! ## Failure Model
//!
//! A call either fully succeeds (mutated, backed up, written, reloaded) or returns
//! an [`error::PostbookError`] with the document untouched. Files are replaced by
//! atomic rename, so a failed write never truncates the previous document.
//!
//! ## Module Overview
//!
//! - [`api`]: The document store facade, entry point for all operations
//! - [`commands`]: Mutation and listing logic
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Typed records (`Document`, `Section`, `Post`, ...)
//! - [`ids`]: Id and required-field validation
//! - [`workspace`]: Listing and creating documents in a docs directory
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod store;
pub mod workspace;
