//! Document gateway over MongoDB.
//!
//! Browse databases and collections, read and write single documents, page
//! through collections, and infer collection schemas from samples. Every
//! operation validates database and collection names before touching the
//! store and runs under a deadline.
//!
//! ```text
//! ┌────────────┐   ┌──────────────────────┐   ┌─────────────────┐
//! │  panel-api │──▶│ Gateway              │──▶│ DocumentStore   │
//! └────────────┘   │  CollectionService   │   │  MongoStore     │
//!                  │  DocumentService     │   │  MemoryStore    │
//!                  │  DatabaseService     │   └─────────────────┘
//!                  └──────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use db_access::{Deadlines, Gateway, MongoStore};
//! use std::sync::Arc;
//!
//! let store = MongoStore::connect("mongodb://localhost:27017").await?;
//! let gateway = Gateway::new(Arc::new(store), Deadlines::default());
//! let detection = gateway.collections.detect_schema("shop", "orders").await?;
//! ```

pub mod deadline;
pub mod error;
pub mod id;
pub mod models;
pub mod names;
pub mod pagination;
pub mod payload;
pub mod services;
pub mod store;

pub use deadline::{with_deadline, Deadlines};
pub use error::StoreError;
pub use id::DocumentId;
pub use models::*;
pub use pagination::Page;
pub use services::{CollectionService, DatabaseService, DocumentService, Gateway};
pub use store::{shared_client, DocumentStore, MemoryStore, MongoStore, UpdateCounts};
