//! Gateway services: name checks, deadlines and response shaping around a
//! [`DocumentStore`].

mod collections;
mod databases;
mod documents;

pub use collections::{CollectionService, ANALYSIS_SAMPLE_SIZE, SCHEMA_SAMPLE_SIZE};
pub use databases::DatabaseService;
pub use documents::DocumentService;

use crate::deadline::Deadlines;
use crate::error::StoreError;
use crate::store::DocumentStore;
use panel_core::ServiceError;
use std::sync::Arc;

/// The three gateway services sharing one store.
#[derive(Clone)]
pub struct Gateway {
    pub collections: CollectionService,
    pub documents: DocumentService,
    pub databases: DatabaseService,
}

impl Gateway {
    pub fn new(store: Arc<dyn DocumentStore>, deadlines: Deadlines) -> Self {
        Self {
            collections: CollectionService::new(store.clone(), deadlines),
            documents: DocumentService::new(store.clone(), deadlines),
            databases: DatabaseService::new(store, deadlines),
        }
    }
}

/// Prefix a store failure with what was being attempted.
fn backend(context: &'static str) -> impl FnOnce(StoreError) -> ServiceError {
    move |err| ServiceError::backend(format!("{context}: {err}"))
}
