//! Sync Mediator — engine edits to remote persistence calls.
//!
//! The timeline engine raises create/update/delete callbacks for two entity
//! kinds, tasks and links. The mediator maps each edit onto the remote field
//! names, issues exactly one store call, and hands the outcome back. No
//! retries, no rollback: a failed call surfaces to the engine, which owns any
//! optimistic local state, and a full refresh is the correction mechanism.
//!
//! Create returns a uniform ack pairing the engine's temporary id with the
//! permanent id the store assigned, so the engine can remap either entity
//! kind the same way.

use crate::error::{ErrorCode, GanttError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Remote entity kinds the mediator persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Task,
    Link,
}

impl EntityKind {
    /// Remote type tag used by the persistence API.
    pub fn api_name(&self) -> &'static str {
        match self {
            EntityKind::Task => "Project_Task",
            EntityKind::Link => "Gantt_Link",
        }
    }
}

/// A task edit as the engine hands it to the mediator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEdit {
    pub text: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub parent: Option<String>,
    pub progress: Option<f64>,
}

/// A link edit as the engine hands it to the mediator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEdit {
    pub source: String,
    pub target: String,
    pub link_type: String,
}

/// Remote field payload for a task, in the store's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskFields {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Start_Date")]
    start_date: NaiveDate,
    #[serde(rename = "Current_Due_Date")]
    current_due_date: NaiveDate,
    #[serde(rename = "Parent", skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(rename = "Progress", skip_serializing_if = "Option::is_none")]
    progress: Option<f64>,
}

/// Remote field payload for a link, in the store's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinkFields {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Target")]
    target: String,
    #[serde(rename = "Type")]
    link_type: String,
}

impl TaskEdit {
    /// Create payload: all fields, progress passed through when present.
    fn create_fields(&self) -> TaskFields {
        TaskFields {
            name: self.text.clone(),
            start_date: self.start_date,
            current_due_date: self.end_date,
            parent: self.parent.clone(),
            progress: self.progress,
        }
    }

    /// Update payload: no progress, and the parent always present as a
    /// string (a reparent to top level sends an empty parent).
    fn update_fields(&self) -> TaskFields {
        TaskFields {
            name: self.text.clone(),
            start_date: self.start_date,
            current_due_date: self.end_date,
            parent: Some(self.parent.clone().unwrap_or_default()),
            progress: None,
        }
    }
}

impl LinkEdit {
    fn fields(&self) -> LinkFields {
        LinkFields {
            source: self.source.clone(),
            target: self.target.clone(),
            link_type: self.link_type.clone(),
        }
    }
}

/// Outcome of a successful create: the engine's temporary id paired with the
/// permanent id the store assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAck {
    pub local_id: String,
    pub record_id: String,
}

/// Persistence operations against the remote record store.
///
/// Field payloads arrive already mapped to remote field names. Each call
/// settles exactly once with success or failure; timeouts belong to the
/// transport behind the implementation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a record, returning its permanent id.
    async fn create_record(&self, entity: EntityKind, fields: serde_json::Value)
        -> Result<String>;

    /// Update a record keyed by its permanent id.
    async fn update_record(
        &self,
        entity: EntityKind,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<()>;

    /// Delete a record keyed by its permanent id.
    async fn delete_record(&self, entity: EntityKind, id: &str) -> Result<()>;
}

/// Adapts engine CRUD callbacks to `RecordStore` calls.
///
/// Operations are independent and unordered; callers needing ordering
/// serialize themselves.
pub struct SyncMediator<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> SyncMediator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a newly drawn task. `local_id` is the engine's temporary id;
    /// the ack carries the permanent id to swap in.
    pub async fn create_task(&self, local_id: &str, edit: &TaskEdit) -> Result<CreateAck> {
        let fields = serde_json::to_value(edit.create_fields())?;
        let record_id = self.store.create_record(EntityKind::Task, fields).await?;
        Ok(CreateAck {
            local_id: local_id.to_string(),
            record_id,
        })
    }

    /// Persist a task edit keyed by the permanent id.
    pub async fn update_task(&self, id: &str, edit: &TaskEdit) -> Result<()> {
        let fields = serde_json::to_value(edit.update_fields())?;
        self.store.update_record(EntityKind::Task, id, fields).await
    }

    /// Delete a task keyed by the permanent id.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.store.delete_record(EntityKind::Task, id).await
    }

    /// Persist a newly drawn link.
    pub async fn create_link(&self, local_id: &str, edit: &LinkEdit) -> Result<CreateAck> {
        let fields = serde_json::to_value(edit.fields())?;
        let record_id = self.store.create_record(EntityKind::Link, fields).await?;
        Ok(CreateAck {
            local_id: local_id.to_string(),
            record_id,
        })
    }

    /// Persist a link edit keyed by the permanent id.
    pub async fn update_link(&self, id: &str, edit: &LinkEdit) -> Result<()> {
        let fields = serde_json::to_value(edit.fields())?;
        self.store.update_record(EntityKind::Link, id, fields).await
    }

    /// Delete a link keyed by the permanent id.
    pub async fn delete_link(&self, id: &str) -> Result<()> {
        self.store.delete_record(EntityKind::Link, id).await
    }
}

/// In-memory record store for tests and demos.
///
/// Assigns sequential permanent ids and keeps the raw field payloads, so
/// tests can assert exactly what reached the store.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    inner: Arc<Mutex<InMemoryInner>>,
}

#[derive(Default)]
struct InMemoryInner {
    records: HashMap<String, (EntityKind, serde_json::Value)>,
    next_id: u32,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored record's field payload.
    pub async fn record(&self, id: &str) -> Option<serde_json::Value> {
        self.inner
            .lock()
            .await
            .records
            .get(id)
            .map(|(_, fields)| fields.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_record(
        &self,
        entity: EntityKind,
        fields: serde_json::Value,
    ) -> Result<String> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = format!("rec-{:04}", inner.next_id);
        inner.records.insert(id.clone(), (entity, fields));
        Ok(id)
    }

    async fn update_record(
        &self,
        entity: EntityKind,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<()> {
        let mut inner = self.inner.lock().await;
        match inner.records.get_mut(id) {
            Some(slot) => {
                *slot = (entity, fields);
                Ok(())
            }
            None => Err(GanttError::new(
                ErrorCode::RecordNotFound,
                format!("no {} record {}", entity.api_name(), id),
            )),
        }
    }

    async fn delete_record(&self, entity: EntityKind, id: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        match inner.records.remove(id) {
            Some(_) => Ok(()),
            None => Err(GanttError::new(
                ErrorCode::RecordNotFound,
                format!("no {} record {}", entity.api_name(), id),
            )),
        }
    }
}
