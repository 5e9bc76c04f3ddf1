//! Store doubles for exercising failure paths of the field service.

use anyhow::anyhow;

use crate::model::{Column, Field, FieldFilter, Form, Id};
use crate::store::mem::MemoryStore;
use crate::store::traits::{ColumnStore, FieldStore, FormStore, Store, StoreError, StoreResult};

/// Every call fails as if the database were unreachable
#[derive(Debug, Default)]
pub struct UnavailableStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Other(anyhow!("connection refused")))
}

#[async_trait::async_trait]
impl FormStore for UnavailableStore {
    async fn get_form(&self, _id: &Id) -> StoreResult<Option<Form>> {
        unavailable()
    }
    async fn find_forms_by_name(&self, _name: &str) -> StoreResult<Vec<Form>> {
        unavailable()
    }
    async fn upsert_form(&self, _form: Form) -> StoreResult<()> {
        unavailable()
    }
}

#[async_trait::async_trait]
impl ColumnStore for UnavailableStore {
    async fn get_column(&self, _id: &Id) -> StoreResult<Option<Column>> {
        unavailable()
    }
    async fn upsert_column(&self, _column: Column) -> StoreResult<()> {
        unavailable()
    }
}

#[async_trait::async_trait]
impl FieldStore for UnavailableStore {
    async fn get_field(&self, _id: &Id) -> StoreResult<Option<Field>> {
        unavailable()
    }
    async fn find_fields(&self, _filter: &FieldFilter) -> StoreResult<Vec<Field>> {
        unavailable()
    }
    async fn insert_field(&self, _field: Field) -> StoreResult<()> {
        unavailable()
    }
    async fn update_field(&self, _field: &Field) -> StoreResult<()> {
        unavailable()
    }
    async fn delete_field(&self, _id: &Id) -> StoreResult<bool> {
        unavailable()
    }
}

impl Store for UnavailableStore {}

/// Wraps a `MemoryStore` and reports a conflict on every update.
/// With `remove_on_conflict` the row is deleted first, as if a concurrent
/// request had removed it between read and write.
#[derive(Debug, Default)]
pub struct ConflictingStore {
    pub inner: MemoryStore,
    pub remove_on_conflict: bool,
}

#[async_trait::async_trait]
impl FormStore for ConflictingStore {
    async fn get_form(&self, id: &Id) -> StoreResult<Option<Form>> {
        self.inner.get_form(id).await
    }
    async fn find_forms_by_name(&self, name: &str) -> StoreResult<Vec<Form>> {
        self.inner.find_forms_by_name(name).await
    }
    async fn upsert_form(&self, form: Form) -> StoreResult<()> {
        self.inner.upsert_form(form).await
    }
}

#[async_trait::async_trait]
impl ColumnStore for ConflictingStore {
    async fn get_column(&self, id: &Id) -> StoreResult<Option<Column>> {
        self.inner.get_column(id).await
    }
    async fn upsert_column(&self, column: Column) -> StoreResult<()> {
        self.inner.upsert_column(column).await
    }
}

#[async_trait::async_trait]
impl FieldStore for ConflictingStore {
    async fn get_field(&self, id: &Id) -> StoreResult<Option<Field>> {
        self.inner.get_field(id).await
    }
    async fn find_fields(&self, filter: &FieldFilter) -> StoreResult<Vec<Field>> {
        self.inner.find_fields(filter).await
    }
    async fn insert_field(&self, field: Field) -> StoreResult<()> {
        self.inner.insert_field(field).await
    }
    async fn update_field(&self, field: &Field) -> StoreResult<()> {
        if self.remove_on_conflict {
            self.inner.delete_field(&field.id).await?;
        }
        Err(StoreError::Conflict {
            id: field.id.clone(),
        })
    }
    async fn delete_field(&self, id: &Id) -> StoreResult<bool> {
        self.inner.delete_field(id).await
    }
}

impl Store for ConflictingStore {}
