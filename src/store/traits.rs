use crate::model::{Column, Field, FieldFilter, Form, Id};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record changed or vanished between read and write
    #[error("record '{id}' was modified or removed concurrently")]
    Conflict { id: Id },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to forms; writes exist only for seeding
#[async_trait::async_trait]
pub trait FormStore: Send + Sync {
    async fn get_form(&self, id: &Id) -> StoreResult<Option<Form>>;
    /// All forms with exactly this name (names are not unique)
    async fn find_forms_by_name(&self, name: &str) -> StoreResult<Vec<Form>>;
    async fn upsert_form(&self, form: Form) -> StoreResult<()>;
}

#[async_trait::async_trait]
pub trait ColumnStore: Send + Sync {
    async fn get_column(&self, id: &Id) -> StoreResult<Option<Column>>;
    async fn upsert_column(&self, column: Column) -> StoreResult<()>;
}

#[async_trait::async_trait]
pub trait FieldStore: Send + Sync {
    async fn get_field(&self, id: &Id) -> StoreResult<Option<Field>>;
    async fn find_fields(&self, filter: &FieldFilter) -> StoreResult<Vec<Field>>;
    async fn insert_field(&self, field: Field) -> StoreResult<()>;
    /// Replace a stored field; `StoreError::Conflict` if no row was updated
    async fn update_field(&self, field: &Field) -> StoreResult<()>;
    /// Returns false when nothing was deleted
    async fn delete_field(&self, id: &Id) -> StoreResult<bool>;
}

pub trait Store: FormStore + ColumnStore + FieldStore + Send + Sync {}
