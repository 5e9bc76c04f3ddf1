use anyhow::anyhow;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{Column, Field, FieldFilter, Form, Id};
use crate::store::traits::{ColumnStore, FieldStore, FormStore, Store, StoreError, StoreResult};

/// In-process record store used by tests and local demos.
///
/// Forms and fields keep insertion order so lookups return rows in the order
/// they were written, matching what a single-table scan would give.
#[derive(Debug, Default)]
pub struct MemoryStore {
    forms: RwLock<Vec<Form>>,
    columns: RwLock<HashMap<Id, Column>>,
    fields: RwLock<Vec<Field>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_count(&self) -> usize {
        self.fields.read().len()
    }
}

#[async_trait::async_trait]
impl FormStore for MemoryStore {
    async fn get_form(&self, id: &Id) -> StoreResult<Option<Form>> {
        Ok(self.forms.read().iter().find(|f| &f.id == id).cloned())
    }

    async fn find_forms_by_name(&self, name: &str) -> StoreResult<Vec<Form>> {
        Ok(self
            .forms
            .read()
            .iter()
            .filter(|f| f.name == name)
            .cloned()
            .collect())
    }

    async fn upsert_form(&self, form: Form) -> StoreResult<()> {
        let mut forms = self.forms.write();
        match forms.iter_mut().find(|f| f.id == form.id) {
            Some(existing) => *existing = form,
            None => forms.push(form),
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ColumnStore for MemoryStore {
    async fn get_column(&self, id: &Id) -> StoreResult<Option<Column>> {
        Ok(self.columns.read().get(id).cloned())
    }

    async fn upsert_column(&self, column: Column) -> StoreResult<()> {
        self.columns.write().insert(column.id.clone(), column);
        Ok(())
    }
}

#[async_trait::async_trait]
impl FieldStore for MemoryStore {
    async fn get_field(&self, id: &Id) -> StoreResult<Option<Field>> {
        Ok(self.fields.read().iter().find(|f| &f.id == id).cloned())
    }

    async fn find_fields(&self, filter: &FieldFilter) -> StoreResult<Vec<Field>> {
        Ok(self
            .fields
            .read()
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect())
    }

    async fn insert_field(&self, field: Field) -> StoreResult<()> {
        let mut fields = self.fields.write();
        if fields.iter().any(|f| f.id == field.id) {
            return Err(StoreError::Other(anyhow!(
                "duplicate key: field '{}' already exists",
                field.id
            )));
        }
        fields.push(field);
        Ok(())
    }

    async fn update_field(&self, field: &Field) -> StoreResult<()> {
        let mut fields = self.fields.write();
        match fields.iter_mut().find(|f| f.id == field.id) {
            Some(existing) => {
                *existing = field.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict {
                id: field.id.clone(),
            }),
        }
    }

    async fn delete_field(&self, id: &Id) -> StoreResult<bool> {
        let mut fields = self.fields.write();
        let before = fields.len();
        fields.retain(|f| &f.id != id);
        Ok(fields.len() < before)
    }
}

impl Store for MemoryStore {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldAttributes;

    fn field(id: &str, form_id: &str, field_type: &str) -> Field {
        Field {
            id: id.to_string(),
            form_id: form_id.to_string(),
            column_id: "column-1".to_string(),
            attributes: FieldAttributes {
                field_type: Some(field_type.to_string()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_find_fields_by_predicate() {
        let store = MemoryStore::new();
        store.insert_field(field("a", "form-1", "text")).await.unwrap();
        store.insert_field(field("b", "form-2", "text")).await.unwrap();
        store.insert_field(field("c", "form-1", "date")).await.unwrap();

        let text = store
            .find_fields(&FieldFilter::Type("text".to_string()))
            .await
            .unwrap();
        assert_eq!(text.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);

        let form_1 = store
            .find_fields(&FieldFilter::FormId("form-1".to_string()))
            .await
            .unwrap();
        assert_eq!(form_1.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_update_missing_field_reports_conflict() {
        let store = MemoryStore::new();
        let result = store.update_field(&field("ghost", "form-1", "text")).await;

        assert!(matches!(result, Err(StoreError::Conflict { id }) if id == "ghost"));
        assert_eq!(store.field_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        store.insert_field(field("a", "form-1", "text")).await.unwrap();

        let result = store.insert_field(field("a", "form-1", "text")).await;
        assert!(matches!(result, Err(StoreError::Other(_))));
        assert_eq!(store.field_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let store = MemoryStore::new();
        store.insert_field(field("a", "form-1", "text")).await.unwrap();

        assert!(store.delete_field(&"a".to_string()).await.unwrap());
        assert!(!store.delete_field(&"a".to_string()).await.unwrap());
        assert!(store.get_field(&"a".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forms_with_shared_name() {
        let store = MemoryStore::new();
        store
            .upsert_form(Form::new_with_id("f1".to_string(), "Quote".to_string()))
            .await
            .unwrap();
        store
            .upsert_form(Form::new_with_id("f2".to_string(), "Quote".to_string()))
            .await
            .unwrap();
        store
            .upsert_form(Form::new_with_id("f1".to_string(), "Quote".to_string()))
            .await
            .unwrap();

        let forms = store.find_forms_by_name("Quote").await.unwrap();
        assert_eq!(forms.len(), 2);
        assert!(store.find_forms_by_name("quote").await.unwrap().is_empty());
    }
}
