use crate::logic::error::{FieldError, StoreResultExt};
use crate::model::{Field, FieldFilter, FieldUpdate, FieldWithFormName, Id, NewField};
use crate::store::{ColumnStore, FieldStore, FormStore, Store, StoreError};

/// Lookups and mutations of fields against a record store.
///
/// Every operation is a single request/response; the service holds no state
/// of its own between calls.
pub struct FieldService<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> FieldService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All fields whose type equals `field_type`
    pub async fn list_by_type(&self, field_type: &str) -> Result<Vec<Field>, FieldError> {
        let fields = self
            .store
            .find_fields(&FieldFilter::Type(field_type.to_string()))
            .await
            .or_internal(|| format!("Error occurred while getting fields of type '{}'", field_type))?;

        if fields.is_empty() {
            return Err(FieldError::NotFound(format!(
                "Fields with type '{}' was not found",
                field_type
            )));
        }

        Ok(fields)
    }

    /// Fields of every form called `form_name`, concatenated in form order
    pub async fn list_by_form_name(&self, form_name: &str) -> Result<Vec<Field>, FieldError> {
        let context = || format!("Error occurred while getting fields with form name '{}'", form_name);

        let forms = self
            .store
            .find_forms_by_name(form_name)
            .await
            .or_internal(context)?;

        if forms.is_empty() {
            return Err(FieldError::NotFound(format!(
                "Form with Name '{}' was not found",
                form_name
            )));
        }
        if forms.len() > 1 {
            log::debug!(
                "Form name '{}' matches {} forms; aggregating their fields",
                form_name,
                forms.len()
            );
        }

        let mut all_fields = Vec::new();
        for form in &forms {
            let fields = self
                .store
                .find_fields(&FieldFilter::FormId(form.id.clone()))
                .await
                .or_internal(context)?;
            all_fields.extend(fields);
        }

        if all_fields.is_empty() {
            return Err(FieldError::NotFound(format!(
                "Fields with Form Name '{}' was not found",
                form_name
            )));
        }

        Ok(all_fields)
    }

    /// Fields of one form, each paired with that form's name
    pub async fn list_by_form_id(&self, form_id: &Id) -> Result<Vec<FieldWithFormName>, FieldError> {
        let context = || format!("Error occurred while getting fields of form id '{}'", form_id);

        let form = self.store.get_form(form_id).await.or_internal(context)?;
        let fields = self
            .store
            .find_fields(&FieldFilter::FormId(form_id.clone()))
            .await
            .or_internal(context)?;

        match form {
            Some(form) if !fields.is_empty() => Ok(fields
                .into_iter()
                .map(|field| FieldWithFormName {
                    field,
                    form_name: form.name.clone(),
                })
                .collect()),
            _ => Err(FieldError::NotFound(format!(
                "Fields or Form with Form Id '{}' was not found",
                form_id
            ))),
        }
    }

    /// Coalesce `update` into the stored field and persist it.
    ///
    /// A store conflict is re-checked against existence: a vanished record is
    /// reported as not found, anything else as `FieldError::Conflict`. There is
    /// no retry.
    pub async fn update_by_id(&self, field_id: &Id, update: FieldUpdate) -> Result<Field, FieldError> {
        let context = || format!("Error occurred while updating field with Id '{}'", field_id);
        let not_found = || FieldError::NotFound(format!("Field with Id '{}' was not found.", field_id));

        let mut field = self
            .store
            .get_field(field_id)
            .await
            .or_internal(context)?
            .ok_or_else(not_found)?;

        field.apply_update(update);

        match self.store.update_field(&field).await {
            Ok(()) => {
                log::info!("Updated field '{}'", field.id);
                Ok(field)
            }
            Err(StoreError::Conflict { .. }) => {
                let still_exists = self
                    .store
                    .get_field(field_id)
                    .await
                    .or_internal(context)?
                    .is_some();

                if still_exists {
                    log::warn!("Concurrent modification of field '{}'", field_id);
                    Err(FieldError::Conflict {
                        id: field_id.clone(),
                    })
                } else {
                    Err(not_found())
                }
            }
            Err(source) => Err(FieldError::Internal {
                message: context(),
                source,
            }),
        }
    }

    /// Create a field under the first form called `form_name`
    pub async fn add_to_form(&self, form_name: &str, new_field: NewField) -> Result<Field, FieldError> {
        let context = || format!("Error occurred while adding field to form '{}'", form_name);

        let column_id = new_field
            .column_id
            .clone()
            .ok_or_else(|| FieldError::Validation("ColumnId is required".to_string()))?;

        let form = self
            .store
            .find_forms_by_name(form_name)
            .await
            .or_internal(context)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                FieldError::NotFound(format!("Form with Name '{}' was not found", form_name))
            })?;

        let column = self
            .store
            .get_column(&column_id)
            .await
            .or_internal(context)?
            .ok_or_else(|| FieldError::NotFound(format!("ColumnId '{}' was not found", column_id)))?;

        let field = Field::from_new(new_field, &form, &column);
        self.store
            .insert_field(field.clone())
            .await
            .or_internal(context)?;

        log::info!("Added field '{}' to form '{}' ({})", field.id, form.name, form.id);
        Ok(field)
    }

    /// Remove a field and return what was stored
    pub async fn delete_by_id(&self, field_id: &Id) -> Result<Field, FieldError> {
        let context = || format!("Error occurred while deleting field with Id '{}'", field_id);
        let not_found = || FieldError::NotFound(format!("Field with Id '{}' was not found.", field_id));

        let field = self
            .store
            .get_field(field_id)
            .await
            .or_internal(context)?
            .ok_or_else(not_found)?;

        // Lost a race with another delete
        if !self.store.delete_field(field_id).await.or_internal(context)? {
            return Err(not_found());
        }

        log::info!("Deleted field '{}'", field_id);
        Ok(field)
    }
}
