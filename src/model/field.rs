use crate::model::{generate_id, Column, Form, Id};
use serde::{Deserialize, Serialize};

/// The single list of optional field attributes.
///
/// Every entry is `rust_name: Type`, optionally followed by `as "jsonKey"` when
/// the wire name is not the camelCase form of the Rust name. The Rust name is
/// also the storage column name. Callers pass the name of a macro that receives
/// the whole list, so the struct, the merge and the SQL codec stay in step.
macro_rules! for_each_field_attribute {
    ($callback:ident) => {
        $callback! {
            domain_table_id: Id,
            view_resource_id: Id,
            modify_resource_id: Id,
            add_change_delete_flag: String,
            sequence: i32,
            field_type: String as "type",
            text_area_rows: i32,
            text_area_cols: i32,
            label: String,
            display_columns: i32,
            quote_read_only: String,
            quote_required: String,
            quote_display: String,
            quote_disabled: String,
            policy_read_only: String,
            policy_required: String,
            policy_display: String,
            policy_disabled: String,
            required_condition: String,
            amendable_post_issuance: String,
            amendable_pre_renewal: String,
            default_value: String as "default",
            minimum: String,
            maximum: String,
            mask: String,
            help: String,
            help_text: String,
            display_controller: String,
            condition: String,
            comment: String,
            dialog_file_type: String,
            dialog_file_name: String,
            auditable: String,
            audit_condition: String,
            xsl_value: String,
            ref_table_id: Id,
            text_display_size: i32,
            link_text: String,
            audit_view_only: String,
        }
    };
}

pub(crate) use for_each_field_attribute;

macro_rules! define_field_attributes {
    ($($name:ident : $ty:ty $(as $json:literal)?),* $(,)?) => {
        /// Descriptive and behavioral attributes of a field.
        ///
        /// Each attribute is independent; `None` means "unset" on a stored field
        /// and "leave unchanged" in a patch.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct FieldAttributes {
            $(
                $(#[serde(rename = $json)])?
                pub $name: Option<$ty>,
            )*
        }

        impl FieldAttributes {
            /// Storage column names, in declaration order
            pub const COLUMNS: &'static [&'static str] = &[$(stringify!($name)),*];

            /// Coalesce `patch` into `self`: a supplied value wins, an absent one keeps the stored value
            pub fn merge(&mut self, patch: FieldAttributes) {
                $(
                    self.$name = patch.$name.or(self.$name.take());
                )*
            }
        }
    };
}

for_each_field_attribute!(define_field_attributes);

/// A configurable form-field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: Id,
    pub form_id: Id,
    pub column_id: Id,
    #[serde(flatten)]
    pub attributes: FieldAttributes,
}

/// Field input model for creation.
/// `id` and `form_id` are accepted for compatibility but never trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewField {
    pub id: Option<Id>,
    pub form_id: Option<Id>,
    pub column_id: Option<Id>,
    #[serde(flatten)]
    pub attributes: FieldAttributes,
}

/// Field update model for PATCH operations
/// All fields are optional for partial updates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldUpdate {
    pub form_id: Option<Id>,
    pub column_id: Option<Id>,
    #[serde(flatten)]
    pub attributes: FieldAttributes,
}

/// A field annotated with the name of the form that owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWithFormName {
    pub field: Field,
    pub form_name: String,
}

impl Field {
    /// Create a stored field from client input, bound to an already resolved form and column.
    /// A fresh id is always generated.
    pub fn from_new(new_field: NewField, form: &Form, column: &Column) -> Self {
        Self {
            id: generate_id(),
            form_id: form.id.clone(),
            column_id: column.id.clone(),
            attributes: new_field.attributes,
        }
    }

    pub fn apply_update(&mut self, update: FieldUpdate) {
        if let Some(form_id) = update.form_id {
            self.form_id = form_id;
        }
        if let Some(column_id) = update.column_id {
            self.column_id = column_id;
        }
        self.attributes.merge(update.attributes);
    }
}
