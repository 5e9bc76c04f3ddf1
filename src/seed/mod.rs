//! Demo reference data so a fresh database can accept new fields.

use crate::model::{Column, Form};
use crate::store::traits::{ColumnStore, FormStore, Store};

pub const DEMO_FORM_ID: &str = "6f1c1d4e-3b7a-4c1e-9a55-2d8f0b6e7a10";
pub const DEMO_FORM_NAME: &str = "Quote";

/// (id, name) of the demo columns
pub const DEMO_COLUMNS: &[(&str, &str)] = &[
    ("0c5e2a44-6d0b-4f7e-8b7a-91f3c2d4e501", "INSURED_NAME"),
    ("1a7b3c55-7e1c-4a8f-9c8b-a2e4d3f5f602", "EFFECTIVE_DATE"),
    ("2b8c4d66-8f2d-4b9a-ad9c-b3f5e4a6a703", "PREMIUM_AMOUNT"),
];

/// Upsert the demo form and columns; safe to run on every start
pub async fn load_seed_data<S: Store>(store: &S) -> anyhow::Result<()> {
    store
        .upsert_form(Form::new_with_id(
            DEMO_FORM_ID.to_string(),
            DEMO_FORM_NAME.to_string(),
        ))
        .await?;

    for (id, name) in DEMO_COLUMNS {
        store
            .upsert_column(Column::new_with_id(id.to_string(), Some(name.to_string())))
            .await?;
    }

    log::info!(
        "Seeded form '{}' with {} columns",
        DEMO_FORM_NAME,
        DEMO_COLUMNS.len()
    );
    Ok(())
}
