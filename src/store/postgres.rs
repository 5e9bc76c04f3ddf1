use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgArguments, PgPoolOptions, PgRow},
    query::Query,
    PgPool, Postgres, Row,
};

use crate::model::field::for_each_field_attribute;
use crate::model::{Column, Field, FieldAttributes, FieldFilter, Form, Id};
use crate::store::traits::{ColumnStore, FieldStore, FormStore, Store, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

macro_rules! field_row_codec {
    ($($name:ident : $ty:ty $(as $json:literal)?),* $(,)?) => {
        fn bind_field_attributes<'q>(
            mut query: Query<'q, Postgres, PgArguments>,
            attributes: &FieldAttributes,
        ) -> Query<'q, Postgres, PgArguments> {
            $(
                query = query.bind(attributes.$name.clone());
            )*
            query
        }

        fn read_field_attributes(row: &PgRow) -> Result<FieldAttributes, sqlx::Error> {
            Ok(FieldAttributes {
                $(
                    $name: row.try_get(stringify!($name))?,
                )*
            })
        }
    };
}

for_each_field_attribute!(field_row_codec);

fn quoted_attribute_columns() -> impl Iterator<Item = String> {
    FieldAttributes::COLUMNS.iter().map(|c| format!("\"{}\"", c))
}

fn select_fields_sql(condition: &str) -> String {
    let columns: Vec<String> = ["id".to_string(), "form_id".to_string(), "column_id".to_string()]
        .into_iter()
        .chain(quoted_attribute_columns())
        .collect();
    format!("SELECT {} FROM fields WHERE {}", columns.join(", "), condition)
}

fn insert_field_sql() -> String {
    let columns: Vec<String> = ["id".to_string(), "form_id".to_string(), "column_id".to_string()]
        .into_iter()
        .chain(quoted_attribute_columns())
        .collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO fields ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn update_field_sql() -> String {
    // $1 is the id; assignments start at $2
    let assignments: Vec<String> = ["form_id".to_string(), "column_id".to_string()]
        .into_iter()
        .chain(quoted_attribute_columns())
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 2))
        .collect();
    format!("UPDATE fields SET {} WHERE id = $1", assignments.join(", "))
}

fn read_field(row: &PgRow) -> Result<Field, sqlx::Error> {
    Ok(Field {
        id: row.try_get("id")?,
        form_id: row.try_get("form_id")?,
        column_id: row.try_get("column_id")?,
        attributes: read_field_attributes(row)?,
    })
}

fn read_form(row: &PgRow) -> Result<Form, sqlx::Error> {
    Ok(Form {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait::async_trait]
impl FormStore for PostgresStore {
    async fn get_form(&self, id: &Id) -> StoreResult<Option<Form>> {
        let row = sqlx::query("SELECT id, name FROM forms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(read_form).transpose()?)
    }

    async fn find_forms_by_name(&self, name: &str) -> StoreResult<Vec<Form>> {
        let rows = sqlx::query("SELECT id, name FROM forms WHERE name = $1")
            .bind(name)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(read_form).collect::<Result<Vec<_>, _>>()?)
    }

    async fn upsert_form(&self, form: Form) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO forms (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(&form.id)
        .bind(&form.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ColumnStore for PostgresStore {
    async fn get_column(&self, id: &Id) -> StoreResult<Option<Column>> {
        let row = sqlx::query("SELECT id, name FROM aocolumns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Column {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        }))
    }

    async fn upsert_column(&self, column: Column) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO aocolumns (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(&column.id)
        .bind(&column.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl FieldStore for PostgresStore {
    async fn get_field(&self, id: &Id) -> StoreResult<Option<Field>> {
        let sql = select_fields_sql("id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(read_field).transpose()?)
    }

    async fn find_fields(&self, filter: &FieldFilter) -> StoreResult<Vec<Field>> {
        let (sql, value) = match filter {
            FieldFilter::Type(field_type) => (select_fields_sql("\"field_type\" = $1"), field_type),
            FieldFilter::FormId(form_id) => (select_fields_sql("form_id = $1"), form_id),
        };

        let rows = sqlx::query(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(read_field).collect::<Result<Vec<_>, _>>()?)
    }

    async fn insert_field(&self, field: Field) -> StoreResult<()> {
        let sql = insert_field_sql();
        let query = sqlx::query(&sql)
            .bind(&field.id)
            .bind(&field.form_id)
            .bind(&field.column_id);

        bind_field_attributes(query, &field.attributes)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_field(&self, field: &Field) -> StoreResult<()> {
        let sql = update_field_sql();
        let query = sqlx::query(&sql)
            .bind(&field.id)
            .bind(&field.form_id)
            .bind(&field.column_id);

        let result = bind_field_attributes(query, &field.attributes)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict {
                id: field.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete_field(&self, id: &Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM fields WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl Store for PostgresStore {}
