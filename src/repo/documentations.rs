use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::diagnostics::DiagnosticsSink;
use crate::model::Documentation;
use crate::AppResult;

const SELECT_ALL: &str =
    "SELECT documentationId, date, time, description, title, clientIfaNumber FROM documentation";

const SELECT_BY_CLIENT: &str = "SELECT documentationId, date, time, description, title, clientIfaNumber \
     FROM documentation WHERE clientIfaNumber = ?";

const INSERT: &str = "INSERT INTO documentation (date, time, description, title, clientIfaNumber) VALUES (?, ?, ?, ?, ?)";

const UPDATE: &str =
    "UPDATE documentation SET date = ?, time = ?, description = ?, title = ? WHERE documentationId = ?";

const DELETE_BY_ID: &str = "DELETE FROM documentation WHERE documentationId = ?";

#[derive(Clone)]
pub struct DocumentationRepo {
    pool: SqlitePool,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl DocumentationRepo {
    pub fn new(pool: SqlitePool, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self { pool, diagnostics }
    }

    pub async fn get_all(&self) -> Vec<Documentation> {
        match self.fetch(SELECT_ALL, None).await {
            Ok(list) => list,
            Err(err) => {
                self.diagnostics.record("loading documentations", &err);
                Vec::new()
            }
        }
    }

    pub async fn get_by_client(&self, case_number: &str) -> Vec<Documentation> {
        match self.fetch(SELECT_BY_CLIENT, Some(case_number)).await {
            Ok(list) => list,
            Err(err) => {
                self.diagnostics
                    .record("loading documentations for client", &err);
                Vec::new()
            }
        }
    }

    pub async fn save(&self, documentation: &Documentation) {
        match self.exec_insert(documentation).await {
            Ok(()) => tracing::info!(
                target: "casefile",
                event = "documentation_saved",
                case_number = %documentation.case_number
            ),
            Err(err) => self.diagnostics.record("saving documentation", &err),
        }
    }

    pub async fn update(&self, documentation: &Documentation) {
        match self.exec_update(documentation).await {
            Ok(0) => tracing::info!(
                target: "casefile",
                event = "documentation_update_missed",
                id = documentation.id
            ),
            Ok(_) => tracing::info!(
                target: "casefile",
                event = "documentation_updated",
                id = documentation.id
            ),
            Err(err) => self.diagnostics.record("updating documentation", &err),
        }
    }

    pub async fn delete(&self, id: i64) {
        match self.exec_delete(id).await {
            Ok(0) => {
                tracing::info!(target: "casefile", event = "documentation_delete_missed", id = id)
            }
            Ok(_) => tracing::info!(target: "casefile", event = "documentation_deleted", id = id),
            Err(err) => self.diagnostics.record("deleting documentation", &err),
        }
    }

    async fn fetch(&self, sql: &str, case_number: Option<&str>) -> AppResult<Vec<Documentation>> {
        let mut query = sqlx::query(sql);
        if let Some(case_number) = case_number {
            query = query.bind(case_number);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_documentation).collect()
    }

    async fn exec_insert(&self, documentation: &Documentation) -> AppResult<()> {
        sqlx::query(INSERT)
            .bind(documentation.date)
            .bind(documentation.time)
            .bind(&documentation.description)
            .bind(&documentation.title)
            .bind(&documentation.case_number)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exec_update(&self, documentation: &Documentation) -> AppResult<u64> {
        let res = sqlx::query(UPDATE)
            .bind(documentation.date)
            .bind(documentation.time)
            .bind(&documentation.description)
            .bind(&documentation.title)
            .bind(documentation.id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn exec_delete(&self, id: i64) -> AppResult<u64> {
        let res = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

fn decode_documentation(row: &SqliteRow) -> AppResult<Documentation> {
    Ok(Documentation {
        id: row.try_get("documentationId")?,
        case_number: row.try_get("clientIfaNumber")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
    })
}
