use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::diagnostics::DiagnosticsSink;
use crate::model::FileRecord;
use crate::AppResult;

const SELECT_ALL: &str =
    "SELECT documentId, fileName, fileType, uploadDate, filePath, clientIfaNumber FROM document";

const SELECT_BY_CLIENT: &str = "SELECT documentId, fileName, fileType, uploadDate, filePath, clientIfaNumber \
     FROM document WHERE clientIfaNumber = ?";

const INSERT: &str = "INSERT INTO document (fileName, fileType, uploadDate, filePath, clientIfaNumber) VALUES (?, ?, ?, ?, ?)";

const DELETE_BY_ID: &str = "DELETE FROM document WHERE documentId = ?";

#[derive(Clone)]
pub struct FileRepo {
    pool: SqlitePool,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl FileRepo {
    pub fn new(pool: SqlitePool, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self { pool, diagnostics }
    }

    pub async fn get_all(&self) -> Vec<FileRecord> {
        match self.fetch(SELECT_ALL, None).await {
            Ok(list) => list,
            Err(err) => {
                self.diagnostics.record("loading files", &err);
                Vec::new()
            }
        }
    }

    pub async fn get_by_client(&self, case_number: &str) -> Vec<FileRecord> {
        match self.fetch(SELECT_BY_CLIENT, Some(case_number)).await {
            Ok(list) => list,
            Err(err) => {
                self.diagnostics.record("loading files for client", &err);
                Vec::new()
            }
        }
    }

    /// Insert and return the persisted record with the store-assigned id.
    /// `None` on failure; the caller's value is never mutated.
    pub async fn save(&self, record: FileRecord) -> Option<FileRecord> {
        match self.exec_insert(&record).await {
            Ok(id) => {
                tracing::info!(
                    target: "casefile",
                    event = "file_saved",
                    id = id,
                    case_number = %record.case_number
                );
                Some(FileRecord { id, ..record })
            }
            Err(err) => {
                self.diagnostics.record("saving file", &err);
                None
            }
        }
    }

    /// Delete by id; `true` only when a row was actually removed.
    pub async fn delete(&self, id: i64) -> bool {
        match self.exec_delete(id).await {
            Ok(0) => {
                tracing::info!(target: "casefile", event = "file_delete_missed", id = id);
                false
            }
            Ok(_) => {
                tracing::info!(target: "casefile", event = "file_deleted", id = id);
                true
            }
            Err(err) => {
                self.diagnostics.record("deleting file", &err);
                false
            }
        }
    }

    async fn fetch(&self, sql: &str, case_number: Option<&str>) -> AppResult<Vec<FileRecord>> {
        let mut query = sqlx::query(sql);
        if let Some(case_number) = case_number {
            query = query.bind(case_number);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_file).collect()
    }

    async fn exec_insert(&self, record: &FileRecord) -> AppResult<i64> {
        let res = sqlx::query(INSERT)
            .bind(&record.file_name)
            .bind(&record.content_type)
            .bind(record.upload_date)
            .bind(&record.file_path)
            .bind(&record.case_number)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    async fn exec_delete(&self, id: i64) -> AppResult<u64> {
        let res = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

fn decode_file(row: &SqliteRow) -> AppResult<FileRecord> {
    Ok(FileRecord {
        id: row.try_get("documentId")?,
        case_number: row.try_get("clientIfaNumber")?,
        upload_date: row.try_get("uploadDate")?,
        content_type: row.try_get("fileType")?,
        file_name: row.try_get("fileName")?,
        file_path: row.try_get("filePath")?,
    })
}
