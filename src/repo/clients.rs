use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::diagnostics::DiagnosticsSink;
use crate::model::{Client, Gender, RelationshipStatus};
use crate::AppResult;

const SELECT_ALL: &str = "SELECT ifaNumber, lastName, firstName, birthDate, gender, nationality, relationshipStatus FROM client";

const INSERT: &str = "INSERT INTO client (ifaNumber, lastName, firstName, birthDate, nationality, gender, relationshipStatus) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

const UPDATE: &str = "UPDATE client SET lastName = ?, firstName = ?, birthDate = ?, nationality = ?, gender = ?, relationshipStatus = ? \
     WHERE ifaNumber = ?";

const SELECT_BY_CASE_NUMBER: &str = "SELECT ifaNumber, lastName, firstName, birthDate, gender, nationality, relationshipStatus \
     FROM client WHERE ifaNumber = ?";

const DELETE_BY_CASE_NUMBER: &str = "DELETE FROM client WHERE ifaNumber = ?";

const COUNT_BY_CASE_NUMBER: &str = "SELECT COUNT(*) FROM client WHERE ifaNumber = ?";

#[derive(Clone)]
pub struct ClientRepo {
    pool: SqlitePool,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl ClientRepo {
    pub fn new(pool: SqlitePool, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self { pool, diagnostics }
    }

    /// Full scan, ordering not guaranteed. A store failure is recorded and
    /// yields an empty list.
    pub async fn get_all(&self) -> Vec<Client> {
        match self.fetch_all().await {
            Ok(clients) => clients,
            Err(err) => {
                self.diagnostics.record("loading clients", &err);
                Vec::new()
            }
        }
    }

    /// Lookup by case number. `None` for an unknown number, and for a
    /// store failure after it is recorded.
    pub async fn get_by_case_number(&self, case_number: &str) -> Option<Client> {
        match self.fetch_by_case_number(case_number).await {
            Ok(client) => client,
            Err(err) => {
                self.diagnostics.record("loading client", &err);
                None
            }
        }
    }

    /// Insert a new row keyed by the client's case number.
    pub async fn save(&self, client: &Client) {
        match self.exec_insert(client).await {
            Ok(()) => tracing::info!(
                target: "casefile",
                event = "client_saved",
                case_number = %client.case_number
            ),
            Err(err) => self.diagnostics.record("saving client", &err),
        }
    }

    /// Full-column update keyed by case number; last write wins. A miss
    /// (zero affected rows) is informational, not an error.
    pub async fn update(&self, client: &Client) {
        match self.exec_update(client).await {
            Ok(0) => tracing::info!(
                target: "casefile",
                event = "client_update_missed",
                case_number = %client.case_number
            ),
            Ok(_) => tracing::info!(
                target: "casefile",
                event = "client_updated",
                case_number = %client.case_number
            ),
            Err(err) => self.diagnostics.record("updating client", &err),
        }
    }

    /// Count probe. Any store error is treated as "does not exist".
    pub async fn exists_by_case_number(&self, case_number: &str) -> bool {
        match self.count_by_case_number(case_number).await {
            Ok(count) => count > 0,
            Err(err) => {
                self.diagnostics.record("checking case number", &err);
                false
            }
        }
    }

    /// Delete the client row only; dependent rows are left in place.
    pub async fn delete_by_case_number(&self, case_number: &str) {
        match self.exec_delete(case_number).await {
            Ok(0) => tracing::info!(
                target: "casefile",
                event = "client_delete_missed",
                case_number = %case_number
            ),
            Ok(_) => tracing::info!(
                target: "casefile",
                event = "client_deleted",
                case_number = %case_number
            ),
            Err(err) => self.diagnostics.record("deleting client", &err),
        }
    }

    async fn fetch_all(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query(SELECT_ALL).fetch_all(&self.pool).await?;
        rows.iter().map(decode_client).collect()
    }

    async fn fetch_by_case_number(&self, case_number: &str) -> AppResult<Option<Client>> {
        let row = sqlx::query(SELECT_BY_CASE_NUMBER)
            .bind(case_number)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_client).transpose()
    }

    async fn exec_insert(&self, client: &Client) -> AppResult<()> {
        sqlx::query(INSERT)
            .bind(&client.case_number)
            .bind(&client.last_name)
            .bind(&client.first_name)
            .bind(client.date_of_birth)
            .bind(&client.nationality)
            .bind(client.gender.as_str())
            .bind(client.relationship_status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exec_update(&self, client: &Client) -> AppResult<u64> {
        let res = sqlx::query(UPDATE)
            .bind(&client.last_name)
            .bind(&client.first_name)
            .bind(client.date_of_birth)
            .bind(&client.nationality)
            .bind(client.gender.as_str())
            .bind(client.relationship_status.as_str())
            .bind(&client.case_number)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn count_by_case_number(&self, case_number: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(COUNT_BY_CASE_NUMBER)
            .bind(case_number)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn exec_delete(&self, case_number: &str) -> AppResult<u64> {
        let res = sqlx::query(DELETE_BY_CASE_NUMBER)
            .bind(case_number)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

fn decode_client(row: &SqliteRow) -> AppResult<Client> {
    let gender: String = row.try_get("gender")?;
    let relationship: String = row.try_get("relationshipStatus")?;
    Ok(Client {
        case_number: row.try_get("ifaNumber")?,
        last_name: row.try_get("lastName")?,
        first_name: row.try_get("firstName")?,
        date_of_birth: row.try_get("birthDate")?,
        nationality: row.try_get("nationality")?,
        gender: Gender::from_db(&gender),
        relationship_status: RelationshipStatus::from_db(&relationship),
    })
}
