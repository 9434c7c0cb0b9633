use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::diagnostics::DiagnosticsSink;
use crate::model::Appointment;
use crate::{AppError, AppResult};

/// Appointment lists join the client table for the read-only name pair.
/// LEFT JOIN: rows whose owner was deleted still load, with `None` names.
const SELECT_BASE: &str = "SELECT a.appointmentId, a.date, a.time, a.address, a.institution, a.priority, a.status, a.clientIfaNumber, \
     k.lastName AS clientLastName, k.firstName AS clientFirstName \
     FROM appointment a LEFT JOIN client k ON a.clientIfaNumber = k.ifaNumber";

const INSERT: &str = "INSERT INTO appointment (date, time, address, institution, priority, status, clientIfaNumber) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

const UPDATE: &str = "UPDATE appointment SET date = ?, time = ?, address = ?, institution = ?, priority = ?, status = ? \
     WHERE appointmentId = ?";

const DELETE_BY_ID: &str = "DELETE FROM appointment WHERE appointmentId = ?";

#[derive(Clone)]
pub struct AppointmentRepo {
    pool: SqlitePool,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl AppointmentRepo {
    pub fn new(pool: SqlitePool, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self { pool, diagnostics }
    }

    pub async fn get_all(&self) -> Vec<Appointment> {
        self.query_appointments("loading appointments", SELECT_BASE.to_string(), None)
            .await
    }

    pub async fn get_by_client(&self, case_number: &str) -> Vec<Appointment> {
        let sql = format!("{SELECT_BASE} WHERE a.clientIfaNumber = ?");
        self.query_appointments("loading appointments for client", sql, Some(case_number))
            .await
    }

    /// Insert a new row; the appointment's `id` field is ignored and the
    /// store assigns its own.
    pub async fn save(&self, appointment: &Appointment) {
        match self.exec_insert(appointment).await {
            Ok(()) => tracing::info!(
                target: "casefile",
                event = "appointment_saved",
                case_number = %appointment.case_number
            ),
            Err(err) => self.diagnostics.record("saving appointment", &err),
        }
    }

    /// Full-column update keyed by id (the owning case number stays as
    /// written on insert); last write wins.
    pub async fn update(&self, appointment: &Appointment) {
        match self.exec_update(appointment).await {
            Ok(0) => tracing::info!(
                target: "casefile",
                event = "appointment_update_missed",
                id = appointment.id
            ),
            Ok(_) => tracing::info!(
                target: "casefile",
                event = "appointment_updated",
                id = appointment.id
            ),
            Err(err) => self.diagnostics.record("updating appointment", &err),
        }
    }

    pub async fn delete(&self, id: i64) {
        match self.exec_delete(id).await {
            Ok(0) => {
                tracing::info!(target: "casefile", event = "appointment_delete_missed", id = id)
            }
            Ok(_) => tracing::info!(target: "casefile", event = "appointment_deleted", id = id),
            Err(err) => self.diagnostics.record("deleting appointment", &err),
        }
    }

    /// Shared query path for both list operations; failures are swallowed
    /// here, uniformly.
    async fn query_appointments(
        &self,
        context: &str,
        sql: String,
        case_number: Option<&str>,
    ) -> Vec<Appointment> {
        let mut query = sqlx::query(&sql);
        if let Some(case_number) = case_number {
            query = query.bind(case_number);
        }
        let decoded: AppResult<Vec<Appointment>> = match query.fetch_all(&self.pool).await {
            Ok(rows) => rows.iter().map(decode_appointment).collect(),
            Err(err) => Err(AppError::from(err)),
        };
        match decoded {
            Ok(list) => list,
            Err(err) => {
                self.diagnostics.record(context, &err);
                Vec::new()
            }
        }
    }

    async fn exec_insert(&self, appointment: &Appointment) -> AppResult<()> {
        sqlx::query(INSERT)
            .bind(appointment.date)
            .bind(appointment.time)
            .bind(&appointment.address)
            .bind(&appointment.institution)
            .bind(&appointment.priority)
            .bind(&appointment.status)
            .bind(&appointment.case_number)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exec_update(&self, appointment: &Appointment) -> AppResult<u64> {
        let res = sqlx::query(UPDATE)
            .bind(appointment.date)
            .bind(appointment.time)
            .bind(&appointment.address)
            .bind(&appointment.institution)
            .bind(&appointment.priority)
            .bind(&appointment.status)
            .bind(appointment.id)
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

fn decode_appointment(row: &SqliteRow) -> AppResult<Appointment> {
    Ok(Appointment {
        id: row.try_get("appointmentId")?,
        case_number: row.try_get("clientIfaNumber")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        address: row.try_get("address")?,
        institution: row.try_get("institution")?,
        priority: row.try_get("priority")?,
        status: row.try_get("status")?,
        client_last_name: row.try_get("clientLastName")?,
        client_first_name: row.try_get("clientFirstName")?,
    })
}
