#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use casefile::{
    migrate, Appointment, CaseloadService, Client, Documentation, Gender, MemorySink,
    RelationshipStatus, UploadStore,
};
use chrono::{NaiveDate, NaiveTime};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn memory_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::query("PRAGMA foreign_keys=ON;").execute(&pool).await?;
    migrate::apply_migrations(&pool).await?;
    Ok(pool)
}

pub fn test_service(pool: SqlitePool) -> (CaseloadService, Arc<MemorySink>) {
    let sink = MemorySink::new();
    let service = CaseloadService::new(pool, UploadStore::new("uploads"), sink.clone());
    (service, sink)
}

pub fn sample_client() -> Client {
    Client {
        case_number: "123456".into(),
        last_name: "Muster".into(),
        first_name: "Anna".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        nationality: "DE".into(),
        gender: Gender::Female,
        relationship_status: RelationshipStatus::Single,
    }
}

pub fn sample_appointment(case_number: &str) -> Appointment {
    Appointment {
        id: 0,
        case_number: case_number.into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        address: "Hauptstr. 1".into(),
        institution: "Jobcenter".into(),
        priority: "high".into(),
        status: "Open".into(),
        client_last_name: None,
        client_first_name: None,
    }
}

pub fn sample_documentation(case_number: &str) -> Documentation {
    Documentation {
        id: 0,
        case_number: case_number.into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        title: "Initial interview".into(),
        description: "First meeting, intake form completed.".into(),
    }
}
