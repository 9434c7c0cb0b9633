use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use sqlx::SqlitePool;

use crate::diagnostics::DiagnosticsSink;
use crate::id::generate_case_number;
use crate::model::{Appointment, Client, ClientDraft, Documentation, FileRecord};
use crate::repo::{AppointmentRepo, ClientRepo, DocumentationRepo, FileRepo};
use crate::uploads::UploadStore;

/// Status value the open-appointments view filters on.
const OPEN_STATUS: &str = "Open";

/// Everything linked to one client, loaded in a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientCaseload {
    pub appointments: Vec<Appointment>,
    pub documentations: Vec<Documentation>,
    pub files: Vec<FileRecord>,
}

/// Which branch `save_or_update_client` took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// Bridges the repositories to consumer-ready collections and commands.
///
/// All store access runs through the one injected pool, one query at a
/// time. Loads never fail from the caller's point of view: the
/// repositories have already recorded any store error and degraded to an
/// empty collection.
pub struct CaseloadService {
    clients: ClientRepo,
    appointments: AppointmentRepo,
    documentations: DocumentationRepo,
    files: FileRepo,
    uploads: UploadStore,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl CaseloadService {
    pub fn new(
        pool: SqlitePool,
        uploads: UploadStore,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            clients: ClientRepo::new(pool.clone(), diagnostics.clone()),
            appointments: AppointmentRepo::new(pool.clone(), diagnostics.clone()),
            documentations: DocumentationRepo::new(pool.clone(), diagnostics.clone()),
            files: FileRepo::new(pool, diagnostics.clone()),
            uploads,
            diagnostics,
        }
    }

    pub fn clients(&self) -> &ClientRepo {
        &self.clients
    }

    pub fn appointments(&self) -> &AppointmentRepo {
        &self.appointments
    }

    pub fn documentations(&self) -> &DocumentationRepo {
        &self.documentations
    }

    pub fn files(&self) -> &FileRepo {
        &self.files
    }

    pub fn upload_store(&self) -> &UploadStore {
        &self.uploads
    }

    /// Load the three dependent collections for one client. The loads are
    /// isolated: a failure in one leaves that collection empty and the
    /// others untouched. They are also strictly sequential; the shared
    /// handle is never queried concurrently.
    pub async fn load_for_client(&self, case_number: &str) -> ClientCaseload {
        let appointments = self.appointments.get_by_client(case_number).await;
        let documentations = self.documentations.get_by_client(case_number).await;
        let files = self.files.get_by_client(case_number).await;
        tracing::debug!(
            target: "casefile",
            event = "caseload_loaded",
            case_number = %case_number,
            appointments = appointments.len(),
            documentations = documentations.len(),
            files = files.len()
        );
        ClientCaseload {
            appointments,
            documentations,
            files,
        }
    }

    /// Insert when the case number is unknown, update otherwise.
    ///
    /// Existence check and write are separate statements; no transaction
    /// spans them, and callers must not assume the pair is atomic.
    pub async fn save_or_update_client(&self, client: &Client) -> SaveOutcome {
        if self.clients.exists_by_case_number(&client.case_number).await {
            self.clients.update(client).await;
            SaveOutcome::Updated
        } else {
            self.clients.save(client).await;
            SaveOutcome::Inserted
        }
    }

    /// The canonical empty form: cleared fields, no date, sentinel enums,
    /// and a freshly generated case number. This is the only place a new
    /// client context draws from the generator.
    pub fn reset_form(&self) -> ClientDraft {
        ClientDraft {
            case_number: generate_case_number(),
            ..ClientDraft::default()
        }
    }

    pub async fn load_clients(&self) -> Vec<Client> {
        log_loaded("clients", self.clients.get_all().await)
    }

    pub async fn load_appointments(&self) -> Vec<Appointment> {
        log_loaded("appointments", self.appointments.get_all().await)
    }

    /// Appointments whose status matches the open marker, case-insensitively.
    pub async fn load_open_appointments(&self) -> Vec<Appointment> {
        let open: Vec<Appointment> = self
            .appointments
            .get_all()
            .await
            .into_iter()
            .filter(|appointment| appointment.status.eq_ignore_ascii_case(OPEN_STATUS))
            .collect();
        log_loaded("open appointments", open)
    }

    pub async fn load_documentations(&self) -> Vec<Documentation> {
        log_loaded("documentations", self.documentations.get_all().await)
    }

    pub async fn load_files_for_client(&self, case_number: &str) -> Vec<FileRecord> {
        log_loaded("files", self.files.get_by_client(case_number).await)
    }

    pub async fn save_appointment(&self, appointment: &Appointment) {
        self.appointments.save(appointment).await;
    }

    pub async fn update_appointment(&self, appointment: &Appointment) {
        self.appointments.update(appointment).await;
    }

    pub async fn delete_appointment(&self, id: i64) {
        self.appointments.delete(id).await;
    }

    pub async fn save_documentation(&self, documentation: &Documentation) {
        self.documentations.save(documentation).await;
    }

    pub async fn update_documentation(&self, documentation: &Documentation) {
        self.documentations.update(documentation).await;
    }

    pub async fn delete_documentation(&self, id: i64) {
        self.documentations.delete(id).await;
    }

    pub async fn delete_file(&self, id: i64) -> bool {
        self.files.delete(id).await
    }

    /// Ingest a file into the managed upload directory and persist its
    /// record. `None` when the copy or the insert failed; both are
    /// recorded on the diagnostics sink.
    pub async fn upload_file(&self, source: &Path, case_number: &str) -> Option<FileRecord> {
        let stored = match self.uploads.ingest(source) {
            Ok(stored) => stored,
            Err(err) => {
                self.diagnostics.record("storing upload", &err);
                return None;
            }
        };
        let record = FileRecord {
            id: 0,
            case_number: case_number.to_string(),
            upload_date: Local::now().date_naive(),
            content_type: stored.content_type,
            file_name: stored.file_name,
            file_path: stored.absolute_path,
        };
        self.files.save(record).await
    }
}

fn log_loaded<T>(entity: &str, rows: Vec<T>) -> Vec<T> {
    tracing::debug!(
        target: "casefile",
        event = "load_complete",
        entity = %entity,
        rows = rows.len()
    );
    rows
}
