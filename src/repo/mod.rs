//! One repository per entity, each over the shared store handle.
//!
//! Repositories are the soft-failure boundary: a store error is recorded
//! on the injected diagnostics sink and converted to an empty, `false` or
//! unit result. Callers treat every operation as succeeding with a
//! possibly-empty value.

pub mod appointments;
pub mod clients;
pub mod documentations;
pub mod files;

pub use appointments::AppointmentRepo;
pub use clients::ClientRepo;
pub use documentations::DocumentationRepo;
pub use files::FileRepo;
