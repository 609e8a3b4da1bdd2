//! Generic record layer: repository seam, SeaORM adapter and the shared
//! create/list/update service every record kind is built on.

pub mod repo;
pub mod repository;
pub mod service;

pub use repository::RecordRepository;
pub use service::{NewRecord, RecordKind, RecordPatch, RecordService};
