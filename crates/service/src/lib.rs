//! Service layer for client-owned care records.
//! - One generic create/get/list/update service ([`records::RecordService`])
//!   instantiated per record kind.
//! - Client resolution and persistence behind traits, with SeaORM adapters
//!   and in-memory mocks.
//! - Blob upload and short-lived signed URLs for the file-bearing kinds.

pub mod errors;
pub mod clients;
pub mod records;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub mod allowance_service;
pub mod power_of_attorney_service;
pub mod service_provider_service;
pub mod role_service;
pub mod emergency_plan_service;
pub mod house_image_service;

pub use errors::{EntityKind, ServiceError};
