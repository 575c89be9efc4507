pub mod admission;
pub mod auth_service;
pub mod enrichment;
pub mod pagination;
