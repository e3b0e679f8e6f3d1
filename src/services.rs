pub mod auth;
pub mod billing_service;
pub mod case_service;
pub mod dashboard_service;
pub mod document_service;
pub mod lookup;
pub mod mutation;
pub mod tenancy_service;
