pub mod auth;
pub mod billing;
pub mod calendar;
pub mod cases;
pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod notifications;
pub mod rbac;
pub mod settings;
pub mod tenancy;
