//! Creator performance dashboards, bonus-tier qualification, and learning progress.
//!
//! The pure calculations ([`bonus::classify`], [`creators::derive_stats`],
//! [`learning::score`]) never touch storage; services in each module pair them with
//! repository traits and expose axum routers.

pub mod bonus;
pub mod config;
pub mod creators;
pub mod error;
pub mod learning;
pub mod repository;
pub mod telemetry;

pub use repository::RepositoryError;
