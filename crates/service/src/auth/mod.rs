//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and token resolution live here, independent of the web layer.

pub mod domain;
pub mod errors;
pub mod policy;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
