//! Core library exports for the product catalog service.
//!
//! The crate is split in two feature layers: `data` builds only the domain
//! model and the Diesel persistence layer, while `server` (default) adds the
//! Actix-web application on top (forms, services, routes, DTOs).

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
