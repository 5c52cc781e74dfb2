// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod recommendation_service;

pub use recommendation_service::*;
