//! Cart use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the operations front ends use.
//! - Keep front ends decoupled from storage details.

pub mod cart_service;
