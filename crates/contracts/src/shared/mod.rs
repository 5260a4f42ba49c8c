//! Shared helpers used by both the domain model and the wizard session

pub mod validation;
