//! Core types and validation rules for the staffing legal-acts registry.
//!
//! A [`LegalAct`](act::LegalAct) is an official document (portaria, law,
//! decree) that grants or revokes staffing functions. Each
//! [`FunctionProvision`](provision::FunctionProvision) is one line item of
//! such an act: a signed change in the count of a function category at a
//! given level.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::StaffingStore`] and call the pure functions in
//! [`validation`] before every write.

pub mod act;
pub mod error;
pub mod provision;
pub mod store;
pub mod validation;
pub mod vocab;

pub use error::{Error, Result};
pub use validation::{LevelPolicy, LevelRange, ValidationError, validate};
pub use vocab::{ActType, FunctionCategory, Vocabulary};
