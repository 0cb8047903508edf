//! The `StaffingStore` trait and supporting filter types.
//!
//! The trait is implemented by storage backends (e.g. `siorg-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.
//!
//! Backends own the constraints this crate cannot check on its own:
//!
//! - `(act_type, number)` unique across legal acts;
//! - `(legal_act_id, category, level)` unique across provisions;
//! - every provision references an existing act, and deleting an act
//!   deletes its provisions.
//!
//! Every create and update must run the validation in [`crate::validation`]
//! first and write nothing when it fails.

use std::future::Future;

use uuid::Uuid;

use crate::{
  act::{LegalAct, NewLegalAct},
  provision::{FunctionProvision, NewFunctionProvision},
  vocab::{ActType, FunctionCategory},
};

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Parameters for [`StaffingStore::list_legal_acts`]. The default matches
/// every act.
#[derive(Debug, Clone, Default)]
pub struct ActFilter {
  pub act_type:  Option<ActType>,
  pub is_active: Option<bool>,
}

/// Parameters for [`StaffingStore::list_provisions`]. The default matches
/// every provision.
#[derive(Debug, Clone, Default)]
pub struct ProvisionFilter {
  pub legal_act_id: Option<Uuid>,
  pub category:     Option<FunctionCategory>,
  pub active:       Option<bool>,
}

impl ProvisionFilter {
  /// All provisions of one act.
  pub fn of_act(legal_act_id: Uuid) -> Self {
    Self { legal_act_id: Some(legal_act_id), ..Self::default() }
  }
}

// ─── Error classification ────────────────────────────────────────────────────

/// Coarse classification of a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Rejected by [`crate::validation`] before reaching storage.
  Validation,
  /// Rejected by a uniqueness or foreign-key constraint.
  Integrity,
  /// The addressed record does not exist.
  NotFound,
  Internal,
}

/// Implemented by backend error types so generic callers can tell
/// validation and integrity failures apart from internal ones.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a staffing-registry backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait StaffingStore: Send + Sync {
  type Error: StoreError;

  // ── Legal acts ────────────────────────────────────────────────────────

  /// Validate and persist a new act. `created_at` and `updated_at` are set
  /// by the store.
  fn create_legal_act(
    &self,
    input: NewLegalAct,
  ) -> impl Future<Output = Result<LegalAct, Self::Error>> + Send + '_;

  /// Retrieve an act by id. Returns `None` if not found.
  fn get_legal_act(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<LegalAct>, Self::Error>> + Send + '_;

  /// List acts ordered by publication date (newest first, undated last),
  /// then act type, then number.
  fn list_legal_acts<'a>(
    &'a self,
    filter: &'a ActFilter,
  ) -> impl Future<Output = Result<Vec<LegalAct>, Self::Error>> + Send + 'a;

  /// Replace every mutable field of an act and refresh `updated_at`.
  fn update_legal_act(
    &self,
    id: Uuid,
    input: NewLegalAct,
  ) -> impl Future<Output = Result<LegalAct, Self::Error>> + Send + '_;

  /// Delete an act and, by cascade, all of its provisions. Returns `false`
  /// if the act did not exist.
  fn delete_legal_act(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Provisions ────────────────────────────────────────────────────────

  /// Validate and persist a new provision.
  fn create_provision(
    &self,
    input: NewFunctionProvision,
  ) -> impl Future<Output = Result<FunctionProvision, Self::Error>> + Send + '_;

  fn get_provision(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<FunctionProvision>, Self::Error>> + Send + '_;

  /// List provisions ordered by category, then level.
  fn list_provisions<'a>(
    &'a self,
    filter: &'a ProvisionFilter,
  ) -> impl Future<Output = Result<Vec<FunctionProvision>, Self::Error>> + Send + 'a;

  /// Replace every mutable field of a provision and refresh `updated_at`.
  fn update_provision(
    &self,
    id: Uuid,
    input: NewFunctionProvision,
  ) -> impl Future<Output = Result<FunctionProvision, Self::Error>> + Send + '_;

  /// Returns `false` if the provision did not exist.
  fn delete_provision(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
