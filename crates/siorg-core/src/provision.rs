//! Function provisions, the line items of a legal act.
//!
//! A provision records a signed change (`quantity_delta`) in the number of
//! positions of one category at one level. Positive deltas are grants,
//! negative ones are reductions or extinctions; zero is accepted as a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  validation::{LevelPolicy, ValidationError},
  vocab::FunctionCategory,
};

/// A provision as persisted.
///
/// `(legal_act_id, category, level)` is unique: one act declares at most one
/// line item per category and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionProvision {
  pub provision_id:   Uuid,
  /// The owning act. The provision is deleted together with it.
  pub legal_act_id:   Uuid,
  pub category:       FunctionCategory,
  pub level:          u16,
  pub quantity_delta: i32,
  /// Advisory soft-disable flag.
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Input to [`crate::store::StaffingStore::create_provision`] and
/// [`crate::store::StaffingStore::update_provision`].
///
/// `level` is the raw candidate value; it only becomes a stored level once
/// it passes [`LevelPolicy::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFunctionProvision {
  pub legal_act_id:   Uuid,
  pub category:       FunctionCategory,
  pub level:          i32,
  pub quantity_delta: i32,
  pub active:         bool,
}

impl NewFunctionProvision {
  /// An active provision.
  pub fn new(
    legal_act_id: Uuid,
    category: FunctionCategory,
    level: i32,
    quantity_delta: i32,
  ) -> Self {
    Self { legal_act_id, category, level, quantity_delta, active: true }
  }

  /// Run the category/level rule and return the level in its storage type.
  pub fn validate_with(&self, policy: &LevelPolicy) -> Result<u16, ValidationError> {
    policy.check(self.category, self.level)
  }
}
