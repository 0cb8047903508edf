//! Legal acts: the documents that authorise staffing changes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
  validation::{self, ValidationError},
  vocab::ActType,
};

// ─── LegalAct ────────────────────────────────────────────────────────────────

/// One official act, as persisted.
///
/// `(act_type, number)` is unique across the store. Deleting an act deletes
/// all of its provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAct {
  pub legal_act_id:     Uuid,
  pub act_type:         ActType,
  /// Document number, possibly with an issuing-body suffix (`"1407/MEC"`).
  pub number:           String,
  pub publication_date: Option<NaiveDate>,
  /// Official abstract ("ementa").
  pub summary:          Option<String>,
  pub url:              Option<Url>,
  /// Advisory soft-disable flag. Inactive acts stay for history; consumers
  /// computing current totals are expected to skip them.
  pub is_active:        bool,
  /// Set once at insert.
  pub created_at:       DateTime<Utc>,
  /// Refreshed on every update.
  pub updated_at:       DateTime<Utc>,
}

impl fmt::Display for LegalAct {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.act_type, self.number)
  }
}

// ─── NewLegalAct ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::StaffingStore::create_legal_act`] and
/// [`crate::store::StaffingStore::update_legal_act`].
///
/// Ids and timestamps are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLegalAct {
  pub act_type:         ActType,
  pub number:           String,
  pub publication_date: Option<NaiveDate>,
  pub summary:          Option<String>,
  pub url:              Option<Url>,
  pub is_active:        bool,
}

impl NewLegalAct {
  /// An active act with no date, summary or URL.
  pub fn new(act_type: ActType, number: impl Into<String>) -> Self {
    Self {
      act_type,
      number: number.into(),
      publication_date: None,
      summary: None,
      url: None,
      is_active: true,
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    validation::validate_legal_act(self)
  }

  /// Trim the number and drop a blank summary.
  pub fn normalized(mut self) -> Self {
    self.number = self.number.trim().to_owned();
    self.summary = self.summary.filter(|s| !s.trim().is_empty());
    self
  }
}
