//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar dates are `YYYY-MM-DD` (so they
//! order correctly as text) and UUIDs are hyphenated lowercase strings. Enum
//! fields store their vocabulary token.

use chrono::{DateTime, NaiveDate, Utc};
use siorg_core::{
  act::LegalAct,
  provision::FunctionProvision,
  vocab::{ActType, FunctionCategory},
};
use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `legal_acts` row, in
/// [`ACT_COLUMNS`](crate::schema::ACT_COLUMNS) order.
pub struct RawLegalAct {
  pub legal_act_id:     String,
  pub act_type:         String,
  pub number:           String,
  pub publication_date: Option<String>,
  pub summary:          Option<String>,
  pub url:              Option<String>,
  pub is_active:        bool,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawLegalAct {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      legal_act_id:     row.get(0)?,
      act_type:         row.get(1)?,
      number:           row.get(2)?,
      publication_date: row.get(3)?,
      summary:          row.get(4)?,
      url:              row.get(5)?,
      is_active:        row.get(6)?,
      created_at:       row.get(7)?,
      updated_at:       row.get(8)?,
    })
  }

  pub fn into_legal_act(self) -> Result<LegalAct> {
    Ok(LegalAct {
      legal_act_id:     decode_uuid(&self.legal_act_id)?,
      act_type:         ActType::from_token(&self.act_type)?,
      number:           self.number,
      publication_date: self
        .publication_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      summary:          self.summary,
      url:              self.url.as_deref().map(Url::parse).transpose()?,
      is_active:        self.is_active,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `function_provisions` row, in
/// [`PROVISION_COLUMNS`](crate::schema::PROVISION_COLUMNS) order.
pub struct RawProvision {
  pub provision_id:   String,
  pub legal_act_id:   String,
  pub category:       String,
  pub level:          u16,
  pub quantity_delta: i32,
  pub active:         bool,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawProvision {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      provision_id:   row.get(0)?,
      legal_act_id:   row.get(1)?,
      category:       row.get(2)?,
      level:          row.get(3)?,
      quantity_delta: row.get(4)?,
      active:         row.get(5)?,
      created_at:     row.get(6)?,
      updated_at:     row.get(7)?,
    })
  }

  pub fn into_provision(self) -> Result<FunctionProvision> {
    Ok(FunctionProvision {
      provision_id:   decode_uuid(&self.provision_id)?,
      legal_act_id:   decode_uuid(&self.legal_act_id)?,
      category:       FunctionCategory::from_token(&self.category)?,
      level:          self.level,
      quantity_delta: self.quantity_delta,
      active:         self.active,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}
