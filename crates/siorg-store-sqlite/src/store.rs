//! [`SqliteStore`], the SQLite implementation of [`StaffingStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use siorg_core::{
  LevelPolicy, Vocabulary,
  act::{LegalAct, NewLegalAct},
  provision::{FunctionProvision, NewFunctionProvision},
  store::{ActFilter, ProvisionFilter, StaffingStore},
};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawLegalAct, RawProvision, encode_date, encode_dt, encode_uuid},
  schema::{ACT_COLUMNS, PROVISION_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A staffing registry backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  policy:          LevelPolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, policy: LevelPolicy::default() })
  }

  /// Replace the level policy applied to provision writes.
  pub fn with_policy(mut self, policy: LevelPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn policy(&self) -> &LevelPolicy { &self.policy }

  fn check_act(input: NewLegalAct) -> Result<NewLegalAct> {
    let input = input.normalized();
    if let Err(e) = input.validate() {
      tracing::debug!(error = %e, number = %input.number, "legal act rejected");
      return Err(e.into());
    }
    Ok(input)
  }

  fn check_provision(&self, input: &NewFunctionProvision) -> Result<u16> {
    input.validate_with(&self.policy).map_err(|e| {
      tracing::debug!(
        error = %e,
        category = %input.category,
        level = input.level,
        "provision rejected"
      );
      e.into()
    })
  }
}

/// Column values shared by the INSERT and UPDATE statements for acts.
struct ActParams {
  act_type:         &'static str,
  number:           String,
  publication_date: Option<String>,
  summary:          Option<String>,
  url:              Option<String>,
  is_active:        bool,
}

impl From<&NewLegalAct> for ActParams {
  fn from(input: &NewLegalAct) -> Self {
    Self {
      act_type:         input.act_type.token(),
      number:           input.number.clone(),
      publication_date: input.publication_date.map(encode_date),
      summary:          input.summary.clone(),
      url:              input.url.as_ref().map(|u| u.as_str().to_owned()),
      is_active:        input.is_active,
    }
  }
}

// ─── StaffingStore impl ──────────────────────────────────────────────────────

impl StaffingStore for SqliteStore {
  type Error = Error;

  // ── Legal acts ────────────────────────────────────────────────────────────

  async fn create_legal_act(&self, input: NewLegalAct) -> Result<LegalAct> {
    let input = Self::check_act(input)?;
    let now = Utc::now();

    let act = LegalAct {
      legal_act_id:     Uuid::new_v4(),
      act_type:         input.act_type,
      number:           input.number.clone(),
      publication_date: input.publication_date,
      summary:          input.summary.clone(),
      url:              input.url.clone(),
      is_active:        input.is_active,
      created_at:       now,
      updated_at:       now,
    };

    let id_str = encode_uuid(act.legal_act_id);
    let at_str = encode_dt(now);
    let p      = ActParams::from(&input);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO legal_acts ({ACT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)"
          ),
          rusqlite::params![
            id_str,
            p.act_type,
            p.number,
            p.publication_date,
            p.summary,
            p.url,
            p.is_active,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(legal_act_id = %act.legal_act_id, act = %act, "legal act created");
    Ok(act)
  }

  async fn get_legal_act(&self, id: Uuid) -> Result<Option<LegalAct>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLegalAct> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ACT_COLUMNS} FROM legal_acts WHERE legal_act_id = ?1"),
            rusqlite::params![id_str],
            RawLegalAct::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawLegalAct::into_legal_act).transpose()
  }

  async fn list_legal_acts(&self, filter: &ActFilter) -> Result<Vec<LegalAct>> {
    let act_type  = filter.act_type.map(Vocabulary::token);
    let is_active = filter.is_active;

    let raws: Vec<RawLegalAct> = self
      .conn
      .call(move |conn| {
        // Undated acts count as the oldest, so they come last.
        let mut stmt = conn.prepare(&format!(
          "SELECT {ACT_COLUMNS} FROM legal_acts
           WHERE (?1 IS NULL OR act_type = ?1)
             AND (?2 IS NULL OR is_active = ?2)
           ORDER BY publication_date DESC NULLS LAST, act_type, number"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![act_type, is_active], RawLegalAct::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLegalAct::into_legal_act).collect()
  }

  async fn update_legal_act(&self, id: Uuid, input: NewLegalAct) -> Result<LegalAct> {
    let input  = Self::check_act(input)?;
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());
    let p      = ActParams::from(&input);

    let raw: Option<RawLegalAct> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE legal_acts
           SET act_type = ?2, number = ?3, publication_date = ?4, summary = ?5,
               url = ?6, is_active = ?7, updated_at = ?8
           WHERE legal_act_id = ?1",
          rusqlite::params![
            id_str,
            p.act_type,
            p.number,
            p.publication_date,
            p.summary,
            p.url,
            p.is_active,
            at_str,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {ACT_COLUMNS} FROM legal_acts WHERE legal_act_id = ?1"),
          rusqlite::params![id_str],
          RawLegalAct::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    let act = raw.ok_or(Error::LegalActNotFound(id))?.into_legal_act()?;
    tracing::debug!(legal_act_id = %id, act = %act, "legal act updated");
    Ok(act)
  }

  async fn delete_legal_act(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    // Provisions go with the act through ON DELETE CASCADE.
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM legal_acts WHERE legal_act_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted > 0 {
      tracing::debug!(legal_act_id = %id, "legal act deleted");
    }
    Ok(deleted > 0)
  }

  // ── Provisions ────────────────────────────────────────────────────────────

  async fn create_provision(
    &self,
    input: NewFunctionProvision,
  ) -> Result<FunctionProvision> {
    let level = self.check_provision(&input)?;
    let now   = Utc::now();

    let provision = FunctionProvision {
      provision_id:   Uuid::new_v4(),
      legal_act_id:   input.legal_act_id,
      category:       input.category,
      level,
      quantity_delta: input.quantity_delta,
      active:         input.active,
      created_at:     now,
      updated_at:     now,
    };

    let id_str   = encode_uuid(provision.provision_id);
    let act_str  = encode_uuid(provision.legal_act_id);
    let category = provision.category.token();
    let delta    = provision.quantity_delta;
    let active   = provision.active;
    let at_str   = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO function_provisions ({PROVISION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)"
          ),
          rusqlite::params![id_str, act_str, category, level, delta, active, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      provision_id = %provision.provision_id,
      legal_act_id = %provision.legal_act_id,
      category = %provision.category,
      level,
      delta,
      "provision created"
    );
    Ok(provision)
  }

  async fn get_provision(&self, id: Uuid) -> Result<Option<FunctionProvision>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawProvision> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {PROVISION_COLUMNS} FROM function_provisions
               WHERE provision_id = ?1"
            ),
            rusqlite::params![id_str],
            RawProvision::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawProvision::into_provision).transpose()
  }

  async fn list_provisions(
    &self,
    filter: &ProvisionFilter,
  ) -> Result<Vec<FunctionProvision>> {
    let act_str  = filter.legal_act_id.map(encode_uuid);
    let category = filter.category.map(Vocabulary::token);
    let active   = filter.active;

    let raws: Vec<RawProvision> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROVISION_COLUMNS} FROM function_provisions
           WHERE (?1 IS NULL OR legal_act_id = ?1)
             AND (?2 IS NULL OR category = ?2)
             AND (?3 IS NULL OR active = ?3)
           ORDER BY category, level"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![act_str, category, active],
            RawProvision::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProvision::into_provision).collect()
  }

  async fn update_provision(
    &self,
    id: Uuid,
    input: NewFunctionProvision,
  ) -> Result<FunctionProvision> {
    let level    = self.check_provision(&input)?;
    let id_str   = encode_uuid(id);
    let act_str  = encode_uuid(input.legal_act_id);
    let category = input.category.token();
    let delta    = input.quantity_delta;
    let active   = input.active;
    let at_str   = encode_dt(Utc::now());

    let raw: Option<RawProvision> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE function_provisions
           SET legal_act_id = ?2, category = ?3, level = ?4, quantity_delta = ?5,
               active = ?6, updated_at = ?7
           WHERE provision_id = ?1",
          rusqlite::params![id_str, act_str, category, level, delta, active, at_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!(
            "SELECT {PROVISION_COLUMNS} FROM function_provisions
             WHERE provision_id = ?1"
          ),
          rusqlite::params![id_str],
          RawProvision::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    let provision = raw.ok_or(Error::ProvisionNotFound(id))?.into_provision()?;
    tracing::debug!(provision_id = %id, "provision updated");
    Ok(provision)
  }

  async fn delete_provision(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM function_provisions WHERE provision_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
