//! Field-level validation applied by every write path before it reaches
//! storage.
//!
//! Uniqueness and referential integrity are enforced by the storage backend,
//! not here. Everything in this module is a pure predicate.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{act::NewLegalAct, vocab::FunctionCategory};

/// Largest level the storage column can hold (a positive small integer).
pub const LEVEL_STORAGE_MAX: i32 = i16::MAX as i32;

/// Maximum length of [`NewLegalAct::number`], in characters.
pub const NUMBER_MAX_CHARS: usize = 60;

/// Maximum length of a legal act's source URL, in characters.
pub const URL_MAX_CHARS: usize = 200;

const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("level must be an integer between 0 and {max}, got {0}", max = LEVEL_STORAGE_MAX)]
  LevelNotSmallInteger(i32),

  #[error("{}", out_of_range_message(.category, .range))]
  LevelOutOfRange {
    category: FunctionCategory,
    level:    u16,
    range:    LevelRange,
  },

  #[error("act number must not be blank")]
  BlankNumber,

  #[error(
    "act number must have at most {max} characters (it has {0})",
    max = NUMBER_MAX_CHARS
  )]
  NumberTooLong(usize),

  #[error("invalid url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },
}

fn out_of_range_message(category: &FunctionCategory, range: &LevelRange) -> String {
  if range.min == range.max {
    format!(
      "{category} is treated as a single level ({}); adjust if this changes",
      range.min
    )
  } else {
    format!(
      "{category} must have level between {} and {}",
      range.min, range.max
    )
  }
}

// ─── Level policy ────────────────────────────────────────────────────────────

/// An inclusive range of admissible levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
  pub min: u16,
  pub max: u16,
}

impl LevelRange {
  pub const fn new(min: u16, max: u16) -> Self { Self { min, max } }

  pub const fn single(level: u16) -> Self { Self { min: level, max: level } }

  pub fn contains(&self, level: u16) -> bool {
    (self.min..=self.max).contains(&level)
  }
}

/// Admissible level range per function category.
///
/// The defaults are CD 1–4, FG 1–9 and FCC fixed at 1. The FCC bound is
/// provisional, so deployments can override any range from configuration;
/// fields left out keep their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelPolicy {
  pub cd:  LevelRange,
  pub fg:  LevelRange,
  pub fcc: LevelRange,
}

impl Default for LevelPolicy {
  fn default() -> Self {
    Self {
      cd:  LevelRange::new(1, 4),
      fg:  LevelRange::new(1, 9),
      fcc: LevelRange::single(1),
    }
  }
}

impl LevelPolicy {
  pub fn range_for(&self, category: FunctionCategory) -> LevelRange {
    match category {
      FunctionCategory::Cd => self.cd,
      FunctionCategory::Fg => self.fg,
      FunctionCategory::Fcc => self.fcc,
    }
  }

  /// Check `level` against this policy and return it in its storage type.
  ///
  /// The value must first fit the storage column; only then is the
  /// category's range applied. Nothing is ever clamped.
  pub fn check(
    &self,
    category: FunctionCategory,
    level: i32,
  ) -> Result<u16, ValidationError> {
    let stored = u16::try_from(level)
      .ok()
      .filter(|l| i32::from(*l) <= LEVEL_STORAGE_MAX)
      .ok_or(ValidationError::LevelNotSmallInteger(level))?;

    let range = self.range_for(category);
    if !range.contains(stored) {
      return Err(ValidationError::LevelOutOfRange {
        category,
        level: stored,
        range,
      });
    }
    Ok(stored)
  }
}

/// Check `level` for `category` under the default [`LevelPolicy`].
pub fn validate(
  category: FunctionCategory,
  level: i32,
) -> Result<(), ValidationError> {
  LevelPolicy::default().check(category, level).map(drop)
}

// ─── Legal act fields ────────────────────────────────────────────────────────

/// Validate the free-form fields of a legal act.
pub fn validate_legal_act(act: &NewLegalAct) -> Result<(), ValidationError> {
  let number = act.number.trim();
  if number.is_empty() {
    return Err(ValidationError::BlankNumber);
  }
  let chars = act.number.chars().count();
  if chars > NUMBER_MAX_CHARS {
    return Err(ValidationError::NumberTooLong(chars));
  }
  if let Some(url) = &act.url {
    check_url(url)?;
  }
  Ok(())
}

/// Parse a source URL and apply the same checks as [`validate_legal_act`].
pub fn parse_url(raw: &str) -> Result<Url, ValidationError> {
  let url = Url::parse(raw.trim()).map_err(|e| ValidationError::InvalidUrl {
    url:    raw.to_owned(),
    reason: e.to_string(),
  })?;
  check_url(&url)?;
  Ok(url)
}

fn check_url(url: &Url) -> Result<(), ValidationError> {
  let invalid = |reason: String| ValidationError::InvalidUrl {
    url: url.as_str().to_owned(),
    reason,
  };
  if !URL_SCHEMES.contains(&url.scheme()) {
    return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
  }
  if !url.has_host() {
    return Err(invalid("missing host".to_owned()));
  }
  let len = url.as_str().chars().count();
  if len > URL_MAX_CHARS {
    return Err(invalid(format!(
      "longer than {URL_MAX_CHARS} characters ({len})"
    )));
  }
  Ok(())
}
