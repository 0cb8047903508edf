//! Controlled vocabularies.
//!
//! Both enumerations are closed sets. The token (e.g. `"LEI"`, `"FCC"`) is
//! what gets stored and sent over the wire; the label is presentation
//! metadata only.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

// ─── Vocabulary trait ────────────────────────────────────────────────────────

/// A token/label pair, as listed to clients that render pick-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
  pub token: &'static str,
  pub label: &'static str,
}

/// Shared behaviour of the closed enumerations.
pub trait Vocabulary: IntoEnumIterator + Copy {
  /// The stored token.
  fn token(self) -> &'static str;

  /// Human-readable label.
  fn label(self) -> &'static str;

  /// Every variant, in declaration order.
  fn entries() -> Vec<VocabularyEntry> {
    Self::iter()
      .map(|v| VocabularyEntry { token: v.token(), label: v.label() })
      .collect()
  }
}

// ─── ActType ─────────────────────────────────────────────────────────────────

/// The kind of legal act.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
  EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ActType {
  Portaria,
  Lei,
  Decreto,
  Outro,
}

impl ActType {
  /// Parse a stored token, rejecting anything outside the closed set.
  pub fn from_token(token: &str) -> Result<Self> {
    token
      .parse()
      .map_err(|_| Error::UnknownActType(token.to_owned()))
  }
}

impl Vocabulary for ActType {
  fn token(self) -> &'static str { self.into() }

  fn label(self) -> &'static str {
    match self {
      Self::Portaria => "Portaria",
      Self::Lei => "Lei",
      Self::Decreto => "Decreto",
      Self::Outro => "Outro",
    }
  }
}

impl fmt::Display for ActType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token())
  }
}

// ─── FunctionCategory ────────────────────────────────────────────────────────

/// The class of a staffing function. Each class has its own admissible
/// level range; see [`crate::validation`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
  EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FunctionCategory {
  /// Cargo de Direção.
  Cd,
  /// Função Gratificada.
  Fg,
  /// Função Comissionada de Coordenação.
  Fcc,
}

impl FunctionCategory {
  /// Parse a stored token, rejecting anything outside the closed set.
  pub fn from_token(token: &str) -> Result<Self> {
    token
      .parse()
      .map_err(|_| Error::UnknownCategory(token.to_owned()))
  }
}

impl Vocabulary for FunctionCategory {
  fn token(self) -> &'static str { self.into() }

  fn label(self) -> &'static str {
    match self {
      Self::Cd => "Cargo de Direção",
      Self::Fg => "Função Gratificada",
      Self::Fcc => "Função Comissionada de Coordenação",
    }
  }
}

impl fmt::Display for FunctionCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token())
  }
}
