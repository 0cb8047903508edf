//! SQL schema for the SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
///
/// `foreign_keys` is a per-connection setting, so it must run on the same
/// connection that serves every query.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS legal_acts (
    legal_act_id     TEXT PRIMARY KEY,
    act_type         TEXT NOT NULL
                     CHECK (act_type IN ('PORTARIA', 'LEI', 'DECRETO', 'OUTRO')),
    number           TEXT NOT NULL CHECK (length(number) BETWEEN 1 AND 60),
    publication_date TEXT,             -- YYYY-MM-DD or NULL when unknown
    summary          TEXT,
    url              TEXT,
    is_active        INTEGER NOT NULL DEFAULT 1,
    created_at       TEXT NOT NULL,    -- RFC 3339 UTC; never changes
    updated_at       TEXT NOT NULL,    -- RFC 3339 UTC; refreshed on update
    UNIQUE (act_type, number)
);

CREATE TABLE IF NOT EXISTS function_provisions (
    provision_id   TEXT PRIMARY KEY,
    legal_act_id   TEXT NOT NULL
                   REFERENCES legal_acts(legal_act_id) ON DELETE CASCADE,
    category       TEXT NOT NULL CHECK (category IN ('CD', 'FG', 'FCC')),
    level          INTEGER NOT NULL CHECK (level BETWEEN 0 AND 32767),
    quantity_delta INTEGER NOT NULL,   -- negative for reductions
    active         INTEGER NOT NULL DEFAULT 1,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL,
    UNIQUE (legal_act_id, category, level)
);

CREATE INDEX IF NOT EXISTS legal_acts_listing_idx
    ON legal_acts(publication_date DESC, act_type, number);
CREATE INDEX IF NOT EXISTS provisions_act_idx
    ON function_provisions(legal_act_id);
CREATE INDEX IF NOT EXISTS provisions_listing_idx
    ON function_provisions(category, level);

PRAGMA user_version = 1;
";

pub const ACT_COLUMNS: &str = "legal_act_id, act_type, number, publication_date, \
   summary, url, is_active, created_at, updated_at";

pub const PROVISION_COLUMNS: &str = "provision_id, legal_act_id, category, level, \
   quantity_delta, active, created_at, updated_at";
