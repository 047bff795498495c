//! SQL schema for the roster SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `persons.country_id` deliberately carries no foreign-key constraint:
/// orphaned references are tolerated on read and surface as a missing
/// country name. Country-name uniqueness is likewise left to the
/// service layer, matching its documented check-then-insert behaviour.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS countries (
    country_id   TEXT PRIMARY KEY,
    country_name TEXT
);

CREATE TABLE IF NOT EXISTS persons (
    person_id           TEXT PRIMARY KEY,
    person_name         TEXT,
    email               TEXT,
    date_of_birth       TEXT,            -- ISO 8601 calendar date
    gender              TEXT,            -- free text ('Male' | 'Female' | 'Other' in practice)
    country_id          TEXT,            -- unconstrained reference into countries
    address             TEXT,
    receive_newsletters INTEGER NOT NULL DEFAULT 0,
    tin                 TEXT DEFAULT 'ABC12345'
);

CREATE INDEX IF NOT EXISTS persons_country_idx ON persons(country_id);

PRAGMA user_version = 1;
";
