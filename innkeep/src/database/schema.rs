//! Database schema definitions and SQL constants.
//!
//! Dates are stored as `YYYY-MM-DD` text so that lexicographic comparison in
//! the overlap triggers matches calendar order. Timestamps are Unix seconds
//! and amounts are integer minor units.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value table holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Room inventory. Retired rooms keep their row (and their history) but
/// drop out of the live-number index.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL,
        category TEXT NOT NULL,
        room_type TEXT NOT NULL,
        nightly_rate INTEGER NOT NULL CHECK (nightly_rate > 0),
        housekeeping TEXT NOT NULL,
        occupancy TEXT NOT NULL DEFAULT 'vacant',
        assigned_staff TEXT,
        retired_at INTEGER
    )";

/// Room numbers are unique among live rooms only.
pub const CREATE_ROOM_NUMBER_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_rooms_live_number
    ON rooms(number) WHERE retired_at IS NULL";

/// Reservations. Rows are never deleted.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        guest_name TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        status TEXT NOT NULL,
        total_amount INTEGER NOT NULL CHECK (total_amount >= 0),
        created_at INTEGER NOT NULL,
        CHECK (check_out > check_in)
    )";

/// Speeds up per-room overlap lookups.
pub const CREATE_RESERVATION_ROOM_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_room
    ON reservations(room_id, check_in)";

/// Speeds up status-filtered listings.
pub const CREATE_RESERVATION_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// Message carried by the overlap triggers' `RAISE`.
pub const OVERLAP_TRIGGER_MESSAGE: &str = "reservation overlap";

/// Rejects an active insert that collides with another active row.
pub const CREATE_OVERLAP_INSERT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS reservations_no_overlap_insert
    BEFORE INSERT ON reservations
    WHEN NEW.status IN ('confirmed', 'checked_in')
    BEGIN
        SELECT RAISE(ABORT, 'reservation overlap')
        WHERE EXISTS (
            SELECT 1 FROM reservations
            WHERE room_id = NEW.room_id
              AND status IN ('confirmed', 'checked_in')
              AND check_in < NEW.check_out
              AND NEW.check_in < check_out
        );
    END";

/// Rejects an update that makes a row collide with another active row.
pub const CREATE_OVERLAP_UPDATE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS reservations_no_overlap_update
    BEFORE UPDATE OF room_id, check_in, check_out, status ON reservations
    WHEN NEW.status IN ('confirmed', 'checked_in')
    BEGIN
        SELECT RAISE(ABORT, 'reservation overlap')
        WHERE EXISTS (
            SELECT 1 FROM reservations
            WHERE room_id = NEW.room_id
              AND id <> NEW.id
              AND status IN ('confirmed', 'checked_in')
              AND check_in < NEW.check_out
              AND NEW.check_in < check_out
        );
    END";

/// Append-only revenue ledger, at most one entry per reservation.
pub const CREATE_REVENUE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS revenue_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        reservation_id INTEGER NOT NULL UNIQUE REFERENCES reservations(id),
        amount INTEGER NOT NULL,
        description TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// Message carried by the ledger triggers' `RAISE`.
pub const APPEND_ONLY_TRIGGER_MESSAGE: &str = "revenue entries are append-only";

/// Blocks edits to ledger rows.
pub const CREATE_REVENUE_NO_UPDATE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS revenue_entries_no_update
    BEFORE UPDATE ON revenue_entries
    BEGIN
        SELECT RAISE(ABORT, 'revenue entries are append-only');
    END";

/// Blocks removal of ledger rows.
pub const CREATE_REVENUE_NO_DELETE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS revenue_entries_no_delete
    BEFORE DELETE ON revenue_entries
    BEGIN
        SELECT RAISE(ABORT, 'revenue entries are append-only');
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Every DDL statement, in creation order.
pub const ALL_DDL: [&str; 11] = [
    CREATE_METADATA_TABLE,
    CREATE_ROOMS_TABLE,
    CREATE_ROOM_NUMBER_INDEX,
    CREATE_RESERVATIONS_TABLE,
    CREATE_RESERVATION_ROOM_INDEX,
    CREATE_RESERVATION_STATUS_INDEX,
    CREATE_OVERLAP_INSERT_TRIGGER,
    CREATE_OVERLAP_UPDATE_TRIGGER,
    CREATE_REVENUE_TABLE,
    CREATE_REVENUE_NO_UPDATE_TRIGGER,
    CREATE_REVENUE_NO_DELETE_TRIGGER,
];
