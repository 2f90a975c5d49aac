//! SQLite schema for the track database.
//!
//! Primary key is an integer rowid, which also fixes insertion order;
//! the public identifier is the unique `id` text column.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const TRACKS_TABLE: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true), // hyphenated uuid
        sqlite_column!("dataset_rank", &SqlType::Integer),
        sqlite_column!("track_name", &SqlType::Text, non_null = true),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
        sqlite_column!("bpm", &SqlType::Real, non_null = true),
        sqlite_column!("energy", &SqlType::Real, non_null = true),
        sqlite_column!("danceability", &SqlType::Real, non_null = true),
        sqlite_column!("loudness", &SqlType::Real, non_null = true),
        sqlite_column!("liveness", &SqlType::Real, non_null = true),
        sqlite_column!("valence", &SqlType::Real, non_null = true),
        sqlite_column!("length", &SqlType::Real, non_null = true),
        sqlite_column!("acousticness", &SqlType::Real, non_null = true),
        sqlite_column!("speechiness", &SqlType::Real, non_null = true),
        sqlite_column!("popularity", &SqlType::Real, non_null = true),
    ],
    indices: &[("idx_tracks_id", "id")],
    unique_constraints: &[&["id"]],
};

pub const TRACK_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[TRACKS_TABLE],
    migration: None,
}];
