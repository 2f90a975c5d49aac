//! Shared constants for end-to-end tests
//!
//! Fixture tracks, in insertion order:
//!
//! | # | track            | artist        | genre      | popularity |
//! |---|------------------|---------------|------------|------------|
//! | 1 | Shape of You     | Ed Sheeran    | pop        | 90         |
//! | 2 | Blinding Lights  | The Weeknd    | synthwave  | 95         |
//! | 3 | bad guy          | Billie Eilish | electropop | 95         |
//! | 4 | Perfect          | Ed Sheeran    | pop        | 85         |
//! | 5 | Save Your Tears  | The Weeknd    | synthwave  | 88         |

#![allow(dead_code)]

pub const TRACK_SHAPE_OF_YOU: &str = "Shape of You";
pub const TRACK_BLINDING_LIGHTS: &str = "Blinding Lights";
pub const TRACK_BAD_GUY: &str = "bad guy";
pub const TRACK_PERFECT: &str = "Perfect";
pub const TRACK_SAVE_YOUR_TEARS: &str = "Save Your Tears";

pub const ARTIST_ED_SHEERAN: &str = "Ed Sheeran";
pub const ARTIST_THE_WEEKND: &str = "The Weeknd";
pub const ARTIST_BILLIE_EILISH: &str = "Billie Eilish";

pub const GENRE_POP: &str = "pop";
pub const GENRE_SYNTHWAVE: &str = "synthwave";
pub const GENRE_ELECTROPOP: &str = "electropop";

pub const FIXTURE_TRACK_COUNT: usize = 5;

/// Expected `/tracks/popularity` order. Ties keep insertion order.
pub const TRACKS_BY_POPULARITY: [&str; 5] = [
    TRACK_BLINDING_LIGHTS,
    TRACK_BAD_GUY,
    TRACK_SHAPE_OF_YOU,
    TRACK_SAVE_YOUR_TEARS,
    TRACK_PERFECT,
];

/// A well-formed id that no fixture track has.
pub const UNKNOWN_TRACK_ID: &str = "00000000-0000-4000-8000-000000000000";

pub const CONTENT_CACHE_AGE_SEC: usize = 45;

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
