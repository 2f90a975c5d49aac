//! SQLite-backed track store.
//!
//! Reads are spread over a small pool of read-only connections; the seed
//! path writes through a single dedicated connection.

use super::filter::TrackFilter;
use super::models::{Track, TrackId, TrackRecord};
use super::schema::TRACK_VERSIONED_SCHEMAS;
use super::trait_def::TrackStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, types::Type, Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const TRACK_COLUMNS: &str = "id, dataset_rank, track_name, artist_name, genre, bpm, energy, danceability, loudness, liveness, valence, length, acousticness, speechiness, popularity";

#[derive(Clone)]
pub struct SqliteTrackStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let latest_version = TRACK_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &TRACK_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;
    if table_count == 0 {
        info!("Creating track db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if db_version < BASE_DB_VERSION as i64 {
        bail!("Unknown track database version {}", db_version);
    }
    let mut current_version = (db_version - BASE_DB_VERSION as i64) as usize;
    if current_version > latest_version {
        bail!(
            "Track database version {} is newer than the supported {}",
            current_version,
            latest_version
        );
    }

    if current_version < latest_version {
        let tx = conn.transaction()?;
        for schema in TRACK_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
            if let Some(migration_fn) = schema.migration {
                info!(
                    "Migrating track db from version {} to {}",
                    current_version, schema.version
                );
                migration_fn(&tx)?;
            }
            current_version = schema.version;
        }
        tx.pragma_update(None, "user_version", (BASE_DB_VERSION + current_version) as i64)?;
        tx.commit()?;
    }

    latest_schema
        .validate(conn)
        .context("Track database schema validation failed")
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| anyhow!("Track database connection lock poisoned"))
}

fn parse_track_row(row: &rusqlite::Row) -> rusqlite::Result<Track> {
    let id_text: String = row.get(0)?;
    let id = TrackId::parse(&id_text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    Ok(Track {
        id,
        record: TrackRecord {
            rank: row.get(1)?,
            track_name: row.get(2)?,
            artist_name: row.get(3)?,
            genre: row.get(4)?,
            bpm: row.get(5)?,
            energy: row.get(6)?,
            danceability: row.get(7)?,
            loudness: row.get(8)?,
            liveness: row.get(9)?,
            valence: row.get(10)?,
            length: row.get(11)?,
            acousticness: row.get(12)?,
            speechiness: row.get(13)?,
            popularity: row.get(14)?,
        },
    })
}

impl SqliteTrackStore {
    /// Opens (creating if needed) the track database at `db_path`.
    ///
    /// `read_pool_size` connections are opened read-only for queries.
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();
        if read_pool_size == 0 {
            bail!("Read pool size must be at least 1");
        }

        let mut write_conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open track database at {:?}", db_path))?;

        migrate_if_needed(&mut write_conn)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let track_count: i64 = write_conn.query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get(0))?;
        info!("Opened track database {:?}: {} tracks", db_path, track_count);

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteTrackStore {
            read_pool,
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn select_all(conn: &Connection) -> Result<Vec<Track>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM tracks ORDER BY rowid",
            TRACK_COLUMNS
        ))?;
        let tracks = stmt
            .query_map([], parse_track_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tracks)
    }
}

impl TrackStore for SqliteTrackStore {
    fn find_all(&self) -> Result<Vec<Track>> {
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        Self::select_all(&conn)
    }

    fn find_by_id(&self, id: &TrackId) -> Result<Option<Track>> {
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        match conn.query_row(
            &format!("SELECT {} FROM tracks WHERE id = ?1", TRACK_COLUMNS),
            params![id.to_string()],
            parse_track_row,
        ) {
            Ok(track) => Ok(Some(track)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_by_filter(&self, filter: &TrackFilter) -> Result<Vec<Track>> {
        let matcher = filter.compile()?;
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        let tracks: Vec<Track> = Self::select_all(&conn)?
            .into_iter()
            .filter(|t| matcher.matches(&t.record))
            .collect();
        debug!("Filter {:?} matched {} tracks", filter, tracks.len());
        Ok(tracks)
    }

    fn replace_all(&self, records: &[TrackRecord]) -> Result<usize> {
        let mut conn = lock(&self.write_conn)?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM tracks", [])?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO tracks ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                TRACK_COLUMNS
            ))?;
            for record in records {
                stmt.execute(params![
                    TrackId::generate().to_string(),
                    record.rank,
                    record.track_name,
                    record.artist_name,
                    record.genre,
                    record.bpm,
                    record.energy,
                    record.danceability,
                    record.loudness,
                    record.liveness,
                    record.valence,
                    record.length,
                    record.acousticness,
                    record.speechiness,
                    record.popularity,
                ])
                .with_context(|| format!("Failed to insert track {:?}", record.track_name))?;
            }
        }
        tx.commit()?;
        info!(
            "Replaced {} tracks with {} tracks",
            deleted,
            records.len()
        );
        Ok(records.len())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}
