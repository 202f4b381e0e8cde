use rusqlite::{params, Connection, OptionalExtension, Row, Statement};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data::{Painting, PaintingDetails, TableRow};
use crate::error::Result;

const SELECT_PAINTINGS: &str = "SELECT id, title, artist, year, materials, movement, image_url, \
     genre, country, location, description FROM paintings";

const INSERT_PAINTING: &str = "INSERT INTO paintings (id, title, artist, year, materials, movement, \
     image_url, genre, country, location, description, position) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

/// The Library manages the SQLite painting catalog.
/// It is the only owner of the `paintings` table.
pub struct Library {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Library {
    /// Open (or create) the catalog database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        info!(path = %db_path.display(), "catalog database opened");

        let library = Library {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Open a throwaway catalog that lives only in memory
    pub fn open_in_memory() -> Result<Self> {
        let library = Library {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Create the paintings table if it doesn't exist.
    ///
    /// `position` keeps the order rows were submitted in, so a replaced
    /// table reads back in the same order it was saved.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS paintings (
                id              INTEGER PRIMARY KEY,
                title           TEXT NOT NULL DEFAULT '',
                artist          TEXT NOT NULL DEFAULT '',
                year            TEXT NOT NULL DEFAULT '',
                materials       TEXT NOT NULL DEFAULT '',
                movement        TEXT NOT NULL DEFAULT '',
                image_url       TEXT NOT NULL DEFAULT '',
                genre           TEXT NOT NULL DEFAULT '',
                country         TEXT NOT NULL DEFAULT '',
                location        TEXT NOT NULL DEFAULT '',
                description     TEXT NOT NULL DEFAULT '',
                position        INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_paintings_position
             ON paintings(position)",
            [],
        )?;

        debug!("catalog schema initialized");
        Ok(())
    }

    /// Path to the database file (None for in-memory catalogs)
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Get a count of paintings in the catalog
    pub fn painting_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM paintings", [], |row| row.get(0))?;
        Ok(count)
    }

    /// All paintings in catalog order
    pub fn list_all(&self) -> Result<Vec<Painting>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_PAINTINGS} ORDER BY position, id"))?;

        let paintings = stmt
            .query_map([], painting_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(paintings)
    }

    /// Look up a single painting. `None` if no painting has this id.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Painting>> {
        let painting = self
            .conn
            .query_row(
                &format!("{SELECT_PAINTINGS} WHERE id = ?1"),
                params![id],
                painting_from_row,
            )
            .optional()?;
        Ok(painting)
    }

    /// Append a new painting at the end of the catalog.
    /// The id is assigned by SQLite.
    pub fn insert_one(&mut self, details: &PaintingDetails) -> Result<Painting> {
        let tx = self.conn.transaction()?;

        let position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM paintings",
            [],
            |row| row.get(0),
        )?;
        {
            let mut stmt = tx.prepare(INSERT_PAINTING)?;
            insert_row(&mut stmt, None, details, position)?;
        }
        let id = tx.last_insert_rowid();

        tx.commit()?;

        debug!(id = id, "painting inserted");
        Ok(Painting {
            id,
            details: details.clone(),
        })
    }

    /// Replace the whole catalog with `rows`, in order.
    ///
    /// Runs as one transaction: if any row fails to insert (a duplicate
    /// id, for example) nothing changes and readers never see an empty table.
    pub fn replace_all(&mut self, rows: &[TableRow]) -> Result<()> {
        let tx = self.conn.transaction()?;

        let removed = tx.execute("DELETE FROM paintings", [])?;
        {
            let mut stmt = tx.prepare(INSERT_PAINTING)?;
            for (position, row) in rows.iter().enumerate() {
                insert_row(&mut stmt, row.id, &row.details, position as i64)?;
            }
        }

        tx.commit()?;

        debug!(removed = removed, inserted = rows.len(), "catalog replaced");
        Ok(())
    }
}

fn insert_row(
    stmt: &mut Statement<'_>,
    id: Option<i64>,
    details: &PaintingDetails,
    position: i64,
) -> rusqlite::Result<usize> {
    stmt.execute(params![
        id,
        details.title,
        details.artist,
        details.year,
        details.materials,
        details.movement,
        details.image_url,
        details.genre,
        details.country,
        details.location,
        details.description,
        position,
    ])
}

fn painting_from_row(row: &Row<'_>) -> rusqlite::Result<Painting> {
    Ok(Painting {
        id: row.get(0)?,
        details: PaintingDetails {
            title: row.get(1)?,
            artist: row.get(2)?,
            year: row.get(3)?,
            materials: row.get(4)?,
            movement: row.get(5)?,
            image_url: row.get(6)?,
            genre: row.get(7)?,
            country: row.get(8)?,
            location: row.get(9)?,
            description: row.get(10)?,
        },
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
