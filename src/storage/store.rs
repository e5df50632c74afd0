//! Generic entity store
//!
//! One `Store<R>` exists per entity kind. All four share the same SQL shape:
//! - insert: `INSERT INTO <table> (<columns>) VALUES (?1, ...)`
//! - update: `UPDATE <table> SET <non-id columns> WHERE <id> = ?N`
//! - retrieve: `SELECT <columns> FROM <table> [WHERE <predicate>] ORDER BY rowid`

use std::marker::PhantomData;
use rusqlite::params_from_iter;
use tracing::debug;
use crate::Result;
use crate::criteria::Criteria;
use super::record::Record;
use super::sqlite::Database;

/// Persisted collection of one entity kind.
///
/// There is no cache in front of the database: every `retrieve` scans the
/// table again. `update` overwrites by identity without reading first, so
/// the last writer wins.
pub struct Store<R> {
    db: Database,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Store<R> {
    /// Create a store for `R` on the shared database handle
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Append a new row
    ///
    /// The identity column is the table's primary key, so inserting an id
    /// that already exists fails with a storage error.
    pub fn insert(&self, record: &R) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders(1, R::COLUMNS.len()),
        );

        self.db.with_connection(|conn| {
            conn.execute(&sql, params_from_iter(record.to_values()))?;
            Ok(())
        })?;
        debug!(kind = R::KIND, id = %record.id(), "Inserted row");
        Ok(())
    }

    /// Overwrite every field of the row sharing `record`'s identity
    ///
    /// Returns the number of rows touched; zero when no row has that id,
    /// which is not an error.
    pub fn update(&self, record: &R) -> Result<usize> {
        let id_column = R::COLUMNS[0];
        let fields = &R::COLUMNS[1..];
        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            R::TABLE,
            assignments.join(", "),
            id_column,
            fields.len() + 1,
        );

        // Identity is bound last, after the assignments
        let mut values = record.to_values();
        let id = values.remove(0);
        values.push(id);

        let changed = self
            .db
            .with_connection(|conn| Ok(conn.execute(&sql, params_from_iter(values))?))?;
        if changed == 0 {
            debug!(kind = R::KIND, id = %record.id(), "Update matched no row");
        } else {
            debug!(kind = R::KIND, id = %record.id(), "Updated row");
        }
        Ok(changed)
    }

    /// Every row matching the filter, in insertion order
    ///
    /// Relationship collections (chapters of a story, choices and media of a
    /// chapter) are left empty; graph assembly fills them in.
    pub fn retrieve(&self, filter: &R::Filter) -> Result<Vec<R>> {
        let predicate = filter.predicate();
        let mut sql = format!("SELECT {} FROM {}", R::COLUMNS.join(", "), R::TABLE);
        if let Some(where_clause) = predicate.where_clause() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause);
        }
        sql.push_str(" ORDER BY rowid");

        let records = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(predicate.values()), |row| R::from_row(row))?
                .collect::<rusqlite::Result<Vec<R>>>()?;
            Ok(rows)
        })?;
        debug!(kind = R::KIND, sql = %sql, matched = records.len(), "Retrieved rows");
        Ok(records)
    }

    /// Count all rows of this kind
    pub fn count(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count: i64 = self
            .db
            .with_connection(|conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))?;
        Ok(count as usize)
    }
}

/// `?start, ?start+1, ...` for `count` parameters
fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
