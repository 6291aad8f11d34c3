use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::traits::{Product, ProductStore};

const DB_SCHEMA_VERSION: i64 = 1;

#[derive(Clone)]
pub struct SqliteStore {
    pub path: String,
}

fn map_product_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        nome: row.get(1)?,
        valor: row.get(2)?,
        imagem: row.get(3)?,
    })
}

fn db_insert_product(
    conn: &Connection,
    nome: &str,
    valor: &str,
    imagem: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO produtos (nome, valor, imagem) VALUES (?1, ?2, ?3)",
        params![nome, valor, imagem],
    )?;
    Ok(conn.last_insert_rowid())
}

fn db_list_products(conn: &Connection) -> rusqlite::Result<Vec<Product>> {
    let mut stmt = conn.prepare("SELECT id, nome, valor, imagem FROM produtos ORDER BY id")?;
    let mapped = stmt
        .query_map([], map_product_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_get_product(conn: &Connection, id: i64) -> rusqlite::Result<Option<Product>> {
    conn.query_row(
        "SELECT id, nome, valor, imagem FROM produtos WHERE id = ?1",
        params![id],
        map_product_row,
    )
    .optional()
}

fn db_search_products(conn: &Connection, nome: &str) -> rusqlite::Result<Vec<Product>> {
    let mut stmt = conn.prepare(
        "SELECT id, nome, valor, imagem FROM produtos WHERE nome LIKE '%' || ?1 || '%' ORDER BY id",
    )?;
    let mapped = stmt
        .query_map(params![nome], map_product_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_update_product(
    conn: &Connection,
    id: i64,
    nome: &str,
    valor: &str,
    imagem: Option<&str>,
) -> rusqlite::Result<usize> {
    match imagem {
        Some(imagem) => conn.execute(
            "UPDATE produtos SET nome = ?1, valor = ?2, imagem = ?3 WHERE id = ?4",
            params![nome, valor, imagem, id],
        ),
        None => conn.execute(
            "UPDATE produtos SET nome = ?1, valor = ?2 WHERE id = ?3",
            params![nome, valor, id],
        ),
    }
}

fn db_delete_product(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM produtos WHERE id = ?1", params![id])
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            conn.execute_batch(
                r#"
            CREATE TABLE produtos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                valor TEXT NOT NULL,
                imagem TEXT NOT NULL
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl ProductStore for SqliteStore {
    fn create(&self, nome: &str, valor: &str, imagem: &str) -> Result<i64> {
        Ok(self.with_conn(|conn| db_insert_product(conn, nome, valor, imagem))?)
    }

    fn list(&self) -> Result<Vec<Product>> {
        Ok(self.with_conn(db_list_products)?)
    }

    fn get(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.with_conn(|conn| db_get_product(conn, id))?)
    }

    fn search(&self, nome: &str) -> Result<Vec<Product>> {
        Ok(self.with_conn(|conn| db_search_products(conn, nome))?)
    }

    fn update(&self, id: i64, nome: &str, valor: &str, imagem: Option<&str>) -> Result<usize> {
        Ok(self.with_conn(|conn| db_update_product(conn, id, nome, valor, imagem))?)
    }

    fn delete(&self, id: i64) -> Result<usize> {
        Ok(self.with_conn(|conn| db_delete_product(conn, id))?)
    }
}
