//! Favorites registry with persistent mirroring.
//!
//! The SQLite store is the single source of truth; the in-memory list is a
//! read-through cache refreshed explicitly with [`FavoritesRegistry::reload`].
//! Uniqueness by location id is enforced here, not by callers. Storage
//! failures are logged and the in-memory list stays usable for the session;
//! no error crosses the registry boundary.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::types::Favorite;

/// SQLite persistence for the favorites list.
struct FavoritesStore {
    conn: Connection,
}

impl FavoritesStore {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open favorites database")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    #[cfg(test)]
    fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS favorites (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    added_at INTEGER NOT NULL
                );
                "#,
            )
            .context("Failed to initialize favorites schema")?;
        Ok(())
    }

    /// Insert a favorite; returns false when the id is already present.
    fn insert(&self, favorite: &Favorite) -> Result<bool> {
        let now = chrono::Utc::now().timestamp_millis();
        let inserted = self.conn.execute(
            "INSERT INTO favorites (id, name, added_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO NOTHING",
            params![favorite.id, favorite.name, now],
        )?;
        Ok(inserted > 0)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM favorites WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// All favorites in insertion order.
    fn list(&self) -> Result<Vec<Favorite>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM favorites ORDER BY rowid")?;

        let favorites = stmt
            .query_map([], |row| {
                Ok(Favorite {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(favorites)
    }
}

/// Uniqueness-by-id favorites list, mirrored to persistent storage.
pub struct FavoritesRegistry {
    store: Mutex<FavoritesStore>,
    favorites: Mutex<Vec<Favorite>>,
}

impl FavoritesRegistry {
    /// Open the registry, hydrating the in-memory list from storage.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = FavoritesStore::open(path)?;
        let favorites = store.list()?;
        Ok(Self {
            store: Mutex::new(store),
            favorites: Mutex::new(favorites),
        })
    }

    /// In-memory registry (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let store = FavoritesStore::in_memory()?;
        Ok(Self {
            store: Mutex::new(store),
            favorites: Mutex::new(Vec::new()),
        })
    }

    /// Membership test by location id.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.lock().iter().any(|f| f.id == id)
    }

    /// Add a favorite. Returns false without changing anything when the id
    /// is already present.
    pub fn add(&self, id: &str, name: &str) -> bool {
        let favorite = Favorite {
            id: id.to_string(),
            name: name.to_string(),
        };

        {
            let mut favorites = self.favorites.lock();
            if favorites.iter().any(|f| f.id == favorite.id) {
                return false;
            }
            favorites.push(favorite.clone());
        }

        if let Err(e) = self.store.lock().insert(&favorite) {
            tracing::error!("Failed to persist favorite {}: {}", favorite.id, e);
        }
        true
    }

    /// Remove all entries matching the id and return the new list.
    /// Removing a non-member leaves the list unchanged.
    pub fn remove(&self, id: &str) -> Vec<Favorite> {
        let updated = {
            let mut favorites = self.favorites.lock();
            favorites.retain(|f| f.id != id);
            favorites.clone()
        };

        if let Err(e) = self.store.lock().delete(id) {
            tracing::error!("Failed to remove favorite {} from storage: {}", id, e);
        }
        updated
    }

    /// Current in-memory list, in persisted order.
    pub fn all(&self) -> Vec<Favorite> {
        self.favorites.lock().clone()
    }

    /// Replace the in-memory list from persistent storage.
    pub fn reload(&self) {
        match self.store.lock().list() {
            Ok(list) => *self.favorites.lock() = list,
            Err(e) => {
                tracing::error!("Failed to reload favorites from storage: {}", e);
            }
        }
    }

    /// Linear scan for the first favorite with the given display name.
    pub fn lookup_id_by_name(&self, name: &str) -> Option<String> {
        self.favorites
            .lock()
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.id.clone())
    }
}
