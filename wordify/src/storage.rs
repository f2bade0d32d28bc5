use sqlx::{migrate::MigrateDatabase, FromRow, Pool, Sqlite, Transaction};
use sqlx::sqlite::SqlitePoolOptions;
use wordlist::Record;

const DB_URL: &str = "sqlite://wordify.db";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("store operation failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store schema setup failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("no word with uid {0}")]
    UnknownWord(i64),
}

/// A persisted vocabulary entry. `category` is the informational label the
/// source record carried; `category_uid` is the owning [`CategoryEntry`].
#[derive(Debug, Clone, FromRow)]
pub struct WordEntry {
    pub uid: i64,
    pub word: String,
    pub audio: String,
    pub phonetic: String,
    pub definition: String,
    pub word_type: String,
    pub category: String,
    pub example: String,
    pub is_favorite: bool,
    pub category_uid: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntry {
    pub uid: i64,
    pub label: String,
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub category_uid: i64,
    pub words_inserted: usize,
}

pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize() -> Result<Self, StorageError> {
        if !Sqlite::database_exists(DB_URL).await.unwrap_or(false) {
            Sqlite::create_database(DB_URL).await?;
        }
        Self::connect(DB_URL).await
    }

    /// Connects to `url` and brings the schema up to date. Access is
    /// UI-driven and serial, so a single connection is enough; it also keeps
    /// `sqlite::memory:` databases coherent across calls.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }
}

impl Storage {
    /// Returns the category whose label exactly matches, creating it first
    /// when there is none. Labels are unique, so a match is unambiguous.
    pub async fn find_or_create_category(
        &self,
        label: &str,
    ) -> Result<CategoryEntry, StorageError> {
        let mut tx = self.pool.begin().await?;
        let category = Self::resolve_category(&mut tx, label).await?;
        tx.commit().await?;
        Ok(category)
    }

    async fn resolve_category(
        tx: &mut Transaction<'_, Sqlite>,
        label: &str,
    ) -> Result<CategoryEntry, sqlx::Error> {
        let existing: Option<CategoryEntry> =
            sqlx::query_as("SELECT uid, label FROM categories WHERE label = ?")
                .bind(label)
                .fetch_optional(&mut **tx)
                .await?;
        if let Some(category) = existing {
            return Ok(category);
        }
        let result = sqlx::query("INSERT INTO categories(label) VALUES(?)")
            .bind(label)
            .execute(&mut **tx)
            .await?;
        Ok(CategoryEntry {
            uid: result.last_insert_rowid(),
            label: label.to_owned(),
        })
    }

    /// Inserts one word per record under the resolved category, all within a
    /// single transaction. Nothing is persisted unless the whole batch
    /// commits; re-running the same batch reuses the category but inserts
    /// the words again.
    pub async fn import_batch(
        &self,
        records: &[Record],
        label: &str,
    ) -> Result<ImportOutcome, StorageError> {
        let mut tx = self.pool.begin().await?;
        let category = Self::resolve_category(&mut tx, label).await?;
        for record in records {
            sqlx::query(
                "INSERT INTO words(word, audio, phonetic, definition, word_type, category, example, category_uid) \
                 VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&record.word)
            .bind(&record.audio)
            .bind(&record.phonetic)
            .bind(&record.definition)
            .bind(&record.word_type)
            .bind(&record.category)
            .bind(&record.example)
            .bind(category.uid)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::info!(label, count = records.len(), "imported word batch");
        Ok(ImportOutcome {
            category_uid: category.uid,
            words_inserted: records.len(),
        })
    }

    /// Flips the favorite flag of a word and returns the new value. The
    /// store is the source of truth; callers re-render from the returned
    /// flag rather than tracking their own copy.
    pub async fn toggle_favorite(&self, uid: i64) -> Result<bool, StorageError> {
        let flag: Option<bool> = sqlx::query_scalar(
            "UPDATE words SET is_favorite = NOT is_favorite WHERE uid = ? RETURNING is_favorite",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;
        match flag {
            Some(flag) => {
                tracing::debug!(uid, is_favorite = flag, "toggled favorite");
                Ok(flag)
            }
            None => Err(StorageError::UnknownWord(uid)),
        }
    }

    pub async fn categories(&self) -> Result<Vec<CategoryEntry>, StorageError> {
        Ok(
            sqlx::query_as("SELECT uid, label FROM categories ORDER BY uid")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn category_by_label(
        &self,
        label: &str,
    ) -> Result<Option<CategoryEntry>, StorageError> {
        Ok(
            sqlx::query_as("SELECT uid, label FROM categories WHERE label = ?")
                .bind(label)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Words owned by a category, in import order.
    pub async fn words_in_category(
        &self,
        category_uid: i64,
    ) -> Result<Vec<WordEntry>, StorageError> {
        Ok(
            sqlx::query_as("SELECT * FROM words WHERE category_uid = ? ORDER BY uid")
                .bind(category_uid)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn favorite_words(&self) -> Result<Vec<WordEntry>, StorageError> {
        Ok(
            sqlx::query_as("SELECT * FROM words WHERE is_favorite ORDER BY uid")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    /// First word whose text matches, oldest import wins.
    pub async fn word_by_text(&self, word: &str) -> Result<Option<WordEntry>, StorageError> {
        Ok(
            sqlx::query_as("SELECT * FROM words WHERE word = ? ORDER BY uid LIMIT 1")
                .bind(word)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    pub async fn sample_words(&self, count: u32) -> Result<Vec<WordEntry>, StorageError> {
        Ok(
            sqlx::query_as("SELECT * FROM words ORDER BY RANDOM() LIMIT ?")
                .bind(count)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn find_words_excluding(
        &self,
        exclude: &[&str],
        max: usize,
    ) -> Result<Vec<WordEntry>, StorageError> {
        let placeholders = vec!["?"; exclude.len()].join(",");
        let sql = format!(
            "SELECT * FROM words WHERE word NOT IN ({placeholders}) ORDER BY RANDOM() LIMIT ?"
        );
        let mut query = sqlx::query_as(&sql);
        for word in exclude {
            query = query.bind(*word);
        }
        Ok(query.bind(max as i64).fetch_all(&self.pool).await?)
    }

    pub(crate) async fn setting(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    pub(crate) async fn put_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO settings(key, value) VALUES(?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
