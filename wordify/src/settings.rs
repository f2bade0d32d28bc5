use crate::storage::{Storage, StorageError};

const FIRST_LAUNCH_KEY: &str = "first_launch_done";
const STREAK_KEY: &str = "streak";
const SCROLL_KEY: &str = "last_scroll_index";
const LAST_LOGIN_KEY: &str = "last_login";

/// App-wide state persisted between launches, loaded once at startup and
/// passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Whether the bundled word lists were already imported.
    pub first_launch_done: bool,
    /// Consecutive-day login counter.
    pub streak: u32,
    /// Index of the last card the user was browsing.
    pub last_scroll_index: i64,
    /// Last login date as `YYYY-MM-DD`; empty until a login is recorded.
    pub last_login: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            first_launch_done: false,
            streak: 0,
            last_scroll_index: 0,
            last_login: String::new(),
        }
    }
}

impl AppState {
    /// Loads the stored state, falling back to defaults for any key that is
    /// missing or does not parse.
    pub async fn load(storage: &Storage) -> Result<Self, StorageError> {
        let defaults = Self::default();
        Ok(Self {
            first_launch_done: storage
                .setting(FIRST_LAUNCH_KEY)
                .await?
                .map(|value| value == "true")
                .unwrap_or(defaults.first_launch_done),
            streak: storage
                .setting(STREAK_KEY)
                .await?
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.streak),
            last_scroll_index: storage
                .setting(SCROLL_KEY)
                .await?
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.last_scroll_index),
            last_login: storage
                .setting(LAST_LOGIN_KEY)
                .await?
                .unwrap_or(defaults.last_login),
        })
    }

    pub async fn save(&self, storage: &Storage) -> Result<(), StorageError> {
        storage
            .put_setting(FIRST_LAUNCH_KEY, if self.first_launch_done { "true" } else { "false" })
            .await?;
        storage.put_setting(STREAK_KEY, &self.streak.to_string()).await?;
        storage
            .put_setting(SCROLL_KEY, &self.last_scroll_index.to_string())
            .await?;
        storage.put_setting(LAST_LOGIN_KEY, &self.last_login).await
    }
}
