//! File-backed preference store.
//!
//! Holds the selected meal/diet type and the `backOnline` flag in a small JSON
//! file. Every value is also published on a `watch` channel so readers get
//! the current value followed by each later change.

use std::io;
use std::path::{Path, PathBuf};

use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use crate::models::{DietType, MealType};

/// File name of the preference file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

pub const DEFAULT_MEAL_TYPE: &str = "main course";
pub const DEFAULT_DIET_TYPE: &str = "gluten free";

/// The saved meal and diet selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealAndDietType {
    pub selected_meal_type: String,
    pub selected_meal_type_id: i32,
    pub selected_diet_type: String,
    pub selected_diet_type_id: i32,
}

impl MealAndDietType {
    pub fn new(meal_type: MealType, diet_type: DietType) -> Self {
        Self {
            selected_meal_type: meal_type.to_string(),
            selected_meal_type_id: meal_type.id(),
            selected_diet_type: diet_type.to_string(),
            selected_diet_type_id: diet_type.id(),
        }
    }
}

impl Default for MealAndDietType {
    fn default() -> Self {
        Self {
            selected_meal_type: DEFAULT_MEAL_TYPE.to_string(),
            selected_meal_type_id: 0,
            selected_diet_type: DEFAULT_DIET_TYPE.to_string(),
            selected_diet_type_id: 0,
        }
    }
}

/// On-disk layout; missing keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PreferencesFile {
    #[serde(flatten)]
    meal_and_diet: MealAndDietType,
    back_online: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, io::Error),

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct DataStoreRepository {
    path: PathBuf,
    meal_and_diet: watch::Sender<MealAndDietType>,
    back_online: watch::Sender<bool>,
    // Both keys share one file; writes must not interleave
    write_lock: Mutex<()>,
}

impl DataStoreRepository {
    /// Opens the preference file in `data_dir`, creating nothing until the
    /// first write.
    pub async fn open(data_dir: &Path) -> Result<Self, PreferencesError> {
        Self::open_file(data_dir.join(PREFERENCES_FILE)).await
    }

    pub async fn open_file(path: PathBuf) -> Result<Self, PreferencesError> {
        let stored = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<PreferencesFile>(&bytes) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Unreadable preferences file, using defaults"
                    );
                    PreferencesFile::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => PreferencesFile::default(),
            Err(e) => return Err(PreferencesError::Io(path, e)),
        };

        let (meal_and_diet, _) = watch::channel(stored.meal_and_diet);
        let (back_online, _) = watch::channel(stored.back_online);

        Ok(Self {
            path,
            meal_and_diet,
            back_online,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current selection followed by every later change.
    pub fn read_meal_and_diet_type(&self) -> impl Stream<Item = MealAndDietType> + Send + 'static {
        watch_stream(self.meal_and_diet.subscribe())
    }

    /// Current `backOnline` flag followed by every later change.
    pub fn read_back_online(&self) -> impl Stream<Item = bool> + Send + 'static {
        watch_stream(self.back_online.subscribe())
    }

    pub fn current_meal_and_diet_type(&self) -> MealAndDietType {
        self.meal_and_diet.borrow().clone()
    }

    pub fn current_back_online(&self) -> bool {
        *self.back_online.borrow()
    }

    pub async fn save_meal_and_diet_type(
        &self,
        meal_and_diet: MealAndDietType,
    ) -> Result<(), PreferencesError> {
        let _guard = self.write_lock.lock().await;
        let file = PreferencesFile {
            meal_and_diet: meal_and_diet.clone(),
            back_online: self.current_back_online(),
        };
        self.persist(&file).await?;
        self.meal_and_diet.send_replace(meal_and_diet);
        Ok(())
    }

    pub async fn save_back_online(&self, back_online: bool) -> Result<(), PreferencesError> {
        let _guard = self.write_lock.lock().await;
        let file = PreferencesFile {
            meal_and_diet: self.current_meal_and_diet_type(),
            back_online,
        };
        self.persist(&file).await?;
        self.back_online.send_replace(back_online);
        Ok(())
    }

    async fn persist(&self, file: &PreferencesFile) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PreferencesError::Io(parent.to_path_buf(), e))?;
        }

        let bytes = serde_json::to_vec_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| PreferencesError::Io(tmp.clone(), e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PreferencesError::Io(self.path.clone(), e))?;

        tracing::debug!(path = %self.path.display(), "Saved preferences");
        Ok(())
    }
}

fn watch_stream<T>(rx: watch::Receiver<T>) -> impl Stream<Item = T> + Send + 'static
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first {
            // Ends the stream once the store is dropped
            rx.changed().await.ok()?;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
}
