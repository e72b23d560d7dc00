use async_trait::async_trait;
use goaltrack_core::goals::{EditAck, Goal, GoalGatewayTrait};
use goaltrack_core::Result;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::model::{GoalRecord, GoalsFile, GOALS_FILE_VERSION};
use crate::errors::{IntoCore, StorageError};

/// Goal gateway backed by a single JSON file.
///
/// Every operation reads the file, and mutations rewrite it through a
/// temporary file and a rename. Operations are serialized by an async mutex.
pub struct JsonGoalGateway {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonGoalGateway {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonGoalGateway {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> std::result::Result<GoalsFile, StorageError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(GoalsFile::default()),
            Err(source) => return Err(self.io_error(&self.path, source)),
        };
        let file: GoalsFile = serde_json::from_str(&json)?;
        if file.version != GOALS_FILE_VERSION {
            return Err(StorageError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    async fn save(&self, file: &GoalsFile) -> std::result::Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(parent, source))?;
        }

        let json = serde_json::to_string_pretty(file)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|source| self.io_error(&tmp_path, source))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| self.io_error(&self.path, source))?;
        Ok(())
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    async fn get_goals_impl(&self, user_id: &str) -> std::result::Result<Vec<Goal>, StorageError> {
        let _guard = self.lock.lock().await;
        let file = self.load().await?;
        Ok(file
            .goals
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .map(Goal::from)
            .collect())
    }

    async fn add_goal_impl(&self, goal: Goal) -> std::result::Result<Goal, StorageError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;

        let mut record = GoalRecord::from(goal);
        record.id = Uuid::new_v4().to_string();
        file.goals.push(record.clone());
        self.save(&file).await?;

        debug!("Stored new goal {} in {}", record.id, self.path.display());
        Ok(Goal::from(record))
    }

    async fn edit_goal_impl(&self, goal: Goal) -> std::result::Result<EditAck, StorageError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;

        let slot = file
            .goals
            .iter_mut()
            .find(|record| record.id == goal.id && record.user_id == goal.user_id)
            .ok_or_else(|| StorageError::NotFound(goal.id.clone()))?;
        *slot = GoalRecord::from(goal);
        let ack = EditAck::new(slot.id.clone());
        self.save(&file).await?;

        debug!("Stored edit of goal {} in {}", ack.oid, self.path.display());
        Ok(ack)
    }
}

#[async_trait]
impl GoalGatewayTrait for JsonGoalGateway {
    async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.get_goals_impl(user_id).await.into_core()
    }

    async fn add_goal(&self, goal: Goal) -> Result<Goal> {
        self.add_goal_impl(goal).await.into_core()
    }

    async fn edit_goal(&self, goal: Goal) -> Result<EditAck> {
        self.edit_goal_impl(goal).await.into_core()
    }
}
