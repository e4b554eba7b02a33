use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::PathBuf,
};

use fs2::FileExt;
use tracing::debug;

use crate::{
    models::store::{CURRENT_VERSION, Store},
    storage::{
        Storage, StorageError,
        migrations::{apply_migrations, detect_version},
    },
};

/// Snapshot exported by the backend as a single JSON document.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the whole file while holding a shared lock, so an exporter
    /// holding the exclusive lock never hands us a half-written snapshot.
    fn read_locked(&self, mut file: File) -> Result<String, StorageError> {
        FileExt::lock_shared(&file).map_err(|e| StorageError::LockFailed {
            path: self.path.clone(),
            source: e,
        })?;

        let mut content = String::new();
        let read = file.read_to_string(&mut content);

        FileExt::unlock(&file).map_err(|e| StorageError::LockFailed {
            path: self.path.clone(),
            source: e,
        })?;

        read.map_err(|e| StorageError::LoadFailed {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(content)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Store, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot found, starting empty");
                return Ok(Store::default());
            }
            Err(e) => {
                return Err(StorageError::LoadFailed {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let content = self.read_locked(file)?;

        let mut data: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: self.path.clone(),
                source: e,
            })?;

        let file_version = detect_version(&data)?;
        if file_version > CURRENT_VERSION {
            return Err(StorageError::FutureVersion(file_version));
        }

        if file_version < CURRENT_VERSION {
            debug!(from = file_version, to = CURRENT_VERSION, "migrating snapshot");
            data = apply_migrations(data, file_version, CURRENT_VERSION)?;
        }

        if let Some(obj) = data.as_object_mut() {
            obj.insert("version".to_string(), serde_json::json!(CURRENT_VERSION));
        }

        let store: Store = serde_json::from_value(data).map_err(|e| StorageError::ParseFailed {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(
            projects = store.projects.len(),
            tasks = store.tasks.len(),
            comments = store.comments.len(),
            activities = store.activities.len(),
            "snapshot loaded"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::models::{project::ProjectStatus, task::TaskStatus};

    fn storage_with(content: &str) -> (tempfile::TempDir, JsonFileStorage) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, content).unwrap();
        (dir, JsonFileStorage::new(path))
    }

    #[test]
    fn test_load_current_snapshot() {
        let (_dir, storage) = storage_with(
            r#"{
                "version": 2,
                "projects": [{"id": 1, "name": "Alpha", "teamMembers": ["Ann"], "status": "on-hold"}],
                "tasks": [{"id": 10, "title": "Plan", "projectId": 1, "status": "done"}],
                "comments": [{"id": 5, "taskId": 10, "author": "Ann", "content": "ok", "timestamp": "2024-03-01T10:00:00Z"}],
                "activities": [{"id": 7, "type": "task_completed", "user": "Ann", "timestamp": "2024-03-01T11:00:00Z", "taskId": 10}]
            }"#,
        );

        let store = storage.load().unwrap();

        assert_eq!(store.projects[0].status, ProjectStatus::OnHold);
        assert_eq!(store.tasks[0].status, Some(TaskStatus::Done));
        assert_eq!(store.comments.len(), 1);
        assert_eq!(store.activities[0].task_id, Some(10));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nope.json"));

        let store = storage.load().unwrap();

        assert_eq!(store.version, CURRENT_VERSION);
        assert!(store.projects.is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let (_dir, storage) = storage_with("{ this is not valid json }");

        match storage.load() {
            Err(StorageError::ParseFailed { .. }) => {}
            _ => panic!("Expected ParseFailed error, got something else"),
        }
    }

    #[test]
    fn test_load_v1_export_without_version_field() {
        let (_dir, storage) = storage_with(
            r#"{
                "projects": [{"id": 1, "name": "Alpha", "teamMembers": "Ann,Bo"}],
                "tasks": []
            }"#,
        );

        let store = storage.load().unwrap();

        assert_eq!(store.version, CURRENT_VERSION);
        assert_eq!(store.projects[0].team_members, vec!["Ann", "Bo"]);
    }

    #[test]
    fn test_load_keeps_records_with_loose_dates() {
        let (_dir, storage) = storage_with(
            r#"{
                "version": 2,
                "projects": [{"id": 1, "name": "Alpha", "createdAt": "2024-03-01"}],
                "tasks": [],
                "comments": [
                    {"id": 1, "taskId": 10, "author": "Ann", "content": "a", "timestamp": "2024-03-01"},
                    {"id": 2, "taskId": 10, "author": "Bo", "content": "b", "timestamp": "sometime"}
                ],
                "activities": [
                    {"id": 1, "type": "task_created", "user": "Ann", "timestamp": "2024-03-01"},
                    {"id": 2, "type": "task_created", "user": "Bo", "timestamp": "garbage"}
                ]
            }"#,
        );

        let store = storage.load().unwrap();

        assert_eq!(store.projects[0].created_at.as_deref(), Some("2024-03-01"));
        assert_eq!(store.comments.len(), 2);
        assert_eq!(store.activities.len(), 2);
    }

    #[test]
    fn test_load_coerces_off_type_task_fields() {
        let (_dir, storage) = storage_with(
            r#"{
                "version": 2,
                "projects": [],
                "tasks": [
                    {"id": 1, "projectId": 1, "title": "Plan", "progress": 42.0},
                    {"id": 2, "projectId": 1, "progress": -5, "commentCount": "3"},
                    {"id": 3, "projectId": 1, "title": "Ship", "progress": 900, "attachmentCount": 1.5}
                ]
            }"#,
        );

        let store = storage.load().unwrap();

        let progress: Vec<u8> = store.tasks.iter().map(|t| t.progress).collect();
        assert_eq!(progress, vec![42, 0, 100]);
        assert_eq!(store.tasks[1].title, "");
        assert_eq!(store.tasks[1].comment_count, 3);
        assert_eq!(store.tasks[2].attachment_count, 1);
    }

    #[test]
    fn test_load_files_and_settings() {
        let (_dir, storage) = storage_with(
            r#"{
                "version": 2,
                "files": [{"id": 1, "Name": "brief.pdf", "size_c": 2048, "type_c": "application/pdf", "task_id_c": 10}],
                "settings": [{"id": 1, "Name": "theme", "value_c": "dark", "type_c": "string"}]
            }"#,
        );

        let store = storage.load().unwrap();

        assert_eq!(store.files[0].size, 2048);
        assert_eq!(store.files[0].task_id, 10);
        assert_eq!(store.settings[0].value, "dark");
    }

    #[test]
    fn test_load_future_version() {
        let (_dir, storage) = storage_with(r#"{"version": 999, "projects": [], "tasks": []}"#);

        match storage.load() {
            Err(StorageError::FutureVersion(999)) => {}
            _ => panic!("Expected FutureVersion(999) error"),
        }
    }
}
