//! 会話履歴を chat_history.json に保存・読み込みするアダプタ

use crate::domain::HistoryEntry;
use crate::ports::outbound::HistoryStorage;
use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

/// 保存スロット名
pub const HISTORY_FILENAME: &str = "chat_history.json";

/// ホームディレクトリ直下の chat_history.json に JSON 配列として保存する実装
pub struct FileHistoryStorage {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileHistoryStorage {
    pub fn new(fs: Arc<dyn FileSystem>, home_dir: &HomeDir) -> Self {
        Self {
            fs,
            path: home_dir.as_ref().join(HISTORY_FILENAME),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HistoryStorage for FileHistoryStorage {
    fn load(&self) -> Result<Option<Vec<HistoryEntry>>, Error> {
        let Ok(meta) = self.fs.metadata(&self.path) else {
            return Ok(None);
        };
        if !meta.is_file() {
            return Err(Error::persistence(format!(
                "'{}' is not a regular file",
                self.path.display()
            )));
        }
        // 書き込み途中で落ちた空ファイルは未保存と同じ扱い
        if meta.len() == 0 {
            return Ok(None);
        }
        let s = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| Error::persistence(e.to_string()))?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&s).map_err(|e| {
            Error::persistence(format!("Failed to parse '{}': {}", self.path.display(), e))
        })?;
        Ok(Some(entries))
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), Error> {
        let json = serde_json::to_string(entries).map_err(|e| Error::json(e.to_string()))?;
        self.fs
            .write_atomic(&self.path, &json)
            .map_err(|e| Error::persistence(e.to_string()))
    }

    fn remove(&self) -> Result<(), Error> {
        if self.fs.exists(&self.path) {
            self.fs
                .remove_file(&self.path)
                .map_err(|e| Error::persistence(e.to_string()))?;
        }
        Ok(())
    }
}
