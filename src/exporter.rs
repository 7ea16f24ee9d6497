use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::config::jst;
use crate::record::{FileInfo, ScheduleRecord};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// JSONを整形して書き出す（親ディレクトリは自動作成）
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_schedule(records: &[ScheduleRecord], path: &Path) -> Result<()> {
    write_json(records, path)?;
    info!("{} を生成（{} 件）", path.display(), records.len());
    Ok(())
}

/// ファイルの更新日時（UTC+9）。ファイルがない・読めない場合は None
pub fn file_info(path: &Path) -> FileInfo {
    let last_modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(|mtime| {
            DateTime::<Utc>::from(mtime)
                .with_timezone(&jst())
                .format(TIMESTAMP_FORMAT)
                .to_string()
        });

    FileInfo {
        file_path: path.display().to_string(),
        last_modified,
    }
}

pub fn write_file_info(source: &Path, out: &Path) -> Result<FileInfo> {
    let info = file_info(source);
    if info.last_modified.is_none() {
        warn!("{} がありません（空の info を作成）", source.display());
    }
    write_json(&info, out)?;
    Ok(info)
}
