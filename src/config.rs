use anyhow::{bail, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use std::path::PathBuf;

use crate::source::SourceFile;

/// 日本標準時 (UTC+9)
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}

/// 実行設定
///
/// fetch/convert の両方にそのまま渡す。テストでは `Default` から
/// ディレクトリと基準日だけ差し替えて使う。
#[derive(Debug, Clone)]
pub struct Config {
    pub site_url: String,
    pub share_prefix: String,
    pub authority: String,
    pub token_scope: String,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub as_of: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: "https://ncnj.sharepoint.com".to_string(),
            share_prefix: "/:x:/s/staff_sharedfolders".to_string(),
            authority: "https://login.microsoftonline.com".to_string(),
            token_scope: "https://graph.microsoft.com/.default".to_string(),
            // 空パス: ファイル名そのまま（カレントディレクトリ）
            source_dir: PathBuf::new(),
            output_dir: PathBuf::from("docs"),
            as_of: None,
        }
    }
}

impl Config {
    /// デフォルト値 + 環境変数 `AS_OF_DATE` (YYYY-MM-DD)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("AS_OF_DATE") {
            config.as_of = parse_as_of(&value);
        }
        config
    }

    /// 基準日。指定がなければ日本時間の今日
    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| Utc::now().with_timezone(&jst()).date_naive())
    }

    pub fn source_path(&self, source: SourceFile) -> PathBuf {
        self.source_dir.join(source.file_name())
    }

    pub fn info_path(&self, source: SourceFile) -> PathBuf {
        self.output_dir.join(source.info_name())
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.output_dir.join("schedule.json")
    }
}

fn parse_as_of(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("AS_OF_DATE={} を解釈できません（今日の日付を使用）: {}", value, e);
            None
        }
    }
}

/// SharePoint認証情報
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tenant_id: required_env("TENANT_ID")?,
            client_id: required_env("CLIENT_ID")?,
            client_secret: required_env("CLIENT_SECRET")?,
        })
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("環境変数 {} が設定されていません", name),
    }
}
