// SharePoint から時間割Excelをダウンロードする
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::academic::AcademicYears;
use crate::config::{Config, Credentials};
use crate::source::{SourceFile, Term};

/// 令和の年度表記つきフォルダ名: `2025(R7)年度時間割`
fn folder_name(year: i32) -> String {
    format!("{}(R{})年度時間割", year, year - 2018)
}

fn file_name(year: i32, term: Term) -> String {
    format!("【{}・{}】全学年時間割.xlsx", year, term.month_span())
}

/// 共有リンク形式 (`:x:/s/...`) のダウンロードURL
pub fn sharepoint_url(config: &Config, year: i32, term: Term) -> String {
    format!(
        "{}{}/{}/{}",
        config.site_url,
        config.share_prefix,
        urlencoding::encode(&folder_name(year)),
        urlencoding::encode(&file_name(year, term)),
    )
}

/// 前期/後期 × 当年度/次年度 の4ファイル
pub fn download_plan(years: AcademicYears) -> Vec<(SourceFile, i32)> {
    SourceFile::ALL
        .iter()
        .map(|&source| {
            let year = if source.is_next() {
                years.next
            } else {
                years.current
            };
            (source, year)
        })
        .collect()
}

/// トークン取得の失敗（fetch全体を中断する）
#[derive(Debug)]
pub struct AuthError(pub String);

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "認証に失敗しました: {}", self.0)
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// クライアントシークレットでアクセストークンを取得する
pub struct TokenClient {
    client: reqwest::Client,
}

impl TokenClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn acquire(&self, config: &Config, credentials: &Credentials) -> Result<String> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            config.authority, credentials.tenant_id
        );
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", config.token_scope.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .context("トークン取得リクエストに失敗しました")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("トークン取得エラー ({}): {}", status, error_text);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("トークンレスポンスの解析に失敗しました")?;
        Ok(token.access_token)
    }
}

/// 1ファイルをダウンロードして保存する
///
/// HTTPステータスが成功以外なら `Ok(false)`。
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    save_path: &Path,
    token: &str,
) -> Result<bool> {
    info!("Downloading: {}", url);

    let response = client
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .with_context(|| format!("Request failed: {}", url))?;

    if !response.status().is_success() {
        warn!("Failed: {} ({})", response.status(), url);
        return Ok(false);
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body: {}", url))?;
    std::fs::write(save_path, &bytes)
        .with_context(|| format!("Failed to write {}", save_path.display()))?;

    info!("Saved to {}", save_path.display());
    Ok(true)
}

#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub source: SourceFile,
    pub year: i32,
    pub url: String,
    pub save_path: PathBuf,
    pub saved: bool,
}

#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub years: AcademicYears,
    pub downloads: Vec<DownloadOutcome>,
}

async fn fetch_all(
    client: &reqwest::Client,
    config: &Config,
    credentials: &Credentials,
    years: AcademicYears,
) -> Result<Vec<DownloadOutcome>> {
    // 認証失敗はここで中断
    let token = TokenClient::new(client.clone())
        .acquire(config, credentials)
        .await
        .map_err(|e| AuthError(format!("{:#}", e)))?;

    let mut downloads = Vec::new();
    for (source, year) in download_plan(years) {
        let url = sharepoint_url(config, year, source.term());
        let save_path = config.source_path(source);
        let saved = match download_file(client, &url, &save_path, &token).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!("{:#}", e);
                false
            }
        };
        downloads.push(DownloadOutcome {
            source,
            year,
            url,
            save_path,
            saved,
        });
    }
    Ok(downloads)
}

/// ダウンロードを1件ずつ順番に実行する
///
/// トークンが取れなければ `AuthError` を含む `Err` を返す。
pub fn run_fetch(config: &Config, credentials: &Credentials, today: NaiveDate) -> Result<FetchSummary> {
    let years = AcademicYears::from_date(today);
    info!("current_year = {}", years.current);
    info!("next_year    = {}", years.next);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;
    let client = reqwest::Client::new();
    let downloads = runtime.block_on(fetch_all(&client, config, credentials, years))?;

    Ok(FetchSummary { years, downloads })
}
