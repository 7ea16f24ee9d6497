use colored::*;
use std::path::PathBuf;

use crate::fetcher::AuthError;

/// エラーメッセージと解決方法を表示
pub fn print_error_with_help(error_type: ErrorType) {
    println!("\n{}", "❌ エラーが発生しました".red().bold());
    println!();

    match error_type {
        ErrorType::MissingCredentials(message) => {
            println!("原因: {}", message);
            println!();
            println!("{}", "💡 解決方法:".yellow().bold());
            println!("  1. 3つの環境変数を設定:");
            println!("     {}", "export TENANT_ID=... CLIENT_ID=... CLIENT_SECRET=...".cyan());
            println!("  2. GitHub Actions の場合は secrets を env に渡しているか確認");
        }
        ErrorType::AuthFailed(message) => {
            println!("原因: 認証に失敗しました: {}", message);
            println!();
            println!("{}", "💡 解決方法:".yellow().bold());
            println!("  1. クライアントシークレットの有効期限を確認");
            println!("  2. アプリ登録のテナントIDとクライアントIDを確認");
            println!("  3. ネットワーク接続を確認");
        }
        ErrorType::FetchFailed(message) => {
            println!("原因: ダウンロードを実行できませんでした: {}", message);
            println!();
            println!("{}", "💡 解決方法:".yellow().bold());
            println!("  1. エラー内容を確認して再実行");
            println!("  2. {} で詳細ログを確認", "RUST_LOG=debug".cyan());
        }
        ErrorType::OutputNotWritable(path) => {
            println!("原因: {} に書き込めません", path.display());
            println!();
            println!("{}", "💡 解決方法:".yellow().bold());
            println!("  1. 出力ディレクトリの権限を確認:");
            println!("     {}", format!("ls -ld {}", path.display()).cyan());
            println!("  2. リポジトリのルートで実行しているか確認");
        }
    }
    println!();
}

/// エラーの種類
#[derive(Debug, PartialEq)]
pub enum ErrorType {
    MissingCredentials(String),
    AuthFailed(String),
    FetchFailed(String),
    OutputNotWritable(PathBuf),
}

impl ErrorType {
    /// fetch の失敗を、認証エラーとそれ以外に振り分ける
    pub fn from_fetch_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<AuthError>() {
            Some(AuthError(message)) => ErrorType::AuthFailed(message.clone()),
            None => ErrorType::FetchFailed(format!("{:#}", error)),
        }
    }
}
