//! # 共有 HTTP トランスポート
//!
//! 設定から `reqwest::Client` を構築する。接続プール・タイムアウト・
//! デフォルトヘッダーはすべてこのクライアントに委ね、ディスパッチャは
//! 受け取ったクライアントを使うだけにする。

use lawmatics_domain::{Credentials, clock::SystemClock};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{
   config::ClientConfig,
   error::{ClientErrorKind, LawmaticsError},
};

/// 設定に従って HTTP クライアントを構築する
///
/// 認証情報がある場合は `Authorization` ヘッダーをデフォルトヘッダーとして付与する。
/// 期限切れのトークンでも構築は行い、警告ログのみ出力する（更新は呼び出し側の責務）。
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, LawmaticsError> {
   let mut headers = HeaderMap::new();
   headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

   if let Some(credentials) = &config.credentials {
      if credentials.is_expired(&SystemClock) {
         tracing::warn!(
            auth.expires_at = ?credentials.expires_at(),
            auth.can_refresh = credentials.can_refresh(),
            "アクセストークンの有効期限が切れています"
         );
      }
      headers.insert(AUTHORIZATION, authorization_header(credentials)?);
   }

   reqwest::Client::builder()
      .default_headers(headers)
      .user_agent(config.user_agent.as_str())
      .timeout(config.timeout)
      .build()
      .map_err(|e| {
         LawmaticsError::client(
            ClientErrorKind::Transport,
            "HTTP クライアントの構築に失敗しました",
            e,
         )
      })
}

/// `Authorization` ヘッダー値を作成する
///
/// ログ等に値が出力されないよう sensitive フラグを立てる。
pub fn authorization_header(credentials: &Credentials) -> Result<HeaderValue, LawmaticsError> {
   let mut value = HeaderValue::from_str(&credentials.authorization_value()).map_err(|e| {
      LawmaticsError::client(
         ClientErrorKind::Transport,
         "アクセストークンにヘッダーとして使用できない文字が含まれています",
         e,
      )
   })?;
   value.set_sensitive(true);
   Ok(value)
}
