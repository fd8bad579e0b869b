//! # クライアント設定
//!
//! 環境変数（`.env` ファイルを含む）から LawMatics クライアントの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `LAWMATICS_BASE_URL` | No | API のベース URL（デフォルト: `https://api.lawmatics.com/v1`） |
//! | `LAWMATICS_ACCESS_TOKEN` | No | アクセストークン。未設定なら `Authorization` ヘッダーを付与しない |
//! | `LAWMATICS_REFRESH_TOKEN` | No | リフレッシュトークン |
//! | `LAWMATICS_CLIENT_ID` | No | OAuth クライアント ID |
//! | `LAWMATICS_CLIENT_SECRET` | No | OAuth クライアントシークレット |
//! | `LAWMATICS_TIMEOUT_SECS` | No | リクエストタイムアウト秒（デフォルト: 30） |

use std::{env, time::Duration};

use lawmatics_domain::Credentials;
use lawmatics_shared::JsonOptions;
use thiserror::Error;
use url::Url;

/// デフォルトのベース URL
pub const DEFAULT_BASE_URL: &str = "https://api.lawmatics.com/v1";

/// デフォルトのタイムアウト秒
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   /// ベース URL が URL として不正
   #[error("ベース URL が不正です: {value}")]
   InvalidBaseUrl {
      value:  String,
      #[source]
      source: url::ParseError,
   },

   /// ベース URL のスキームが http / https 以外
   #[error("ベース URL のスキームは http または https である必要があります: {0}")]
   UnsupportedScheme(String),

   /// タイムアウト秒が数値でない、または 0
   #[error("LAWMATICS_TIMEOUT_SECS は 1 以上の整数である必要があります: {0}")]
   InvalidTimeout(String),
}

/// LawMatics クライアントの設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
   /// API のベース URL（末尾のスラッシュは除去済み）
   pub base_url:    String,
   /// 認証情報
   pub credentials: Option<Credentials>,
   /// リクエストタイムアウト
   pub timeout:     Duration,
   /// `User-Agent` ヘッダー
   pub user_agent:  String,
   /// リクエストボディのシリアライズ設定
   pub json:        JsonOptions,
}

impl ClientConfig {
   /// ベース URL を指定して作成する
   pub fn new(base_url: &str) -> Result<Self, ConfigError> {
      Ok(Self {
         base_url:    parse_base_url(base_url)?,
         credentials: None,
         timeout:     Duration::from_secs(DEFAULT_TIMEOUT_SECS),
         user_agent:  default_user_agent(),
         json:        JsonOptions::default(),
      })
   }

   /// 環境変数から設定を読み込む
   ///
   /// カレントディレクトリに `.env` があれば先に読み込む（なければ無視）。
   pub fn from_env() -> Result<Self, ConfigError> {
      let _ = dotenvy::dotenv();
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// テスト間で環境変数を奪い合わないよう、読み込みロジックはこちらに集約する。
   pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
   where
      F: Fn(&str) -> Option<String>,
   {
      let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

      let base_url = non_empty("LAWMATICS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
      let mut config = Self::new(&base_url)?;

      if let Some(raw) = non_empty("LAWMATICS_TIMEOUT_SECS") {
         config.timeout = parse_timeout(&raw)?;
      }

      if let Some(access_token) = non_empty("LAWMATICS_ACCESS_TOKEN") {
         let mut credentials = Credentials::new(access_token);
         if let Some(refresh_token) = non_empty("LAWMATICS_REFRESH_TOKEN") {
            credentials = credentials.with_refresh_token(refresh_token);
         }
         if let (Some(client_id), Some(client_secret)) = (
            non_empty("LAWMATICS_CLIENT_ID"),
            non_empty("LAWMATICS_CLIENT_SECRET"),
         ) {
            credentials = credentials.with_client(client_id, client_secret);
         }
         config.credentials = Some(credentials);
      }

      Ok(config)
   }

   pub fn with_credentials(mut self, credentials: Credentials) -> Self {
      self.credentials = Some(credentials);
      self
   }

   pub fn with_timeout(mut self, timeout: Duration) -> Self {
      self.timeout = timeout;
      self
   }

   pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
      self.user_agent = user_agent.into();
      self
   }

   pub fn with_json_options(mut self, json: JsonOptions) -> Self {
      self.json = json;
      self
   }
}

fn default_user_agent() -> String {
   format!("lawmatics-rust/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_base_url(value: &str) -> Result<String, ConfigError> {
   let trimmed = value.trim().trim_end_matches('/');
   let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
      value: value.to_string(),
      source,
   })?;
   if !matches!(url.scheme(), "http" | "https") {
      return Err(ConfigError::UnsupportedScheme(value.to_string()));
   }
   Ok(trimmed.to_string())
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
   match value.trim().parse::<u64>() {
      Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
      _ => Err(ConfigError::InvalidTimeout(value.to_string())),
   }
}
