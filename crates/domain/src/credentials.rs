//! # 認証情報
//!
//! LawMatics API のアクセストークンと付随情報を保持する値オブジェクト。
//!
//! ## ライフサイクル
//!
//! 1. 設定値、または OAuth トークン交換レスポンス（[`TokenResponse`]）から生成する
//! 2. トークン更新時は [`Credentials::apply_token_response`] でその場で書き換える
//! 3. 利用前に [`Credentials::is_expired`] で有効期限を確認する（5 分のスキュー込み）
//!
//! このクレートはトークン更新の通信を行わない。更新フローは呼び出し側の責務。

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::{REDACTED, clock::Clock};

/// 有効期限判定で前倒しする秒数
pub const EXPIRY_SKEW_SECS: i64 = 5 * 60;

/// トークン種別のデフォルト値
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

fn default_token_type() -> String {
   DEFAULT_TOKEN_TYPE.to_string()
}

/// OAuth トークンエンドポイントのレスポンス
///
/// `created_at` は UNIX 秒。存在する場合は有効期限の起点として優先する。
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
   pub access_token:  String,
   #[serde(default = "default_token_type")]
   pub token_type:    String,
   #[serde(default)]
   pub expires_in:    Option<i64>,
   #[serde(default)]
   pub refresh_token: Option<String>,
   #[serde(default)]
   pub scope:         Option<String>,
   #[serde(default)]
   pub created_at:    Option<i64>,
}

impl TokenResponse {
   /// 有効期限を計算する
   ///
   /// `expires_in` がなければ `None`（無期限として扱う）。
   /// 表現可能な範囲を超える値は `DateTime` の上限（負なら下限）に丸める。
   pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
      let expires_in = self.expires_in?;
      let issued_at = self
         .created_at
         .and_then(|secs| DateTime::from_timestamp(secs, 0))
         .unwrap_or(now);
      let expires_at = Duration::try_seconds(expires_in)
         .and_then(|delta| issued_at.checked_add_signed(delta))
         .unwrap_or(if expires_in < 0 {
            DateTime::<Utc>::MIN_UTC
         } else {
            DateTime::<Utc>::MAX_UTC
         });
      Some(expires_at)
   }
}

impl fmt::Debug for TokenResponse {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("TokenResponse")
         .field("access_token", &REDACTED)
         .field("token_type", &self.token_type)
         .field("expires_in", &self.expires_in)
         .field("refresh_token", &self.refresh_token.as_ref().map(|_| REDACTED))
         .field("scope", &self.scope)
         .field("created_at", &self.created_at)
         .finish()
   }
}

/// API 認証情報
///
/// # セキュリティ
///
/// Debug 出力ではトークンとクライアントシークレットをマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
   access_token:  String,
   refresh_token: Option<String>,
   client_id:     Option<String>,
   client_secret: Option<String>,
   expires_at:    Option<DateTime<Utc>>,
   token_type:    String,
}

impl Credentials {
   /// アクセストークンのみで認証情報を作成する
   pub fn new(access_token: impl Into<String>) -> Self {
      Self {
         access_token:  access_token.into(),
         refresh_token: None,
         client_id:     None,
         client_secret: None,
         expires_at:    None,
         token_type:    default_token_type(),
      }
   }

   /// トークン交換レスポンスから認証情報を作成する
   pub fn from_token_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
      let mut credentials = Self::new(String::new());
      credentials.apply_token_response(response, now);
      credentials
   }

   pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
      self.refresh_token = Some(refresh_token.into());
      self
   }

   pub fn with_client(
      mut self,
      client_id: impl Into<String>,
      client_secret: impl Into<String>,
   ) -> Self {
      self.client_id = Some(client_id.into());
      self.client_secret = Some(client_secret.into());
      self
   }

   pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
      self.expires_at = Some(expires_at);
      self
   }

   pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
      self.token_type = token_type.into();
      self
   }

   /// トークン更新レスポンスを反映する
   ///
   /// レスポンスにリフレッシュトークンが含まれない場合は既存の値を保持する。
   /// クライアント ID / シークレットは変更しない。
   pub fn apply_token_response(&mut self, response: TokenResponse, now: DateTime<Utc>) {
      self.expires_at = response.expires_at(now);
      self.access_token = response.access_token;
      self.token_type = response.token_type;
      if let Some(refresh_token) = response.refresh_token {
         self.refresh_token = Some(refresh_token);
      }
   }

   /// 有効期限切れ（またはスキュー内）かどうか
   ///
   /// 有効期限が未設定の場合は常に `false`。
   pub fn is_expired(&self, clock: &dyn Clock) -> bool {
      match self.expires_at {
         Some(expires_at) => clock.now() + Duration::seconds(EXPIRY_SKEW_SECS) >= expires_at,
         None => false,
      }
   }

   /// リフレッシュトークンを保持しているか
   pub fn can_refresh(&self) -> bool {
      self.refresh_token.is_some()
   }

   /// `Authorization` ヘッダーの値（例: `Bearer abc`）
   pub fn authorization_value(&self) -> String {
      format!("{} {}", self.token_type, self.access_token)
   }

   pub fn access_token(&self) -> &str {
      &self.access_token
   }

   pub fn refresh_token(&self) -> Option<&str> {
      self.refresh_token.as_deref()
   }

   pub fn client_id(&self) -> Option<&str> {
      self.client_id.as_deref()
   }

   pub fn client_secret(&self) -> Option<&str> {
      self.client_secret.as_deref()
   }

   pub fn expires_at(&self) -> Option<DateTime<Utc>> {
      self.expires_at
   }

   pub fn token_type(&self) -> &str {
      &self.token_type
   }
}

impl fmt::Debug for Credentials {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("Credentials")
         .field("access_token", &REDACTED)
         .field("refresh_token", &self.refresh_token.as_ref().map(|_| REDACTED))
         .field("client_id", &self.client_id)
         .field("client_secret", &self.client_secret.as_ref().map(|_| REDACTED))
         .field("expires_at", &self.expires_at)
         .field("token_type", &self.token_type)
         .finish()
   }
}
