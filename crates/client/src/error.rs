//! # LawMatics クライアントのエラー型
//!
//! 呼び出し側が観測するエラーはすべてこの型に変換される。
//! 生の `reqwest::Error` や非 2xx レスポンスがディスパッチャの外に漏れることはない。
//!
//! | 種別 | 発生条件 |
//! |------|----------|
//! | [`Authentication`](LawmaticsError::Authentication) | HTTP 401 |
//! | [`NotFound`](LawmaticsError::NotFound) | HTTP 404 |
//! | [`RateLimit`](LawmaticsError::RateLimit) | HTTP 429 |
//! | [`Api`](LawmaticsError::Api) | 上記以外の非 2xx |
//! | [`Client`](LawmaticsError::Client) | シリアライズ・通信・デシリアライズの失敗 |
//! | [`Cancelled`](LawmaticsError::Cancelled) | 呼び出し側によるキャンセル |

use std::fmt;

use lawmatics_shared::log_fields::kind;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 404 のときに探していたリソース
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
   /// リソース種別（例: `"contact"`）
   pub kind: String,
   /// 識別子
   pub id:   String,
}

impl ResourceRef {
   pub fn new(kind: impl Into<String>, id: impl fmt::Display) -> Self {
      Self {
         kind: kind.into(),
         id:   id.to_string(),
      }
   }
}

impl fmt::Display for ResourceRef {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}(id={})", self.kind, self.id)
   }
}

/// クライアントエラーの発生箇所
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
   /// リクエストボディのシリアライズ
   Serialization,
   /// ネットワーク・タイムアウト・HTTP クライアント設定
   Transport,
   /// 成功レスポンスのデシリアライズ
   Deserialization,
}

impl ClientErrorKind {
   pub fn as_str(&self) -> &'static str {
      match self {
         Self::Serialization => kind::SERIALIZATION,
         Self::Transport => kind::TRANSPORT,
         Self::Deserialization => kind::DESERIALIZATION,
      }
   }
}

impl fmt::Display for ClientErrorKind {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

/// LawMatics クライアントエラー
#[derive(Debug, Error)]
pub enum LawmaticsError {
   /// 認証エラー（401）
   #[error("認証エラー: {message}")]
   Authentication {
      message:        String,
      correlation_id: Option<String>,
   },

   /// リソースが見つからない（404）
   #[error("リソースが見つかりません: {message}")]
   NotFound {
      message:        String,
      resource:       Option<ResourceRef>,
      correlation_id: Option<String>,
   },

   /// レート制限超過（429）
   #[error("レート制限を超過しました: {message}")]
   RateLimit {
      message:        String,
      correlation_id: Option<String>,
   },

   /// その他の非 2xx ステータス
   #[error("API エラー（ステータス {status}）: {message}")]
   Api {
      status:         u16,
      message:        String,
      error_code:     Option<String>,
      correlation_id: Option<String>,
   },

   /// HTTP ステータスに由来しないローカルの失敗
   #[error("クライアントエラー（{kind}）: {message}")]
   Client {
      kind:    ClientErrorKind,
      message: String,
      #[source]
      source:  BoxError,
   },

   /// 呼び出し側によってキャンセルされた
   #[error("リクエストがキャンセルされました")]
   Cancelled,
}

impl LawmaticsError {
   /// クライアントエラーを作成する
   pub fn client(
      kind: ClientErrorKind,
      message: impl Into<String>,
      source: impl Into<BoxError>,
   ) -> Self {
      Self::Client {
         kind,
         message: message.into(),
         source: source.into(),
      }
   }

   /// HTTP ステータス（HTTP 由来のエラーのみ）
   pub fn status(&self) -> Option<u16> {
      match self {
         Self::Authentication { .. } => Some(401),
         Self::NotFound { .. } => Some(404),
         Self::RateLimit { .. } => Some(429),
         Self::Api { status, .. } => Some(*status),
         Self::Client { .. } | Self::Cancelled => None,
      }
   }

   /// 上流 API が返した相関 ID
   pub fn correlation_id(&self) -> Option<&str> {
      match self {
         Self::Authentication { correlation_id, .. }
         | Self::NotFound { correlation_id, .. }
         | Self::RateLimit { correlation_id, .. }
         | Self::Api { correlation_id, .. } => correlation_id.as_deref(),
         Self::Client { .. } | Self::Cancelled => None,
      }
   }

   /// 人間向けメッセージ
   pub fn message(&self) -> &str {
      match self {
         Self::Authentication { message, .. }
         | Self::NotFound { message, .. }
         | Self::RateLimit { message, .. }
         | Self::Api { message, .. }
         | Self::Client { message, .. } => message,
         Self::Cancelled => "リクエストがキャンセルされました",
      }
   }

   pub fn is_cancelled(&self) -> bool {
      matches!(self, Self::Cancelled)
   }

   /// 構造化ログの `error.kind` に出力する値
   pub fn log_kind(&self) -> &'static str {
      match self {
         Self::Authentication { .. } => kind::AUTHENTICATION,
         Self::NotFound { .. } => kind::NOT_FOUND,
         Self::RateLimit { .. } => kind::RATE_LIMIT,
         Self::Api { .. } => kind::API,
         Self::Client { kind, .. } => kind.as_str(),
         Self::Cancelled => kind::CANCELLED,
      }
   }
}
