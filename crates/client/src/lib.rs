//! # LawMatics API クライアント
//!
//! LawMatics REST API へのリクエスト送信と、レスポンス・エラーの型付けを担当する。
//!
//! ## モジュール構成
//!
//! - `config`: 環境変数からのクライアント設定読み込み
//! - `transport`: 共有 HTTP クライアント（`reqwest::Client`）の構築
//! - `request`: 送信するリクエストの記述
//! - `response`: HTTP ステータスとボディから結果への変換
//! - `dispatcher`: リクエストの送信とキャンセル制御
//! - `error`: エラー種別
//!
//! ## 使用例
//!
//! ```no_run
//! use lawmatics_client::{ApiRequest, ClientConfig, Dispatcher};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let dispatcher = Dispatcher::from_config(&config)?;
//!
//! let cancel = CancellationToken::new();
//! let request = ApiRequest::get("contacts/42")
//!    .resource("contact", 42)
//!    .cancel_on(cancel.clone());
//! let contact = dispatcher.execute::<serde_json::Value>(request).await?;
//! println!("{}", contact.data);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use dispatcher::Dispatcher;
pub use error::{ClientErrorKind, LawmaticsError, ResourceRef};
pub use lawmatics_domain::{Credentials, TokenResponse};
pub use lawmatics_shared::{ApiResponse, ErrorResponse, JsonOptions, PaginationInfo};
pub use request::{ApiRequest, HttpMethod};
