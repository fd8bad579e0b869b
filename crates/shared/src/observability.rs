//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//! ライブラリ自体はサブスクライバを設定せず、利用側のバイナリやテストが
//! `observability` feature を有効にして [`init_tracing`] を呼び出す。

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// JSON 形式（本番環境向け）
   Json,
   /// 人間が読みやすい形式（開発環境向け）
   #[default]
   Pretty,
}

impl LogFormat {
   /// 文字列からログ形式をパースする
   ///
   /// 大文字小文字は区別しない。不正な値は [`Pretty`](LogFormat::Pretty) に
   /// フォールバックする。
   pub fn parse(s: &str) -> Self {
      match s.trim().to_ascii_lowercase().as_str() {
         "json" => Self::Json,
         _ => Self::Pretty,
      }
   }

   /// 環境変数 `LOG_FORMAT` から読み取る
   pub fn from_env() -> Self {
      std::env::var("LOG_FORMAT")
         .map(|val| Self::parse(&val))
         .unwrap_or_default()
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   /// デフォルトのフィルタ（`RUST_LOG` 未設定時に使用）
   pub default_filter: String,
   /// ログ出力形式
   pub log_format:     LogFormat,
}

impl TracingConfig {
   pub fn new(log_format: LogFormat) -> Self {
      Self {
         default_filter: "info,lawmatics=debug".to_string(),
         log_format,
      }
   }

   /// 環境変数 `LOG_FORMAT` から設定を読み取る
   pub fn from_env() -> Self {
      Self::new(LogFormat::from_env())
   }

   pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
      self.default_filter = filter.into();
      self
   }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。グローバルサブスクライバが
/// 既に設定済みの場合はエラーを返す（テストから複数回呼ばれても panic しない）。
#[cfg(feature = "observability")]
pub fn init_tracing(
   config: TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
   use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| config.default_filter.as_str().into());

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_target(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .try_init()
}
