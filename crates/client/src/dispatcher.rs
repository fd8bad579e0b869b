//! # リクエストディスパッチャ
//!
//! 1 回の API 呼び出しを「組み立て → 送信 → ボディ読み取り → 結果変換」の順に実行する。
//!
//! ## 設計
//!
//! - 共有状態は持たない（`reqwest::Client` は内部で接続プールを共有する）。
//!   `Clone` して複数タスクから同時に呼び出してよい
//! - リトライ・バックオフ・キャッシュは行わない。1 呼び出し = 1 試行
//! - キャンセルトークンが発火すると実行中の送信/読み取りの Future を破棄し、
//!   [`LawmaticsError::Cancelled`] を返す
//! - リクエスト/レスポンスのリソースは呼び出しの Future が所有し、
//!   どの経路で終了しても破棄される

use std::time::{Duration, Instant};

use lawmatics_shared::{ApiResponse, JsonOptions, log_fields::category};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
   config::ClientConfig,
   error::{ClientErrorKind, LawmaticsError},
   request::ApiRequest,
   response::handle_response,
   transport::build_http_client,
};

/// LawMatics API のリクエストディスパッチャ
#[derive(Debug, Clone)]
pub struct Dispatcher {
   base_url: String,
   client:   reqwest::Client,
   json:     JsonOptions,
}

impl Dispatcher {
   /// 構築済みの HTTP クライアントからディスパッチャを作成する
   ///
   /// # 引数
   ///
   /// - `client`: 共有 HTTP クライアント（デフォルトヘッダー・タイムアウト設定済み）
   /// - `base_url`: API のベース URL（例: `https://api.lawmatics.com/v1`）
   /// - `json`: リクエストボディのシリアライズ設定
   pub fn new(client: reqwest::Client, base_url: &str, json: JsonOptions) -> Self {
      Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         client,
         json,
      }
   }

   /// 設定から HTTP クライアントとディスパッチャをまとめて作成する
   pub fn from_config(config: &ClientConfig) -> Result<Self, LawmaticsError> {
      let client = build_http_client(config)?;
      Ok(Self::new(client, &config.base_url, config.json))
   }

   pub fn base_url(&self) -> &str {
      &self.base_url
   }

   /// 相対パスから完全な URL を組み立てる
   pub fn url_for(&self, path: &str) -> String {
      format!("{}/{}", self.base_url, path.trim_start_matches('/'))
   }

   /// リクエストを実行する
   ///
   /// 成功時は `ApiResponse<T>` を返し、失敗時は [`LawmaticsError`] のいずれか
   /// 1 つを返す。
   #[tracing::instrument(
      name = "lawmatics.request",
      skip_all,
      fields(http.method = %request.method, http.path = %request.path)
   )]
   pub async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>, LawmaticsError>
   where
      T: DeserializeOwned + Default,
   {
      let ApiRequest {
         method,
         path,
         body,
         resource,
         cancellation,
      } = request;

      if cancellation.as_ref().is_some_and(|token| token.is_cancelled()) {
         tracing::debug!("送信前にキャンセル済み");
         return Err(LawmaticsError::Cancelled);
      }

      let url = self.url_for(&path);
      let mut builder = self.client.request(method.into(), &url);
      if let Some(mut body) = body {
         self.json.apply(&mut body);
         builder = builder.json(&body);
      }

      tracing::debug!(http.url = %url, "リクエスト開始");
      let started = Instant::now();

      let exchange = async {
         let response = builder.send().await.map_err(|e| {
            LawmaticsError::client(ClientErrorKind::Transport, "リクエストの送信に失敗しました", e)
         })?;
         handle_response::<T>(response, resource.as_ref()).await
      };

      let cancelled = async {
         match &cancellation {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
         }
      };

      let result = tokio::select! {
         biased;
         _ = cancelled => Err(LawmaticsError::Cancelled),
         result = exchange => result,
      };

      let latency_ms = as_millis(started.elapsed());
      match &result {
         Ok(_) => tracing::debug!(http.latency_ms = latency_ms, "リクエスト完了"),
         Err(err) => log_failure(err, latency_ms),
      }

      result
   }

   /// `GET` リクエストを実行する
   pub async fn get<T>(&self, path: &str) -> Result<ApiResponse<T>, LawmaticsError>
   where
      T: DeserializeOwned + Default,
   {
      self.execute(ApiRequest::get(path)).await
   }

   /// `POST` リクエストを実行する
   pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, LawmaticsError>
   where
      B: Serialize + ?Sized,
      T: DeserializeOwned + Default,
   {
      self.execute(ApiRequest::post(path).json(body)?).await
   }

   /// `PUT` リクエストを実行する
   pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, LawmaticsError>
   where
      B: Serialize + ?Sized,
      T: DeserializeOwned + Default,
   {
      self.execute(ApiRequest::put(path).json(body)?).await
   }

   /// `PATCH` リクエストを実行する
   pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, LawmaticsError>
   where
      B: Serialize + ?Sized,
      T: DeserializeOwned + Default,
   {
      self.execute(ApiRequest::patch(path).json(body)?).await
   }

   /// `DELETE` リクエストを実行する
   pub async fn delete<T>(&self, path: &str) -> Result<ApiResponse<T>, LawmaticsError>
   where
      T: DeserializeOwned + Default,
   {
      self.execute(ApiRequest::delete(path)).await
   }
}

/// ログ出力用のミリ秒（`u64` に収まらない値は上限に丸める）
fn as_millis(duration: Duration) -> u64 {
   u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// 失敗を構造化ログに出力する
///
/// キャンセルは呼び出し側の意図的な操作のため debug に留める。
fn log_failure(err: &LawmaticsError, latency_ms: u64) {
   match err {
      LawmaticsError::Cancelled => {
         tracing::debug!(
            error.kind = err.log_kind(),
            http.latency_ms = latency_ms,
            "リクエストがキャンセルされました"
         );
      }
      LawmaticsError::Client { .. } => {
         tracing::error!(
            error.category = category::CLIENT,
            error.kind = err.log_kind(),
            error.message = %err,
            http.latency_ms = latency_ms,
            "LawMatics API の呼び出しに失敗しました"
         );
      }
      _ => {
         tracing::warn!(
            error.category = category::EXTERNAL_SERVICE,
            error.kind = err.log_kind(),
            http.status_code = err.status(),
            correlation_id = err.correlation_id(),
            http.latency_ms = latency_ms,
            "LawMatics API がエラーを返しました"
         );
      }
   }
}
