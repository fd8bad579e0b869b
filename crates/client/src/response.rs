//! # LawMatics レスポンスの共通ハンドリング
//!
//! 成功時はボディを `ApiResponse<T>` にデシリアライズし、
//! エラー時はステータスコードとエラーボディから [`LawmaticsError`] を組み立てる。

use lawmatics_shared::{ApiResponse, ErrorResponse};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ClientErrorKind, LawmaticsError, ResourceRef};

/// レスポンスを読み取り、結果に変換する
///
/// ボディは最後まで読み切ってから判定する。読み取り中の通信エラーは
/// [`ClientErrorKind::Transport`] のクライアントエラーになる。
pub(crate) async fn handle_response<T>(
   response: reqwest::Response,
   resource: Option<&ResourceRef>,
) -> Result<ApiResponse<T>, LawmaticsError>
where
   T: DeserializeOwned + Default,
{
   let status = response.status();
   let body = response.text().await.map_err(|e| {
      LawmaticsError::client(
         ClientErrorKind::Transport,
         "レスポンスボディの読み取りに失敗しました",
         e,
      )
   })?;

   tracing::debug!(
      http.status_code = status.as_u16(),
      http.response_bytes = body.len(),
      "レスポンス受信"
   );

   map_response(status, &body, resource)
}

/// ステータスコードとボディを結果に変換する
///
/// - 2xx で空ボディ: `T::default()` を持つ空レスポンス
/// - 2xx で不正なボディ: [`ClientErrorKind::Deserialization`]
/// - 非 2xx: [`error_from_status`]
pub fn map_response<T>(
   status: StatusCode,
   body: &str,
   resource: Option<&ResourceRef>,
) -> Result<ApiResponse<T>, LawmaticsError>
where
   T: DeserializeOwned + Default,
{
   if status.is_success() {
      if body.trim().is_empty() {
         return Ok(ApiResponse::empty());
      }
      return serde_json::from_str(body).map_err(|e| {
         LawmaticsError::client(
            ClientErrorKind::Deserialization,
            format!(
               "レスポンスのデシリアライズに失敗しました（ステータス {}）",
               status.as_u16()
            ),
            e,
         )
      });
   }

   Err(error_from_status(
      status.as_u16(),
      ErrorResponse::parse(body),
      resource.cloned(),
   ))
}

/// 非 2xx ステータスをエラー種別に対応付ける
///
/// エラーボディがパースできなかった場合でもステータスに応じた種別を返し、
/// メッセージは汎用の文言にフォールバックする。
pub fn error_from_status(
   status: u16,
   envelope: Option<ErrorResponse>,
   resource: Option<ResourceRef>,
) -> LawmaticsError {
   let envelope = envelope.unwrap_or_default();
   let message = envelope
      .best_message()
      .map(str::to_string)
      .unwrap_or_else(|| fallback_message(status));
   let correlation_id = envelope.correlation_id;

   match status {
      401 => LawmaticsError::Authentication {
         message,
         correlation_id,
      },
      404 => LawmaticsError::NotFound {
         message,
         resource,
         correlation_id,
      },
      429 => LawmaticsError::RateLimit {
         message,
         correlation_id,
      },
      _ => LawmaticsError::Api {
         status,
         message,
         error_code: envelope.error_code,
         correlation_id,
      },
   }
}

fn fallback_message(status: u16) -> String {
   format!("リクエストが失敗しました（ステータス {status}）")
}
