//! # API レスポンスエンベロープ
//!
//! LawMatics API の成功レスポンス形式
//! `{ "data": T, "pagination": ..., "correlation_id": ..., "meta": ... }` を提供する。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::PaginationInfo;

/// 成功レスポンスの共通型
///
/// `data` 以外のフィールドはすべて省略可能。`data` が欠落または `null` の場合は
/// `T::default()` として扱う（204 No Content 等の空ボディも同様）。
///
/// ## 使用例
///
/// ```
/// use lawmatics_shared::ApiResponse;
///
/// let response: ApiResponse<Vec<u32>> = serde_json::from_str(r#"{"data": null}"#).unwrap();
/// assert!(response.data.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ApiResponse<T> {
   #[serde(default, deserialize_with = "null_as_default")]
   pub data:           T,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub pagination:     Option<PaginationInfo>,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub correlation_id: Option<String>,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub meta:           Option<Map<String, Value>>,
}

impl<T> ApiResponse<T> {
   /// `data` のみを持つレスポンスを作成する
   pub fn new(data: T) -> Self {
      Self {
         data,
         pagination: None,
         correlation_id: None,
         meta: None,
      }
   }

   /// ペイロードを取り出す
   pub fn into_data(self) -> T {
      self.data
   }
}

impl<T: Default> ApiResponse<T> {
   /// 空ボディ用のレスポンス
   pub fn empty() -> Self {
      Self::new(T::default())
   }
}

impl<T: Default> Default for ApiResponse<T> {
   fn default() -> Self {
      Self::empty()
   }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
   D: Deserializer<'de>,
   T: Deserialize<'de> + Default,
{
   Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
