//! # エラーレスポンス
//!
//! LawMatics API が非 2xx ステータスで返すエラーボディ。
//!
//! ## 設計
//!
//! - 上流 API はどのフィールドを埋めるかが一定しないため、全フィールドを省略可能にする
//! - 文字列フィールドに数値が入っていても受け入れ、その他の型は「なし」として扱う
//! - ボディ自体が JSON でない場合は [`ErrorResponse::parse`] が `None` を返す

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// エラーレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub error:             Option<String>,
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub error_description: Option<String>,
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub message:           Option<String>,
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub error_code:        Option<String>,
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub correlation_id:    Option<String>,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub details:           Option<Value>,
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub timestamp:         Option<String>,
   #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
   pub path:              Option<String>,
}

impl ErrorResponse {
   /// エラーボディを寛容にパースする
   ///
   /// 空ボディ・不正な JSON・オブジェクト以外の JSON は `None` を返す。
   pub fn parse(body: &str) -> Option<Self> {
      if body.trim().is_empty() {
         return None;
      }
      match serde_json::from_str::<Value>(body) {
         Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
         _ => None,
      }
   }

   /// 人間向けの最適なメッセージ
   ///
   /// `message` → `error_description` → `error` の順に、空でない最初の値を返す。
   pub fn best_message(&self) -> Option<&str> {
      [&self.message, &self.error_description, &self.error]
         .into_iter()
         .filter_map(|field| field.as_deref())
         .map(str::trim)
         .find(|message| !message.is_empty())
   }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
   D: Deserializer<'de>,
{
   let value = Option::<Value>::deserialize(deserializer)?;
   Ok(match value {
      Some(Value::String(s)) => Some(s),
      Some(Value::Number(n)) => Some(n.to_string()),
      Some(Value::Bool(b)) => Some(b.to_string()),
      _ => None,
   })
}
