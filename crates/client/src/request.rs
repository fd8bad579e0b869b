//! # リクエスト記述
//!
//! ディスパッチャに渡す 1 回分の API 呼び出しを値として表現する。

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientErrorKind, LawmaticsError, ResourceRef};

/// HTTP メソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
   Get,
   Post,
   Put,
   Patch,
   Delete,
}

impl HttpMethod {
   pub fn as_str(&self) -> &'static str {
      match self {
         Self::Get => "GET",
         Self::Post => "POST",
         Self::Put => "PUT",
         Self::Patch => "PATCH",
         Self::Delete => "DELETE",
      }
   }
}

impl fmt::Display for HttpMethod {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

impl From<HttpMethod> for reqwest::Method {
   fn from(method: HttpMethod) -> Self {
      match method {
         HttpMethod::Get => reqwest::Method::GET,
         HttpMethod::Post => reqwest::Method::POST,
         HttpMethod::Put => reqwest::Method::PUT,
         HttpMethod::Patch => reqwest::Method::PATCH,
         HttpMethod::Delete => reqwest::Method::DELETE,
      }
   }
}

/// API リクエスト
///
/// `path` はベース URL からの相対パス（クエリ文字列を含んでよい）。
/// ボディは JSON 値として保持し、送信時にディスパッチャの
/// [`JsonOptions`](lawmatics_shared::JsonOptions) が適用される。
#[derive(Debug, Clone)]
pub struct ApiRequest {
   pub method:       HttpMethod,
   pub path:         String,
   pub body:         Option<Value>,
   pub resource:     Option<ResourceRef>,
   pub cancellation: Option<CancellationToken>,
}

impl ApiRequest {
   pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
      Self {
         method,
         path: path.into(),
         body: None,
         resource: None,
         cancellation: None,
      }
   }

   pub fn get(path: impl Into<String>) -> Self {
      Self::new(HttpMethod::Get, path)
   }

   pub fn post(path: impl Into<String>) -> Self {
      Self::new(HttpMethod::Post, path)
   }

   pub fn put(path: impl Into<String>) -> Self {
      Self::new(HttpMethod::Put, path)
   }

   pub fn patch(path: impl Into<String>) -> Self {
      Self::new(HttpMethod::Patch, path)
   }

   pub fn delete(path: impl Into<String>) -> Self {
      Self::new(HttpMethod::Delete, path)
   }

   /// ボディをシリアライズして設定する
   ///
   /// シリアライズに失敗した場合は [`ClientErrorKind::Serialization`] の
   /// クライアントエラーを返す。
   pub fn json<B>(self, body: &B) -> Result<Self, LawmaticsError>
   where
      B: Serialize + ?Sized,
   {
      let value = serde_json::to_value(body).map_err(|e| {
         LawmaticsError::client(
            ClientErrorKind::Serialization,
            "リクエストボディのシリアライズに失敗しました",
            e,
         )
      })?;
      Ok(self.body(value))
   }

   /// シリアライズ済みのボディを設定する
   pub fn body(mut self, body: Value) -> Self {
      self.body = Some(body);
      self
   }

   /// 404 のときにエラーへ付与するリソース情報を設定する
   pub fn resource(mut self, kind: impl Into<String>, id: impl fmt::Display) -> Self {
      self.resource = Some(ResourceRef::new(kind, id));
      self
   }

   /// キャンセルトークンを設定する
   pub fn cancel_on(mut self, token: CancellationToken) -> Self {
      self.cancellation = Some(token);
      self
   }
}
