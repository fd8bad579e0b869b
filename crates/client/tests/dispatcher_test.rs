//! ディスパッチャ統合テスト
//!
//! wiremock で LawMatics API を模したサーバーを起動し、実際の HTTP 通信を通して
//! ステータスコードごとの結果変換・ヘッダー・ボディ・キャンセルを検証する。
//!
//! ## 実行方法
//!
//! ```bash
//! cargo test -p lawmatics-client --test dispatcher_test
//! ```
//!
//! ## テストケース
//!
//! - 200 + エンベロープ → `data` がそのまま取り出せる
//! - 204 + 空ボディ → デフォルト値
//! - 401 / 404 / 429 / その他 → 対応するエラー種別
//! - 非 JSON のエラーボディ → 汎用メッセージへのフォールバック
//! - 2xx の不正ボディ → デシリアライズエラー
//! - POST ボディの null フィールド除外・認証ヘッダー付与
//! - 応答待ち中のキャンセル → `Cancelled`
//! - 通信失敗・タイムアウト → 通信エラー

use std::time::{Duration, Instant};

use lawmatics_client::{
   ApiRequest,
   ApiResponse,
   ClientConfig,
   ClientErrorKind,
   Credentials,
   Dispatcher,
   JsonOptions,
   LawmaticsError,
   ResourceRef,
};
use lawmatics_shared::observability::{LogFormat, TracingConfig, init_tracing};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::{
   Mock,
   MockServer,
   ResponseTemplate,
   matchers::{body_json, header, method, path, query_param},
};

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
struct Company {
   id:   u64,
   name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum ContactStatus {
   Lead,
}

#[derive(Debug, Serialize)]
struct CreateContact {
   first_name: String,
   last_name:  String,
   email:      Option<String>,
   status:     ContactStatus,
}

/// テスト用のディスパッチャを作成する
///
/// ログは `RUST_LOG` を指定したときだけ見えればよいので、初期化の失敗
/// （他のテストで初期化済み）は無視する。
fn dispatcher_for(server: &MockServer) -> Dispatcher {
   let _ = init_tracing(TracingConfig::new(LogFormat::Pretty));

   let config = ClientConfig::new(&format!("{}/v1", server.uri()))
      .unwrap()
      .with_credentials(Credentials::new("test-token"));
   Dispatcher::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_200のエンベロープからdataを取り出す() -> anyhow::Result<()> {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/companies/7"))
      .respond_with(
         ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 7, "name": "Acme"}})),
      )
      .expect(1)
      .mount(&server)
      .await;

   let response: ApiResponse<Company> = dispatcher_for(&server).get("companies/7").await?;

   assert_eq!(
      response.data,
      Company {
         id:   7,
         name: "Acme".to_string(),
      }
   );
   Ok(())
}

#[tokio::test]
async fn test_ページネーションとクエリ文字列がそのまま通る() -> anyhow::Result<()> {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/companies"))
      .and(query_param("page", "2"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
         "data": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
         "pagination": {
            "current_page": 2, "per_page": 2, "total": 6, "total_pages": 3,
            "has_next": true, "has_prev": true
         },
         "correlation_id": "corr-42"
      })))
      .mount(&server)
      .await;

   let response: ApiResponse<Vec<Company>> =
      dispatcher_for(&server).get("companies?page=2").await?;

   assert_eq!(response.data.len(), 2);
   let pagination = response.pagination.unwrap();
   assert_eq!(pagination.next_page(), Some(3));
   assert_eq!(pagination.total, 6);
   assert_eq!(response.correlation_id.as_deref(), Some("corr-42"));
   Ok(())
}

#[tokio::test]
async fn test_204の空ボディでdeleteが成功する() -> anyhow::Result<()> {
   let server = MockServer::start().await;
   Mock::given(method("DELETE"))
      .and(path("/v1/matters/15"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&server)
      .await;

   let response: ApiResponse<()> = dispatcher_for(&server).delete("matters/15").await?;

   assert_eq!(response, ApiResponse::empty());
   Ok(())
}

#[tokio::test]
async fn test_404はメッセージとリソース情報を持つnot_foundになる() {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/contacts/99"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
      .mount(&server)
      .await;

   let request = ApiRequest::get("contacts/99").resource("contact", 99);
   let error = dispatcher_for(&server)
      .execute::<Company>(request)
      .await
      .unwrap_err();

   match error {
      LawmaticsError::NotFound {
         message, resource, ..
      } => {
         assert_eq!(message, "not found");
         assert_eq!(resource, Some(ResourceRef::new("contact", 99)));
      }
      other => panic!("NotFound を期待したが {other:?} を受け取った"),
   }
}

#[tokio::test]
async fn test_429の非jsonボディは汎用メッセージのrate_limitになる() {
   let server = MockServer::start().await;
   Mock::given(method("POST"))
      .and(path("/v1/tasks"))
      .respond_with(ResponseTemplate::new(429).set_body_string("<html>Too Many</html>"))
      .mount(&server)
      .await;

   let error = dispatcher_for(&server)
      .post::<_, Company>("tasks", &json!({"name": "Call client"}))
      .await
      .unwrap_err();

   assert!(matches!(error, LawmaticsError::RateLimit { .. }));
   assert_eq!(error.message(), "リクエストが失敗しました（ステータス 429）");
}

#[tokio::test]
async fn test_401はボディがパースできなくてもauthenticationになる() {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/users/me"))
      .respond_with(ResponseTemplate::new(401).set_body_string("{broken"))
      .mount(&server)
      .await;

   let error = dispatcher_for(&server)
      .get::<Company>("users/me")
      .await
      .unwrap_err();

   assert!(matches!(error, LawmaticsError::Authentication { .. }));
   assert_eq!(error.status(), Some(401));
}

#[rstest]
#[case(400)]
#[case(403)]
#[case(409)]
#[case(422)]
#[case(500)]
#[case(502)]
#[tokio::test]
async fn test_その他のステータスは実際のステータスを持つapiエラーになる(#[case] status: u16) {
   let server = MockServer::start().await;
   Mock::given(method("PUT"))
      .and(path("/v1/events/3"))
      .respond_with(ResponseTemplate::new(status).set_body_json(json!({
         "error": "request_failed",
         "error_code": "E_UPSTREAM",
         "correlation_id": "corr-err"
      })))
      .mount(&server)
      .await;

   let error = dispatcher_for(&server)
      .put::<_, Company>("events/3", &json!({"name": "Hearing"}))
      .await
      .unwrap_err();

   match error {
      LawmaticsError::Api {
         status: actual,
         message,
         error_code,
         correlation_id,
      } => {
         assert_eq!(actual, status);
         assert_eq!(message, "request_failed");
         assert_eq!(error_code.as_deref(), Some("E_UPSTREAM"));
         assert_eq!(correlation_id.as_deref(), Some("corr-err"));
      }
      other => panic!("Api を期待したが {other:?} を受け取った"),
   }
}

#[tokio::test]
async fn test_2xxの不正ボディはデシリアライズエラーになる() {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/companies/1"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
      .mount(&server)
      .await;

   let error = dispatcher_for(&server)
      .get::<Company>("companies/1")
      .await
      .unwrap_err();

   assert!(matches!(
      error,
      LawmaticsError::Client {
         kind: ClientErrorKind::Deserialization,
         ..
      }
   ));
}

#[tokio::test]
async fn test_postボディはnullを除外し認証ヘッダーを付けて送る() -> anyhow::Result<()> {
   let server = MockServer::start().await;
   Mock::given(method("POST"))
      .and(path("/v1/contacts"))
      .and(header("authorization", "Bearer test-token"))
      .and(header("accept", "application/json"))
      .and(header("content-type", "application/json"))
      .and(body_json(json!({
         "first_name": "Ada",
         "last_name": "Lovelace",
         "status": "lead"
      })))
      .respond_with(
         ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 1, "name": "Ada"}})),
      )
      .expect(1)
      .mount(&server)
      .await;

   let body = CreateContact {
      first_name: "Ada".to_string(),
      last_name:  "Lovelace".to_string(),
      email:      None,
      status:     ContactStatus::Lead,
   };
   let response: ApiResponse<Company> = dispatcher_for(&server).post("contacts", &body).await?;

   assert_eq!(response.data.id, 1);
   Ok(())
}

#[tokio::test]
async fn test_omit_nullsを無効にするとnullも送る() -> anyhow::Result<()> {
   let server = MockServer::start().await;
   Mock::given(method("PATCH"))
      .and(path("/v1/contacts/1"))
      .and(body_json(json!({"email": null})))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
      .expect(1)
      .mount(&server)
      .await;

   let config = ClientConfig::new(&format!("{}/v1", server.uri()))?
      .with_json_options(JsonOptions { omit_nulls: false });
   let dispatcher = Dispatcher::from_config(&config)?;

   let response: ApiResponse<Option<Company>> = dispatcher
      .patch("contacts/1", &json!({"email": null}))
      .await?;

   assert_eq!(response.data, None);
   Ok(())
}

#[tokio::test]
async fn test_応答待ち中にキャンセルするとcancelledで終わる() {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/files"))
      .respond_with(
         ResponseTemplate::new(200)
            .set_body_json(json!({"data": []}))
            .set_delay(Duration::from_secs(10)),
      )
      .mount(&server)
      .await;

   let dispatcher = dispatcher_for(&server);
   let token = CancellationToken::new();
   let canceller = token.clone();
   tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(100)).await;
      canceller.cancel();
   });

   let started = Instant::now();
   let result = dispatcher
      .execute::<Vec<Company>>(ApiRequest::get("files").cancel_on(token))
      .await;

   assert!(matches!(result, Err(LawmaticsError::Cancelled)));
   assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_トランスポートのタイムアウトは通信エラーになる() {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/payments"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
      .mount(&server)
      .await;

   let config = ClientConfig::new(&format!("{}/v1", server.uri()))
      .unwrap()
      .with_timeout(Duration::from_millis(200));
   let dispatcher = Dispatcher::from_config(&config).unwrap();

   let error = dispatcher.get::<()>("payments").await.unwrap_err();

   assert!(matches!(
      error,
      LawmaticsError::Client {
         kind: ClientErrorKind::Transport,
         ..
      }
   ));
   assert!(!error.is_cancelled());
}

#[tokio::test]
async fn test_接続できないサーバーへの送信は通信エラーになる() {
   // 空きポートを確保してすぐに解放し、接続拒否を起こす
   let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
   let addr = listener.local_addr().unwrap();
   drop(listener);

   let config = ClientConfig::new(&format!("http://{addr}/v1")).unwrap();
   let dispatcher = Dispatcher::from_config(&config).unwrap();

   let error = dispatcher.get::<Company>("contacts").await.unwrap_err();

   assert!(matches!(
      error,
      LawmaticsError::Client {
         kind: ClientErrorKind::Transport,
         ..
      }
   ));
   assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_同時に複数のリクエストを実行できる() -> anyhow::Result<()> {
   let server = MockServer::start().await;
   Mock::given(method("GET"))
      .and(path("/v1/companies/1"))
      .respond_with(
         ResponseTemplate::new(200)
            .set_body_json(json!({"data": {"id": 1, "name": "One"}}))
            .set_delay(Duration::from_millis(200)),
      )
      .mount(&server)
      .await;
   Mock::given(method("GET"))
      .and(path("/v1/companies/2"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&server)
      .await;

   let dispatcher = dispatcher_for(&server);
   let other = dispatcher.clone();

   let (first, second) = tokio::join!(
      dispatcher.get::<Company>("companies/1"),
      other.get::<Company>("companies/2"),
   );

   assert_eq!(first?.data.name, "One");
   assert!(matches!(second, Err(LawmaticsError::NotFound { .. })));
   Ok(())
}
