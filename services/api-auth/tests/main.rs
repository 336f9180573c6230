use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::TimeZone;
use chrono::Utc;
use elevenpaths_api_auth::{Client, Config, Credential};
use elevenpaths_core::{Context, ErrorKind, FixedClock, HttpSend, OsEnv, StaticEnv};
use elevenpaths_http_send_reqwest::ReqwestHttpSend;
use http::StatusCode;
use log::{debug, warn};
use pretty_assertions::assert_eq;

const API_HOST: &str = "http://localhost:9000";
const DEFAULT_URL: &str = "/api/0.1";
const APP_ID: &str = "iy4G8PgdwxZ6z4KhaGDK";
const APP_SECRET: &str = "sEuLkTNfPfBpZJ3bwHs4FvixsQbdDqppi8kB4rcz";
const TIMESTAMP: &str = "2015-06-23 12:48:17";

/// RecordingHttpSend keeps the last request and answers with an empty 200.
#[derive(Debug, Clone, Default)]
struct RecordingHttpSend {
    last: Arc<Mutex<Option<http::Request<Bytes>>>>,
}

impl RecordingHttpSend {
    fn take(&self) -> http::Request<Bytes> {
        self.last
            .lock()
            .expect("lock poisoned")
            .take()
            .expect("a request must have been sent")
    }
}

#[async_trait]
impl HttpSend for RecordingHttpSend {
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
    ) -> elevenpaths_core::Result<http::Response<Bytes>> {
        *self.last.lock().expect("lock poisoned") = Some(req);

        Ok(http::Response::builder()
            .status(StatusCode::OK)
            .body(Bytes::from_static(br#"{"data":{}}"#))?)
    }
}

fn init_client() -> (Client, RecordingHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = RecordingHttpSend::default();
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_clock(FixedClock::new(
            Utc.with_ymd_and_hms(2015, 6, 23, 12, 48, 17).unwrap(),
        ));
    let credential = Credential::new(APP_ID, APP_SECRET).expect("credential must be valid");
    let client = Client::new(ctx, API_HOST, credential).expect("client must be valid");

    (client, http)
}

fn header<'a>(req: &'a http::Request<Bytes>, name: &str) -> Option<&'a str> {
    req.headers().get(name).map(|v| v.to_str().expect("must be valid header"))
}

#[tokio::test]
async fn test_signature() -> Result<()> {
    let (client, http) = init_client();

    let none: [(&str, &str); 0] = [];
    let resp = client.get(DEFAULT_URL, none).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = http.take();
    assert_eq!(req.method(), http::Method::GET);
    assert_eq!(req.uri().to_string(), format!("{API_HOST}{DEFAULT_URL}"));
    assert_eq!(header(&req, "X-11Paths-Date"), Some(TIMESTAMP));
    assert_eq!(
        header(&req, "Authorization"),
        Some("11PATHS iy4G8PgdwxZ6z4KhaGDK UWB6n+14BNvQsz403ku0D8yt9B4=")
    );
    assert_eq!(header(&req, "X-11paths-Body-Hash"), None);
    assert_eq!(header(&req, "X-11paths-File-Hash"), None);
    assert_eq!(header(&req, "Content-Type"), None);
    assert!(req.body().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_signature_with_params() -> Result<()> {
    let (client, http) = init_client();

    let data = HashMap::from([("name", "Api"), ("lastName", "Sdk test")]);
    client.post_form(DEFAULT_URL, data).await?;

    let req = http.take();
    assert_eq!(req.method(), http::Method::POST);
    assert_eq!(req.uri().to_string(), format!("{API_HOST}{DEFAULT_URL}"));
    assert_eq!(header(&req, "X-11Paths-Date"), Some(TIMESTAMP));
    assert_eq!(
        header(&req, "Authorization"),
        Some("11PATHS iy4G8PgdwxZ6z4KhaGDK iL3BGCQHbUQxBVhhDqN4KM/JrrI=")
    );
    assert_eq!(
        header(&req, "Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(req.body().as_ref(), b"lastName=Sdk+test&name=Api");
    assert_eq!(header(&req, "X-11paths-Body-Hash"), None);
    Ok(())
}

#[tokio::test]
async fn test_signature_with_body() -> Result<()> {
    let (client, http) = init_client();

    let body = r#"{"name":"Test","lastName":"Api Sdk"}"#;
    client.post_json(DEFAULT_URL, body).await?;

    let req = http.take();
    assert_eq!(req.method(), http::Method::POST);
    assert_eq!(req.uri().to_string(), format!("{API_HOST}{DEFAULT_URL}"));
    assert_eq!(
        header(&req, "Authorization"),
        Some("11PATHS iy4G8PgdwxZ6z4KhaGDK 702wxyw1LLA5SnnYy1u4Zz1DT74=")
    );
    assert_eq!(
        header(&req, "X-11paths-Body-Hash"),
        Some("406c917764ee655103d12a961d28a221bd8c8d98")
    );
    assert_eq!(header(&req, "X-11Paths-Date"), Some(TIMESTAMP));
    assert_eq!(header(&req, "Content-Type"), Some("application/json"));
    assert_eq!(header(&req, "X-11paths-File-Hash"), None);
    assert_eq!(req.body().as_ref(), body.as_bytes());
    Ok(())
}

#[tokio::test]
async fn test_signature_with_file() -> Result<()> {
    let (client, http) = init_client();

    let file_content = b"Api SDK test.";
    let upload_body = Bytes::from_static(b"--boundary\r\n...\r\n--boundary--");
    client
        .post_file(
            DEFAULT_URL,
            file_content,
            upload_body.clone(),
            r#"multipart/form-data; boundary="boundary""#,
        )
        .await?;

    let req = http.take();
    assert_eq!(req.method(), http::Method::POST);
    assert_eq!(req.uri().to_string(), format!("{API_HOST}{DEFAULT_URL}"));
    assert_eq!(
        header(&req, "Authorization"),
        Some("11PATHS iy4G8PgdwxZ6z4KhaGDK deJd5LZsXAWPhXPItTks08bc2gI=")
    );
    assert_eq!(header(&req, "X-11Paths-Date"), Some(TIMESTAMP));
    assert_eq!(
        header(&req, "X-11paths-File-Hash"),
        Some("9e969e1514ba88b89e2b147220166ce7e4732509")
    );
    assert_eq!(header(&req, "X-11paths-Body-Hash"), None);
    assert_eq!(
        header(&req, "Content-Type"),
        Some(r#"multipart/form-data; boundary="boundary""#)
    );
    assert_eq!(req.body(), &upload_body);
    Ok(())
}

#[tokio::test]
async fn test_get_with_query_signs_full_path() -> Result<()> {
    let (client, http) = init_client();

    client
        .get(DEFAULT_URL, [("q", "a b"), ("page", "1")])
        .await?;

    let req = http.take();
    assert_eq!(
        req.uri().to_string(),
        format!("{API_HOST}{DEFAULT_URL}?q=a%20b&page=1")
    );

    let expected = client.signer().sign(
        &http::Method::GET,
        "/api/0.1?q=a%20b&page=1",
        TIMESTAMP,
    )?;
    assert_eq!(header(&req, "Authorization"), Some(expected.authorization()));
    Ok(())
}

#[tokio::test]
async fn test_delete_and_put() -> Result<()> {
    let (client, http) = init_client();

    client.delete("/api/0.1/resource/1").await?;
    let req = http.take();
    assert_eq!(req.method(), http::Method::DELETE);
    let expected =
        client
            .signer()
            .sign(&http::Method::DELETE, "/api/0.1/resource/1", TIMESTAMP)?;
    assert_eq!(header(&req, "Authorization"), Some(expected.authorization()));

    client.put_form(DEFAULT_URL, [("b", "2"), ("a", "1")]).await?;
    let req = http.take();
    assert_eq!(req.method(), http::Method::PUT);
    assert_eq!(req.body().as_ref(), b"a=1&b=2");
    let expected = client.signer().sign_with_params(
        &http::Method::PUT,
        DEFAULT_URL,
        TIMESTAMP,
        [("a", "1"), ("b", "2")],
    )?;
    assert_eq!(header(&req, "Authorization"), Some(expected.authorization()));

    client.put_json(DEFAULT_URL, "{}").await?;
    let req = http.take();
    assert_eq!(req.method(), http::Method::PUT);
    assert_eq!(header(&req, "Content-Type"), Some("application/json"));
    assert_eq!(
        header(&req, "X-11paths-Body-Hash"),
        Some("bf21a9e8fbc5a3846fb05b4fa0859e0917b2202f")
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_path_is_not_sent() -> Result<()> {
    let (client, http) = init_client();

    let err = client.delete("  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(http.last.lock().expect("lock poisoned").is_none());
    Ok(())
}

#[tokio::test]
async fn test_client_from_env() -> Result<()> {
    let envs = HashMap::from([
        ("ELEVENPATHS_BASE_URL".to_string(), API_HOST.to_string()),
        ("ELEVENPATHS_APP_ID".to_string(), APP_ID.to_string()),
        ("ELEVENPATHS_SECRET_KEY".to_string(), APP_SECRET.to_string()),
    ]);
    let http = RecordingHttpSend::default();
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_env(StaticEnv { envs })
        .with_clock(FixedClock::new(
            Utc.with_ymd_and_hms(2015, 6, 23, 12, 48, 17).unwrap(),
        ));

    let config = Config::new().from_env(&ctx);
    let client = Client::from_config(ctx, &config)?;
    client.delete(DEFAULT_URL).await?;

    let req = http.take();
    assert!(header(&req, "Authorization")
        .expect("authorization must be set")
        .starts_with("11PATHS iy4G8PgdwxZ6z4KhaGDK "));
    Ok(())
}

/// Sends a real request when `ELEVENPATHS_API_AUTH_TEST=on`.
#[tokio::test]
async fn test_live_get() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    if env::var("ELEVENPATHS_API_AUTH_TEST").unwrap_or_default() != "on" {
        warn!("ELEVENPATHS_API_AUTH_TEST is not set, skipped");
        return Ok(());
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::new().from_env(&ctx);
    let client = Client::from_config(ctx, &config)?;

    let path = env::var("ELEVENPATHS_API_AUTH_TEST_PATH").unwrap_or_else(|_| DEFAULT_URL.into());
    let none: [(&str, &str); 0] = [];
    let resp = client.get(&path, none).await?;

    debug!("got response: {:?}", resp);
    assert_ne!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
