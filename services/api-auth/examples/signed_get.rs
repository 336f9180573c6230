use anyhow::Result;
use elevenpaths_api_auth::{Client, Config};
use elevenpaths_core::{Context, OsEnv};
use elevenpaths_http_send_reqwest::ReqwestHttpSend;

/// Send a signed GET to the API described by `ELEVENPATHS_*` env values.
///
/// Set `ELEVENPATHS_PROXY` to route the request through a proxy.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let http = match std::env::var("ELEVENPATHS_PROXY") {
        Ok(proxy) => ReqwestHttpSend::with_proxy(&proxy)?,
        Err(_) => ReqwestHttpSend::default(),
    };
    let ctx = Context::new().with_http_send(http).with_env(OsEnv);

    let config = Config::new().from_env(&ctx);
    println!("Using config: {config:?}");

    let client = Client::from_config(ctx, &config)?;
    let path = std::env::args().nth(1).unwrap_or_else(|| "/api/0.1".to_string());
    let none: [(&str, &str); 0] = [];

    let resp = client.get(&path, none).await?;
    println!("Response status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
