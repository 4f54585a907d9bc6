//! LinkStash RPC server: JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"item.add", "params":{"text":"https://example.com"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::process::ExitCode;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use linkstash::app::App;
use linkstash::rpc_handler::handle_method;
use linkstash::services::config_engine::{ConfigEngine, ConfigEngineTrait};

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    stdout.write_all(value.to_string().as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> ExitCode {
    linkstash::logging::init();

    let mut engine = ConfigEngine::new(None);
    if let Err(e) = engine.load() {
        error!(error = %e, "failed to load config");
        return ExitCode::FAILURE;
    }
    let app = match App::new(engine.effective_config()) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialize LinkStash");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout();
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if write_line(&mut stdout, &ready).await.is_err() {
        return ExitCode::FAILURE;
    }
    info!("rpc server ready");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                match handle_method(&app, method, &params).await {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if write_line(&mut stdout, &response).await.is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
