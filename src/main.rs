//! Command-line front end for LinkStash.
//!
//! Usage:
//!   linkstash add <text>
//!   linkstash list
//!   linkstash remove <id>
//!   linkstash quota
//!   linkstash config get | set <key> <json> | reset

use std::process::ExitCode;

use linkstash::app::App;
use linkstash::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use linkstash::services::url_validator::is_valid_url;
use linkstash::types::item::Item;

const USAGE: &str = "usage: linkstash <add TEXT | list | remove ID | quota | config get|set KEY JSON|reset>";

fn print_item(item: &Item) {
    let marker = if is_valid_url(&item.text) { "link" } else { "note" };
    if item.title.is_empty() {
        println!("{:>15}  [{}] {}", item.id, marker, item.text);
    } else {
        println!("{:>15}  [{}] {} ({})", item.id, marker, item.text, item.title);
    }
}

fn run_config(engine: &mut ConfigEngine, args: &[String]) -> Result<(), String> {
    match args.first().map(String::as_str) {
        Some("get") | None => {
            let json = serde_json::to_string_pretty(engine.get_config()).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        Some("set") => {
            let key = args.get(1).ok_or(USAGE)?;
            let raw = args.get(2).ok_or(USAGE)?;
            // Bare words are taken as JSON strings
            let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::json!(raw));
            engine.set_value(key, value).map_err(|e| e.to_string())?;
            println!("{} updated", key);
        }
        Some("reset") => {
            engine.reset().map_err(|e| e.to_string())?;
            println!("config reset to defaults");
        }
        Some(other) => return Err(format!("unknown config command: {}", other)),
    }
    Ok(())
}

async fn run(args: Vec<String>) -> Result<(), String> {
    let mut engine = ConfigEngine::new(None);
    engine.load().map_err(|e| e.to_string())?;

    let command = args.first().map(String::as_str).ok_or(USAGE)?;
    if command == "config" {
        return run_config(&mut engine, &args[1..]);
    }

    let app = App::new(engine.effective_config()).map_err(|e| e.to_string())?;
    match command {
        "add" => {
            let text = args[1..].join(" ");
            match app.list.add(&text).await.map_err(|e| e.to_string())? {
                Some(item) => print_item(&item),
                None => println!("nothing to save"),
            }
        }
        "list" => {
            let items = app.list.items().await;
            if items.is_empty() {
                println!("no saved items");
            }
            for item in &items {
                print_item(item);
            }
        }
        "remove" => {
            let id: i64 = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .ok_or("remove needs a numeric id")?;
            if app.list.remove(id).await.map_err(|e| e.to_string())? {
                println!("deleted {}", id);
            } else {
                println!("no item with id {}", id);
            }
        }
        "quota" => {
            let quota = app.list.quota().await;
            println!(
                "used {} bytes, {} bytes left ({:.2}%)",
                quota.used_bytes, quota.remaining_bytes, quota.remaining_percent
            );
        }
        other => return Err(format!("unknown command: {}\n{}", other, USAGE)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    linkstash::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
