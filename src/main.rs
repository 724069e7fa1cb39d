use dotenvy::dotenv;
use log::info;
use serde_json::json;
use std::env;

use pow_ledger::blockchain::{Block, Blockchain, DEFAULT_DIFFICULTY};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv();
    env_logger::init();

    let difficulty: u32 = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);

    let mut bc = Blockchain::new()?;
    info!("chain started, mining at difficulty {difficulty}");

    for payload in [
        json!("This is a mined block"),
        json!({ "memo": "another mined block" }),
    ] {
        let block = Block::new(bc.len() as u64, chrono::Utc::now().timestamp(), payload)?;
        bc.append(block, difficulty)?;
    }

    let verdict = bc.validate()?;
    println!("audit: {}", serde_json::to_string(&verdict)?);
    println!("{}", serde_json::to_string_pretty(&bc.chain)?);
    Ok(())
}
