use anyhow::Result;
use chrono::SecondsFormat;
use env_logger::Env;
use log::info;
use tokio::sync::mpsc;

use pump_launch_monitor::{LaunchMonitor, LaunchRecord, MonitorConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = MonitorConfig::default();
    if let Ok(rpc_url) = std::env::var("RPC_URL") {
        config.rpc_url = rpc_url;
    }
    if let Ok(ws_url) = std::env::var("WS_URL") {
        config.ws_url = ws_url;
    }
    info!("watching pump.fun launches via {}", config.ws_url);

    let (record_tx, mut record_rx) = mpsc::channel::<LaunchRecord>(config.channel_capacity);
    tokio::spawn(async move {
        while let Some(record) = record_rx.recv().await {
            println!("Transaction {}", record.signature);
            match &record.launch {
                Some(launch) => println!("Mint Details {:#?}", launch),
                None => println!("Mint Details none"),
            }
            println!(
                "Date {}",
                record.observed_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
        }
    });

    let monitor = LaunchMonitor::new(config);
    monitor.run(record_tx).await?;
    Ok(())
}
