use futures::{SinkExt, StreamExt};
use number_draw::data::{ClientMessage, GenerateRequest, GenerateResponse};
use number_draw::generator::Snapshot;
use serde_json::Value;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

fn print_snapshot(label: &str, snapshot: &Snapshot) {
    println!(
        "....[{label}] history={:?} total={} average={} last={}",
        snapshot.history,
        snapshot.total_count,
        snapshot.average,
        snapshot.last_time.as_deref().unwrap_or("--:--")
    );
}

async fn spin_over_websocket(range: GenerateRequest) -> Result<(), Box<dyn std::error::Error>> {
    let ws_url = "ws://127.0.0.1:3000/ws";
    let (ws_stream, _) = connect_async(ws_url).await?;
    let (mut write, mut read) = ws_stream.split();
    println!("....[WS] Connected!");

    let msg = serde_json::to_string(&ClientMessage::Generate(range))?;
    write.send(Message::Text(msg.into())).await?;

    while let Some(msg) = read.next().await {
        let msg = msg?;
        if !msg.is_text() {
            continue;
        }
        let value: Value = serde_json::from_str(msg.to_text()?)?;
        match value["type"].as_str() {
            Some("SPIN_FRAME") => print!("{} ", value["payload"]["value"]),
            Some("SPIN_SETTLED") => {
                println!("\n....[WS] Settled on {}", value["payload"]["value"]);
                break;
            }
            Some("ERROR") => {
                println!("....[WS] Error: {}", value["payload"]["message"]);
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base_url = "http://127.0.0.1:3000";

    println!("--- 🎲 NUMBER DRAW TEST CLIENT ---");

    println!("\n[1] Reading state...");
    let snapshot = client.get(format!("{}/state", base_url)).send().await?.json::<Snapshot>().await?;
    print_snapshot("State", &snapshot);

    println!("\n[2] Generating over REST...");
    let resp = client
        .post(format!("{}/generate", base_url))
        .json(&GenerateRequest { min: 1, max: 100 })
        .send()
        .await?
        .json::<GenerateResponse>()
        .await?;
    println!("Success! Drew {}", resp.value);
    print_snapshot("State", &resp.snapshot);

    println!("\n[3] Spinning over WebSocket...");
    spin_over_websocket(GenerateRequest { min: 1, max: 6 }).await?;

    Ok(())
}
