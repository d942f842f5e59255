use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use shared::{decode_state, encode_intent, GameState, Intent};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Headless peer: plays a fixed list of cells and prints every state it sees
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket endpoint of the server
    #[arg(short, long, default_value = "ws://127.0.0.1:3000/ws")]
    server: String,

    /// Reset the board before playing
    #[arg(short, long)]
    reset: bool,

    /// Cells to play, in order (0-8, row-major)
    moves: Vec<usize>,
}

fn print_state(state: &GameState) {
    for row in state.board.chunks(3) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| cell.map_or_else(|| ".".to_string(), |mark| mark.to_string()))
            .collect();
        println!("  {}", line.join(" "));
    }

    match (state.game_over, state.winner) {
        (true, Some(winner)) => println!("  winner: {}", winner),
        (true, None) => println!("  draw"),
        _ => println!("  to move: {}", state.current_player),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Connecting to {}", args.server);
    let (stream, _) = connect_async(args.server.as_str()).await?;
    let (mut sink, mut source) = stream.split();

    let mut intents = Vec::new();
    if args.reset {
        intents.push(Intent::Reset);
    }
    intents.extend(args.moves.iter().map(|&index| Intent::Move { index }));

    // Initial snapshot arrives on connect
    if let Some(Ok(Message::Text(text))) = source.next().await {
        println!("Connected, current state:");
        print_state(&decode_state(text.as_str())?);
    }

    for intent in intents {
        println!("Sending {:?}", intent);
        sink.send(Message::text(encode_intent(&intent)?)).await?;

        match timeout(Duration::from_millis(500), source.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => print_state(&decode_state(text.as_str())?),
            Ok(Some(Ok(other))) => println!("Unexpected frame: {:?}", other),
            Ok(Some(Err(e))) => return Err(e.into()),
            Ok(None) => {
                println!("Server closed the connection");
                return Ok(());
            }
            Err(_) => println!("  (ignored by server)"),
        }

        sleep(Duration::from_millis(200)).await;
    }

    sink.close().await?;
    println!("Test client finished");

    Ok(())
}
