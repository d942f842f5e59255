use clap::Parser;
use client::{game, input, network, rendering};
use env_logger::Env;
use log::{error, info, warn};
use macroquad::prelude::*;
use shared::Intent;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket endpoint of the server
    #[arg(short = 's', long, default_value = "ws://127.0.0.1:3000/ws")]
    server: String,

    /// Window width
    #[arg(short = 'w', long, default_value = "600")]
    width: i32,

    /// Window height (no short flag to avoid conflict with --help)
    #[arg(long, default_value = "700")]
    height: i32,
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Noughts and Crosses".to_owned(),
        window_width: args.width,
        window_height: args.height,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    info!("Starting client...");
    info!("Controls: click a cell to play, R or the button to reset");

    let mut network = match network::NetworkClient::spawn(&args.server) {
        Ok(network) => network,
        Err(e) => {
            error!("Failed to start network thread: {}", e);
            return;
        }
    };

    let mut game = game::ClientGameState::new();
    let mut input_manager = input::InputManager::new();
    let mut renderer = rendering::Renderer::new(screen_width());

    loop {
        let layout = input::BoardLayout::new(screen_width(), screen_height());

        for state in network.poll() {
            game.apply_server_state(state);
        }

        if let Some(intent) = input_manager.update(&layout) {
            let worth_sending = match intent {
                Intent::Move { index } => game.predict_move(index),
                Intent::Reset => {
                    game.predict_reset();
                    true
                }
            };

            if worth_sending && !network.send(intent) {
                warn!("Network thread stopped; {:?} not sent", intent);
            }
        }

        let status = game.status_text();
        renderer.render(
            &layout,
            rendering::RenderConfig {
                view: game.view(),
                status: &status,
                hovered: input_manager.hovered_cell(&layout),
                connected: network.is_connected(),
                server_updates: game.server_updates(),
            },
        );

        next_frame().await;
    }
}
