use clap::Parser;
use log::{error, info};
use server::network::{Server, ServerConfig};
use std::time::Duration;

/// Command line arguments. Defaults reproduce the reference
/// configuration: port 1025, 100 ms ticks, a single player, a 32x24 grid
/// and one fruit on the board.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = "0.0.0.0")]
    host: String,
    /// Server port to listen on
    #[clap(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,
    /// Tick interval in milliseconds
    #[clap(short, long, default_value_t = shared::TICK_INTERVAL_MS)]
    tick_ms: u64,
    /// Number of players to wait for before the game starts
    #[clap(short, long, default_value_t = shared::MAX_PLAYERS)]
    max_players: usize,
    /// Grid width in cells
    #[clap(long, default_value_t = shared::GRID_WIDTH)]
    grid_width: i32,
    /// Grid height in cells
    #[clap(long, default_value_t = shared::GRID_HEIGHT)]
    grid_height: i32,
    /// Number of fruits kept on the board
    #[clap(short, long, default_value_t = shared::DESIRED_FRUIT_COUNT)]
    fruits: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let config = ServerConfig {
        max_players: args.max_players,
        grid_width: args.grid_width,
        grid_height: args.grid_height,
        tick_interval: Duration::from_millis(args.tick_ms),
        desired_fruit_count: args.fruits,
    };

    let address = format!("{}:{}", args.host, args.port);
    let mut server = Server::bind(&address, config).await?;

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Server error: {}", e);
        }
    });

    // Run until the game ends or the operator interrupts.
    tokio::select! {
        result = server_handle => {
            if let Err(e) = result {
                error!("Server task panicked: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
