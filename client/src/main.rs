use clap::Parser;
use client::{input, network::Connection, rendering};
use log::{info, warn};
use shared::parse_snapshot;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:1025")]
    server: String,

    /// Grid width in cells
    #[arg(long, default_value_t = shared::GRID_WIDTH)]
    grid_width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = shared::GRID_HEIGHT)]
    grid_height: i32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    info!("Connecting to: {}", args.server);
    info!("Controls: type w/a/s/d and press enter");

    let mut conn = Connection::connect(&args.server).await?;
    conn.send_join().await?;
    let (mut commands, mut snapshots) = conn.split();

    // Stdin runs in its own task so a pending read never stalls the
    // snapshot stream.
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            for key in line.chars() {
                if let Some(dir) = input::direction_for_key(key) {
                    if key_tx.send(dir).is_err() {
                        return;
                    }
                }
            }
        }
    });

    let mut stdin_open = true;
    loop {
        tokio::select! {
            chunk = snapshots.recv_chunk() => {
                match chunk? {
                    None => {
                        info!("Server closed the connection");
                        break;
                    }
                    Some(text) => {
                        let cells = parse_snapshot(&text);
                        // Clear and redraw; the latest chunk wins.
                        print!(
                            "\x1B[2J\x1B[H{}",
                            rendering::render_frame(
                                &cells,
                                args.grid_width as usize,
                                args.grid_height as usize,
                            )
                        );
                    }
                }
            }
            dir = key_rx.recv(), if stdin_open => {
                match dir {
                    Some(dir) => {
                        if let Err(e) = commands.send_command(dir).await {
                            warn!("Failed to send command: {}", e);
                            break;
                        }
                    }
                    None => stdin_open = false,
                }
            }
        }
    }

    Ok(())
}
