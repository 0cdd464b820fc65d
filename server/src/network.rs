//! Connection acceptance and the tick-synchronized broadcast loop.
//!
//! The [`Server`] owns the listener, the world and the session handles.
//! After the player cap is reached it drives the game: sleep one tick
//! interval, drain buffered turn intents, advance the world, publish the
//! snapshot to every live session, then block on the consumption barrier
//! until each of them has relayed the snapshot to its client. No tick N+1
//! state is computed before every client has received tick N.
//!
//! The barrier is an mpsc fan-in of [`SessionEvent`]s rather than the
//! busy-wait counter of the reference design, and it copes with
//! disconnects: a `Closed` event releases that session's slot, and a
//! timeout evicts sessions that neither acknowledge nor close.

use crate::game::World;
use crate::session::{self, GameCommand, SessionEvent, SessionHandle};
use log::{debug, info, warn};
use shared::encode_snapshot;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// How long the barrier waits for a straggling session before evicting it.
const BARRIER_TIMEOUT: Duration = Duration::from_secs(5);

/// Engine lifecycle. There is no way back to `Waiting`; a fresh process
/// is required for another game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Running,
    Ended,
}

/// Startup configuration. Defaults mirror the reference constants.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_players: usize,
    pub grid_width: i32,
    pub grid_height: i32,
    pub tick_interval: Duration,
    pub desired_fruit_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_players: shared::MAX_PLAYERS,
            grid_width: shared::GRID_WIDTH,
            grid_height: shared::GRID_HEIGHT,
            tick_interval: Duration::from_millis(shared::TICK_INTERVAL_MS),
            desired_fruit_count: shared::DESIRED_FRUIT_COUNT,
        }
    }
}

/// The authoritative server: session acceptance plus the tick broadcaster.
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
    world: World,
    sessions: Vec<SessionHandle>,
    phase: Phase,
    command_tx: mpsc::UnboundedSender<GameCommand>,
    command_rx: mpsc::UnboundedReceiver<GameCommand>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Server {
    /// Binds the listener. Tests bind to port 0 and read the actual
    /// address back with [`Server::local_addr`].
    pub async fn bind(addr: &str, config: ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let world = World::new(
            config.grid_width,
            config.grid_height,
            config.desired_fruit_count,
        );

        Ok(Server {
            listener,
            config,
            world,
            sessions: Vec::new(),
            phase: Phase::Waiting,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs the whole game: accept until full, then tick until a snake
    /// dies or every session is gone.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.accept_players().await?;

        self.phase = Phase::Running;
        info!("Maximum players connected, starting game");

        let mut ticker = interval(self.config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick fires immediately; skip it so the first
        // simulation step happens one full interval after game start.
        ticker.tick().await;

        let mut tick_count: u64 = 0;

        loop {
            ticker.tick().await;

            self.drain_commands();
            let game_over = self.world.tick();
            tick_count += 1;

            let snapshot = encode_snapshot(&self.world.snapshot_cells());
            self.broadcast(&snapshot);
            self.await_barrier().await;

            if tick_count % 50 == 0 {
                debug!(
                    "Tick {}: {} live session(s), {} fruit(s)",
                    tick_count,
                    self.sessions.len(),
                    self.world.fruits().len()
                );
            }

            if game_over {
                self.phase = Phase::Ended;
                info!("A snake died on tick {}, game over", tick_count);
                break;
            }
            if self.sessions.is_empty() {
                info!("All sessions closed, stopping after tick {}", tick_count);
                break;
            }
        }

        Ok(())
    }

    /// Accepts connections until the player cap is reached, spawning a
    /// session task and a snake per player slot.
    async fn accept_players(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!(
            "Waiting for {} player(s) to connect",
            self.config.max_players
        );

        while self.sessions.len() < self.config.max_players {
            let (stream, addr) = self.listener.accept().await?;
            let player = self.sessions.len();
            info!("Accepted connection from {} as player {}", addr, player);

            let handle = session::spawn_session(
                stream,
                player,
                self.command_tx.clone(),
                self.event_tx.clone(),
            );
            self.sessions.push(handle);
            self.world.add_snake(player);
        }

        Ok(())
    }

    /// Applies every buffered turn intent. Later intents for the same
    /// player overwrite earlier ones (last write wins).
    fn drain_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                GameCommand::Turn { player, direction } => {
                    self.world.turn(player, direction);
                }
            }
        }
    }

    /// Publishes the snapshot to every live session. A session whose
    /// channel is gone is dropped from the live set right away.
    fn broadcast(&mut self, snapshot: &str) {
        self.sessions
            .retain(|s| s.snapshot_tx.send(snapshot.to_string()).is_ok());
    }

    /// Blocks until every live session has consumed the current snapshot.
    /// Sessions that close or exceed the timeout are evicted.
    async fn await_barrier(&mut self) {
        let mut pending: HashSet<usize> = self.sessions.iter().map(|s| s.player).collect();
        let gone = wait_for_consumers(&mut self.event_rx, &mut pending, BARRIER_TIMEOUT).await;
        for player in gone {
            self.sessions.retain(|s| s.player != player);
        }
    }
}

/// Waits until `pending` has drained: a `Consumed` event clears that
/// session's slot, a `Closed` event clears it and marks the session gone,
/// and a timeout marks everything still pending as gone. Returns the
/// players to remove from the live set.
async fn wait_for_consumers(
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    pending: &mut HashSet<usize>,
    barrier_timeout: Duration,
) -> Vec<usize> {
    let mut gone = Vec::new();

    while !pending.is_empty() {
        match timeout(barrier_timeout, events.recv()).await {
            Ok(Some(SessionEvent::Consumed { player })) => {
                pending.remove(&player);
            }
            Ok(Some(SessionEvent::Closed { player })) => {
                pending.remove(&player);
                gone.push(player);
            }
            Ok(None) => {
                // Every sender dropped; nothing more can arrive.
                gone.extend(pending.drain());
            }
            Err(_) => {
                warn!(
                    "Barrier timed out waiting for session(s) {:?}, evicting",
                    pending
                );
                gone.extend(pending.drain());
            }
        }
    }

    gone
}
