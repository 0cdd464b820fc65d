//! # Snake Game Server Library
//!
//! Authoritative server for a grid-based multiplayer snake game. The
//! server owns the only copy of the world, advances it on a fixed tick,
//! accepts single-byte turn commands from connected players and broadcasts
//! the serialized world to every client once per tick.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! All movement, collision and growth decisions are made here. Clients
//! send intents and render whatever entity list the server last sent;
//! they never simulate on their own.
//!
//! ### Tick-Synchronized Broadcast
//! Every tick produces exactly one snapshot, delivered to every connected
//! session. The broadcaster then blocks on a consumption barrier until
//! each session has relayed the snapshot to its client, so no client can
//! fall a tick behind or skip ahead. Throughput is deliberately limited
//! by the slowest client.
//!
//! ### Session Lifecycle
//! Connections are accepted up to a fixed player cap; each gets a player
//! slot, a snake, and a dedicated task that interleaves input draining
//! with snapshot relay. Disconnected sessions are evicted from the
//! barrier instead of deadlocking it.
//!
//! ## Module Organization
//!
//! ### Entity Module (`entity`)
//! The [`entity::Snake`] data model and its per-tick transition rules:
//! the no-reversal turn rule, body shifting, wall and self collision,
//! fruit consumption and pending growth.
//!
//! ### Game Module (`game`)
//! The [`game::World`]: the tick pipeline over all snakes, turn-intent
//! routing, fruit replenishment and snapshot cell extraction.
//!
//! ### Session Module (`session`)
//! Per-connection tasks plus the command/event message types that link
//! sessions to the tick loop.
//!
//! ### Network Module (`network`)
//! The [`network::Server`]: listener, accept-until-full phase, the tick
//! loop and the consumption barrier.
//!
//! ## Concurrency Model
//!
//! One task per connected client plus the broadcaster task. The world is
//! mutated only by the broadcaster; player intents travel over an mpsc
//! channel and are drained at the start of each tick with last-write-wins
//! semantics per player, so no lock guards the world itself.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut server = Server::bind("127.0.0.1:1025", ServerConfig::default()).await?;
//!     // Accepts players, then ticks until a snake dies.
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod game;
pub mod network;
pub mod session;
