//! # Snake Client Stub
//!
//! A thin terminal client for the authoritative snake server. It does only
//! three things:
//!
//! - sends the opaque join message and then single-byte turn commands,
//! - reads raw snapshot text chunks from the server,
//! - renders the parsed entity list as an ASCII grid.
//!
//! There is no prediction, no local simulation and no reconciliation: the
//! server's snapshot *is* the game state, and the stub draws the latest
//! chunk it managed to read. Turn commands are typed as WASD characters
//! followed by enter (line-based standard input).
//!
//! ## Module Organization
//!
//! - `network`: the TCP connection, join/command sending and chunked
//!   snapshot reads.
//! - `input`: WASD character-to-direction mapping.
//! - `rendering`: snapshot cells to an ASCII frame.

pub mod input;
pub mod network;
pub mod rendering;
