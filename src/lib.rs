//! # Vigil - User Activity Watchdog
//!
//! A library and command-line utility that watches the live input stream
//! and reports a debounced two-state Running / Idle signal.
//!
//! ## Features
//!
//! - **Activity Classification**: Constant-time membership test over input
//!   event codes, with a pointer-move fast path
//! - **Inactivity Watchdog**: Restartable single-shot timer that converts
//!   event bursts into a clean Running / Idle transition
//! - **Scoped Suppression**: RAII scopes that blind the monitor while
//!   self-triggered UI (dialogs, prompts) is on screen
//! - **Cross-Thread Publishing**: State changes marshaled in order to a
//!   single consumer, with an always-current polled value
//! - **Degraded Mode**: A refused event tap is reported and the monitor
//!   settles to Idle instead of crashing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
