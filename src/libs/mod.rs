//! Core library modules for the vigil watchdog.
//!
//! Serves as the main entry point for all vigil library components.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Activity Detection**: Event classification, scope-gated tap, input listener
//! - **Signal Shaping**: Inactivity watchdog timer, state publishing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::libs::config::MonitorConfig;
//! use vigil::libs::listener::RdevBackend;
//! use vigil::libs::monitor::ActivityMonitor;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = MonitorConfig::default();
//! let (monitor, _states) = ActivityMonitor::new(&config, Arc::new(RdevBackend::new()))?;
//! monitor.start();
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod config;
pub mod data_storage;
pub mod listener;
pub mod messages;
pub mod monitor;
pub mod state;
pub mod tap;
pub mod watchdog;
