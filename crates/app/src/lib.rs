//! `larder-app`
//!
//! Application layer: wires the kitchen aggregate, the expiry reminder and the
//! AI gateway into one session container, plus environment configuration and
//! the demo seed used by the `larder` binary.

pub mod config;
pub mod error;
pub mod seed;
pub mod session;
pub mod summary;

pub use config::{AppConfig, ConfigError};
pub use error::SessionError;
pub use session::{InventoryRow, KitchenSession, ScanOutcome};
pub use summary::{CategoryShare, ConsumptionSummary};
