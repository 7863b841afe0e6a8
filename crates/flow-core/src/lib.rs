//! FlowDistributor application core: configuration, the action-driven
//! application state, per-view list state, and vault cuts.

pub mod config;
pub mod cut;
pub mod error;
pub mod state;
pub mod view;

pub use config::{DEFAULT_CONFIG_FILE, FlowConfig};
pub use cut::cut_vault;
pub use error::{ConfigError, Result, StateError};
pub use state::{Action, AppState};
pub use view::ViewState;
