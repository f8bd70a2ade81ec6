//! Configuration loading and management for the Rate Engine.
//!
//! This module loads hotel configuration from YAML files (metadata, room
//! types, dated base tariffs, rate windows and POS staff), validates rate
//! windows at write time, and holds the live rate window registry.
//!
//! # Example
//!
//! ```no_run
//! use rate_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/grand_hotel").unwrap();
//! println!("Loaded hotel: {}", config.hotel().name);
//! ```

mod loader;
mod registry;
mod settings;
mod types;
mod validation;

pub use loader::ConfigLoader;
pub use registry::RateWindowRegistry;
pub use settings::{ADDR_VAR, CONFIG_DIR_VAR, SESSION_TTL_VAR, ServerSettings};
pub use types::{
    HotelConfig, HotelMetadata, RateWindowsConfig, RoomType, RoomTypesConfig, StaffConfig,
    TariffConfig,
};
pub use validation::{
    MAX_ADJUSTMENT_VALUE, check_adjustment_bound, validate_rate_window, validate_rate_windows,
};
