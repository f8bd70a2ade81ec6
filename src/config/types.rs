//! Configuration types for hotel rate resolution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{RateWindow, StaffMember};

/// Metadata about the hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelMetadata {
    /// Short hotel code (e.g., "GRAND").
    pub code: String,
    /// The hotel's display name.
    pub name: String,
    /// ISO 4217 currency code tariffs are expressed in.
    pub currency: String,
}

/// A bookable room type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    /// The human-readable name of the room type.
    pub name: String,
    /// Maximum number of guests.
    pub capacity: u32,
    /// A description of the room type.
    #[serde(default)]
    pub description: String,
}

/// Room types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomTypesConfig {
    /// Map of room type code to room type details.
    pub room_types: HashMap<String, RoomType>,
}

/// Nightly base tariffs effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffConfig {
    /// The effective date for these tariffs.
    pub effective_date: NaiveDate,
    /// Map of room type code to nightly tariff.
    pub nightly: HashMap<String, Decimal>,
}

/// Rate windows configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RateWindowsConfig {
    /// The configured rate windows, in tie-break order.
    #[serde(default)]
    pub rate_windows: Vec<RateWindow>,
}

/// Staff configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffConfig {
    /// Staff members allowed to open POS sessions.
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

/// The complete hotel configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct HotelConfig {
    metadata: HotelMetadata,
    room_types: HashMap<String, RoomType>,
    /// Tariff configurations by effective date (sorted oldest first).
    tariffs: Vec<TariffConfig>,
    rate_windows: Vec<RateWindow>,
    staff: Vec<StaffMember>,
}

impl HotelConfig {
    /// Creates a new HotelConfig from its component parts.
    pub fn new(
        metadata: HotelMetadata,
        room_types: HashMap<String, RoomType>,
        tariffs: Vec<TariffConfig>,
        rate_windows: Vec<RateWindow>,
        staff: Vec<StaffMember>,
    ) -> Self {
        let mut sorted_tariffs = tariffs;
        sorted_tariffs.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            room_types,
            tariffs: sorted_tariffs,
            rate_windows,
            staff,
        }
    }

    /// Returns the hotel metadata.
    pub fn hotel(&self) -> &HotelMetadata {
        &self.metadata
    }

    /// Returns all room types.
    pub fn room_types(&self) -> &HashMap<String, RoomType> {
        &self.room_types
    }

    /// Returns all tariff configurations, oldest first.
    pub fn tariffs(&self) -> &[TariffConfig] {
        &self.tariffs
    }

    /// Returns the configured rate windows.
    pub fn rate_windows(&self) -> &[RateWindow] {
        &self.rate_windows
    }

    /// Returns the configured staff members.
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }
}
