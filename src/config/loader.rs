//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading hotel
//! configurations from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateWindow, StaffMember};

use super::types::{
    HotelConfig, HotelMetadata, RateWindowsConfig, RoomType, RoomTypesConfig, StaffConfig,
    TariffConfig,
};
use super::validation::validate_rate_windows;

/// Loads and provides access to hotel configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query room types, base tariffs, rate windows
/// and staff credentials.
///
/// # Directory Structure
///
/// ```text
/// config/grand_hotel/
/// ├── hotel.yaml          # Hotel metadata
/// ├── room_types.yaml     # Bookable room types
/// ├── rate_windows.yaml   # Seasonal and contextual rate windows
/// ├── staff.yaml          # POS staff allowed to log in
/// └── tariffs/
///     └── 2026-01-01.yaml # Nightly tariffs effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use rate_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/grand_hotel")?;
///
/// let date = NaiveDate::from_ymd_opt(2026, 7, 14).unwrap();
/// let tariff = loader.get_base_tariff("DLX", date)?;
/// println!("Deluxe nightly tariff: {} {}", tariff, loader.hotel().currency);
/// # Ok::<(), rate_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HotelConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if a required file is missing or no
    ///   tariff file exists
    /// - [`EngineError::ConfigParseError`] if a file contains invalid YAML or
    ///   a negative tariff
    /// - [`EngineError::InvalidRateWindow`] if a rate window fails validation
    /// - [`EngineError::DuplicateRateWindow`] if two windows share an ID
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<HotelMetadata>(&path.join("hotel.yaml"))?;
        let room_types = Self::load_yaml::<RoomTypesConfig>(&path.join("room_types.yaml"))?;
        let windows = Self::load_yaml::<RateWindowsConfig>(&path.join("rate_windows.yaml"))?;
        let staff = Self::load_yaml::<StaffConfig>(&path.join("staff.yaml"))?;
        let tariffs = Self::load_tariffs(&path.join("tariffs"))?;

        validate_rate_windows(&windows.rate_windows)?;

        let config = HotelConfig::new(
            metadata,
            room_types.room_types,
            tariffs,
            windows.rate_windows,
            staff.staff,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all tariff files from the tariffs directory.
    fn load_tariffs(tariffs_dir: &Path) -> EngineResult<Vec<TariffConfig>> {
        let tariffs_dir_str = tariffs_dir.display().to_string();

        let entries = fs::read_dir(tariffs_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tariffs_dir_str.clone(),
        })?;

        let mut tariffs = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tariffs_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let tariff = Self::load_yaml::<TariffConfig>(&path)?;
                if let Some((code, amount)) =
                    tariff.nightly.iter().find(|(_, amount)| **amount < Decimal::ZERO)
                {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("negative tariff {} for room type '{}'", amount, code),
                    });
                }
                tariffs.push(tariff);
            }
        }

        if tariffs.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tariff files found)", tariffs_dir_str),
            });
        }

        Ok(tariffs)
    }

    /// Returns the underlying hotel configuration.
    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    /// Returns the hotel metadata.
    pub fn hotel(&self) -> &HotelMetadata {
        self.config.hotel()
    }

    /// Returns all configured room types keyed by code.
    pub fn room_types(&self) -> &HashMap<String, RoomType> {
        self.config.room_types()
    }

    /// Returns the rate windows loaded from `rate_windows.yaml`.
    pub fn rate_windows(&self) -> &[RateWindow] {
        self.config.rate_windows()
    }

    /// Gets a room type by its code.
    pub fn get_room_type(&self, code: &str) -> EngineResult<&RoomType> {
        self.config
            .room_types()
            .get(code)
            .ok_or_else(|| EngineError::RoomTypeNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the nightly base tariff for a room type on an arrival date.
    ///
    /// Uses the most recent tariff file that is effective on or before the
    /// given date.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RoomTypeNotFound`] if the room type is not configured
    /// - [`EngineError::TariffNotFound`] if no tariff file is effective on
    ///   the date, or the effective file has no entry for the room type
    pub fn get_base_tariff(&self, room_type: &str, date: NaiveDate) -> EngineResult<Decimal> {
        self.get_room_type(room_type)?;

        let not_found = || EngineError::TariffNotFound {
            room_type: room_type.to_string(),
            date,
        };

        let tariff = self
            .config
            .tariffs()
            .iter()
            .rfind(|t| t.effective_date <= date)
            .ok_or_else(not_found)?;

        tariff.nightly.get(room_type).copied().ok_or_else(not_found)
    }

    /// Finds the staff member matching the given ID and PIN.
    pub fn authenticate_staff(&self, staff_id: &str, pin: &str) -> EngineResult<&StaffMember> {
        self.config
            .staff()
            .iter()
            .find(|s| s.id == staff_id && s.pin == pin)
            .ok_or(EngineError::InvalidCredentials)
    }
}
