//! In-memory rate window registry.
//!
//! The registry is the write side of rate window configuration: every
//! create and update is validated before it is stored, so the calculation
//! path only ever reads well-formed windows from here.

use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateWindow, RateWindowDraft};

use super::validation::{validate_rate_window, validate_rate_windows};

/// Holds the current set of rate windows in insertion order.
///
/// Insertion order is the tie-break order for windows of equal priority.
///
/// # Example
///
/// ```
/// use rate_engine::config::RateWindowRegistry;
/// use rate_engine::models::{DayOfWeek, RateType, RateWindowDraft};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut registry = RateWindowRegistry::default();
/// let window = registry.create(RateWindowDraft {
///     name: "Group discount".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
///     rate_type: RateType::Percentage,
///     adjustment_value: Decimal::new(-12, 0),
///     min_stay: None,
///     max_stay: None,
///     applicable_days: DayOfWeek::ALL.to_vec(),
///     client_types: vec!["group".to_string()],
///     room_types: vec![],
///     is_active: true,
///     priority: 0,
/// })?;
///
/// assert_eq!(registry.list().len(), 1);
/// registry.set_active(&window.id, false)?;
/// assert!(!registry.get(&window.id)?.is_active);
/// # Ok::<(), rate_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateWindowRegistry {
    windows: Vec<RateWindow>,
}

impl RateWindowRegistry {
    /// Creates a registry from already-identified windows.
    ///
    /// # Errors
    ///
    /// Fails if any window is invalid or two windows share an ID.
    pub fn new(windows: Vec<RateWindow>) -> EngineResult<Self> {
        validate_rate_windows(&windows)?;
        Ok(Self { windows })
    }

    /// Returns all windows in insertion order.
    pub fn list(&self) -> &[RateWindow] {
        &self.windows
    }

    /// Returns the window with the given ID.
    pub fn get(&self, id: &str) -> EngineResult<&RateWindow> {
        self.windows
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| EngineError::RateWindowNotFound { id: id.to_string() })
    }

    fn position(&self, id: &str) -> EngineResult<usize> {
        self.windows
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| EngineError::RateWindowNotFound { id: id.to_string() })
    }

    /// Validates and stores a new window under a freshly generated ID.
    pub fn create(&mut self, draft: RateWindowDraft) -> EngineResult<RateWindow> {
        let window = draft.into_window(Uuid::new_v4().to_string());
        validate_rate_window(&window)?;

        info!(
            window_id = %window.id,
            name = %window.name,
            priority = window.priority,
            "Rate window created"
        );
        self.windows.push(window.clone());
        Ok(window)
    }

    /// Replaces the fields of an existing window, keeping its ID and position.
    pub fn update(&mut self, id: &str, draft: RateWindowDraft) -> EngineResult<RateWindow> {
        let index = self.position(id)?;
        let window = draft.into_window(id);
        validate_rate_window(&window)?;

        info!(window_id = %id, "Rate window updated");
        self.windows[index] = window.clone();
        Ok(window)
    }

    /// Removes a window and returns it.
    pub fn delete(&mut self, id: &str) -> EngineResult<RateWindow> {
        let index = self.position(id)?;
        info!(window_id = %id, "Rate window deleted");
        Ok(self.windows.remove(index))
    }

    /// Switches a window on or off.
    pub fn set_active(&mut self, id: &str, is_active: bool) -> EngineResult<RateWindow> {
        let index = self.position(id)?;
        let window = &mut self.windows[index];
        window.is_active = is_active;

        info!(window_id = %id, is_active, "Rate window activation changed");
        Ok(window.clone())
    }
}
