use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_WINDOWS, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, DEFAULT_WINDOW_POSITION,
    DEFAULT_WINDOW_SIZE, DOUBLE_CLICK_INTERVAL, INITIAL_Z_INDEX, MIN_VISIBLE_MARGIN,
};
use crate::theme::Theme;
use crate::window::{Position, Size};

/// What reconciliation does with registered windows whose descriptors
/// disappear from the input list without an explicit close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcilePolicy {
    /// Purge them from the store so records cannot pile up.
    #[default]
    AutoPurge,
    /// Keep their records; they simply stop being rendered.
    Retain,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max windows must be at least 1")]
    ZeroWindowCap,
    #[error(
        "default window size {width}x{height} is smaller than the minimum {min_width}x{min_height}"
    )]
    DefaultSizeTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    pub max_windows: usize,
    pub initial_z_index: u64,
    pub default_position: Position,
    pub default_size: Size,
    pub reconcile_policy: ReconcilePolicy,
    /// Write drag and resize results back into the store.
    pub persist_geometry: bool,
    pub double_click_interval: Duration,
    pub visible_margin: u16,
    pub theme: Theme,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_windows: DEFAULT_MAX_WINDOWS,
            initial_z_index: INITIAL_Z_INDEX,
            default_position: DEFAULT_WINDOW_POSITION,
            default_size: DEFAULT_WINDOW_SIZE,
            reconcile_policy: ReconcilePolicy::default(),
            persist_geometry: true,
            double_click_interval: DOUBLE_CLICK_INTERVAL,
            visible_margin: MIN_VISIBLE_MARGIN,
            theme: Theme::default(),
        }
    }
}

impl ManagerConfig {
    pub fn with_max_windows(mut self, max_windows: usize) -> Self {
        self.max_windows = max_windows;
        self
    }

    pub fn with_initial_z_index(mut self, initial_z_index: u64) -> Self {
        self.initial_z_index = initial_z_index;
        self
    }

    pub fn with_default_geometry(mut self, position: Position, size: Size) -> Self {
        self.default_position = position;
        self.default_size = size;
        self
    }

    pub fn with_reconcile_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile_policy = policy;
        self
    }

    pub fn with_persist_geometry(mut self, persist: bool) -> Self {
        self.persist_geometry = persist;
        self
    }

    pub fn with_double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_interval = interval;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<Theme>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_windows == 0 {
            return Err(ConfigError::ZeroWindowCap);
        }
        if self.default_size.width < DEFAULT_MIN_WIDTH
            || self.default_size.height < DEFAULT_MIN_HEIGHT
        {
            return Err(ConfigError::DefaultSizeTooSmall {
                width: self.default_size.width,
                height: self.default_size.height,
                min_width: DEFAULT_MIN_WIDTH,
                min_height: DEFAULT_MIN_HEIGHT,
            });
        }
        if let Theme::Named(name) = &self.theme
            && !Theme::NAMES.contains(&name.as_str())
        {
            return Err(ConfigError::UnknownTheme(name.clone()));
        }
        Ok(())
    }
}
