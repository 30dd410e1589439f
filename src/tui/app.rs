use ratatui::widgets::ListState;

use crate::config::Preferences;

pub const SCROLL_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Section,
    OrderBy,
}

/// Preferences being edited in the settings overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub prefs: Preferences,
    pub field: SettingsField,
}

impl SettingsDraft {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            field: SettingsField::Section,
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            SettingsField::Section => SettingsField::OrderBy,
            SettingsField::OrderBy => SettingsField::Section,
        };
    }

    pub fn change(&mut self, forward: bool) {
        match self.field {
            SettingsField::Section => self.prefs.cycle_section(forward),
            SettingsField::OrderBy => {
                self.prefs.order_by = if forward {
                    self.prefs.order_by.next()
                } else {
                    self.prefs.order_by.prev()
                };
            }
        }
    }
}

pub struct TuiApp {
    pub prefs: Preferences,
    pub selected: usize,
    pub list_state: ListState,
    pub settings: Option<SettingsDraft>,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            selected: 0,
            list_state: ListState::default(),
            settings: None,
            should_quit: false,
            status_message: None,
        }
    }

    /// Called whenever the displayed rows are swapped for a new result.
    pub fn reset_selection(&mut self, len: usize) {
        self.selected = 0;
        self.list_state
            .select(if len == 0 { None } else { Some(0) });
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 && self.selected < len - 1 {
            self.select(self.selected + 1);
        }
    }

    pub fn next_page(&mut self, len: usize) {
        if len > 0 {
            self.select((self.selected + SCROLL_PAGE).min(len - 1));
        }
    }

    pub fn prev_page(&mut self) {
        self.select(self.selected.saturating_sub(SCROLL_PAGE));
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }

    pub fn open_settings(&mut self) {
        self.settings = Some(SettingsDraft::new(self.prefs.clone()));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
