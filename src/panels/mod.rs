//! Settings panels shown as tabs in the settings view.
//!
//! Each panel lists its rows as `(label, row id)` pairs and mutates the
//! settings record it is handed when a row is activated or adjusted. Nothing
//! here touches the terminal or the disk; the view decides what to do with the
//! returned [`PanelEvent`].

pub mod graphics;
pub mod info;
pub mod jb_bypass;
pub mod keymapping;

pub use graphics::GraphicsState;

use crate::config::{AppInfo, AppSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    None,
    /// The settings record changed and should be saved.
    Persist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Keymapping,
    Graphics,
    JbBypass,
    Info,
}

pub const TABS: &[Tab] = &[Tab::Keymapping, Tab::Graphics, Tab::JbBypass, Tab::Info];

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Keymapping => "Keymapping",
            Tab::Graphics => "Graphics",
            Tab::JbBypass => "Jailbreak Bypass",
            Tab::Info => "Info",
        }
    }

    pub fn next(self) -> Tab {
        TABS[(self.position() + 1) % TABS.len()]
    }

    pub fn prev(self) -> Tab {
        TABS[(self.position() + TABS.len() - 1) % TABS.len()]
    }

    fn position(self) -> usize {
        TABS.iter().position(|t| *t == self).unwrap_or(0)
    }
}

pub fn panel_rows(
    tab: Tab,
    settings: &AppSettings,
    graphics: &GraphicsState,
    info: &AppInfo,
) -> Vec<String> {
    match tab {
        Tab::Keymapping => labels(keymapping::rows(settings)),
        Tab::Graphics => labels(graphics::rows(settings, graphics)),
        Tab::JbBypass => labels(jb_bypass::rows(settings)),
        Tab::Info => info::rows(info)
            .into_iter()
            .map(|(label, value)| format!("{label:<20}{value}"))
            .collect(),
    }
}

pub fn activate(
    tab: Tab,
    settings: &mut AppSettings,
    graphics: &mut GraphicsState,
    idx: usize,
) -> PanelEvent {
    match tab {
        Tab::Keymapping => keymapping::activate(settings, idx),
        Tab::Graphics => graphics::activate(settings, graphics, idx),
        Tab::JbBypass => jb_bypass::activate(settings, idx),
        Tab::Info => PanelEvent::None,
    }
}

pub fn adjust(
    tab: Tab,
    settings: &mut AppSettings,
    graphics: &mut GraphicsState,
    idx: usize,
    delta: i16,
) -> PanelEvent {
    match tab {
        Tab::Keymapping => keymapping::adjust(settings, idx, delta),
        Tab::Graphics => graphics::adjust(settings, graphics, idx, delta),
        Tab::JbBypass => PanelEvent::None,
        Tab::Info => PanelEvent::None,
    }
}

/// Contextual hint for the selected row, if it has one.
pub fn row_help(
    tab: Tab,
    settings: &AppSettings,
    graphics: &GraphicsState,
    idx: usize,
) -> Option<&'static str> {
    match tab {
        Tab::Keymapping => keymapping::help(settings, idx),
        Tab::Graphics => graphics::help(settings, graphics, idx),
        _ => None,
    }
}

fn labels<T>(rows: Vec<(String, T)>) -> Vec<String> {
    rows.into_iter().map(|(label, _)| label).collect()
}

pub(crate) fn on_off(v: bool) -> &'static str {
    if v {
        "ON"
    } else {
        "OFF"
    }
}

/// Step `idx` by the sign of `delta` through `len` entries, wrapping.
pub(crate) fn cycle(idx: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let step = if delta < 0 { len - 1 } else { 1 };
    (idx + step) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_in_both_directions() {
        assert_eq!(Tab::Keymapping.next(), Tab::Graphics);
        assert_eq!(Tab::Info.next(), Tab::Keymapping);
        assert_eq!(Tab::Keymapping.prev(), Tab::Info);
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(cycle(0, 3, 1), 1);
        assert_eq!(cycle(2, 3, 1), 0);
        assert_eq!(cycle(0, 3, -1), 2);
        assert_eq!(cycle(0, 0, 1), 0);
    }

    #[test]
    fn info_panel_is_read_only() {
        let mut settings = AppSettings::default();
        let mut graphics = GraphicsState::default();
        let before = settings.clone();
        for idx in 0..8 {
            assert_eq!(
                activate(Tab::Info, &mut settings, &mut graphics, idx),
                PanelEvent::None
            );
            assert_eq!(
                adjust(Tab::Info, &mut settings, &mut graphics, idx, 1),
                PanelEvent::None
            );
        }
        assert_eq!(settings, before);
    }
}
