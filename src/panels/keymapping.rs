use super::{on_off, PanelEvent};
use crate::config::AppSettings;

pub const KEYMAPPING_HELP: &str = "Enable keymapping to use keyboard controls in games";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymappingRowId {
    Keymapping,
    MouseMapping,
    Sensitivity,
}

pub fn rows(settings: &AppSettings) -> Vec<(String, KeymappingRowId)> {
    vec![
        (
            format!("Keymapping: {} [toggle]", on_off(settings.keymapping)),
            KeymappingRowId::Keymapping,
        ),
        (
            format!("Mouse Mapping: {} [toggle]", on_off(settings.mouse_mapping)),
            KeymappingRowId::MouseMapping,
        ),
        (
            format!("Mouse Sensitivity: {:.0} [adjust]", settings.sensitivity),
            KeymappingRowId::Sensitivity,
        ),
    ]
}

pub fn activate(settings: &mut AppSettings, idx: usize) -> PanelEvent {
    let rows = rows(settings);
    let Some((_, row_id)) = rows.get(idx) else {
        return PanelEvent::None;
    };
    match row_id {
        KeymappingRowId::Keymapping => {
            settings.keymapping = !settings.keymapping;
            PanelEvent::Persist
        }
        KeymappingRowId::MouseMapping => {
            settings.mouse_mapping = !settings.mouse_mapping;
            PanelEvent::Persist
        }
        KeymappingRowId::Sensitivity => PanelEvent::None,
    }
}

pub fn adjust(settings: &mut AppSettings, idx: usize, delta: i16) -> PanelEvent {
    let rows = rows(settings);
    match rows.get(idx).map(|(_, id)| *id) {
        Some(KeymappingRowId::Sensitivity) => {
            let next = (settings.sensitivity + f32::from(delta)).clamp(0.0, 100.0);
            if next == settings.sensitivity {
                return PanelEvent::None;
            }
            settings.sensitivity = next;
            PanelEvent::Persist
        }
        _ => PanelEvent::None,
    }
}

pub fn help(settings: &AppSettings, idx: usize) -> Option<&'static str> {
    match rows(settings).get(idx).map(|(_, id)| *id) {
        Some(KeymappingRowId::Keymapping) => Some(KEYMAPPING_HELP),
        _ => None,
    }
}
