use super::{on_off, PanelEvent};
use crate::config::AppSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JbBypassRowId {
    Bypass,
}

pub fn rows(settings: &AppSettings) -> Vec<(String, JbBypassRowId)> {
    vec![(
        format!("Jailbreak Bypass: {} [toggle]", on_off(settings.bypass)),
        JbBypassRowId::Bypass,
    )]
}

pub fn activate(settings: &mut AppSettings, idx: usize) -> PanelEvent {
    match rows(settings).get(idx).map(|(_, id)| *id) {
        Some(JbBypassRowId::Bypass) => {
            settings.bypass = !settings.bypass;
            PanelEvent::Persist
        }
        None => PanelEvent::None,
    }
}
