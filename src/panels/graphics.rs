use super::{cycle, on_off, PanelEvent};
use crate::config::{device_label, AppSettings, IOS_DEVICES, REFRESH_RATES};
use crate::resolution::{
    apply_resolution, AspectRatioTier, ResolutionTier, ASPECT_RATIO_TIERS, DEFAULT_HEIGHT,
    DEFAULT_WIDTH, RESOLUTION_TIERS,
};

pub const CUSTOM_STEP: i32 = 16;
pub const ADAPTIVE_RES_HELP: &str =
    "Resizes the app window; presets derive the width from the aspect ratio";

/// Picker selections for the graphics panel. Not persisted; a fresh view
/// starts from 1080p at 16:9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsState {
    pub resolution: ResolutionTier,
    pub aspect_ratio: AspectRatioTier,
    pub custom_width: i32,
    pub custom_height: i32,
    pub screen_width: i32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            resolution: ResolutionTier::default(),
            aspect_ratio: AspectRatioTier::default(),
            custom_width: DEFAULT_WIDTH,
            custom_height: DEFAULT_HEIGHT,
            screen_width: DEFAULT_WIDTH,
        }
    }
}

impl GraphicsState {
    pub fn with_screen_width(screen_width: i32) -> Self {
        Self {
            screen_width,
            ..Self::default()
        }
    }

    /// Recompute the window size and commit it to `settings`.
    pub fn apply(&self, settings: &mut AppSettings) {
        apply_resolution(
            settings,
            self.resolution,
            self.aspect_ratio,
            self.custom_width,
            self.custom_height,
            self.screen_width,
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsRowId {
    DisplaySleep,
    Device,
    Resolution,
    AspectRatio,
    CustomWidth,
    CustomHeight,
    RefreshRate,
    Window,
}

pub fn rows(settings: &AppSettings, state: &GraphicsState) -> Vec<(String, GraphicsRowId)> {
    let mut rows = vec![
        (
            format!(
                "Disable Display Sleep: {} [toggle]",
                on_off(settings.disable_timeout)
            ),
            GraphicsRowId::DisplaySleep,
        ),
        (
            format!(
                "iOS Device: {} [choose]",
                device_label(&settings.ios_device_model)
            ),
            GraphicsRowId::Device,
        ),
        (
            format!("Adaptive Resolution: {} [choose]", state.resolution.label()),
            GraphicsRowId::Resolution,
        ),
    ];
    if state.resolution == ResolutionTier::Custom {
        rows.push((
            format!("Width: {} [adjust]", state.custom_width),
            GraphicsRowId::CustomWidth,
        ));
        rows.push((
            format!("Height: {} [adjust]", state.custom_height),
            GraphicsRowId::CustomHeight,
        ));
    } else if state.resolution.uses_aspect_ratio() {
        rows.push((
            format!("Aspect Ratio: {} [choose]", state.aspect_ratio.label()),
            GraphicsRowId::AspectRatio,
        ));
    }
    rows.push((
        format!("Refresh Rate: {} Hz [toggle]", settings.refresh_rate),
        GraphicsRowId::RefreshRate,
    ));
    rows.push((
        format!(
            "Window: {} x {}",
            settings.window_width, settings.window_height
        ),
        GraphicsRowId::Window,
    ));
    rows
}

pub fn activate(settings: &mut AppSettings, state: &mut GraphicsState, idx: usize) -> PanelEvent {
    let rows = rows(settings, state);
    let Some((_, row_id)) = rows.get(idx) else {
        return PanelEvent::None;
    };
    match row_id {
        GraphicsRowId::DisplaySleep => {
            settings.disable_timeout = !settings.disable_timeout;
            PanelEvent::Persist
        }
        GraphicsRowId::CustomWidth | GraphicsRowId::CustomHeight | GraphicsRowId::Window => {
            PanelEvent::None
        }
        _ => adjust(settings, state, idx, 1),
    }
}

pub fn adjust(
    settings: &mut AppSettings,
    state: &mut GraphicsState,
    idx: usize,
    delta: i16,
) -> PanelEvent {
    let rows = rows(settings, state);
    let Some((_, row_id)) = rows.get(idx) else {
        return PanelEvent::None;
    };
    match row_id {
        GraphicsRowId::Device => {
            let current = IOS_DEVICES
                .iter()
                .position(|(id, _)| *id == settings.ios_device_model);
            let next = match current {
                Some(i) => cycle(i, IOS_DEVICES.len(), delta),
                None => 0,
            };
            settings.ios_device_model = IOS_DEVICES[next].0.to_string();
            PanelEvent::Persist
        }
        GraphicsRowId::Resolution => {
            let next = cycle(state.resolution.index(), RESOLUTION_TIERS.len(), delta);
            state.resolution = ResolutionTier::from_index(next);
            state.apply(settings);
            PanelEvent::Persist
        }
        GraphicsRowId::AspectRatio => {
            let next = cycle(state.aspect_ratio.index(), ASPECT_RATIO_TIERS.len(), delta);
            state.aspect_ratio = AspectRatioTier::from_index(next);
            state.apply(settings);
            PanelEvent::Persist
        }
        GraphicsRowId::CustomWidth => {
            state.custom_width = step_dimension(state.custom_width, delta);
            state.apply(settings);
            PanelEvent::Persist
        }
        GraphicsRowId::CustomHeight => {
            state.custom_height = step_dimension(state.custom_height, delta);
            state.apply(settings);
            PanelEvent::Persist
        }
        GraphicsRowId::RefreshRate => {
            let current = REFRESH_RATES
                .iter()
                .position(|r| *r == settings.refresh_rate)
                .unwrap_or(0);
            settings.refresh_rate = REFRESH_RATES[cycle(current, REFRESH_RATES.len(), delta)];
            PanelEvent::Persist
        }
        GraphicsRowId::DisplaySleep | GraphicsRowId::Window => PanelEvent::None,
    }
}

pub fn help(settings: &AppSettings, state: &GraphicsState, idx: usize) -> Option<&'static str> {
    match rows(settings, state).get(idx).map(|(_, id)| *id) {
        Some(GraphicsRowId::Resolution) => Some(ADAPTIVE_RES_HELP),
        _ => None,
    }
}

fn step_dimension(value: i32, delta: i16) -> i32 {
    let step = if delta < 0 { -CUSTOM_STEP } else { CUSTOM_STEP };
    value.saturating_add(step).max(CUSTOM_STEP)
}
