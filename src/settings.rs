use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

use crate::config::{AppInfo, AppSettings, SettingsStore};
use crate::panels::{self, GraphicsState, PanelEvent, Tab};
use crate::screen::ScreenMetrics;
use crate::status::render_status_bar;
use crate::toast::{Notifier, ToastKind, ToastQueue};
use crate::ui::{
    dim_style, normal_style, pad_horizontal, render_header, render_separator, render_tab_bar,
    render_toast, sel_style, title_style, Term,
};

pub const RESET_COMPLETED: &str = "Settings reset to default";
pub const RESET_FAILED: &str = "Could not reset settings";
const KEY_HINTS: &str = "Tab panel | ↑↓ select | Enter toggle | ←→ adjust | r reset | q/Esc OK";

/// Buttons below the panel rows, reachable by moving past the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterButton {
    Reset,
    Ok,
}

pub const FOOTER_BUTTONS: &[FooterButton] = &[FooterButton::Reset, FooterButton::Ok];

impl FooterButton {
    pub fn label(self) -> &'static str {
        match self {
            FooterButton::Reset => "Reset",
            FooterButton::Ok => "OK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    Continue,
    Close,
}

/// Settings view for one app. Owns the working copy of the settings record
/// and writes it back through the store after every change.
pub struct SettingsView {
    pub tab: Tab,
    pub selected: usize,
    pub settings: AppSettings,
    pub graphics: GraphicsState,
    pub info: AppInfo,
    store: SettingsStore,
}

impl SettingsView {
    pub fn new(store: SettingsStore, screen: &dyn ScreenMetrics) -> Self {
        let settings = store.load_settings();
        let info = store.load_info();
        Self {
            tab: Tab::default(),
            selected: 0,
            settings,
            graphics: GraphicsState::with_screen_width(screen.screen_width()),
            info,
            store,
        }
    }

    pub fn title(&self) -> String {
        format!("{} Settings", self.info.name())
    }

    pub fn rows(&self) -> Vec<String> {
        panels::panel_rows(self.tab, &self.settings, &self.graphics, &self.info)
    }

    pub fn help(&self) -> Option<&'static str> {
        panels::row_help(self.tab, &self.settings, &self.graphics, self.selected)
    }

    /// Footer button under the cursor, if the cursor is past the rows.
    pub fn footer_button(&self) -> Option<FooterButton> {
        let idx = self.selected.checked_sub(self.rows().len())?;
        FOOTER_BUTTONS.get(idx).copied()
    }

    fn focus_footer(&mut self, button: FooterButton) {
        let offset = FOOTER_BUTTONS
            .iter()
            .position(|b| *b == button)
            .unwrap_or(0);
        self.selected = self.rows().len() + offset;
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent, notifier: &mut dyn Notifier) -> ViewOutcome {
        if let Some(button) = self.footer_button() {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    return match button {
                        FooterButton::Reset => self.reset_and_close(notifier),
                        FooterButton::Ok => ViewOutcome::Close,
                    };
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.focus_footer(FooterButton::Reset);
                    return ViewOutcome::Continue;
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.focus_footer(FooterButton::Ok);
                    return ViewOutcome::Continue;
                }
                _ => {}
            }
        }

        let event = match key.code {
            KeyCode::Tab => {
                self.switch_tab(self.tab.next());
                PanelEvent::None
            }
            KeyCode::BackTab => {
                self.switch_tab(self.tab.prev());
                PanelEvent::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                PanelEvent::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(self.last_index());
                PanelEvent::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => panels::activate(
                self.tab,
                &mut self.settings,
                &mut self.graphics,
                self.selected,
            ),
            KeyCode::Left | KeyCode::Char('h') => panels::adjust(
                self.tab,
                &mut self.settings,
                &mut self.graphics,
                self.selected,
                -1,
            ),
            KeyCode::Right | KeyCode::Char('l') => panels::adjust(
                self.tab,
                &mut self.settings,
                &mut self.graphics,
                self.selected,
                1,
            ),
            KeyCode::Char('r') | KeyCode::Char('R') => return self.reset_and_close(notifier),
            KeyCode::Char('q') | KeyCode::Esc => return ViewOutcome::Close,
            _ => PanelEvent::None,
        };

        // Rows come and go with the resolution tier.
        self.selected = self.selected.min(self.last_index());

        if event == PanelEvent::Persist {
            self.persist(notifier);
        }
        ViewOutcome::Continue
    }

    fn persist(&self, notifier: &mut dyn Notifier) {
        match self.store.save_settings(&self.settings) {
            Ok(()) => tracing::debug!(
                bundle = self.store.bundle_id(),
                tab = self.tab.title(),
                "settings saved"
            ),
            Err(err) => {
                tracing::error!(bundle = self.store.bundle_id(), "saving settings: {err:#}");
                notifier.show(ToastKind::Error, "Could not save settings");
            }
        }
    }

    /// Index of the last footer button.
    fn last_index(&self) -> usize {
        self.rows().len() + FOOTER_BUTTONS.len() - 1
    }

    /// Restore defaults and persist them. Only a successful save is
    /// announced as a completed reset.
    pub fn reset(&mut self, notifier: &mut dyn Notifier) -> Result<()> {
        let settings = match self.store.reset() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!(bundle = self.store.bundle_id(), "resetting settings: {err:#}");
                notifier.show(ToastKind::Error, RESET_FAILED);
                return Err(err);
            }
        };
        self.settings = settings;
        self.graphics = GraphicsState::with_screen_width(self.graphics.screen_width);
        self.selected = 0;
        notifier.show(ToastKind::Notice, RESET_COMPLETED);
        Ok(())
    }

    /// The view stays open after a failed reset so the error is seen.
    fn reset_and_close(&mut self, notifier: &mut dyn Notifier) -> ViewOutcome {
        match self.reset(notifier) {
            Ok(()) => ViewOutcome::Close,
            Err(_) => ViewOutcome::Continue,
        }
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

fn draw(f: &mut Frame, view: &SettingsView, toasts: &ToastQueue) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, chunks[0]);
    render_separator(f, chunks[1]);

    let title = Paragraph::new(view.title())
        .alignment(Alignment::Center)
        .style(title_style());
    f.render_widget(title, pad_horizontal(chunks[2]));
    render_tab_bar(f, chunks[3], view.tab);
    render_separator(f, chunks[4]);

    let lines: Vec<Line> = view
        .rows()
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            if idx == view.selected && view.tab != Tab::Info {
                Line::from(Span::styled(format!("  > {row}"), sel_style()))
            } else {
                Line::from(Span::styled(format!("    {row}"), normal_style()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), pad_horizontal(chunks[5]));

    let focused = view.footer_button();
    let mut buttons = Vec::new();
    for (i, button) in FOOTER_BUTTONS.iter().enumerate() {
        if i > 0 {
            buttons.push(Span::raw("  "));
        }
        let style = if focused == Some(*button) { sel_style() } else { normal_style() };
        buttons.push(Span::styled(format!("[ {} ]", button.label()), style));
    }
    f.render_widget(
        Paragraph::new(Line::from(buttons)).alignment(Alignment::Right),
        pad_horizontal(chunks[6]),
    );

    if let Some(help) = view.help() {
        f.render_widget(
            Paragraph::new(Span::styled(help, dim_style())),
            pad_horizontal(chunks[7]),
        );
    }
    f.render_widget(
        Paragraph::new(KEY_HINTS).style(dim_style()),
        pad_horizontal(chunks[8]),
    );
    render_status_bar(f, chunks[9], view.store.bundle_id(), &view.settings);

    if let Some(toast) = toasts.current() {
        render_toast(f, toast);
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

pub fn run_settings_view(
    terminal: &mut Term,
    view: &mut SettingsView,
    toasts: &mut ToastQueue,
) -> Result<()> {
    tracing::info!(bundle = view.store.bundle_id(), "settings view opened");
    loop {
        toasts.prune(Local::now());
        terminal.draw(|f| draw(f, view, toasts))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if view.handle_key(key, toasts) == ViewOutcome::Close {
                    break;
                }
            }
        }
    }
    tracing::info!(bundle = view.store.bundle_id(), "settings view closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::ResolutionTier;
    use crate::screen::FixedScreen;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_in(dir: &std::path::Path) -> SettingsView {
        SettingsView::new(SettingsStore::new(dir, "com.example.game"), &FixedScreen(2560))
    }

    #[test]
    fn toggling_a_row_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();

        assert_eq!(view.handle_key(key(KeyCode::Enter), &mut toasts), ViewOutcome::Continue);
        assert!(!view.settings.keymapping);

        let stored = SettingsStore::new(dir.path(), "com.example.game").load_settings();
        assert!(!stored.keymapping);
        assert!(toasts.is_empty());
    }

    #[test]
    fn tab_cycles_panels_and_resets_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        view.handle_key(key(KeyCode::Down), &mut toasts);
        assert_eq!(view.selected, 1);

        view.handle_key(key(KeyCode::Tab), &mut toasts);
        assert_eq!(view.tab, Tab::Graphics);
        assert_eq!(view.selected, 0);

        view.handle_key(key(KeyCode::BackTab), &mut toasts);
        view.handle_key(key(KeyCode::BackTab), &mut toasts);
        assert_eq!(view.tab, Tab::Info);
    }

    #[test]
    fn selection_stays_within_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        for _ in 0..10 {
            view.handle_key(key(KeyCode::Down), &mut toasts);
        }
        assert_eq!(view.selected, view.rows().len() + 1);
        assert_eq!(view.footer_button(), Some(FooterButton::Ok));
        for _ in 0..10 {
            view.handle_key(key(KeyCode::Up), &mut toasts);
        }
        assert_eq!(view.selected, 0);
    }

    #[test]
    fn auto_resolution_uses_screen_width() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        view.handle_key(key(KeyCode::Tab), &mut toasts);
        view.handle_key(key(KeyCode::Down), &mut toasts);
        view.handle_key(key(KeyCode::Down), &mut toasts);
        assert!(view.rows()[view.selected].starts_with("Adaptive Resolution"));

        view.handle_key(key(KeyCode::Left), &mut toasts);
        assert_eq!(view.graphics.resolution, ResolutionTier::Auto);
        assert_eq!((view.settings.window_width, view.settings.window_height), (2560, 2560));
    }

    #[test]
    fn selection_clamps_when_rows_disappear() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        view.tab = Tab::Graphics;
        view.graphics.resolution = ResolutionTier::Custom;
        view.selected = view.rows().len() - 1;
        assert_eq!(view.selected, 6);

        // Dropping back to Off removes the two stepper rows.
        view.graphics.resolution = ResolutionTier::Off;
        view.selected = 8;
        view.handle_key(key(KeyCode::Down), &mut toasts);
        assert_eq!(view.rows().len(), 5);
        assert_eq!(view.selected, 6);
        assert_eq!(view.footer_button(), Some(FooterButton::Ok));
    }

    #[test]
    fn down_past_last_row_reaches_footer() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        let rows = view.rows().len();
        for _ in 0..rows {
            view.handle_key(key(KeyCode::Down), &mut toasts);
        }
        assert_eq!(view.footer_button(), Some(FooterButton::Reset));

        view.handle_key(key(KeyCode::Right), &mut toasts);
        assert_eq!(view.footer_button(), Some(FooterButton::Ok));
        view.handle_key(key(KeyCode::Left), &mut toasts);
        assert_eq!(view.footer_button(), Some(FooterButton::Reset));

        view.handle_key(key(KeyCode::Up), &mut toasts);
        assert_eq!(view.footer_button(), None);
        assert_eq!(view.selected, rows - 1);
    }

    #[test]
    fn ok_button_closes_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        view.focus_footer(FooterButton::Ok);
        assert_eq!(view.handle_key(key(KeyCode::Enter), &mut toasts), ViewOutcome::Close);
        assert_eq!(view.settings, AppSettings::default());
        assert!(toasts.is_empty());
    }

    #[test]
    fn reset_button_resets_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        view.handle_key(key(KeyCode::Enter), &mut toasts);
        assert!(!view.settings.keymapping);

        view.focus_footer(FooterButton::Reset);
        assert_eq!(view.handle_key(key(KeyCode::Enter), &mut toasts), ViewOutcome::Close);
        assert_eq!(view.settings, AppSettings::default());
        assert_eq!(toasts.current().unwrap().message, RESET_COMPLETED);
    }

    #[test]
    fn failed_reset_reports_error_and_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be makes every save fail.
        let blocked = dir.path().join("not-a-dir");
        std::fs::write(&blocked, "").unwrap();
        let mut view = view_in(&blocked);
        let mut toasts = ToastQueue::new();
        view.settings.bypass = true;

        assert_eq!(
            view.handle_key(key(KeyCode::Char('r')), &mut toasts),
            ViewOutcome::Continue
        );
        let cur = toasts.current().unwrap();
        assert_eq!(cur.kind, ToastKind::Error);
        assert_eq!(cur.message, RESET_FAILED);
        assert!(toasts.iter().all(|t| t.message != RESET_COMPLETED));
        assert!(view.settings.bypass);
    }

    #[test]
    fn reset_restores_defaults_toasts_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        view.handle_key(key(KeyCode::Enter), &mut toasts);
        view.graphics.resolution = ResolutionTier::K4;

        assert_eq!(view.handle_key(key(KeyCode::Char('r')), &mut toasts), ViewOutcome::Close);
        assert_eq!(view.settings, AppSettings::default());
        assert_eq!(view.graphics, GraphicsState::with_screen_width(2560));
        let toast = toasts.current().unwrap();
        assert_eq!(toast.kind, ToastKind::Notice);
        assert_eq!(toast.message, RESET_COMPLETED);

        let stored = SettingsStore::new(dir.path(), "com.example.game").load_settings();
        assert_eq!(stored, AppSettings::default());
    }

    #[test]
    fn quit_keys_close_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        let mut toasts = ToastQueue::new();
        assert_eq!(view.handle_key(key(KeyCode::Esc), &mut toasts), ViewOutcome::Close);
        assert_eq!(view.handle_key(key(KeyCode::Char('q')), &mut toasts), ViewOutcome::Close);
        assert_eq!(view.settings, AppSettings::default());
    }

    #[test]
    fn title_uses_app_name() {
        let dir = tempfile::tempdir().unwrap();
        let view = view_in(dir.path());
        assert_eq!(view.title(), "com.example.game Settings");
    }
}
