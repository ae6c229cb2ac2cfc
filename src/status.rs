use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use chrono::Local;

use crate::config::AppSettings;
use crate::ui::sel_style;

/// Right-hand summary of the values the launcher will apply.
pub fn settings_summary(settings: &AppSettings) -> String {
    format!(
        "{} x {} @ {} Hz",
        settings.window_width, settings.window_height, settings.refresh_rate
    )
}

// ── Status bar ────────────────────────────────────────────────────────────────

pub fn render_status_bar(f: &mut Frame, area: Rect, bundle_id: &str, settings: &AppSettings) {
    if area.height == 0 { return; }

    let now   = Local::now().format("%A, %d. %B - %I:%M%p").to_string();
    let right = format!("{bundle_id} | {}", settings_summary(settings));

    let left_span  = Span::styled(format!(" {now}"), sel_style());
    let right_span = Span::styled(format!("{right} "), sel_style());

    // Pad center
    let used = now.chars().count() + 1 + right.chars().count() + 1;
    let pad  = " ".repeat((area.width as usize).saturating_sub(used));

    let line = Line::from(vec![left_span, Span::styled(pad, sel_style()), right_span]);
    f.render_widget(Paragraph::new(line), area);
}
