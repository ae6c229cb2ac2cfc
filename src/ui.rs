use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::HEADER_LINES;
use crate::panels::{Tab, TABS};
use crate::toast::{Toast, ToastKind};

pub type Term = Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;

// ── Padding ───────────────────────────────────────────────────────────────────
// Horizontal padding applied to every screen so text never touches the edges.
const H_PAD: u16 = 3;

/// Shrink a rect by H_PAD columns on each side.
pub fn pad_horizontal(area: Rect) -> Rect {
    let pad = H_PAD.min(area.width / 2);
    Rect {
        x: area.x + pad,
        y: area.y,
        width: area.width.saturating_sub(pad * 2),
        height: area.height,
    }
}

// ── Color helpers ─────────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Cyan;

pub fn normal_style()   -> Style { Style::default().fg(ACCENT) }
pub fn sel_style()      -> Style { Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD) }
pub fn title_style()    -> Style { Style::default().fg(ACCENT).add_modifier(Modifier::BOLD) }
pub fn dim_style()      -> Style { Style::default().fg(ACCENT).add_modifier(Modifier::DIM) }
pub fn error_style()    -> Style { Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD) }

// ── Header ────────────────────────────────────────────────────────────────────

pub fn render_header(f: &mut Frame, area: Rect) {
    let inner = pad_horizontal(area);
    let lines: Vec<Line> = HEADER_LINES
        .iter()
        .map(|l| Line::from(Span::styled(*l, title_style())))
        .collect();
    let p = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(p, inner);
}

pub fn render_separator(f: &mut Frame, area: Rect) {
    let inner = pad_horizontal(area);
    let sep = "=".repeat(inner.width as usize);
    let p = Paragraph::new(sep).alignment(Alignment::Center).style(dim_style());
    f.render_widget(p, inner);
}

// ── Tabs ──────────────────────────────────────────────────────────────────────

pub fn tab_bar_line(active: Tab) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, tab) in TABS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", dim_style()));
        }
        let style = if *tab == active { sel_style() } else { normal_style() };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
    }
    Line::from(spans)
}

pub fn render_tab_bar(f: &mut Frame, area: Rect, active: Tab) {
    let p = Paragraph::new(tab_bar_line(active)).alignment(Alignment::Center);
    f.render_widget(p, pad_horizontal(area));
}

// ── Toast overlay ─────────────────────────────────────────────────────────────

pub fn render_toast(f: &mut Frame, toast: &Toast) {
    let size = f.area();
    let style = match toast.kind {
        ToastKind::Notice => sel_style(),
        ToastKind::Error => error_style(),
    };
    let w = (toast.message.len() + 6).min(size.width as usize) as u16;
    let h = 3u16.min(size.height);
    let x = size.width.saturating_sub(w) / 2;
    let y = size.height.saturating_sub(h + 2);
    let area = Rect::new(x, y, w, h);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .style(style);
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let p = Paragraph::new(toast.message.as_str())
        .alignment(Alignment::Center)
        .style(style);
    f.render_widget(p, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_horizontal_shrinks_both_sides() {
        let r = pad_horizontal(Rect::new(0, 0, 40, 5));
        assert_eq!((r.x, r.width), (3, 34));
        let tiny = pad_horizontal(Rect::new(0, 0, 2, 1));
        assert_eq!((tiny.x, tiny.width), (1, 0));
    }

    #[test]
    fn tab_bar_highlights_active_tab() {
        let line = tab_bar_line(Tab::Graphics);
        let active: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style == sel_style())
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(active, vec![" Graphics "]);
    }
}
