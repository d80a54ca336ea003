use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use std::cmp::Ordering;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::shared::theme::{ModernIcons, ModernTheme, ProgressChars};

/// Write `text` into one buffer row starting at `x`, stopping before `max_x`.
/// Wide graphemes that would straddle the edge are dropped.
/// Returns how many columns were written.
fn put_graphemes(text: &str, buf: &mut Buffer, x: u16, y: u16, max_x: u16, style: Style) -> u16 {
    let mut col = x;

    for grapheme in text.graphemes(true) {
        // Zero-width clusters still occupy a cell of their own
        let cols = grapheme.width().max(1) as u16;
        if col.saturating_add(cols) > max_x {
            break;
        }

        buf.get_mut(col, y).set_symbol(grapheme).set_style(style);
        col += cols;
    }

    col - x
}

/// Card widget: bordered block with a title and wrapped content
pub struct ModernCard<'a> {
    title: Option<&'a str>,
    content: Text<'a>,
    theme: &'a ModernTheme,
    focused: bool,
}

impl<'a> ModernCard<'a> {
    pub fn new(content: Text<'a>, theme: &'a ModernTheme) -> Self {
        Self {
            title: None,
            content,
            theme,
            focused: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for ModernCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, self.focused);

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.content)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Single-row progress bar with a centered percentage label
pub struct ModernProgressBar<'a> {
    percentage: f64,
    label: Option<&'a str>,
    theme: &'a ModernTheme,
}

impl<'a> ModernProgressBar<'a> {
    pub fn new(percentage: f64, theme: &'a ModernTheme) -> Self {
        Self {
            percentage: percentage.clamp(0.0, 100.0),
            label: None,
            theme,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    fn overlay_text(&self) -> String {
        match self.label {
            Some(label) => format!("{} {:.0}%", label, self.percentage),
            None => format!("{:.0}%", self.percentage),
        }
    }
}

impl<'a> Widget for ModernProgressBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }

        let fill_style = self.theme.progress_style_for_percentage(self.percentage);
        let empty_style = self.theme.dimmed_style();

        // Measured in half cells so a half-filled cell gets the partial glyph
        let halves = (f64::from(area.width) * 2.0 * self.percentage / 100.0).round() as u16;
        let full = halves / 2;
        let partial = halves % 2 == 1;

        for offset in 0..area.width {
            let (glyph, style) = match offset.cmp(&full) {
                Ordering::Less => (ProgressChars::FILLED, fill_style),
                Ordering::Equal if partial => (ProgressChars::PARTIAL, fill_style),
                _ => (ProgressChars::EMPTY, empty_style),
            };
            buf.get_mut(area.x + offset, area.y)
                .set_char(glyph)
                .set_style(style);
        }

        let overlay = self.overlay_text();
        let overlay_width = overlay.width() as u16;
        if overlay_width <= area.width {
            let start = area.x + (area.width - overlay_width) / 2;
            put_graphemes(
                &overlay,
                buf,
                start,
                area.y,
                area.right(),
                Style::default().fg(self.theme.text_primary),
            );
        }
    }
}

/// Bordered list that keeps the selected row in view
pub struct ModernList<'a> {
    items: Vec<ModernListItem<'a>>,
    selected: Option<usize>,
    theme: &'a ModernTheme,
    title: Option<&'a str>,
    focused: bool,
}

pub struct ModernListItem<'a> {
    text: Line<'a>,
    icon: Option<&'a str>,
    style: Option<Style>,
}

impl<'a> ModernListItem<'a> {
    pub fn new<T: Into<Line<'a>>>(text: T) -> Self {
        Self {
            text: text.into(),
            icon: None,
            style: None,
        }
    }

    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl<'a> ModernList<'a> {
    pub fn new(items: Vec<ModernListItem<'a>>, theme: &'a ModernTheme) -> Self {
        Self {
            items,
            selected: None,
            theme,
            title: None,
            focused: false,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// First visible row so that `selected` stays inside a window of `height` rows
pub fn scroll_offset(selected: Option<usize>, height: usize) -> usize {
    match selected {
        Some(index) if height > 0 && index >= height => index + 1 - height,
        _ => 0,
    }
}

impl<'a> Widget for ModernList<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let offset = scroll_offset(self.selected, inner.height as usize);
        let right = inner.right();

        for (y, (index, item)) in (inner.y..inner.bottom())
            .zip(self.items.iter().enumerate().skip(offset))
        {
            let highlighted = self.selected == Some(index);
            let row_style = match (highlighted, item.style) {
                (true, _) => self.theme.selected_style(),
                (false, Some(style)) => style,
                (false, None) => self.theme.secondary_text_style(),
            };

            if highlighted {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), row_style);
            }

            let mut x = inner.x;
            if let Some(icon) = item.icon {
                x += put_graphemes(icon, buf, x, y, right, row_style);
                x += put_graphemes(" ", buf, x, y, right, row_style);
            }

            for span in &item.text.spans {
                // Span colors stay visible on top of the highlight background
                let style = if highlighted {
                    row_style.patch(span.style)
                } else {
                    span.style.patch(row_style)
                };
                x += put_graphemes(&span.content, buf, x, y, right, style);
            }
        }
    }
}

/// Helper function to create a styled block
pub fn modern_block<'a>(
    title: Option<&'a str>,
    theme: &'a ModernTheme,
    focused: bool,
) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        });

    if let Some(title) = title {
        block = block.title(title);
    }

    block
}

/// Create a styled icon span
pub fn icon_span<'a>(icon: &'a str, style: Style) -> Span<'a> {
    Span::styled(icon, style)
}

/// Create a metric display span (for numbers)
pub fn metric_span<'a>(text: String, theme: &'a ModernTheme) -> Span<'a> {
    Span::styled(text, theme.metric_style())
}

/// Icon for a todo's completion state
pub fn todo_icon(completed: bool) -> &'static str {
    if completed {
        ModernIcons::COMPLETED
    } else {
        ModernIcons::PENDING
    }
}

/// Icon for whether storage has caught up with memory
pub fn sync_icon(synced: bool) -> &'static str {
    if synced {
        ModernIcons::SAVED
    } else {
        ModernIcons::UNSAVED
    }
}

/// Truncate text to `max_width` columns, adding an ellipsis when cut.
/// Works on grapheme clusters so wide characters are never split.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let target_width = max_width.saturating_sub(ellipsis.width());
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > target_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    result.push_str(ellipsis);
    result
}

/// Keep only the tail of `text` that fits in `max_width` columns.
/// Used for the input line so the cursor end stays visible.
pub fn tail_to_width(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();

    for (index, grapheme) in text.grapheme_indices(true).rev() {
        let grapheme_width = grapheme.width();
        if width + grapheme_width > max_width {
            break;
        }
        width += grapheme_width;
        start = index;
    }

    &text[start..]
}
