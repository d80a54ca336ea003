use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Focus, StatusType},
    shared::theme::{ModernIcons, ModernTheme},
    widgets::{
        icon_span, metric_span, sync_icon, tail_to_width, todo_icon, truncate_to_width,
        ModernCard, ModernList, ModernListItem, ModernProgressBar,
    },
};

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.current_theme().clone();
    let area = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Input
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // List
            Constraint::Length(4), // Footer
        ])
        .split(area);

    draw_header(f, chunks[0], app, &theme);
    draw_input(f, chunks[1], app, &theme);
    draw_progress(f, chunks[2], app, &theme);
    draw_todo_list(f, chunks[3], app, &theme);
    draw_footer(f, chunks[4], app, &theme);

    if app.config.show_help {
        draw_help_overlay(f, area, app, &theme);
    }
}

fn status_style(status_type: &StatusType, theme: &ModernTheme) -> (Style, &'static str) {
    match status_type {
        StatusType::Info => (theme.info_style(), ModernIcons::INFO),
        StatusType::Success => (theme.success_style(), ModernIcons::SUCCESS),
        StatusType::Warning => (theme.warning_style(), ModernIcons::WARNING),
        StatusType::Error => (theme.danger_style(), ModernIcons::ERROR),
    }
}

/// Title, item count, sync state and the current status message
fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let stats = app.store.list().stats();
    let synced = app.store.is_synced();

    let mut header_spans = vec![
        icon_span(ModernIcons::BULLET, Style::default().fg(theme.accent)),
        Span::styled(format!(" {}", app.i18n.t("app.title")), theme.header_style()),
        Span::styled(" │ ", theme.border_style()),
        metric_span(stats.total.to_string(), theme),
        Span::styled(
            format!(" {}", app.i18n.t("header.items")),
            theme.secondary_text_style(),
        ),
        Span::styled(" │ ", theme.border_style()),
    ];

    let (sync_style, sync_label) = if synced {
        (theme.success_style(), app.i18n.t("header.saved"))
    } else {
        (theme.warning_style(), app.i18n.t("header.unsaved"))
    };
    header_spans.push(icon_span(sync_icon(synced), sync_style));
    header_spans.push(Span::styled(format!(" {sync_label}"), sync_style));

    if let Some(ref status) = app.status_message {
        let (style, icon) = status_style(&status.message_type, theme);
        header_spans.push(Span::styled(" │ ", theme.border_style()));
        header_spans.push(Span::styled(format!("{} {}", icon, status.text), style));
    }

    ModernCard::new(Text::from(Line::from(header_spans)), theme).render(area, f.buffer_mut());
}

fn draw_input(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let focused = app.focus == Focus::Input;

    // Borders, pencil icon and cursor take five columns
    let available = (area.width as usize).saturating_sub(5);

    let line = if app.input.is_empty() && !focused {
        Line::from(vec![
            icon_span(ModernIcons::INPUT, theme.dimmed_style()),
            Span::styled(
                format!(" {}", app.i18n.t("input.placeholder")),
                theme.dimmed_style(),
            ),
        ])
    } else {
        let visible = tail_to_width(&app.input, available);
        let mut spans = vec![
            icon_span(ModernIcons::INPUT, Style::default().fg(theme.accent)),
            Span::styled(format!(" {visible}"), Style::default().fg(theme.text_primary)),
        ];
        if focused {
            spans.push(Span::styled(
                ModernIcons::CURSOR,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        if app.input.is_empty() {
            spans.push(Span::styled(
                app.i18n.t("input.placeholder"),
                theme.dimmed_style(),
            ));
        }
        Line::from(spans)
    };

    ModernCard::new(Text::from(line), theme)
        .title(app.i18n.t("input.title"))
        .focused(focused)
        .render(area, f.buffer_mut());
}

fn draw_progress(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let stats = app.store.list().stats();
    let label = format!(
        "{}/{} {}",
        stats.completed,
        stats.total,
        app.i18n.t("progress.completed")
    );

    // Keep one column of margin on each side so the bar lines up with the cards
    let bar_area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    ModernProgressBar::new(stats.completion_percentage, theme)
        .label(&label)
        .render(bar_area, f.buffer_mut());
}

fn draw_todo_list(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let focused = app.focus == Focus::List;
    let items = app.store.items();

    if items.is_empty() {
        let content = Text::from(Line::from(Span::styled(
            app.i18n.t("list.empty"),
            theme.dimmed_style(),
        )));
        ModernCard::new(content, theme)
            .title(app.i18n.t("list.title"))
            .focused(focused)
            .render(area, f.buffer_mut());
        return;
    }

    // Borders plus icon and its trailing space
    let text_width = (area.width as usize).saturating_sub(4);

    let list_items = items
        .iter()
        .map(|item| {
            let style = if item.completed {
                theme.completed_item_style()
            } else {
                theme.pending_item_style()
            };
            ModernListItem::new(Span::styled(
                truncate_to_width(&item.text, text_width),
                style,
            ))
            .icon(todo_icon(item.completed))
            .style(style)
        })
        .collect();

    ModernList::new(list_items, theme)
        .title(app.i18n.t("list.title"))
        .selected(Some(app.selected.min(items.len() - 1)))
        .focused(focused)
        .render(area, f.buffer_mut());
}

fn key_hint<'a>(key: &'a str, theme: &ModernTheme) -> Span<'a> {
    Span::styled(key, theme.key_hint_style())
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let sep = || Span::styled(" | ", theme.secondary_text_style());
    let label = |key: &str| {
        Span::styled(
            format!("{} ", app.i18n.t(key)),
            theme.secondary_text_style(),
        )
    };

    let first = match app.focus {
        Focus::Input => Line::from(vec![
            label("controls.add"),
            key_hint("Enter", theme),
            sep(),
            label("controls.focus"),
            key_hint("Esc/Tab", theme),
        ]),
        Focus::List => Line::from(vec![
            label("controls.navigation"),
            key_hint("j/k ↑↓", theme),
            sep(),
            label("controls.toggle"),
            key_hint("Space/Enter", theme),
            sep(),
            label("controls.focus"),
            key_hint("i/Tab", theme),
        ]),
    };

    let second = Line::from(vec![
        label("controls.theme"),
        key_hint("t", theme),
        Span::styled(
            format!(" ({})", app.config.theme_mode.display_name()),
            theme.info_style(),
        ),
        sep(),
        label("controls.language"),
        key_hint("l", theme),
        sep(),
        label("controls.help"),
        key_hint("?", theme),
        sep(),
        label("controls.quit"),
        Span::styled("q", theme.danger_style().add_modifier(Modifier::BOLD)),
    ]);

    ModernCard::new(Text::from(vec![first, second]), theme)
        .title(app.i18n.t("controls.title"))
        .render(area, f.buffer_mut());
}

/// Draw help overlay with explanations
fn draw_help_overlay(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    // Create centered popup area
    let popup_area = Rect {
        x: area.width / 6,
        y: area.height / 6,
        width: area.width * 2 / 3,
        height: area.height * 2 / 3,
    };

    f.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from(Span::styled(
        app.i18n.t("help.title"),
        theme.header_style(),
    ))];
    for key in [
        "help.line1",
        "help.line2",
        "help.line3",
        "help.line4",
        "help.line5",
        "help.line6",
    ] {
        lines.push(Line::from(vec![
            icon_span(ModernIcons::ARROW_RIGHT, Style::default().fg(theme.accent)),
            Span::styled(format!(" {}", app.i18n.t(key)), theme.secondary_text_style()),
        ]));
    }
    lines.push(Line::from(""));

    let close_hint = format!("{} ?/Esc", ModernIcons::HELP);
    let padding = (popup_area.width as usize)
        .saturating_sub(close_hint.width() + 2)
        / 2;
    lines.push(Line::from(Span::styled(
        format!("{}{close_hint}", " ".repeat(padding)),
        theme.dimmed_style(),
    )));

    ModernCard::new(Text::from(lines), theme)
        .title(app.i18n.t("help.title"))
        .focused(true)
        .render(popup_area, f.buffer_mut());
}
