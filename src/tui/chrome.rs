// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Canvas, header, footer, help and search rendering helpers used by the TUI.

const CANVAS_PADDING: f64 = 40.0;

fn view_title(label: &str, count: usize) -> String {
    format!("─ {label} [{count}] ")
}

fn breadcrumb_line(app: &App) -> Line<'static> {
    let navigator = app.editor.navigator();
    let mut spans = Vec::<Span<'static>>::new();
    for crumb in navigator.breadcrumb() {
        if !spans.is_empty() {
            spans.push(Span::styled(" › ", Style::default().fg(FOOTER_LABEL_COLOR)));
        }
        let style = if crumb.is_current {
            Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(FOOTER_KEY_COLOR)
        };
        spans.push(Span::styled(format!("{}:{}", crumb.depth, crumb.label), style));
    }
    if let Some(target) = navigator.back_target() {
        spans.push(Span::styled(
            format!("   ← {target}"),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    Line::from(spans)
}

fn node_list_line(node: &NodeRecord, selected: bool) -> Line<'static> {
    let label_style = if selected {
        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
    } else if node.sub_graph().is_some() {
        Style::default().fg(OWNER_COLOR)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::raw(format!("{} ", kind_marker(node.kind()))),
        Span::styled(node.display_label().to_owned(), label_style),
    ];
    if node.sub_graph().is_some() {
        spans.push(Span::styled(" ↳", Style::default().fg(OWNER_COLOR)));
    }
    spans.push(Span::styled(format!("  {}", node.id()), Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Width and height a node occupies on the canvas. Unsized nodes are measured from their label.
fn node_extent(node: &NodeRecord) -> (f64, f64) {
    match node.size() {
        Some(size) => (size.width, size.height),
        None => (node.display_label().chars().count() as f64 * 8.0 + 16.0, 24.0),
    }
}

/// Canvas bounds covering every node. Diagram y grows downwards, so it is negated.
fn canvas_bounds(nodes: &[NodeRecord]) -> ([f64; 2], [f64; 2]) {
    if nodes.is_empty() {
        return ([0.0, 800.0], [-600.0, 0.0]);
    }
    let mut x = [f64::MAX, f64::MIN];
    let mut y = [f64::MAX, f64::MIN];
    for node in nodes {
        let (width, height) = node_extent(node);
        let position = node.position();
        x[0] = x[0].min(position.x - width / 2.0);
        x[1] = x[1].max(position.x + width / 2.0);
        y[0] = y[0].min(-position.y - height / 2.0);
        y[1] = y[1].max(-position.y + height / 2.0);
    }
    (
        [x[0] - CANVAS_PADDING, x[1] + CANVAS_PADDING],
        [y[0] - CANVAS_PADDING, y[1] + CANVAS_PADDING],
    )
}

fn render_canvas(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let surface = app.editor.surface();
    let nodes = surface.nodes();
    let selection = surface.selection();
    let (x_bounds, y_bounds) = canvas_bounds(nodes);
    let title = format!("─ {} ", app.editor.navigator().current().id());

    let widget = canvas::Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for edge in surface.edges() {
                let (Some(source), Some(target)) =
                    (surface.find_node(edge.source()), surface.find_node(edge.target()))
                else {
                    continue;
                };
                let (from, to) = (source.position(), target.position());
                ctx.draw(&canvas::Line {
                    x1: from.x,
                    y1: -from.y,
                    x2: to.x,
                    y2: -to.y,
                    color: EDGE_COLOR,
                });
            }
            ctx.layer();
            for node in nodes {
                let (width, height) = node_extent(node);
                let position = node.position();
                let color = if selection == Some(node.id()) {
                    FOCUS_COLOR
                } else if node.sub_graph().is_some() {
                    OWNER_COLOR
                } else {
                    Color::White
                };
                if node.kind() != NodeKind::Text {
                    ctx.draw(&canvas::Rectangle {
                        x: position.x - width / 2.0,
                        y: -position.y - height / 2.0,
                        width,
                        height,
                        color,
                    });
                }
                ctx.print(
                    position.x - width / 2.0 + 4.0,
                    -position.y,
                    Span::styled(node.display_label().to_owned(), Style::default().fg(color)),
                );
            }
        });
    frame.render_widget(widget, area);
}

fn footer_line(app: &App, toast: Option<&str>) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    if let Mode::Prompt { prompt, input } = &app.mode {
        spans.push(Span::styled(
            format!("{}: ", prompt.title()),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::raw(input.clone()));
        return Line::from(spans);
    }

    if let Some(source) = &app.connect_from {
        push_footer_entry(&mut spans, "connect from", source.as_str());
        push_footer_entry(&mut spans, "target", "c");
        push_footer_entry(&mut spans, "cancel", "Esc");
    } else {
        push_footer_entry(&mut spans, "open", "Enter");
        push_footer_entry(&mut spans, "back", "Bksp");
        push_footer_entry(&mut spans, "add", "r/t/i");
        push_footer_entry(&mut spans, "search", "/");
        push_footer_entry(&mut spans, "save", "s");
        push_footer_entry(&mut spans, "help", "?");
        push_footer_entry(&mut spans, "quit", "q");
    }
    if let Some(message) = toast {
        spans.push(Span::styled(format!(" | {message}"), Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{key:>width$}", width = key_width),
            Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    let key_width = KEYMAP.iter().map(|(key, _)| key.chars().count()).max().unwrap_or(0);
    KEYMAP.iter().map(|(key, desc)| help_kv(key, desc, key_width)).collect()
}

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(help_lines())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("─ Help "));
    frame.render_widget(help, area);
}

fn search_result_line(label: &str, path: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(label.to_owned(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {path}"), Style::default().fg(FOOTER_LABEL_COLOR)),
    ])
}

fn render_search(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(70, 60, main_area);
    frame.render_widget(Clear, area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search = app.editor.search();
    let input = Paragraph::new(search.query().to_owned())
        .block(Block::default().borders(Borders::ALL).title("─ Search "));
    frame.render_widget(input, parts[0]);
    let cursor_x = parts[0]
        .x
        .saturating_add(1)
        .saturating_add(search.query().chars().count() as u16)
        .min(parts[0].x.saturating_add(parts[0].width.saturating_sub(2)));
    frame.set_cursor_position((cursor_x, parts[0].y.saturating_add(1)));

    let results = search.results();
    let block = Block::default().borders(Borders::ALL).title(view_title("Results", results.len()));
    if results.is_empty() {
        frame.render_widget(Paragraph::new("No results").block(block), parts[1]);
        return;
    }
    let items: Vec<ListItem<'static>> = results
        .iter()
        .map(|entry| {
            let label = entry.label.as_deref().unwrap_or(kind_marker(entry.kind));
            ListItem::new(search_result_line(label, &entry.path_display()))
        })
        .collect();
    let mut state = ListState::default();
    state.select(search.selected_index());
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, parts[1], &mut state);
}
