// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! An interactive shell (ratatui + crossterm) over [`Editor`]: a canvas of the current level,
//! the node and edge lists, a breadcrumb header and the label search overlay.

use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{canvas, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, warn};

use crate::editor::{Command, Editor, Outcome};
use crate::model::{
    NodeId, NodeKind, NodeRecord, Point, DEFAULT_FONT_SIZE, FONT_SIZES, TEXT_COLORS,
};
use crate::surface::RenderSurface;

const FOCUS_COLOR: Color = Color::LightGreen;
const OWNER_COLOR: Color = Color::LightBlue;
const EDGE_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const MOVE_STEP: f64 = 10.0;
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Key bindings shown in the help overlay, in display order.
const KEYMAP: &[(&str, &str)] = &[
    ("j/k, ↑/↓", "Select next/previous node"),
    ("Enter", "Open the selected rectangle's sub-diagram"),
    ("Backspace/Esc", "Back to the enclosing level"),
    ("0-9", "Jump to breadcrumb level"),
    ("r/t", "Add rectangle/text node"),
    ("i", "Add image node from a PNG file"),
    ("e", "Edit label"),
    ("c", "Connect (press on source, then on target)"),
    ("x/Delete", "Delete selected node"),
    ("+/-", "Larger/smaller font"),
    ("p", "Cycle text color"),
    ("H/J/K/L", "Move selected node"),
    ("/", "Search labels across all levels"),
    ("s/S", "Save/save as"),
    ("o", "Open document"),
    ("?", "Help (toggle)"),
    ("q", "Quit"),
];

/// Runs the interactive terminal UI until the user quits.
pub fn run(editor: Editor) -> io::Result<()> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(editor);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (header_area, main_area, status_area) = (layout[0], layout[1], layout[2]);

    frame.render_widget(Paragraph::new(breadcrumb_line(app)), header_area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_area);
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(panes[1]);

    render_canvas(frame, app, panes[0]);

    let selected_index = app.selected_index();
    let surface = app.editor.surface();
    let selection = surface.selection();
    let nodes: Vec<ListItem<'static>> = surface
        .nodes()
        .iter()
        .map(|node| ListItem::new(node_list_line(node, selection == Some(node.id()))))
        .collect();
    app.nodes_state.select(selected_index);
    let nodes = List::new(nodes)
        .block(Block::default().borders(Borders::ALL).title(view_title("Nodes", surface.nodes().len())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(nodes, sidebar[0], &mut app.nodes_state);

    let surface = app.editor.surface();
    let edges: Vec<ListItem<'static>> = surface
        .edges()
        .iter()
        .map(|edge| {
            ListItem::new(format!(
                "{}: {} → {}",
                edge.id(),
                node_label(surface.nodes(), edge.source()),
                node_label(surface.nodes(), edge.target())
            ))
        })
        .collect();
    let edges = List::new(edges)
        .block(Block::default().borders(Borders::ALL).title(view_title("Edges", surface.edges().len())));
    frame.render_widget(edges, sidebar[1]);

    let toast = app.current_toast().map(str::to_owned);
    frame.render_widget(Paragraph::new(footer_line(app, toast.as_deref())), status_area);
    if let Mode::Prompt { prompt, input } = &app.mode {
        let cursor_x = status_area
            .x
            .saturating_add(prompt.title().chars().count() as u16 + 2)
            .saturating_add(input.chars().count() as u16)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, status_area.y));
    }

    if app.editor.search().is_visible() {
        render_search(frame, app, main_area);
    } else if app.show_help {
        render_help(frame, main_area);
    }
}

// Extracted canvas/header/footer/overlay rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// What the footer line is collecting text for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Prompt {
    Label { node_id: NodeId },
    ImagePath,
    OpenFile,
    SaveAs,
}

impl Prompt {
    fn title(&self) -> &'static str {
        match self {
            Self::Label { .. } => "Label",
            Self::ImagePath => "Image",
            Self::OpenFile => "Open",
            Self::SaveAs => "Save as",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Normal,
    Prompt { prompt: Prompt, input: String },
}

struct App {
    editor: Editor,
    mode: Mode,
    nodes_state: ListState,
    connect_from: Option<NodeId>,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(editor: Editor) -> Self {
        Self {
            editor,
            mode: Mode::Normal,
            nodes_state: ListState::default(),
            connect_from: None,
            show_help: false,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Handles one key press. Returns true when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.editor.search().is_visible() {
            self.handle_search_key(code);
            return false;
        }
        if let Mode::Prompt { .. } = self.mode {
            self.handle_prompt_key(code);
            return false;
        }
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_by(-1),
            KeyCode::Enter => self.descend_selected(),
            KeyCode::Backspace | KeyCode::Esc => {
                if self.connect_from.take().is_some() {
                    self.set_toast("Connect cancelled");
                } else {
                    self.run(Command::GoBack);
                }
            }
            KeyCode::Char(digit @ '0'..='9') => {
                let depth = digit.to_digit(10).map_or(0, |depth| depth as usize);
                self.run(Command::GoToLevel { depth });
            }
            KeyCode::Char('r') => {
                let position = self.spawn_point();
                self.run(Command::AddRectangle { position, label: None });
            }
            KeyCode::Char('t') => {
                let position = self.spawn_point();
                self.run(Command::AddText { position, label: None });
            }
            KeyCode::Char('i') => self.open_prompt(Prompt::ImagePath, String::new()),
            KeyCode::Char('e') => {
                if let Some(node) = self.selected_node() {
                    let prompt = Prompt::Label { node_id: node.id().clone() };
                    let input = node.label().unwrap_or_default().to_owned();
                    self.open_prompt(prompt, input);
                }
            }
            KeyCode::Char('c') => self.connect_step(),
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(node_id) = self.selected_id() {
                    self.run(Command::DeleteNode { node_id });
                }
            }
            KeyCode::Char('+') => self.step_font_size(1),
            KeyCode::Char('-') => self.step_font_size(-1),
            KeyCode::Char('p') => self.cycle_text_color(),
            KeyCode::Char('H') => self.move_selected(-MOVE_STEP, 0.0),
            KeyCode::Char('L') => self.move_selected(MOVE_STEP, 0.0),
            KeyCode::Char('K') => self.move_selected(0.0, -MOVE_STEP),
            KeyCode::Char('J') => self.move_selected(0.0, MOVE_STEP),
            KeyCode::Char('/') => {
                self.run(Command::SearchShow);
            }
            KeyCode::Char('s') => {
                self.run(Command::Save);
            }
            KeyCode::Char('S') => {
                let current = self.editor.file().path().display().to_string();
                self.open_prompt(Prompt::SaveAs, current);
            }
            KeyCode::Char('o') => {
                let current = self.editor.file().path().display().to_string();
                self.open_prompt(Prompt::OpenFile, current);
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.run(Command::SearchHide);
            }
            KeyCode::Enter => {
                self.run(Command::SearchConfirm);
            }
            KeyCode::Down => {
                self.run(Command::SearchNext);
            }
            KeyCode::Up => {
                self.run(Command::SearchPrevious);
            }
            KeyCode::Backspace => {
                let mut query = self.editor.search().query().to_owned();
                query.pop();
                self.run(Command::SearchQuery { query });
            }
            KeyCode::Char(ch) => {
                let mut query = self.editor.search().query().to_owned();
                query.push(ch);
                self.run(Command::SearchQuery { query });
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Mode::Prompt { input, .. } = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) => input.push(ch),
            KeyCode::Enter => {
                let Mode::Prompt { prompt, input } = std::mem::replace(&mut self.mode, Mode::Normal)
                else {
                    return;
                };
                self.submit_prompt(prompt, input);
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt, input: String) {
        let input = input.trim().to_owned();
        match prompt {
            Prompt::Label { node_id } => {
                self.run(Command::EditLabel { node_id, label: input });
            }
            Prompt::ImagePath if input.is_empty() => {}
            Prompt::ImagePath => {
                let position = self.spawn_point();
                self.run(Command::AddImage { position, path: PathBuf::from(input) });
            }
            Prompt::OpenFile => {
                let path = (!input.is_empty()).then(|| PathBuf::from(input));
                self.run(Command::Load { path });
            }
            Prompt::SaveAs if input.is_empty() => {}
            Prompt::SaveAs => {
                self.run(Command::SaveAs { path: PathBuf::from(input) });
            }
        }
    }

    fn open_prompt(&mut self, prompt: Prompt, input: String) {
        self.mode = Mode::Prompt { prompt, input };
    }

    /// Executes `command`, reporting failures and notable outcomes in the footer.
    fn run(&mut self, command: Command) -> Option<Outcome> {
        match self.editor.execute(command) {
            Ok(outcome) => {
                self.report(&outcome);
                Some(outcome)
            }
            Err(err) => {
                warn!(error = %err, "command failed");
                self.set_toast(err.to_string());
                None
            }
        }
    }

    fn report(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Saved { path } => self.set_toast(format!("Saved {}", path.display())),
            Outcome::Loaded { depth } => {
                self.connect_from = None;
                self.set_toast(format!("Loaded at depth {depth}"));
            }
            Outcome::Found { entry: Some(entry) } => {
                self.set_toast(format!("Found in {}", entry.path_display()));
            }
            Outcome::Found { entry: None } => self.set_toast("No match"),
            Outcome::Navigated { moved: true } => self.connect_from = None,
            Outcome::Edited { delta } if delta.removed_levels > 0 => {
                self.set_toast(format!("Deleted with {} nested level(s)", delta.removed_levels));
            }
            _ => {}
        }
    }

    fn selected_id(&self) -> Option<NodeId> {
        self.editor.surface().selection().cloned()
    }

    fn selected_node(&self) -> Option<&NodeRecord> {
        let surface = self.editor.surface();
        surface.selection().and_then(|node_id| surface.find_node(node_id))
    }

    fn selected_index(&self) -> Option<usize> {
        let surface = self.editor.surface();
        let selected = surface.selection()?;
        surface.nodes().iter().position(|node| node.id() == selected)
    }

    fn select_by(&mut self, step: isize) {
        let nodes = self.editor.surface().nodes();
        if nodes.is_empty() {
            return;
        }
        let len = nodes.len() as isize;
        let next = match self.selected_index() {
            Some(index) => (index as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        let node_id = nodes[next as usize].id().clone();
        self.run(Command::Select { node_id: Some(node_id) });
    }

    fn descend_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        if !node.kind().can_own_subgraph() {
            let message = format!("A {} node has no sub-diagram", node.kind());
            self.set_toast(message);
            return;
        }
        let node_id = node.id().clone();
        debug!(node_id = %node_id, "descending");
        self.run(Command::Descend { node_id });
    }

    fn connect_step(&mut self) {
        let Some(selected) = self.selected_id() else {
            return;
        };
        match self.connect_from.take() {
            None => {
                self.set_toast(format!("Connect from {selected}: select the target, press c"));
                self.connect_from = Some(selected);
            }
            Some(source) => {
                self.run(Command::Connect { source, target: selected });
            }
        }
    }

    fn step_font_size(&mut self, step: isize) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let current = node.style().font_size().unwrap_or(DEFAULT_FONT_SIZE);
        let font_size = if step > 0 {
            FONT_SIZES.iter().copied().find(|size| *size > current)
        } else {
            FONT_SIZES.iter().rev().copied().find(|size| *size < current)
        };
        if let Some(font_size) = font_size {
            let node_id = node.id().clone();
            self.run(Command::SetFontSize { node_id, font_size });
        }
    }

    fn cycle_text_color(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let next = node
            .style()
            .text_color()
            .and_then(|color| TEXT_COLORS.iter().position(|(_, value)| *value == color))
            .map_or(0, |index| (index + 1) % TEXT_COLORS.len());
        let (name, color) = TEXT_COLORS[next];
        let node_id = node.id().clone();
        if self.run(Command::SetTextColor { node_id, color: color.to_owned() }).is_some() {
            self.set_toast(format!("Text color: {name}"));
        }
    }

    fn move_selected(&mut self, dx: f64, dy: f64) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let position = node.position();
        let node_id = node.id().clone();
        self.run(Command::Move { node_id, position: Point::new(position.x + dx, position.y + dy) });
    }

    /// Where the next new node goes: a grid that fills row by row.
    fn spawn_point(&self) -> Point {
        let count = self.editor.surface().nodes().len();
        Point::new(100.0 + (count % 5) as f64 * 200.0, 100.0 + (count / 5) as f64 * 120.0)
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn current_toast(&mut self) -> Option<&str> {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= Instant::now()) {
            self.toast = None;
        }
        self.toast.as_ref().map(|toast| toast.message.as_str())
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn node_label<'a>(nodes: &'a [NodeRecord], node_id: &'a NodeId) -> &'a str {
    nodes
        .iter()
        .find(|node| node.id() == node_id)
        .map_or(node_id.as_str(), NodeRecord::display_label)
}

fn kind_marker(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Rectangle => "▭",
        NodeKind::Text => "T",
        NodeKind::Image => "▣",
    }
}
