// SPDX-FileCopyrightText: 2026 Fade Station
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! Interactive node-graph editor shell (ratatui + crossterm). Mouse events in
//! terminal cells are mapped onto the canvas pixel space the graph model uses,
//! so drags and the two-click connect gesture work cell-for-cell.

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
        Block, Borders, Clear, Paragraph, Wrap,
    },
};

use crate::editor::{port_position, Cursor, EditOutcome, Editor, PortKind};
use crate::layout::{compute_grid, ContainerSize};
use crate::model::{FlowVariant, LayoutMode, NodeType};
use crate::render::sample_connection;
use crate::store::FlowStore;

mod theme;

/// Pixels of canvas space covered by one terminal cell.
const PX_PER_COL: f64 = 10.0;
const PX_PER_ROW: f64 = 20.0;

const SCROLL_STEP_X: f64 = 40.0;
const SCROLL_STEP_Y: f64 = 40.0;
const CURVE_SEGMENTS: usize = 24;
const RELAYOUT_DEBOUNCE: Duration = Duration::from_millis(150);
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Runs the interactive editor for one flow variant until the user quits.
pub fn run(store: FlowStore, variant: FlowVariant) -> Result<(), Box<dyn Error>> {
    let graph = store.load_or_seed(variant)?;
    run_app(App::new(Some(store), variant, graph))
}

/// Runs the editor on the built-in demo seed without touching disk.
pub fn run_demo(variant: FlowVariant) -> Result<(), Box<dyn Error>> {
    run_app(App::new(None, variant, crate::model::demo_flow(variant)))
}

fn run_app(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.expire_toast();
        terminal.draw(|frame| draw(frame, &mut app))?;
        app.flush_pending_relayout();

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(..) => app.schedule_relayout(),
                Event::FocusLost => app.handle_focus_lost(),
                _ => {}
            }
        }
    }

    // Unsaved edits are discarded; writes happen only through `s`.
    Ok(())
}

/// Maps between terminal cells and canvas pixels for one drawn frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CanvasView {
    inner: Rect,
    scroll_x: f64,
    scroll_y: f64,
}

impl CanvasView {
    fn container(&self) -> ContainerSize {
        ContainerSize::new(
            f64::from(self.inner.width) * PX_PER_COL,
            f64::from(self.inner.height) * PX_PER_ROW,
        )
    }

    /// Canvas pixel at the center of the given terminal cell, if the cell
    /// lies inside the drawn canvas.
    fn pixel_at(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        if column < self.inner.x
            || row < self.inner.y
            || column >= self.inner.x + self.inner.width
            || row >= self.inner.y + self.inner.height
        {
            return None;
        }
        let x = self.scroll_x + (f64::from(column - self.inner.x) + 0.5) * PX_PER_COL;
        let y = self.scroll_y + (f64::from(row - self.inner.y) + 0.5) * PX_PER_ROW;
        Some((x, y))
    }

    fn x_bounds(&self) -> [f64; 2] {
        [self.scroll_x, self.scroll_x + self.container().width]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [self.scroll_y, self.scroll_y + self.container().height]
    }

    /// The canvas widget's y axis points up; graph pixels point down.
    fn flip_y(&self, y: f64) -> f64 {
        let [min, max] = self.y_bounds();
        min + max - y
    }
}

struct Toast {
    message: String,
    expires_at: Instant,
}

struct TextPrompt {
    input: String,
}

struct App {
    store: Option<FlowStore>,
    variant: FlowVariant,
    editor: Editor,
    should_quit: bool,
    scroll_x: f64,
    scroll_y: f64,
    view: Option<CanvasView>,
    relayout_at: Option<Instant>,
    prompt: Option<TextPrompt>,
    toast: Option<Toast>,
}

impl App {
    fn new(store: Option<FlowStore>, variant: FlowVariant, graph: crate::model::FlowGraph) -> Self {
        Self {
            store,
            variant,
            editor: Editor::new(graph, variant.editable()),
            should_quit: false,
            scroll_x: 0.0,
            scroll_y: 0.0,
            view: None,
            // Grid variants snap to the terminal size on first draw.
            relayout_at: match variant.layout_mode() {
                LayoutMode::Grid => Some(Instant::now()),
                LayoutMode::Freeform => None,
            },
            prompt: None,
            toast: None,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if Instant::now() >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    fn schedule_relayout(&mut self) {
        if self.variant.layout_mode() == LayoutMode::Grid {
            self.relayout_at = Some(Instant::now() + RELAYOUT_DEBOUNCE);
        }
    }

    /// Applies the debounced grid relayout once the deadline passes and a
    /// frame has been drawn (the container size comes from the last frame).
    fn flush_pending_relayout(&mut self) {
        let Some(deadline) = self.relayout_at else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        let Some(view) = self.view else {
            return;
        };
        self.relayout_at = None;
        let node_count = self.editor.graph().nodes().len();
        if let Some(layout) = compute_grid(node_count, view.container()) {
            layout.apply(self.editor.graph_mut());
            self.scroll_x = 0.0;
            self.scroll_y = 0.0;
        }
    }

    fn save(&mut self) -> Result<(), crate::store::StoreError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        store.save(self.variant, self.editor.graph())?;
        self.editor.mark_saved();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key.code);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('s') => {
                if self.store.is_none() {
                    self.set_toast("Demo flow: changes are not persisted");
                } else {
                    match self.save() {
                        Ok(()) => self.set_toast("Saved"),
                        Err(err) => self.set_toast(format!("Save failed: {err}")),
                    }
                }
            }
            KeyCode::Char(ch @ '1'..='5') => self.add_node_key(ch),
            KeyCode::Char('d') | KeyCode::Delete => {
                if !self.editor.editable() {
                    self.set_toast("This flow is read-only");
                } else if let Some(id) = self.editor.delete_selected() {
                    self.set_toast(format!("Deleted {id}"));
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => self.open_prompt(),
            KeyCode::Esc => {
                if self.editor.cancel_gesture() {
                    self.set_toast("Gesture canceled");
                }
            }
            KeyCode::Left => self.scroll_x = (self.scroll_x - SCROLL_STEP_X).max(0.0),
            KeyCode::Right => self.scroll_x += SCROLL_STEP_X,
            KeyCode::Up => self.scroll_y = (self.scroll_y - SCROLL_STEP_Y).max(0.0),
            KeyCode::Down => self.scroll_y += SCROLL_STEP_Y,
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(ch) => prompt.input.push(ch),
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Enter => {
                let input = self.prompt.take().map(|p| p.input).unwrap_or_default();
                if self.editor.set_selected_text(input) {
                    self.set_toast("Text updated");
                }
            }
            KeyCode::Esc => {
                self.prompt = None;
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self) {
        if !self.editor.editable() {
            self.set_toast("This flow is read-only");
            return;
        }
        let Some(node) = self.editor.selected_node() else {
            self.set_toast("Select a node first");
            return;
        };
        self.prompt = Some(TextPrompt {
            input: node.text().to_owned(),
        });
    }

    fn add_node_key(&mut self, ch: char) {
        let node_type = match ch {
            '1' => NodeType::Start,
            '2' => NodeType::Message,
            '3' => NodeType::Condition,
            '4' => NodeType::Action,
            _ => NodeType::End,
        };
        if !self.editor.editable() {
            self.set_toast("This flow is read-only");
            return;
        }
        let (x, y) = self.spawn_position();
        if let Some(id) = self.editor.add_node(node_type, x, y) {
            self.set_toast(format!("Added {} node {id}", node_type.label()));
        }
    }

    /// New nodes land at the center of the visible canvas, nudged per node so
    /// repeated inserts stay distinguishable.
    fn spawn_position(&self) -> (f64, f64) {
        let container = self
            .view
            .map(|view| view.container())
            .unwrap_or_else(|| ContainerSize::new(800.0, 480.0));
        let nudge = (self.editor.graph().nodes().len() % 5) as f64 * 16.0;
        (
            self.scroll_x + container.width / 2.0 - crate::model::DEFAULT_NODE_WIDTH / 2.0 + nudge,
            self.scroll_y + container.height / 2.0 - crate::model::DEFAULT_NODE_HEIGHT / 2.0
                + nudge,
        )
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(view) = self.view else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((x, y)) = view.pixel_at(mouse.column, mouse.row) {
                    let outcome = self.editor.pointer_down(x, y);
                    self.report_outcome(outcome);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((x, y)) = view.pixel_at(mouse.column, mouse.row) {
                    self.editor.pointer_move(x, y);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.editor.pointer_up(),
            MouseEventKind::ScrollUp => self.scroll_y = (self.scroll_y - SCROLL_STEP_Y).max(0.0),
            MouseEventKind::ScrollDown => self.scroll_y += SCROLL_STEP_Y,
            _ => {}
        }
    }

    fn report_outcome(&mut self, outcome: EditOutcome) {
        match outcome {
            EditOutcome::ConnectStarted { from_node, .. } => {
                self.set_toast(format!("Connecting from {from_node}: click an input port"));
            }
            EditOutcome::Connected(_) => self.set_toast("Connected"),
            EditOutcome::ConnectRejected(err) => self.set_toast(format!("Cannot connect: {err}")),
            EditOutcome::ConnectCanceled => self.set_toast("Connection canceled"),
            EditOutcome::None
            | EditOutcome::Selected(_)
            | EditOutcome::SelectionCleared => {}
        }
    }

    fn handle_focus_lost(&mut self) {
        if self.editor.cancel_gesture() {
            self.set_toast("Gesture canceled (focus lost)");
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let footer_area = rows[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(main_area);
    let canvas_area = panes[0];
    let sidebar_area = panes[1];

    let canvas_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(app.variant.title(), theme::panel_title_style()));
    let view = CanvasView {
        inner: canvas_block.inner(canvas_area),
        scroll_x: app.scroll_x,
        scroll_y: app.scroll_y,
    };
    app.view = Some(view);

    draw_canvas(frame, app, canvas_block, canvas_area, view);
    draw_sidebar(frame, app, sidebar_area);
    draw_footer(frame, app, footer_area);

    if app.prompt.is_some() {
        draw_prompt(frame, app, area);
    }
}

fn draw_canvas(frame: &mut Frame<'_>, app: &App, block: Block<'_>, area: Rect, view: CanvasView) {
    let editor = &app.editor;
    let graph = editor.graph();
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(view.x_bounds())
        .y_bounds(view.y_bounds())
        .paint(|ctx| {
            for connection in graph.connections() {
                let samples = sample_connection(connection, graph.nodes(), CURVE_SEGMENTS);
                for pair in samples.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: view.flip_y(pair[0].1),
                        x2: pair[1].0,
                        y2: view.flip_y(pair[1].1),
                        color: theme::CONNECTION_COLOR,
                    });
                }
            }

            for node in graph.nodes() {
                let selected = editor.selected() == Some(node.id());
                let color = if selected {
                    theme::SELECTION_COLOR
                } else {
                    theme::node_color(node.node_type())
                };
                ctx.draw(&Rectangle {
                    x: node.x(),
                    y: view.flip_y(node.y() + node.height()),
                    width: node.width(),
                    height: node.height(),
                    color,
                });

                for index in 0..node.node_type().inputs() {
                    let (px, py) = port_position(node, PortKind::Input, index);
                    ctx.draw(&Circle {
                        x: px,
                        y: view.flip_y(py),
                        radius: 3.0,
                        color: theme::PORT_COLOR,
                    });
                }
                for index in 0..node.node_type().outputs() {
                    let (px, py) = port_position(node, PortKind::Output, index);
                    let armed = editor.pending_connection()
                        == Some((node.id(), index));
                    ctx.draw(&Circle {
                        x: px,
                        y: view.flip_y(py),
                        radius: if armed { 5.0 } else { 3.0 },
                        color: if armed {
                            theme::PENDING_COLOR
                        } else {
                            theme::PORT_COLOR
                        },
                    });
                }

                ctx.print(
                    node.x() + 6.0,
                    view.flip_y(node.y() + 12.0),
                    Line::styled(truncate_label(node), Style::default().fg(color)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

/// Node label fitted to the node width in terminal cells.
fn truncate_label(node: &crate::model::Node) -> String {
    let max_chars = ((node.width() / PX_PER_COL) as usize).saturating_sub(2).max(1);
    let label = if node.text().is_empty() {
        node.node_type().label().to_owned()
    } else {
        node.text().to_owned()
    };
    if label.chars().count() <= max_chars {
        label
    } else {
        let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let graph = app.editor.graph();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Flow: ", theme::panel_title_style()),
            Span::raw(app.variant.slot_key()),
        ]),
        Line::raw(format!(
            "{} nodes, {} connections{}",
            graph.nodes().len(),
            graph.connections().len(),
            if app.editor.is_dirty() { " *" } else { "" },
        )),
        Line::raw(""),
    ];

    match app.editor.selected_node() {
        Some(node) => {
            lines.push(Line::styled("Selected node", theme::panel_title_style()));
            lines.push(Line::raw(format!("id:   {}", node.id())));
            lines.push(Line::raw(format!("type: {}", node.node_type().label())));
            lines.push(Line::raw(format!("pos:  {:.0}, {:.0}", node.x(), node.y())));
            lines.push(Line::raw(format!("size: {:.0}x{:.0}", node.width(), node.height())));
            if !node.text().is_empty() {
                lines.push(Line::raw(format!("text: {}", node.text())));
            }
        }
        None => lines.push(Line::raw("No node selected")),
    }

    if let Some((from_node, from_port)) = app.editor.pending_connection() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Pending: {from_node} port {from_port}"),
            Style::default().fg(theme::PENDING_COLOR),
        ));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Properties"))
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if let Some(toast) = &app.toast {
        let line = Line::styled(format!(" {} ", toast.message), theme::toast_style());
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if app.editor.cursor() == Cursor::Crosshair {
        let line = Line::styled(
            " connect: click an input port (esc cancels) ",
            Style::default().fg(theme::PENDING_COLOR),
        );
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(key, Style::default().fg(theme::FOOTER_KEY_COLOR)),
            Span::styled(label, Style::default().fg(theme::FOOTER_LABEL_COLOR)),
        ]
    };
    let mut spans = Vec::new();
    spans.extend(hint("q", " quit  "));
    spans.extend(hint("s", " save  "));
    if app.editor.editable() {
        spans.extend(hint("1-5", " add node  "));
        spans.extend(hint("d", " delete  "));
        spans.extend(hint("e", " edit text  "));
    }
    spans.extend(hint("esc", " cancel  "));
    spans.extend(hint("arrows", " scroll"));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_prompt(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let width = area.width.saturating_sub(8).min(60).max(20);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height / 2,
        width,
        height: 3,
    };
    frame.render_widget(Clear, popup);
    let body = Paragraph::new(Line::raw(format!("{}_", prompt.input)))
        .style(theme::prompt_style())
        .block(Block::default().borders(Borders::ALL).title("Node text"));
    frame.render_widget(body, popup);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
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
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn view() -> CanvasView {
        CanvasView {
            inner: Rect {
                x: 1,
                y: 1,
                width: 80,
                height: 24,
            },
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    #[test]
    fn cells_map_to_pixel_centers() {
        let view = view();
        assert_eq!(view.pixel_at(1, 1), Some((5.0, 10.0)));
        assert_eq!(view.pixel_at(2, 1), Some((15.0, 10.0)));
        assert_eq!(view.pixel_at(1, 2), Some((5.0, 30.0)));
    }

    #[test]
    fn cells_outside_the_canvas_do_not_map() {
        let view = view();
        assert_eq!(view.pixel_at(0, 5), None);
        assert_eq!(view.pixel_at(5, 0), None);
        assert_eq!(view.pixel_at(81, 5), None);
        assert_eq!(view.pixel_at(5, 25), None);
    }

    #[test]
    fn scroll_offsets_shift_the_mapping() {
        let mut view = view();
        view.scroll_x = 100.0;
        view.scroll_y = 40.0;
        assert_eq!(view.pixel_at(1, 1), Some((105.0, 50.0)));
    }

    #[test]
    fn container_tracks_the_inner_rect() {
        let container = view().container();
        assert_eq!(container.width, 800.0);
        assert_eq!(container.height, 480.0);
    }

    #[test]
    fn quitting_discards_unsaved_edits_without_writing() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "fadeflow-quit-{}-{nanos}",
            std::process::id()
        ));
        let variant = FlowVariant::CallFlow;
        let store = FlowStore::new(&root);
        let slot = store.slot_path(variant);

        let mut app = App::new(Some(store), variant, crate::model::demo_flow(variant));
        app.editor.add_node(NodeType::Message, 600.0, 400.0);
        assert!(app.editor.is_dirty());

        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty()));
        assert!(app.should_quit);
        assert!(app.editor.is_dirty());
        assert!(!slot.exists());
    }

    #[test]
    fn flip_y_reflects_within_the_viewport() {
        let view = view();
        let [min, max] = view.y_bounds();
        assert_eq!(view.flip_y(min), max);
        assert_eq!(view.flip_y(max), min);
        assert_eq!(view.flip_y(view.flip_y(123.0)), 123.0);
    }
}
