use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::io::{stdout, Stdout};
use std::time::Duration;

use jed::document::{DocState, Document, NodeKind};
use jed::editor::Editor;
use jed::mode::{
    CommandMode, EditMode, EditorContext, InputResult, Mode, ModeHandler, NormalMode, RenameMode,
};
use jed::ui::{flatten, Row, Viewport};

struct App {
    should_quit: bool,
    editor: Editor,
    mode: Mode,
    normal: NormalMode,
    edit: EditMode,
    rename: RenameMode,
    command: CommandMode,
    /// Selected row in the flattened tree
    cursor: usize,
    viewport: Viewport,
    /// Last status message, shown until the next handled key
    message: Option<String>,
}

impl App {
    fn new() -> Self {
        Self {
            should_quit: false,
            editor: Editor::new(),
            mode: Mode::Normal,
            normal: NormalMode::new(),
            edit: EditMode::new(),
            rename: RenameMode::new(),
            command: CommandMode::new(),
            cursor: 0,
            viewport: Viewport::new(0, 40),
            message: None,
        }
    }

    fn load_file(&mut self, path: &str) -> Result<()> {
        let document = Document::load_file(path)?;
        let stats = document.stats();
        eprintln!("Loaded {} ({} nodes, {} chars)", path, stats.nodes, stats.chars);
        self.editor = Editor::with_document(document);
        self.cursor = 0;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            self.handle_key(key)?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Rows are recomputed per event so paths always match the current
        // document; a stale cursor is clamped, never trusted.
        let rows = flatten(self.editor.value(), self.editor.collapse());
        if self.cursor >= rows.len() {
            self.cursor = rows.len().saturating_sub(1);
        }
        let ctx = EditorContext {
            editor: &mut self.editor,
            rows: &rows,
            cursor: &mut self.cursor,
            viewport: &mut self.viewport,
        };
        let result = match self.mode {
            Mode::Normal => self.normal.handle_key(key, ctx)?,
            Mode::Edit => self.edit.handle_key(key, ctx)?,
            Mode::Rename => self.rename.handle_key(key, ctx)?,
            Mode::Command => self.command.handle_key(key, ctx)?,
        };
        match result {
            InputResult::Handled => {
                self.message = None;
            }
            InputResult::NotHandled => {}
            InputResult::Quit => self.should_quit = true,
            InputResult::ModeSwitch(mode) => {
                self.mode = mode;
                self.message = None;
            }
            InputResult::BeginEdit { path, text } => {
                if self.editor.is_read_only() {
                    self.message = Some("document is read-only".to_string());
                } else {
                    self.edit.begin(path, text);
                    self.mode = Mode::Edit;
                }
            }
            InputResult::BeginRename { parent, old_key } => {
                if self.editor.is_read_only() {
                    self.message = Some("document is read-only".to_string());
                } else {
                    self.rename.begin(parent, old_key);
                    self.mode = Mode::Rename;
                }
            }
            InputResult::Message(msg) => {
                // A finished command drops back to normal mode; edit and
                // rename stay active so the input can be corrected.
                if self.mode == Mode::Command {
                    self.mode = Mode::Normal;
                }
                self.message = Some(msg);
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.show_cursor()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn kind_style(kind: NodeKind) -> Style {
    match kind {
        NodeKind::Object | NodeKind::Array => Style::default().fg(Color::Blue),
        NodeKind::String => Style::default().fg(Color::Green),
        NodeKind::Number => Style::default().fg(Color::Yellow),
        NodeKind::Bool => Style::default().fg(Color::Cyan),
        NodeKind::Null => Style::default().fg(Color::Gray),
    }
}

fn tree_line(row: &Row, selected: bool) -> Line<'static> {
    let mut spans = Vec::new();
    spans.push(Span::raw("  ".repeat(row.depth)));
    if row.is_container() {
        spans.push(Span::raw(if row.collapsed { "+ " } else { "- " }));
    } else {
        spans.push(Span::raw("  "));
    }
    if let Some(label) = &row.label {
        spans.push(Span::styled(
            label.clone(),
            Style::default().fg(Color::Magenta),
        ));
        spans.push(Span::raw(": "));
    }
    spans.push(Span::styled(row.summary.clone(), kind_style(row.kind)));
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(Color::DarkGray))
    } else {
        line
    }
}

/// Per-line syntax colors for the preview pane.
fn colorize_json_line(line: &str) -> Line {
    let mut spans = Vec::new();
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' | b'}' | b'[' | b']' => {
                spans.push(Span::styled(
                    line[pos..pos + 1].to_string(),
                    Style::default().fg(Color::Blue),
                ));
                pos += 1;
            }
            b'"' => {
                // Scan to the matching quote, honoring escapes
                let start = pos;
                pos += 1;
                while pos < bytes.len() && bytes[pos] != b'"' {
                    if bytes[pos] == b'\\' {
                        pos += 1;
                    }
                    pos += 1;
                }
                pos = (pos + 1).min(bytes.len());
                spans.push(Span::styled(
                    line[start..pos].to_string(),
                    Style::default().fg(Color::Green),
                ));
            }
            b'0'..=b'9' | b'-' => {
                let start = pos;
                while pos < bytes.len()
                    && matches!(bytes[pos], b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E')
                {
                    pos += 1;
                }
                spans.push(Span::styled(
                    line[start..pos].to_string(),
                    Style::default().fg(Color::Yellow),
                ));
            }
            b't' | b'f' | b'n' => {
                let rest = &line[pos..];
                let (word, color) = if rest.starts_with("true") {
                    (4, Color::Cyan)
                } else if rest.starts_with("false") {
                    (5, Color::Cyan)
                } else if rest.starts_with("null") {
                    (4, Color::Gray)
                } else {
                    (1, Color::White)
                };
                spans.push(Span::styled(
                    line[pos..pos + word].to_string(),
                    Style::default().fg(color),
                ));
                pos += word;
            }
            b':' => {
                spans.push(Span::styled(
                    line[pos..pos + 1].to_string(),
                    Style::default().fg(Color::Magenta),
                ));
                pos += 1;
            }
            _ => {
                let ch_len = line[pos..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(1);
                spans.push(Span::raw(line[pos..pos + ch_len].to_string()));
                pos += ch_len;
            }
        }
    }

    Line::from(spans)
}

fn render_ui(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| {
        let size = frame.area();

        // Split into main area and status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);

        // Tree pane on the left, live preview on the right
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[0]);

        let tree_block = Block::default().borders(Borders::ALL).title(" tree ");
        let tree_area = tree_block.inner(panes[0]);
        frame.render_widget(tree_block, panes[0]);
        app.viewport.height = tree_area.height as usize;

        match app.editor.state() {
            DocState::InvalidRoot => {
                // Persistent inline error, not a transient message
                let error = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        " root must be an object or array",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(" import a document (:e <file>) or reset it (:clear)"),
                ]);
                frame.render_widget(error, tree_area);
            }
            DocState::Empty => {
                let hint = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(" empty document"),
                    Line::from(""),
                    Line::from(Span::styled(
                        "   o  create object",
                        Style::default().fg(Color::Cyan),
                    )),
                    Line::from(Span::styled(
                        "   a  create array",
                        Style::default().fg(Color::Cyan),
                    )),
                ]);
                frame.render_widget(hint, tree_area);
            }
            DocState::Tree => {
                let rows = flatten(app.editor.value(), app.editor.collapse());
                if app.cursor >= rows.len() {
                    app.cursor = rows.len().saturating_sub(1);
                }
                app.viewport.clamp(rows.len());
                app.viewport.follow(app.cursor);
                let lines: Vec<Line> = rows
                    .iter()
                    .enumerate()
                    .skip(app.viewport.start_line)
                    .take(app.viewport.height)
                    .map(|(i, row)| tree_line(row, i == app.cursor))
                    .collect();
                frame.render_widget(Paragraph::new(lines), tree_area);
            }
        }

        // Preview pane re-serializes on every draw, so it is always in
        // sync with the latest mutation
        let preview_block = Block::default().borders(Borders::ALL).title(" preview ");
        let preview_area = preview_block.inner(panes[1]);
        frame.render_widget(preview_block, panes[1]);
        let pretty = app.editor.document().to_pretty();
        let preview_lines: Vec<Line> = pretty
            .lines()
            .take(preview_area.height as usize)
            .map(colorize_json_line)
            .collect();
        frame.render_widget(Paragraph::new(preview_lines), preview_area);

        // Status bar
        let stats = app.editor.stats();
        let file_name = app
            .editor
            .document()
            .path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("[no file]")
            .to_string();
        let modified = if app.editor.document().is_modified() {
            " [+]"
        } else {
            ""
        };
        let read_only = if app.editor.is_read_only() { " [RO]" } else { "" };
        let mut input = match app.mode {
            Mode::Command => format!(" :{}", app.command.command_line),
            Mode::Edit => format!(" {} value: {}", app.mode.display(), app.edit.buffer),
            Mode::Rename => format!(" {} key: {}", app.mode.display(), app.rename.buffer),
            Mode::Normal => String::new(),
        };
        if let Some(msg) = &app.message {
            input.push_str(&format!(" [{}]", msg));
        }
        let status_text = format!(
            " {}{}{} | {} nodes, {} obj, {} arr, {} chars |{}",
            file_name, modified, read_only, stats.nodes, stats.objects, stats.arrays, stats.chars, input
        );
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(status, chunks[1]);
    })?;

    Ok(())
}

fn run(mut app: App, mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    loop {
        render_ui(&mut terminal, &mut app)?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            app.handle_event(event)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Set up panic hook to restore terminal
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        default_panic(info);
    }));

    let mut app = App::new();

    let mut read_only = false;
    let mut file: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--readonly" | "-R" => read_only = true,
            other => file = Some(other.to_string()),
        }
    }
    if let Some(path) = &file {
        app.load_file(path)?;
    }
    app.editor.set_read_only(read_only);

    let terminal = setup_terminal()?;
    let result = run(app, terminal);

    // Restore terminal
    let terminal = setup_terminal()?;
    restore_terminal(terminal)?;

    result
}
