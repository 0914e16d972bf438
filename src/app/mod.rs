//! Session Controller (TUI)
//!
//! Owns the one workflow instance per session and runs the tick-based
//! terminal loop. User keys and service completions are processed one at
//! a time on this loop; the only background work is the spawned service
//! call, whose outcome comes back over a channel tagged with its request
//! token so a superseded completion can be dropped.

use anyhow::Result;
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::form::{BirthForm, FormField, ValidationError};
use crate::models::{AnalysisResult, PlaceSearch};
use crate::present::{self, ViewId};
use crate::services::{AnalysisService, PlaceResolver};
use crate::workflow::{AnalysisWorkflow, RequestToken};

/// Completions delivered from spawned service calls to the UI loop.
enum AppEvent {
    AnalysisReady(RequestToken, Box<AnalysisResult>),
    AnalysisFailed(RequestToken, String),
    PlaceResolved(PlaceSearch),
}

/// Top-level application state. Everything lives for one session and
/// resets on restart; nothing is persisted.
struct App {
    form: BirthForm,
    workflow: AnalysisWorkflow,
    selected_view: ViewId,
    validation_error: Option<ValidationError>,
    place_link: Option<PlaceSearch>,
    analysis: Arc<dyn AnalysisService>,
    resolver: Arc<dyn PlaceResolver>,
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
    should_quit: bool,
}

impl App {
    fn new(analysis: Arc<dyn AnalysisService>, resolver: Arc<dyn PlaceResolver>) -> Self {
        let (tx, rx) = mpsc::channel(32);
        Self {
            form: BirthForm::new(),
            workflow: AnalysisWorkflow::new(),
            selected_view: ViewId::Chart,
            validation_error: None,
            place_link: None,
            analysis,
            resolver,
            event_rx: rx,
            event_tx: tx,
            should_quit: false,
        }
    }

    /// Validate the form and, if it passes, launch the analysis request.
    /// A submission while one is already in flight is a no-op.
    fn submit(&mut self) {
        let details = match self.form.validate() {
            Ok(details) => details,
            Err(e) => {
                self.validation_error = Some(e);
                return;
            }
        };
        self.validation_error = None;

        let Some(token) = self.workflow.submit() else {
            return;
        };

        let analysis = self.analysis.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match analysis.analyze(&details).await {
                Ok(result) => {
                    let _ = tx.send(AppEvent::AnalysisReady(token, Box::new(result))).await;
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::AnalysisFailed(token, e.to_string())).await;
                }
            }
        });
    }

    /// Kick off a place search for the current place field. Resolver
    /// failures are logged and otherwise ignored.
    fn search_place(&mut self) {
        let query = self.form.input.place.trim().to_string();
        if query.is_empty() {
            return;
        }
        let resolver = self.resolver.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match resolver.resolve(&query).await {
                Ok(search) => {
                    let _ = tx.send(AppEvent::PlaceResolved(search)).await;
                }
                Err(e) => warn!("place search failed: {e}"),
            }
        });
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AnalysisReady(token, result) => {
                if self.workflow.complete(token, *result) {
                    self.selected_view = ViewId::Chart;
                    info!("analysis ready");
                }
            }
            AppEvent::AnalysisFailed(token, message) => {
                self.workflow.fail(token, message);
            }
            AppEvent::PlaceResolved(search) => {
                self.place_link = Some(search);
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.workflow.result().is_some() {
            self.handle_results_key(code);
        } else {
            self.handle_form_key(code, modifiers);
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Delete => self.dismiss_error(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char('p') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.apply_next_preset();
            }
            KeyCode::Char('f') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_place();
            }
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }
    }

    /// Dismiss the error banner without resubmitting: clears a validation
    /// error and, if the last request failed, returns the workflow to
    /// `Idle`.
    fn dismiss_error(&mut self) {
        self.validation_error = None;
        if self.workflow.error().is_some() {
            self.workflow.reset();
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('n') => {
                self.workflow.reset();
                self.selected_view = ViewId::Chart;
            }
            KeyCode::Right | KeyCode::Tab => self.selected_view = self.selected_view.next(),
            KeyCode::Left | KeyCode::BackTab => self.selected_view = self.selected_view.prev(),
            KeyCode::Char('1') => self.selected_view = ViewId::Chart,
            KeyCode::Char('2') => self.selected_view = ViewId::Doshas,
            KeyCode::Char('3') => self.selected_view = ViewId::Dasha,
            KeyCode::Char('4') => self.selected_view = ViewId::Panchang,
            _ => {}
        }
    }
}

/// Run the terminal client until the user quits.
pub async fn run(analysis: Arc<dyn AnalysisService>, resolver: Arc<dyn PlaceResolver>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(analysis, resolver);
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        // Deliver completed service calls, one event at a time.
        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_event(event);
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    if let Some(result) = app.workflow.result() {
        results_screen(f, app, result);
    } else {
        form_screen(f, app);
    }
}

fn form_screen(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new("🔮 VedicAI | Birth Details")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Transient error banner: a validation error or the last service
    // failure, whichever applies.
    let banner = if let Some(e) = &app.validation_error {
        Line::from(Span::styled(
            format!("⚠️  {e}"),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(message) = app.workflow.error() {
        Line::from(Span::styled(
            format!("❌ {message}"),
            Style::default().fg(Color::Red),
        ))
    } else if app.workflow.is_submitting() {
        Line::from(Span::styled(
            "⏳ Analyzing...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(banner), chunks[1]);

    let mut field_lines: Vec<Line> = Vec::new();
    for field in FormField::ALL {
        let focused = app.form.focus == field;
        let marker = if focused { "▸ " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        field_lines.push(Line::from(Span::styled(
            format!("{marker}{:<26} {}", field.label(), app.form.field(field)),
            style,
        )));
    }
    let fields = Paragraph::new(field_lines)
        .block(Block::default().borders(Borders::ALL).title(" Form "));
    f.render_widget(fields, chunks[2]);

    let link = match &app.place_link {
        Some(search) => format!("👉 Confirm coordinates: {}", search.search_url),
        None => String::new(),
    };
    f.render_widget(Paragraph::new(link).style(Style::default().fg(Color::Blue)), chunks[3]);

    let footer = Paragraph::new(
        " ENTER: Submit | TAB: Next field | Ctrl+P: City preset | Ctrl+F: Place search | DEL: Dismiss error | ESC: Quit ",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[4]);
}

fn results_screen(f: &mut Frame, app: &App, result: &AnalysisResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    let who = result
        .birth_details
        .as_ref()
        .map(|d| format!("{} ({} {}, {})", d.name, d.date, d.time, d.place))
        .unwrap_or_else(|| present::NA.to_string());
    let header = Paragraph::new(format!("✅ Analysis Complete: {who}"))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let selected = ViewId::ALL
        .iter()
        .position(|v| *v == app.selected_view)
        .unwrap_or(0);
    let tabs = Tabs::new(ViewId::ALL.iter().map(|v| v.title()).collect::<Vec<_>>())
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, chunks[1]);

    let view = present::present(result, app.selected_view);
    let body_lines: Vec<Line> = view.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let body = Paragraph::new(body_lines)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", view.title)));
    f.render_widget(body, chunks[2]);

    let footer = Paragraph::new(" 1-4/TAB: Switch view | n: New analysis | q: Quit ")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[3]);
}
