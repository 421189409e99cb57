use crate::calc::grid::generate_year_grid;
use crate::calc::{DayCell, weeks};
use crate::data::date_key;
use crate::net::{Background, BackgroundSource, HolidaySource, load_background, refresh_holidays};
use crate::state::{Action, AppState, Effect, Modal, Phase, reduce};
use crate::ui::Tui;
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::mpsc::{self, UnboundedSender};

// Cell shading, from empty to busiest
const TIER_COLORS: [Color; 5] = [
    Color::DarkGray,
    Color::Rgb(14, 68, 41),
    Color::Rgb(0, 109, 50),
    Color::Rgb(38, 166, 65),
    Color::Rgb(57, 211, 83),
];
const REST_COLOR: Color = Color::Rgb(229, 83, 75);
const CELL_GLYPH: &str = "■";
const CELL_WIDTH: u16 = 2;
const GUTTER_WIDTH: u16 = 2;
const WEEKDAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub struct App {
    pub state: AppState,
    /// Row highlighted in the selected day's schedule list.
    list_cursor: usize,
    effects: Vec<Effect>,
    /// Screen position of the Sunday cell of the first week, set on render.
    grid_origin: Option<(u16, u16)>,
    /// Weeks scrolled off the left edge, and how many fit, when the grid is wider than the screen.
    week_offset: usize,
    visible_weeks: usize,
    /// Year the scroll position belongs to.
    scrolled_year: i32,
    last_selected: Option<NaiveDate>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let last_selected = state.selected;
        let scrolled_year = state.year;
        App {
            state,
            list_cursor: 0,
            effects: Vec::new(),
            grid_origin: None,
            week_offset: 0,
            visible_weeks: 0,
            scrolled_year,
            last_selected,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let effects = reduce(&mut self.state, action);
        self.effects.extend(effects);
        self.sync_cursor();
    }

    /// Effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn grid_origin(&self) -> Option<(u16, u16)> {
        self.grid_origin
    }

    pub fn week_offset(&self) -> usize {
        self.week_offset
    }

    fn sync_cursor(&mut self) {
        if self.state.selected != self.last_selected {
            self.last_selected = self.state.selected;
            self.list_cursor = 0;
        }
        let len = self.state.selected_entries().len();
        self.list_cursor = if len == 0 {
            0
        } else {
            self.list_cursor.min(len - 1)
        };
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // The delete confirmation gate takes priority over everything else
        if self.state.pending_delete.is_some() {
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.dispatch(Action::ConfirmDelete)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.dispatch(Action::CancelDelete)
                }
                _ => {}
            }
            return false;
        }

        if matches!(
            self.state.phase(),
            Phase::AddModalOpen | Phase::EditModalOpen
        ) {
            match code {
                KeyCode::Enter => self.dispatch(Action::SubmitModal),
                KeyCode::Esc => self.dispatch(Action::CancelModal),
                KeyCode::Backspace => self.dispatch(Action::Backspace),
                KeyCode::Char(c) => self.dispatch(Action::InputChar(c)),
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Left => self.dispatch(Action::MoveSelection(-1)),
            KeyCode::Right => self.dispatch(Action::MoveSelection(1)),
            KeyCode::Up => self.dispatch(Action::MoveSelection(-7)),
            KeyCode::Down => self.dispatch(Action::MoveSelection(7)),
            KeyCode::Char('[') => self.dispatch(Action::PrevYear),
            KeyCode::Char(']') => self.dispatch(Action::NextYear),
            KeyCode::Char('t') => self.dispatch(Action::GoToCurrentYear),
            KeyCode::Char('a') => self.dispatch(Action::OpenAddModal),
            KeyCode::Char('e') => self.dispatch(Action::OpenEditModal {
                index: self.list_cursor,
            }),
            KeyCode::Char('d') => self.dispatch(Action::RequestDelete {
                index: self.list_cursor,
            }),
            KeyCode::Char('j') => {
                let len = self.state.selected_entries().len();
                if len > 0 && self.list_cursor < len - 1 {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Char('k') => {
                self.list_cursor = self.list_cursor.saturating_sub(1);
            }
            KeyCode::Esc => self.dispatch(Action::HoverOut),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, ev: MouseEvent) {
        let hit = self.date_at(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Moved => match hit {
                Some(date) => self.dispatch(Action::Hover {
                    date,
                    x: ev.column,
                    y: ev.row,
                }),
                None if self.state.tooltip.is_some() => self.dispatch(Action::HoverOut),
                None => {}
            },
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(date) = hit {
                    self.dispatch(Action::SelectDay(date));
                }
            }
            _ => {}
        }
    }

    /// The in-year date drawn at screen position (x, y), if any.
    fn date_at(&self, x: u16, y: u16) -> Option<NaiveDate> {
        let origin = self.grid_origin?;
        let grid = generate_year_grid(self.state.year);
        let shown = (grid.len() / 7)
            .saturating_sub(self.week_offset)
            .min(self.visible_weeks);
        let index = grid_hit(origin, shown, x, y)? + self.week_offset * 7;
        grid.get(index)
            .copied()
            .filter(|d| d.year() == self.state.year)
    }

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // year header + status lines
                Constraint::Length(9), // month labels + 7 weekday rows + padding
                Constraint::Min(8),    // detail panel + help
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        self.render_grid(f, chunks[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        self.render_detail(f, bottom[0]);
        render_help(f, bottom[1]);

        if let Some(modal) = &self.state.modal {
            self.render_modal(f, size, modal);
        }
        if self.state.pending_delete.is_some() {
            self.render_delete_confirm(f, size);
        }
        if let Some(tip) = &self.state.tooltip {
            render_tooltip(f, size, &tip.content, tip.x, tip.y);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled("◀ [ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", self.state.year),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            Span::styled(" ] ▶", Style::default().fg(Color::DarkGray)),
        ]);

        let holidays = if self.state.holidays_loading() {
            "Holidays: loading…".to_string()
        } else {
            format!("Holidays: {}", self.state.holidays.len())
        };

        let lines = vec![
            title,
            Line::from(Span::styled(holidays, Style::default().add_modifier(Modifier::DIM))),
            Line::from(Span::styled(
                background_label(&self.state.background),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_grid(&mut self, f: &mut Frame, area: Rect) {
        let cells = self.state.day_cells();
        let all_rows = weeks(&cells);

        if self.scrolled_year != self.state.year {
            self.scrolled_year = self.state.year;
            self.week_offset = 0;
        }
        let visible = (area.width.saturating_sub(GUTTER_WIDTH) / CELL_WIDTH).max(1) as usize;
        let focus = all_rows
            .iter()
            .position(|week| week.iter().any(|c| c.is_selected));
        self.week_offset = scroll_offset(self.week_offset, visible, all_rows.len(), focus);
        self.visible_weeks = visible;
        let end = (self.week_offset + visible).min(all_rows.len());
        let rows = &all_rows[self.week_offset..end];

        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            month_label_row(rows),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
            let mut spans = vec![Span::styled(
                format!("{:<width$}", label, width = GUTTER_WIDTH as usize),
                Style::default().add_modifier(Modifier::DIM),
            )];
            for week in rows {
                let cell = &week[weekday];
                if cell.is_interactive() {
                    spans.push(Span::styled(CELL_GLYPH, day_cell_style(cell)));
                    spans.push(Span::raw(" "));
                } else {
                    spans.push(Span::raw("  "));
                }
            }
            lines.push(Line::from(spans));
        }

        self.grid_origin = Some((area.x + GUTTER_WIDTH, area.y + 1));
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        match self.state.selected {
            None => {
                lines.push(Line::from(Span::styled(
                    "Select a day with the arrow keys or a click.",
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
            Some(date) => {
                lines.push(Line::from(Span::styled(
                    format!("{} ({})", date_key(date), weekday_name(date.weekday())),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                if let Some(h) = self.state.selected_holiday() {
                    lines.push(Line::from(Span::styled(
                        format!("Holiday: {} ({})", h.local_name, h.name),
                        Style::default().fg(REST_COLOR).add_modifier(Modifier::BOLD),
                    )));
                } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                    lines.push(Line::from(Span::styled(
                        "Weekend",
                        Style::default().fg(REST_COLOR),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from("Schedules:"));

                let entries = self.state.selected_entries();
                if entries.is_empty() {
                    lines.push(Line::from("  No schedules."));
                } else {
                    for (i, e) in entries.iter().enumerate() {
                        let prefix = if i == self.list_cursor { "  > " } else { "    " };
                        lines.push(Line::from(format!("{}{}", prefix, e.text)));
                    }
                }
            }
        }

        let p = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title(" Day "));
        f.render_widget(p, area);
    }

    fn render_modal(&self, f: &mut Frame, area: Rect, modal: &Modal) {
        let title = match modal {
            Modal::Add { .. } => match self.state.selected {
                Some(d) => format!(" New schedule · {} ", date_key(d)),
                None => " New schedule ".to_string(),
            },
            Modal::Edit { target, .. } => format!(" Edit schedule · {} ", date_key(target.date)),
        };
        let submit_style = if modal.can_submit() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let popup = centered_rect(area, 52, 5);
        f.render_widget(Clear, popup);
        let previous = match modal {
            Modal::Edit { target, .. } => Line::from(Span::styled(
                format!("was: {}", target.original),
                Style::default().add_modifier(Modifier::DIM),
            )),
            Modal::Add { .. } => Line::from(""),
        };
        let lines = vec![
            Line::from(format!("> {}_", modal.draft())),
            previous,
            Line::from(vec![
                Span::styled("Enter=save", submit_style),
                Span::raw("  Esc=cancel"),
            ]),
        ];
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(p, popup);
    }

    fn render_delete_confirm(&self, f: &mut Frame, area: Rect) {
        let Some(pending) = &self.state.pending_delete else {
            return;
        };
        let popup = centered_rect(area, 52, 5);
        f.render_widget(Clear, popup);
        let lines = vec![
            Line::from(format!("\"{}\"", pending.text)),
            Line::from(""),
            Line::from("y=delete  n=cancel"),
        ];
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete this schedule? ")
                .border_style(Style::default().fg(REST_COLOR)),
        );
        f.render_widget(p, popup);
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key_rows: Vec<Row> = vec![
        Row::new(vec!["← → ↑ ↓", "Move day", "[ / ]", "Prev/next year"]),
        Row::new(vec!["t", "Current year", "Click", "Select day"]),
        Row::new(vec!["a", "Add schedule", "e", "Edit schedule"]),
        Row::new(vec!["d", "Delete schedule", "j / k", "Move in list"]),
        Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
    ];
    let help_table = Table::new(
        key_rows,
        [
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Length(15),
        ],
    )
    .block(Block::default().borders(Borders::TOP).title(" Keys "))
    .column_spacing(1);
    f.render_widget(help_table, area);
}

fn render_tooltip(f: &mut Frame, area: Rect, content: &str, x: u16, y: u16) {
    let lines: Vec<Line> = content.lines().map(|l| Line::from(l.to_string())).collect();
    let inner_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (inner_width + 2).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);

    // Offset from the pointer, flipped back inside the frame near the edges
    let mut left = x.saturating_add(2);
    if left + width > area.x + area.width {
        left = (area.x + area.width).saturating_sub(width);
    }
    let mut top = y.saturating_add(1);
    if top + height > area.y + area.height {
        top = (area.y + area.height).saturating_sub(height);
    }

    let rect = Rect::new(left, top, width, height);
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        rect,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

// ── App event loop ────────────────────────────────────────────────────────────

pub async fn run_app<H, B>(
    terminal: &mut Tui,
    app: &mut App,
    holidays: Arc<H>,
    background: Arc<B>,
) -> Result<()>
where
    H: HolidaySource + Send + Sync + 'static,
    B: BackgroundSource + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    app.dispatch(Action::Mounted);

    loop {
        for effect in app.take_effects() {
            spawn_effect(effect, &holidays, &background, &tx);
        }
        while let Ok(action) = rx.try_recv() {
            app.dispatch(action);
        }

        terminal.draw(|f| app.render(f))?;

        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    info!("leaving calendar view");
    Ok(())
}

/// Runs `effect` on a background task; its outcome comes back on `tx` as an action.
pub fn spawn_effect<H, B>(
    effect: Effect,
    holidays: &Arc<H>,
    background: &Arc<B>,
    tx: &UnboundedSender<Action>,
) where
    H: HolidaySource + Send + Sync + 'static,
    B: BackgroundSource + Send + Sync + 'static,
{
    match effect {
        Effect::FetchHolidays { year, generation } => {
            let source = Arc::clone(holidays);
            let tx = tx.clone();
            tokio::spawn(async move {
                let holidays = refresh_holidays(source.as_ref(), year).await;
                let _ = tx.send(Action::HolidaysLoaded {
                    year,
                    generation,
                    holidays,
                });
            });
        }
        Effect::FetchBackground => {
            let source = Arc::clone(background);
            let tx = tx.clone();
            tokio::spawn(async move {
                let bg = load_background(source.as_ref()).await;
                let _ = tx.send(Action::BackgroundLoaded(bg));
            });
        }
    }
}

// ── Grid helpers ──────────────────────────────────────────────────────────────

/// Maps a screen position to an index into the year grid (column-major weeks).
pub(crate) fn grid_hit(origin: (u16, u16), week_count: usize, x: u16, y: u16) -> Option<usize> {
    let (ox, oy) = origin;
    if x < ox || y < oy {
        return None;
    }
    let col = ((x - ox) / CELL_WIDTH) as usize;
    let row = (y - oy) as usize;
    if row >= 7 || col >= week_count {
        return None;
    }
    Some(col * 7 + row)
}

/// First visible week so that `focus` (a week index) stays on screen.
pub(crate) fn scroll_offset(
    current: usize,
    visible: usize,
    total: usize,
    focus: Option<usize>,
) -> usize {
    if total <= visible {
        return 0;
    }
    let mut offset = current.min(total - visible);
    if let Some(week) = focus {
        if week < offset {
            offset = week;
        } else if week >= offset + visible {
            offset = week + 1 - visible;
        }
    }
    offset
}

/// Month abbreviations placed above the week column holding each month's 1st.
pub(crate) fn month_label_row(rows: &[&[DayCell]]) -> String {
    let width = GUTTER_WIDTH as usize + rows.len() * CELL_WIDTH as usize;
    let mut chars = vec![' '; width];
    for (col, week) in rows.iter().enumerate() {
        let Some(first) = week.iter().find(|c| c.in_year && c.date.day() == 1) else {
            continue;
        };
        let label = &month_name(first.date.month())[..3];
        let start = GUTTER_WIDTH as usize + col * CELL_WIDTH as usize;
        let end = (start + label.len()).min(width);
        if chars[start..end].iter().all(|c| *c == ' ') {
            for (slot, ch) in chars[start..end].iter_mut().zip(label.chars()) {
                *slot = ch;
            }
        }
    }
    chars.into_iter().collect::<String>().trim_end().to_string()
}

pub(crate) fn background_label(bg: &Background) -> String {
    match bg {
        Background::Pending => "Background: loading…".to_string(),
        Background::Photo {
            url,
            author: Some(author),
        } => format!("Background: photo by {} · {}", author, url),
        Background::Photo { url, author: None } => format!("Background: {}", url),
        Background::Fallback => "Background: gradient".to_string(),
    }
}

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Determines the ratatui `Style` for an in-year day cell.
pub(crate) fn day_cell_style(cell: &DayCell) -> Style {
    let fg = if cell.is_rest_day() {
        REST_COLOR
    } else {
        TIER_COLORS[cell.tier().level() as usize]
    };
    let mut s = Style::default().fg(fg);
    if cell.is_selected {
        s = s.bg(Color::White).add_modifier(Modifier::BOLD);
    } else if cell.is_today {
        s = s.add_modifier(Modifier::REVERSED);
    }
    s
}
