use super::{events::AppEvent, grid::GridCursor, launcher, EventHandler, TerminalManager};
use crate::api::MediaClient;
use crate::catalog::{MediaDescriptor, MediaRef};
use crate::config::Config;
use crate::diagnostics::BadVideosBrowser;
use crate::engine::{CatalogEngine, EngineSettings};
use crate::feed::{ExtensionOutcome, FeedEntry, Recommendation};
use crate::random::RandomSource;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const CARD_HEIGHT: u16 = 6;
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Player pane state; rebuilt from scratch on every playback change
struct NowPlaying {
    media: MediaRef,
    title: String,
    url: String,
    launched: bool,
    recommendations: Vec<Recommendation>,
    list_state: ListState,
}

enum Overlay {
    None,
    BadVideos(BadVideosBrowser),
    Help,
}

pub struct App {
    config: Config,
    client: MediaClient,
    engine: CatalogEngine,
    terminal: TerminalManager,
    event_handler: EventHandler,

    // Grid state
    cursor: GridCursor,
    visible_rows: usize,

    // Player + overlays
    now_playing: Option<NowPlaying>,
    overlay: Overlay,

    status_message: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, client: MediaClient, descriptors: Vec<MediaDescriptor>) -> Result<Self> {
        let mut engine = CatalogEngine::new(EngineSettings::from(&config));
        engine.load(descriptors);

        let terminal = TerminalManager::new()?;
        let cursor = GridCursor::new(config.ui.card_columns);

        Ok(Self {
            config,
            client,
            engine,
            terminal,
            event_handler: EventHandler::new(),
            cursor,
            visible_rows: 1,
            now_playing: None,
            overlay: Overlay::None,
            status_message: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let reader = self.event_handler.start();

        // Main event loop
        while !self.should_quit {
            self.render()?;

            match self.event_handler.next_event().await {
                Some(event) => self.handle_event(event).await?,
                None => break,
            }
        }

        reader.abort();
        info!("UI loop finished");
        Ok(())
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    async fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Quit => self.should_quit = true,
            AppEvent::Tick => {
                if let Some((_, since)) = &self.status_message {
                    if since.elapsed() > STATUS_TTL {
                        self.status_message = None;
                    }
                }
            }
            AppEvent::Render => {}
            AppEvent::ToggleHelp => {
                self.overlay = match self.overlay {
                    Overlay::Help => Overlay::None,
                    _ => Overlay::Help,
                };
            }
            AppEvent::ToggleBadVideos => match self.overlay {
                Overlay::BadVideos(_) => self.overlay = Overlay::None,
                _ => self.open_bad_videos(),
            },
            AppEvent::Back => {
                if !matches!(self.overlay, Overlay::None) {
                    self.overlay = Overlay::None;
                } else if self.now_playing.take().is_some() {
                    debug!("Closed player pane");
                }
            }
            AppEvent::Refresh => self.refresh().await?,
            other => match self.overlay {
                Overlay::BadVideos(_) => self.handle_bad_videos_event(other),
                Overlay::Help => {}
                Overlay::None if self.now_playing.is_some() => self.handle_player_event(other),
                Overlay::None => self.handle_grid_event(other),
            },
        }
        Ok(())
    }

    fn open_bad_videos(&mut self) {
        let browser = self.engine.bad_videos();
        if browser.is_empty() {
            self.set_status("No videos without thumbnails found!");
            return;
        }
        self.overlay = Overlay::BadVideos(browser);
    }

    fn handle_bad_videos_event(&mut self, event: AppEvent) {
        let Overlay::BadVideos(browser) = &mut self.overlay else {
            return;
        };

        match event {
            AppEvent::Up => browser.move_up(),
            AppEvent::Down => browser.move_down(),
            AppEvent::Right | AppEvent::NextCategory => browser.cycle_folder(1),
            AppEvent::Left | AppEvent::PreviousCategory => browser.cycle_folder(-1),
            AppEvent::Home => browser.show_all(),
            AppEvent::Play => {
                let Some(item) = browser.selected_item() else {
                    return;
                };
                let (media, title) = (MediaRef::clone(&item.media), item.title.clone());
                self.overlay = Overlay::None;
                self.play(media, title);
            }
            _ => {}
        }
    }

    fn handle_grid_event(&mut self, event: AppEvent) {
        let len = self.engine.feed().len();
        let page = self.visible_rows.max(1);

        if apply_grid_motion(&mut self.cursor, &event, len, page) {
            self.extend_if_near_bottom();
            return;
        }

        match event {
            AppEvent::Home => self.cursor.reset(),
            AppEvent::NextCategory => self.cycle_category(1),
            AppEvent::PreviousCategory => self.cycle_category(-1),
            AppEvent::Play => self.play_selected(),
            _ => {}
        }
    }

    fn extend_if_near_bottom(&mut self) {
        let boundary_rows = self.config.feed.boundary_rows;
        match extend_at_boundary(&mut self.engine, &self.cursor, boundary_rows, Instant::now()) {
            Some(ExtensionOutcome::Capped) => self.set_status("Feed limit reached"),
            Some(outcome) if outcome.appended() > 0 => {
                debug!("Feed grew by {} cards", outcome.appended());
            }
            _ => {}
        }
    }

    fn cycle_category(&mut self, step: isize) {
        let Some(nav) = self.engine.category_nav() else {
            self.set_status("Only one category available");
            return;
        };

        let current = nav
            .iter()
            .position(|entry| entry.name == self.engine.active_category())
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(nav.len() as isize) as usize;
        let label = nav[next].label();

        self.engine.select(&nav[next].name);
        self.cursor.reset();
        self.set_status(format!("Showing {}", label));
    }

    fn play_selected(&mut self) {
        let Some(entry) = self.engine.feed().get(self.cursor.selected()) else {
            return;
        };
        let (media, title) = (MediaRef::clone(&entry.media), entry.title.clone());
        self.play(media, title);
    }

    fn handle_player_event(&mut self, event: AppEvent) {
        let Some(playing) = self.now_playing.as_mut() else {
            return;
        };
        let count = playing.recommendations.len();
        if count == 0 {
            return;
        }
        let selected = playing.list_state.selected().unwrap_or(0);

        match event {
            AppEvent::Up => playing.list_state.select(Some(selected.saturating_sub(1))),
            AppEvent::Down => playing.list_state.select(Some((selected + 1).min(count - 1))),
            AppEvent::Home => playing.list_state.select(Some(0)),
            AppEvent::Play => {
                let pick = &playing.recommendations[selected.min(count - 1)];
                let (media, title) = (MediaRef::clone(&pick.media), pick.title.clone());
                self.play(media, title);
            }
            _ => {}
        }
    }

    /// Start playback: external player plus a fresh recommendation sample.
    /// A launch failure closes the player pane instead.
    fn play(&mut self, media: MediaRef, title: String) {
        let url = self.client.asset_url(&media.video_path);
        info!("Play '{}' ({})", title, media.video_path);

        let outcome = launcher::try_launch(&self.config.player, &url);
        if !outcome.opens_player() {
            self.now_playing = None;
            self.set_status(format!("Error loading video: {}", title));
            return;
        }
        let launched = matches!(outcome, launcher::LaunchOutcome::Started);

        let recommendations = self.engine.recommendations(&media.video_path);
        let mut list_state = ListState::default();
        if !recommendations.is_empty() {
            list_state.select(Some(0));
        }

        self.now_playing = Some(NowPlaying {
            media,
            title,
            url,
            launched,
            recommendations,
            list_state,
        });
    }

    async fn refresh(&mut self) -> Result<()> {
        self.set_status("Refreshing catalog…");
        self.render()?;

        let descriptors = self.client.fetch_or_empty().await;
        self.engine.load(descriptors);
        self.cursor.reset();

        let headline = self.engine.summary().headline();
        self.set_status(headline);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let Self {
            terminal,
            engine,
            config,
            cursor,
            visible_rows,
            now_playing,
            overlay,
            status_message,
            ..
        } = self;

        let mut screen = Screen {
            engine,
            config,
            cursor,
            visible_rows,
            now_playing: now_playing.as_mut(),
            overlay,
            status: status_message.as_ref().map(|(message, _)| message.as_str()),
        };

        terminal.draw(|f| screen.draw(f))
    }
}

/// Borrowed view of everything one frame needs
struct Screen<'a> {
    engine: &'a CatalogEngine,
    config: &'a Config,
    cursor: &'a mut GridCursor,
    visible_rows: &'a mut usize,
    now_playing: Option<&'a mut NowPlaying>,
    overlay: &'a Overlay,
    status: Option<&'a str>,
}

impl Screen<'_> {
    fn draw(&mut self, f: &mut Frame) {
        let nav_height = if self.now_playing.is_none() && self.engine.category_nav().is_some() {
            3
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(nav_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        if nav_height > 0 {
            self.draw_categories(f, chunks[1]);
        }
        if self.now_playing.is_some() {
            self.draw_player(f, chunks[2]);
        } else {
            self.draw_grid(f, chunks[2]);
        }
        self.draw_footer(f, chunks[3]);

        match self.overlay {
            Overlay::BadVideos(browser) => draw_bad_videos(f, browser),
            Overlay::Help => draw_help(f),
            Overlay::None => {}
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let summary = self.engine.summary();
        let mut spans = vec![
            Span::styled("📺 LocalTube", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("  │  "),
            Span::raw(summary.headline()),
        ];
        if let Some(badge) = summary.bad_videos_badge() {
            spans.push(Span::raw("  │  "));
            spans.push(Span::styled(format!("🚫 {}", badge), Style::default().fg(Color::Red)));
        }
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("{} · {} cards", summary.active_category, summary.feed_len),
            Style::default().fg(Color::DarkGray),
        ));

        let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn draw_categories(&self, f: &mut Frame, area: Rect) {
        let Some(nav) = self.engine.category_nav() else {
            return;
        };
        let active = nav
            .iter()
            .position(|entry| entry.name == self.engine.active_category())
            .unwrap_or(0);
        let labels: Vec<String> = nav.iter().map(|entry| entry.label()).collect();

        let tabs = Tabs::new(labels)
            .select(active)
            .block(Block::default().borders(Borders::ALL).title(" Categories "))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD))
            .divider(" ");
        f.render_widget(tabs, area);
    }

    fn draw_grid(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Feed ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let feed = self.engine.feed();
        if feed.is_empty() {
            let message = if self.engine.catalog().is_empty() {
                "No videos found"
            } else {
                "Nothing to show in this category"
            };
            let empty = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(empty, inner);
            return;
        }

        let columns = self.cursor.columns();
        let visible = usize::from((inner.height / CARD_HEIGHT).max(1));
        *self.visible_rows = visible;
        self.cursor.follow(visible);

        let card_width = inner.width / u16::try_from(columns).unwrap_or(u16::MAX);
        if card_width == 0 {
            return;
        }

        let first_row = self.cursor.scroll_row();
        for row in first_row..first_row + visible {
            for col in 0..columns {
                let index = row * columns + col;
                let Some(entry) = feed.get(index) else {
                    return;
                };
                let y = inner.y + (row - first_row) as u16 * CARD_HEIGHT;
                let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
                if height == 0 {
                    return;
                }
                let card_area = Rect::new(inner.x + col as u16 * card_width, y, card_width, height);
                self.draw_card(f, card_area, entry, index == self.cursor.selected());
            }
        }
    }

    fn draw_card(&self, f: &mut Frame, area: Rect, entry: &FeedEntry, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = vec![
            Line::from(Span::styled(entry.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                entry.media.category().to_string(),
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("⏱ {}", self.config.ui.placeholder_duration),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", entry.display_index)),
        );
        f.render_widget(card, area);
    }

    fn draw_player(&mut self, f: &mut Frame, area: Rect) {
        let Some(playing) = self.now_playing.as_deref_mut() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let player_note = match (playing.launched, self.config.player.command()) {
            (true, Some(command)) => format!("Opened in {}", command),
            (false, Some(_)) => "Player did not start, open the URL yourself".to_string(),
            (_, None) => "No player configured, open the URL yourself".to_string(),
        };

        let lines = vec![
            Line::from(Span::styled("▶ Now playing", Style::default().fg(Color::Cyan))),
            Line::from(Span::styled(playing.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("Category: {}", playing.media.category())),
            Line::from(format!("File:     {}", playing.media.file_name())),
            Line::from(format!("URL:      {}", playing.url)),
            Line::from(""),
            Line::from(Span::styled(player_note, Style::default().fg(Color::DarkGray))),
        ];
        let details = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Player "));
        f.render_widget(details, chunks[0]);

        let items: Vec<ListItem> = playing
            .recommendations
            .iter()
            .map(|rec| {
                ListItem::new(vec![
                    Line::from(rec.title.clone()),
                    Line::from(Span::styled(
                        format!("  {}", rec.media.category()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Up next ({}) ", playing.recommendations.len())),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, chunks[1], &mut playing.list_state);
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let text = match self.status {
            Some(message) => Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Yellow))),
            None if self.now_playing.is_some() => {
                Line::from("↑↓ pick  Enter play next  Esc back  q quit")
            }
            None => Line::from("←↑↓→ move  Tab category  Enter play  b bad videos  r refresh  ? help  q quit"),
        };
        f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::DarkGray)), area);
    }
}

/// Folder tabs over a selectable list; Enter plays the highlighted item
fn draw_bad_videos(f: &mut Frame, browser: &BadVideosBrowser) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" 🚫 Videos without thumbnails ({}) ", browser.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let tabs = Tabs::new(browser.tabs())
        .select(browser.active_tab())
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD))
        .divider(" ");
    f.render_widget(tabs, chunks[0]);

    let items: Vec<ListItem> = browser
        .visible()
        .into_iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(item.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  [{}]", item.folder), Style::default().fg(Color::Blue)),
                ]),
                Line::from(Span::styled(
                    format!("   {}", item.media.file_name()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("🎬 ");
    let mut state = ListState::default().with_selected(Some(browser.selected()));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let hint = Paragraph::new("←→ folder  ↑↓ pick  Enter play  Esc close")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[2]);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(50, 60, f.area());
    let rows = [
        ("←↑↓→ / hjkl", "move through the grid"),
        ("PgUp / PgDn", "page through the grid"),
        ("g / Home", "back to the top"),
        ("Tab / ]", "next category"),
        ("Shift-Tab / [", "previous category"),
        ("Enter", "play selected video"),
        ("Esc", "close player or popup"),
        ("b", "videos without thumbnails"),
        ("  ←→ / Tab", "switch folder inside that list"),
        ("r / F5", "refetch the catalog"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", keys), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Keys "));
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

/// Rect of `percent_x` × `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Move the cursor for a grid event. Only these moves count as scrolling,
/// so only they may grow the feed.
fn apply_grid_motion(cursor: &mut GridCursor, event: &AppEvent, len: usize, page: usize) -> bool {
    match event {
        AppEvent::Up => cursor.move_up(1),
        AppEvent::Down => cursor.move_down(1, len),
        AppEvent::Left => cursor.move_left(),
        AppEvent::Right => cursor.move_right(len),
        AppEvent::PageUp => cursor.move_up(page),
        AppEvent::PageDown => cursor.move_down(page, len),
        _ => return false,
    }
    true
}

/// Boundary proximity is the scroll signal; the engine drops repeats itself
fn extend_at_boundary<R: RandomSource>(
    engine: &mut CatalogEngine<R>,
    cursor: &GridCursor,
    boundary_rows: usize,
    now: Instant,
) -> Option<ExtensionOutcome> {
    if !cursor.near_bottom(engine.feed().len(), boundary_rows) {
        return None;
    }
    Some(engine.on_boundary_reached(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn thumbed(path: &str) -> MediaDescriptor {
        MediaDescriptor::new(path, Some("thumb.webp"))
    }

    fn engine(paths: &[&str]) -> CatalogEngine<StdRng> {
        let mut engine = CatalogEngine::with_random(EngineSettings::default(), StdRng::seed_from_u64(7));
        engine.load(paths.iter().map(|p| thumbed(p)).collect());
        engine
    }

    #[test]
    fn test_category_switch_shows_initial_render_only() {
        let mut engine = engine(&["A/1.mp4", "A/2.mp4", "B/3.mp4"]);
        let mut cursor = GridCursor::new(4);

        // Same steps as cycling categories in the grid
        engine.select("A");
        cursor.reset();
        for event in [AppEvent::NextCategory, AppEvent::PreviousCategory, AppEvent::Home, AppEvent::Play] {
            assert!(!apply_grid_motion(&mut cursor, &event, engine.feed().len(), 1));
        }
        assert_eq!(engine.feed().len(), 2);

        // First real move near the bottom is the scroll signal
        assert!(apply_grid_motion(&mut cursor, &AppEvent::Right, engine.feed().len(), 1));
        let outcome = extend_at_boundary(&mut engine, &cursor, 2, Instant::now());
        assert_eq!(outcome, Some(ExtensionOutcome::Appended(2)));
        assert_eq!(engine.feed().len(), 4);
    }

    #[test]
    fn test_no_extension_far_from_bottom() {
        let paths: Vec<String> = (0..40).map(|i| format!("F/{}.mp4", i)).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let mut engine = engine(&refs);
        let mut cursor = GridCursor::new(4);

        assert!(apply_grid_motion(&mut cursor, &AppEvent::Down, engine.feed().len(), 1));
        assert_eq!(cursor.selected(), 4);
        assert_eq!(extend_at_boundary(&mut engine, &cursor, 2, Instant::now()), None);

        assert!(apply_grid_motion(&mut cursor, &AppEvent::PageDown, engine.feed().len(), 10));
        assert_eq!(cursor.selected(), 39);
        let outcome = extend_at_boundary(&mut engine, &cursor, 2, Instant::now());
        assert_eq!(outcome, Some(ExtensionOutcome::Appended(40)));
    }
}
