use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // UI Events
    Quit,
    Tick,
    Render,

    // Navigation Events
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,

    // Category Events
    NextCategory,
    PreviousCategory,

    // Playback Events
    Play,
    Back,

    // Overlays
    ToggleBadVideos,
    ToggleHelp,

    // Catalog Events
    Refresh,
}

pub struct EventHandler {
    event_sender: mpsc::UnboundedSender<AppEvent>,
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        Self {
            event_sender,
            event_receiver,
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_sender.clone()
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_receiver.recv().await
    }

    /// Spawn the terminal reader; it stops once the receiver is gone
    pub fn start(&self) -> JoinHandle<()> {
        let sender = self.sender();
        tokio::spawn(async move {
            if let Err(e) = read_terminal_events(sender).await {
                warn!("Terminal event reader stopped: {}", e);
            }
        })
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_terminal_events(sender: mpsc::UnboundedSender<AppEvent>) -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            let app_event = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key_to_app_event(key),
                Event::Resize(_, _) => Some(AppEvent::Render),
                _ => None,
            };
            if let Some(app_event) = app_event {
                if sender.send(app_event).is_err() {
                    return Ok(());
                }
            }
        }

        // Periodic tick keeps status messages expiring
        if sender.send(AppEvent::Tick).is_err() {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

pub fn key_to_app_event(key: KeyEvent) -> Option<AppEvent> {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), _) => Some(AppEvent::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppEvent::Quit),

        // Grid navigation (vim keys too)
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Some(AppEvent::Up),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Some(AppEvent::Down),
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => Some(AppEvent::Left),
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => Some(AppEvent::Right),
        (KeyCode::PageUp, _) => Some(AppEvent::PageUp),
        (KeyCode::PageDown, _) => Some(AppEvent::PageDown),
        (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Some(AppEvent::Home),

        // Categories
        (KeyCode::Tab, _) | (KeyCode::Char(']'), _) => Some(AppEvent::NextCategory),
        (KeyCode::BackTab, _) | (KeyCode::Char('['), _) => Some(AppEvent::PreviousCategory),

        // Playback
        (KeyCode::Enter, _) => Some(AppEvent::Play),
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) => Some(AppEvent::Back),

        // Overlays
        (KeyCode::Char('b'), KeyModifiers::NONE) => Some(AppEvent::ToggleBadVideos),
        (KeyCode::Char('?'), _) => Some(AppEvent::ToggleHelp),

        // Catalog
        (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::F(5), _) => Some(AppEvent::Refresh),

        _ => None,
    }
}
