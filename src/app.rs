use std::sync::Arc;

use color_eyre::Result;
use ratatui::{
    crossterm::event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    layout::Position,
    DefaultTerminal,
};
use tracing::{debug, error, info};

use crate::api::{HttpStudentApi, StudentApi};
use crate::client::{perform, Dialog, DismissSource, PendingRequest, StudentListClient};
use crate::event::{AppEvent, Event, EventHandler};
use crate::ui::{HitAreas, MenuAction};

/// Application.
#[derive(Debug)]
pub struct App<A: StudentApi = HttpStudentApi> {
    /// Is the application running?
    pub running: bool,
    /// Records, modal, menus and dialogs.
    pub client: StudentListClient,
    /// Backend the spawned requests run against.
    pub api: Arc<A>,
    /// Event handler.
    pub events: EventHandler,
    /// Screen regions from the last draw, for mouse hit-testing.
    pub hit_areas: HitAreas,
    /// Requests spawned and not yet completed.
    pub in_flight: usize,
    /// Shown in the header.
    pub backend_label: String,
}

impl<A: StudentApi> App<A> {
    /// Constructs a new instance of [`App`] reading terminal input.
    pub fn new(api: A, backend_label: impl Into<String>) -> Self {
        Self::with_events(api, backend_label, EventHandler::new())
    }

    pub fn with_events(api: A, backend_label: impl Into<String>, events: EventHandler) -> Self {
        Self {
            running: true,
            client: StudentListClient::new(),
            api: Arc::new(api),
            events,
            hit_areas: HitAreas::default(),
            in_flight: 0,
            backend_label: backend_label.into(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let request = self.client.load();
        self.dispatch(request);

        let mut needs_redraw = true;
        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                // save power
                needs_redraw = false;
            }

            match self.events.next().await {
                Ok(event) => needs_redraw = self.handle_event(event)?,
                Err(e) => error!("Event error: {}", e),
            }
        }
        Ok(())
    }

    /// Applies one event; returns whether the screen needs a redraw.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            // Don't redraw on tick
            Event::Tick => Ok(false),
            Event::Crossterm(event) => match event {
                CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_events(key_event)?;
                    Ok(true)
                }
                CrosstermEvent::Mouse(mouse_event) => {
                    self.handle_mouse_event(mouse_event);
                    Ok(true)
                }
                CrosstermEvent::Resize(_, _) => Ok(true),
                _ => Ok(false),
            },
            Event::App(app_event) => {
                match app_event {
                    AppEvent::Quit => self.quit(),
                    AppEvent::Reload => {
                        let request = self.client.load();
                        self.dispatch(request);
                    }
                    AppEvent::Completed(completion) => {
                        self.in_flight = self.in_flight.saturating_sub(1);
                        let reaction = self.client.apply(completion);
                        if let Some(notice) = &reaction.notice {
                            debug!("Notice: {}", notice.message);
                        }
                        if let Some(request) = reaction.follow_up {
                            self.dispatch(request);
                        }
                        if reaction.quit {
                            self.quit();
                        }
                    }
                }
                Ok(true)
            }
        }
    }

    /// Runs `request` on its own task; the result comes back as [`AppEvent::Completed`].
    pub fn dispatch(&mut self, request: PendingRequest) {
        info!("Dispatching {:?}", request);
        self.in_flight += 1;

        let api = Arc::clone(&self.api);
        let sender = self.events.sender();
        tokio::spawn(async move {
            let completion = perform(api.as_ref(), request).await;
            let _ = sender.send(Event::App(AppEvent::Completed(completion)));
        });
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.events.send(AppEvent::Quit);
            return Ok(());
        }

        // Blocking dialogs swallow everything else
        match self.client.dialog().cloned() {
            Some(Dialog::Notice(_)) => {
                if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.client.dismiss_notice();
                }
                return Ok(());
            }
            Some(Dialog::Confirm(_)) => {
                let answer = match key_event.code {
                    KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(true),
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(false),
                    _ => None,
                };
                if let Some(accepted) = answer {
                    if let Some(request) = self.client.confirm(accepted) {
                        self.dispatch(request);
                    }
                }
                return Ok(());
            }
            None => {}
        }

        if self.client.is_modal_open() {
            self.handle_modal_key(key_event);
        } else {
            self.handle_table_key(key_event);
        }
        Ok(())
    }

    fn handle_modal_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.client.close_modal(DismissSource::Overlay),
            KeyCode::Tab | KeyCode::Down => self.client.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.client.focus_prev(),
            KeyCode::Enter => {
                if let Ok(request) = self.client.submit() {
                    self.dispatch(request);
                }
            }
            KeyCode::Backspace => self.client.input_backspace(),
            KeyCode::Char(ch) => self.client.input_char(ch),
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key_event: KeyEvent) {
        let open_menu = self.client.open_menu();

        match key_event.code {
            KeyCode::Esc if open_menu.is_some() => self.client.close_all_menus(),
            KeyCode::Left => self.client.close_all_menus(),
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.client.close_all_menus();
                self.client.select_prev();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.client.close_all_menus();
                self.client.select_next();
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
                if let Some(id) = self.client.selected_id() {
                    self.client.toggle_action_menu(id);
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = open_menu {
                    self.client.open_edit(id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = open_menu {
                    self.client.delete(id);
                }
            }
            KeyCode::Char('a') => self.client.open_create(),
            KeyCode::Char('r') => self.events.send(AppEvent::Reload),
            KeyCode::Char('L') => self.client.logout(),
            _ => {}
        }
    }

    /// Left clicks only; everything else is ignored.
    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.client.dialog().is_some() {
            return;
        }

        let position = Position::new(mouse_event.column, mouse_event.row);

        if self.client.is_modal_open() {
            let inside = self
                .hit_areas
                .modal
                .is_some_and(|area| area.contains(position));
            let source = if inside { DismissSource::Inside } else { DismissSource::Overlay };
            self.client.close_modal(source);
            return;
        }

        if let Some(action) = self.hit_areas.menu_action_at(position) {
            match action {
                MenuAction::Edit(id) => self.client.open_edit(id),
                MenuAction::Delete(id) => self.client.delete(id),
            }
            return;
        }

        if let Some((index, id)) = self.hit_areas.toggle_at(position) {
            self.client.select_index(index);
            self.client.toggle_action_menu(id);
            return;
        }

        self.client.click_outside_menus();
        if let Some(index) = self.hit_areas.row_at(position) {
            self.client.select_index(index);
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
