use crate::api::ApiClient;
use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::sync;
use crate::types::{Command, InputMode};
use crate::ui::{self, draw};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::TableState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug)]
pub struct App {
    state: SharedState,
    client: ApiClient,
    table_state: TableState,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            client: ApiClient::new(config.server.base_url.clone()),
            table_state: TableState::default(),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            config,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.initialize();

        let notice_ttl = Duration::from_secs(self.config.ui.notice_secs);

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            if let Ok(mut state) = self.state.write() {
                state.expire_notice(Instant::now(), notice_ttl);
            }

            terminal.draw(|frame| self.draw(frame))?;

            let base_url = self.client.base_url().to_string();
            if let Some(command) = self.event_handler.handle_events(&self.state, &base_url)? {
                self.execute(command);
            }
        }

        info!("quitting");
        Ok(())
    }

    fn initialize(&self) {
        sync::spawn_initialize(self.client.clone(), Arc::clone(&self.state));
    }

    /// Spawn the background work a key press asked for
    fn execute(&mut self, command: Command) {
        let client = self.client.clone();
        let state = Arc::clone(&self.state);

        match command {
            Command::Reload => sync::spawn_refresh(client, state),
            Command::Reconnect => {
                if let Ok(mut s) = self.state.write() {
                    s.data.retry_count += 1;
                }
                self.initialize();
            }
            Command::CreateStudent(student) => sync::spawn_create_student(client, state, student),
            Command::CreateGrade(grade) => sync::spawn_create_grade(client, state, grade),
            Command::DeleteStudent(id) => sync::spawn_delete_student(client, state, id),
            Command::FilterGrades(filter) => sync::spawn_filter_grades(client, state, filter),
            Command::ClearFilters => sync::spawn_clear_filters(client, state),
            Command::ChangeBaseUrl(base_url) => {
                if let Err(e) = self.config.set_base_url(base_url) {
                    error!(error = %e, "failed to save config");
                }
                self.client = ApiClient::new(self.config.server.base_url.clone());
                if let Ok(mut s) = self.state.write() {
                    s.data.retry_count = 0;
                }
                self.initialize();
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        // Header, tab bar, notice, body, footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(1), // Tabs
                Constraint::Length(1), // Notice
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        draw::render_header(
            frame,
            chunks[0],
            &state,
            self.client.base_url(),
            self.spinner_index,
        );
        draw::render_tab_bar(frame, chunks[1], state.ui.active_tab);
        draw::render_notice(frame, chunks[2], &state);
        draw::render_body(
            frame,
            chunks[3],
            &state,
            self.spinner_index,
            &mut self.table_state,
        );
        draw::render_footer(frame, chunks[4], state.ui.active_tab);

        // Render modals LAST - after everything else
        match state.input.mode {
            InputMode::StudentForm => draw::render_student_form_modal(frame, &state),
            InputMode::GradeForm => draw::render_grade_form_modal(frame, &state),
            InputMode::GradeFilter => draw::render_filter_modal(frame, &state),
            InputMode::ConfirmDelete => draw::render_confirm_delete_modal(frame, &state),
            InputMode::EnteringUrl => draw::render_url_input_modal(frame, &state),
            InputMode::Normal => {}
        }
    }
}
