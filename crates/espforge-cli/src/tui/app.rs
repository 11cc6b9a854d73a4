//! TUI application state: the session plus form navigation.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use espforge_core::{Action, Catalog, FieldUpdate, ListField, Locale, ProjectConfig, Session};

/// One row of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Board,
    CustomBoard,
    Goal,
    Modules,
    Communication,
    Language,
    Power,
    Description,
    Generate,
}

impl Field {
    const ORDER: [Field; 9] = [
        Field::Board,
        Field::CustomBoard,
        Field::Goal,
        Field::Modules,
        Field::Communication,
        Field::Language,
        Field::Power,
        Field::Description,
        Field::Generate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Board => "Board",
            Field::CustomBoard => "Custom board",
            Field::Goal => "Goal",
            Field::Modules => "Modules",
            Field::Communication => "Communication",
            Field::Language => "Language",
            Field::Power => "Power",
            Field::Description => "Description",
            Field::Generate => "Generate",
        }
    }

    fn is_text(&self) -> bool {
        matches!(
            self,
            Field::CustomBoard | Field::Power | Field::Description
        )
    }
}

/// Input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing into a text field; `buffer` is committed on Enter.
    Editing { field: Field, buffer: String },
    Help,
}

/// A request the event loop should hand to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Suggest,
    Generate(ProjectConfig),
}

/// Lines moved per PgUp/PgDn.
const SCROLL_STEP: u16 = 10;

pub struct App {
    pub catalog: Catalog,
    pub session: Session,
    pub selected: Field,
    pub module_cursor: usize,
    pub comm_cursor: usize,
    pub mode: Mode,
    pub scroll: u16,
    pub tick: u64,
    pub tick_rate: Duration,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog, locale: Locale) -> Self {
        let session = Session::new(&catalog, locale);
        Self {
            catalog,
            session,
            selected: Field::Board,
            module_cursor: 0,
            comm_cursor: 0,
            mode: Mode::Normal,
            scroll: 0,
            tick: 0,
            tick_rate: Duration::from_millis(100),
            should_quit: false,
            status_message: None,
        }
    }

    /// Feed one action through the session reducer.
    pub fn apply(&mut self, action: Action) {
        self.session = self.session.clone().reduce(action);
    }

    /// Fields currently shown; the custom board row only exists for "Custom".
    pub fn visible_fields(&self) -> Vec<Field> {
        let custom = self.session.config.is_custom_board();
        Field::ORDER
            .into_iter()
            .filter(|f| *f != Field::CustomBoard || custom)
            .collect()
    }

    // -- Key handling --

    /// Handle one key press. Returns a request when the key starts one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Request> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.mode.clone() {
            Mode::Editing { field, buffer } => {
                self.handle_edit_key(key, field, buffer);
                None
            }
            Mode::Help => {
                if matches!(
                    key.code,
                    KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc
                ) {
                    self.mode = Mode::Normal;
                }
                None
            }
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Request> {
        self.status_message = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.mode = Mode::Help,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Left | KeyCode::Char('h') => self.cycle(false),
            KeyCode::Right | KeyCode::Char('l') => self.cycle(true),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(SCROLL_STEP),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(SCROLL_STEP),
            KeyCode::Char('g') => return self.request_generate(),
            KeyCode::Char('s') => return self.request_suggest(),
            KeyCode::Enter => return self.activate_selected(),
            _ => {}
        }
        None
    }

    fn handle_edit_key(&mut self, key: KeyEvent, field: Field, mut buffer: String) {
        match key.code {
            KeyCode::Enter => {
                self.commit_text(field, buffer);
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                buffer.pop();
                self.mode = Mode::Editing { field, buffer };
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                self.mode = Mode::Editing { field, buffer };
            }
            _ => {}
        }
    }

    fn commit_text(&mut self, field: Field, text: String) {
        let update = match field {
            Field::CustomBoard => FieldUpdate::CustomBoardConfig(text),
            Field::Power => FieldUpdate::Power(text),
            Field::Description => FieldUpdate::CustomDescription(text),
            _ => return,
        };
        self.apply(Action::Update(update));
    }

    // -- Navigation --

    pub fn move_up(&mut self) {
        let fields = self.visible_fields();
        if let Some(i) = fields.iter().position(|f| *f == self.selected) {
            if i > 0 {
                self.selected = fields[i - 1];
            }
        }
    }

    pub fn move_down(&mut self) {
        let fields = self.visible_fields();
        if let Some(i) = fields.iter().position(|f| *f == self.selected) {
            if i + 1 < fields.len() {
                self.selected = fields[i + 1];
            }
        }
    }

    /// Left/Right on the selected field.
    fn cycle(&mut self, forward: bool) {
        match self.selected {
            Field::Board => {
                let next = step(&self.catalog.boards, &self.session.config.board, forward);
                if let Some(board) = next {
                    self.apply(Action::SelectBoard(board));
                }
            }
            Field::Goal => {
                let next = step(
                    self.session.goals.as_slice(),
                    &self.session.config.goal,
                    forward,
                );
                if let Some(goal) = next {
                    self.apply(Action::Update(FieldUpdate::Goal(goal)));
                }
            }
            Field::Modules => {
                self.module_cursor =
                    step_index(self.module_cursor, self.catalog.components.len(), forward);
            }
            Field::Communication => {
                self.comm_cursor =
                    step_index(self.comm_cursor, self.catalog.communication.len(), forward);
            }
            Field::Language => self.toggle_language(),
            _ => {}
        }
    }

    /// Space on the selected field.
    fn toggle_selected(&mut self) {
        match self.selected {
            Field::Modules => {
                if let Some(item) = self.catalog.components.get(self.module_cursor).cloned() {
                    self.apply(Action::Toggle(ListField::Modules, item));
                }
            }
            Field::Communication => {
                if let Some(item) = self.catalog.communication.get(self.comm_cursor).cloned() {
                    self.apply(Action::Toggle(ListField::Communication, item));
                }
            }
            Field::Language => self.toggle_language(),
            _ => {}
        }
    }

    fn toggle_language(&mut self) {
        let other = self.session.config.language.other();
        self.apply(Action::Update(FieldUpdate::Language(other)));
    }

    /// Enter on the selected field.
    fn activate_selected(&mut self) -> Option<Request> {
        let field = self.selected;
        if field.is_text() {
            let buffer = match field {
                Field::CustomBoard => self.session.config.custom_board_config.clone(),
                Field::Power => self.session.config.power.clone(),
                _ => self.session.config.custom_description.clone(),
            };
            self.mode = Mode::Editing { field, buffer };
            return None;
        }
        match field {
            Field::Generate => self.request_generate(),
            Field::Board | Field::Goal => {
                self.cycle(true);
                None
            }
            _ => {
                self.toggle_selected();
                None
            }
        }
    }

    // -- Requests --

    pub fn request_generate(&mut self) -> Option<Request> {
        if !self.session.can_generate() {
            self.status_message = Some("Generation already in progress".to_string());
            return None;
        }
        self.apply(Action::GenerateStarted);
        self.scroll = 0;
        Some(Request::Generate(self.session.config.clone()))
    }

    pub fn request_suggest(&mut self) -> Option<Request> {
        if !self.session.can_suggest() {
            self.status_message = Some("Suggestion already in progress".to_string());
            return None;
        }
        self.apply(Action::SuggestStarted);
        Some(Request::Suggest)
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

/// The neighbour of `current` in `items`, wrapping around. Starts at the
/// first item when `current` is not in the list.
fn step(items: &[String], current: &str, forward: bool) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let next = match items.iter().position(|i| i == current) {
        Some(i) => step_index(i, items.len(), forward),
        None => 0,
    };
    items.get(next).cloned()
}

fn step_index(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use espforge_core::{CUSTOM_BOARD, Language, PlanPhase, SuggestPhase};

    fn app() -> App {
        App::new(Catalog::builtin(), Locale::En)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Request> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn custom_board_row_follows_board() {
        let mut app = app();
        assert!(!app.visible_fields().contains(&Field::CustomBoard));

        app.apply(Action::SelectBoard(CUSTOM_BOARD.to_string()));
        assert!(app.session.config.is_custom_board());
        assert!(app.visible_fields().contains(&Field::CustomBoard));
    }

    #[test]
    fn navigation_stops_at_the_ends() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, Field::Board);

        for _ in 0..20 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected, Field::Generate);
    }

    #[test]
    fn down_skips_hidden_custom_board_row() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, Field::Goal);
    }

    #[test]
    fn board_cycles_and_wraps() {
        let mut app = app();
        let boards = app.catalog.boards.clone();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.config.board, boards[1]);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.config.board, boards[boards.len() - 1]);
    }

    #[test]
    fn editing_commits_on_enter_and_cancels_on_esc() {
        let mut app = app();
        app.selected = Field::Power;

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Editing { .. }));
        // Clear the current value, then type a new one.
        for _ in 0..app.session.config.power.chars().count() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2x AA qg");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.session.config.power, "2x AA qg");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, " ignored");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.config.power, "2x AA qg");
        assert!(!app.should_quit);
    }

    #[test]
    fn space_toggles_checklist_item_under_cursor() {
        let mut app = app();
        app.selected = Field::Communication;
        let second = app.catalog.communication[1].clone();

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.config.communication.contains(&second));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.session.config.communication.contains(&second));
    }

    #[test]
    fn language_toggles() {
        let mut app = app();
        app.selected = Field::Language;
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.config.language, Language::MicroPython);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.config.language, Language::ArduinoCpp);
    }

    #[test]
    fn generate_key_starts_one_request_at_a_time() {
        let mut app = app();
        app.scroll = 30;

        let request = press(&mut app, KeyCode::Char('g'));
        assert_eq!(request, Some(Request::Generate(app.session.config.clone())));
        assert_eq!(app.session.plan, PlanPhase::Generating);
        assert_eq!(app.scroll, 0);

        assert_eq!(press(&mut app, KeyCode::Char('g')), None);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn enter_on_generate_button_requests_plan() {
        let mut app = app();
        app.selected = Field::Generate;
        assert!(matches!(
            press(&mut app, KeyCode::Enter),
            Some(Request::Generate(_))
        ));
    }

    #[test]
    fn suggest_key_starts_request() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('s')), Some(Request::Suggest));
        assert_eq!(app.session.suggest, SuggestPhase::Suggesting);
        assert_eq!(press(&mut app, KeyCode::Char('s')), None);
    }

    #[test]
    fn help_mode_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, Mode::Help);
        assert_eq!(press(&mut app, KeyCode::Char('g')), None);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        app.selected = Field::Description;
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn scroll_saturates_at_top() {
        let mut app = app();
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll, SCROLL_STEP);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll, 0);
    }
}
