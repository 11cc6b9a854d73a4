//! Session state and its transition function.
//!
//! The session owns the project configuration, the goal list, and one
//! phase per request flow. Every change goes through [`Session::reduce`],
//! which consumes the old value and returns the new one.
//!
//! ```text
//! suggest:  Idle/Failed --SuggestStarted--> Suggesting
//!           Suggesting  --SuggestSucceeded--> Idle
//!           Suggesting  --SuggestFailed----> Failed
//!
//! plan:     Idle/Ready/Failed --GenerateStarted--> Generating
//!           Generating --GenerateSucceeded--> Ready
//!           Generating --GenerateFailed----> Failed
//! ```
//!
//! The two flows are independent: neither ever touches the other's phase.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::messages::{Locale, Messages};
use crate::project::{CUSTOM_BOARD, FieldUpdate, GoalList, ListField, ProjectConfig};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuggestPhase {
    #[default]
    Idle,
    Suggesting,
    /// Holds the user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlanPhase {
    #[default]
    Idle,
    Generating,
    Ready(String),
    /// Holds the user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Update(FieldUpdate),
    Toggle(ListField, String),
    /// Set the board; a non-custom board also clears the custom description.
    SelectBoard(String),
    SuggestStarted,
    SuggestSucceeded(String),
    SuggestFailed,
    GenerateStarted,
    GenerateSucceeded(String),
    GenerateFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub config: ProjectConfig,
    pub goals: GoalList,
    pub suggest: SuggestPhase,
    pub plan: PlanPhase,
    pub locale: Locale,
}

impl Session {
    pub fn new(catalog: &Catalog, locale: Locale) -> Self {
        Self {
            config: ProjectConfig::from_catalog(catalog),
            goals: GoalList::from_catalog(catalog),
            suggest: SuggestPhase::Idle,
            plan: PlanPhase::Idle,
            locale,
        }
    }

    pub fn messages(&self) -> &'static Messages {
        Messages::for_locale(self.locale)
    }

    pub fn can_suggest(&self) -> bool {
        self.suggest != SuggestPhase::Suggesting
    }

    pub fn can_generate(&self) -> bool {
        self.plan != PlanPhase::Generating
    }

    /// The current plan text, or `""` when there is none.
    pub fn plan_text(&self) -> &str {
        match &self.plan {
            PlanPhase::Ready(text) => text,
            _ => "",
        }
    }

    /// Apply one action and return the next session.
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::Update(update) => {
                self.config = self.config.with_update(update);
            }
            Action::Toggle(field, value) => {
                self.config = self.config.with_toggled(field, &value);
            }
            Action::SelectBoard(board) => {
                let clear_custom = board != CUSTOM_BOARD;
                self.config = self.config.with_update(FieldUpdate::Board(board));
                if clear_custom {
                    self.config = self
                        .config
                        .with_update(FieldUpdate::CustomBoardConfig(String::new()));
                }
            }

            Action::SuggestStarted => {
                if !self.can_suggest() {
                    debug!("suggestion already in flight; ignoring start");
                    return self;
                }
                self.suggest = SuggestPhase::Suggesting;
            }
            Action::SuggestSucceeded(idea) => {
                if self.suggest != SuggestPhase::Suggesting {
                    return self;
                }
                self.suggest = SuggestPhase::Idle;
                if idea.is_empty() {
                    warn!("suggested idea was empty after cleaning");
                } else if self.goals.offer(&idea) {
                    self.config = self.config.with_update(FieldUpdate::Goal(idea));
                } else {
                    warn!(idea = %idea, "suggested idea already in goal list");
                }
            }
            Action::SuggestFailed => {
                if self.suggest != SuggestPhase::Suggesting {
                    return self;
                }
                self.suggest = SuggestPhase::Failed(self.messages().suggest_failed.to_string());
            }

            Action::GenerateStarted => {
                if !self.can_generate() {
                    debug!("plan generation already in flight; ignoring start");
                    return self;
                }
                self.plan = PlanPhase::Generating;
            }
            Action::GenerateSucceeded(text) => {
                if self.plan != PlanPhase::Generating {
                    return self;
                }
                self.plan = PlanPhase::Ready(text);
            }
            Action::GenerateFailed => {
                if self.plan != PlanPhase::Generating {
                    return self;
                }
                self.plan = PlanPhase::Failed(self.messages().generate_failed.to_string());
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&Catalog::builtin(), Locale::En)
    }

    #[test]
    fn new_session_is_idle() {
        let s = session();
        assert_eq!(s.suggest, SuggestPhase::Idle);
        assert_eq!(s.plan, PlanPhase::Idle);
        assert_eq!(s.plan_text(), "");
        assert!(s.can_suggest());
        assert!(s.can_generate());
        assert_eq!(s.config.goal, s.goals.as_slice()[0]);
    }

    #[test]
    fn generate_success_path() {
        let s = session()
            .reduce(Action::GenerateStarted)
            .reduce(Action::GenerateSucceeded("### 1. A\nb".to_string()));
        assert_eq!(s.plan, PlanPhase::Ready("### 1. A\nb".to_string()));
        assert_eq!(s.plan_text(), "### 1. A\nb");
    }

    #[test]
    fn generate_start_drops_previous_plan() {
        let s = session()
            .reduce(Action::GenerateStarted)
            .reduce(Action::GenerateSucceeded("old plan".to_string()))
            .reduce(Action::GenerateStarted);
        assert_eq!(s.plan, PlanPhase::Generating);
        assert_eq!(s.plan_text(), "");
    }

    #[test]
    fn generate_failure_sets_message_and_no_plan() {
        let s = session()
            .reduce(Action::GenerateStarted)
            .reduce(Action::GenerateSucceeded("old plan".to_string()))
            .reduce(Action::GenerateStarted)
            .reduce(Action::GenerateFailed);
        match &s.plan {
            PlanPhase::Failed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(s.plan_text(), "");
        assert!(s.can_generate());
    }

    #[test]
    fn second_generate_start_is_ignored() {
        let s = session().reduce(Action::GenerateStarted);
        assert!(!s.can_generate());
        let again = s.clone().reduce(Action::GenerateStarted);
        assert_eq!(again, s);
    }

    #[test]
    fn completion_without_start_is_ignored() {
        let s = session();
        assert_eq!(
            s.clone().reduce(Action::GenerateSucceeded("x".to_string())),
            s
        );
        assert_eq!(s.clone().reduce(Action::GenerateFailed), s);
        assert_eq!(s.clone().reduce(Action::SuggestSucceeded("x".to_string())), s);
        assert_eq!(s.clone().reduce(Action::SuggestFailed), s);
    }

    #[test]
    fn new_suggestion_is_prepended_and_selected() {
        let s = session()
            .reduce(Action::SuggestStarted)
            .reduce(Action::SuggestSucceeded(
                "Smart Plant Watering System".to_string(),
            ));
        assert_eq!(s.goals.as_slice()[0], "Smart Plant Watering System");
        assert_eq!(s.config.goal, "Smart Plant Watering System");
        assert_eq!(s.suggest, SuggestPhase::Idle);
    }

    #[test]
    fn duplicate_suggestion_changes_nothing() {
        let before = session();
        let existing = before.goals.as_slice()[2].clone();
        let after = before
            .clone()
            .reduce(Action::SuggestStarted)
            .reduce(Action::SuggestSucceeded(existing));
        assert_eq!(after.goals, before.goals);
        assert_eq!(after.config.goal, before.config.goal);
        assert_eq!(after.suggest, SuggestPhase::Idle);
    }

    #[test]
    fn empty_suggestion_is_a_no_op() {
        let before = session();
        let after = before
            .clone()
            .reduce(Action::SuggestStarted)
            .reduce(Action::SuggestSucceeded(String::new()));
        assert_eq!(after, before);
    }

    #[test]
    fn suggestion_failure_leaves_plan_untouched() {
        let s = session()
            .reduce(Action::GenerateStarted)
            .reduce(Action::GenerateSucceeded("plan".to_string()))
            .reduce(Action::SuggestStarted)
            .reduce(Action::SuggestFailed);
        assert!(matches!(s.suggest, SuggestPhase::Failed(_)));
        assert_eq!(s.plan, PlanPhase::Ready("plan".to_string()));
    }

    #[test]
    fn plan_failure_leaves_suggestion_in_flight() {
        let s = session()
            .reduce(Action::SuggestStarted)
            .reduce(Action::GenerateStarted)
            .reduce(Action::GenerateFailed);
        assert_eq!(s.suggest, SuggestPhase::Suggesting);
        assert!(matches!(s.plan, PlanPhase::Failed(_)));
    }

    #[test]
    fn flows_run_concurrently() {
        let s = session()
            .reduce(Action::GenerateStarted)
            .reduce(Action::SuggestStarted);
        assert_eq!(s.plan, PlanPhase::Generating);
        assert_eq!(s.suggest, SuggestPhase::Suggesting);
    }

    #[test]
    fn failure_messages_follow_locale() {
        let s = Session::new(&Catalog::builtin(), Locale::Fa)
            .reduce(Action::SuggestStarted)
            .reduce(Action::SuggestFailed);
        assert_eq!(
            s.suggest,
            SuggestPhase::Failed(Messages::for_locale(Locale::Fa).suggest_failed.to_string())
        );
    }

    #[test]
    fn selecting_named_board_clears_custom_text() {
        let s = session()
            .reduce(Action::SelectBoard(CUSTOM_BOARD.to_string()))
            .reduce(Action::Update(FieldUpdate::CustomBoardConfig(
                "GPIO12 drives an LED".to_string(),
            )));
        assert_eq!(s.config.custom_board_config, "GPIO12 drives an LED");

        let s = s.reduce(Action::SelectBoard("ESP32 DevKitC V4 (38-pin)".to_string()));
        assert_eq!(s.config.board, "ESP32 DevKitC V4 (38-pin)");
        assert_eq!(s.config.custom_board_config, "");
    }

    #[test]
    fn toggle_action_updates_list() {
        let s = session().reduce(Action::Toggle(ListField::Communication, "BLE".to_string()));
        assert_eq!(s.config.communication, vec!["WiFi", "BLE"]);
    }
}
