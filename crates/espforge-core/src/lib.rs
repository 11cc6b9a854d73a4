//! Core library for espforge: the project model, prompt construction,
//! response parsing, session state, and the LLM transport.

pub mod catalog;
pub mod llm;
pub mod messages;
pub mod project;
pub mod prompt;
pub mod sections;
pub mod service;
pub mod state;

pub use catalog::{Catalog, CatalogError};
pub use llm::{GeminiClient, GeminiConfig, LlmError, TextGenerator};
pub use messages::{Locale, Messages};
pub use project::{CUSTOM_BOARD, FieldUpdate, GoalList, Language, ListField, ProjectConfig};
pub use prompt::{SUGGESTION_PROMPT, build_plan_prompt};
pub use sections::{PlanView, RenderedBody, RenderedSection, Section, SectionIcon, SectionKind};
pub use service::{ServiceError, clean_idea, generate_plan, suggest_idea};
pub use state::{Action, PlanPhase, Session, SuggestPhase};
