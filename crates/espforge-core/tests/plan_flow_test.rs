//! Integration tests for the suggestion and plan-generation flows, driven
//! end to end through the services, the session reducer, and the renderer
//! against a scripted generator.

use espforge_core::llm::LlmError;
use espforge_core::sections::{self, RenderedBody, SectionIcon};
use espforge_core::{
    Action, Catalog, FieldUpdate, Locale, PlanPhase, PlanView, ServiceError, Session,
    SuggestPhase, generate_plan, suggest_idea,
};
use espforge_test_utils::{ScriptedGenerator, sample_config, six_section_plan};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Run one suggestion through the service and feed the outcome to the reducer.
async fn suggest(session: Session, generator: &ScriptedGenerator) -> Session {
    let session = session.reduce(Action::SuggestStarted);
    match suggest_idea(generator).await {
        Ok(idea) => session.reduce(Action::SuggestSucceeded(idea)),
        Err(_) => session.reduce(Action::SuggestFailed),
    }
}

/// Run one generation through the service and feed the outcome to the reducer.
async fn generate(session: Session, generator: &ScriptedGenerator) -> Session {
    let session = session.reduce(Action::GenerateStarted);
    match generate_plan(generator, &session.config, "English").await {
        Ok(plan) => session.reduce(Action::GenerateSucceeded(plan)),
        Err(_) => session.reduce(Action::GenerateFailed),
    }
}

fn new_session() -> Session {
    Session::new(&Catalog::builtin(), Locale::En)
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_plan_sends_one_prompt_built_from_config() {
    let generator = ScriptedGenerator::with_response(six_section_plan());
    let mut config = sample_config();
    config.goal = "Smart Plant Watering System".to_string();

    let plan = generate_plan(&generator, &config, "English").await.unwrap();
    assert_eq!(plan, six_section_plan());

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Smart Plant Watering System"));
    assert!(prompts[0].contains(&config.board));
    assert!(prompts[0].contains("### 4. Full Project Code"));
}

#[tokio::test]
async fn generate_plan_failure_is_generic() {
    let generator = ScriptedGenerator::new();
    generator.push_err(LlmError::Status {
        status: 500,
        body: "internal".to_string(),
    });

    let err = generate_plan(&generator, &sample_config(), "English")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PlanGenerationFailed(_)));
    assert_eq!(err.to_string(), "plan generation failed");
}

#[tokio::test]
async fn suggest_idea_returns_cleaned_title() {
    let generator = ScriptedGenerator::with_response("**\"Smart Plant Watering System\"**\n");
    let idea = suggest_idea(&generator).await.unwrap();
    assert_eq!(idea, "Smart Plant Watering System");
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn suggest_idea_failure_is_generic() {
    let generator = ScriptedGenerator::failing("quota exceeded");
    let err = suggest_idea(&generator).await.unwrap_err();
    assert!(matches!(err, ServiceError::IdeaGenerationFailed(_)));
}

// ---------------------------------------------------------------------------
// Session flows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suggestion_is_prepended_and_selected() {
    let generator = ScriptedGenerator::with_response("\"Smart Plant Watering System\"");
    let before = new_session();
    let seeds = before.goals.len();

    let after = suggest(before, &generator).await;
    assert_eq!(after.goals.len(), seeds + 1);
    assert_eq!(after.goals.as_slice()[0], "Smart Plant Watering System");
    assert_eq!(after.config.goal, "Smart Plant Watering System");
    assert_eq!(after.suggest, SuggestPhase::Idle);
}

#[tokio::test]
async fn repeated_suggestion_does_not_duplicate() {
    let generator = ScriptedGenerator::new();
    generator.push_ok("Smart Plant Watering System");
    generator.push_ok("*Smart Plant Watering System*");

    let once = suggest(new_session(), &generator).await;
    let twice = suggest(once.clone(), &generator).await;
    assert_eq!(twice.goals, once.goals);
    assert_eq!(twice.config.goal, once.config.goal);
}

#[tokio::test]
async fn failed_suggestion_keeps_goals_and_plan() {
    let ok = ScriptedGenerator::with_response(six_section_plan());
    let session = generate(new_session(), &ok).await;
    let goals = session.goals.clone();

    let session = suggest(session, &ScriptedGenerator::failing("offline")).await;
    assert!(matches!(session.suggest, SuggestPhase::Failed(_)));
    assert_eq!(session.goals, goals);
    assert_eq!(session.plan_text(), six_section_plan());
}

#[tokio::test]
async fn generated_plan_renders_six_sections() {
    let generator = ScriptedGenerator::with_response(six_section_plan());
    let session = generate(new_session(), &generator).await;
    assert!(matches!(session.plan, PlanPhase::Ready(_)));

    let view = sections::render(session.plan_text());
    assert_eq!(view.section_count(), 6);

    let PlanView::Sections(rendered) = view else {
        panic!("expected sections");
    };
    let titles: Vec<&str> = rendered.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Detailed Functional Description",
            "Pinout Table (Connections)",
            "Text Schematic of the Circuit",
            "Full Project Code",
            "Important Notes",
            "Upgrade Suggestions",
        ]
    );
    assert_eq!(rendered[3].icon, SectionIcon::Code);
    match &rendered[3].body {
        RenderedBody::Code(code) => {
            assert!(!code.contains("```"));
            assert!(code.contains("void setup()"));
        }
        other => panic!("expected code body, got {other:?}"),
    }
    assert!(matches!(rendered[2].body, RenderedBody::Code(_)));
    assert!(matches!(rendered[0].body, RenderedBody::Prose(_)));
}

#[tokio::test]
async fn failed_regeneration_leaves_no_stale_plan() {
    let generator = ScriptedGenerator::with_response(six_section_plan());
    let session = generate(new_session(), &generator).await;
    assert!(!session.plan_text().is_empty());

    let session = generate(session, &generator).await;
    match &session.plan {
        PlanPhase::Failed(msg) => assert_eq!(msg, session.messages().generate_failed),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(session.plan_text(), "");
    assert_eq!(sections::render(session.plan_text()), PlanView::Welcome);
}

#[tokio::test]
async fn edits_between_requests_reach_the_next_prompt() {
    let generator = ScriptedGenerator::new();
    generator.push_ok(six_section_plan());
    generator.push_ok(six_section_plan());

    let session = generate(new_session(), &generator).await;
    let session = session.reduce(Action::Update(FieldUpdate::Power(
        "18650 Li-ion battery".to_string(),
    )));
    let _ = generate(session, &generator).await;

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("18650 Li-ion battery"));
    assert!(prompts[1].contains("18650 Li-ion battery"));
}
