//! Prompt construction for the suggestion and plan requests.
//!
//! Pure string building with no I/O. The project block of the plan prompt
//! is assembled from a table of conditional fragments so each condition can
//! be tested without touching the network.

use crate::project::ProjectConfig;

/// Instruction for the short project-title suggestion.
pub const SUGGESTION_PROMPT: &str = "Suggest one creative and engaging project idea for the \
ESP32 microcontroller. The idea must be short, no longer than a title. Return only the \
project title.";

/// Added after a custom board description.
pub const CUSTOM_BOARD_DIRECTIVE: &str = "**Custom board instruction:** when producing the \
pinout table and the schematic, follow the user's custom board description exactly and \
choose pins according to the constraints and specifications it gives.";

/// Added after a custom project description.
pub const CUSTOM_DESCRIPTION_DIRECTIVE: &str = "**Critical instruction for the custom \
description:** treat the user's custom description as a core requirement. Every section, \
especially the functional description and the code, must fully satisfy it.";

// ---------------------------------------------------------------------------
// Fragment table
// ---------------------------------------------------------------------------

/// One conditional piece of the project block.
struct Fragment {
    applies: fn(&ProjectConfig) -> bool,
    render: fn(&ProjectConfig) -> String,
}

const PROJECT_FRAGMENTS: &[Fragment] = &[
    Fragment {
        applies: uses_custom_board,
        render: custom_board,
    },
    Fragment {
        applies: uses_named_board,
        render: named_board,
    },
    Fragment {
        applies: always,
        render: goal,
    },
    Fragment {
        applies: always,
        render: modules,
    },
    Fragment {
        applies: always,
        render: communication,
    },
    Fragment {
        applies: always,
        render: language,
    },
    Fragment {
        applies: always,
        render: power,
    },
    Fragment {
        applies: has_custom_description,
        render: custom_description,
    },
];

fn always(_: &ProjectConfig) -> bool {
    true
}

/// The custom board text is only used when the board is Custom *and* the
/// user actually described it; an empty description falls back to the
/// plain board line.
fn uses_custom_board(cfg: &ProjectConfig) -> bool {
    cfg.is_custom_board() && !cfg.custom_board_config.is_empty()
}

fn uses_named_board(cfg: &ProjectConfig) -> bool {
    !uses_custom_board(cfg)
}

fn has_custom_description(cfg: &ProjectConfig) -> bool {
    !cfg.custom_description.is_empty()
}

fn custom_board(cfg: &ProjectConfig) -> String {
    format!(
        "- **Board type:** Custom\n  - **User's custom board description:** {}\n  {}\n",
        cfg.custom_board_config, CUSTOM_BOARD_DIRECTIVE
    )
}

fn named_board(cfg: &ProjectConfig) -> String {
    format!("- **Board:** {}\n", cfg.board)
}

fn goal(cfg: &ProjectConfig) -> String {
    format!("- **Project goal:** {}\n", cfg.goal)
}

fn modules(cfg: &ProjectConfig) -> String {
    format!("- **Modules and components:** {}\n", cfg.modules.join(", "))
}

fn communication(cfg: &ProjectConfig) -> String {
    format!(
        "- **Communication protocol:** {}\n",
        cfg.communication.join(", ")
    )
}

fn language(cfg: &ProjectConfig) -> String {
    format!("- **Programming language:** {}\n", cfg.language)
}

fn power(cfg: &ProjectConfig) -> String {
    format!("- **Power source:** {}\n", cfg.power)
}

fn custom_description(cfg: &ProjectConfig) -> String {
    format!(
        "- **User's custom description:** {}\n  {}\n",
        cfg.custom_description, CUSTOM_DESCRIPTION_DIRECTIVE
    )
}

// ---------------------------------------------------------------------------
// Plan prompt
// ---------------------------------------------------------------------------

/// Build the full plan-generation prompt for `cfg`.
///
/// The prompt asks for exactly six `### N. Title` sections, the shape
/// [`crate::sections::parse_sections`] splits on, and for the whole answer
/// to be written in `response_language`.
pub fn build_plan_prompt(cfg: &ProjectConfig, response_language: &str) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "As a senior electronics engineer and professional embedded-systems developer, \
         write a complete guide for building an ESP32 project with the specification below.\n",
    );
    prompt.push_str(&format!(
        "The output must be written entirely in {response_language}.\n\n"
    ));

    prompt.push_str("**Project specification:**\n");
    for fragment in PROJECT_FRAGMENTS {
        if (fragment.applies)(cfg) {
            prompt.push_str(&(fragment.render)(cfg));
        }
    }
    prompt.push('\n');

    prompt.push_str(&output_structure(cfg));
    prompt.push('\n');
    prompt.push_str(&critical_rules(response_language));

    prompt
}

fn output_structure(cfg: &ProjectConfig) -> String {
    format!(
        "**Output structure:**\n\
Answer using exactly the following Markdown structure and these headings:\n\n\
### 1. Detailed Functional Description\n\
(Explain the overall behaviour of the project, its purpose, and how the components \
interact with each other, completely and clearly.)\n\n\
### 2. Pinout Table (Connections)\n\
(Provide a complete Markdown table of the connections between every component and the \
ESP32 pins. Table format: | Component | Component Pin | ESP32 Pin | Notes |. Use only safe, \
non-reserved ESP32 pins and explain the pin choice where needed.)\n\n\
### 3. Text Schematic of the Circuit\n\
(Draw a simple text-based (ASCII) schematic showing the circuit connections.)\n\n\
### 4. Full Project Code\n\
(Write the complete, clean project code in {language}. Comment every important part so \
it is easy to follow. Put the code in a Markdown code block.)\n\n\
### 5. Important Notes\n\
(List the key points, common mistakes, ESP32 pin limitations such as ADC2 and WiFi, \
power considerations, and troubleshooting steps for this specific project.)\n\n\
### 6. Upgrade Suggestions\n\
(Suggest two or three concrete ideas for upgrading the project, adding new features, or \
making it more professional.)\n",
        language = cfg.language
    )
}

fn critical_rules(response_language: &str) -> String {
    format!(
        "**Critical rules:**\n\
- The code must be complete, error-free, and compile in the Arduino IDE (for Arduino C++).\n\
- Do not use the reserved ESP32 pins (such as GPIO 6-11).\n\
- The pinout must be sensible and free of conflicts.\n\
- The entire answer must be in fluent, technical {response_language}.\n"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
