//! `espforge catalog`: list the built-in form options.

use espforge_core::{CUSTOM_BOARD, Catalog, Language};

pub fn run_catalog() {
    let catalog = Catalog::builtin();
    print!("{}", format_catalog(&catalog));
}

fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();

    let mut section = |title: &str, items: &[String], defaults: &[String]| {
        out.push_str(title);
        out.push('\n');
        for item in items {
            let marker = if defaults.contains(item) { "*" } else { " " };
            out.push_str(&format!("  {marker} {item}\n"));
        }
        out.push('\n');
    };

    let default_board = std::slice::from_ref(&catalog.defaults.board);
    section("Boards:", &catalog.boards, default_board);
    section("Goals:", &catalog.goals, &catalog.goals[..1]);
    section("Components:", &catalog.components, &catalog.defaults.modules);
    section(
        "Communication:",
        &catalog.communication,
        &catalog.defaults.communication,
    );

    let languages: Vec<String> = Language::ALL.iter().map(|l| l.to_string()).collect();
    section(
        "Languages:",
        &languages,
        &[catalog.defaults.language.to_string()],
    );

    out.push_str(&format!("Default power source: {}\n", catalog.defaults.power));
    out.push_str(&format!(
        "\n* = default. Use --board {CUSTOM_BOARD:?} with --custom-board to describe your own board.\n"
    ));
    out
}
