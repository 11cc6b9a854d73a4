//! Command-line flags describing a project, shared by `generate` and `prompt`.

use clap::Args;

use espforge_core::{CUSTOM_BOARD, Catalog, FieldUpdate, Language, ProjectConfig};

/// Project fields. Anything left unset falls back to the catalog defaults.
#[derive(Debug, Default, Args)]
pub struct ProjectArgs {
    /// Target board (use "Custom" together with --custom-board)
    #[arg(long)]
    pub board: Option<String>,
    /// Free-text board and pin description; implies --board Custom
    #[arg(long)]
    pub custom_board: Option<String>,
    /// Project goal
    #[arg(long)]
    pub goal: Option<String>,
    /// Component to include (repeatable; replaces the default set)
    #[arg(long = "module", value_name = "MODULE")]
    pub modules: Vec<String>,
    /// Communication method (repeatable; replaces the default set)
    #[arg(long = "comm", value_name = "METHOD")]
    pub communication: Vec<String>,
    /// Firmware language: arduino or micropython
    #[arg(long)]
    pub language: Option<Language>,
    /// Power source
    #[arg(long)]
    pub power: Option<String>,
    /// Extra requirements that override the other fields where they conflict
    #[arg(long)]
    pub description: Option<String>,
}

impl ProjectArgs {
    /// Apply the flags on top of the catalog's default configuration.
    pub fn into_config(self, catalog: &Catalog) -> ProjectConfig {
        let mut updates = Vec::new();

        match (self.board, self.custom_board) {
            (board, Some(text)) => {
                updates.push(FieldUpdate::Board(
                    board.unwrap_or_else(|| CUSTOM_BOARD.to_string()),
                ));
                updates.push(FieldUpdate::CustomBoardConfig(text));
            }
            (Some(board), None) => updates.push(FieldUpdate::Board(board)),
            (None, None) => {}
        }
        if let Some(goal) = self.goal {
            updates.push(FieldUpdate::Goal(goal));
        }
        if !self.modules.is_empty() {
            updates.push(FieldUpdate::Modules(self.modules));
        }
        if !self.communication.is_empty() {
            updates.push(FieldUpdate::Communication(self.communication));
        }
        if let Some(language) = self.language {
            updates.push(FieldUpdate::Language(language));
        }
        if let Some(power) = self.power {
            updates.push(FieldUpdate::Power(power));
        }
        if let Some(description) = self.description {
            updates.push(FieldUpdate::CustomDescription(description));
        }

        updates
            .into_iter()
            .fold(ProjectConfig::from_catalog(catalog), |cfg, update| {
                cfg.with_update(update)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_gives_catalog_defaults() {
        let catalog = Catalog::builtin();
        let cfg = ProjectArgs::default().into_config(&catalog);
        assert_eq!(cfg, ProjectConfig::from_catalog(&catalog));
    }

    #[test]
    fn custom_board_text_implies_custom_board() {
        let catalog = Catalog::builtin();
        let args = ProjectArgs {
            custom_board: Some("ESP32-S3 with LED on GPIO48".to_string()),
            ..Default::default()
        };
        let cfg = args.into_config(&catalog);
        assert_eq!(cfg.board, CUSTOM_BOARD);
        assert!(cfg.is_custom_board());
        assert_eq!(cfg.custom_board_config, "ESP32-S3 with LED on GPIO48");
    }

    #[test]
    fn repeated_flags_replace_lists() {
        let catalog = Catalog::builtin();
        let args = ProjectArgs {
            modules: vec!["Relay Module".to_string(), "Buzzer".to_string()],
            communication: vec!["MQTT".to_string()],
            language: Some(Language::MicroPython),
            power: Some("18650 battery".to_string()),
            ..Default::default()
        };
        let cfg = args.into_config(&catalog);
        assert_eq!(cfg.modules, vec!["Relay Module", "Buzzer"]);
        assert_eq!(cfg.communication, vec!["MQTT"]);
        assert_eq!(cfg.language, Language::MicroPython);
        assert_eq!(cfg.power, "18650 battery");
        assert_eq!(cfg.board, catalog.defaults.board);
    }
}
