//! Squad/module configuration
//!
//! An ordered list of squads, each with its ordered module labels. Read when
//! a cycle is created to materialize its ledger; replaced wholesale by admins.

use serde::{Deserialize, Serialize};

/// Storage key of the configuration singleton
pub const SQUADS_CONFIG_KEY: &str = "squads_e_modulos";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadsConfig {
    #[serde(default)]
    pub squads: Vec<SquadModules>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadModules {
    pub squad: String,
    #[serde(default)]
    pub modules: Vec<String>,
}

impl SquadsConfig {
    /// Module labels configured for `squad`, if the squad exists
    pub fn modules_for(&self, squad: &str) -> Option<&[String]> {
        self.squads
            .iter()
            .find(|s| s.squad == squad)
            .map(|s| s.modules.as_slice())
    }

    pub fn squad_names(&self) -> Vec<&str> {
        self.squads.iter().map(|s| s.squad.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_uploaded_shape() {
        let config: SquadsConfig = serde_json::from_str(
            r#"{"squads": [{"squad": "Pagamentos", "modules": ["Pix", "Boleto"]}, {"squad": "Onboarding"}]}"#,
        )
        .unwrap();
        assert_eq!(config.squad_names(), vec!["Pagamentos", "Onboarding"]);
        assert_eq!(config.modules_for("Pagamentos").unwrap(), ["Pix", "Boleto"]);
        assert!(config.modules_for("Onboarding").unwrap().is_empty());
        assert!(config.modules_for("Investimentos").is_none());
    }
}
