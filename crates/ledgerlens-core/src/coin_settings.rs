//! Coin settings screen: address derivation and sync mode choices shown
//! when a wallet is created or restored.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Coin;

// ==============================================================================
// Settings
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSetting {
    Derivation,
    SyncMode,
}

impl std::fmt::Display for CoinSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Derivation => write!(f, "derivation"),
            Self::SyncMode => write!(f, "sync_mode"),
        }
    }
}

/// Stored settings of one coin, keyed by setting.
pub type CoinSettings = BTreeMap<CoinSetting, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Derivation {
    Bip44,
    Bip49,
    Bip84,
}

impl Derivation {
    pub const ALL: [Derivation; 3] = [Self::Bip44, Self::Bip49, Self::Bip84];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bip44 => "bip44",
            Self::Bip49 => "bip49",
            Self::Bip84 => "bip84",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Bip44 => "BIP 44",
            Self::Bip49 => "BIP 49",
            Self::Bip84 => "BIP 84",
        }
    }

    fn subtitle(&self) -> &'static str {
        match self {
            Self::Bip44 => "Legacy addresses starting with 1",
            Self::Bip49 => "SegWit addresses starting with 3",
            Self::Bip84 => "Native SegWit addresses starting with bc1",
        }
    }
}

impl FromStr for Derivation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::InvalidSetting {
                setting: CoinSetting::Derivation.to_string(),
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Fast,
    Slow,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Slow => "slow",
        }
    }
}

impl FromStr for SyncMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Self::Fast),
            "slow" => Ok(Self::Slow),
            _ => Err(CoreError::InvalidSetting {
                setting: CoinSetting::SyncMode.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsMode {
    Creating,
    Restoring,
}

// ==============================================================================
// Sections
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingSection {
    Header {
        title: String,
    },
    Description {
        text: String,
    },
    DerivationItem {
        title: String,
        subtitle: String,
        derivation: Derivation,
        selected: bool,
    },
    SyncModeItem {
        title: String,
        subtitle: String,
        sync_mode: SyncMode,
        selected: bool,
    },
}

/// What the settings screen resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOutcome {
    Done { settings: CoinSettings, coin: Coin },
    Cancelled,
}

// ==============================================================================
// Presenter
// ==============================================================================

pub struct CoinSettingsPresenter {
    coin: Coin,
    settings: CoinSettings,
    mode: SettingsMode,
}

impl CoinSettingsPresenter {
    pub fn new(coin: Coin, settings: CoinSettings, mode: SettingsMode) -> Self {
        Self {
            coin,
            settings,
            mode,
        }
    }

    pub fn title(&self) -> &str {
        &self.coin.title
    }

    /// Derivation block first, then the sync mode block. A setting the coin
    /// does not carry produces no block.
    pub fn sections(&self) -> Result<Vec<SettingSection>, CoreError> {
        let mut derivation_list = Vec::new();
        let mut sync_mode_list = Vec::new();

        for (setting, value) in &self.settings {
            match setting {
                CoinSetting::Derivation => {
                    let current: Derivation = value.parse()?;
                    derivation_list.push(SettingSection::Header {
                        title: "Address Format".into(),
                    });
                    derivation_list.extend(Derivation::ALL.into_iter().map(|d| {
                        SettingSection::DerivationItem {
                            title: d.title().into(),
                            subtitle: d.subtitle().into(),
                            derivation: d,
                            selected: d == current,
                        }
                    }));
                    let text = match self.mode {
                        SettingsMode::Creating => {
                            "New addresses will use the selected format. It can't be changed later."
                        }
                        SettingsMode::Restoring => {
                            "Pick the format your wallet used. A wrong choice shows an empty balance."
                        }
                    };
                    derivation_list.push(SettingSection::Description { text: text.into() });
                }
                CoinSetting::SyncMode => {
                    let current: SyncMode = value.parse()?;
                    sync_mode_list.push(SettingSection::Header {
                        title: "Sync Mode".into(),
                    });
                    sync_mode_list.push(SettingSection::SyncModeItem {
                        title: "API".into(),
                        subtitle: "Fast, via a trusted API server".into(),
                        sync_mode: SyncMode::Fast,
                        selected: current == SyncMode::Fast,
                    });
                    sync_mode_list.push(SettingSection::SyncModeItem {
                        title: format!("From {} Blockchain", self.coin.title),
                        subtitle: "Slow, fully private".into(),
                        sync_mode: SyncMode::Slow,
                        selected: current == SyncMode::Slow,
                    });
                    if self.mode == SettingsMode::Restoring {
                        sync_mode_list.push(SettingSection::Description {
                            text: format!(
                                "Restoring {} from the blockchain can take a long time. \
                                 You can follow the chain on {}.",
                                self.coin.title,
                                self.coin.coin_type.restore_url()
                            ),
                        });
                    }
                }
            }
        }

        derivation_list.extend(sync_mode_list);
        Ok(derivation_list)
    }

    pub fn select_sync_mode(&mut self, sync_mode: SyncMode) {
        self.settings
            .insert(CoinSetting::SyncMode, sync_mode.as_str().to_string());
    }

    pub fn select_derivation(&mut self, derivation: Derivation) {
        self.settings
            .insert(CoinSetting::Derivation, derivation.as_str().to_string());
    }

    pub fn done(self) -> SettingsOutcome {
        tracing::debug!(coin = %self.coin.code, settings = ?self.settings, "coin settings confirmed");
        SettingsOutcome::Done {
            settings: self.settings,
            coin: self.coin,
        }
    }

    pub fn cancel(self) -> SettingsOutcome {
        SettingsOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::bitcoin_coin;

    fn settings(derivation: &str, sync_mode: &str) -> CoinSettings {
        CoinSettings::from([
            (CoinSetting::Derivation, derivation.to_string()),
            (CoinSetting::SyncMode, sync_mode.to_string()),
        ])
    }

    fn selected_derivation(sections: &[SettingSection]) -> Vec<Derivation> {
        sections
            .iter()
            .filter_map(|s| match s {
                SettingSection::DerivationItem {
                    derivation,
                    selected: true,
                    ..
                } => Some(*derivation),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn creating_lists_derivation_then_sync_mode() {
        let presenter = CoinSettingsPresenter::new(
            bitcoin_coin(),
            settings("bip49", "fast"),
            SettingsMode::Creating,
        );
        let sections = presenter.sections().unwrap();

        // Header, three derivations, description, header, two sync modes.
        assert_eq!(sections.len(), 8);
        assert_eq!(
            sections[0],
            SettingSection::Header {
                title: "Address Format".into()
            }
        );
        assert!(matches!(sections[4], SettingSection::Description { .. }));
        assert_eq!(
            sections[5],
            SettingSection::Header {
                title: "Sync Mode".into()
            }
        );
        assert_eq!(selected_derivation(&sections), vec![Derivation::Bip49]);
        assert_eq!(
            sections[6],
            SettingSection::SyncModeItem {
                title: "API".into(),
                subtitle: "Fast, via a trusted API server".into(),
                sync_mode: SyncMode::Fast,
                selected: true,
            }
        );
    }

    #[test]
    fn restoring_adds_sync_description() {
        let presenter = CoinSettingsPresenter::new(
            bitcoin_coin(),
            settings("bip84", "slow"),
            SettingsMode::Restoring,
        );
        let sections = presenter.sections().unwrap();
        assert_eq!(sections.len(), 9);
        match sections.last().unwrap() {
            SettingSection::Description { text } => {
                assert!(text.contains("Bitcoin"));
                assert!(text.contains("https://blockstream.info"));
            }
            other => panic!("unexpected last section {other:?}"),
        }
    }

    #[test]
    fn sync_only_coin_has_no_derivation_block() {
        let presenter = CoinSettingsPresenter::new(
            bitcoin_coin(),
            CoinSettings::from([(CoinSetting::SyncMode, "fast".to_string())]),
            SettingsMode::Creating,
        );
        let sections = presenter.sections().unwrap();
        assert_eq!(sections.len(), 3);
        assert!(selected_derivation(&sections).is_empty());
    }

    #[test]
    fn invalid_stored_value_is_an_error() {
        let presenter = CoinSettingsPresenter::new(
            bitcoin_coin(),
            settings("bip32", "fast"),
            SettingsMode::Creating,
        );
        let err = presenter.sections().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSetting { ref value, .. } if value == "bip32"));
    }

    #[test]
    fn selections_flow_into_done() {
        let mut presenter = CoinSettingsPresenter::new(
            bitcoin_coin(),
            settings("bip44", "fast"),
            SettingsMode::Restoring,
        );
        presenter.select_derivation(Derivation::Bip84);
        presenter.select_sync_mode(SyncMode::Slow);

        let sections = presenter.sections().unwrap();
        assert_eq!(selected_derivation(&sections), vec![Derivation::Bip84]);

        match presenter.done() {
            SettingsOutcome::Done { settings, coin } => {
                assert_eq!(settings[&CoinSetting::Derivation], "bip84");
                assert_eq!(settings[&CoinSetting::SyncMode], "slow");
                assert_eq!(coin, bitcoin_coin());
            }
            SettingsOutcome::Cancelled => panic!("expected done"),
        }
    }

    #[test]
    fn cancel_discards_changes() {
        let mut presenter = CoinSettingsPresenter::new(
            bitcoin_coin(),
            settings("bip44", "fast"),
            SettingsMode::Creating,
        );
        presenter.select_sync_mode(SyncMode::Slow);
        assert_eq!(presenter.cancel(), SettingsOutcome::Cancelled);
    }
}
