//! Admin commands the operator can send to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed admin commands accepted by `POST /action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCommand {
    RestartBot,
    TriggerBackup,
    ClearCache,
    RefreshPrice,
    CheckAirdrop,
    RunGiveaway,
}

impl ActionCommand {
    /// All commands, in action-bar order.
    pub const ALL: [ActionCommand; 6] = [
        ActionCommand::RestartBot,
        ActionCommand::TriggerBackup,
        ActionCommand::ClearCache,
        ActionCommand::RefreshPrice,
        ActionCommand::CheckAirdrop,
        ActionCommand::RunGiveaway,
    ];

    /// Wire name sent as `cmd`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCommand::RestartBot => "restart_bot",
            ActionCommand::TriggerBackup => "trigger_backup",
            ActionCommand::ClearCache => "clear_cache",
            ActionCommand::RefreshPrice => "refresh_price",
            ActionCommand::CheckAirdrop => "check_airdrop",
            ActionCommand::RunGiveaway => "run_giveaway",
        }
    }

    /// Action bar label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionCommand::RestartBot => "Restart",
            ActionCommand::TriggerBackup => "Backup",
            ActionCommand::ClearCache => "Clear cache",
            ActionCommand::RefreshPrice => "Price",
            ActionCommand::CheckAirdrop => "Airdrop",
            ActionCommand::RunGiveaway => "Giveaway",
        }
    }

    /// Digit key bound to this command (`'1'`..=`'6'`).
    pub fn hotkey(&self) -> char {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        char::from(b'1' + index as u8)
    }

    /// Command bound to a digit key.
    pub fn from_hotkey(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    /// Question to ask before sending, for commands that need confirmation.
    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            ActionCommand::RestartBot => Some("Restart bot?"),
            _ => None,
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        self.confirmation_prompt().is_some()
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown action '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// JSON body of `POST /action`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionRequest {
    pub cmd: ActionCommand,
}
