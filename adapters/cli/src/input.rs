//! Key bindings translating terminal key presses into frame inputs.

use bayou_core::{Direction, PlayerCommand, PortalChoice};
use bayou_rendering::{FrameInput, Prompt};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One-line reminder of every binding.
pub(crate) const KEY_HELP: &str = "[z/w] up [s] down [q/a] left [d] right  [f] fire  [c] clear thorns  \
     [i] inventory  [u] health pack  [r] checkpoint  [x] quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Aim {
    Fire,
    Clear,
}

/// Stateful mapper; fire and clear wait for a second, directional key.
#[derive(Debug, Default)]
pub(crate) struct KeyMapper {
    aim: Option<Aim>,
}

impl KeyMapper {
    /// Decodes a key press, returning `None` while more keys are needed or the key is unbound.
    pub(crate) fn map(&mut self, key: KeyEvent, prompt: Option<Prompt>) -> Option<FrameInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.aim = None;
            return Some(FrameInput::Command(PlayerCommand::Quit));
        }

        let code = match key.code {
            KeyCode::Char(symbol) => KeyCode::Char(symbol.to_ascii_lowercase()),
            other => other,
        };

        if prompt == Some(Prompt::PortalChoice) {
            self.aim = None;
            return match code {
                KeyCode::Char('1') => Some(FrameInput::Portal(PortalChoice::EnterArena)),
                KeyCode::Char('2') => Some(FrameInput::Portal(PortalChoice::KeepExploring)),
                _ => None,
            };
        }

        if let Some(aim) = self.aim.take() {
            let direction = direction(code)?;
            let command = match aim {
                Aim::Fire => PlayerCommand::Fire(direction),
                Aim::Clear => PlayerCommand::BreakObstacle(direction),
            };
            return Some(FrameInput::Command(command));
        }

        let command = match code {
            KeyCode::Char('f') => {
                self.aim = Some(Aim::Fire);
                return None;
            }
            KeyCode::Char('c') => {
                self.aim = Some(Aim::Clear);
                return None;
            }
            KeyCode::Char('i') => PlayerCommand::OpenInventory,
            KeyCode::Char('u') => PlayerCommand::UseHealthPack,
            KeyCode::Char('r') => PlayerCommand::Recover,
            KeyCode::Char('x') => PlayerCommand::Quit,
            other => PlayerCommand::Move(direction(other)?),
        };
        Some(FrameInput::Command(command))
    }

    /// Question shown while a direction is pending.
    pub(crate) fn pending_hint(&self) -> Option<&'static str> {
        match self.aim? {
            Aim::Fire => Some("Fire which way? [z/w] up [s] down [q/a] left [d] right"),
            Aim::Clear => Some("Clear thorns which way? [z/w] up [s] down [q/a] left [d] right"),
        }
    }
}

fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('z' | 'w') | KeyCode::Up => Some(Direction::North),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::South),
        KeyCode::Char('q' | 'a') | KeyCode::Left => Some(Direction::West),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::East),
        _ => None,
    }
}
