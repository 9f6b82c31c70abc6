use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::Category;
use crate::config::KeybindingProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SelectNext,
    SelectPrevious,
    PageDown,
    PageUp,
    ToggleItem,
    CycleFilter,
    ToggleSection(Category),
    SwitchSection,
    RequestReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Yes,
    No,
}

fn plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

pub fn action_for_key(key: &KeyEvent, profile: KeybindingProfile) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('n') if ctrl && profile == KeybindingProfile::Emacs => {
            Some(Action::SelectNext)
        }
        KeyCode::Char('p') if ctrl && profile == KeybindingProfile::Emacs => {
            Some(Action::SelectPrevious)
        }
        KeyCode::Char('j') if plain(key) && profile == KeybindingProfile::Vim => {
            Some(Action::SelectNext)
        }
        KeyCode::Char('k') if plain(key) && profile == KeybindingProfile::Vim => {
            Some(Action::SelectPrevious)
        }
        KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Up => Some(Action::SelectPrevious),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleItem),
        KeyCode::Tab => Some(Action::SwitchSection),
        KeyCode::Char(_) if !plain(key) => None,
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('f') => Some(Action::CycleFilter),
        KeyCode::Char('1') | KeyCode::Char('c') => Some(Action::ToggleSection(Category::Common)),
        KeyCode::Char('2') | KeyCode::Char('u') => Some(Action::ToggleSection(Category::Unique)),
        KeyCode::Char('R') => Some(Action::RequestReset),
        _ => None,
    }
}

pub fn confirm_answer(key: &KeyEvent) -> Option<ConfirmAnswer> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(ConfirmAnswer::Yes),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(ConfirmAnswer::No),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_profile_moves_with_jk() {
        let profile = KeybindingProfile::Vim;
        assert_eq!(
            action_for_key(&key(KeyCode::Char('j')), profile),
            Some(Action::SelectNext)
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char('k')), profile),
            Some(Action::SelectPrevious)
        );
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_n, profile), None);
    }

    #[test]
    fn emacs_profile_moves_with_ctrl_np() {
        let profile = KeybindingProfile::Emacs;
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_n, profile), Some(Action::SelectNext));
        assert_eq!(action_for_key(&key(KeyCode::Char('j')), profile), None);
    }

    #[test]
    fn section_and_filter_keys() {
        let profile = KeybindingProfile::Vim;
        assert_eq!(
            action_for_key(&key(KeyCode::Char('2')), profile),
            Some(Action::ToggleSection(Category::Unique))
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char('c')), profile),
            Some(Action::ToggleSection(Category::Common))
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char('f')), profile),
            Some(Action::CycleFilter)
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char(' ')), profile),
            Some(Action::ToggleItem)
        );
        let reset = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(action_for_key(&reset, profile), Some(Action::RequestReset));
    }

    #[test]
    fn ctrl_c_quits_but_ctrl_f_does_nothing() {
        let profile = KeybindingProfile::Vim;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_c, profile), Some(Action::Quit));
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_f, profile), None);
    }

    #[test]
    fn confirmation_answers() {
        assert_eq!(
            confirm_answer(&key(KeyCode::Char('y'))),
            Some(ConfirmAnswer::Yes)
        );
        assert_eq!(confirm_answer(&key(KeyCode::Esc)), Some(ConfirmAnswer::No));
        assert_eq!(confirm_answer(&key(KeyCode::Char('x'))), None);
    }
}
