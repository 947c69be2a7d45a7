use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::time::Duration;

use super::{Trigger, ViewController};
use crate::api::ClassroomSource;

pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Map a key press to a trigger, if it is bound to one.
pub fn trigger_for(code: KeyCode, active: Trigger) -> Option<Trigger> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('h') | KeyCode::Char('1') => Some(Trigger::Courses),
        KeyCode::Char('a') | KeyCode::Char('2') => Some(Trigger::Assignments),
        KeyCode::Tab | KeyCode::BackTab => Some(active.other()),
        _ => None,
    }
}

/// Handle one key press. Trigger keys are consumed here and never reach the
/// list navigation below.
pub fn handle_key<S: ClassroomSource>(
    vc: &mut ViewController<S>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            vc.running = false;
            return;
        }
        _ => {}
    }

    if let Some(trigger) = trigger_for(code, vc.active) {
        vc.trigger(trigger);
        return;
    }

    match code {
        KeyCode::Down | KeyCode::Char('j') => vc.list_state.select_next(),
        KeyCode::Up | KeyCode::Char('k') => vc.list_state.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => vc.list_state.selected = 0,
        KeyCode::End | KeyCode::Char('G') => vc.list_state.select_last(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OpenClassClient;

    #[test]
    fn trigger_keys_map_to_triggers() {
        for key in ['c', 'h', '1'] {
            assert_eq!(
                trigger_for(KeyCode::Char(key), Trigger::Assignments),
                Some(Trigger::Courses)
            );
        }
        for key in ['a', '2'] {
            assert_eq!(
                trigger_for(KeyCode::Char(key), Trigger::Courses),
                Some(Trigger::Assignments)
            );
        }
        assert_eq!(trigger_for(KeyCode::Char('j'), Trigger::Courses), None);
    }

    #[test]
    fn tab_switches_to_the_other_trigger() {
        assert_eq!(
            trigger_for(KeyCode::Tab, Trigger::Courses),
            Some(Trigger::Assignments)
        );
        assert_eq!(
            trigger_for(KeyCode::BackTab, Trigger::Assignments),
            Some(Trigger::Courses)
        );
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let client = OpenClassClient::new("http://127.0.0.1:1", None).unwrap();
        let mut vc = ViewController::new(client.clone());
        handle_key(&mut vc, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!vc.running);

        let mut vc = ViewController::new(client);
        handle_key(&mut vc, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!vc.running);
        assert!(!vc.is_loading());
    }

    #[test]
    fn navigation_keys_move_the_cursor() {
        let client = OpenClassClient::new("http://127.0.0.1:1", None).unwrap();
        let mut vc = ViewController::new(client);
        vc.list_state.reset(3);

        handle_key(&mut vc, KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(vc.list_state.selected, 2);
        handle_key(&mut vc, KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(vc.list_state.selected, 1);
        handle_key(&mut vc, KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(vc.list_state.selected, 0);
        assert!(vc.running);
    }
}
