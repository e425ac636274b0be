use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    /// Esc, `q` or Ctrl-C.
    Quit,
    Resize,
}

/// Map a terminal event to what the display cares about.
pub(crate) fn classify(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Resize(_, _) => Some(InputEvent::Resize),
        Event::Key(key) if key.kind != KeyEventKind::Release && is_quit_key(key) => {
            Some(InputEvent::Quit)
        }
        _ => None,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
