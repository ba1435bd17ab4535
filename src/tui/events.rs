//! TUI event handling.
//!
//! Terminal input is read on a helper thread and delivered over a channel;
//! all state changes happen on the thread that owns the [`AppState`](super::state::AppState).

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal tick.
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Terminal resize.
    Resize(u16, u16),
}

/// Event handler using channels.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    // Windows reports releases too
                    Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                        event_tx.send(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => event_tx.send(Event::Resize(w, h)),
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            }

            if event_tx.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// Something the user asked the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the app.
    Quit,
    /// Save the draft.
    Save,
    /// Start a blank entry.
    NewEntry,
    /// Attach a random prompt.
    GeneratePrompt,
    /// Detach the prompt.
    ClearPrompt,
    /// Flip dark/light.
    ToggleTheme,
    /// Open or close the entry list.
    ToggleSidebar,
    /// Move keyboard focus between the list and the main panel.
    SwitchFocus,
    /// Show or hide the key reference.
    ToggleHelp,
    /// Move up (list) or scroll up (viewer).
    Up,
    /// Move down (list) or scroll down (viewer).
    Down,
    /// Open the highlighted entry.
    Open,
    /// Close the list or the help overlay.
    Back,
    /// Type a character into the draft.
    Insert(char),
    /// Line break in the draft.
    Newline,
    /// Delete the last draft character.
    Backspace,
}

/// Where keys are going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The entry list has focus.
    Sidebar,
    /// The editor has focus.
    Editor,
    /// The viewer has focus.
    Viewer,
}

/// Key binding configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Quit keys.
    pub quit: Vec<KeyEvent>,
    /// Save keys.
    pub save: Vec<KeyEvent>,
    /// New entry keys.
    pub new_entry: Vec<KeyEvent>,
    /// Prompt keys.
    pub prompt: Vec<KeyEvent>,
    /// Clear prompt keys.
    pub clear_prompt: Vec<KeyEvent>,
    /// Theme keys.
    pub theme: Vec<KeyEvent>,
    /// Sidebar keys.
    pub sidebar: Vec<KeyEvent>,
    /// Focus switch keys.
    pub focus: Vec<KeyEvent>,
    /// Help keys.
    pub help: Vec<KeyEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        Self {
            quit: vec![ctrl('q'), ctrl('c')],
            save: vec![ctrl('s')],
            new_entry: vec![ctrl('n')],
            prompt: vec![ctrl('p')],
            clear_prompt: vec![ctrl('x')],
            theme: vec![ctrl('t')],
            sidebar: vec![ctrl('b')],
            focus: vec![KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)],
            help: vec![KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)],
        }
    }
}

fn matches_any(bindings: &[KeyEvent], key: &KeyEvent) -> bool {
    bindings
        .iter()
        .any(|k| k.code == key.code && k.modifiers == key.modifiers)
}

impl KeyBindings {
    /// Translate a key press into an action.
    ///
    /// Global chords win; the rest depends on which panel has focus.
    pub fn resolve(&self, key: &KeyEvent, context: KeyContext) -> Option<Action> {
        let global = [
            (&self.quit, Action::Quit),
            (&self.save, Action::Save),
            (&self.new_entry, Action::NewEntry),
            (&self.prompt, Action::GeneratePrompt),
            (&self.clear_prompt, Action::ClearPrompt),
            (&self.theme, Action::ToggleTheme),
            (&self.sidebar, Action::ToggleSidebar),
            (&self.focus, Action::SwitchFocus),
            (&self.help, Action::ToggleHelp),
        ];
        if let Some((_, action)) = global.iter().find(|(keys, _)| matches_any(keys, key)) {
            return Some(*action);
        }

        let plain = key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT;
        match (context, key.code) {
            (_, KeyCode::Esc) => Some(Action::Back),
            (KeyContext::Sidebar, KeyCode::Up | KeyCode::Char('k')) => Some(Action::Up),
            (KeyContext::Sidebar, KeyCode::Down | KeyCode::Char('j')) => Some(Action::Down),
            (KeyContext::Sidebar, KeyCode::Enter) => Some(Action::Open),
            (KeyContext::Viewer, KeyCode::Up | KeyCode::Char('k')) => Some(Action::Up),
            (KeyContext::Viewer, KeyCode::Down | KeyCode::Char('j')) => Some(Action::Down),
            (KeyContext::Editor, KeyCode::Enter) => Some(Action::Newline),
            (KeyContext::Editor, KeyCode::Backspace) => Some(Action::Backspace),
            (KeyContext::Editor, KeyCode::Char(c)) if plain => Some(Action::Insert(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_global_chords_ignore_context() {
        let bindings = KeyBindings::default();
        for context in [KeyContext::Sidebar, KeyContext::Editor, KeyContext::Viewer] {
            assert_eq!(bindings.resolve(&ctrl('s'), context), Some(Action::Save));
            assert_eq!(bindings.resolve(&ctrl('q'), context), Some(Action::Quit));
            assert_eq!(bindings.resolve(&ctrl('t'), context), Some(Action::ToggleTheme));
        }
    }

    #[test]
    fn test_letters_type_in_editor_but_navigate_in_list() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&key(KeyCode::Char('j')), KeyContext::Editor),
            Some(Action::Insert('j'))
        );
        assert_eq!(
            bindings.resolve(&key(KeyCode::Char('j')), KeyContext::Sidebar),
            Some(Action::Down)
        );
        assert_eq!(
            bindings.resolve(&KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT), KeyContext::Editor),
            Some(Action::Insert('J'))
        );
    }

    #[test]
    fn test_enter_depends_on_context() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(&key(KeyCode::Enter), KeyContext::Editor), Some(Action::Newline));
        assert_eq!(bindings.resolve(&key(KeyCode::Enter), KeyContext::Sidebar), Some(Action::Open));
        assert_eq!(bindings.resolve(&key(KeyCode::Enter), KeyContext::Viewer), None);
    }

    #[test]
    fn test_unbound_control_chord_is_ignored() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(&ctrl('z'), KeyContext::Editor), None);
    }
}
