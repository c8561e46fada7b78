// Keyboard shortcuts for the builder.

/// A key press with its modifiers. `meta` is Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }

    pub fn meta(key: char) -> Self {
        Self {
            meta: true,
            ..Self::new(key)
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    fn command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
}

/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo.
pub fn command_for(chord: &KeyChord) -> Option<EditorCommand> {
    if !chord.command_modifier() {
        return None;
    }

    match (chord.key.to_ascii_lowercase(), chord.shift) {
        ('z', false) => Some(EditorCommand::Undo),
        ('z', true) | ('y', false) => Some(EditorCommand::Redo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(command_for(&KeyChord::ctrl('z')), Some(EditorCommand::Undo));
        assert_eq!(command_for(&KeyChord::meta('Z')), Some(EditorCommand::Undo));
        assert_eq!(
            command_for(&KeyChord::ctrl('z').with_shift()),
            Some(EditorCommand::Redo)
        );
        assert_eq!(command_for(&KeyChord::meta('y')), Some(EditorCommand::Redo));
    }

    #[test]
    fn test_unbound_chords() {
        assert_eq!(command_for(&KeyChord::new('z')), None);
        assert_eq!(command_for(&KeyChord::ctrl('s')), None);
        assert_eq!(command_for(&KeyChord::ctrl('y').with_shift()), None);
    }
}
