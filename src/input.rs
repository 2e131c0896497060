//! Keyboard shortcuts

/// Page-level command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `M`: play/pause background music
    ToggleMusic,
    /// `Escape`: jump past the intro animation
    SkipIntro,
}

impl Command {
    /// Whether the browser's default action for the key should be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, Command::ToggleMusic)
    }
}

/// Map a `KeyboardEvent.key` value plus modifiers to a command
pub fn command_for_key(key: &str, ctrl: bool, alt: bool) -> Option<Command> {
    match key {
        "Escape" => Some(Command::SkipIntro),
        k if k.eq_ignore_ascii_case("m") && !ctrl && !alt => Some(Command::ToggleMusic),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_key_either_case() {
        assert_eq!(command_for_key("m", false, false), Some(Command::ToggleMusic));
        assert_eq!(command_for_key("M", false, false), Some(Command::ToggleMusic));
    }

    #[test]
    fn test_music_key_ignored_with_modifiers() {
        assert_eq!(command_for_key("m", true, false), None);
        assert_eq!(command_for_key("m", false, true), None);
    }

    #[test]
    fn test_escape_skips_intro() {
        assert_eq!(command_for_key("Escape", false, false), Some(Command::SkipIntro));
        assert_eq!(command_for_key("Escape", true, true), Some(Command::SkipIntro));
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(command_for_key("n", false, false), None);
        assert_eq!(command_for_key("Enter", false, false), None);
        assert_eq!(command_for_key("mm", false, false), None);
    }

    #[test]
    fn test_prevent_default() {
        assert!(Command::ToggleMusic.prevents_default());
        assert!(!Command::SkipIntro.prevents_default());
    }
}
