use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termtris_engine::{Arrow, Key};

/// Translates a terminal key press into a game key.
///
/// Letters and arrows go through the same tables as raw byte input. Ctrl-C
/// quits. Keys with no byte equivalent (function keys and the like) are
/// ignored.
pub fn game_key(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Key::Quit);
    }
    let key = match event.code {
        KeyCode::Up => Key::from_arrow(Arrow::Up),
        KeyCode::Down => Key::from_arrow(Arrow::Down),
        KeyCode::Right => Key::from_arrow(Arrow::Right),
        KeyCode::Left => Key::from_arrow(Arrow::Left),
        KeyCode::Char(c) => Key::from_byte(u8::try_from(c).ok().filter(u8::is_ascii)?),
        KeyCode::Enter => Key::Other(b'\r'),
        KeyCode::Tab => Key::Other(b'\t'),
        KeyCode::Backspace => Key::Other(0x7f),
        KeyCode::Esc => Key::Other(0x1b),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Option<Key> {
        game_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrows() {
        assert_eq!(press(KeyCode::Up), Some(Key::Rotate));
        assert_eq!(press(KeyCode::Down), Some(Key::SoftDrop));
        assert_eq!(press(KeyCode::Left), Some(Key::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(Key::MoveRight));
    }

    #[test]
    fn test_letters() {
        assert_eq!(press(KeyCode::Char('a')), Some(Key::MoveLeft));
        assert_eq!(press(KeyCode::Char('D')), Some(Key::MoveRight));
        assert_eq!(press(KeyCode::Char(' ')), Some(Key::HardDrop));
        assert_eq!(press(KeyCode::Char('R')), Some(Key::Restart));
        assert_eq!(press(KeyCode::Char('z')), Some(Key::Other(b'z')));
        assert_eq!(press(KeyCode::Char('é')), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(game_key(&event), Some(Key::Quit));
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(press(KeyCode::Enter), Some(Key::Other(b'\r')));
        assert_eq!(press(KeyCode::Esc), Some(Key::Other(0x1b)));
        assert_eq!(press(KeyCode::F(1)), None);
    }
}
