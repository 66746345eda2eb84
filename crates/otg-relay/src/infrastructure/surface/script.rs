//! Line-oriented host event scripts.
//!
//! The headless surface reads one event per line:
//!
//! ```text
//! # comment
//! key down LeftAlt
//! key repeat LeftAlt
//! key up LeftAlt
//! motion 10 -4
//! button down left
//! button up left
//! wheel 0 -1
//! expose
//! focus lost
//! focus gained
//! quit
//! ```
//!
//! Key names are the ones accepted by [`Keycode`]'s `FromStr`, including
//! raw usages such as `0x2C`.

use otg_core::{
    HostEvent, KeyEvent, Keycode, KeycodeError, MouseButton, MouseButtonEvent, MouseMotionEvent,
    MouseWheelEvent, WindowEvent,
};
use thiserror::Error;

/// Error returned for a line that does not describe an event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),
    #[error("expected \"down\" or \"up\", got {0:?}")]
    InvalidDirection(String),
    #[error("expected \"lost\" or \"gained\", got {0:?}")]
    InvalidFocus(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unknown mouse button {0:?}")]
    UnknownButton(String),
    #[error(transparent)]
    Key(#[from] KeycodeError),
}

/// Parses one script line.
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<HostEvent>, ScriptError> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let mut words = line.split_whitespace().peekable();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "key" => {
            let repeat = words.peek().is_some_and(|w| w.eq_ignore_ascii_case("repeat"));
            if repeat {
                words.next();
            }
            let pressed = repeat || direction(words.next())?;
            let name = words.next().ok_or(ScriptError::MissingArgument("key name"))?;
            let keycode = name.parse::<Keycode>()?;
            match (pressed, repeat) {
                (true, true) => HostEvent::KeyDown(KeyEvent::repeat(keycode)),
                (true, false) => HostEvent::KeyDown(KeyEvent::new(keycode)),
                (false, _) => HostEvent::KeyUp(KeyEvent::new(keycode)),
            }
        }
        "motion" => {
            let (dx, dy) = pair(&mut words)?;
            HostEvent::MouseMotion(MouseMotionEvent { dx, dy })
        }
        "button" => {
            let pressed = direction(words.next())?;
            let name = words.next().ok_or(ScriptError::MissingArgument("button name"))?;
            let event = MouseButtonEvent {
                button: button(name)?,
            };
            if pressed {
                HostEvent::MouseButtonDown(event)
            } else {
                HostEvent::MouseButtonUp(event)
            }
        }
        "wheel" => {
            let (dx, dy) = pair(&mut words)?;
            HostEvent::MouseWheel(MouseWheelEvent { dx, dy })
        }
        "expose" => HostEvent::Window(WindowEvent::Exposed),
        "focus" => match words.next() {
            Some(w) if w.eq_ignore_ascii_case("lost") => HostEvent::Window(WindowEvent::FocusLost),
            Some(w) if w.eq_ignore_ascii_case("gained") => {
                HostEvent::Window(WindowEvent::FocusGained)
            }
            Some(other) => return Err(ScriptError::InvalidFocus(other.to_string())),
            None => return Err(ScriptError::MissingArgument("focus state")),
        },
        "quit" => HostEvent::Quit,
        _ => return Err(ScriptError::UnknownCommand(command.to_string())),
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ScriptError::TrailingInput(rest.join(" ")));
    }
    Ok(Some(event))
}

fn direction(word: Option<&str>) -> Result<bool, ScriptError> {
    match word {
        Some(w) if w.eq_ignore_ascii_case("down") => Ok(true),
        Some(w) if w.eq_ignore_ascii_case("up") => Ok(false),
        Some(other) => Err(ScriptError::InvalidDirection(other.to_string())),
        None => Err(ScriptError::MissingArgument("direction")),
    }
}

fn number(word: Option<&str>) -> Result<i32, ScriptError> {
    let word = word.ok_or(ScriptError::MissingArgument("delta"))?;
    word.parse()
        .map_err(|_| ScriptError::InvalidNumber(word.to_string()))
}

fn pair<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(i32, i32), ScriptError> {
    let dx = number(words.next())?;
    let dy = number(words.next())?;
    Ok((dx, dy))
}

fn button(name: &str) -> Result<MouseButton, ScriptError> {
    match name.to_ascii_lowercase().as_str() {
        "left" => Ok(MouseButton::Left),
        "right" => Ok(MouseButton::Right),
        "middle" => Ok(MouseButton::Middle),
        "x1" => Ok(MouseButton::X1),
        "x2" => Ok(MouseButton::X2),
        _ => Err(ScriptError::UnknownButton(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# toggle capture"), Ok(None));
    }

    #[test]
    fn test_key_lines_parse_names_and_hex() {
        assert_eq!(
            parse_line("key down LeftAlt"),
            Ok(Some(HostEvent::KeyDown(KeyEvent::new(Keycode::LEFT_ALT))))
        );
        assert_eq!(
            parse_line("KEY UP 0x2C"),
            Ok(Some(HostEvent::KeyUp(KeyEvent::new(Keycode::SPACE))))
        );
        assert_eq!(
            parse_line("key repeat A"),
            Ok(Some(HostEvent::KeyDown(KeyEvent::repeat(Keycode::A))))
        );
    }

    #[test]
    fn test_pointer_lines_parse() {
        assert_eq!(
            parse_line("motion 10 -4  # drag"),
            Ok(Some(HostEvent::MouseMotion(MouseMotionEvent { dx: 10, dy: -4 })))
        );
        assert_eq!(
            parse_line("button up right"),
            Ok(Some(HostEvent::MouseButtonUp(MouseButtonEvent {
                button: MouseButton::Right
            })))
        );
        assert_eq!(
            parse_line("wheel 0 -1"),
            Ok(Some(HostEvent::MouseWheel(MouseWheelEvent { dx: 0, dy: -1 })))
        );
    }

    #[test]
    fn test_window_and_quit_lines_parse() {
        assert_eq!(parse_line("expose"), Ok(Some(HostEvent::Window(WindowEvent::Exposed))));
        assert_eq!(
            parse_line("focus lost"),
            Ok(Some(HostEvent::Window(WindowEvent::FocusLost)))
        );
        assert_eq!(parse_line("quit"), Ok(Some(HostEvent::Quit)));
    }

    #[test]
    fn test_malformed_lines_are_rejected() {
        assert_eq!(
            parse_line("jump 1 2"),
            Err(ScriptError::UnknownCommand("jump".to_string()))
        );
        assert_eq!(parse_line("key sideways A"), Err(ScriptError::InvalidDirection("sideways".to_string())));
        assert_eq!(parse_line("key down"), Err(ScriptError::MissingArgument("key name")));
        assert_eq!(parse_line("motion 1 x"), Err(ScriptError::InvalidNumber("x".to_string())));
        assert_eq!(parse_line("button down thumb"), Err(ScriptError::UnknownButton("thumb".to_string())));
        assert_eq!(parse_line("quit now"), Err(ScriptError::TrailingInput("now".to_string())));
        assert!(matches!(parse_line("key down NotAKey"), Err(ScriptError::Key(_))));
    }

    #[test]
    fn test_key_line_with_usage_wider_than_a_byte_is_rejected() {
        // Act
        let result = parse_line("key down 0x1E2");

        // Assert – never aliased to LeftAlt (0xE2)
        assert_eq!(
            result,
            Err(ScriptError::Key(KeycodeError::OutOfRange("0x1E2".to_string())))
        );
    }
}
