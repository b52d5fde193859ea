//! JSON-lines command protocol read from stdin.
//!
//! ```text
//! {"cmd": "pointer", "phase": "down", "x": 10.0, "y": 20.0, "time_ms": 0}
//! {"cmd": "typed", "text": "cal"}
//! {"cmd": "clear"}
//! {"cmd": "launch", "identifier": "org.gnome.Calculator"}
//! {"cmd": "snapshot"}
//! {"cmd": "quit"}
//! ```

use finder_ink::PointerEvent;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    Pointer(PointerEvent),
    Typed { text: String },
    Clear,
    Launch { identifier: String },
    Snapshot,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Request>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_ink::PointerPhase;

    #[test]
    fn test_parse_pointer() {
        let request =
            parse_line(r#"{"cmd": "pointer", "phase": "move", "x": 1.5, "y": 2.0, "time_ms": 40}"#)
                .unwrap()
                .unwrap();
        assert_eq!(
            request,
            Request::Pointer(PointerEvent::new(PointerPhase::Move, 1.5, 2.0, 40))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line(r#"{"cmd": "typed", "text": "cal"}"#).unwrap(),
            Some(Request::Typed {
                text: "cal".to_string()
            })
        );
        assert_eq!(parse_line(r#"{"cmd":"clear"}"#).unwrap(), Some(Request::Clear));
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        assert!(parse_line(r#"{"cmd": "draw"}"#).is_err());
        assert!(parse_line(
            r#"{"cmd": "pointer", "phase": "hover", "x": 0, "y": 0, "time_ms": 0}"#
        )
        .is_err());
    }
}
