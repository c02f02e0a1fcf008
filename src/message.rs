//! Line rendering
//!
//! Builds the text lines the relay writes to clients: chat lines,
//! room notices, and the static help summary. Rendering happens in the
//! command layer; the router only delivers finished lines.

use chrono::Local;

use crate::types::RoomName;

/// Room notice variants (system-generated, distinct from chat lines)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Joined,
    Left,
    CreatedAndJoined,
}

impl Notice {
    fn verb(self) -> &'static str {
        match self {
            Notice::Joined => "joined",
            Notice::Left => "left",
            Notice::CreatedAndJoined => "created and joined",
        }
    }
}

/// Render a chat line: `[room] h:MMAM/PM name: text`
pub fn render_chat(room: &RoomName, name: &str, text: &str) -> String {
    render_chat_at(room, name, text, &clock_now())
}

/// Render a chat line with an explicit clock string
pub fn render_chat_at(room: &RoomName, name: &str, text: &str, clock: &str) -> String {
    format!("[{room}] {clock} {name}: {text}\n")
}

/// Render a room notice: `[room] Notice: "name" joined the chat room.`
pub fn render_notice(room: &RoomName, name: &str, notice: Notice) -> String {
    format!(
        "[{room}] Notice: \"{name}\" {} the chat room.\n",
        notice.verb()
    )
}

/// 12-hour local wall clock, e.g. `3:04PM`
fn clock_now() -> String {
    Local::now().format("%-I:%M%p").to_string()
}

/// Static command summary for `/help`
pub fn help_text() -> String {
    concat!(
        "/join [room_name] - Join a room\n",
        "/create [room_name] - Create a room\n",
        "/help - Show this help message\n",
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_chat_at() {
        let line = render_chat_at(&RoomName::new("x"), "Anonymous", "hi", "3:04PM");
        assert_eq!(line, "[x] 3:04PM Anonymous: hi\n");
    }

    #[test]
    fn test_render_chat_uses_wall_clock() {
        let line = render_chat(&RoomName::new("x"), "Anonymous", "hi");
        assert!(line.starts_with("[x] "));
        assert!(line.contains("AM") || line.contains("PM"));
        assert!(line.ends_with(" Anonymous: hi\n"));
    }

    #[test]
    fn test_render_notices() {
        let room = RoomName::new("lobby");
        assert_eq!(
            render_notice(&room, "Anonymous", Notice::Joined),
            "[lobby] Notice: \"Anonymous\" joined the chat room.\n"
        );
        assert_eq!(
            render_notice(&room, "Anonymous", Notice::Left),
            "[lobby] Notice: \"Anonymous\" left the chat room.\n"
        );
        assert_eq!(
            render_notice(&room, "Anonymous", Notice::CreatedAndJoined),
            "[lobby] Notice: \"Anonymous\" created and joined the chat room.\n"
        );
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        assert!(help.contains("/join"));
        assert!(help.contains("/create"));
        assert!(help.contains("/help"));
    }
}
