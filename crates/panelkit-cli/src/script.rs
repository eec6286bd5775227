//! Scripted editing sessions.
//!
//! A script is a JSON array of steps, each either an input event or a command:
//!
//! ```json
//! [
//!   {"command": {"command": "toggle_draw_mode"}},
//!   {"event": {"type": "pointer_down", "position": {"x": 10.0, "y": 10.0}}},
//!   {"event": {"type": "pointer_up", "position": {"x": 200.0, "y": 150.0}}}
//! ]
//! ```

use crate::error::{CliError, Result};
use panelkit_core::{Command, EditorEvent, EditorSession};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    Event(EditorEvent),
    Command(Command),
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| CliError::Script {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Steps that changed the session.
    pub applied: usize,
}

pub fn replay(session: &mut EditorSession, steps: Vec<ScriptStep>) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for step in steps {
        summary.steps += 1;
        let changed = match step {
            ScriptStep::Event(event) => session.handle_event(event),
            ScriptStep::Command(command) => {
                log::debug!("Script: {}", command.description());
                session.execute(command)
            }
        };
        if changed {
            summary.applied += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_core::{Document, EditorConfig, Page, PageSize, PanelRect};

    #[test]
    fn replays_events_and_commands() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[
                {"command": {"command": "toggle_draw_mode"}},
                {"event": {"type": "pointer_down", "position": {"x": 10.0, "y": 10.0}}},
                {"event": {"type": "pointer_up", "position": {"x": 200.0, "y": 150.0}}},
                {"command": {"command": "move_panel_up", "index": 0}}
            ]"#,
        )
        .unwrap();

        let page = Page::new("001.jpg", PageSize::new(800, 600));
        let mut session = EditorSession::new(Document::new(vec![page]), EditorConfig::default());
        let summary = replay(&mut session, steps);

        assert_eq!(summary, ReplaySummary { steps: 4, applied: 3 });
        assert_eq!(session.panels(), &[PanelRect::new(10, 10, 190, 140)]);
    }

    #[test]
    fn rejects_unknown_steps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"teleport": {}}]"#).unwrap();
        assert!(matches!(load_script(&path), Err(CliError::Script { .. })));
    }
}
