//! Command: editor operations wrapped as objects so they can be triggered
//! from any UI element, kept in a history and undone.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

/// Receiver: every command ends up calling these. Selection bounds are in
/// characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    text: String,
    selection: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    text: String,
    selection: Range<usize>,
}

impl Editor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: 0..0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    fn byte_range(&self) -> Range<usize> {
        self.byte_offset(self.selection.start)..self.byte_offset(self.selection.end)
    }

    /// Out-of-range bounds are clamped; reversed bounds are swapped.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_count();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = start.min(len)..end.min(len);
    }

    pub fn select_end(&mut self) {
        let len = self.char_count();
        self.selection = len..len;
    }

    pub fn selection(&self) -> &str {
        &self.text[self.byte_range()]
    }

    pub fn delete_selection(&mut self) {
        self.replace_selection("");
    }

    /// Replaces the selection and leaves the cursor after the inserted text.
    pub fn replace_selection(&mut self, text: &str) {
        let range = self.byte_range();
        self.text.replace_range(range, text);
        let cursor = self.selection.start + text.chars().count();
        self.selection = cursor..cursor;
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            text: self.text.clone(),
            selection: self.selection.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: EditorSnapshot) {
        self.text = snapshot.text;
        self.selection = snapshot.selection;
    }
}

pub trait Command: Send {
    fn name(&self) -> &'static str;

    /// Returns `true` when the editor changed and the command belongs in the history.
    fn execute(&mut self, app: &mut Application) -> bool;

    fn undo(&mut self, app: &mut Application);
}

/// Editor index plus the state saved right before the command changed it.
#[derive(Debug)]
struct CommandTarget {
    editor: usize,
    backup: Option<EditorSnapshot>,
}

impl CommandTarget {
    fn new(editor: usize) -> Self {
        Self {
            editor,
            backup: None,
        }
    }

    fn save_backup(&mut self, app: &Application) {
        self.backup = app.editors.get(self.editor).map(Editor::snapshot);
    }

    fn restore(&mut self, app: &mut Application) {
        if let (Some(backup), Some(editor)) = (self.backup.take(), app.editors.get_mut(self.editor)) {
            editor.restore(backup);
        }
    }
}

/// Doesn't change the editor, so it never lands in the history.
pub struct CopyCommand {
    target: CommandTarget,
}

impl CopyCommand {
    pub fn new(editor: usize) -> Self {
        Self {
            target: CommandTarget::new(editor),
        }
    }
}

impl Command for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        if let Some(editor) = app.editors.get(self.target.editor) {
            app.clipboard = editor.selection().to_string();
        }
        false
    }

    fn undo(&mut self, _app: &mut Application) {}
}

pub struct CutCommand {
    target: CommandTarget,
}

impl CutCommand {
    pub fn new(editor: usize) -> Self {
        Self {
            target: CommandTarget::new(editor),
        }
    }
}

impl Command for CutCommand {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        self.target.save_backup(app);
        match app.editors.get_mut(self.target.editor) {
            Some(editor) => {
                app.clipboard = editor.selection().to_string();
                editor.delete_selection();
                true
            }
            None => false,
        }
    }

    fn undo(&mut self, app: &mut Application) {
        self.target.restore(app);
    }
}

pub struct PasteCommand {
    target: CommandTarget,
}

impl PasteCommand {
    pub fn new(editor: usize) -> Self {
        Self {
            target: CommandTarget::new(editor),
        }
    }
}

impl Command for PasteCommand {
    fn name(&self) -> &'static str {
        "paste"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        self.target.save_backup(app);
        match app.editors.get_mut(self.target.editor) {
            Some(editor) => {
                editor.replace_selection(&app.clipboard);
                true
            }
            None => false,
        }
    }

    fn undo(&mut self, app: &mut Application) {
        self.target.restore(app);
    }
}

/// Undoes the most recent command in the history.
pub struct UndoCommand;

impl Command for UndoCommand {
    fn name(&self) -> &'static str {
        "undo"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        app.undo();
        false
    }

    fn undo(&mut self, _app: &mut Application) {}
}

/// Last in, first out.
#[derive(Default)]
pub struct CommandHistory {
    commands: Vec<Box<dyn Command>>,
}

impl CommandHistory {
    pub fn push(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Command>> {
        self.commands.pop()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Copy,
    Cut,
    Paste,
    Undo,
}

impl FromStr for UiAction {
    type Err = CatalogError;

    /// Parses keyboard shortcuts such as `Ctrl+C`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ctrl+c" => Ok(UiAction::Copy),
            "ctrl+x" => Ok(UiAction::Cut),
            "ctrl+v" => Ok(UiAction::Paste),
            "ctrl+z" => Ok(UiAction::Undo),
            other => Err(CatalogError::InvalidConfigValueError {
                field: "shortcut".to_string(),
                value: other.to_string(),
                reason: "Expected Ctrl+C, Ctrl+X, Ctrl+V or Ctrl+Z".to_string(),
            }),
        }
    }
}

/// Sender: owns the editors and the history, and turns UI actions into commands.
#[derive(Default)]
pub struct Application {
    pub clipboard: String,
    pub editors: Vec<Editor>,
    pub active_editor: usize,
    pub history: CommandHistory,
}

impl Application {
    pub fn new(editors: Vec<Editor>) -> Self {
        Self {
            editors,
            ..Self::default()
        }
    }

    pub fn active_editor(&self) -> Option<&Editor> {
        self.editors.get(self.active_editor)
    }

    pub fn active_editor_mut(&mut self) -> Option<&mut Editor> {
        self.editors.get_mut(self.active_editor)
    }

    pub fn trigger(&mut self, action: UiAction) {
        let editor = self.active_editor;
        let command: Box<dyn Command> = match action {
            UiAction::Copy => Box::new(CopyCommand::new(editor)),
            UiAction::Cut => Box::new(CutCommand::new(editor)),
            UiAction::Paste => Box::new(PasteCommand::new(editor)),
            UiAction::Undo => Box::new(UndoCommand),
        };
        self.execute_command(command);
    }

    /// Only commands that changed an editor are kept for undo.
    pub fn execute_command(&mut self, mut command: Box<dyn Command>) {
        if command.execute(self) {
            tracing::debug!("Command '{}' added to history", command.name());
            self.history.push(command);
        }
    }

    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(mut command) => {
                command.undo(self);
                true
            }
            None => false,
        }
    }
}

fn describe(app: &Application, shortcut: &str) -> String {
    format!(
        "{:<7} editor: '{}' | clipboard: '{}' | history: {}",
        shortcut,
        app.active_editor().map(Editor::text).unwrap_or_default(),
        app.clipboard,
        app.history.len()
    )
}

pub fn client_code(console: &dyn Console) -> Result<String> {
    let mut app = Application::new(vec![Editor::new("Hello, world")]);
    console.write_line(&describe(&app, "start"));

    let script: [(&str, Option<(usize, usize)>); 6] = [
        ("Ctrl+C", Some((0, 5))),
        ("Ctrl+V", Some((12, 12))),
        ("Ctrl+Z", None),
        ("Ctrl+X", Some((5, 12))),
        ("Ctrl+Z", None),
        ("Ctrl+Z", None),
    ];

    for (shortcut, selection) in script {
        if let (Some((start, end)), Some(editor)) = (selection, app.active_editor_mut()) {
            editor.select(start, end);
        }
        app.trigger(shortcut.parse()?);
        console.write_line(&describe(&app, shortcut));
    }

    app.active_editor()
        .map(|editor| editor.text().to_string())
        .ok_or_else(|| CatalogError::DemoError {
            demo: "command".to_string(),
            message: "no active editor".to_string(),
        })
}

pub struct CommandDemo;

#[async_trait]
impl Demo for CommandDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "command",
            title: "Command",
            category: PatternCategory::Behavioral,
            summary: "Turns a request into a stand-alone object that can be queued and undone",
            complexity: 1,
            popularity: 3,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        client_code(console.as_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    fn app_with(text: &str) -> Application {
        Application::new(vec![Editor::new(text)])
    }

    #[test]
    fn test_editor_selection_is_char_based() {
        let mut editor = Editor::new("héllo wörld");
        editor.select(6, 11);
        assert_eq!(editor.selection(), "wörld");
        editor.replace_selection("there");
        assert_eq!(editor.text(), "héllo there");
    }

    #[test]
    fn test_select_clamps_and_orders_bounds() {
        let mut editor = Editor::new("abc");
        editor.select(10, 1);
        assert_eq!(editor.selection(), "bc");
    }

    #[test]
    fn test_copy_is_not_recorded() {
        let mut app = app_with("Hello");
        app.active_editor_mut().unwrap().select(0, 5);
        app.trigger(UiAction::Copy);

        assert_eq!(app.clipboard, "Hello");
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_cut_then_undo_restores_text() {
        let mut app = app_with("Hello, world");
        app.active_editor_mut().unwrap().select(5, 12);
        app.trigger(UiAction::Cut);

        assert_eq!(app.active_editor().unwrap().text(), "Hello");
        assert_eq!(app.clipboard, ", world");
        assert_eq!(app.history.len(), 1);

        assert!(app.undo());
        assert_eq!(app.active_editor().unwrap().text(), "Hello, world");
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_undo_command_pops_latest_paste() {
        let mut app = app_with("ab");
        app.clipboard = "X".to_string();
        app.active_editor_mut().unwrap().select_end();
        app.trigger(UiAction::Paste);
        app.trigger(UiAction::Paste);
        assert_eq!(app.active_editor().unwrap().text(), "abXX");

        app.trigger("Ctrl+Z".parse().unwrap());
        assert_eq!(app.active_editor().unwrap().text(), "abX");
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut app = app_with("text");
        assert!(!app.undo());
        app.trigger(UiAction::Undo);
        assert_eq!(app.active_editor().unwrap().text(), "text");
    }

    #[test]
    fn test_unknown_shortcut() {
        assert!("Ctrl+Q".parse::<UiAction>().is_err());
    }

    #[test]
    fn test_client_code_returns_to_original_text() {
        let console = BufferConsole::new();
        let final_text = client_code(&console).unwrap();
        assert_eq!(final_text, "Hello, world");
        assert_eq!(console.lines().len(), 7);
        assert!(console.lines()[2].contains("'Hello, worldHello'"));
    }
}
