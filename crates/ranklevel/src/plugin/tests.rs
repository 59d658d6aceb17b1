//! Tests for host wiring.

use super::*;
use ranklevel_core::ConfigurationError;
use ranklevel_test::{
    numeral_table, Note, NoteStore, RecordingProgress, RecordingUndo, ReferenceFixture,
    UndoEvent,
};

const SOURCE: &str = "Expression";
const DESTINATION: &str = "Heisig Level";

/// Minimal host that keeps whatever gets registered.
#[derive(Default)]
struct Editor {
    focus_hooks: Vec<FocusLostHook<Note>>,
    commands: Vec<(String, BatchCommand<NoteStore>)>,
}

impl EditorHooks<NoteStore> for Editor {
    fn add_focus_lost_hook(&mut self, hook: FocusLostHook<Note>) {
        self.focus_hooks.push(hook);
    }

    fn add_batch_command(&mut self, label: &str, command: BatchCommand<NoteStore>) {
        self.commands.push((label.to_string(), command));
    }
}

impl Editor {
    fn focus_lost(&mut self, note: &mut Note, field: &str) -> Vec<TriggerOutcome> {
        self.focus_hooks
            .iter_mut()
            .map(|hook| hook(&mut *note, field).unwrap())
            .collect()
    }
}

fn plugin() -> Arc<LevelPlugin> {
    Arc::new(LevelPlugin::with_table(LevelConfig::default(), numeral_table()).unwrap())
}

fn tagged(expression: &str, level: &str) -> Note {
    Note::new()
        .with_field(SOURCE, expression)
        .with_field(DESTINATION, level)
        .with_tag("heisig_levels")
}

#[test]
fn test_install_registers_hook_and_command() {
    let mut editor = Editor::default();
    plugin().install(&mut editor);

    assert_eq!(editor.focus_hooks.len(), 1);
    assert_eq!(editor.commands.len(), 1);
    assert_eq!(editor.commands[0].0, "Regenerate Heisig Levels");
}

#[test]
fn test_installed_hook_fills_empty_destination() {
    let mut editor = Editor::default();
    plugin().install(&mut editor);
    let mut note = tagged("六三", "");

    let outcomes = editor.focus_lost(&mut note, SOURCE);

    assert!(outcomes[0].is_written());
    assert_eq!(note.get(DESTINATION), Some("6"));
}

#[test]
fn test_installed_command_regenerates_in_one_undo_group() {
    let mut editor = Editor::default();
    plugin().install(&mut editor);
    let mut store = NoteStore::new()
        .with_note(1, tagged("九", "1"))
        .with_note(2, Note::new().with_field(SOURCE, "二").with_field(DESTINATION, ""));
    let mut progress = RecordingProgress::new();
    let mut undo = RecordingUndo::new();

    let (_, command) = &mut editor.commands[0];
    let report = command(BatchRequest {
        store: &mut store,
        ids: &[1, 2],
        progress: &mut progress,
        undo: &mut undo,
    })
    .unwrap();

    assert!(report.is_complete());
    assert_eq!(store.note(1).unwrap().get(DESTINATION), Some("9"));
    assert_eq!(store.note(2).unwrap().get(DESTINATION), Some("2"));
    assert_eq!(
        undo.events(),
        &[
            UndoEvent::Begin("Regenerate Heisig Levels".to_string()),
            UndoEvent::End("Regenerate Heisig Levels".to_string()),
        ]
    );
}

#[test]
fn test_new_loads_reference_file_lazily() {
    let fixture = ReferenceFixture::numerals();
    let config = LevelConfig::default().with_config_dir(fixture.config_dir());

    let plugin = LevelPlugin::new(config).unwrap();
    assert!(!plugin.shared_table().is_built());

    assert_eq!(plugin.level_of("一").unwrap(), 1);
    assert_eq!(plugin.level_of("四十").unwrap(), 10);
    assert_eq!(plugin.level_of("abc").unwrap(), 0);
    assert!(plugin.shared_table().is_built());
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = LevelConfig::default().with_marker_tag("");

    let err = LevelPlugin::new(config).unwrap_err();

    assert!(matches!(err, PluginError::Config(ConfigError::Invalid(_))));
}

#[test]
fn test_missing_reference_file_surfaces_on_use() {
    let fixture = ReferenceFixture::missing();
    let config = LevelConfig::default().with_reference_path(fixture.path());
    let plugin = LevelPlugin::new(config).unwrap();
    let mut note = tagged("一", "");

    let err = plugin.on_focus_lost(&mut note, SOURCE).unwrap_err();
    assert!(matches!(
        err,
        RankLevelError::Configuration(ConfigurationError::Missing { .. })
    ));
    assert!(matches!(
        plugin.rank_table(),
        Err(PluginError::Level(RankLevelError::Configuration(_)))
    ));
    assert_eq!(note.get(DESTINATION), Some(""));
}

#[test]
fn test_custom_command_label() {
    let mut config = LevelConfig::default();
    config.labels.command = "Recompute Levels".to_string();
    let plugin = Arc::new(LevelPlugin::with_table(config, numeral_table()).unwrap());
    let mut editor = Editor::default();

    plugin.install(&mut editor);

    assert_eq!(editor.commands[0].0, "Recompute Levels");
}
