//! Wiring of the level policies into a host editor.
//!
//! The host implements [`EditorHooks`] and hands it to
//! [`LevelPlugin::install`], which registers the edit trigger as a
//! focus-lost hook and the bulk regenerator as a batch command.

use std::fmt;
use std::sync::Arc;

use ranklevel_config::{ConfigError, LevelConfig};
use ranklevel_core::{
    LevelCalculator, ProgressReporter, Rank, RankLevelError, RankTable, Record, RecordStore,
    Result, SharedRankTable, UndoJournal,
};
use ranklevel_engine::{BatchReport, BulkRegenerator, EditTrigger, NeverTerminate, TriggerOutcome};
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while setting up or querying a [`LevelPlugin`].
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Level(#[from] RankLevelError),
}

/// Hook invoked by the host when a field loses focus.
pub type FocusLostHook<R> = Box<dyn FnMut(&mut R, &str) -> Result<TriggerOutcome> + Send>;

/// Batch command invoked by the host on a selection of records.
pub type BatchCommand<S> = Box<
    dyn FnMut(BatchRequest<'_, S>) -> Result<BatchReport<<S as RecordStore>::Id>> + Send,
>;

/// Everything a batch command borrows from the host for one run.
pub struct BatchRequest<'a, S: RecordStore + ?Sized> {
    pub store: &'a mut S,
    pub ids: &'a [S::Id],
    pub progress: &'a mut dyn ProgressReporter,
    pub undo: &'a mut dyn UndoJournal,
}

impl<S: RecordStore + ?Sized> fmt::Debug for BatchRequest<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchRequest")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

/// Host editor event registration.
pub trait EditorHooks<S: RecordStore> {
    /// Registers a hook run whenever a field of a record loses focus.
    fn add_focus_lost_hook(&mut self, hook: FocusLostHook<S::Record>);

    /// Registers a menu command operating on the selected records.
    fn add_batch_command(&mut self, label: &str, command: BatchCommand<S>);
}

/// Level computation bound to one configuration and one rank table.
///
/// # Example
///
/// ```
/// use ranklevel::prelude::*;
/// use ranklevel_test::Note;
///
/// let table = RankTable::from_sequence(["一", "二", "三"]);
/// let plugin = LevelPlugin::with_table(LevelConfig::default(), table).unwrap();
///
/// let mut note = Note::new()
///     .with_field("Expression", "三一")
///     .with_field("Heisig Level", "")
///     .with_tag("heisig_levels");
/// plugin.on_focus_lost(&mut note, "Expression").unwrap();
/// assert_eq!(note.get("Heisig Level"), Some("3"));
/// ```
#[derive(Debug)]
pub struct LevelPlugin {
    config: LevelConfig,
    table: Arc<SharedRankTable>,
    trigger: EditTrigger,
    regenerator: BulkRegenerator,
}

impl LevelPlugin {
    /// Creates a plugin that loads its rank table lazily from the
    /// configured reference file.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Config`] if `config` fails validation. A
    /// missing reference file is reported on first use, not here.
    pub fn new(config: LevelConfig) -> std::result::Result<Self, PluginError> {
        config.validate()?;
        let source = config.reference_source()?;
        Ok(Self::assemble(config, Arc::new(SharedRankTable::new(source))))
    }

    /// Creates a plugin around an already built rank table.
    pub fn with_table(
        config: LevelConfig,
        table: RankTable,
    ) -> std::result::Result<Self, PluginError> {
        config.validate()?;
        Ok(Self::assemble(config, Arc::new(SharedRankTable::preloaded(table))))
    }

    fn assemble(config: LevelConfig, table: Arc<SharedRankTable>) -> Self {
        let trigger = EditTrigger::from_config(Arc::clone(&table), &config);
        let regenerator = BulkRegenerator::from_config(Arc::clone(&table), &config);
        Self {
            config,
            table,
            trigger,
            regenerator,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn shared_table(&self) -> &Arc<SharedRankTable> {
        &self.table
    }

    /// Returns the rank table, loading it on first call.
    pub fn rank_table(&self) -> std::result::Result<&RankTable, PluginError> {
        self.table
            .get()
            .map_err(|err| PluginError::Level(RankLevelError::from(err)))
    }

    /// Level of `text` under the plugin's rank table.
    pub fn level_of(&self, text: &str) -> std::result::Result<Rank, PluginError> {
        Ok(LevelCalculator::new(self.rank_table()?).level_of(text))
    }

    /// Runs the edit trigger for `field` on `record`.
    pub fn on_focus_lost<R>(&self, record: &mut R, field: &str) -> Result<TriggerOutcome>
    where
        R: Record + ?Sized,
    {
        self.trigger
            .on_focus_lost(record, field)
            .inspect_err(|err| error!(event = "trigger_failed", field = %field, error = %err))
    }

    /// Regenerates every record of `request` inside one undo group labelled
    /// with the configured command label.
    pub fn regenerate<S>(&self, request: BatchRequest<'_, S>) -> Result<BatchReport<S::Id>>
    where
        S: RecordStore + ?Sized,
    {
        let BatchRequest {
            store,
            ids,
            progress,
            undo,
        } = request;
        self.regenerator
            .regenerate_in_undo_group(
                store,
                ids,
                progress,
                undo,
                &self.config.labels.command,
                &NeverTerminate,
            )
            .inspect_err(|err| error!(event = "regenerate_failed", error = %err))
    }

    /// Registers the focus-lost hook and the regenerate command with `hooks`.
    pub fn install<S, H>(self: &Arc<Self>, hooks: &mut H)
    where
        S: RecordStore + 'static,
        H: EditorHooks<S> + ?Sized,
    {
        hooks.add_focus_lost_hook(Self::focus_lost_hook::<S>(Arc::clone(self)));
        hooks.add_batch_command(
            &self.config.labels.command,
            Self::batch_command::<S>(Arc::clone(self)),
        );

        info!(
            event = "plugin_installed",
            marker_tag = %self.config.marker_tag,
            command = %self.config.labels.command,
        );
    }

    fn focus_lost_hook<S>(plugin: Arc<Self>) -> FocusLostHook<S::Record>
    where
        S: RecordStore + 'static,
    {
        Box::new(move |record: &mut S::Record, field: &str| plugin.on_focus_lost(record, field))
    }

    fn batch_command<S>(plugin: Arc<Self>) -> BatchCommand<S>
    where
        S: RecordStore + 'static,
    {
        Box::new(move |request: BatchRequest<'_, S>| plugin.regenerate(request))
    }
}

#[cfg(test)]
mod tests;
