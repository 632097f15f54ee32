use indexmap::IndexMap;

use crate::{MachineSettings, ModelError, Outbox, StreamSheet};

/// A stream machine: the outbox plus the sheets that feed on it.
///
/// Lookups take `&self`; box and sheet state use interior locking, so a machine can be shared
/// across threads that evaluate different sheets at the same time.
#[derive(Debug, Default)]
pub struct Machine {
    settings: MachineSettings,
    outbox: Outbox,
    sheets: IndexMap<String, StreamSheet>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: MachineSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &MachineSettings {
        &self.settings
    }

    pub fn locale(&self) -> &str {
        self.settings.locale()
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Add a sheet named `name`. Sheet names are matched exactly.
    pub fn add_sheet(&mut self, name: impl Into<String>) -> Result<&StreamSheet, ModelError> {
        let sheet = StreamSheet::new(name)?;
        let name = sheet.name().to_string();
        if self.sheets.contains_key(&name) {
            return Err(ModelError::DuplicateSheet(name));
        }
        log::debug!("machine {:?}: add sheet {name}", self.settings.name);
        let entry = self.sheets.entry(name).or_insert(sheet);
        Ok(&*entry)
    }

    pub fn remove_sheet(&mut self, name: &str) -> Option<StreamSheet> {
        self.sheets.shift_remove(name)
    }

    pub fn get_stream_sheet_by_name(&self, name: &str) -> Option<&StreamSheet> {
        self.sheets.get(name)
    }

    /// Sheets in the order they were added.
    pub fn sheets(&self) -> impl Iterator<Item = &StreamSheet> {
        self.sheets.values()
    }
}
