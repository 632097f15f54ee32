use streamsheet_model::{Machine, StreamSheet, DEFAULT_LOCALE};

/// The sheet performing an evaluation, and the machine it belongs to.
///
/// A sheet that is not (yet) attached to a machine can still evaluate references into its own
/// inbox; anything that needs the machine resolves as "not found".
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub sheet: &'a StreamSheet,
    pub machine: Option<&'a Machine>,
}

impl<'a> EvalContext<'a> {
    pub fn new(machine: &'a Machine, sheet: &'a StreamSheet) -> Self {
        Self {
            sheet,
            machine: Some(machine),
        }
    }

    pub fn detached(sheet: &'a StreamSheet) -> Self {
        Self {
            sheet,
            machine: None,
        }
    }

    /// Locale for formatting callers: the machine's, or `"en"`.
    pub fn locale(&self) -> &'a str {
        self.machine.map_or(DEFAULT_LOCALE, Machine::locale)
    }

    /// Sheet named `name` in the machine. An absent or empty name, or the evaluating sheet's
    /// own name, selects the evaluating sheet.
    pub fn stream_sheet_by_name(&self, name: Option<&str>) -> Option<&'a StreamSheet> {
        match name.filter(|n| !n.is_empty()) {
            None => Some(self.sheet),
            Some(name) if name == self.sheet.name() => Some(self.sheet),
            Some(name) => self.machine?.get_stream_sheet_by_name(name),
        }
    }
}
