//! Autofill rule sets
//!
//! An [`AutofillRules`] pairs target fields with generator functions. On
//! apply, each rule whose target field is still empty has its generator
//! invoked; generators derive the value from the rest of the record and
//! write it back themselves, so an applied rule set never clobbers fields
//! the seller filled in by hand unless overwriting is asked for.

use crate::error::Result;
use crate::record::MultiSheetRow;

/// Access to the record behind a richer context type.
///
/// Generators run against a context (a product, say) that wraps the record
/// with extra state; the rule set itself only needs the record to check
/// whether a target field is filled.
pub trait RecordSource {
    /// The underlying record.
    fn record(&self) -> &MultiSheetRow;
    /// The underlying record, for writing.
    fn record_mut(&mut self) -> &mut MultiSheetRow;
}

impl RecordSource for MultiSheetRow {
    fn record(&self) -> &MultiSheetRow {
        self
    }

    fn record_mut(&mut self) -> &mut MultiSheetRow {
        self
    }
}

/// A field generator: derives one field from its context and writes it.
///
/// Generators decide for themselves whether there is anything to write; one
/// that finds its source fields empty simply leaves the target unset.
pub type Generator<C> = fn(&mut C) -> Result<()>;

struct Rule<C> {
    sheet: String,
    column: String,
    generate: Generator<C>,
}

/// An ordered list of (target field, generator) rules.
pub struct AutofillRules<C> {
    rules: Vec<Rule<C>>,
}

impl<C> Default for AutofillRules<C> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<C: RecordSource> AutofillRules<C> {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule targeting `column` of `sheet`.
    pub fn add(mut self, sheet: &str, column: &str, generate: Generator<C>) -> Self {
        self.rules.push(Rule {
            sheet: sheet.to_string(),
            column: column.to_string(),
            generate,
        });
        self
    }

    /// Run every rule whose target field is empty, in declaration order.
    ///
    /// With `overwrite`, every rule runs regardless of the target's current
    /// value. Filling is idempotent without `overwrite`: a second apply
    /// finds the targets filled and generates nothing.
    pub fn apply(&self, target: &mut C, overwrite: bool) -> Result<()> {
        for rule in &self.rules {
            let current = target.record().text(&rule.sheet, &rule.column)?;
            if !current.is_empty() && !overwrite {
                tracing::trace!("Field {}!{} is already filled", rule.sheet, rule.column);
                continue;
            }
            tracing::debug!("Generating {}!{}", rule.sheet, rule.column);
            (rule.generate)(target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sebo_grid::{Sheet, Spreadsheet};

    use super::*;
    use crate::error::Error;

    fn fixture() -> MultiSheetRow {
        let mut ss = Spreadsheet::new();
        let mut sheet = Sheet::new("Básico", 10, 4).unwrap();
        sheet.set_value("A1", "SKU").unwrap();
        sheet.set_value("B1", "Categoria").unwrap();
        sheet.set_value("C1", "Marcador").unwrap();
        sheet.set_value("A2", 1).unwrap();
        ss.add_sheet(sheet).unwrap();
        MultiSheetRow::open(&ss, 1, &["Básico"]).unwrap()
    }

    fn fill_categoria(record: &mut MultiSheetRow) -> Result<()> {
        record.set("Básico", "Categoria", "Romance")
    }

    fn mark(record: &mut MultiSheetRow) -> Result<()> {
        record.set("Básico", "Marcador", "executado")
    }

    fn noop(_record: &mut MultiSheetRow) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_apply_fills_empty_target() {
        let mut record = fixture();
        let rules = AutofillRules::new().add("Básico", "Categoria", fill_categoria);

        rules.apply(&mut record, false).unwrap();
        assert_eq!(record.text("Básico", "Categoria").unwrap(), "Romance");
    }

    #[test]
    fn test_apply_skips_filled_target() {
        let mut record = fixture();
        record.set("Básico", "Categoria", "Poesia").unwrap();

        // The generator marks another column, so an untouched marker shows
        // the rule never ran.
        let rules = AutofillRules::new().add("Básico", "Categoria", mark);
        rules.apply(&mut record, false).unwrap();
        assert_eq!(record.text("Básico", "Marcador").unwrap(), "");
        assert_eq!(record.text("Básico", "Categoria").unwrap(), "Poesia");
    }

    #[test]
    fn test_apply_overwrite_runs_all_rules() {
        let mut record = fixture();
        record.set("Básico", "Categoria", "Poesia").unwrap();

        let rules = AutofillRules::new().add("Básico", "Categoria", mark);
        rules.apply(&mut record, true).unwrap();
        assert_eq!(record.text("Básico", "Marcador").unwrap(), "executado");
    }

    #[test]
    fn test_generator_may_leave_target_unset() {
        let mut record = fixture();
        let rules = AutofillRules::new().add("Básico", "Categoria", noop);

        rules.apply(&mut record, false).unwrap();
        assert_eq!(record.text("Básico", "Categoria").unwrap(), "");
    }

    #[test]
    fn test_apply_unknown_target_column() {
        let mut record = fixture();
        let rules = AutofillRules::new().add("Básico", "Nada", noop);

        let err = rules.apply(&mut record, false).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
    }
}
