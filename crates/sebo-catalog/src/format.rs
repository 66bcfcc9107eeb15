//! Attribute formatting for listing descriptions
//!
//! An [`AttributeFormat`] is an ordered list of rules, each naming a column
//! to read from a product record and how to present its value. Formatting
//! renders every rule whose value is present as a `label: value` line and
//! joins the lines into a bulleted block. Products with sparse data simply
//! produce shorter blocks.

use crate::error::{Error, Result};
use crate::record::MultiSheetRow;
use crate::text;

/// A named transform applied to a value before it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Split a semicolon-delimited cell and re-join it as "a, b e c".
    Csv,
    /// Lowercase the first character.
    Uncapitalize,
    /// Drop a trailing period.
    TruncateSentence,
}

impl Transform {
    /// Look up a transform by the name rules refer to it by.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "csv" => Ok(Transform::Csv),
            "uncapitalize" => Ok(Transform::Uncapitalize),
            "truncateSentence" => Ok(Transform::TruncateSentence),
            other => Err(Error::UnknownTransform(other.to_string())),
        }
    }

    /// The name rules refer to this transform by.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Csv => "csv",
            Transform::Uncapitalize => "uncapitalize",
            Transform::TruncateSentence => "truncateSentence",
        }
    }

    /// Apply the transform to a rendered cell value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Transform::Csv => text::conjunction_list(&text::parse_csv(value)),
            Transform::Uncapitalize => text::uncapitalize(value),
            Transform::TruncateSentence => text::remove_suffix(value, ".").to_string(),
        }
    }
}

/// One formatting rule under construction.
///
/// Only the column is required; the label defaults to the column title and
/// the sheet and transform chain fall back to the formatter's defaults.
#[derive(Debug, Clone)]
pub struct Attribute {
    column: String,
    label: Option<String>,
    sheet: Option<String>,
    transforms: Option<Vec<String>>,
}

impl Attribute {
    /// A rule reading `column`, presented under the column's own title.
    pub fn new<S: Into<String>>(column: S) -> Self {
        Self {
            column: column.into(),
            label: None,
            sheet: None,
            transforms: None,
        }
    }

    /// Present the value under `label` instead of the column title.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Read the column from `sheet` instead of the formatter's default.
    pub fn with_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Append a named transform to this rule's chain.
    ///
    /// A rule with any transform of its own no longer inherits the
    /// formatter's default chain.
    pub fn with_transform<S: Into<String>>(mut self, name: S) -> Self {
        self.transforms
            .get_or_insert_with(Vec::new)
            .push(name.into());
        self
    }
}

/// A resolved rule; every field is concrete after [`AttributeFormat::add`].
#[derive(Debug, Clone)]
struct Rule {
    sheet: String,
    column: String,
    label: String,
    transforms: Vec<String>,
}

/// An ordered set of attribute rules rendered as one bulleted block.
#[derive(Debug, Clone, Default)]
pub struct AttributeFormat {
    default_sheet: Option<String>,
    default_transforms: Vec<String>,
    rules: Vec<Rule>,
}

impl AttributeFormat {
    /// An empty formatter with no defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `sheet` for every rule that does not name its own.
    pub fn with_default_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.default_sheet = Some(sheet.into());
        self
    }

    /// Use `names` as the transform chain of rules that have none.
    pub fn with_default_transforms(mut self, names: &[&str]) -> Self {
        self.default_transforms = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append a rule, resolving its defaults.
    ///
    /// Fails with [`Error::RuleWithoutSheet`] when neither the rule nor the
    /// formatter has a sheet to read from.
    pub fn add(&mut self, attr: Attribute) -> Result<()> {
        let sheet = attr
            .sheet
            .or_else(|| self.default_sheet.clone())
            .ok_or_else(|| Error::RuleWithoutSheet(attr.column.clone()))?;
        let label = attr.label.unwrap_or_else(|| attr.column.clone());
        let transforms = attr
            .transforms
            .unwrap_or_else(|| self.default_transforms.clone());
        self.rules.push(Rule {
            sheet,
            column: attr.column,
            label,
            transforms,
        });
        Ok(())
    }

    /// Render the record's attributes as a bulleted block.
    ///
    /// Rules whose value is empty (before or after its transforms) are
    /// skipped; an empty result means no rule had anything to show. Fails
    /// with [`Error::UnknownTransform`] if a rule's chain names a transform
    /// that does not exist.
    pub fn format(&self, record: &MultiSheetRow) -> Result<String> {
        let mut lines = Vec::new();
        for rule in &self.rules {
            let mut value = record.text(&rule.sheet, &rule.column)?;
            if value.is_empty() {
                continue;
            }
            for name in &rule.transforms {
                value = Transform::parse(name)?.apply(&value);
            }
            if value.is_empty() {
                continue;
            }
            lines.push(format!("{}: {}", rule.label, value));
        }
        Ok(text::bullet_list(&lines))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sebo_grid::{Sheet, Spreadsheet};

    use super::*;

    fn fixture() -> (Spreadsheet, MultiSheetRow) {
        let mut ss = Spreadsheet::new();
        let mut sheet = Sheet::new("Impressos", 10, 4).unwrap();
        sheet.set_value("A1", "SKU").unwrap();
        sheet.set_value("B1", "Idioma").unwrap();
        sheet.set_value("C1", "Participantes: Autores").unwrap();
        sheet.set_value("D1", "Sinopse").unwrap();
        sheet.set_value("A2", 1).unwrap();
        sheet.set_value("C2", "Ana;Bia; ...").unwrap();
        sheet.set_value("D2", "Um romance.").unwrap();
        ss.add_sheet(sheet).unwrap();

        let record = MultiSheetRow::open(&ss, 1, &["Impressos"]).unwrap();
        (ss, record)
    }

    #[test]
    fn test_transform_names() {
        for name in ["csv", "uncapitalize", "truncateSentence"] {
            assert_eq!(Transform::parse(name).unwrap().name(), name);
        }
        assert_eq!(
            Transform::parse("capitalize").unwrap_err(),
            Error::UnknownTransform("capitalize".into())
        );
    }

    #[test]
    fn test_transform_apply() {
        assert_eq!(Transform::Csv.apply("Ana;Bia; ..."), "Ana e Bia");
        assert_eq!(Transform::Uncapitalize.apply("Maçã"), "maçã");
        assert_eq!(Transform::TruncateSentence.apply("Um romance."), "Um romance");
    }

    #[test]
    fn test_add_resolves_defaults() {
        let mut fmt = AttributeFormat::new().with_default_sheet("Impressos");
        fmt.add(Attribute::new("Idioma")).unwrap();
        fmt.add(
            Attribute::new("Participantes: Autores")
                .with_label("Autores")
                .with_transform("csv"),
        )
        .unwrap();

        assert_eq!(fmt.rules[0].sheet, "Impressos");
        assert_eq!(fmt.rules[0].label, "Idioma");
        assert!(fmt.rules[0].transforms.is_empty());
        assert_eq!(fmt.rules[1].label, "Autores");
        assert_eq!(fmt.rules[1].transforms, vec!["csv"]);
    }

    #[test]
    fn test_add_without_sheet() {
        let mut fmt = AttributeFormat::new();
        assert_eq!(
            fmt.add(Attribute::new("Idioma")).unwrap_err(),
            Error::RuleWithoutSheet("Idioma".into())
        );

        // A rule carrying its own sheet needs no default
        fmt.add(Attribute::new("Idioma").with_sheet("Impressos"))
            .unwrap();
    }

    #[test]
    fn test_format_skips_empty_values() {
        let (_ss, record) = fixture();

        let mut fmt = AttributeFormat::new().with_default_sheet("Impressos");
        fmt.add(Attribute::new("Idioma")).unwrap();
        fmt.add(
            Attribute::new("Participantes: Autores")
                .with_label("Autores")
                .with_transform("csv"),
        )
        .unwrap();

        // Idioma is empty, so only the authors line renders
        assert_eq!(
            fmt.format(&record).unwrap(),
            "\u{2001}\u{2022} Autores: Ana e Bia."
        );
    }

    #[test]
    fn test_format_terminators() {
        let (_ss, record) = fixture();

        let mut fmt = AttributeFormat::new().with_default_sheet("Impressos");
        fmt.add(
            Attribute::new("Participantes: Autores")
                .with_label("Autores")
                .with_transform("csv"),
        )
        .unwrap();
        // truncateSentence keeps the value's own period from doubling up
        // with the block terminator.
        fmt.add(Attribute::new("Sinopse").with_transform("truncateSentence"))
            .unwrap();

        assert_eq!(
            fmt.format(&record).unwrap(),
            "\u{2001}\u{2022} Autores: Ana e Bia;\n\u{2001}\u{2022} Sinopse: Um romance."
        );
    }

    #[test]
    fn test_format_empty_when_nothing_renders() {
        let (_ss, record) = fixture();

        let mut fmt = AttributeFormat::new().with_default_sheet("Impressos");
        fmt.add(Attribute::new("Idioma")).unwrap();
        assert_eq!(fmt.format(&record).unwrap(), "");
    }

    #[test]
    fn test_format_unknown_transform_aborts() {
        let (_ss, record) = fixture();

        let mut fmt = AttributeFormat::new().with_default_sheet("Impressos");
        fmt.add(Attribute::new("Sinopse").with_transform("capitalize"))
            .unwrap();

        let err = fmt.format(&record).unwrap_err();
        assert_eq!(err, Error::UnknownTransform("capitalize".into()));
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_format_missing_column() {
        let (_ss, record) = fixture();

        let mut fmt = AttributeFormat::new().with_default_sheet("Impressos");
        fmt.add(Attribute::new("Nada")).unwrap();

        let err = fmt.format(&record).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
        assert!(err.is_data_error());
    }
}
