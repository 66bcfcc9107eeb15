//! Products and their autofill
//!
//! A product is one [`MultiSheetRow`] spanning the catalog's sheets, keyed
//! by SKU. Opening a product resolves what kind of product it is (from its
//! declared type, or guessed from the sheet being worked on) and autofill
//! derives the cross-listing fields a seller would otherwise have to paste
//! together by hand: the price-reference URL, the category, the barcode and
//! the Shopee listing title and description.

use std::collections::HashMap;
use std::fmt;

use sebo_grid::{CellValue, Spreadsheet};

use crate::autofill::{AutofillRules, RecordSource};
use crate::error::{Error, Result};
use crate::format::{Attribute, AttributeFormat};
use crate::record::{two_column_map, MultiSheetRow};
use crate::text;

// === Catalog layout ===

/// Sheet with one row per product, shared by every kind of product.
pub const SHEET_BASIC: &str = "Básico";
/// Sheet with the printed-matter attributes.
pub const SHEET_PRINTED: &str = "Impressos";
/// Sheet with the Shopee cross-listing fields.
pub const SHEET_SHOPEE: &str = "Shopee";
/// Sheets a product record spans, in save order.
pub const PRODUCT_SHEETS: [&str; 3] = [SHEET_BASIC, SHEET_PRINTED, SHEET_SHOPEE];
/// Named range holding the boilerplate parts of the listing description.
pub const DESCRIPTION_PARTS_RANGE: &str = "DescriçãoShopeePartes";

/// Search URL the reference field points at.
const REFERENCE_SEARCH_URL: &str = "https://www.estantevirtual.com.br/busca?q=";
/// Language left out of listing titles.
const DEFAULT_LANGUAGE: &str = "Português";

/// A product's numeric identity, shared by its row on every sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sku(pub u32);

impl Sku {
    /// Parse a rendered first-column cell.
    ///
    /// `row_no` identifies the row in the [`Error::InvalidIdentity`] raised
    /// when the cell does not hold a whole number.
    pub fn parse(text: &str, row_no: u32) -> Result<Self> {
        text.trim()
            .parse()
            .map(Sku)
            .map_err(|_| Error::InvalidIdentity(row_no))
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Sku> for CellValue {
    fn from(sku: Sku) -> Self {
        CellValue::Number(sku.0 as f64)
    }
}

/// The kind of product a record holds, which decides its autofill rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Printed matter: books, magazines, comics and course booklets.
    Printed,
}

impl ProductKind {
    /// The kind behind a declared type value, if it is a supported one.
    pub fn from_declared(declared: &str) -> Option<Self> {
        match declared {
            "Livro" | "Revista" | "Gibi" | "Apostila" => Some(ProductKind::Printed),
            _ => None,
        }
    }

    /// The kind being worked on when `sheet` is the active sheet.
    pub fn from_sheet(sheet: &str) -> Option<Self> {
        (sheet == SHEET_PRINTED).then_some(ProductKind::Printed)
    }

    /// The declared type written back when the kind had to be guessed.
    pub fn default_declared(self) -> &'static str {
        match self {
            ProductKind::Printed => "Livro",
        }
    }

    /// The autofill rules for this kind of product.
    fn rules(self) -> AutofillRules<Product> {
        match self {
            ProductKind::Printed => AutofillRules::new()
                .add(SHEET_BASIC, "Referência", Product::fill_reference)
                .add(SHEET_BASIC, "Categoria", Product::fill_category)
                .add(SHEET_BASIC, "Cód. de barras (GTIN)", Product::fill_barcode)
                .add(SHEET_BASIC, "Cadastrado em", Product::fill_registered_on)
                .add(SHEET_SHOPEE, "Título", Product::fill_listing_title)
                .add(SHEET_SHOPEE, "Descrição", Product::fill_listing_description),
        }
    }
}

/// One product's record plus the context its fields are derived from.
#[derive(Debug, Clone)]
pub struct Product {
    sku: Sku,
    kind: ProductKind,
    record: MultiSheetRow,
    /// Boilerplate description parts, from [`DESCRIPTION_PARTS_RANGE`].
    parts: HashMap<String, String>,
}

impl Product {
    /// Open the product `sku`, resolving its kind.
    ///
    /// If the declared type field is empty, the kind is guessed from the
    /// active sheet and the guess written back to the record (in cache, like
    /// every write; [`save`](Self::save) flushes it). Fails with
    /// [`Error::TypeUndetermined`] when there is nothing to guess from, and
    /// with [`Error::TypeUnsupported`] when the declared type is not a
    /// printed one.
    pub fn open(ss: &Spreadsheet, sku: Sku) -> Result<Self> {
        let mut record = MultiSheetRow::open(ss, sku, &PRODUCT_SHEETS)?;
        let kind = Self::resolve_kind(ss, sku, &mut record)?;
        let parts = two_column_map(ss, DESCRIPTION_PARTS_RANGE)?;
        Ok(Self {
            sku,
            kind,
            record,
            parts,
        })
    }

    fn resolve_kind(
        ss: &Spreadsheet,
        sku: Sku,
        record: &mut MultiSheetRow,
    ) -> Result<ProductKind> {
        let declared = record.text(SHEET_PRINTED, "Tipo")?;
        if declared.is_empty() {
            let kind = ss
                .active_sheet()
                .and_then(|sheet| ProductKind::from_sheet(sheet.name()))
                .ok_or(Error::TypeUndetermined(sku.0))?;
            record.set(SHEET_PRINTED, "Tipo", kind.default_declared())?;
            tracing::debug!(
                "Guessed type {:?} for product {}",
                kind.default_declared(),
                sku
            );
            return Ok(kind);
        }
        ProductKind::from_declared(&declared).ok_or(Error::TypeUnsupported {
            sku: sku.0,
            declared,
        })
    }

    /// The product's SKU
    pub fn sku(&self) -> Sku {
        self.sku
    }

    /// The product's resolved kind
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Fill the derived fields that are empty; with `overwrite`, all of them.
    ///
    /// The record only changes in memory until [`save`](Self::save).
    pub fn autofill(&mut self, overwrite: bool) -> Result<()> {
        self.kind.rules().apply(self, overwrite)
    }

    /// Flush the record's rows back to the grid.
    pub fn save(&mut self, ss: &mut Spreadsheet) -> Result<()> {
        self.record.save(ss)
    }

    // === Field generators ===

    /// Reference: a search for the title (and first author) on the
    /// used-book marketplace the shop checks prices against.
    fn fill_reference(&mut self) -> Result<()> {
        let title = self.record.text(SHEET_PRINTED, "Título: Como na capa")?;
        if title.is_empty() {
            return Ok(());
        }
        let mut query = text::truncate_chars(&title, 40).to_string();
        if let Some(author) = self.csv(SHEET_PRINTED, "Participantes: Autores")?.first() {
            query.push(' ');
            query.push_str(author);
        }
        let url = format!("{}{}", REFERENCE_SEARCH_URL, urlencoding::encode(&query));
        self.record.set(SHEET_BASIC, "Referência", url)
    }

    /// Category: the first segment of the classification field.
    fn fill_category(&mut self) -> Result<()> {
        match self.csv(SHEET_PRINTED, "Classificação")?.into_iter().next() {
            Some(category) => self.record.set(SHEET_BASIC, "Categoria", category),
            None => Ok(()),
        }
    }

    /// Barcode: printed matter carries its ISBN-13 as GTIN.
    fn fill_barcode(&mut self) -> Result<()> {
        let isbn = self.record.get(SHEET_PRINTED, "ISBN-13")?.clone();
        if isbn.is_empty() {
            return Ok(());
        }
        self.record.set(SHEET_BASIC, "Cód. de barras (GTIN)", isbn)
    }

    /// Registration date: today, date only.
    fn fill_registered_on(&mut self) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        self.record.set(SHEET_BASIC, "Cadastrado em", today)
    }

    /// Listing title: type, title, authors, edition and language, in the
    /// phrasing buyers search for ("Livro Dom Casmurro de Machado de Assis
    /// 2ª edição").
    fn fill_listing_title(&mut self) -> Result<()> {
        let mut parts = Vec::new();

        let declared = self.record.text(SHEET_PRINTED, "Tipo")?;
        if !declared.is_empty() {
            parts.push(declared);
        }
        let title = self.record.text(SHEET_PRINTED, "Título: Como na capa")?;
        if !title.is_empty() {
            parts.push(title);
        }

        let authors = self.csv(SHEET_PRINTED, "Participantes: Autores")?;
        if !authors.is_empty() {
            parts.push(format!("de {}", text::conjunction_list(&authors)));
        }

        let edition = self.record.text(SHEET_PRINTED, "Edição: N.º")?;
        if !edition.is_empty() {
            parts.push(format!("{}ª edição", edition));
        }

        let language = self.record.text(SHEET_PRINTED, "Idioma")?;
        if !language.is_empty() && language != DEFAULT_LANGUAGE {
            parts.push(format!("em {}", language));
        }

        self.record.set(SHEET_SHOPEE, "Título", parts.join(" "))
    }

    /// Listing description: boilerplate, condition, attributes, extra
    /// details and synopsis, with empty parts dropped.
    fn fill_listing_description(&mut self) -> Result<()> {
        let parts = [
            self.part("Condição"),
            self.condition_block()?,
            self.misc_attributes()?,
            self.record.text(SHEET_PRINTED, "Outros detalhes")?,
            self.part("Chat"),
            self.part("Fotos"),
            self.synopsis_block()?,
        ];
        let description = parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.record.set(SHEET_SHOPEE, "Descrição", description)
    }

    /// A boilerplate part of the description, by key. Missing keys render
    /// as nothing, so the catalog can drop parts it no longer wants.
    fn part(&self, key: &str) -> String {
        self.parts.get(key).cloned().unwrap_or_default()
    }

    /// The condition part: bulleted condition attributes under a header
    /// line when any are filled, plus the free-text condition notes. With
    /// no bullets the notes stand alone as a single sentence.
    fn condition_block(&self) -> Result<String> {
        let mut fmt = AttributeFormat::new().with_default_sheet(SHEET_PRINTED);
        for label in ["Grifos", "Anotações", "Manchas", "Sujeira", "Machucados"] {
            fmt.add(Attribute::new(format!("Condição: {}", label)).with_label(label))?;
        }
        let attrs = fmt.format(&self.record)?;
        let notes = self.record.text(SHEET_PRINTED, "Condição: Outros detalhes")?;

        Ok(match (attrs.is_empty(), notes.is_empty()) {
            (true, true) => String::new(),
            (true, false) => {
                format!("Descrição da condição: {}", text::uncapitalize(&notes))
            }
            (false, true) => format!("Atributos da condição:\n{}", attrs),
            (false, false) => format!(
                "Atributos da condição:\n{}\n\nDescrição da condição: {}",
                attrs, notes
            ),
        })
    }

    /// The "other details" block: every printed-matter attribute worth
    /// showing, in catalog order.
    fn misc_attributes(&self) -> Result<String> {
        let mut fmt = AttributeFormat::new().with_default_sheet(SHEET_PRINTED);
        fmt.add(
            Attribute::new("Participantes: Autores")
                .with_label("Autores")
                .with_transform("csv"),
        )?;
        fmt.add(
            Attribute::new("Participantes: Tradutores")
                .with_label("Tradutores")
                .with_transform("csv"),
        )?;
        fmt.add(
            Attribute::new("Participantes: Editores")
                .with_label("Editores")
                .with_transform("csv"),
        )?;
        fmt.add(
            Attribute::new("Participantes: Organizadores")
                .with_label("Organizadores")
                .with_transform("csv"),
        )?;
        fmt.add(Attribute::new("Título: Secundário (subtítulo)").with_label("Subtítulo"))?;
        fmt.add(
            Attribute::new("Título: Original (da obra traduzida)").with_label("Título original"),
        )?;
        fmt.add(Attribute::new("Título: Do volume").with_label("Título do volume"))?;
        fmt.add(Attribute::new("Idioma"))?;
        fmt.add(Attribute::new("Editora"))?;
        fmt.add(Attribute::new("Edição: Ano"))?;
        fmt.add(Attribute::new("Edição: N.º"))?;
        fmt.add(Attribute::new("Edição: Nome"))?;
        fmt.add(Attribute::new("N.º da reimpressão"))?;
        fmt.add(Attribute::new("Coleção"))?;
        fmt.add(Attribute::new("N.º do volume"))?;
        fmt.add(Attribute::new("N.º do tomo"))?;
        fmt.add(Attribute::new("ISBN-10"))?;
        fmt.add(Attribute::new("ISBN-13"))?;
        fmt.add(Attribute::new("ISSN"))?;
        fmt.add(Attribute::new("N.º de páginas"))?;
        fmt.add(Attribute::new("Tipo de capa"))?;
        fmt.add(Attribute::new("Altura (cm)"))?;
        fmt.add(Attribute::new("Largura (cm)"))?;
        fmt.add(Attribute::new("Peso (g)"))?;
        fmt.format(&self.record)
    }

    /// The synopsis part, with its source cited when one is on file.
    fn synopsis_block(&self) -> Result<String> {
        let synopsis = self.record.text(SHEET_PRINTED, "Sinopse")?;
        if synopsis.is_empty() {
            return Ok(String::new());
        }
        let source = self.record.text(SHEET_PRINTED, "Sinopse: Fonte")?;
        if source.is_empty() {
            return Ok(format!("Sinopse: {}", synopsis));
        }
        Ok(format!(
            "Sinopse: {}\n\nFonte da sinopse: {}",
            synopsis, source
        ))
    }

    /// A semicolon-delimited column as a list.
    fn csv(&self, sheet: &str, column: &str) -> Result<Vec<String>> {
        Ok(text::parse_csv(&self.record.text(sheet, column)?))
    }
}

impl RecordSource for Product {
    fn record(&self) -> &MultiSheetRow {
        &self.record
    }

    fn record_mut(&mut self) -> &mut MultiSheetRow {
        &mut self.record
    }
}

// === Batched autofill ===

/// What happened to one product of a batched autofill.
#[derive(Debug)]
pub struct AutofillOutcome {
    /// Selected row the product came from, for selection-driven batches.
    pub row: Option<u32>,
    /// The product's SKU, when its identity cell parsed.
    pub sku: Option<Sku>,
    /// Filled and saved, or the error that stopped this product.
    pub result: Result<()>,
}

/// Report of a batched autofill, one outcome per product attempted.
#[derive(Debug, Default)]
pub struct AutofillReport {
    pub outcomes: Vec<AutofillOutcome>,
}

impl AutofillReport {
    /// Number of products filled and saved.
    pub fn filled(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of products skipped over a data error.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.filled()
    }
}

/// Autofill one product end to end: open, fill, save.
pub fn autofill_product(ss: &mut Spreadsheet, sku: Sku, overwrite: bool) -> Result<()> {
    let mut product = Product::open(ss, sku)?;
    product.autofill(overwrite)?;
    product.save(ss)
}

/// Data errors come back as the inner result; anything else aborts.
fn try_autofill(ss: &mut Spreadsheet, sku: Sku, overwrite: bool) -> Result<Result<()>> {
    match autofill_product(ss, sku, overwrite) {
        Err(err) if !err.is_data_error() => Err(err),
        other => Ok(other),
    }
}

/// Autofill `skus` one by one.
///
/// An error tied to one product's data is reported in its outcome and the
/// batch moves on to the next product; any other error aborts the batch.
pub fn autofill_skus(
    ss: &mut Spreadsheet,
    skus: &[Sku],
    overwrite: bool,
) -> Result<AutofillReport> {
    let mut report = AutofillReport::default();
    for &sku in skus {
        let result = try_autofill(ss, sku, overwrite)?;
        if let Err(err) = &result {
            tracing::warn!("Skipping product {}: {}", sku, err);
        }
        report.outcomes.push(AutofillOutcome {
            row: None,
            sku: Some(sku),
            result,
        });
    }
    Ok(report)
}

/// Autofill every product whose row is selected on the active sheet.
///
/// Each selected row contributes the SKU in its first column; a row whose
/// cell does not parse is reported and skipped like any other per-product
/// data error. Fails with [`Error::NoSelection`] when nothing is selected.
pub fn autofill_selection(ss: &mut Spreadsheet, overwrite: bool) -> Result<AutofillReport> {
    let selection = ss.selection().ok_or(Error::NoSelection)?;
    let parsed: Vec<(u32, Result<Sku>)> = {
        let sheet = ss.active_sheet().ok_or(Error::NoSelection)?;
        (selection.start.row..=selection.end.row)
            .map(|row| (row, Sku::parse(&sheet.value_at(row, 1).to_string(), row)))
            .collect()
    };

    let mut report = AutofillReport::default();
    for (row, sku) in parsed {
        let (sku, result) = match sku {
            Ok(sku) => (Some(sku), try_autofill(ss, sku, overwrite)?),
            Err(err) => (None, Err(err)),
        };
        if let Err(err) = &result {
            tracing::warn!("Skipping row {}: {}", row, err);
        }
        report.outcomes.push(AutofillOutcome {
            row: Some(row),
            sku,
            result,
        });
    }
    Ok(report)
}
