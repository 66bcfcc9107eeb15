//! A fresh catalog document
//!
//! [`catalog_template`] builds the sheets, headers, boilerplate texts and
//! named range a new catalog starts from. The column set mirrors what the
//! shop tracks for printed matter; a catalog in use grows rows, not
//! columns.

use sebo_grid::{CellRange, RangeRef, Sheet, Spreadsheet, TextStyle};

use crate::error::Result;
use crate::product::{DESCRIPTION_PARTS_RANGE, SHEET_BASIC, SHEET_PRINTED, SHEET_SHOPEE};

/// Sheet holding reusable text fragments: keys in column A, texts in B.
pub const SHEET_TEXTS: &str = "Textos";

/// Data rows the product sheets start with.
const PRODUCT_ROWS: u32 = 1000;

const BASIC_HEADER: [&str; 5] = [
    "SKU",
    "Referência",
    "Categoria",
    "Cód. de barras (GTIN)",
    "Cadastrado em",
];

const PRINTED_HEADER: [&str; 37] = [
    "SKU",
    "Tipo",
    "Título: Como na capa",
    "Título: Secundário (subtítulo)",
    "Título: Original (da obra traduzida)",
    "Título: Do volume",
    "Participantes: Autores",
    "Participantes: Tradutores",
    "Participantes: Editores",
    "Participantes: Organizadores",
    "Classificação",
    "Idioma",
    "Editora",
    "Edição: Ano",
    "Edição: N.º",
    "Edição: Nome",
    "N.º da reimpressão",
    "Coleção",
    "N.º do volume",
    "N.º do tomo",
    "ISBN-10",
    "ISBN-13",
    "ISSN",
    "N.º de páginas",
    "Tipo de capa",
    "Altura (cm)",
    "Largura (cm)",
    "Peso (g)",
    "Condição: Grifos",
    "Condição: Anotações",
    "Condição: Manchas",
    "Condição: Sujeira",
    "Condição: Machucados",
    "Condição: Outros detalhes",
    "Outros detalhes",
    "Sinopse",
    "Sinopse: Fonte",
];

const SHOPEE_HEADER: [&str; 3] = ["SKU", "Título", "Descrição"];

/// Standard description parts, keyed the way the description generator
/// looks them up.
const DESCRIPTION_PARTS: [(&str, &str); 3] = [
    (
        "Condição",
        "Produto usado. Salvo indicação em contrário, o exemplar está em bom \
         estado de conservação, com o amarelado natural do tempo.",
    ),
    (
        "Chat",
        "Ficou com alguma dúvida? Chame a gente no chat antes de comprar.",
    ),
    ("Fotos", "As fotos são do exemplar anunciado."),
];

/// Build an empty catalog: the product sheets with bold headers, the texts
/// sheet with the standard description parts, and the named range the
/// description generator reads them through.
pub fn catalog_template() -> Result<Spreadsheet> {
    let mut ss = Spreadsheet::new();
    ss.add_sheet(header_sheet(SHEET_BASIC, &BASIC_HEADER)?)?;
    ss.add_sheet(header_sheet(SHEET_PRINTED, &PRINTED_HEADER)?)?;
    ss.add_sheet(header_sheet(SHEET_SHOPEE, &SHOPEE_HEADER)?)?;

    let mut textos = Sheet::new(SHEET_TEXTS, 10, 2)?;
    for (offset, (key, piece)) in DESCRIPTION_PARTS.iter().enumerate() {
        let row = offset as u32 + 1;
        textos.set_value_at(row, 1, *key)?;
        textos.set_value_at(row, 2, *piece)?;
    }
    ss.add_sheet(textos)?;

    // The trailing rows of the range are padding for texts added later
    ss.define_named_range(
        DESCRIPTION_PARTS_RANGE,
        RangeRef::new(SHEET_TEXTS, CellRange::from_indices(1, 1, 10, 2)),
    )?;
    Ok(ss)
}

fn header_sheet(name: &str, header: &[&str]) -> Result<Sheet> {
    let mut sheet = Sheet::new(name, PRODUCT_ROWS, header.len() as u16)?;
    for (offset, label) in header.iter().enumerate() {
        let col = offset as u16 + 1;
        sheet.set_value_at(1, col, *label)?;
        sheet.set_style_at(1, col, TextStyle::new().with_bold(true))?;
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::product::PRODUCT_SHEETS;
    use crate::record::{two_column_map, MultiSheetRow};

    #[test]
    fn test_template_layout() {
        let ss = catalog_template().unwrap();

        let names: Vec<&str> = ss.sheets().map(Sheet::name).collect();
        assert_eq!(names, vec![SHEET_BASIC, SHEET_PRINTED, SHEET_SHOPEE, SHEET_TEXTS]);

        let basico = ss.sheet_by_name(SHEET_BASIC).unwrap();
        assert_eq!(basico.value_at(1, 1).to_string(), "SKU");
        assert!(basico.style_at(1, 1).bold);

        let impressos = ss.sheet_by_name(SHEET_PRINTED).unwrap();
        assert_eq!(impressos.col_count(), PRINTED_HEADER.len() as u16);
        assert_eq!(impressos.value_at(1, 2).to_string(), "Tipo");
    }

    #[test]
    fn test_template_description_parts() {
        let ss = catalog_template().unwrap();
        let parts = two_column_map(&ss, DESCRIPTION_PARTS_RANGE).unwrap();

        assert_eq!(parts.len(), 3);
        for key in ["Condição", "Chat", "Fotos"] {
            assert!(parts.contains_key(key), "missing part {}", key);
        }
    }

    #[test]
    fn test_template_accepts_records() {
        let ss = catalog_template().unwrap();
        let record = MultiSheetRow::open(&ss, 1, &PRODUCT_SHEETS).unwrap();
        for sheet in PRODUCT_SHEETS {
            assert_eq!(record.row(sheet).unwrap().row_no(), 2);
        }
    }
}
