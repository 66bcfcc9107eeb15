//! # sebo-catalog
//!
//! Catalog logic for the sebo tools: products keyed by SKU across several
//! sheets, autofill rules that derive the cross-listing fields, and the
//! text formatting the listings are built from.
//!
//! The layers, bottom up:
//! - [`text`] - List and sentence formatting helpers
//! - [`row`], [`record`] - Header-addressed rows and the multi-sheet
//!   record that groups one row per sheet under a shared identity
//! - [`format`], [`autofill`] - Attribute formatting and autofill rules,
//!   generic over what they fill
//! - [`product`] - The product domain: kinds, generators, batch autofill
//! - [`template`] - A fresh catalog document
//!
//! ## Example
//!
//! ```rust
//! use sebo_catalog::{autofill_product, catalog_template, Sku, SHEET_PRINTED};
//!
//! let mut ss = catalog_template().unwrap();
//! let sheet = ss.sheet_by_name_mut(SHEET_PRINTED).unwrap();
//! sheet.set_value_at(2, 1, 12).unwrap();
//! sheet.set_value("C2", "Dom Casmurro").unwrap();
//!
//! let active = ss.sheet_index(SHEET_PRINTED).unwrap();
//! ss.set_active_sheet(active).unwrap();
//!
//! autofill_product(&mut ss, Sku(12), false).unwrap();
//! let basico = ss.sheet_by_name("Básico").unwrap();
//! assert!(basico.value("B2").unwrap().to_string().contains("Dom%20Casmurro"));
//! ```

pub mod autofill;
pub mod error;
pub mod format;
pub mod product;
pub mod record;
pub mod row;
pub mod template;
pub mod text;

// Re-exports for convenience
pub use autofill::{AutofillRules, Generator, RecordSource};
pub use error::{Error, Result};
pub use format::{Attribute, AttributeFormat, Transform};
pub use product::{
    autofill_product, autofill_selection, autofill_skus, AutofillOutcome, AutofillReport, Product,
    ProductKind, Sku, DESCRIPTION_PARTS_RANGE, PRODUCT_SHEETS, SHEET_BASIC, SHEET_PRINTED,
    SHEET_SHOPEE,
};
pub use record::{two_column_map, MultiSheetRow};
pub use row::{Row, FIRST_DATA_ROW};
pub use template::{catalog_template, SHEET_TEXTS};
