//! Cell and range references in A1 notation
//!
//! Rows and columns are 1-based throughout, matching how references read in
//! the grid itself: `A1` is row 1, column 1.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A reference to a single cell (e.g. "B7")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Row index (1-based)
    pub row: u32,
    /// Column index (1-based, A=1)
    pub col: u16,
}

impl CellRef {
    /// Create a new cell reference. Indices are 1-based.
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sebo_grid::CellRef;
    ///
    /// let at = CellRef::parse("B7").unwrap();
    /// assert_eq!(at.row, 7);
    /// assert_eq!(at.col, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidCellRef("empty reference".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        if split == 0 {
            return Err(Error::InvalidCellRef(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..split])?;

        let row_str = &s[split..];
        if row_str.is_empty() {
            return Err(Error::InvalidCellRef(format!("no row number in '{}'", s)));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidCellRef(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidCellRef(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }

        Ok(Self { row, col })
    }

    /// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, ...)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, ...)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidCellRef("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidCellRef(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(MAX_COLS, MAX_COLS));
            }
        }

        Ok(col as u16)
    }

    /// Format as an A1-style string
    pub fn to_a1(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }

    /// Create a range from this cell to another
    pub fn to(&self, other: CellRef) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g. "A1:B10"), both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left cell
    pub start: CellRef,
    /// Bottom-right cell
    pub end: CellRef,
}

impl CellRange {
    /// Create a new range, normalizing so start is top-left
    pub fn new(start: CellRef, end: CellRef) -> Self {
        let (start_row, end_row) = if start.row <= end.row {
            (start.row, end.row)
        } else {
            (end.row, start.row)
        };
        let (start_col, end_col) = if start.col <= end.col {
            (start.col, end.col)
        } else {
            (end.col, start.col)
        };

        Self {
            start: CellRef::new(start_row, start_col),
            end: CellRef::new(end_row, end_col),
        }
    }

    /// Create a range from row/column indices (1-based)
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellRef::new(start_row, start_col),
            CellRef::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(at: CellRef) -> Self {
        Self { start: at, end: at }
    }

    /// A full row: columns 1 through `cols` of `row`
    pub fn row(row: u32, cols: u16) -> Self {
        Self::from_indices(row, 1, row, cols)
    }

    /// A full column: rows 1 through `rows` of `col`
    pub fn column(col: u16, rows: u32) -> Self {
        Self::from_indices(1, col, rows, col)
    }

    /// Parse a range from "A1:B10" notation; a single reference is accepted
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(colon) = s.find(':') {
            let start = CellRef::parse(&s[..colon])?;
            let end = CellRef::parse(&s[colon + 1..])?;
            Ok(Self::new(start, end))
        } else {
            Ok(Self::single(CellRef::parse(s)?))
        }
    }

    /// Check if a cell lies within this range
    pub fn contains(&self, at: CellRef) -> bool {
        at.row >= self.start.row
            && at.row <= self.end.row
            && at.col >= self.start.col
            && at.col <= self.end.col
    }

    /// Number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Number of columns in the range
    pub fn col_count(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// Iterate over the cells of the range, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        let range = *self;
        (range.start.row..=range.end.row).flat_map(move |row| {
            (range.start.col..=range.end.col).map(move |col| CellRef::new(row, col))
        })
    }

    /// Format as an "A1:B10" string ("A1" for a single cell)
    pub fn to_a1(&self) -> String {
        if self.start == self.end {
            self.start.to_a1()
        } else {
            format!("{}:{}", self.start.to_a1(), self.end.to_a1())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A sheet-qualified range (e.g. "Textos!A1:B3")
///
/// Sheet names containing spaces are written single-quoted, as in
/// `'Meus Livros'!A1:B3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    /// Name of the sheet the range lives on
    pub sheet: String,
    /// The range within the sheet
    pub range: CellRange,
}

impl RangeRef {
    /// Create a new sheet-qualified range
    pub fn new<S: Into<String>>(sheet: S, range: CellRange) -> Self {
        Self {
            sheet: sheet.into(),
            range,
        }
    }

    /// Parse a "Sheet!A1:B3" reference
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        let (sheet, rest) = if let Some(stripped) = s.strip_prefix('\'') {
            let close = stripped
                .find('\'')
                .ok_or_else(|| Error::InvalidRange(format!("unterminated quote in '{}'", s)))?;
            let sheet = &stripped[..close];
            let rest = stripped[close + 1..]
                .strip_prefix('!')
                .ok_or_else(|| Error::InvalidRange(format!("missing '!' in '{}'", s)))?;
            (sheet, rest)
        } else {
            let bang = s
                .find('!')
                .ok_or_else(|| Error::InvalidRange(format!("missing '!' in '{}'", s)))?;
            (&s[..bang], &s[bang + 1..])
        };

        if sheet.is_empty() {
            return Err(Error::InvalidRange(format!("empty sheet name in '{}'", s)));
        }

        Ok(Self {
            sheet: sheet.to_string(),
            range: CellRange::parse(rest)?,
        })
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sheet.contains(' ') {
            write!(f, "'{}'!{}", self.sheet, self.range)
        } else {
            write!(f, "{}!{}", self.sheet, self.range)
        }
    }
}

impl FromStr for RangeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellRef::column_to_letters(1), "A");
        assert_eq!(CellRef::column_to_letters(2), "B");
        assert_eq!(CellRef::column_to_letters(26), "Z");
        assert_eq!(CellRef::column_to_letters(27), "AA");
        assert_eq!(CellRef::column_to_letters(28), "AB");
        assert_eq!(CellRef::column_to_letters(702), "ZZ");
        assert_eq!(CellRef::column_to_letters(703), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellRef::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellRef::letters_to_column("B").unwrap(), 2);
        assert_eq!(CellRef::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellRef::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellRef::letters_to_column("ZZ").unwrap(), 702);

        // Case insensitive
        assert_eq!(CellRef::letters_to_column("a").unwrap(), 1);
        assert_eq!(CellRef::letters_to_column("aa").unwrap(), 27);
    }

    #[test]
    fn test_cell_ref_parse() {
        let at = CellRef::parse("A1").unwrap();
        assert_eq!(at, CellRef::new(1, 1));

        let at = CellRef::parse("B7").unwrap();
        assert_eq!(at, CellRef::new(7, 2));

        let at = CellRef::parse("AA100").unwrap();
        assert_eq!(at, CellRef::new(100, 27));
    }

    #[test]
    fn test_cell_ref_parse_errors() {
        assert!(CellRef::parse("").is_err());
        assert!(CellRef::parse("A").is_err());
        assert!(CellRef::parse("7").is_err());
        assert!(CellRef::parse("A0").is_err()); // Row 0 is invalid
        assert!(CellRef::parse("A1B2").is_err());
    }

    #[test]
    fn test_cell_ref_display() {
        assert_eq!(CellRef::new(1, 1).to_string(), "A1");
        assert_eq!(CellRef::new(100, 3).to_string(), "C100");
        assert_eq!(CellRef::new(7, 28).to_string(), "AB7");
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:B2").unwrap();
        assert_eq!(range.start, CellRef::new(1, 1));
        assert_eq!(range.end, CellRef::new(2, 2));

        // Single cell
        let range = CellRange::parse("C3").unwrap();
        assert_eq!(range.start, CellRef::new(3, 3));
        assert_eq!(range.end, CellRef::new(3, 3));

        // Reversed corners are normalized
        let range = CellRange::parse("B2:A1").unwrap();
        assert_eq!(range.start, CellRef::new(1, 1));
        assert_eq!(range.end, CellRef::new(2, 2));
    }

    #[test]
    fn test_cell_range_contains() {
        let range = CellRange::parse("B2:D4").unwrap();
        assert!(range.contains(CellRef::new(2, 2)));
        assert!(range.contains(CellRef::new(4, 4)));
        assert!(!range.contains(CellRef::new(1, 1)));
        assert!(!range.contains(CellRef::new(5, 2)));
    }

    #[test]
    fn test_cell_range_iterator() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(
            cells,
            vec![
                CellRef::new(1, 1),
                CellRef::new(1, 2),
                CellRef::new(2, 1),
                CellRef::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_range_ref_parse() {
        let r = RangeRef::parse("Textos!A1:B3").unwrap();
        assert_eq!(r.sheet, "Textos");
        assert_eq!(r.range, CellRange::parse("A1:B3").unwrap());

        let r = RangeRef::parse("'Meus Livros'!C2").unwrap();
        assert_eq!(r.sheet, "Meus Livros");
        assert_eq!(r.range, CellRange::single(CellRef::new(2, 3)));

        assert!(RangeRef::parse("A1:B3").is_err());
        assert!(RangeRef::parse("'Textos!A1").is_err());
        assert!(RangeRef::parse("!A1").is_err());
    }

    #[test]
    fn test_range_ref_display() {
        let r = RangeRef::new("Textos", CellRange::parse("A1:B3").unwrap());
        assert_eq!(r.to_string(), "Textos!A1:B3");

        let r = RangeRef::new("Meus Livros", CellRange::parse("C2").unwrap());
        assert_eq!(r.to_string(), "'Meus Livros'!C2");
    }
}
