use chrono::{Datelike, NaiveDate};

use super::error::FactureError;

/// Gapless invoice number sequence generator.
///
/// Generates numbers in the format `{prefix}-{year}{month}-{sequential}`,
/// e.g. "FACT-202406-0001", "FACT-202406-0002", etc. The counter resets
/// when the sequence advances to a new year-month, so numeros stay unique
/// and sort by creation time.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    prefix: String,
    year: i32,
    month: u32,
    next_number: u64,
    zero_pad: usize,
}

impl InvoiceNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            month,
            next_number: 1,
            zero_pad: 4,
        }
    }

    /// Create a sequence for the year-month of the given date.
    pub fn for_date(prefix: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(prefix, date.year(), date.month())
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, year: i32, month: u32, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            month,
            next_number,
            zero_pad: 4,
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next numero.
    pub fn next_numero(&mut self) -> String {
        let num = self.next_number;
        self.next_number += 1;
        self.format(num)
    }

    /// Preview the next numero without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    fn format(&self, num: u64) -> String {
        format!(
            "{}-{}{:02}-{:0>width$}",
            self.prefix,
            self.year,
            self.month,
            num,
            width = self.zero_pad
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Advance to a new year-month, resetting the counter to 1.
    pub fn advance_to(&mut self, year: i32, month: u32) -> Result<(), FactureError> {
        if !(1..=12).contains(&month) {
            return Err(FactureError::Numbering(format!(
                "month {month} is out of range"
            )));
        }
        if (year, month) <= (self.year, self.month) {
            return Err(FactureError::Numbering(format!(
                "period {year}-{month:02} must be later than current period {}-{:02}",
                self.year, self.month
            )));
        }
        self.year = year;
        self.month = month;
        self.next_number = 1;
        Ok(())
    }

    /// Auto-advance if the given date is in a later year-month.
    /// Returns true if the period was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let (y, m) = (date.year(), date.month());
        if (y, m) > (self.year, self.month) {
            self.year = y;
            self.month = m;
            self.next_number = 1;
            true
        } else {
            false
        }
    }
}

/// Build a record identifier of the form `{prefix}-{YYYYMMDD}-{suffix}`.
///
/// The caller supplies the suffix (a counter, or random token when
/// collisions across processes matter); the result sorts by creation date.
pub fn document_id(prefix: &str, date: NaiveDate, suffix: &str) -> String {
    format!("{}-{}-{}", prefix, date.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut seq = InvoiceNumberSequence::new("FACT", 2024, 6);
        assert_eq!(seq.next_numero(), "FACT-202406-0001");
        assert_eq!(seq.next_numero(), "FACT-202406-0002");
        assert_eq!(seq.next_numero(), "FACT-202406-0003");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = InvoiceNumberSequence::new("FACT", 2024, 6);
        assert_eq!(seq.peek(), "FACT-202406-0001");
        assert_eq!(seq.peek(), "FACT-202406-0001");
        assert_eq!(seq.next_numero(), "FACT-202406-0001");
        assert_eq!(seq.peek(), "FACT-202406-0002");
    }

    #[test]
    fn starting_at() {
        let mut seq = InvoiceNumberSequence::starting_at("FACT", 2024, 6, 42);
        assert_eq!(seq.next_numero(), "FACT-202406-0042");
    }

    #[test]
    fn custom_padding() {
        let mut seq = InvoiceNumberSequence::new("F", 2024, 6).with_padding(3);
        assert_eq!(seq.next_numero(), "F-202406-001");
    }

    #[test]
    fn period_advance_resets_counter() {
        let mut seq = InvoiceNumberSequence::new("FACT", 2024, 6);
        seq.next_numero();
        seq.next_numero();
        seq.advance_to(2024, 7).unwrap();
        assert_eq!(seq.next_numero(), "FACT-202407-0001");
    }

    #[test]
    fn period_advance_rejects_past() {
        let mut seq = InvoiceNumberSequence::new("FACT", 2024, 6);
        assert!(seq.advance_to(2024, 6).is_err());
        assert!(seq.advance_to(2024, 5).is_err());
        assert!(seq.advance_to(2023, 12).is_err());
        assert!(seq.advance_to(2024, 13).is_err());
    }

    #[test]
    fn auto_advance_period() {
        let mut seq = InvoiceNumberSequence::new("FACT", 2024, 6);
        seq.next_numero();

        let july = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(seq.auto_advance(july));
        assert_eq!(seq.next_numero(), "FACT-202407-0001");

        // Same month doesn't advance
        let later_july = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
        assert!(!seq.auto_advance(later_july));
        assert_eq!(seq.next_numero(), "FACT-202407-0002");
    }

    #[test]
    fn numeros_sort_by_creation_time() {
        let mut seq = InvoiceNumberSequence::new("FACT", 2024, 11);
        let a = seq.next_numero();
        let b = seq.next_numero();
        seq.auto_advance(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        let c = seq.next_numero();
        seq.auto_advance(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let d = seq.next_numero();
        let mut sorted = vec![d.clone(), c.clone(), b.clone(), a.clone()];
        sorted.sort();
        assert_eq!(sorted, vec![a, b, c, d]);
    }

    #[test]
    fn document_ids() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(document_id("INV", date, "a1b2c3"), "INV-20240615-a1b2c3");
        assert_eq!(document_id("PUR", date, "0007"), "PUR-20240615-0007");
    }
}
