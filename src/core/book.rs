use thiserror::Error;

use super::engine::evaluate;
use super::error::LeaseError;
use super::types::{LeaseInput, LeaseReport};

pub const MAX_OPTIONS: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("at most {max} options can be compared", max = MAX_OPTIONS)]
    Full,

    #[error("the last remaining option cannot be deleted")]
    LastOption,

    #[error("option {index} does not exist; there are {len} options")]
    OutOfRange { index: usize, len: usize },

    #[error("at least one option is required")]
    Empty,
}

/// Side-by-side lease options being compared, one of which is active.
///
/// Always holds between 1 and `MAX_OPTIONS` entries and `active` always
/// points at one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBook {
    options: Vec<LeaseInput>,
    active: usize,
}

impl Default for OptionBook {
    fn default() -> Self {
        Self {
            options: vec![LeaseInput::default()],
            active: 0,
        }
    }
}

impl OptionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads existing options; the first becomes active.
    pub fn from_inputs(options: Vec<LeaseInput>) -> Result<Self, BookError> {
        if options.is_empty() {
            return Err(BookError::Empty);
        }
        if options.len() > MAX_OPTIONS {
            return Err(BookError::Full);
        }
        Ok(Self { options, active: 0 })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always false: a book never holds fewer than one option.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &LeaseInput {
        &self.options[self.active]
    }

    pub fn active_mut(&mut self) -> &mut LeaseInput {
        &mut self.options[self.active]
    }

    pub fn options(&self) -> &[LeaseInput] {
        &self.options
    }

    /// Appends `input` and makes it active; returns its index.
    pub fn add(&mut self, input: LeaseInput) -> Result<usize, BookError> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(BookError::Full);
        }
        self.options.push(input);
        self.active = self.options.len() - 1;
        Ok(self.active)
    }

    pub fn add_blank(&mut self) -> Result<usize, BookError> {
        self.add(LeaseInput::default())
    }

    pub fn duplicate_active(&mut self) -> Result<usize, BookError> {
        let copy = self.active().clone();
        self.add(copy)
    }

    /// Removes the active option and activates the one before it.
    pub fn delete_active(&mut self) -> Result<LeaseInput, BookError> {
        if self.options.len() <= 1 {
            return Err(BookError::LastOption);
        }
        let removed = self.options.remove(self.active);
        self.active = self.active.saturating_sub(1);
        Ok(removed)
    }

    pub fn select(&mut self, index: usize) -> Result<(), BookError> {
        if index >= self.options.len() {
            return Err(BookError::OutOfRange {
                index,
                len: self.options.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    /// Evaluates every option on its own; one failure does not affect the rest.
    pub fn evaluate_all(&self) -> Vec<Result<LeaseReport, LeaseError>> {
        self.options.iter().map(evaluate).collect()
    }

    pub fn evaluate_active(&self) -> Result<LeaseReport, LeaseError> {
        evaluate(self.active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ServiceType;

    fn option_with_rate(rate: &str) -> LeaseInput {
        LeaseInput {
            base_rate: rate.to_string(),
            square_feet: "1,000".to_string(),
            term_months: "36".to_string(),
            ..LeaseInput::default()
        }
    }

    #[test]
    fn new_book_holds_one_blank_active_option() {
        let book = OptionBook::new();
        assert_eq!(book.len(), 1);
        assert!(!book.is_empty());
        assert_eq!(book.active_index(), 0);
        assert_eq!(book.active(), &LeaseInput::default());
        assert_eq!(book.active().service_type, ServiceType::FullService);
    }

    #[test]
    fn add_activates_new_option_and_caps_at_five() {
        let mut book = OptionBook::new();
        for expected in 1..MAX_OPTIONS {
            assert_eq!(book.add_blank(), Ok(expected));
            assert_eq!(book.active_index(), expected);
        }
        assert_eq!(book.add_blank(), Err(BookError::Full));
        assert_eq!(book.len(), MAX_OPTIONS);
    }

    #[test]
    fn duplicate_is_an_independent_value_copy() {
        let mut book = OptionBook::from_inputs(vec![option_with_rate("30")]).expect("one option");
        assert_eq!(book.duplicate_active(), Ok(1));
        book.active_mut().base_rate = "45".to_string();

        assert_eq!(book.options()[0].base_rate, "30");
        assert_eq!(book.options()[1].base_rate, "45");
    }

    #[test]
    fn delete_keeps_at_least_one_and_moves_active_back() {
        let mut book = OptionBook::from_inputs(vec![
            option_with_rate("10"),
            option_with_rate("20"),
            option_with_rate("30"),
        ])
        .expect("three options");
        book.select(2).expect("in range");

        let removed = book.delete_active().expect("can delete");
        assert_eq!(removed.base_rate, "30");
        assert_eq!(book.active_index(), 1);

        book.select(0).expect("in range");
        book.delete_active().expect("can delete");
        assert_eq!(book.active_index(), 0);
        assert_eq!(book.active().base_rate, "20");

        assert_eq!(book.delete_active(), Err(BookError::LastOption));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let mut book = OptionBook::new();
        assert_eq!(
            book.select(3),
            Err(BookError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(book.active_index(), 0);
    }

    #[test]
    fn from_inputs_enforces_bounds() {
        assert_eq!(OptionBook::from_inputs(Vec::new()), Err(BookError::Empty));
        assert_eq!(
            OptionBook::from_inputs(vec![LeaseInput::default(); MAX_OPTIONS + 1]),
            Err(BookError::Full)
        );
    }

    #[test]
    fn evaluate_all_isolates_failures_per_option() {
        let book = OptionBook::from_inputs(vec![
            option_with_rate("30"),
            option_with_rate("oops"),
            option_with_rate("$25.50"),
        ])
        .expect("three options");

        let results = book.evaluate_all();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1].as_ref().map_err(|e| e.kind()),
            Err("format")
        );
        assert!(results[2].is_ok());
        assert!(book.evaluate_active().is_ok());
    }
}
