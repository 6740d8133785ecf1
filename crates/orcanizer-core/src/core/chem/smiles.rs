use super::elements::{is_aromatic_symbol, is_element, is_organic_subset};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SmilesError {
    #[error("identifier is empty")]
    Empty,
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("unknown element '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },
    #[error("element '{symbol}' at position {position} must be written in brackets")]
    BracketRequired { symbol: String, position: usize },
    #[error("unterminated bracket atom starting at position {position}")]
    UnterminatedBracket { position: usize },
    #[error("unbalanced parentheses")]
    UnbalancedBranch,
    #[error("ring bond {label} is never closed")]
    UnclosedRing { label: u32 },
    #[error("bond or branch at position {position} has no preceding atom")]
    DanglingBond { position: usize },
    #[error("charge of bracket atom starting at position {position} is out of range")]
    ChargeOutOfRange { position: usize },
}

/// What the batch needs to know about a SMILES string before (and independently of) 3-D
/// embedding: how many atoms it spells out and its total formal charge.
///
/// This is a syntactic scan. It does not perceive valence, aromaticity or stereochemistry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmilesSummary {
    /// Explicitly written atoms (implicit hydrogens are not counted).
    pub atom_count: usize,
    /// Sum of the charges of all bracket atoms.
    pub formal_charge: i32,
    /// Number of disconnected components (`.`-separated fragments).
    pub components: usize,
}

impl SmilesSummary {
    pub fn parse(smiles: &str) -> Result<Self, SmilesError> {
        Scanner::new(smiles).run()
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    atom_count: usize,
    formal_charge: i32,
    components: usize,
    depth: usize,
    open_rings: HashSet<u32>,
    // Whether an atom has been seen since the start or the last '.'.
    has_atom: bool,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            atom_count: 0,
            formal_charge: 0,
            components: 1,
            depth: 0,
            open_rings: HashSet::new(),
            has_atom: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn unexpected(&self, ch: char) -> SmilesError {
        SmilesError::UnexpectedChar {
            ch,
            position: self.pos,
        }
    }

    fn run(mut self) -> Result<SmilesSummary, SmilesError> {
        if self.chars.is_empty() {
            return Err(SmilesError::Empty);
        }

        while let Some(ch) = self.peek() {
            match ch {
                '[' => self.bracket_atom()?,
                '(' => {
                    if !self.has_atom {
                        return Err(SmilesError::DanglingBond { position: self.pos });
                    }
                    self.depth += 1;
                    self.pos += 1;
                }
                ')' => {
                    if self.depth == 0 {
                        return Err(SmilesError::UnbalancedBranch);
                    }
                    self.depth -= 1;
                    self.pos += 1;
                }
                '-' | '=' | '#' | '$' | ':' | '/' | '\\' => {
                    if !self.has_atom {
                        return Err(SmilesError::DanglingBond { position: self.pos });
                    }
                    self.pos += 1;
                }
                '.' => {
                    if !self.has_atom || self.depth != 0 {
                        return Err(SmilesError::DanglingBond { position: self.pos });
                    }
                    self.components += 1;
                    self.has_atom = false;
                    self.pos += 1;
                }
                '%' => {
                    let label = self.two_digit_ring_label()?;
                    self.toggle_ring(label)?;
                }
                '0'..='9' => {
                    let label = ch.to_digit(10).unwrap_or_default();
                    self.pos += 1;
                    self.toggle_ring(label)?;
                }
                '*' => {
                    self.pos += 1;
                    self.add_atom();
                }
                _ if ch.is_ascii_alphabetic() => self.organic_atom()?,
                _ => return Err(self.unexpected(ch)),
            }
        }

        if self.depth != 0 {
            return Err(SmilesError::UnbalancedBranch);
        }
        if !self.has_atom {
            return Err(SmilesError::DanglingBond { position: self.pos });
        }
        if let Some(&label) = self.open_rings.iter().min() {
            return Err(SmilesError::UnclosedRing { label });
        }

        Ok(SmilesSummary {
            atom_count: self.atom_count,
            formal_charge: self.formal_charge,
            components: self.components,
        })
    }

    fn add_atom(&mut self) {
        self.atom_count += 1;
        self.has_atom = true;
    }

    fn toggle_ring(&mut self, label: u32) -> Result<(), SmilesError> {
        if !self.has_atom {
            return Err(SmilesError::DanglingBond {
                position: self.pos.saturating_sub(1),
            });
        }
        if !self.open_rings.remove(&label) {
            self.open_rings.insert(label);
        }
        Ok(())
    }

    fn two_digit_ring_label(&mut self) -> Result<u32, SmilesError> {
        self.pos += 1;
        let mut label = 0;
        for _ in 0..2 {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    label = label * 10 + c.to_digit(10).unwrap_or_default();
                    self.pos += 1;
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(self.unexpected('%')),
            }
        }
        Ok(label)
    }

    fn organic_atom(&mut self) -> Result<(), SmilesError> {
        let start = self.pos;
        let first = self.chars[start];

        if let Some(second) = self.peek_at(1) {
            let pair: String = [first, second].iter().collect();
            if is_organic_subset(&pair) {
                self.pos += 2;
                self.add_atom();
                return Ok(());
            }
        }

        let single = first.to_string();
        if is_organic_subset(&single) {
            self.pos += 1;
            self.add_atom();
            return Ok(());
        }

        if first.is_ascii_uppercase() && is_element(&single) {
            return Err(SmilesError::BracketRequired {
                symbol: single,
                position: start,
            });
        }
        Err(self.unexpected(first))
    }

    fn bracket_atom(&mut self) -> Result<(), SmilesError> {
        let open = self.pos;
        self.pos += 1;

        // isotope
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }

        self.bracket_symbol(open)?;

        // chirality: @, @@, or @TH1-style classes
        let chiral = self.peek() == Some('@');
        while self.peek() == Some('@') {
            self.pos += 1;
        }
        if chiral {
            self.chirality_class();
        }

        // hydrogen count
        if self.peek() == Some('H') {
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        let charge = self.bracket_charge(open)?;
        self.formal_charge = self
            .formal_charge
            .checked_add(charge)
            .ok_or(SmilesError::ChargeOutOfRange { position: open })?;

        // atom class
        if self.peek() == Some(':') {
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        match self.peek() {
            Some(']') => {
                self.pos += 1;
                self.add_atom();
                Ok(())
            }
            Some(ch) => Err(self.unexpected(ch)),
            None => Err(SmilesError::UnterminatedBracket { position: open }),
        }
    }

    fn chirality_class(&mut self) {
        let (Some(a), Some(b)) = (self.peek(), self.peek_at(1)) else {
            return;
        };
        if matches!((a, b), ('T', 'H') | ('A', 'L') | ('S', 'P') | ('T', 'B') | ('O', 'H')) {
            self.pos += 2;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
    }

    fn bracket_symbol(&mut self, open: usize) -> Result<(), SmilesError> {
        let Some(first) = self.peek() else {
            return Err(SmilesError::UnterminatedBracket { position: open });
        };

        if first == '*' {
            self.pos += 1;
            return Ok(());
        }

        if first.is_ascii_uppercase() {
            if let Some(second) = self.peek_at(1).filter(|c| c.is_ascii_lowercase()) {
                let pair: String = [first, second].iter().collect();
                if is_element(&pair) {
                    self.pos += 2;
                    return Ok(());
                }
            }
            let single = first.to_string();
            if is_element(&single) {
                self.pos += 1;
                return Ok(());
            }
            return Err(SmilesError::UnknownElement {
                symbol: single,
                position: self.pos,
            });
        }

        if first.is_ascii_lowercase() {
            if let Some(second) = self.peek_at(1).filter(|c| c.is_ascii_lowercase()) {
                let pair: String = [first, second].iter().collect();
                if is_aromatic_symbol(&pair) {
                    self.pos += 2;
                    return Ok(());
                }
            }
            let single = first.to_string();
            if is_aromatic_symbol(&single) {
                self.pos += 1;
                return Ok(());
            }
            return Err(SmilesError::UnknownElement {
                symbol: single,
                position: self.pos,
            });
        }

        Err(self.unexpected(first))
    }

    /// Parses `+`, `++`, `+2`, `-`, `--`, `-3` and returns the signed charge (0 if absent).
    fn bracket_charge(&mut self, open: usize) -> Result<i32, SmilesError> {
        let out_of_range = SmilesError::ChargeOutOfRange { position: open };
        let sign = match self.peek() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Ok(0),
        };
        let sign_char = self.chars[self.pos];
        self.pos += 1;

        let mut digits: Option<i32> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            let value = digits
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(d as i32))
                .ok_or_else(|| out_of_range.clone())?;
            digits = Some(value);
            self.pos += 1;
        }
        if let Some(digits) = digits {
            return Ok(sign * digits);
        }

        let mut count: i32 = 1;
        while self.peek() == Some(sign_char) {
            count = count.checked_add(1).ok_or_else(|| out_of_range.clone())?;
            self.pos += 1;
        }
        Ok(sign * count)
    }
}
