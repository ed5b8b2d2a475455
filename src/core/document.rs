use std::fmt;

/// Term represents the value that the token can take.
///
/// It is defined by the name of its field and its text.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    field: String,
    text: String,
}

impl Term {
    /// Builds a term from a field name and a text.
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Term {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Returns the field name of the term.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the text of the term.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({}:{:?})", self.field, self.text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}

/// A document is the list of terms indexed for it.
///
/// A term appearing several times counts as many occurrences, which
/// drives its term frequency.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    terms: Vec<Term>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Document {
        Document::default()
    }

    /// Builds a document from `(field, text)` pairs.
    pub fn from_terms<F, T>(terms: impl IntoIterator<Item = (F, T)>) -> Document
    where
        F: Into<String>,
        T: Into<String>,
    {
        Document {
            terms: terms
                .into_iter()
                .map(|(field, text)| Term::new(field, text))
                .collect(),
        }
    }

    /// Adds one occurrence of a term.
    pub fn add_term(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Returns the terms of the document, in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}
