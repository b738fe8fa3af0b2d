use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, DeriveError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DeriveError {
    MissingGrammarSource,
    MultipleGrammarSources,
    ReadFile(String),
    Compile(gbnf::Error),
    Other(String),
}

impl Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DeriveError::MissingGrammarSource => write!(f, "No grammar source provided"),
            DeriveError::MultipleGrammarSources => {
                write!(f, "At most one grammar source can be provided")
            }
            DeriveError::ReadFile(ref s) => write!(f, "Failed to read grammar file: {}", s),
            DeriveError::Compile(ref e) => write!(f, "Invalid grammar: {}", e),
            DeriveError::Other(ref s) => write!(f, "Derive error: {}", s),
        }
    }
}

impl From<syn::Error> for DeriveError {
    fn from(e: syn::Error) -> DeriveError {
        DeriveError::Other(format!("syn error: {}", e))
    }
}

impl From<gbnf::Error> for DeriveError {
    fn from(e: gbnf::Error) -> DeriveError {
        DeriveError::Compile(e)
    }
}
