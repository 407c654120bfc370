// UnsupportedSource error

use std::fmt;

#[derive(Debug)]
pub struct UnsupportedSourceError {
    pub source: String,
}

impl fmt::Display for UnsupportedSourceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Could not parse {} as RDF/XML, Turtle or N-Triples",
            self.source
        )
    }
}

impl std::error::Error for UnsupportedSourceError {}
