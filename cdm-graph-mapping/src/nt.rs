//! N-Triples serialization and artifact writing.

use std::path::Path;

use tracing::info;

use crate::error::WriteError;
use crate::generate::Triple;

/// Serialize a triple sequence as an N-Triples document.
///
/// One statement per line, trailing newline guaranteed. An empty sequence
/// is a distinct "no content produced" condition — callers must be able to
/// tell "nothing to ingest" apart from "wrote a file".
pub fn ntriples_document(triples: &[Triple]) -> Result<String, WriteError> {
    if triples.is_empty() {
        return Err(WriteError::NoContent);
    }

    let mut doc = String::new();
    for triple in triples {
        doc.push_str(&triple.to_string());
        doc.push('\n');
    }
    Ok(doc)
}

/// Serialize and persist a triple sequence to a UTF-8 N-Triples file.
pub fn write_ntriples(path: &Path, triples: &[Triple]) -> Result<(), WriteError> {
    let doc = ntriples_document(triples)?;
    std::fs::write(path, doc)?;
    info!(
        artifact = %path.display(),
        triples = triples.len(),
        "N-Triples artifact written"
    );
    Ok(())
}
