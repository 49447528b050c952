use crate::error::{EngineError, Result};
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub content: String,
}

impl Document {
    pub fn new(id: DocId, content: impl Into<String>) -> Self {
        Self { id, content: content.into() }
    }
}

/// The fixed document set, ordered by id. Immutable once built.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    docs: BTreeMap<DocId, Document>,
}

impl Corpus {
    pub fn from_documents<I>(docs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut map = BTreeMap::new();
        for doc in docs {
            let id = doc.id;
            if map.insert(id, doc).is_some() {
                return Err(EngineError::DuplicateDocument(id));
            }
        }
        Ok(Self { docs: map })
    }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(&id) }

    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.docs.values() }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
}

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    #[serde(alias = "content")]
    body: String,
}

impl From<InputDoc> for Document {
    fn from(doc: InputDoc) -> Self { Document::new(doc.id, doc.body) }
}

/// Load a corpus from a `.json` / `.jsonl` file or a directory containing them.
///
/// A `.json` file holds either one document object or an array of them; a
/// `.jsonl` file holds one object per line.
pub fn load_path(path: impl AsRef<Path>) -> Result<Corpus> {
    let input_path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else {
        files.push(input_path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    let corpus = Corpus::from_documents(docs)?;
    tracing::info!(path = %input_path.display(), num_docs = corpus.len(), "loaded corpus");
    Ok(corpus)
}

fn read_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)?;
        docs.push(doc.into());
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                docs.push(doc.into());
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            docs.push(doc.into());
        }
        _ => tracing::warn!(file = %file.display(), "skipping JSON file that is neither an object nor an array"),
    }
    Ok(())
}

const SAMPLE: &[(DocId, &str)] = &[
    (1, "This is a test document about risk management."),
    (2, "Another document discussing risk and compliance."),
    (3, "This document is focused on software requirements specifications."),
    (4, "Electrical system safety reports are important."),
    (5, "Mechanical systems need proper safety evaluations."),
    (6, "Software design requires careful planning and execution."),
    (7, "Risk analysis should be an integral part of system design."),
    (8, "Electrical hazards must be identified and mitigated."),
    (9, "Mechanical designs need to comply with safety standards."),
    (10, "Comprehensive testing ensures system reliability."),
    (11, "Safety evaluations should be conducted regularly."),
    (12, "Compliance with regulations is mandatory for medical devices."),
    (13, "Risk management involves identifying, assessing, and controlling risks."),
    (14, "Software testing includes unit tests, integration tests, and system tests."),
    (15, "Documentation is crucial for traceability and compliance."),
    (16, "Mechanical components should be tested for durability and safety."),
    (17, "Electrical systems should have fail-safes in place."),
    (18, "Software updates must be managed carefully to avoid introducing new risks."),
    (19, "Risk mitigation strategies include redundancy and diversification."),
    (20, "Compliance audits help ensure adherence to safety standards."),
];

/// The built-in risk-management corpus used when no corpus file is given.
pub fn sample() -> Corpus {
    Corpus {
        docs: SAMPLE.iter().map(|(id, text)| (*id, Document::new(*id, *text))).collect(),
    }
}
