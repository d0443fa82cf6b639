// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Document retrieval.
//!
//! [`Retriever`] is the contract [`Rag`](crate::rag::Rag) depends on.
//! [`SimpleRetriever`] ranks an in-memory corpus by query-term overlap;
//! [`FnRetriever`] adapts a closure.

use crate::error::Result;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A retrievable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: Arc<str>,
    /// The document content.
    pub text: Arc<str>,
    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Document {
    /// Create a document without metadata.
    pub fn new(id: impl ToString, text: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.to_string().into(),
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Document {
    /// `Document(id=.., text=..)` with the text cut to 51 characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.text.chars().take(51).collect();
        write!(f, "Document(id={}, text={}...)", self.id, preview)
    }
}

/// Trait for document retrieval strategies.
pub trait Retriever: Send + Sync {
    /// Return up to `k` documents for `query`, best first.
    fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Document>>;
}

impl<R: Retriever + ?Sized> Retriever for Arc<R> {
    fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        (**self).retrieve(query, k)
    }
}

impl<R: Retriever + ?Sized> Retriever for Box<R> {
    fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        (**self).retrieve(query, k)
    }
}

/// In-memory retriever ranking by case-insensitive term overlap.
///
/// A document scores one point per whitespace-separated query term that
/// occurs anywhere in its text. Ties keep corpus order.
#[derive(Debug, Clone, Default)]
pub struct SimpleRetriever {
    documents: Vec<Document>,
}

impl SimpleRetriever {
    /// Create a retriever over a fixed corpus.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// The corpus.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check for an empty corpus.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Overlap score of `text` against lower-cased `terms`.
    pub fn score(terms: &[String], text: &str) -> usize {
        let text = text.to_lowercase();
        terms.iter().filter(|t| text.contains(t.as_str())).count()
    }
}

impl Retriever for SimpleRetriever {
    fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut ranked: Vec<(usize, &Document)> = self
            .documents
            .iter()
            .map(|doc| (Self::score(&terms, &doc.text), doc))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(ranked.into_iter().take(k).map(|(_, d)| d.clone()).collect())
    }
}

impl FromIterator<Document> for SimpleRetriever {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Retriever backed by a closure.
pub struct FnRetriever<F>
where
    F: Fn(&str, usize) -> Result<Vec<Document>> + Send + Sync,
{
    f: F,
}

impl<F> FnRetriever<F>
where
    F: Fn(&str, usize) -> Result<Vec<Document>> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Retriever for FnRetriever<F>
where
    F: Fn(&str, usize) -> Result<Vec<Document>> + Send + Sync,
{
    fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        (self.f)(query, k)
    }
}
