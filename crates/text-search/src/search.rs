// text-search/src/search.rs
//! 搜索模块 - full-text search and exact lookup

use tantivy::collector::TopDocs;
use tantivy::query::Query;
use tantivy::{Searcher, TantivyDocument};

use crate::context::Context;
use crate::error::Result;
use crate::models::{DocumentOutput, SearchInput, SearchOutput};
use crate::query_executor::{lookup_query, text_query, Projection};

impl Context {
    /// Runs `search_query` through Tantivy's query parser.
    ///
    /// Unqualified terms search `search_fields`, or every indexed text and
    /// json field when none are given; `field:term` targets one field and
    /// `json_field.path:term` a path inside a json field. Results are ordered
    /// by descending score and hold the `return_fields` of each document.
    pub fn search(&self, input: &SearchInput) -> Result<SearchOutput> {
        let searcher = self.reader.searcher();
        let projection = Projection::new(self, &input.return_fields)?;
        let query = text_query(self, &input.search_fields, &input.search_query)?;
        self.collect(&searcher, query.as_ref(), &projection, input.limit)
    }

    /// Matches `search_query` as one literal value against exact-lookup
    /// fields: indexed u64 and bool fields, and text fields indexed without
    /// tokenization.
    pub fn find(&self, input: &SearchInput) -> Result<SearchOutput> {
        let searcher = self.reader.searcher();
        let projection = Projection::new(self, &input.return_fields)?;
        let query = lookup_query(self, &input.search_fields, &input.search_query)?;
        self.collect(&searcher, query.as_ref(), &projection, input.limit)
    }

    fn collect(
        &self,
        searcher: &Searcher,
        query: &dyn Query,
        projection: &Projection,
        limit: Option<usize>,
    ) -> Result<SearchOutput> {
        let limit = limit.unwrap_or_else(|| self.default_limit());
        if limit == 0 {
            return Ok(SearchOutput::default());
        }

        let top_docs = searcher.search(query, &TopDocs::with_limit(limit))?;
        let mut docs = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let document: TantivyDocument = searcher.doc(address)?;
            docs.push(DocumentOutput {
                score,
                data: projection.project(self, &document)?,
            });
        }

        tracing::debug!("\"{}\": {} hits (limit {})", self.name(), docs.len(), limit);
        Ok(SearchOutput { docs })
    }
}
