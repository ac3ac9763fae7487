// text-search/src/query_executor.rs
//! Query 执行器
//!
//! Validates the field scope and projection of a [`SearchInput`] against the
//! schema of a context and turns its query string into a Tantivy query.
//!
//! [`SearchInput`]: crate::models::SearchInput

use serde_json::{Map, Value};
use tantivy::query::{
    AllQuery, BooleanQuery, EmptyQuery, Occur, Query, QueryParser, QueryParserError, TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::{Document, TantivyDocument, Term};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::schema::{FieldDefinition, FieldType};

/// Full-text query over `search_fields`, or over every indexed text and json
/// field when the scope is empty. An empty query string matches everything.
pub(crate) fn text_query(
    ctx: &Context,
    search_fields: &[String],
    query: &str,
) -> Result<Box<dyn Query>> {
    let fields: Vec<Field> = scope(ctx, search_fields, FieldDefinition::is_searchable, |d| {
        d.is_default_search_field()
    })?
    .into_iter()
    .map(|(_, field)| field)
    .collect();

    if query.trim().is_empty() {
        return Ok(Box::new(AllQuery));
    }

    let parser = QueryParser::for_index(&ctx.index, fields);
    parser.parse_query(query).map_err(|e| match e {
        QueryParserError::FieldDoesNotExist(field) | QueryParserError::FieldNotIndexed(field) => {
            Error::field_not_found(ctx.name(), field)
        }
        other => Error::Query(format!("'{query}': {other}")),
    })
}

/// Exact-value lookup: `value` is converted to a term for every field of the
/// scope it parses for, and the terms are OR-ed.
pub(crate) fn lookup_query(
    ctx: &Context,
    search_fields: &[String],
    value: &str,
) -> Result<Box<dyn Query>> {
    let fields = scope(
        ctx,
        search_fields,
        FieldDefinition::supports_exact_lookup,
        FieldDefinition::supports_exact_lookup,
    )?;

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(fields.len());
    for (definition, field) in fields {
        match exact_term(definition, field, value) {
            Some(term) => clauses.push((
                Occur::Should,
                Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
            )),
            None => tracing::debug!(
                "'{}' is not a valid {} value for field '{}'",
                value,
                definition.field_type.as_str(),
                definition.name
            ),
        }
    }

    Ok(match clauses.len() {
        0 => Box::new(EmptyQuery),
        1 => clauses.remove(0).1,
        _ => Box::new(BooleanQuery::new(clauses)),
    })
}

fn exact_term(definition: &FieldDefinition, field: Field, value: &str) -> Option<Term> {
    match definition.field_type {
        FieldType::U64 => value.trim().parse::<u64>().ok().map(|v| Term::from_field_u64(field, v)),
        FieldType::Bool => value.trim().parse::<bool>().ok().map(|v| Term::from_field_bool(field, v)),
        FieldType::Text => Some(Term::from_field_text(field, value)),
        FieldType::Json => None,
    }
}

/// Resolves the fields a query runs against.
///
/// An explicit field must exist and satisfy `eligible`; otherwise every field
/// matching `default_scope` is used.
fn scope<'a>(
    ctx: &'a Context,
    search_fields: &[String],
    eligible: impl Fn(&FieldDefinition) -> bool,
    default_scope: impl Fn(&FieldDefinition) -> bool,
) -> Result<Vec<(&'a FieldDefinition, Field)>> {
    if search_fields.is_empty() {
        return Ok(ctx
            .schema()
            .entries()
            .iter()
            .filter(|(definition, _)| default_scope(definition))
            .map(|(definition, field)| (definition, *field))
            .collect());
    }

    search_fields
        .iter()
        .map(|name| match ctx.schema().get(name) {
            Some((definition, field)) if eligible(definition) => Ok((definition, field)),
            _ => Err(Error::field_not_found(ctx.name(), name)),
        })
        .collect()
}

/// Stored fields copied out of every matched document.
pub(crate) struct Projection {
    fields: Vec<String>,
}

impl Projection {
    /// Every name must be a stored field; an empty list selects all of them.
    pub(crate) fn new(ctx: &Context, return_fields: &[String]) -> Result<Self> {
        if return_fields.is_empty() {
            let fields = ctx
                .fields()
                .filter(|definition| definition.stored)
                .map(|definition| definition.name.clone())
                .collect();
            return Ok(Self { fields });
        }

        let mut fields = Vec::with_capacity(return_fields.len());
        for name in return_fields {
            match ctx.schema().get(name) {
                Some((definition, _)) if definition.stored => fields.push(name.clone()),
                _ => return Err(Error::field_not_found(ctx.name(), name)),
            }
        }
        Ok(Self { fields })
    }

    /// Single values are unwrapped, multi-values become arrays and fields the
    /// document has no value for are left out.
    pub(crate) fn project(
        &self,
        ctx: &Context,
        document: &TantivyDocument,
    ) -> Result<Map<String, Value>> {
        let mut named = document.to_named_doc(ctx.schema().tantivy_schema()).0;
        let mut data = Map::new();

        for name in &self.fields {
            let Some(mut values) = named.remove(name) else {
                continue;
            };
            let value = match values.len() {
                0 => continue,
                1 => serde_json::to_value(values.remove(0))?,
                _ => serde_json::to_value(values)?,
            };
            data.insert(name.clone(), value);
        }
        Ok(data)
    }
}
