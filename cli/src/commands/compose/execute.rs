use std::error::Error;
use std::fs;

use serde::Serialize;

use super::ComposeCmd;
use crate::commands::{Context, Execute};
use db::{Dialect, JoinClause, Predicate, SearchComposer, SearchRequest, SqlValue};

/// A composed search and its SQL rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ComposeResult {
    pub entity: String,
    pub dialect: Dialect,
    pub distinct: bool,
    pub joins: Vec<JoinClause>,
    pub predicates: Vec<Predicate>,
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl ComposeCmd {
    /// Request file first, then command-line filters and flags on top.
    fn build_request(&self) -> Result<SearchRequest, Box<dyn Error>> {
        let mut request = match &self.request {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                serde_json::from_str::<SearchRequest>(&content)
                    .map_err(|e| format!("Invalid search request in {}: {}", path.display(), e))?
            }
            None => SearchRequest::new(),
        };

        for (name, value) in &self.filters {
            request = request.param(name.as_str(), value.as_str());
        }
        if self.belongs_to {
            request = request.with_belongs_to(true);
        }
        if self.has_many {
            request = request.with_has_many(true);
        }
        if !self.only.is_empty() {
            request = request.with_custom_attributes(self.only.iter().map(String::as_str));
        }

        Ok(request)
    }
}

impl Execute for ComposeCmd {
    type Output = ComposeResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let request = self.build_request()?;
        tracing::debug!(entity = %self.entity, params = request.params.len(), "composing search");

        let query = SearchComposer::new(&ctx.registry).search(&self.entity, &request)?;
        let compiled = query.to_sql(ctx.dialect.dialect());

        Ok(ComposeResult {
            entity: self.entity,
            dialect: ctx.dialect,
            distinct: query.is_distinct(),
            joins: query.joins().to_vec(),
            predicates: query.predicates().to_vec(),
            sql: compiled.sql,
            params: compiled.params,
        })
    }
}
