//! Instance templates.

use super::{post, post_validated};
use crate::models::template::{TemplateEnvelope, TemplateList, TemplateRef};
use crate::models::{CreateTemplateRequest, CreateTemplateResponse, Template, TemplateListParams};
use novita_core::id::TemplateId;
use novita_core::query::QueryParams;
use novita_core::{ApiRequest, Executor, Operation};

/// Template operations.
#[derive(Debug, Clone)]
pub struct Templates<E> {
    executor: E,
}

impl<E: Executor> Templates<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List templates with default paging.
    pub fn list(&self) -> E::Output<Vec<Template>> {
        self.list_with(&TemplateListParams::default())
    }

    /// List templates matching `params`.
    pub fn list_with(&self, params: &TemplateListParams) -> E::Output<Vec<Template>> {
        let request = ApiRequest::get("templates").with_query(params.to_query());
        self.executor
            .execute(Operation::<TemplateList>::json(Ok(request)).map(|list| list.template))
    }

    /// Fetch a single template.
    pub fn get(&self, template_id: &TemplateId) -> E::Output<Template> {
        let request = ApiRequest::get("template")
            .with_query(QueryParams::new().with("templateId", template_id));
        self.executor.execute(
            Operation::<TemplateEnvelope>::json(Ok(request)).map(TemplateEnvelope::into_inner),
        )
    }

    /// Create a template.
    pub fn create(&self, request: &CreateTemplateRequest) -> E::Output<CreateTemplateResponse> {
        self.executor.execute(Operation::<CreateTemplateResponse>::json(
            post_validated("template/create", request),
        ))
    }

    /// Delete a template.
    pub fn delete(&self, template_id: &TemplateId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("template/delete", &TemplateRef { template_id })))
    }
}
