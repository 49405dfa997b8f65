//! Instance template models.

use super::instance::{EnvVar, PortSpec};
use novita_core::id::{RegistryAuthId, TemplateId};
use novita_core::query::QueryParams;
use novita_core::serde_helpers::{null_as_default, option_from_str_or_number};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A reusable instance template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Template ID
    #[serde(alias = "Id")]
    pub id: TemplateId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Template type (`instance`, `serverless`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Visibility channel (`private`, `community`, `official`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Markdown description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Container image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Registry credential for the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_auth: Option<RegistryAuthId>,
    /// Start command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    /// Root filesystem size in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rootfs_size: Option<u32>,
    /// Exposed ports
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<PortSpec>,
    /// Environment variables
    #[serde(default, deserialize_with = "null_as_default")]
    pub envs: Vec<EnvVar>,
    /// Minimum CUDA version required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cuda_version: Option<String>,
    /// Creation time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Filters accepted by the template list endpoint.
#[derive(Debug, Default, Clone)]
pub struct TemplateListParams {
    /// Page size
    pub page_size: Option<u32>,
    /// Page number
    pub page_num: Option<u32>,
    /// Filter by template type
    pub kind: Option<String>,
    /// Filter by channel
    pub channel: Option<String>,
}

impl TemplateListParams {
    /// Convert the parameters into query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("pageSize", self.page_size);
        params.push_opt("pageNum", self.page_num);
        params.push_opt("type", self.kind.as_deref());
        params.push_opt("channel", self.channel.as_deref());
        params
    }
}

/// Request body for creating a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,
    /// Container image
    #[validate(length(min = 1))]
    pub image: String,
    /// Template type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Visibility channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Markdown description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Registry credential for the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_auth: Option<RegistryAuthId>,
    /// Start command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    /// Root filesystem size in GB
    #[validate(range(min = 20, max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs_size: Option<u32>,
    /// Exposed ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortSpec>,
    /// Environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
}

/// Response of template creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateResponse {
    /// ID of the new template
    #[serde(alias = "id")]
    pub template_id: TemplateId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateList {
    #[serde(alias = "templates", deserialize_with = "null_as_default")]
    pub(crate) template: Vec<Template>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TemplateEnvelope {
    Wrapped { template: Template },
    Bare(Template),
}

impl TemplateEnvelope {
    pub(crate) fn into_inner(self) -> Template {
        match self {
            Self::Wrapped { template } | Self::Bare(template) => template,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateRef<'a> {
    pub(crate) template_id: &'a TemplateId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_envelopes() {
        let tpl = json!({"id": "tpl-1", "name": "PyTorch", "type": "instance", "rootfsSize": "60"});
        let bare: TemplateEnvelope = serde_json::from_value(tpl.clone()).unwrap();
        let wrapped: TemplateEnvelope = serde_json::from_value(json!({"template": tpl})).unwrap();
        let bare = bare.into_inner();
        assert_eq!(bare, wrapped.into_inner());
        assert_eq!(bare.rootfs_size, Some(60));
        assert_eq!(bare.kind.as_deref(), Some("instance"));
    }

    #[test]
    fn test_list_aliases() {
        let a: TemplateList = serde_json::from_value(json!({"template": [{"id": "t"}]})).unwrap();
        let b: TemplateList = serde_json::from_value(json!({"templates": [{"id": "t"}]})).unwrap();
        assert_eq!(a.template, b.template);
    }
}
