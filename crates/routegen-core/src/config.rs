use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.routegen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutegenConfig {
    pub input: String,
    pub output: String,
    pub naming: NamingConfig,
    pub modules: ModulesConfig,
    pub responses: ResponsesConfig,
    pub extract: ExtractConfig,
    pub types: TypesConfig,
}

impl Default for RoutegenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "routes.json".to_string(),
            naming: NamingConfig::default(),
            modules: ModulesConfig::default(),
            responses: ResponsesConfig::default(),
            extract: ExtractConfig::default(),
            types: TypesConfig::default(),
        }
    }
}

/// Naming strategy, aliases and the route name template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from rendered route name to custom alias.
    pub aliases: IndexMap<String, String>,
    /// minijinja source replacing the built-in route name template.
    pub route_name_template: Option<String>,
}

/// How route names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    UseOperationId,
    UseRouteBased,
}

/// Module assignment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub first_tag: bool,
    pub path_index: usize,
    pub sort_routes: bool,
}

/// Response classification.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResponsesConfig {
    pub default_as_success: bool,
    /// Inclusive `[low, high]` range of success codes.
    pub success_range: [u16; 2],
    pub default_response_type: Option<String>,
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            default_as_success: false,
            success_range: [200, 299],
            default_response_type: None,
        }
    }
}

/// Which inline schemas become components, and their name suffixes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub request_body: bool,
    pub request_params: bool,
    pub response_body: bool,
    pub response_error: bool,
    pub request_body_suffixes: Vec<String>,
    pub request_params_suffixes: Vec<String>,
    pub response_body_suffixes: Vec<String>,
    pub response_error_suffixes: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        let defaults = crate::transform::ExtractOptions::default();
        Self {
            request_body: defaults.request_body,
            request_params: defaults.request_params,
            response_body: defaults.response_body,
            response_error: defaults.response_error,
            request_body_suffixes: defaults.request_body_suffixes,
            request_params_suffixes: defaults.request_params_suffixes,
            response_body_suffixes: defaults.response_body_suffixes,
            response_error_suffixes: defaults.response_error_suffixes,
        }
    }
}

/// Affixes applied to every formatted type name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    pub prefix: String,
    pub suffix: String,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".routegen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RoutegenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: RoutegenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# routegen configuration
input: openapi.yaml
output: routes.json

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # listPets: pets           # rendered route name -> custom name
  # route_name_template: "{{ method }}{{ route_based_name | pascal_case }}"

modules:
  first_tag: false      # name modules after the first tag
  path_index: 0         # otherwise, which path segment names the module
  sort_routes: false

responses:
  default_as_success: false
  success_range: [200, 299]
  # default_response_type: void

extract:
  request_body: false
  request_params: false
  response_body: false
  response_error: false
  request_body_suffixes: [Payload, Body, Input]
  request_params_suffixes: [Params]
  response_body_suffixes: [Data, Result, Output]
  response_error_suffixes: [Error, Fail, Fails, ErrorData, HttpError, BadResponse]

types:
  prefix: ""
  suffix: ""
"#
}
