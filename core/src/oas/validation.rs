#![deny(missing_docs)]

//! # OpenAPI Validation
//!
//! Consistency checks run on a mapped (normally fully resolved) document.
//! Checks are independent, so every violation is collected rather than
//! stopping at the first. Slots still holding a reference are skipped.
//!
//! - `openapi` and `info` are present, `info.title`/`info.version` non-blank.
//! - At least one of `paths` or `webhooks` is present.
//! - Every Operation declares at least one response; `operationId`s are unique.
//! - Path parameters are `required: true`; headers do not carry `name`/`in`.
//! - Tag names are unique.
//! - Server variable enums, when present, are non-empty and contain the default.
//! - Security schemes carry the fields their type needs.
//! - Discriminator mappings name schemas present in `components.schemas`,
//!   wherever the discriminator sits: nested schemas, bodies, responses,
//!   parameters and headers included.
//! - Component keys match `^[a-zA-Z0-9._-]+$`.

use crate::error::{ValidationError, ValidationRule};
use crate::oas::models::{
    BoolOrSchema, Callback, Components, Document, Header, MediaType, Operation, Parameter,
    ParameterLocation, PathItem, RefOr, RequestBody, Response, Schema, SecurityScheme,
    SecuritySchemeType, Server,
};
use crate::oas::node::NodePath;
use crate::oas::ref_utils::{extract_component_name, parse_reference};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::{HashMap, HashSet};

const COMPONENT_KEY_PATTERN: &str = r"^[a-zA-Z0-9._-]+$";

/// Returns every violation found in `doc`, in document order.
pub fn validate(doc: &Document) -> Vec<ValidationError> {
    let mut checker = Checker::default();
    checker.check_root(doc);
    checker.violations
}

/// Returns the first violation found in `doc`, if any.
pub fn validate_or_fail(doc: &Document) -> Result<(), ValidationError> {
    match validate(doc).into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<ValidationError>,
    operation_ids: HashMap<String, String>,
    schema_names: HashSet<String>,
}

impl Checker {
    fn report(&mut self, path: &NodePath, rule: ValidationRule, message: impl Into<String>) {
        self.violations.push(ValidationError {
            path: path.to_string(),
            rule,
            message: message.into(),
        });
    }

    fn require_non_blank(&mut self, path: &NodePath, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.report(path, ValidationRule::NonBlank, format!("'{}' must not be blank", field));
        }
    }

    fn check_root(&mut self, doc: &Document) {
        let root = NodePath::root();
        self.schema_names = doc
            .components
            .iter()
            .flat_map(|c| c.schemas.keys().cloned())
            .collect();

        match &doc.openapi {
            None => self.report(
                &root.push("openapi"),
                ValidationRule::RequiredField,
                "'openapi' is required",
            ),
            Some(version) => self.require_non_blank(&root.push("openapi"), "openapi", version),
        }

        match &doc.info {
            None => self.report(
                &root.push("info"),
                ValidationRule::RequiredField,
                "'info' is required",
            ),
            Some(info) => {
                let path = root.push("info");
                self.require_non_blank(&path.push("title"), "title", &info.title);
                self.require_non_blank(&path.push("version"), "version", &info.version);
            }
        }

        if doc.paths.is_none() && doc.webhooks.is_empty() {
            self.report(
                &root,
                ValidationRule::RequiredField,
                "one of 'paths' or 'webhooks' is required",
            );
        }

        self.check_tags(doc);
        self.check_servers(&doc.servers, &root.push("servers"));

        if let Some(paths) = &doc.paths {
            let base = root.push("paths");
            for (template, item) in &paths.items {
                self.check_path_item(item, &base.push(template));
            }
        }
        let base = root.push("webhooks");
        for (name, item) in &doc.webhooks {
            self.check_path_item(item, &base.push(name));
        }

        if let Some(components) = &doc.components {
            self.check_components(components, &root.push("components"));
        }
    }

    fn check_tags(&mut self, doc: &Document) {
        let mut seen = HashSet::new();
        let base = NodePath::root().push("tags");
        for (idx, tag) in doc.tags.iter().enumerate() {
            if !seen.insert(tag.name.as_str()) {
                self.report(
                    &base.index(idx).push("name"),
                    ValidationRule::UniqueTag,
                    format!("duplicate tag name '{}'", tag.name),
                );
            }
        }
    }

    fn check_servers(&mut self, servers: &[Server], base: &NodePath) {
        for (idx, server) in servers.iter().enumerate() {
            let vars = base.index(idx).push("variables");
            for (name, var) in &server.variables {
                let Some(allowed) = &var.enum_values else {
                    continue;
                };
                let path = vars.push(name);
                if allowed.is_empty() {
                    self.report(
                        &path.push("enum"),
                        ValidationRule::ServerVariable,
                        format!("server variable '{}' has an empty enum", name),
                    );
                } else if !allowed.contains(&var.default) {
                    self.report(
                        &path.push("default"),
                        ValidationRule::ServerVariable,
                        format!(
                            "default '{}' of server variable '{}' is not in its enum",
                            var.default, name
                        ),
                    );
                }
            }
        }
    }

    fn check_path_item(&mut self, slot: &RefOr<PathItem>, path: &NodePath) {
        let Some(item) = slot.item() else {
            return;
        };
        self.check_servers(&item.servers, &path.push("servers"));
        self.check_parameters(&item.parameters, &path.push("parameters"));
        for (method, op) in item.operations() {
            self.check_operation(op, &path.push(method));
        }
    }

    fn check_operation(&mut self, op: &Operation, path: &NodePath) {
        if op.responses.as_ref().is_none_or(|r| r.is_empty()) {
            self.report(
                &path.push("responses"),
                ValidationRule::NonEmptyResponses,
                "operation must declare at least one response",
            );
        }

        if let Some(id) = &op.operation_id {
            let id_path = path.push("operationId");
            match self.operation_ids.get(id) {
                Some(first) => {
                    let message = format!("duplicate operationId '{}' (first declared at {})", id, first);
                    self.report(&id_path, ValidationRule::UniqueOperationId, message);
                }
                None => {
                    self.operation_ids.insert(id.clone(), id_path.to_string());
                }
            }
        }

        self.check_servers(&op.servers, &path.push("servers"));
        self.check_parameters(&op.parameters, &path.push("parameters"));

        if let Some(RefOr::T(body)) = &op.request_body {
            self.check_request_body(body, &path.push("requestBody"));
        }
        if let Some(responses) = &op.responses {
            let base = path.push("responses");
            for (code, slot) in &responses.items {
                if let Some(response) = slot.item() {
                    self.check_response(response, &base.push(code));
                }
            }
        }

        let base = path.push("callbacks");
        for (name, slot) in &op.callbacks {
            if let Some(callback) = slot.item() {
                self.check_callback(callback, &base.push(name));
            }
        }
    }

    fn check_callback(&mut self, callback: &Callback, path: &NodePath) {
        for (expression, item) in &callback.expressions {
            self.check_path_item(item, &path.push(expression));
        }
    }

    fn check_parameters(&mut self, params: &[RefOr<Parameter>], base: &NodePath) {
        for (idx, slot) in params.iter().enumerate() {
            if let Some(param) = slot.item() {
                self.check_parameter(param, &base.index(idx));
            }
        }
    }

    fn check_parameter(&mut self, param: &Parameter, path: &NodePath) {
        if param.location == ParameterLocation::Path && param.required != Some(true) {
            self.report(
                &path.push("required"),
                ValidationRule::PathParameterRequired,
                format!("path parameter '{}' must be required", param.name),
            );
        }
        if let Some(schema) = &param.schema {
            self.check_schema_slot(schema, &path.push("schema"));
        }
        self.check_content(&param.content, &path.push("content"));
    }

    fn check_request_body(&mut self, body: &RequestBody, path: &NodePath) {
        self.check_content(&body.content, &path.push("content"));
    }

    fn check_response(&mut self, response: &Response, path: &NodePath) {
        self.check_headers(&response.headers, &path.push("headers"));
        self.check_content(&response.content, &path.push("content"));
    }

    fn check_headers(&mut self, headers: &IndexMap<String, RefOr<Header>>, base: &NodePath) {
        for (name, slot) in headers {
            if let Some(header) = slot.item() {
                self.check_header(header, &base.push(name));
            }
        }
    }

    fn check_header(&mut self, header: &Header, path: &NodePath) {
        for key in ["name", "in"] {
            if header.extensions.contains_key(key) {
                self.report(
                    &path.push(key),
                    ValidationRule::ParameterLocation,
                    format!("header objects must not declare '{}'", key),
                );
            }
        }
        if let Some(schema) = &header.schema {
            self.check_schema_slot(schema, &path.push("schema"));
        }
        self.check_content(&header.content, &path.push("content"));
    }

    fn check_content(&mut self, content: &IndexMap<String, MediaType>, base: &NodePath) {
        for (media_type, media) in content {
            let path = base.push(media_type);
            if let Some(schema) = &media.schema {
                self.check_schema_slot(schema, &path.push("schema"));
            }
            let encodings = path.push("encoding");
            for (property, encoding) in &media.encoding {
                self.check_headers(&encoding.headers, &encodings.push(property).push("headers"));
            }
        }
    }

    fn check_schema_slot(&mut self, slot: &RefOr<Schema>, path: &NodePath) {
        if let RefOr::T(schema) = slot {
            self.check_schema(schema, path);
        }
    }

    /// Checks `schema` and every inline sub-schema below it.
    fn check_schema(&mut self, schema: &Schema, path: &NodePath) {
        self.check_discriminator(schema, path);

        let singles = [
            ("contentSchema", &schema.content_schema),
            ("items", &schema.items),
            ("contains", &schema.contains),
            ("propertyNames", &schema.property_names),
            ("not", &schema.not),
            ("if", &schema.if_schema),
            ("then", &schema.then_schema),
            ("else", &schema.else_schema),
        ];
        for (key, child) in singles {
            if let Some(child) = child {
                self.check_schema_slot(child, &path.push(key));
            }
        }

        let flags = [
            ("unevaluatedItems", &schema.unevaluated_items),
            ("additionalProperties", &schema.additional_properties),
            ("unevaluatedProperties", &schema.unevaluated_properties),
        ];
        for (key, child) in flags {
            if let Some(BoolOrSchema::Schema(child)) = child {
                self.check_schema_slot(child, &path.push(key));
            }
        }

        let lists = [
            ("prefixItems", &schema.prefix_items),
            ("allOf", &schema.all_of),
            ("anyOf", &schema.any_of),
            ("oneOf", &schema.one_of),
        ];
        for (key, children) in lists {
            let base = path.push(key);
            for (idx, child) in children.iter().enumerate() {
                self.check_schema_slot(child, &base.index(idx));
            }
        }

        let maps = [
            ("properties", &schema.properties),
            ("patternProperties", &schema.pattern_properties),
            ("dependentSchemas", &schema.dependent_schemas),
        ];
        for (key, children) in maps {
            let base = path.push(key);
            for (name, child) in children {
                self.check_schema_slot(child, &base.push(name));
            }
        }
    }

    fn check_components(&mut self, components: &Components, path: &NodePath) {
        self.check_component_keys(components, path);

        let base = path.push("schemas");
        for (name, slot) in &components.schemas {
            self.check_schema_slot(slot, &base.push(name));
        }

        let base = path.push("responses");
        for (name, slot) in &components.responses {
            if let Some(response) = slot.item() {
                self.check_response(response, &base.push(name));
            }
        }

        let base = path.push("requestBodies");
        for (name, slot) in &components.request_bodies {
            if let Some(body) = slot.item() {
                self.check_request_body(body, &base.push(name));
            }
        }

        let base = path.push("parameters");
        for (name, slot) in &components.parameters {
            if let Some(param) = slot.item() {
                self.check_parameter(param, &base.push(name));
            }
        }

        self.check_headers(&components.headers, &path.push("headers"));

        let base = path.push("securitySchemes");
        for (name, slot) in &components.security_schemes {
            if let Some(scheme) = slot.item() {
                self.check_security_scheme(scheme, name, &base.push(name));
            }
        }

        let base = path.push("pathItems");
        for (name, item) in &components.path_items {
            self.check_path_item(item, &base.push(name));
        }

        let base = path.push("callbacks");
        for (name, slot) in &components.callbacks {
            if let Some(callback) = slot.item() {
                self.check_callback(callback, &base.push(name));
            }
        }
    }

    fn check_component_keys(&mut self, components: &Components, path: &NodePath) {
        let Ok(key_re) = Regex::new(COMPONENT_KEY_PATTERN) else {
            return;
        };
        let sections: [(&str, Vec<&String>); 10] = [
            ("schemas", components.schemas.keys().collect()),
            ("responses", components.responses.keys().collect()),
            ("parameters", components.parameters.keys().collect()),
            ("examples", components.examples.keys().collect()),
            ("requestBodies", components.request_bodies.keys().collect()),
            ("headers", components.headers.keys().collect()),
            ("securitySchemes", components.security_schemes.keys().collect()),
            ("links", components.links.keys().collect()),
            ("callbacks", components.callbacks.keys().collect()),
            ("pathItems", components.path_items.keys().collect()),
        ];
        for (section, keys) in sections {
            for key in keys {
                if !key_re.is_match(key) {
                    self.report(
                        &path.push(section).push(key),
                        ValidationRule::ComponentKey,
                        format!("component key '{}' must match {}", key, COMPONENT_KEY_PATTERN),
                    );
                }
            }
        }
    }

    fn check_security_scheme(&mut self, scheme: &SecurityScheme, name: &str, path: &NodePath) {
        match scheme.scheme_type {
            SecuritySchemeType::ApiKey => {
                if scheme.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
                    self.report(
                        &path.push("name"),
                        ValidationRule::SecurityScheme,
                        format!("apiKey scheme '{}' must declare 'name'", name),
                    );
                }
                match scheme.location {
                    None => self.report(
                        &path.push("in"),
                        ValidationRule::SecurityScheme,
                        format!("apiKey scheme '{}' must declare 'in'", name),
                    ),
                    Some(ParameterLocation::Path) => self.report(
                        &path.push("in"),
                        ValidationRule::ParameterLocation,
                        format!("apiKey scheme '{}' must be in query, header or cookie", name),
                    ),
                    Some(_) => {}
                }
            }
            SecuritySchemeType::Http => {
                if scheme.scheme.as_deref().is_none_or(|s| s.trim().is_empty()) {
                    self.report(
                        &path.push("scheme"),
                        ValidationRule::SecurityScheme,
                        format!("http scheme '{}' must declare 'scheme'", name),
                    );
                }
            }
            SecuritySchemeType::OAuth2 => {
                if scheme.flows.is_none() {
                    self.report(
                        &path.push("flows"),
                        ValidationRule::SecurityScheme,
                        format!("oauth2 scheme '{}' must declare 'flows'", name),
                    );
                }
            }
            SecuritySchemeType::OpenIdConnect => {
                let missing = scheme
                    .open_id_connect_url
                    .as_deref()
                    .is_none_or(|url| url.trim().is_empty());
                if missing {
                    self.report(
                        &path.push("openIdConnectUrl"),
                        ValidationRule::SecurityScheme,
                        format!("openIdConnect scheme '{}' must declare 'openIdConnectUrl'", name),
                    );
                }
            }
            SecuritySchemeType::MutualTls => {}
        }
    }

    fn check_discriminator(&mut self, schema: &Schema, path: &NodePath) {
        let Some(discriminator) = &schema.discriminator else {
            return;
        };
        let base = path.push("discriminator").push("mapping");
        for (value, target) in &discriminator.mapping {
            let Some(name) = mapping_schema_name(target) else {
                continue;
            };
            if !self.schema_names.contains(&name) {
                self.report(
                    &base.push(value),
                    ValidationRule::DiscriminatorMapping,
                    format!("discriminator value '{}' maps to unknown schema '{}'", value, name),
                );
            }
        }
    }
}

/// Local schema name a discriminator mapping value points at.
///
/// Values are either bare schema names or references. External references
/// yield `None`; local references outside `components.schemas` yield the
/// raw value, which never matches a schema name.
fn mapping_schema_name(target: &str) -> Option<String> {
    if !target.contains('#') && !target.contains('/') && !target.ends_with(".yaml")
        && !target.ends_with(".yml") && !target.ends_with(".json")
    {
        return Some(target.to_string());
    }
    if !parse_reference(target).is_local() {
        return None;
    }
    Some(extract_component_name(target, "schemas").unwrap_or_else(|| target.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::mapper::map_document;

    fn check(yaml: &str) -> Vec<ValidationError> {
        let node = serde_yaml::from_str(yaml).unwrap();
        validate(&map_document(&node).unwrap())
    }

    fn rules(violations: &[ValidationError]) -> Vec<ValidationRule> {
        violations.iter().map(|v| v.rule).collect()
    }

    const VALID: &str = r#"
openapi: 3.1.0
info:
  title: Pets
  version: "1.0"
paths:
  /pets/{id}:
    get:
      operationId: getPet
      parameters:
        - name: id
          in: path
          required: true
      responses:
        '200':
          description: ok
"#;

    #[test]
    fn test_valid_document_has_no_violations() {
        assert!(check(VALID).is_empty());
        let node = serde_yaml::from_str(VALID).unwrap();
        assert!(validate_or_fail(&map_document(&node).unwrap()).is_ok());
    }

    #[test]
    fn test_missing_info_and_openapi() {
        let violations = check("paths: {}\n");
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["#/openapi", "#/info"]);
        assert!(violations.iter().all(|v| v.rule == ValidationRule::RequiredField));
        assert!(violations[1].message.contains("'info'"));
    }

    #[test]
    fn test_paths_or_webhooks_required() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
components: {}
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "#");
        assert_eq!(violations[0].rule, ValidationRule::RequiredField);
    }

    #[test]
    fn test_blank_info_fields() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: "  ", version: ""}
paths: {}
"#,
        );
        assert_eq!(rules(&violations), vec![ValidationRule::NonBlank; 2]);
        assert_eq!(violations[0].path, "#/info/title");
    }

    #[test]
    fn test_collects_all_operation_violations() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths:
  /a/{id}:
    get:
      operationId: dup
      parameters:
        - {name: id, in: path}
      responses: {}
  /b:
    post:
      operationId: dup
"#,
        );
        assert_eq!(
            rules(&violations),
            vec![
                ValidationRule::NonEmptyResponses,
                ValidationRule::PathParameterRequired,
                ValidationRule::NonEmptyResponses,
                ValidationRule::UniqueOperationId,
            ]
        );
        assert_eq!(violations[3].path, "#/paths/~1b/post/operationId");
        assert!(violations[3].message.contains("#/paths/~1a~1{id}/get/operationId"));
    }

    #[test]
    fn test_webhook_and_callback_operations_checked() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
webhooks:
  newPet:
    post:
      callbacks:
        ack:
          '{$request.body#/url}':
            post: {}
"#,
        );
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "#/webhooks/newPet/post/responses",
                "#/webhooks/newPet/post/callbacks/ack/{$request.body#~1url}/post/responses",
            ]
        );
    }

    #[test]
    fn test_duplicate_tags_and_server_variables() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths: {}
tags:
  - name: pets
  - name: pets
servers:
  - url: https://{env}.example.com/{v}
    variables:
      env: {default: prod, enum: [dev, staging]}
      v: {default: v1, enum: []}
"#,
        );
        assert_eq!(
            rules(&violations),
            vec![
                ValidationRule::UniqueTag,
                ValidationRule::ServerVariable,
                ValidationRule::ServerVariable,
            ]
        );
        assert_eq!(violations[1].path, "#/servers/0/variables/env/default");
        assert_eq!(violations[2].path, "#/servers/0/variables/v/enum");
    }

    #[test]
    fn test_security_scheme_requirements() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths: {}
components:
  securitySchemes:
    key: {type: apiKey, in: path}
    basic: {type: http}
    oauth: {type: oauth2}
    oidc: {type: openIdConnect}
    tls: {type: mutualTLS}
"#,
        );
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "#/components/securitySchemes/key/name",
                "#/components/securitySchemes/key/in",
                "#/components/securitySchemes/basic/scheme",
                "#/components/securitySchemes/oauth/flows",
                "#/components/securitySchemes/oidc/openIdConnectUrl",
            ]
        );
        assert_eq!(violations[1].rule, ValidationRule::ParameterLocation);
    }

    #[test]
    fn test_discriminator_mapping_targets() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths: {}
components:
  schemas:
    Cat: {type: object}
    Pet:
      oneOf:
        - $ref: '#/components/schemas/Cat'
      discriminator:
        propertyName: kind
        mapping:
          cat: '#/components/schemas/Cat'
          dog: '#/components/schemas/Dog'
          bird: Bird
          fish: 'other.yaml#/components/schemas/Fish'
"#,
        );
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "discriminator value 'dog' maps to unknown schema 'Dog'",
                "discriminator value 'bird' maps to unknown schema 'Bird'",
            ]
        );
        assert_eq!(
            violations[0].path,
            "#/components/schemas/Pet/discriminator/mapping/dog"
        );
    }

    #[test]
    fn test_nested_discriminators_are_checked() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths:
  /owners:
    get:
      parameters:
        - name: filter
          in: query
          content:
            application/json:
              schema:
                anyOf:
                  - discriminator:
                      propertyName: kind
                      mapping: {fish: Fish}
      responses:
        '200':
          description: ok
          headers:
            X-Pet:
              schema:
                discriminator:
                  propertyName: kind
                  mapping: {bird: Bird}
components:
  schemas:
    Cat: {type: object}
    Owner:
      type: object
      properties:
        pet:
          discriminator:
            propertyName: kind
            mapping:
              cat: '#/components/schemas/Cat'
              dog: '#/components/schemas/Dog'
  requestBodies:
    B:
      content:
        application/json:
          schema:
            type: array
            items:
              discriminator:
                propertyName: kind
                mapping:
                  dog: '#/components/schemas/Dog'
"#,
        );
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "#/paths/~1owners/get/parameters/0/content/application~1json/schema/anyOf/0/discriminator/mapping/fish",
                "#/paths/~1owners/get/responses/200/headers/X-Pet/schema/discriminator/mapping/bird",
                "#/components/schemas/Owner/properties/pet/discriminator/mapping/dog",
                "#/components/requestBodies/B/content/application~1json/schema/items/discriminator/mapping/dog",
            ]
        );
        assert!(violations
            .iter()
            .all(|v| v.rule == ValidationRule::DiscriminatorMapping));
    }

    #[test]
    fn test_component_keys_and_header_fields() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths: {}
components:
  schemas:
    "Bad Name": {type: string}
  headers:
    X-Rate:
      in: header
      schema: {type: integer}
"#,
        );
        assert_eq!(
            rules(&violations),
            vec![ValidationRule::ComponentKey, ValidationRule::ParameterLocation]
        );
        assert_eq!(violations[1].path, "#/components/headers/X-Rate/in");
    }

    #[test]
    fn test_validate_or_fail_returns_first() {
        let node = serde_yaml::from_str("paths: {}\n").unwrap();
        let err = validate_or_fail(&map_document(&node).unwrap()).unwrap_err();
        assert_eq!(err.path, "#/openapi");
    }

    #[test]
    fn test_references_are_skipped() {
        let violations = check(
            r#"
openapi: 3.1.0
info: {title: T, version: "1"}
paths:
  /a:
    $ref: '#/components/pathItems/A'
"#,
        );
        assert!(violations.is_empty());
    }
}
