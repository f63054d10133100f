//! # Entity Mapping
//!
//! `FromNode` for every entity except the Schema Object. Serialized keys
//! are spelled out at each read, so reserved words such as `in` map to
//! their Rust field names right here.

use super::{closed_enum, extensible_map, FromNode, MapResult, ObjectReader};
use crate::oas::models::{
    Callback, Components, Contact, Document, Encoding, EntityKind, Example, ExternalDocs, Header,
    Info, License, Link, MediaType, OAuthFlow, OAuthFlows, Operation, Parameter,
    ParameterLocation, ParameterStyle, PathItem, Paths, RequestBody, Response, Responses,
    SecurityScheme, SecuritySchemeType, Server, ServerVariable, Tag,
};
use crate::oas::node::{Node, NodePath};

impl FromNode for Document {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Document)?;
        Ok(Document {
            openapi: obj.optional("openapi")?,
            info: obj.optional("info")?,
            json_schema_dialect: obj.optional("jsonSchemaDialect")?,
            servers: obj.collection("servers")?,
            paths: obj.optional("paths")?,
            webhooks: obj.collection("webhooks")?,
            components: obj.optional("components")?,
            security: obj.optional("security")?,
            tags: obj.collection("tags")?,
            external_docs: obj.optional("externalDocs")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Info {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Info)?;
        Ok(Info {
            title: obj.required("title")?,
            summary: obj.optional("summary")?,
            description: obj.optional("description")?,
            terms_of_service: obj.optional("termsOfService")?,
            contact: obj.optional("contact")?,
            license: obj.optional("license")?,
            version: obj.required("version")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Contact {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Contact)?;
        Ok(Contact {
            name: obj.optional("name")?,
            url: obj.optional("url")?,
            email: obj.optional("email")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for License {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::License)?;
        Ok(License {
            name: obj.required("name")?,
            identifier: obj.optional("identifier")?,
            url: obj.optional("url")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Server {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Server)?;
        Ok(Server {
            url: obj.required("url")?,
            description: obj.optional("description")?,
            variables: obj.collection("variables")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for ServerVariable {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::ServerVariable)?;
        Ok(ServerVariable {
            enum_values: obj.optional("enum")?,
            default: obj.required("default")?,
            description: obj.optional("description")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Tag {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Tag)?;
        Ok(Tag {
            name: obj.required("name")?,
            description: obj.optional("description")?,
            external_docs: obj.optional("externalDocs")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for ExternalDocs {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::ExternalDocs)?;
        Ok(ExternalDocs {
            description: obj.optional("description")?,
            url: obj.required("url")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Paths {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let (items, extensions) = extensible_map(node, path, EntityKind::Paths)?;
        Ok(Paths { items, extensions })
    }
}

impl FromNode for Components {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Components)?;
        Ok(Components {
            schemas: obj.collection("schemas")?,
            responses: obj.collection("responses")?,
            parameters: obj.collection("parameters")?,
            examples: obj.collection("examples")?,
            request_bodies: obj.collection("requestBodies")?,
            headers: obj.collection("headers")?,
            security_schemes: obj.collection("securitySchemes")?,
            links: obj.collection("links")?,
            callbacks: obj.collection("callbacks")?,
            path_items: obj.collection("pathItems")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for PathItem {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::PathItem)?;
        Ok(PathItem {
            summary: obj.optional("summary")?,
            description: obj.optional("description")?,
            get: obj.optional("get")?,
            put: obj.optional("put")?,
            post: obj.optional("post")?,
            delete: obj.optional("delete")?,
            options: obj.optional("options")?,
            head: obj.optional("head")?,
            patch: obj.optional("patch")?,
            trace: obj.optional("trace")?,
            servers: obj.collection("servers")?,
            parameters: obj.collection("parameters")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Operation {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Operation)?;
        Ok(Operation {
            tags: obj.collection("tags")?,
            summary: obj.optional("summary")?,
            description: obj.optional("description")?,
            external_docs: obj.optional("externalDocs")?,
            operation_id: obj.optional("operationId")?,
            parameters: obj.collection("parameters")?,
            request_body: obj.optional("requestBody")?,
            responses: obj.optional("responses")?,
            callbacks: obj.collection("callbacks")?,
            deprecated: obj.optional("deprecated")?,
            security: obj.optional("security")?,
            servers: obj.collection("servers")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Responses {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let (items, extensions) = extensible_map(node, path, EntityKind::Responses)?;
        Ok(Responses { items, extensions })
    }
}

impl FromNode for ParameterLocation {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        closed_enum(node, path, &Self::ALL, Self::as_str)
    }
}

impl FromNode for ParameterStyle {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        closed_enum(node, path, &Self::ALL, Self::as_str)
    }
}

impl FromNode for SecuritySchemeType {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        closed_enum(node, path, &Self::ALL, Self::as_str)
    }
}

impl FromNode for Parameter {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Parameter)?;
        Ok(Parameter {
            name: obj.required("name")?,
            location: obj.required("in")?,
            description: obj.optional("description")?,
            required: obj.optional("required")?,
            deprecated: obj.optional("deprecated")?,
            allow_empty_value: obj.optional("allowEmptyValue")?,
            style: obj.optional("style")?,
            explode: obj.optional("explode")?,
            allow_reserved: obj.optional("allowReserved")?,
            schema: obj.optional("schema")?,
            example: obj.optional("example")?,
            examples: obj.collection("examples")?,
            content: obj.collection("content")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for RequestBody {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::RequestBody)?;
        Ok(RequestBody {
            description: obj.optional("description")?,
            content: obj.required("content")?,
            required: obj.optional("required")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Response {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Response)?;
        Ok(Response {
            description: obj.required("description")?,
            headers: obj.collection("headers")?,
            content: obj.collection("content")?,
            links: obj.collection("links")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for MediaType {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::MediaType)?;
        Ok(MediaType {
            schema: obj.optional("schema")?,
            example: obj.optional("example")?,
            examples: obj.collection("examples")?,
            encoding: obj.collection("encoding")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Encoding {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Encoding)?;
        Ok(Encoding {
            content_type: obj.optional("contentType")?,
            headers: obj.collection("headers")?,
            style: obj.optional("style")?,
            explode: obj.optional("explode")?,
            allow_reserved: obj.optional("allowReserved")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Example {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Example)?;
        Ok(Example {
            summary: obj.optional("summary")?,
            description: obj.optional("description")?,
            value: obj.optional("value")?,
            external_value: obj.optional("externalValue")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Link {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Link)?;
        Ok(Link {
            operation_ref: obj.optional("operationRef")?,
            operation_id: obj.optional("operationId")?,
            parameters: obj.collection("parameters")?,
            request_body: obj.optional("requestBody")?,
            description: obj.optional("description")?,
            server: obj.optional("server")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Header {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::Header)?;
        Ok(Header {
            description: obj.optional("description")?,
            required: obj.optional("required")?,
            deprecated: obj.optional("deprecated")?,
            allow_empty_value: obj.optional("allowEmptyValue")?,
            style: obj.optional("style")?,
            explode: obj.optional("explode")?,
            schema: obj.optional("schema")?,
            example: obj.optional("example")?,
            examples: obj.collection("examples")?,
            content: obj.collection("content")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for Callback {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let (expressions, extensions) = extensible_map(node, path, EntityKind::Callback)?;
        Ok(Callback {
            expressions,
            extensions,
        })
    }
}

impl FromNode for SecurityScheme {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::SecurityScheme)?;
        Ok(SecurityScheme {
            scheme_type: obj.required("type")?,
            description: obj.optional("description")?,
            name: obj.optional("name")?,
            location: obj.optional("in")?,
            scheme: obj.optional("scheme")?,
            bearer_format: obj.optional("bearerFormat")?,
            flows: obj.optional("flows")?,
            open_id_connect_url: obj.optional("openIdConnectUrl")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for OAuthFlows {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::OAuthFlows)?;
        Ok(OAuthFlows {
            implicit: obj.optional("implicit")?,
            password: obj.optional("password")?,
            client_credentials: obj.optional("clientCredentials")?,
            authorization_code: obj.optional("authorizationCode")?,
            extensions: obj.finish(),
        })
    }
}

impl FromNode for OAuthFlow {
    fn from_node(node: &Node, path: &NodePath) -> MapResult<Self> {
        let mut obj = ObjectReader::new(node, path, EntityKind::OAuthFlow)?;
        Ok(OAuthFlow {
            authorization_url: obj.optional("authorizationUrl")?,
            token_url: obj.optional("tokenUrl")?,
            refresh_url: obj.optional("refreshUrl")?,
            scopes: obj.required("scopes")?,
            extensions: obj.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::oas::mapper::map_document;
    use crate::oas::models::{ParameterLocation, ParameterStyle, RefOr, SecuritySchemeType};
    use crate::oas::node::Node;

    fn yaml(text: &str) -> Node {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_map_minimal_document() {
        let doc = map_document(&yaml(
            r#"
openapi: 3.1.0
info:
  title: Pets
  version: "1.0"
  x-audience: internal
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        '200':
          description: ok
  x-paths-ext: true
"#,
        ))
        .unwrap();

        let info = doc.info.as_ref().unwrap();
        assert_eq!(info.title, "Pets");
        assert_eq!(info.extensions.get("x-audience"), Some(&Node::from("internal")));

        let paths = doc.paths.as_ref().unwrap();
        assert!(paths.extensions.contains_key("x-paths-ext"));
        let item = paths.items.get("/pets").and_then(RefOr::item).unwrap();
        let op = item.get.as_ref().unwrap();
        assert_eq!(op.operation_id.as_deref(), Some("listPets"));
        assert_eq!(op.responses.as_ref().unwrap().items.len(), 1);
    }

    #[test]
    fn test_parameter_in_maps_to_location() {
        let doc = map_document(&yaml(
            r#"
components:
  parameters:
    Limit:
      name: limit
      in: query
      style: form
"#,
        ))
        .unwrap();
        let param = doc.components.as_ref().unwrap().parameters["Limit"]
            .item()
            .unwrap();
        assert_eq!(param.location, ParameterLocation::Query);
        assert_eq!(param.style, Some(ParameterStyle::Form));
    }

    #[test]
    fn test_invalid_parameter_location_fails_at_mapping() {
        let err = map_document(&yaml(
            r#"
components:
  parameters:
    Body:
      name: payload
      in: body
"#,
        ))
        .unwrap_err();
        assert_eq!(err.path, "#/components/parameters/Body/in");
        assert_eq!(err.expected, "one of query, header, path, cookie");
        assert_eq!(err.found, "string \"body\"");
    }

    #[test]
    fn test_invalid_style_fails_at_mapping() {
        let err = map_document(&yaml(
            r#"
components:
  headers:
    Rate:
      style: tabular
"#,
        ))
        .unwrap_err();
        assert_eq!(err.path, "#/components/headers/Rate/style");
    }

    #[test]
    fn test_security_scheme_type() {
        let doc = map_document(&yaml(
            r#"
components:
  securitySchemes:
    mtls:
      type: mutualTLS
    oauth:
      type: oauth2
      flows:
        clientCredentials:
          tokenUrl: https://example.com/token
          scopes:
            read: Read access
"#,
        ))
        .unwrap();
        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert_eq!(
            schemes["mtls"].item().unwrap().scheme_type,
            SecuritySchemeType::MutualTls
        );
        let oauth = schemes["oauth"].item().unwrap();
        let flow = oauth
            .flows
            .as_ref()
            .and_then(|f| f.client_credentials.as_ref())
            .unwrap();
        assert_eq!(flow.scopes["read"], "Read access");
    }

    #[test]
    fn test_missing_info_title_is_shape_error() {
        let err = map_document(&yaml(
            r#"
openapi: 3.1.0
info:
  version: "1"
"#,
        ))
        .unwrap_err();
        assert_eq!(err.path, "#/info/title");
    }

    #[test]
    fn test_reference_in_media_type_slot_rejected() {
        let err = map_document(&yaml(
            r#"
components:
  requestBodies:
    Body:
      content:
        application/json:
          $ref: '#/components/x'
"#,
        ))
        .unwrap_err();
        assert_eq!(
            err.path,
            "#/components/requestBodies/Body/content/application~1json"
        );
        assert_eq!(err.found, "reference");
    }

    #[test]
    fn test_callback_expressions() {
        let doc = map_document(&yaml(
            r#"
components:
  callbacks:
    onEvent:
      '{$request.body#/url}':
        post:
          responses:
            '200':
              description: ok
      x-note: kept
"#,
        ))
        .unwrap();
        let callback = doc.components.as_ref().unwrap().callbacks["onEvent"]
            .item()
            .unwrap();
        assert!(callback.expressions.contains_key("{$request.body#/url}"));
        assert!(callback.extensions.contains_key("x-note"));
    }
}
