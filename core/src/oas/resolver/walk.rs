//! # Reference Walk
//!
//! Per-entity traversal: each entity visits the child slots that can hold a
//! reference, directly or further down.

use super::{Frame, ResolveResult, Resolver};
use crate::oas::mapper::FromNode;
use crate::oas::models::{
    BoolOrSchema, Callback, Components, Document, Encoding, Example, Header, Link, MediaType,
    Operation, Parameter, PathItem, Paths, RefOr, Reference, RequestBody, Response, Responses,
    Schema, SecurityScheme,
};
use indexmap::IndexMap;

/// Entities whose references can be resolved in place.
pub trait ResolveRefs {
    /// Replaces every reference reachable from `self`. Local targets are
    /// looked up in `frame`.
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()>;

    /// Applies the `summary`/`description` a reference carries to the value
    /// it resolved to. Kinds without those fields ignore them.
    fn apply_reference_overrides(&mut self, _reference: &Reference) {}
}

impl<T: FromNode + ResolveRefs> ResolveRefs for RefOr<T> {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        match self {
            RefOr::T(item) => item.resolve_refs(resolver, frame),
            RefOr::Ref(reference) => {
                let mut item: T = resolver.resolve_reference(reference, frame)?;
                item.apply_reference_overrides(reference);
                *self = RefOr::T(item);
                Ok(())
            }
        }
    }
}

impl<T: ResolveRefs> ResolveRefs for Option<T> {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        match self {
            Some(item) => item.resolve_refs(resolver, frame),
            None => Ok(()),
        }
    }
}

impl<T: ResolveRefs> ResolveRefs for Box<T> {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        (**self).resolve_refs(resolver, frame)
    }
}

impl<T: ResolveRefs> ResolveRefs for Vec<T> {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.iter_mut()
            .try_for_each(|item| item.resolve_refs(resolver, frame))
    }
}

impl<T: ResolveRefs> ResolveRefs for IndexMap<String, T> {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.values_mut()
            .try_for_each(|item| item.resolve_refs(resolver, frame))
    }
}

impl ResolveRefs for Document {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.paths.resolve_refs(resolver, frame)?;
        self.webhooks.resolve_refs(resolver, frame)?;
        self.components.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Paths {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.items.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Components {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.schemas.resolve_refs(resolver, frame)?;
        self.responses.resolve_refs(resolver, frame)?;
        self.parameters.resolve_refs(resolver, frame)?;
        self.examples.resolve_refs(resolver, frame)?;
        self.request_bodies.resolve_refs(resolver, frame)?;
        self.headers.resolve_refs(resolver, frame)?;
        self.security_schemes.resolve_refs(resolver, frame)?;
        self.links.resolve_refs(resolver, frame)?;
        self.callbacks.resolve_refs(resolver, frame)?;
        self.path_items.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for PathItem {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.parameters.resolve_refs(resolver, frame)?;
        self.operations_mut()
            .try_for_each(|op| op.resolve_refs(resolver, frame))
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.summary, &reference.summary);
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for Operation {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.parameters.resolve_refs(resolver, frame)?;
        self.request_body.resolve_refs(resolver, frame)?;
        self.responses.resolve_refs(resolver, frame)?;
        self.callbacks.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Responses {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.items.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Response {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.headers.resolve_refs(resolver, frame)?;
        self.content.resolve_refs(resolver, frame)?;
        self.links.resolve_refs(resolver, frame)
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        if let Some(description) = &reference.description {
            self.description = description.clone();
        }
    }
}

impl ResolveRefs for Parameter {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.schema.resolve_refs(resolver, frame)?;
        self.examples.resolve_refs(resolver, frame)?;
        self.content.resolve_refs(resolver, frame)
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for Header {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.schema.resolve_refs(resolver, frame)?;
        self.examples.resolve_refs(resolver, frame)?;
        self.content.resolve_refs(resolver, frame)
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for RequestBody {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.content.resolve_refs(resolver, frame)
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for MediaType {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.schema.resolve_refs(resolver, frame)?;
        self.examples.resolve_refs(resolver, frame)?;
        self.encoding.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Encoding {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.headers.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Callback {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.expressions.resolve_refs(resolver, frame)
    }
}

impl ResolveRefs for Example {
    fn resolve_refs(&mut self, _: &mut Resolver<'_>, _: &Frame) -> ResolveResult<()> {
        Ok(())
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.summary, &reference.summary);
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for Link {
    fn resolve_refs(&mut self, _: &mut Resolver<'_>, _: &Frame) -> ResolveResult<()> {
        Ok(())
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for SecurityScheme {
    fn resolve_refs(&mut self, _: &mut Resolver<'_>, _: &Frame) -> ResolveResult<()> {
        Ok(())
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.description, &reference.description);
    }
}

impl ResolveRefs for BoolOrSchema {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        match self {
            BoolOrSchema::Bool(_) => Ok(()),
            BoolOrSchema::Schema(schema) => schema.resolve_refs(resolver, frame),
        }
    }
}

impl ResolveRefs for Schema {
    fn resolve_refs(&mut self, resolver: &mut Resolver<'_>, frame: &Frame) -> ResolveResult<()> {
        self.content_schema.resolve_refs(resolver, frame)?;
        self.items.resolve_refs(resolver, frame)?;
        self.prefix_items.resolve_refs(resolver, frame)?;
        self.contains.resolve_refs(resolver, frame)?;
        self.unevaluated_items.resolve_refs(resolver, frame)?;
        self.properties.resolve_refs(resolver, frame)?;
        self.pattern_properties.resolve_refs(resolver, frame)?;
        self.additional_properties.resolve_refs(resolver, frame)?;
        self.dependent_schemas.resolve_refs(resolver, frame)?;
        self.property_names.resolve_refs(resolver, frame)?;
        self.unevaluated_properties.resolve_refs(resolver, frame)?;
        self.all_of.resolve_refs(resolver, frame)?;
        self.any_of.resolve_refs(resolver, frame)?;
        self.one_of.resolve_refs(resolver, frame)?;
        self.not.resolve_refs(resolver, frame)?;
        self.if_schema.resolve_refs(resolver, frame)?;
        self.then_schema.resolve_refs(resolver, frame)?;
        self.else_schema.resolve_refs(resolver, frame)
    }

    fn apply_reference_overrides(&mut self, reference: &Reference) {
        override_field(&mut self.description, &reference.description);
    }
}

fn override_field(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}
