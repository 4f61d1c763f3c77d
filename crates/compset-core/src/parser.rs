//! Builds the cross-referenced component model from a raw definition

use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::directives::{scan_directives, Directives};
use crate::error::ParseError;
use crate::model::{
    ComponentDefinition, ComponentProperty, ComponentsDefinition, ParsedComponent,
    ParsedComponentSet, ParsedProperty, PropertyReference,
};
use crate::source::{FileSet, PackageSource};

/// Path of the HTML template of `component`
pub fn template_path(component: &str) -> String {
    format!("templates/html/{}.html", component)
}

/// Resolves templates and property references for every component.
///
/// Any failure is fatal for the run: validators only ever see a fully
/// resolved [`ParsedComponentSet`].
pub struct DefinitionParser<'a> {
    source: &'a dyn PackageSource,
    files: &'a FileSet,
}

impl<'a> DefinitionParser<'a> {
    pub fn new(source: &'a dyn PackageSource, files: &'a FileSet) -> Self {
        Self { source, files }
    }

    #[instrument(skip_all, fields(definition = %definition.name, components = definition.components.len()))]
    pub async fn parse(
        &self,
        definition: &ComponentsDefinition,
    ) -> Result<ParsedComponentSet, ParseError> {
        let properties: HashMap<&str, &ComponentProperty> = definition
            .component_properties
            .iter()
            .map(|p| (p.name.as_str(), p))
            .collect();

        let mut components = Vec::with_capacity(definition.components.len());
        for component in &definition.components {
            let directives = self.scan_template(component).await?;
            let resolved = resolve_properties(component, &directives, &properties)?;
            debug!(
                component = %component.name,
                directives = directives.len(),
                properties = resolved.len(),
                "parsed component"
            );
            components.push(ParsedComponent::new(component.clone(), directives, resolved));
        }

        Ok(ParsedComponentSet::new(
            components,
            definition.groups.clone(),
            definition.default_component_on_enter.clone(),
            definition.conversion_rules.clone(),
            definition.shortcut_components().to_vec(),
            definition.scripts.clone(),
        ))
    }

    async fn scan_template(&self, component: &ComponentDefinition) -> Result<Directives, ParseError> {
        let path = template_path(&component.name);
        // Missing templates are reported by the components validator
        if !self.files.contains(&path) {
            return Ok(Directives::default());
        }

        let html = self
            .source
            .read_to_string(&path)
            .await
            .map_err(|source| ParseError::Template {
                component: component.name.clone(),
                source,
            })?;

        scan_directives(&html).map_err(|source| ParseError::Directive {
            component: component.name.clone(),
            source,
        })
    }
}

fn resolve_properties(
    component: &ComponentDefinition,
    directives: &Directives,
    properties: &HashMap<&str, &ComponentProperty>,
) -> Result<Vec<ParsedProperty>, ParseError> {
    let mut resolved: Vec<ParsedProperty> = Vec::with_capacity(component.properties.len());

    for reference in &component.properties {
        let property = match reference {
            PropertyReference::Inline(property) => property.as_ref().clone(),
            PropertyReference::Bare(name) | PropertyReference::WithDirective { name, .. } => {
                properties
                    .get(name.as_str())
                    .map(|p| (*p).clone())
                    .ok_or_else(|| ParseError::UnknownProperty {
                        component: component.name.clone(),
                        property: name.clone(),
                    })?
            }
        };

        if let Some(key) = reference.directive_key() {
            if !directives.contains(key) {
                return Err(ParseError::MissingDirective {
                    component: component.name.clone(),
                    key: key.to_string(),
                    reference: reference.as_written(),
                });
            }
        }

        let directive_key = reference
            .directive_key()
            .map(str::to_string)
            .or_else(|| property.directive_key.clone());
        let parsed = ParsedProperty::new(reference.as_written(), property, directive_key);

        // A repeated reference replaces the earlier entry in place
        match resolved.iter_mut().find(|p| p.reference() == parsed.reference()) {
            Some(existing) => *existing = parsed,
            None => resolved.push(parsed),
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use serde_json::json;

    fn definition(value: serde_json::Value) -> ComponentsDefinition {
        serde_json::from_value(value).unwrap()
    }

    async fn parse(
        def: &ComponentsDefinition,
        source: MemorySource,
    ) -> Result<ParsedComponentSet, ParseError> {
        let files = FileSet::new(source.list_files().await.unwrap());
        DefinitionParser::new(&source, &files).parse(def).await
    }

    fn sample() -> ComponentsDefinition {
        definition(json!({
            "name": "demo",
            "version": "1.0.0",
            "components": [{
                "name": "image",
                "label": "Image",
                "icon": "icons/image.svg",
                "properties": [
                    "alignment",
                    "editor:photo",
                    {
                        "name": "caption-style",
                        "label": "Caption style",
                        "control": { "type": "text" },
                        "directiveKey": "caption"
                    }
                ]
            }],
            "componentProperties": [
                {
                    "name": "alignment",
                    "label": "Alignment",
                    "control": { "type": "select", "options": [{ "value": "left" }] },
                    "dataType": "styles"
                },
                {
                    "name": "editor",
                    "label": "Editor",
                    "control": { "type": "image-editor" }
                }
            ]
        }))
    }

    #[tokio::test]
    async fn test_resolves_references() {
        let source = MemorySource::new().with_file(
            "templates/html/image.html",
            r#"<figure><img doc-image="photo"><figcaption doc-editable="caption"></figcaption></figure>"#,
        );
        let parsed = parse(&sample(), source).await.unwrap();

        let image = parsed.component("image").unwrap();
        assert_eq!(image.directives().len(), 2);

        let refs: Vec<_> = image.properties().iter().map(|p| p.reference()).collect();
        assert_eq!(refs, ["alignment", "editor:photo", "caption-style"]);

        let props = image.properties();
        assert_eq!(props[0].directive_key(), None);
        assert_eq!(props[1].directive_key(), Some("photo"));
        assert_eq!(props[2].directive_key(), Some("caption"));
        assert_eq!(image.property_for_directive("photo").unwrap().name(), "editor");
    }

    #[tokio::test]
    async fn test_missing_template_yields_empty_rendition() {
        let def = definition(json!({
            "name": "demo",
            "version": "1.0.0",
            "components": [{ "name": "title", "label": "Title", "icon": "icons/title.svg", "properties": [] }]
        }));
        let parsed = parse(&def, MemorySource::new()).await.unwrap();
        assert!(parsed.component("title").unwrap().directives().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_property() {
        let def = definition(json!({
            "name": "demo",
            "version": "1.0.0",
            "components": [{ "name": "title", "label": "Title", "icon": "icons/title.svg", "properties": ["ghost"] }]
        }));
        let err = parse(&def, MemorySource::new()).await.unwrap_err();
        assert!(matches!(err, ParseError::UnknownProperty { ref property, .. } if property == "ghost"));
    }

    #[tokio::test]
    async fn test_dangling_directive_reference() {
        let source = MemorySource::new().with_file("templates/html/image.html", "<figure></figure>");
        let err = parse(&sample(), source).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"photo\""));
        assert!(message.contains("\"editor:photo\""));
    }

    #[tokio::test]
    async fn test_duplicate_directive_key_is_fatal() {
        let source = MemorySource::new().with_file(
            "templates/html/image.html",
            r#"<img doc-image="photo"><p doc-editable="photo"></p>"#,
        );
        let err = parse(&sample(), source).await.unwrap_err();
        assert!(err.to_string().contains("attributes must be unique"));
    }

    #[tokio::test]
    async fn test_repeated_reference_last_wins() {
        let def = definition(json!({
            "name": "demo",
            "version": "1.0.0",
            "components": [{
                "name": "box",
                "label": "Box",
                "icon": "icons/box.svg",
                "properties": [
                    { "name": "tone", "label": "Tone", "control": { "type": "text" } },
                    { "name": "tone", "label": "Tone", "control": { "type": "textarea" } }
                ]
            }]
        }));
        let parsed = parse(&def, MemorySource::new()).await.unwrap();
        let props = parsed.component("box").unwrap().properties();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].property().control.type_name(), "textarea");
    }
}
