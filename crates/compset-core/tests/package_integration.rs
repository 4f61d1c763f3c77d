//! End-to-end validation of packages stored on disk

use compset_core::{PackageValidator, Reporter, ValidatorKind, DEFINITION_FILE};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, contents).unwrap();
}

fn definition() -> Value {
    json!({
        "name": "magazine",
        "version": "1.2.0",
        "label": "Magazine",
        "components": [
            {
                "name": "title",
                "label": "Title",
                "icon": "icons/title.svg",
                "properties": ["align", "tone:headline"]
            },
            {
                "name": "image",
                "label": { "key": "components.image" },
                "icon": "icons/image.svg",
                "properties": ["crop:photo"]
            }
        ],
        "componentProperties": [
            {
                "name": "align",
                "label": "Alignment",
                "control": {
                    "type": "select",
                    "options": [{ "value": "left" }, { "value": "right" }]
                },
                "dataType": "styles",
                "defaultValue": "left"
            },
            {
                "name": "tone",
                "label": "Tone",
                "control": { "type": "text" },
                "dataType": "doc-editable"
            },
            {
                "name": "crop",
                "label": "Crop",
                "control": { "type": "image-editor" },
                "dataType": "doc-image"
            }
        ],
        "groups": [
            { "name": "basic", "label": "Basic", "components": ["title", "image"] }
        ]
    })
}

/// A complete, valid package on disk
fn package(definition: &Value) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, DEFINITION_FILE, &serde_json::to_string_pretty(definition).unwrap());
    write(root, "templates/html/title.html", r#"<h1 doc-editable="headline"></h1>"#);
    write(root, "templates/html/image.html", r#"<figure><img doc-image="photo"></figure>"#);
    write(root, "styles/_title.scss", "");
    write(root, "styles/_image.scss", "");
    write(root, "styles/_common.scss", "");
    write(root, "styles/design.scss", "");
    write(root, "styles/design.css", "");
    write(root, "icons/title.svg", "<svg/>");
    write(root, "icons/image.svg", "<svg/>");
    write(root, "localization/en.json", r#"{ "components.image": "Image" }"#);
    dir
}

#[tokio::test]
async fn test_valid_package() {
    let dir = package(&definition());
    let outcome = PackageValidator::from_dir(dir.path()).validate_collect().await;

    assert!(outcome.valid, "{:?}", outcome.errors);
    assert_eq!(outcome.version.as_deref(), Some("1.2.0"));
    assert_eq!(outcome.schema.as_deref(), Some("1.2"));
    assert!(outcome.validators.contains(&ValidatorKind::Autofill));
    assert!(!outcome.validators.contains(&ValidatorKind::StripStylingOnPaste));
}

#[tokio::test]
async fn test_minimal_package_has_no_errors() {
    let definition = json!({
        "name": "minimal",
        "version": "1.0.0",
        "components": [
            { "name": "title", "label": "Title", "icon": "icons/title.svg" },
            { "name": "paragraph", "label": "Paragraph", "icon": "icons/paragraph.svg" }
        ],
        "componentProperties": [],
        "groups": [
            { "name": "text", "label": "Text", "components": ["title", "paragraph"] }
        ],
        "defaultComponentOnEnter": "paragraph",
        "conversionRules": []
    });

    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, DEFINITION_FILE, &definition.to_string());
    for name in ["title", "paragraph"] {
        write(root, &format!("templates/html/{}.html", name), r#"<p doc-editable="text"></p>"#);
        write(root, &format!("styles/_{}.scss", name), "");
        write(root, &format!("icons/{}.svg", name), "<svg/>");
    }
    write(root, "styles/_common.scss", "");
    write(root, "styles/design.scss", "");
    write(root, "styles/design.css", "");

    let outcome = PackageValidator::from_dir(root).validate_collect().await;
    assert!(outcome.valid);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.schema.as_deref(), Some("1.0"));
}

#[tokio::test]
async fn test_missing_definition() {
    let dir = package(&definition());
    std::fs::remove_file(dir.path().join(DEFINITION_FILE)).unwrap();

    let outcome = PackageValidator::from_dir(dir.path()).validate_collect().await;
    assert!(!outcome.valid);
    assert_eq!(outcome.errors, ["components-definition.json is missing"]);
}

#[tokio::test]
async fn test_corrupt_definition() {
    let dir = package(&definition());
    write(dir.path(), DEFINITION_FILE, "{ \"name\": ");

    let outcome = PackageValidator::from_dir(dir.path()).validate_collect().await;
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("components-definition.json is not valid json"));
}

#[tokio::test]
async fn test_broken_components_are_reported() {
    let mut broken = definition();
    broken["components"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "name": "__internal__marker", "label": "Marker", "icon": "icons/title.svg" }));
    let dir = package(&broken);
    std::fs::remove_file(dir.path().join("styles/_image.scss")).unwrap();

    let mut messages = Vec::new();
    let valid = {
        let mut reporter = Reporter::collecting(&mut messages);
        PackageValidator::from_dir(dir.path()).validate(&mut reporter).await
    };

    assert!(!valid);
    assert_eq!(
        messages,
        [
            "component \"image\": stylesheet \"styles/_image.scss\" is missing",
            "component \"__internal__marker\" uses the reserved prefix \"__internal__\"",
            "component \"__internal__marker\": template \"templates/html/__internal__marker.html\" is missing",
            "component \"__internal__marker\": stylesheet \"styles/___internal__marker.scss\" is missing",
        ]
    );
}

#[tokio::test]
async fn test_duplicate_directive_keys_stop_the_run() {
    let dir = package(&definition());
    write(
        dir.path(),
        "templates/html/title.html",
        r#"<h1 doc-editable="headline"></h1><h2 doc-editable="headline"></h2>"#,
    );

    let outcome = PackageValidator::from_dir(dir.path()).validate_collect().await;
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].contains("attributes must be unique"));
    assert!(outcome.validators.is_empty());
}

#[tokio::test]
async fn test_version_specific_rules() {
    let mut next = definition();
    next["version"] = json!("1.7.0-next.3");
    let dir = package(&next);
    write(
        dir.path(),
        "templates/html/image.html",
        r#"<div doc-container="body"><img doc-image="photo"></div>"#,
    );

    let outcome = PackageValidator::from_dir(dir.path()).validate_collect().await;
    assert_eq!(outcome.schema.as_deref(), Some("next"));
    assert_eq!(outcome.errors, ["component \"image\": doc-container must be the only directive"]);
}
