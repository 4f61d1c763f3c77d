//! Icons, scripts and custom stylesheets

use async_trait::async_trait;
use image::ImageFormat;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use super::properties::declared_properties;
use super::{ValidationContext, Validator, ValidatorKind};
use crate::report::Reporter;

/// Directory reserved for stylesheets generated by the editor
pub const RESERVED_CUSTOM_STYLES_DIR: &str = "styles/customStyles";

fn extension(path: &str) -> Option<String> {
    std::path::Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Icons of components, groups and radio options
pub struct IconsValidator;

impl IconsValidator {
    fn declared_icons<'a>(ctx: &ValidationContext<'a>) -> BTreeSet<&'a str> {
        let definition = ctx.definition;
        let components = definition.components.iter().map(|c| c.icon.as_str());
        let groups = definition.groups.iter().filter_map(|g| g.icon.as_deref());
        let options = declared_properties(definition)
            .filter_map(|p| p.control.options())
            .flatten()
            .filter_map(|o| o.icon.as_deref());
        components.chain(groups).chain(options).collect()
    }
}

#[async_trait]
impl Validator for IconsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Icons
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        // Missing icons are reported where they are declared
        let icons: Vec<&str> = Self::declared_icons(ctx)
            .into_iter()
            .filter(|icon| ctx.files.contains(icon))
            .collect();

        for icon in icons {
            match extension(icon).as_deref() {
                Some("svg") => {}
                Some("png") => {
                    let bytes = match ctx.source.read(icon).await {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            reporter.error(format!("icon \"{}\" could not be read: {}", icon, e));
                            continue;
                        }
                    };
                    match image::load_from_memory_with_format(&bytes, ImageFormat::Png) {
                        Ok(decoded) if decoded.color().has_alpha() => {}
                        Ok(decoded) => {
                            debug!(icon, color = ?decoded.color(), "png icon without alpha");
                            reporter.error(format!(
                                "icon \"{}\" must have a transparent background",
                                icon
                            ));
                        }
                        Err(e) => reporter.error(format!("icon \"{}\" is not a valid png: {}", icon, e)),
                    }
                }
                _ => reporter.error(format!("icon \"{}\" must be an .svg or .png file", icon)),
            }
        }
    }
}

pub struct ScriptsValidator;

#[async_trait]
impl Validator for ScriptsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Scripts
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for script in ctx.parsed.scripts() {
            if !ctx.files.contains(script) {
                reporter.error(format!("script \"{}\" does not exist", script));
            }
        }
    }
}

pub struct CustomStylesValidator;

#[async_trait]
impl Validator for CustomStylesValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::CustomStyles
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        let mut seen = HashSet::new();
        for style in &ctx.definition.custom_styles {
            if !seen.insert(style.name.as_str()) {
                reporter.error(format!("custom style \"{}\" is declared more than once", style.name));
            }
            if !ctx.files.contains(&style.default) {
                reporter.error(format!(
                    "custom style \"{}\": default stylesheet \"{}\" does not exist",
                    style.name, style.default
                ));
            }
        }

        if ctx.files.under(RESERVED_CUSTOM_STYLES_DIR).next().is_some() {
            reporter.error(format!(
                "directory \"{}/\" is reserved and must not be shipped",
                RESERVED_CUSTOM_STYLES_DIR
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::{component, property, Fixture};
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
    use serde_json::json;
    use std::io::Cursor;

    fn png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn transparent_png() -> Vec<u8> {
        png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]))))
    }

    fn opaque_png() -> Vec<u8> {
        png(DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]))))
    }

    #[tokio::test]
    async fn test_icon_formats() {
        let fixture = Fixture::components(
            json!([
                { "name": "a", "label": "A", "icon": "icons/a.svg" },
                { "name": "b", "label": "B", "icon": "icons/b.png" },
                { "name": "c", "label": "C", "icon": "icons/c.png" },
                { "name": "d", "label": "D", "icon": "icons/d.gif" },
                { "name": "e", "label": "E", "icon": "icons/missing.png" }
            ]),
            json!([property(
                "align",
                json!({ "type": "radio", "options": [{ "value": "x", "icon": "icons/broken.png" }] })
            )]),
        )
        .set("groups", json!([{ "name": "g", "label": "G", "components": [], "icon": "icons/a.svg" }]))
        .file("icons/a.svg", "<svg/>")
        .file("icons/b.png", transparent_png())
        .file("icons/c.png", opaque_png())
        .file("icons/d.gif", "GIF89a")
        .file("icons/broken.png", "not a png");

        let errors = fixture.run(&IconsValidator).await;
        assert_eq!(errors.len(), 3, "{:?}", errors);
        assert!(errors[0].starts_with("icon \"icons/broken.png\" is not a valid png"));
        assert_eq!(errors[1], "icon \"icons/c.png\" must have a transparent background");
        assert_eq!(errors[2], "icon \"icons/d.gif\" must be an .svg or .png file");
    }

    #[tokio::test]
    async fn test_scripts() {
        let fixture = Fixture::components(json!([component("a", json!([]))]), json!([]))
            .set("scripts", json!(["scripts/app.js", "scripts/missing.js"]))
            .file("scripts/app.js", "");
        assert_eq!(
            fixture.run(&ScriptsValidator).await,
            ["script \"scripts/missing.js\" does not exist"]
        );
    }

    #[tokio::test]
    async fn test_custom_styles() {
        let fixture = Fixture::components(json!([]), json!([]))
            .set(
                "customStyles",
                json!([
                    { "name": "dark", "label": "Dark", "default": "styles/dark.css" },
                    { "name": "dark", "label": "Dark again", "default": "styles/light.css" }
                ]),
            )
            .file("styles/dark.css", "")
            .file("styles/customStyles/generated.css", "");

        assert_eq!(
            fixture.run(&CustomStylesValidator).await,
            [
                "custom style \"dark\" is declared more than once",
                "custom style \"dark\": default stylesheet \"styles/light.css\" does not exist",
                "directory \"styles/customStyles/\" is reserved and must not be shipped",
            ]
        );
    }
}
