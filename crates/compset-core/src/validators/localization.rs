//! Localization files under `localization/`

use async_trait::async_trait;
use serde_json::Value;

use super::{ValidationContext, Validator, ValidatorKind};
use crate::report::Reporter;

pub const LOCALIZATION_DIR: &str = "localization";

/// Language codes the editor ships translations for
pub const SUPPORTED_LANGUAGES: [&str; 17] = [
    "cs", "da", "de", "en", "es", "fi", "fr", "it", "ja", "nb", "nl", "pl", "pt", "ru", "sv", "tr",
    "zh",
];

pub struct LocalizationValidator;

impl LocalizationValidator {
    /// Language code of a `localization/<lang>.json` path
    fn language(path: &str) -> Option<&str> {
        path.strip_prefix(LOCALIZATION_DIR)?
            .strip_prefix('/')?
            .strip_suffix(".json")
            .filter(|lang| !lang.contains('/'))
    }
}

#[async_trait]
impl Validator for LocalizationValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Localization
    }

    async fn validate(&self, ctx: &ValidationContext<'_>, reporter: &mut Reporter<'_>) {
        for path in ctx.files.under(LOCALIZATION_DIR) {
            let Some(lang) = Self::language(path) else {
                reporter.error(format!(
                    "localization \"{}\": expected {}/<language>.json",
                    path, LOCALIZATION_DIR
                ));
                continue;
            };
            if !SUPPORTED_LANGUAGES.contains(&lang) {
                reporter.error(format!(
                    "localization \"{}\": unsupported language \"{}\", use one of {}",
                    path,
                    lang,
                    SUPPORTED_LANGUAGES.join(", ")
                ));
                continue;
            }

            let text = match ctx.source.read_to_string(path).await {
                Ok(text) => text,
                Err(e) => {
                    reporter.error(format!("localization \"{}\": {}", path, e));
                    continue;
                }
            };
            match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(_)) => {}
                Ok(_) => reporter.error(format!(
                    "localization \"{}\": expected a json object of translations",
                    path
                )),
                Err(e) => reporter.error(format!("localization \"{}\" is not valid json: {}", path, e)),
            }
        }
    }
}
