//! Per-language configuration resolution
//!
//! This module provides the LanguageTable that layers compiled language
//! overrides over the global configuration and resolves, field by field,
//! the settings that apply to one language tag.

use std::collections::HashMap;

use super::rules::BracketRules;
use crate::config::{ColorSource, ColorizerConfig, DefaultColor, DEFAULT_CSS_VARIABLE_PREFIX};
use crate::error::Result;

/// Settings in effect for one language
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConfig<'a> {
    pub rules: &'a BracketRules,
    pub colors: &'a ColorSource,
    /// None selects the `light` theme
    pub default_color: Option<&'a DefaultColor>,
    pub css_variable_prefix: &'a str,
}

impl ResolvedConfig<'_> {
    /// Check if brackets are colored at all under these settings
    pub fn is_active(&self) -> bool {
        !self.rules.is_empty() && !self.colors.is_blank()
    }
}

/// One override layer; every field is optional
#[derive(Debug)]
struct LanguageLayer {
    rules: Option<BracketRules>,
    colors: Option<ColorSource>,
    default_color: Option<DefaultColor>,
    css_variable_prefix: Option<String>,
}

/// Global settings with per-language override layers
#[derive(Debug)]
pub struct LanguageTable {
    rules: BracketRules,
    colors: ColorSource,
    default_color: Option<DefaultColor>,
    css_variable_prefix: String,
    embedded_scopes: Vec<String>,
    overrides: HashMap<String, LanguageLayer>,
}

impl LanguageTable {
    /// Compile the global bracket rules and every override's rules
    pub fn new(config: &ColorizerConfig) -> Result<Self> {
        let mut overrides = HashMap::new();
        for (lang, language) in &config.langs {
            let rules = language
                .bracket_pairs
                .clone()
                .map(BracketRules::new)
                .transpose()?;
            tracing::debug!(
                lang = lang.as_str(),
                pairs = rules.as_ref().map(|r| r.pairs().len()),
                "compiled language override"
            );
            overrides.insert(
                lang.clone(),
                LanguageLayer {
                    rules,
                    colors: language.colors.clone(),
                    default_color: language.default_color.clone(),
                    css_variable_prefix: language.css_variable_prefix.clone(),
                },
            );
        }

        Ok(Self {
            rules: BracketRules::new(config.bracket_pairs.clone())?,
            colors: config.colors.clone(),
            default_color: config.default_color.clone(),
            css_variable_prefix: config
                .css_variable_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_CSS_VARIABLE_PREFIX.to_string()),
            embedded_scopes: config.embedded_scopes.clone(),
            overrides,
        })
    }

    /// Resolve the settings for a language tag
    ///
    /// Each field comes from the language's override when it sets one and
    /// from the global configuration otherwise. Unknown tags get the
    /// global settings unchanged.
    pub fn resolve(&self, lang: &str) -> ResolvedConfig<'_> {
        let layer = self.overrides.get(lang);
        ResolvedConfig {
            rules: layer.and_then(|l| l.rules.as_ref()).unwrap_or(&self.rules),
            colors: layer.and_then(|l| l.colors.as_ref()).unwrap_or(&self.colors),
            default_color: layer
                .and_then(|l| l.default_color.as_ref())
                .or(self.default_color.as_ref()),
            css_variable_prefix: layer
                .and_then(|l| l.css_variable_prefix.as_deref())
                .unwrap_or(self.css_variable_prefix.as_str()),
        }
    }

    /// Scope prefixes that re-admit brackets inside strings and comments
    pub fn embedded_scopes(&self) -> &[String] {
        &self.embedded_scopes
    }
}
