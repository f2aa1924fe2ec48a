//! Lexicon - Word lists driving the lexical CTA classifiers
//!
//! Every phrase list used by the scoring rules and the matcher lives here as
//! plain data. A `Lexicon` is built once (defaults or TOML) and shared by
//! reference, so concurrent analyses never race on mutable tables.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Pre-compiled regex for whitespace normalization (compile once, use many times)
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// Lower-case, trim and collapse internal whitespace
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").to_lowercase()
}

/// Check whether `phrase` occurs in `text` on word boundaries.
///
/// Both sides are expected to be normalized already. "shop" matches
/// "shop now" and "visit the shop" but not "workshop".
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    for (idx, _) in text.match_indices(phrase) {
        let before_ok = text[..idx]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        let after_ok = text[idx + phrase.len()..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// True if any phrase in the list occurs in `text` on word boundaries
pub fn contains_any_phrase(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| contains_phrase(text, p))
}

/// Check whether `prefix` starts a word of `text`.
///
/// Inflections match: "buy" finds "buying options" and "download" finds
/// "downloads", while "shop" still misses "workshop".
pub fn starts_word(text: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    text.match_indices(prefix).any(|(idx, _)| {
        text[..idx]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true)
    })
}

/// True if any entry starts a word of `text`
pub fn starts_any_word(text: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| starts_word(text, p))
}

fn is_class_separator(c: char) -> bool {
    c == '-' || c == '_'
}

/// Check one class token against a hint on `-`/`_` segment boundaries.
///
/// "red" matches "btn-red" and "bg-red-500" but not "bordered"; a hint
/// ending in a separator ("bg-") matches any token it starts.
fn class_token_matches(token: &str, hint: &str) -> bool {
    let open_ended = hint.ends_with(is_class_separator);
    token.match_indices(hint).any(|(idx, _)| {
        let end = idx + hint.len();
        let before_ok = token[..idx].chars().next_back().map_or(true, is_class_separator);
        let after_ok = open_ended || token[end..].chars().next().map_or(true, is_class_separator);
        before_ok && after_ok
    })
}

/// True if any whitespace-separated class in `class_name` carries one of the hints
pub fn class_matches_any(class_name: &str, hints: &[String]) -> bool {
    let class_name = class_name.to_lowercase();
    class_name.split_whitespace().any(|token| {
        hints
            .iter()
            .any(|hint| !hint.is_empty() && class_token_matches(token, hint))
    })
}

/// True if any entry is a plain substring of `text`
pub fn contains_any(text: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| !n.is_empty() && text.contains(n.as_str()))
}

/// All lexical tables. Entries are stored lower-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Navigation labels that disqualify a CTA when they are the whole text
    pub navigation_exact: Vec<String>,
    /// Navigation fragments that disqualify a CTA anywhere in the text
    pub navigation_contains: Vec<String>,
    /// Strong action verbs and phrases (scorer tier 3, matcher tier 3)
    pub strong_actions: Vec<String>,
    /// Medium action verbs and phrases (tier 2)
    pub medium_actions: Vec<String>,
    /// Passive phrases that carry no intent (tier 0)
    pub passive_phrases: Vec<String>,
    /// Phrases that align perfectly with a value proposition
    pub perfect_alignment: Vec<String>,
    /// Value keywords rewarded by the adjustment layer (plain substring)
    pub value_keywords: Vec<String>,
    /// Product-value phrases, the matcher's top intent tier
    pub product_value_phrases: Vec<String>,
    /// Supporting trust text looked for near a matched element
    pub trust_phrases: Vec<String>,
    /// Page copy signalling a value proposition
    pub value_proposition_phrases: Vec<String>,
    /// Page copy signalling urgency
    pub urgency_phrases: Vec<String>,
    /// Class hints that make an element look like a button, matched per
    /// class on `-`/`_` segments
    pub button_class_hints: Vec<String>,
    /// Class hints that make an element look prominent
    pub prominent_class_hints: Vec<String>,
    /// High-contrast color classes
    pub strong_color_hints: Vec<String>,
    /// Brand or muted color classes
    pub mild_color_hints: Vec<String>,
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            navigation_exact: list(&[
                "mac", "home", "about", "about us", "products", "solutions", "pricing",
                "blog", "menu", "contact", "contact us", "support", "help", "resources",
                "company", "careers", "login", "log in", "sign in", "search", "faq",
                "docs", "documentation", "news", "store",
            ]),
            navigation_contains: list(&[
                "ipad", "iphone", "airpods", "apple watch", "apple tv",
                "privacy policy", "terms of", "cookie",
            ]),
            strong_actions: list(&[
                "buy", "shop", "order", "get started", "sign up", "signup", "subscribe",
                "register", "join", "download", "book", "start", "try", "get", "claim",
                "reserve", "add to cart", "checkout", "create account", "request a demo",
                "apply",
            ]),
            medium_actions: list(&[
                "learn", "discover", "explore", "see", "view", "watch", "compare",
                "contact sales", "talk to", "schedule", "find", "browse", "request",
                "upgrade", "donate", "install",
            ]),
            passive_phrases: list(&[
                "read more", "more info", "more information", "details", "continue",
                "next", "previous", "back", "close", "cancel", "skip", "dismiss",
                "no thanks", "show more",
            ]),
            perfect_alignment: list(&[
                "get started", "start free", "book demo", "book a demo", "start trial",
                "start your free trial", "request a demo", "try free", "try it free",
                "sign up free", "get a quote",
            ]),
            value_keywords: list(&["save", "free", "trial", "%"]),
            product_value_phrases: list(&[
                "free trial", "start free", "try free", "try it free", "get started free",
                "free demo", "free account", "free consultation",
            ]),
            trust_phrases: list(&[
                "no credit card", "money back", "money-back", "cancel anytime",
                "free shipping", "guarantee", "secure checkout", "trusted by", "risk-free",
                "no commitment",
            ]),
            value_proposition_phrases: list(&[
                "save", "free", "guarantee", "the best", "the only", "#1", "faster",
                "easier", "all-in-one", "trusted by", "designed for", "helps you",
                "grow your", "boost", "increase",
            ]),
            urgency_phrases: list(&[
                "limited time", "today only", "ends soon", "ending soon", "hurry",
                "left in stock", "last chance", "offer ends", "while supplies last",
                "expires", "countdown", "don't miss",
            ]),
            button_class_hints: list(&["btn", "button", "cta"]),
            prominent_class_hints: list(&[
                "primary", "cta", "hero", "large", "lg", "xl", "prominent", "main",
                "featured",
            ]),
            strong_color_hints: list(&[
                "orange", "red", "green", "accent", "highlight", "success", "warning",
            ]),
            mild_color_hints: list(&["primary", "blue", "purple", "brand", "bg-", "dark"]),
        }
    }
}

impl Lexicon {
    /// Exact or substring hit against the navigation denylist
    pub fn is_navigation(&self, normalized: &str) -> bool {
        self.navigation_exact.iter().any(|n| n == normalized)
            || contains_any(normalized, &self.navigation_contains)
    }

    pub fn is_strong_action(&self, normalized: &str) -> bool {
        starts_any_word(normalized, &self.strong_actions)
    }

    pub fn is_medium_action(&self, normalized: &str) -> bool {
        starts_any_word(normalized, &self.medium_actions)
    }

    /// Whole words only, so "backpacks" is not read as "back"
    pub fn is_passive(&self, normalized: &str) -> bool {
        contains_any_phrase(normalized, &self.passive_phrases)
    }

    pub fn is_perfect_alignment(&self, normalized: &str) -> bool {
        contains_any_phrase(normalized, &self.perfect_alignment)
    }

    pub fn has_value_keyword(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.value_keywords)
    }

    pub fn is_product_value(&self, normalized: &str) -> bool {
        starts_any_word(normalized, &self.product_value_phrases)
    }

    pub fn is_trust_text(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.trust_phrases)
    }

    pub fn is_value_proposition(&self, normalized: &str) -> bool {
        contains_any_phrase(normalized, &self.value_proposition_phrases)
    }

    pub fn is_urgency(&self, normalized: &str) -> bool {
        contains_any_phrase(normalized, &self.urgency_phrases)
    }

    /// Lower-case every entry so TOML overrides may use any casing
    pub fn normalized(mut self) -> Self {
        for table in [
            &mut self.navigation_exact,
            &mut self.navigation_contains,
            &mut self.strong_actions,
            &mut self.medium_actions,
            &mut self.passive_phrases,
            &mut self.perfect_alignment,
            &mut self.value_keywords,
            &mut self.product_value_phrases,
            &mut self.trust_phrases,
            &mut self.value_proposition_phrases,
            &mut self.urgency_phrases,
            &mut self.button_class_hints,
            &mut self.prominent_class_hints,
            &mut self.strong_color_hints,
            &mut self.mild_color_hints,
        ] {
            for entry in table.iter_mut() {
                *entry = normalize_text(entry);
            }
        }
        self
    }
}
