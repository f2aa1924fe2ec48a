//! Element model shared by the scorer and the matcher

use serde::{Deserialize, Serialize};

use crate::lexicon::{class_matches_any, Lexicon};

/// Fold line assumed when nothing more specific is known
pub const DEFAULT_FOLD_LINE: f64 = 1000.0;

/// Scroll-adjusted bounding box in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Coordinates) -> Coordinates {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Coordinates {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Vertical gap between the two boxes, 0 when they overlap vertically
    pub fn vertical_gap(&self, other: &Coordinates) -> f64 {
        (self.y.max(other.y) - self.bottom().min(other.bottom())).max(0.0)
    }

    /// Euclidean distance between the closest points of the two boxes
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let dx = (self.x.max(other.x) - self.right().min(other.right())).max(0.0);
        let dy = self.vertical_gap(other);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Size of the captured viewport (the screenshot)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1920.0, height: 1080.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Button,
    Link,
    Form,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Link => "link",
            ElementKind::Form => "form",
        }
    }
}

/// Raw style hints captured with the element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleHints {
    /// Class attribute (or any class-like string)
    #[serde(default)]
    pub class_name: String,
    /// Explicit "rendered like a button" flag from the capture step
    #[serde(default)]
    pub looks_like_button: bool,
}

impl StyleHints {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            looks_like_button: false,
        }
    }

    pub fn button_like(mut self) -> Self {
        self.looks_like_button = true;
        self
    }
}

/// Capability predicates derived once from kind and style hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Appearance {
    pub has_button_appearance: bool,
    pub has_prominent_appearance: bool,
}

impl Appearance {
    pub fn detect(kind: ElementKind, style: &StyleHints, lexicon: &Lexicon) -> Self {
        let class = &style.class_name;
        Self {
            has_button_appearance: kind == ElementKind::Button
                || style.looks_like_button
                || class_matches_any(class, &lexicon.button_class_hints),
            has_prominent_appearance: class_matches_any(class, &lexicon.prominent_class_hints),
        }
    }
}

/// An interactive element that may be the page's primary CTA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub coordinates: Coordinates,
    pub kind: ElementKind,
    pub style: StyleHints,
    pub appearance: Appearance,
    pub is_visible: bool,
    pub is_above_fold: bool,
    /// Whether a button submits to a form action (unknown for links)
    pub has_form_action: Option<bool>,
}

impl Candidate {
    /// Build a visible candidate; the above-fold flag defaults to
    /// `y < DEFAULT_FOLD_LINE`, see `above_fold` and `fold_at`
    pub fn new(
        text: &str,
        coordinates: Coordinates,
        kind: ElementKind,
        style: StyleHints,
        lexicon: &Lexicon,
    ) -> Self {
        let appearance = Appearance::detect(kind, &style, lexicon);
        Self {
            text: text.to_string(),
            coordinates,
            kind,
            style,
            appearance,
            is_visible: true,
            is_above_fold: coordinates.y < DEFAULT_FOLD_LINE,
            has_form_action: None,
        }
    }

    pub fn above_fold(mut self, above: bool) -> Self {
        self.is_above_fold = above;
        self
    }

    /// Derive the above-fold flag from a configured fold line
    pub fn fold_at(mut self, fold_line: f64) -> Self {
        self.is_above_fold = self.coordinates.y < fold_line;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    pub fn with_form_action(mut self, has_action: bool) -> Self {
        self.has_form_action = Some(has_action);
        self
    }

    pub fn has_button_appearance(&self) -> bool {
        self.appearance.has_button_appearance
    }

    pub fn has_prominent_appearance(&self) -> bool {
        self.appearance.has_prominent_appearance
    }
}

/// Non-interactive visible text with its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub coordinates: Coordinates,
}

impl TextBlock {
    pub fn new(text: &str, coordinates: Coordinates) -> Self {
        Self {
            text: text.to_string(),
            coordinates,
        }
    }
}
