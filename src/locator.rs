use serde::{Deserialize, Serialize};

/// A query that identifies zero or more elements in the page.
///
/// Selectors are re-evaluated on every use, so the element does not need to
/// exist at construction time. Wait/retry behaviour lives in the session
/// methods that consume them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Elements of a tag whose visible text contains the given string.
    Text { tag: String, text: String },
    /// A raw CSS selector.
    Css(String),
    /// Elements of a tag carrying an exact aria-label.
    AriaLabel { tag: String, label: String },
}

impl Selector {
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text {
            tag: tag.into(),
            text: text.into(),
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn aria_label(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self::AriaLabel {
            tag: tag.into(),
            label: label.into(),
        }
    }

    /// CSS form of this selector, when one exists. Text matching has no CSS
    /// equivalent and is resolved through `query_js` instead.
    pub fn as_css(&self) -> Option<String> {
        match self {
            Self::Text { .. } => None,
            Self::Css(selector) => Some(selector.clone()),
            Self::AriaLabel { tag, label } => {
                Some(format!("{}[aria-label='{}']", tag, escape_quotes(label)))
            }
        }
    }

    /// JavaScript expression evaluating to the first matching element, or
    /// null when nothing matches.
    ///
    /// Built from the raw parts so each value is escaped exactly once at
    /// interpolation time. Aria-label values are embedded in a
    /// double-quoted CSS string, which keeps them inert inside the
    /// single-quoted JS literal.
    pub fn query_js(&self) -> String {
        match self {
            Self::Text { tag, text } => format!(
                "Array.from(document.querySelectorAll('{}')).find(el => el.textContent.trim().includes('{}')) || null",
                escape_quotes(tag),
                escape_quotes(text)
            ),
            Self::Css(selector) => {
                format!("document.querySelector('{}')", escape_quotes(selector))
            }
            Self::AriaLabel { tag, label } => format!(
                "document.querySelector('{}[aria-label=\"{}\"]')",
                escape_quotes(tag),
                escape_quotes(label)
            ),
        }
    }

    /// JavaScript expression evaluating to the number of matching elements.
    pub fn count_js(&self) -> String {
        match self {
            Self::Text { tag, text } => format!(
                "Array.from(document.querySelectorAll('{}')).filter(el => el.textContent.trim().includes('{}')).length",
                escape_quotes(tag),
                escape_quotes(text)
            ),
            Self::Css(selector) => format!(
                "document.querySelectorAll('{}').length",
                escape_quotes(selector)
            ),
            Self::AriaLabel { tag, label } => format!(
                "document.querySelectorAll('{}[aria-label=\"{}\"]').length",
                escape_quotes(tag),
                escape_quotes(label)
            ),
        }
    }

    /// Human-readable form for logs and error messages.
    pub fn description(&self) -> String {
        match self {
            Self::Text { tag, text } => format!("{} with text '{}'", tag, text),
            Self::Css(selector) => selector.clone(),
            Self::AriaLabel { tag, label } => format!("{} with aria-label '{}'", tag, label),
        }
    }
}

fn escape_quotes(input: &str) -> String {
    input.replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_selector_passes_through() {
        let selector = Selector::css(".hotspot-element");
        assert_eq!(selector.as_css().as_deref(), Some(".hotspot-element"));
        assert_eq!(
            selector.count_js(),
            "document.querySelectorAll('.hotspot-element').length"
        );
    }

    #[test]
    fn aria_label_renders_attribute_selector() {
        let selector = Selector::aria_label("button", "Delete hotspot");
        assert_eq!(
            selector.as_css().as_deref(),
            Some("button[aria-label='Delete hotspot']")
        );
    }

    #[test]
    fn text_selector_has_no_css_form() {
        let selector = Selector::text("button", "Add Hotspot");
        assert!(selector.as_css().is_none());
        let js = selector.query_js();
        assert!(js.contains("querySelectorAll('button')"));
        assert!(js.contains("Add Hotspot"));
    }

    #[test]
    fn single_quotes_are_escaped() {
        let selector = Selector::text("button", "Don't click");
        assert!(selector.query_js().contains("Don\\'t click"));

        let labeled = Selector::aria_label("button", "it's fine");
        assert_eq!(
            labeled.as_css().as_deref(),
            Some("button[aria-label='it\\'s fine']")
        );
    }

    #[test]
    fn aria_label_quotes_escape_exactly_once_in_generated_js() {
        let labeled = Selector::aria_label("button", "it's fine");

        assert_eq!(
            labeled.count_js(),
            "document.querySelectorAll('button[aria-label=\"it\\'s fine\"]').length"
        );
        assert_eq!(
            labeled.query_js(),
            "document.querySelector('button[aria-label=\"it\\'s fine\"]')"
        );

        // A backslash-backslash-quote run would end the JS string literal
        // early and turn the expression into a syntax error.
        assert!(!labeled.count_js().contains("\\\\'"));
        assert!(!labeled.query_js().contains("\\\\'"));
    }

    #[test]
    fn plain_aria_label_count_js_is_well_formed() {
        let labeled = Selector::aria_label("button", "Delete hotspot");
        assert_eq!(
            labeled.count_js(),
            "document.querySelectorAll('button[aria-label=\"Delete hotspot\"]').length"
        );
    }

    #[test]
    fn descriptions_are_readable() {
        assert_eq!(
            Selector::text("button", "Add Hotspot").description(),
            "button with text 'Add Hotspot'"
        );
        assert_eq!(Selector::css(".hotspot-element").description(), ".hotspot-element");
    }
}
