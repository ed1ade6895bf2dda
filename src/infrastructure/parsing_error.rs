//! Parsing error types for listing and detail pages
//!
//! Every variant means the markup no longer has the shape the parsers expect.
//! None of them is recoverable: the run stops instead of producing partial data.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralParseError {
    #[error("Required element '{element}' not found in {context}")]
    MissingElement { element: String, context: String },

    #[error("Element '{element}' in {context} has no child node at index {index}")]
    MissingChildNode {
        element: String,
        index: usize,
        context: String,
    },

    #[error("Attribute '{attribute}' missing on '{element}'")]
    MissingAttribute { attribute: String, element: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl StructuralParseError {
    /// Create a missing element error with context
    pub fn missing_element(element: &str, context: &str) -> Self {
        Self::MissingElement {
            element: element.to_string(),
            context: context.to_string(),
        }
    }

    pub fn missing_child_node(element: &str, index: usize, context: &str) -> Self {
        Self::MissingChildNode {
            element: element.to_string(),
            index,
            context: context.to_string(),
        }
    }

    pub fn missing_attribute(attribute: &str, element: &str) -> Self {
        Self::MissingAttribute {
            attribute: attribute.to_string(),
            element: element.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, StructuralParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_piece() {
        let err = StructuralParseError::missing_element("p.cruise-route", "itinerary row 2");
        assert_eq!(
            err.to_string(),
            "Required element 'p.cruise-route' not found in itinerary row 2"
        );

        let err = StructuralParseError::missing_attribute("href", "p.cruise-button a");
        assert_eq!(err.to_string(), "Attribute 'href' missing on 'p.cruise-button a'");
    }
}
