//! Inline style declarations.
//!
//! [CSSOM § 6.6 CSSStyleDeclaration](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
//!
//! "A CSS declaration block is an ordered collection of CSS properties with
//! their associated values."

/// An element's `style` declaration block.
///
/// Properties keep the position of their first assignment; setting an
/// existing property overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// [§ 6.6 `setProperty()`](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// An empty value removes the property, like assigning `""` in a browser.
    pub fn set(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.remove(property);
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => value.clone_into(existing),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    /// [§ 6.6 `getPropertyValue()`](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// [§ 6.6 `removeProperty()`](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-removeproperty)
    pub fn remove(&mut self, property: &str) {
        self.declarations.retain(|(p, _)| p != property);
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// [§ 6.6 `cssText`](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    ///
    /// Serializes as `prop: value; prop: value`.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
