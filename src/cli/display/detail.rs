//! Detail view builder for key-value display of a single record.

use console::style;

/// A builder for detail views (key-value display).
pub struct DetailView {
    title: String,
    sections: Vec<DetailSection>,
}

struct DetailSection {
    header: Option<String>,
    fields: Vec<(String, String)>,
    items: Vec<String>,
}

impl DetailSection {
    fn new(header: Option<String>) -> Self {
        Self {
            header,
            fields: vec![],
            items: vec![],
        }
    }
}

impl DetailView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: vec![DetailSection::new(None)],
        }
    }

    /// Add a key-value field to the current section.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        if let Some(section) = self.sections.last_mut() {
            section.fields.push((key.to_string(), value.into()));
        }
        self
    }

    /// Add a field only if the value is Some.
    pub fn field_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Start a new named section.
    pub fn section(mut self, header: &str) -> Self {
        self.sections.push(DetailSection::new(Some(header.to_string())));
        self
    }

    /// Add a bullet item to the current section.
    pub fn item(mut self, text: impl Into<String>) -> Self {
        if let Some(section) = self.sections.last_mut() {
            section.items.push(text.into());
        }
        self
    }

    pub fn render(&self) -> String {
        let mut lines = vec![style(&self.title).bold().to_string()];
        let key_width = self
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|(k, _)| k.len())
            .max()
            .unwrap_or(12);

        for section in &self.sections {
            if let Some(header) = &section.header {
                lines.push(String::new());
                lines.push(style(header).bold().underlined().to_string());
            }
            for (key, value) in &section.fields {
                let label = format!("{key:<key_width$}");
                lines.push(format!("  {}  {}", style(label).dim(), value));
            }
            for item in &section.items {
                lines.push(format!("  - {item}"));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_view_renders_sections() {
        let rendered = DetailView::new("Ann")
            .field("Type", "Family")
            .field_opt("Email", None)
            .section("Ideas")
            .item("Scarf")
            .render();

        assert!(rendered.contains("Ann"));
        assert!(rendered.contains("Family"));
        assert!(!rendered.contains("Email"));
        assert!(rendered.contains("Ideas"));
        assert!(rendered.contains("- Scarf"));
    }
}
