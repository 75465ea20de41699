//! Structured chat replies and their plain-text rendering

use std::fmt;

/// Accent of a reply, the embed colour on chat platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Strong offense and defense
    Gold,
    /// Offensive boost
    Red,
    /// Defensive boost
    Blue,
    /// Comparisons
    Teal,
    /// No major change, or plain messages
    Neutral,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub title: Option<String>,
    pub body: String,
    pub fields: Vec<ReplyField>,
    pub tone: Tone,
}

impl Reply {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            fields: Vec::new(),
            tone: Tone::Neutral,
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            ..Self::text(body)
        }
    }

    pub fn embed(title: impl Into<String>, body: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
            fields: Vec::new(),
            tone,
        }
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(ReplyField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }

    pub fn field(&self, name: &str) -> Option<&ReplyField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "== {} ==", title)?;
        }
        f.write_str(&self.body)?;
        for field in &self.fields {
            write!(f, "\n\n[{}]\n{}", field.name, field.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embed_with_fields() {
        let reply =
            Reply::embed("Title", "Body", Tone::Gold).with_field("Team", "Chenko: 2", false);
        assert_eq!(reply.to_string(), "== Title ==\nBody\n\n[Team]\nChenko: 2");
    }

    #[test]
    fn test_error_renders_body_only() {
        let reply = Reply::error("nope");
        assert!(reply.is_error());
        assert_eq!(reply.to_string(), "nope");
    }
}
