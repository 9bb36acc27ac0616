use crate::error::EngineError;

/// Holds the outbound message text, optionally bounded by a maximum length.
///
/// Over-limit mutations are rejected whole, never truncated, and leave the
/// previous text in place. Lengths are character counts, not byte counts.
#[derive(Default)]
pub struct MessageComposer {
    text: String,
    max_length: Option<usize>,
}

impl MessageComposer {
    pub fn new(max_length: Option<usize>) -> Self {
        Self {
            text: String::new(),
            max_length,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), EngineError> {
        let text = text.into();
        if let Some(limit) = self.max_length {
            let length = text.chars().count();
            if length > limit {
                return Err(EngineError::MessageTooLong { length, limit });
            }
        }
        self.text = text;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
