//! Post drafts and the invariants the service enforces on them.

use plume_api_types::PostInput;

use crate::domain::error::DomainError;

/// A draft whose title, author, and content have been checked non-blank.
///
/// Constructing one is the only way into the write path; both create and
/// update go through [`PostDraft::try_from_input`] regardless of what the
/// submitting client claims to have validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    title: String,
    author: String,
    content: String,
}

impl PostDraft {
    pub fn try_from_input(input: PostInput) -> Result<Self, DomainError> {
        let blank = input.blank_fields();
        if !blank.is_empty() {
            return Err(DomainError::validation(format!(
                "all fields are required: {} must not be empty",
                blank.join(", ")
            )));
        }

        Ok(Self {
            title: input.title,
            author: input.author,
            content: input.content,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_input() {
        let draft =
            PostDraft::try_from_input(PostInput::new("Title", "Author", "Content")).unwrap();
        assert_eq!(draft.title(), "Title");
        assert_eq!(draft.author(), "Author");
        assert_eq!(draft.content(), "Content");
    }

    #[test]
    fn rejects_blank_and_missing_fields() {
        let err = PostDraft::try_from_input(PostInput::new("", "  ", "Content")).unwrap_err();
        let DomainError::Validation { message } = err else {
            panic!("expected validation error");
        };
        assert!(message.contains("title"));
        assert!(message.contains("author"));
        assert!(!message.contains("content"));
    }

    #[test]
    fn whitespace_only_content_is_rejected() {
        assert!(PostDraft::try_from_input(PostInput::new("t", "a", "\n\t ")).is_err());
    }
}
