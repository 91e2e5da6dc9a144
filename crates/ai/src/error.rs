use thiserror::Error;

/// The three round trips the gateway offers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AiOperation {
    SuggestRecipes,
    ParseReceipt,
    CategorizeItems,
}

impl AiOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiOperation::SuggestRecipes => "suggest_recipes",
            AiOperation::ParseReceipt => "parse_receipt",
            AiOperation::CategorizeItems => "categorize_items",
        }
    }

    /// The user-facing failure of this operation, keeping `cause` for logs.
    pub fn failure(self, cause: impl Into<String>) -> AiError {
        let cause = cause.into();
        match self {
            AiOperation::SuggestRecipes => AiError::SuggestionFailed { cause },
            AiOperation::ParseReceipt => AiError::ParseFailed { cause },
            AiOperation::CategorizeItems => AiError::CategorizationFailed { cause },
        }
    }
}

/// Gateway failure.
///
/// The display text is what a user sees; the transport or decoding detail is
/// kept in `cause`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to get recipe suggestions from AI. Please check your API key and try again.")]
    SuggestionFailed { cause: String },

    #[error("Failed to parse receipt with AI. The image might be unclear or the format is not supported.")]
    ParseFailed { cause: String },

    #[error("Failed to categorize items with AI.")]
    CategorizationFailed { cause: String },
}

impl AiError {
    pub fn cause(&self) -> &str {
        match self {
            AiError::InvalidInput(msg) => msg,
            AiError::SuggestionFailed { cause }
            | AiError::ParseFailed { cause }
            | AiError::CategorizationFailed { cause } => cause,
        }
    }
}
