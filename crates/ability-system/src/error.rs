//! Error infrastructure for the ability system.
//!
//! Public director operations follow a total-function contract: a rejected
//! request returns `false` or does nothing. The enums here name *why* a request
//! was rejected. They are returned by the `check_*` diagnostics and logged
//! when the director refuses a request.
//!
//! # Design Principles
//!
//! - **Type Safety**: each rejection family has its own enum
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable Codes**: every variant exposes a static snake_case code

use gameplay_tags::Tag;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    ///
    /// Examples: ability on cooldown, blocked by an active ability
    Recoverable,

    /// The request can never succeed without changing the setup.
    ///
    /// Examples: ability not granted, cost attribute not registered
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all ability-system errors.
pub trait GameplayError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Why an ability refused to activate.
#[derive(Clone, Debug, PartialEq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ActivationError {
    #[error("ability `{tag}` is not granted")]
    NotGranted { tag: Tag },

    #[error("ability `{tag}` is already active")]
    AlreadyActive { tag: Tag },

    #[error("ability `{tag}` is on cooldown ({remaining:.2}s left)")]
    OnCooldown { tag: Tag, remaining: f32 },

    #[error("ability `{tag}` is blocked")]
    Blocked { tag: Tag },

    #[error("ability `{tag}` is blocked by active ability `{blocking}`")]
    BlockedByActive { tag: Tag, blocking: Tag },

    #[error("ability `{tag}` costs attribute `{attribute}` which is not registered")]
    CostAttributeMissing { tag: Tag, attribute: Tag },

    #[error("ability `{tag}` needs {required} `{attribute}` but only {available} is available")]
    InsufficientCost {
        tag: Tag,
        attribute: Tag,
        required: f32,
        available: f32,
    },
}

impl GameplayError for ActivationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotGranted { .. } | Self::CostAttributeMissing { .. } => {
                ErrorSeverity::Validation
            }
            Self::AlreadyActive { .. }
            | Self::OnCooldown { .. }
            | Self::Blocked { .. }
            | Self::BlockedByActive { .. }
            | Self::InsufficientCost { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        self.into()
    }
}

/// Why an effect could not be added.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EffectError {
    #[error("effect `{tag}` is already active")]
    AlreadyActive { tag: Tag },

    #[error("effect `{tag}` is blocked")]
    Blocked { tag: Tag },
}

impl GameplayError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Tag {
        Tag::new(text).unwrap()
    }

    #[test]
    fn codes_are_snake_case_variant_names() {
        let err = ActivationError::OnCooldown {
            tag: tag("ability.dash"),
            remaining: 1.5,
        };

        assert_eq!(err.error_code(), "on_cooldown");
        assert!(err.severity().is_recoverable());
        assert_eq!(
            err.to_string(),
            "ability `ability.dash` is on cooldown (1.50s left)"
        );
    }

    #[test]
    fn missing_grant_is_a_validation_error() {
        let err = ActivationError::NotGranted {
            tag: tag("ability.dash"),
        };

        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.severity().as_str(), "validation");
    }
}
