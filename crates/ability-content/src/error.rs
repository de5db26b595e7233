use gameplay_tags::Tag;

/// Inconsistencies found while assembling a [`crate::ContentLibrary`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("{kind} `{tag}` is defined more than once")]
    Duplicate { kind: &'static str, tag: Tag },

    #[error("ability `{ability}` applies unknown effect `{effect}`")]
    UnknownEffect { ability: Tag, effect: Tag },

    #[error("{kind} `{tag}` is not defined")]
    Missing { kind: &'static str, tag: Tag },
}
