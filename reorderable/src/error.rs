use thiserror::Error;

pub type Result<T> = core::result::Result<T, ReorderError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A bad index. Grouped with `InvalidArgument` by [`ReorderError::is_invalid_argument`].
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("item {index} is not mounted; scroll it into view first")]
    NotVisible { index: usize },

    #[error("programmatic reorder requires a ticker to drive its animations")]
    MissingAnimationDriver,

    #[error("slot {slot_index} is already being removed")]
    DuplicateRemoval { slot_index: usize },
}

impl ReorderError {
    /// True for the argument-validation family (bad indices, equal endpoints).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::IndexOutOfRange { .. }
        )
    }
}
