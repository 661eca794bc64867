//! Error types for the core components.
//!
//! The render loops treat all of these as caller bugs: they log and carry on
//! with the next frame.

/// Misuse of the recorder's begin/add/end bracket.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// `add_point` or `end_record` without a preceding `begin_record`.
    #[error("no recording frame is open")]
    NoActiveFrame,

    /// `begin_record` while the previous frame was never ended.
    #[error("a recording frame is already open")]
    FrameAlreadyOpen,
}

/// Misuse of the transform stack.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// `pop` with no matching `push`.
    #[error("pop called on an empty transform stack")]
    StackUnderflow,
}

/// A turtle path string contained something other than `f l r u d`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("unknown turtle command {found:?} at offset {offset}")]
    UnknownCommand { found: char, offset: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(RecordError::NoActiveFrame.to_string(), "no recording frame is open");
        assert!(TransformError::StackUnderflow.to_string().contains("empty"));
        let e = PathError::UnknownCommand { found: 'x', offset: 3 };
        assert_eq!(e.to_string(), "unknown turtle command 'x' at offset 3");
    }
}
