mod track_selection;
pub use track_selection::*;

use std::ops::Deref;

// ChatId
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub struct ChatId(pub i64);

impl Deref for ChatId {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<i64> for ChatId {
    fn from(value: i64) -> Self {
        ChatId(value)
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// MessageId
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub struct MessageId(pub i32);

impl Deref for MessageId {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<i32> for MessageId {
    fn from(value: i32) -> Self {
        MessageId(value)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
