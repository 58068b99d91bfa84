use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const INVALID_TRIGGER_POINT_MESSAGE: &str = "Trigger point must be one of 50%, 75% or 100%.";
const MISSING_ITEM_INDEX_MESSAGE: &str = "The observed element does not carry an item index.";
const INVALID_ITEM_INDEX_MESSAGE: &str = "The observed element carries an invalid item index.";
const OBSERVER_CREATION_MESSAGE: &str = "Could not watch the list for visibility changes.";
const SLOT_RELEASED_MESSAGE: &str = "The observer slot has already been released.";

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollError {
    InvalidTriggerPoint(String),
    MissingItemIndex,
    InvalidItemIndex(String),
    ObserverCreation(String),
    SlotReleased,
}

impl ScrollError {
    pub fn user_message(&self) -> String {
        match self {
            ScrollError::InvalidTriggerPoint(_) => String::from(INVALID_TRIGGER_POINT_MESSAGE),
            ScrollError::MissingItemIndex => String::from(MISSING_ITEM_INDEX_MESSAGE),
            ScrollError::InvalidItemIndex(_) => String::from(INVALID_ITEM_INDEX_MESSAGE),
            ScrollError::ObserverCreation(_) => String::from(OBSERVER_CREATION_MESSAGE),
            ScrollError::SlotReleased => String::from(SLOT_RELEASED_MESSAGE),
        }
    }

    pub fn error_detail(&self) -> String {
        match self {
            ScrollError::InvalidTriggerPoint(value) => format!("Invalid trigger point: '{value}'"),
            ScrollError::InvalidItemIndex(value) => format!("Invalid item index: '{value}'"),
            ScrollError::ObserverCreation(e) => e.clone(),
            _ => self.user_message(),
        }
    }
}

impl Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}

impl FromStr for ScrollError {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::errors::{ScrollError, INVALID_ITEM_INDEX_MESSAGE, INVALID_TRIGGER_POINT_MESSAGE, MISSING_ITEM_INDEX_MESSAGE, OBSERVER_CREATION_MESSAGE, SLOT_RELEASED_MESSAGE};

    #[test]
    fn test_scroll_error_user_message() {
        let test_string = String::from("test");
        assert_eq!(ScrollError::InvalidTriggerPoint(test_string.clone()).user_message(), INVALID_TRIGGER_POINT_MESSAGE);
        assert_eq!(ScrollError::MissingItemIndex.user_message(), MISSING_ITEM_INDEX_MESSAGE);
        assert_eq!(ScrollError::InvalidItemIndex(test_string.clone()).user_message(), INVALID_ITEM_INDEX_MESSAGE);
        assert_eq!(ScrollError::ObserverCreation(test_string.clone()).user_message(), OBSERVER_CREATION_MESSAGE);
        assert_eq!(ScrollError::SlotReleased.user_message(), SLOT_RELEASED_MESSAGE);
    }

    #[test]
    fn test_scroll_error_detail() {
        assert_eq!(ScrollError::InvalidTriggerPoint(String::from("60%")).error_detail(), "Invalid trigger point: '60%'");
        assert_eq!(ScrollError::InvalidItemIndex(String::from("abc")).error_detail(), "Invalid item index: 'abc'");
        assert_eq!(ScrollError::ObserverCreation(String::from("TypeError")).error_detail(), "TypeError");
        assert_eq!(ScrollError::MissingItemIndex.error_detail(), MISSING_ITEM_INDEX_MESSAGE);
    }

    #[test]
    fn test_scroll_error_display_from_str() {
        let error_vec = vec![
            ScrollError::InvalidTriggerPoint(String::from("test")),
            ScrollError::MissingItemIndex,
            ScrollError::InvalidItemIndex(String::from("test")),
            ScrollError::ObserverCreation(String::from("test")),
            ScrollError::SlotReleased,
        ];
        for error in error_vec {
            assert_eq!(ScrollError::from_str(&error.to_string()).expect("Should parse error."), error);
        }
    }
}
