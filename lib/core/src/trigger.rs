use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use infiniscroll_utils::errors::ScrollError;

/// Position within the list at which the next page should be requested
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, IntoStaticStr, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum TriggerPoint {
    #[strum(serialize = "50%")]
    #[serde(rename = "50%")]
    Half,
    #[strum(serialize = "75%")]
    #[serde(rename = "75%")]
    ThreeQuarters,
    #[default]
    #[strum(serialize = "100%")]
    #[serde(rename = "100%")]
    End,
}

impl TriggerPoint {
    /// # Parses a trigger point from its percentage form
    ///
    /// ```
    /// use infiniscroll_core::trigger::TriggerPoint;
    /// use infiniscroll_utils::errors::ScrollError;
    ///
    /// assert_eq!(TriggerPoint::parse("75%"), Ok(TriggerPoint::ThreeQuarters));
    /// assert_eq!(TriggerPoint::parse(" 100% "), Ok(TriggerPoint::End));
    /// assert_eq!(TriggerPoint::parse("60%"), Err(ScrollError::InvalidTriggerPoint(String::from("60%"))));
    /// ```
    pub fn parse(value: &str) -> Result<Self, ScrollError> {
        TriggerPoint::from_str(value.trim()).map_err(|_| ScrollError::InvalidTriggerPoint(value.to_string()))
    }

    /// # Returns the index of the item at this trigger point in a list of `number_of_items` items
    ///
    /// Fractional positions are rounded down, an empty list resolves to 0.
    ///
    /// ```
    /// use infiniscroll_core::trigger::TriggerPoint;
    ///
    /// assert_eq!(TriggerPoint::Half.resolve(10), 5);
    /// assert_eq!(TriggerPoint::ThreeQuarters.resolve(10), 7);
    /// assert_eq!(TriggerPoint::End.resolve(10), 9);
    /// ```
    pub fn resolve(self, number_of_items: usize) -> usize {
        match self {
            TriggerPoint::Half => number_of_items / 2,
            TriggerPoint::ThreeQuarters => number_of_items / 4 * 3 + (number_of_items % 4) * 3 / 4,
            TriggerPoint::End => get_fallback_index(number_of_items),
        }
    }
}

/// # Returns the index of the item that should trigger the next fetch
///
/// An explicit `trigger_index` takes precedence over `trigger_point`, including `Some(0)`. The explicit index
/// is neither validated nor clamped against `number_of_items`.
///
/// ```
/// use infiniscroll_core::trigger::{get_trigger_index, TriggerPoint};
///
/// assert_eq!(get_trigger_index(10, TriggerPoint::ThreeQuarters, None), 7);
/// assert_eq!(get_trigger_index(10, TriggerPoint::ThreeQuarters, Some(3)), 3);
/// assert_eq!(get_trigger_index(10, TriggerPoint::End, Some(0)), 0);
/// assert_eq!(get_trigger_index(10, TriggerPoint::End, Some(42)), 42);
/// ```
pub fn get_trigger_index(
    number_of_items: usize,
    trigger_point: TriggerPoint,
    trigger_index: Option<usize>,
) -> usize {
    trigger_index.unwrap_or_else(|| trigger_point.resolve(number_of_items))
}

/// # Returns the index of the last item, which always acts as fallback trigger
///
/// ```
/// use infiniscroll_core::trigger::get_fallback_index;
///
/// assert_eq!(get_fallback_index(10), 9);
/// assert_eq!(get_fallback_index(1), 0);
/// assert_eq!(get_fallback_index(0), 0);
/// ```
pub fn get_fallback_index(number_of_items: usize) -> usize {
    number_of_items.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::trigger::{get_fallback_index, get_trigger_index, TriggerPoint};

    #[test]
    fn test_trigger_point_resolve() {
        for number_of_items in 1..=200usize {
            assert_eq!(TriggerPoint::Half.resolve(number_of_items), (number_of_items as f64 * 0.5).floor() as usize);
            assert_eq!(TriggerPoint::ThreeQuarters.resolve(number_of_items), (number_of_items as f64 * 0.75).floor() as usize);
            assert_eq!(TriggerPoint::End.resolve(number_of_items), number_of_items - 1);
        }
        assert_eq!(TriggerPoint::ThreeQuarters.resolve(usize::MAX), usize::MAX / 4 * 3 + 2);
    }

    #[test]
    fn test_trigger_point_resolve_empty_list() {
        for trigger_point in TriggerPoint::iter() {
            assert_eq!(trigger_point.resolve(0), 0);
        }
    }

    #[test]
    fn test_trigger_point_string_form() {
        assert_eq!(TriggerPoint::default(), TriggerPoint::End);
        for trigger_point in TriggerPoint::iter() {
            assert_eq!(TriggerPoint::parse(&trigger_point.to_string()), Ok(trigger_point));
        }
        assert_eq!(TriggerPoint::Half.to_string(), "50%");
        assert_eq!(TriggerPoint::ThreeQuarters.to_string(), "75%");
        assert_eq!(TriggerPoint::End.to_string(), "100%");
        assert!(TriggerPoint::parse("").is_err());
        assert!(TriggerPoint::parse("75").is_err());
    }

    #[test]
    fn test_trigger_point_serde() {
        assert_eq!(serde_json::to_string(&TriggerPoint::ThreeQuarters).expect("Should serialize."), "\"75%\"");
        assert_eq!(serde_json::from_str::<TriggerPoint>("\"50%\"").expect("Should deserialize."), TriggerPoint::Half);
        assert!(serde_json::from_str::<TriggerPoint>("\"25%\"").is_err());
    }

    #[test]
    fn test_get_trigger_index() {
        for trigger_point in TriggerPoint::iter() {
            assert_eq!(get_trigger_index(10, trigger_point, None), trigger_point.resolve(10));
            assert_eq!(get_trigger_index(10, trigger_point, Some(4)), 4);
            assert_eq!(get_trigger_index(10, trigger_point, Some(0)), 0);
        }
        assert_eq!(get_trigger_index(10, TriggerPoint::End, None), 9);
        assert_eq!(get_trigger_index(10, TriggerPoint::ThreeQuarters, None), 7);
    }

    #[test]
    fn test_get_fallback_index() {
        for number_of_items in 1..=50usize {
            assert_eq!(get_fallback_index(number_of_items), number_of_items - 1);
        }
    }
}
