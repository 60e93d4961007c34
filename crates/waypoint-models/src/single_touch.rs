//! Single-touch attribution
//!
//! All credit goes to one exposure, picked by position. Positions are
//! 1-indexed, counted from the start for first-touch and from the end for
//! last-touch and its variants.

use crate::registry::ModelKind;
use crate::weight::{ChannelWeight, WeightCalculator};
use serde::{Deserialize, Serialize};
use waypoint_journey::Journey;

/// Position of the credited exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPosition {
    /// k-th exposure from the start (1 = first).
    FromStart(usize),
    /// k-th exposure from the end (1 = last).
    FromEnd(usize),
}

impl TouchPosition {
    /// Index into a journey of `len` exposures, if the journey is long enough.
    pub const fn index(&self, len: usize) -> Option<usize> {
        match *self {
            Self::FromStart(k) if k >= 1 && k <= len => Some(k - 1),
            Self::FromEnd(k) if k >= 1 && k <= len => Some(len - k),
            _ => None,
        }
    }
}

/// Full credit to a single exposure.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleTouchModel {
    kind: ModelKind,
    position: TouchPosition,
}

impl SingleTouchModel {
    /// Single-touch model crediting `position`, reported under `kind`.
    pub const fn new(kind: ModelKind, position: TouchPosition) -> Self {
        Self { kind, position }
    }

    /// Registry kind of this model.
    pub const fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Credited position.
    pub const fn position(&self) -> TouchPosition {
        self.position
    }
}

impl WeightCalculator for SingleTouchModel {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn journey_weights(&self, journey: &Journey) -> Vec<ChannelWeight> {
        // Journeys shorter than the position get no credit at all.
        let Some(index) = self.position.index(journey.len()) else {
            return Vec::new();
        };

        let exposure = &journey.exposures()[index];
        vec![ChannelWeight::new(
            journey.customer_id(),
            &exposure.channel,
            1.0,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use waypoint_journey::{CustomerId, Exposure};

    fn journey(channels: &[&str]) -> Journey {
        let exposures = channels
            .iter()
            .enumerate()
            .map(|(i, c)| Exposure {
                channel: c.to_string(),
                timestamp: Utc.with_ymd_and_hms(2023, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                cost: 0.0,
            })
            .collect();
        Journey::new(CustomerId::new("C1"), exposures, vec![])
    }

    fn credited(kind: ModelKind, position: TouchPosition, channels: &[&str]) -> Vec<String> {
        SingleTouchModel::new(kind, position)
            .journey_weights(&journey(channels))
            .into_iter()
            .map(|w| {
                assert_eq!(w.weight, 1.0);
                w.channel
            })
            .collect()
    }

    #[test]
    fn test_position_index() {
        assert_eq!(TouchPosition::FromStart(1).index(3), Some(0));
        assert_eq!(TouchPosition::FromEnd(1).index(3), Some(2));
        assert_eq!(TouchPosition::FromEnd(3).index(3), Some(0));
        assert_eq!(TouchPosition::FromEnd(3).index(2), None);
        assert_eq!(TouchPosition::FromStart(1).index(0), None);
        assert_eq!(TouchPosition::FromStart(0).index(5), None);
    }

    #[test]
    fn test_first_and_last() {
        let path = ["Search", "Ad", "Email", "Review"];
        assert_eq!(
            credited(ModelKind::First, TouchPosition::FromStart(1), &path),
            vec!["Search"]
        );
        assert_eq!(
            credited(ModelKind::Last, TouchPosition::FromEnd(1), &path),
            vec!["Review"]
        );
        assert_eq!(
            credited(ModelKind::SecondToLast, TouchPosition::FromEnd(2), &path),
            vec!["Email"]
        );
        assert_eq!(
            credited(ModelKind::ThirdToLast, TouchPosition::FromEnd(3), &path),
            vec!["Ad"]
        );
    }

    #[test]
    fn test_short_journey_is_excluded() {
        let third = TouchPosition::FromEnd(3);
        let second = TouchPosition::FromEnd(2);
        assert!(credited(ModelKind::ThirdToLast, third, &["Search", "Ad"]).is_empty());
        assert!(credited(ModelKind::SecondToLast, second, &["Search"]).is_empty());
        assert_eq!(
            credited(ModelKind::Last, TouchPosition::FromEnd(1), &["Search"]),
            vec!["Search"]
        );
    }

    #[test]
    fn test_name_follows_kind() {
        let model = SingleTouchModel::new(ModelKind::SecondToLast, TouchPosition::FromEnd(2));
        assert_eq!(model.name(), "second_to_last");
        assert_eq!(model.position(), TouchPosition::FromEnd(2));
    }
}
