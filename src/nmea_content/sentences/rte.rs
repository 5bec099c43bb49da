use crate::{
    self as marine_nmea, ArgumentError, FieldError, RawSentence, RouteType, Sentence, SentenceId,
    TalkerId,
    nmea_content::sentences::check_sequence,
};

field_layout! {
    /// Fixed fields of an [`RTE`] sentence. The waypoint ids follow from
    /// [`RteField::FirstWaypointId`] to the end of the sentence.
    pub enum RteField {
        SentenceCount = 1,
        SentenceIndex = 2,
        RouteType = 3,
        RouteId = 4,
        FirstWaypointId = 5,
    }
}

/// RTE - Routes
///
/// A route may be spread over several sentences. The number of waypoint ids is not fixed,
/// a sentence holds as many as fit in one line.
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rte_routes>
///
/// ```text
///         1 2 3 4    5         x
///         | | | |    |         |
///  $--RTE,x,x,a,c--c,c--c, ..., c--c*hh<CR><LF>
/// ```
///
/// [`Sentence::new`] creates a sentence without waypoint slots, see
/// [`RTE::with_waypoint_slots`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Sentence)]
#[nmea(id(RTE), fields(4))]
pub struct RTE {
    raw: RawSentence,
}

impl RTE {
    /// Creates an empty sentence with room for `slots` waypoint ids.
    pub fn with_waypoint_slots(talker_id: TalkerId, slots: usize) -> Self {
        RTE {
            raw: RawSentence::new(talker_id, SentenceId::RTE, Self::FIELD_COUNT + slots),
        }
    }

    /// Total number of RTE sentences of the route
    pub fn sentence_count(&self) -> Result<u8, FieldError> {
        self.raw.value(RteField::SentenceCount)
    }

    /// 1-based index of this sentence
    pub fn sentence_index(&self) -> Result<u8, FieldError> {
        self.raw.value(RteField::SentenceIndex)
    }

    pub fn route_type(&self) -> Result<RouteType, FieldError> {
        self.raw.enumerated(RteField::RouteType)
    }

    pub fn route_id(&self) -> Result<&str, FieldError> {
        self.raw.string(RteField::RouteId)
    }

    /// Waypoint ids in route order. Empty slots are skipped.
    pub fn waypoint_ids(&self) -> Vec<&str> {
        self.raw
            .fields()
            .skip(Self::FIELD_COUNT)
            .filter(|id| !id.is_empty())
            .collect()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoint_ids().len()
    }

    pub fn is_first(&self) -> Result<bool, FieldError> {
        Ok(self.sentence_index()? == 1)
    }

    pub fn is_last(&self) -> Result<bool, FieldError> {
        Ok(self.sentence_index()? == self.sentence_count()?)
    }

    /// A working route starts at the waypoint last passed.
    pub fn is_working_route(&self) -> Result<bool, FieldError> {
        Ok(self.route_type()? == RouteType::Working)
    }

    pub fn set_sentence_count(&mut self, count: u8) -> Result<(), ArgumentError> {
        let count = check_sequence("sentence count", count)?;
        self.raw.set_integer(RteField::SentenceCount, i64::from(count))
    }

    pub fn set_sentence_index(&mut self, index: u8) -> Result<(), ArgumentError> {
        let index = check_sequence("sentence index", index)?;
        self.raw.set_integer(RteField::SentenceIndex, i64::from(index))
    }

    pub fn set_route_type(&mut self, route_type: RouteType) -> Result<(), ArgumentError> {
        self.raw.set_enumerated(RteField::RouteType, route_type)
    }

    pub fn set_route_id(&mut self, id: &str) -> Result<(), ArgumentError> {
        self.raw.set_string(RteField::RouteId, id)
    }

    /// Writes the ids into the waypoint slots and clears the remaining ones.
    ///
    /// The number of slots is fixed when the sentence is created or parsed.
    pub fn set_waypoint_ids(&mut self, ids: &[&str]) -> Result<(), ArgumentError> {
        let slots = self.raw.field_count().saturating_sub(Self::FIELD_COUNT);
        if ids.len() > slots {
            return Err(ArgumentError::TooManyValues {
                name: "waypoint ids",
                max: slots,
                count: ids.len(),
            });
        }

        let mut raw = self.raw.clone();
        for slot in 0..slots {
            let index = RteField::FirstWaypointId as usize + slot;
            match ids.get(slot) {
                Some(id) => raw.set_string(index, id)?,
                None => raw.clear(index)?,
            }
        }

        self.raw = raw;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RTE_LINE: &str = "$GPRTE,1,1,c,0,MELIN,RUSKI,KNUDAN*25";

    #[test]
    fn test_rte_getters() {
        let rte = RTE::parse(RTE_LINE).unwrap();

        assert_eq!(rte.sentence_count(), Ok(1));
        assert_eq!(rte.sentence_index(), Ok(1));
        assert_eq!(rte.route_type(), Ok(RouteType::Complete));
        assert_eq!(rte.route_id(), Ok("0"));
        assert_eq!(rte.waypoint_ids(), vec!["MELIN", "RUSKI", "KNUDAN"]);
        assert_eq!(rte.waypoint_count(), 3);
        assert_eq!(rte.is_first(), Ok(true));
        assert_eq!(rte.is_last(), Ok(true));
        assert_eq!(rte.is_working_route(), Ok(false));
    }

    #[test]
    fn test_rte_build() {
        let mut rte = RTE::with_waypoint_slots(TalkerId::GP, 3);

        rte.set_sentence_count(1).unwrap();
        rte.set_sentence_index(1).unwrap();
        rte.set_route_type(RouteType::Complete).unwrap();
        rte.set_route_id("0").unwrap();
        rte.set_waypoint_ids(&["MELIN", "RUSKI", "KNUDAN"]).unwrap();

        assert_eq!(rte.to_string(), RTE_LINE);
    }

    #[test]
    fn test_rte_waypoint_slots() {
        let mut rte = RTE::parse(RTE_LINE).unwrap();

        assert_eq!(
            rte.set_waypoint_ids(&["A", "B", "C", "D"]),
            Err(ArgumentError::TooManyValues {
                name: "waypoint ids",
                max: 3,
                count: 4
            })
        );
        assert_eq!(rte.waypoint_count(), 3);

        rte.set_waypoint_ids(&["A"]).unwrap();
        assert_eq!(rte.waypoint_ids(), vec!["A"]);
        assert_eq!(rte.raw().field_count(), 7);

        // an invalid id leaves the other slots untouched
        assert!(rte.set_waypoint_ids(&["B", "C,D"]).is_err());
        assert_eq!(rte.waypoint_ids(), vec!["A"]);

        let mut empty = RTE::new(TalkerId::GP);
        assert!(empty.set_waypoint_ids(&[]).is_ok());
        assert!(empty.set_waypoint_ids(&["A"]).is_err());
        assert!(empty.waypoint_ids().is_empty());
    }

    #[test]
    fn test_rte_working_route() {
        let mut rte = RTE::new(TalkerId::GP);
        rte.set_route_type(RouteType::Working).unwrap();
        assert_eq!(rte.is_working_route(), Ok(true));
        assert!(rte.is_first().unwrap_err().is_not_available());
        assert!(rte.set_sentence_count(0).is_err());
    }
}
