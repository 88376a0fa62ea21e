//! Race notices pushed to HUD subscribers

use racer_core::model::{format_race_time, CarId, RaceRecord};
use racer_core::units::Seconds;
use racer_core::RaceEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaceNotice {
    /// Toast shown when a new lap begins, e.g. "Lap 2/3"
    LapComplete {
        lap: u32,
        total_laps: u32,
        message: String,
    },
    RaceComplete {
        car_id: CarId,
        final_time: Seconds,
        /// Final time as the HUD shows it
        display_time: String,
    },
    ResultSaved {
        record: RaceRecord,
    },
    ResultSaveFailed {
        message: String,
    },
}

impl From<&RaceEvent> for RaceNotice {
    fn from(event: &RaceEvent) -> Self {
        match *event {
            RaceEvent::LapComplete { lap, total_laps } => RaceNotice::LapComplete {
                lap,
                total_laps,
                message: format!("Lap {}/{}", lap, total_laps),
            },
            RaceEvent::RaceComplete { car_id, final_time } => RaceNotice::RaceComplete {
                car_id,
                final_time,
                display_time: format_race_time(final_time.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lap_toast_text() {
        let notice = RaceNotice::from(&RaceEvent::LapComplete {
            lap: 2,
            total_laps: 3,
        });
        match notice {
            RaceNotice::LapComplete { message, .. } => assert_eq!(message, "Lap 2/3"),
            other => panic!("unexpected notice {:?}", other),
        }
    }

    #[test]
    fn test_race_complete_json() {
        let notice = RaceNotice::from(&RaceEvent::RaceComplete {
            car_id: 2,
            final_time: Seconds(75.5),
        });
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["type"], "race_complete");
        assert_eq!(json["car_id"], 2);
        assert_eq!(json["display_time"], "1:15.50");
    }
}
