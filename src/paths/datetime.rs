/*!
 * Legacy Timestamps
 * Reference packed date/time codec (UTC)
 */

use super::traits::{DateTimeCodec, DosDateTime};
use std::time::SystemTime;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

const EPOCH_YEAR: i32 = 1980;
const LAST_YEAR: i32 = EPOCH_YEAR + 127;

/// 1980-01-01 00:00:00, the earliest representable stamp
const FLOOR: DosDateTime = DosDateTime {
    date: (1 << 5) | 1,
    time: 0,
};

/// Packs timestamps as `(year-1980)<<9 | month<<5 | day` and
/// `hour<<11 | minute<<5 | second/2`, in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcDateCodec;

impl UtcDateCodec {
    pub const fn new() -> Self {
        Self
    }
}

impl DateTimeCodec for UtcDateCodec {
    fn to_dos(&self, time: SystemTime) -> DosDateTime {
        let stamp = OffsetDateTime::from(time);
        if stamp.year() < EPOCH_YEAR {
            return FLOOR;
        }
        let stamp = if stamp.year() > LAST_YEAR {
            PrimitiveDateTime::new(
                Date::from_calendar_date(LAST_YEAR, Month::December, 31).unwrap_or(stamp.date()),
                Time::from_hms(23, 59, 58).unwrap_or(Time::MIDNIGHT),
            )
            .assume_utc()
        } else {
            stamp
        };

        let date = (((stamp.year() - EPOCH_YEAR) as u16) << 9)
            | ((u8::from(stamp.month()) as u16) << 5)
            | stamp.day() as u16;
        let time = ((stamp.hour() as u16) << 11)
            | ((stamp.minute() as u16) << 5)
            | (stamp.second() as u16 / 2);
        DosDateTime { date, time }
    }

    fn from_dos(&self, stamp: DosDateTime) -> SystemTime {
        let year = EPOCH_YEAR + (stamp.date >> 9) as i32;
        let date = Month::try_from(((stamp.date >> 5) & 0x0f) as u8)
            .ok()
            .and_then(|month| Date::from_calendar_date(year, month, (stamp.date & 0x1f) as u8).ok());
        let time = Time::from_hms(
            (stamp.time >> 11) as u8,
            ((stamp.time >> 5) & 0x3f) as u8,
            ((stamp.time & 0x1f) * 2) as u8,
        )
        .ok();

        match (date, time) {
            (Some(date), Some(time)) => PrimitiveDateTime::new(date, time).assume_utc().into(),
            _ => self.from_dos(FLOOR),
        }
    }
}
