//! Бинарное представление календарного времени.
//!
//! Для кодека это непрозрачный блок: MinData пишет его сразу после тега
//! `Time` / `PtrTime` и не заглядывает внутрь.
//!
//! # Формат
//!
//! ```text
//! [version:1][seconds:8 BE][nanos:4 BE][offset_min:2 BE]            (version 1)
//! [version:1][seconds:8 BE][nanos:4 BE][offset_min:2 BE][offset_sec:1] (version 2)
//! ```
//!
//! - `seconds` — секунды от 0001-01-01T00:00:00Z;
//! - `nanos` — наносекунды внутри секунды (точность не теряется);
//! - `offset_min` — смещение часового пояса в минутах, `-1` означает UTC;
//! - `offset_sec` — остаток смещения в секундах, пишется только если он не
//!   нулевой.

use byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, FixedOffset};

use crate::{MinDataError, MinDataResult};

const TIME_BINARY_V1: u8 = 1;
const TIME_BINARY_V2: u8 = 2;

/// Длина блока версии 1.
pub const TIME_BINARY_LEN_V1: usize = 15;
/// Длина блока версии 2.
pub const TIME_BINARY_LEN_V2: usize = 16;

/// Секунды между 0001-01-01 и 1970-01-01.
const UNIX_TO_INTERNAL: i64 = 62_135_596_800;

/// Маркер UTC в поле `offset_min`.
const UTC_OFFSET_MARKER: i16 = -1;

/// Сериализует момент времени вместе с его смещением.
///
/// # Errors
/// - `InvalidTimeOffset`, если смещение в целых минутах равно `-1`: это
///   значение зарезервировано под UTC.
pub fn marshal_time(t: &DateTime<FixedOffset>) -> MinDataResult<Vec<u8>> {
    let offset = t.offset().local_minus_utc();
    let offset_min = offset / 60;
    let offset_sec = offset % 60;

    let offset_min = match offset_min {
        0 if offset_sec == 0 => UTC_OFFSET_MARKER,
        -1 => return Err(MinDataError::InvalidTimeOffset { seconds: offset }),
        // |offset| < 86400, так что минуты всегда помещаются в i16
        m => m as i16,
    };

    let version = if offset_sec == 0 {
        TIME_BINARY_V1
    } else {
        TIME_BINARY_V2
    };

    let mut out = Vec::with_capacity(TIME_BINARY_LEN_V2);
    out.push(version);
    let mut sec = [0u8; 8];
    BigEndian::write_i64(&mut sec, t.timestamp() + UNIX_TO_INTERNAL);
    out.extend_from_slice(&sec);
    let mut nanos = [0u8; 4];
    BigEndian::write_u32(&mut nanos, t.timestamp_subsec_nanos());
    out.extend_from_slice(&nanos);
    let mut off = [0u8; 2];
    BigEndian::write_i16(&mut off, offset_min);
    out.extend_from_slice(&off);
    if version == TIME_BINARY_V2 {
        out.push(offset_sec as i8 as u8);
    }
    Ok(out)
}

/// Восстанавливает момент времени из блока, созданного [`marshal_time`].
///
/// Возвращает текстовую причину отказа: решение, какой ошибкой её
/// представить, принимает вызывающий декодер.
pub fn unmarshal_time(data: &[u8]) -> Result<DateTime<FixedOffset>, String> {
    let Some((&version, rest)) = data.split_first() else {
        return Err("time: no data".to_string());
    };
    let expected = match version {
        TIME_BINARY_V1 => TIME_BINARY_LEN_V1,
        TIME_BINARY_V2 => TIME_BINARY_LEN_V2,
        v => return Err(format!("time: unsupported version {v}")),
    };
    if data.len() != expected {
        return Err(format!(
            "time: invalid length {} for version {version}, expected {expected}",
            data.len()
        ));
    }

    let sec = BigEndian::read_i64(&rest[0..8]);
    let nanos = BigEndian::read_u32(&rest[8..12]);
    let offset_min = BigEndian::read_i16(&rest[12..14]);

    let mut offset = if offset_min == UTC_OFFSET_MARKER {
        0
    } else {
        i32::from(offset_min) * 60
    };
    if version == TIME_BINARY_V2 {
        offset += i32::from(rest[14] as i8);
    }

    let unix = sec
        .checked_sub(UNIX_TO_INTERNAL)
        .ok_or_else(|| "time: seconds out of range".to_string())?;
    let utc = DateTime::from_timestamp(unix, nanos)
        .ok_or_else(|| format!("time: invalid timestamp {unix}.{nanos:09}"))?;
    let tz = FixedOffset::east_opt(offset)
        .ok_or_else(|| format!("time: invalid zone offset {offset}s"))?;
    Ok(utc.with_timezone(&tz))
}
