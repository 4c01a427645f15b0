use dbhub_core::Value;
use time::{Date, Month, PrimitiveDateTime, Time};

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
impl From<ValueWrap> for Value {
    fn from(value: ValueWrap) -> Self {
        value.0
    }
}

impl mysql_async::prelude::FromValue for ValueWrap {
    type Intermediate = ValueWrap;
}

impl TryFrom<mysql_async::Value> for ValueWrap {
    type Error = mysql_async::FromValueError;
    fn try_from(value: mysql_async::Value) -> Result<Self, Self::Error> {
        Ok(ValueWrap(match value {
            mysql_async::Value::NULL => Value::Null,
            mysql_async::Value::Bytes(v) => match String::from_utf8(v) {
                Ok(v) => Value::Varchar(Some(v)),
                Err(e) => Value::Blob(Some(e.into_bytes().into())),
            },
            mysql_async::Value::Int(v) => Value::Int64(Some(v)),
            mysql_async::Value::UInt(v) => Value::UInt64(Some(v)),
            mysql_async::Value::Float(v) => Value::Float64(Some(v as f64)),
            mysql_async::Value::Double(v) => Value::Float64(Some(v)),
            mysql_async::Value::Date(year, month, day, hour, minute, second, microsecond) => {
                let timestamp = Month::try_from(month)
                    .ok()
                    .and_then(|month| Date::from_calendar_date(year as _, month, day).ok())
                    .zip(Time::from_hms_micro(hour, minute, second, microsecond).ok())
                    .map(|(date, time)| PrimitiveDateTime::new(date, time));
                match timestamp {
                    Some(v) => Value::Timestamp(Some(v)),
                    // Zero dates like 0000-00-00 are kept as text
                    None => Value::Varchar(Some(format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                        year, month, day, hour, minute, second, microsecond
                    ))),
                }
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, micro) => {
                if !negative && days == 0 {
                    Value::Time(Some(
                        Time::from_hms_micro(hours, minutes, seconds, micro)
                            .map_err(|_| mysql_async::FromValueError(value.clone()))?,
                    ))
                } else {
                    Value::Varchar(Some(format!(
                        "{}{:02}:{:02}:{:02}.{:06}",
                        if negative { "-" } else { "" },
                        days as u64 * 24 + hours as u64,
                        minutes,
                        seconds,
                        micro
                    )))
                }
            }
        }))
    }
}

impl From<ValueWrap> for mysql_async::Value {
    fn from(value: ValueWrap) -> Self {
        match value.0 {
            Value::Null
            | Value::Boolean(None)
            | Value::Int64(None)
            | Value::UInt64(None)
            | Value::Float64(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None) => mysql_async::Value::NULL,
            Value::Boolean(Some(v)) => mysql_async::Value::Int(v as i64),
            Value::Int64(Some(v)) => mysql_async::Value::Int(v),
            Value::UInt64(Some(v)) => mysql_async::Value::UInt(v),
            Value::Float64(Some(v)) => mysql_async::Value::Double(v),
            Value::Varchar(Some(v)) => mysql_async::Value::Bytes(v.into_bytes()),
            Value::Blob(Some(v)) => mysql_async::Value::Bytes(v.into_vec()),
            Value::Date(Some(v)) => {
                mysql_async::Value::Date(v.year() as _, v.month().into(), v.day(), 0, 0, 0, 0)
            }
            Value::Time(Some(v)) => mysql_async::Value::Time(
                false,
                0,
                v.hour(),
                v.minute(),
                v.second(),
                v.microsecond(),
            ),
            Value::Timestamp(Some(v)) => mysql_async::Value::Date(
                v.year() as _,
                v.month().into(),
                v.day(),
                v.hour(),
                v.minute(),
                v.second(),
                v.microsecond(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValueWrap;
    use dbhub_core::Value;
    use time::macros::{date, datetime, time};

    fn from_mysql(value: mysql_async::Value) -> Value {
        ValueWrap::try_from(value)
            .expect("Expected a convertible value")
            .0
    }

    fn to_mysql(value: Value) -> mysql_async::Value {
        ValueWrap(value).into()
    }

    #[test]
    fn text_and_blobs() {
        assert_eq!(
            from_mysql(mysql_async::Value::Bytes(b"accounts".to_vec())),
            Value::Varchar(Some("accounts".into()))
        );
        assert_eq!(
            from_mysql(mysql_async::Value::Bytes(vec![0xff, 0x00])),
            Value::Blob(Some([0xffu8, 0x00].into()))
        );
        assert_eq!(
            to_mysql(Value::from("users")),
            mysql_async::Value::Bytes(b"users".to_vec())
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(from_mysql(mysql_async::Value::Int(-3)), Value::Int64(Some(-3)));
        assert_eq!(from_mysql(mysql_async::Value::UInt(3)), Value::UInt64(Some(3)));
        assert_eq!(
            from_mysql(mysql_async::Value::Float(0.5)),
            Value::Float64(Some(0.5))
        );
        assert_eq!(to_mysql(Value::from(true)), mysql_async::Value::Int(1));
        assert_eq!(to_mysql(Value::Int64(None)), mysql_async::Value::NULL);
        assert_eq!(from_mysql(mysql_async::Value::NULL), Value::Null);
    }

    #[test]
    fn dates_and_times() {
        assert_eq!(
            from_mysql(mysql_async::Value::Date(2025, 3, 14, 15, 9, 26, 535)),
            Value::Timestamp(Some(datetime!(2025-03-14 15:09:26.000535)))
        );
        assert_eq!(
            from_mysql(mysql_async::Value::Date(0, 0, 0, 0, 0, 0, 0)),
            Value::Varchar(Some("0000-00-00 00:00:00.000000".into()))
        );
        assert_eq!(
            from_mysql(mysql_async::Value::Time(false, 0, 8, 30, 0, 0)),
            Value::Time(Some(time!(08:30)))
        );
        assert_eq!(
            from_mysql(mysql_async::Value::Time(true, 1, 2, 3, 4, 5)),
            Value::Varchar(Some("-26:03:04.000005".into()))
        );
        assert_eq!(
            to_mysql(Value::from(date!(2024 - 02 - 29))),
            mysql_async::Value::Date(2024, 2, 29, 0, 0, 0, 0)
        );
        assert_eq!(
            to_mysql(Value::from(datetime!(2024-02-29 23:59:58.000001))),
            mysql_async::Value::Date(2024, 2, 29, 23, 59, 58, 1)
        );
    }
}
