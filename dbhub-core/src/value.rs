use time::{Date, PrimitiveDateTime, Time};

/// A single cell, either bound as a query parameter or read back from a row.
///
/// Every variant is nullable so the column type survives a `NULL`.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int64(Option<i64>),
    UInt64(Option<u64>),
    Float64(Option<f64>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int64(None)
                | Value::UInt64(None)
                | Value::Float64(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Date(None)
                | Value::Time(None)
                | Value::Timestamp(None)
        )
    }

    /// Textual content of the value, blobs are accepted when they hold valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Varchar(Some(v)) => Some(v),
            Value::Blob(Some(v)) => std::str::from_utf8(v).ok(),
            _ => None,
        }
    }
}

macro_rules! impl_from_value {
    ($source:ty, $variant:ident) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Value::$variant(Some(value.into()))
            }
        }
        impl From<Option<$source>> for Value {
            fn from(value: Option<$source>) -> Self {
                Value::$variant(value.map(Into::into))
            }
        }
    };
}

impl_from_value!(bool, Boolean);
impl_from_value!(i8, Int64);
impl_from_value!(i16, Int64);
impl_from_value!(i32, Int64);
impl_from_value!(i64, Int64);
impl_from_value!(u8, UInt64);
impl_from_value!(u16, UInt64);
impl_from_value!(u32, UInt64);
impl_from_value!(u64, UInt64);
impl_from_value!(f32, Float64);
impl_from_value!(f64, Float64);
impl_from_value!(String, Varchar);
impl_from_value!(&str, Varchar);
impl_from_value!(Vec<u8>, Blob);
impl_from_value!(Date, Date);
impl_from_value!(Time, Time);
impl_from_value!(PrimitiveDateTime, Timestamp);
