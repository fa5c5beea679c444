use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// Fixed-point decimal column, stored as TEXT in SQLite.
///
/// SQLite has no NUMERIC codec for `BigDecimal` in sqlx, so amounts go
/// through this wrapper. All wage math stays exact; nothing in the crate
/// touches floating point for money.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Numeric(pub BigDecimal);

impl Numeric {
    pub fn zero() -> Self {
        Numeric(BigDecimal::zero())
    }

    pub fn from_i64(v: i64) -> Self {
        Numeric(BigDecimal::from(v))
    }

    pub fn inner(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::zero()
    }
}

impl From<BigDecimal> for Numeric {
    fn from(v: BigDecimal) -> Self {
        Numeric(v)
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::from_i64(v)
    }
}

impl Add for Numeric {
    type Output = Numeric;

    fn add(self, rhs: Numeric) -> Numeric {
        Numeric(self.0 + rhs.0)
    }
}

impl AddAssign for Numeric {
    fn add_assign(&mut self, rhs: Numeric) {
        self.0 += rhs.0;
    }
}

impl Sub for Numeric {
    type Output = Numeric;

    fn sub(self, rhs: Numeric) -> Numeric {
        Numeric(self.0 - rhs.0)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Numeric {
    type Err = bigdecimal::ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Numeric(BigDecimal::from_str(s)?))
    }
}

impl sqlx::Type<sqlx::Sqlite> for Numeric {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Numeric {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let s = self.0.to_string();
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&s, args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Numeric {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        let parsed = BigDecimal::from_str(&s)
            .map_err(|e| format!("Invalid numeric column value {:?}: {}", s, e))?;
        Ok(Numeric(parsed))
    }
}
