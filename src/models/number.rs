// Numeric fields as they appear in Ops Manager exports: plain JSON numbers, or
// Extended JSON wrappers when the file came out of mongoexport.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Plain(f64),
    Long {
        #[serde(rename = "$numberLong")]
        value: String,
    },
    Int {
        #[serde(rename = "$numberInt")]
        value: String,
    },
    Double {
        #[serde(rename = "$numberDouble")]
        value: String,
    },
    Decimal {
        #[serde(rename = "$numberDecimal")]
        value: String,
    },
}

impl RawNumber {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            RawNumber::Plain(v) => Ok(v),
            RawNumber::Long { value }
            | RawNumber::Int { value }
            | RawNumber::Double { value }
            | RawNumber::Decimal { value } => {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid Extended JSON number {:?}: {}", value, e))
            }
        }
    }
}

/// `deserialize_with` target for `Option<f64>` fields; use together with `#[serde(default)]`.
pub(crate) fn optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawNumber>::deserialize(deserializer)?
        .map(RawNumber::into_f64)
        .transpose()
        .map_err(serde::de::Error::custom)
}
