//! Response envelope
//!
//! Every API reply is `{code, data, message}`; `code == 1` is success.

use crate::NetError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Success code
pub const CODE_SUCCESS: i64 = 1;

/// API response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Status code; servers send it as a number or a numeric string
    #[serde(deserialize_with = "lenient_code")]
    pub code: i64,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            code: CODE_SUCCESS,
            data,
            message: String::new(),
        }
    }

    pub fn failure(code: i64, message: &str) -> Self {
        Self {
            code,
            data: Value::Null,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    /// `data` on success, the server message otherwise
    pub fn into_result(self) -> Result<Value, NetError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(NetError::Api {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// Non-numeric codes decode as 0 (a failure), the way `code * 1` yields NaN
fn lenient_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        Value::Bool(b) => i64::from(b),
        _ => 0,
    };
    Ok(code)
}
