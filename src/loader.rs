//! Loads a `ShareSet` from its JSON document:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3, "p": "2305843009213693951" },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" }
//! }
//! ```
//!
//! `keys.p` is optional (absent or `null` means exact-rational mode). Every other top-level key is
//! a share whose key is its decimal $x$. Object order is preserved, so `SelectionOrder::Declaration`
//! sees the shares as written.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ReconError, Result};
use crate::share::{RawShare, ShareSet};

/// The reserved top-level key holding the parameters.
pub const KEYS_FIELD: &str = "keys";

/// Integers in the document may be written either as JSON numbers or as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(u64),
    Text(String),
}

impl IntOrText {
    fn to_usize(&self) -> Option<usize> {
        match self {
            IntOrText::Int(n) => usize::try_from(*n).ok(),
            IntOrText::Text(s) => s.parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct Keys {
    n: IntOrText,
    k: IntOrText,
    #[serde(default)]
    p: Option<Value>,
}

/// Parses a share document held in memory.
pub fn from_str(s: &str) -> Result<ShareSet> {
    let doc: Value = serde_json::from_str(s)?;
    from_value(doc)
}

/// Parses a share document from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<ShareSet> {
    let doc: Value = serde_json::from_reader(reader)?;
    from_value(doc)
}

/// Reads and parses the share document at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ShareSet> {
    let path = path.as_ref();
    debug!("loading shares from {}", path.display());

    from_reader(BufReader::new(File::open(path)?))
}

fn from_value(doc: Value) -> Result<ShareSet> {
    let root = match doc {
        Value::Object(map) => map,
        _ => return Err(ReconError::MalformedDocument("top level is not an object".to_string())),
    };

    let keys = root
        .get(KEYS_FIELD)
        .cloned()
        .ok_or_else(|| ReconError::MalformedDocument(format!("missing \"{KEYS_FIELD}\"")))?;
    let keys: Keys = serde_json::from_value(keys)
        .map_err(|e| ReconError::MalformedDocument(format!("bad \"{KEYS_FIELD}\": {e}")))?;

    let n = keys
        .n
        .to_usize()
        .ok_or_else(|| ReconError::MalformedDocument("keys.n is not a non-negative integer".to_string()))?;
    let k = keys
        .k
        .to_usize()
        .ok_or_else(|| ReconError::MalformedDocument("keys.k is not a non-negative integer".to_string()))?;
    let p = match keys.p {
        None | Some(Value::Null) => None,
        Some(p) => Some(parse_modulus(&p)?),
    };

    let shares = parse_shares(root)?;

    ShareSet::new(k, n, p, shares)
}

/// `keys.p` is either a JSON integer that fits in a `u64` or a decimal string of any size.
fn parse_modulus(p: &Value) -> Result<BigInt> {
    match p {
        Value::Number(n) => n.as_u64().map(BigInt::from).ok_or_else(|| {
            ReconError::MalformedDocument(format!(
                "keys.p = {n} is not a JSON integer in u64 range; write large moduli as decimal strings"
            ))
        }),
        Value::String(s) => BigInt::from_str(s)
            .map_err(|_| ReconError::MalformedDocument(format!("keys.p = {s:?} is not a decimal integer"))),
        _ => Err(ReconError::MalformedDocument("keys.p is neither a number nor a string".to_string())),
    }
}

fn parse_shares(root: Map<String, Value>) -> Result<Vec<RawShare>> {
    let mut shares = Vec::with_capacity(root.len().saturating_sub(1));

    for (key, entry) in root {
        if key == KEYS_FIELD {
            continue;
        }

        let x = BigInt::from_str(&key).map_err(|_| ReconError::InvalidShareKey { key: key.clone() })?;

        let malformed = |reason: &str| ReconError::MalformedShare {
            key: key.clone(),
            reason: reason.to_string(),
        };

        let obj = entry.as_object().ok_or_else(|| malformed("not an object"))?;

        let value = match obj.get("value") {
            None | Some(Value::Null) => return Err(malformed("missing \"value\"")),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(malformed("\"value\" is not a string")),
        };

        let base = match obj.get("base") {
            None | Some(Value::Null) => return Err(malformed("missing \"base\"")),
            Some(Value::Number(n)) => n.as_u64().and_then(|b| u32::try_from(b).ok()),
            Some(Value::String(s)) => s.parse::<u32>().ok(),
            Some(_) => None,
        }
        .ok_or_else(|| malformed("\"base\" is not a non-negative integer"))?;

        shares.push(RawShare::new(key.clone(), x, value, base));
    }

    Ok(shares)
}
