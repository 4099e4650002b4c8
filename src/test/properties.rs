use serde_json::{json, Value};

use crate::feature::JsonObject;

pub(crate) fn properties() -> JsonObject {
    let value = json!({
        "name": "Dinagat Islands",
        "visible": true,
        "population": 127152,
        "area": 1036.34,
        "tags": ["island", "province"],
    });
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => unreachable!(),
    }
}
