use crate::error::{Result, SheetError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strip a surrounding Markdown code fence (```json ... ```), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (`json`, `JSON`, ...) up to the first newline
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a list of records out of model output.
///
/// Tries the text as-is first. Failing that, strips a code fence and cuts the
/// outermost `[...]`. A JSON object wrapping a single array (`{"items": [..]}`)
/// is unwrapped. Anything else is an API error carrying the raw text.
pub fn parse_records<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let value = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) => value,
        Err(_) => recover(raw)?,
    };
    let items = match value {
        Value::Array(_) => value,
        Value::Object(map) => match map.into_iter().find(|(_, v)| v.is_array()) {
            Some((_, array)) => array,
            None => return Err(SheetError::api("response holds no record list", raw)),
        },
        _ => return Err(SheetError::api("response holds no record list", raw)),
    };
    serde_json::from_value(items)
        .map_err(|e| SheetError::api(format!("malformed records: {}", e), raw))
}

fn recover(raw: &str) -> Result<Value> {
    let unfenced = strip_code_fence(raw);
    if let Ok(value) = serde_json::from_str(unfenced) {
        return Ok(value);
    }
    let sliced = match (unfenced.find('['), unfenced.rfind(']')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => unfenced,
    };
    serde_json::from_str(sliced)
        .map_err(|e| SheetError::api(format!("malformed JSON: {}", e), raw))
}

/// Accept a string, a number or a bool, rendering the latter two as text.
/// `null` becomes the empty string.
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?))
}

pub fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let text = value_text(Value::deserialize(deserializer)?);
    Ok(if text.is_empty() { None } else { Some(text) })
}

/// Accept an array of scalars or a single comma/newline separated string.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    let list = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(value_text).collect(),
        Value::String(text) => text
            .split([',', '\n'])
            .map(|s| s.trim().to_string())
            .collect(),
        other => vec![value_text(other)],
    };
    Ok(list.into_iter().filter(|s| !s.is_empty()).collect())
}

fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{ExtractedProduct, RenamedTitle};

    #[test]
    fn strips_fences_with_and_without_language() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fence("[1]"), "[1]");
    }

    #[test]
    fn parses_plain_array() {
        let raw = r#"[{"original":"a","new_name":"b"}]"#;
        let titles: Vec<RenamedTitle> = parse_records(raw).unwrap();
        assert_eq!(titles[0].new_name, "b");
    }

    #[test]
    fn recovers_from_fenced_output_with_chatter() {
        let raw = "以下是结果：\n```json\n[{\"productName\":\"杯子\",\"price\":39.5,\"stock\":10}]\n```";
        let products: Vec<ExtractedProduct> = parse_records(raw).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "杯子");
        assert_eq!(products[0].price, "39.5");
        assert_eq!(products[0].stock, "10");
        assert_eq!(products[0].product_code, None);
    }

    #[test]
    fn unwraps_object_holding_a_list() {
        let raw = r#"{"products":[{"productName":"A","images":"http://a, http://b"}]}"#;
        let products: Vec<ExtractedProduct> = parse_records(raw).unwrap();
        assert_eq!(products[0].images, vec!["http://a", "http://b"]);
    }

    #[test]
    fn garbage_is_api_error_with_raw() {
        let err = parse_records::<RenamedTitle>("sorry, I can't").unwrap_err();
        assert_eq!(err.raw_response(), Some("sorry, I can't"));
    }

    #[test]
    fn null_fields_become_empty() {
        let raw = r#"[{"productName":"A","skuCode":null,"productCode":null,"images":null}]"#;
        let products: Vec<ExtractedProduct> = parse_records(raw).unwrap();
        assert_eq!(products[0].sku_code, "");
        assert_eq!(products[0].product_code, None);
        assert!(products[0].images.is_empty());
    }
}
