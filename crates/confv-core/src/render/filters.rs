// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Template filters and functions.
//!
//! - `b64enc`: encode a string as standard base64
//! - `b64dec`: decode standard base64 into a UTF-8 string
//! - `required`: fail when the value is undefined or none
//! - `entries`: `[key, value]` pairs for `range`
//! - `printf`: Go-style formatting for `%s %v %d %f %q %t %%`

use base64::{engine::general_purpose::STANDARD, Engine};
use minijinja::value::{Rest, ValueKind};
use minijinja::{Error, ErrorKind, Value};

/// Usage: `{{ .sharedSecret.token | b64enc }}`
pub fn b64enc(value: &str) -> String {
	STANDARD.encode(value.as_bytes())
}

/// Usage: `{{ .values.blob | b64dec }}`
pub fn b64dec(value: &str) -> Result<String, Error> {
	let bytes = STANDARD.decode(value).map_err(|e| {
		Error::new(
			ErrorKind::InvalidOperation,
			format!("base64 decode error: {e}"),
		)
	})?;
	String::from_utf8(bytes).map_err(|e| {
		Error::new(
			ErrorKind::InvalidOperation,
			format!("base64 decode produced invalid UTF-8: {e}"),
		)
	})
}

/// Usage: `{{ .values.port | required }}` or `{{ required "port is needed" .values.port }}`
pub fn required(value: Value, message: Option<String>) -> Result<Value, Error> {
	if value.is_undefined() || value.is_none() {
		Err(Error::new(
			ErrorKind::UndefinedError,
			message.unwrap_or_else(|| "required value is missing".to_string()),
		))
	} else {
		Ok(value)
	}
}

/// Index/value pairs for sequences, key/value pairs for maps (in map order),
/// `[i, i]` for `0..n` on integers, nothing for none.
pub fn entries(value: Value) -> Result<Value, Error> {
	let pairs: Vec<Value> = match value.kind() {
		ValueKind::Map => {
			let mut pairs = Vec::new();
			for key in value.try_iter()? {
				let item = value.get_item(&key)?;
				pairs.push(Value::from(vec![key, item]));
			}
			pairs
		}
		ValueKind::Seq | ValueKind::Iterable => value
			.try_iter()?
			.enumerate()
			.map(|(i, item)| Value::from(vec![Value::from(i), item]))
			.collect(),
		ValueKind::Number => {
			let n = i64::try_from(value)?;
			(0..n.max(0))
				.map(|i| Value::from(vec![Value::from(i), Value::from(i)]))
				.collect()
		}
		ValueKind::None => Vec::new(),
		_ => {
			return Err(Error::new(
				ErrorKind::InvalidOperation,
				format!("range can't iterate over {value}"),
			));
		}
	};
	Ok(Value::from(pairs))
}

/// Usage: `{{ printf "%s:%d" .values.host .values.port }}`
pub fn printf(format: &str, Rest(args): Rest<Value>) -> Result<String, Error> {
	let bad = |message: String| Error::new(ErrorKind::InvalidOperation, message);
	let mut out = String::with_capacity(format.len());
	let mut args = args.into_iter();
	let mut chars = format.chars().peekable();

	while let Some(c) = chars.next() {
		if c != '%' {
			out.push(c);
			continue;
		}
		let mut precision = None;
		if chars.peek() == Some(&'.') {
			chars.next();
			let mut digits = String::new();
			while let Some(&d) = chars.peek() {
				if !d.is_ascii_digit() {
					break;
				}
				digits.push(d);
				chars.next();
			}
			precision = Some(digits.parse::<usize>().unwrap_or(0));
		}
		let verb = chars
			.next()
			.ok_or_else(|| bad("printf: format ends with %".to_string()))?;
		if verb == '%' {
			out.push('%');
			continue;
		}
		let arg = args
			.next()
			.ok_or_else(|| bad(format!("printf: missing argument for %{verb}")))?;
		match verb {
			's' | 'v' => out.push_str(&arg.to_string()),
			'd' => out.push_str(&i64::try_from(arg)?.to_string()),
			'f' => {
				let f = f64::try_from(arg)?;
				out.push_str(&format!("{:.*}", precision.unwrap_or(6), f));
			}
			'q' => out.push_str(&format!("{:?}", arg.to_string())),
			't' => out.push_str(&arg.is_true().to_string()),
			other => return Err(bad(format!("printf: unsupported verb %{other}"))),
		}
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn encodes_standard_base64() {
		assert_eq!(b64enc("hello"), "aGVsbG8=");
		assert_eq!(b64enc(""), "");
	}

	#[test]
	fn decodes_standard_base64() {
		assert_eq!(b64dec("aGVsbG8gd29ybGQ=").unwrap(), "hello world");
		assert_eq!(b64dec("").unwrap(), "");
	}

	#[test]
	fn rejects_invalid_base64() {
		let err = b64dec("not base64!").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidOperation);
	}

	#[test]
	fn rejects_non_utf8_payload() {
		let err = b64dec("/w==").unwrap_err();
		assert!(err.to_string().contains("UTF-8"));
	}

	#[test]
	fn required_passes_defined_values() {
		assert_eq!(required(Value::from(8080), None).unwrap(), Value::from(8080));
		assert_eq!(required(Value::from(""), None).unwrap(), Value::from(""));
	}

	#[test]
	fn required_rejects_missing_values() {
		assert_eq!(
			required(Value::UNDEFINED, None).unwrap_err().kind(),
			ErrorKind::UndefinedError
		);
		assert!(required(Value::from(()), None).is_err());
	}

	#[test]
	fn required_reports_the_given_message() {
		let err = required(Value::from(()), Some("port is needed".into())).unwrap_err();
		assert!(err.to_string().contains("port is needed"));
	}

	#[test]
	fn entries_pairs_sequences_and_maps() {
		let pair = |list: &Value, i: usize| {
			let item = list.get_item(&Value::from(i)).unwrap();
			(
				item.get_item(&Value::from(0)).unwrap(),
				item.get_item(&Value::from(1)).unwrap(),
			)
		};

		let seq = entries(Value::from(vec!["a", "b"])).unwrap();
		assert_eq!(pair(&seq, 1), (Value::from(1), Value::from("b")));

		let map = Value::from_serialize(std::collections::BTreeMap::from([("x", 1), ("y", 2)]));
		let map = entries(map).unwrap();
		assert_eq!(pair(&map, 0), (Value::from("x"), Value::from(1)));
		assert_eq!(pair(&map, 1), (Value::from("y"), Value::from(2)));

		assert_eq!(entries(Value::from(())).unwrap().len(), Some(0));
		assert_eq!(entries(Value::from(2)).unwrap().len(), Some(2));
		assert!(entries(Value::from(true)).is_err());
	}

	#[test]
	fn printf_formats_go_verbs() {
		let out = printf(
			"%s:%d %.2f %q %t 100%%",
			Rest(vec![
				Value::from("db"),
				Value::from(5432),
				Value::from(1.5),
				Value::from("x"),
				Value::from(true),
			]),
		)
		.unwrap();
		assert_eq!(out, "db:5432 1.50 \"x\" true 100%");
	}

	#[test]
	fn printf_rejects_missing_arguments_and_unknown_verbs() {
		assert!(printf("%s %s", Rest(vec![Value::from("a")])).is_err());
		assert!(printf("%x", Rest(vec![Value::from(1)])).is_err());
		assert!(printf("50%", Rest(vec![])).is_err());
	}
}
