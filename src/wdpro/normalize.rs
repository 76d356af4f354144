//! Response tidying
//!
//! Facility-service payloads carry ids like `"80010176;entityType=Attraction"`
//! and coordinates as strings. These helpers rewrite them in place into plain
//! numbers and add ready-made map links.
//!
//! Presence checks follow JavaScript truthiness: `null`, `false`, `0` and `""`
//! all count as absent. A coordinate of exactly `0` is therefore left alone.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde::Serialize;
use serde_json::{Map, Number, Value};

const GOOGLE_MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/";
const DISNEY_MAP_URL: &str = "https://disneyworld.disney.go.com/maps/";
const DISNEY_MAP_MINI_URL: &str = "https://disneyworld.disney.go.com/maps/thumbnail";

/// Normalize a decoded response: the top-level object, then each element of
/// its `entries` array. Deeper objects are not visited.
pub fn normalize_response(value: &mut Value) {
    normalize(value);
    if let Some(entries) = value.get_mut("entries").and_then(Value::as_array_mut) {
        for entry in entries {
            normalize(entry);
        }
    }
}

/// Tidy a single object in place. Non-objects are returned untouched.
pub fn normalize(value: &mut Value) -> &mut Value {
    if let Some(obj) = value.as_object_mut() {
        tidy_id(obj);
        tidy_coordinates(obj);
        add_disney_maps(obj);
    }
    value
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Replace `id` with its leading run of digits, when `type` is also set.
fn tidy_id(obj: &mut Map<String, Value>) {
    if !is_truthy(obj.get("id")) || !is_truthy(obj.get("type")) {
        return;
    }
    if let Some(id) = obj.get("id").and_then(leading_digits) {
        obj.insert("id".to_string(), id);
    }
}

/// Digit prefix as a JSON number; a prefix past `u64` becomes an `f64`.
fn leading_digits(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            let digits = &s[..end];
            if digits.is_empty() {
                return None;
            }
            match digits.parse::<u64>() {
                Ok(id) => Some(Value::from(id)),
                Err(_) => digits
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number),
            }
        }
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && *f < 1e21)
                    .map(|f| f.trunc() as u64)
            })
            .map(Value::from),
        _ => None,
    }
}

fn tidy_coordinates(obj: &mut Map<String, Value>) {
    match obj.get_mut("coordinates") {
        Some(Value::Object(places)) => places.values_mut().for_each(tidy_place),
        Some(Value::Array(places)) => places.iter_mut().for_each(tidy_place),
        _ => {}
    }
}

fn tidy_place(place: &mut Value) {
    let Some(place) = place.as_object_mut() else {
        return;
    };

    if let Some(xy) = place.get_mut("xyMaps").and_then(Value::as_object_mut) {
        if is_truthy(xy.get("x")) && is_truthy(xy.get("y")) {
            let x = xy.get("x").and_then(parse_int);
            let y = xy.get("y").and_then(parse_int);
            if let (Some(x), Some(y)) = (x, y) {
                xy.insert("x".to_string(), Value::from(x));
                xy.insert("y".to_string(), Value::from(y));
            }
        }
    }

    let mut gmap = None;
    if let Some(gps) = place.get_mut("gps").and_then(Value::as_object_mut) {
        if is_truthy(gps.get("longitude")) && is_truthy(gps.get("latitude")) {
            let longitude = gps.get("longitude").and_then(parse_float);
            let latitude = gps.get("latitude").and_then(parse_float);
            if let (Some(lon), Some(lat)) = (longitude, latitude) {
                if let (Some(lon_n), Some(lat_n)) = (Number::from_f64(lon), Number::from_f64(lat)) {
                    gps.insert("longitude".to_string(), Value::Number(lon_n));
                    gps.insert("latitude".to_string(), Value::Number(lat_n));
                    gmap = Some(format!(
                        "{GOOGLE_MAPS_PLACE_URL}{lat},{lon}/@{lat},{lon},20z"
                    ));
                }
            }
        }
    }
    if let Some(gmap) = gmap {
        place.insert("gmap".to_string(), Value::String(gmap));
    }
}

/// Integer prefix of a value, the way `parseInt` reads it.
fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, digits) = match s.as_bytes().first() {
                Some(b'-') => (-1, &s[1..]),
                Some(b'+') => (1, &s[1..]),
                _ => (1, s),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}

/// Float prefix of a value, the way `parseFloat` reads it.
fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim_start();
            let end = float_prefix_len(s.as_bytes());
            s[..end].parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Length of the longest `[+-]?digits[.digits][e[+-]digits]` prefix.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut end = int_end;
    let mut has_digits = int_end > i;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    end
}

#[derive(Serialize)]
struct MapLink<'a> {
    options: MapOptions<'a>,
}

#[derive(Serialize)]
struct MapOptions<'a> {
    pins: [MapPin<'a>; 1],
}

#[derive(Serialize)]
struct MapPin<'a> {
    #[serde(rename = "type")]
    kind: &'a Value,
    id: &'a Value,
}

/// Add `disneyMap` / `disneyMapMini` links pinning this object.
fn add_disney_maps(obj: &mut Map<String, Value>) {
    let hash = {
        let (Some(kind), Some(id)) = (obj.get("type"), obj.get("id")) else {
            return;
        };
        if !is_truthy(Some(kind)) || !is_truthy(Some(id)) {
            return;
        }
        let link = MapLink {
            options: MapOptions {
                pins: [MapPin { kind, id }],
            },
        };
        match serde_json::to_string(&link) {
            Ok(json) => BASE64_STANDARD.encode(json),
            Err(_) => return,
        }
    };

    obj.insert(
        "disneyMap".to_string(),
        Value::String(format!("{DISNEY_MAP_URL}#{hash}")),
    );
    obj.insert(
        "disneyMapMini".to_string(),
        Value::String(format!("{DISNEY_MAP_MINI_URL}#{hash}")),
    );
}
