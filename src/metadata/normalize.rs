use serde_json::{Map, Value};

use super::types::{NormalizedMovie, Year};

type Item = Map<String, Value>;

/// One place a provider may keep a field.
#[derive(Debug, Clone, Copy)]
enum Alias {
    Field(&'static str),
    Nested(&'static str, &'static str),
    FirstElement(&'static str, &'static str),
}

// Alias tables, in precedence order.
const POSTER: &[Alias] = &[
    Alias::Nested("image", "url"),
    Alias::Field("poster"),
    Alias::Field("poster_url"),
    Alias::Field("primaryImage"),
    Alias::FirstElement("thumbnails", "url"),
];
const ID: &[Alias] = &[
    Alias::Field("id"),
    Alias::Field("imdb_id"),
    Alias::Field("imdbID"),
    Alias::Field("const"),
];
const TITLE: &[Alias] = &[
    Alias::Field("title"),
    Alias::Field("l"),
    Alias::Field("primaryTitle"),
    Alias::Field("name"),
];
const YEAR: &[Alias] = &[
    Alias::Field("year"),
    Alias::Field("y"),
    Alias::Field("startYear"),
];

const UNKNOWN_TITLE: &str = "Unknown";

impl Alias {
    fn lookup<'a>(&self, item: &'a Item) -> Option<&'a Value> {
        let value = match *self {
            Alias::Field(key) => item.get(key),
            Alias::Nested(outer, inner) => item.get(outer)?.get(inner),
            Alias::FirstElement(list, inner) => item.get(list)?.as_array()?.first()?.get(inner),
        };
        value.filter(|v| is_present(v))
    }
}

/// Providers use `null`, `""`, `0` and `false` interchangeably for "no value".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_of<'a, T>(
    item: &'a Item,
    aliases: &[Alias],
    convert: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    aliases
        .iter()
        .filter_map(|alias| alias.lookup(item))
        .find_map(convert)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_year(value: &Value) -> Option<Year> {
    match value {
        Value::String(s) => Some(Year::Text(s.clone())),
        Value::Number(n) => Some(Year::Number(n.clone())),
        _ => None,
    }
}

fn as_url(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

pub fn poster_url(item: &Item) -> Option<String> {
    first_of(item, POSTER, as_url)
}

pub fn normalize_item(item: &Item) -> NormalizedMovie {
    NormalizedMovie {
        id: first_of(item, ID, as_text),
        title: first_of(item, TITLE, as_text).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        year: first_of(item, YEAR, as_year),
        poster_url: poster_url(item),
    }
}

/// Result list of a provider response: `{"results": [...]}` or a bare array.
/// Anything else is an empty result set.
pub fn result_items(data: &Value) -> &[Value] {
    data.get("results")
        .and_then(Value::as_array)
        .or_else(|| data.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Keeps items that have a poster, truncates to `take`, then normalizes.
pub fn normalize_results(data: &Value, take: usize) -> Vec<NormalizedMovie> {
    result_items(data)
        .iter()
        .filter_map(Value::as_object)
        .filter(|item| poster_url(item).is_some())
        .take(take)
        .map(normalize_item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_poster_precedence() {
        let it = item(json!({ "image": { "url": "A" }, "poster": "B" }));
        assert_eq!(poster_url(&it).as_deref(), Some("A"));

        let it = item(json!({ "poster_url": "C", "primaryImage": "D" }));
        assert_eq!(poster_url(&it).as_deref(), Some("C"));

        let it = item(json!({ "thumbnails": [{ "url": "T1" }, { "url": "T2" }] }));
        assert_eq!(poster_url(&it).as_deref(), Some("T1"));
    }

    #[test]
    fn test_poster_absent() {
        assert_eq!(poster_url(&item(json!({ "title": "X" }))), None);
        assert_eq!(poster_url(&item(json!({ "thumbnails": [] }))), None);
        assert_eq!(poster_url(&item(json!({ "image": {} }))), None);
        assert_eq!(poster_url(&item(json!({ "poster": "" }))), None);
        assert_eq!(
            poster_url(&item(json!({ "thumbnails": [{}, { "url": "second" }] }))),
            None
        );
    }

    #[test]
    fn test_empty_image_url_falls_through() {
        let it = item(json!({ "image": { "url": "" }, "primaryImage": "P" }));
        assert_eq!(poster_url(&it).as_deref(), Some("P"));
    }

    #[test]
    fn test_title_aliases() {
        let it = item(json!({ "l": "Short", "name": "Named", "poster": "p" }));
        assert_eq!(normalize_item(&it).title, "Short");

        let it = item(json!({ "primaryTitle": "Primary", "poster": "p" }));
        assert_eq!(normalize_item(&it).title, "Primary");

        let it = item(json!({ "poster": "p" }));
        assert_eq!(normalize_item(&it).title, "Unknown");

        let it = item(json!({ "title": "", "poster": "p" }));
        assert_eq!(normalize_item(&it).title, "Unknown");
    }

    #[test]
    fn test_id_and_year() {
        let it = item(json!({ "imdbID": "tt0133093", "const": "c", "y": 1999, "poster": "p" }));
        let movie = normalize_item(&it);
        assert_eq!(movie.id.as_deref(), Some("tt0133093"));
        assert_eq!(movie.year, Some(Year::Number(1999.into())));

        let it = item(json!({ "const": "tt1", "startYear": "2010", "poster": "p" }));
        let movie = normalize_item(&it);
        assert_eq!(movie.id.as_deref(), Some("tt1"));
        assert_eq!(movie.year, Some(Year::Text("2010".to_string())));

        let it = item(json!({ "year": 0, "poster": "p" }));
        let movie = normalize_item(&it);
        assert_eq!(movie.id, None);
        assert_eq!(movie.year, None);
    }

    #[test]
    fn test_result_shapes() {
        let wrapped = json!({ "results": [{ "poster": "a" }] });
        let bare = json!([{ "poster": "a" }, { "poster": "b" }]);
        assert_eq!(result_items(&wrapped).len(), 1);
        assert_eq!(result_items(&bare).len(), 2);
        assert!(result_items(&json!({ "results": "nope" })).is_empty());
        assert!(result_items(&json!({ "message": "hi" })).is_empty());
        assert!(result_items(&json!("text")).is_empty());
    }

    #[test]
    fn test_filter_then_truncate() {
        for data in [
            json!({ "results": [
                { "title": "no poster" },
                { "title": "one", "poster": "1" },
                "not an object",
                { "title": "two", "thumbnails": [{ "url": "2" }] },
                { "title": "three", "image": { "url": "3" } }
            ] }),
            json!([
                { "title": "no poster" },
                { "title": "one", "poster": "1" },
                "not an object",
                { "title": "two", "thumbnails": [{ "url": "2" }] },
                { "title": "three", "image": { "url": "3" } }
            ]),
        ] {
            let movies = normalize_results(&data, 2);
            let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
            assert_eq!(titles, ["one", "two"]);
            assert!(movies.iter().all(|m| m.poster_url.is_some()));

            assert_eq!(normalize_results(&data, 8).len(), 3);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let it = item(json!({ "title": "Heat", "poster": "p" }));
        let value = serde_json::to_value(normalize_item(&it)).unwrap();
        assert_eq!(value, json!({ "title": "Heat", "poster_url": "p" }));
    }
}
