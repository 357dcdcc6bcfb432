use serde::{Deserialize, Deserializer, Serialize};

/// A book as exchanged with the recommendation backend
///
/// Field names follow the backend's Book-Crossing style JSON contract and must
/// not be changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    /// Catalog key, compared by exact string match and never checksum-validated
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "Book-Title")]
    pub title: String,
    #[serde(rename = "Book-Author", default, deserialize_with = "deserialize_text")]
    pub author: String,
    /// Publication year; `0` when unknown
    #[serde(
        rename = "Year-Of-Publication",
        default,
        deserialize_with = "deserialize_year"
    )]
    pub year: i32,
    #[serde(rename = "Publisher", default, deserialize_with = "deserialize_text")]
    pub publisher: String,
    /// Cover image location, may be empty
    #[serde(rename = "Image-URL-M", default, deserialize_with = "deserialize_text")]
    pub image_url: String,
}

impl BookRecord {
    /// Creates a fully populated record
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        publisher: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            year,
            publisher: publisher.into(),
            image_url: image_url.into(),
        }
    }
}

/// Display fields come back as `null` for sparse catalog rows
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The backend dataset stores years as text in some exports and as floats in
/// dataframe-backed ones
#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Number(i32),
    Float(f64),
    Text(String),
}

fn integral_year(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(YearRepr::Number(year)) => Ok(year),
        Some(YearRepr::Float(year)) => integral_year(year).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid Year-Of-Publication: {year}"))
        }),
        Some(YearRepr::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0);
            }
            text.parse::<i32>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral_year))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid Year-Of-Publication: {text:?}"))
                })
        }
    }
}
