use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an article came from. Feeds hand us either a bare name or `{ "name": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleSource {
    Name(String),
    Detailed { name: String },
}

impl ArticleSource {
    pub fn name(&self) -> &str {
        match self {
            ArticleSource::Name(name) => name,
            ArticleSource::Detailed { name } => name,
        }
    }
}

/// News article as handed over by the ingestion layer.
///
/// Deserialisation never fails: fields with an unexpected shape are dropped
/// and the engine falls back to its conservative defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Article {
    pub title: String,
    #[serde(rename = "fullContent", skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ArticleSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.full_content = Some(body.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(ArticleSource::Name(source.into()));
        self
    }

    pub fn with_published_at(mut self, timestamp: impl Into<String>) -> Self {
        self.iso_date = Some(timestamp.into());
        self
    }

    /// Full content when present, else the summary, else nothing
    pub fn body_text(&self) -> &str {
        non_empty(self.full_content.as_deref())
            .or_else(|| non_empty(self.summary.as_deref()))
            .unwrap_or("")
    }

    pub fn source_name(&self) -> &str {
        self.source.as_ref().map(ArticleSource::name).unwrap_or("")
    }

    /// Raw publication timestamp, preferring `iso_date` over `date`
    pub fn published_at(&self) -> Option<&str> {
        non_empty(self.iso_date.as_deref()).or_else(|| non_empty(self.date.as_deref()))
    }

    /// Title and body joined by a space, lower-cased
    pub fn normalized_text(&self) -> String {
        format!("{} {}", self.title, self.body_text()).to_lowercase()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn source_field(value: Option<&Value>) -> Option<ArticleSource> {
    let source = match value? {
        Value::String(s) => ArticleSource::Name(s.clone()),
        Value::Object(obj) => match obj.get("name") {
            Some(Value::String(s)) => ArticleSource::Detailed { name: s.clone() },
            _ => return None,
        },
        Value::Number(n) => ArticleSource::Name(n.to_string()),
        Value::Bool(b) => ArticleSource::Name(b.to_string()),
        _ => return None,
    };
    if source.name().is_empty() {
        None
    } else {
        Some(source)
    }
}

impl From<Value> for Article {
    fn from(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            _ => return Article::default(),
        };

        let full_content = ["fullContent", "full_content", "body"]
            .iter()
            .find_map(|key| string_field(&map, key));

        Article {
            title: string_field(&map, "title").unwrap_or_default(),
            full_content,
            summary: string_field(&map, "summary"),
            source: source_field(map.get("source")),
            iso_date: string_field(&map, "iso_date"),
            date: string_field(&map, "date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_falls_back_to_summary() {
        let article = Article::new("Title").with_summary("short summary");
        assert_eq!(article.body_text(), "short summary");

        let article = article.with_body("full body");
        assert_eq!(article.body_text(), "full body");

        assert_eq!(Article::new("Title").body_text(), "");
    }

    #[test]
    fn test_empty_full_content_uses_summary() {
        let article: Article = serde_json::from_value(json!({
            "title": "x",
            "fullContent": "",
            "summary": "from summary"
        }))
        .unwrap();
        assert_eq!(article.body_text(), "from summary");
    }

    #[test]
    fn test_source_shapes() {
        let named: Article = serde_json::from_value(json!({"source": {"name": "Reuters"}})).unwrap();
        assert_eq!(named.source_name(), "Reuters");
        assert_eq!(
            named.source,
            Some(ArticleSource::Detailed { name: "Reuters".to_string() })
        );

        let plain: Article = serde_json::from_value(json!({"source": "Bloomberg"})).unwrap();
        assert_eq!(plain.source_name(), "Bloomberg");
        assert_eq!(plain.source, Some(ArticleSource::Name("Bloomberg".to_string())));

        let nameless: Article = serde_json::from_value(json!({"source": {"url": "x"}})).unwrap();
        assert_eq!(nameless.source_name(), "");

        let missing: Article = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.source_name(), "");
    }

    #[test]
    fn test_serialization_keeps_source_shape() {
        let detailed: Article = serde_json::from_value(json!({
            "title": "Fab fire",
            "source": {"name": "Reuters"}
        }))
        .unwrap();
        let value = serde_json::to_value(&detailed).unwrap();
        assert_eq!(value["source"], json!({"name": "Reuters"}));
        assert_eq!(serde_json::from_value::<Article>(value).unwrap(), detailed);

        let plain = Article::new("Fab fire").with_source("Reuters");
        let value = serde_json::to_value(&plain).unwrap();
        assert_eq!(value["source"], json!("Reuters"));
        assert_eq!(serde_json::from_value::<Article>(value).unwrap(), plain);
    }

    #[test]
    fn test_odd_types_are_dropped() {
        let article: Article = serde_json::from_value(json!({
            "title": 42,
            "fullContent": ["not", "text"],
            "source": null,
            "iso_date": 1700000000
        }))
        .unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.body_text(), "");
        assert_eq!(article.source_name(), "");
        assert_eq!(article.published_at(), None);

        let not_an_object: Article = serde_json::from_value(json!("just a string")).unwrap();
        assert_eq!(not_an_object, Article::default());
    }

    #[test]
    fn test_timestamp_key_preference() {
        let article: Article = serde_json::from_value(json!({
            "date": "2024-01-02T00:00:00Z",
            "iso_date": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(article.published_at(), Some("2024-01-01T00:00:00Z"));

        let only_date: Article = serde_json::from_value(json!({"date": "2024-01-02T00:00:00Z"})).unwrap();
        assert_eq!(only_date.published_at(), Some("2024-01-02T00:00:00Z"));
    }

    #[test]
    fn test_normalized_text() {
        let article = Article::new("Taiwan FAB Fire").with_body("MLCC Lead Time");
        assert_eq!(article.normalized_text(), "taiwan fab fire mlcc lead time");
        assert_eq!(Article::default().normalized_text(), " ");
    }
}
