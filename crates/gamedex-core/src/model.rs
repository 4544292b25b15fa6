use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Languages a game name can be localized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    En,
    Ko,
    Ja,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ko, Language::Ja];

    /// Parse a wire language code. Codes are case-sensitive (`"en"` is rejected).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EN" => Some(Self::En),
            "KO" => Some(Self::Ko),
            "JA" => Some(Self::Ja),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ko => "KO",
            Self::Ja => "JA",
        }
    }
}

/// One localized name of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameName {
    pub language: Language,
    pub value: String,
}

impl GameName {
    pub fn new(language: Language, value: impl Into<String>) -> Self {
        Self {
            language,
            value: value.into(),
        }
    }
}

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub category: String,
    pub name: Vec<GameName>,
}

impl Game {
    /// Case-insensitive substring match against the id and every localized name.
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self
                .name
                .iter()
                .any(|n| n.value.to_lowercase().contains(needle))
    }

    /// First name in the given language, if any.
    pub fn name_in(&self, language: Language) -> Option<&str> {
        self.name
            .iter()
            .find(|n| n.language == language)
            .map(|n| n.value.as_str())
    }
}

/// A `{label, value}` pair as served by `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub label: String,
    pub value: String,
}

impl CategoryOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Body of `POST /games`. Fields stay as raw JSON so that wrong types
/// surface as validation errors rather than deserialization errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameCreateRequest {
    pub id: Option<Value>,
    pub category: Option<Value>,
    pub name: Option<Value>,
}

/// Body of `PUT /games/{id}`. Fields other than these (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameUpdateRequest {
    pub category: Option<Value>,
    pub name: Option<Value>,
}

/// A validated partial update. Present fields overwrite, absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    pub category: Option<String>,
    pub name: Option<Vec<GameName>>,
}

impl GamePatch {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.name.is_none()
    }

    /// Shallow-merge this patch onto `game`.
    pub fn apply(self, game: &mut Game) {
        if let Some(category) = self.category {
            game.category = category;
        }
        if let Some(name) = self.name {
            game.name = name;
        }
    }
}

/// Search and pagination parameters for listing games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<usize>,
}

/// Query-string counts: empty or non-numeric values read as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// One page of search results plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub games: Vec<Game>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha() -> Game {
        Game {
            id: "ALPHA".to_string(),
            category: "RPG".to_string(),
            name: vec![
                GameName::new(Language::En, "Alpha Quest"),
                GameName::new(Language::Ko, "알파 퀘스트"),
            ],
        }
    }

    #[test]
    fn game_json_shape() {
        let json = serde_json::to_value(alpha()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "ALPHA",
                "category": "RPG",
                "name": [
                    { "language": "EN", "value": "Alpha Quest" },
                    { "language": "KO", "value": "알파 퀘스트" },
                ],
            })
        );
    }

    #[test]
    fn language_codes() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang.code()));
        }
        assert_eq!(Language::from_code("en"), None);
        assert_eq!(Language::from_code("FR"), None);
    }

    #[test]
    fn unknown_language_in_stored_game_fails_to_parse() {
        let raw = r#"{"id":"X","category":"RPG","name":[{"language":"FR","value":"x"}]}"#;
        assert!(serde_json::from_str::<Game>(raw).is_err());
    }

    #[test]
    fn matches_search_on_id_and_names() {
        let game = alpha();
        assert!(game.matches_search("alp"));
        assert!(game.matches_search("quest"));
        assert!(game.matches_search("퀘스트"));
        assert!(!game.matches_search("beta"));
    }

    #[test]
    fn name_in_returns_first_match() {
        let mut game = alpha();
        game.name.push(GameName::new(Language::En, "Alpha Quest II"));
        assert_eq!(game.name_in(Language::En), Some("Alpha Quest"));
        assert_eq!(game.name_in(Language::Ja), None);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut game = alpha();
        let original_names = game.name.clone();
        GamePatch {
            category: Some("ACTION".to_string()),
            name: None,
        }
        .apply(&mut game);
        assert_eq!(game.category, "ACTION");
        assert_eq!(game.name, original_names);
        assert_eq!(game.id, "ALPHA");
    }

    #[test]
    fn update_request_ignores_id() {
        let raw = r#"{"id":"OTHER","category":"ACTION"}"#;
        let req: GameUpdateRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.category, Some(Value::from("ACTION")));
        assert!(req.name.is_none());
    }

    #[test]
    fn create_request_accepts_any_field_types() {
        let req: GameCreateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, GameCreateRequest::default());

        let req: GameCreateRequest =
            serde_json::from_str(r#"{"id":7,"category":"RPG","name":"Bravo"}"#).unwrap();
        assert_eq!(req.id, Some(Value::from(7)));
        assert_eq!(req.name, Some(Value::from("Bravo")));
    }

    #[test]
    fn filters_treat_blank_and_garbage_counts_as_absent() {
        let raw = r#"{"search":"","page":"","limit":"abc"}"#;
        let filters: GameFilters = serde_json::from_str(raw).unwrap();
        assert_eq!(filters.page, None);
        assert_eq!(filters.limit, None);
        assert_eq!(filters.search.as_deref(), Some(""));

        let filters: GameFilters = serde_json::from_str(r#"{"page":" 3 ","limit":"25"}"#).unwrap();
        assert_eq!(filters.page, Some(3));
        assert_eq!(filters.limit, Some(25));

        let filters: GameFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(filters, GameFilters::default());
    }
}
