use crate::model::CategoryOption;

/// Every category value observed across catalog revisions, with display labels.
const DEFAULT_CATEGORIES: [(&str, &str); 13] = [
    ("Action", "ACTION"),
    ("Adventure", "ADVENTURE"),
    ("Fighting", "FIGHTING"),
    ("FPS", "FPS"),
    ("Puzzle", "PUZZLE"),
    ("Racing", "RACING"),
    ("Rhythm", "RHYTHM"),
    ("Roguelite", "ROGUELITE"),
    ("RPG", "RPG"),
    ("Shooter", "SHOOTER"),
    ("Simulation", "SIMULATION"),
    ("Sports", "SPORTS"),
    ("Strategy", "STRATEGY"),
];

/// The set of categories a game may be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    options: Vec<CategoryOption>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(default_category_options())
    }
}

impl CategorySet {
    pub fn new(options: Vec<CategoryOption>) -> Self {
        Self { options }
    }

    /// Exact, case-sensitive membership test on the category value.
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn options(&self) -> &[CategoryOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// First value that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        self.options.iter().enumerate().find_map(|(i, o)| {
            self.options[..i]
                .iter()
                .any(|prev| prev.value == o.value)
                .then_some(o.value.as_str())
        })
    }
}

pub fn default_category_options() -> Vec<CategoryOption> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(label, value)| CategoryOption::new(*label, *value))
        .collect()
}
