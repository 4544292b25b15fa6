use crate::model::{Game, GameFilters, SearchPage};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Normalized, one-based page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    /// Absent or zero values fall back to the defaults.
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.filter(|&p| p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Clamp `limit` to `max` when a cap is configured.
    pub fn capped(self, max: Option<usize>) -> Self {
        match max {
            Some(max) if self.limit > max => Self { limit: max, ..self },
            _ => self,
        }
    }

    /// Zero-based index of the first record on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Search and category filters, resolved once per query.
struct Criteria<'a> {
    term: Option<String>,
    category: Option<&'a str>,
}

impl Criteria<'_> {
    fn admits(&self, game: &Game) -> bool {
        self.term.as_deref().is_none_or(|t| game.matches_search(t))
            && self.category.is_none_or(|c| game.category == c)
    }
}

impl GameFilters {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }

    /// Empty strings count as no filter.
    fn criteria(&self) -> Criteria<'_> {
        Criteria {
            term: self
                .search
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            category: self.category.as_deref().filter(|c| !c.is_empty()),
        }
    }

    /// Whether `game` passes both the search and category filters.
    pub fn matches(&self, game: &Game) -> bool {
        self.criteria().admits(game)
    }
}

/// Filter `games` and cut out one page. `total` counts every match,
/// independent of the requested page.
pub fn search(games: Vec<Game>, filters: &GameFilters, pagination: Pagination) -> SearchPage {
    let criteria = filters.criteria();
    let matched: Vec<Game> = games.into_iter().filter(|g| criteria.admits(g)).collect();
    let total = matched.len();

    let games = matched
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit)
        .collect();

    SearchPage { games, total }
}
