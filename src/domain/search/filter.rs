//! Search filter state and the partial updates the filter UI produces.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{TagId, ValidationError};

/// Result ordering offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Relevance,
    Rating,
    Popularity,
    Year,
    Title,
    Author,
}

impl SortBy {
    pub const ALL: [SortBy; 6] = [
        SortBy::Relevance,
        SortBy::Rating,
        SortBy::Popularity,
        SortBy::Year,
        SortBy::Title,
        SortBy::Author,
    ];

    /// Wire value used in URLs and API parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Rating => "rating",
            SortBy::Popularity => "popularity",
            SortBy::Year => "year",
            SortBy::Title => "title",
            SortBy::Author => "author",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Relevance => "Relevance",
            SortBy::Rating => "Highest Rated",
            SortBy::Popularity => "Most Popular",
            SortBy::Year => "Newest",
            SortBy::Title => "Title",
            SortBy::Author => "Author",
        }
    }
}

/// Minimum average rating threshold. Only the thresholds the filter UI
/// offers are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MinRating {
    #[default]
    Any,
    Three,
    Four,
    FourAndHalf,
}

impl MinRating {
    pub const ALL: [MinRating; 4] = [
        MinRating::Any,
        MinRating::Three,
        MinRating::Four,
        MinRating::FourAndHalf,
    ];

    pub fn value(&self) -> f64 {
        match self {
            MinRating::Any => 0.0,
            MinRating::Three => 3.0,
            MinRating::Four => 4.0,
            MinRating::FourAndHalf => 4.5,
        }
    }

    /// Maps a numeric threshold onto a supported one.
    pub fn from_value(value: f64) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|rating| (rating.value() - value).abs() < f64::EPSILON)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "min_rating",
                    format!("unsupported threshold {}", value),
                )
            })
    }

    /// Wire value: `3`, `4`, `4.5`. `Any` has none because it is omitted.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            MinRating::Any => None,
            MinRating::Three => Some("3"),
            MinRating::Four => Some("4"),
            MinRating::FourAndHalf => Some("4.5"),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, MinRating::Any)
    }
}

impl fmt::Display for MinRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_param() {
            Some(value) => write!(f, "{}+ Stars", value),
            None => write!(f, "Any"),
        }
    }
}

/// How results are laid out; `Tags` switches to the browse-by-tag view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Tags,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Grid, ViewMode::List, ViewMode::Tags];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
            ViewMode::Tags => "tags",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.as_str() == value)
    }
}

/// Everything the search page's URL says about what to show.
///
/// Text fields are `None` rather than empty and numeric filters are `None`
/// rather than zero, so two states that encode to the same URL compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub query: Option<String>,
    pub page: u32,
    pub sort_by: SortBy,
    pub min_rating: MinRating,
    pub tag_id: Option<TagId>,
    pub tag_name: Option<String>,
    pub author: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub view: ViewMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: None,
            page: 1,
            sort_by: SortBy::default(),
            min_rating: MinRating::default(),
            tag_id: None,
            tag_name: None,
            author: None,
            year_from: None,
            year_to: None,
            view: ViewMode::default(),
        }
    }
}

impl FilterState {
    /// A fresh search for `text` with every other field at its default.
    pub fn for_query(text: impl Into<String>) -> Self {
        Self {
            query: non_empty(text.into()),
            ..Self::default()
        }
    }

    /// Whether the search endpoint (rather than the plain listing) applies.
    pub fn search_text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// The state with only the free-text query kept.
    pub fn cleared(&self) -> Self {
        Self {
            query: self.query.clone(),
            ..Self::default()
        }
    }

    /// Merges `update` over this state.
    ///
    /// If any field other than `page` changes, the page goes back to 1 and
    /// a page carried by the same update is ignored.
    pub fn apply(&self, update: &FilterUpdate) -> Self {
        let mut next = self.clone();
        if let Some(query) = &update.query {
            next.query = query.clone().and_then(non_empty);
        }
        if let Some(sort_by) = update.sort_by {
            next.sort_by = sort_by;
        }
        if let Some(min_rating) = update.min_rating {
            next.min_rating = min_rating;
        }
        if let Some(tag_id) = update.tag_id {
            next.tag_id = tag_id;
        }
        if let Some(tag_name) = &update.tag_name {
            next.tag_name = tag_name.clone().and_then(non_empty);
        }
        if let Some(author) = &update.author {
            next.author = author.clone().and_then(non_empty);
        }
        if let Some(year_from) = update.year_from {
            next.year_from = year_from.filter(|y| *y > 0);
        }
        if let Some(year_to) = update.year_to {
            next.year_to = year_to.filter(|y| *y > 0);
        }
        if let Some(view) = update.view {
            next.view = view;
        }

        let filters_changed = Self { page: 1, ..next.clone() } != Self { page: 1, ..self.clone() };
        next.page = if filters_changed {
            1
        } else {
            update.page.unwrap_or(self.page).max(1)
        };
        next
    }

    /// Whether any narrowing filter (not sort, view or page) is set.
    pub fn has_active_filters(&self) -> bool {
        !self.active_filters().is_empty()
    }

    /// Chips for the "Active filters" row, in display order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();
        if !self.min_rating.is_any() {
            chips.push(ActiveFilter::new(FilterKind::MinRating, self.min_rating.to_string()));
        }
        if let Some(tag_name) = &self.tag_name {
            chips.push(ActiveFilter::new(FilterKind::Tag, format!("Tag: {}", tag_name)));
        } else if let Some(tag_id) = self.tag_id {
            chips.push(ActiveFilter::new(FilterKind::Tag, format!("Tag #{}", tag_id)));
        }
        if let Some(author) = &self.author {
            chips.push(ActiveFilter::new(FilterKind::Author, format!("Author: {}", author)));
        }
        if let Some(year) = self.year_from {
            chips.push(ActiveFilter::new(FilterKind::YearFrom, format!("From {}", year)));
        }
        if let Some(year) = self.year_to {
            chips.push(ActiveFilter::new(FilterKind::YearTo, format!("To {}", year)));
        }
        chips
    }

    /// Parameters for `/books/` and `/books/search`, minus the `q` term.
    pub fn api_params(&self, per_page: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), per_page.to_string()),
            ("sort_by".to_string(), self.sort_by.as_str().to_string()),
        ];
        if let Some(min_rating) = self.min_rating.as_param() {
            params.push(("min_rating".to_string(), min_rating.to_string()));
        }
        if let Some(tag_id) = self.tag_id {
            params.push(("tag_id".to_string(), tag_id.to_string()));
        }
        if let Some(tag_name) = &self.tag_name {
            params.push(("tag_name".to_string(), tag_name.clone()));
        }
        if let Some(author) = &self.author {
            params.push(("author".to_string(), author.clone()));
        }
        if let Some(year) = self.year_from {
            params.push(("year_from".to_string(), year.to_string()));
        }
        if let Some(year) = self.year_to {
            params.push(("year_to".to_string(), year.to_string()));
        }
        params
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Which filter a chip stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    MinRating,
    Tag,
    Author,
    YearFrom,
    YearTo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub label: String,
}

impl ActiveFilter {
    fn new(kind: FilterKind, label: String) -> Self {
        Self { kind, label }
    }

    /// The update that removes this chip's filter.
    pub fn removal(&self) -> FilterUpdate {
        FilterUpdate::removing(self.kind)
    }
}

/// A partial change to [`FilterState`]. `None` leaves a field alone; for
/// optional fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub query: Option<Option<String>>,
    pub page: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub min_rating: Option<MinRating>,
    pub tag_id: Option<Option<TagId>>,
    pub tag_name: Option<Option<String>>,
    pub author: Option<Option<String>>,
    pub year_from: Option<Option<i32>>,
    pub year_to: Option<Option<i32>>,
    pub view: Option<ViewMode>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// An update that clears one filter.
    pub fn removing(kind: FilterKind) -> Self {
        let update = Self::new();
        match kind {
            FilterKind::MinRating => update.min_rating(MinRating::Any),
            FilterKind::Tag => Self {
                tag_id: Some(None),
                tag_name: Some(None),
                ..update
            },
            FilterKind::Author => Self {
                author: Some(None),
                ..update
            },
            FilterKind::YearFrom => Self {
                year_from: Some(None),
                ..update
            },
            FilterKind::YearTo => Self {
                year_to: Some(None),
                ..update
            },
        }
    }

    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(Some(text.into()));
        self
    }

    pub fn clear_query(mut self) -> Self {
        self.query = Some(None);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn min_rating(mut self, min_rating: MinRating) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn tag(mut self, tag_id: TagId, tag_name: Option<String>) -> Self {
        self.tag_id = Some(Some(tag_id));
        self.tag_name = Some(tag_name);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(Some(author.into()));
        self
    }

    pub fn year_from(mut self, year: i32) -> Self {
        self.year_from = Some(Some(year));
        self
    }

    pub fn year_to(mut self, year: i32) -> Self {
        self.year_to = Some(Some(year));
        self
    }

    pub fn view(mut self, view: ViewMode) -> Self {
        self.view = Some(view);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_round_trips_through_wire_value() {
        for sort in SortBy::ALL {
            assert_eq!(SortBy::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(SortBy::parse("newest"), None);
    }

    #[test]
    fn min_rating_accepts_only_offered_thresholds() {
        assert_eq!(MinRating::from_value(4.5), Ok(MinRating::FourAndHalf));
        assert_eq!(MinRating::from_value(0.0), Ok(MinRating::Any));
        assert!(MinRating::from_value(3.5).is_err());
    }

    #[test]
    fn min_rating_displays_as_chip_label() {
        assert_eq!(MinRating::Four.to_string(), "4+ Stars");
        assert_eq!(MinRating::Any.to_string(), "Any");
    }

    #[test]
    fn changing_a_filter_resets_page() {
        let state = FilterState {
            page: 5,
            ..FilterState::default()
        };
        let next = state.apply(&FilterUpdate::new().sort_by(SortBy::Rating));
        assert_eq!(next.sort_by, SortBy::Rating);
        assert_eq!(next.page, 1);
    }

    #[test]
    fn page_only_update_keeps_other_fields() {
        let state = FilterState {
            author: Some("Le Guin".to_string()),
            ..FilterState::for_query("earthsea")
        };
        let next = state.apply(&FilterUpdate::new().page(3));
        assert_eq!(next.page, 3);
        assert_eq!(next.author.as_deref(), Some("Le Guin"));
        assert_eq!(next.query.as_deref(), Some("earthsea"));
    }

    #[test]
    fn setting_a_filter_to_its_current_value_keeps_page() {
        let state = FilterState {
            page: 4,
            sort_by: SortBy::Title,
            ..FilterState::default()
        };
        let next = state.apply(&FilterUpdate::new().sort_by(SortBy::Title));
        assert_eq!(next.page, 4);
    }

    #[test]
    fn filter_changes_preserve_query() {
        let state = FilterState::for_query("dune");
        let next = state.apply(&FilterUpdate::new().min_rating(MinRating::Four));
        assert_eq!(next.query.as_deref(), Some("dune"));
    }

    #[test]
    fn empty_strings_clear_text_filters() {
        let state = FilterState {
            author: Some("Austen".to_string()),
            ..FilterState::default()
        };
        let next = state.apply(&FilterUpdate::new().author(""));
        assert_eq!(next.author, None);
    }

    #[test]
    fn cleared_keeps_only_query() {
        let state = FilterState {
            tag_id: Some(TagId::new(7)),
            sort_by: SortBy::Rating,
            page: 3,
            ..FilterState::for_query("dune")
        };
        assert_eq!(state.cleared(), FilterState::for_query("dune"));
    }

    #[test]
    fn active_filters_lists_chips_in_order() {
        let state = FilterState {
            min_rating: MinRating::Four,
            tag_name: Some("fantasy".to_string()),
            tag_id: Some(TagId::new(3)),
            author: Some("Tolkien".to_string()),
            year_from: Some(1950),
            ..FilterState::default()
        };
        let labels: Vec<String> = state.active_filters().into_iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec!["4+ Stars", "Tag: fantasy", "Author: Tolkien", "From 1950"]
        );
        assert!(!FilterState::for_query("x").has_active_filters());
    }

    #[test]
    fn removing_a_chip_clears_its_filter() {
        let state = FilterState {
            tag_name: Some("fantasy".to_string()),
            tag_id: Some(TagId::new(3)),
            page: 2,
            ..FilterState::default()
        };
        let chip = state.active_filters().remove(0);
        let next = state.apply(&chip.removal());
        assert_eq!(next.tag_id, None);
        assert_eq!(next.tag_name, None);
        assert_eq!(next.page, 1);
    }

    #[test]
    fn api_params_skip_unset_filters() {
        let state = FilterState {
            page: 2,
            min_rating: MinRating::Four,
            ..FilterState::for_query("dune")
        };
        let params = state.api_params(20);
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "20".to_string()),
                ("sort_by".to_string(), "relevance".to_string()),
                ("min_rating".to_string(), "4".to_string()),
            ]
        );
    }
}
