//! Catalog filtering: narrowing a product list by category and search text.
//!
//! The storefront re-evaluates the filter on every keystroke and category
//! click, so everything here is a pure function of its inputs. The filter is
//! generic over [`CatalogItem`] so it works the same on fixture rows,
//! database rows, or anything else shaped like a product.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Default number of related products returned for a product detail view.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Maximum number of related products a caller may ask for.
pub const MAX_RELATED_LIMIT: usize = 12;

/// Wire value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// The fields of a product the catalog filter looks at.
pub trait CatalogItem {
    fn id(&self) -> DbId;
    fn category_id(&self) -> DbId;
    fn name(&self) -> &str;
    fn short_description(&self) -> &str;
}

// ---------------------------------------------------------------------------
// CategorySelection
// ---------------------------------------------------------------------------

/// The category chosen in the catalog UI: every category, or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategorySelection {
    #[default]
    All,
    Id(DbId),
}

impl CategorySelection {
    /// `None` means no category was picked, which selects all of them.
    pub fn from_optional(category_id: Option<DbId>) -> Self {
        category_id.map_or(Self::All, Self::Id)
    }

    /// Whether a product in `category_id` passes this selection.
    pub fn matches(self, category_id: DbId) -> bool {
        match self {
            Self::All => true,
            Self::Id(selected) => selected == category_id,
        }
    }
}

impl FromStr for CategorySelection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Ok(Self::All);
        }
        s.parse::<DbId>()
            .map(Self::Id)
            .map_err(|_| CoreError::Validation(format!("Invalid category selection '{s}'")))
    }
}

impl TryFrom<String> for CategorySelection {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategorySelection> for String {
    fn from(value: CategorySelection) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Category and search text currently selected in the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub selected_category: CategorySelection,
    /// Matched case-insensitively against name and short description.
    /// Empty matches everything.
    pub search_term: String,
}

impl FilterCriteria {
    pub fn new(selected_category: CategorySelection, search_term: impl Into<String>) -> Self {
        Self {
            selected_category,
            search_term: search_term.into(),
        }
    }

    /// Criteria that let every product through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category_id: DbId) -> Self {
        self.selected_category = CategorySelection::Id(category_id);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Compile the criteria once so the search term is lowercased a single
    /// time per evaluation rather than once per product.
    fn matcher(&self) -> Matcher {
        Matcher {
            category: self.selected_category,
            needle: (!self.search_term.is_empty()).then(|| self.search_term.to_lowercase()),
        }
    }

    /// Whether a single product passes both predicates.
    pub fn matches<P: CatalogItem + ?Sized>(&self, product: &P) -> bool {
        self.matcher().matches(product)
    }
}

struct Matcher {
    category: CategorySelection,
    needle: Option<String>,
}

impl Matcher {
    fn matches<P: CatalogItem + ?Sized>(&self, product: &P) -> bool {
        if !self.category.matches(product.category_id()) {
            return false;
        }
        match &self.needle {
            None => true,
            Some(needle) => {
                contains_folded(product.name(), needle)
                    || contains_folded(product.short_description(), needle)
            }
        }
    }
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Keep the products that satisfy `criteria`, in their original order.
///
/// A product is kept when its category matches the selection AND the search
/// term is empty or occurs (case-insensitively) in its name or short
/// description. Unknown category ids simply produce an empty result.
pub fn filter_products<'a, P: CatalogItem>(
    products: &'a [P],
    criteria: &FilterCriteria,
) -> Vec<&'a P> {
    let matcher = criteria.matcher();
    products.iter().filter(|p| matcher.matches(*p)).collect()
}

/// Other products in the same category as `product_id`, in original order.
///
/// Returns an empty list when `product_id` is not in `products`.
pub fn related_products<P: CatalogItem>(products: &[P], product_id: DbId, limit: usize) -> Vec<&P> {
    let Some(category_id) = products
        .iter()
        .find(|p| p.id() == product_id)
        .map(CatalogItem::category_id)
    else {
        return Vec::new();
    };

    products
        .iter()
        .filter(|p| p.id() != product_id && p.category_id() == category_id)
        .take(limit.min(MAX_RELATED_LIMIT))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
