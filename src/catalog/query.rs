//! Translates raw request query parameters into a typed product query.
//!
//! The query is built in two stages, mirroring the request flow: a search
//! stage (case-insensitive keyword match on the product name) and a filter
//! stage (field comparisons). Filterable fields and their operators form an
//! explicit allow-list; anything outside it is rejected upfront with a
//! validation error instead of being passed through to the store.

use std::collections::BTreeMap;

use crate::catalog::error::ProductError;
use crate::domain::Product;

/// Raw query parameters as received from the (external) routing layer.
/// Range operators use bracket syntax, e.g. `price[gte]=100`.
pub type QueryParams = BTreeMap<String, String>;

/// Keys consumed by the search and pagination stages, never treated as
/// field filters.
pub const RESERVED_KEYS: [&str; 3] = ["keyword", "page", "limit"];

/// Fields that may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Price,
    Ratings,
    Stock,
}

impl FilterField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "category" => Some(FilterField::Category),
            "price" => Some(FilterField::Price),
            "ratings" => Some(FilterField::Ratings),
            "stock" => Some(FilterField::Stock),
            _ => None,
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(self, FilterField::Category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "gt" => Some(FilterOp::Gt),
            "gte" => Some(FilterOp::Gte),
            "lt" => Some(FilterOp::Lt),
            "lte" => Some(FilterOp::Lte),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FilterValue {
    Text(String),
    Number(f64),
}

/// One validated `field op value` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    field: FilterField,
    op: FilterOp,
    value: FilterValue,
}

impl FilterClause {
    fn accepts(&self, product: &Product) -> bool {
        match (&self.value, self.field) {
            (FilterValue::Text(text), FilterField::Category) => product.category == *text,
            (FilterValue::Number(bound), field) => {
                let actual = match field {
                    FilterField::Price => product.price,
                    FilterField::Ratings => product.ratings,
                    FilterField::Stock => f64::from(product.stock),
                    FilterField::Category => return false,
                };
                match self.op {
                    FilterOp::Eq => actual == *bound,
                    FilterOp::Gt => actual > *bound,
                    FilterOp::Gte => actual >= *bound,
                    FilterOp::Lt => actual < *bound,
                    FilterOp::Lte => actual <= *bound,
                }
            }
            (FilterValue::Text(_), _) => false,
        }
    }
}

/// The refined query produced from raw parameters. No I/O happens here;
/// the collection actor evaluates it during `Find`/`Count`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    keyword: Option<String>,
    clauses: Vec<FilterClause>,
}

impl ProductQuery {
    /// Build the query: search stage first, then the filter stage over the
    /// non-reserved keys.
    pub fn parse(params: &QueryParams) -> Result<Self, ProductError> {
        let keyword = params
            .get("keyword")
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(|k| k.to_lowercase());

        let mut clauses = Vec::new();
        for (key, value) in params {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            clauses.push(Self::parse_clause(key, value)?);
        }

        Ok(Self { keyword, clauses })
    }

    fn parse_clause(key: &str, value: &str) -> Result<FilterClause, ProductError> {
        let (field_name, op_name) = split_key(key);
        let field = FilterField::from_name(field_name)
            .ok_or_else(|| ProductError::InvalidFilter(format!("'{field_name}' is not filterable")))?;

        let op = match op_name {
            None => FilterOp::Eq,
            Some(name) => FilterOp::from_name(name).ok_or_else(|| {
                ProductError::InvalidFilter(format!("unknown operator '{name}' on '{field_name}'"))
            })?,
        };

        let value = if field.is_numeric() {
            // "NaN" and "inf" parse as f64 but make every comparison
            // meaningless, so only finite values count as numbers here.
            let number: f64 = value
                .parse()
                .ok()
                .filter(|n: &f64| n.is_finite())
                .ok_or_else(|| {
                    ProductError::InvalidFilter(format!(
                        "'{value}' is not a number for '{field_name}'"
                    ))
                })?;
            FilterValue::Number(number)
        } else {
            if op != FilterOp::Eq {
                return Err(ProductError::InvalidFilter(format!(
                    "'{field_name}' only supports equality"
                )));
            }
            FilterValue::Text(value.to_string())
        };

        Ok(FilterClause { field, op, value })
    }

    /// Whether the product matches both stages. Used by the collection
    /// actor as the `Find`/`Count` predicate.
    pub fn accepts(&self, product: &Product) -> bool {
        if let Some(keyword) = &self.keyword {
            if !product.name.to_lowercase().contains(keyword) {
                return false;
            }
        }
        self.clauses.iter().all(|clause| clause.accepts(product))
    }
}

// "price[gte]" -> ("price", Some("gte")); "category" -> ("category", None)
fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('[') {
        Some((field, rest)) => match rest.strip_suffix(']') {
            Some(op) => (field, Some(op)),
            None => (key, None),
        },
        None => (key, None),
    }
}
