use serde::{Deserialize, Serialize};

/// Structured filter criteria applied after retrieval.
/// All present filters are ANDed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryFilters {
    /// Keep results with `metadata.price <= price_max`. Missing price excludes.
    pub price_max: Option<f64>,
    /// Case-insensitive substring match over description/text.
    pub dietary: Option<String>,
    /// Case-insensitive substring match over address/city/state.
    pub location: Option<String>,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.price_max.is_none() && self.dietary.is_none() && self.location.is_none()
    }

    /// Merge caller-supplied filters over parsed filters.
    /// Caller values take precedence field-by-field.
    pub fn merged(caller: &QueryFilters, parsed: &QueryFilters) -> QueryFilters {
        QueryFilters {
            price_max: caller.price_max.or(parsed.price_max),
            dietary: caller.dietary.clone().or_else(|| parsed.dietary.clone()),
            location: caller.location.clone().or_else(|| parsed.location.clone()),
        }
    }
}

/// Result of interpreting a free-text query. Immutable once produced;
/// one instance per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedQuery {
    /// Ordered search terms.
    pub keywords: Vec<String>,
    pub price_max: Option<f64>,
    pub dietary: Option<String>,
    pub location: Option<String>,
}

impl ParsedQuery {
    /// The designated degradation path: whitespace tokens, no filters.
    /// Never fails.
    pub fn fallback(raw_query: &str) -> Self {
        Self {
            keywords: raw_query.split_whitespace().map(String::from).collect(),
            price_max: None,
            dietary: None,
            location: None,
        }
    }

    /// The keyword terms rejoined for backends that take query text.
    pub fn keyword_text(&self) -> String {
        self.keywords.join(" ")
    }

    /// Filter view of the parsed fields.
    pub fn filters(&self) -> QueryFilters {
        QueryFilters {
            price_max: self.price_max,
            dietary: self.dietary.clone(),
            location: self.location.clone(),
        }
    }
}
