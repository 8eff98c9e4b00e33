use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative description of how to find a DOM element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "query", rename_all = "lowercase")]
pub enum Locator {
    XPath(String),
    Css(String),
    Id(String),
}

impl Locator {
    pub fn xpath(query: impl Into<String>) -> Self {
        Locator::XPath(query.into())
    }

    pub fn css(query: impl Into<String>) -> Self {
        Locator::Css(query.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn query(&self) -> &str {
        match self {
            Locator::XPath(q) | Locator::Css(q) | Locator::Id(q) => q,
        }
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::XPath(_) => "xpath",
            Locator::Css(_) => "css",
            Locator::Id(_) => "id",
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.query())
    }
}
