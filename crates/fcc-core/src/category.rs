//! # Category Token: Compact Product Category Codec
//!
//! A product's category is stored and transmitted as one string:
//!
//! ```text
//! "<main>:<sub>"       catalog selection, e.g. "snacks:jerky"
//! "custom:<name>"      free-text name under the custom-allowed main category
//! "<main>"             legacy bare token from the flat-category schema
//! ```
//!
//! `decode(encode(x)) == x` for every token this module can construct.
//! Bare tokens are a one-way compatibility shim for records written before
//! subcategories existed; new selections always carry a subcategory or a
//! custom name.
//!
//! This module checks token *syntax* only. Whether a main category exists,
//! or a subcategory belongs to it, is the taxonomy's concern
//! (`fcc_catalog::taxonomy::validate`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CategoryError;

/// The main category that accepts a free-text product name.
pub const CUSTOM_MAIN_CATEGORY: &str = "other";

/// Token prefix marking a custom product name.
pub const CUSTOM_TOKEN_PREFIX: &str = "custom";

const SEPARATOR: char = ':';

/// A decoded product category token.
///
/// Built only through the validating constructors or [`decode`], so every
/// value round-trips through [`encode`]. A custom name has no main-category
/// field: it always belongs to [`CUSTOM_MAIN_CATEGORY`], so pairing a custom
/// name with any other main category cannot be expressed.
///
/// [`decode`]: CategoryToken::decode
/// [`encode`]: CategoryToken::encode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryToken(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Catalog { main: String, sub: String },
    Custom { name: String },
    Bare { main: String },
}

/// Borrowed view of a token's parts, for matching on its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenParts<'a> {
    /// A catalog main category with one of its subcategories.
    Catalog { main: &'a str, sub: &'a str },
    /// A free-text product name under the custom-allowed main category.
    Custom { name: &'a str },
    /// A legacy single-identifier token with no subcategory.
    Bare { main: &'a str },
}

/// How a category should be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLabel {
    /// Display this text as-is; no catalog lookup.
    Literal(String),
    /// Translate this text key.
    Key(String),
}

impl CategoryToken {
    /// Build a catalog token from a main category and one of its subcategories.
    pub fn catalog(main: impl Into<String>, sub: impl Into<String>) -> Result<Self, CategoryError> {
        let main = main.into();
        let sub = sub.into();
        check_main_id(&main)?;
        if sub.is_empty() {
            return Err(CategoryError::EmptySegment {
                token: format!("{main}{SEPARATOR}"),
            });
        }
        Ok(Self(Repr::Catalog { main, sub }))
    }

    /// Build a custom-name token. The name must contain a non-blank character.
    pub fn custom(name: impl Into<String>) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyCustomName);
        }
        Ok(Self(Repr::Custom { name }))
    }

    /// Build a legacy bare token.
    pub fn bare(main: impl Into<String>) -> Result<Self, CategoryError> {
        let main = main.into();
        if main.is_empty() {
            return Err(CategoryError::EmptyToken);
        }
        if main.contains(SEPARATOR) {
            return Err(CategoryError::SeparatorInMainId { main });
        }
        Ok(Self(Repr::Bare { main }))
    }

    /// Build a token from loose selection parts.
    ///
    /// A custom name is accepted only with [`CUSTOM_MAIN_CATEGORY`]; passing
    /// one with any other main category is a caller error and fails fast.
    /// The custom-allowed main category likewise requires a custom name.
    /// Otherwise a subcategory yields a catalog token and its absence a
    /// bare token.
    pub fn from_parts(
        main: &str,
        sub: Option<&str>,
        custom_name: Option<&str>,
    ) -> Result<Self, CategoryError> {
        if let Some(name) = custom_name {
            if main != CUSTOM_MAIN_CATEGORY {
                return Err(CategoryError::CustomNameOutsideOther {
                    main: main.to_string(),
                    allowed: CUSTOM_MAIN_CATEGORY,
                });
            }
            return Self::custom(name);
        }
        if main == CUSTOM_MAIN_CATEGORY {
            return Err(CategoryError::MissingCustomName(main.to_string()));
        }
        match sub {
            Some(sub) => Self::catalog(main, sub),
            None => Self::bare(main),
        }
    }

    /// The token's form and parts.
    pub fn parts(&self) -> TokenParts<'_> {
        match &self.0 {
            Repr::Catalog { main, sub } => TokenParts::Catalog { main, sub },
            Repr::Custom { name } => TokenParts::Custom { name },
            Repr::Bare { main } => TokenParts::Bare { main },
        }
    }

    /// Serialize to the compact string form.
    pub fn encode(&self) -> String {
        match &self.0 {
            Repr::Catalog { main, sub } => format!("{main}{SEPARATOR}{sub}"),
            Repr::Custom { name } => format!("{CUSTOM_TOKEN_PREFIX}{SEPARATOR}{name}"),
            Repr::Bare { main } => main.clone(),
        }
    }

    /// Parse the compact string form, including legacy bare tokens.
    pub fn decode(token: &str) -> Result<Self, CategoryError> {
        if token.is_empty() {
            return Err(CategoryError::EmptyToken);
        }
        if let Some(name) = token
            .strip_prefix(CUSTOM_TOKEN_PREFIX)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
        {
            return Self::custom(name);
        }
        match token.split_once(SEPARATOR) {
            Some((main, sub)) if !main.is_empty() && !sub.is_empty() => Self::catalog(main, sub),
            Some(_) => Err(CategoryError::EmptySegment {
                token: token.to_string(),
            }),
            None => Self::bare(token),
        }
    }

    /// Main category id. Custom tokens report [`CUSTOM_MAIN_CATEGORY`].
    pub fn main_id(&self) -> &str {
        match &self.0 {
            Repr::Catalog { main, .. } | Repr::Bare { main } => main,
            Repr::Custom { .. } => CUSTOM_MAIN_CATEGORY,
        }
    }

    /// Subcategory id, if the token carries one.
    pub fn sub_id(&self) -> Option<&str> {
        match &self.0 {
            Repr::Catalog { sub, .. } => Some(sub),
            Repr::Custom { .. } | Repr::Bare { .. } => None,
        }
    }

    /// Custom product name, if this is a custom token.
    pub fn custom_name(&self) -> Option<&str> {
        match &self.0 {
            Repr::Custom { name } => Some(name),
            Repr::Catalog { .. } | Repr::Bare { .. } => None,
        }
    }

    /// Whether this token came from the legacy flat schema.
    pub fn is_legacy(&self) -> bool {
        matches!(self.0, Repr::Bare { .. })
    }

    /// How to display the category.
    ///
    /// Custom names are shown verbatim. Otherwise the most specific
    /// text key is used: the subcategory's if present, else the main's.
    pub fn label(&self) -> CategoryLabel {
        match &self.0 {
            Repr::Custom { name } => CategoryLabel::Literal(name.clone()),
            Repr::Catalog { sub, .. } => CategoryLabel::Key(format!("categories.sub.{sub}")),
            Repr::Bare { main } => CategoryLabel::Key(format!("categories.main.{main}")),
        }
    }
}

fn check_main_id(main: &str) -> Result<(), CategoryError> {
    if main.is_empty() {
        return Err(CategoryError::EmptySegment {
            token: format!("{SEPARATOR}"),
        });
    }
    if main.contains(SEPARATOR) {
        return Err(CategoryError::SeparatorInMainId {
            main: main.to_string(),
        });
    }
    if main == CUSTOM_TOKEN_PREFIX {
        return Err(CategoryError::ReservedMainId(main.to_string()));
    }
    Ok(())
}

impl fmt::Display for CategoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CategoryToken {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for CategoryToken {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<CategoryToken> for String {
    fn from(token: CategoryToken) -> Self {
        token.encode()
    }
}
