//! Star rating enumeration and the site-specific token mapping
//!
//! The catalog encodes a rating as a class token next to the `star-rating`
//! marker class, e.g. `<p class="star-rating Three">`. Mapping those tokens
//! onto `Rating` is a property of that site's markup and lives here rather
//! than in the parser.

use std::fmt;

/// Marker class that identifies a rating element
pub const STAR_RATING_CLASS: &str = "star-rating";

/// A book's star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
    /// No rating marker, or a marker without a recognised token
    Unrated,
}

impl Rating {
    /// Returns the persisted text for this rating
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Unrated => "N/A",
        }
    }

    /// Maps a single site class token (case-insensitive) to a rating
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "three" => Some(Self::Three),
            "four" => Some(Self::Four),
            "five" => Some(Self::Five),
            _ => None,
        }
    }

    /// Derives a rating from the class tokens of a rating marker element
    ///
    /// The first recognised token other than the marker class wins. Anything
    /// else, including an empty class list, is `Unrated`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_harvest::Rating;
    ///
    /// assert_eq!(Rating::from_star_classes(["star-rating", "Three"]), Rating::Three);
    /// assert_eq!(Rating::from_star_classes(Vec::<&str>::new()), Rating::Unrated);
    /// ```
    pub fn from_star_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        classes
            .into_iter()
            .filter(|class| *class != STAR_RATING_CLASS)
            .find_map(Self::from_token)
            .unwrap_or(Self::Unrated)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
