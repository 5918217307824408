/// Navigation views that select the active song list
use serde::{Deserialize, Serialize};

/// Which list next/previous traversal and list rendering operate over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    /// The full static catalog
    #[default]
    Catalog,
    /// Songs played in the current session, most recent first
    RecentlyPlayed,
    /// Songs ranked by play count
    TopPlayed,
    /// Songs marked as favorite
    Favorites,
}

impl ActiveView {
    /// All views, in navigation order
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Catalog,
        ActiveView::RecentlyPlayed,
        ActiveView::TopPlayed,
        ActiveView::Favorites,
    ];

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::RecentlyPlayed => "recent",
            Self::TopPlayed => "top",
            Self::Favorites => "favorites",
        }
    }

    /// Parse from string (accepts the short names and a few aliases)
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" | "all" | "home" => Some(Self::Catalog),
            "recent" | "recently-played" | "recently_played" => Some(Self::RecentlyPlayed),
            "top" | "top-tracks" | "top_played" => Some(Self::TopPlayed),
            "favorites" | "favs" | "fav" => Some(Self::Favorites),
            _ => None,
        }
    }

    /// Route path of the view in the browser front-end
    #[must_use]
    pub fn route(&self) -> &'static str {
        match self {
            Self::Catalog => "/",
            Self::RecentlyPlayed => "/recently-played",
            Self::TopPlayed => "/top-tracks",
            Self::Favorites => "/favorites",
        }
    }

    /// Resolve a route path reported by the navigation layer
    #[must_use]
    pub fn from_route(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|view| view.route().trim_end_matches('/') == path)
    }
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
