//! Page routes

/// The three pages, in the order they are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// PIN entry
    #[default]
    Home,
    /// Countdown and fireworks
    Fireworks,
    /// Scrolling memories page
    Wishes,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Fireworks, Route::Wishes];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Fireworks => "/fireworks",
            Route::Wishes => "/wishes",
        }
    }

    /// Route for a location path or hash; unknown paths go home
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#').trim_end_matches('/');
        match path {
            "/fireworks" | "fireworks" => Route::Fireworks,
            "/wishes" | "wishes" => Route::Wishes,
            _ => Route::Home,
        }
    }

    /// DOM id of the section that renders this route
    pub fn section_id(&self) -> &'static str {
        match self {
            Route::Home => "page-home",
            Route::Fireworks => "page-fireworks",
            Route::Wishes => "page-wishes",
        }
    }

    /// Page reached by the Next button
    pub fn next(&self) -> Option<Route> {
        match self {
            Route::Home => Some(Route::Fireworks),
            Route::Fireworks => Some(Route::Wishes),
            Route::Wishes => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_from_path_accepts_hashes_and_trailing_slashes() {
        assert_eq!(Route::from_path("#/fireworks"), Route::Fireworks);
        assert_eq!(Route::from_path("/wishes/"), Route::Wishes);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/nowhere"), Route::Home);
    }

    #[test]
    fn test_next() {
        assert_eq!(Route::Home.next(), Some(Route::Fireworks));
        assert_eq!(Route::Fireworks.next(), Some(Route::Wishes));
        assert_eq!(Route::Wishes.next(), None);
    }
}
