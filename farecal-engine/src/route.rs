use farecal_shared::Airport;

/// Airport codes treated as the carrier's base of operations. The pricing
/// service always prices a round trip as departing from one of these.
pub const HOME_AIRPORT_CODES: [&str; 2] = ["TPE", "RMQ"];

/// Directionality decision for one query. `search_from`/`search_to` is the
/// pair the pricing calls are issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub search_from: Airport,
    pub search_to: Airport,
    pub is_home_origin: bool,
}

/// Decide which airport the pricing service treats as the departure.
/// A home-code origin keeps the pair as given; any other origin swaps it,
/// including pairs where neither code is a home code.
pub fn resolve(from: &Airport, to: &Airport) -> ResolvedRoute {
    let is_home_origin = HOME_AIRPORT_CODES.contains(&from.code.as_str());
    if is_home_origin {
        ResolvedRoute {
            search_from: from.clone(),
            search_to: to.clone(),
            is_home_origin,
        }
    } else {
        ResolvedRoute {
            search_from: to.clone(),
            search_to: from.clone(),
            is_home_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(code: &str) -> Airport {
        Airport {
            region: "Asia".to_string(),
            location: code.to_string(),
            name: format!("{code} International Airport"),
            code: code.to_string(),
            disabled: false,
        }
    }

    #[test]
    fn test_home_origin_keeps_order() {
        let route = resolve(&airport("TPE"), &airport("NRT"));
        assert!(route.is_home_origin);
        assert_eq!(route.search_from.code, "TPE");
        assert_eq!(route.search_to.code, "NRT");

        let route = resolve(&airport("RMQ"), &airport("KIX"));
        assert!(route.is_home_origin);
        assert_eq!(route.search_from.code, "RMQ");
    }

    #[test]
    fn test_away_origin_swaps() {
        let route = resolve(&airport("NRT"), &airport("TPE"));
        assert!(!route.is_home_origin);
        assert_eq!(route.search_from.code, "TPE");
        assert_eq!(route.search_to.code, "NRT");
    }

    #[test]
    fn test_neither_code_home_still_swaps() {
        // Deliberate fallback: an unrecognized pair is treated as
        // away-from-home and swapped.
        let route = resolve(&airport("NRT"), &airport("KIX"));
        assert!(!route.is_home_origin);
        assert_eq!(route.search_from.code, "KIX");
        assert_eq!(route.search_to.code, "NRT");
    }

    #[test]
    fn test_swapped_arguments_mirror() {
        let a = airport("TPE");
        let b = airport("NRT");
        let forward = resolve(&a, &b);
        let backward = resolve(&b, &a);
        assert_eq!(forward.search_from, backward.search_from);
        assert_eq!(forward.search_to, backward.search_to);
    }
}
