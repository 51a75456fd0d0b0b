#[derive(Default)]
pub struct PriceList {
    pub search: String,
}

impl PriceList {
    /// Case-insensitive substring match against the search box.
    pub fn matches(&self, name: &str) -> bool {
        let term = self.search.trim();
        term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_matches_everything() {
        let list = PriceList::default();
        assert!(list.matches("Latte 1L"));
    }

    #[test]
    fn search_ignores_case_and_padding() {
        let list = PriceList {
            search: "  LAT ".into(),
        };
        assert!(list.matches("Latte 1L"));
        assert!(!list.matches("Benzina 1L"));
    }
}
