/// Parsed AI commentary: two categorized bullet lists in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightReport {
    pub insights: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightCategory {
    Insight,
    Suggestion,
}

/// One discrete bullet. `order` is the item's position within its category as
/// it appeared in the source text; the parser never re-ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightItem {
    pub category: InsightCategory,
    pub text: String,
    pub order: usize,
}

impl InsightReport {
    pub fn is_empty(&self) -> bool {
        self.insights.is_empty() && self.suggestions.is_empty()
    }

    /// Flattens the report into categorized, order-stamped items, insights
    /// first, each list in source order.
    pub fn items(&self) -> Vec<InsightItem> {
        let insights = self.insights.iter().enumerate().map(|(order, text)| InsightItem {
            category: InsightCategory::Insight,
            text: text.clone(),
            order,
        });
        let suggestions = self.suggestions.iter().enumerate().map(|(order, text)| InsightItem {
            category: InsightCategory::Suggestion,
            text: text.clone(),
            order,
        });
        insights.chain(suggestions).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_preserve_category_and_order() {
        let report = InsightReport {
            insights: vec!["a".into(), "b".into()],
            suggestions: vec!["c".into()],
        };
        let items = report.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].category, InsightCategory::Insight);
        assert_eq!(items[0].order, 0);
        assert_eq!(items[1].order, 1);
        assert_eq!(items[2].category, InsightCategory::Suggestion);
        assert_eq!(items[2].order, 0);
        assert_eq!(items[2].text, "c");
    }

    #[test]
    fn empty_report_has_no_items() {
        let report = InsightReport::default();
        assert!(report.is_empty());
        assert!(report.items().is_empty());
    }
}
