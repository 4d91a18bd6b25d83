//! Canned assistant responder
//!
//! Offline stand-in for the hosted model: classifies an utterance by
//! case-insensitive substring match and returns one of four fixed
//! templates. Deterministic, no network. Used as the page-level demo
//! responder and as the relay's fallback when the model call fails.

/// Which canned template a message maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Recommendation,
    Budget,
    Family,
    Default,
}

/// Classify a message into one of the four canned reply kinds.
///
/// Checks run in priority order, so a message mentioning both "recommend"
/// and "budget" gets the recommendation template.
pub fn classify(message: &str) -> ReplyKind {
    let lower = message.to_lowercase();

    if ["recommend", "suggest", "where"].iter().any(|kw| lower.contains(kw)) {
        ReplyKind::Recommendation
    } else if ["budget", "cheap", "afford"].iter().any(|kw| lower.contains(kw)) {
        ReplyKind::Budget
    } else if ["family", "kids", "children"].iter().any(|kw| lower.contains(kw)) {
        ReplyKind::Family
    } else {
        ReplyKind::Default
    }
}

/// Canned response for a user message
pub fn respond(message: &str) -> String {
    template(classify(message)).to_string()
}

fn template(kind: ReplyKind) -> &'static str {
    match kind {
        ReplyKind::Recommendation => RECOMMENDATION_REPLY,
        ReplyKind::Budget => BUDGET_REPLY,
        ReplyKind::Family => FAMILY_REPLY,
        ReplyKind::Default => DEFAULT_REPLY,
    }
}

const RECOMMENDATION_REPLY: &str = "\
**Travel Recommendations**

Based on popular trends, here are my top suggestions:

1. **Bali, Indonesia** - Perfect for beach lovers and culture enthusiasts
2. **Swiss Alps** - Ideal for adventure and stunning mountain views
3. **Rome, Italy** - Best for history buffs and food lovers

Would you like more details about any of these destinations?

*This is a demo response. Configure a model API key for personalized AI recommendations.*";

const BUDGET_REPLY: &str = "\
**Budget Travel Tips**

Here are ways to save on your next trip:

- Travel during shoulder season (April-May, September-October)
- Book flights on Tuesdays for better deals
- Consider all-inclusive packages for predictable costs
- Look for tours that include meals and transfers

Our Caribbean and Bali tours offer great value!

*This is a demo response. Configure a model API key for personalized advice.*";

const FAMILY_REPLY: &str = "\
**Family-Friendly Destinations**

Great options for traveling with family:

- **Beach Resorts** - Kids-friendly activities and safe swimming
- **City Tours** - Educational experiences for all ages
- **Cruises** - Entertainment for everyone on board

I recommend our Tropical Paradise Bali tour - it is perfect for families!

*This is a demo response. Configure a model API key for personalized recommendations.*";

const DEFAULT_REPLY: &str = "\
Hello! I'm your AI travel assistant. I can help you with:

- **Destination recommendations** based on your interests
- **Trip planning** and itinerary suggestions
- **Budget optimization** tips
- **Travel advice** for any destination

Try asking me \"Where should I travel for adventure?\" or \"Suggest a budget-friendly beach destination!\"

*Currently in demo mode. Configure a model API key to enable full AI capabilities.*";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_keywords() {
        assert_eq!(classify("Can you recommend a trip?"), ReplyKind::Recommendation);
        assert_eq!(classify("SUGGEST something"), ReplyKind::Recommendation);
        assert_eq!(classify("where should I go"), ReplyKind::Recommendation);
    }

    #[test]
    fn test_budget_keywords() {
        assert_eq!(classify("I'm on a budget"), ReplyKind::Budget);
        assert_eq!(classify("something cheap please"), ReplyKind::Budget);
        assert_eq!(classify("what can I afford?"), ReplyKind::Budget);
    }

    #[test]
    fn test_family_keywords() {
        assert_eq!(classify("traveling with my family"), ReplyKind::Family);
        assert_eq!(classify("good for kids?"), ReplyKind::Family);
        assert_eq!(classify("two children"), ReplyKind::Family);
    }

    #[test]
    fn test_default_fallthrough() {
        assert_eq!(classify("hello"), ReplyKind::Default);
        assert_eq!(classify(""), ReplyKind::Default);
    }

    #[test]
    fn test_priority_order() {
        // Recommendation wins over budget, budget wins over family
        assert_eq!(
            classify("recommend a budget trip for the family"),
            ReplyKind::Recommendation
        );
        assert_eq!(classify("cheap trip with kids"), ReplyKind::Budget);
    }

    #[test]
    fn test_respond_is_deterministic() {
        let a = respond("where to go?");
        let b = respond("where to go?");
        assert_eq!(a, b);
        assert!(a.starts_with("**Travel Recommendations**"));
    }
}
