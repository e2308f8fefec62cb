use crate::assistant::domain::model::{
    enums::assistant_intent::AssistantIntent, value_objects::question::Question,
};

#[derive(Clone, Copy, Debug)]
pub enum IntentMatcher {
    ContainsAny(&'static [&'static str]),
    ContainsAll(&'static [&'static str]),
}

impl IntentMatcher {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            IntentMatcher::ContainsAny(phrases) => {
                phrases.iter().any(|phrase| question.contains(phrase))
            }
            IntentMatcher::ContainsAll(phrases) => {
                !phrases.is_empty() && phrases.iter().all(|phrase| question.contains(phrase))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IntentRule {
    pub matcher: IntentMatcher,
    pub intent: AssistantIntent,
}

impl IntentRule {
    pub const fn new(matcher: IntentMatcher, intent: AssistantIntent) -> Self {
        Self { matcher, intent }
    }
}

// First match wins.
pub const DEFAULT_INTENT_RULES: &[IntentRule] = &[
    IntentRule::new(
        IntentMatcher::ContainsAny(&["clear chat", "reset"]),
        AssistantIntent::Reset,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["like i'm 5", "like im 5", "like i am 5", "like a child"]),
        AssistantIntent::ExplainLikeFive,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["how complete", "completeness of"]),
        AssistantIntent::ColumnCompleteness,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["missing", "null"]),
        AssistantIntent::MissingValues,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["uniquely identifies", "primary key", "unique id"]),
        AssistantIntent::PrimaryKey,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["related", "lineage", "relationship"]),
        AssistantIntent::Relationships,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["sql", "query"]),
        AssistantIntent::SqlSuggestion,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["fresh", "last updated", "stale"]),
        AssistantIntent::Freshness,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["quality", "duplicate"]),
        AssistantIntent::QualitySummary,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["explain", "describe", "what kind of information"]),
        AssistantIntent::ExplainTable,
    ),
    IntentRule::new(
        IntentMatcher::ContainsAny(&["tables", "available"]),
        AssistantIntent::ListTables,
    ),
];

pub fn resolve_intent(rules: &[IntentRule], question: &Question) -> AssistantIntent {
    rules
        .iter()
        .find(|rule| rule.matcher.matches(question))
        .map(|rule| rule.intent)
        .unwrap_or(AssistantIntent::Help)
}
