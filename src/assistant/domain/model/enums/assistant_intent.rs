#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssistantIntent {
    Reset,
    ExplainLikeFive,
    ColumnCompleteness,
    MissingValues,
    PrimaryKey,
    Relationships,
    SqlSuggestion,
    Freshness,
    QualitySummary,
    ExplainTable,
    ListTables,
    Help,
}
