use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{
    assistant::{
        domain::{
            model::{
                commands::ask_question_command::AskQuestionCommand,
                entities::{
                    conversation_state::{ConversationState, GREETING},
                    intent_rule::{DEFAULT_INTENT_RULES, IntentRule, resolve_intent},
                },
                enums::{
                    assistant_domain_error::AssistantDomainError, assistant_intent::AssistantIntent,
                },
                value_objects::question::Question,
            },
            services::assistant_answer_service::AssistantAnswerService,
        },
        interfaces::acl::catalog_reader_facade::CatalogReaderFacade,
    },
    catalog::interfaces::acl::catalog_facade::CatalogTableSnapshot,
};

const EMPTY_CATALOG: &str =
    "The catalog is empty. Run an extraction and a quality analysis first.";

const MONTHLY_REVENUE_SQL: &str = "SELECT strftime('%Y-%m', order_date) AS month,
       SUM(total_amount) AS revenue
FROM orders
GROUP BY 1
ORDER BY 1;";

const TOP_CUSTOMERS_SQL: &str = "SELECT c.name, SUM(o.total_amount) AS total_spent
FROM customers c
JOIN orders o ON c.customer_id = o.customer_id
GROUP BY c.name
ORDER BY total_spent DESC;";

const HELP: &str = "I can help with:
- Explain a table (e.g., 'Explain orders')
- Data quality (e.g., 'Show quality issues')
- Missing values (e.g., 'Which customers columns have missing values?')
- Primary keys (e.g., 'Which column uniquely identifies a customer?')
- Freshness (e.g., 'When was orders last updated?')
- Relationships (e.g., 'What is related to orders?')
- SQL (e.g., 'Give monthly revenue SQL')
- Or say: 'Explain like I'm 5'";

pub struct AssistantAnswerServiceImpl {
    catalog: Arc<dyn CatalogReaderFacade>,
    rules: Vec<IntentRule>,
}

impl AssistantAnswerServiceImpl {
    pub fn new(catalog: Arc<dyn CatalogReaderFacade>) -> Self {
        Self::with_rules(catalog, DEFAULT_INTENT_RULES.to_vec())
    }

    pub fn with_rules(catalog: Arc<dyn CatalogReaderFacade>, rules: Vec<IntentRule>) -> Self {
        Self { catalog, rules }
    }

    async fn answer(
        &self,
        intent: AssistantIntent,
        question: &Question,
    ) -> Result<String, AssistantDomainError> {
        match intent {
            AssistantIntent::Reset => Ok(GREETING.to_string()),
            AssistantIntent::Help => Ok(HELP.to_string()),
            AssistantIntent::SqlSuggestion => Ok(Self::answer_sql_suggestion(question)),
            AssistantIntent::ListTables => self.answer_list_tables().await,
            AssistantIntent::ExplainLikeFive => self.answer_explain_like_five().await,
            AssistantIntent::QualitySummary => self.answer_quality_summary().await,
            AssistantIntent::MissingValues => self.answer_missing_values(question).await,
            AssistantIntent::ColumnCompleteness => {
                self.with_mentioned_table(question, |snapshot, question| {
                    Self::answer_column_completeness(snapshot, question)
                })
                .await
            }
            AssistantIntent::PrimaryKey => {
                self.with_mentioned_table(question, |snapshot, _| {
                    Self::answer_primary_key(snapshot)
                })
                .await
            }
            AssistantIntent::Freshness => {
                self.with_mentioned_table(question, |snapshot, _| Self::answer_freshness(snapshot))
                    .await
            }
            AssistantIntent::ExplainTable => {
                self.with_mentioned_table(question, |snapshot, _| Self::answer_explain(snapshot))
                    .await
            }
            AssistantIntent::Relationships => self.answer_relationships(question).await,
        }
    }

    async fn with_mentioned_table<F>(
        &self,
        question: &Question,
        render: F,
    ) -> Result<String, AssistantDomainError>
    where
        F: FnOnce(&CatalogTableSnapshot, &Question) -> String + Send,
    {
        let tables = self.catalog.list_tables().await?;
        if tables.is_empty() {
            return Ok(EMPTY_CATALOG.to_string());
        }

        let Some(table_name) = question.mentioned_among(&tables) else {
            return Ok(Self::mention_a_table(&tables));
        };

        let snapshot = self.catalog.table_snapshot(table_name).await?;
        Ok(render(&snapshot, question))
    }

    async fn all_snapshots(&self) -> Result<Vec<CatalogTableSnapshot>, AssistantDomainError> {
        let mut snapshots = Vec::new();
        for table_name in self.catalog.list_tables().await? {
            snapshots.push(self.catalog.table_snapshot(&table_name).await?);
        }
        Ok(snapshots)
    }

    fn mention_a_table(tables: &[String]) -> String {
        format!("Please mention a valid table ({}).", tables.join(", "))
    }

    fn missing_quality_report(table_name: &str) -> String {
        format!("There is no quality report for **{table_name}** yet. Run a quality analysis first.")
    }

    fn answer_sql_suggestion(question: &Question) -> String {
        if question.contains("revenue") {
            format!(
                "Here is a suggested SQL query for monthly revenue:\n```sql\n{MONTHLY_REVENUE_SQL}\n```"
            )
        } else if question.contains("top") {
            format!(
                "Here is a suggested SQL query for top customers:\n```sql\n{TOP_CUSTOMERS_SQL}\n```"
            )
        } else {
            "Ask specifically: 'monthly revenue' or 'top customers'.".to_string()
        }
    }

    async fn answer_list_tables(&self) -> Result<String, AssistantDomainError> {
        let tables = self.catalog.list_tables().await?;
        if tables.is_empty() {
            return Ok(EMPTY_CATALOG.to_string());
        }

        let mut answer = String::from("Tables in the catalog:\n");
        for table_name in &tables {
            answer.push_str(&format!("- **{table_name}**\n"));
        }
        Ok(answer.trim_end().to_string())
    }

    async fn answer_explain_like_five(&self) -> Result<String, AssistantDomainError> {
        let snapshots = self.all_snapshots().await?;
        if snapshots.is_empty() {
            return Ok(EMPTY_CATALOG.to_string());
        }

        let mut answer = String::from("Think of your database like a big notebook:\n");
        for snapshot in &snapshots {
            let line = match &snapshot.quality {
                Some(quality) => format!(
                    "- **{}** is a page with {} lines, and each line notes {} things\n",
                    snapshot.metadata.table_name,
                    quality.total_rows,
                    snapshot.metadata.columns.len()
                ),
                None => format!(
                    "- **{}** is a page where each line notes {} things\n",
                    snapshot.metadata.table_name,
                    snapshot.metadata.columns.len()
                ),
            };
            answer.push_str(&line);
        }
        Ok(answer.trim_end().to_string())
    }

    async fn answer_quality_summary(&self) -> Result<String, AssistantDomainError> {
        let snapshots = self.all_snapshots().await?;
        if snapshots.is_empty() {
            return Ok(EMPTY_CATALOG.to_string());
        }

        let mut answer = String::from("**Latest Data Quality Summary:**\n\n");
        for snapshot in &snapshots {
            let table_name = &snapshot.metadata.table_name;
            let Some(quality) = &snapshot.quality else {
                answer.push_str(&format!("**{table_name}**: not analyzed yet\n"));
                continue;
            };

            let mut line = format!("**{table_name}**: {} rows", quality.total_rows);
            if let Some((column, completeness)) = quality.least_complete_column() {
                line.push_str(&format!(
                    " | Worst column: `{column}` ({:.2}% complete)",
                    completeness.completeness_percent
                ));
            }
            if quality.duplicate_primary_keys > 0 {
                line.push_str(&format!(
                    " | {} duplicated primary key values",
                    quality.duplicate_primary_keys
                ));
            }
            answer.push_str(&line);
            answer.push('\n');
        }
        Ok(answer.trim_end().to_string())
    }

    async fn answer_missing_values(&self, question: &Question) -> Result<String, AssistantDomainError> {
        let tables = self.catalog.list_tables().await?;
        if tables.is_empty() {
            return Ok(EMPTY_CATALOG.to_string());
        }

        let targets: Vec<String> = match question.mentioned_among(&tables) {
            Some(table_name) => vec![table_name.to_string()],
            None => tables.clone(),
        };

        let mut answer = String::new();
        for table_name in &targets {
            let snapshot = self.catalog.table_snapshot(table_name).await?;
            answer.push_str(&Self::missing_values_for(&snapshot));
            answer.push('\n');
        }
        Ok(answer.trim_end().to_string())
    }

    fn missing_values_for(snapshot: &CatalogTableSnapshot) -> String {
        let table_name = &snapshot.metadata.table_name;
        let Some(quality) = &snapshot.quality else {
            return Self::missing_quality_report(table_name);
        };

        let incomplete = quality.incomplete_columns();
        if incomplete.is_empty() {
            return format!("Every column in **{table_name}** is fully populated.");
        }

        let mut answer = format!("Columns with missing values in **{table_name}**:\n");
        for (column, completeness) in incomplete {
            let missing = quality.total_rows.saturating_sub(completeness.non_null_count);
            answer.push_str(&format!(
                "- `{column}`: {missing} missing ({:.2}% complete)\n",
                completeness.completeness_percent
            ));
        }
        answer.trim_end().to_string()
    }

    fn answer_column_completeness(snapshot: &CatalogTableSnapshot, question: &Question) -> String {
        let table_name = &snapshot.metadata.table_name;
        let Some(column) = snapshot
            .metadata
            .columns
            .iter()
            .find(|column| question.mentions(&column.column_name))
        else {
            let columns: Vec<&str> = snapshot
                .metadata
                .columns
                .iter()
                .map(|column| column.column_name.as_str())
                .collect();
            return format!(
                "Which column of **{table_name}**? Available columns: {}.",
                columns.join(", ")
            );
        };

        let Some(quality) = &snapshot.quality else {
            return Self::missing_quality_report(table_name);
        };

        match quality.column_completeness.get(&column.column_name) {
            Some(completeness) => format!(
                "**{} Completeness in {table_name}**\n\n- Total rows: {}\n- Missing values: {}\n- Completeness: **{:.2}%**",
                column.column_name,
                quality.total_rows,
                quality.total_rows.saturating_sub(completeness.non_null_count),
                completeness.completeness_percent
            ),
            None => format!(
                "The quality report for **{table_name}** predates the `{}` column. Run a quality analysis again.",
                column.column_name
            ),
        }
    }

    fn answer_primary_key(snapshot: &CatalogTableSnapshot) -> String {
        let metadata = &snapshot.metadata;
        match metadata.primary_keys.as_slice() {
            [] => format!("**{}** has no declared primary key.", metadata.table_name),
            [key] => format!(
                "**Primary Key of {}**\n\n- Each row is uniquely identified by **{key}**.",
                metadata.table_name
            ),
            keys => format!(
                "**Primary Key of {}**\n\n- Rows are uniquely identified by the combination of {}.",
                metadata.table_name,
                keys.iter()
                    .map(|key| format!("**{key}**"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    fn answer_freshness(snapshot: &CatalogTableSnapshot) -> String {
        let table_name = &snapshot.metadata.table_name;
        let Some(quality) = &snapshot.quality else {
            return Self::missing_quality_report(table_name);
        };

        match (&quality.freshness_column, &quality.last_updated) {
            (None, _) => format!("**{table_name}** has no date-like column to measure freshness."),
            (Some(column), None) | (Some(column), Some(Value::Null)) => {
                format!("**{table_name}** has no values in `{column}` yet.")
            }
            (Some(column), Some(value)) => format!(
                "**{table_name}** was last updated at **{}** (latest `{column}`).",
                Self::display_value(value)
            ),
        }
    }

    fn answer_explain(snapshot: &CatalogTableSnapshot) -> String {
        if let Some(documentation) = &snapshot.documentation {
            return documentation.clone();
        }

        let metadata = &snapshot.metadata;
        let mut answer = format!("## Table: {}\n\n### Columns\n", metadata.table_name.to_uppercase());
        for column in &metadata.columns {
            let mut traits = vec![if column.data_type.is_empty() {
                "untyped".to_string()
            } else {
                column.data_type.clone()
            }];
            if metadata.is_primary_key(&column.column_name) {
                traits.push("primary key".to_string());
            }
            if column.not_null {
                traits.push("required".to_string());
            }
            answer.push_str(&format!("- `{}` ({})\n", column.column_name, traits.join(", ")));
        }

        if let Some(quality) = &snapshot.quality {
            answer.push_str(&format!("\n### Quality\n- Rows: {}\n", quality.total_rows));
            if let Some((column, completeness)) = quality.least_complete_column() {
                answer.push_str(&format!(
                    "- Least complete column: `{column}` ({:.2}%)\n",
                    completeness.completeness_percent
                ));
            }
            if quality.duplicate_primary_keys > 0 {
                answer.push_str(&format!(
                    "- Duplicated primary key values: {}\n",
                    quality.duplicate_primary_keys
                ));
            }
        }
        answer.trim_end().to_string()
    }

    async fn answer_relationships(&self, question: &Question) -> Result<String, AssistantDomainError> {
        let tables = self.catalog.list_tables().await?;
        if tables.is_empty() {
            return Ok(EMPTY_CATALOG.to_string());
        }
        let Some(table_name) = question.mentioned_among(&tables) else {
            return Ok("Mention a table to see its relationships.".to_string());
        };

        let snapshots = self.all_snapshots().await?;
        let Some(target) = snapshots
            .iter()
            .find(|snapshot| snapshot.metadata.table_name == table_name)
        else {
            return Err(AssistantDomainError::TableNotInCatalog(table_name.to_string()));
        };

        let related = related_tables(target, &snapshots);
        if related.is_empty() {
            return Ok(format!("No tables share a key with **{table_name}**."));
        }
        Ok(format!(
            "Tables related to **{table_name}**: {}",
            related.join(", ")
        ))
    }

    fn display_value(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

// Related in either direction: one table carries the other's primary key as a column.
pub fn related_tables(target: &CatalogTableSnapshot, snapshots: &[CatalogTableSnapshot]) -> Vec<String> {
    let target_metadata = &target.metadata;
    snapshots
        .iter()
        .map(|snapshot| &snapshot.metadata)
        .filter(|other| other.table_name != target_metadata.table_name)
        .filter(|other| {
            let references_target = target_metadata
                .first_primary_key()
                .is_some_and(|key| other.has_column(key));
            let referenced_by_target = other
                .first_primary_key()
                .is_some_and(|key| target_metadata.has_column(key));
            references_target || referenced_by_target
        })
        .map(|other| other.table_name.clone())
        .collect()
}

#[async_trait]
impl AssistantAnswerService for AssistantAnswerServiceImpl {
    async fn handle_ask(
        &self,
        state: &mut ConversationState,
        command: AskQuestionCommand,
    ) -> Result<String, AssistantDomainError> {
        let question = command.question();
        let intent = resolve_intent(&self.rules, question);
        debug!(?intent, question = question.original(), "resolved intent");

        if intent == AssistantIntent::Reset {
            state.reset();
            return Ok(GREETING.to_string());
        }

        let answer = self.answer(intent, question).await?;
        state.push_user(question.original());
        state.push_assistant(answer.clone());
        Ok(answer)
    }
}
