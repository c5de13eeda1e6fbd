//! Process generation from estimate line items.
//!
//! Each valid work item becomes one draft task: a category inferred from the
//! item name, a duration derived from the amount, and provisional dates
//! chained in item order. The chained dates are a display convenience only;
//! they ignore dependencies and are replaced by the critical path pass.

mod category;

use chrono::{Days, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ScheduleConfig};
use crate::models::{Task, WorkItem, MAX_DURATION_DAYS};

pub use category::infer_category;

/// A work item that was skipped or adjusted during generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationWarning {
    #[error("work item {item_id:?} skipped: name is empty")]
    EmptyName { item_id: String },
    #[error("work item {item_id:?} ({name}) skipped: invalid amount {amount}")]
    InvalidAmount {
        item_id: String,
        name: String,
        amount: f64,
    },
    #[error("work item {item_id:?} ({name}) amount {amount} exceeds {max} days of work; capped", max = MAX_DURATION_DAYS)]
    DurationCapped {
        item_id: String,
        name: String,
        amount: f64,
    },
}

/// Draft tasks plus warnings about skipped or capped items.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    pub tasks: Vec<Task>,
    pub warnings: Vec<GenerationWarning>,
}

/// Whole days of work for an amount: `max(1, ceil(amount / amount_per_day))`,
/// capped at [`MAX_DURATION_DAYS`].
pub fn duration_for_amount(amount: f64, amount_per_day: f64) -> i64 {
    ((amount / amount_per_day).ceil() as i64).clamp(1, MAX_DURATION_DAYS)
}

fn check_item(item: &WorkItem) -> Result<&str, GenerationWarning> {
    let name = item.name.trim();
    if name.is_empty() {
        return Err(GenerationWarning::EmptyName {
            item_id: item.id.clone(),
        });
    }
    if !item.amount.is_finite() || item.amount < 0.0 {
        return Err(GenerationWarning::InvalidAmount {
            item_id: item.id.clone(),
            name: name.to_string(),
            amount: item.amount,
        });
    }
    Ok(name)
}

/// Convert work items into draft tasks, collecting skipped-item warnings.
///
/// # Arguments
/// * `items` - Estimate line items, in display order
/// * `project_start` - Start date of the first generated task
/// * `config` - Generation settings (`amount_per_day`)
///
/// # Returns
/// * `Err(ConfigError)` if `config` is invalid; bad items never fail the run
pub fn generate_with_warnings(
    items: &[WorkItem],
    project_start: NaiveDate,
    config: &ScheduleConfig,
) -> Result<GenerationOutcome, ConfigError> {
    config.validate()?;

    let mut outcome = GenerationOutcome {
        tasks: Vec::with_capacity(items.len()),
        warnings: Vec::new(),
    };
    let mut cursor = project_start;

    for item in items {
        let name = match check_item(item) {
            Ok(name) => name,
            Err(warning) => {
                warn!("{warning}");
                outcome.warnings.push(warning);
                continue;
            }
        };

        let category = infer_category(name);
        let duration_days = duration_for_amount(item.amount, config.amount_per_day);
        if item.amount / config.amount_per_day > MAX_DURATION_DAYS as f64 {
            let warning = GenerationWarning::DurationCapped {
                item_id: item.id.clone(),
                name: name.to_string(),
                amount: item.amount,
            };
            warn!("{warning}");
            outcome.warnings.push(warning);
        }
        let start_date = cursor;
        let end_date = start_date
            .checked_add_days(Days::new(duration_days as u64))
            .unwrap_or(NaiveDate::MAX);
        cursor = end_date;

        debug!(
            item_id = %item.id,
            %category,
            duration_days,
            "generated process {name:?}"
        );

        outcome.tasks.push(Task {
            id: format!("process-{}", outcome.tasks.len() + 1),
            name: name.to_string(),
            description: item.description.clone(),
            source_item_id: Some(item.id.clone()),
            category,
            duration_days,
            dependencies: Vec::new(),
            progress: 0,
            start_date,
            end_date,
            timing: None,
        });
    }

    info!(
        generated = outcome.tasks.len(),
        skipped = outcome.warnings.len(),
        "process generation finished"
    );
    Ok(outcome)
}

/// Convert work items into draft tasks with the default configuration.
///
/// Invalid items are skipped and logged.
pub fn generate(items: &[WorkItem], project_start: NaiveDate) -> Vec<Task> {
    // The default configuration always validates
    generate_with_warnings(items, project_start, &ScheduleConfig::default())
        .map(|outcome| outcome.tasks)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn item(id: &str, name: &str, amount: f64) -> WorkItem {
        WorkItem {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            amount,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_rounds_up() {
        assert_eq!(duration_for_amount(100_000.0, 100_000.0), 1);
        assert_eq!(duration_for_amount(100_001.0, 100_000.0), 2);
        assert_eq!(duration_for_amount(300_000.0, 100_000.0), 3);
        assert_eq!(duration_for_amount(0.0, 100_000.0), 1);
        assert_eq!(duration_for_amount(1.0, 100_000.0), 1);
    }

    #[test]
    fn test_worked_example() {
        let items = vec![
            item("e1", "現場調査", 100_000.0),
            item("e2", "設計", 300_000.0),
            item("e3", "植栽", 500_000.0),
        ];
        let tasks = generate(&items, date(2025, 4, 1));

        let categories: Vec<Category> = tasks.iter().map(|t| t.category).collect();
        assert_eq!(
            categories,
            vec![Category::Preparation, Category::Design, Category::Planting]
        );
        let durations: Vec<i64> = tasks.iter().map(|t| t.duration_days).collect();
        assert_eq!(durations, vec![1, 3, 5]);

        assert!(tasks.iter().all(|t| t.progress == 0));
        assert!(tasks.iter().all(|t| t.dependencies.is_empty()));
        assert!(tasks.iter().all(|t| t.timing.is_none()));
        assert_eq!(tasks[0].id, "process-1");
        assert_eq!(tasks[2].source_item_id.as_deref(), Some("e3"));
    }

    #[test]
    fn test_dates_chain_sequentially() {
        let items = vec![
            item("e1", "現場調査", 100_000.0),
            item("e2", "設計", 300_000.0),
            item("e3", "植栽", 500_000.0),
        ];
        let tasks = generate(&items, date(2025, 4, 1));

        assert_eq!(tasks[0].start_date, date(2025, 4, 1));
        assert_eq!(tasks[0].end_date, date(2025, 4, 2));
        assert_eq!(tasks[1].start_date, date(2025, 4, 2));
        assert_eq!(tasks[1].end_date, date(2025, 4, 5));
        assert_eq!(tasks[2].start_date, date(2025, 4, 5));
        assert_eq!(tasks[2].end_date, date(2025, 4, 10));
    }

    #[test]
    fn test_invalid_items_are_skipped() {
        let items = vec![
            item("e1", "現場調査", 100_000.0),
            item("e2", "   ", 200_000.0),
            item("e3", "設計", f64::NAN),
            item("e4", "芝張り", -1.0),
            item("e5", "植栽", 500_000.0),
        ];
        let outcome =
            generate_with_warnings(&items, date(2025, 4, 1), &ScheduleConfig::default()).unwrap();

        let names: Vec<&str> = outcome.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["現場調査", "植栽"]);
        // Skipped items don't consume an id or a slot in the date chain
        assert_eq!(outcome.tasks[1].id, "process-2");
        assert_eq!(outcome.tasks[1].start_date, date(2025, 4, 2));

        assert_eq!(outcome.warnings.len(), 3);
        assert_eq!(
            outcome.warnings[0],
            GenerationWarning::EmptyName {
                item_id: "e2".to_string()
            }
        );
        assert!(matches!(
            &outcome.warnings[2],
            GenerationWarning::InvalidAmount { item_id, .. } if item_id == "e4"
        ));
    }

    #[test]
    fn test_huge_amount_is_capped() {
        let items = vec![item("e1", "現場調査", 1e300), item("e2", "植栽", 1e300)];
        let outcome =
            generate_with_warnings(&items, date(2025, 4, 1), &ScheduleConfig::default()).unwrap();

        assert_eq!(duration_for_amount(1e300, 100_000.0), MAX_DURATION_DAYS);
        assert!(outcome
            .tasks
            .iter()
            .all(|t| t.duration_days == MAX_DURATION_DAYS));
        assert_eq!(outcome.warnings.len(), 2);
        assert!(matches!(
            &outcome.warnings[0],
            GenerationWarning::DurationCapped { item_id, .. } if item_id == "e1"
        ));
    }

    #[test]
    fn test_custom_amount_per_day() {
        let config = ScheduleConfig {
            amount_per_day: 50_000.0,
            ..Default::default()
        };
        let outcome =
            generate_with_warnings(&[item("e1", "剪定", 120_000.0)], date(2025, 1, 1), &config)
                .unwrap();
        assert_eq!(outcome.tasks[0].duration_days, 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ScheduleConfig {
            amount_per_day: 0.0,
            ..Default::default()
        };
        let result = generate_with_warnings(&[], date(2025, 1, 1), &config);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidAmountPerDay(0.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(generate(&[], date(2025, 1, 1)).is_empty());
    }
}
