//! Plain-text rendering of the dashboard screens.

use products_hr::{
    EditDraft, EditMode, EmployeeView, Field, ScoreBadge, Screen, ViewQuery, two_decimals,
};

const NAME_WIDTH: usize = 24;
const METRIC_WIDTH: usize = 10;
const SCORE_WIDTH: usize = 16;

pub fn screen(screen: &Screen<'_>, query: &ViewQuery) -> String {
    match screen {
        Screen::Loading => "Loading...".to_string(),
        Screen::Failed(message) => format!("Error: {message}"),
        Screen::List(view) => list(view, query),
    }
}

fn list(view: &EmployeeView<'_>, query: &ViewQuery) -> String {
    let mut lines = vec![title(query)];
    lines.push(format!(
        "Total Records: {}   Average Score: {}   Median Score: {}",
        view.total_records,
        two_decimals(view.average_score),
        two_decimals(view.median_score)
    ));
    lines.push(String::new());
    lines.push(format!(
        "{:>3}  {:<name$}  {:>metric$}  {:>metric$}  {:>metric$}  {:>score$}",
        "#",
        "Employee Name",
        "Metric 1",
        "Metric 2",
        "Metric 3",
        "Score",
        name = NAME_WIDTH,
        metric = METRIC_WIDTH,
        score = SCORE_WIDTH,
    ));
    for (index, employee) in view.rows.iter().enumerate() {
        let metrics = &employee.performance_metrics;
        lines.push(format!(
            "{:>3}  {:<name$}  {:>metric$}  {:>metric$}  {:>metric$}  {:>score$}",
            index + 1,
            ellipsize(&employee.name, NAME_WIDTH),
            ellipsize(&metrics.metric1.to_string(), METRIC_WIDTH),
            ellipsize(&metrics.metric2.to_string(), METRIC_WIDTH),
            ellipsize(&metrics.metric3.to_string(), METRIC_WIDTH),
            ScoreBadge::for_score(employee.performance_score).to_string(),
            name = NAME_WIDTH,
            metric = METRIC_WIDTH,
            score = SCORE_WIDTH,
        ));
    }
    if view.rows.is_empty() {
        lines.push("  (no employees)".to_string());
    }
    lines.join("\n")
}

fn title(query: &ViewQuery) -> String {
    let mut title = "EmployeeAce".to_string();
    if !query.search.is_empty() {
        title.push_str(&format!(" | search {:?}", query.search));
    }
    if let Some(key) = query.sort.key {
        title.push_str(&format!(
            " | sorted by {} ({})",
            key.as_str(),
            query.sort.direction.as_str()
        ));
    }
    title
}

pub fn form(draft: &EditDraft) -> String {
    let heading = match draft.mode() {
        EditMode::Create => "Create New Employee".to_string(),
        EditMode::Edit(id) => format!("Edit Employee {id} (name changes are not sent)"),
    };
    let fields = [
        (Field::Name, &draft.name),
        (Field::Metric1, &draft.metric1),
        (Field::Metric2, &draft.metric2),
        (Field::Metric3, &draft.metric3),
    ];
    let mut lines = vec![heading];
    for (field, value) in fields {
        lines.push(format!("  {:<8} {}", field.as_str(), value));
    }
    lines.push("Use `set <field> <value>`, then `save` or `cancel`.".to_string());
    lines.join("\n")
}

pub fn delete_prompt(name: Option<&str>) -> String {
    let target = name.map_or_else(|| "this employee".to_string(), |name| format!("{name:?}"));
    format!(
        "Confirm Deletion\nAre you sure you want to delete {target}? This action cannot be undone.\nType `confirm` to delete or `cancel` to keep it."
    )
}

fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
