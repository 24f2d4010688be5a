//! Interactive line-oriented dashboard.

use anyhow::Result;
use products_hr::{Dashboard, DashboardError, EmployeeId, Field, Screen, SortKey, Transport};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  search <text>         filter by name (empty clears)
  sort <column>         name | metric1 | metric2 | metric3 | score (repeat to reverse)
  new                   open the create form
  edit <row>            open the edit form for a row
  set <field> <value>   name | metric1 | metric2 | metric3
  save | cancel         submit or close the open form
  delete <row>          ask to delete a row
  confirm | cancel      answer a pending delete
  refresh               reload from the server
  quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Sort(SortKey),
    New,
    Edit(usize),
    Set(Field, String),
    Save,
    Cancel,
    Delete(usize),
    Confirm,
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
    let command = match verb.to_ascii_lowercase().as_str() {
        "search" | "find" => ShellCommand::Search(rest.to_string()),
        "sort" => ShellCommand::Sort(rest.parse().map_err(|err| format!("{err}"))?),
        "new" | "create" => ShellCommand::New,
        "edit" => ShellCommand::Edit(parse_row(rest)?),
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(field, value)| (field, value.trim()));
            let field = Field::parse(field).ok_or_else(|| format!("unknown field `{field}`"))?;
            ShellCommand::Set(field, value.to_string())
        }
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "delete" | "rm" => ShellCommand::Delete(parse_row(rest)?),
        "confirm" | "yes" => ShellCommand::Confirm,
        "refresh" | "reload" => ShellCommand::Refresh,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn parse_row(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| format!("expected a row number, got `{raw}`"))
}

pub enum Step {
    Continue(String),
    Quit,
}

fn current_screen<T: Transport>(dashboard: &Dashboard<T>) -> String {
    render::screen(&dashboard.screen(), dashboard.query())
}

fn employee_name<T: Transport>(dashboard: &Dashboard<T>, id: &EmployeeId) -> Option<String> {
    match dashboard.screen() {
        Screen::List(view) => view
            .rows
            .iter()
            .find(|employee| &employee.id == id)
            .map(|employee| employee.name.clone()),
        Screen::Loading | Screen::Failed(_) => None,
    }
}

pub async fn execute<T: Transport>(
    dashboard: &mut Dashboard<T>,
    command: ShellCommand,
) -> Step {
    let output = match command {
        ShellCommand::Search(text) => {
            dashboard.set_search(text);
            current_screen(dashboard)
        }
        ShellCommand::Sort(key) => {
            dashboard.sort_by(key);
            current_screen(dashboard)
        }
        ShellCommand::New => {
            dashboard.open_create();
            open_form(dashboard)
        }
        ShellCommand::Edit(row) => match dashboard.row_id(row) {
            Some(id) => match dashboard.open_edit(&id).await {
                Ok(()) => open_form(dashboard),
                Err(err) => err.to_string(),
            },
            None => format!("no row {row} in the current view"),
        },
        ShellCommand::Set(field, value) => match dashboard.editor_mut().draft_mut() {
            Some(draft) => {
                draft.set(field, value);
                render::form(draft)
            }
            None => "no form is open; use `new` or `edit <row>`".to_string(),
        },
        ShellCommand::Save => match dashboard.save().await {
            Ok(Ok(employee)) => format!("saved {}\n{}", employee.name, current_screen(dashboard)),
            Ok(Err(err)) => format!("save failed: {err}\n{}", current_screen(dashboard)),
            Err(DashboardError::Form(err)) => format!("cannot save: {err}"),
            Err(err) => err.to_string(),
        },
        ShellCommand::Cancel => {
            if dashboard.editor().is_open() {
                dashboard.cancel_edit();
                "form closed".to_string()
            } else if dashboard.deletion().pending().is_some() {
                dashboard.cancel_delete();
                "deletion cancelled".to_string()
            } else {
                "nothing to cancel".to_string()
            }
        }
        ShellCommand::Delete(row) => match dashboard.row_id(row) {
            Some(id) => {
                let name = employee_name(dashboard, &id);
                dashboard.request_delete(id);
                render::delete_prompt(name.as_deref())
            }
            None => format!("no row {row} in the current view"),
        },
        ShellCommand::Confirm => match dashboard.confirm_delete().await {
            Ok(Ok(true)) => format!("deleted\n{}", current_screen(dashboard)),
            Ok(Ok(false)) => format!(
                "the server did not delete the employee\n{}",
                current_screen(dashboard)
            ),
            Ok(Err(err)) => format!("delete failed: {err}\n{}", current_screen(dashboard)),
            Err(err) => err.to_string(),
        },
        ShellCommand::Refresh => {
            dashboard.refresh().await;
            current_screen(dashboard)
        }
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return Step::Quit,
    };
    Step::Continue(output)
}

fn open_form<T: Transport>(dashboard: &Dashboard<T>) -> String {
    dashboard
        .editor()
        .draft()
        .map(render::form)
        .unwrap_or_default()
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<T: Transport>(dashboard: &mut Dashboard<T>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    dashboard.refresh().await;
    write_block(&mut stdout, &current_screen(dashboard)).await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let output = match parse(&line) {
            Ok(Some(command)) => match execute(dashboard, command).await {
                Step::Continue(output) => output,
                Step::Quit => break,
            },
            Ok(None) => continue,
            Err(message) => message,
        };
        write_block(&mut stdout, &output).await?;
    }
    Ok(())
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
