//! Interactive admin console
//!
//! Browses the cached list page by page, opens records in a detail view
//! and applies status, memo and delete actions. Failures are printed
//! inline and the loop carries on with the previous cache.

use std::fmt;

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};
use leasedesk_core::{Inquiry, InquiryStatus, StatusFilter};

use super::ServerArgs;
use crate::console::{render, Applied, Console, ConsoleError, HttpClient};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Open,
    NextPage,
    PrevPage,
    Filter,
    Refresh,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "Open an inquiry",
            Self::NextPage => "Next page",
            Self::PrevPage => "Previous page",
            Self::Filter => "Filter by status",
            Self::Refresh => "Refresh",
            Self::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailAction {
    ChangeStatus,
    EditMemo,
    Delete,
    Back,
}

impl fmt::Display for DetailAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ChangeStatus => "Change status",
            Self::EditMemo => "Edit memo",
            Self::Delete => "Delete",
            Self::Back => "Back to list",
        })
    }
}

/// Row label in the inquiry picker
struct Pick<'a>(&'a Inquiry);

impl fmt::Display for Pick<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} [{}]",
            self.0.id,
            self.0.name,
            self.0.phone(),
            self.0.status.label()
        )
    }
}

struct FilterChoice(StatusFilter);

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::title(self.0))
    }
}

struct StatusChoice(InquiryStatus);

impl fmt::Display for StatusChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

/// `Ok(None)` when the operator backs out with Esc or Ctrl+C
fn optional<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn report<T>(result: Result<T, ConsoleError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "console action failed");
            eprintln!("✗ {err}");
            None
        }
    }
}

/// Confirm a committed write; a failed reload is shown as a list error.
fn announce(applied: Applied) {
    println!("✓ {}", applied.message);
    if let Some(err) = applied.reload_error {
        eprintln!("✗ Failed to reload inquiries: {err}");
    }
}

fn actions(console: &Console<HttpClient>) -> Vec<Action> {
    let state = console.state();
    let mut actions = Vec::new();
    if state.total() > 0 {
        actions.push(Action::Open);
    }
    if state.page() < state.total_pages() {
        actions.push(Action::NextPage);
    }
    if state.page() > 1 {
        actions.push(Action::PrevPage);
    }
    actions.extend([Action::Filter, Action::Refresh, Action::Quit]);
    actions
}

pub async fn run_console(server: &ServerArgs) -> Result<()> {
    let mut console = Console::new(server.client());
    report(ui::while_loading("Loading inquiries...", console.load(StatusFilter::All)).await);

    loop {
        print!("{}", render::list(console.state()));

        let Some(action) = optional(Select::new("Action:", actions(&console)).prompt())? else {
            break;
        };

        match action {
            Action::Open => {
                let rows: Vec<Pick> = console.state().current_page().iter().map(Pick).collect();
                let picked = optional(Select::new("Inquiry:", rows).prompt())?.map(|p| p.0.id);
                if let Some(id) = picked {
                    detail_loop(&mut console, id).await?;
                }
            }
            Action::NextPage => {
                console.state_mut().next_page();
            }
            Action::PrevPage => {
                console.state_mut().prev_page();
            }
            Action::Filter => {
                let choices: Vec<FilterChoice> = std::iter::once(StatusFilter::All)
                    .chain(InquiryStatus::ALL.map(StatusFilter::Only))
                    .map(FilterChoice)
                    .collect();
                if let Some(FilterChoice(filter)) =
                    optional(Select::new("Show:", choices).prompt())?
                {
                    report(ui::while_loading("Loading inquiries...", console.load(filter)).await);
                }
            }
            Action::Refresh => {
                report(ui::while_loading("Loading inquiries...", console.refresh()).await);
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

async fn detail_loop(console: &mut Console<HttpClient>, id: i64) -> Result<()> {
    if console.state_mut().open_detail(id).is_none() {
        report::<()>(Err(ConsoleError::NotLoaded(id)));
        return Ok(());
    }

    while let Some(inquiry) = console.state().detail() {
        print!("{}", render::detail(inquiry));

        let choices = vec![
            DetailAction::ChangeStatus,
            DetailAction::EditMemo,
            DetailAction::Delete,
            DetailAction::Back,
        ];
        let action = optional(Select::new("Action:", choices).prompt())?;

        match action {
            Some(DetailAction::ChangeStatus) => {
                let choices = Vec::from(InquiryStatus::ALL.map(StatusChoice));
                if let Some(StatusChoice(status)) =
                    optional(Select::new("New status:", choices).prompt())?
                {
                    if let Some(applied) = report(console.change_status(id, status).await) {
                        announce(applied);
                    }
                }
            }
            Some(DetailAction::EditMemo) => edit_memo(console, id).await?,
            Some(DetailAction::Delete) => {
                let confirmed = optional(
                    Confirm::new(&format!("Delete inquiry #{id}? This cannot be undone."))
                        .with_default(false)
                        .prompt(),
                )?;
                if confirmed == Some(true) {
                    if let Some(applied) = report(console.delete(id).await) {
                        announce(applied);
                        // A stale cache may still hold the deleted row
                        console.state_mut().close_detail();
                    }
                }
            }
            Some(DetailAction::Back) | None => console.state_mut().close_detail(),
        }
    }

    Ok(())
}

async fn edit_memo(console: &mut Console<HttpClient>, id: i64) -> Result<()> {
    let Some(draft) = console.state_mut().begin_memo_edit(id) else {
        return Ok(());
    };
    let initial = draft.text.clone();

    match optional(Text::new("Memo:").with_initial_value(&initial).prompt())? {
        Some(text) => {
            console.state_mut().edit_memo(id, text);
            // A rejected save leaves the draft open for the next edit
            if report(console.save_memo(id).await).is_some() {
                println!("✓ Memo saved");
            }
        }
        None => {
            console.state_mut().cancel_memo_edit(id);
        }
    }
    Ok(())
}
