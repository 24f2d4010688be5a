//! List view controller: owns the loaded list, the view query and both dialogs,
//! and sequences every mutation before a full refresh.

use platform_api::ApiResult;
use thiserror::Error;
use tracing::{error, info};

use crate::client::{EmployeeClient, Transport};
use crate::form::{DeleteGuard, EditForm, FormError, Submission};
use crate::model::{Employee, EmployeeId};
use crate::pipeline::{EmployeeView, SortKey, ViewQuery, compute_view};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Vec<Employee>),
    Failed(String),
}

/// What the list view should show right now.
#[derive(Debug)]
pub enum Screen<'a> {
    Loading,
    Failed(&'a str),
    List(EmployeeView<'a>),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no loaded employee has id {0}")]
    UnknownEmployee(EmployeeId),
    #[error("no deletion is awaiting confirmation")]
    NothingToConfirm,
    #[error(transparent)]
    Form(#[from] FormError),
}

pub struct Dashboard<T> {
    client: EmployeeClient<T>,
    load: LoadState,
    query: ViewQuery,
    editor: EditForm,
    deletion: DeleteGuard,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(client: EmployeeClient<T>) -> Self {
        Self {
            client,
            load: LoadState::default(),
            query: ViewQuery::default(),
            editor: EditForm::default(),
            deletion: DeleteGuard::default(),
        }
    }

    pub fn client(&self) -> &EmployeeClient<T> {
        &self.client
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn editor(&self) -> &EditForm {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditForm {
        &mut self.editor
    }

    pub fn deletion(&self) -> &DeleteGuard {
        &self.deletion
    }

    /// Replace the list with the server's current state.
    pub async fn refresh(&mut self) {
        self.load = match self.client.fetch_all().await {
            Ok(employees) => LoadState::Ready(employees),
            Err(err) => {
                error!(error = %err, "failed to load employees");
                LoadState::Failed(err.to_string())
            }
        };
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.load {
            LoadState::Loading => Screen::Loading,
            LoadState::Failed(message) => Screen::Failed(message),
            LoadState::Ready(employees) => Screen::List(compute_view(employees, &self.query)),
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.query.sort.toggle(key);
    }

    /// Id of the employee at a 1-based row of the current view.
    pub fn row_id(&self, row: usize) -> Option<EmployeeId> {
        match self.screen() {
            Screen::List(view) => row
                .checked_sub(1)
                .and_then(|index| view.rows.get(index))
                .map(|employee| employee.id.clone()),
            Screen::Loading | Screen::Failed(_) => None,
        }
    }

    pub fn open_create(&mut self) {
        self.editor.open_create();
    }

    pub async fn open_edit(&mut self, id: &EmployeeId) -> Result<(), DashboardError> {
        let employee = self
            .client
            .cached(id)
            .await
            .ok_or_else(|| DashboardError::UnknownEmployee(id.clone()))?;
        self.editor.open_edit(&employee);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Submit the form. Once the draft validates, the form closes and the list
    /// is refetched whether the mutation succeeded or not; the outcome is only
    /// handed back for display.
    pub async fn save(&mut self) -> Result<ApiResult<Employee>, DashboardError> {
        let submission = self.editor.submit()?;
        let outcome = match submission {
            Submission::Create { name, metrics } => self.client.create(&name, metrics).await,
            Submission::Update { id, metrics } => self.client.update(&id, metrics).await,
        };
        match &outcome {
            Ok(employee) => info!(id = %employee.id, "employee saved"),
            Err(err) => error!(error = %err, "error saving employee data"),
        }
        self.refresh().await;
        Ok(outcome)
    }

    pub fn request_delete(&mut self, id: EmployeeId) {
        self.deletion.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    /// Run the pending deletion, then refetch regardless of its outcome.
    pub async fn confirm_delete(&mut self) -> Result<ApiResult<bool>, DashboardError> {
        let id = self
            .deletion
            .confirm()
            .ok_or(DashboardError::NothingToConfirm)?;
        let outcome = self.client.delete(&id).await;
        match &outcome {
            Ok(deleted) => info!(id = %id, deleted, "employee delete settled"),
            Err(err) => error!(id = %id, error = %err, "failed to delete employee"),
        }
        self.refresh().await;
        Ok(outcome)
    }
}
