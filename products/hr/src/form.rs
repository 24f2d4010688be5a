//! Dialog state machines for the edit form and the delete confirmation.

use thiserror::Error;

use crate::model::{Employee, EmployeeId, MetricValue, MetricsInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Metric1,
    Metric2,
    Metric3,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Metric1 => "metric1",
            Field::Metric2 => "metric2",
            Field::Metric3 => "metric3",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Field::Name),
            "metric1" => Some(Field::Metric1),
            "metric2" => Some(Field::Metric2),
            "metric3" => Some(Field::Metric3),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("the edit form is not open")]
    NotOpen,
    #[error("{} is required", .0.as_str())]
    Required(Field),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(EmployeeId),
}

/// Field values typed into an open form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    mode: EditMode,
    pub name: String,
    pub metric1: String,
    pub metric2: String,
    pub metric3: String,
}

impl EditDraft {
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Metric1 => self.metric1 = value,
            Field::Metric2 => self.metric2 = value,
            Field::Metric3 => self.metric3 = value,
        }
    }

    fn metrics(&self) -> Result<MetricsInput, FormError> {
        let metric = |raw: &str, field: Field| {
            if raw.trim().is_empty() {
                Err(FormError::Required(field))
            } else {
                Ok(MetricValue::parse(raw))
            }
        };
        Ok(MetricsInput {
            metric1: metric(&self.metric1, Field::Metric1)?,
            metric2: metric(&self.metric2, Field::Metric2)?,
            metric3: metric(&self.metric3, Field::Metric3)?,
        })
    }

    fn submission(&self) -> Result<Submission, FormError> {
        match &self.mode {
            EditMode::Create => {
                let name = self.name.trim();
                if name.is_empty() {
                    return Err(FormError::Required(Field::Name));
                }
                Ok(Submission::Create {
                    name: name.to_string(),
                    metrics: self.metrics()?,
                })
            }
            // Update carries no name; edits to it are discarded.
            EditMode::Edit(id) => Ok(Submission::Update {
                id: id.clone(),
                metrics: self.metrics()?,
            }),
        }
    }
}

/// The mutation a successful submit asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create { name: String, metrics: MetricsInput },
    Update { id: EmployeeId, metrics: MetricsInput },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditForm {
    #[default]
    Closed,
    Open(EditDraft),
}

impl EditForm {
    pub fn open_create(&mut self) {
        *self = EditForm::Open(EditDraft {
            mode: EditMode::Create,
            name: String::new(),
            metric1: String::new(),
            metric2: String::new(),
            metric3: String::new(),
        });
    }

    pub fn open_edit(&mut self, employee: &Employee) {
        let metrics = &employee.performance_metrics;
        *self = EditForm::Open(EditDraft {
            mode: EditMode::Edit(employee.id.clone()),
            name: employee.name.clone(),
            metric1: metrics.metric1.to_string(),
            metric2: metrics.metric2.to_string(),
            metric3: metrics.metric3.to_string(),
        });
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditForm::Open(_))
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        match self {
            EditForm::Open(draft) => Some(draft),
            EditForm::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        match self {
            EditForm::Open(draft) => Some(draft),
            EditForm::Closed => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = EditForm::Closed;
    }

    /// Validate and close. An invalid draft keeps the form open and sends nothing.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let draft = self.draft().ok_or(FormError::NotOpen)?;
        let submission = draft.submission()?;
        *self = EditForm::Closed;
        Ok(submission)
    }
}

/// Two-step guard in front of the delete mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeleteGuard {
    #[default]
    Idle,
    Confirming(EmployeeId),
}

impl DeleteGuard {
    pub fn request(&mut self, id: EmployeeId) {
        *self = DeleteGuard::Confirming(id);
    }

    pub fn pending(&self) -> Option<&EmployeeId> {
        match self {
            DeleteGuard::Confirming(id) => Some(id),
            DeleteGuard::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteGuard::Idle;
    }

    /// Leave `Confirming`, handing back the id to delete.
    pub fn confirm(&mut self) -> Option<EmployeeId> {
        match std::mem::take(self) {
            DeleteGuard::Confirming(id) => Some(id),
            DeleteGuard::Idle => None,
        }
    }
}
