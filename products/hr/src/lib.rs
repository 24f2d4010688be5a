//! HR vertical slice: the employee list pipeline, its dialogs and the GraphQL
//! client they drive.

pub mod client;
pub mod dashboard;
pub mod form;
pub mod model;
pub mod operations;
pub mod pipeline;
pub mod score;

pub use client::{EmployeeClient, EntityCache, HttpTransport, Transport};
pub use dashboard::{Dashboard, DashboardError, LoadState, Screen};
pub use form::{DeleteGuard, EditDraft, EditForm, EditMode, Field, FormError, Submission};
pub use model::{Employee, EmployeeId, MetricValue, MetricsInput, PerformanceMetrics};
pub use pipeline::{
    EmployeeView, SortDirection, SortKey, SortState, ViewQuery, average, compute_view, median,
};
pub use score::{Band, ScoreBadge, classify, two_decimals};
