use std::sync::{
    mpsc,
    Arc,
};

use tokio::runtime::Runtime;

use super::{
    CancelToken,
    TaskRequest,
    TaskResult,
};
use crate::{
    api::PreferenceApi,
    core::PrefError,
};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs backend calls on a shared tokio runtime and hands results back over a
/// channel the UI polls once per frame.
///
/// Every manager owns a cancel token. Dropping the manager cancels it, so
/// calls still in flight never deliver their results.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    api: Arc<dyn PreferenceApi>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    cancel: CancelToken,
    waker: Option<Waker>,
}

impl TaskManager {
    pub fn new(api: Arc<dyn PreferenceApi>) -> Result<Self, PrefError> {
        let runtime = Arc::new(Runtime::new()?);
        Ok(Self::with_runtime(runtime, api))
    }

    fn with_runtime(runtime: Arc<Runtime>, api: Arc<dyn PreferenceApi>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { runtime, api, receiver, sender, cancel: CancelToken::new(), waker: None }
    }

    /// A manager sharing this runtime and backend with its own channel and
    /// cancel token, for a component with a shorter lifetime.
    pub fn scoped(&self) -> Self {
        let mut scoped = Self::with_runtime(self.runtime.clone(), self.api.clone());
        scoped.waker = self.waker.clone();
        scoped
    }

    /// Called after each delivered result, e.g. to request a repaint.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn dispatch(&self, request: TaskRequest) {
        if self.cancel.is_cancelled() {
            tracing::debug!(task = request.task_type(), "Dropping request after cancel");
            return;
        }

        let sender = self.sender.clone();
        let api = self.api.clone();
        let cancel = self.cancel.clone();
        let waker = self.waker.clone();

        tracing::debug!(task = request.task_type(), "Dispatching");

        self.runtime.spawn(async move {
            let result = run(api.as_ref(), request).await;

            if cancel.is_cancelled() {
                tracing::debug!(task = result.task_type(), "Discarding result of cancelled task");
                return;
            }
            if !result.is_ok() {
                tracing::warn!(task = result.task_type(), "Task failed: {:?}", result);
            }

            let _ = sender.send(result);
            if let Some(waker) = waker {
                waker();
            }
        });
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(api: &dyn PreferenceApi, request: TaskRequest) -> TaskResult {
    match request {
        TaskRequest::CustodianOrg => {
            TaskResult::CustodianOrg(api.custodian_org_id().await.map_err(|e| e.to_string()))
        }
        TaskRequest::ChannelFrameworks { org_id } => TaskResult::ChannelFrameworks(
            api.channel_frameworks(&org_id).await.map_err(|e| e.to_string()),
        ),
        TaskRequest::FrameworkCategories { seq, framework_id } => TaskResult::FrameworkCategories {
            seq,
            result: api.framework_categories(&framework_id).await.map_err(|e| e.to_string()),
        },
        TaskRequest::UpdateUser(request) => {
            let result = api.update_user(&request).await.map_err(|e| e.to_string());
            TaskResult::UserUpdated { request, result }
        }
        TaskRequest::ReadUser => {
            TaskResult::UserRead(api.read_user().await.map_err(|e| e.to_string()))
        }
    }
}
