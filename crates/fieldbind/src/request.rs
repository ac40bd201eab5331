//! Request orchestration
//!
//! Calls the API and binds what comes back: single requests, sequential
//! chains, and form submission.

use crate::form::serialize_form;
use crate::value::Record;
use crate::{BindOptions, BindResult, Binder};
use fieldbind_dom::{AttrSelector, DomTree, NodeId};
use fieldbind_net::{ApiClient, Transport};
use serde_json::Value;
use tracing::{debug, info, warn};

/// What to do with a response after the callback has seen it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Bind the response into the document
    Continue,
    /// Leave the document alone
    Stop,
}

pub type Callback<'a> = Box<dyn FnMut(&Value) -> Flow + 'a>;

/// One API call: endpoint, payload and an optional response hook
pub struct ApiCall<'a> {
    pub endpoint: String,
    pub data: Value,
    pub callback: Option<Callback<'a>>,
}

impl<'a> ApiCall<'a> {
    pub fn new(endpoint: &str, data: Value) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            data,
            callback: None,
        }
    }

    pub fn with_callback(mut self, callback: impl FnMut(&Value) -> Flow + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for ApiCall<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCall")
            .field("endpoint", &self.endpoint)
            .field("data", &self.data)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainFailure {
    pub endpoint: String,
    pub message: String,
}

/// Outcome of [`Binder::init_api`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Endpoints that succeeded, in call order
    pub completed: Vec<String>,
    pub failed: Vec<ChainFailure>,
}

impl ChainReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Hooks around a form submission
#[derive(Default)]
pub struct FormSubmit<'a> {
    /// Rewrites the serialized form; `None` aborts the submission
    pub transform: Option<Box<dyn FnOnce(Record) -> Option<Record> + 'a>>,
    /// Runs after a successful post with the request and response data
    pub on_success: Option<Box<dyn FnOnce(&Record, &Value) + 'a>>,
}

impl<'a> FormSubmit<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(mut self, f: impl FnOnce(Record) -> Option<Record> + 'a) -> Self {
        self.transform = Some(Box::new(f));
        self
    }

    pub fn on_success(mut self, f: impl FnOnce(&Record, &Value) + 'a) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Sent { request: Record, response: Value },
    /// The transform declined to send
    Aborted,
}

impl Binder {
    /// Post one call and bind the response into the whole document
    pub async fn send_request<T: Transport>(
        &self,
        client: &ApiClient<T>,
        tree: &mut DomTree,
        call: ApiCall<'_>,
    ) -> BindResult<Value> {
        let ApiCall {
            endpoint,
            data,
            mut callback,
        } = call;

        let response = client.post(&endpoint, &data).await?;
        let flow = match callback.as_mut() {
            Some(callback) => callback(&response),
            None => Flow::Continue,
        };
        match flow {
            Flow::Continue => self.bind(tree, &response, &BindOptions::default())?,
            Flow::Stop => debug!("{}: callback kept the document as is", endpoint),
        }
        Ok(response)
    }

    /// Run `calls` one after another
    ///
    /// A failed call is recorded and the chain moves on to the next one.
    pub async fn init_api<T: Transport>(
        &self,
        client: &ApiClient<T>,
        tree: &mut DomTree,
        calls: Vec<ApiCall<'_>>,
    ) -> ChainReport {
        let mut report = ChainReport::default();
        for call in calls {
            let endpoint = call.endpoint.clone();
            match self.send_request(client, tree, call).await {
                Ok(_) => report.completed.push(endpoint),
                Err(e) => {
                    warn!("chained request {} failed: {}", endpoint, e);
                    report.failed.push(ChainFailure {
                        endpoint,
                        message: e.user_message(),
                    });
                }
            }
        }
        info!(
            "api chain: {} ok, {} failed",
            report.completed.len(),
            report.failed.len()
        );
        report
    }

    /// Serialize `form`, post it to its `action`, and mirror the submitted
    /// values into every display copy of the same fields
    pub async fn post_form<T: Transport>(
        &self,
        client: &ApiClient<T>,
        tree: &mut DomTree,
        form: NodeId,
        submit: FormSubmit<'_>,
    ) -> BindResult<Submission> {
        let serialized = serialize_form(tree, form)?;
        let request = match submit.transform {
            Some(transform) => match transform(serialized) {
                Some(request) => request,
                None => {
                    debug!("form {:?}: submission aborted", form);
                    return Ok(Submission::Aborted);
                }
            },
            None => serialized,
        };

        let action = tree.attr(form, "action").unwrap_or_default().to_string();
        let response = client
            .post(&action, &Value::Object(request.clone()))
            .await?;

        self.propagate_fields(tree, form)?;
        if let Some(on_success) = submit.on_success {
            on_success(&request, &response);
        }
        Ok(Submission::Sent { request, response })
    }

    fn propagate_fields(&self, tree: &mut DomTree, form: NodeId) -> BindResult<()> {
        let field_attr = self.config.field_attr.as_str();
        let widget = self.widget();
        let fields: Vec<(String, String)> = tree
            .find_all(form, &AttrSelector::exists(field_attr))
            .into_iter()
            .filter_map(|node| {
                let path = tree.attr(node, field_attr)?.to_string();
                let value = widget.read(tree, node)?;
                Some((path, value))
            })
            .collect();

        for (path, value) in fields {
            self.set_field(tree, None, &path, &Value::String(value))?;
        }
        Ok(())
    }
}
