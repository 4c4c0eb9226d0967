use crate::core::ControlId;
use crate::form::Form;
use crate::runtime::event::ActivationEvent;
use crate::runtime::event_loop::Listener;
use crate::submission::error::SubmitError;
use crate::submission::reporter::{FailureReporter, LogReporter};
use crate::task::{
    ConcurrencyPolicy, DEFAULT_ENDPOINT, SubmissionId, SubmitCompletion, SubmitExecutor,
    SubmitInvocation, SubmitRunState,
};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// 2xx with a JSON body; the form has been reset.
    Created { id: SubmissionId, response: Value },
    /// Already reported through the failure hook; the form is untouched.
    Failed { id: SubmissionId, error: SubmitError },
}

impl SubmissionOutcome {
    pub fn id(&self) -> SubmissionId {
        match self {
            Self::Created { id, .. } | Self::Failed { id, .. } => *id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Turns activations of one submit control into POSTs of one form.
///
/// The trigger id, the form and the executor (which owns the transport) are
/// all injected. Activation captures the form's current fields and hands
/// them to the executor; completions are applied on the caller's thread by
/// [`SubmissionHandler::drain_completions`], which resets the form after a
/// success and routes every failure to the [`FailureReporter`].
pub struct SubmissionHandler<F: Form> {
    trigger: ControlId,
    form: F,
    endpoint: String,
    executor: SubmitExecutor,
    policy: ConcurrencyPolicy,
    run_state: SubmitRunState,
    reporter: Box<dyn FailureReporter>,
}

impl<F: Form> SubmissionHandler<F> {
    pub fn new(trigger: impl Into<ControlId>, form: F, executor: SubmitExecutor) -> Self {
        Self {
            trigger: trigger.into(),
            form,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            executor,
            policy: ConcurrencyPolicy::default(),
            run_state: SubmitRunState::default(),
            reporter: Box::new(LogReporter),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reporter(mut self, reporter: impl FailureReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn trigger(&self) -> &ControlId {
        &self.trigger
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }

    pub fn in_flight(&self) -> usize {
        self.run_state.running_count()
    }

    /// Captures the form and starts one request. Returns `None` when the
    /// concurrency policy drops the activation.
    pub fn submit(&mut self) -> Option<SubmissionId> {
        if !self.run_state.should_start(self.policy) {
            debug!(
                trigger = %self.trigger,
                in_flight = self.run_state.running_count(),
                "submission in flight, activation dropped"
            );
            return None;
        }

        let id = self.run_state.next_id();
        let payload = self.form.payload();
        debug!(
            submission = %id,
            form = %self.form.id(),
            fields = payload.len(),
            endpoint = %self.endpoint,
            "submitting form"
        );

        self.run_state.on_started();
        self.executor.spawn(SubmitInvocation {
            id,
            endpoint: self.endpoint.clone(),
            payload,
        });
        Some(id)
    }

    /// Applies every completion that has arrived so far without blocking.
    pub fn drain_completions(&mut self) -> Vec<SubmissionOutcome> {
        self.executor
            .drain_ready()
            .into_iter()
            .map(|completion| self.complete(completion))
            .collect()
    }

    /// Blocks until no submission is in flight.
    pub fn wait_idle(&mut self) -> Vec<SubmissionOutcome> {
        let mut outcomes = Vec::new();
        while self.run_state.is_running() {
            let Some(completion) = self.executor.wait_next() else {
                break;
            };
            outcomes.push(self.complete(completion));
        }
        outcomes
    }

    fn complete(&mut self, completion: SubmitCompletion) -> SubmissionOutcome {
        let id = completion.id;
        self.run_state.on_finished();

        match completion.result {
            Ok(response) => {
                info!(submission = %id, %response, "workout created");
                self.form.reset();
                SubmissionOutcome::Created { id, response }
            }
            Err(error) => {
                self.reporter.report_failure(id, &error);
                SubmissionOutcome::Failed { id, error }
            }
        }
    }
}

impl<F: Form> Listener for SubmissionHandler<F> {
    fn on_activate(&mut self, event: &mut ActivationEvent) {
        if event.target() != &self.trigger {
            return;
        }
        event.prevent_default();
        self.submit();
    }

    fn poll(&mut self) -> usize {
        self.drain_completions().len()
    }
}

#[cfg(test)]
mod tests {
    use super::{SubmissionHandler, SubmissionOutcome};
    use crate::form::{Form, FormField, FormState, SharedForm, shared};
    use crate::runtime::event::{ActivationEvent, ActivationSource};
    use crate::runtime::event_loop::Listener;
    use crate::submission::error::SubmitError;
    use crate::submission::reporter::FailureReporter;
    use crate::task::{ConcurrencyPolicy, SubmissionId, SubmitExecutor};
    use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::{self, Write};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Scripted {
        responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn with(responses: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().expect("lock").len()
        }
    }

    impl Transport for Scripted {
        fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().expect("lock").push(request.clone());
            self.responses
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
        }
    }

    #[derive(Clone, Default)]
    struct Recorded(Rc<RefCell<Vec<(SubmissionId, String)>>>);

    impl FailureReporter for Recorded {
        fn report_failure(&mut self, id: SubmissionId, error: &SubmitError) {
            self.0.borrow_mut().push((id, error.to_string()));
        }
    }

    fn filled_form() -> SharedForm<FormState> {
        let form = shared(
            FormState::new("workoutForm")
                .with_field(FormField::text("name", "Name"))
                .with_field(FormField::text("duration", "Duration")),
        );
        form.borrow_mut().set_value("name", "Leg Day");
        form.borrow_mut().set_value("duration", "45");
        form
    }

    fn handler(
        transport: &Arc<Scripted>,
        form: &SharedForm<FormState>,
        reporter: &Recorded,
    ) -> SubmissionHandler<SharedForm<FormState>> {
        let transport: Arc<dyn Transport> = transport.clone();
        SubmissionHandler::new("workoutForm-submit", Rc::clone(form), SubmitExecutor::inline(transport))
            .with_reporter(reporter.clone())
    }

    #[test]
    fn success_resets_the_form() {
        let transport = Scripted::with(vec![Ok(HttpResponse::new(200, r#"{"id": 7}"#))]);
        let form = filled_form();
        let reporter = Recorded::default();
        let mut handler = handler(&transport, &form, &reporter);

        let id = handler.submit().expect("parallel policy always submits");
        assert_eq!(handler.in_flight(), 1);

        let outcomes = handler.drain_completions();
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            SubmissionOutcome::Created { id: done, response } => {
                assert_eq!(*done, id);
                assert_eq!(response, &json!({"id": 7}));
            }
            other => panic!("expected success, got {other:?}"),
        }

        assert_eq!(handler.in_flight(), 0);
        assert_eq!(form.borrow().text("name"), Some(""));
        assert_eq!(form.borrow().text("duration"), Some(""));
        assert!(reporter.0.borrow().is_empty());
    }

    #[test]
    fn failure_statuses_leave_the_form_alone() {
        for status in [400u16, 404, 500] {
            let transport = Scripted::with(vec![Ok(HttpResponse::new(status, r#"{"detail": "no"}"#))]);
            let form = filled_form();
            let reporter = Recorded::default();
            let mut handler = handler(&transport, &form, &reporter);

            handler.submit();
            let outcomes = handler.drain_completions();

            assert!(!outcomes[0].is_created());
            assert_eq!(form.borrow().text("name"), Some("Leg Day"), "status {status}");
            let reports = reporter.0.borrow();
            assert_eq!(reports.len(), 1);
            assert!(reports[0].1.contains(&status.to_string()));
        }
    }

    #[test]
    fn undecodable_success_body_is_a_failure() {
        let transport = Scripted::with(vec![Ok(HttpResponse::new(200, "not json"))]);
        let form = filled_form();
        let reporter = Recorded::default();
        let mut handler = handler(&transport, &form, &reporter);

        handler.submit();
        let outcomes = handler.drain_completions();

        assert!(matches!(
            outcomes[0],
            SubmissionOutcome::Failed {
                error: SubmitError::Decode(_),
                ..
            }
        ));
        assert_eq!(form.borrow().text("duration"), Some("45"));
        assert_eq!(reporter.0.borrow().len(), 1);
    }

    #[test]
    fn network_failure_is_reported_not_retried() {
        let transport = Scripted::with(vec![Err(TransportError::Network("refused".to_string()))]);
        let form = filled_form();
        let reporter = Recorded::default();
        let mut handler = handler(&transport, &form, &reporter);

        handler.submit();
        handler.drain_completions();

        assert_eq!(transport.request_count(), 1);
        assert_eq!(form.borrow().text("name"), Some("Leg Day"));
        assert_eq!(reporter.0.borrow().len(), 1);
    }

    #[test]
    fn payload_is_captured_at_activation() {
        let transport = Scripted::with(Vec::new());
        let form = filled_form();
        let reporter = Recorded::default();
        let mut handler = handler(&transport, &form, &reporter);

        handler.submit();
        form.borrow_mut().set_value("name", "Arm Day");
        handler.submit();

        let requests = transport.requests.lock().expect("lock");
        let first = String::from_utf8_lossy(&requests[0].body).to_string();
        let second = String::from_utf8_lossy(&requests[1].body).to_string();
        assert!(first.contains("Leg Day"));
        assert!(second.contains("Arm Day"));
    }

    #[test]
    fn drop_new_policy_ignores_activation_while_in_flight() {
        let transport = Scripted::with(Vec::new());
        let form = filled_form();
        let reporter = Recorded::default();
        let mut handler = handler(&transport, &form, &reporter).with_policy(ConcurrencyPolicy::DropNew);

        assert!(handler.submit().is_some());
        assert!(handler.submit().is_none());
        assert_eq!(handler.drain_completions().len(), 1);
        assert!(handler.submit().is_some());
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn activation_of_trigger_prevents_default() {
        let transport = Scripted::with(Vec::new());
        let form = filled_form();
        let reporter = Recorded::default();
        let mut handler = handler(&transport, &form, &reporter);

        let mut event = ActivationEvent::new("workoutForm-submit", ActivationSource::Pointer);
        handler.on_activate(&mut event);
        assert!(event.is_default_prevented());
        assert_eq!(handler.poll(), 1);

        let mut other = ActivationEvent::new("someOtherButton", ActivationSource::Pointer);
        handler.on_activate(&mut other);
        assert!(!other.is_default_prevented());
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn wait_idle_applies_threaded_completions() {
        let transport = Scripted::with(vec![Ok(HttpResponse::new(201, r#"{"id": "abc"}"#))]);
        let form = filled_form();
        let dyn_transport: Arc<dyn Transport> = transport.clone();
        let mut handler = SubmissionHandler::new(
            "workoutForm-submit",
            Rc::clone(&form),
            SubmitExecutor::threaded(dyn_transport),
        );

        handler.submit();
        let outcomes = handler.wait_idle();

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_created());
        assert_eq!(form.payload().text("name"), Some(""));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("lock")).into_owned()
        }
    }

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_while(run: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        buffer.contents()
    }

    #[test]
    fn outcomes_reach_the_diagnostic_log_by_default() {
        let transport = Scripted::with(vec![
            Ok(HttpResponse::new(200, r#"{"id": 7}"#)),
            Ok(HttpResponse::new(404, r#"{"detail": "missing"}"#)),
        ]);
        let form = filled_form();
        let dyn_transport: Arc<dyn Transport> = transport.clone();
        let mut handler = SubmissionHandler::new(
            "workoutForm-submit",
            Rc::clone(&form),
            SubmitExecutor::inline(dyn_transport),
        );

        let created = logged_while(|| {
            handler.submit();
            handler.drain_completions();
        });
        assert!(created.contains("workout created"), "{created}");
        assert!(created.contains(r#""id":7"#), "{created}");

        form.borrow_mut().set_value("name", "Leg Day");
        let failed = logged_while(|| {
            handler.submit();
            handler.drain_completions();
        });
        assert!(failed.contains("ERROR"), "{failed}");
        assert!(failed.contains("status: 404"), "{failed}");
        assert_eq!(form.borrow().text("name"), Some("Leg Day"));
    }
}
