use ambiguity_review::api::{AssessmentRequest, AssessmentResponse};
use ambiguity_review::{
    AmbiguityAssessmentPipeline, Chain, ChainExecutor, ChainStep, ModelInvoker, PromptTemplate,
    RunError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Returns a canned result and remembers every prompt it was sent.
struct StubInvoker {
    reply: Result<String, RunError>,
    prompts: Mutex<Vec<String>>,
}

impl StubInvoker {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: RunError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for StubInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, RunError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

#[tokio::test]
async fn assess_returns_the_completion_verbatim() {
    let verdict = "This statement is ambiguous: missing authentication method and failure behavior.";
    let invoker = StubInvoker::replying(verdict);
    let pipeline = AmbiguityAssessmentPipeline::new(invoker.clone()).unwrap();

    let review = pipeline
        .assess("The user should be able to log in.")
        .await
        .unwrap();

    assert_eq!(review, verdict);
    let prompts = invoker.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("The user should be able to log in."));
    assert!(prompts[0].contains("Business Analyst"));
}

#[tokio::test]
async fn any_statement_yields_the_stubbed_completion() {
    let invoker = StubInvoker::replying("C");
    let pipeline = AmbiguityAssessmentPipeline::new(invoker.clone()).unwrap();

    for statement in [
        "Reports export to CSV.",
        "The system shall be fast.",
        "Use {{braces}} literally",
        "Ünïcode ✓",
    ] {
        assert_eq!(pipeline.assess(statement).await.unwrap(), "C");
    }
    assert_eq!(invoker.prompts().len(), 4);
    assert!(invoker.prompts()[2].contains("Use {{braces}} literally"));
}

#[tokio::test]
async fn rate_limit_propagates_unchanged() {
    let invoker = StubInvoker::failing(RunError::RateLimited("retry after 20s".into()));
    let pipeline = AmbiguityAssessmentPipeline::new(invoker.clone()).unwrap();

    let err = pipeline.assess("Anything.").await.unwrap_err();

    assert_eq!(err, RunError::RateLimited("retry after 20s".into()));
    assert!(err.is_retryable());
    assert_eq!(invoker.prompts().len(), 1);
}

#[tokio::test]
async fn empty_statement_is_sent_as_is() {
    let invoker = StubInvoker::replying("Nothing to review.");
    let pipeline = AmbiguityAssessmentPipeline::new(invoker.clone()).unwrap();

    let review = pipeline.assess("").await.unwrap();

    assert_eq!(review, "Nothing to review.");
    let expected = AmbiguityAssessmentPipeline::render_prompt("").unwrap();
    assert_eq!(invoker.prompts(), vec![expected.clone()]);
    assert!(expected.ends_with("Statement: "));
}

#[tokio::test]
async fn handle_produces_the_outbound_shape() {
    let invoker = StubInvoker::replying("Sufficiently complete.");
    let pipeline = AmbiguityAssessmentPipeline::new(invoker).unwrap();
    let request: AssessmentRequest =
        serde_json::from_str(r#"{"statement": "Admins can reset passwords.", "lang": "en"}"#)
            .unwrap();

    let response = pipeline.handle(request).await.unwrap();

    assert_eq!(
        response,
        AssessmentResponse {
            review_ambiguity: "Sufficiently complete.".into()
        }
    );
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "review_ambiguity": "Sufficiently complete." })
    );
}

#[tokio::test]
async fn missing_placeholder_never_reaches_the_model() {
    let invoker = StubInvoker::replying("unused");
    let step = ChainStep::new(
        "review",
        PromptTemplate::new("{{statement}} for {{persona}}"),
        invoker.clone(),
    );
    let mut pool = [("statement", "s")].into_iter().collect();

    let err = step.run(&mut pool).await.unwrap_err();

    assert_eq!(err, RunError::MissingVariable("persona".into()));
    assert!(invoker.prompts().is_empty());
}

#[tokio::test]
async fn two_step_chain_refines_the_first_review() {
    let reviewer = StubInvoker::replying("Ambiguous: no actor.");
    let writer = StubInvoker::replying("As an admin, I want to log in...");
    let chain = Chain::new(vec![
        ChainStep::new(
            AmbiguityAssessmentPipeline::OUTPUT_KEY,
            AmbiguityAssessmentPipeline::template(),
            reviewer.clone(),
        ),
        ChainStep::new(
            "user_story",
            PromptTemplate::new("Rewrite '{{ statement }}' addressing: {{ review_ambiguity }}"),
            writer.clone(),
        ),
    ])
    .unwrap();
    let inputs = HashMap::from([("statement".to_string(), "Log in.".to_string())]);

    let out = ChainExecutor::execute(&chain, &inputs, &["review_ambiguity", "user_story"])
        .await
        .unwrap();

    assert_eq!(out["review_ambiguity"], "Ambiguous: no actor.");
    assert_eq!(out["user_story"], "As an admin, I want to log in...");
    assert_eq!(
        writer.prompts(),
        vec!["Rewrite 'Log in.' addressing: Ambiguous: no actor.".to_string()]
    );
}

#[tokio::test]
async fn first_step_failure_skips_the_rest() {
    let reviewer = StubInvoker::failing(RunError::Authentication("bad key".into()));
    let writer = StubInvoker::replying("never");
    let chain = Chain::new(vec![
        ChainStep::new("review", PromptTemplate::new("{{statement}}"), reviewer),
        ChainStep::new("story", PromptTemplate::new("{{review}}"), writer.clone()),
    ])
    .unwrap();

    let err = ChainExecutor::new(&chain)
        .vars([("statement", "s")])
        .run()
        .await
        .unwrap_err();

    assert_eq!(err, RunError::Authentication("bad key".into()));
    assert!(!err.is_retryable());
    assert!(writer.prompts().is_empty());
}
