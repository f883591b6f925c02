use super::*;
use crate::category::Category;
use crate::dispatch::Dispatcher;
use crate::ids::AgentId;
use crate::issue::IssueStatus;
use tempfile::TempDir;

const END_TO_END: &str = r#"
name: two desks
steps:
  - action: add_agent
    email: agent1@test.com
    name: Agent 1
    expertise: [PAYMENT_RELATED]
  - action: add_agent
    email: agent2@test.com
    name: Agent 2
    expertise: [MUTUAL_FUND_RELATED]
  - action: create_issue
    transaction_id: T1
    issue_type: Payment Related
    subject: Payment Failed
    description: My payment failed but money is debited
    email: testUser1@test.com
  - action: create_issue
    transaction_id: T2
    issue_type: Mutual Fund Related
    subject: Purchase Failed
    description: Unable to purchase Mutual Fund
    email: testUser2@test.com
  - action: create_issue
    transaction_id: T3
    issue_type: Payment Related
    subject: Payment Failed
    description: My payment failed but money is debited
    email: testUser2@test.com
  - action: assign
    issue: I1
  - action: assign
    issue: I2
  - action: assign
    issue: I3
  - action: resolve
    issue: I1
    resolution: PaymentFailed debited amount will get reversed
  - action: resolve
    issue: I2
    resolution: Units allotted
  - action: resolve
    issue: I3
    resolution: Refund processed
  - action: history
"#;

fn dispatcher() -> Dispatcher {
    Dispatcher::new()
}

#[test]
fn test_parse_steps() {
    let scenario = Scenario::from_yaml(END_TO_END).unwrap();

    assert_eq!(scenario.label(), "two desks");
    assert_eq!(scenario.steps.len(), 12);
    assert_eq!(scenario.steps[0].action.name(), "add_agent");
    assert!(matches!(
        &scenario.steps[5].action,
        Action::Assign { issue } if issue.to_string() == "I1"
    ));
    assert!(matches!(scenario.steps[11].action, Action::History));
    assert!(scenario.steps.iter().all(|s| !s.expect_error));
}

#[test]
fn test_parse_rejects_unknown_action() {
    let err = Scenario::from_yaml("steps:\n  - action: escalate\n").unwrap_err();
    assert!(matches!(err, RotaError::Config(_)));
}

#[test]
fn test_parse_rejects_malformed_issue_id() {
    let err = Scenario::from_yaml("steps:\n  - action: assign\n    issue: ticket-1\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse scenario YAML"));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scenario.yaml");
    std::fs::write(&path, END_TO_END).unwrap();

    let scenario = Scenario::load(&path).unwrap();
    assert_eq!(scenario.steps.len(), 12);

    let err = Scenario::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read scenario file"));
}

#[test]
fn test_run_end_to_end() {
    let scenario = Scenario::from_yaml(END_TO_END).unwrap();
    let dispatcher = dispatcher();

    let steps = run(&dispatcher, &scenario).into_result().unwrap();
    assert_eq!(steps.len(), 12);

    match &steps[7].output {
        StepOutput::Assignment { agent: None, .. } => {}
        other => panic!("expected I3 to wait, got {:?}", other),
    }
    match &steps[8].output {
        StepOutput::Resolution { drained: Some(issue), .. } => {
            assert_eq!(issue.id.to_string(), "I3");
            assert_eq!(issue.assigned_agent(), Some(AgentId::new(1)));
        }
        other => panic!("expected I3 to be drained, got {:?}", other),
    }
    match &steps[11].output {
        StepOutput::History { history } => {
            let ids: Vec<Vec<String>> = history
                .iter()
                .map(|h| h.issues.iter().map(ToString::to_string).collect())
                .collect();
            assert_eq!(ids, vec![vec!["I1", "I3"], vec!["I2"]]);
        }
        other => panic!("expected history, got {:?}", other),
    }

    let text = steps[11].to_string();
    assert!(text.contains("A1 Agent 1 <agent1@test.com>: I1, I3"));
    assert!(text.contains("A2 Agent 2 <agent2@test.com>: I2"));
}

#[test]
fn test_expected_error_is_recorded() {
    let yaml = r#"
steps:
  - action: add_agent
    email: agent1@test.com
    name: Agent 1
    expertise: [GOLD_RELATED]
  - action: create_issue
    transaction_id: T1
    issue_type: Gold Related
    subject: Gold not credited
    description: Bought gold, balance unchanged
    email: testUser1@test.com
  - action: resolve
    issue: I1
    resolution: premature
    expect_error: true
  - action: list
    filter:
      status: OPEN
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let dispatcher = dispatcher();

    let run = run(&dispatcher, &scenario);
    assert!(run.is_success());
    match &run.steps[2].output {
        StepOutput::ExpectedError { error } => {
            assert!(error.contains("must be IN_PROGRESS"));
        }
        other => panic!("expected a recorded error, got {:?}", other),
    }
    match &run.steps[3].output {
        StepOutput::Issues { issues } => assert_eq!(issues.len(), 1),
        other => panic!("expected issues, got {:?}", other),
    }
}

#[test]
fn test_unexpected_success_stops_run() {
    let yaml = r#"
steps:
  - action: add_agent
    email: agent1@test.com
    name: Agent 1
    expertise: [GOLD_RELATED]
    expect_error: true
  - action: agents
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let run = run(&dispatcher(), &scenario);

    assert!(run.steps.is_empty());
    assert!(matches!(run.failure, Some(RotaError::Scenario(_))));
}

#[test]
fn test_failure_keeps_completed_steps() {
    let yaml = r#"
steps:
  - action: add_agent
    email: agent1@test.com
    name: Agent 1
    expertise: [OTHER]
  - action: assign
    issue: I9
  - action: agents
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let run = run(&dispatcher(), &scenario);

    assert_eq!(run.steps.len(), 1);
    let err = run.into_result().unwrap_err();
    assert!(matches!(err, RotaError::IssueNotFound(_)));
}

#[test]
fn test_update_and_filter_errors_surface() {
    let yaml = r#"
steps:
  - action: create_issue
    transaction_id: T1
    issue_type: Insurance
    subject: Claim pending
    description: Claim not processed
    email: testUser1@test.com
  - action: update
    issue: I1
    status: DONE
    expect_error: true
  - action: update
    issue: I1
    status: waiting
    resolution: awaiting documents
  - action: list
    filter:
      type: crypto
    expect_error: true
  - action: waiting
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let dispatcher = dispatcher();

    let steps = run(&dispatcher, &scenario).into_result().unwrap();
    match &steps[2].output {
        StepOutput::Issue { issue } => {
            assert_eq!(issue.category, Category::Insurance);
            assert_eq!(issue.status(), IssueStatus::Waiting);
            assert_eq!(issue.resolution(), Some("awaiting documents"));
        }
        other => panic!("expected updated issue, got {:?}", other),
    }
    match &steps[3].output {
        StepOutput::ExpectedError { error } => assert!(error.starts_with("Invalid filter")),
        other => panic!("expected filter error, got {:?}", other),
    }
    // Manually set WAITING is not in any queue.
    assert_eq!(steps[4].to_string(), "[5] waiting: no waiting issues");
}

#[test]
fn test_step_report_serializes_with_kind() {
    let scenario = Scenario::from_yaml(END_TO_END).unwrap();
    let steps = run(&dispatcher(), &scenario).into_result().unwrap();

    let json = serde_json::to_value(&steps[5]).unwrap();
    assert_eq!(json["step"], 6);
    assert_eq!(json["action"], "assign");
    assert_eq!(json["kind"], "assignment");
    assert_eq!(json["agent"]["id"], "A1");
}
