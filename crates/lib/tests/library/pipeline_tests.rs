//! End-to-end tests from construct tree to published dashboard.

use serde_json::json;
use stackdash_lib::config::DashboardConfig;
use stackdash_lib::dashboard::{DashboardBody, MemorySink, StackDashboard};
use stackdash_lib::metrics::{WidgetFactory, WidgetSpec};
use stackdash_lib::tree::{ConstructNode, walk};
use stackdash_lib::util::hash::Hashable;

use super::common::{function, generate, published, queue, table, titles, topic, tree};

#[test]
fn function_and_table_yield_eight_widgets_table_first() {
  let stack = tree(vec![function("Handler", "proc-1"), table("Items", "items")]);
  let dashboard = generate(&DashboardConfig::default(), &stack);
  let published = published(&dashboard);

  assert_eq!(published.widgets.len(), 8);
  assert_eq!(
    titles(published),
    vec![
      "DynamoDB - Capacity Units",
      "DynamoDB - Throttle Events",
      "DynamoDB - Query Latency",
      "DynamoDB - Scan Latency",
      "Lambda - Invocations",
      "Lambda - Duration",
      "Lambda - Errors",
      "Lambda - Throttles",
    ]
  );
  assert_eq!(published.widgets[4].metrics[0].dimensions["FunctionName"], "proc-1");
  assert_eq!(published.widgets[0].metrics[0].dimensions["TableName"], "items");
}

#[test]
fn disabled_kind_contributes_nothing() {
  let stack = tree(vec![function("Handler", "proc-1"), topic("Events", "events")]);
  let config = DashboardConfig::from_toml_str("[include]\nsns = false").unwrap();
  let dashboard = generate(&config, &stack);

  assert!(titles(published(&dashboard)).iter().all(|t| !t.starts_with("SNS")));
  assert_eq!(dashboard.collector().collection().topics.len(), 0);
}

#[test]
fn generation_is_deterministic() {
  let stack = tree(vec![
    queue("Jobs", "jobs"),
    function("Handler", "proc-1"),
    table("Items", "items"),
    topic("Events", "events"),
  ]);
  let config = DashboardConfig::default();

  let first = generate(&config, &stack);
  let second = generate(&config, &stack);

  assert_eq!(published(&first), published(&second));
  assert_eq!(
    published(&first).compute_hash().unwrap(),
    published(&second).compute_hash().unwrap()
  );
}

#[test]
fn empty_tree_publishes_empty_dashboard() {
  let dashboard = generate(&DashboardConfig::default(), &tree(vec![]));
  let published = published(&dashboard);

  assert!(published.widgets.is_empty());
  assert_eq!(published.name, "ServiceMetricsDashboard");
}

#[test]
fn custom_widgets_come_first() {
  let stack = tree(vec![function("Handler", "proc-1")]);
  let mut dashboard = StackDashboard::from_config(&DashboardConfig::default(), MemorySink::new());
  dashboard.add_widgets([WidgetFactory::default().build(WidgetSpec::new("Business KPIs", vec![]))]);
  walk(&stack, &mut dashboard).unwrap();

  let titles = titles(published(&dashboard));
  assert_eq!(titles[0], "Business KPIs");
  assert_eq!(titles[1], "Lambda - Invocations");
}

#[test]
fn regenerate_picks_up_late_custom_widgets() {
  let stack = tree(vec![function("Handler", "proc-1")]);
  let mut dashboard = generate(&DashboardConfig::default(), &stack);
  assert_eq!(published(&dashboard).widgets.len(), 4);

  dashboard.add_widgets([WidgetFactory::default().build(WidgetSpec::new("Late", vec![]))]);
  assert!(dashboard.regenerate().unwrap());

  assert_eq!(published(&dashboard).widgets.len(), 5);
  assert_eq!(dashboard.sink().publish_count(), 2);
}

#[test]
fn scope_excludes_sibling_stacks() {
  let root = ConstructNode::structural("App")
    .with_child(ConstructNode::structural("Orders").with_child(function("Handler", "orders-fn")))
    .with_child(ConstructNode::structural("Billing").with_child(function("Handler", "billing-fn")));
  let stack = stackdash_lib::tree::ConstructTree::new(root).unwrap();
  let config = DashboardConfig {
    scope: Some("App/Orders".to_string()),
    ..DashboardConfig::default()
  };

  let dashboard = generate(&config, &stack);
  let functions = &dashboard.collector().collection().functions;
  assert_eq!(functions.len(), 1);
  assert_eq!(functions[0].path, "App/Orders/Handler");
}

#[test]
fn unresolvable_identity_is_isolated() {
  let stack = tree(vec![
    function("Good", "proc-1"),
    ConstructNode::resource("Bad", "AWS::Lambda::Function").with_property("FunctionName", json!({ "Ref": "Name" })),
    table("Items", "items"),
  ]);
  let dashboard = generate(&DashboardConfig::default(), &stack);
  let published = published(&dashboard);

  let invocations = published
    .widgets
    .iter()
    .find(|w| w.title == "Lambda - Invocations")
    .unwrap();
  assert_eq!(invocations.metrics.len(), 1);
  assert_eq!(invocations.metrics[0].dimensions["FunctionName"], "proc-1");
  assert_eq!(published.widgets.len(), 8);

  let skipped = &dashboard.last_assembly().unwrap().skipped;
  assert_eq!(skipped.len(), 1);
  assert_eq!(skipped[0].path, "Stack/Bad");
}

#[test]
fn unnamed_resource_uses_fallback_identity() {
  let stack = tree(vec![ConstructNode::resource("Jobs", "AWS::SQS::Queue")]);
  let dashboard = generate(&DashboardConfig::default(), &stack);

  let widget = &published(&dashboard).widgets[0];
  assert_eq!(widget.metrics[0].dimensions["QueueName"], "unknown-queue");
}

#[test]
fn rendered_body_places_widgets_on_grid() {
  let stack = tree(vec![function("Handler", "proc-1"), topic("Events", "events")]);
  let dashboard = generate(&DashboardConfig::default(), &stack);
  let body = DashboardBody::render(published(&dashboard));

  let lambda: Vec<_> = body.widgets[..4].iter().map(|w| (w.x, w.y, w.width)).collect();
  assert_eq!(lambda, vec![(0, 0, 6), (6, 0, 6), (12, 0, 6), (18, 0, 6)]);
  let sns: Vec<_> = body.widgets[4..].iter().map(|w| (w.x, w.y, w.width)).collect();
  assert_eq!(sns, vec![(0, 6, 8), (8, 6, 8), (16, 6, 8)]);
}
