use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rayon::prelude::*;

use krt_debug_core::{CollectionDump, DumpedState, InputDump, NamedState, Registry};
use krt_debug_mermaid::{DependencyGraph, NodeKind, render_mermaid};

fn fixtures() -> Vec<DumpedState> {
    let json = [
        r#"[]"#,
        r#"[{"name":"A","state":{}}]"#,
        r#"[{"name":"A","state":{"inputCollection":"Base","inputs":{"k1":{"dependencies":["B"]}}}}]"#,
        r#"[
            {"name":"Namespaces","state":{"outputs":{"default":{}}}},
            {"name":"Services","state":{"inputCollection":"Namespaces","inputs":{
                "default":{"outputs":["default/a","default/b"],"dependencies":["Pods","Endpoints"]},
                "kube-system":{"dependencies":["Pods"]}
            }}},
            {"name":"Endpoints","state":{"inputCollection":"Services","inputs":{
                "default/a":{"dependencies":["Endpoints","Pods"]}
            }}},
            {"name":"Services","state":{"inputCollection":"Pods"}}
        ]"#,
        r#"[
            {"name":"Root","state":{"inputs":{"x":{"dependencies":["Hidden"]}}}},
            {"name":"Leaf","state":{"inputCollection":"Root","inputs":{"y":{"dependencies":[]}}}}
        ]"#,
    ];
    json.iter()
        .map(|j| DumpedState::from_json(j.as_bytes()).expect("fixture decodes"))
        .collect()
}

fn referenced_names(state: &DumpedState) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for named in state {
        if named.state.input_collection.is_empty() {
            continue;
        }
        names.insert(named.name.clone());
        names.insert(named.state.input_collection.clone());
        for input in named.state.inputs.values() {
            names.extend(input.dependencies.iter().cloned());
        }
    }
    names
}

fn lines_with<'a>(rendered: &'a str, needle: &str) -> Vec<&'a str> {
    rendered
        .lines()
        .skip(1)
        .filter(|l| l.contains(needle))
        .collect()
}

#[test]
fn node_declarations_match_distinct_names() {
    for state in fixtures() {
        let rendered = render_mermaid(&state);
        let declarations = rendered
            .lines()
            .skip(1)
            .filter(|l| !l.contains("-->") && !l.contains("-.->"))
            .count();
        assert_eq!(declarations, referenced_names(&state).len(), "{rendered}");
    }
}

#[test]
fn skipped_collections_contribute_no_collection_nodes() {
    for state in fixtures() {
        let graph = DependencyGraph::build(&state);
        for named in &state {
            if !named.state.input_collection.is_empty() {
                continue;
            }
            if let Some(node) = graph.node_by_name(&named.name) {
                assert_eq!(node.kind, NodeKind::Plain);
                assert!(graph.primary_edges().all(|(from, _)| from != node.id));
                assert!(graph.secondary_edges().all(|(from, _)| from != node.id));
            }
        }
    }
}

#[test]
fn header_comes_first_then_edges_then_nodes() {
    for state in fixtures() {
        let rendered = render_mermaid(&state);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("flowchart LR"));

        // 0 = solid edges, 1 = dotted edges, 2 = node declarations
        let mut phase = 0;
        for line in lines {
            assert!(line.starts_with("  "), "unindented line {line:?}");
            let this = if line.contains("-.->") {
                1
            } else if line.contains("-->") {
                0
            } else {
                2
            };
            assert!(this >= phase, "out of order line {line:?} in\n{rendered}");
            phase = this;
        }
        assert!(rendered.ends_with('\n'));
    }
}

#[test]
fn shared_dependency_yields_one_dotted_edge() {
    let state: DumpedState = vec![NamedState::new(
        "A",
        CollectionDump::new()
            .with_input_collection("Base")
            .with_input("k1", InputDump::new(Vec::<String>::new(), ["B"]))
            .with_input("k2", InputDump::new(Vec::<String>::new(), ["B"])),
    )]
    .into();

    let rendered = render_mermaid(&state);
    assert_eq!(lines_with(&rendered, "-.->"), vec!["  node1-.->node3"]);
}

#[test]
fn duplicate_registration_renders_once() {
    let fixtures = fixtures();
    let state = &fixtures[3];
    let rendered = render_mermaid(state);

    // Services is dumped twice, with different inputs; both primary edges survive.
    assert_eq!(lines_with(&rendered, "[[\"Services\"]]").len(), 1);
    assert_eq!(lines_with(&rendered, "-->").len(), 3);
    assert_eq!(lines_with(&rendered, "-.->").len(), 4);
}

#[test]
fn self_loop_is_rendered() {
    let fixtures = fixtures();
    let state = &fixtures[3];
    let graph = DependencyGraph::build(state);
    let endpoints = graph.node_by_name("Endpoints").unwrap().id;

    let rendered = render_mermaid(state);
    assert!(rendered.contains(&format!("  {endpoints}-.->{endpoints}\n")));
}

#[test]
fn rendering_is_repeatable() {
    for state in fixtures() {
        let runs: Vec<String> = (0..8).into_par_iter().map(|_| render_mermaid(&state)).collect();
        assert!(runs.windows(2).all(|w| w[0] == w[1]));
    }
}

#[test]
fn registry_json_round_trip_renders_identically() {
    let registry = Registry::new();
    registry.register("Namespaces", CollectionDump::new);
    registry.register("Services", || {
        CollectionDump::new()
            .with_input_collection("Namespaces")
            .with_output("default/a", serde_json::json!({"port": 80}))
            .with_input(
                "default",
                InputDump::new(["default/a"], ["Pods", "Endpoints"]),
            )
    });
    registry.register("Endpoints", || {
        CollectionDump::new()
            .with_input_collection("Services")
            .with_input("default/a", InputDump::new(["default/a"], ["Pods"]))
    });

    let live = render_mermaid(&registry.dump());
    let decoded = DumpedState::from_json(registry.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(render_mermaid(&decoded), live);
}
