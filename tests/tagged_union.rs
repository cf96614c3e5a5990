use fieldwise::{json, record, tagged_union, value, Literal, ReadOptions};
use rstest::rstest;

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Tree {
        #[rename = "leafOrNode"]
        pub leaf_or_node: LeafOrNode,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Leaf {
        pub value: f64,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Node {
        #[rename = "criticalValue"]
        pub critical_value: f64,
        pub left: Box<Tree>,
        pub right: Box<Tree>,
    }
}

tagged_union! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum LeafOrNode("type", LeafOrNodeTag) {
        Leaf(Leaf),
        Node(Node),
    }
}

const TREE: &str = r#"{"leafOrNode":{"type":"Node","criticalValue":10.0,"left":{"leafOrNode":{"type":"Leaf","value":3.0}},"right":{"leafOrNode":{"type":"Leaf","value":5.0}}}}"#;

fn leaf(value: f64) -> Box<Tree> {
    Box::new(Tree {
        leaf_or_node: LeafOrNode::Leaf(Leaf { value }),
    })
}

fn sample() -> Tree {
    Tree {
        leaf_or_node: LeafOrNode::Node(Node {
            critical_value: 10.0,
            left: leaf(3.0),
            right: leaf(5.0),
        }),
    }
}

#[rstest]
fn test_tree_writes_discriminator_first() {
    assert_eq!(json::write(&sample()), TREE);
}

#[rstest]
fn test_tree_parses_recursively() {
    let tree: Tree = json::read(TREE).unwrap();
    assert_eq!(tree, sample());
    assert_eq!(tree.leaf_or_node.tag(), "Node");
    match &tree.leaf_or_node {
        LeafOrNode::Node(node) => assert_eq!(node.left.leaf_or_node.tag(), "Leaf"),
        LeafOrNode::Leaf(_) => panic!("expected a node"),
    }
}

#[rstest]
fn test_tree_round_trips_through_value_tree() {
    let tree = sample();
    let doc = value::to_value(&tree);
    let back: Tree = value::from_value(&doc).unwrap();
    assert_eq!(back, tree);
}

#[rstest]
#[case(
    r#"{"leafOrNode":{"type":"Branch","value":1.0}}"#,
    "Failed to parse field 'leafOrNode.type': Unknown discriminator value 'Branch'. The following strings are supported: 'Leaf', 'Node'."
)]
#[case(
    r#"{"leafOrNode":{"value":1.0}}"#,
    "Field named 'leafOrNode.type' not found."
)]
#[case(
    r#"{"leafOrNode":{"type":1,"value":1.0}}"#,
    "Failed to parse field 'leafOrNode.type': Could not cast to string."
)]
#[case(
    r#"{"leafOrNode":{"type":"Node","criticalValue":1.0,"left":{"leafOrNode":{"type":"Leaf"}},"right":{"leafOrNode":{"type":"Leaf","value":2.0}}}}"#,
    "Field named 'leafOrNode.left.leafOrNode.value' not found."
)]
fn test_discriminator_failures(#[case] input: &str, #[case] expected: &str) {
    let err = json::read::<Tree>(input).unwrap_err();
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn test_discriminator_is_not_an_unknown_field() {
    let options = ReadOptions::new().with_deny_unknown_fields(true);
    let tree: Tree = json::read_with_options(TREE, &options).unwrap();
    assert_eq!(tree, sample());

    let err = json::read_with_options::<Tree>(
        r#"{"leafOrNode":{"type":"Leaf","value":1.0,"weight":2}}"#,
        &options,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field named 'leafOrNode.weight' is not part of the schema."
    );
}

#[rstest]
fn test_tags_form_a_literal_set() {
    assert_eq!(LeafOrNode::TAG_FIELD, "type");
    let names: Vec<_> = Literal::<LeafOrNodeTag>::iter().map(|tag| tag.name()).collect();
    assert_eq!(names, vec!["Leaf", "Node"]);
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Circle {
        pub radius: f64,
    }
}

tagged_union! {
    #[derive(Debug, PartialEq)]
    pub enum Shape("kind", ShapeKind) {
        Circle(Circle) = "circle",
    }
}

#[rstest]
fn test_renamed_single_variant() {
    let shape: Shape = json::read(r#"{"kind":"circle","radius":1.5}"#).unwrap();
    assert_eq!(shape.tag(), Literal::<ShapeKind>::default());
    assert_eq!(json::write(&shape), r#"{"kind":"circle","radius":1.5}"#);
    assert!(json::read::<Shape>(r#"{"kind":"Circle","radius":1.5}"#).is_err());
}
