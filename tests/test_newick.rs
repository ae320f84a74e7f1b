use phylink::model::{validate_topology, LinkIndex};
use phylink::newick::{
    parse_all, parse_file, parse_str, parse_str_with, to_newick, to_newick_from, tree_to_elements,
    write_newick_file, ParseError, ParseOptions, WriteOptions,
};
use proptest::prelude::*;
use std::fs::File;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let tree = parse_str("((Kea:1.0,Kaka:2.0)Nestor:3.0,Kakapo:4.0)Parrots;").unwrap();

    // Counts
    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.edge_count(), 4);
    assert_eq!(tree.link_count(), 8);
    assert!(validate_topology(&tree));

    // Names and structure
    assert_eq!(tree.root_node().name(), "Parrots");
    let nestor = tree.find_node("Nestor").unwrap();
    assert!(tree.is_inner(nestor));
    assert_eq!(tree.degree(nestor), 3);
    for leaf in ["Kea", "Kaka", "Kakapo"] {
        let node = tree.find_node(leaf).unwrap();
        assert!(tree.is_leaf(node));
    }

    // Branch lengths hang on the edge below each node's primary link
    let kea = tree.find_node("Kea").unwrap();
    let above = tree.link(tree.node(kea).link()).edge();
    assert_eq!(tree.edge(above).data().branch_length, 1.0);
}

#[test]
fn test_root_branch_length_is_dropped() {
    let tree = parse_str("((Kea:1.0,Kaka:2.0)Nestor:3.0,Kakapo:4.0)Parrots:0.5;").unwrap();

    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.edge_count(), 4);
    let text = to_newick(&tree, &WriteOptions::default());
    assert_eq!(text, "((Kea:1,Kaka:2)Nestor:3,Kakapo:4)Parrots;");
}

#[test]
fn test_quoted_and_underscored_labels() {
    let tree =
        parse_str("(('Taxon one':1.5,'Second''s taxon':2.5)Pair:3.0,Third_Taxon:4.0)All;").unwrap();

    assert!(tree.find_node("Taxon one").is_some());
    assert!(tree.find_node("Second's taxon").is_some());
    // underscores in unquoted labels decode to spaces
    assert!(tree.find_node("Third Taxon").is_some());
    assert!(tree.find_node("Third_Taxon").is_none());
}

#[test]
fn test_scientific_notation() {
    let tree = parse_str("((Kea:1e-5,Kaka:2.5E+3)Nestor:1.0e2,Kakapo:3.14E-10)Parrots;").unwrap();

    let kea = tree.find_node("Kea").unwrap();
    let above = tree.link(tree.node(kea).link()).edge();
    assert_eq!(tree.edge(above).data().branch_length, 1e-5);

    let kaka = tree.find_node("Kaka").unwrap();
    let above = tree.link(tree.node(kaka).link()).edge();
    assert_eq!(tree.edge(above).data().branch_length, 2500.0);
}

#[test]
fn test_optional_branch_lengths_default_to_zero() {
    let tree = parse_str("((Kea:1.0,Kaka),Kakapo:4.0);").unwrap();

    let kaka = tree.find_node("Kaka").unwrap();
    let above = tree.link(tree.node(kaka).link()).edge();
    assert_eq!(tree.edge(above).data().branch_length, 0.0);
    assert!(validate_topology(&tree));
}

#[test]
fn test_comments_attach_to_their_element() {
    let newick = "[A tree of] (([Shags!]Kea[Great Commentoran]:0.33,\
                  Kaka[Pied Commentoran]:0.33)Nestor:1.87,Kakapo:2.2[King Commentoran])Parrots;";
    let tree = parse_str(newick).unwrap();

    let kea = tree.node(tree.find_node("Kea").unwrap());
    assert_eq!(kea.data().comments, ["Shags!", "Great Commentoran"]);
    let kakapo = tree.node(tree.find_node("Kakapo").unwrap());
    assert_eq!(kakapo.data().comments, ["King Commentoran"]);
    // the header comment before the first '(' belongs to no element
    let root = tree.root_node();
    assert!(root.data().comments.is_empty());
}

#[test]
fn test_tags_are_kept() {
    let tree = parse_str("(Kea{conf=0.97}:1.5,Kaka:2)Nestor{mrca};").unwrap();

    let kea = tree.node(tree.find_node("Kea").unwrap());
    assert_eq!(kea.data().tags, ["conf=0.97"]);
    assert_eq!(tree.root_node().data().tags, ["mrca"]);
}

#[test]
fn test_empty_elements_make_unnamed_nodes() {
    let tree = parse_str("(,);").unwrap();

    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.root_node().name(), "");
    assert!(validate_topology(&tree));
}

#[test]
fn test_single_node_tree() {
    // a lone name is not a tree, but a comment makes the root explicit
    let tree = parse_str("[lone bird]Ruru;").unwrap();

    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.edge_count(), 0);
    assert_eq!(tree.link_count(), 1);
    assert_eq!(tree.root_node().name(), "Ruru");
    assert!(validate_topology(&tree));
    assert_eq!(to_newick(&tree, &WriteOptions::default()), "Ruru;");
}

#[test]
fn test_default_names_on_parsing() {
    let options = ParseOptions::new().with_default_names(true);
    let tree = parse_str_with("((Kea,),Kaka);", &options).unwrap();

    assert!(tree.find_node("Leaf Node").is_some());
    assert!(tree.find_node("Internal Node").is_some());
    assert_eq!(tree.root_node().name(), "Root Node");
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---
#[test]
fn test_missing_semicolon() {
    let err = parse_str("((Kea:1.0,Kaka:2.0)Nestor:3.0,Kakapo:4.0)Parrots").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEnd { .. }));
    assert!(err.to_string().contains("unexpected end"));
}

#[test]
fn test_missing_comma() {
    let err = parse_str("(Kea:1.0 Kaka:2.0)Nestor;").unwrap_err();
    assert!(matches!(err, ParseError::Grammar { .. }));
    assert!(err.to_string().contains("unexpected name 'Kaka'"));
    assert_eq!(err.position(), Some((1, 10)));
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse_str("((Kea:1.0,Kaka:2.0)Nestor:3.0;").unwrap_err();
    assert!(err.to_string().contains("not enough ')'"));

    let err = parse_str("(Kea:1.0))Nestor;").unwrap_err();
    assert!(err.to_string().contains("too many ')'"));
}

#[test]
fn test_empty_parentheses() {
    assert!(parse_str("();").is_err());
    assert!(parse_str("()();").is_err());
}

#[test]
fn test_reopened_tree() {
    let err = parse_str("(Kea,Kaka)[and again](Tui,Weka);").unwrap_err();
    assert!(err.to_string().contains("already closed"));
}

#[test]
fn test_bare_name_is_not_a_tree() {
    assert!(parse_str("Kea;").is_err());
}

#[test]
fn test_invalid_branch_length() {
    let err = parse_str("(Kea:1.0,Kaka:abc)Nestor;").unwrap_err();
    assert!(matches!(err, ParseError::Lexing { .. }));
    assert_eq!(err.position(), Some((1, 14)));
}

#[test]
fn test_second_tree_is_trailing_content() {
    let err = parse_str("(Kea,Kaka)Nestor; (Tui,Weka)Passerines;").unwrap_err();
    assert!(matches!(err, ParseError::TrailingContent { .. }));
}

// --- TESTS MULTIPLE TREES ---
#[test]
fn test_parsing_several_trees() {
    let trees = parse_all("(Kea,Kaka)Nestor; ((Weka,Pukeko)Rails,Takahe)Birds;\n[done]").unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].root_node().name(), "Nestor");
    assert_eq!(trees[0].node_count(), 3);
    assert_eq!(trees[1].root_node().name(), "Birds");
    assert_eq!(trees[1].node_count(), 5);
}

#[test]
fn test_parsing_no_trees() {
    assert!(parse_all("").unwrap().is_empty());
    assert!(parse_all(" [header only] ").unwrap().is_empty());
}

// --- TESTS WRITING ---
#[test]
fn test_round_trip_is_text_identical() {
    let newick = "((B:2,(D:2,E:2)C:2)A:2,F:2,(H:2,I:2)G:2)R;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree, &WriteOptions::default()), newick);
}

#[test]
fn test_writing_without_names_or_lengths() {
    let tree = parse_str("((B:2,(D:2,E:2)C:2)A:2,F:2,(H:2,I:2)G:2)R;").unwrap();

    let no_lengths = to_newick(&tree, &WriteOptions::new().with_branch_lengths(false));
    assert_eq!(no_lengths, "((B,(D,E)C)A,F,(H,I)G)R;");

    let no_names = to_newick(&tree, &WriteOptions::new().with_names(false));
    assert_eq!(no_names, "((:2,(:2,:2):2):2,:2,(:2,:2):2);");
}

#[test]
fn test_writing_precision() {
    let tree = parse_str("(Kea:1.23456789,Kaka:2)Nestor;").unwrap();

    let text = to_newick(&tree, &WriteOptions::new().with_precision(2));
    assert_eq!(text, "(Kea:1.23,Kaka:2)Nestor;");
}

#[test]
fn test_writing_default_names() {
    let tree = parse_str("(,);").unwrap();

    let text = to_newick(
        &tree,
        &WriteOptions::new()
            .with_default_names(true)
            .with_branch_lengths(false),
    );
    assert_eq!(text, "(Leaf_Node,Leaf_Node)Root_Node;");
}

#[test]
fn test_writing_quotes_names_when_needed() {
    let mut tree = parse_str("(Kea:1,Kaka:2)Nestor;").unwrap();
    let kea = tree.find_node("Kea").unwrap();
    tree[kea].data_mut().name = "3rd Taxon".to_string();
    let kaka = tree.find_node("Kaka").unwrap();
    tree[kaka].data_mut().name = "Second's taxon".to_string();

    let text = to_newick(&tree, &WriteOptions::default());
    assert_eq!(text, "('3rd Taxon':1,'Second''s taxon':2)Nestor;");

    let reparsed = parse_str(&text).unwrap();
    assert!(reparsed.find_node("3rd Taxon").is_some());
    assert!(reparsed.find_node("Second's taxon").is_some());
}

#[test]
fn test_written_spaces_become_underscores() {
    let tree = parse_str("(Kea_bird:1,Kaka:2)Nestor;").unwrap();
    assert!(tree.find_node("Kea bird").is_some());

    let text = to_newick(&tree, &WriteOptions::default());
    assert_eq!(text, "(Kea_bird:1,Kaka:2)Nestor;");
}

#[test]
fn test_annotations_survive_round_trip() {
    let tree = parse_str("(Kea[seen twice]{conf=0.9}:1.5,Kaka:2)Nestor[type species];").unwrap();

    let text = to_newick(&tree, &WriteOptions::default());
    assert_eq!(text, "(Kea:1.5[seen twice]{conf=0.9},Kaka:2)Nestor[type species];");

    let again = parse_str(&text).unwrap();
    let kea = again.node(again.find_node("Kea").unwrap());
    assert_eq!(kea.data().comments, ["seen twice"]);
    assert_eq!(kea.data().tags, ["conf=0.9"]);

    let plain = to_newick(&tree, &WriteOptions::new().with_comments(false).with_tags(false));
    assert_eq!(plain, "(Kea:1.5,Kaka:2)Nestor;");
}

#[test]
fn test_writing_from_another_link() {
    let tree = parse_str("((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;").unwrap();
    let nestor = tree.find_node("Nestor").unwrap();

    let text = to_newick_from(&tree, tree.node(nestor).link(), &WriteOptions::default());
    assert_eq!(text, "((Kakapo:4)Parrots:0.5,Kea:1.5,Kaka:2)Nestor;");

    // the tree itself keeps its root
    assert_eq!(tree.root_node().name(), "Parrots");
}

#[test]
fn test_tree_to_elements_closing_order() {
    let tree = parse_str("((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;").unwrap();
    let elements = tree_to_elements(&tree, tree.root_link().index());

    let names: Vec<&str> = elements.iter().map(|element| element.name.as_str()).collect();
    assert_eq!(names, ["Kea", "Kaka", "Nestor", "Kakapo", "Parrots"]);
    let depths: Vec<usize> = elements.iter().map(|element| element.depth).collect();
    assert_eq!(depths, [2, 2, 1, 1, 0]);

    assert!(elements[0].is_leaf);
    assert!(!elements[2].is_leaf);
    assert_eq!(elements[0].branch_length, Some(1.5));
    assert_eq!(elements[4].branch_length, None);
}

// --- TESTS PARSING WHOLE FILE ---
#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join(format!("phylink_roundtrip_{}.nwk", std::process::id()));
    let trees = vec![
        parse_str("((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;").unwrap(),
        parse_str("(Tui:1,(Hihi:2,Korimako:3)Honeyeaters:4)Passerines;").unwrap(),
    ];

    let file = File::create(&path).unwrap();
    write_newick_file(file, &trees, &WriteOptions::default()).unwrap();
    let parsed = parse_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(parsed.len(), 2);
    assert_eq!(
        to_newick(&parsed[0], &WriteOptions::default()),
        "((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;"
    );
    assert_eq!(
        to_newick(&parsed[1], &WriteOptions::default()),
        "(Tui:1,(Hihi:2,Korimako:3)Honeyeaters:4)Passerines;"
    );
}

#[test]
fn test_parse_file_reports_io_error() {
    let err = parse_file("no-such-directory/phylink-missing.nwk").unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
    assert_eq!(err.position(), None);
}

// --- PROPERTY TESTS ---
/// A randomly shaped subtree, rendered in the writer's canonical style:
/// branch lengths are quarter multiples so their decimal text is exact.
#[derive(Debug, Clone)]
enum Shape {
    Leaf {
        name: String,
        quarters: i32,
    },
    Inner {
        name: String,
        quarters: i32,
        children: Vec<Shape>,
    },
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = ("[A-Z][a-z]{2,7}", 0..400i32)
        .prop_map(|(name, quarters)| Shape::Leaf { name, quarters });
    leaf.prop_recursive(4, 24, 3, |inner| {
        ("[A-Z][a-z]{2,7}", 0..400i32, prop::collection::vec(inner, 2..4)).prop_map(
            |(name, quarters, children)| Shape::Inner {
                name,
                quarters,
                children,
            },
        )
    })
}

fn newick_strategy() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,7}", prop::collection::vec(shape_strategy(), 2..5)).prop_map(
        |(root, children)| {
            let mut out = String::from("(");
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render_shape(child, &mut out);
            }
            out.push(')');
            out.push_str(&root);
            out.push(';');
            out
        },
    )
}

fn render_shape(shape: &Shape, out: &mut String) {
    match shape {
        Shape::Leaf { name, quarters } => {
            out.push_str(name);
            out.push(':');
            out.push_str(&quarters_text(*quarters));
        }
        Shape::Inner {
            name,
            quarters,
            children,
        } => {
            out.push('(');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render_shape(child, out);
            }
            out.push(')');
            out.push_str(name);
            out.push(':');
            out.push_str(&quarters_text(*quarters));
        }
    }
}

fn quarters_text(quarters: i32) -> String {
    format!("{}", f64::from(quarters) / 4.0)
}

proptest! {
    #[test]
    fn prop_parse_write_round_trip(newick in newick_strategy()) {
        let tree = parse_str(&newick).unwrap();
        prop_assert!(validate_topology(&tree));
        prop_assert_eq!(to_newick(&tree, &WriteOptions::default()), newick);
    }

    #[test]
    fn prop_reroot_anywhere_stays_valid(newick in newick_strategy()) {
        let tree = parse_str(&newick).unwrap();
        let home = tree.root_link().index();
        for i in 0..tree.link_count() {
            let mut moved = tree.clone();
            moved.reroot(LinkIndex(i));
            prop_assert!(validate_topology(&moved));
            prop_assert_eq!(moved.node_count(), tree.node_count());

            // rerooting back restores the original rendering exactly
            moved.reroot(home);
            prop_assert_eq!(to_newick(&moved, &WriteOptions::default()), newick.as_str());
        }
    }
}
