//! Unit tests for isolated expression elements
//!
//! Each test parses one element (with minimal siblings) and verifies slot
//! wiring, arity behavior and string form rather than just node counts.

use mathdoc::ast::elements::{FractionStyle, GroupKind, SumStyle};
use mathdoc::ast::{NodeKind, TextStyle};
use mathdoc::parsing::{ParseOutcome, Parser};
use mathdoc::ParserConfig;
use rstest::rstest;

fn parse(source: &str) -> ParseOutcome {
    Parser::new(ParserConfig::default())
        .parse_document(source)
        .expect("markup read failed")
}

#[test]
fn test_fraction_slots_and_string_form() {
    let outcome = parse("<mth><f><n>1</n><n>2</n></f></mth>");
    let root = outcome.root.expect("no root");
    let frac = outcome.tree[root].kind().as_fraction().expect("not a fraction");
    assert_eq!(frac.style, FractionStyle::Normal);

    let num = outcome.tree[frac.num].kind().as_text().unwrap();
    let denom = outcome.tree[frac.denom].kind().as_text().unwrap();
    assert_eq!(num.value(), "1");
    assert_eq!(denom.value(), "2");
    assert_eq!(outcome.tree.to_text(root), "1/2");
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_fraction_missing_denominator_yields_nothing() {
    let outcome = parse("<mth><f><n>1</n></f></mth>");
    assert!(outcome.root.is_none());
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_fraction_attributes_select_style() {
    let outcome = parse(r#"<mth><f line="no"><n>7</n><n>3</n></f></mth>"#);
    let root = outcome.root.unwrap();
    let frac = outcome.tree[root].kind().as_fraction().unwrap();
    assert_eq!(frac.style, FractionStyle::NoLine);

    let outcome = parse(r#"<mth><f diffstyle="yes"><v>d</v><v>dx</v></f></mth>"#);
    let root = outcome.root.unwrap();
    let frac = outcome.tree[root].kind().as_fraction().unwrap();
    assert_eq!(frac.style, FractionStyle::Derivative);
}

#[test]
fn test_composite_uses_exactly_first_k_children() {
    // A subscript takes two children; the third is not consumed.
    let outcome = parse("<mth><i><v>a</v><v>b</v><v>c</v></i></mth>");
    let root = outcome.root.unwrap();
    let sub = outcome.tree[root].kind().as_subscript().expect("not a subscript");
    assert_eq!(outcome.tree.to_text(sub.base), "a");
    assert_eq!(outcome.tree.to_text(sub.index), "b");
    // Only the subscript itself is in the root chain.
    assert_eq!(outcome.tree.chain_len(root), 1);
}

#[test]
fn test_subsup_has_three_slots() {
    let outcome = parse("<mth><ie><v>x</v><n>1</n><n>2</n></ie></mth>");
    let root = outcome.root.unwrap();
    let subsup = outcome.tree[root].kind().as_subsup().expect("not a subsup");
    assert_eq!(outcome.tree.to_text(subsup.base), "x");
    assert_eq!(outcome.tree.to_text(subsup.index), "1");
    assert_eq!(outcome.tree.to_text(subsup.exponent), "2");
    assert_eq!(outcome.tree.to_text(root), "x[1]^2");

    // Two children are one short.
    let outcome = parse("<mth><ie><v>x</v><n>1</n></ie></mth>");
    assert!(outcome.root.is_none());
}

#[test]
fn test_power_matrix_convention_from_attributes() {
    let outcome = parse("<mth><e><v>x</v><n>2</n></e></mth>");
    let root = outcome.root.unwrap();
    assert!(!outcome.tree[root].kind().as_power().unwrap().matrix_convention);

    let outcome = parse(r#"<mth><e mat="true"><v>A</v><n>2</n></e></mth>"#);
    let root = outcome.root.unwrap();
    assert!(outcome.tree[root].kind().as_power().unwrap().matrix_convention);
}

#[test]
fn test_sum_and_product() {
    let outcome = parse("<mth><sm><v>i</v><n>10</n><v>body</v></sm></mth>");
    let root = outcome.root.unwrap();
    let sum = outcome.tree[root].kind().as_sum().unwrap();
    assert_eq!(sum.style, SumStyle::Sum);
    assert!(sum.over.is_some());
    assert_eq!(outcome.tree.to_text(root), "sum(body, i, 10)");

    let outcome = parse(r#"<mth><sm type="prod"><v>i</v><n>10</n><v>body</v></sm></mth>"#);
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree[root].kind().as_sum().unwrap().style, SumStyle::Product);
}

#[test]
fn test_list_sum_consumes_but_drops_upper_bound() {
    let outcome = parse(r#"<mth><sm type="lsum"><v>i</v><v>skipped</v><v>body</v></sm></mth>"#);
    let root = outcome.root.unwrap();
    let sum = outcome.tree[root].kind().as_sum().unwrap();
    assert!(sum.over.is_none());
    assert_eq!(outcome.tree.to_text(root), "sum(body, i)");
    // under + base + the sum itself; the skipped slot was never built.
    assert_eq!(outcome.tree.len(), 3);

    // The slot still has to exist: two children are not enough.
    let outcome = parse(r#"<mth><sm type="lsum"><v>i</v><v>body</v></sm></mth>"#);
    assert!(outcome.root.is_none());
}

#[test]
fn test_integral_definite_and_indefinite_forms() {
    // No attributes: the definite form takes four children.
    let outcome = parse("<mth><in><n>0</n><n>1</n><v>x</v><v>dx</v></in></mth>");
    let root = outcome.root.unwrap();
    let int = outcome.tree[root].kind().as_integral().unwrap();
    assert!(int.is_definite());
    assert_eq!(outcome.tree.to_text(root), "integrate(x, dx, 0, 1)");

    // Any attribute: the indefinite form takes two.
    let outcome = parse(r#"<mth><in def="false"><v>x</v><v>dx</v></in></mth>"#);
    let root = outcome.root.unwrap();
    let int = outcome.tree[root].kind().as_integral().unwrap();
    assert!(!int.is_definite());
    assert_eq!(outcome.tree.to_text(root), "integrate(x, dx)");

    // The definite form with only three children is incomplete.
    let outcome = parse("<mth><in><n>0</n><n>1</n><v>x</v></in></mth>");
    assert!(outcome.root.is_none());
}

#[test]
fn test_limit_takes_three_children() {
    let outcome = parse("<mth><lm><v>lim</v><v>x->0</v><v>x</v></lm></mth>");
    let root = outcome.root.unwrap();
    assert!(matches!(outcome.tree[root].kind(), NodeKind::Limit(_)));

    let outcome = parse("<mth><lm><v>lim</v><v>x->0</v></lm></mth>");
    assert!(outcome.root.is_none());
}

#[test]
fn test_wrappers_take_their_whole_child_run() {
    let outcome = parse("<mth><q><n>1</n><v>+</v><v>x</v></q></mth>");
    let root = outcome.root.unwrap();
    let inner = match outcome.tree[root].kind() {
        NodeKind::Root(root_node) => root_node.inner,
        other => panic!("expected a root node, got {}", other.name()),
    };
    assert_eq!(outcome.tree.chain_len(inner), 3);
    assert_eq!(outcome.tree.to_text(root), "sqrt(1+x)");
}

#[test]
fn test_paren_attributes_suppress_printing() {
    let outcome = parse("<mth><p><v>x</v></p></mth>");
    let root = outcome.root.unwrap();
    match outcome.tree[root].kind() {
        NodeKind::Paren(paren) => assert!(paren.print_parens),
        other => panic!("expected parens, got {}", other.name()),
    }

    let outcome = parse(r#"<mth><p print="no"><v>x</v></p></mth>"#);
    let root = outcome.root.unwrap();
    match outcome.tree[root].kind() {
        NodeKind::Paren(paren) => assert!(!paren.print_parens),
        other => panic!("expected parens, got {}", other.name()),
    }
}

#[test]
fn test_matrix_shape_and_flags() {
    let outcome = parse(
        r#"<mth><tb special="true"><mtr><mtd><n>1</n></mtd><mtd><n>2</n></mtd></mtr><mtr><mtd><n>3</n></mtd><mtd><n>4</n></mtd></mtr></tb></mth>"#,
    );
    let root = outcome.root.unwrap();
    let matrix = outcome.tree[root].kind().as_matrix().unwrap();
    assert!(matrix.special);
    assert!(!matrix.inference);
    assert_eq!(matrix.row_count(), 2);
    assert_eq!(matrix.col_count(), 2);
    assert_eq!(outcome.tree.to_text(root), "matrix([1, 2], [3, 4])");
}

#[test]
fn test_matrix_inference_implies_special() {
    let outcome = parse(r#"<mth><tb inference="true"><mtr><mtd><n>1</n></mtd></mtr></tb></mth>"#);
    let root = outcome.root.unwrap();
    let matrix = outcome.tree[root].kind().as_matrix().unwrap();
    assert!(matrix.inference);
    assert!(matrix.special);
}

#[test]
fn test_unknown_leaf_tag_warns_once_and_siblings_survive() {
    let outcome = parse("<mth><v>a</v><zzz>x</zzz><yyy>y</yyy><v>b</v></mth>");
    let root = outcome.root.unwrap();
    // The unknown elements contribute nothing; a and b still chain up.
    let texts: Vec<String> = outcome
        .tree
        .content_chain(root)
        .map(|id| outcome.tree.to_text(id))
        .collect();
    assert_eq!(texts, ["a", "b"]);
    // Exactly one warning for the whole parse, naming the content.
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].content().contains("zzz"));
    assert!(outcome.warnings[0].content().contains('x'));
}

#[test]
fn test_unknown_tag_with_element_children_flattens() {
    let outcome = parse("<mth><wrapper><v>a</v><v>b</v></wrapper></mth>");
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree.chain_len(root), 2);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_label_styles_and_forced_break() {
    let outcome = parse("<mth><lbl>(%o1)</lbl></mth>");
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree[root].style(), TextStyle::Label);
    assert!(outcome.tree[root].forced_break_line());

    let outcome = parse(r#"<mth><lbl userdefined="yes">(mine)</lbl></mth>"#);
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree[root].style(), TextStyle::UserLabel);
}

#[test]
fn test_error_text_gets_error_category() {
    let outcome = parse(r#"<mth><t type="error">oops</t></mth>"#);
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree[root].style(), TextStyle::Error);
    assert_eq!(outcome.tree[root].category(), mathdoc::Category::Error);
}

#[test]
fn test_hidden_leaf() {
    let outcome = parse("<mth><h>*</h></mth>");
    let root = outcome.root.unwrap();
    assert!(outcome.tree[root].is_hidden());
}

#[test]
fn test_styled_leaves() {
    for (source, style) in [
        ("<mth><v>x</v></mth>", TextStyle::Variable),
        ("<mth><n>5</n></mth>", TextStyle::Number),
        ("<mth><g>alpha</g></mth>", TextStyle::GreekConstant),
        ("<mth><s>%e</s></mth>", TextStyle::SpecialConstant),
        ("<mth><fnm>sin</fnm></mth>", TextStyle::Function),
        ("<mth><st>hello</st></mth>", TextStyle::String),
    ] {
        let outcome = parse(source);
        let root = outcome.root.unwrap();
        assert_eq!(outcome.tree[root].style(), style, "source: {}", source);
    }
}

#[test]
fn test_char_code_leaf() {
    let outcome = parse("<mth><ascii>65</ascii></mth>");
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree.to_text(root), "A");

    // Unparseable codes keep the literal content.
    let outcome = parse("<mth><ascii>notanumber</ascii></mth>");
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree.to_text(root), "notanumber");
}

#[test]
fn test_space_leaf() {
    let outcome = parse("<mth><v>a</v><mspace/><v>b</v></mth>");
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree.chain_len(root), 3);
    assert_eq!(outcome.tree.chain_to_text(root), "a b");
}

#[test]
fn test_alt_copy_attribute_applies_after_dispatch() {
    let outcome = parse(r#"<mth><v altCopy="x_alt">x</v><f altCopy="half"><n>1</n><n>2</n></f></mth>"#);
    let root = outcome.root.unwrap();
    let ids: Vec<_> = outcome.tree.content_chain(root).collect();
    assert_eq!(outcome.tree[ids[0]].alt_copy_text(), Some("x_alt"));
    assert_eq!(outcome.tree[ids[1]].alt_copy_text(), Some("half"));
}

#[test]
fn test_function_application() {
    let outcome = parse("<mth><fn><fnm>sin</fnm><p><v>x</v></p></fn></mth>");
    let root = outcome.root.unwrap();
    assert_eq!(outcome.tree.to_text(root), "sin(x)");
}

#[test]
fn test_differential_restores_fraction_style() {
    let outcome = parse(
        "<mth><d><f><v>d</v><v>dx</v></f><v>f</v></d><f><n>1</n><n>2</n></f></mth>",
    );
    let root = outcome.root.unwrap();
    let ids: Vec<_> = outcome.tree.content_chain(root).collect();
    assert_eq!(ids.len(), 2);
    // Inside the differential the fraction took the derivative style.
    let diff = match outcome.tree[ids[0]].kind() {
        NodeKind::Differential(diff) => diff,
        other => panic!("expected a differential, got {}", other.name()),
    };
    let inner_frac = outcome.tree[diff.diff].kind().as_fraction().unwrap();
    assert_eq!(inner_frac.style, FractionStyle::Derivative);
    // The sibling fraction parsed afterwards is back to normal.
    let sibling = outcome.tree[ids[1]].kind().as_fraction().unwrap();
    assert_eq!(sibling.style, FractionStyle::Normal);
}

#[test]
fn test_editor_lines_join_and_category() {
    let outcome = parse(
        r#"<doc><editor type="text"><line>a</line><line></line><line>b</line></editor></doc>"#,
    );
    let root = outcome.root.unwrap();
    let editor = outcome.tree[root].kind().as_editor().unwrap();
    assert_eq!(editor.text(), "a\n\nb");
    assert_eq!(editor.line_count(), 3);
    assert_eq!(outcome.tree[root].category(), mathdoc::Category::Text);
}

#[rstest]
#[case("subsection", Some("4"), GroupKind::SubSubsection)]
#[case("subsection", Some("0"), GroupKind::Subsection)]
#[case("subsection", None, GroupKind::Subsection)]
#[case("subsection", Some("3"), GroupKind::Subsection)]
#[case("subsubsection", None, GroupKind::SubSubsection)]
#[case("section", None, GroupKind::Section)]
#[case("title", None, GroupKind::Title)]
fn test_sectioning_level_compatibility(
    #[case] group_type: &str,
    #[case] level: Option<&str>,
    #[case] expected: GroupKind,
) {
    let level_attr = level
        .map(|value| format!(r#" sectioning_level="{}""#, value))
        .unwrap_or_default();
    let source = format!(
        r#"<doc><cell type="{}"{}><editor type="{}"><line>Heading</line></editor></cell></doc>"#,
        group_type, level_attr, group_type
    );
    let outcome = parse(&source);
    let root = outcome.root.expect("no group produced");
    let group = outcome.tree[root].kind().as_group().expect("not a group");
    assert_eq!(group.kind, expected);
}

#[test]
fn test_unknown_group_type_is_skipped() {
    let outcome = parse(r#"<doc><cell type="mystery"><editor><line>x</line></editor></cell></doc>"#);
    assert!(outcome.root.is_none());
    assert_eq!(outcome.warnings.len(), 1);
}
