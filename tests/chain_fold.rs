//! Fold/unfold behavior over parsed documents

use mathdoc::ast::elements::GroupKind;
use mathdoc::parsing::{ParseOutcome, Parser};
use mathdoc::ParserConfig;

fn parse(source: &str) -> ParseOutcome {
    Parser::new(ParserConfig::default())
        .parse_document(source)
        .expect("markup read failed")
}

fn section_with_two_cells() -> ParseOutcome {
    parse(
        r#"<doc><cell type="section"><editor type="section"><line>S</line></editor></cell><cell type="code"><input><editor type="input"><line>a;</line></editor></input></cell><cell type="text"><editor type="text"><line>t</line></editor></cell></doc>"#,
    )
}

#[test]
fn test_show_after_hide_restores_the_chain() {
    let mut outcome = section_with_two_cells();
    let root = outcome.root.unwrap();
    let before_content: Vec<_> = outcome.tree.content_chain(root).collect();
    let before_draw: Vec<_> = outcome.tree.draw_chain(root).collect();
    assert_eq!(before_content.len(), 3);

    // A forced break on the head of the segment being hidden.
    outcome.tree[before_content[1]].force_break_line(true);

    assert!(outcome.tree.fold(root));
    assert_eq!(outcome.tree.chain_len(root), 1);

    assert!(outcome.tree.unfold(root));
    let after_content: Vec<_> = outcome.tree.content_chain(root).collect();
    let after_draw: Vec<_> = outcome.tree.draw_chain(root).collect();
    assert_eq!(before_content, after_content);
    assert_eq!(before_draw, after_draw);
    // The break on the segment head survived the cycle.
    assert!(outcome.tree[after_content[1]].forced_break_line());
}

#[test]
fn test_unfold_reattaches_as_successor() {
    let mut outcome = section_with_two_cells();
    let root = outcome.root.unwrap();
    let detached = outcome.tree[root].next().unwrap();

    assert!(outcome.tree.fold(root));
    assert_eq!(outcome.tree[root].next(), None);
    let group = outcome.tree[root].kind().as_group().unwrap();
    assert_eq!(group.folded, Some(detached));

    assert!(outcome.tree.unfold(root));
    assert_eq!(outcome.tree[root].next(), Some(detached));
    let group = outcome.tree[root].kind().as_group().unwrap();
    assert_eq!(group.folded, None);
}

#[test]
fn test_markup_fold_element_installs_folded_chain() {
    let outcome = parse(
        r#"<doc><cell type="section"><editor type="section"><line>S</line></editor><fold><cell type="code"><input><editor type="input"><line>a;</line></editor></input></cell><cell type="text"><editor type="text"><line>t</line></editor></cell></fold></cell></doc>"#,
    );
    let root = outcome.root.unwrap();
    // The folded cells are not part of the visible chain.
    assert_eq!(outcome.tree.chain_len(root), 1);

    let group = outcome.tree[root].kind().as_group().unwrap();
    assert_eq!(group.kind, GroupKind::Section);
    let folded = group.folded.expect("fold was not installed");

    // The folded chain is spliced in both orders and claimed by the group.
    assert_eq!(outcome.tree.chain_len(folded), 2);
    assert_eq!(outcome.tree.draw_chain_len(folded), 2);
    for id in outcome.tree.content_chain(folded).collect::<Vec<_>>() {
        assert_eq!(outcome.tree[id].group(), Some(root));
    }

    let kinds: Vec<_> = outcome
        .tree
        .content_chain(folded)
        .map(|id| outcome.tree[id].kind().as_group().unwrap().kind)
        .collect();
    assert_eq!(kinds, [GroupKind::Code, GroupKind::PlainText]);
}

#[test]
fn test_empty_fold_installs_nothing() {
    let outcome = parse(
        r#"<doc><cell type="section"><editor type="section"><line>S</line></editor><fold></fold></cell></doc>"#,
    );
    let root = outcome.root.unwrap();
    let group = outcome.tree[root].kind().as_group().unwrap();
    assert!(group.folded.is_none());
}

#[test]
fn test_unfolding_markup_fold_extends_the_visible_chain() {
    let mut outcome = parse(
        r#"<doc><cell type="section"><editor type="section"><line>S</line></editor><fold><cell type="text"><editor type="text"><line>t</line></editor></cell></fold></cell></doc>"#,
    );
    let root = outcome.root.unwrap();
    assert!(outcome.tree.unfold(root));
    assert_eq!(outcome.tree.chain_len(root), 2);
    assert_eq!(outcome.tree.draw_chain_len(root), 2);
    // Its own inverse: hiding again empties the visible chain.
    assert!(outcome.tree.fold(root));
    assert_eq!(outcome.tree.chain_len(root), 1);
}
