//! End-to-end behavior of the permalink synchronizer driven through a page.

use dom::{Id, Node};
use page::{Page, PageError};
use permalink::{HighlightOnLoad, MarkCodeBlocks, PermalinkSync};

const COMMIT_URL: &str = "https://example.com/commit/abc123";

fn commit_page_markup() -> String {
    format!(
        r#"<div class="commit"><p>link: <span class="permalink">{COMMIT_URL}</span> (copy me)</p><p>path: <span class="permalink-path" contenteditable></span></p><pre><code>fn main() {{}}</code></pre></div>"#
    )
}

fn ready_page() -> Page {
    let mut page = Page::new(dom::parse(&commit_page_markup()));
    PermalinkSync::install(&mut page);
    page.dispatch_ready().unwrap();
    page
}

fn anchor(page: &Page) -> &Node {
    dom::find_by_class(page.document(), "permalink").expect("anchor present after ready")
}

fn path_target(page: &Page) -> Id {
    dom::find_by_class(page.document(), "permalink-path")
        .expect("path element present")
        .id()
}

fn href(page: &Page) -> String {
    anchor(page).attr("href").unwrap_or_default().to_string()
}

#[test]
fn initialization_turns_the_marker_span_into_an_anchor() {
    let page = ready_page();
    let anchor = anchor(&page);

    assert!(
        anchor.is_element_named("a"),
        "expected an anchor element, got: {anchor:?}"
    );
    assert_eq!(anchor.attr("href"), Some(COMMIT_URL));
    assert_eq!(dom::text_content(anchor), COMMIT_URL);
}

#[test]
fn initialization_replaces_the_span_at_the_same_position() {
    let page = ready_page();
    let Node::Document { children, .. } = page.document() else {
        panic!("expected document root");
    };
    // <p>link: <span.permalink>…</span> (copy me)</p> — the anchor must sit
    // between the two text nodes, exactly where the span was.
    let p_children = children[0].children().unwrap()[0].children().unwrap();
    assert!(
        matches!(&p_children[0], Node::Text { text, .. } if text == "link: "),
        "expected leading text, got: {p_children:?}"
    );
    assert!(
        p_children[1].is_element_named("a"),
        "expected anchor at the span's position, got: {p_children:?}"
    );
    assert!(
        matches!(&p_children[2], Node::Text { text, .. } if text == " (copy me)"),
        "expected trailing text, got: {p_children:?}"
    );

    // The marker span itself is gone from the tree.
    fn any_span_with_class(node: &Node, class: &str) -> bool {
        if node.is_element_named("span") && node.has_class(class) {
            return true;
        }
        node.children()
            .is_some_and(|c| c.iter().any(|n| any_span_with_class(n, class)))
    }
    assert!(
        !any_span_with_class(page.document(), "permalink"),
        "expected the marker span to be consumed"
    );
}

#[test]
fn anchor_copies_markup_content_not_just_text() {
    let markup = r#"<span class="permalink">https://example.com/<b>commit</b>/abc123</span><span class="permalink-path"></span>"#;
    let mut page = Page::new(dom::parse(markup));
    PermalinkSync::install(&mut page);
    page.dispatch_ready().unwrap();

    let anchor = anchor(&page);
    assert_eq!(
        dom::inner_markup(anchor),
        "https://example.com/<b>commit</b>/abc123"
    );
    // The link target is the text view of the same content.
    assert_eq!(anchor.attr("href"), Some("https://example.com/commit/abc123"));
}

#[test]
fn typing_a_path_appends_it_to_the_link_target() {
    let mut page = ready_page();
    let target = path_target(&page);

    page.input(target, "#L42").unwrap();
    assert_eq!(href(&page), format!("{COMMIT_URL}#L42"));
}

#[test]
fn only_the_latest_path_value_matters() {
    let mut page = ready_page();
    let target = path_target(&page);

    for text in ["#L1", "#L1-L9", "/tree/main", "#L42"] {
        page.input(target, text).unwrap();
    }
    assert_eq!(href(&page), format!("{COMMIT_URL}#L42"));
    assert_eq!(page.value_revision(target), 4);
}

#[test]
fn clearing_the_path_restores_the_initial_target() {
    let mut page = ready_page();
    let target = path_target(&page);

    page.input(target, "#L42").unwrap();
    page.input(target, "").unwrap();
    assert_eq!(href(&page), COMMIT_URL);
}

#[test]
fn zero_input_events_is_fine() {
    let page = ready_page();
    assert_eq!(href(&page), COMMIT_URL);
}

#[test]
fn missing_permalink_marker_fails_naming_it() {
    let mut page = Page::new(dom::parse(r#"<span class="permalink-path"></span>"#));
    PermalinkSync::install(&mut page);

    let err = page.dispatch_ready().unwrap_err();
    let PageError::Hook(hook_err) = &err else {
        panic!("expected a hook error, got: {err:?}");
    };
    assert!(
        hook_err.message.contains("\".permalink\""),
        "expected the missing marker named, got: {hook_err:?}"
    );
}

#[test]
fn missing_path_marker_fails_without_touching_the_tree() {
    let mut page = Page::new(dom::parse(r#"<p><span class="permalink">url</span></p>"#));
    let before = page.document().clone();
    PermalinkSync::install(&mut page);

    let err = page.dispatch_ready().unwrap_err();
    let PageError::Hook(hook_err) = &err else {
        panic!("expected a hook error, got: {err:?}");
    };
    assert!(
        hook_err.message.contains("permalink-path"),
        "expected the missing marker named, got: {hook_err:?}"
    );
    assert_eq!(*page.document(), before);
}

#[test]
fn repeat_ready_dispatch_is_a_no_op() {
    let mut page = ready_page();
    page.dispatch_ready().unwrap();

    // Still exactly one anchor, still the original target.
    assert_eq!(href(&page), COMMIT_URL);
    fn count_anchors(node: &Node) -> usize {
        let own = usize::from(node.is_element_named("a"));
        own + node
            .children()
            .map(|c| c.iter().map(count_anchors).sum())
            .unwrap_or(0)
    }
    assert_eq!(count_anchors(page.document()), 1);
}

#[test]
fn uninstalling_the_synchronizer_stops_updates() {
    let mut page = Page::new(dom::parse(&commit_page_markup()));
    let handle = PermalinkSync::install(&mut page);
    page.dispatch_ready().unwrap();
    let target = path_target(&page);

    page.input(target, "#L1").unwrap();
    assert!(page.uninstall(handle).is_some());
    page.input(target, "#L2").unwrap();

    assert_eq!(
        href(&page),
        format!("{COMMIT_URL}#L1"),
        "expected the target frozen at the last synchronized value"
    );
}

#[test]
fn input_on_unrelated_editables_is_ignored() {
    let markup = format!(
        r#"<span class="permalink">{COMMIT_URL}</span><span class="permalink-path"></span><span class="notes" contenteditable>scratch</span>"#
    );
    let mut page = Page::new(dom::parse(&markup));
    PermalinkSync::install(&mut page);
    page.dispatch_ready().unwrap();

    let notes = dom::find_by_class(page.document(), "notes").unwrap().id();
    page.input(notes, "changed").unwrap();
    assert_eq!(href(&page), COMMIT_URL);
}

#[test]
fn highlight_pass_and_synchronizer_share_the_page() {
    let mut page = Page::new(dom::parse(&commit_page_markup()));
    page.install(Box::new(HighlightOnLoad::new(MarkCodeBlocks)));
    PermalinkSync::install(&mut page);
    page.dispatch_ready().unwrap();

    assert!(
        dom::find_by_class(page.document(), "hljs").is_some(),
        "expected the load-time highlight pass to run"
    );
    assert_eq!(href(&page), COMMIT_URL);
}

#[test]
fn nested_markup_in_the_marker_keeps_working_through_inputs() {
    let markup = r#"<span class="permalink">https://example.com/<b>commit</b>/abc123</span><span class="permalink-path"></span>"#;
    let mut page = Page::new(dom::parse(markup));
    PermalinkSync::install(&mut page);
    page.dispatch_ready().unwrap();
    let target = path_target(&page);

    page.input(target, "#L7").unwrap();
    assert_eq!(href(&page), "https://example.com/commit/abc123#L7");
}

// The concrete scenario from the component's contract, end to end.
#[test]
fn commit_permalink_scenario() {
    let mut page = ready_page();
    let target = path_target(&page);
    assert_eq!(href(&page), "https://example.com/commit/abc123");

    page.input(target, "#L42").unwrap();
    assert_eq!(href(&page), "https://example.com/commit/abc123#L42");

    page.input(target, "").unwrap();
    assert_eq!(href(&page), "https://example.com/commit/abc123");
}
