/// End-to-end behaviour of a `Card` component with a `title` slot and a
/// `tab` collection slot, driven through the generated accessors.

use maud::html;
use pretty_assertions::assert_eq;
use rhtmx_slots::{
    BaseSlot, Component, ComponentType, ContentBlock, SlotCall, SlotError, Value,
};
use rstest::rstest;
use std::sync::Arc;

fn card_type() -> Arc<ComponentType> {
    let mut card = ComponentType::new("Card");
    card.slot("title").unwrap();
    card.collection("tab").unwrap();
    Arc::new(card)
}

/// Stand-in for a host component's render step
fn render(card: &Component) -> String {
    let title = card
        .get_slot("title")
        .unwrap()
        .one()
        .and_then(|t| t.content_str())
        .unwrap_or_default()
        .to_string();
    let tabs = card.get_slot("tab").unwrap();
    html! {
        div.card {
            h2 { (title) }
            ul {
                @for tab in tabs.many() {
                    li { (maud::PreEscaped(tab.content_str().unwrap_or_default())) }
                }
            }
        }
    }
    .into_string()
}

#[test]
fn test_card_scenario() {
    let mut c = card_type().instantiate();

    c.call("title", SlotCall::new().content("Hello")).unwrap();
    let title = c.call("title", SlotCall::new()).unwrap().read().unwrap();
    assert_eq!(title.one().and_then(|t| t.content_str()), Some("Hello"));

    for label in ["A", "B", "C"] {
        c.call("tab", SlotCall::new().block(ContentBlock::text(label)))
            .unwrap();
    }
    let tabs = c.call("tabs", SlotCall::new()).unwrap().read().unwrap();
    assert_eq!(tabs.content_strs(), vec![Some("A"), Some("B"), Some("C")]);

    assert_eq!(
        render(&c),
        r#"<div class="card"><h2>Hello</h2><ul><li>A</li><li>B</li><li>C</li></ul></div>"#
    );
}

#[test]
fn test_reads_before_writes() {
    let mut c = card_type().instantiate();
    for _ in 0..2 {
        assert!(c.call("title", SlotCall::new()).unwrap().read().unwrap().one().is_none());
        assert!(c.call("tabs", SlotCall::new()).unwrap().read().unwrap().many().is_empty());
        assert!(!c.is_slot_set("title").unwrap());
        assert!(!c.is_slot_set("tab").unwrap());
    }
    assert!(c.store().is_empty());
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(20)]
fn test_append_preserves_write_order(#[case] n: usize) {
    let mut c = card_type().instantiate();
    let expected: Vec<String> = (1..=n).map(|i| format!("C{}", i)).collect();
    for text in &expected {
        c.call("tab", SlotCall::new().content(text.as_str())).unwrap();
    }
    let tabs = c.get_slot("tab").unwrap();
    let actual: Vec<&str> = tabs.content_strs().into_iter().flatten().collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_plural_accessor_writes_with_arguments() {
    let mut c = card_type().instantiate();
    assert!(c.call("tabs", SlotCall::new().content("A")).unwrap().is_written());
    assert!(c.call("tabs", SlotCall::new().with("id", "b")).unwrap().is_written());
    assert_eq!(c.get_slot("tab").unwrap().many().len(), 2);
}

#[test]
fn test_conflicting_content_is_rejected_without_mutation() {
    let mut c = card_type().instantiate();
    c.call("tab", SlotCall::new().content("kept")).unwrap();

    for accessor in ["title", "tab", "tabs"] {
        let err = c
            .call(
                accessor,
                SlotCall::new().content("X").block(ContentBlock::text("Y")),
            )
            .unwrap_err();
        assert!(matches!(err, SlotError::ConflictingContent { .. }), "{accessor}: {err}");
    }

    assert!(!c.is_slot_set("title").unwrap());
    assert_eq!(c.get_slot("tab").unwrap().content_strs(), vec![Some("kept")]);
}

#[test]
fn test_bulk_seed_matches_sequential_appends() {
    let seeds = vec!["home", "profile", "settings"];
    let mut counter = 0;

    let mut bulk = card_type().instantiate();
    bulk.call(
        "tabs",
        SlotCall::new()
            .arg(seeds.clone())
            .with("size", "sm")
            .block(ContentBlock::new(|out| {
                counter += 1;
                out.push_text("tab");
                Ok(())
            })),
    )
    .unwrap();
    assert_eq!(counter, 3);

    let mut sequential = card_type().instantiate();
    for seed in &seeds {
        sequential
            .call(
                "tab",
                SlotCall::new()
                    .arg(*seed)
                    .with("size", "sm")
                    .block(ContentBlock::text("tab")),
            )
            .unwrap();
    }

    let bulk_tabs = bulk.slots::<BaseSlot>("tab").unwrap();
    let sequential_tabs = sequential.slots::<BaseSlot>("tab").unwrap();
    assert_eq!(bulk_tabs, sequential_tabs);
    assert_eq!(bulk_tabs[2].args().positional().next(), Some(&Value::from("settings")));
}

#[test]
fn test_raw_read_write_api() {
    let mut c = card_type().instantiate();
    c.set_slot("title", SlotCall::new()).unwrap();
    assert!(c.is_slot_set("title").unwrap());
    assert!(c.get_slot("title").unwrap().one().unwrap().content().is_none());

    c.set_slot("tab", SlotCall::new().content("one")).unwrap();
    assert_eq!(c.get_slot("tab").unwrap().content_strs(), vec![Some("one")]);
}

#[test]
fn test_unknown_slot_names_registered_slots() {
    let mut c = card_type().instantiate();
    let err = c.set_slot("footer", SlotCall::new().content("x")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown slot `footer` on Card; registered slots: [tab, title]"
    );
    assert!(matches!(c.get_slot("footer"), Err(SlotError::UnknownSlot { .. })));
}

#[test]
fn test_markup_block_content() {
    let mut c = card_type().instantiate();
    let name = "<Ada>";
    c.call(
        "title",
        SlotCall::new().block(ContentBlock::markup(|| html! { strong { (name) } })),
    )
    .unwrap();
    assert_eq!(
        c.get_slot("title").unwrap().content_strs(),
        vec![Some("<strong>&lt;Ada&gt;</strong>")]
    );
}
